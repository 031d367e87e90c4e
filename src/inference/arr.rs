use serde_json::Value;

use crate::ir::{Leaf, Ty};

/// Infer an array: the item type unifies every element, `[]` has item `any`.
pub(super) fn infer_array(xs: &[Value]) -> Ty {
    if xs.is_empty() {
        return Ty::array(Ty::leaf(Leaf::Any));
    }
    let items: Vec<Ty> = xs.iter().map(super::infer_value).collect();
    Ty::array(super::unify_owned(items))
}

/// Merge the item types of several observed arrays into one array. Every
/// item type, `any` from an empty array included, joins the sub-unification.
pub(super) fn merge_arrays(items: Vec<Ty>) -> Ty {
    Ty::array(super::unify_owned(items))
}
