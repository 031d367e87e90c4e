use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::ir::{Field, ObjectTy, Ty};

pub(super) fn infer_object(map: &Map<String, Value>) -> ObjectTy {
    let fields = map
        .iter()
        .map(|(k, v)| (k.clone(), Field { ty: super::infer_value(v), optional: false }))
        .collect();
    ObjectTy { fields }
}

#[derive(Default)]
struct Slot {
    types: Vec<Ty>,
    present_in: usize,
    optional: bool, // any input already had it optional
}

/// Merge several object shapes into one.
///
/// Keys keep first-seen order across the inputs. A key missing from at least
/// one input becomes optional; otherwise optionality is the OR of the inputs.
/// A single input comes back unchanged.
pub fn merge_objects(objects: &[ObjectTy]) -> ObjectTy {
    merge_objects_owned(objects.to_vec())
}

pub(crate) fn merge_objects_owned(mut objects: Vec<ObjectTy>) -> ObjectTy {
    match objects.len() {
        0 => return ObjectTy::default(),
        1 => return objects.remove(0),
        _ => {}
    }

    let total = objects.len();
    let mut slots: IndexMap<String, Slot> = IndexMap::new();
    for object in objects {
        for (key, field) in object.fields {
            let slot = slots.entry(key).or_default();
            slot.present_in += 1;
            slot.optional |= field.optional;
            slot.types.push(field.ty);
        }
    }

    let fields = slots
        .into_iter()
        .map(|(key, slot)| {
            debug_assert!(slot.present_in > 0);
            let optional = slot.present_in < total || slot.optional;
            (key, Field { ty: super::unify_owned(slot.types), optional })
        })
        .collect();
    ObjectTy { fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Leaf;

    fn int() -> Ty { Ty::leaf(Leaf::Integer) }
    fn string() -> Ty { Ty::leaf(Leaf::String) }

    #[test]
    fn single_input_is_returned_unchanged() {
        let a = ObjectTy::new().with("a", int(), false);
        assert_eq!(merge_objects(std::slice::from_ref(&a)), a);
    }

    #[test]
    fn missing_keys_become_optional() {
        let a = ObjectTy::new().with("a", int(), false);
        let b = ObjectTy::new().with("a", int(), false).with("b", int(), false);
        let m = merge_objects(&[a, b]);
        assert!(!m.fields["a"].optional);
        assert!(m.fields["b"].optional);
        assert_eq!(m.fields.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn optional_propagates_when_present_everywhere() {
        let a = ObjectTy::new().with("a", int(), true);
        let b = ObjectTy::new().with("a", int(), false);
        assert!(merge_objects(&[a, b]).fields["a"].optional);
    }

    #[test]
    fn key_order_is_first_seen() {
        let a = ObjectTy::new().with("z", int(), false);
        let b = ObjectTy::new().with("y", string(), false).with("z", int(), false);
        let m = merge_objects(&[a, b]);
        assert_eq!(m.fields.keys().collect::<Vec<_>>(), ["z", "y"]);
    }

    #[test]
    fn pairwise_merge_matches_flat_merge() {
        let a = ObjectTy::new().with("k", int(), false);
        let b = ObjectTy::new().with("other", string(), false);
        let c = ObjectTy::new().with("k", string(), false);

        let flat = merge_objects(&[a.clone(), b.clone(), c.clone()]);
        let left = merge_objects(&[merge_objects(&[a.clone(), b.clone()]), c.clone()]);
        let right = merge_objects(&[a, merge_objects(&[b, c])]);
        assert_eq!(flat, left);
        assert_eq!(flat, right);
        assert!(flat.fields["k"].optional);
    }
}
