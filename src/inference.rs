//! Type inference and unification over parsed JSON.
//!
//! Walk a JSON value bottom-up into an `ir::Ty`, reconciling divergent shapes
//! at the same position with `unify`:
//! - one arm per kind: leaf kinds de-duplicated, objects merged, arrays merged;
//! - `integer` next to `number` widens to `number`;
//! - a homogeneous set collapses to its single representative, anything else
//!   becomes a `Union`.
//!
//! Unify is associative/commutative/idempotent, so the order samples are
//! observed in never changes the result (up to key order).
pub mod num;
pub mod arr;
pub mod obj;

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::Result;
use crate::ir::{Leaf, ObjectTy, Ty};

pub use obj::merge_objects;

// ------------------------------ Infer ------------------------------------ //

/// Infer the structural type of a single parsed value.
pub fn infer_value(v: &Value) -> Ty {
    match v {
        Value::Null => Ty::leaf(Leaf::Null),
        Value::Bool(_) => Ty::leaf(Leaf::Boolean),
        Value::Number(n) => Ty::leaf(num::classify(n)),
        Value::String(_) => Ty::leaf(Leaf::String),
        Value::Array(xs) => arr::infer_array(xs),
        Value::Object(m) => Ty::Object(obj::infer_object(m)),
    }
}

/// Parse `text` as JSON and infer its type. Parse failures surface as
/// `Error::Parse` with the parser's own message.
pub fn infer_str(text: &str) -> Result<Ty> {
    let value: Value = serde_json::from_str(text)?;
    Ok(infer_value(&value))
}

// ------------------------------ Unify ------------------------------------ //

/// Combine the types observed at one position into a single representative.
pub fn unify(nodes: &[Ty]) -> Ty {
    unify_owned(nodes.to_vec())
}

/// Arms collected from the inputs, unions flattened.
#[derive(Default)]
struct Arms {
    leaves: BTreeSet<Leaf>,
    objects: Vec<ObjectTy>,
    items: Vec<Ty>,     // item types of every observed array
    saw_array: bool,
}

impl Arms {
    fn add(&mut self, node: Ty) {
        match node {
            Ty::Leaf(kind) => { self.leaves.insert(kind); }
            Ty::Object(o) => self.objects.push(o),
            Ty::Array(item) => {
                self.saw_array = true;
                self.items.push(*item);
            }
            Ty::Union(members) => {
                for m in members { self.add(m); }
            }
        }
    }
}

pub(crate) fn unify_owned(mut nodes: Vec<Ty>) -> Ty {
    match nodes.len() {
        0 => {
            tracing::debug!("unify called without nodes; falling back to any");
            return Ty::leaf(Leaf::Any);
        }
        1 => return nodes.remove(0),
        _ => {}
    }

    let mut arms = Arms::default();
    for node in nodes { arms.add(node); }

    // numeric widening
    if arms.leaves.contains(&Leaf::Integer) && arms.leaves.contains(&Leaf::Number) {
        arms.leaves.remove(&Leaf::Integer);
    }

    let mut members: Vec<Ty> = arms.leaves.into_iter().map(Ty::Leaf).collect();
    if !arms.objects.is_empty() {
        members.push(Ty::Object(obj::merge_objects_owned(arms.objects)));
    }
    if arms.saw_array {
        members.push(arr::merge_arrays(arms.items));
    }

    match members.len() {
        0 => Ty::leaf(Leaf::Any),
        1 => members.remove(0),
        _ => {
            tracing::debug!(
                members = ?members.iter().map(Ty::tag).collect::<Vec<_>>(),
                "incompatible shapes at one position; keeping a union"
            );
            Ty::union(members)
        }
    }
}

// ------------------------------- Front API -------------------------------- //

/// Running inference over several sample documents of the same shape.
#[derive(Debug, Default)]
pub struct Inference { state: Option<Ty> }

impl Inference {
    pub fn new() -> Self { Self::default() }

    pub fn observe_value(&mut self, v: &Value) {
        self.observe(infer_value(v));
    }

    /// Fold an already inferred sample into the running state.
    pub fn observe(&mut self, ty: Ty) {
        self.state = Some(match self.state.take() {
            None => ty,
            Some(prev) => unify_owned(vec![prev, ty]),
        });
    }

    /// Current result; `any` when nothing was observed.
    pub fn solve(&self) -> Ty {
        self.state.clone().unwrap_or(Ty::Leaf(Leaf::Any))
    }
}

pub fn infer_from_values<'a, I>(values: I) -> Ty
where
    I: IntoIterator<Item = &'a Value>
{
    let mut inf = Inference::new();
    for v in values {
        inf.observe_value(v);
    }
    inf.solve()
}

// ------------------------------- Tests ------------------------------------ //
