// Structural type model inferred from JSON. No serde_json::Value here.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Leaf {
    String,
    Integer,                 // widened to Number when mixed
    Number,
    Boolean,
    Null,
    Any,                     // nothing observed (empty arrays)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Leaf(Leaf),
    Array(Box<Ty>),          // item unifies every observed element
    Object(ObjectTy),
    Union(Vec<Ty>),          // ≥ 2 members, canonical order, see `Ty::union`
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectTy {
    pub fields: IndexMap<String, Field>,   // insertion order = declaration order
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub ty: Ty,
    pub optional: bool,      // absent from at least one merged shape
}

impl Ty {
    pub fn leaf(kind: Leaf) -> Self { Ty::Leaf(kind) }

    pub fn array(item: Ty) -> Self { Ty::Array(Box::new(item)) }

    /// Build a union in canonical member order.
    ///
    /// Single-member input collapses to the member itself, so a `Union` never
    /// holds exactly one entry. Callers are expected to hand over members that
    /// are already distinct per tag (see `inference::unify`).
    pub fn union(mut members: Vec<Ty>) -> Self {
        if members.len() == 1 {
            return members.remove(0);
        }
        members.sort_by_key(Ty::rank);
        Ty::Union(members)
    }

    /// Sort key for union members: leaves by kind, then object, then array.
    fn rank(&self) -> (u8, Option<Leaf>) {
        match self {
            Ty::Leaf(k) => (0, Some(*k)),
            Ty::Object(_) => (1, None),
            Ty::Array(_) => (2, None),
            Ty::Union(_) => (3, None),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectTy> {
        match self {
            Ty::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Short tag used in logs and the schema view.
    pub fn tag(&self) -> &'static str {
        match self {
            Ty::Leaf(Leaf::String) => "string",
            Ty::Leaf(Leaf::Integer) => "integer",
            Ty::Leaf(Leaf::Number) => "number",
            Ty::Leaf(Leaf::Boolean) => "boolean",
            Ty::Leaf(Leaf::Null) => "null",
            Ty::Leaf(Leaf::Any) => "any",
            Ty::Array(_) => "array",
            Ty::Object(_) => "object",
            Ty::Union(_) => "union",
        }
    }
}

impl ObjectTy {
    pub fn new() -> Self { Self::default() }

    /// Builder used mostly by tests: append a field in declaration order.
    pub fn with(mut self, key: impl Into<String>, ty: Ty, optional: bool) -> Self {
        self.fields.insert(key.into(), Field { ty, optional });
        self
    }
}

impl From<ObjectTy> for Ty {
    fn from(o: ObjectTy) -> Self { Ty::Object(o) }
}
