//! Lower the type model into an ordered list of declarations.
//!
//! Every backend renders from the same `Plan`, so nested type names and the
//! declaration order are decided exactly once:
//! - object property `meta` → type `Meta`;
//! - array (any depth) of objects under `tags` → type `TagsItem`;
//! - repeated names get a numeric suffix (`Meta2`) in traversal order, the
//!   root name being reserved first. Names compare case-insensitively, since
//!   backends re-case them (`Ab`, `AB` → `ab.rs`), and the type names the
//!   backends themselves emit (`String`, `List`, ...) are taken from the start;
//! - declarations are collected depth-first post-order: children before the
//!   type that contains them, root last.
use std::collections::HashSet;

use crate::ir::{Leaf, ObjectTy, Ty};
use crate::naming;

/// Shape of one field as the backends see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Scalar(Leaf),            // never `Leaf::Any`, see `Shape::Any`
    Named(String),           // a declared nested type
    List(Box<Shape>),
    Any,                     // unions, `any` leaves: the language's escape hatch
}

#[derive(Debug, Clone)]
pub struct FieldDecl<'a> {
    pub key: &'a str,        // JSON key as observed
    pub optional: bool,
    pub shape: Shape,
}

#[derive(Debug, Clone)]
pub struct TypeDecl<'a> {
    pub name: String,        // PascalCase; backends may re-case it
    pub fields: Vec<FieldDecl<'a>>,
    pub is_root: bool,
}

#[derive(Debug, Clone)]
pub struct Plan<'a> {
    pub decls: Vec<TypeDecl<'a>>,  // children first, root last
    pub root_is_list: bool,        // source document was an array of the root
}

impl Shape {
    /// Nested type name this shape refers to, looking through lists.
    pub fn named(&self) -> Option<&str> {
        match self {
            Shape::Named(n) => Some(n.as_str()),
            Shape::List(inner) => inner.named(),
            Shape::Scalar(_) | Shape::Any => None,
        }
    }
}

impl<'a> TypeDecl<'a> {
    /// Names of the nested types this declaration refers to, in field order,
    /// without duplicates.
    pub fn references(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for f in &self.fields {
            if let Some(n) = f.shape.named() {
                if !seen.contains(&n) { seen.push(n); }
            }
        }
        seen
    }
}

impl<'a> Plan<'a> {
    pub fn root(&self) -> &TypeDecl<'a> {
        // `lower` always pushes the root last
        &self.decls[self.decls.len() - 1]
    }

    pub fn nested(&self) -> &[TypeDecl<'a>] {
        &self.decls[..self.decls.len() - 1]
    }
}

// ------------------------------ Lowering ---------------------------------- //

/// Builtin and imported type names some backend emits next to the declared
/// types. A nested type never takes one of these.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "Any", "Boolean", "Double", "Int", "Integer", "List", "Map", "Object", "Option",
    "Optional", "Self", "String", "Value", "Vec",
    // imports: serde, pydantic, typing, kotlinx.serialization, jackson, lombok
    "Serialize", "Deserialize", "BaseModel", "Field", "NotRequired", "TypedDict",
    "SerialName", "Serializable", "JsonProperty", "Data", "Getter", "Setter",
    "AllArgsConstructor", "NoArgsConstructor",
];

/// Build the declaration plan for `model` with a root type named after
/// `type_name`.
pub fn lower<'a>(model: &'a Ty, type_name: &str) -> Plan<'a> {
    let (root, root_is_list) = resolve_root(model);
    let root_name = naming::guard_identifier(naming::to_pascal_case(type_name), "Root");

    let mut lw = Lowerer {
        used: RESERVED_TYPE_NAMES.iter().map(|n| n.to_lowercase()).collect(),
        decls: Vec::new(),
    };
    lw.used.insert(root_name.to_lowercase());
    let fields = lw.fields_of(root);
    lw.decls.push(TypeDecl { name: root_name, fields, is_root: true });

    tracing::debug!(decls = lw.decls.len(), root_is_list, "lowered type model");
    Plan { decls: lw.decls, root_is_list }
}

static EMPTY: once_cell::sync::Lazy<ObjectTy> = once_cell::sync::Lazy::new(ObjectTy::default);

/// Find the object the root type is declared from.
fn resolve_root(model: &Ty) -> (&ObjectTy, bool) {
    match model {
        Ty::Object(o) => (o, false),
        Ty::Array(item) => (resolve_root(item).0, true),
        Ty::Union(members) => {
            match members.iter().find_map(Ty::as_object) {
                Some(o) => (o, false),
                None => match members.iter().find(|m| matches!(m, Ty::Array(_))) {
                    Some(arr) => resolve_root(arr),
                    None => (&*EMPTY, false),
                },
            }
        }
        Ty::Leaf(kind) => {
            tracing::warn!(?kind, "root value is not an object; emitting an empty type");
            (&*EMPTY, false)
        }
    }
}

struct Lowerer<'a> {
    used: HashSet<String>,   // lower-cased
    decls: Vec<TypeDecl<'a>>,
}

impl<'a> Lowerer<'a> {
    fn claim(&mut self, base: String) -> String {
        let base = naming::guard_identifier(base, "Nested");
        if self.used.insert(base.to_lowercase()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}{n}");
            if self.used.insert(candidate.to_lowercase()) {
                tracing::debug!(%base, %candidate, "nested type name taken; suffixing");
                return candidate;
            }
            n += 1;
        }
    }

    fn fields_of(&mut self, object: &'a ObjectTy) -> Vec<FieldDecl<'a>> {
        object
            .fields
            .iter()
            .map(|(key, field)| FieldDecl {
                key: key.as_str(),
                optional: field.optional,
                shape: self.shape_of(key, &field.ty),
            })
            .collect()
    }

    fn declare(&mut self, base: String, object: &'a ObjectTy) -> Shape {
        let name = self.claim(base);
        let fields = self.fields_of(object);
        self.decls.push(TypeDecl { name: name.clone(), fields, is_root: false });
        Shape::Named(name)
    }

    fn shape_of(&mut self, key: &str, ty: &'a Ty) -> Shape {
        match ty {
            Ty::Leaf(Leaf::Any) | Ty::Union(_) => Shape::Any,
            Ty::Leaf(kind) => Shape::Scalar(*kind),
            Ty::Object(o) => self.declare(naming::to_pascal_case(key), o),
            Ty::Array(item) => Shape::List(Box::new(self.item_shape(key, item))),
        }
    }

    fn item_shape(&mut self, key: &str, item: &'a Ty) -> Shape {
        match item {
            Ty::Object(o) => self.declare(format!("{}Item", naming::to_pascal_case(key)), o),
            Ty::Array(inner) => Shape::List(Box::new(self.item_shape(key, inner))),
            other => self.shape_of(key, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_str;

    fn names(plan: &Plan) -> Vec<String> {
        plan.decls.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn children_before_parents() {
        let t = infer_str(r#"{"a":{"b":{"c":1}},"d":[{"e":true}]}"#).unwrap();
        let plan = lower(&t, "root");
        assert_eq!(names(&plan), ["B", "A", "DItem", "Root"]);
        assert!(plan.root().is_root);
        assert_eq!(plan.nested().len(), 3);
    }

    #[test]
    fn field_shapes() {
        let t = infer_str(r#"{"id":1,"tags":["a"],"meta":{"ok":true},"u":[1,"x"],"e":[],"grid":[[{"v":1}]]}"#).unwrap();
        let plan = lower(&t, "Item");
        let root = plan.root();
        let shapes: Vec<&Shape> = root.fields.iter().map(|f| &f.shape).collect();
        assert_eq!(shapes[0], &Shape::Scalar(Leaf::Integer));
        assert_eq!(shapes[1], &Shape::List(Box::new(Shape::Scalar(Leaf::String))));
        assert_eq!(shapes[2], &Shape::Named("Meta".into()));
        assert_eq!(shapes[3], &Shape::List(Box::new(Shape::Any)));
        assert_eq!(shapes[4], &Shape::List(Box::new(Shape::Any)));
        assert_eq!(
            shapes[5],
            &Shape::List(Box::new(Shape::List(Box::new(Shape::Named("GridItem".into())))))
        );
        assert_eq!(root.references(), ["Meta", "GridItem"]);
    }

    #[test]
    fn colliding_names_get_suffixes() {
        let t = infer_str(r#"{"a":{"meta":{"x":1}},"meta":{"y":2},"item":{"z":3}}"#).unwrap();
        let plan = lower(&t, "item");
        assert_eq!(names(&plan), ["Meta", "A", "Meta2", "Item2", "Item"]);
    }

    #[test]
    fn names_differing_only_in_case_are_suffixed() {
        let t = infer_str(r#"{"ab":{"x":1},"a_b":{"y":2},"root":{"z":3}}"#).unwrap();
        let plan = lower(&t, "Root");
        assert_eq!(names(&plan), ["Ab", "AB2", "Root2", "Root"]);
    }

    #[test]
    fn builtin_type_names_are_never_declared() {
        let t = infer_str(r#"{"string":{"a":"x"},"list":{"b":[1]},"self":{"c":true}}"#).unwrap();
        let plan = lower(&t, "Item");
        assert_eq!(names(&plan), ["String2", "List2", "Self2", "Item"]);
    }

    #[test]
    fn array_root_uses_item_object() {
        let t = infer_str(r#"[{"x":1},{"x":"s"}]"#).unwrap();
        let plan = lower(&t, "Point");
        assert!(plan.root_is_list);
        assert_eq!(names(&plan), ["Point"]);
        assert_eq!(plan.root().fields[0].shape, Shape::Any);
    }

    #[test]
    fn scalar_root_is_an_empty_type() {
        let t = infer_str("42").unwrap();
        let plan = lower(&t, "");
        assert_eq!(names(&plan), ["Root"]);
        assert!(plan.root().fields.is_empty());
    }
}
