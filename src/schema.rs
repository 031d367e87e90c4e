//! JSON-Schema-ish debug view of the type model.
use serde_json::{json, Map, Value};

use crate::ir::{Leaf, ObjectTy, Ty};

const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Schema for one type node. `any` leaves become the empty (accept-all) schema.
pub fn schema_of(ty: &Ty) -> Value {
    match ty {
        Ty::Leaf(Leaf::Any) => json!({}),
        Ty::Leaf(kind) => json!({ "type": kind }),
        Ty::Array(item) => json!({ "type": "array", "items": schema_of(item) }),
        Ty::Object(o) => object_schema(o),
        Ty::Union(members) => json!({ "oneOf": members.iter().map(schema_of).collect::<Vec<_>>() }),
    }
}

fn object_schema(o: &ObjectTy) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), Value::from("object"));
    let props: Map<String, Value> = o
        .fields
        .iter()
        .map(|(k, f)| (k.clone(), schema_of(&f.ty)))
        .collect();
    map.insert("properties".into(), Value::Object(props));
    let required: Vec<Value> = o
        .fields
        .iter()
        .filter(|(_, f)| !f.optional)
        .map(|(k, _)| Value::from(k.as_str()))
        .collect();
    if !required.is_empty() {
        map.insert("required".into(), Value::Array(required));
    }
    Value::Object(map)
}

/// Top-level document with `$schema` and `title`.
pub fn schema_document(ty: &Ty, title: &str) -> Value {
    let mut doc = Map::new();
    doc.insert("$schema".into(), Value::from(DRAFT));
    doc.insert("title".into(), Value::from(title));
    if let Value::Object(body) = schema_of(ty) {
        doc.extend(body);
    }
    Value::Object(doc)
}
