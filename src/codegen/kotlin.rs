use super::{assemble, field_idents, quoted, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{FieldDecl, Plan, Shape, TypeDecl};
use crate::naming;

/// `data class` per object, nullable defaults for optional properties.
pub struct Kotlin;

const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
    "true", "try", "typealias", "typeof", "val", "var", "when", "while",
];

fn kotlin_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "String".into(),
        Shape::Scalar(Leaf::Integer) => "Int".into(),
        Shape::Scalar(Leaf::Number) => "Double".into(),
        Shape::Scalar(Leaf::Boolean) => "Boolean".into(),
        // unions may hold null
        Shape::Scalar(Leaf::Null | Leaf::Any) | Shape::Any => "Any?".into(),
        Shape::Named(n) => n.clone(),
        Shape::List(inner) => format!("List<{}>", kotlin_type(inner)),
    }
}

fn property_name(key: &str) -> String {
    naming::guard_identifier(naming::to_camel_case(key), "field")
}

fn property(f: &FieldDecl<'_>, name: &str, serialization: bool) -> String {
    let annotation = if serialization && name != f.key {
        format!("@SerialName({}) ", quoted(f.key))
    } else {
        String::new()
    };
    let name = if HARD_KEYWORDS.contains(&name) { format!("`{name}`") } else { name.to_string() };
    let ty = kotlin_type(&f.shape);
    if f.optional {
        let ty = ty.trim_end_matches('?');
        format!("    {annotation}val {name}: {ty}? = null")
    } else {
        format!("    {annotation}val {name}: {ty}")
    }
}

fn declaration(decl: &TypeDecl<'_>, serialization: bool) -> String {
    let annotation = if serialization { "@Serializable\n" } else { "" };
    if decl.fields.is_empty() {
        // a data class needs at least one property
        return format!("{annotation}class {}", decl.name);
    }
    let names = field_idents(decl, property_name);
    let props = decl
        .fields
        .iter()
        .zip(&names)
        .map(|(f, name)| property(f, name, serialization))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{annotation}data class {}(\n{props}\n)", decl.name)
}

impl Backend for Kotlin {
    fn id(&self) -> &'static str { "kotlin" }
    fn label(&self) -> &'static str { "Kotlin" }
    fn extension(&self) -> &'static str { "kt" }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        let serialization = options.kotlin.kotlin_serialization;
        let header = if serialization {
            "import kotlinx.serialization.SerialName\nimport kotlinx.serialization.Serializable"
        } else {
            ""
        };
        // same package: no imports between files
        assemble(self, plan, options, &Layout::new(header), |_| String::new(), |decl| {
            declaration(decl, serialization)
        })
    }
}
