use super::{assemble, field_idents, quoted, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{FieldDecl, Plan, Shape, TypeDecl};
use crate::naming;

/// serde-annotated structs.
pub struct Rust;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

// cannot be raw identifiers
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

fn rust_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "String".into(),
        Shape::Scalar(Leaf::Integer) => "i64".into(),
        Shape::Scalar(Leaf::Number) => "f64".into(),
        Shape::Scalar(Leaf::Boolean) => "bool".into(),
        Shape::Scalar(Leaf::Null) => "Option<()>".into(),
        Shape::Scalar(Leaf::Any) | Shape::Any => "serde_json::Value".into(),
        Shape::Named(n) => n.clone(),
        Shape::List(inner) => format!("Vec<{}>", rust_type(inner)),
    }
}

fn field_ident(key: &str) -> String {
    let name = naming::guard_identifier(naming::to_snake_case(key), "field");
    if RESERVED.contains(&name.as_str()) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("r#{name}")
    } else {
        name
    }
}

fn field(f: &FieldDecl<'_>, ident: &str) -> String {
    let mut s = String::new();
    if ident.trim_start_matches("r#") != f.key {
        s += &format!("    #[serde(rename = {})]\n", quoted(f.key));
    }
    let ty = match (&f.shape, f.optional) {
        // null already reads as an Option
        (Shape::Scalar(Leaf::Null), _) | (_, false) => rust_type(&f.shape),
        (_, true) => {
            s += "    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n";
            format!("Option<{}>", rust_type(&f.shape))
        }
    };
    s += &format!("    pub {ident}: {ty},");
    s
}

fn declaration(decl: &TypeDecl<'_>, options: &GenerateOptions) -> String {
    let derives = options.rust.rust_derives.join(", ");
    let derive = if derives.is_empty() { String::new() } else { format!("#[derive({derives})]\n") };
    if decl.fields.is_empty() {
        return format!("{derive}pub struct {} {{}}", decl.name);
    }
    let idents = field_idents(decl, field_ident);
    let fields = decl
        .fields
        .iter()
        .zip(&idents)
        .map(|(f, ident)| field(f, ident))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{derive}pub struct {} {{\n{fields}\n}}", decl.name)
}

impl Backend for Rust {
    fn id(&self) -> &'static str { "rust" }
    fn label(&self) -> &'static str { "Rust" }
    fn extension(&self) -> &'static str { "rs" }

    fn file_name(&self, type_name: &str) -> String {
        format!("{}.rs", naming::to_snake_case(type_name))
    }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        let header = "use serde::{Deserialize, Serialize};";
        assemble(
            self,
            plan,
            options,
            &Layout::new(header),
            |decl| {
                decl.references()
                    .iter()
                    .map(|r| format!("use super::{}::{r};", naming::to_snake_case(r)))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
            |decl| declaration(decl, options),
        )
    }
}
