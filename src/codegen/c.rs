use super::{assemble, field_idents, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{FieldDecl, Plan, Shape, TypeDecl};
use crate::naming;

/// `typedef struct { ... } name_t;` declarations.
pub struct C;

const KEYWORDS: &[&str] = &[
    "auto", "bool", "break", "case", "char", "const", "continue", "default", "do", "double",
    "else", "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long",
    "register", "restrict", "return", "short", "signed", "sizeof", "static", "struct",
    "switch", "typedef", "union", "unsigned", "void", "volatile", "while",
];

fn type_name(name: &str) -> String {
    format!("{}_t", naming::to_snake_case(name))
}

fn c_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "char*".into(),
        Shape::Scalar(Leaf::Integer) => "int".into(),
        Shape::Scalar(Leaf::Number) => "double".into(),
        Shape::Scalar(Leaf::Boolean) => "int".into(),
        Shape::Scalar(Leaf::Null | Leaf::Any) | Shape::Any => "void*".into(),
        Shape::Named(n) => type_name(n),
        Shape::List(inner) => format!("{}*", c_type(inner)),
    }
}

fn field_name(key: &str) -> String {
    let name = naming::guard_identifier(naming::to_snake_case(key), "field");
    if KEYWORDS.contains(&name.as_str()) { format!("{name}_") } else { name }
}

fn field(f: &FieldDecl<'_>, name: &str) -> String {
    let note = if f.optional { " /* optional */" } else { "" };
    format!("    {} {name};{note}", c_type(&f.shape))
}

fn declaration(decl: &TypeDecl<'_>) -> String {
    let body = if decl.fields.is_empty() {
        "    int dummy; /* empty struct placeholder */".to_string()
    } else {
        let names = field_idents(decl, field_name);
        decl.fields
            .iter()
            .zip(&names)
            .map(|(f, name)| field(f, name))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("typedef struct {{\n{body}\n}} {};", type_name(&decl.name))
}

impl Backend for C {
    fn id(&self) -> &'static str { "c" }
    fn label(&self) -> &'static str { "C" }
    fn extension(&self) -> &'static str { "h" }

    fn file_name(&self, type_name: &str) -> String {
        format!("{}.h", naming::to_snake_case(type_name))
    }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        let header = if options.emit_as_separate_artifacts {
            "#pragma once\n\n#include <stddef.h>"
        } else {
            "#include <stddef.h>"
        };
        assemble(
            self,
            plan,
            options,
            &Layout::new(header),
            |decl| {
                decl.references()
                    .iter()
                    .map(|r| format!("#include \"{}\"", self.file_name(r)))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
            declaration,
        )
    }
}
