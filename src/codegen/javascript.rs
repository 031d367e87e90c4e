use super::{assemble, quoted, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{Plan, Shape, TypeDecl};
use crate::naming;

/// JSDoc `@typedef` plus a plain class copying fields out of a parsed object.
pub struct JavaScript;

fn jsdoc_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "string".into(),
        Shape::Scalar(Leaf::Integer | Leaf::Number) => "number".into(),
        Shape::Scalar(Leaf::Boolean) => "boolean".into(),
        Shape::Scalar(Leaf::Null) => "null".into(),
        Shape::Scalar(Leaf::Any) | Shape::Any => "*".into(),
        Shape::Named(n) => n.clone(),
        Shape::List(inner) => format!("Array<{}>", jsdoc_type(inner)),
    }
}

/// `.key` for identifiers, `["key"]` otherwise.
fn accessor(key: &str) -> String {
    if naming::is_plain_identifier(key, true) {
        format!(".{key}")
    } else {
        format!("[{}]", quoted(key))
    }
}

fn declaration(decl: &TypeDecl<'_>) -> String {
    let mut s = format!("/**\n * @typedef {{Object}} {}\n", decl.name);
    for f in &decl.fields {
        let name = if f.optional { format!("[{}]", f.key) } else { f.key.to_string() };
        s += &format!(" * @property {{{}}} {name}\n", jsdoc_type(&f.shape));
    }
    s += " */\n";
    s += &format!("class {} {{\n  constructor(data) {{\n", decl.name);
    for f in &decl.fields {
        let acc = accessor(f.key);
        s += &format!("    this{acc} = data{acc};\n");
    }
    s += "  }\n}";
    s
}

impl Backend for JavaScript {
    fn id(&self) -> &'static str { "javascript" }
    fn label(&self) -> &'static str { "JavaScript" }
    fn extension(&self) -> &'static str { "js" }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        let separate = options.emit_as_separate_artifacts;
        assemble(
            self,
            plan,
            options,
            &Layout::new(""),
            |_| String::new(),
            |decl| {
                let body = declaration(decl);
                if separate {
                    format!("{body}\n\nmodule.exports = {{ {} }};", decl.name)
                } else {
                    body
                }
            },
        )
    }
}
