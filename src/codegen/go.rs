use super::{assemble, field_idents, quoted, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{FieldDecl, Plan, Shape, TypeDecl};
use crate::naming;

pub struct Go;

fn go_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "string".into(),
        Shape::Scalar(Leaf::Integer) => "int64".into(),
        Shape::Scalar(Leaf::Number) => "float64".into(),
        Shape::Scalar(Leaf::Boolean) => "bool".into(),
        Shape::Scalar(Leaf::Null | Leaf::Any) | Shape::Any => "interface{}".into(),
        Shape::Named(n) => n.clone(),
        Shape::List(inner) => format!("[]{}", go_type(inner)),
    }
}

fn field_name(key: &str) -> String {
    let name = naming::guard_identifier(naming::to_pascal_case(key), "Field");
    if name.starts_with('_') { format!("X{name}") } else { name }
}

/// Struct tag for `key`. Tags are raw string literals unless the key holds a
/// backtick, which only an interpreted literal can carry.
fn tag(key: &str, optional: bool) -> String {
    let value = if optional { format!("{key},omitempty") } else { key.to_string() };
    let tag = format!("json:{}", quoted(&value));
    if tag.contains('`') { quoted(&tag) } else { format!("`{tag}`") }
}

fn field(f: &FieldDecl<'_>, name: &str) -> String {
    let ty = go_type(&f.shape);
    // slices and interfaces already have a nil state
    let ty = match f.shape {
        _ if !f.optional => ty,
        Shape::List(_) | Shape::Any | Shape::Scalar(Leaf::Null | Leaf::Any) => ty,
        Shape::Scalar(_) | Shape::Named(_) => format!("*{ty}"),
    };
    format!("\t{name} {ty} {}", tag(f.key, f.optional))
}

fn declaration(decl: &TypeDecl<'_>) -> String {
    if decl.fields.is_empty() {
        return format!("type {} struct{{}}", decl.name);
    }
    let names = field_idents(decl, field_name);
    let fields = decl
        .fields
        .iter()
        .zip(&names)
        .map(|(f, name)| field(f, name))
        .collect::<Vec<_>>()
        .join("\n");
    format!("type {} struct {{\n{fields}\n}}", decl.name)
}

impl Backend for Go {
    fn id(&self) -> &'static str { "go" }
    fn label(&self) -> &'static str { "Go" }
    fn extension(&self) -> &'static str { "go" }

    fn file_name(&self, type_name: &str) -> String {
        format!("{}.go", naming::to_snake_case(type_name))
    }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        let package = match (&options.go.go_package, options.emit_as_separate_artifacts) {
            (Some(p), _) => Some(p.as_str()),
            (None, true) => Some("models"),
            (None, false) => None,
        };
        let header = package.map(|p| format!("package {p}")).unwrap_or_default();
        // one package: no imports between files
        assemble(self, plan, options, &Layout::new(header), |_| String::new(), declaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_str;

    fn emit(json: &str, options: &GenerateOptions) -> Rendered {
        Go.generate(&infer_str(json).unwrap(), "Item", options)
    }

    #[test]
    fn structs_with_tags() {
        let out = emit(r#"{"id":1,"tags":["a","b"],"meta":{"ok":true}}"#, &GenerateOptions::default());
        assert_eq!(
            out.main_text(),
            "type Meta struct {\n\tOk bool `json:\"ok\"`\n}\n\n\
             type Item struct {\n\tId int64 `json:\"id\"`\n\tTags []string `json:\"tags\"`\n\tMeta Meta `json:\"meta\"`\n}\n"
        );
    }

    #[test]
    fn optional_pointers_and_omitempty() {
        let out = emit(r#"[{"a":1,"b":[1],"c":{"d":true},"e":null,"x":1.5},{"x":"s"}]"#, &GenerateOptions::default());
        let text = out.main_text();
        assert!(text.contains("\tA *int64 `json:\"a,omitempty\"`"), "{text}");
        assert!(text.contains("\tB []int64 `json:\"b,omitempty\"`"), "{text}");
        assert!(text.contains("\tC *C `json:\"c,omitempty\"`"), "{text}");
        assert!(text.contains("\tE interface{} `json:\"e,omitempty\"`"), "{text}");
        assert!(text.contains("\tX interface{} `json:\"x\"`"), "{text}");
    }

    #[test]
    fn colliding_names_and_awkward_keys() {
        let out = emit(r#"{"userId":1,"user_id":2,"a\"b":true,"c`d":"x"}"#, &GenerateOptions::default());
        let text = out.main_text();
        assert!(text.contains("\tUserId int64 `json:\"userId\"`\n"), "{text}");
        assert!(text.contains("\tUserId2 int64 `json:\"user_id\"`\n"), "{text}");
        assert!(text.contains("\tAB bool `json:\"a\\\"b\"`\n"), "{text}");
        assert!(text.contains("\tCD string \"json:\\\"c`d\\\"\"\n"), "{text}");
    }

    #[test]
    fn package_clause() {
        let mut options = GenerateOptions::default();
        options.go.go_package = Some("api".into());
        assert!(emit("{}", &options).main_text().starts_with("package api\n\ntype Item struct{}"));

        let out = emit(r#"{"meta":{"ok":true}}"#, &GenerateOptions::default().separate(true));
        assert_eq!(out.artifacts()[0].name, "meta.go");
        assert!(out.artifacts().iter().all(|a| a.content.starts_with("package models\n\n")));
    }
}
