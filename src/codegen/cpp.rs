use super::{assemble, field_idents, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{FieldDecl, Plan, Shape, TypeDecl};
use crate::naming;

pub struct Cpp;

const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "constexpr", "continue", "decltype", "default", "delete", "do",
    "double", "else", "enum", "explicit", "export", "extern", "false", "float", "for",
    "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace", "new",
    "noexcept", "not", "nullptr", "operator", "or", "private", "protected", "public",
    "register", "return", "short", "signed", "sizeof", "static", "struct", "switch",
    "template", "this", "throw", "true", "try", "typedef", "typeid", "typename", "union",
    "unsigned", "using", "virtual", "void", "volatile", "while", "xor",
];

const INCLUDES: &str = "#include <any>\n#include <cstddef>\n#include <optional>\n#include <string>\n#include <vector>";

fn cpp_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "std::string".into(),
        Shape::Scalar(Leaf::Integer) => "int".into(),
        Shape::Scalar(Leaf::Number) => "double".into(),
        Shape::Scalar(Leaf::Boolean) => "bool".into(),
        Shape::Scalar(Leaf::Null) => "std::nullptr_t".into(),
        Shape::Scalar(Leaf::Any) | Shape::Any => "std::any".into(),
        Shape::Named(n) => n.clone(),
        Shape::List(inner) => format!("std::vector<{}>", cpp_type(inner)),
    }
}

fn member_name(key: &str) -> String {
    let name = naming::guard_identifier(naming::to_snake_case(key), "field");
    if KEYWORDS.contains(&name.as_str()) { format!("{name}_") } else { name }
}

fn member(f: &FieldDecl<'_>, name: &str) -> String {
    let ty = match (&f.shape, f.optional) {
        (Shape::Scalar(Leaf::Null), _) | (_, false) => cpp_type(&f.shape),
        (_, true) => format!("std::optional<{}>", cpp_type(&f.shape)),
    };
    format!("    {ty} {name};")
}

fn declaration(decl: &TypeDecl<'_>) -> String {
    let members = if decl.fields.is_empty() {
        "    // no fields".to_string()
    } else {
        let names = field_idents(decl, member_name);
        decl.fields
            .iter()
            .zip(&names)
            .map(|(f, name)| member(f, name))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("class {0} {{\npublic:\n{members}\n\n    {0}() = default;\n}};", decl.name)
}

impl Backend for Cpp {
    fn id(&self) -> &'static str { "cpp" }
    fn label(&self) -> &'static str { "C++" }
    fn extension(&self) -> &'static str { "hpp" }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        let header = if options.emit_as_separate_artifacts {
            format!("#pragma once\n\n{INCLUDES}")
        } else {
            INCLUDES.to_string()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_str;

    #[test]
    fn classes_children_first() {
        let t = infer_str(r#"{"id":1,"tags":["a","b"],"meta":{"ok":true}}"#).unwrap();
        let out = Cpp.generate(&t, "Item", &GenerateOptions::default());
        let text = out.main_text();
        assert!(text.starts_with(INCLUDES));
        let meta = text.find("class Meta {").unwrap();
        let item = text.find("class Item {").unwrap();
        assert!(meta < item);
        assert!(text.contains(
            "class Item {\npublic:\n    int id;\n    std::vector<std::string> tags;\n    Meta meta;\n\n    Item() = default;\n};"
        ), "{text}");
    }

    #[test]
    fn optional_members() {
        let t = infer_str(r#"[{"userName":"a","n":null,"u":[1,"x"]},{"u":[]}]"#).unwrap();
        let text = Cpp.generate(&t, "Item", &GenerateOptions::default()).main_text().to_string();
        assert!(text.contains("    std::optional<std::string> user_name;"), "{text}");
        assert!(text.contains("    std::nullptr_t n;"), "{text}");
        assert!(text.contains("    std::vector<std::any> u;"), "{text}");
    }

    #[test]
    fn colliding_members_are_suffixed() {
        let t = infer_str(r#"{"userName":"a","user_name":"b","USER-NAME":"c"}"#).unwrap();
        let text = Cpp.generate(&t, "Item", &GenerateOptions::default()).main_text().to_string();
        assert!(text.contains(
            "    std::string user_name;\n    std::string user_name2;\n    std::string user_name3;\n"
        ), "{text}");
    }

    #[test]
    fn separate_headers() {
        let t = infer_str(r#"{"meta":{"ok":true},"class":1}"#).unwrap();
        let out = Cpp.generate(&t, "Item", &GenerateOptions::default().separate(true));
        let files = out.artifacts();
        assert_eq!(files[0].name, "Meta.hpp");
        assert!(files[1].content.starts_with("#pragma once\n\n#include <any>"));
        assert!(files[1].content.contains("#include <vector>\n\n#include \"Meta.hpp\"\n\nclass Item {"));
        assert!(files[1].content.contains("    int class_;"));
    }
}
