use super::options::PythonStyle;
use super::{assemble, field_idents, quoted, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{FieldDecl, Plan, Shape, TypeDecl};
use crate::naming;

/// Dataclasses, `TypedDict`s or pydantic models.
pub struct Python;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

fn py_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "str".into(),
        Shape::Scalar(Leaf::Integer) => "int".into(),
        Shape::Scalar(Leaf::Number) => "float".into(),
        Shape::Scalar(Leaf::Boolean) => "bool".into(),
        Shape::Scalar(Leaf::Null) => "None".into(),
        Shape::Scalar(Leaf::Any) | Shape::Any => "Any".into(),
        Shape::Named(n) => n.clone(),
        Shape::List(inner) => format!("List[{}]", py_type(inner)),
    }
}

/// `Optional[T]`, except for types that already admit `None`.
fn optional_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::Null | Leaf::Any) | Shape::Any => py_type(shape),
        _ => format!("Optional[{}]", py_type(shape)),
    }
}

fn attribute_name(key: &str) -> String {
    let name = naming::guard_identifier(naming::to_snake_case(key), "field");
    if KEYWORDS.contains(&name.as_str()) { format!("{name}_") } else { name }
}

fn is_attribute_key(key: &str) -> bool {
    naming::is_plain_identifier(key, false) && !KEYWORDS.contains(&key)
}

fn empty_body(decl: &TypeDecl<'_>) -> Option<String> {
    decl.fields.is_empty().then(|| "    pass".to_string())
}

// ------------------------------ Styles ------------------------------------ //

fn dataclass(decl: &TypeDecl<'_>) -> String {
    // a defaulted field ahead of a required one needs keyword-only init
    let kw_only = decl
        .fields
        .iter()
        .skip_while(|f| !f.optional)
        .any(|f| !f.optional);
    let decorator = if kw_only { "@dataclass(kw_only=True)" } else { "@dataclass" };
    let body = empty_body(decl).unwrap_or_else(|| {
        let names = field_idents(decl, attribute_name);
        decl.fields
            .iter()
            .zip(&names)
            .map(|(f, name)| dataclass_field(f, name))
            .collect::<Vec<_>>()
            .join("\n")
    });
    format!("{decorator}\nclass {}:\n{body}", decl.name)
}

fn dataclass_field(f: &FieldDecl<'_>, name: &str) -> String {
    let mut line = if f.optional {
        format!("    {name}: {} = None", optional_type(&f.shape))
    } else {
        format!("    {name}: {}", py_type(&f.shape))
    };
    if name != f.key {
        line += &format!("  # {}", quoted(f.key));
    }
    line
}

fn typed_dict_type(f: &FieldDecl<'_>) -> String {
    if f.optional {
        format!("NotRequired[{}]", py_type(&f.shape))
    } else {
        py_type(&f.shape)
    }
}

fn typed_dict(decl: &TypeDecl<'_>) -> String {
    if decl.fields.iter().all(|f| is_attribute_key(f.key)) {
        let body = empty_body(decl).unwrap_or_else(|| {
            decl.fields
                .iter()
                .map(|f| format!("    {}: {}", f.key, typed_dict_type(f)))
                .collect::<Vec<_>>()
                .join("\n")
        });
        return format!("class {}(TypedDict):\n{body}", decl.name);
    }
    // keys that are not identifiers only work with the functional syntax
    let entries = decl
        .fields
        .iter()
        .map(|f| format!("        {}: {},", quoted(f.key), typed_dict_type(f)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{0} = TypedDict(\n    \"{0}\",\n    {{\n{entries}\n    }},\n)", decl.name)
}

fn pydantic(decl: &TypeDecl<'_>) -> String {
    let body = empty_body(decl).unwrap_or_else(|| {
        let names = field_idents(decl, attribute_name);
        decl.fields
            .iter()
            .zip(names)
            .map(|(f, name)| {
                let alias = (name != f.key).then(|| quoted(f.key));
                match (f.optional, alias) {
                    (false, None) => format!("    {name}: {}", py_type(&f.shape)),
                    (false, Some(a)) => format!("    {name}: {} = Field(alias={a})", py_type(&f.shape)),
                    (true, None) => format!("    {name}: {} = None", optional_type(&f.shape)),
                    (true, Some(a)) => {
                        format!("    {name}: {} = Field(default=None, alias={a})", optional_type(&f.shape))
                    }
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    });
    format!("class {}(BaseModel):\n{body}", decl.name)
}

impl Backend for Python {
    fn id(&self) -> &'static str { "python" }
    fn label(&self) -> &'static str { "Python" }
    fn extension(&self) -> &'static str { "py" }

    fn file_name(&self, type_name: &str) -> String {
        format!("{}.py", naming::to_snake_case(type_name))
    }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        let style = options.python.python_style;
        let header = match style {
            PythonStyle::Dataclass => "from dataclasses import dataclass\nfrom typing import Any, List, Optional",
            PythonStyle::TypedDict => "from typing import Any, List, NotRequired, TypedDict",
            PythonStyle::Pydantic => "from typing import Any, List, Optional\n\nfrom pydantic import BaseModel, Field",
        };
        assemble(
            self,
            plan,
            options,
            &Layout::new(header).with_sep("\n\n\n"),
            |decl| {
                decl.references()
                    .iter()
                    .map(|r| format!("from .{} import {r}", naming::to_snake_case(r)))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
            |decl| match style {
                PythonStyle::Dataclass => dataclass(decl),
                PythonStyle::TypedDict => typed_dict(decl),
                PythonStyle::Pydantic => pydantic(decl),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_str;

    fn emit(json: &str, style: PythonStyle) -> String {
        let mut options = GenerateOptions::default();
        options.python.python_style = style;
        Python.generate(&infer_str(json).unwrap(), "Item", &options).main_text().to_string()
    }

    #[test]
    fn dataclasses() {
        let text = emit(r#"{"id":1,"tags":["a","b"],"meta":{"ok":true}}"#, PythonStyle::Dataclass);
        insta::assert_snapshot!(text, @r"
        from dataclasses import dataclass
        from typing import Any, List, Optional


        @dataclass
        class Meta:
            ok: bool


        @dataclass
        class Item:
            id: int
            tags: List[str]
            meta: Meta
        ");
    }

    #[test]
    fn dataclass_optional_before_required_is_keyword_only() {
        let text = emit(r#"[{"a":1,"userId":2},{"userId":3}]"#, PythonStyle::Dataclass);
        assert!(text.contains("@dataclass(kw_only=True)\nclass Item:\n"), "{text}");
        assert!(text.contains("    a: Optional[int] = None\n"), "{text}");
        assert!(text.contains("    user_id: int  # \"userId\""), "{text}");
    }

    #[test]
    fn typed_dict_class_and_functional_forms() {
        let text = emit(r#"[{"ok":true,"n":null},{"ok":false}]"#, PythonStyle::TypedDict);
        assert!(text.contains("class Item(TypedDict):\n    ok: bool\n    n: NotRequired[None]"), "{text}");

        let text = emit(r#"{"my-key":"v","class":1}"#, PythonStyle::TypedDict);
        assert!(text.contains("Item = TypedDict(\n    \"Item\",\n    {\n"), "{text}");
        assert!(text.contains("        \"my-key\": str,\n        \"class\": int,\n    },\n)"), "{text}");
    }

    #[test]
    fn pydantic_aliases() {
        let text = emit(r#"[{"userId":1,"x":"s","from":2},{"userId":2}]"#, PythonStyle::Pydantic);
        assert!(text.contains("class Item(BaseModel):\n"), "{text}");
        assert!(text.contains("    user_id: int = Field(alias=\"userId\")\n"), "{text}");
        assert!(text.contains("    x: Optional[str] = None\n"), "{text}");
        assert!(text.contains("    from_: Optional[int] = Field(default=None, alias=\"from\")"), "{text}");
    }

    #[test]
    fn colliding_attribute_names_are_suffixed() {
        let text = emit(r#"{"userId":1,"user_id":2}"#, PythonStyle::Pydantic);
        assert!(text.contains("    user_id: int = Field(alias=\"userId\")\n"), "{text}");
        assert!(text.contains("    user_id2: int = Field(alias=\"user_id\")\n"), "{text}");

        let text = emit(r#"{"class":1,"class_":2}"#, PythonStyle::Dataclass);
        assert!(text.contains("    class_: int  # \"class\"\n    class_2: int  # \"class_\""), "{text}");
    }

    #[test]
    fn empty_class_passes() {
        let text = emit("{}", PythonStyle::Dataclass);
        assert!(text.ends_with("@dataclass\nclass Item:\n    pass\n"), "{text}");
    }

    #[test]
    fn separate_modules_use_relative_imports() {
        let t = infer_str(r#"{"line_items":[{"sku":"a"}]}"#).unwrap();
        let out = Python.generate(&t, "Order", &GenerateOptions::default().separate(true));
        let files = out.artifacts();
        assert_eq!(files[0].name, "line_items_item.py");
        assert_eq!(files[1].name, "order.py");
        assert!(files[1].content.contains("from .line_items_item import LineItemsItem\n\n\n@dataclass"));
        assert!(files[1].content.contains("    line_items: List[LineItemsItem]"));
    }
}
