use super::options::DeclarationStyle;
use super::{assemble, quoted, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{Plan, Shape, TypeDecl};
use crate::naming;

pub struct TypeScript;

fn ts_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "string".into(),
        Shape::Scalar(Leaf::Integer | Leaf::Number) => "number".into(),
        Shape::Scalar(Leaf::Boolean) => "boolean".into(),
        Shape::Scalar(Leaf::Null) => "null".into(),
        Shape::Scalar(Leaf::Any) | Shape::Any => "any".into(),
        Shape::Named(n) => n.clone(),
        Shape::List(inner) => format!("{}[]", ts_type(inner)),
    }
}

fn property_key(key: &str) -> String {
    if naming::is_plain_identifier(key, true) { key.to_string() } else { quoted(key) }
}

fn declaration(decl: &TypeDecl<'_>, options: &GenerateOptions) -> String {
    let ts = &options.typescript;
    let export = if ts.export_types { "export " } else { "" };
    let readonly = if ts.readonly { "readonly " } else { "" };
    let members: String = decl
        .fields
        .iter()
        .map(|f| {
            let mark = if f.optional { "?" } else { "" };
            format!("  {readonly}{}{mark}: {};\n", property_key(f.key), ts_type(&f.shape))
        })
        .collect();
    match (ts.declaration_style, members.is_empty()) {
        (DeclarationStyle::Interface, true) => format!("{export}interface {} {{}}", decl.name),
        (DeclarationStyle::Interface, false) => format!("{export}interface {} {{\n{members}}}", decl.name),
        (DeclarationStyle::Type, true) => format!("{export}type {} = {{}};", decl.name),
        (DeclarationStyle::Type, false) => format!("{export}type {} = {{\n{members}}};", decl.name),
    }
}

impl Backend for TypeScript {
    fn id(&self) -> &'static str { "typescript" }
    fn label(&self) -> &'static str { "TypeScript" }
    fn extension(&self) -> &'static str { "ts" }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        assemble(
            self,
            plan,
            options,
            &Layout::new(""),
            |decl| {
                decl.references()
                    .iter()
                    .map(|r| format!("import type {{ {r} }} from './{r}';"))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
            |decl| declaration(decl, options),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_str;

    fn emit(json: &str, options: &GenerateOptions) -> Rendered {
        TypeScript.generate(&infer_str(json).unwrap(), "Item", options)
    }

    #[test]
    fn interfaces_children_first() {
        let out = emit(r#"{"id":1,"tags":["a","b"],"meta":{"ok":true}}"#, &GenerateOptions::default());
        insta::assert_snapshot!(out.main_text(), @r"
        export interface Meta {
          ok: boolean;
        }

        export interface Item {
          id: number;
          tags: string[];
          meta: Meta;
        }
        ");
    }

    #[test]
    fn optional_union_and_odd_keys() {
        let out = emit(r#"[{"x":1,"my-key":null},{"x":"s"}]"#, &GenerateOptions::default());
        let text = out.main_text();
        assert!(text.contains("  x: any;\n"), "{text}");
        assert!(text.contains("  \"my-key\"?: null;\n"), "{text}");
    }

    #[test]
    fn type_alias_style() {
        let mut options = GenerateOptions::default();
        options.typescript.declaration_style = DeclarationStyle::Type;
        options.typescript.export_types = false;
        options.typescript.readonly = true;
        let out = emit(r#"{"a":[]}"#, &options);
        assert_eq!(out.main_text(), "type Item = {\n  readonly a: any[];\n};\n");
    }

    #[test]
    fn separate_files_import_their_children() {
        let options = GenerateOptions::default().separate(true);
        let out = emit(r#"{"meta":{"ok":true}}"#, &options);
        let files = out.artifacts();
        assert_eq!(files[0].name, "Meta.ts");
        assert_eq!(files[1].name, "Item.ts");
        assert!(files[1].content.starts_with("import type { Meta } from './Meta';\n\nexport interface Item"));
    }
}
