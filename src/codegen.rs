//! Code generation backends.
//!
//! Every backend renders the same lowered [`Plan`]: nested names and the
//! children-before-parents order come from `lower`, backends only decide
//! syntax. Unions and untyped values always degrade to the language's
//! any/untyped form, so rendering never fails.
pub mod options;
pub mod registry;

pub mod c;
pub mod cpp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod kotlin;
pub mod python;
pub mod rust;
pub mod typescript;

use std::collections::HashSet;

use serde::Serialize;

use crate::ir::Ty;
use crate::lower::{self, Plan, TypeDecl};

pub use options::GenerateOptions;
pub use registry::Registry;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// One named unit of output: a single declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// File name including extension (`Meta.java`, `meta.rs`, ...).
    pub name: String,
    /// Declared type name as lowered (PascalCase, before backend re-casing).
    pub type_name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Single(String),
    /// One artifact per declared type, main type last.
    Artifacts(Vec<Artifact>),
}

/// A code generation backend for one target language.
pub trait Backend: Send + Sync {
    /// Registry key (`rust`, `typescript`, ...).
    fn id(&self) -> &'static str;

    /// Human readable language name.
    fn label(&self) -> &'static str;

    fn extension(&self) -> &'static str;

    /// File name used for a declared type in separate-artifact mode.
    fn file_name(&self, type_name: &str) -> String {
        format!("{type_name}.{}", self.extension())
    }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered;

    /// Lower `model` and render it with `type_name` as the main type.
    fn generate(&self, model: &Ty, type_name: &str, options: &GenerateOptions) -> Rendered {
        let plan = lower::lower(model, type_name);
        tracing::debug!(backend = self.id(), decls = plan.decls.len(), "rendering");
        self.render(&plan, options)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Rendered {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Rendered::Single(s) => Some(s),
            Rendered::Artifacts(_) => None,
        }
    }

    pub fn artifacts(&self) -> &[Artifact] {
        match self {
            Rendered::Single(_) => &[],
            Rendered::Artifacts(xs) => xs,
        }
    }

    /// Text holding the main type: the whole blob, or the last artifact.
    pub fn main_text(&self) -> &str {
        match self {
            Rendered::Single(s) => s,
            Rendered::Artifacts(xs) => xs.last().map(|a| a.content.as_str()).unwrap_or(""),
        }
    }
}

/// How a backend's blocks are stitched together.
pub(crate) struct Layout<'s> {
    /// Imports/includes shared by every file; may be empty.
    pub header: String,
    /// Separator between top-level blocks.
    pub sep: &'s str,
}

impl<'s> Layout<'s> {
    pub fn new(header: impl Into<String>) -> Self {
        Self { header: header.into(), sep: "\n\n" }
    }

    pub fn with_sep(mut self, sep: &'s str) -> Self {
        self.sep = sep;
        self
    }

    fn compose(&self, imports: &str, body: &str) -> String {
        let head: Vec<&str> = [self.header.as_str(), imports]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if head.is_empty() {
            format!("{body}\n")
        } else {
            format!("{}{}{body}\n", head.join("\n\n"), self.sep)
        }
    }
}

/// Assemble rendered declarations into a single blob or one artifact per
/// declaration, honouring `emit_as_separate_artifacts`. Declarations keep the
/// plan order (children first, main type last) in both modes.
pub(crate) fn assemble<'p, B>(
    backend: &B,
    plan: &Plan<'p>,
    options: &GenerateOptions,
    layout: &Layout<'_>,
    imports: impl Fn(&TypeDecl<'p>) -> String,
    render: impl Fn(&TypeDecl<'p>) -> String,
) -> Rendered
where
    B: Backend + ?Sized,
{
    if options.emit_as_separate_artifacts {
        let artifacts = plan
            .decls
            .iter()
            .map(|decl| Artifact {
                name: backend.file_name(&decl.name),
                type_name: decl.name.clone(),
                content: layout.compose(&imports(decl), &render(decl)),
            })
            .collect();
        return Rendered::Artifacts(artifacts);
    }
    let body = plan.decls.iter().map(render).collect::<Vec<_>>().join(layout.sep);
    Rendered::Single(layout.compose("", &body))
}

/// Field identifiers of one declaration, in field order. `ident` maps a JSON
/// key to the backend's identifier; when two keys land on the same one
/// (`userId`, `user_id`) the later key is retried as `user_id2`, `user_id3`...
pub(crate) fn field_idents(decl: &TypeDecl<'_>, ident: impl Fn(&str) -> String) -> Vec<String> {
    let mut taken = HashSet::new();
    decl.fields
        .iter()
        .map(|f| {
            let mut name = ident(f.key);
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = ident(&format!("{}{n}", f.key));
                n += 1;
            }
            name
        })
        .collect()
}

/// `"key"` as a double-quoted literal with JSON escaping, which every target
/// language here accepts for plain keys.
pub(crate) fn quoted(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| format!("\"{key}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_str;

    struct Plain;

    impl Backend for Plain {
        fn id(&self) -> &'static str { "plain" }
        fn label(&self) -> &'static str { "Plain" }
        fn extension(&self) -> &'static str { "txt" }
        fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
            let layout = Layout::new("# header");
            assemble(self, plan, options, &layout, |d| {
                d.references().iter().map(|r| format!("use {r}")).collect::<Vec<_>>().join("\n")
            }, |d| format!("type {}", d.name))
        }
    }

    #[test]
    fn single_blob_keeps_children_first() {
        let t = infer_str(r#"{"meta":{"ok":true}}"#).unwrap();
        let out = Plain.generate(&t, "item", &GenerateOptions::default());
        assert_eq!(out, Rendered::Single("# header\n\ntype Meta\n\ntype Item\n".into()));
        assert!(out.artifacts().is_empty());
    }

    #[test]
    fn separate_artifacts_put_main_last() {
        let t = infer_str(r#"{"meta":{"ok":true}}"#).unwrap();
        let options = GenerateOptions { emit_as_separate_artifacts: true, ..Default::default() };
        let out = Plain.generate(&t, "item", &options);
        let names: Vec<&str> = out.artifacts().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Meta.txt", "Item.txt"]);
        assert_eq!(out.main_text(), "# header\n\nuse Meta\n\ntype Item\n");
    }

    #[test]
    fn colliding_field_idents_are_suffixed() {
        let t = infer_str(r#"{"userId":1,"user_id":2,"user-id":3,"name":"a"}"#).unwrap();
        let plan = lower::lower(&t, "Item");
        let idents = field_idents(plan.root(), crate::naming::to_snake_case);
        assert_eq!(idents, ["user_id", "user_id2", "user_id3", "name"]);
    }

    #[test]
    fn quoting_escapes() {
        assert_eq!(quoted("my-key"), "\"my-key\"");
        assert_eq!(quoted("a\"b"), "\"a\\\"b\"");
    }
}
