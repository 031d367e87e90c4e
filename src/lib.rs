//! Infer a structural type model from sample JSON and render it as type
//! declarations for several target languages.
//!
//! ```no_run
//! use json_shapes::{convert, GenerateOptions, Registry};
//!
//! let registry = Registry::builtin();
//! let out = convert(&registry, r#"{"id":1}"#, "rust", "Item", &GenerateOptions::default())?;
//! print!("{}", out.main_text());
//! # Ok::<(), json_shapes::Error>(())
//! ```
pub mod codegen;
pub mod error;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod path_de;
pub mod schema;

pub use codegen::{Artifact, Backend, GenerateOptions, Registry, Rendered};
pub use error::{Error, Result};
pub use inference::{infer_str, infer_value, unify, Inference};
pub use ir::{Field, Leaf, ObjectTy, Ty};

/// Parse `text`, infer its type and render it with the backend `backend`.
///
/// Empty input or an empty type name is `Error::MissingInput`; the backend is
/// looked up before parsing so an unknown id is reported even for bad JSON.
pub fn convert(
    registry: &Registry,
    text: &str,
    backend: &str,
    type_name: &str,
    options: &GenerateOptions,
) -> Result<Rendered> {
    if text.trim().is_empty() {
        return Err(Error::MissingInput("JSON text"));
    }
    if type_name.trim().is_empty() {
        return Err(Error::MissingInput("type name"));
    }
    let backend = registry.get(backend)?;
    let model = infer_str(text)?;
    Ok(backend.generate(&model, type_name, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_checks_inputs() {
        let r = Registry::builtin();
        let o = GenerateOptions::default();
        assert!(matches!(convert(&r, "  ", "rust", "Item", &o), Err(Error::MissingInput(_))));
        assert!(matches!(convert(&r, "{}", "rust", "", &o), Err(Error::MissingInput(_))));
        assert!(matches!(convert(&r, "{", "nope", "Item", &o), Err(Error::UnsupportedBackend { .. })));
        assert!(matches!(convert(&r, "{", "rust", "Item", &o), Err(Error::Parse(_))));
    }

    #[test]
    fn convert_renders() {
        let r = Registry::builtin();
        let out = convert(&r, r#"{"a":1}"#, "typescript", "thing", &GenerateOptions::default()).unwrap();
        assert_eq!(out.as_single(), Some("export interface Thing {\n  a: number;\n}\n"));
    }
}
