use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path_de;

/// Options for one generate request.
///
/// Read from camelCase JSON (`{"emitAsSeparateArtifacts": true, "useRecord": true}`).
/// Every key is optional; keys a backend does not know are ignored by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    /// One artifact per declared type instead of a single blob.
    #[serde(alias = "multipleFiles")]
    pub emit_as_separate_artifacts: bool,
    #[serde(flatten)]
    pub typescript: TypeScriptOptions,
    #[serde(flatten)]
    pub python: PythonOptions,
    #[serde(flatten)]
    pub rust: RustOptions,
    #[serde(flatten)]
    pub go: GoOptions,
    #[serde(flatten)]
    pub java: JavaOptions,
    #[serde(flatten)]
    pub kotlin: KotlinOptions,
}

impl GenerateOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        path_de::from_str_with_path(text)
    }

    pub fn separate(mut self, yes: bool) -> Self {
        self.emit_as_separate_artifacts = yes;
        self
    }
}

// ------------------------------ TypeScript -------------------------------- //

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationStyle {
    #[default]
    Interface,
    Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeScriptOptions {
    pub declaration_style: DeclarationStyle,
    pub export_types: bool,
    pub readonly: bool,
}

impl Default for TypeScriptOptions {
    fn default() -> Self {
        Self { declaration_style: DeclarationStyle::Interface, export_types: true, readonly: false }
    }
}

// ------------------------------ Python ------------------------------------ //

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PythonStyle {
    #[default]
    Dataclass,
    TypedDict,
    Pydantic,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PythonOptions {
    pub python_style: PythonStyle,
}

// ------------------------------ Rust -------------------------------------- //

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RustOptions {
    /// Derives put on every struct, in order.
    pub rust_derives: Vec<String>,
}

impl Default for RustOptions {
    fn default() -> Self {
        Self { rust_derives: ["Debug", "Serialize", "Deserialize"].map(String::from).to_vec() }
    }
}

// ------------------------------ Go ---------------------------------------- //

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoOptions {
    /// `package` clause; separate artifacts fall back to `models`.
    pub go_package: Option<String>,
}

// ------------------------------ Java -------------------------------------- //

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LombokMode {
    #[default]
    Data,
    GetterSetter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JavaOptions {
    /// Nest every child as a `public static class` inside the main class.
    pub use_inner_class: bool,
    pub use_record: bool,
    pub use_lombok: bool,
    pub lombok_mode: LombokMode,
    pub use_json_property: bool,
    pub include_constructor: bool,
    pub include_getter_setter: bool,
}

impl Default for JavaOptions {
    fn default() -> Self {
        Self {
            use_inner_class: false,
            use_record: false,
            use_lombok: false,
            lombok_mode: LombokMode::Data,
            use_json_property: false,
            include_constructor: false,
            include_getter_setter: true,
        }
    }
}

// ------------------------------ Kotlin ------------------------------------ //

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KotlinOptions {
    /// Annotate with kotlinx.serialization `@Serializable` / `@SerialName`.
    pub kotlin_serialization: bool,
}
