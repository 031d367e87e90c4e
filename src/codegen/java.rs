//! Java classes or records.
//!
//! Layouts:
//! - default: package-private children before a `public class` main type in one
//!   compilation unit;
//! - `useInnerClass`: children become `public static` members of the main type;
//! - separate artifacts: one `public` type per `Name.java`.
//!
//! Lombok replaces hand-written accessors and constructors; records ignore
//! both.
use super::options::{JavaOptions, LombokMode};
use super::{assemble, field_idents, quoted, Backend, GenerateOptions, Layout, Rendered};
use crate::ir::Leaf;
use crate::lower::{Plan, Shape, TypeDecl};
use crate::naming;

pub struct Java;

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false",
    "final", "finally", "float", "for", "goto", "if", "implements", "import", "instanceof",
    "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
    "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized",
    "this", "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
    "record", "var", "yield",
];

fn java_type(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(Leaf::String) => "String".into(),
        Shape::Scalar(Leaf::Integer) => "Integer".into(),
        Shape::Scalar(Leaf::Number) => "Double".into(),
        Shape::Scalar(Leaf::Boolean) => "Boolean".into(),
        Shape::Scalar(Leaf::Null | Leaf::Any) | Shape::Any => "Object".into(),
        Shape::Named(n) => n.clone(),
        Shape::List(inner) => format!("List<{}>", java_type(inner)),
    }
}

fn uses_list(decl: &TypeDecl<'_>) -> bool {
    decl.fields.iter().any(|f| matches!(f.shape, Shape::List(_)))
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|l| if l.is_empty() { String::new() } else { format!("{prefix}{l}") })
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A field as Java sees it.
struct Member<'a> {
    key: &'a str,
    name: String,
    ty: String,
}

fn member_name(key: &str) -> String {
    let name = naming::guard_identifier(naming::to_camel_case(key), "field");
    if KEYWORDS.contains(&name.as_str()) { format!("{name}_") } else { name }
}

fn members<'a>(decl: &TypeDecl<'a>) -> Vec<Member<'a>> {
    decl.fields
        .iter()
        .zip(field_idents(decl, member_name))
        .map(|(f, name)| Member { key: f.key, name, ty: java_type(&f.shape) })
        .collect()
}

fn imports<'a, 'b: 'a>(decls: impl IntoIterator<Item = &'a TypeDecl<'b>>, java: &JavaOptions) -> String {
    let mut lines = Vec::new();
    if java.use_json_property {
        lines.push("import com.fasterxml.jackson.annotation.JsonProperty;");
    }
    if decls.into_iter().any(uses_list) {
        lines.push("import java.util.List;");
    }
    if java.use_lombok && !java.use_record {
        lines.push("import lombok.AllArgsConstructor;");
        match java.lombok_mode {
            LombokMode::Data => lines.push("import lombok.Data;"),
            LombokMode::GetterSetter => lines.push("import lombok.Getter;"),
        }
        lines.push("import lombok.NoArgsConstructor;");
        if java.lombok_mode == LombokMode::GetterSetter {
            lines.push("import lombok.Setter;");
        }
    }
    lines.join("\n")
}

// ------------------------------ Classes ----------------------------------- //

fn lombok_annotations(java: &JavaOptions, has_fields: bool) -> String {
    let mut s = match java.lombok_mode {
        LombokMode::Data => "@Data\n".to_string(),
        LombokMode::GetterSetter => "@Getter\n@Setter\n".to_string(),
    };
    s += "@NoArgsConstructor\n";
    if has_fields {
        s += "@AllArgsConstructor\n";
    }
    s
}

fn class(decl: &TypeDecl<'_>, java: &JavaOptions, modifiers: &str, inner: Vec<String>) -> String {
    let ms = members(decl);
    let mut sections = Vec::new();

    if !ms.is_empty() {
        let fields = ms
            .iter()
            .map(|m| {
                let annotation = if java.use_json_property {
                    format!("@JsonProperty({})\n", quoted(m.key))
                } else {
                    String::new()
                };
                format!("{annotation}private {} {};", m.ty, m.name)
            })
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(fields);
    }

    if !java.use_lombok {
        if java.include_constructor {
            sections.push(format!("public {}() {{\n}}", decl.name));
            if !ms.is_empty() {
                let params = ms.iter().map(|m| format!("{} {}", m.ty, m.name)).collect::<Vec<_>>();
                let assigns = ms.iter().map(|m| format!("    this.{0} = {0};", m.name)).collect::<Vec<_>>();
                sections.push(format!(
                    "public {}({}) {{\n{}\n}}",
                    decl.name,
                    params.join(", "),
                    assigns.join("\n")
                ));
            }
        }
        if java.include_getter_setter {
            for m in &ms {
                let suffix = capitalize(&m.name);
                sections.push(format!("public {} get{suffix}() {{\n    return {};\n}}", m.ty, m.name));
                sections.push(format!(
                    "public void set{suffix}({} {1}) {{\n    this.{1} = {1};\n}}",
                    m.ty, m.name
                ));
            }
        }
    }
    sections.extend(inner);

    let annotations = if java.use_lombok { lombok_annotations(java, !ms.is_empty()) } else { String::new() };
    let body = if sections.is_empty() {
        String::new()
    } else {
        format!("{}\n", indent(&sections.join("\n\n"), "    "))
    };
    format!("{annotations}{modifiers}class {} {{\n{body}}}", decl.name)
}

fn record(decl: &TypeDecl<'_>, java: &JavaOptions, modifiers: &str, inner: Vec<String>) -> String {
    let ms = members(decl);
    let components = if ms.is_empty() {
        String::new()
    } else {
        let lines = ms
            .iter()
            .map(|m| {
                let annotation = if java.use_json_property {
                    format!("@JsonProperty({}) ", quoted(m.key))
                } else {
                    String::new()
                };
                format!("    {annotation}{} {}", m.ty, m.name)
            })
            .collect::<Vec<_>>();
        format!("\n{}\n", lines.join(",\n"))
    };
    let body = if inner.is_empty() {
        "{}".to_string()
    } else {
        format!("{{\n{}\n}}", indent(&inner.join("\n\n"), "    "))
    };
    format!("{modifiers}record {}({components}) {body}", decl.name)
}

fn declaration(decl: &TypeDecl<'_>, java: &JavaOptions, modifiers: &str, inner: Vec<String>) -> String {
    if java.use_record {
        record(decl, java, modifiers, inner)
    } else {
        class(decl, java, modifiers, inner)
    }
}

impl Backend for Java {
    fn id(&self) -> &'static str { "java" }
    fn label(&self) -> &'static str { "Java" }
    fn extension(&self) -> &'static str { "java" }

    fn render(&self, plan: &Plan<'_>, options: &GenerateOptions) -> Rendered {
        let java = &options.java;

        if options.emit_as_separate_artifacts {
            return assemble(
                self,
                plan,
                options,
                &Layout::new(""),
                |decl| imports([decl], java),
                |decl| declaration(decl, java, "public ", Vec::new()),
            );
        }

        let layout = Layout::new(imports(&plan.decls, java));
        if java.use_inner_class {
            // records are implicitly static when nested
            let nested_modifiers = if java.use_record { "public " } else { "public static " };
            let inner = plan
                .nested()
                .iter()
                .map(|decl| declaration(decl, java, nested_modifiers, Vec::new()))
                .collect();
            let main = declaration(plan.root(), java, "public ", inner);
            return Rendered::Single(layout.compose("", &main));
        }

        let root_name = plan.root().name.clone();
        assemble(self, plan, options, &layout, |_| String::new(), |decl| {
            // one public top-level type per compilation unit
            let modifiers = if decl.name == root_name { "public " } else { "" };
            declaration(decl, java, modifiers, Vec::new())
        })
    }
}
