//! CLI: infer → (generate <backend> | schema), plus a backend listing.
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use json_shapes::{inference, schema, Error, GenerateOptions, Registry, Rendered, Ty};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a type model from sample JSON/NDJSON and emit type declarations or a JSON-schema-ish view
#[derive(Parser, Debug)]
#[command(name = "json-shapes", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit type declarations for one backend
    Generate(GenerateOut),
    /// infer and print the JSON-schema-ish debug view
    Schema(SchemaOut),
    /// list the available backends
    Backends,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// name of the main (top-level) type
    #[arg(long, short = 't', default_value = "Root")]
    type_name: String,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    /// backend id (see `backends`)
    backend: String,

    #[command(flatten)]
    input_settings: InputSettings,

    /// generator options as inline JSON (e.g. '{"useRecord": true}')
    #[arg(long, conflicts_with = "options_file")]
    options: Option<String>,

    /// generator options read from a JSON file
    #[arg(long)]
    options_file: Option<PathBuf>,

    /// one file per declared type (same as `"emitAsSeparateArtifacts": true`)
    #[arg(long, default_value_t = false)]
    separate: bool,

    /// output file, or directory with --separate (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Every document selected by the settings, in input order.
    fn load_documents(&self) -> anyhow::Result<Vec<Value>> {
        let sources = resolve_file_path_patterns(&self.input)?;
        let mut docs = Vec::new();
        for source in sources {
            let (label, text) = read_source(&source)?;
            let parsed = documents_from_text(&text, self.ndjson, self.json_pointer.as_deref())
                .with_context(|| format!("failed to load {label}"))?;
            tracing::info!(source = %label, documents = parsed.len(), "loaded input");
            docs.extend(parsed);
        }
        if docs.is_empty() {
            return Err(Error::MissingInput("JSON documents").into());
        }
        Ok(docs)
    }

    fn infer(&self) -> anyhow::Result<Ty> {
        let docs = self.load_documents()?;
        Ok(infer_documents(&docs))
    }
}

impl GenerateOut {
    fn generate_options(&self) -> anyhow::Result<GenerateOptions> {
        let options = match (&self.options, &self.options_file) {
            (Some(inline), _) => GenerateOptions::from_json(inline).context("in --options")?,
            (None, Some(path)) => {
                let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                GenerateOptions::from_json(&text)
                    .with_context(|| format!("in options file {}", path.display()))?
            }
            (None, None) => GenerateOptions::default(),
        };
        // the flag only ever switches separate output on
        let separate = self.separate || options.emit_as_separate_artifacts;
        Ok(options.separate(separate))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let registry = Registry::builtin();
        match &self.cmd {
            Command::Backends => {
                for backend in registry.iter() {
                    println!("{:<12} {} (.{})", backend.id().bold(), backend.label(), backend.extension());
                }
                Ok(())
            }
            Command::Schema(target) => {
                let model = target.input_settings.infer()?;
                let schema = schema::schema_document(&model, &target.input_settings.type_name);
                let schema_src = serde_json::to_string_pretty(&schema)?;
                write_or_print(target.out.as_deref(), &schema_src)
            }
            Command::Generate(target) => {
                // resolve backend and options before touching the inputs
                let backend = registry.get(&target.backend)?;
                let options = target.generate_options()?;
                let model = target.input_settings.infer()?;
                let rendered = backend.generate(&model, &target.input_settings.type_name, &options);
                emit(rendered, target.out.as_deref())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Infer every document in parallel and unify the results.
fn infer_documents(docs: &[Value]) -> Ty {
    docs.par_iter()
        .map(inference::infer_value)
        .reduce_with(|a, b| inference::unify(&[a, b]))
        .unwrap_or_else(|| inference::Inference::new().solve())
}

fn read_source(source: &Path) -> anyhow::Result<(String, String)> {
    if source == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| Error::Io { path: "<stdin>".into(), source })?;
        return Ok(("<stdin>".into(), text));
    }
    let label = source.display().to_string();
    let text = std::fs::read_to_string(source)
        .map_err(|error| Error::Io { path: label.clone(), source: error })?;
    Ok((label, text))
}

/// Split one input into documents and apply the JSON pointer to each.
fn documents_from_text(text: &str, ndjson: bool, pointer: Option<&str>) -> anyhow::Result<Vec<Value>> {
    let mut docs = Vec::new();
    if ndjson {
        for (ix, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line)
                .map_err(Error::from)
                .with_context(|| format!("line {}", ix + 1))?;
            docs.push(value);
        }
    } else {
        let value: Value = serde_json::from_str(text).map_err(Error::from)?;
        docs.push(value);
    }
    match pointer {
        None => Ok(docs),
        Some(ptr) => docs
            .into_iter()
            .map(|mut doc| {
                doc.pointer_mut(ptr)
                    .map(Value::take)
                    .ok_or_else(|| anyhow::Error::from(Error::Pointer(ptr.to_string())))
            })
            .collect(),
    }
}

fn write_or_print(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|source| Error::Io { path: parent.display().to_string(), source })?;
            }
            std::fs::write(path, text)
                .map_err(|source| Error::Io { path: path.display().to_string(), source })?;
            eprintln!("{} {}", "wrote".green(), path.display());
            Ok(())
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn emit(rendered: Rendered, out: Option<&Path>) -> anyhow::Result<()> {
    match rendered {
        Rendered::Single(text) => write_or_print(out, &text),
        Rendered::Artifacts(artifacts) => {
            let Some(dir) = out else {
                for artifact in &artifacts {
                    println!("{}", format!("==> {} <==", artifact.name).bold());
                    print!("{}", artifact.content);
                }
                return Ok(());
            };
            if dir.is_file() {
                bail!("--out must be a directory for separate artifacts: {}", dir.display());
            }
            std::fs::create_dir_all(dir)
                .map_err(|source| Error::Io { path: dir.display().to_string(), source })?;
            for artifact in &artifacts {
                let path = dir.join(&artifact.name);
                std::fs::write(&path, &artifact.content)
                    .map_err(|source| Error::Io { path: path.display().to_string(), source })?;
            }
            eprintln!("{} {} files to {}", "wrote".green(), artifacts.len(), dir.display());
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // an explicit glob that matched nothing is an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // literal path or '-'
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use json_shapes::Leaf;

    #[test]
    fn cli_definition_is_valid() {
        CommandLineInterface::command().debug_assert();
    }

    #[test]
    fn ndjson_splits_lines_and_skips_blanks() {
        let docs = documents_from_text("{\"a\":1}\n\n{\"a\":2}\n", true, None).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn ndjson_errors_name_the_line() {
        let err = documents_from_text("{\"a\":1}\n{oops\n", true, None).unwrap_err();
        assert!(format!("{err:#}").starts_with("line 2"), "{err:#}");
    }

    #[test]
    fn pointer_selects_subnodes() {
        let docs = documents_from_text(r#"{"data":{"items":[1]}}"#, false, Some("/data/items")).unwrap();
        assert_eq!(docs, [serde_json::json!([1])]);
        let err = documents_from_text(r#"{"data":{}}"#, false, Some("/data/items")).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Pointer(_))));
    }

    #[test]
    fn documents_unify_in_parallel() {
        let docs = documents_from_text("{\"id\":1,\"n\":\"x\"}\n{\"id\":2.5}\n", true, None).unwrap();
        let t = infer_documents(&docs);
        let o = t.as_object().unwrap();
        assert_eq!(o.fields["id"].ty, Ty::leaf(Leaf::Number));
        assert!(o.fields["n"].optional);
    }

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["-", "a.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("-"), PathBuf::from("a.json")]);
    }

    #[test]
    fn separate_flag_and_options_combine() {
        let cli = CommandLineInterface::try_parse_from([
            "json-shapes", "generate", "java", "-i", "x.json", "--options", r#"{"useRecord":true}"#, "--separate",
        ])
        .unwrap();
        let Command::Generate(target) = cli.cmd else { panic!("expected generate") };
        let options = target.generate_options().unwrap();
        assert!(options.java.use_record);
        assert!(options.emit_as_separate_artifacts);
        assert_eq!(target.input_settings.type_name, "Root");
    }
}
