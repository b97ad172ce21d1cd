//! Build driver: runs the task list end to end and reports every failure at
//! the end of the run instead of stopping at the first one.
//!
//! Error scoping follows the data: a resolution or value error fails the one
//! file that needed the token, an I/O error fails its task, and only
//! configuration errors abort the whole build.

use std::path::PathBuf;

use indexmap::IndexMap;
use thiserror::Error;
use tokensmith_model::{FileHeader, OriginalValue, ThemeEntry, Token, TokenType};

use crate::config::{BuildManifest, ConfigError, FileSpec, PlatformId};
use crate::formats;
use crate::loader::{self, LoadedTokens};
use crate::preprocess::preprocess;
use crate::resolve;
use crate::tasks::{generate_tasks, Task};
use crate::themes::{permutate_themes, PermutateOptions, ThemeError};
use crate::transforms;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error("failed to read theme manifest `{}`: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse theme manifest `{}`: {source}", path.display())]
    ManifestJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
enum FileError {
    #[error(transparent)]
    Resolve(#[from] resolve::ResolveError),
    #[error(transparent)]
    Transform(#[from] transforms::TransformError),
}

/// One failure, attributed to its most specific scope: a file when
/// `destination` is set, otherwise the whole task.
#[derive(Debug, Clone)]
pub struct BuildFailure {
    pub task: String,
    pub destination: Option<String>,
    pub error: String,
}

/// Outcome of a build run: everything written and everything that failed.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Run every task in the manifest's matrix.
pub fn run_build(manifest: &BuildManifest) -> Result<BuildReport, BuildError> {
    let themes = load_theme_manifest(manifest)?;
    let permutations = permutate_themes(
        &themes,
        &PermutateOptions {
            separator: manifest.separator().to_string(),
        },
    )?;
    let tasks = generate_tasks(manifest, &permutations)?;

    let header = file_header(manifest);
    let mut report = BuildReport::default();
    for task in &tasks {
        tracing::info!("building {}", task.id());
        run_task(task, manifest, &header, &mut report);
    }
    Ok(report)
}

fn load_theme_manifest(manifest: &BuildManifest) -> Result<Vec<ThemeEntry>, BuildError> {
    let path = manifest.tokens_dir.join("$themes.json");
    let data = std::fs::read(&path).map_err(|source| BuildError::ManifestIo {
        path: path.clone(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| BuildError::ManifestJson { path, source })
}

fn file_header(manifest: &BuildManifest) -> FileHeader {
    let mut header = FileHeader::new(vec![
        format!("{} v{}", crate::TOOL_NAME, crate::TOOL_VERSION),
        "Licensed under MIT".to_string(),
    ]);
    if manifest.timestamp {
        header.timestamp = Some(chrono::Utc::now().to_rfc3339());
    }
    header
}

fn run_task(task: &Task, manifest: &BuildManifest, header: &FileHeader, report: &mut BuildReport) {
    if let Err(err) = clean_task_output(task) {
        report.failures.push(BuildFailure {
            task: task.id(),
            destination: None,
            error: format!("failed to clean output: {err}"),
        });
        return;
    }

    let mut loaded =
        match loader::load_token_sets(&manifest.tokens_dir, &task.sets, &task.excludes) {
            Ok(loaded) => loaded,
            Err(err) => {
                report.failures.push(BuildFailure {
                    task: task.id(),
                    destination: None,
                    error: err.to_string(),
                });
                return;
            }
        };

    // Snapshot every token before preprocessing so renderers can recover the
    // as-loaded types and un-resolved reference expressions.
    let originals: IndexMap<String, OriginalValue> = loaded
        .tree
        .flatten()
        .into_iter()
        .map(|(path, raw)| {
            (
                path.join("."),
                OriginalValue {
                    token_type: TokenType::parse(raw.token_type.as_deref().unwrap_or("")),
                    value: raw.value.clone(),
                },
            )
        })
        .collect();

    preprocess(&mut loaded.tree);
    if task.config.expand_composites {
        crate::expand::expand_composites(&mut loaded.tree);
    }
    let tokens = collect_tokens(&loaded, task, &originals);

    for spec in &task.config.files {
        match build_file(spec, &tokens, task, &loaded, header) {
            Ok(text) => {
                let path = task.config.build_path.join(&spec.destination);
                match std::fs::write(&path, text) {
                    Ok(()) => report.written.push(path),
                    Err(err) => {
                        // Write failures are task-scoped: the remaining
                        // files of this task would hit the same disk.
                        report.failures.push(BuildFailure {
                            task: task.id(),
                            destination: Some(spec.destination.clone()),
                            error: format!("failed to write output: {err}"),
                        });
                        return;
                    }
                }
            }
            Err(err) => {
                report.failures.push(BuildFailure {
                    task: task.id(),
                    destination: Some(spec.destination.clone()),
                    error: err.to_string(),
                });
            }
        }
    }
}

/// Remove this task's own stale outputs and make sure the directory exists.
fn clean_task_output(task: &Task) -> std::io::Result<()> {
    for spec in &task.config.files {
        let path = task.config.build_path.join(&spec.destination);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    std::fs::create_dir_all(&task.config.build_path)
}

/// Flatten the preprocessed tree into named tokens paired with their
/// pre-preprocessing snapshots.
fn collect_tokens(
    loaded: &LoadedTokens,
    task: &Task,
    originals: &IndexMap<String, OriginalValue>,
) -> Vec<Token> {
    let prefix = name_prefix(task);
    loaded
        .tree
        .flatten()
        .into_iter()
        .map(|(path, raw)| {
            let token_type = TokenType::parse(raw.token_type.as_deref().unwrap_or(""));
            let value = raw.value.clone();
            let original = originals.get(&path.join(".")).cloned().unwrap_or_else(|| {
                // Tokens created by preprocessing (weight/style splits) have
                // no earlier state; their current form is the original.
                OriginalValue {
                    token_type: token_type.clone(),
                    value: value.clone(),
                }
            });
            Token {
                name: task.config.name_style.render(&path, prefix),
                exported: loaded.is_exported(&path),
                path,
                token_type,
                value,
                original,
                description: raw.description.clone(),
                extensions: raw.extensions.clone(),
            }
        })
        .collect()
}

/// Web variable names carry the platform prefix; native names do not.
fn name_prefix(task: &Task) -> Option<&str> {
    match task.platform {
        PlatformId::Web | PlatformId::WebPx | PlatformId::WebVw => {
            Some(task.config.options.prefix.as_str())
        }
        PlatformId::Ios | PlatformId::Android => None,
    }
}

fn build_file(
    spec: &FileSpec,
    tokens: &[Token],
    task: &Task,
    loaded: &LoadedTokens,
    header: &FileHeader,
) -> Result<String, FileError> {
    let mut selected: Vec<Token> = tokens
        .iter()
        .filter(|t| spec.filter.matches(t))
        .cloned()
        .collect();

    let options = task.config.options.transform_options();
    for token in &mut selected {
        token.value = resolve::resolve_value(&token.value, &loaded.tree)?;
        transforms::apply_pipeline(token, &task.config.transforms, &options)?;
    }
    selected.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(formats::render(spec, &selected, &task.config, header))
}
