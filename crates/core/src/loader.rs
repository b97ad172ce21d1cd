//! Token-set loading: reads the named token-set files of one task and
//! deep-merges them into a single tree, tracking which tokens are exported
//! and which are reference-only.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokensmith_model::TokenTree;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read token set `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse token set `{}`: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The merged token tree of one task plus the set of exported token paths.
#[derive(Debug, Clone)]
pub struct LoadedTokens {
    pub tree: TokenTree,
    exported: HashSet<String>,
}

impl LoadedTokens {
    /// Whether the token at this path came from an enabled (exported) set.
    ///
    /// Ancestor paths count too: tokens produced by splitting or expanding
    /// an exported token inherit its status.
    pub fn is_exported(&self, path: &[String]) -> bool {
        let mut dotted = String::new();
        for (i, segment) in path.iter().enumerate() {
            if i > 0 {
                dotted.push('.');
            }
            dotted.push_str(segment);
            if self.exported.contains(&dotted) {
                return true;
            }
        }
        false
    }
}

/// Load and merge a task's token sets from `<tokens_dir>/<set>.json`.
///
/// Reference-only sets (`excludes`) merge first so enabled sets override
/// them; a token wins export status by appearing in any enabled set.
pub fn load_token_sets(
    tokens_dir: &Path,
    sets: &[String],
    excludes: &[String],
) -> Result<LoadedTokens, LoadError> {
    let mut tree = TokenTree::new();
    let mut export_tree = TokenTree::new();

    for set in excludes {
        tree.merge(load_set(tokens_dir, set)?);
    }
    for set in sets {
        if excludes.contains(set) {
            continue;
        }
        let loaded = load_set(tokens_dir, set)?;
        export_tree.merge(loaded.clone());
        tree.merge(loaded);
    }

    tree.delegate_types();

    let exported = export_tree
        .flatten()
        .into_iter()
        .map(|(path, _)| path.join("."))
        .collect();

    Ok(LoadedTokens { tree, exported })
}

fn load_set(tokens_dir: &Path, set: &str) -> Result<TokenTree, LoadError> {
    let path = tokens_dir.join(format!("{set}.json"));
    let data = std::fs::read(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| LoadError::Json { path, source })
}
