//! Reference resolution over the merged token tree.
//!
//! Cycles can only arise from configuration mistakes, so traversal keeps a
//! visited chain and fails fast with the whole chain in the error instead of
//! recursing unboundedly.

use thiserror::Error;
use tokensmith_model::{reference, TokenTree, TokenValue};

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("reference `{{{expression}}}` does not resolve to a token")]
    UnknownReference { expression: String },
    #[error("cyclic reference chain: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}

/// Resolve every reference expression inside a value against the tree.
///
/// A value that is exactly one reference takes on the referenced token's
/// (recursively resolved) value, composites included; embedded references
/// interpolate their stringified resolved value in place.
pub fn resolve_value(value: &TokenValue, tree: &TokenTree) -> Result<TokenValue, ResolveError> {
    let mut chain = Vec::new();
    resolve_inner(value, tree, &mut chain)
}

/// Resolve a single string value (see [`resolve_value`]).
pub fn resolve_str(value: &str, tree: &TokenTree) -> Result<TokenValue, ResolveError> {
    let mut chain = Vec::new();
    resolve_string(value, tree, &mut chain)
}

fn resolve_inner(
    value: &TokenValue,
    tree: &TokenTree,
    chain: &mut Vec<String>,
) -> Result<TokenValue, ResolveError> {
    match value {
        TokenValue::String(s) => resolve_string(s, tree, chain),
        TokenValue::Object(map) => {
            let mut out = map.clone();
            for v in out.values_mut() {
                *v = resolve_inner(v, tree, chain)?;
            }
            Ok(TokenValue::Object(out))
        }
        TokenValue::List(items) => {
            let resolved: Result<Vec<_>, _> = items
                .iter()
                .map(|v| resolve_inner(v, tree, chain))
                .collect();
            Ok(TokenValue::List(resolved?))
        }
        other => Ok(other.clone()),
    }
}

fn resolve_string(
    value: &str,
    tree: &TokenTree,
    chain: &mut Vec<String>,
) -> Result<TokenValue, ResolveError> {
    if let Some(segments) = reference::split_reference(value) {
        let dotted = segments.join(".");
        return follow(&dotted, tree, chain);
    }

    if !reference::uses_references(value) {
        return Ok(TokenValue::String(value.to_string()));
    }

    // Interpolate embedded references into the surrounding text.
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(open) = rest.find('{') {
        let tail = &rest[open + 1..];
        let Some(close) = tail.find('}') else {
            out.push_str(rest);
            return Ok(TokenValue::String(out));
        };
        out.push_str(&rest[..open]);
        let dotted = &tail[..close];
        let resolved = follow(dotted, tree, chain)?;
        out.push_str(&resolved.to_string());
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    Ok(TokenValue::String(out))
}

fn follow(
    dotted: &str,
    tree: &TokenTree,
    chain: &mut Vec<String>,
) -> Result<TokenValue, ResolveError> {
    if chain.iter().any(|seen| seen == dotted) {
        let mut cycle = chain.clone();
        cycle.push(dotted.to_string());
        return Err(ResolveError::Cycle { chain: cycle });
    }

    let Some(target) = tree.get_path(dotted) else {
        return Err(ResolveError::UnknownReference {
            expression: dotted.to_string(),
        });
    };

    chain.push(dotted.to_string());
    let resolved = resolve_inner(&target.value, tree, chain);
    chain.pop();
    resolved
}
