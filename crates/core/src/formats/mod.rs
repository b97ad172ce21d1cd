//! Per-format renderers: pure functions from a filtered, transformed,
//! name-sorted token list to the full text of one output file.

pub mod android;
pub mod scss;
pub mod swift;

use tokensmith_model::{reference, FileHeader, Token};

use crate::config::{FileSpec, FormatKind, PlatformConfig, PlatformOptions};

/// Render one output file.
pub fn render(
    spec: &FileSpec,
    tokens: &[Token],
    config: &PlatformConfig,
    header: &FileHeader,
) -> String {
    match spec.format {
        FormatKind::ScssVariables => scss::render(spec, tokens, config, header),
        FormatKind::IosSwiftClass => swift::render(spec, tokens, config, header),
        FormatKind::AndroidResources => android::render(spec, tokens, config, header),
    }
}

/// The reference path a token should render as, when reference output is on.
///
/// Returns `None` — meaning "render the literal" — unless the token's
/// original value is exactly one reference expression. Two carve-outs always
/// take the literal: base-group colors (never referenced downstream), and any
/// value with arithmetic around the reference, which a reference form cannot
/// encode and which already fails the full-reference check.
pub(crate) fn reference_target(token: &Token, options: &PlatformOptions) -> Option<Vec<String>> {
    if !options.output_references {
        return None;
    }
    let original = token.original.value.as_str()?;
    let segments = reference::split_reference(original)?;
    if token.token_type.is_color() && token.subgroup() == Some("base") {
        return None;
    }
    Some(segments)
}
