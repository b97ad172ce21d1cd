//! Output-file filters: pure predicates over a token's canonical type and
//! path. A closed set, not a name-keyed registry, so an unknown filter can
//! never be referenced at runtime.

use serde::{Deserialize, Serialize};
use tokensmith_model::Token;

/// Which tokens belong in a given output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenFilter {
    /// Every public token: the union of the elementary category filters.
    All,
    /// Color tokens, minus internal building-block groups.
    Color,
    /// Themeable color tokens: excludes the `base` group, whose colors are
    /// non-themeable primitives.
    Theme,
    /// Numeric and size tokens.
    Number,
    /// String-like tokens.
    String,
}

impl TokenFilter {
    pub fn matches(&self, token: &Token) -> bool {
        // Source-only tokens are referenceable but never written out.
        if !token.exported {
            return false;
        }
        match self {
            Self::Color => public_color(token),
            Self::Theme => {
                token.token_type.is_color()
                    && !matches!(token.subgroup(), Some("base" | "utility"))
            }
            Self::Number => number_like(token),
            Self::String => token.token_type.is_string(),
            Self::All => {
                public_color(token)
                    || token.token_type.is_font()
                    || token.token_type.is_gradient()
                    || token.token_type.is_shadow()
                    || number_like(token)
                    || token.token_type.is_string()
            }
        }
    }
}

/// Colors minus the raw building-block groups that must not be re-exported
/// as public variables.
fn public_color(token: &Token) -> bool {
    token.token_type.is_color()
        && !matches!(token.subgroup(), Some("palette" | "context" | "utility"))
}

/// Plain numbers, plus sizes outside the internal `dimension` scale group.
fn number_like(token: &Token) -> bool {
    token.token_type.is_number()
        || (token.token_type.is_size() && token.subgroup() != Some("dimension"))
}
