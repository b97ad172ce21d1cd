use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Inclusion state of one token set within a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSetState {
    /// Contributes tokens to the output.
    Enabled,
    /// Contributes tokens that are referenceable but excluded from output
    /// (a base/include-only set).
    Source,
    /// Not loaded at all.
    Disabled,
}

/// One theme from the theme manifest: a named selection of token sets,
/// optionally assigned to a permutation group (dimension).
///
/// Themes are loaded once and never mutated; the permutator derives its own
/// structures from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(rename = "selectedTokenSets", default)]
    pub selected_token_sets: IndexMap<String, TokenSetState>,
}

impl ThemeEntry {
    /// Names of token sets in the given state, in declaration order.
    pub fn sets_in_state(&self, state: TokenSetState) -> Vec<String> {
        self.selected_token_sets
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn enabled_sets(&self) -> Vec<String> {
        self.sets_in_state(TokenSetState::Enabled)
    }

    pub fn source_sets(&self) -> Vec<String> {
        self.sets_in_state(TokenSetState::Source)
    }
}
