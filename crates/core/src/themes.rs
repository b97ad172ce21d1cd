//! Theme permutation: expands the theme manifest into a flat mapping from
//! permutation name to the token sets each build consumes.

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tokensmith_model::ThemeEntry;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error(
        "theme `{0}` does not have a group property, which is required for \
         multi-dimensional theming"
    )]
    MissingGroup(String),
}

/// Options for [`permutate_themes`].
#[derive(Debug, Clone)]
pub struct PermutateOptions {
    /// Separator between theme names when joining a multi-group permutation.
    pub separator: String,
}

impl Default for PermutateOptions {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
        }
    }
}

/// Token-set selection for one theme permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePermutation {
    /// Token sets to load, in first-occurrence order. Includes source-only
    /// sets so references into them resolve.
    pub sets: Vec<String>,
    /// Subset of `sets` whose tokens are excluded from output. A set that is
    /// enabled by any contributing theme never appears here.
    pub excludes: Vec<String>,
}

/// Expand the theme manifest into permutations.
///
/// Ungrouped manifests map one-to-one: each theme becomes a permutation named
/// after it. When themes declare groups, every theme must declare one, and the
/// permutations are the Cartesian product across groups — enumerated in
/// group-declaration order, themes within a group in declaration order, so
/// repeated builds produce identical task ordering.
pub fn permutate_themes(
    themes: &[ThemeEntry],
    options: &PermutateOptions,
) -> Result<IndexMap<String, ThemePermutation>, ThemeError> {
    if !themes.iter().any(|t| t.group.is_some()) {
        return Ok(map_themes_directly(themes));
    }

    let mut groups: IndexMap<&str, Vec<&ThemeEntry>> = IndexMap::new();
    for theme in themes {
        match &theme.group {
            Some(group) => groups.entry(group.as_str()).or_default().push(theme),
            None => return Err(ThemeError::MissingGroup(theme.name.clone())),
        }
    }

    if groups.len() <= 1 {
        return Ok(map_themes_directly(themes));
    }

    let mut out = IndexMap::new();
    for combo in cartesian(groups.values()) {
        let name = combo
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(&options.separator);

        let enabled: IndexSet<String> =
            combo.iter().flat_map(|t| t.enabled_sets()).collect();
        let source: IndexSet<String> =
            combo.iter().flat_map(|t| t.source_sets()).collect();

        let mut sets: Vec<String> = enabled.iter().cloned().collect();
        sets.extend(source.iter().filter(|s| !enabled.contains(*s)).cloned());

        let excludes: Vec<String> = source
            .into_iter()
            .filter(|s| !enabled.contains(s))
            .collect();

        out.insert(name, ThemePermutation { sets, excludes });
    }
    Ok(out)
}

fn map_themes_directly(themes: &[ThemeEntry]) -> IndexMap<String, ThemePermutation> {
    themes
        .iter()
        .map(|theme| {
            (
                theme.name.clone(),
                ThemePermutation {
                    sets: theme.enabled_sets(),
                    excludes: theme.source_sets(),
                },
            )
        })
        .collect()
}

/// Cartesian product across groups, in declaration order:
/// `[[a, b], [x, y]]` → `[a,x], [a,y], [b,x], [b,y]`.
fn cartesian<'a>(
    groups: impl Iterator<Item = &'a Vec<&'a ThemeEntry>>,
) -> Vec<Vec<&'a ThemeEntry>> {
    let mut combos: Vec<Vec<&ThemeEntry>> = vec![Vec::new()];
    for group in groups {
        let mut next = Vec::with_capacity(combos.len() * group.len());
        for combo in &combos {
            for theme in group {
                let mut extended = combo.clone();
                extended.push(theme);
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokensmith_model::TokenSetState;

    fn theme(name: &str, group: Option<&str>, sets: &[(&str, TokenSetState)]) -> ThemeEntry {
        ThemeEntry {
            name: name.into(),
            group: group.map(str::to_string),
            selected_token_sets: sets
                .iter()
                .map(|(n, s)| (n.to_string(), *s))
                .collect(),
        }
    }

    #[test]
    fn ungrouped_themes_map_directly() {
        let themes = vec![
            theme(
                "light",
                None,
                &[
                    ("base", TokenSetState::Source),
                    ("color/light", TokenSetState::Enabled),
                ],
            ),
            theme(
                "dark",
                None,
                &[
                    ("base", TokenSetState::Source),
                    ("color/dark", TokenSetState::Enabled),
                ],
            ),
        ];

        let out = permutate_themes(&themes, &PermutateOptions::default()).unwrap();
        assert_eq!(out.len(), 2);
        let light = &out["light"];
        assert_eq!(light.sets, ["color/light"]);
        assert_eq!(light.excludes, ["base"]);
        let dark = &out["dark"];
        assert_eq!(dark.sets, ["color/dark"]);
        assert_eq!(dark.excludes, ["base"]);
    }

    #[test]
    fn mixed_group_declaration_is_an_error() {
        let themes = vec![
            theme("light", Some("mode"), &[]),
            theme("compact", None, &[]),
        ];
        let err = permutate_themes(&themes, &PermutateOptions::default()).unwrap_err();
        assert!(err.to_string().contains("compact"));
    }

    #[test]
    fn single_group_behaves_like_ungrouped() {
        let themes = vec![
            theme("light", Some("mode"), &[("color/light", TokenSetState::Enabled)]),
            theme("dark", Some("mode"), &[("color/dark", TokenSetState::Enabled)]),
        ];
        let out = permutate_themes(&themes, &PermutateOptions::default()).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.contains_key("light"));
        assert!(out.contains_key("dark"));
    }

    #[test]
    fn two_groups_produce_ordered_cartesian_product() {
        let themes = vec![
            theme("acme", Some("brand"), &[("brand/acme", TokenSetState::Enabled)]),
            theme("orbit", Some("brand"), &[("brand/orbit", TokenSetState::Enabled)]),
            theme("light", Some("mode"), &[("color/light", TokenSetState::Enabled)]),
            theme("dark", Some("mode"), &[("color/dark", TokenSetState::Enabled)]),
            theme("dim", Some("mode"), &[("color/dim", TokenSetState::Enabled)]),
        ];

        let out = permutate_themes(&themes, &PermutateOptions::default()).unwrap();
        let names: Vec<&String> = out.keys().collect();
        assert_eq!(
            names,
            [
                "acme_light",
                "acme_dark",
                "acme_dim",
                "orbit_light",
                "orbit_dark",
                "orbit_dim"
            ]
        );
        assert_eq!(
            out["orbit_dim"].sets,
            ["brand/orbit".to_string(), "color/dim".to_string()]
        );
    }

    #[test]
    fn enabled_set_wins_over_source_marker() {
        // `core` is source-only for the mode themes but enabled by the brand
        // theme: it must be loaded and must not be excluded.
        let themes = vec![
            theme(
                "acme",
                Some("brand"),
                &[("core", TokenSetState::Enabled)],
            ),
            theme(
                "light",
                Some("mode"),
                &[
                    ("core", TokenSetState::Source),
                    ("color/light", TokenSetState::Enabled),
                ],
            ),
            theme(
                "dark",
                Some("mode"),
                &[
                    ("core", TokenSetState::Source),
                    ("color/dark", TokenSetState::Enabled),
                ],
            ),
        ];

        let out = permutate_themes(&themes, &PermutateOptions::default()).unwrap();
        let light = &out["acme_light"];
        assert_eq!(light.sets, ["core", "color/light"]);
        assert!(light.excludes.is_empty());
    }

    #[test]
    fn source_only_sets_are_loaded_but_excluded() {
        let themes = vec![
            theme("acme", Some("brand"), &[("brand/acme", TokenSetState::Enabled)]),
            theme(
                "light",
                Some("mode"),
                &[
                    ("base", TokenSetState::Source),
                    ("color/light", TokenSetState::Enabled),
                ],
            ),
            theme(
                "dark",
                Some("mode"),
                &[
                    ("base", TokenSetState::Source),
                    ("color/dark", TokenSetState::Enabled),
                ],
            ),
        ];

        let out = permutate_themes(&themes, &PermutateOptions::default()).unwrap();
        let light = &out["acme_light"];
        assert_eq!(
            light.sets,
            ["brand/acme".to_string(), "color/light".to_string(), "base".to_string()]
        );
        assert_eq!(light.excludes, ["base"]);
    }
}
