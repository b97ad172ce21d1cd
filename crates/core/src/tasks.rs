//! Task matrix generation: the Cartesian product of brands, apps, platforms,
//! and themes, each combination bound to its platform configuration and
//! source token sets.

use indexmap::IndexMap;

use crate::config::{BuildManifest, ConfigError, PlatformConfig, PlatformId};
use crate::themes::ThemePermutation;

/// One concrete build unit: a (brand, app, platform, theme) tuple with its
/// platform configuration and token-set sources. Generated fresh per build,
/// never persisted; identity is unique within a build and tasks write to
/// disjoint output paths.
#[derive(Debug, Clone)]
pub struct Task {
    pub brand: String,
    pub app: String,
    pub platform: PlatformId,
    pub theme: String,
    /// Whether this task emits the full file set or only the theme file.
    pub full_output: bool,
    /// Token sets to load, in order; from the theme permutator.
    pub sets: Vec<String>,
    /// Sets whose tokens stay reference-only.
    pub excludes: Vec<String>,
    pub config: PlatformConfig,
}

impl Task {
    /// Human-readable task identity for reports and logs.
    pub fn id(&self) -> String {
        format!(
            "{}/{}-{}-{}",
            self.brand, self.app, self.platform, self.theme
        )
    }
}

/// Expand the manifest into the full task list, in manifest declaration
/// order: brands, then apps, then each app's platforms, then themes.
pub fn generate_tasks(
    manifest: &BuildManifest,
    permutations: &IndexMap<String, ThemePermutation>,
) -> Result<Vec<Task>, ConfigError> {
    let separator = manifest.separator();
    let mut tasks = Vec::new();

    for brand in &manifest.brands {
        for (app, platforms) in &manifest.apps {
            for platform_name in platforms {
                let platform = PlatformId::parse(platform_name)?;
                for theme in &manifest.themes {
                    let key = [brand.as_str(), app.as_str(), theme.as_str()].join(separator);
                    let Some(permutation) = permutations.get(&key) else {
                        return Err(ConfigError::UnknownPermutation(key));
                    };

                    let full_output =
                        theme == &manifest.default_theme || !manifest.theme_files_only;
                    let config = PlatformConfig::new(
                        platform,
                        brand,
                        app,
                        theme,
                        full_output,
                        manifest,
                    );

                    tasks.push(Task {
                        brand: brand.clone(),
                        app: app.clone(),
                        platform,
                        theme: theme.clone(),
                        full_output,
                        sets: permutation.sets.clone(),
                        excludes: permutation.excludes.clone(),
                        config,
                    });
                }
            }
        }
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> BuildManifest {
        serde_json::from_str(json).unwrap()
    }

    fn permutations(keys: &[&str]) -> IndexMap<String, ThemePermutation> {
        keys.iter()
            .map(|k| {
                (
                    k.to_string(),
                    ThemePermutation {
                        sets: vec!["core".to_string()],
                        excludes: Vec::new(),
                    },
                )
            })
            .collect()
    }

    fn two_by_two() -> BuildManifest {
        manifest(
            r#"{
                "brands": ["acme"],
                "apps": { "docs": ["web", "android"] },
                "themes": ["light", "dark"],
                "defaultTheme": "light",
                "tokensDir": "tokens",
                "buildDir": "dist/tokens"
            }"#,
        )
    }

    #[test]
    fn two_platforms_two_themes_make_four_tasks() {
        let m = two_by_two();
        let perms = permutations(&["acme_docs_light", "acme_docs_dark"]);
        let tasks = generate_tasks(&m, &perms).unwrap();

        let ids: Vec<String> = tasks.iter().map(Task::id).collect();
        assert_eq!(
            ids,
            [
                "acme/docs-web-light",
                "acme/docs-web-dark",
                "acme/docs-android-light",
                "acme/docs-android-dark"
            ]
        );
    }

    #[test]
    fn only_default_theme_tasks_emit_the_full_file_set() {
        let m = two_by_two();
        let perms = permutations(&["acme_docs_light", "acme_docs_dark"]);
        let tasks = generate_tasks(&m, &perms).unwrap();

        for task in &tasks {
            let names: Vec<&str> = task
                .config
                .files
                .iter()
                .map(|f| f.destination.as_str())
                .collect();
            if task.theme == "light" {
                assert_eq!(names.len(), 5, "default theme emits all files");
                assert!(names.contains(&"allTokens.scss") || names.contains(&"allTokens.xml"));
                assert!(
                    names.contains(&"numberTokens.scss") || names.contains(&"numberTokens.xml")
                );
                assert!(
                    names.contains(&"stringTokens.scss") || names.contains(&"stringTokens.xml")
                );
            } else {
                assert_eq!(
                    names,
                    [format!("theme-darkTokens.{}", task.platform.file_extension())]
                );
            }
        }
    }

    #[test]
    fn theme_file_reduction_is_a_manifest_flag_not_a_rule() {
        let m = manifest(
            r#"{
                "brands": ["acme"],
                "apps": { "docs": ["web"] },
                "themes": ["light", "dark"],
                "defaultTheme": "light",
                "tokensDir": "tokens",
                "buildDir": "dist/tokens",
                "themeFilesOnly": false
            }"#,
        );
        let perms = permutations(&["acme_docs_light", "acme_docs_dark"]);
        let tasks = generate_tasks(&m, &perms).unwrap();
        for task in &tasks {
            assert_eq!(task.config.files.len(), 5);
            assert!(task.full_output);
        }
    }

    #[test]
    fn unknown_platform_is_a_configuration_error() {
        let m = manifest(
            r#"{
                "brands": ["acme"],
                "apps": { "docs": ["vision-pro"] },
                "themes": ["light"],
                "defaultTheme": "light",
                "tokensDir": "tokens",
                "buildDir": "dist/tokens"
            }"#,
        );
        let err = generate_tasks(&m, &permutations(&["acme_docs_light"])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPlatform(name) if name == "vision-pro"));
    }

    #[test]
    fn missing_permutation_is_a_configuration_error() {
        let m = two_by_two();
        let err = generate_tasks(&m, &permutations(&["acme_docs_light"])).unwrap_err();
        assert!(
            matches!(err, ConfigError::UnknownPermutation(key) if key == "acme_docs_dark")
        );
    }
}
