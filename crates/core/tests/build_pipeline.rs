//! Integration test: run a full build — one brand, one app, web + android,
//! light/dark themes — against the fixture token sets and verify the task
//! matrix, the per-theme file reduction, and the rendered file contents.

use std::path::Path;

use tokensmith_core::{generate_tasks, permutate_themes, run_build};
use tokensmith_core::{BuildManifest, PermutateOptions};

fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

fn manifest(build_dir: &Path) -> BuildManifest {
    serde_json::from_str(&format!(
        r#"{{
            "brands": ["acme"],
            "apps": {{ "docs": ["web", "android"] }},
            "themes": ["light", "dark"],
            "defaultTheme": "light",
            "tokensDir": "{}",
            "buildDir": "{}"
        }}"#,
        fixtures_dir(),
        build_dir.display(),
    ))
    .expect("manifest should parse")
}

#[test]
fn task_matrix_covers_platforms_and_themes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let m = manifest(dir.path());

    let themes: Vec<tokensmith_model::ThemeEntry> = serde_json::from_str(
        &std::fs::read_to_string(format!("{}/$themes.json", fixtures_dir())).expect("read"),
    )
    .expect("themes parse");
    let permutations = permutate_themes(&themes, &PermutateOptions::default()).expect("permutate");
    assert!(permutations.contains_key("acme_docs_light"));
    assert!(permutations.contains_key("acme_docs_dark"));

    let tasks = generate_tasks(&m, &permutations).expect("tasks");
    assert_eq!(tasks.len(), 4, "2 platforms x 2 themes");

    for task in &tasks {
        if task.theme == "light" {
            assert_eq!(task.config.files.len(), 5);
        } else {
            assert_eq!(task.config.files.len(), 1);
            assert!(task.config.files[0]
                .destination
                .starts_with("theme-darkTokens"));
        }
    }
}

#[test]
fn full_build_renders_web_and_android_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report = run_build(&manifest(dir.path())).expect("build");
    assert!(!report.has_failures(), "failures: {:?}", report.failures);
    assert_eq!(report.written.len(), 12, "(5 + 1) files per platform");

    let web_dir = dir.path().join("web/acme-docs");
    let android_dir = dir.path().join("android/acme-docs");

    let web_files: Vec<String> = list_files(&web_dir);
    assert_eq!(
        web_files,
        [
            "allTokens.scss",
            "colorTokens.scss",
            "numberTokens.scss",
            "stringTokens.scss",
            "theme-darkTokens.scss",
            "theme-lightTokens.scss"
        ]
    );
    assert_eq!(list_files(&android_dir).len(), 6);

    // --- web ---
    let all = read(&web_dir.join("allTokens.scss"));
    assert!(all.contains("// allTokens.scss"));
    assert!(all.contains("// Do not edit directly"));

    // Sizes converted to rem; math resolved to a literal even though the
    // original expression held a reference.
    assert!(all.contains("$tk-space-sm: 0.25rem !default;"));
    assert!(all.contains("$tk-space-lg: 0.5rem !default;"));

    // A plain reference renders the custom-property lookup.
    assert!(all.contains("$tk-color-primary-bg: var(--#{$prefix}color-blue-500) !default;"));

    // Base colors render literals.
    assert!(all.contains("$tk-color-base-white: rgba(255,255,255,1.00) !default;"));

    // Palette colors are internal and stay out of the public file.
    assert!(!all.contains("$tk-color-palette-blue-500"));

    // Typography re-renders its original sub-references, with the style
    // extracted from the combined weight.
    assert!(all.contains("\"font-family\": var(--#{$prefix}font-family-body)"));
    assert!(all.contains("\"font-weight\": var(--#{$prefix}font-weight-heading)"));
    assert!(all.contains("\"font-style\": italic"));

    // The split weight token became numeric; its style sibling survives.
    assert!(all.contains("$tk-font-weight-heading-weight: 700 !default;"));
    assert!(all.contains("$tk-font-weight-heading-style: italic !default;"));

    // Shadows flatten to a box-shadow list.
    assert!(all.contains("$tk-shadow-card: 0 2 8 0 #00000033 !default;"));

    // Descriptions become end-of-line comments.
    assert!(all.contains("$tk-content-app-name: Acme Docs !default; // Product name shown in the title bar"));

    let dark = read(&web_dir.join("theme-darkTokens.scss"));
    assert!(dark.contains("$tk-color-primary-accent: rgba(136,170,255,1.00) !default;"));
    let light = read(&web_dir.join("theme-lightTokens.scss"));
    assert!(light.contains("$tk-color-primary-accent: rgba(0,85,204,1.00) !default;"));

    // --- android ---
    let all = read(&android_dir.join("allTokens.xml"));
    assert!(all.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(all.contains("<dimen name=\"space_sm\">4dp</dimen>"));
    assert!(all.contains("<dimen name=\"space_lg\">8dp</dimen>"));
    assert!(all.contains("<color name=\"color_primary_bg\">@color/color_palette_blue_500</color>"));
    assert!(all.contains("<color name=\"color_base_white\">#ffffffff</color>"));

    // Composites expand to scalar children; font sizes get sp, the rest dp.
    assert!(all.contains("<dimen name=\"type_heading_font_size\">32sp</dimen>"));
    assert!(all.contains("<dimen name=\"type_heading_line_height\">40sp</dimen>"));
    assert!(all.contains("<string name=\"type_heading_font_family\">@string/font_family_body</string>"));
    assert!(all.contains("<dimen name=\"shadow_card_blur\">8dp</dimen>"));
    assert!(all.contains("<string name=\"content_app_name\">Acme Docs</string>"));
    assert!(all.contains("<!-- Product name shown in the title bar -->"));

    let dark = read(&android_dir.join("theme-darkTokens.xml"));
    assert!(dark.contains("<color name=\"color_primary_accent\">#ff88aaff</color>"));
}

#[test]
fn non_default_theme_builds_only_its_color_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report = run_build(&manifest(dir.path())).expect("build");
    assert!(!report.has_failures());

    let dark_files: Vec<_> = report
        .written
        .iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains("dark"))
        })
        .collect();
    assert_eq!(dark_files.len(), 2, "one dark file per platform");
}

fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read_dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}
