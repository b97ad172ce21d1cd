//! SCSS variable renderer: one `$name: value !default;` line per token,
//! with custom-property references where the platform asks for them.

use tokensmith_model::{reference, CommentStyle, FileHeader, Token, TokenType};

use crate::config::{FileSpec, NameStyle, PlatformConfig, PlatformOptions};
use crate::fontweight;
use crate::formats::reference_target;
use crate::transforms::css_property;

/// Roots whose full-reference values render as `var(--…)` lookups.
const REFERENCE_ROOTS: [&str; 5] = ["color", "space", "opacity", "borderRadius", "borderWidth"];

/// Sub-groups that are internal scaffolding and never part of a public
/// custom-property name.
const INTERNAL_GROUPS: [&str; 3] = ["palette", "context", "utility"];

pub fn render(
    spec: &FileSpec,
    tokens: &[Token],
    config: &PlatformConfig,
    header: &FileHeader,
) -> String {
    let mut out = String::with_capacity(tokens.len() * 64 + 256);
    out.push_str(&format!("//\n// {}\n//\n", spec.destination));
    out.push_str(&header.render(CommentStyle::Short));
    out.push('\n');
    out.push_str("// scss-docs-start design-tokens\n");

    for token in tokens {
        out.push_str(&format!(
            "${}: {} !default;",
            token.name,
            token_value(token, &config.options)
        ));
        if let Some(desc) = &token.description {
            out.push_str(&format!(" // {desc}"));
        }
        out.push('\n');
    }

    out.push_str("// scss-docs-end design-tokens\n");
    out
}

fn token_value(token: &Token, options: &PlatformOptions) -> String {
    if let Some(segments) = reference_target(token, options)
        && token.group().is_some_and(|g| REFERENCE_ROOTS.contains(&g))
    {
        return custom_property(&segments);
    }

    if options.output_references
        && matches!(token.token_type, TokenType::Typography)
        && token.original.value.is_composite()
        && let Some(map) = typography_map(token)
    {
        return map;
    }

    token.value.to_string()
}

/// `var(--#{$prefix}…)` lookup for a reference path, with internal sub-group
/// segments dropped from the public name. The `#{$prefix}` interpolation is
/// resolved by the consuming stylesheet, not here.
fn custom_property(segments: &[String]) -> String {
    let public: Vec<String> = segments
        .iter()
        .filter(|s| !INTERNAL_GROUPS.contains(&s.as_str()))
        .cloned()
        .collect();
    let name = NameStyle::Kebab.render(&public, None);
    format!("var(--#{{$prefix}}{name})")
}

/// Reconstruct a typography map from the *original* (un-resolved) sub-values
/// so references inside the composite surface as custom-property lookups.
fn typography_map(token: &Token) -> Option<String> {
    let obj = token.original.value.as_object()?;
    let mut entries = Vec::new();
    let mut has_style = false;

    for (key, sub) in obj {
        if key == "fontStyle" {
            has_style = true;
        }
        let rendered = if key == "fontWeight" {
            match token.vendor_extension("originalFontWeight") {
                Some(raw) => reference_or_literal(raw),
                None => sub.to_string(),
            }
        } else {
            reference_or_literal(&sub.to_string())
        };
        entries.push(format!("\"{}\": {rendered}", css_property(key)));
    }

    if !has_style {
        let style = token
            .vendor_extension("fontStyle")
            .map(str::to_string)
            .or_else(|| {
                token
                    .vendor_extension("originalFontWeight")
                    .map(|w| fontweight::font_style_of(w).to_string())
            })
            .unwrap_or_else(|| "normal".to_string());
        entries.push(format!("\"font-style\": {style}"));
    }

    Some(format!("({})", entries.join(", ")))
}

fn reference_or_literal(raw: &str) -> String {
    match reference::split_reference(raw) {
        Some(segments) => custom_property(&segments),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use tokensmith_model::{OriginalValue, TokenValue};

    use crate::config::{BuildManifest, PlatformId};

    fn config() -> PlatformConfig {
        let manifest: BuildManifest = serde_json::from_str(
            r#"{
                "brands": ["acme"],
                "apps": { "docs": ["web"] },
                "themes": ["light"],
                "defaultTheme": "light",
                "tokensDir": "tokens",
                "buildDir": "dist"
            }"#,
        )
        .unwrap();
        PlatformConfig::new(PlatformId::Web, "acme", "docs", "light", true, &manifest)
    }

    fn token(
        path: &[&str],
        token_type: TokenType,
        value: TokenValue,
        original: TokenValue,
    ) -> Token {
        Token {
            path: path.iter().map(|s| s.to_string()).collect(),
            name: NameStyle::Kebab.render(
                &path.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                Some("tk"),
            ),
            token_type: token_type.clone(),
            value,
            original: OriginalValue {
                token_type,
                value: original,
            },
            description: None,
            extensions: IndexMap::new(),
            exported: true,
        }
    }

    fn spec() -> FileSpec {
        FileSpec {
            destination: "allTokens.scss".to_string(),
            filter: crate::filters::TokenFilter::All,
            format: crate::config::FormatKind::ScssVariables,
        }
    }

    #[test]
    fn renders_variable_lines_with_header() {
        let cfg = config();
        let tokens = vec![token(
            &["space", "sm"],
            TokenType::Dimension,
            "0.25rem".into(),
            "4".into(),
        )];
        let header = FileHeader::new(vec!["tokensmith v0.1.0".into()]);
        let out = render(&spec(), &tokens, &cfg, &header);
        assert!(out.contains("// allTokens.scss"));
        assert!(out.contains("// tokensmith v0.1.0"));
        assert!(out.contains("$tk-space-sm: 0.25rem !default;"));
        assert!(out.contains("// scss-docs-start design-tokens"));
        assert!(out.contains("// scss-docs-end design-tokens"));
    }

    #[test]
    fn full_reference_renders_custom_property() {
        let cfg = config();
        let tokens = vec![token(
            &["color", "primary", "bg"],
            TokenType::Color,
            "rgba(51,102,153,1.00)".into(),
            "{color.palette.blue.500}".into(),
        )];
        let out = render(&spec(), &tokens, &cfg, &FileHeader::new(vec![]));
        assert!(
            out.contains("$tk-color-primary-bg: var(--#{$prefix}color-blue-500) !default;")
        );
    }

    #[test]
    fn size_with_math_renders_its_literal() {
        let cfg = config();
        let tokens = vec![token(
            &["space", "lg"],
            TokenType::Dimension,
            "0.5rem".into(),
            "{space.sm} * 2".into(),
        )];
        let out = render(&spec(), &tokens, &cfg, &FileHeader::new(vec![]));
        assert!(out.contains("$tk-space-lg: 0.5rem !default;"));
        assert!(!out.contains("var(--"));
    }

    #[test]
    fn base_colors_always_render_literals() {
        let cfg = config();
        let tokens = vec![token(
            &["color", "base", "white"],
            TokenType::Color,
            "rgba(255,255,255,1.00)".into(),
            "{color.palette.white}".into(),
        )];
        let out = render(&spec(), &tokens, &cfg, &FileHeader::new(vec![]));
        assert!(out.contains("$tk-color-base-white: rgba(255,255,255,1.00) !default;"));
    }

    #[test]
    fn typography_map_reconstructs_references() {
        let cfg = config();
        let original: TokenValue = serde_json::from_str(
            r#"{
                "fontFamily": "{font.family.base}",
                "fontWeight": "Bold",
                "fontSize": "{font.size.context.md}",
                "lineHeight": "1.5"
            }"#,
        )
        .unwrap();
        let mut t = token(
            &["type", "body"],
            TokenType::Typography,
            "(\"font-family\": Inter)".into(),
            original,
        );
        t.extensions.insert(
            tokensmith_model::VENDOR_EXTENSION.into(),
            serde_json::json!({ "originalFontWeight": "Bold Italic", "fontStyle": "italic" }),
        );

        let out = render(&spec(), &[t], &cfg, &FileHeader::new(vec![]));
        assert!(out.contains("\"font-family\": var(--#{$prefix}font-family-base)"));
        assert!(out.contains("\"font-size\": var(--#{$prefix}font-size-md)"));
        assert!(out.contains("\"font-weight\": Bold Italic"));
        assert!(out.contains("\"line-height\": 1.5"));
        assert!(out.contains("\"font-style\": italic"));
    }

    #[test]
    fn descriptions_become_line_comments() {
        let cfg = config();
        let mut t = token(
            &["opacity", "overlay"],
            TokenType::Opacity,
            "0.6".into(),
            "0.6".into(),
        );
        t.description = Some("Scrim behind dialogs".to_string());
        let out = render(&spec(), &[t], &cfg, &FileHeader::new(vec![]));
        assert!(out.contains("$tk-opacity-overlay: 0.6 !default; // Scrim behind dialogs"));
    }
}
