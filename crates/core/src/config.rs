//! Static platform configuration: which transforms run, which files are
//! written, and how token names are cased for each build target.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokensmith_model::CommentStyle;

use crate::filters::TokenFilter;
use crate::transforms::{Transform, TransformOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown platform `{0}` referenced by the build manifest")]
    UnknownPlatform(String),
    #[error("no theme permutation named `{0}`; check the brands/apps/themes in the build manifest against the theme manifest")]
    UnknownPermutation(String),
}

/// A build target with its own transform pipeline and output file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformId {
    #[serde(rename = "web")]
    Web,
    #[serde(rename = "web-px")]
    WebPx,
    #[serde(rename = "web-vw")]
    WebVw,
    #[serde(rename = "ios")]
    Ios,
    #[serde(rename = "android")]
    Android,
}

impl PlatformId {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw {
            "web" => Ok(Self::Web),
            "web-px" => Ok(Self::WebPx),
            "web-vw" => Ok(Self::WebVw),
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            other => Err(ConfigError::UnknownPlatform(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::WebPx => "web-px",
            Self::WebVw => "web-vw",
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    /// Directory family the platform builds into (the three `web` variants
    /// share one).
    pub fn family(&self) -> &'static str {
        match self {
            Self::Web | Self::WebPx | Self::WebVw => "web",
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Web | Self::WebPx | Self::WebVw => "scss",
            Self::Ios => "swift",
            Self::Android => "xml",
        }
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output casing for token names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameStyle {
    Kebab,
    Pascal,
    Snake,
}

impl NameStyle {
    /// Build the output name for a token path, including the platform prefix
    /// when one is set (`["color", "primaryBg"]` → `tk-color-primary-bg`).
    pub fn render(&self, path: &[String], prefix: Option<&str>) -> String {
        let mut words = Vec::new();
        if let Some(prefix) = prefix {
            words.extend(split_words(prefix));
        }
        for segment in path {
            words.extend(split_words(segment));
        }
        match self {
            Self::Kebab => words.join("-").to_lowercase(),
            Self::Snake => words.join("_").to_lowercase(),
            Self::Pascal => words
                .iter()
                .map(|w| {
                    let mut chars = w.chars();
                    match chars.next() {
                        Some(first) => {
                            first.to_uppercase().collect::<String>()
                                + &chars.as_str().to_lowercase()
                        }
                        None => String::new(),
                    }
                })
                .collect(),
        }
    }
}

/// Split a path segment into words at separators, camelCase humps, and
/// letter/digit boundaries (`"primaryBg500"` → `["primary", "Bg", "500"]`).
fn split_words(segment: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in segment.chars() {
        let boundary = match prev {
            None => false,
            Some(p) => {
                !c.is_alphanumeric()
                    || (c.is_uppercase() && p.is_lowercase())
                    || (c.is_ascii_digit() && p.is_alphabetic())
                    || (c.is_alphabetic() && p.is_ascii_digit())
            }
        };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        if c.is_alphanumeric() {
            current.push(c);
        }
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// The concrete syntax an output file is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatKind {
    ScssVariables,
    IosSwiftClass,
    AndroidResources,
}

/// One output file of a task: destination name, token filter, and format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSpec {
    pub destination: String,
    pub filter: TokenFilter,
    pub format: FormatKind,
}

/// Options shared by the transforms and renderers of one platform build.
#[derive(Debug, Clone)]
pub struct PlatformOptions {
    /// Variable prefix for web output (`$tk-…`, `var(--#{$prefix}…)`).
    pub prefix: String,
    pub base_px_font_size: f64,
    /// Render platform reference forms instead of resolved literals where
    /// the original value was a reference.
    pub output_references: bool,
    /// Import statements for class-based output.
    pub imports: Vec<String>,
    pub comment_style: CommentStyle,
}

impl PlatformOptions {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            base_px_font_size: self.base_px_font_size,
        }
    }
}

/// Immutable description of how one platform is built for one task.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub platform: PlatformId,
    pub name_style: NameStyle,
    pub transforms: Vec<Transform>,
    pub options: PlatformOptions,
    /// Decompose typography/shadow composites into scalar sub-tokens.
    /// Native platforms have no map literal to flatten them into.
    pub expand_composites: bool,
    pub build_path: PathBuf,
    pub files: Vec<FileSpec>,
}

impl PlatformConfig {
    pub fn new(
        platform: PlatformId,
        brand: &str,
        app: &str,
        theme: &str,
        full_output: bool,
        manifest: &BuildManifest,
    ) -> Self {
        let prefix = manifest.prefix.clone().unwrap_or_else(|| "tk".to_string());

        let web_transforms = |unit: Transform| {
            vec![
                Transform::ResolveMath,
                Transform::FontWeightNumeric,
                Transform::ColorCssRgba,
                Transform::TypographyScssMap,
                Transform::ShadowCssList,
                unit,
            ]
        };

        let (name_style, transforms, options) = match platform {
            PlatformId::Web => (
                NameStyle::Kebab,
                web_transforms(Transform::SizeRem),
                PlatformOptions {
                    prefix: prefix.clone(),
                    base_px_font_size: 16.0,
                    output_references: true,
                    imports: Vec::new(),
                    comment_style: CommentStyle::Short,
                },
            ),
            PlatformId::WebPx => (
                NameStyle::Kebab,
                web_transforms(Transform::SizePx),
                PlatformOptions {
                    prefix: prefix.clone(),
                    base_px_font_size: 16.0,
                    output_references: true,
                    imports: Vec::new(),
                    comment_style: CommentStyle::Short,
                },
            ),
            PlatformId::WebVw => (
                NameStyle::Kebab,
                web_transforms(Transform::SizeVw),
                PlatformOptions {
                    prefix: prefix.clone(),
                    base_px_font_size: 16.0,
                    output_references: true,
                    imports: Vec::new(),
                    comment_style: CommentStyle::Short,
                },
            ),
            PlatformId::Ios => (
                NameStyle::Pascal,
                vec![
                    Transform::ResolveMath,
                    Transform::ColorUiColor,
                    Transform::NumberCgFloat,
                    Transform::StringQuote,
                ],
                PlatformOptions {
                    prefix: prefix.clone(),
                    base_px_font_size: 16.0,
                    output_references: false,
                    imports: vec!["UIKit".to_string()],
                    comment_style: CommentStyle::Short,
                },
            ),
            PlatformId::Android => (
                NameStyle::Snake,
                vec![
                    Transform::ResolveMath,
                    Transform::ColorHex8Argb,
                    Transform::SizeDip,
                    Transform::StringBare,
                ],
                PlatformOptions {
                    prefix: prefix.clone(),
                    base_px_font_size: 16.0,
                    output_references: true,
                    imports: Vec::new(),
                    comment_style: CommentStyle::Xml,
                },
            ),
        };

        let build_path = manifest
            .build_dir
            .join(platform.family())
            .join(format!("{brand}-{app}"));

        Self {
            platform,
            name_style,
            transforms,
            options,
            expand_composites: matches!(platform, PlatformId::Ios | PlatformId::Android),
            build_path,
            files: file_list(platform, theme, full_output),
        }
    }
}

/// The five output files of a full build; reduced builds keep only the
/// per-theme color file.
fn file_list(platform: PlatformId, theme: &str, full_output: bool) -> Vec<FileSpec> {
    let ext = platform.file_extension();
    let format = match platform {
        PlatformId::Web | PlatformId::WebPx | PlatformId::WebVw => FormatKind::ScssVariables,
        PlatformId::Ios => FormatKind::IosSwiftClass,
        PlatformId::Android => FormatKind::AndroidResources,
    };

    let files = vec![
        FileSpec {
            destination: format!("allTokens.{ext}"),
            filter: TokenFilter::All,
            format,
        },
        FileSpec {
            destination: format!("colorTokens.{ext}"),
            filter: TokenFilter::Theme,
            format,
        },
        FileSpec {
            destination: format!("theme-{theme}Tokens.{ext}"),
            filter: TokenFilter::Theme,
            format,
        },
        FileSpec {
            destination: format!("numberTokens.{ext}"),
            filter: TokenFilter::Number,
            format,
        },
        FileSpec {
            destination: format!("stringTokens.{ext}"),
            filter: TokenFilter::String,
            format,
        },
    ];

    if full_output {
        files
    } else {
        let theme_file = format!("theme-{theme}Tokens.{ext}");
        files
            .into_iter()
            .filter(|f| f.destination == theme_file)
            .collect()
    }
}

/// The build manifest: every axis of the task matrix plus global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildManifest {
    pub brands: Vec<String>,
    /// Application name → platforms it builds for.
    pub apps: IndexMap<String, Vec<String>>,
    pub themes: Vec<String>,
    pub default_theme: String,
    pub tokens_dir: PathBuf,
    pub build_dir: PathBuf,
    /// Variable prefix for web output; defaults to `tk`.
    #[serde(default)]
    pub prefix: Option<String>,
    /// When true (the default), non-default themes emit only their theme
    /// color file. Set false to build the full file set for every theme.
    #[serde(default = "default_theme_files_only")]
    pub theme_files_only: bool,
    /// Separator joining permutation name parts; defaults to `_`.
    #[serde(default)]
    pub separator: Option<String>,
    /// Stamp a generation timestamp into file headers.
    #[serde(default)]
    pub timestamp: bool,
}

fn default_theme_files_only() -> bool {
    true
}

impl BuildManifest {
    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or("_")
    }
}
