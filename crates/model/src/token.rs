use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::TokenValue;
use crate::VENDOR_EXTENSION;

/// Canonical semantic type of a token.
///
/// Token files may declare legacy aliases (`spacing`, `boxShadow`, …); the
/// preprocessor rewrites those to the canonical variants below. Unrecognized
/// type names round-trip through [`TokenType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    FontSize,
    FontStyle,
    LineHeight,
    LetterSpacing,
    ParagraphSpacing,
    TextCase,
    TextDecoration,
    Typography,
    Shadow,
    Gradient,
    Number,
    Opacity,
    Duration,
    Content,
    String,
    Text,
    Asset,
    Border,
    Other(String),
}

impl TokenType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "color" => Self::Color,
            "dimension" => Self::Dimension,
            "fontFamily" => Self::FontFamily,
            "fontWeight" => Self::FontWeight,
            "fontSize" => Self::FontSize,
            "fontStyle" => Self::FontStyle,
            "lineHeight" => Self::LineHeight,
            "letterSpacing" => Self::LetterSpacing,
            "paragraphSpacing" => Self::ParagraphSpacing,
            "textCase" => Self::TextCase,
            "textDecoration" => Self::TextDecoration,
            "typography" => Self::Typography,
            "shadow" => Self::Shadow,
            "gradient" => Self::Gradient,
            "number" => Self::Number,
            "opacity" => Self::Opacity,
            "duration" => Self::Duration,
            "content" => Self::Content,
            "string" => Self::String,
            "text" => Self::Text,
            "asset" => Self::Asset,
            "border" => Self::Border,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::FontFamily => "fontFamily",
            Self::FontWeight => "fontWeight",
            Self::FontSize => "fontSize",
            Self::FontStyle => "fontStyle",
            Self::LineHeight => "lineHeight",
            Self::LetterSpacing => "letterSpacing",
            Self::ParagraphSpacing => "paragraphSpacing",
            Self::TextCase => "textCase",
            Self::TextDecoration => "textDecoration",
            Self::Typography => "typography",
            Self::Shadow => "shadow",
            Self::Gradient => "gradient",
            Self::Number => "number",
            Self::Opacity => "opacity",
            Self::Duration => "duration",
            Self::Content => "content",
            Self::String => "string",
            Self::Text => "text",
            Self::Asset => "asset",
            Self::Border => "border",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color)
    }

    /// Font category: everything that participates in typography output.
    pub fn is_font(&self) -> bool {
        matches!(
            self,
            Self::FontFamily
                | Self::FontSize
                | Self::FontStyle
                | Self::FontWeight
                | Self::LetterSpacing
                | Self::LineHeight
                | Self::ParagraphSpacing
                | Self::TextCase
                | Self::TextDecoration
                | Self::Typography
        )
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Self::Gradient)
    }

    /// Unitless numeric category.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Self::Duration | Self::LetterSpacing | Self::Number | Self::Opacity
        )
    }

    pub fn is_shadow(&self) -> bool {
        matches!(self, Self::Shadow)
    }

    /// Size category: values measured in pixels, subject to unit conversion.
    pub fn is_size(&self) -> bool {
        matches!(
            self,
            Self::Dimension | Self::FontSize | Self::LineHeight | Self::ParagraphSpacing
        )
    }

    /// Font-relative sizes use scale-independent units on platforms that
    /// distinguish them (`sp` vs `dp`).
    pub fn is_font_size(&self) -> bool {
        matches!(self, Self::FontSize | Self::LineHeight | Self::ParagraphSpacing)
    }

    pub fn is_string(&self) -> bool {
        matches!(
            self,
            Self::Content
                | Self::FontFamily
                | Self::FontStyle
                | Self::FontWeight
                | Self::String
                | Self::Text
                | Self::TextCase
                | Self::TextDecoration
        )
    }
}

impl From<String> for TokenType {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<TokenType> for String {
    fn from(t: TokenType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of a token's type and value as first loaded, taken
/// before preprocessing or reference resolution touches the tree.
///
/// Renderers use this to recover un-resolved reference expressions after the
/// current value has been resolved and transformed away from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalValue {
    pub token_type: TokenType,
    pub value: TokenValue,
}

/// A flattened token: one leaf of the token tree, bound to its path and
/// paired with its original snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Path segments locating the token in the tree; unique and stable.
    pub path: Vec<String>,
    /// Platform-cased output name, derived from `path` by the task's name style.
    pub name: String,
    pub token_type: TokenType,
    pub value: TokenValue,
    pub original: OriginalValue,
    pub description: Option<String>,
    /// Free-form metadata; tokensmith's own entries live under the
    /// [`VENDOR_EXTENSION`](crate::VENDOR_EXTENSION) key.
    pub extensions: IndexMap<String, serde_json::Value>,
    /// False for tokens contributed by "source"-state token sets: they stay
    /// referenceable but are excluded from output files.
    pub exported: bool,
}

impl Token {
    /// Top-level group (`path[0]`).
    pub fn group(&self) -> Option<&str> {
        self.path.first().map(AsRef::as_ref)
    }

    /// Second-level group (`path[1]`), the axis internal-only exclusions key on.
    pub fn subgroup(&self) -> Option<&str> {
        self.path.get(1).map(AsRef::as_ref)
    }

    /// Look up a string entry under the tokensmith vendor extension.
    pub fn vendor_extension(&self, key: &str) -> Option<&str> {
        self.extensions
            .get(VENDOR_EXTENSION)
            .and_then(|v| v.get(key))
            .and_then(serde_json::Value::as_str)
    }

    /// The type the token was declared with before alias alignment, falling
    /// back to the snapshot type when no alignment happened.
    pub fn declared_type(&self) -> TokenType {
        match self.vendor_extension("originalType") {
            Some(raw) => TokenType::parse(raw),
            None => self.original.token_type.clone(),
        }
    }
}
