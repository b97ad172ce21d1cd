//! Type-scoped value transforms: the conversions that turn a resolved token
//! value into a platform literal.
//!
//! The set is closed — a tagged enum rather than a name-keyed registry — and
//! each platform configuration owns an ordered pipeline of these. A transform
//! marked transitive also applies to values that arrived through reference
//! resolution.

use thiserror::Error;

use tokensmith_model::value::{format_number, parse_leading_number};
use tokensmith_model::{reference, Token, TokenType, TokenValue};

use crate::color::Rgba;
use crate::fontweight;
use crate::math;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid number: `{name}: {raw}` is not a valid number, cannot transform to `{unit}`")]
    InvalidNumber {
        name: String,
        raw: String,
        unit: &'static str,
    },
    #[error("math in `{name}: {raw}` did not evaluate to a number: {source}")]
    Math {
        name: String,
        raw: String,
        source: math::MathError,
    },
}

/// Options a transform may need from the platform configuration.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Divisor for relative units (`rem`, `vw`).
    pub base_px_font_size: f64,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            base_px_font_size: 16.0,
        }
    }
}

/// One value transform. See each variant's `apply` arm for its exact output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Evaluate arithmetic in size/number values (`"8 * 2"` → `"16"`).
    ResolveMath,
    /// Pixel sizes to `rem`, divided by the base font size.
    SizeRem,
    /// Pixel sizes to `vw`, divided by the base font size.
    SizeVw,
    /// Pixel sizes tagged `px`.
    SizePx,
    /// Pixel sizes to Android `dp`, or `sp` for font-derived sizes.
    SizeDip,
    /// Numbers and sizes as `CGFloat(…)` literals.
    NumberCgFloat,
    /// Colors as `rgba(r,g,b,a)`.
    ColorCssRgba,
    /// Colors as `UIColor(red: …, …)` constructor calls.
    ColorUiColor,
    /// Colors as `#aarrggbb` hex.
    ColorHex8Argb,
    /// Named font weights to their numeric value.
    FontWeightNumeric,
    /// Typography composites flattened to an SCSS map literal.
    TypographyScssMap,
    /// Shadow composites flattened to a CSS box-shadow list.
    ShadowCssList,
    /// Strings double-quoted; font family lists truncated to the first entry.
    StringQuote,
    /// Strings left bare; font family lists truncated to the first entry.
    StringBare,
}

impl Transform {
    /// Whether this transform is interested in the token at all.
    pub fn applies_to(&self, token: &Token) -> bool {
        let t = &token.token_type;
        match self {
            Self::ResolveMath => t.is_size() || t.is_number(),
            Self::SizeRem | Self::SizeVw | Self::SizePx | Self::SizeDip => t.is_size(),
            Self::NumberCgFloat => t.is_number() || t.is_size(),
            Self::ColorCssRgba | Self::ColorUiColor | Self::ColorHex8Argb => t.is_color(),
            Self::FontWeightNumeric => {
                matches!(t, TokenType::FontWeight | TokenType::Typography)
            }
            Self::TypographyScssMap => t.is_font(),
            Self::ShadowCssList => t.is_shadow(),
            Self::StringQuote | Self::StringBare => t.is_string(),
        }
    }

    /// Whether the transform also applies through resolved references.
    /// Non-transitive transforms skip tokens whose original value was a
    /// reference expression.
    pub fn is_transitive(&self) -> bool {
        true
    }

    pub fn apply(
        &self,
        token: &mut Token,
        options: &TransformOptions,
    ) -> Result<(), TransformError> {
        match self {
            Self::ResolveMath => resolve_math(token),
            Self::SizeRem => relative_size(token, "rem", options.base_px_font_size),
            Self::SizeVw => relative_size(token, "vw", options.base_px_font_size),
            Self::SizePx => pixel_size(token),
            Self::SizeDip => density_size(token),
            Self::NumberCgFloat => cg_float(token),
            Self::ColorCssRgba => encode_color(token, |c| c.css_rgba()),
            Self::ColorUiColor => encode_color(token, |c| c.ui_color()),
            Self::ColorHex8Argb => encode_color(token, |c| c.hex8_argb()),
            Self::FontWeightNumeric => numeric_font_weight(token),
            Self::TypographyScssMap => typography_scss_map(token),
            Self::ShadowCssList => shadow_css_list(token),
            Self::StringQuote => string_literal(token, true),
            Self::StringBare => string_literal(token, false),
        }
    }
}

/// Apply a pipeline in order, honoring each transform's scope and
/// transitivity. The token's `original` snapshot is never touched.
pub fn apply_pipeline(
    token: &mut Token,
    transforms: &[Transform],
    options: &TransformOptions,
) -> Result<(), TransformError> {
    let original_is_reference = match &token.original.value {
        TokenValue::String(s) => reference::uses_references(s),
        _ => false,
    };
    for transform in transforms {
        if !transform.applies_to(token) {
            continue;
        }
        if !transform.is_transitive() && original_is_reference {
            continue;
        }
        transform.apply(token, options)?;
    }
    Ok(())
}

fn resolve_math(token: &mut Token) -> Result<(), TransformError> {
    let Some(raw) = token.value.as_str().map(str::to_string) else {
        return Ok(());
    };
    if !math::has_math(&raw) {
        return Ok(());
    }
    match math::evaluate_preserving_unit(&raw) {
        Ok(out) => {
            token.value = TokenValue::String(out);
            Ok(())
        }
        Err(source) => Err(TransformError::Math {
            name: token.name.clone(),
            raw,
            source,
        }),
    }
}

/// The whitespace-separated elements of a scalar size value, so shorthand
/// values like `"4 8"` convert element-wise.
fn size_elements(token: &Token) -> Option<Vec<String>> {
    match &token.value {
        TokenValue::Number(n) => Some(vec![format_number(*n)]),
        TokenValue::String(s) => {
            Some(s.split_whitespace().map(str::to_string).collect())
        }
        _ => None,
    }
}

fn relative_size(token: &mut Token, unit: &'static str, base: f64) -> Result<(), TransformError> {
    let Some(elements) = size_elements(token) else {
        return Ok(());
    };
    let converted: Result<Vec<String>, TransformError> = elements
        .iter()
        .map(|element| {
            if element.ends_with(unit) {
                return Ok(element.clone());
            }
            let Some(px) = parse_leading_number(element) else {
                return Err(TransformError::InvalidNumber {
                    name: token.name.clone(),
                    raw: element.clone(),
                    unit,
                });
            };
            Ok(format!("{}{unit}", format_number(px / base)))
        })
        .collect();
    token.value = TokenValue::String(converted?.join(" "));
    Ok(())
}

fn pixel_size(token: &mut Token) -> Result<(), TransformError> {
    let Some(elements) = size_elements(token) else {
        return Ok(());
    };
    let converted: Result<Vec<String>, TransformError> = elements
        .iter()
        .map(|element| {
            if element.ends_with("px") {
                return Ok(element.clone());
            }
            let Some(px) = parse_leading_number(element) else {
                return Err(TransformError::InvalidNumber {
                    name: token.name.clone(),
                    raw: element.clone(),
                    unit: "px",
                });
            };
            Ok(format!("{}px", format_number(px)))
        })
        .collect();
    token.value = TokenValue::String(converted?.join(" "));
    Ok(())
}

/// Android density units: `dp` in general, `sp` for sizes whose original
/// semantic category is font-related — chosen by declared type, not value.
fn density_size(token: &mut Token) -> Result<(), TransformError> {
    let Some(raw) = (match &token.value {
        TokenValue::Number(n) => Some(format_number(*n)),
        TokenValue::String(s) => Some(s.clone()),
        _ => None,
    }) else {
        return Ok(());
    };

    let unit = if font_scaled(token) { "sp" } else { "dp" };
    let Some(px) = parse_leading_number(&raw) else {
        return Err(TransformError::InvalidNumber {
            name: token.name.clone(),
            raw,
            unit,
        });
    };
    token.value = TokenValue::String(format!("{}{unit}", format_number(px)));
    Ok(())
}

/// Whether a size token's original semantic category is font-related,
/// looking through both alias alignment and composite expansion. Covers the
/// legacy plural spellings, which never reach the canonical enum.
fn font_scaled(token: &Token) -> bool {
    if token.token_type.is_font_size() {
        return true;
    }
    let declared = token
        .vendor_extension("originalType")
        .unwrap_or_else(|| token.original.token_type.as_str());
    matches!(
        declared,
        "fontSize" | "fontSizes" | "lineHeight" | "lineHeights" | "paragraphSpacing"
    )
}

fn cg_float(token: &mut Token) -> Result<(), TransformError> {
    let parsed = token.value.leading_number();
    let Some(n) = parsed else {
        return Err(TransformError::InvalidNumber {
            name: token.name.clone(),
            raw: token.value.to_string(),
            unit: "CGFloat",
        });
    };
    token.value = TokenValue::String(format!("CGFloat({})", format_number(n)));
    Ok(())
}

/// Colors degrade gracefully: an unparsable string logs a warning and passes
/// through unchanged instead of failing the file.
fn encode_color(
    token: &mut Token,
    encode: impl Fn(&Rgba) -> String,
) -> Result<(), TransformError> {
    let Some(raw) = token.value.as_str().map(str::to_string) else {
        return Ok(());
    };
    match Rgba::parse(&raw) {
        Ok(color) => {
            token.value = TokenValue::String(encode(&color));
        }
        Err(_) => {
            tracing::warn!(
                "invalid color token `{}` ({raw}), passing raw value through",
                token.path.join(".")
            );
        }
    }
    Ok(())
}

fn numeric_font_weight(token: &mut Token) -> Result<(), TransformError> {
    if let Some(numeric) = token.value.as_str().map(fontweight::numeric_weight) {
        token.value = TokenValue::Number(numeric);
        return Ok(());
    }
    if let TokenValue::Object(obj) = &mut token.value {
        let weight = obj
            .get("fontWeight")
            .and_then(TokenValue::as_str)
            .map(fontweight::numeric_weight);
        if let Some(numeric) = weight {
            obj.insert("fontWeight".to_string(), TokenValue::Number(numeric));
        }
    }
    Ok(())
}

/// CSS property name for a typography sub-value key.
pub(crate) fn css_property(key: &str) -> String {
    match key {
        "fontFamily" => "font-family".to_string(),
        "fontWeight" => "font-weight".to_string(),
        "fontSize" => "font-size".to_string(),
        "fontStyle" => "font-style".to_string(),
        "letterSpacing" => "letter-spacing".to_string(),
        "lineHeight" => "line-height".to_string(),
        "paragraphSpacing" => "paragraph-spacing".to_string(),
        "textCase" => "text-transform".to_string(),
        "textDecoration" => "text-decoration".to_string(),
        other => kebab_key(other),
    }
}

fn kebab_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn typography_scss_map(token: &mut Token) -> Result<(), TransformError> {
    if !matches!(token.token_type, TokenType::Typography) {
        return Ok(());
    }
    let Some(obj) = token.value.as_object() else {
        return Ok(());
    };
    let entries: Vec<String> = obj
        .iter()
        .map(|(key, value)| format!("\"{}\": {value}", css_property(key)))
        .collect();
    token.value = TokenValue::String(format!("({})", entries.join(", ")));
    Ok(())
}

fn shadow_css_list(token: &mut Token) -> Result<(), TransformError> {
    let layers: Vec<&indexmap::IndexMap<String, TokenValue>> = match &token.value {
        TokenValue::Object(obj) => vec![obj],
        TokenValue::List(items) => items.iter().filter_map(TokenValue::as_object).collect(),
        _ => return Ok(()),
    };
    if layers.is_empty() {
        return Ok(());
    }

    let rendered: Vec<String> = layers
        .iter()
        .map(|layer| {
            let mut parts: Vec<String> = ["offsetX", "offsetY", "blur", "spread", "color"]
                .iter()
                .filter_map(|key| layer.get(*key).map(ToString::to_string))
                .collect();
            if layer.get("type").and_then(TokenValue::as_str) == Some("innerShadow") {
                parts.push("inset".to_string());
            }
            parts.join(" ")
        })
        .collect();
    token.value = TokenValue::String(rendered.join(", "));
    Ok(())
}

fn string_literal(token: &mut Token, quote: bool) -> Result<(), TransformError> {
    let Some(raw) = token.value.as_str().map(str::to_string) else {
        return Ok(());
    };
    let mut text = raw.clone();
    // Font family lists keep only their first entry on native platforms.
    if matches!(token.token_type, TokenType::FontFamily)
        && let Some(first) = raw.split(',').next()
    {
        text = first.trim().trim_matches(['\'', '"']).to_string();
    }
    token.value = if quote {
        TokenValue::String(format!("\"{text}\""))
    } else {
        TokenValue::String(text)
    };
    Ok(())
}
