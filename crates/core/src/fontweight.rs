//! Font weight naming: numeric mapping and weight/style splitting.

/// Style keywords recognized at the end of a combined weight string.
pub const FONT_STYLES: [&str; 3] = ["italic", "oblique", "normal"];

/// Numeric weight for a named weight. Covers the common English names plus
/// the foundry-specific German ones that show up in licensed font families.
/// Unrecognized names fall back to 400.
pub fn numeric_weight(value: &str) -> f64 {
    let cleaned: String = value
        .to_lowercase()
        .replace("normal", "")
        .replace("italic", "")
        .replace("oblique", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if let Ok(n) = cleaned.parse::<f64>() {
        return n;
    }

    match cleaned.as_str() {
        "hairline" | "thin" => 100.0,
        "extralight" | "ultralight" | "extraleicht" => 200.0,
        "light" | "leicht" => 300.0,
        "" | "regular" | "buch" | "book" => 400.0,
        "medium" | "kraeftig" | "kräftig" => 500.0,
        "semibold" | "demibold" | "halbfett" => 600.0,
        "bold" | "dreiviertelfett" => 700.0,
        "extrabold" | "ultrabold" | "fett" => 800.0,
        "black" | "heavy" | "super" | "extrafett" => 900.0,
        "ultra" | "ultrablack" | "extrablack" => 950.0,
        _ => 400.0,
    }
}

/// The style component of a weight string: `italic`, `oblique`, or `normal`.
pub fn font_style_of(value: &str) -> &'static str {
    let lower = value.to_ascii_lowercase();
    if lower.contains("italic") {
        "italic"
    } else if lower.contains("oblique") {
        "oblique"
    } else {
        "normal"
    }
}

/// Split a combined weight string into its weight and style parts.
///
/// `"Bold Italic"` → `("Bold", "italic")`; a string that *is* a style keyword
/// (`"Italic"`) becomes `("Regular", "italic")`; anything else keeps its
/// weight with style `normal`. Splitting is a fixed point: feeding a split
/// weight back in returns it unchanged.
pub fn split_weight_style(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();

    for style in FONT_STYLES {
        if lower == style {
            return ("Regular".to_string(), style.to_string());
        }
    }

    for style in FONT_STYLES {
        if lower.ends_with(style) {
            let weight = trimmed[..trimmed.len() - style.len()].trim_end();
            if !weight.is_empty() {
                return (weight.to_string(), style.to_string());
            }
        }
    }

    (trimmed.to_string(), "normal".to_string())
}
