//! Color parsing and the platform-native encodings.
//!
//! Accepts the dialects that actually occur in token files: `#rgb`, `#rgba`,
//! `#rrggbb`, `#rrggbbaa`, `rgb(…)`, `rgba(…)`, and the CSS basic names.

use thiserror::Error;

use tokensmith_model::value::format_number;

#[derive(Debug, Error, PartialEq)]
#[error("`{0}` is not a recognizable color")]
pub struct ColorParseError(pub String);

/// A parsed color: 8-bit channels plus a unit-interval alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError(input.to_string()));
        }
        if s.starts_with("rgb") {
            return parse_rgb_fn(s).ok_or_else(|| ColorParseError(input.to_string()));
        }
        parse_named(s).ok_or_else(|| ColorParseError(input.to_string()))
    }

    /// CSS functional literal: `rgba(51,102,153,1.00)`.
    pub fn css_rgba(&self) -> String {
        format!("rgba({},{},{},{:.2})", self.r, self.g, self.b, self.a)
    }

    /// 8-digit hex with the alpha channel moved to the front: `#aarrggbb`.
    pub fn hex8_argb(&self) -> String {
        let alpha = (self.a * 255.0).round() as u8;
        format!("#{alpha:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// UIKit constructor literal with normalized three-decimal channels:
    /// `UIColor(red: 0.200, green: 0.400, blue: 0.600, alpha: 1)`.
    pub fn ui_color(&self) -> String {
        format!(
            "UIColor(red: {:.3}, green: {:.3}, blue: {:.3}, alpha: {})",
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
            format_number(self.a),
        )
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let expand = |c: u8| c * 16 + c;
    let nibble = |c: char| c.to_digit(16).map(|d| d as u8);
    let digits: Vec<u8> = hex.chars().map(nibble).collect::<Option<_>>()?;

    match digits.as_slice() {
        [r, g, b] => Some(Rgba {
            r: expand(*r),
            g: expand(*g),
            b: expand(*b),
            a: 1.0,
        }),
        [r, g, b, a] => Some(Rgba {
            r: expand(*r),
            g: expand(*g),
            b: expand(*b),
            a: f64::from(expand(*a)) / 255.0,
        }),
        [r1, r0, g1, g0, b1, b0] => Some(Rgba {
            r: r1 * 16 + r0,
            g: g1 * 16 + g0,
            b: b1 * 16 + b0,
            a: 1.0,
        }),
        [r1, r0, g1, g0, b1, b0, a1, a0] => Some(Rgba {
            r: r1 * 16 + r0,
            g: g1 * 16 + g0,
            b: b1 * 16 + b0,
            a: f64::from(a1 * 16 + a0) / 255.0,
        }),
        _ => None,
    }
}

fn parse_rgb_fn(s: &str) -> Option<Rgba> {
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    let args: Vec<&str> = s[open + 1..close].split(',').map(str::trim).collect();
    if args.len() != 3 && args.len() != 4 {
        return None;
    }

    let channel = |arg: &str| -> Option<u8> {
        if let Some(pct) = arg.strip_suffix('%') {
            let v: f64 = pct.trim().parse().ok()?;
            return Some((v / 100.0 * 255.0).round().clamp(0.0, 255.0) as u8);
        }
        let v: f64 = arg.parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };

    let r = channel(args[0])?;
    let g = channel(args[1])?;
    let b = channel(args[2])?;
    let a = match args.get(3) {
        Some(arg) => arg.parse::<f64>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(Rgba { r, g, b, a })
}

fn parse_named(s: &str) -> Option<Rgba> {
    let rgb = |r, g, b| Some(Rgba { r, g, b, a: 1.0 });
    match s.to_ascii_lowercase().as_str() {
        "black" => rgb(0, 0, 0),
        "white" => rgb(255, 255, 255),
        "red" => rgb(255, 0, 0),
        "green" => rgb(0, 128, 0),
        "blue" => rgb(0, 0, 255),
        "yellow" => rgb(255, 255, 0),
        "cyan" | "aqua" => rgb(0, 255, 255),
        "magenta" | "fuchsia" => rgb(255, 0, 255),
        "gray" | "grey" => rgb(128, 128, 128),
        "silver" => rgb(192, 192, 192),
        "maroon" => rgb(128, 0, 0),
        "olive" => rgb(128, 128, 0),
        "lime" => rgb(0, 255, 0),
        "teal" => rgb(0, 128, 128),
        "navy" => rgb(0, 0, 128),
        "purple" => rgb(128, 0, 128),
        "orange" => rgb(255, 165, 0),
        "transparent" => Some(Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 0.0,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(
            Rgba::parse("#336699").unwrap(),
            Rgba {
                r: 0x33,
                g: 0x66,
                b: 0x99,
                a: 1.0
            }
        );
        assert_eq!(Rgba::parse("#369").unwrap(), Rgba::parse("#336699").unwrap());
        let with_alpha = Rgba::parse("#33669980").unwrap();
        assert!((with_alpha.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn parses_functional_and_named_forms() {
        assert_eq!(
            Rgba::parse("rgba(51, 102, 153, 0.5)").unwrap(),
            Rgba {
                r: 51,
                g: 102,
                b: 153,
                a: 0.5
            }
        );
        assert_eq!(Rgba::parse("rgb(0, 0, 0)").unwrap().a, 1.0);
        assert_eq!(Rgba::parse("white").unwrap().r, 255);
        assert_eq!(Rgba::parse("transparent").unwrap().a, 0.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Rgba::parse("not-a-color").is_err());
        assert!(Rgba::parse("#12345").is_err());
        assert!(Rgba::parse("rgb(1,2)").is_err());
    }

    #[test]
    fn encodings() {
        let c = Rgba::parse("#336699").unwrap();
        assert_eq!(c.css_rgba(), "rgba(51,102,153,1.00)");
        assert_eq!(c.hex8_argb(), "#ff336699");
        assert_eq!(
            c.ui_color(),
            "UIColor(red: 0.200, green: 0.400, blue: 0.600, alpha: 1)"
        );

        let translucent = Rgba::parse("#33669980").unwrap();
        assert_eq!(translucent.hex8_argb(), "#80336699");
    }
}
