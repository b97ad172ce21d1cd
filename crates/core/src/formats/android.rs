//! Android resource XML renderer: one element per token, tag chosen by the
//! token's category, with `@kind/name` references where enabled.

use tokensmith_model::{CommentStyle, FileHeader, Token, TokenType};

use crate::config::{FileSpec, NameStyle, PlatformConfig};
use crate::formats::reference_target;

pub fn render(
    _spec: &FileSpec,
    tokens: &[Token],
    config: &PlatformConfig,
    header: &FileHeader,
) -> String {
    let mut out = String::with_capacity(tokens.len() * 64 + 256);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\n");
    out.push_str(&header.render(CommentStyle::Xml));
    out.push_str("\n\n<resources>\n");

    for token in tokens {
        let kind = resource_kind(&token.token_type);
        let value = match reference_target(token, &config.options) {
            Some(segments) => format!("@{kind}/{}", NameStyle::Snake.render(&segments, None)),
            None => escape_xml(&token.value.to_string()),
        };
        out.push_str(&format!(
            "  <{kind} name=\"{}\">{value}</{kind}>",
            token.name
        ));
        if let Some(desc) = &token.description {
            out.push_str(&format!(" <!-- {desc} -->"));
        }
        out.push('\n');
    }

    out.push_str("</resources>\n");
    out
}

/// Android resource kind for a token category. Checked in category order so
/// types in several categories land on their most specific kind.
fn resource_kind(token_type: &TokenType) -> &'static str {
    if token_type.is_color() {
        "color"
    } else if token_type.is_number() {
        "integer"
    } else if token_type.is_size() {
        "dimen"
    } else if token_type.is_string() {
        "string"
    } else {
        "string"
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
