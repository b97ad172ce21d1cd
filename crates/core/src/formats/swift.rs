//! Swift class renderer: static members on a class named after the file,
//! values pre-encoded by the iOS transform pipeline.

use tokensmith_model::{CommentStyle, FileHeader, Token};

use crate::config::{FileSpec, NameStyle, PlatformConfig};

pub fn render(
    spec: &FileSpec,
    tokens: &[Token],
    config: &PlatformConfig,
    header: &FileHeader,
) -> String {
    let stem = spec
        .destination
        .split('.')
        .next()
        .unwrap_or(&spec.destination);
    let class_name = NameStyle::Pascal.render(&[stem.to_string()], None);

    let mut out = String::with_capacity(tokens.len() * 64 + 256);
    out.push_str(&format!("//\n// {}\n//\n", spec.destination));
    out.push_str(&header.render(CommentStyle::Short));
    out.push('\n');
    for import in &config.options.imports {
        out.push_str(&format!("import {import}\n"));
    }
    out.push('\n');
    out.push_str(&format!("public class {class_name} {{\n"));
    for token in tokens {
        out.push_str(&format!(
            "    @objc public static let {} = {}\n",
            token.name, token.value
        ));
    }
    out.push_str("}\n");
    out
}
