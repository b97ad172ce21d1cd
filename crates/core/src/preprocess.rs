//! Graph normalization before any platform-specific work: type alignment,
//! composite property renames, and font weight/style extraction.
//!
//! Preprocessing is idempotent: running it over an already-normalized tree
//! changes nothing. Metadata entries are written once and never overwritten,
//! and the weight/style split is a fixed point.

use indexmap::IndexMap;
use serde_json::json;
use tokensmith_model::value::format_number;
use tokensmith_model::{
    reference, RawToken, TokenNode, TokenTree, TokenValue, VENDOR_EXTENSION,
};

use crate::fontweight::split_weight_style;
use crate::resolve;

/// Normalize a freshly merged token tree in place.
pub fn preprocess(tree: &mut TokenTree) {
    tree.delegate_types();
    align_types(tree);
    add_font_weight_metadata(tree);
    let ref_copy = tree.clone();
    extract_font_styles(tree, &ref_copy);
}

/// Canonical name for a legacy/alternate type declaration, if it has one.
fn aligned_type(raw: &str) -> Option<&'static str> {
    Some(match raw {
        "fontFamilies" => "fontFamily",
        "fontWeights" => "fontWeight",
        "fontSizes" => "fontSize",
        "lineHeights" => "lineHeight",
        "boxShadow" => "shadow",
        "spacing" | "sizing" | "borderRadius" | "borderWidth" | "paragraphSpacing"
        | "paragraphIndent" => "dimension",
        "letterSpacing" => "number",
        "text" => "content",
        _ => return None,
    })
}

fn align_types(tree: &mut TokenTree) {
    for node in tree.nodes.values_mut() {
        match node {
            TokenNode::Token(token) => align_token(token),
            TokenNode::Group(sub) => align_types(sub),
        }
    }
}

fn align_token(token: &mut RawToken) {
    if let Some(declared) = token.token_type.clone()
        && let Some(canonical) = aligned_type(&declared)
    {
        token.token_type = Some(canonical.to_string());
        set_vendor_entry(&mut token.extensions, "originalType", json!(declared));
    }

    if token.token_type.as_deref() == Some("shadow") {
        match &mut token.value {
            TokenValue::Object(obj) => rename_shadow_props(obj),
            TokenValue::List(items) => {
                for item in items {
                    if let TokenValue::Object(obj) = item {
                        rename_shadow_props(obj);
                    }
                }
            }
            _ => {}
        }
    }
}

fn rename_shadow_props(obj: &mut IndexMap<String, TokenValue>) {
    for (from, to) in [("x", "offsetX"), ("y", "offsetY")] {
        if let Some(value) = obj.shift_remove(from) {
            obj.insert(to.to_string(), value);
        }
    }
}

/// Record the pre-split fontWeight of every typography composite so
/// renderers can recover the literal combined expression.
fn add_font_weight_metadata(tree: &mut TokenTree) {
    for node in tree.nodes.values_mut() {
        match node {
            TokenNode::Group(sub) => add_font_weight_metadata(sub),
            TokenNode::Token(token) => {
                if token.token_type.as_deref() == Some("typography")
                    && let TokenValue::Object(obj) = &token.value
                    && let Some(weight) = obj.get("fontWeight")
                {
                    let raw = weight.to_string();
                    set_vendor_entry(&mut token.extensions, "originalFontWeight", json!(raw));
                }
            }
        }
    }
}

fn extract_font_styles(tree: &mut TokenTree, refs: &TokenTree) {
    for node in tree.nodes.values_mut() {
        if let TokenNode::Group(sub) = node {
            extract_font_styles(sub, refs);
            continue;
        }
        let TokenNode::Token(token) = node else {
            continue;
        };
        match token.token_type.as_deref() {
            Some("typography") => split_typography_weight(token, refs),
            Some("fontWeight") => {
                if let Some(group) = split_standalone_weight(token, refs) {
                    *node = TokenNode::Group(group);
                }
            }
            _ => {}
        }
    }
}

fn split_typography_weight(token: &mut RawToken, refs: &TokenTree) {
    let TokenValue::Object(obj) = &mut token.value else {
        return;
    };
    // Already carries a style: the split has run before.
    if obj.contains_key("fontStyle") {
        return;
    }
    let Some(weight_value) = obj.get("fontWeight") else {
        return;
    };

    let resolved = resolve_weight(&weight_value.to_string(), refs);
    let (weight, style) = split_weight_style(&resolved);
    obj.insert("fontWeight".to_string(), TokenValue::String(weight));
    obj.insert("fontStyle".to_string(), TokenValue::String(style.clone()));
    // The extracted style must survive into rendering even after the value
    // object has been flattened to a platform literal.
    set_vendor_entry(&mut token.extensions, "fontStyle", json!(style));
}

/// Split a standalone fontWeight token into `weight`/`style` siblings when a
/// non-default style is buried in its value. Returns the replacement group.
fn split_standalone_weight(token: &RawToken, refs: &TokenTree) -> Option<TokenTree> {
    let raw = match &token.value {
        TokenValue::String(s) => s.clone(),
        TokenValue::Number(n) => format_number(*n),
        _ => return None,
    };
    let resolved = resolve_weight(&raw, refs);
    let (weight, style) = split_weight_style(&resolved);
    if style == "normal" {
        return None;
    }

    let mut weight_token = token.clone();
    set_vendor_entry(
        &mut weight_token.extensions,
        "originalFontWeight",
        json!(resolved),
    );
    weight_token.token_type = Some("fontWeight".to_string());
    weight_token.value = TokenValue::String(weight);

    let mut style_token = token.clone();
    style_token.token_type = Some("fontStyle".to_string());
    style_token.value = TokenValue::String(style);

    let mut group = TokenTree::new();
    group.nodes.insert("weight".to_string(), TokenNode::Token(weight_token));
    group.nodes.insert("style".to_string(), TokenNode::Token(style_token));
    Some(group)
}

/// Resolve a weight that may be a reference, failing soft: an unresolvable
/// reference is logged and the raw string kept.
fn resolve_weight(raw: &str, refs: &TokenTree) -> String {
    if !reference::uses_references(raw) {
        return raw.to_string();
    }
    match resolve::resolve_str(raw, refs) {
        Ok(value) => value.to_string(),
        Err(err) => {
            tracing::warn!("could not resolve font weight `{raw}`: {err}");
            raw.to_string()
        }
    }
}

/// Insert a tokensmith vendor-extension entry, keeping any existing value.
pub(crate) fn set_vendor_entry(
    extensions: &mut IndexMap<String, serde_json::Value>,
    key: &str,
    value: serde_json::Value,
) {
    let vendor = extensions
        .entry(VENDOR_EXTENSION.to_string())
        .or_insert_with(|| json!({}));
    if let Some(obj) = vendor.as_object_mut()
        && !obj.contains_key(key)
    {
        obj.insert(key.to_string(), value);
    }
}
