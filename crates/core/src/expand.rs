//! Composite expansion for native platforms: typography and shadow objects
//! become groups of scalar sub-tokens, since class members and XML resources
//! have no map literal to flatten into.

use serde_json::json;
use tokensmith_model::{RawToken, TokenNode, TokenTree, TokenValue};

use crate::preprocess::set_vendor_entry;

/// Replace every typography/shadow composite in the tree with a group of
/// typed scalar children. Multi-layer shadows expand to numbered layers.
pub fn expand_composites(tree: &mut TokenTree) {
    for node in tree.nodes.values_mut() {
        if let TokenNode::Group(sub) = node {
            expand_composites(sub);
            continue;
        }
        let TokenNode::Token(token) = node else {
            continue;
        };
        let replacement = match token.token_type.as_deref() {
            Some("typography") => expand_object(token, typography_child_type),
            Some("shadow") => expand_shadow(token),
            _ => None,
        };
        if let Some(group) = replacement {
            *node = TokenNode::Group(group);
        }
    }
}

fn typography_child_type(key: &str) -> &str {
    match key {
        "lineHeight" | "paragraphSpacing" => "dimension",
        "letterSpacing" => "number",
        other => other,
    }
}

fn shadow_child_type(key: &str) -> &str {
    match key {
        "offsetX" | "offsetY" | "blur" | "spread" => "dimension",
        "color" => "color",
        _ => "string",
    }
}

fn expand_object(token: &RawToken, child_type: fn(&str) -> &str) -> Option<TokenTree> {
    let obj = token.value.as_object()?;
    let mut group = TokenTree::new();
    for (key, sub) in obj {
        let mapped = child_type(key);
        let mut child = RawToken::new(mapped, sub.clone());
        if mapped != key {
            // Remapped children keep their sub-property semantic so unit
            // selection (dp vs sp) still sees "this was a line height".
            set_vendor_entry(&mut child.extensions, "originalType", json!(key));
        }
        group.nodes.insert(key.clone(), TokenNode::Token(child));
    }
    Some(group)
}

fn expand_shadow(token: &RawToken) -> Option<TokenTree> {
    match &token.value {
        TokenValue::Object(_) => expand_object(token, shadow_child_type),
        TokenValue::List(layers) => {
            let mut group = TokenTree::new();
            for (i, layer) in layers.iter().enumerate() {
                let mut layer_token = token.clone();
                layer_token.value = layer.clone();
                let expanded = expand_object(&layer_token, shadow_child_type)?;
                group
                    .nodes
                    .insert((i + 1).to_string(), TokenNode::Group(expanded));
            }
            Some(group)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> TokenTree {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn typography_expands_to_typed_children() {
        let mut t = tree(
            r#"{
                "type": {
                    "body": {
                        "$type": "typography",
                        "$value": {
                            "fontFamily": "Inter",
                            "fontWeight": "Bold",
                            "fontSize": "16",
                            "lineHeight": "24",
                            "letterSpacing": "0.5"
                        }
                    }
                }
            }"#,
        );
        expand_composites(&mut t);

        assert!(t.get_path("type.body").is_none());
        let family = t.get_path("type.body.fontFamily").unwrap();
        assert_eq!(family.token_type.as_deref(), Some("fontFamily"));
        let line_height = t.get_path("type.body.lineHeight").unwrap();
        assert_eq!(line_height.token_type.as_deref(), Some("dimension"));
        let spacing = t.get_path("type.body.letterSpacing").unwrap();
        assert_eq!(spacing.token_type.as_deref(), Some("number"));
    }

    #[test]
    fn multi_layer_shadow_expands_to_numbered_layers() {
        let mut t = tree(
            r##"{
                "shadow": {
                    "modal": {
                        "$type": "shadow",
                        "$value": [
                            { "offsetX": "0", "offsetY": "2", "blur": "4", "spread": "0", "color": "#00000022" },
                            { "offsetX": "0", "offsetY": "8", "blur": "24", "spread": "0", "color": "#00000044" }
                        ]
                    }
                }
            }"##,
        );
        expand_composites(&mut t);

        let blur = t.get_path("shadow.modal.1.blur").unwrap();
        assert_eq!(blur.token_type.as_deref(), Some("dimension"));
        let color = t.get_path("shadow.modal.2.color").unwrap();
        assert_eq!(color.token_type.as_deref(), Some("color"));
        assert_eq!(color.value.as_str(), Some("#00000044"));
    }

    #[test]
    fn scalars_are_left_alone() {
        let mut t = tree(
            r#"{ "space": { "sm": { "$type": "dimension", "$value": "4" } } }"#,
        );
        let before = t.clone();
        expand_composites(&mut t);
        assert_eq!(t, before);
    }
}
