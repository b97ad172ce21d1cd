use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::value::TokenValue;

/// A token leaf as it appears on disk: a `$value` with optional type,
/// description, and extension metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToken {
    #[serde(rename = "$type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(rename = "$value")]
    pub value: TokenValue,
    #[serde(rename = "$description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "$extensions",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl RawToken {
    pub fn new(token_type: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        Self {
            token_type: Some(token_type.into()),
            value: value.into(),
            description: None,
            extensions: IndexMap::new(),
        }
    }
}

/// A node in the token tree: a token leaf (any object carrying `$value`) or
/// a nested group of further nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    Token(RawToken),
    Group(TokenTree),
}

/// Nested mapping of group names to tokens and sub-groups, in declaration
/// order. This is the in-memory form of one token file (or several files
/// deep-merged).
///
/// A group may declare a `$type` of its own; untyped descendant tokens
/// inherit it via [`TokenTree::delegate_types`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenTree {
    pub group_type: Option<String>,
    pub nodes: IndexMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a token by its path segments.
    pub fn get(&self, path: &[&str]) -> Option<&RawToken> {
        let (last, groups) = path.split_last()?;
        let mut tree = self;
        for segment in groups {
            match tree.nodes.get(*segment) {
                Some(TokenNode::Group(sub)) => tree = sub,
                _ => return None,
            }
        }
        match tree.nodes.get(*last) {
            Some(TokenNode::Token(token)) => Some(token),
            _ => None,
        }
    }

    /// Look up a token by a dotted path string (`"color.palette.blue"`).
    pub fn get_path(&self, dotted: &str) -> Option<&RawToken> {
        let segments: Vec<&str> = dotted.split('.').collect();
        self.get(&segments)
    }

    /// Deep-merge `other` into `self`. Groups merge recursively; a token in
    /// `other` replaces whatever held its path before. Later sets win.
    pub fn merge(&mut self, other: TokenTree) {
        if other.group_type.is_some() {
            self.group_type = other.group_type;
        }
        for (key, incoming) in other.nodes {
            match (self.nodes.get_mut(&key), incoming) {
                (Some(TokenNode::Group(existing)), TokenNode::Group(sub)) => {
                    existing.merge(sub);
                }
                (slot, incoming) => {
                    if let Some(slot) = slot {
                        *slot = incoming;
                    } else {
                        self.nodes.insert(key, incoming);
                    }
                }
            }
        }
    }

    /// Depth-first flatten into `(path, token)` pairs in declaration order.
    pub fn flatten(&self) -> Vec<(Vec<String>, &RawToken)> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.flatten_into(&mut prefix, &mut out);
        out
    }

    fn flatten_into<'a>(
        &'a self,
        prefix: &mut Vec<String>,
        out: &mut Vec<(Vec<String>, &'a RawToken)>,
    ) {
        for (key, node) in &self.nodes {
            prefix.push(key.clone());
            match node {
                TokenNode::Token(token) => out.push((prefix.clone(), token)),
                TokenNode::Group(sub) => sub.flatten_into(prefix, out),
            }
            prefix.pop();
        }
    }

    /// Push group-level `$type` declarations down to descendant tokens that
    /// do not declare their own, so every leaf carries a concrete type.
    pub fn delegate_types(&mut self) {
        let own = self.group_type.clone();
        self.delegate_types_from(own.as_deref());
    }

    fn delegate_types_from(&mut self, inherited: Option<&str>) {
        for node in self.nodes.values_mut() {
            match node {
                TokenNode::Token(token) => {
                    if token.token_type.is_none() {
                        token.token_type = inherited.map(str::to_string);
                    }
                }
                TokenNode::Group(sub) => {
                    let effective = sub.group_type.clone();
                    sub.delegate_types_from(effective.as_deref().or(inherited));
                }
            }
        }
    }
}

/// One member of a group object on disk: a nested node, or a `$`-prefixed
/// string attribute such as the group's own `$type` or `$description`.
#[derive(Deserialize)]
#[serde(untagged)]
enum GroupEntry {
    Node(TokenNode),
    Attribute(String),
}

impl<'de> Deserialize<'de> for TokenTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = IndexMap::<String, GroupEntry>::deserialize(deserializer)?;
        let mut tree = TokenTree::new();
        for (key, entry) in raw {
            match entry {
                GroupEntry::Node(node) => {
                    tree.nodes.insert(key, node);
                }
                GroupEntry::Attribute(text) => {
                    if key == "$type" {
                        tree.group_type = Some(text);
                    }
                    // Other group attributes ($description, …) carry no
                    // build-relevant information.
                }
            }
        }
        Ok(tree)
    }
}

impl Serialize for TokenTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let extra = usize::from(self.group_type.is_some());
        let mut map = serializer.serialize_map(Some(self.nodes.len() + extra))?;
        if let Some(t) = &self.group_type {
            map.serialize_entry("$type", t)?;
        }
        for (key, node) in &self.nodes {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}
