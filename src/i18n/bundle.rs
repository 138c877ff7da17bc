//! Language bundles: the nested string tree for one language.
//!
//! A bundle is a JSON object whose values are either strings (leaves) or
//! further objects (sections). Strings are addressed by dot-delimited key
//! paths such as `landing.designs.tabs.entrepreneur.desc`.

use crate::i18n::error::{I18nError, Missing};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between the segments of a key path.
pub const KEY_SEPARATOR: char = '.';

/// A node in a bundle tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// A display string
    Text(String),
    /// A named group of nodes
    Section(BTreeMap<String, Node>),
}

impl Node {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text.as_str()),
            Node::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Text(_) => None,
            Node::Section(children) => Some(children),
        }
    }
}

/// The complete, immutable string table for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBundle {
    code: String,
    root: BTreeMap<String, Node>,
}

impl LanguageBundle {
    /// Build a bundle from an already parsed tree.
    ///
    /// Fails if any section or key name is empty or contains the key separator,
    /// since such names could not be addressed by a key path.
    pub fn new(code: impl Into<String>, root: BTreeMap<String, Node>) -> Result<Self, I18nError> {
        let code = code.into();
        check_names(&code, &root, "")?;
        Ok(Self { code, root })
    }

    /// Parse a bundle from its JSON source.
    ///
    /// The document must be an object; every value must be a string or a
    /// nested object.
    pub fn from_json(code: impl Into<String>, source: &str) -> Result<Self, I18nError> {
        let code = code.into();
        let root: BTreeMap<String, Node> =
            serde_json::from_str(source).map_err(|e| I18nError::InvalidBundle {
                language: code.clone(),
                reason: e.to_string(),
            })?;
        Self::new(code, root)
    }

    /// Serialize the bundle back to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, I18nError> {
        serde_json::to_string_pretty(&self.root).map_err(|e| I18nError::InvalidBundle {
            language: self.code.clone(),
            reason: e.to_string(),
        })
    }

    /// Language code this bundle belongs to (e.g. "es").
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Resolve a key path to the node it addresses, if any.
    pub fn node(&self, key_path: &str) -> Option<&Node> {
        let mut segments = key_path.split(KEY_SEPARATOR);
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_section()?.get(segment)?;
        }
        Some(current)
    }

    /// Resolve a key path to its display string.
    ///
    /// # Errors
    /// `MissingTranslation` if the path does not exist, or if it addresses a
    /// section rather than a string.
    pub fn get(&self, key_path: &str) -> Result<&str, I18nError> {
        match self.node(key_path) {
            Some(Node::Text(text)) => Ok(text.as_str()),
            Some(Node::Section(_)) => Err(I18nError::missing_key(
                &self.code,
                key_path,
                Missing::Section,
            )),
            None => Err(I18nError::missing_key(&self.code, key_path, Missing::Key)),
        }
    }

    /// Whether `key_path` resolves to a string.
    pub fn contains(&self, key_path: &str) -> bool {
        self.node(key_path).and_then(Node::as_text).is_some()
    }

    /// Flattened view: every leaf as `(key path, string)`, sorted by key path.
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        collect_entries(&self.root, "", &mut out);
        out
    }

    /// All key paths that resolve to a string, sorted.
    pub fn key_paths(&self) -> Vec<String> {
        self.entries().into_iter().map(|(key, _)| key).collect()
    }

    /// Number of strings in the bundle.
    pub fn len(&self) -> usize {
        fn count(nodes: &BTreeMap<String, Node>) -> usize {
            nodes
                .values()
                .map(|node| match node {
                    Node::Text(_) => 1,
                    Node::Section(children) => count(children),
                })
                .sum()
        }
        count(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest nesting level, counting top-level entries as depth 1.
    pub fn depth(&self) -> usize {
        fn deepest(nodes: &BTreeMap<String, Node>) -> usize {
            nodes
                .values()
                .map(|node| match node {
                    Node::Text(_) => 1,
                    Node::Section(children) => 1 + deepest(children),
                })
                .max()
                .unwrap_or(0)
        }
        deepest(&self.root)
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", prefix, KEY_SEPARATOR, name)
    }
}

fn collect_entries<'a>(
    nodes: &'a BTreeMap<String, Node>,
    prefix: &str,
    out: &mut Vec<(String, &'a str)>,
) {
    for (name, node) in nodes {
        let key = join_key(prefix, name);
        match node {
            Node::Text(text) => out.push((key, text.as_str())),
            Node::Section(children) => collect_entries(children, &key, out),
        }
    }
}

fn check_names(code: &str, nodes: &BTreeMap<String, Node>, prefix: &str) -> Result<(), I18nError> {
    for (name, node) in nodes {
        if name.is_empty() || name.contains(KEY_SEPARATOR) {
            return Err(I18nError::InvalidBundle {
                language: code.to_string(),
                reason: format!("invalid key name '{}' under '{}'", name, prefix),
            });
        }
        if let Node::Section(children) = node {
            check_names(code, children, &join_key(prefix, name))?;
        }
    }
    Ok(())
}
