//! Query-match normalization
//!
//! A raw query match is an unordered set of named captures plus pattern-level
//! `#set!` directives. Normalization folds both into one canonical record
//! keyed by logical role, resolving overlap between patterns that bind the
//! same role at different specificities.

use std::collections::HashMap;

use tree_sitter::{Node, Query, QueryMatch};

/// Logical role of the node a match describes
pub const ROLE_SYMBOL: &str = "symbol";
/// Logical role of the display-name node
pub const ROLE_NAME: &str = "name";
/// Logical role of the selection-span node
pub const ROLE_SELECTION: &str = "selection";
/// Logical role of the location-start node
pub const ROLE_START: &str = "start";
/// Logical role of the location-end node
pub const ROLE_END: &str = "end";
/// Logical role of the scope/visibility node
pub const ROLE_SCOPE: &str = "scope";
/// Metadata key carrying the symbol kind (required on every pattern)
pub const META_KIND: &str = "kind";

/// Canonical record for one structural match: captured nodes keyed by logical
/// role, plus string metadata from `#set!` directives
#[derive(Debug, Clone)]
pub struct NormalizedMatch<'t> {
    nodes: HashMap<String, Node<'t>>,
    settings: HashMap<String, String>,
}

impl<'t> NormalizedMatch<'t> {
    /// Build from explicit parts. Directive settings are applied first and
    /// never overwrite each other; captures are folded in order and the last
    /// capture wins on role collision.
    pub fn from_parts<'a, C, S>(captures: C, settings: S) -> Self
    where
        C: IntoIterator<Item = (&'a str, Node<'t>)>,
        S: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut norm = Self {
            nodes: HashMap::new(),
            settings: HashMap::new(),
        };
        for (key, value) in settings {
            norm.settings
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        for (role, node) in captures {
            norm.nodes.insert(role.to_string(), node);
        }
        norm
    }

    /// Normalize one raw tree-sitter query match
    pub fn from_query_match(query: &Query, query_match: &QueryMatch<'_, 't>) -> Self {
        let settings = query
            .property_settings(query_match.pattern_index)
            .iter()
            .filter_map(|prop| {
                prop.value
                    .as_deref()
                    .map(|value| (prop.key.as_ref(), value))
            });
        // Collect settings eagerly so both iterators can borrow the query
        let settings: Vec<(&str, &str)> = settings.collect();
        let captures = query_match
            .captures
            .iter()
            .map(|capture| (query.capture_names()[capture.index as usize], capture.node));
        Self::from_parts(captures, settings)
    }

    /// Node captured for a logical role, if any
    pub fn node(&self, role: &str) -> Option<Node<'t>> {
        self.nodes.get(role).copied()
    }

    /// Metadata value set by a query directive, if any
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// The match's structural node: the `symbol` capture, falling back to the
    /// `name` capture when a query only marks the name
    pub fn symbol_node(&self) -> Option<Node<'t>> {
        self.node(ROLE_SYMBOL).or_else(|| self.node(ROLE_NAME))
    }
}
