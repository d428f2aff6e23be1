//! Outline symbol data model
//!
//! Arena-backed symbol tree produced by an outline pass. Symbols own their
//! children by index; the parent link is a non-owning back-index used only
//! for lookups, so the tree can never form a retained cycle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lang::LanguageId;

/// Display name used when a match captures no name node
pub const ANONYMOUS_NAME: &str = "<Anonymous>";

/// Display name used when a name node's text cannot be extracted
pub const PARSE_ERROR_NAME: &str = "<parse error>";

/// Symbol kind vocabulary for outline entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Module,
    Namespace,
    Class,
    Struct,
    Enum,
    EnumVariant,
    Interface,
    Trait,
    Function,
    Method,
    Field,
    Property,
    Constant,
    Impl,
    /// Synthetic visibility-section marker (`public:` / `protected:` /
    /// `private:`), detected by text scanning rather than structural parsing
    AccessSpecifier,
}

impl SymbolKind {
    /// Every kind in the vocabulary, in declaration order
    pub const ALL: &'static [SymbolKind] = &[
        SymbolKind::Module,
        SymbolKind::Namespace,
        SymbolKind::Class,
        SymbolKind::Struct,
        SymbolKind::Enum,
        SymbolKind::EnumVariant,
        SymbolKind::Interface,
        SymbolKind::Trait,
        SymbolKind::Function,
        SymbolKind::Method,
        SymbolKind::Field,
        SymbolKind::Property,
        SymbolKind::Constant,
        SymbolKind::Impl,
        SymbolKind::AccessSpecifier,
    ];

    /// Parse a kind from query metadata (case-insensitive)
    pub fn parse(raw: &str) -> Option<Self> {
        let kind = match raw.to_lowercase().as_str() {
            "module" => SymbolKind::Module,
            "namespace" => SymbolKind::Namespace,
            "class" => SymbolKind::Class,
            "struct" => SymbolKind::Struct,
            "enum" => SymbolKind::Enum,
            "enum-variant" | "enumvariant" => SymbolKind::EnumVariant,
            "interface" => SymbolKind::Interface,
            "trait" => SymbolKind::Trait,
            "function" => SymbolKind::Function,
            "method" => SymbolKind::Method,
            "field" => SymbolKind::Field,
            "property" => SymbolKind::Property,
            "constant" => SymbolKind::Constant,
            "impl" => SymbolKind::Impl,
            "access-specifier" => SymbolKind::AccessSpecifier,
            _ => return None,
        };
        Some(kind)
    }

    /// Short label for rendering in an outline tree
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Module => "mod",
            SymbolKind::Namespace => "ns",
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::Enum => "enum",
            SymbolKind::EnumVariant => "var",
            SymbolKind::Interface => "iface",
            SymbolKind::Trait => "trait",
            SymbolKind::Function => "fn",
            SymbolKind::Method => "fn",
            SymbolKind::Field => "field",
            SymbolKind::Property => "prop",
            SymbolKind::Constant => "const",
            SymbolKind::Impl => "impl",
            SymbolKind::AccessSpecifier => "access",
        }
    }

    /// Whether symbols of this kind act as containers for access-specifier
    /// markers
    pub fn is_container(&self) -> bool {
        matches!(self, SymbolKind::Class | SymbolKind::Struct)
    }
}

/// A range in the document (line/col are 0-based, end never precedes start)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolRange {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl SymbolRange {
    /// Zero-width range anchored at a single position
    pub fn collapsed(line: usize, col: usize) -> Self {
        Self {
            start_line: line,
            start_col: col,
            end_line: line,
            end_col: col,
        }
    }

    /// Whether the range is well-ordered (end at or after start)
    pub fn is_ordered(&self) -> bool {
        self.end_line > self.start_line
            || (self.end_line == self.start_line && self.end_col >= self.start_col)
    }

    /// Whether a line falls within the range's line span
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// Index of a symbol within its [`SymbolTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single entry in the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    /// Nesting depth: 0 for roots, parent level + 1 otherwise
    pub level: usize,
    /// Non-owning back-index to the owning symbol
    pub parent: Option<SymbolId>,
    /// Owned children, in discovery order
    pub children: Vec<SymbolId>,
    /// Full extent of the symbol
    pub range: SymbolRange,
    /// The clickable/identifying span (name node when present)
    pub selection_range: SymbolRange,
    /// Optional namespace/visibility annotation
    pub scope: Option<String>,
}

/// Arena-backed forest of outline symbols
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTree {
    symbols: Vec<Symbol>,
    roots: Vec<SymbolId>,
}

impl SymbolTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, attaching it to its parent's child list (or the root
    /// sequence when it has no parent). Returns the new symbol's id.
    pub fn insert(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len());
        let parent = symbol.parent;
        self.symbols.push(symbol);
        match parent {
            Some(p) => self.symbols[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }

    /// Root-level symbol ids in discovery order
    pub fn roots(&self) -> &[SymbolId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All ids in arena (discovery) order
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> {
        (0..self.symbols.len()).map(SymbolId)
    }

    /// Depth-first preorder walk over the forest
    pub fn walk(&self) -> Walk<'_> {
        let mut stack: Vec<SymbolId> = self.roots.clone();
        stack.reverse();
        Walk { tree: self, stack }
    }
}

/// Depth-first preorder iterator over a [`SymbolTree`]
pub struct Walk<'a> {
    tree: &'a SymbolTree,
    stack: Vec<SymbolId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (SymbolId, &'a Symbol);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let symbol = self.tree.get(id);
        self.stack.extend(symbol.children.iter().rev().copied());
        Some((id, symbol))
    }
}

/// Fatal pass diagnostics (malformed query metadata)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    #[error("{}: symbols query match is missing `kind` metadata", language.display_name())]
    MissingKind { language: LanguageId },

    #[error("{}: unknown symbol kind `{kind}` in symbols query", language.display_name())]
    UnknownKind { language: LanguageId, kind: String },
}

/// Result of one outline pass
#[derive(Debug, Clone)]
pub struct OutlineResult {
    /// Root-level symbols with their subtrees
    pub symbols: SymbolTree,
    pub language: LanguageId,
    /// Identifier of the parsing backend that produced the tree
    pub backend: &'static str,
    /// Handle to the parsed tree (absent when the language is unsupported)
    pub tree: Option<tree_sitter::Tree>,
    /// Set when the pass stopped early on malformed query metadata; the
    /// symbols collected before the fault are still present
    pub error: Option<OutlineError>,
}

impl OutlineResult {
    /// Empty, well-formed result for unsupported input
    pub fn empty(language: LanguageId) -> Self {
        Self {
            symbols: SymbolTree::new(),
            language,
            backend: crate::engine::BACKEND,
            tree: None,
            error: None,
        }
    }

    /// Whether the pass stopped early with a diagnostic
    pub fn is_partial(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(kind: SymbolKind, name: &str, parent: Option<SymbolId>, level: usize) -> Symbol {
        Symbol {
            kind,
            name: name.to_string(),
            level,
            parent,
            children: Vec::new(),
            range: SymbolRange::collapsed(0, 0),
            selection_range: SymbolRange::collapsed(0, 0),
            scope: None,
        }
    }

    #[test]
    fn test_kind_parse_round_trip() {
        assert_eq!(SymbolKind::parse("class"), Some(SymbolKind::Class));
        assert_eq!(SymbolKind::parse("Class"), Some(SymbolKind::Class));
        assert_eq!(
            SymbolKind::parse("enum-variant"),
            Some(SymbolKind::EnumVariant)
        );
        assert_eq!(SymbolKind::parse("widget"), None);
        assert_eq!(SymbolKind::parse(""), None);
    }

    #[test]
    fn test_container_kinds() {
        assert!(SymbolKind::Class.is_container());
        assert!(SymbolKind::Struct.is_container());
        assert!(!SymbolKind::Namespace.is_container());
        assert!(!SymbolKind::Function.is_container());
    }

    #[test]
    fn test_range_ordering() {
        assert!(SymbolRange::collapsed(3, 7).is_ordered());
        assert!(SymbolRange {
            start_line: 1,
            start_col: 4,
            end_line: 1,
            end_col: 4
        }
        .is_ordered());
        assert!(!SymbolRange {
            start_line: 2,
            start_col: 5,
            end_line: 2,
            end_col: 3
        }
        .is_ordered());
    }

    #[test]
    fn test_insert_roots_and_children() {
        let mut tree = SymbolTree::new();
        let root = tree.insert(sym(SymbolKind::Class, "Foo", None, 0));
        let child = tree.insert(sym(SymbolKind::Method, "bar", Some(root), 1));

        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree.get(root).children, vec![child]);
        assert_eq!(tree.get(child).parent, Some(root));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_walk_is_preorder() {
        let mut tree = SymbolTree::new();
        let a = tree.insert(sym(SymbolKind::Class, "A", None, 0));
        let a1 = tree.insert(sym(SymbolKind::Method, "a1", Some(a), 1));
        let a2 = tree.insert(sym(SymbolKind::Method, "a2", Some(a), 1));
        let b = tree.insert(sym(SymbolKind::Function, "b", None, 0));

        let order: Vec<SymbolId> = tree.walk().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, a1, a2, b]);
    }

    #[test]
    fn test_error_message_names_language_and_kind() {
        let err = OutlineError::UnknownKind {
            language: LanguageId::Cpp,
            kind: "gizmo".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("C++"), "message should name the language: {msg}");
        assert!(msg.contains("gizmo"), "message should name the kind: {msg}");
    }
}
