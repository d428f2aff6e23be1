//! Language identification and per-grammar outline support
//!
//! Each supported grammar provides a [`LanguageSupport`] implementation:
//! the tree-sitter language, its embedded symbols query, and the hooks the
//! outline pass consults (parent resolution, per-match veto, whole-tree
//! postprocessing). The pass depends only on this trait, never on concrete
//! language logic.

mod c;
mod cpp;
mod python;
mod rust;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::normalize::NormalizedMatch;
use crate::symbol::{Symbol, SymbolId, SymbolTree};

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguageId {
    #[default]
    PlainText,
    Rust,
    C,
    Cpp,
    Python,
}

impl LanguageId {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => LanguageId::Rust,
            "c" | "h" => LanguageId::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => LanguageId::Cpp,
            "py" | "pyi" => LanguageId::Python,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::Rust => "Rust",
            LanguageId::C => "C",
            LanguageId::Cpp => "C++",
            LanguageId::Python => "Python",
        }
    }

    /// Check if this language has outline support
    pub fn has_outline(&self) -> bool {
        support_for(*self).is_some()
    }
}

/// Entries of the parent-resolution stack: every symbol emitted so far,
/// paired with the structural node it was built from
pub type ParentStack<'t> = [(Node<'t>, SymbolId)];

/// Resolved structural parent for one match
#[derive(Debug, Clone, Copy)]
pub struct ParentLink<'t> {
    /// The owning symbol, or none for a root item
    pub item: Option<SymbolId>,
    /// The parent's structural node; when it equals the match's own symbol
    /// node the match is a duplicate and gets discarded
    pub node: Option<Node<'t>>,
    /// Nesting level of the new symbol
    pub level: usize,
}

impl<'t> ParentLink<'t> {
    /// A root-level link (no parent, level 0)
    pub fn root() -> Self {
        Self {
            item: None,
            node: None,
            level: 0,
        }
    }
}

/// Per-grammar outline support consumed by the pass
pub trait LanguageSupport: Sync {
    fn id(&self) -> LanguageId;

    /// The tree-sitter grammar
    fn grammar(&self) -> tree_sitter::Language;

    /// The embedded symbols query source
    fn symbols_query(&self) -> &'static str;

    /// Resolve the structural parent of a match against the stack of symbols
    /// emitted so far
    fn resolve_parent<'t>(
        &self,
        stack: &ParentStack<'t>,
        symbols: &SymbolTree,
        query_match: &NormalizedMatch<'t>,
        symbol_node: Node<'t>,
    ) -> ParentLink<'t> {
        let _ = query_match;
        resolve_by_ancestry(stack, symbols, symbol_node)
    }

    /// Per-match touch-up; return false to drop the item
    fn postprocess(&self, symbol: &mut Symbol, query_match: &NormalizedMatch<'_>) -> bool {
        let _ = (symbol, query_match);
        true
    }

    /// Whole-tree touch-up after the match stream is exhausted
    fn postprocess_symbols(&self, symbols: &mut SymbolTree) {
        let _ = symbols;
    }
}

/// Look up outline support for a language
pub fn support_for(language: LanguageId) -> Option<&'static dyn LanguageSupport> {
    match language {
        LanguageId::Rust => Some(&rust::RustSupport),
        LanguageId::C => Some(&c::CSupport),
        LanguageId::Cpp => Some(&cpp::CppSupport),
        LanguageId::Python => Some(&python::PythonSupport),
        LanguageId::PlainText => None,
    }
}

/// Languages with registered outline support, in registration order
pub fn supported_languages() -> &'static [LanguageId] {
    &[
        LanguageId::Rust,
        LanguageId::C,
        LanguageId::Cpp,
        LanguageId::Python,
    ]
}

/// Shared parent resolution: walk the match's ancestor chain (starting at the
/// symbol node itself, so repeated matches on one node resolve to themselves
/// and get deduplicated) and find the innermost stack entry on it.
pub fn resolve_by_ancestry<'t>(
    stack: &ParentStack<'t>,
    symbols: &SymbolTree,
    symbol_node: Node<'t>,
) -> ParentLink<'t> {
    let mut cursor = Some(symbol_node);
    while let Some(node) = cursor {
        for (candidate, id) in stack.iter().rev() {
            if candidate.id() == node.id() {
                return ParentLink {
                    item: Some(*id),
                    node: Some(node),
                    level: symbols.get(*id).level + 1,
                };
            }
        }
        cursor = node.parent();
    }
    ParentLink::root()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{SymbolKind, SymbolRange};
    use tree_sitter::Parser;

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageId::from_extension("rs"), LanguageId::Rust);
        assert_eq!(LanguageId::from_extension("cpp"), LanguageId::Cpp);
        assert_eq!(LanguageId::from_extension("HPP"), LanguageId::Cpp);
        assert_eq!(LanguageId::from_extension("h"), LanguageId::C);
        assert_eq!(LanguageId::from_extension("py"), LanguageId::Python);
        assert_eq!(LanguageId::from_extension("txt"), LanguageId::PlainText);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("src/main.rs")),
            LanguageId::Rust
        );
        assert_eq!(
            LanguageId::from_path(Path::new("no_extension")),
            LanguageId::PlainText
        );
    }

    #[test]
    fn test_registry_covers_supported_languages() {
        for &lang in supported_languages() {
            let support = support_for(lang).expect("registered language has support");
            assert_eq!(support.id(), lang);
        }
        assert!(support_for(LanguageId::PlainText).is_none());
    }

    #[test]
    fn test_resolve_by_ancestry_finds_enclosing_symbol() {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .unwrap();
        let tree = parser
            .parse("mod outer {\n    fn inner() {}\n}\n", None)
            .unwrap();
        let module = tree.root_node().child(0).unwrap();
        assert_eq!(module.kind(), "mod_item");
        let body = module.child_by_field_name("body").unwrap();
        let function = body.child(1).unwrap();
        assert_eq!(function.kind(), "function_item");

        let mut symbols = SymbolTree::new();
        let module_id = symbols.insert(Symbol {
            kind: SymbolKind::Module,
            name: "outer".to_string(),
            level: 0,
            parent: None,
            children: Vec::new(),
            range: SymbolRange::collapsed(0, 0),
            selection_range: SymbolRange::collapsed(0, 0),
            scope: None,
        });
        let stack = vec![(module, module_id)];

        let link = resolve_by_ancestry(&stack, &symbols, function);
        assert_eq!(link.item, Some(module_id));
        assert_eq!(link.node.unwrap().id(), module.id());
        assert_eq!(link.level, 1);
    }

    #[test]
    fn test_resolve_by_ancestry_self_match_resolves_to_itself() {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse("fn solo() {}\n", None).unwrap();
        let function = tree.root_node().child(0).unwrap();

        let mut symbols = SymbolTree::new();
        let id = symbols.insert(Symbol {
            kind: SymbolKind::Function,
            name: "solo".to_string(),
            level: 0,
            parent: None,
            children: Vec::new(),
            range: SymbolRange::collapsed(0, 0),
            selection_range: SymbolRange::collapsed(0, 0),
            scope: None,
        });
        let stack = vec![(function, id)];

        // A second match on the same node resolves to that node, which the
        // pass treats as a duplicate.
        let link = resolve_by_ancestry(&stack, &symbols, function);
        assert_eq!(link.node.unwrap().id(), function.id());
    }

    #[test]
    fn test_resolve_by_ancestry_root_when_stack_misses() {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse("fn solo() {}\n", None).unwrap();
        let function = tree.root_node().child(0).unwrap();

        let symbols = SymbolTree::new();
        let link = resolve_by_ancestry(&[], &symbols, function);
        assert!(link.item.is_none());
        assert!(link.node.is_none());
        assert_eq!(link.level, 0);
    }
}
