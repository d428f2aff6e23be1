//! Python outline support
//!
//! The query captures every `def` as a function; the whole-tree postprocess
//! retags functions directly under a class as methods.

use super::{LanguageId, LanguageSupport};
use crate::symbol::{SymbolKind, SymbolTree};

const SYMBOLS_QUERY: &str = include_str!("../../queries/python/symbols.scm");

pub struct PythonSupport;

impl LanguageSupport for PythonSupport {
    fn id(&self) -> LanguageId {
        LanguageId::Python
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn symbols_query(&self) -> &'static str {
        SYMBOLS_QUERY
    }

    fn postprocess_symbols(&self, symbols: &mut SymbolTree) {
        let ids: Vec<_> = symbols.ids().collect();
        for id in ids {
            let symbol = symbols.get(id);
            if symbol.kind != SymbolKind::Function {
                continue;
            }
            let under_class = symbol
                .parent
                .is_some_and(|p| symbols.get(p).kind == SymbolKind::Class);
            if under_class {
                symbols.get_mut(id).kind = SymbolKind::Method;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Symbol, SymbolRange};

    fn sym(kind: SymbolKind, name: &str, parent: Option<crate::symbol::SymbolId>) -> Symbol {
        Symbol {
            kind,
            name: name.to_string(),
            level: if parent.is_some() { 1 } else { 0 },
            parent,
            children: Vec::new(),
            range: SymbolRange::collapsed(0, 0),
            selection_range: SymbolRange::collapsed(0, 0),
            scope: None,
        }
    }

    #[test]
    fn test_class_functions_become_methods() {
        let mut tree = SymbolTree::new();
        let class = tree.insert(sym(SymbolKind::Class, "Shape", None));
        let method = tree.insert(sym(SymbolKind::Function, "area", Some(class)));
        let free = tree.insert(sym(SymbolKind::Function, "main", None));

        PythonSupport.postprocess_symbols(&mut tree);

        assert_eq!(tree.get(method).kind, SymbolKind::Method);
        assert_eq!(tree.get(free).kind, SymbolKind::Function);
    }
}
