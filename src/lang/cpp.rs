//! C++ outline support
//!
//! Besides the query, C++ needs one touch-up: out-of-class definitions like
//! `void Foo::bar()` capture a qualified identifier as the name. The
//! qualifier becomes the symbol's scope and the trailing segment its name.

use super::{LanguageId, LanguageSupport};
use crate::normalize::NormalizedMatch;
use crate::symbol::Symbol;

const SYMBOLS_QUERY: &str = include_str!("../../queries/cpp/symbols.scm");

pub struct CppSupport;

impl LanguageSupport for CppSupport {
    fn id(&self) -> LanguageId {
        LanguageId::Cpp
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_cpp::LANGUAGE.into()
    }

    fn symbols_query(&self) -> &'static str {
        SYMBOLS_QUERY
    }

    fn postprocess(&self, symbol: &mut Symbol, _query_match: &NormalizedMatch<'_>) -> bool {
        if let Some((qualifier, trailing)) = symbol.name.rsplit_once("::") {
            if !trailing.is_empty() {
                symbol.scope.get_or_insert_with(|| qualifier.to_string());
                symbol.name = trailing.to_string();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizedMatch;
    use crate::symbol::{SymbolKind, SymbolRange};

    fn make_symbol(name: &str) -> Symbol {
        Symbol {
            kind: SymbolKind::Function,
            name: name.to_string(),
            level: 0,
            parent: None,
            children: Vec::new(),
            range: SymbolRange::collapsed(0, 0),
            selection_range: SymbolRange::collapsed(0, 0),
            scope: None,
        }
    }

    #[test]
    fn test_qualified_name_split_into_scope() {
        let norm: NormalizedMatch<'_> = NormalizedMatch::from_parts(Vec::new(), Vec::new());
        let mut symbol = make_symbol("Widget::draw");
        assert!(CppSupport.postprocess(&mut symbol, &norm));
        assert_eq!(symbol.name, "draw");
        assert_eq!(symbol.scope.as_deref(), Some("Widget"));
    }

    #[test]
    fn test_nested_qualifier_keeps_full_prefix() {
        let norm: NormalizedMatch<'_> = NormalizedMatch::from_parts(Vec::new(), Vec::new());
        let mut symbol = make_symbol("ui::Widget::draw");
        CppSupport.postprocess(&mut symbol, &norm);
        assert_eq!(symbol.name, "draw");
        assert_eq!(symbol.scope.as_deref(), Some("ui::Widget"));
    }

    #[test]
    fn test_plain_name_untouched() {
        let norm: NormalizedMatch<'_> = NormalizedMatch::from_parts(Vec::new(), Vec::new());
        let mut symbol = make_symbol("draw");
        CppSupport.postprocess(&mut symbol, &norm);
        assert_eq!(symbol.name, "draw");
        assert!(symbol.scope.is_none());
    }

    #[test]
    fn test_existing_scope_not_overwritten() {
        let norm: NormalizedMatch<'_> = NormalizedMatch::from_parts(Vec::new(), Vec::new());
        let mut symbol = make_symbol("Widget::draw");
        symbol.scope = Some("custom".to_string());
        CppSupport.postprocess(&mut symbol, &norm);
        assert_eq!(symbol.scope.as_deref(), Some("custom"));
    }
}
