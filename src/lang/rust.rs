//! Rust outline support
//!
//! Functions are captured uniformly; the whole-tree postprocess retags
//! functions directly under an impl or trait block as methods.

use super::{LanguageId, LanguageSupport};
use crate::symbol::{SymbolKind, SymbolTree};

const SYMBOLS_QUERY: &str = include_str!("../../queries/rust/symbols.scm");

pub struct RustSupport;

impl LanguageSupport for RustSupport {
    fn id(&self) -> LanguageId {
        LanguageId::Rust
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_rust::LANGUAGE.into()
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
            let under_impl = symbol.parent.is_some_and(|p| {
                matches!(
                    symbols.get(p).kind,
                    SymbolKind::Impl | SymbolKind::Trait
                )
            });
            if under_impl {
                symbols.get_mut(id).kind = SymbolKind::Method;
            }
        }
    }
}
