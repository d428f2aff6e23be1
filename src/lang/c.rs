//! C outline support

use super::{LanguageId, LanguageSupport};

const SYMBOLS_QUERY: &str = include_str!("../../queries/c/symbols.scm");

pub struct CSupport;

impl LanguageSupport for CSupport {
    fn id(&self) -> LanguageId {
        LanguageId::C
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_c::LANGUAGE.into()
    }

    fn symbols_query(&self) -> &'static str {
        SYMBOLS_QUERY
    }
}
