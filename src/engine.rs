//! Parser and query ownership, and the outline entry point
//!
//! Owns one tree-sitter parser and one compiled symbols query per supported
//! language. Every call performs a full parse and a full outline pass; there
//! is no cross-invocation state, so re-running over unchanged text yields a
//! structurally identical forest.

use std::collections::HashMap;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

use crate::config::OutlineConfig;
use crate::lang::{support_for, supported_languages, LanguageId};
use crate::normalize::NormalizedMatch;
use crate::pass::OutlinePass;
use crate::scan::{scan_access_tokens, ACCESS_KEYWORDS};
use crate::symbol::OutlineResult;

/// Identifier of the parsing backend, surfaced in pass metadata
pub const BACKEND: &str = "tree-sitter";

/// Outline extraction state: parsers and compiled queries per language
pub struct OutlineEngine {
    parsers: HashMap<LanguageId, Parser>,
    queries: HashMap<LanguageId, Query>,
}

impl OutlineEngine {
    /// Create an engine with every registered language initialized
    pub fn new() -> Self {
        let mut engine = Self {
            parsers: HashMap::new(),
            queries: HashMap::new(),
        };
        for &language in supported_languages() {
            engine.init_language(language);
        }
        engine
    }

    /// Initialize a language's parser and symbols query
    fn init_language(&mut self, language: LanguageId) {
        let Some(support) = support_for(language) else {
            return;
        };
        let grammar = support.grammar();

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&grammar) {
            tracing::error!("Failed to set language for {:?}: {}", language, e);
            return;
        }
        self.parsers.insert(language, parser);

        match Query::new(&grammar, support.symbols_query()) {
            Ok(query) => {
                self.queries.insert(language, query);
            }
            Err(e) => {
                tracing::error!("Failed to compile symbols query for {:?}: {:?}", language, e);
            }
        }
    }

    /// Whether outlining is available for a language (parser and query both
    /// initialized)
    pub fn supports(&self, language: LanguageId) -> bool {
        self.parsers.contains_key(&language) && self.queries.contains_key(&language)
    }

    /// Parse the source and build its symbol outline.
    ///
    /// Unsupported languages and parse failures return an empty, well-formed
    /// result. A malformed `kind` in the symbols query stops the pass early
    /// and surfaces the partial forest with `error` set.
    pub fn outline(
        &mut self,
        source: &str,
        language: LanguageId,
        config: &OutlineConfig,
    ) -> OutlineResult {
        let Some(support) = support_for(language) else {
            tracing::debug!("No outline support for {:?}", language);
            return OutlineResult::empty(language);
        };

        let tree = {
            let Some(parser) = self.parsers.get_mut(&language) else {
                tracing::warn!("No parser for language {:?}", language);
                return OutlineResult::empty(language);
            };
            match parser.parse(source, None) {
                Some(tree) => tree,
                None => {
                    tracing::error!("Parse failed for {:?}", language);
                    return OutlineResult::empty(language);
                }
            }
        };
        let Some(query) = self.queries.get(&language) else {
            tracing::warn!("No symbols query for language {:?}", language);
            return OutlineResult::empty(language);
        };

        let pending = scan_access_tokens(source, ACCESS_KEYWORDS);
        let mut pass = OutlinePass::new(language, pending);

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, tree.root_node(), source.as_bytes());
        while let Some(query_match) = matches.next() {
            let normalized = NormalizedMatch::from_query_match(query, query_match);
            if !pass.process(support, config, source, &normalized) {
                break;
            }
        }

        let mut result = pass.finish(support, config);
        result.tree = Some(tree);
        result
    }
}

impl Default for OutlineEngine {
    fn default() -> Self {
        Self::new()
    }
}
