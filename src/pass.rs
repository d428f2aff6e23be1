//! The outline pass: match-to-tree assembly
//!
//! Drives one full pass over a structural match stream. Each normalized
//! match is resolved against the stack of previously emitted symbols, built
//! into a symbol record, filtered through the veto hooks, and inserted into
//! the tree. Pending access-specifier tokens from the text scan are
//! interleaved into the open class hierarchy as the pass advances.
//!
//! All pass-scoped state (parent-resolution stack, open-class stack, pending
//! token queue) lives on the pass itself and is discarded when it finishes.

use tree_sitter::Node;

use crate::config::OutlineConfig;
use crate::lang::{LanguageId, LanguageSupport};
use crate::normalize::{
    NormalizedMatch, META_KIND, ROLE_END, ROLE_NAME, ROLE_SCOPE, ROLE_SELECTION, ROLE_START,
};
use crate::scan::AccessToken;
use crate::symbol::{
    OutlineError, OutlineResult, Symbol, SymbolId, SymbolKind, SymbolRange, SymbolTree,
    ANONYMOUS_NAME, PARSE_ERROR_NAME,
};

fn node_range(node: &Node) -> SymbolRange {
    let start = node.start_position();
    let end = node.end_position();
    SymbolRange {
        start_line: start.row,
        start_col: start.column,
        end_line: end.row,
        end_col: end.column,
    }
}

/// One in-flight outline pass over a single parsed document
pub struct OutlinePass<'t> {
    language: LanguageId,
    symbols: SymbolTree,
    /// Every emitted symbol paired with its structural node, for parent
    /// resolution of later matches
    parent_stack: Vec<(Node<'t>, SymbolId)>,
    /// Class/Struct symbols whose range still encloses the scan position
    /// (outer to inner)
    class_stack: Vec<SymbolId>,
    /// Access-specifier hits not yet placed in the tree
    pending: Vec<AccessToken>,
    error: Option<OutlineError>,
}

impl<'t> OutlinePass<'t> {
    pub fn new(language: LanguageId, pending: Vec<AccessToken>) -> Self {
        Self {
            language,
            symbols: SymbolTree::new(),
            parent_stack: Vec::new(),
            class_stack: Vec::new(),
            pending,
            error: None,
        }
    }

    /// Process one normalized match. Returns false when the pass must stop
    /// early (fatal kind-validation error); symbols accepted so far are kept.
    pub fn process(
        &mut self,
        support: &dyn LanguageSupport,
        config: &OutlineConfig,
        source: &str,
        query_match: &NormalizedMatch<'t>,
    ) -> bool {
        let Some(symbol_node) = query_match.symbol_node() else {
            // Query authoring error, not a pass error
            return true;
        };

        let link =
            support.resolve_parent(&self.parent_stack, &self.symbols, query_match, symbol_node);
        if link.node.is_some_and(|n| n.id() == symbol_node.id()) {
            // Repeated match on an identical node; keep the first
            return true;
        }

        let kind = match query_match.setting(META_KIND) {
            None => {
                tracing::error!(
                    "Symbols query match for {} is missing `kind` metadata",
                    self.language.display_name()
                );
                self.error = Some(OutlineError::MissingKind {
                    language: self.language,
                });
                return false;
            }
            Some(raw) => match SymbolKind::parse(raw) {
                Some(kind) => kind,
                None => {
                    tracing::error!(
                        "Unknown symbol kind `{}` in {} symbols query",
                        raw,
                        self.language.display_name()
                    );
                    self.error = Some(OutlineError::UnknownKind {
                        language: self.language,
                        kind: raw.to_string(),
                    });
                    return false;
                }
            },
        };

        let start_node = query_match.node(ROLE_START).unwrap_or(symbol_node);
        let end_node = query_match.node(ROLE_END).unwrap_or(start_node);
        let range = SymbolRange {
            start_line: start_node.start_position().row,
            start_col: start_node.start_position().column,
            end_line: end_node.end_position().row,
            end_col: end_node.end_position().column,
        };
        let selection_range = query_match
            .node(ROLE_SELECTION)
            .or_else(|| query_match.node(ROLE_NAME))
            .map(|n| node_range(&n))
            .unwrap_or_else(|| node_range(&start_node));

        let name = match query_match.node(ROLE_NAME) {
            Some(node) => match node.utf8_text(source.as_bytes()) {
                Ok(text) => text.to_string(),
                Err(_) => PARSE_ERROR_NAME.to_string(),
            },
            None => ANONYMOUS_NAME.to_string(),
        };
        let scope = match query_match.node(ROLE_SCOPE) {
            Some(node) => node
                .utf8_text(source.as_bytes())
                .ok()
                .map(|text| text.to_string()),
            None => query_match.setting(ROLE_SCOPE).map(|s| s.to_string()),
        };

        let mut symbol = Symbol {
            kind,
            name,
            level: link.level,
            parent: link.item,
            children: Vec::new(),
            range,
            selection_range,
            scope,
        };

        if !support.postprocess(&mut symbol, query_match) {
            return true;
        }
        if let Some(hook) = &config.match_hook {
            if !hook(&mut symbol, query_match) {
                return true;
            }
        }
        if !config.allows(symbol.kind) {
            return true;
        }

        // Place pending access-specifier tokens that fall before this item,
        // then insert the item and make it visible to later matches.
        self.interleave_tokens(Some(symbol.range.start_line));
        let kind = symbol.kind;
        let id = self.symbols.insert(symbol);
        if kind.is_container() {
            self.class_stack.push(id);
        }
        self.parent_stack.push((symbol_node, id));
        true
    }

    /// Sweep the pending token queue in ascending line order, attaching each
    /// token that falls inside the innermost still-open class and before
    /// `stop_line`. `None` flushes everything onto the last open class.
    fn interleave_tokens(&mut self, stop_line: Option<usize>) {
        let mut consumed: Vec<usize> = Vec::new();
        for idx in 0..self.pending.len() {
            let token_line = self.pending[idx].line;

            // Classes that closed before this token are no longer valid
            // containers; the outermost entry survives as a fallback.
            while self.class_stack.len() > 1 {
                let innermost = self.class_stack[self.class_stack.len() - 1];
                if token_line > self.symbols.get(innermost).range.end_line {
                    self.class_stack.pop();
                } else {
                    break;
                }
            }

            let Some(&class_id) = self.class_stack.last() else {
                break;
            };
            if let Some(stop) = stop_line {
                if token_line >= stop {
                    // Belongs to a symbol not yet reached
                    break;
                }
                if token_line >= self.symbols.get(class_id).range.end_line {
                    continue;
                }
            }

            let class = self.symbols.get(class_id);
            let marker = Symbol {
                kind: SymbolKind::AccessSpecifier,
                name: self.pending[idx].keyword.clone(),
                level: class.level + 1,
                parent: Some(class_id),
                children: Vec::new(),
                range: SymbolRange::collapsed(token_line, 0),
                selection_range: SymbolRange::collapsed(token_line, 0),
                scope: None,
            };
            self.symbols.insert(marker);
            consumed.push(idx);
        }
        // Reverse order keeps the remaining indices valid
        for idx in consumed.into_iter().rev() {
            self.pending.remove(idx);
        }
    }

    /// Flush leftover tokens, run the whole-tree hooks, and hand the forest
    /// back. The caller attaches the parsed-tree handle.
    pub fn finish(mut self, support: &dyn LanguageSupport, config: &OutlineConfig) -> OutlineResult {
        self.interleave_tokens(None);
        let mut symbols = self.symbols;
        support.postprocess_symbols(&mut symbols);
        if let Some(hook) = &config.symbols_hook {
            hook(&mut symbols);
        }
        OutlineResult {
            symbols,
            language: self.language,
            backend: crate::engine::BACKEND,
            tree: None,
            error: self.error,
        }
    }
}
