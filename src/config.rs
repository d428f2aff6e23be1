//! Caller-supplied outline configuration
//!
//! The host decides which symbol kinds the outline retains and may install
//! two veto/touch-up hooks: one per accepted match, one over the finished
//! tree. Both run after the language-specific hooks.

use std::collections::HashSet;

use crate::normalize::NormalizedMatch;
use crate::symbol::{Symbol, SymbolKind, SymbolTree};

/// Per-match hook; return false to drop the item
pub type MatchHook = Box<dyn for<'t> Fn(&mut Symbol, &NormalizedMatch<'t>) -> bool + Send + Sync>;

/// Whole-tree hook, run once at the end of a pass
pub type SymbolsHook = Box<dyn Fn(&mut SymbolTree) + Send + Sync>;

/// Outline pass configuration
pub struct OutlineConfig {
    /// Symbol kinds retained in the outline
    pub kinds: HashSet<SymbolKind>,
    /// Optional per-match veto/touch-up hook
    pub match_hook: Option<MatchHook>,
    /// Optional whole-tree hook
    pub symbols_hook: Option<SymbolsHook>,
}

impl OutlineConfig {
    /// Retain only the given kinds
    pub fn with_kinds(kinds: impl IntoIterator<Item = SymbolKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            match_hook: None,
            symbols_hook: None,
        }
    }

    /// Whether a kind passes the inclusion filter
    pub fn allows(&self, kind: SymbolKind) -> bool {
        self.kinds.contains(&kind)
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self::with_kinds(SymbolKind::ALL.iter().copied())
    }
}

impl std::fmt::Debug for OutlineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineConfig")
            .field("kinds", &self.kinds)
            .field("match_hook", &self.match_hook.is_some())
            .field("symbols_hook", &self.symbols_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_every_kind() {
        let config = OutlineConfig::default();
        for &kind in SymbolKind::ALL {
            assert!(config.allows(kind), "{kind:?} should be allowed by default");
        }
    }

    #[test]
    fn test_with_kinds_filters() {
        let config = OutlineConfig::with_kinds([SymbolKind::Class, SymbolKind::Method]);
        assert!(config.allows(SymbolKind::Class));
        assert!(!config.allows(SymbolKind::Field));
    }
}
