//! Document-symbol outlines from tree-sitter queries
//!
//! This crate turns the match stream of a tree-sitter symbols query into a
//! hierarchical outline of semantic symbols, and interleaves synthetic
//! access-specifier markers (`public:` / `protected:` / `private:`) detected
//! by plain-text line scanning into the class hierarchy.
//!
//! ## Architecture
//!
//! ```text
//! source text ─┬→ scan (access-specifier lines) ──┐
//!              └→ parse → query matches → normalize → pass → SymbolTree
//! ```
//!
//! [`OutlineEngine`] owns the parsers and compiled queries; each call to
//! [`OutlineEngine::outline`] runs one full, self-contained pass. Language
//! specifics live behind the [`lang::LanguageSupport`] trait.

pub mod config;
pub mod engine;
pub mod lang;
pub mod normalize;
pub mod pass;
pub mod scan;
pub mod symbol;

// Re-export commonly used types
pub use config::OutlineConfig;
pub use engine::{OutlineEngine, BACKEND};
pub use lang::{support_for, LanguageId, LanguageSupport, ParentLink};
pub use normalize::NormalizedMatch;
pub use scan::{scan_access_tokens, AccessToken, ACCESS_KEYWORDS};
pub use symbol::{
    OutlineError, OutlineResult, Symbol, SymbolId, SymbolKind, SymbolRange, SymbolTree,
};
