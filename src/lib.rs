//! # keygram - Regex Index Key Compiler
//!
//! keygram compiles a parsed regular expression into an **index key**: a
//! compact DAG of byte-range tries describing byte sequences that must
//! appear in any string the regex matches. A substring/trigram index can
//! run the key as a cheap pre-filter, so the full regex engine only visits
//! candidate documents instead of every document.
//!
//! The key is a *necessary-condition* filter, never sufficient: callers
//! must still verify candidates with the real regex engine.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`key`] - The index key DAG: nodes, anchors, selectivity statistics,
//!   and the concatenation/alternation merge algebra
//! - [`walker`] - Bottom-up translation from `regex-syntax` HIR to a key,
//!   plus the final selectivity gate
//!
//! ## Quick Start
//!
//! ```
//! use keygram::index_pattern;
//!
//! // A literal-bearing pattern produces a key worth indexing.
//! let key = index_pattern("hello.*world").unwrap();
//! assert!(key.is_some());
//!
//! // An unconstrained pattern does not; fall back to scanning.
//! let key = index_pattern(".*").unwrap();
//! assert!(key.is_none());
//! ```
//!
//! ## Bounds
//!
//! Degenerate inputs (huge character classes, deeply nested alternation,
//! exponential branching) are never errors: they degrade to the
//! unconstrained sentinel under the width cap ([`MAX_WIDTH`]) and the
//! recursion cap ([`MAX_RECURSION`]), so compilation always terminates
//! with bounded output regardless of the input pattern.

pub mod key;
pub mod walker;

pub use key::{
    Anchor, ByteRange, DumpEdge, DumpNode, Edge, IndexKey, KeyDump, KeyRef, MAX_RECURSION,
    MAX_WIDTH,
};
pub use walker::{compile_hir, compile_pattern, index_hir, index_pattern, MIN_WEIGHT};
