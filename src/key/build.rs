//! Leaf key builders: the translations for regex AST leaves.
//!
//! Everything here produces a fresh key in the given arena. Inner AST nodes
//! are handled by the merge operations in [`concat`](crate::key::concat) and
//! [`alternate`](crate::key::alternate).

use super::node::{Anchor, Arena, ByteRange, KeyRef, MAX_WIDTH};

/// The unconstrained sentinel: any byte sequence, including empty.
pub(crate) fn any() -> KeyRef {
    KeyRef::Any
}

/// The empty key: exactly the empty string, anchored on both sides.
///
/// Used for zero-width assertions; it carries no substring information but
/// does not defeat the anchoring of surrounding content.
pub(crate) fn empty(arena: &mut Arena) -> KeyRef {
    KeyRef::Node(arena.alloc(Anchor::BOTH))
}

/// A chain of single-byte nodes spelling `bytes`, built right-to-left so the
/// last byte's child is the sentinel. Fully both-anchored.
pub(crate) fn literal(arena: &mut Arena, bytes: &[u8]) -> KeyRef {
    if bytes.is_empty() {
        return empty(arena);
    }
    let mut child = KeyRef::Any;
    for &b in bytes.iter().rev() {
        let id = arena.alloc(Anchor::NONE);
        arena.insert(id, ByteRange::single(b), child);
        child = KeyRef::Node(id);
    }
    if let KeyRef::Node(head) = child {
        arena.node_mut(head).anchor = Anchor::BOTH;
    }
    child
}

/// A single node with one edge per input range, each leading to the
/// sentinel. Ranges must be sorted ascending and pairwise disjoint (the AST
/// collaborator guarantees this for character classes).
///
/// A class wider than [`MAX_WIDTH`] ranges degrades to the sentinel rather
/// than building a combinatorially expensive key (wide Unicode negations are
/// the usual culprit). A class with no ranges builds the empty key, which is
/// exactly right for the no-match expression.
pub(crate) fn class(arena: &mut Arena, ranges: &[ByteRange]) -> KeyRef {
    if ranges.len() > MAX_WIDTH {
        return any();
    }
    let id = arena.alloc(Anchor::BOTH);
    for &r in ranges {
        arena.insert(id, r, KeyRef::Any);
    }
    KeyRef::Node(id)
}
