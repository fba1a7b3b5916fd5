//! Sequential merge: joining the keys of adjacent AST positions.

use super::node::{Anchor, Arena, KeyRef};

/// Combine the keys of two adjacent AST positions.
///
/// When `lhs` is right-anchored, `rhs` is left-anchored, and neither is the
/// sentinel or the empty key, the tracked literal continues across the
/// boundary: `rhs` is spliced onto `lhs`'s tails and the mutated `lhs` is
/// the result.
///
/// Otherwise no continuous literal can be proven. `lhs` loses its right
/// anchor, and whichever side is statistically rarer represents this
/// position — a rarer key narrows the index query more. Ties keep `lhs`.
/// When `rhs` wins it loses its left anchor, since it no longer starts where
/// `lhs` did.
///
/// `lhs` is never the sentinel here: folds over concatenation children start
/// from the empty key.
pub(crate) fn concat(arena: &mut Arena, lhs: KeyRef, rhs: KeyRef) -> KeyRef {
    debug_assert!(!lhs.is_any());
    let mut out = lhs;

    let mergeable = match (lhs, rhs) {
        (KeyRef::Node(l), KeyRef::Node(r)) => {
            arena.node(l).anchor.contains(Anchor::RIGHT)
                && arena.node(r).anchor.contains(Anchor::LEFT)
                && !arena.is_empty_node(lhs)
                && !arena.is_empty_node(rhs)
        }
        _ => false,
    };

    if mergeable {
        if let (KeyRef::Node(l), KeyRef::Node(r)) = (lhs, rhs) {
            arena.concat(l, r);
        }
    } else if let KeyRef::Node(l) = out {
        arena.node_mut(l).anchor.remove(Anchor::RIGHT);
    }

    if arena.weight(rhs) > arena.weight(out) {
        out = rhs;
        if let KeyRef::Node(r) = out {
            arena.node_mut(r).anchor.remove(Anchor::LEFT);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::build;
    use crate::key::node::ByteRange;

    /// Structural equality of two keys: same edges, same children, byte for
    /// byte. Recursion is fine here; test keys are tiny.
    fn same_shape(arena: &Arena, a: KeyRef, b: KeyRef) -> bool {
        match (a, b) {
            (KeyRef::Any, KeyRef::Any) => true,
            (KeyRef::Node(_), KeyRef::Node(_)) => {
                let ea = arena.edges(a);
                let eb = arena.edges(b);
                ea.len() == eb.len()
                    && ea.iter().zip(eb).all(|(x, y)| {
                        x.range == y.range && same_shape(arena, x.child, y.child)
                    })
            }
            _ => false,
        }
    }

    #[test]
    fn test_concat_literals_extends_chain() {
        let mut arena = Arena::new();
        let foo = build::literal(&mut arena, b"foo");
        let bar = build::literal(&mut arena, b"bar");
        let merged = concat(&mut arena, foo, bar);
        let foobar = build::literal(&mut arena, b"foobar");

        assert_eq!(merged, foo);
        assert_eq!(arena.depth(merged), arena.depth(foobar));
        assert_eq!(arena.weight(merged), arena.weight(foobar));
        assert!(same_shape(&arena, merged, foobar));
        assert!(arena.anchor(merged).contains(Anchor::BOTH));
    }

    #[test]
    fn test_concat_with_sentinel_keeps_lhs_and_drops_right_anchor() {
        let mut arena = Arena::new();
        let foo = build::literal(&mut arena, b"foo");
        let merged = concat(&mut arena, foo, KeyRef::Any);

        assert_eq!(merged, foo);
        assert!(arena.anchor(merged).contains(Anchor::LEFT));
        assert!(!arena.anchor(merged).contains(Anchor::RIGHT));
    }

    #[test]
    fn test_concat_from_empty_takes_rarer_side() {
        // The fold over concatenation children starts at the empty key; its
        // first productive child takes over, minus the left anchor.
        let mut arena = Arena::new();
        let start = build::empty(&mut arena);
        let foo = build::literal(&mut arena, b"foo");
        let merged = concat(&mut arena, start, foo);

        assert_eq!(merged, foo);
        assert!(!arena.anchor(merged).contains(Anchor::LEFT));
        assert!(arena.anchor(merged).contains(Anchor::RIGHT));
    }

    #[test]
    fn test_concat_tie_keeps_left() {
        let mut arena = Arena::new();
        // Two keys of equal weight that cannot merge: lhs is not
        // right-anchored once its anchor is stripped.
        let abc = build::literal(&mut arena, b"abc");
        if let KeyRef::Node(id) = abc {
            arena.node_mut(id).anchor.remove(Anchor::RIGHT);
        }
        let xyz = build::literal(&mut arena, b"xyz");

        let merged = concat(&mut arena, abc, xyz);
        assert_eq!(merged, abc);
    }

    #[test]
    fn test_concat_prefers_rarer_rhs() {
        let mut arena = Arena::new();
        // lhs: one-range class (weight ~9.8); rhs: a 3-byte literal. Not
        // mergeable because lhs's right anchor is stripped first.
        let cls = build::class(&mut arena, &[ByteRange::new(b'a', b'z')]);
        if let KeyRef::Node(id) = cls {
            arena.node_mut(id).anchor.remove(Anchor::RIGHT);
        }
        let lit = build::literal(&mut arena, b"foo");

        let merged = concat(&mut arena, cls, lit);
        assert_eq!(merged, lit);
        assert!(!arena.anchor(merged).contains(Anchor::LEFT));
    }

    #[test]
    fn test_concat_repeat_rhs_blocks_right_anchor() {
        let mut arena = Arena::new();
        let ab = build::literal(&mut arena, b"ab");
        let cd = build::literal(&mut arena, b"cd");
        if let KeyRef::Node(id) = cd {
            arena.node_mut(id).anchor.set(Anchor::REPEAT);
        }
        let merged = concat(&mut arena, ab, cd);

        // Chain extends but the end boundary is no longer fixed.
        assert_eq!(merged, ab);
        assert_eq!(arena.depth(merged), 4);
        assert!(!arena.anchor(merged).contains(Anchor::RIGHT));
    }
}
