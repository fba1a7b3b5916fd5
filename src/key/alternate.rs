//! Alternation merge: union of two keys for alternative branches of the
//! same AST position.
//!
//! The merge is a two-cursor interval sweep over each side's sorted,
//! disjoint edge lists, splitting ranges where they overlap and recursively
//! merging the children under the overlap. Shared subtrees reached through
//! multiple paths are handled by a memoization cache scoped to one
//! alternation node's reduction; a recursion bound keeps worst-case merge
//! cost finite for deeply nested alternations.

use rustc_hash::FxHashMap;

use super::node::{Anchor, Arena, ByteRange, Edge, KeyRef, NodeId, MAX_WIDTH};

/// Maximum alternation merge recursion depth before degrading to the
/// sentinel.
pub const MAX_RECURSION: usize = 10;

const TAKE_LEFT: u8 = 0b01;
const TAKE_RIGHT: u8 = 0b10;
const TAKE_BOTH: u8 = TAKE_LEFT | TAKE_RIGHT;

/// Memoized merge results, keyed by the operand pair. Node ids are stable
/// allocation ids, so the pair identifies the operands exactly. One cache
/// instance lives for the reduction of one AST alternation node and is
/// discarded afterwards.
#[derive(Debug, Default)]
pub(crate) struct AltCache {
    merged: FxHashMap<(KeyRef, KeyRef), KeyRef>,
}

impl AltCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

/// Union of two keys. See the module docs for the algorithm.
pub(crate) fn alternate(
    arena: &mut Arena,
    cache: &mut AltCache,
    lhs: KeyRef,
    rhs: KeyRef,
) -> KeyRef {
    alt(arena, cache, lhs, rhs, 0)
}

fn alt(arena: &mut Arena, cache: &mut AltCache, lhs: KeyRef, rhs: KeyRef, depth: usize) -> KeyRef {
    if let Some(&out) = cache.merged.get(&(lhs, rhs)) {
        return out;
    }
    let out = merge_keys(arena, cache, lhs, rhs, depth);
    cache.merged.insert((lhs, rhs), out);
    out
}

fn merge_keys(
    arena: &mut Arena,
    cache: &mut AltCache,
    lhs: KeyRef,
    rhs: KeyRef,
    depth: usize,
) -> KeyRef {
    // Identical operands need no merge; this is common when the same
    // subtree is shared by construction.
    if lhs == rhs {
        return lhs;
    }
    let (KeyRef::Node(l), KeyRef::Node(r)) = (lhs, rhs) else {
        // Either branch unconstrained makes the union unconstrained.
        return KeyRef::Any;
    };
    if arena.node(l).edges.len() + arena.node(r).edges.len() >= MAX_WIDTH {
        return KeyRef::Any;
    }
    if depth >= MAX_RECURSION {
        return KeyRef::Any;
    }

    // A position stays anchored only if both alternatives agree; repetition
    // taints the union if either side carries it.
    let la = arena.node(l).anchor;
    let ra = arena.node(r).anchor;
    let anchor = (la & ra) | ((la | ra) & Anchor::REPEAT);

    let ledges: Vec<Edge> = arena.node(l).edges.clone();
    let redges: Vec<Edge> = arena.node(r).edges.clone();
    let out = arena.alloc(anchor);

    let mut li = 0;
    let mut ri = 0;
    // Cursors over the current (possibly split) range on each side; only
    // read while the matching index is in bounds.
    let mut left = ledges.first().map_or(ByteRange::single(0), |e| e.range);
    let mut right = redges.first().map_or(ByteRange::single(0), |e| e.range);

    while li < ledges.len() && ri < redges.len() {
        let action = merge_step(
            arena,
            cache,
            out,
            &mut left,
            ledges[li].child,
            &mut right,
            redges[ri].child,
            depth,
        );
        if action & TAKE_LEFT != 0 {
            li += 1;
            if li < ledges.len() {
                left = ledges[li].range;
            }
        }
        if action & TAKE_RIGHT != 0 {
            ri += 1;
            if ri < redges.len() {
                right = redges[ri].range;
            }
        }
    }

    // One side is exhausted; flush the survivor's current (possibly shrunk)
    // range, then the rest of its edges unchanged.
    if li < ledges.len() {
        arena.insert(out, left, ledges[li].child);
        li += 1;
    }
    if ri < redges.len() {
        arena.insert(out, right, redges[ri].child);
        ri += 1;
    }
    for e in &ledges[li..] {
        arena.insert(out, e.range, e.child);
    }
    for e in &redges[ri..] {
        arena.insert(out, e.range, e.child);
    }

    KeyRef::Node(out)
}

/// Process one step of the sweep: emit edges for the current range pair and
/// report which side(s) were fully consumed.
#[allow(clippy::too_many_arguments)]
fn merge_step(
    arena: &mut Arena,
    cache: &mut AltCache,
    out: NodeId,
    left: &mut ByteRange,
    lnext: KeyRef,
    right: &mut ByteRange,
    rnext: KeyRef,
    depth: usize,
) -> u8 {
    if left.intersects(*right) {
        // Emit the non-overlapping prefix of whichever range starts first,
        // with its own child unmodified.
        if left.lo < right.lo {
            arena.insert(out, ByteRange::new(left.lo, right.lo - 1), lnext);
            left.lo = right.lo;
        } else if right.lo < left.lo {
            arena.insert(out, ByteRange::new(right.lo, left.lo - 1), rnext);
            right.lo = left.lo;
        }
        debug_assert_eq!(left.lo, right.lo);

        // The common sub-range leads to the union of both children.
        let end = left.hi.min(right.hi);
        let merged = alt(arena, cache, lnext, rnext, depth + 1);
        arena.insert(out, ByteRange::new(left.lo, end), merged);

        // Whichever range extends past the common end is retained, advanced
        // past it, for the next iteration.
        if left.hi > end {
            left.lo = end + 1;
            return TAKE_RIGHT;
        }
        if right.hi > end {
            right.lo = end + 1;
            return TAKE_LEFT;
        }
        return TAKE_BOTH;
    }

    // Disjoint: emit the lower range as-is and advance only that side.
    if left.lo < right.lo {
        arena.insert(out, *left, lnext);
        TAKE_LEFT
    } else {
        debug_assert!(right.lo < left.lo);
        arena.insert(out, *right, rnext);
        TAKE_RIGHT
    }
}
