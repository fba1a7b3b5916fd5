//! Bottom-up translation of a normalized regex AST into an index key.
//!
//! The walker consumes `regex-syntax`'s high-level IR, building a key per
//! node from its children's keys: literals and classes become tries,
//! concatenations fold through the sequential merge, alternations fold
//! through the union merge. The entry points then apply the selectivity
//! gate: a key too unselective to narrow an index query is reported as
//! absent, and callers fall back to scanning.

use anyhow::{Context, Result};
use regex_syntax::hir::{Class, Hir, HirKind};
use regex_syntax::ParserBuilder;

use crate::key::alternate::{alternate, AltCache};
use crate::key::build;
use crate::key::concat::concat;
use crate::key::{Anchor, Arena, ByteRange, IndexKey, KeyRef};

/// Minimum acceptable weight for an index key. Anything weaker is judged
/// not worth a pre-filter pass over the index.
pub const MIN_WEIGHT: u32 = 16;

/// Compile a pattern to a key without applying the selectivity gate.
/// Tooling entry point; most callers want [`index_pattern`].
pub fn compile_pattern(pattern: &str) -> Result<IndexKey> {
    Ok(compile_hir(&parse(pattern)?))
}

/// Compile a pattern to an index key, or `None` if the pattern carries too
/// little literal structure to be worth a pre-filter.
pub fn index_pattern(pattern: &str) -> Result<Option<IndexKey>> {
    Ok(index_hir(&parse(pattern)?))
}

/// Compile an already-parsed HIR to a key without the selectivity gate.
pub fn compile_hir(hir: &Hir) -> IndexKey {
    let mut arena = Arena::new();
    let root = walk(&mut arena, hir);
    IndexKey::new(arena, root)
}

/// Compile an already-parsed HIR, applying the selectivity gate.
pub fn index_hir(hir: &Hir) -> Option<IndexKey> {
    let key = compile_hir(hir);
    if key.weight() < MIN_WEIGHT {
        return None;
    }
    Some(key)
}

fn parse(pattern: &str) -> Result<Hir> {
    ParserBuilder::new()
        .utf8(false)
        .build()
        .parse(pattern)
        .with_context(|| format!("cannot parse regex: {pattern}"))
}

fn walk(arena: &mut Arena, hir: &Hir) -> KeyRef {
    match hir.kind() {
        // Zero-width: the empty key keeps surrounding anchoring intact
        // without claiming any bytes.
        HirKind::Empty | HirKind::Look(_) => build::empty(arena),

        HirKind::Literal(lit) => build::literal(arena, &lit.0),

        HirKind::Class(cls) => match class_ranges(cls) {
            Some(ranges) => {
                // A class admitting every byte is no constraint at all.
                if ranges.len() == 1 && ranges[0].lo == 0 && ranges[0].hi == 0xFF {
                    build::any()
                } else {
                    build::class(arena, &ranges)
                }
            }
            None => build::any(),
        },

        HirKind::Repetition(rep) => {
            if rep.min == 0 {
                // Zero repetitions are legal, so nothing is guaranteed.
                return build::any();
            }
            let sub = walk(arena, &rep.sub);
            if let KeyRef::Node(id) = sub {
                let node = arena.node_mut(id);
                if node.anchor.contains(Anchor::BOTH) {
                    node.anchor.set(Anchor::REPEAT);
                }
            }
            sub
        }

        HirKind::Capture(cap) => walk(arena, &cap.sub),

        HirKind::Concat(subs) => {
            let mut acc = build::empty(arena);
            for sub in subs {
                let child = walk(arena, sub);
                acc = concat(arena, acc, child);
            }
            acc
        }

        HirKind::Alternation(subs) => {
            // One cache and one recursion scope per alternation node.
            let mut cache = AltCache::new();
            let mut iter = subs.iter();
            let first = iter.next().expect("alternation with no branches");
            let mut acc = walk(arena, first);
            for sub in iter {
                let child = walk(arena, sub);
                acc = alternate(arena, &mut cache, acc, child);
            }
            acc
        }
    }
}

/// Lower a class to single-byte ranges. Ranges reaching past single-byte
/// values are not modeled; the class defers to the sentinel.
fn class_ranges(class: &Class) -> Option<Vec<ByteRange>> {
    match class {
        Class::Unicode(cls) => {
            let mut ranges = Vec::with_capacity(cls.ranges().len());
            for r in cls.ranges() {
                if r.end() as u32 > 0x7F {
                    return None;
                }
                ranges.push(ByteRange::new(r.start() as u8, r.end() as u8));
            }
            Some(ranges)
        }
        Class::Bytes(cls) => Some(
            cls.ranges()
                .iter()
                .map(|r| ByteRange::new(r.start(), r.end()))
                .collect(),
        ),
    }
}
