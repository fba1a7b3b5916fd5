//! Debug rendering of keys: an indented text tree for eyeballing, and a
//! serde tree for tooling. Neither is a stable wire format.

use serde::Serialize;

use super::node::{Arena, KeyRef};
use super::IndexKey;

/// Serializable summary of a compiled key.
#[derive(Debug, Serialize)]
pub struct KeyDump {
    pub weight: u32,
    pub nodes: u64,
    pub depth: u32,
    /// Anchor flags as the same `<`/`*`/`>` string the text dump uses.
    pub anchors: String,
    /// The expanded trie; `None` when the whole key is the sentinel.
    pub tree: Option<DumpNode>,
}

#[derive(Debug, Serialize)]
pub struct DumpNode {
    pub edges: Vec<DumpEdge>,
}

#[derive(Debug, Serialize)]
pub struct DumpEdge {
    pub lo: u8,
    pub hi: u8,
    /// `None` marks a sentinel child (open for any continuation).
    pub child: Option<DumpNode>,
}

impl IndexKey {
    /// Render the key as an indented text tree: each edge as `[lo-hi] -> `
    /// with its child below, `[]` for the sentinel, and the root's anchor
    /// flags after a trailing `|`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        render(&self.arena, self.root, 0, &mut out);
        if !self.root.is_any() {
            out.push('|');
            out.push_str(&self.anchor().to_string());
        }
        out
    }

    /// The serde form of the same information, for `--json` tooling.
    pub fn to_dump(&self) -> KeyDump {
        KeyDump {
            weight: self.weight(),
            nodes: self.nodes(),
            depth: self.depth(),
            anchors: self.anchor().to_string(),
            tree: dump_node(&self.arena, self.root),
        }
    }
}

fn fmt_byte(b: u8) -> String {
    if b.is_ascii_graphic() {
        (b as char).to_string()
    } else {
        format!("\\x{b:02x}")
    }
}

fn render(arena: &Arena, key: KeyRef, indent: usize, out: &mut String) {
    match key {
        KeyRef::Any => {
            out.push_str(&" ".repeat(indent));
            out.push_str("[]\n");
        }
        KeyRef::Node(_) => {
            for e in arena.edges(key) {
                out.push_str(&" ".repeat(indent));
                out.push_str(&format!(
                    "[{}-{}] -> \n",
                    fmt_byte(e.range.lo),
                    fmt_byte(e.range.hi)
                ));
                render(arena, e.child, indent + 1, out);
            }
        }
    }
}

fn dump_node(arena: &Arena, key: KeyRef) -> Option<DumpNode> {
    match key {
        KeyRef::Any => None,
        KeyRef::Node(_) => Some(DumpNode {
            edges: arena
                .edges(key)
                .iter()
                .map(|e| DumpEdge {
                    lo: e.range.lo,
                    hi: e.range.hi,
                    child: dump_node(arena, e.child),
                })
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::walker::compile_pattern;

    #[test]
    fn test_dump_literal() {
        let key = compile_pattern("ab").unwrap();
        let dump = key.dump();
        assert_eq!(dump, "[a-a] -> \n [b-b] -> \n  []\n|<>");
    }

    #[test]
    fn test_dump_sentinel_root() {
        let key = compile_pattern(".*").unwrap();
        assert_eq!(key.dump(), "[]\n");
    }

    #[test]
    fn test_dump_nonprintable_bytes_are_escaped() {
        let key = compile_pattern("a\tb").unwrap();
        assert!(key.dump().contains("[\\x09-\\x09]"));
    }

    #[test]
    fn test_to_dump_tree_shape() {
        let key = compile_pattern("ab").unwrap();
        let dump = key.to_dump();
        assert_eq!(dump.depth, 2);
        assert_eq!(dump.anchors, "<>");
        let tree = dump.tree.expect("literal key has a tree");
        assert_eq!(tree.edges.len(), 1);
        assert_eq!(tree.edges[0].lo, b'a');
        let child = tree.edges[0].child.as_ref().expect("chain continues");
        assert!(child.edges[0].child.is_none());
    }

    #[test]
    fn test_to_dump_serializes() {
        let key = compile_pattern("hi").unwrap();
        let json = serde_json::to_string(&key.to_dump()).unwrap();
        assert!(json.contains("\"weight\""));
        assert!(json.contains("\"anchors\":\"<>\""));
    }
}
