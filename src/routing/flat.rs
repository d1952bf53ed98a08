//! Flattened, read-only trie built at finalize time.
//!
//! Nodes are laid out in pre-order in a single `Vec`, children referenced by
//! index. Index 0 is the root and never a child, so 0 doubles as "absent".

use crate::addr::{mask, Prefix, MAX_PREFIX_LEN};
use crate::routing::trie::{Node, PrefixTrie};
use crate::routing::types::{bit_at, RouteMatch, Target};

const ABSENT: u32 = 0;

#[derive(Debug, Clone, Copy)]
struct FlatNode {
    children: [u32; 2],
    target: Option<Target>,
}

/// Contiguous node table equivalent to a [`PrefixTrie`].
#[derive(Debug)]
pub struct FlatTrie {
    nodes: Vec<FlatNode>,
}

impl FlatTrie {
    pub fn lookup(&self, address: u32) -> Option<Target> {
        self.longest_match(address).map(|m| m.target)
    }

    pub fn longest_match(&self, address: u32) -> Option<RouteMatch> {
        let mut node = &self.nodes[0];
        let mut best = node.target.map(|t| (0, t));

        for depth in 0..MAX_PREFIX_LEN {
            let next = node.children[bit_at(address, depth)];
            if next == ABSENT {
                break;
            }
            node = &self.nodes[next as usize];
            if let Some(target) = node.target {
                best = Some((depth + 1, target));
            }
        }

        best.map(|(len, target)| RouteMatch {
            prefix: Prefix {
                address: address & mask(len),
                len,
            },
            target,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl From<&PrefixTrie> for FlatTrie {
    fn from(trie: &PrefixTrie) -> Self {
        let mut nodes = Vec::with_capacity(trie.node_count());
        flatten(trie.root(), &mut nodes);
        Self { nodes }
    }
}

// Recursion depth is bounded by the 32 address bits.
fn flatten(node: &Node, nodes: &mut Vec<FlatNode>) -> u32 {
    let index = nodes.len();
    nodes.push(FlatNode {
        children: [ABSENT; 2],
        target: node.target,
    });

    for bit in 0..2 {
        if let Some(child) = &node.children[bit] {
            let child_index = flatten(child, nodes);
            nodes[index].children[bit] = child_index;
        }
    }
    index as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::parse_ipv4;

    fn ip(s: &str) -> u32 {
        parse_ipv4(s).unwrap()
    }

    #[test]
    fn test_empty_trie_flattens_to_root() {
        let flat = FlatTrie::from(&PrefixTrie::new());
        assert_eq!(flat.node_count(), 1);
        assert_eq!(flat.lookup(ip("10.0.0.1")), None);
    }

    #[test]
    fn test_flat_matches_boxed_trie() {
        let mut trie = PrefixTrie::new();
        trie.insert(ip("10.0.0.0"), 8, Target(1)).unwrap();
        trie.insert(ip("10.1.0.0"), 16, Target(2)).unwrap();
        trie.insert(ip("10.1.2.0"), 24, Target(3)).unwrap();
        trie.insert(ip("172.16.0.0"), 12, Target(4)).unwrap();
        trie.insert(0, 0, Target(9)).unwrap();

        let flat = FlatTrie::from(&trie);
        assert_eq!(flat.node_count(), trie.node_count());

        for addr in ["10.1.2.3", "10.1.9.9", "10.2.2.3", "172.31.0.1", "172.32.0.1", "8.8.8.8"] {
            assert_eq!(
                flat.longest_match(ip(addr)),
                trie.longest_match(ip(addr)),
                "mismatch for {}",
                addr
            );
        }
    }
}
