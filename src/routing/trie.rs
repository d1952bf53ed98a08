//! Binary prefix trie.
//!
//! # Responsibilities
//! - Store routes on the node reached by their prefix bits
//! - Answer longest-prefix lookups with a single root-to-leaf walk
//!
//! # Design Decisions
//! - One level per address bit, most significant first
//! - Nodes own their two children; the trie is a strict tree
//! - Nodes are never removed (no route withdrawal)

use crate::addr::{mask, Prefix, MAX_PREFIX_LEN};
use crate::routing::types::{bit_at, check_prefix_len, RouteError, RouteMatch, Target};

#[derive(Debug, Default)]
pub(crate) struct Node {
    pub(crate) children: [Option<Box<Node>>; 2],
    pub(crate) target: Option<Target>,
}

/// A binary trie keyed by the bits of a 32-bit address.
#[derive(Debug)]
pub struct PrefixTrie {
    root: Node,
    routes: usize,
    nodes: usize,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTrie {
    /// Create an empty trie (root only).
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            routes: 0,
            nodes: 1,
        }
    }

    /// Insert a route, returning the target it replaced at the same prefix.
    ///
    /// Only the top `prefix_len` bits of `address` are consumed. A length of 0
    /// stores the default route on the root.
    pub fn insert(
        &mut self,
        address: u32,
        prefix_len: u8,
        target: Target,
    ) -> Result<Option<Target>, RouteError> {
        check_prefix_len(prefix_len)?;

        let mut created = 0;
        let mut node = &mut self.root;
        for depth in 0..prefix_len {
            node = node.children[bit_at(address, depth)]
                .get_or_insert_with(|| {
                    created += 1;
                    Box::default()
                })
                .as_mut();
        }

        let previous = node.target.replace(target);
        self.nodes += created;
        if previous.is_none() {
            self.routes += 1;
        }
        Ok(previous)
    }

    /// Most specific target for `address`, if any route matches.
    pub fn lookup(&self, address: u32) -> Option<Target> {
        self.longest_match(address).map(|m| m.target)
    }

    /// Most specific route for `address` along with the prefix that matched.
    pub fn longest_match(&self, address: u32) -> Option<RouteMatch> {
        let mut node = &self.root;
        let mut best = node.target.map(|t| (0, t));

        for depth in 0..MAX_PREFIX_LEN {
            match &node.children[bit_at(address, depth)] {
                Some(child) => {
                    node = child.as_ref();
                    if let Some(target) = node.target {
                        best = Some((depth + 1, target));
                    }
                }
                None => break,
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

    /// All stored routes in pre-order (shorter prefixes before the blocks they contain).
    pub fn routes(&self) -> Vec<(Prefix, Target)> {
        let mut out = Vec::with_capacity(self.routes);
        let mut stack = vec![(&self.root, 0u32, 0u8)];

        while let Some((node, bits, depth)) = stack.pop() {
            if let Some(target) = node.target {
                out.push((Prefix { address: bits, len: depth }, target));
            }
            // Push 1 before 0 so the 0 branch is visited first.
            for bit in [1u32, 0] {
                if let Some(child) = &node.children[bit as usize] {
                    stack.push((child.as_ref(), bits | (bit << (31 - u32::from(depth))), depth + 1));
                }
            }
        }
        out
    }

    /// Number of distinct routes stored.
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Number of allocated nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }
}
