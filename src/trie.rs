//! Huffman trie construction and code derivation.

use bitvec::prelude::*;
use derivative::Derivative;
use std::collections::HashMap;
use tracing::trace;

use crate::error::Result;
use crate::freq::{FrequencyTable, ALPHABET_SIZE};
use crate::queue::MinQueue;

/// Bit sequence for one symbol, root to leaf; `0` is a left step.
pub type Code = BitBox<u8, Msb0>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn from_children(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Queue entry. Equal weights fall back to `seq`: leaves use their symbol
/// value, merged nodes count up from `ALPHABET_SIZE`.
#[derive(Debug, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    weight: u64,
    seq: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node,
}

impl Pending {
    fn new(node: Node, seq: usize) -> Self {
        Self {
            weight: node.weight(),
            seq,
            node,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie {
    root: Node,
}

impl Trie {
    /// Greedily merges the two lightest nodes until one remains.
    ///
    /// Fails with `EmptyQueue` when no symbol has a nonzero count.
    pub fn build(freq: &FrequencyTable) -> Result<Self> {
        let mut pq = MinQueue::with_capacity(ALPHABET_SIZE);
        for (symbol, weight) in freq.iter() {
            pq.insert(Pending::new(Node::Leaf { symbol, weight }, symbol as usize));
        }

        let mut seq = ALPHABET_SIZE;
        while pq.len() > 1 {
            let left = pq.extract_min()?;
            let right = pq.extract_min()?;
            pq.insert(Pending::new(Node::from_children(left.node, right.node), seq));
            seq += 1;
        }

        let root = pq.extract_min()?.node;
        trace!(weight = root.weight(), merges = seq - ALPHABET_SIZE, "built trie");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Sum of all leaf weights.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// `(symbol, weight)` for every leaf, left to right.
    pub fn leaves(&self) -> Vec<(u8, u64)> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, weight } => out.push((*symbol, *weight)),
                Node::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Derives every symbol's code with a depth-first walk.
    ///
    /// A trie that is a single leaf gets the one-bit code `0`, so each
    /// occurrence still costs a bit and the decoder can count them.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = HashMap::new();

        if let Node::Leaf { symbol, .. } = &self.root {
            codes.insert(*symbol, BitVec::<u8, Msb0>::repeat(false, 1).into_boxed_bitslice());
            return CodeTable { codes };
        }

        let mut stack: Vec<(&Node, BitVec<u8, Msb0>)> = vec![(&self.root, BitVec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, path.into_boxed_bitslice());
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((&**right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((&**left, left_path));
                }
            }
        }

        CodeTable { codes }
    }
}

/// Symbol to code mapping derived from a [`Trie`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<u8, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|c| c.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> {
        self.codes.iter().map(|(s, c)| (*s, c.as_bitslice()))
    }

    /// Number of bits needed to encode an input with these counts.
    pub fn weighted_length(&self, freq: &FrequencyTable) -> u64 {
        self.codes
            .iter()
            .map(|(s, c)| freq.get(*s) * c.len() as u64)
            .sum()
    }
}
