use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: char, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    pub fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Nodes are ordered by weight alone. Distinct nodes of equal weight are
/// unordered; the builder breaks those ties itself.
impl PartialOrd for HuffmanNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.weight().cmp(&other.weight()) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

/// A Huffman tree with at least one symbol.
///
/// A lone symbol still gets a one-bit code: `Single` behaves as a root whose
/// `0` edge leads to the leaf and whose `1` edge leads nowhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanTree {
    Single(HuffmanNode),
    Branching(HuffmanNode),
}

impl HuffmanTree {
    /// Builds the tree for `frequencies`, or `None` when the table is empty.
    ///
    /// Equal weights are broken by creation order: leaves are created in
    /// ascending code point order, and every merged node is newer than
    /// all nodes that existed before it.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut heap = frequencies
            .iter()
            .enumerate()
            .map(|(sequence, (symbol, weight))| HeapEntry {
                weight,
                sequence,
                node: HuffmanNode::leaf(symbol, weight),
            })
            .collect::<BinaryHeap<_>>();

        if heap.len() <= 1 {
            return heap.pop().map(|entry| HuffmanTree::Single(entry.node));
        }

        let mut next_sequence = heap.len();
        while heap.len() > 1 {
            if let (Some(x), Some(y)) = (heap.pop(), heap.pop()) {
                let node = HuffmanNode::merge(x.node, y.node);
                heap.push(HeapEntry {
                    weight: node.weight(),
                    sequence: next_sequence,
                    node,
                });
                next_sequence += 1;
            }
        }

        heap.pop().map(|entry| HuffmanTree::Branching(entry.node))
    }

    pub fn root(&self) -> &HuffmanNode {
        match self {
            HuffmanTree::Single(node) | HuffmanTree::Branching(node) => node,
        }
    }

    pub fn weight(&self) -> u64 {
        self.root().weight()
    }

    /// Length of the longest code in the tree.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanTree::Single(_) => 1,
            HuffmanTree::Branching(root) => root.depth(),
        }
    }
}

/// Min-heap entry: lowest weight first, then lowest sequence number.
struct HeapEntry {
    weight: u64,
    sequence: usize,
    node: HuffmanNode,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that BinaryHeap pops the smallest entry
        (other.weight, other.sequence).cmp(&(self.weight, self.sequence))
    }
}
