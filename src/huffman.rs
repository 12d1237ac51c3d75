use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::escape::display_symbol;
use crate::frequency::{FreqTable, Symbol};

/// Codeword per symbol, as a string of '0'/'1' characters.
pub type CodeTable = BTreeMap<Symbol, String>;

/// Codeword given to the only symbol of a one-leaf tree.
pub const SINGLE_SYMBOL_CODE: &str = "0";

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Joins two roots; `left` must be the one chosen first.
    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Wraps an existing root without checking it. `build_code_table` validates.
    pub fn from_root(root: Node) -> Self {
        HuffmanTree { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn weight(&self) -> u64 {
        self.root.freq()
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }
}

/// Entry of the working collection.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed: the lowest weight
/// compares greatest, and among equal weights the lowest sequence number
/// (the node inserted first) does.
#[derive(Debug, Eq, PartialEq)]
struct HeapNode {
    freq: u64,
    seq: usize,
    node: Node,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Builds the tree by repeatedly merging the two lightest roots.
///
/// Leaves are inserted in ascending symbol order and every merged node gets the
/// next sequence number, so ties always resolve to the earliest inserted node.
/// The first node taken becomes the left child, the second the right child.
pub fn build_huffman_tree(frequencies: &FreqTable) -> Result<HuffmanTree> {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );

    let mut heap = BinaryHeap::with_capacity(frequencies.len());
    let mut seq = 0;

    for (&symbol, &freq) in frequencies {
        heap.push(HeapNode {
            freq,
            seq,
            node: Node::Leaf { symbol, freq },
        });
        seq += 1;
    }

    loop {
        let first = heap.pop().ok_or(HuffmanError::EmptyInput)?;
        let Some(second) = heap.pop() else {
            debug!("Tree construction complete. Root weight: {}", first.freq);
            return Ok(HuffmanTree { root: first.node });
        };

        trace!(
            "Merging weights {} (#{}) and {} (#{})",
            first.freq, first.seq, second.freq, second.seq
        );
        let node = Node::merge(first.node, second.node);
        heap.push(HeapNode {
            freq: node.freq(),
            seq,
            node,
        });
        seq += 1;
    }
}

/// Reads codewords off the tree: '0' for every left branch, '1' for every right.
///
/// A tree made of a single leaf has no branch to read, so its symbol gets
/// [`SINGLE_SYMBOL_CODE`].
pub fn build_code_table(tree: &HuffmanTree) -> Result<CodeTable> {
    let mut table = CodeTable::new();

    match &tree.root {
        Node::Leaf { symbol, .. } => {
            assign(&mut table, *symbol, SINGLE_SYMBOL_CODE.to_string())?;
        }
        root => walk(root, String::new(), &mut table)?,
    }

    debug!("Code table built with {} entries.", table.len());
    Ok(table)
}

fn walk(node: &Node, prefix: String, table: &mut CodeTable) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => assign(table, *symbol, prefix),
        Node::Internal { freq, left, right } => {
            let children = left.freq() + right.freq();
            if *freq != children {
                return Err(HuffmanError::MalformedTree {
                    reason: format!(
                        "internal node at '{prefix}' has weight {freq} but its children sum to {children}"
                    ),
                });
            }
            walk(left, format!("{}0", prefix), table)?;
            walk(right, format!("{}1", prefix), table)
        }
    }
}

fn assign(table: &mut CodeTable, symbol: Symbol, code: String) -> Result<()> {
    trace!(
        "Assigning code to symbol {:#04x} ('{}') : '{}'",
        symbol,
        display_symbol(symbol),
        code
    );
    if let Some(previous) = table.insert(symbol, code) {
        return Err(HuffmanError::MalformedTree {
            reason: format!(
                "symbol {:#04x} appears at more than one leaf ('{}' and '{}')",
                symbol, previous, table[&symbol]
            ),
        });
    }
    Ok(())
}
