use bitvec::prelude::*;
use log::{debug, trace, warn};
use std::hash::Hash;

use crate::config::Config;
use crate::error::{Error, Malformation, Result};
use crate::frequency::FrequencyTable;
use crate::queue::MergeQueue;

/// A node of a Huffman tree. Internal nodes own both of their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<Symbol> {
    Leaf {
        symbol: Symbol,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<Node<Symbol>>,
        right: Box<Node<Symbol>>,
    },
}

impl<Symbol> Node<Symbol> {
    fn new(symbol: Symbol, weight: usize) -> Self {
        Node::Leaf { symbol, weight }
    }

    fn from_children(left: Node<Symbol>, right: Node<Symbol>) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> usize {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A Huffman tree built from a [`FrequencyTable`].
///
/// The tree is immutable once built; it derives the [`CodeTable`] used for
/// encoding and is walked directly when decoding.
///
/// [`CodeTable`]: crate::CodeTable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<Symbol> {
    root: Node<Symbol>,
    config: Config,
}

impl<Symbol> HuffmanTree<Symbol>
where
    Symbol: Eq + Hash + Ord + Clone,
{
    pub fn build(frequencies: &FrequencyTable<Symbol>) -> Result<Self> {
        Self::build_with(frequencies, Config::default())
    }

    /// Greedily merges the two lightest nodes until one remains.
    ///
    /// Leaves are queued in ascending `(count, symbol)` order and ties between
    /// equal weights are broken first in, first out. The first node taken
    /// becomes the left child.
    pub fn build_with(frequencies: &FrequencyTable<Symbol>, config: Config) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        let mut leaves: Vec<(&Symbol, usize)> =
            frequencies.iter().map(|(s, &count)| (s, count)).collect();
        leaves.sort_unstable_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

        let mut pq = MergeQueue::with_capacity(leaves.len());
        for (s, count) in leaves {
            pq.push(count, Node::new(s.clone(), count));
        }

        let mut merges = 0usize;
        let root = loop {
            let (_, first) = pq.pop().ok_or(Error::EmptyAlphabet)?;
            let Some((_, second)) = pq.pop() else {
                break first;
            };

            let node = Node::from_children(first, second);
            trace!("merge #{merges}: weight {}", node.weight());
            merges += 1;
            pq.push(node.weight(), node);
        };

        if root.is_leaf() {
            warn!(
                "single-symbol alphabet, using placeholder bit {}",
                u8::from(config.placeholder_bit)
            );
        }
        debug!(
            "built tree: {} symbols, {} merges, weight {}, depth {}",
            frequencies.len(),
            merges,
            root.weight(),
            root.depth()
        );

        Ok(Self { root, config })
    }

    /// Recovers the frequency table the tree was built from.
    pub fn frequencies(&self) -> FrequencyTable<Symbol> {
        fn collect<Symbol: Eq + Hash + Clone>(
            node: &Node<Symbol>,
            table: &mut FrequencyTable<Symbol>,
        ) {
            match node {
                Node::Leaf { symbol, weight } => table.insert(symbol.clone(), *weight),
                Node::Internal { left, right, .. } => {
                    collect(left, table);
                    collect(right, table);
                }
            }
        }

        let mut table = FrequencyTable::new();
        collect(&self.root, &mut table);
        table
    }
}

impl<Symbol> HuffmanTree<Symbol>
where
    Symbol: Clone,
{
    /// Reconstructs the symbols encoded in `bits`.
    ///
    /// Fails with [`Error::MalformedBitSequence`] if `bits` does not end on a
    /// code word boundary.
    pub fn decode(&self, bits: &BitSlice) -> Result<Vec<Symbol>> {
        let (root_left, root_right) = match &self.root {
            Node::Leaf { symbol, .. } => return self.decode_placeholder(symbol, bits),
            Node::Internal { left, right, .. } => (left, right),
        };

        let mut out = Vec::new();
        let (mut left, mut right) = (root_left, root_right);
        let mut code_start = 0;

        for (i, bit) in bits.iter().by_vals().enumerate() {
            let next = if bit { right } else { left };
            match next.as_ref() {
                Node::Leaf { symbol, .. } => {
                    out.push(symbol.clone());
                    (left, right) = (root_left, root_right);
                    code_start = i + 1;
                }
                Node::Internal {
                    left: l, right: r, ..
                } => (left, right) = (l, r),
            }
        }

        if code_start != bits.len() {
            return Err(Error::MalformedBitSequence {
                position: code_start,
                reason: Malformation::Truncated,
            });
        }

        debug!("decoded {} bits into {} symbols", bits.len(), out.len());
        Ok(out)
    }

    fn decode_placeholder(&self, symbol: &Symbol, bits: &BitSlice) -> Result<Vec<Symbol>> {
        if self.config.strict_placeholder {
            let placeholder = self.config.placeholder_bit;
            if let Some(position) = bits.iter().by_vals().position(|b| b != placeholder) {
                return Err(Error::MalformedBitSequence {
                    position,
                    reason: Malformation::UnexpectedBit,
                });
            }
        }

        Ok(vec![symbol.clone(); bits.len()])
    }
}

impl<Symbol> HuffmanTree<Symbol> {
    pub fn root(&self) -> &Node<Symbol> {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Total weight, equal to the length of the input the tree was built for.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path. Zero for a single leaf.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn tree_of(s: &str) -> HuffmanTree<char> {
        HuffmanTree::build(&FrequencyTable::from_symbols(s.chars())).unwrap()
    }

    #[test]
    fn node_from_children() {
        let left = Node::new('a', 3);
        let right = Node::new('b', 2);

        let n = Node::from_children(left.clone(), right.clone());

        assert_eq!(n.weight(), 5);
        assert!(!n.is_leaf());
        assert_eq!(
            n,
            Node::Internal {
                weight: 5,
                left: Box::new(left),
                right: Box::new(right),
            }
        );
    }

    #[test]
    fn empty_alphabet_is_an_error() {
        let f: FrequencyTable<u8> = FrequencyTable::new();
        assert_eq!(HuffmanTree::build(&f), Err(Error::EmptyAlphabet));
    }

    #[test]
    fn two_symbols_merge_under_root() {
        let t = tree_of("aaabb");

        assert_eq!(
            t.root(),
            &Node::Internal {
                weight: 5,
                left: Box::new(Node::new('b', 2)),
                right: Box::new(Node::new('a', 3)),
            }
        );
    }

    #[test]
    fn equal_counts_order_by_symbol() {
        let t = tree_of("ba");

        assert_eq!(
            t.root(),
            &Node::Internal {
                weight: 2,
                left: Box::new(Node::new('a', 1)),
                right: Box::new(Node::new('b', 1)),
            }
        );
    }

    #[test]
    fn leaves_precede_later_merges_of_equal_weight() {
        // a:1 and b:1 merge to weight 2, queued behind c:2 and d:2
        let t = tree_of("abccdd");

        let ab = Node::from_children(Node::new('a', 1), Node::new('b', 1));
        let cd = Node::from_children(Node::new('c', 2), Node::new('d', 2));
        assert_eq!(t.root(), &Node::from_children(ab, cd));
    }

    #[test_case("a", 1, 0 ; "single")]
    #[test_case("aaabb", 2, 1 ; "pair")]
    #[test_case("abcd", 4, 2 ; "balanced")]
    #[test_case("abbccccdddddddd", 4, 3 ; "skewed")]
    fn shape(s: &str, leaves: usize, depth: usize) {
        let t = tree_of(s);

        assert_eq!(t.leaf_count(), leaves);
        assert_eq!(t.depth(), depth);
        assert_eq!(t.weight(), s.len());
    }

    #[test]
    fn frequencies_round_trip_through_leaves() {
        let f = FrequencyTable::from_symbols("this is an example text".bytes());
        let t = HuffmanTree::build(&f).unwrap();

        assert_eq!(t.frequencies(), f);
    }

    #[test]
    fn decode_walks_the_tree() {
        // b -> 0, a -> 1
        let t = tree_of("aaabb");
        let out = t.decode(bits![1, 1, 1, 0, 0]).unwrap();

        assert_eq!(out, vec!['a', 'a', 'a', 'b', 'b']);
    }

    #[test]
    fn decode_rejects_partial_code() {
        // c -> 0, a -> 10, b -> 11
        let t = tree_of("abcc");

        assert_eq!(
            t.decode(bits![1, 0, 0, 1]),
            Err(Error::MalformedBitSequence {
                position: 3,
                reason: Malformation::Truncated,
            })
        );
    }

    #[test]
    fn decode_empty_is_empty() {
        assert_eq!(tree_of("abc").decode(BitSlice::empty()), Ok(vec![]));
        assert_eq!(tree_of("a").decode(BitSlice::empty()), Ok(vec![]));
    }

    #[test]
    fn single_leaf_emits_one_symbol_per_bit() {
        let t = tree_of("aaaa");
        assert_eq!(t.decode(bits![0, 0, 0, 0]).unwrap(), vec!['a'; 4]);
    }

    #[test]
    fn single_leaf_strict_rejects_other_bit() {
        let t = tree_of("aaaa");

        assert_eq!(
            t.decode(bits![0, 0, 1]),
            Err(Error::MalformedBitSequence {
                position: 2,
                reason: Malformation::UnexpectedBit,
            })
        );
    }

    #[test]
    fn single_leaf_lenient_accepts_any_bit() {
        let config = Config {
            placeholder_bit: true,
            strict_placeholder: false,
        };
        let f = FrequencyTable::from_symbols("zz".chars());
        let t = HuffmanTree::build_with(&f, config).unwrap();

        assert_eq!(t.decode(bits![1, 0, 1]).unwrap(), vec!['z'; 3]);
    }
}
