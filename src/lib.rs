//! Huffman coding over an arbitrary symbol alphabet.
//!
//! The pipeline is: count symbols into a [`FrequencyTable`], build a
//! [`HuffmanTree`] from it, derive a [`CodeTable`] from the tree, encode with
//! the table and decode by walking the tree.
//!
//! ```
//! let text = "aaabb";
//! let freq = huffman::FrequencyTable::from_symbols(text.chars());
//! let tree = huffman::build_tree(&freq)?;
//! let codes = huffman::generate_codes(&tree);
//!
//! let bits = huffman::encode(text.chars(), &codes)?;
//! assert_eq!(bits.len(), 5);
//!
//! let decoded: String = huffman::decode(&bits, &tree)?.into_iter().collect();
//! assert_eq!(decoded, text);
//! # Ok::<(), huffman::Error>(())
//! ```

use bitvec::prelude::*;
use std::hash::Hash;

pub mod code;
pub mod config;
pub mod error;
pub mod frequency;
pub mod tree;

mod queue;

pub use code::CodeTable;
pub use config::Config;
pub use error::{Error, Malformation, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node};

pub fn build_tree<Symbol>(frequencies: &FrequencyTable<Symbol>) -> Result<HuffmanTree<Symbol>>
where
    Symbol: Eq + Hash + Ord + Clone,
{
    HuffmanTree::build(frequencies)
}

pub fn generate_codes<Symbol>(tree: &HuffmanTree<Symbol>) -> CodeTable<Symbol>
where
    Symbol: Eq + Hash + Clone,
{
    CodeTable::from_tree(tree)
}

pub fn encode<Symbol>(
    symbols: impl IntoIterator<Item = Symbol>,
    codes: &CodeTable<Symbol>,
) -> Result<BitVec>
where
    Symbol: Eq + Hash,
{
    codes.encode(symbols)
}

pub fn decode<Symbol>(bits: &BitSlice, tree: &HuffmanTree<Symbol>) -> Result<Vec<Symbol>>
where
    Symbol: Clone,
{
    tree.decode(bits)
}

/// A tree and the code table derived from it, for one encode/decode session.
#[derive(Debug, Clone)]
pub struct Codec<Symbol>
where
    Symbol: Eq + Hash,
{
    tree: HuffmanTree<Symbol>,
    codes: CodeTable<Symbol>,
}

impl<Symbol> Codec<Symbol>
where
    Symbol: Eq + Hash + Ord + Clone,
{
    pub fn new(tree: HuffmanTree<Symbol>) -> Self {
        let codes = CodeTable::from_tree(&tree);
        Self { tree, codes }
    }

    pub fn from_frequencies(frequencies: &FrequencyTable<Symbol>, config: Config) -> Result<Self> {
        HuffmanTree::build_with(frequencies, config).map(Self::new)
    }

    pub fn tree(&self) -> &HuffmanTree<Symbol> {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable<Symbol> {
        &self.codes
    }

    pub fn encode(&self, symbols: impl IntoIterator<Item = Symbol>) -> Result<BitVec> {
        self.codes.encode(symbols)
    }

    pub fn decode(&self, bits: &BitSlice) -> Result<Vec<Symbol>> {
        self.tree.decode(bits)
    }
}

/// Counts `symbols` and builds a [`Codec`] for them with the default config.
pub fn huffman<Symbol>(symbols: impl IntoIterator<Item = Symbol>) -> Result<Codec<Symbol>>
where
    Symbol: Eq + Hash + Ord + Clone,
{
    let freq = FrequencyTable::from_symbols(symbols);
    Codec::from_frequencies(&freq, Config::default())
}
