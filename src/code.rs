use bitvec::prelude::*;
use log::debug;
use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Maps each symbol of a tree to its code word: the path from the root to
/// its leaf, `0` for left and `1` for right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<Symbol>
where
    Symbol: Eq + Hash,
{
    encode_table: HashMap<Symbol, BitBox>,
}

impl<Symbol> CodeTable<Symbol>
where
    Symbol: Eq + Hash + Clone,
{
    pub fn from_tree(tree: &HuffmanTree<Symbol>) -> Self {
        fn traverse<Symbol: Eq + Hash + Clone>(
            node: &Node<Symbol>,
            v: &mut BitVec,
            enc: &mut HashMap<Symbol, BitBox>,
        ) {
            match node {
                Node::Leaf { symbol, .. } => {
                    enc.insert(symbol.clone(), v.clone().into_boxed_bitslice());
                }
                Node::Internal { left, right, .. } => {
                    v.push(false);
                    traverse(left, v, enc);
                    v.pop();

                    v.push(true);
                    traverse(right, v, enc);
                    v.pop();
                }
            }
        }

        let mut bv = BitVec::new();
        let mut enc = HashMap::new();

        // a lone leaf has an empty path, give it the placeholder instead
        if tree.root().is_leaf() {
            bv.push(tree.config().placeholder_bit);
        }
        traverse(tree.root(), &mut bv, &mut enc);

        Self { encode_table: enc }
    }
}

impl<Symbol> CodeTable<Symbol>
where
    Symbol: Eq + Hash,
{
    pub fn get(&self, symbol: &Symbol) -> Option<&BitSlice> {
        self.encode_table.get(symbol).map(|b| b.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.encode_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encode_table.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, Symbol, BitBox> {
        self.encode_table.iter()
    }

    /// Concatenates the code word of every symbol in `stream`.
    ///
    /// Fails with [`Error::UnknownSymbol`] on the first symbol the table has
    /// no code for.
    pub fn encode(&self, stream: impl IntoIterator<Item = Symbol>) -> Result<BitVec> {
        let mut out = BitVec::new();
        let mut count = 0;
        for (position, s) in stream.into_iter().enumerate() {
            let code = self
                .encode_table
                .get(&s)
                .ok_or(Error::UnknownSymbol { position })?;
            out.extend_from_bitslice(code);
            count += 1;
        }

        debug!("encoded {} symbols into {} bits", count, out.len());
        Ok(out)
    }

    /// Size in bits of encoding an input with these counts, or `None` if a
    /// counted symbol has no code.
    pub fn encoded_len(&self, frequencies: &FrequencyTable<Symbol>) -> Option<usize> {
        frequencies
            .iter()
            .map(|(s, count)| self.encode_table.get(s).map(|code| code.len() * count))
            .sum()
    }
}

impl<'a, Symbol> IntoIterator for &'a CodeTable<Symbol>
where
    Symbol: Eq + Hash,
{
    type Item = (&'a Symbol, &'a BitBox);
    type IntoIter = hash_map::Iter<'a, Symbol, BitBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
