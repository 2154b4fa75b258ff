use serde::{Deserialize, Serialize};
use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;

use crate::error::Error;

/// Occurrence count of each distinct symbol in an input.
///
/// Iteration order is unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<Symbol, usize>",
    into = "HashMap<Symbol, usize>"
)]
#[serde(bound(
    serialize = "Symbol: Serialize + Eq + Hash + Clone",
    deserialize = "Symbol: Deserialize<'de> + Eq + Hash"
))]
pub struct FrequencyTable<Symbol>
where
    Symbol: Eq + Hash,
{
    counts: HashMap<Symbol, usize>,
}

impl<Symbol> FrequencyTable<Symbol>
where
    Symbol: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        symbols.into_iter().collect()
    }

    pub fn count(&self, symbol: &Symbol) -> usize {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, Symbol, usize> {
        self.counts.iter()
    }

    /// Adds the counts of `other`, e.g. a table built over another shard of
    /// the same input. Merging is associative and commutative.
    pub fn merge(&mut self, other: FrequencyTable<Symbol>) {
        for (s, count) in other.counts {
            *self.counts.entry(s).or_default() += count;
        }
    }

    pub(crate) fn insert(&mut self, symbol: Symbol, count: usize) {
        self.counts.insert(symbol, count);
    }
}

impl<Symbol> Default for FrequencyTable<Symbol>
where
    Symbol: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects zero counts and totals that overflow `usize`, neither of which
/// can come from counting a real input.
impl<Symbol> TryFrom<HashMap<Symbol, usize>> for FrequencyTable<Symbol>
where
    Symbol: Eq + Hash,
{
    type Error = Error;

    fn try_from(counts: HashMap<Symbol, usize>) -> Result<Self, Self::Error> {
        let mut total = 0usize;
        for &count in counts.values() {
            if count == 0 {
                return Err(Error::InvalidFrequencies("zero count"));
            }
            total = total
                .checked_add(count)
                .ok_or(Error::InvalidFrequencies("total overflows usize"))?;
        }

        Ok(Self { counts })
    }
}

impl<Symbol> From<FrequencyTable<Symbol>> for HashMap<Symbol, usize>
where
    Symbol: Eq + Hash,
{
    fn from(table: FrequencyTable<Symbol>) -> Self {
        table.counts
    }
}

impl<Symbol> Extend<Symbol> for FrequencyTable<Symbol>
where
    Symbol: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = Symbol>>(&mut self, iter: I) {
        for s in iter {
            *self.counts.entry(s).or_default() += 1;
        }
    }
}

impl<Symbol> FromIterator<Symbol> for FrequencyTable<Symbol>
where
    Symbol: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, Symbol> IntoIterator for &'a FrequencyTable<Symbol>
where
    Symbol: Eq + Hash,
{
    type Item = (&'a Symbol, &'a usize);
    type IntoIter = hash_map::Iter<'a, Symbol, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
