use serde::{Deserialize, Serialize};

/// Options fixed when a tree is built.
///
/// Only single-symbol alphabets are affected: such a tree is a lone leaf with
/// no path to describe, so its symbol is given a one bit placeholder code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bit emitted once per symbol for a single-leaf tree.
    pub placeholder_bit: bool,

    /// Reject bits other than the placeholder when decoding a single-leaf
    /// tree. When unset, every bit decodes to one repetition.
    pub strict_placeholder: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholder_bit: false,
            strict_placeholder: true,
        }
    }
}
