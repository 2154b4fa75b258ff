use std::fmt;

/// Why a bit sequence could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformation {
    /// The input ended part way through a code word.
    Truncated,
    /// A single-symbol tree saw a bit other than its placeholder.
    UnexpectedBit,
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformation::Truncated => f.write_str("input ends mid-code"),
            Malformation::UnexpectedBit => f.write_str("unexpected bit"),
        }
    }
}

/// An error from building, encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cannot build a tree from an empty alphabet")]
    EmptyAlphabet,

    /// A frequency table from outside the crate has a zero count or counts
    /// that do not fit in `usize` when summed.
    #[error("invalid frequency table: {0}")]
    InvalidFrequencies(&'static str),

    /// `position` is the index of the offending symbol in the input.
    #[error("symbol at position {position} has no code")]
    UnknownSymbol { position: usize },

    /// `position` is the bit offset of the code word that could not be
    /// decoded.
    #[error("malformed bit sequence at bit {position}: {reason}")]
    MalformedBitSequence {
        position: usize,
        reason: Malformation,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
