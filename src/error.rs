use std::fmt;

use crate::frequency::Symbol;

/// Errors raised by the codec core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    /// The frequency table had no symbols, so there is nothing to build a tree from.
    EmptyInput,
    /// The tree breaks the strict-binary / weight-sum / unique-leaf invariant.
    MalformedTree { reason: String },
    /// A symbol in the input has no codeword in the table.
    UnknownSymbol { symbol: Symbol, position: usize },
}

impl fmt::Display for HuffmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "cannot build a huffman tree from empty input"),
            Self::MalformedTree { reason } => write!(f, "malformed huffman tree: {reason}"),
            Self::UnknownSymbol { symbol, position } => write!(
                f,
                "symbol {symbol:#04x} at position {position} has no codeword in the table"
            ),
        }
    }
}

impl std::error::Error for HuffmanError {}

pub type Result<T> = std::result::Result<T, HuffmanError>;
