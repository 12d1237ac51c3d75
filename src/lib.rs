//! Huffman coding of byte streams.
//!
//! [`compress`] runs the whole pipeline: count symbol frequencies, build the
//! tree, derive the code table and encode the input. Each stage is also
//! available on its own.
//!
//! ```
//! let compressed = huffman_compressor::compress(b"aaabbc")?;
//! assert_eq!(compressed.encoded.bits.len(), 9);
//! assert_eq!(compressed.space_saved_bits(), 39);
//! # Ok::<(), huffman_compressor::HuffmanError>(())
//! ```

pub mod codec;
pub mod error;
pub mod escape;
pub mod frequency;
pub mod huffman;

pub use codec::{Compressed, EncodedOutput, compress, encode};
pub use error::HuffmanError;
pub use frequency::{FreqTable, Symbol, count_frequencies, entropy_from_freq};
pub use huffman::{CodeTable, HuffmanTree, Node, build_code_table, build_huffman_tree};
