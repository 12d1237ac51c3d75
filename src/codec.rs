use log::{debug, info};

use crate::error::{HuffmanError, Result};
use crate::frequency::{FreqTable, Symbol, count_frequencies};
use crate::huffman::{CodeTable, HuffmanTree, build_code_table, build_huffman_tree};

/// Bits a symbol occupies before encoding.
pub const BITS_PER_SYMBOL: u64 = 8;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EncodedOutput {
    /// Concatenated codewords, one '0'/'1' character per bit.
    pub bits: String,
    pub symbol_count: usize,
    pub bits_before: u64,
    pub bits_after: u64,
}

impl EncodedOutput {
    /// Negative when the codewords average more than eight bits.
    pub fn space_saved_bits(&self) -> i64 {
        self.bits_before as i64 - self.bits_after as i64
    }

    /// Packs the bits MSB first, zero padding the last byte.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.bits.len().div_ceil(8));
        for chunk in self.bits.as_bytes().chunks(8) {
            let mut byte = 0u8;
            for &bit in chunk {
                byte = (byte << 1) | u8::from(bit == b'1');
            }
            byte <<= 8 - chunk.len();
            bytes.push(byte);
        }
        bytes
    }
}

/// Substitutes every symbol with its codeword, in input order.
pub fn encode(symbols: &[Symbol], code_table: &CodeTable) -> Result<EncodedOutput> {
    debug!("Starting data encoding...");
    let mut bits = String::new();
    let mut bits_before = 0u64;
    let mut bits_after = 0u64;

    for (position, symbol) in symbols.iter().enumerate() {
        let code = code_table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol {
                symbol: *symbol,
                position,
            })?;
        bits.push_str(code);
        bits_before += BITS_PER_SYMBOL;
        bits_after += code.len() as u64;
    }

    debug!(
        "Encoded {} symbols: {} bits before, {} bits after.",
        symbols.len(),
        bits_before,
        bits_after
    );
    Ok(EncodedOutput {
        bits,
        symbol_count: symbols.len(),
        bits_before,
        bits_after,
    })
}

/// Everything one compression pass produces.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub frequencies: FreqTable,
    pub tree: HuffmanTree,
    pub code_table: CodeTable,
    pub encoded: EncodedOutput,
}

impl Compressed {
    pub fn space_saved_bits(&self) -> i64 {
        self.encoded.space_saved_bits()
    }
}

/// Counts, builds the tree, derives the table and encodes, in that order.
pub fn compress(symbols: &[Symbol]) -> Result<Compressed> {
    let frequencies = count_frequencies(symbols);
    let tree = build_huffman_tree(&frequencies)?;
    let code_table = build_code_table(&tree)?;
    let encoded = encode(symbols, &code_table)?;

    info!(
        "Compressed {} symbols into {} bits ({} bits saved).",
        encoded.symbol_count,
        encoded.bits_after,
        encoded.space_saved_bits()
    );
    Ok(Compressed {
        frequencies,
        tree,
        code_table,
        encoded,
    })
}
