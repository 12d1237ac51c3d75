use std::collections::BTreeMap;

use log::debug;

/// One unit of input.
pub type Symbol = u8;

/// Occurrence count per distinct symbol, ordered by symbol value.
pub type FreqTable = BTreeMap<Symbol, u64>;

pub fn count_frequencies(symbols: &[Symbol]) -> FreqTable {
    let mut freq = FreqTable::new();
    for &symbol in symbols {
        *freq.entry(symbol).or_insert(0) += 1;
    }

    debug!(
        "Counted {} symbols, {} distinct.",
        symbols.len(),
        freq.len()
    );
    freq
}

/// Shannon entropy of the table in bits/symbol. An empty table has zero entropy.
pub fn entropy_from_freq(freq: &FreqTable) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total
    );
    entropy
}
