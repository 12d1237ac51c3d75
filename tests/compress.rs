//! End-to-end checks of the codec, including properties over random inputs.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use huffman_compressor::escape::escape_special_characters;
use huffman_compressor::{CodeTable, HuffmanError, Node, compress};

/// Greedy prefix matching against the table. Only valid for prefix-free tables.
fn decode(bits: &str, table: &CodeTable) -> Vec<u8> {
    let reverse: HashMap<&str, u8> = table.iter().map(|(&s, c)| (c.as_str(), s)).collect();
    let mut result = Vec::new();
    let mut start = 0;
    for end in 1..=bits.len() {
        if let Some(&symbol) = reverse.get(&bits[start..end]) {
            result.push(symbol);
            start = end;
        }
    }
    assert_eq!(start, bits.len(), "trailing bits do not form a codeword");
    result
}

fn assert_prefix_free(table: &CodeTable) {
    for (a, code_a) in table {
        assert!(!code_a.is_empty());
        for (b, code_b) in table {
            if a != b {
                assert!(
                    !code_b.starts_with(code_a.as_str()),
                    "{code_a} ({a}) is a prefix of {code_b} ({b})"
                );
            }
        }
    }
}

fn assert_weights_add_up(node: &Node) -> usize {
    match node {
        Node::Leaf { .. } => 1,
        Node::Internal { freq, left, right } => {
            assert_eq!(*freq, left.freq() + right.freq());
            assert_weights_add_up(left) + assert_weights_add_up(right)
        }
    }
}

fn random_inputs() -> impl Iterator<Item = Vec<u8>> {
    let mut random = StdRng::seed_from_u64(0x5eed);
    (0..200).map(move |_| {
        let alphabet = random.random_range(1..=256usize);
        let len = random.random_range(1..2000usize);
        // skewed so that some symbols dominate and others are rare
        (0..len)
            .map(|_| {
                let x: f64 = random.random();
                ((x * x * x) * alphabet as f64) as u8
            })
            .collect()
    })
}

#[test]
fn scenario_three_symbols() {
    let compressed = compress(b"aaabbc").unwrap();

    assert_eq!(compressed.code_table[&b'a'], "0");
    assert_eq!(compressed.code_table[&b'b'], "11");
    assert_eq!(compressed.code_table[&b'c'], "10");
    assert_prefix_free(&compressed.code_table);

    assert_eq!(compressed.encoded.bits, "000111110");
    assert_eq!(compressed.encoded.bits.len(), 9);
    assert_eq!(compressed.space_saved_bits(), 39);
}

#[test]
fn scenario_single_symbol() {
    let compressed = compress(b"xxx").unwrap();

    assert_eq!(compressed.code_table.len(), 1);
    assert_eq!(compressed.code_table[&b'x'], "0");
    assert_eq!(compressed.encoded.bits, "000");
    assert_eq!(compressed.space_saved_bits(), 21);
}

#[test]
fn scenario_empty_input() {
    assert!(matches!(compress(b""), Err(HuffmanError::EmptyInput)));
}

#[test]
fn scenario_two_symbols_tied() {
    let compressed = compress(b"pq").unwrap();

    let mut codes: Vec<&str> = compressed.code_table.values().map(String::as_str).collect();
    codes.sort();
    assert_eq!(codes, vec!["0", "1"]);
    assert_eq!(compressed.encoded.bits.len(), 2);
    assert_eq!(compressed.space_saved_bits(), 14);
}

#[test]
fn uniform_alphabet_saves_nothing() {
    let all: Vec<u8> = (0..=255).collect();
    let compressed = compress(&all).unwrap();

    assert!(compressed.code_table.values().all(|c| c.len() == 8));
    assert_eq!(compressed.space_saved_bits(), 0);
}

#[test]
fn escaped_input_round_trips() {
    let escaped = escape_special_characters(b"line one\nline two\r\n\ttabbed\x00");
    let compressed = compress(&escaped).unwrap();
    assert_eq!(decode(&compressed.encoded.bits, &compressed.code_table), escaped);
}

#[test]
fn random_inputs_hold_codec_properties() {
    for input in random_inputs() {
        let compressed = compress(&input).unwrap();
        let table = &compressed.code_table;

        assert_prefix_free(table);
        assert_eq!(table.len(), compressed.frequencies.len());
        assert_eq!(compressed.tree.leaf_count(), compressed.frequencies.len());
        assert_eq!(
            assert_weights_add_up(compressed.tree.root()),
            compressed.frequencies.len()
        );
        assert_eq!(compressed.tree.weight(), input.len() as u64);

        let weighted: u64 = compressed
            .frequencies
            .iter()
            .map(|(s, &f)| f * table[s].len() as u64)
            .sum();
        assert_eq!(compressed.encoded.bits_after, weighted);
        assert_eq!(
            compressed.space_saved_bits(),
            8 * input.len() as i64 - weighted as i64
        );

        assert_eq!(decode(&compressed.encoded.bits, table), input);
    }
}

#[test]
fn compression_is_deterministic() {
    for input in random_inputs().take(20) {
        let first = compress(&input).unwrap();
        let second = compress(&input).unwrap();
        assert_eq!(first.code_table, second.code_table);
        assert_eq!(first.encoded, second.encoded);
        assert_eq!(first.tree, second.tree);
    }
}
