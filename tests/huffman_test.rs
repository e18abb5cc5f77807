//! Tests for tree construction and code generation

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rstest::rstest;

use huffcode::domain::{CodeGenerator, DomainError, TreeBuilder};
use huffcode::huffman_codes;
use huffcode::util::testing;

/// Optimal weighted path length: the sum of all merge weights.
fn optimal_cost(frequencies: &[u64]) -> u128 {
    let mut heap: BinaryHeap<Reverse<u128>> = frequencies.iter().map(|&f| Reverse(f as u128)).collect();
    let mut cost = 0;
    while heap.len() > 1 {
        let Reverse(a) = heap.pop().unwrap();
        let Reverse(b) = heap.pop().unwrap();
        cost += a + b;
        heap.push(Reverse(a + b));
    }
    cost
}

fn symbols(n: usize) -> Vec<u32> {
    (0..n as u32).collect()
}

// ============================================================
// Optimality
// ============================================================

#[test]
fn given_classic_frequencies_when_coding_then_weighted_length_is_224() {
    testing::init_test_setup();
    let codes = huffman_codes(&['a', 'b', 'c', 'd', 'e', 'f'], &[5, 9, 12, 13, 16, 45]).unwrap();

    assert_eq!(codes.weighted_length(), 224);
    assert_eq!(codes.get(&'f').unwrap().len(), 1);
    assert_eq!(codes.get(&'a').unwrap().len(), 4);
}

#[rstest]
#[case(vec![1, 1])]
#[case(vec![1, 2, 3, 4, 5])]
#[case(vec![10, 10, 10, 10])]
#[case(vec![0, 0, 7, 1])]
#[case(vec![1, 1, 2, 3, 5, 8, 13, 21, 34, 55])]
#[case(vec![100, 1, 50, 3, 3, 3, 27, 9, 81, 2, 2])]
fn given_frequencies_when_coding_then_weighted_length_is_optimal(#[case] freqs: Vec<u64>) {
    let codes = huffman_codes(&symbols(freqs.len()), &freqs).unwrap();
    assert_eq!(codes.weighted_length(), optimal_cost(&freqs));
}

// ============================================================
// Structural properties
// ============================================================

#[rstest]
#[case(vec![5])]
#[case(vec![3, 3])]
#[case(vec![5, 9, 12, 13, 16, 45])]
#[case((1..=64).collect())]
#[case(vec![1; 33])]
fn given_frequencies_when_coding_then_codes_are_prefix_free(#[case] freqs: Vec<u64>) {
    let codes = huffman_codes(&symbols(freqs.len()), &freqs).unwrap();

    assert_eq!(codes.len(), freqs.len());
    assert!(codes.is_prefix_free());
    for a in &codes {
        assert!(!a.code.is_empty());
        for b in &codes {
            if a.symbol != b.symbol {
                assert!(!a.code.is_prefix_of(&b.code), "{} prefixes {}", a.code, b.code);
            }
        }
    }
}

#[test]
fn given_frequencies_when_building_then_root_frequency_is_total() {
    let freqs = [4, 8, 15, 16, 23, 42];
    let tree = TreeBuilder::new().build(&symbols(freqs.len()), &freqs).unwrap();
    assert_eq!(tree.total_frequency(), freqs.iter().sum::<u64>());
}

#[test]
fn given_duplicate_symbols_when_coding_then_each_gets_its_own_leaf() {
    let tree = TreeBuilder::new()
        .build(&['a', 'a', 'b'], &[1, 2, 3])
        .unwrap();
    assert_eq!(tree.leaf_count(), 3);

    let codes = CodeGenerator::new().generate(&tree);
    let a_codes: Vec<String> = codes
        .iter()
        .filter(|e| e.symbol == 'a')
        .map(|e| e.code.to_string())
        .collect();
    assert_eq!(a_codes.len(), 2);
    assert_ne!(a_codes[0], a_codes[1]);
}

#[test]
fn given_single_symbol_when_coding_then_code_is_single_bit() {
    let codes = huffman_codes(&['a'], &[5]).unwrap();
    assert_eq!(codes.len(), 1);
    assert_eq!(codes.get(&'a').unwrap().to_string(), "0");
}

#[test]
fn given_same_input_twice_when_coding_then_tables_are_identical() {
    let freqs = [7, 7, 7, 3, 3, 12, 1];
    let syms = symbols(freqs.len());
    assert_eq!(
        huffman_codes(&syms, &freqs).unwrap(),
        huffman_codes(&syms, &freqs).unwrap()
    );
}

#[test]
fn given_independent_inputs_when_coding_on_threads_then_results_match_sequential() {
    let inputs: Vec<Vec<u64>> = (1..8u64).map(|n| (1..=n * 5).collect()).collect();
    let expected: Vec<u128> = inputs.iter().map(|f| optimal_cost(f)).collect();

    let handles: Vec<_> = inputs
        .into_iter()
        .map(|freqs| {
            std::thread::spawn(move || {
                huffman_codes(&symbols(freqs.len()), &freqs)
                    .unwrap()
                    .weighted_length()
            })
        })
        .collect();
    let actual: Vec<u128> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(actual, expected);
}

// ============================================================
// Invalid input
// ============================================================

#[test]
fn given_empty_alphabet_when_coding_then_invalid_input() {
    let err = huffman_codes::<char>(&[], &[]).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { .. }));
}

#[rstest]
#[case(&['a', 'b'], &[1])]
#[case(&['a'], &[1, 2])]
#[case(&[], &[1])]
fn given_mismatched_lengths_when_coding_then_invalid_input(#[case] syms: &[char], #[case] freqs: &[u64]) {
    let err = huffman_codes(syms, freqs).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { .. }));
}
