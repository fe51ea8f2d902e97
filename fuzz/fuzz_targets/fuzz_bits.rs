#![no_main]

use libfuzzer_sys::fuzz_target;
use tagdb::utils::bits::{decode_word, set_bit};

fuzz_target!(|input: (u64, Vec<u16>)| {
    let (word, positions) = input;

    // Decoding yields every set bit once, ascending
    let mut offsets = Vec::new();
    decode_word(word, &mut offsets);
    assert_eq!(offsets.len(), word.count_ones() as usize);
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(offsets.iter().fold(0u64, |acc, &b| acc | (1 << b)), word);

    // Setting bits grows to exactly the highest word touched
    let mut words = Vec::new();
    for &p in &positions {
        set_bit(&mut words, p as usize);
    }
    let expected_len = positions.iter().map(|&p| p as usize / 64 + 1).max().unwrap_or(0);
    assert_eq!(words.len(), expected_len);
});
