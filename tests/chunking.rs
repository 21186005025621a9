//! Fixed-boundary message chunking.

use outreach_bot::constants::CHUNK_SIZE;
use outreach_bot::util::chunk_text;

#[test]
fn chunk_count_is_ceil_of_length_over_boundary() {
    for len in [1, CHUNK_SIZE - 1, CHUNK_SIZE, CHUNK_SIZE + 1, 3 * CHUNK_SIZE + 7] {
        let text = "x".repeat(len);
        let chunks = chunk_text(&text, CHUNK_SIZE);
        assert_eq!(chunks.len(), len.div_ceil(CHUNK_SIZE), "len {len}");
    }
}

#[test]
fn concatenation_reproduces_the_input_exactly() {
    let text: String = (0..5000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let chunks = chunk_text(&text, CHUNK_SIZE);
    assert_eq!(chunks.concat(), text);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= CHUNK_SIZE);
    }
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(chunk_text("", CHUNK_SIZE).is_empty());
}

#[test]
fn split_counts_characters_not_bytes() {
    // Multibyte characters must not be split mid-codepoint.
    let text = "é".repeat(10);
    let chunks = chunk_text(&text, 3);
    assert_eq!(chunks.len(), 4);
    assert_eq!(chunks.concat(), text);
    assert_eq!(chunks[0].chars().count(), 3);
}
