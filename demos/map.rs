//! Counting words with a map kept in two token buffers.
//!
//! Run with: cargo run --example map

use std::error::Error;
use tokcoll::{TextCodec, TokenMap};

fn main() -> Result<(), Box<dyn Error>> {
    let text = "the quick fox and the lazy dog and the cat";

    let mut counts: TokenMap<String, u32> = TokenMap::new();
    for word in text.split_whitespace() {
        let key = word.to_string();
        let seen = counts.discover(&key, 0, &TextCodec, &TextCodec)?;
        counts.put(&key, &(seen + 1), &TextCodec, &TextCodec)?;
    }

    counts.sort_by_values(|a, b| b.cmp(a), &TextCodec, &TextCodec)?;
    println!("Keys:   {}", counts.keys());
    println!("Values: {}", counts.values());

    while counts.has_next() {
        let word = counts.next_key(&TextCodec)?;
        let n = counts.next_value(&TextCodec)?;
        println!("{:>6} {}", word, n);
    }

    Ok(())
}
