//! Building, searching and sorting a token collection.
//!
//! Run with: cargo run --example collection

use std::error::Error;
use tokcoll::{Collection, TextCodec};

fn main() -> Result<(), Box<dyn Error>> {
    let mut coll: Collection<i32> = Collection::new();
    for n in [10, 20, 30] {
        coll.add(&n, &TextCodec)?;
    }
    println!("Buffer: {}", coll);
    println!("Element 1: {}", coll.get(1, &TextCodec)?);

    let removed = coll.remove(1, &TextCodec)?;
    println!("Removed {} -> {}", removed, coll);

    coll.set(0, &99, &TextCodec)?;
    println!("After set: {}", coll);

    for n in [5, 42, 17] {
        coll.add(&n, &TextCodec)?;
    }
    coll.sort(|a, b| a.cmp(b), &TextCodec)?;
    println!("Sorted: {}", coll);

    let found = coll.find(&42, |a, b| a.cmp(b), &TextCodec)?;
    println!("42 found at: {:?}", found);

    print!("Walk:");
    while coll.has_next() {
        print!(" {}", coll.next(&TextCodec)?);
    }
    println!();

    Ok(())
}
