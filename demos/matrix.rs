//! A small grid stored row-major in one buffer.
//!
//! Run with: cargo run --example matrix

use std::error::Error;
use tokcoll::{Matrix, TextCodec};

fn main() -> Result<(), Box<dyn Error>> {
    let mut grid = Matrix::new(3, 4, &0, &TextCodec)?;
    grid.set(&7, 1, 2, &TextCodec)?;
    grid.set(&1, 0, 0, &TextCodec)?;
    grid.set(&9, 2, 3, &TextCodec)?;

    println!("Backing buffer: {}", grid);
    println!("(1, 2) lives at linear index {}", grid.index(1, 2));

    for row in 0..grid.rows() {
        let mut line = Vec::with_capacity(grid.cols());
        for col in 0..grid.cols() {
            line.push(grid.get(row, col, &TextCodec)?.to_string());
        }
        println!("{}", line.join(" "));
    }

    Ok(())
}
