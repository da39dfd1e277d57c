//! Fixed-size row-major matrix over a token collection.
//!
//! A [`Matrix<T>`] with `rows x cols` cells is one [`Collection<T>`] of
//! exactly `rows * cols` elements. Cell `(row, col)` lives at linear index
//! `row * cols + col`. Dimensions are fixed at construction; nothing ever
//! inserts into or removes from the underlying collection.
//!
//! Coordinates are not range-checked against `rows` and `cols`. A column
//! past `cols` addresses a cell of a later row, and a linear index past the
//! last cell is reported by the collection as
//! [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange).
//!
//! ## Examples
//!
//! ```rust
//! use tokcoll::{Matrix, TextCodec};
//!
//! let mut m = Matrix::new(2, 3, &0, &TextCodec).unwrap();
//! m.set(&7, 1, 2, &TextCodec).unwrap();
//!
//! assert_eq!(m.index(1, 2), 5);
//! assert_eq!(m.get(1, 2, &TextCodec).unwrap(), 7);
//! assert_eq!(m.as_text(), "0|0|0|0|0|7");
//! ```

use crate::{Codec, Collection, Error, Result, Separator};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A `rows x cols` matrix stored row-major in a token buffer.
#[derive(Serialize, Deserialize)]
#[serde(try_from = "MatrixRaw<T>", bound = "")]
pub struct Matrix<T> {
    cells: Collection<T>,
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
#[serde(bound = "")]
struct MatrixRaw<T> {
    cells: Collection<T>,
    rows: usize,
    cols: usize,
}

impl<T> TryFrom<MatrixRaw<T>> for Matrix<T> {
    type Error = Error;

    fn try_from(raw: MatrixRaw<T>) -> Result<Self> {
        let expected = cell_count(raw.rows, raw.cols)?;
        if raw.cells.len() != expected {
            return Err(Error::invalid_snapshot(format!(
                "{} x {} matrix holds {} cells",
                raw.rows,
                raw.cols,
                raw.cells.len()
            )));
        }
        Ok(Matrix {
            cells: raw.cells,
            rows: raw.rows,
            cols: raw.cols,
        })
    }
}

fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| Error::dimension_overflow(rows, cols))
}

impl<T> Matrix<T> {
    /// Creates a matrix with every cell set to `default`, using the default
    /// separator (`|`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedElement`](crate::Error::MalformedElement)
    /// if `default` cannot be stored.
    pub fn new<C: Codec<T>>(rows: usize, cols: usize, default: &T, codec: &C) -> Result<Self> {
        Self::with_separator(rows, cols, default, Separator::default(), codec)
    }

    /// Creates a matrix with every cell set to `default`, using `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionOverflow`](crate::Error::DimensionOverflow)
    /// if `rows * cols` does not fit in `usize`, or
    /// [`Error::MalformedElement`](crate::Error::MalformedElement) if
    /// `default` cannot be stored.
    pub fn with_separator<C: Codec<T>>(
        rows: usize,
        cols: usize,
        default: &T,
        separator: impl Into<Separator>,
        codec: &C,
    ) -> Result<Self> {
        let count = cell_count(rows, cols)?;
        let mut cells = Collection::with_separator(separator);
        for _ in 0..count {
            cells.add(default, codec)?;
        }
        debug!(rows, cols, "created matrix");
        Ok(Matrix { cells, rows, cols })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, `rows * cols`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major linear index of `(row, col)`.
    ///
    /// Saturates at `usize::MAX`, which is always past the last cell.
    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row.saturating_mul(self.cols).saturating_add(col)
    }

    /// Returns the value at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if
    /// the linear index is past the last cell, or the codec's error.
    pub fn get<C: Codec<T>>(&self, row: usize, col: usize, codec: &C) -> Result<T> {
        self.cells.get(self.index(row, col), codec)
    }

    /// Stores `value` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if
    /// the linear index is past the last cell, or
    /// [`Error::MalformedElement`](crate::Error::MalformedElement) if the
    /// value cannot be stored.
    pub fn set<C: Codec<T>>(&mut self, value: &T, row: usize, col: usize, codec: &C) -> Result<()> {
        let index = self.index(row, col);
        self.cells.set(index, value, codec)
    }

    /// The raw backing buffer, cells in row-major order.
    #[must_use]
    pub fn as_text(&self) -> &str {
        self.cells.as_text()
    }
}

impl<T> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Matrix {
            cells: self.cells.clone(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }
}

impl<T> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("cells", &self.cells)
            .finish()
    }
}

impl<T> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}
