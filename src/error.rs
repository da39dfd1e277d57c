//! Error types for token buffers, collections, maps and matrices.
//!
//! Every positional operation validates its index before touching the
//! buffer, so out-of-range access surfaces as an [`Error`] instead of a
//! truncated or empty field.
//!
//! ## Error Categories
//!
//! - **Index errors**: position outside `[0, size)`
//! - **Iteration errors**: `next` called on an exhausted cursor
//! - **Malformed elements**: empty serialized text, or text containing the separator
//! - **Parse errors**: a codec could not turn field text back into a value
//! - **Snapshot errors**: deserialized state that breaks a container invariant
//!
//! ## Examples
//!
//! ```rust
//! use tokcoll::{Collection, Error, TextCodec};
//!
//! let coll: Collection<i32> = Collection::new();
//! let err = coll.get(0, &TextCodec).unwrap_err();
//! assert_eq!(err, Error::index_out_of_range(0, 0));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the token engine and the
/// containers built on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Positional access outside the valid field range
    #[error("Index {index} out of range for collection of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// `next` called after the cursor reached the end
    #[error("Iterator exhausted: cursor is past the last of {size} elements")]
    IteratorExhausted { size: usize },

    /// Serialized element contains the separator character
    #[error("Malformed element {field:?}: contains separator {separator:?}")]
    MalformedElement { field: String, separator: char },

    /// Field text could not be deserialized
    #[error("Cannot parse field {text:?}: {msg}")]
    Parse { text: String, msg: String },

    /// Matrix dimensions whose cell count does not fit in `usize`
    #[error("Matrix of {rows} x {cols} cells overflows usize")]
    DimensionOverflow { rows: usize, cols: usize },

    /// Deserialized snapshot that breaks a container invariant
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an index error for `index` against a collection of `size` fields.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::Error;
    ///
    /// let err = Error::index_out_of_range(5, 3);
    /// assert!(err.to_string().contains("Index 5"));
    /// ```
    pub fn index_out_of_range(index: usize, size: usize) -> Self {
        Error::IndexOutOfRange { index, size }
    }

    pub fn iterator_exhausted(size: usize) -> Self {
        Error::IteratorExhausted { size }
    }

    /// Creates a malformed element error for a field holding the separator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::Error;
    ///
    /// let err = Error::malformed_element("a|b", '|');
    /// assert!(err.to_string().contains("a|b"));
    /// ```
    pub fn malformed_element(field: &str, separator: char) -> Self {
        Error::MalformedElement {
            field: field.to_string(),
            separator,
        }
    }

    /// Creates a parse error for field text a codec rejected.
    pub fn parse<M: fmt::Display>(text: &str, msg: M) -> Self {
        Error::Parse {
            text: text.to_string(),
            msg: msg.to_string(),
        }
    }

    pub fn dimension_overflow(rows: usize, cols: usize) -> Self {
        Error::DimensionOverflow { rows, cols }
    }

    /// Creates an error for a snapshot rejected during deserialization.
    pub fn invalid_snapshot<M: fmt::Display>(msg: M) -> Self {
        Error::InvalidSnapshot(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
