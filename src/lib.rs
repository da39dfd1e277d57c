//! # tokcoll
//!
//! Generic collections packed into a single separator-delimited text buffer.
//!
//! ## What is a token collection?
//!
//! Instead of an array of boxed values, a [`Collection<T>`] stores its
//! elements as text fields joined by one separator character:
//!
//! ```text
//! 10|20|30
//! ```
//!
//! Every positional operation (get, set, remove, find) is answered by offset
//! arithmetic over the separator occurrences in that one buffer. A
//! [`Matrix<T>`] layers fixed 2-D addressing on top of a collection and a
//! [`TokenMap<K, V>`] pairs two collections into a key/value map.
//!
//! ## Key Features
//!
//! - **Flat storage**: one `String` per container, no per-element allocation
//! - **Caller-supplied codecs**: each call passes the [`Codec`] that turns an
//!   element into text and back; nothing is registered globally
//! - **Checked access**: out-of-range positions, exhausted cursors and
//!   elements containing the separator are reported as [`Error`]s
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use tokcoll::{Collection, TextCodec};
//!
//! let mut coll: Collection<String> = Collection::new();
//! coll.add(&"10".to_string(), &TextCodec).unwrap();
//! coll.add(&"20".to_string(), &TextCodec).unwrap();
//! coll.add(&"30".to_string(), &TextCodec).unwrap();
//! assert_eq!(coll.as_text(), "10|20|30");
//! assert_eq!(coll.get(1, &TextCodec).unwrap(), "20");
//!
//! coll.remove(1, &TextCodec).unwrap();
//! assert_eq!(coll.as_text(), "10|30");
//!
//! coll.set(0, &"99".to_string(), &TextCodec).unwrap();
//! assert_eq!(coll.as_text(), "99|30");
//! ```
//!
//! ### Matrices
//!
//! ```rust
//! use tokcoll::{Matrix, TextCodec};
//!
//! let mut m = Matrix::new(2, 3, &0, &TextCodec).unwrap();
//! m.set(&7, 1, 2, &TextCodec).unwrap();
//! assert_eq!(m.get(1, 2, &TextCodec).unwrap(), 7);
//! assert_eq!(m.get(0, 0, &TextCodec).unwrap(), 0);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Positional access**: O(buffer length), one scan per boundary lookup
//! - **Structural mutation**: O(buffer length), the buffer is rebuilt
//! - **Sort**: extraction and rebuild plus an O(n²) exchange sort
//!
//! These containers target small in-memory tables, not bulk data.
//!
//! ## Restrictions
//!
//! - A serialized element must be non-empty and must not contain the
//!   separator
//! - Containers are plain values with no internal locking
//! - Matrix dimensions are fixed at construction

pub mod codec;
pub mod coll;
pub mod error;
pub mod macros;
pub mod map;
pub mod matrix;
pub mod options;
pub mod tokens;

pub use codec::{codec, Codec, FnCodec, TextCodec};
pub use coll::{Collection, Iter};
pub use error::{Error, Result};
pub use map::TokenMap;
pub use matrix::Matrix;
pub use options::Separator;
pub use tokens::{Boundary, TokenBuffer};
