//! Element codecs: how a value becomes a field and back.
//!
//! Containers never store a codec. Every operation that reads or writes an
//! element takes one as an argument, so the same buffer can be viewed
//! through different codecs at different call sites.
//!
//! - [`TextCodec`]: uses `Display` to write and `FromStr` to read
//! - [`FnCodec`]: a pair of closures, built with [`codec`]
//!
//! ## Examples
//!
//! ```rust
//! use tokcoll::{codec, Codec, Error};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let points = codec(
//!     |p: &Point| format!("{}:{}", p.x, p.y),
//!     |s: &str| {
//!         let (x, y) = s.split_once(':').ok_or_else(|| Error::parse(s, "missing ':'"))?;
//!         Ok(Point {
//!             x: x.parse().map_err(|e| Error::parse(s, e))?,
//!             y: y.parse().map_err(|e| Error::parse(s, e))?,
//!         })
//!     },
//! );
//!
//! let p = Point { x: 1, y: -2 };
//! assert_eq!(points.to_text(&p), "1:-2");
//! assert_eq!(points.from_text("1:-2").unwrap(), p);
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Converts elements of type `T` to field text and back.
pub trait Codec<T> {
    /// Serializes `value` into the text stored in the buffer.
    fn to_text(&self, value: &T) -> String;

    /// Deserializes field text back into a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not a valid encoding of `T`.
    fn from_text(&self, text: &str) -> Result<T>;
}

/// Codec for any type that is `Display` + `FromStr`.
///
/// # Examples
///
/// ```rust
/// use tokcoll::{Codec, TextCodec};
///
/// assert_eq!(Codec::<i64>::to_text(&TextCodec, &-7), "-7");
/// assert_eq!(Codec::<f64>::from_text(&TextCodec, "2.5").unwrap(), 2.5);
/// assert!(Codec::<u8>::from_text(&TextCodec, "300").is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextCodec;

impl<T> Codec<T> for TextCodec
where
    T: fmt::Display + FromStr,
    T::Err: fmt::Display,
{
    fn to_text(&self, value: &T) -> String {
        value.to_string()
    }

    fn from_text(&self, text: &str) -> Result<T> {
        text.parse().map_err(|e| Error::parse(text, e))
    }
}

/// Codec assembled from a serializer and a deserializer closure.
#[derive(Clone, Copy)]
pub struct FnCodec<S, D> {
    to: S,
    from: D,
}

impl<S, D> fmt::Debug for FnCodec<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodec").finish_non_exhaustive()
    }
}

impl<T, S, D> Codec<T> for FnCodec<S, D>
where
    S: Fn(&T) -> String,
    D: Fn(&str) -> Result<T>,
{
    fn to_text(&self, value: &T) -> String {
        (self.to)(value)
    }

    fn from_text(&self, text: &str) -> Result<T> {
        (self.from)(text)
    }
}

/// Builds a [`FnCodec`] from a `to_text` and a `from_text` closure.
pub fn codec<T, S, D>(to: S, from: D) -> FnCodec<S, D>
where
    S: Fn(&T) -> String,
    D: Fn(&str) -> Result<T>,
{
    FnCodec { to, from }
}
