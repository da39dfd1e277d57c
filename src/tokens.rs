//! Field-level primitives over a separator-delimited text buffer.
//!
//! A token buffer packs any number of fields into one `String`, joined by a
//! single separator character:
//!
//! ```text
//! 10|20|30
//! ^  ^  ^
//! 0  1  2   field index
//!   ^  ^
//!   1  2    separator occurrence (1-based)
//! ```
//!
//! Every positional operation is answered with offset arithmetic on the
//! separator occurrences, never by splitting into an array. The free
//! functions here work on a borrowed `(&str, char)` pair; [`TokenBuffer`]
//! owns the text and its [`Separator`] and exposes the same operations with
//! range checking.
//!
//! ## Buffer invariants
//!
//! - the text never starts or ends with the separator
//! - no two separators are adjacent (no empty field)
//! - no field contains the separator
//!
//! Offsets are byte offsets. Separator occurrences always sit on a char
//! boundary, so every slice taken between two of them is valid UTF-8.
//!
//! ## Examples
//!
//! ```rust
//! use tokcoll::tokens;
//!
//! let mut buf = String::new();
//! tokens::append_field(&mut buf, '|', "10");
//! tokens::append_field(&mut buf, '|', "20");
//! tokens::append_field(&mut buf, '|', "30");
//!
//! assert_eq!(buf, "10|20|30");
//! assert_eq!(tokens::field_count(&buf, '|'), 3);
//! assert_eq!(tokens::field_at(&buf, '|', 1).unwrap(), "20");
//! assert_eq!(tokens::find_field(&buf, '|', "30"), Some(2));
//! ```

use crate::{Error, Result, Separator};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Result of looking up the n-th separator occurrence in a buffer.
///
/// `BeforeStart` carries two meanings: it is returned for `n == 0` and also
/// whenever the buffer holds no separator at all, whatever `n` is. Callers
/// that resolve the end of a field must handle the second case themselves
/// (see [`field_at`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Virtual position just before offset 0.
    BeforeStart,
    /// Byte offset of the requested separator occurrence.
    At(usize),
    /// `n` exceeds the number of occurrences; holds the buffer length.
    End(usize),
}

impl Boundary {
    /// Signed offset of this boundary, with `BeforeStart` as `-1`.
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Boundary::BeforeStart => -1,
            Boundary::At(offset) | Boundary::End(offset) => offset as isize,
        }
    }
}

/// Number of fields in `buf`: zero for an empty buffer, otherwise one more
/// than the number of separators.
#[must_use]
pub fn field_count(buf: &str, sep: char) -> usize {
    if buf.is_empty() {
        0
    } else {
        buf.matches(sep).count() + 1
    }
}

/// Appends `field` as the new last field of `buf`.
///
/// The field is not validated; use [`check_field`] or [`TokenBuffer::push`]
/// when the text comes from untrusted input.
pub fn append_field(buf: &mut String, sep: char, field: &str) {
    if !buf.is_empty() {
        buf.push(sep);
    }
    buf.push_str(field);
}

/// Locates the `n`-th occurrence (1-based) of `sep` in `buf`.
///
/// # Examples
///
/// ```rust
/// use tokcoll::tokens::{nth_separator_position, Boundary};
///
/// assert_eq!(nth_separator_position("10|20|30", '|', 2), Boundary::At(5));
/// assert_eq!(nth_separator_position("10|20|30", '|', 3), Boundary::End(8));
/// assert_eq!(nth_separator_position("10|20|30", '|', 0), Boundary::BeforeStart);
/// // No separator at all collapses to the same sentinel as n == 0.
/// assert_eq!(nth_separator_position("10", '|', 1), Boundary::BeforeStart);
/// ```
#[must_use]
pub fn nth_separator_position(buf: &str, sep: char, n: usize) -> Boundary {
    let mut count = 0;
    for (offset, c) in buf.char_indices() {
        if c == sep {
            count += 1;
            if count == n {
                trace!(n, offset, "separator found");
                return Boundary::At(offset);
            }
        }
    }

    let boundary = if count == 0 || n == 0 {
        Boundary::BeforeStart
    } else {
        Boundary::End(buf.len())
    };
    trace!(n, count, ?boundary, "separator not found");
    boundary
}

/// Byte offset where field `i` starts. Requires `i < field_count`.
fn field_start(buf: &str, sep: char, i: usize) -> usize {
    match nth_separator_position(buf, sep, i) {
        Boundary::BeforeStart => 0,
        Boundary::At(offset) => offset + sep.len_utf8(),
        Boundary::End(len) => len,
    }
}

/// Byte offset one past the end of field `i`. Requires `i < field_count`.
///
/// A `BeforeStart` answer for occurrence `i + 1` can only mean the buffer
/// holds a single separator-free field, which ends at the buffer end.
fn field_end(buf: &str, sep: char, i: usize) -> usize {
    match nth_separator_position(buf, sep, i + 1) {
        Boundary::At(offset) => offset,
        Boundary::End(len) => len,
        Boundary::BeforeStart => buf.len(),
    }
}

fn check_index(buf: &str, sep: char, i: usize) -> Result<usize> {
    let size = field_count(buf, sep);
    if i < size {
        Ok(size)
    } else {
        Err(Error::index_out_of_range(i, size))
    }
}

/// Returns the text of field `i`: everything strictly between the separator
/// before it (or the buffer start) and the separator after it (or the
/// buffer end).
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] if `i >= field_count(buf, sep)`.
pub fn field_at(buf: &str, sep: char, i: usize) -> Result<&str> {
    check_index(buf, sep, i)?;
    let start = field_start(buf, sep, i);
    let end = field_end(buf, sep, i);
    Ok(&buf[start..end])
}

/// Replaces field `i` with `new_field`.
///
/// The buffer is split into the prefix before the separator that opens
/// field `i` and the suffix starting at the separator that closes it, then
/// reassembled around the new text.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] if `i >= field_count(buf, sep)`.
pub fn replace_field_at(buf: &mut String, sep: char, i: usize, new_field: &str) -> Result<()> {
    check_index(buf, sep, i)?;

    let prefix_end = match nth_separator_position(buf, sep, i) {
        Boundary::At(offset) => offset,
        Boundary::BeforeStart | Boundary::End(_) => 0,
    };
    let suffix_start = field_end(buf, sep, i);
    trace!(i, prefix_end, suffix_start, "replace field");

    let mut out = String::with_capacity(buf.len() + new_field.len());
    out.push_str(&buf[..prefix_end]);
    if i > 0 {
        out.push(sep);
    }
    out.push_str(new_field);
    out.push_str(&buf[suffix_start..]);
    *buf = out;
    Ok(())
}

/// Removes field `i` together with exactly one adjacent separator.
///
/// The buffer is wrapped as `sep + buf + sep` so field 0 and the last field
/// have a separator on both sides like any interior field. The separator
/// opening field `i` is deleted, then the field text up to the next
/// separator, and finally the two synthetic separators are stripped.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] if `i >= field_count(buf, sep)`.
pub fn remove_field_at(buf: &mut String, sep: char, i: usize) -> Result<()> {
    let size = check_index(buf, sep, i)?;

    let mut wrapped = String::with_capacity(buf.len() + 2 * sep.len_utf8());
    wrapped.push(sep);
    wrapped.push_str(buf);
    wrapped.push(sep);

    // The wrapped buffer holds size + 1 separators, so occurrence i + 1 exists.
    let Boundary::At(opening) = nth_separator_position(&wrapped, sep, i + 1) else {
        return Err(Error::index_out_of_range(i, size));
    };
    trace!(i, opening, "remove field");

    wrapped.remove(opening);
    let closing = wrapped[opening..]
        .find(sep)
        .map_or(wrapped.len(), |rel| opening + rel);
    wrapped.drain(opening..closing);

    wrapped.remove(0);
    wrapped.pop();
    *buf = wrapped;
    Ok(())
}

/// Index of the first field whose text is exactly `target`.
///
/// Searching the wrapped buffer for `sep + target + sep` keeps a field from
/// matching inside a longer neighbour (`"0"` never matches `"10"`).
///
/// # Examples
///
/// ```rust
/// use tokcoll::tokens::find_field;
///
/// assert_eq!(find_field("10|0|100", '|', "0"), Some(1));
/// assert_eq!(find_field("10|100", '|', "0"), None);
/// ```
#[must_use]
pub fn find_field(buf: &str, sep: char, target: &str) -> Option<usize> {
    if buf.is_empty() || target.contains(sep) {
        return None;
    }

    let wrapped = format!("{sep}{buf}{sep}");
    let needle = format!("{sep}{target}{sep}");
    let p = wrapped.find(&needle)?;
    // Separators strictly before p: the synthetic leading one plus one per
    // preceding field.
    Some(wrapped[..p].matches(sep).count())
}

/// Builds a buffer of `n` single-space placeholder fields.
#[must_use]
pub fn blank_buffer(n: usize, sep: char) -> String {
    let mut buf = String::with_capacity(n * (1 + sep.len_utf8()));
    for _ in 0..n {
        append_field(&mut buf, sep, " ");
    }
    buf
}

/// Validates that `field` can be stored under `sep`.
///
/// # Errors
///
/// Returns [`Error::MalformedElement`] if the field is empty or contains the
/// separator.
pub fn check_field(field: &str, sep: char) -> Result<()> {
    if field.is_empty() || field.contains(sep) {
        Err(Error::malformed_element(field, sep))
    } else {
        Ok(())
    }
}

/// An owned token buffer bound to one [`Separator`].
///
/// # Examples
///
/// ```rust
/// use tokcoll::{Separator, TokenBuffer};
///
/// let mut buf = TokenBuffer::with_separator(Separator::Pipe);
/// buf.push("10").unwrap();
/// buf.push("20").unwrap();
/// buf.push("30").unwrap();
///
/// buf.remove(1).unwrap();
/// assert_eq!(buf.as_str(), "10|30");
///
/// buf.set(0, "99").unwrap();
/// assert_eq!(buf.as_str(), "99|30");
/// assert_eq!(buf.position("30"), Some(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TokenBufferRaw")]
pub struct TokenBuffer {
    text: String,
    separator: Separator,
}

/// Unchecked wire form of a [`TokenBuffer`].
#[derive(Deserialize)]
struct TokenBufferRaw {
    text: String,
    separator: Separator,
}

impl TryFrom<TokenBufferRaw> for TokenBuffer {
    type Error = Error;

    fn try_from(raw: TokenBufferRaw) -> Result<Self> {
        check_buffer(&raw.text, raw.separator.as_char())?;
        Ok(TokenBuffer {
            text: raw.text,
            separator: raw.separator,
        })
    }
}

/// Rejects text with a leading, trailing or doubled separator.
fn check_buffer(text: &str, sep: char) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    if text.split(sep).any(str::is_empty) {
        return Err(Error::invalid_snapshot(format!(
            "buffer {text:?} has an empty field under separator {sep:?}"
        )));
    }
    Ok(())
}

impl TokenBuffer {
    /// Creates an empty buffer with the default separator (`|`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_separator(separator: impl Into<Separator>) -> Self {
        TokenBuffer {
            text: String::new(),
            separator: separator.into(),
        }
    }

    /// Creates a buffer of `n` blank (`" "`) placeholder fields.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::TokenBuffer;
    ///
    /// let buf = TokenBuffer::blank(3, '|');
    /// assert_eq!(buf.as_str(), " | | ");
    /// assert_eq!(buf.len(), 3);
    /// ```
    #[must_use]
    pub fn blank(n: usize, separator: impl Into<Separator>) -> Self {
        let separator = separator.into();
        TokenBuffer {
            text: blank_buffer(n, separator.as_char()),
            separator,
        }
    }

    /// Builds a buffer from a sequence of field texts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedElement`] for the first field that is empty
    /// or contains the separator.
    pub fn from_fields<I, S>(separator: impl Into<Separator>, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buf = Self::with_separator(separator);
        for field in fields {
            buf.push(field.as_ref())?;
        }
        Ok(buf)
    }

    #[must_use]
    pub fn separator(&self) -> Separator {
        self.separator
    }

    #[inline]
    fn sep(&self) -> char {
        self.separator.as_char()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        field_count(&self.text, self.sep())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends a field and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedElement`] if the field is empty or contains
    /// the separator; the buffer is left untouched.
    pub fn push(&mut self, field: &str) -> Result<usize> {
        let sep = self.sep();
        check_field(field, sep)?;
        append_field(&mut self.text, sep, field);
        Ok(self.len() - 1)
    }

    /// Returns the text of field `i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `i >= self.len()`.
    pub fn get(&self, i: usize) -> Result<&str> {
        field_at(&self.text, self.sep(), i)
    }

    /// Replaces field `i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] for a bad index and
    /// [`Error::MalformedElement`] for a field that cannot be stored.
    pub fn set(&mut self, i: usize, field: &str) -> Result<()> {
        check_field(field, self.sep())?;
        let sep = self.sep();
        replace_field_at(&mut self.text, sep, i, field)
    }

    /// Removes field `i` and returns its text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `i >= self.len()`.
    pub fn remove(&mut self, i: usize) -> Result<String> {
        let removed = self.get(i)?.to_string();
        let sep = self.sep();
        remove_field_at(&mut self.text, sep, i)?;
        Ok(removed)
    }

    /// Index of the first field whose text equals `target`.
    #[must_use]
    pub fn position(&self, target: &str) -> Option<usize> {
        find_field(&self.text, self.sep(), target)
    }

    /// Raw boundary lookup, see [`nth_separator_position`].
    #[must_use]
    pub fn nth_separator(&self, n: usize) -> Boundary {
        nth_separator_position(&self.text, self.sep(), n)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Iterates over the field texts in order.
    pub fn fields(&self) -> Fields<'_> {
        Fields {
            inner: (!self.text.is_empty()).then(|| self.text.split(self.sep())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for TokenBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Iterator over the fields of a [`TokenBuffer`].
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    inner: Option<std::str::Split<'a, char>>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }
}
