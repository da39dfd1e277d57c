//! Generic collection stored as a single token buffer.
//!
//! [`Collection<T>`] keeps its elements serialized, one field per element,
//! inside a [`TokenBuffer`]. Element access deserializes on demand through a
//! caller-supplied [`Codec`], and searching or ordering uses a
//! caller-supplied comparator. Nothing is cached: the buffer text is the only
//! state besides the iteration cursor.
//!
//! ## Cost model
//!
//! Every positional operation scans the buffer, so `get`, `set` and `remove`
//! are O(buffer length). `find` deserializes each candidate. `sort` and
//! `ordered_insert` extract every element, reorder, and rewrite the buffer;
//! the sort itself is a quadratic exchange sort.
//!
//! ## Cursor
//!
//! The collection carries a forward cursor for `has_next`/`next`. It is part
//! of the value: cloning a collection clones its cursor position. `remove`,
//! `sort` and `ordered_insert` reset the cursor to 0.
//!
//! ## Examples
//!
//! ```rust
//! use tokcoll::{Collection, TextCodec};
//!
//! let mut coll: Collection<i32> = Collection::new();
//! coll.add(&30, &TextCodec).unwrap();
//! coll.add(&10, &TextCodec).unwrap();
//! coll.add(&20, &TextCodec).unwrap();
//!
//! coll.sort(|a, b| a.cmp(b), &TextCodec).unwrap();
//! assert_eq!(coll.as_text(), "10|20|30");
//!
//! let mut seen = Vec::new();
//! while coll.has_next() {
//!     seen.push(coll.next(&TextCodec).unwrap());
//! }
//! assert_eq!(seen, vec![10, 20, 30]);
//! ```

use crate::tokens::{Fields, TokenBuffer};
use crate::{Codec, Error, Result, Separator};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// A collection of `T` packed into one separator-delimited text buffer.
#[derive(Serialize, Deserialize)]
#[serde(try_from = "CollectionRaw", bound = "")]
pub struct Collection<T> {
    buffer: TokenBuffer,
    cursor: usize,
    #[serde(skip)]
    marker: PhantomData<fn() -> T>,
}

/// Unchecked wire form of a [`Collection`].
#[derive(Deserialize)]
struct CollectionRaw {
    buffer: TokenBuffer,
    cursor: usize,
}

impl<T> TryFrom<CollectionRaw> for Collection<T> {
    type Error = Error;

    fn try_from(raw: CollectionRaw) -> Result<Self> {
        let len = raw.buffer.len();
        if raw.cursor > len {
            return Err(Error::invalid_snapshot(format!(
                "cursor {} is past the end of {len} elements",
                raw.cursor
            )));
        }
        Ok(Collection {
            buffer: raw.buffer,
            cursor: raw.cursor,
            marker: PhantomData,
        })
    }
}

impl<T> Collection<T> {
    /// Creates an empty collection using the default separator (`|`).
    #[must_use]
    pub fn new() -> Self {
        Self::with_separator(Separator::default())
    }

    /// Creates an empty collection using `separator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::{Collection, Separator};
    ///
    /// let coll: Collection<String> = Collection::with_separator(',');
    /// assert_eq!(coll.separator(), Separator::Comma);
    /// assert!(coll.is_empty());
    /// ```
    #[must_use]
    pub fn with_separator(separator: impl Into<Separator>) -> Self {
        Collection {
            buffer: TokenBuffer::with_separator(separator),
            cursor: 0,
            marker: PhantomData,
        }
    }

    #[must_use]
    pub fn separator(&self) -> Separator {
        self.buffer.separator()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Current iteration cursor, in `[0, len]`.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Appends `value` and returns its index (`len() - 1`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedElement`] if the serialized value is empty
    /// or contains the separator.
    pub fn add<C: Codec<T>>(&mut self, value: &T, codec: &C) -> Result<usize> {
        self.buffer.push(&codec.to_text(value))
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`, or the codec's
    /// error if the field cannot be deserialized.
    pub fn get<C: Codec<T>>(&self, index: usize, codec: &C) -> Result<T> {
        codec.from_text(self.buffer.get(index)?)
    }

    /// Replaces the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()` and
    /// [`Error::MalformedElement`] if the serialized value cannot be stored.
    pub fn set<C: Codec<T>>(&mut self, index: usize, value: &T, codec: &C) -> Result<()> {
        self.buffer.set(index, &codec.to_text(value))
    }

    /// Removes and returns the element at `index`. Resets the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`, or the codec's
    /// error if the removed field cannot be deserialized (the buffer is left
    /// untouched in that case).
    pub fn remove<C: Codec<T>>(&mut self, index: usize, codec: &C) -> Result<T> {
        let value = self.get(index, codec)?;
        self.buffer.remove(index)?;
        self.cursor = 0;
        debug!(index, len = self.len(), "removed element");
        Ok(value)
    }

    /// Removes every element and resets the cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Index of the first element `e` with `cmp(&e, key) == Equal`.
    ///
    /// Every candidate is deserialized, so `key` may be of a different type
    /// than the elements (for example a name looked up in a list of records).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::{Collection, TextCodec};
    ///
    /// let mut coll: Collection<i32> = Collection::new();
    /// for n in [5, 12, 7] {
    ///     coll.add(&n, &TextCodec).unwrap();
    /// }
    ///
    /// // Look up by parity, a key of another type.
    /// let found = coll.find(&"even", |e, k| {
    ///     let parity = if e % 2 == 0 { "even" } else { "odd" };
    ///     parity.cmp(k)
    /// }, &TextCodec).unwrap();
    /// assert_eq!(found, Some(1));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the codec's error if a field cannot be deserialized.
    pub fn find<K, F, C>(&self, key: &K, mut cmp: F, codec: &C) -> Result<Option<usize>>
    where
        K: ?Sized,
        F: FnMut(&T, &K) -> Ordering,
        C: Codec<T>,
    {
        for (index, item) in self.iter(codec).enumerate() {
            if cmp(&item?, key) == Ordering::Equal {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Returns the stored element equal to `value`, appending `value` first
    /// if there is none.
    ///
    /// # Errors
    ///
    /// Returns the codec's error for an undecodable field and
    /// [`Error::MalformedElement`] if `value` has to be appended but cannot
    /// be stored.
    pub fn discover<F, C>(&mut self, value: T, cmp: F, codec: &C) -> Result<T>
    where
        F: FnMut(&T, &T) -> Ordering,
        C: Codec<T>,
    {
        match self.find(&value, cmp, codec)? {
            Some(index) => self.get(index, codec),
            None => {
                self.add(&value, codec)?;
                Ok(value)
            }
        }
    }

    /// Inserts `value` before the first element that compares greater than
    /// it and returns the insertion index. Resets the cursor.
    ///
    /// The collection is assumed to already be in ascending order under
    /// `cmp`; the buffer is rebuilt with the new element spliced in.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::{Collection, TextCodec};
    ///
    /// let mut coll: Collection<i32> = Collection::new();
    /// for n in [3, 1, 2] {
    ///     coll.ordered_insert(&n, |a, b| a.cmp(b), &TextCodec).unwrap();
    /// }
    /// assert_eq!(coll.as_text(), "1|2|3");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the codec's error for an undecodable field and
    /// [`Error::MalformedElement`] if any element cannot be re-serialized.
    pub fn ordered_insert<F, C>(&mut self, value: &T, mut cmp: F, codec: &C) -> Result<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
        C: Codec<T>,
    {
        let items = self.to_vec(codec)?;
        let index = items
            .iter()
            .position(|item| cmp(item, value) == Ordering::Greater)
            .unwrap_or(items.len());

        let mut texts: Vec<String> = items.iter().map(|item| codec.to_text(item)).collect();
        texts.insert(index, codec.to_text(value));
        self.rewrite(texts)?;
        debug!(index, len = self.len(), "ordered insert");
        Ok(index)
    }

    /// Sorts the elements in ascending order under `cmp`. Resets the cursor.
    ///
    /// Equal elements may end up in any relative order.
    ///
    /// # Errors
    ///
    /// Returns the codec's error for an undecodable field and
    /// [`Error::MalformedElement`] if an element cannot be re-serialized.
    /// The collection is unchanged when an error is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn sort<F, C>(&mut self, cmp: F, codec: &C) -> Result<()>
    where
        F: FnMut(&T, &T) -> Ordering,
        C: Codec<T>,
    {
        let mut items = self.to_vec(codec)?;
        exchange_sort(&mut items, cmp);
        self.rewrite(items.iter().map(|item| codec.to_text(item)))
    }

    /// `true` while the cursor points at an element.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor < self.len()
    }

    /// Returns the element under the cursor and advances it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IteratorExhausted`] when [`has_next`] is `false`,
    /// or the codec's error if the field cannot be deserialized.
    ///
    /// [`has_next`]: Collection::has_next
    pub fn next<C: Codec<T>>(&mut self, codec: &C) -> Result<T> {
        self.next_checked(codec)?
            .ok_or_else(|| Error::iterator_exhausted(self.len()))
    }

    /// Like [`next`](Collection::next), but reports the end of the
    /// collection as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the codec's error if the field cannot be deserialized; the
    /// cursor does not advance in that case.
    pub fn next_checked<C: Codec<T>>(&mut self, codec: &C) -> Result<Option<T>> {
        if !self.has_next() {
            return Ok(None);
        }
        let value = self.get(self.cursor, codec)?;
        self.cursor += 1;
        Ok(Some(value))
    }

    /// Moves the cursor back to the first element.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// The raw backing buffer, fields joined by the separator.
    #[must_use]
    pub fn as_text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Iterates over the elements without touching the cursor.
    pub fn iter<'a, C: Codec<T>>(&'a self, codec: &'a C) -> Iter<'a, T, C> {
        Iter {
            fields: self.buffer.fields(),
            codec,
            marker: PhantomData,
        }
    }

    /// Deserializes every element into a `Vec`.
    ///
    /// # Errors
    ///
    /// Returns the codec's error for the first undecodable field.
    pub fn to_vec<C: Codec<T>>(&self, codec: &C) -> Result<Vec<T>> {
        self.iter(codec).collect()
    }

    /// Exact-text lookup of an already serialized element.
    pub(crate) fn position_of_text(&self, text: &str) -> Option<usize> {
        self.buffer.position(text)
    }

    /// Replaces the whole buffer with `texts` and resets the cursor. On
    /// error the collection is unchanged.
    pub(crate) fn rewrite<I, S>(&mut self, texts: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.buffer = TokenBuffer::from_fields(self.buffer.separator(), texts)?;
        self.cursor = 0;
        Ok(())
    }
}

/// Quadratic in-place sort: repeatedly swaps adjacent out-of-order pairs.
///
/// The relative order of elements comparing `Equal` is not part of the
/// contract.
pub(crate) fn exchange_sort<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    for pass in 0..n {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if cmp(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Collection {
            buffer: self.buffer.clone(),
            cursor: self.cursor,
            marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer && self.cursor == other.cursor
    }
}

impl<T> Eq for Collection<T> {}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("buffer", &self.buffer)
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<T> fmt::Display for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Cursor-free iterator over a [`Collection`], see [`Collection::iter`].
pub struct Iter<'a, T, C> {
    fields: Fields<'a>,
    codec: &'a C,
    marker: PhantomData<fn() -> T>,
}

impl<T, C> fmt::Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("fields", &self.fields).finish()
    }
}

impl<T, C: Codec<T>> Iterator for Iter<'_, T, C> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.fields.next().map(|text| self.codec.from_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec, TextCodec};

    fn ints(values: &[i32]) -> Collection<i32> {
        let mut coll = Collection::new();
        for v in values {
            coll.add(v, &TextCodec).unwrap();
        }
        coll
    }

    #[test]
    fn test_add_returns_index() {
        let mut coll: Collection<i32> = Collection::new();
        assert_eq!(coll.add(&10, &TextCodec).unwrap(), 0);
        assert_eq!(coll.add(&20, &TextCodec).unwrap(), 1);
        assert_eq!(coll.len(), 2);
    }

    #[test]
    fn test_single_element_get() {
        let coll = ints(&[42]);
        assert_eq!(coll.get(0, &TextCodec).unwrap(), 42);
    }

    #[test]
    fn test_get_out_of_range() {
        let coll = ints(&[1, 2]);
        assert_eq!(
            coll.get(2, &TextCodec),
            Err(Error::index_out_of_range(2, 2))
        );
    }

    #[test]
    fn test_set_and_remove_out_of_range() {
        let mut coll = ints(&[1]);
        assert!(coll.set(1, &5, &TextCodec).is_err());
        assert!(coll.remove(3, &TextCodec).is_err());
        assert_eq!(coll.as_text(), "1");
    }

    #[test]
    fn test_add_rejects_separator_in_text() {
        let mut coll: Collection<String> = Collection::new();
        let err = coll.add(&"a|b".to_string(), &TextCodec).unwrap_err();
        assert_eq!(err, Error::malformed_element("a|b", '|'));
        assert!(coll.is_empty());
    }

    #[test]
    fn test_remove_resets_cursor() {
        let mut coll = ints(&[1, 2, 3]);
        coll.next(&TextCodec).unwrap();
        coll.next(&TextCodec).unwrap();
        assert_eq!(coll.cursor(), 2);

        assert_eq!(coll.remove(0, &TextCodec).unwrap(), 1);
        assert_eq!(coll.cursor(), 0);
        assert_eq!(coll.as_text(), "2|3");
    }

    #[test]
    fn test_remove_keeps_buffer_on_parse_error() {
        let mut coll: Collection<u8> = Collection::new();
        coll.rewrite(["1000"]).unwrap();
        assert!(coll.remove(0, &TextCodec).is_err());
        assert_eq!(coll.as_text(), "1000");
    }

    #[test]
    fn test_find_and_not_found() {
        let coll = ints(&[5, 7, 9]);
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(coll.find(&7, cmp, &TextCodec).unwrap(), Some(1));
        assert_eq!(coll.find(&8, cmp, &TextCodec).unwrap(), None);
    }

    #[test]
    fn test_discover_finds_or_appends() {
        let mut coll = ints(&[1, 2]);
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(coll.discover(2, cmp, &TextCodec).unwrap(), 2);
        assert_eq!(coll.len(), 2);
        assert_eq!(coll.discover(3, cmp, &TextCodec).unwrap(), 3);
        assert_eq!(coll.as_text(), "1|2|3");
    }

    #[test]
    fn test_ordered_insert_positions() {
        let mut coll = ints(&[10, 20, 30]);
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(coll.ordered_insert(&5, cmp, &TextCodec).unwrap(), 0);
        assert_eq!(coll.ordered_insert(&25, cmp, &TextCodec).unwrap(), 3);
        assert_eq!(coll.ordered_insert(&99, cmp, &TextCodec).unwrap(), 5);
        assert_eq!(coll.as_text(), "5|10|20|25|30|99");
    }

    #[test]
    fn test_ordered_insert_into_empty() {
        let mut coll: Collection<i32> = Collection::new();
        assert_eq!(coll.ordered_insert(&1, |a, b| a.cmp(b), &TextCodec).unwrap(), 0);
        assert_eq!(coll.as_text(), "1");
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let mut coll = ints(&[3, -1, 20, 3, 0]);
        coll.sort(|a, b| a.cmp(b), &TextCodec).unwrap();
        assert_eq!(coll.as_text(), "-1|0|3|3|20");

        coll.sort(|a, b| b.cmp(a), &TextCodec).unwrap();
        assert_eq!(coll.as_text(), "20|3|3|0|-1");
    }

    #[test]
    fn test_sort_resets_cursor() {
        let mut coll = ints(&[2, 1]);
        coll.next(&TextCodec).unwrap();
        coll.sort(|a, b| a.cmp(b), &TextCodec).unwrap();
        assert_eq!(coll.cursor(), 0);
    }

    #[test]
    fn test_next_exhausted() {
        let mut coll = ints(&[1]);
        assert_eq!(coll.next(&TextCodec).unwrap(), 1);
        assert!(!coll.has_next());
        assert_eq!(coll.next(&TextCodec), Err(Error::iterator_exhausted(1)));
        assert_eq!(coll.next_checked(&TextCodec).unwrap(), None);

        coll.reset();
        assert_eq!(coll.next_checked(&TextCodec).unwrap(), Some(1));
    }

    #[test]
    fn test_clone_copies_cursor() {
        let mut coll = ints(&[1, 2, 3]);
        coll.next(&TextCodec).unwrap();

        let mut copy = coll.clone();
        assert_eq!(copy.next(&TextCodec).unwrap(), 2);
        assert_eq!(coll.cursor(), 1);
    }

    #[test]
    fn test_iter_leaves_cursor() {
        let coll = ints(&[4, 5, 6]);
        let items: Vec<i32> = coll.iter(&TextCodec).collect::<Result<_>>().unwrap();
        assert_eq!(items, vec![4, 5, 6]);
        assert_eq!(coll.cursor(), 0);
    }

    #[test]
    fn test_custom_codec_with_records() {
        let pairs = codec(
            |p: &(String, u32)| format!("{}={}", p.0, p.1),
            |s: &str| {
                let (name, age) = s.split_once('=').ok_or_else(|| Error::parse(s, "missing '='"))?;
                let age = age.parse().map_err(|e| Error::parse(s, e))?;
                Ok((name.to_string(), age))
            },
        );

        let mut people = Collection::with_separator(';');
        people.add(&("ana".to_string(), 31), &pairs).unwrap();
        people.add(&("bo".to_string(), 25), &pairs).unwrap();
        assert_eq!(people.as_text(), "ana=31;bo=25");

        let idx = people
            .find("bo", |p: &(String, u32), k: &str| p.0.as_str().cmp(k), &pairs)
            .unwrap();
        assert_eq!(idx, Some(1));

        people.sort(|a, b| a.1.cmp(&b.1), &pairs).unwrap();
        assert_eq!(people.as_text(), "bo=25;ana=31");
    }

    #[test]
    fn test_snapshot_rejects_cursor_past_end() {
        let json = r#"{"buffer":{"text":"1|2","separator":"Pipe"},"cursor":99}"#;
        let err = serde_json::from_str::<Collection<i32>>(json).unwrap_err();
        assert!(err.to_string().contains("cursor 99"), "{err}");

        let json = r#"{"buffer":{"text":"1|2","separator":"Pipe"},"cursor":2}"#;
        let coll: Collection<i32> = serde_json::from_str(json).unwrap();
        assert!(!coll.has_next());
    }

    #[test]
    fn test_snapshot_rejects_malformed_buffer() {
        let json = r#"{"buffer":{"text":"|a||b|","separator":"Pipe"},"cursor":0}"#;
        assert!(serde_json::from_str::<Collection<String>>(json).is_err());
    }

    #[test]
    fn test_exchange_sort() {
        let mut v = vec![5, 3, 8, 1, 9, 2];
        exchange_sort(&mut v, |a, b| a.cmp(b));
        assert_eq!(v, vec![1, 2, 3, 5, 8, 9]);

        let mut empty: Vec<i32> = Vec::new();
        exchange_sort(&mut empty, |a, b| a.cmp(b));
        assert!(empty.is_empty());
    }
}
