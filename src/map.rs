//! Key/value map stored as two parallel token buffers.
//!
//! [`TokenMap`] keeps keys in one [`Collection`] and values in another; the
//! value for the key at index `i` is the value at index `i`. Key lookup is an
//! exact match on the serialized key text, so two keys are the same key
//! exactly when their codec writes the same text.
//!
//! Iteration uses the cursors of the two collections independently: walking
//! keys with [`next_key`](TokenMap::next_key) does not move the value cursor.
//!
//! ## Examples
//!
//! ```rust
//! use tokcoll::{TextCodec, TokenMap};
//!
//! let mut stock: TokenMap<String, u32> = TokenMap::new();
//! stock.put(&"apples".to_string(), &3, &TextCodec, &TextCodec).unwrap();
//! stock.put(&"pears".to_string(), &5, &TextCodec, &TextCodec).unwrap();
//!
//! assert_eq!(stock.len(), 2);
//! assert_eq!(stock.get(&"pears".to_string(), &TextCodec, &TextCodec).unwrap(), Some(5));
//! assert_eq!(stock.get(&"plums".to_string(), &TextCodec, &TextCodec).unwrap(), None);
//! ```

use crate::coll::exchange_sort;
use crate::tokens::check_field;
use crate::{Codec, Collection, Error, Result, Separator};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// An insertion-ordered map whose keys and values live in token buffers.
#[derive(Serialize, Deserialize)]
#[serde(try_from = "TokenMapRaw<K, V>", bound = "")]
pub struct TokenMap<K, V> {
    keys: Collection<K>,
    values: Collection<V>,
}

#[derive(Deserialize)]
#[serde(bound = "")]
struct TokenMapRaw<K, V> {
    keys: Collection<K>,
    values: Collection<V>,
}

impl<K, V> TryFrom<TokenMapRaw<K, V>> for TokenMap<K, V> {
    type Error = Error;

    fn try_from(raw: TokenMapRaw<K, V>) -> Result<Self> {
        if raw.keys.len() != raw.values.len() {
            return Err(Error::invalid_snapshot(format!(
                "{} keys paired with {} values",
                raw.keys.len(),
                raw.values.len()
            )));
        }
        Ok(TokenMap {
            keys: raw.keys,
            values: raw.values,
        })
    }
}

impl<K, V> TokenMap<K, V> {
    /// Creates an empty map using the default separator (`|`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::TokenMap;
    ///
    /// let map: TokenMap<String, i32> = TokenMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_separator(Separator::default())
    }

    #[must_use]
    pub fn with_separator(separator: impl Into<Separator>) -> Self {
        let separator = separator.into();
        TokenMap {
            keys: Collection::with_separator(separator),
            values: Collection::with_separator(separator),
        }
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The keys, in storage order.
    #[must_use]
    pub fn keys(&self) -> &Collection<K> {
        &self.keys
    }

    /// The values, in storage order.
    #[must_use]
    pub fn values(&self) -> &Collection<V> {
        &self.values
    }

    fn position<KC: Codec<K>>(&self, key: &K, kc: &KC) -> Option<usize> {
        self.keys.position_of_text(&kc.to_text(key))
    }

    #[must_use]
    pub fn contains_key<KC: Codec<K>>(&self, key: &K, kc: &KC) -> bool {
        self.position(key, kc).is_some()
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns the value codec's error if the stored value cannot be decoded.
    pub fn get<KC, VC>(&self, key: &K, kc: &KC, vc: &VC) -> Result<Option<V>>
    where
        KC: Codec<K>,
        VC: Codec<V>,
    {
        self.position(key, kc)
            .map(|index| self.values.get(index, vc))
            .transpose()
    }

    /// Inserts or replaces the value under `key`.
    ///
    /// If the map already contained this key, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokcoll::{TextCodec, TokenMap};
    ///
    /// let mut map: TokenMap<i32, String> = TokenMap::new();
    /// assert!(map.put(&1, &"one".to_string(), &TextCodec, &TextCodec).unwrap().is_none());
    /// let old = map.put(&1, &"uno".to_string(), &TextCodec, &TextCodec).unwrap();
    /// assert_eq!(old.as_deref(), Some("one"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedElement`](crate::Error::MalformedElement) if
    /// the key or value text cannot be stored (the map is left unchanged), or
    /// the value codec's error if the replaced value cannot be decoded.
    pub fn put<KC, VC>(&mut self, key: &K, value: &V, kc: &KC, vc: &VC) -> Result<Option<V>>
    where
        KC: Codec<K>,
        VC: Codec<V>,
    {
        let sep = self.keys.separator().as_char();
        let key_text = kc.to_text(key);
        check_field(&key_text, sep)?;
        check_field(&vc.to_text(value), sep)?;

        match self.keys.position_of_text(&key_text) {
            Some(index) => {
                let old = self.values.get(index, vc)?;
                self.values.set(index, value, vc)?;
                Ok(Some(old))
            }
            None => {
                self.keys.add(key, kc)?;
                self.values.add(value, vc)?;
                Ok(None)
            }
        }
    }

    /// Removes the entry for `key`, returning its value. Resets both cursors.
    ///
    /// # Errors
    ///
    /// Returns a codec error if the stored key or value cannot be decoded.
    pub fn remove<KC, VC>(&mut self, key: &K, kc: &KC, vc: &VC) -> Result<Option<V>>
    where
        KC: Codec<K>,
        VC: Codec<V>,
    {
        let Some(index) = self.position(key, kc) else {
            return Ok(None);
        };
        let value = self.values.get(index, vc)?;
        self.keys.remove(index, kc)?;
        self.values.remove(index, vc)?;
        Ok(Some(value))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    /// Returns the value under `key`, inserting `value` first if absent.
    ///
    /// # Errors
    ///
    /// Same as [`get`](TokenMap::get) and [`put`](TokenMap::put).
    pub fn discover<KC, VC>(&mut self, key: &K, value: V, kc: &KC, vc: &VC) -> Result<V>
    where
        KC: Codec<K>,
        VC: Codec<V>,
    {
        if let Some(existing) = self.get(key, kc, vc)? {
            return Ok(existing);
        }
        self.put(key, &value, kc, vc)?;
        Ok(value)
    }

    /// `true` while the key cursor points at an entry.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.keys.has_next()
    }

    /// Returns the key under the key cursor and advances it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IteratorExhausted`](crate::Error::IteratorExhausted)
    /// past the last key.
    pub fn next_key<KC: Codec<K>>(&mut self, kc: &KC) -> Result<K> {
        self.keys.next(kc)
    }

    /// Returns the value under the value cursor and advances it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IteratorExhausted`](crate::Error::IteratorExhausted)
    /// past the last value.
    pub fn next_value<VC: Codec<V>>(&mut self, vc: &VC) -> Result<V> {
        self.values.next(vc)
    }

    /// Moves both cursors back to the first entry.
    pub fn reset(&mut self) {
        self.keys.reset();
        self.values.reset();
    }

    /// Reorders the entries by key. Resets both cursors.
    ///
    /// # Errors
    ///
    /// Returns a codec error if any entry cannot be decoded or re-encoded.
    pub fn sort_by_keys<F, KC, VC>(&mut self, mut cmp: F, kc: &KC, vc: &VC) -> Result<()>
    where
        F: FnMut(&K, &K) -> Ordering,
        KC: Codec<K>,
        VC: Codec<V>,
    {
        self.sort_entries(|a, b| cmp(&a.0, &b.0), kc, vc)
    }

    /// Reorders the entries by value. Resets both cursors.
    ///
    /// # Errors
    ///
    /// Returns a codec error if any entry cannot be decoded or re-encoded.
    pub fn sort_by_values<F, KC, VC>(&mut self, mut cmp: F, kc: &KC, vc: &VC) -> Result<()>
    where
        F: FnMut(&V, &V) -> Ordering,
        KC: Codec<K>,
        VC: Codec<V>,
    {
        self.sort_entries(|a, b| cmp(&a.1, &b.1), kc, vc)
    }

    fn sort_entries<F, KC, VC>(&mut self, cmp: F, kc: &KC, vc: &VC) -> Result<()>
    where
        F: FnMut(&(K, V), &(K, V)) -> Ordering,
        KC: Codec<K>,
        VC: Codec<V>,
    {
        let mut entries: Vec<(K, V)> = self
            .keys
            .to_vec(kc)?
            .into_iter()
            .zip(self.values.to_vec(vc)?)
            .collect();
        exchange_sort(&mut entries, cmp);
        debug!(len = entries.len(), "sorted map entries");

        let mut keys = self.keys.clone();
        keys.rewrite(entries.iter().map(|(k, _)| kc.to_text(k)))?;
        self.values
            .rewrite(entries.iter().map(|(_, v)| vc.to_text(v)))?;
        self.keys = keys;
        Ok(())
    }
}

impl<K, V> Default for TokenMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for TokenMap<K, V> {
    fn clone(&self) -> Self {
        TokenMap {
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<K, V> PartialEq for TokenMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.values == other.values
    }
}

impl<K, V> fmt::Debug for TokenMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMap")
            .field("keys", &self.keys)
            .field("values", &self.values)
            .finish()
    }
}
