//! Separator configuration for token buffers.
//!
//! Every buffer is bound to one separator character for its whole lifetime.
//! The separator must never appear inside a serialized element; writes that
//! would break this are rejected with [`Error::MalformedElement`].
//!
//! [`Error::MalformedElement`]: crate::Error::MalformedElement
//!
//! ## Examples
//!
//! ```rust
//! use tokcoll::{Collection, Separator, TextCodec};
//!
//! let mut coll: Collection<i32> = Collection::with_separator(Separator::Semicolon);
//! coll.add(&1, &TextCodec).unwrap();
//! coll.add(&2, &TextCodec).unwrap();
//! assert_eq!(coll.as_text(), "1;2");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator choice for a token buffer.
///
/// - **Pipe**: Default, rarely found inside numbers or words
/// - **Comma**: CSV-like buffers
/// - **Tab**: TSV-like buffers
/// - **Semicolon**: Buffers holding comma-formatted text
/// - **Other**: Any other character
///
/// # Examples
///
/// ```rust
/// use tokcoll::Separator;
///
/// assert_eq!(Separator::Pipe.as_char(), '|');
/// assert_eq!(Separator::Tab.as_char(), '\t');
/// assert_eq!(Separator::from('#'), Separator::Other('#'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Separator {
    #[default]
    Pipe,
    Comma,
    Tab,
    Semicolon,
    Other(char),
}

impl Separator {
    /// Returns the character this separator writes into the buffer.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Separator::Pipe => '|',
            Separator::Comma => ',',
            Separator::Tab => '\t',
            Separator::Semicolon => ';',
            Separator::Other(c) => *c,
        }
    }
}

impl From<char> for Separator {
    fn from(c: char) -> Self {
        match c {
            '|' => Separator::Pipe,
            ',' => Separator::Comma,
            '\t' => Separator::Tab,
            ';' => Separator::Semicolon,
            other => Separator::Other(other),
        }
    }
}

impl From<Separator> for char {
    fn from(sep: Separator) -> Self {
        sep.as_char()
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
