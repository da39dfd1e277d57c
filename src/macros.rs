/// Builds a [`TokenBuffer`](crate::TokenBuffer) from a separator and field
/// texts.
///
/// Expands to a `Result`, since a field may contain the separator.
///
/// # Examples
///
/// ```rust
/// use tokcoll::tokens;
///
/// let buf = tokens!['|'; "10", "20", "30"].unwrap();
/// assert_eq!(buf.as_str(), "10|20|30");
///
/// let empty = tokens![','].unwrap();
/// assert!(empty.is_empty());
///
/// assert!(tokens!['|'; "a|b"].is_err());
/// ```
#[macro_export]
macro_rules! tokens {
    ($sep:expr $(;)?) => {
        ::core::result::Result::<$crate::TokenBuffer, $crate::Error>::Ok(
            $crate::TokenBuffer::with_separator($sep),
        )
    };

    ($sep:expr; $($field:expr),+ $(,)?) => {
        $crate::TokenBuffer::from_fields($sep, [$($field),+])
    };
}
