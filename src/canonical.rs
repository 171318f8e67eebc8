//! Canonicalization: mapping a user-provided value to its canonical byte
//! identity.
//!
//! Byte-typed inputs borrow their bytes verbatim. Text inputs borrow their
//! UTF-8 bytes verbatim — for the types implemented here, a type's "stable
//! textual rendering" is simply its own bytes, so canonicalization never
//! copies in the common case.

use std::borrow::Cow;

/// Types that can be canonicalized to the byte identity the filter hashes
/// and stores. Implement this for a domain type to use it directly with
/// `Filter::add`/`remove`/`contains` instead of pre-converting to bytes.
pub trait AsKey {
    /// Borrow (or produce) the canonical byte form of `self`.
    fn as_key_bytes(&self) -> Cow<'_, [u8]>;
}

impl AsKey for [u8] {
    fn as_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<const N: usize> AsKey for [u8; N] {
    fn as_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl AsKey for Vec<u8> {
    fn as_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl AsKey for str {
    fn as_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl AsKey for String {
    fn as_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl<T: AsKey + ?Sized> AsKey for &T {
    fn as_key_bytes(&self) -> Cow<'_, [u8]> {
        (**self).as_key_bytes()
    }
}
