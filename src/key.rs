//! Key types accepted by the trie API.

use std::ffi::{CStr, CString};

/// Anything usable as a trie key: an ordered, finite sequence of bytes.
///
/// Nul-terminated strings are supported through [`CStr`]/[`CString`] and
/// behave identically to the explicit byte sequence — the terminator is
/// never part of the key.
pub trait Key {
    /// The key's bytes, excluding any terminator.
    fn as_key_bytes(&self) -> &[u8];
}

impl Key for [u8] {
    #[inline]
    fn as_key_bytes(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> Key for [u8; N] {
    #[inline]
    fn as_key_bytes(&self) -> &[u8] {
        self
    }
}

impl Key for Vec<u8> {
    #[inline]
    fn as_key_bytes(&self) -> &[u8] {
        self
    }
}

impl Key for str {
    #[inline]
    fn as_key_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Key for String {
    #[inline]
    fn as_key_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Key for CStr {
    #[inline]
    fn as_key_bytes(&self) -> &[u8] {
        self.to_bytes()
    }
}

impl Key for CString {
    #[inline]
    fn as_key_bytes(&self) -> &[u8] {
        self.to_bytes()
    }
}

impl<K: Key + ?Sized> Key for &K {
    #[inline]
    fn as_key_bytes(&self) -> &[u8] {
        (**self).as_key_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cstr_key_drops_the_terminator() {
        let c = CString::new("cat").unwrap();
        assert_eq!(c.as_key_bytes(), b"cat");
        assert_eq!(c.as_key_bytes(), "cat".as_key_bytes());
    }

    #[test]
    fn byte_and_str_keys_agree() {
        assert_eq!(b"car".as_key_bytes(), "car".as_key_bytes());
        assert_eq!(Vec::from(&b"ca"[..]).as_key_bytes(), "ca".as_key_bytes());
    }
}
