//! Conversion trait implementations for `CowString`.

use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::str::Utf8Error;

use super::CowString;
use crate::unit::Unit;

impl<U: Unit> AsRef<[U]> for CowString<U> {
    #[inline]
    fn as_ref(&self) -> &[U] {
        self.as_units()
    }
}

impl<U: Unit> Borrow<[U]> for CowString<U> {
    #[inline]
    fn borrow(&self) -> &[U] {
        self.as_units()
    }
}

// Infallible conversions

impl<U: Unit> From<&[U]> for CowString<U> {
    #[inline]
    fn from(value: &[U]) -> Self {
        Self::from_units(value)
    }
}

impl<U: Unit, const N: usize> From<&[U; N]> for CowString<U> {
    #[inline]
    fn from(value: &[U; N]) -> Self {
        Self::from_units(value.as_slice())
    }
}

impl<U: Unit> From<Vec<U>> for CowString<U> {
    #[inline]
    fn from(value: Vec<U>) -> Self {
        Self::from_units(&value)
    }
}

impl From<&str> for CowString<u8> {
    #[inline]
    fn from(value: &str) -> Self {
        Self::from_units(value.as_bytes())
    }
}

impl From<String> for CowString<u8> {
    #[inline]
    fn from(value: String) -> Self {
        Self::from_units(value.as_bytes())
    }
}

impl From<&str> for CowString<u16> {
    fn from(value: &str) -> Self {
        let units: Vec<u16> = value.encode_utf16().collect();
        Self::from_units(&units)
    }
}

impl From<String> for CowString<u16> {
    #[inline]
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for CowString<char> {
    fn from(value: &str) -> Self {
        let units: Vec<char> = value.chars().collect();
        Self::from_units(&units)
    }
}

impl From<String> for CowString<char> {
    #[inline]
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

// The unit type must be concrete here: a generic impl would put an
// uncovered type parameter on the foreign `Vec` side.

impl From<&CowString<u8>> for Vec<u8> {
    #[inline]
    fn from(value: &CowString<u8>) -> Self {
        value.as_units().to_vec()
    }
}

impl From<CowString<u8>> for Vec<u8> {
    #[inline]
    fn from(value: CowString<u8>) -> Self {
        value.as_units().to_vec()
    }
}

impl From<CowString<char>> for Vec<char> {
    #[inline]
    fn from(value: CowString<char>) -> Self {
        value.as_units().to_vec()
    }
}

impl From<&CowString<char>> for String {
    #[inline]
    fn from(value: &CowString<char>) -> Self {
        value.as_units().iter().collect()
    }
}

// Fallible conversions

impl TryFrom<&CowString<u8>> for String {
    type Error = Utf8Error;

    #[inline]
    fn try_from(value: &CowString<u8>) -> Result<Self, Utf8Error> {
        core::str::from_utf8(value.as_units()).map(Into::into)
    }
}
