//! Serialization and deserialization with `serde`.
//!
//! Narrow strings serialize as byte strings, wide strings as regular
//! strings; both deserialize from the natural shapes of self-describing
//! formats (a JSON array of numbers also deserializes into a narrow
//! string).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::de::{Error, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CowString;

impl Serialize for CowString<u8> {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_units())
    }
}

struct NarrowVisitor;

impl<'de> Visitor<'de> for NarrowVisitor {
    type Value = CowString<u8>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a byte string")
    }

    #[inline]
    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(CowString::from_units(v))
    }

    #[inline]
    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(CowString::from_units(&v))
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(CowString::from_units(v.as_bytes()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut units = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(unit) = seq.next_element()? {
            units.push(unit);
        }
        Ok(CowString::from_units(&units))
    }
}

impl<'de> Deserialize<'de> for CowString<u8> {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_bytes(NarrowVisitor)
    }
}

impl Serialize for CowString<char> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let string: String = self.as_units().iter().collect();
        serializer.serialize_str(&string)
    }
}

struct WideVisitor;

impl Visitor<'_> for WideVisitor {
    type Value = CowString<char>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let units: Vec<char> = v.chars().collect();
        Ok(CowString::from_units(&units))
    }
}

impl<'de> Deserialize<'de> for CowString<char> {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(WideVisitor)
    }
}
