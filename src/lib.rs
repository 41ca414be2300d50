//! Single-threaded **reference-counted strings** with copy-on-write mutation
//!
//! * O(1) `clone`: handles share one heap buffer
//! * the first write through a shared handle clones the buffer, so sibling
//!   handles are never affected
//! * per-code-unit search, substring extraction, and tokenization
//! * parametrized over the character width: narrow (`u8`), UTF-16 style
//!   (`u16`), and full code point (`char`) units
//!
//! # Examples
//!
//! ```rust
//! use cowstr::CowStr;
//!
//! let greetings = CowStr::from("Hello, world!");
//! let shared = greetings.clone(); // no copy, same buffer
//! assert_eq!(greetings.as_ptr(), shared.as_ptr());
//!
//! let mut shouted = shared.clone();
//! *shouted.unit_mut(0).unwrap() = b'J'; // clones the buffer first
//! assert_eq!(shouted, "Jello, world!");
//! assert_eq!(greetings, "Hello, world!"); // siblings unaffected
//! ```
//!
//! Text operations derive new independent strings:
//!
//! ```rust
//! use cowstr::CowStr;
//!
//! let s = CowStr::from("Hello, world!");
//! let start = s.find_first_of(b' ', 0) + 1;
//! let end = s.find_first_of(b'!', 0);
//! assert_eq!(s.substring(start, end), "world");
//!
//! let tokens = CowStr::from("|first*second+third|apple&").tokenize(b"|*+&");
//! assert_eq!(tokens, [b"first".as_slice(), b"second", b"third", b"apple"]);
//! ```
//!
//! # One Type, Three Widths
//!
//! [`CowString<U>`](crate::string::CowString) works over any sealed
//! [`Unit`](crate::unit::Unit) type. The crate root provides the two
//! convenience aliases of the narrow/wide pair:
//!
//! - [`CowStr`] (`u8` units),
//! - [`WideCowStr`] (`char` units).
//!
//! # Thread Safety
//!
//! There is none, on purpose. The shared-use counter is a plain
//! unsynchronized integer, so the handles are neither [`Send`] nor [`Sync`].
//! Sharing a buffer across threads without external synchronization would be
//! a data race; the type system rules it out.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod macros;
mod raw;
pub mod string;
pub mod unit;

pub use string::{CowString, IndexError};
pub use unit::Unit;

/// Narrow string: one byte per character unit.
pub type CowStr = string::CowString<u8>;

/// Wide string: one full code point per character unit.
pub type WideCowStr = string::CowString<char>;
