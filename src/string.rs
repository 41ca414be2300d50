//! Reference-counted, clone-on-write string handle.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};
use core::ops::Deref;
use core::{error, fmt, ptr};

use crate::raw::Raw;
use crate::unit::Unit;

mod cmp;
mod convert;

#[cfg(feature = "serde")]
mod serde;

/// Reference-counted string with clone-on-write mutation, generic over the
/// character width `U`.
///
/// A `CowString` is a thin handle to at most one shared heap buffer.
/// [`clone`](Clone::clone) is O(1) and shares the buffer; the first write
/// through a shared handle clones the buffer first, so sibling handles never
/// observe the mutation. All text operations are per-code-unit.
///
/// # Examples
///
/// ```
/// # use cowstr::CowStr;
/// let a = CowStr::from("Hello");
/// let b = a.clone();
/// assert_eq!(a.as_ptr(), b.as_ptr()); // same buffer
///
/// let mut c = b.clone();
/// *c.unit_mut(0).unwrap() = b'J';
/// assert_eq!(c, "Jello");
/// assert_eq!(b, "Hello"); // untouched
/// assert_ne!(b.as_ptr(), c.as_ptr());
/// ```
///
/// # The empty state
///
/// A default-constructed handle holds no buffer at all. It is observably
/// identical to zero-length content: [`len`](Self::len) is 0, the unit slice
/// is empty, and every search returns [`NPOS`](Self::NPOS).
pub struct CowString<U: Unit> {
    /// `Some` pointer is valid and its count accounts for this handle;
    /// `None` is the empty state.
    raw: Option<Raw<U>>,
}

impl<U: Unit> CowString<U> {
    /// Sentinel offset denoting "no valid position" / "not found".
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::from("Hello");
    /// assert_eq!(s.find_first_of(b'z', 0), CowStr::NPOS);
    /// ```
    pub const NPOS: usize = usize::MAX;

    /// Creates an empty `CowString`. No allocation occurs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::new();
    /// assert!(s.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: None }
    }

    /// Creates a `CowString` holding a copy of `units`, the explicit
    /// (pointer, count) construction of the public surface.
    ///
    /// An empty input yields the empty state, without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::from_units(b"Hello");
    /// assert_eq!(s.len(), 5);
    /// assert!(CowStr::from_units(b"").is_empty());
    /// ```
    #[must_use]
    pub fn from_units(units: &[U]) -> Self {
        if units.is_empty() {
            Self::new()
        } else {
            Self {
                raw: Some(Raw::new(units)),
            }
        }
    }

    /// Creates a `CowString` from a terminated sequence: the content is the
    /// prefix up to (excluding) the first [`NUL`](Unit::NUL) unit, or the
    /// whole slice if it contains none.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::from_nul_terminated(b"Hello\0world");
    /// assert_eq!(s, "Hello");
    /// ```
    #[must_use]
    pub fn from_nul_terminated(units: &[U]) -> Self {
        let end = units
            .iter()
            .position(|&u| u == U::NUL)
            .unwrap_or(units.len());
        Self::from_units(&units[..end])
    }

    /// Returns the length in character units.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.map_or(0, |raw|
            // SAFETY: type invariant
            unsafe { raw.len() })
    }

    /// Returns `true` if this `CowString` has a length of zero.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }

    /// Returns the allocated capacity of the underlying buffer in units,
    /// or 0 for the empty state.
    ///
    /// The capacity always leaves room for the content, its terminator, and
    /// some slack.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::from("Hello");
    /// assert!(s.capacity() > s.len());
    /// ```
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.map_or(0, |raw|
            // SAFETY: type invariant
            unsafe { raw.capacity() })
    }

    /// Extracts the content as a unit slice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::from("abc");
    /// assert_eq!(s.as_units(), b"abc");
    /// ```
    #[inline]
    #[must_use]
    pub fn as_units(&self) -> &[U] {
        match &self.raw {
            // SAFETY: type invariant, the buffer outlives the borrow of self
            Some(raw) => unsafe { raw.as_slice() },
            None => &[],
        }
    }

    /// Returns a pointer to the first content unit, or a null pointer for
    /// the empty state.
    ///
    /// Two handles sharing one buffer compare pointer-equal; this is the
    /// observable identity used by the sharing tests.
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const U {
        match self.raw {
            // SAFETY: type invariant
            Some(raw) => unsafe { raw.as_ptr() },
            None => ptr::null(),
        }
    }

    /// Returns `true` if no other handle shares this buffer.
    ///
    /// The empty state owns nothing to share and counts as unique.
    #[inline]
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.raw.map_or(true, |raw|
            // SAFETY: type invariant
            unsafe { raw.is_unique() })
    }

    /// Gets the current share count of the underlying buffer.
    #[cfg(test)]
    pub(crate) fn ref_count(&self) -> usize {
        self.raw.map_or(0, |raw|
            // SAFETY: type invariant
            unsafe { raw.ref_count() })
    }

    /// Ensures this handle is the only one referencing its buffer, cloning
    /// the buffer if it is currently shared.
    ///
    /// The clone keeps the capacity and copies the content along with its
    /// terminator; the old buffer keeps its other handles.
    fn make_unique(&mut self) {
        if let Some(raw) = self.raw {
            // SAFETY: type invariant
            if !unsafe { raw.is_unique() } {
                // SAFETY: type invariant, `detach` releases our old share
                self.raw = Some(unsafe { raw.detach() });
            }
        }
    }

    /// Extracts a mutable unit slice, cloning the underlying buffer first if
    /// it is shared.
    ///
    /// This is the clone-on-write entry point: after it returns, the handle
    /// is guaranteed exclusive and sibling handles keep the old content.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let a = CowStr::from("abc");
    /// let mut b = a.clone();
    /// b.to_mut_units()[0] = b'x';
    /// assert_eq!(b, "xbc");
    /// assert_eq!(a, "abc");
    /// ```
    #[must_use]
    pub fn to_mut_units(&mut self) -> &mut [U] {
        self.make_unique();
        match &mut self.raw {
            // SAFETY: uniqueness ensured above, buffer outlives the borrow
            Some(raw) => unsafe { raw.as_mut_slice() },
            None => &mut [],
        }
    }

    /// Extracts a mutable unit slice if no clone is needed, that is, if this
    /// handle is already exclusive.
    ///
    /// Returns `None` when the buffer is shared. Use
    /// [`to_mut_units`](Self::to_mut_units) to clone instead.
    #[must_use]
    pub fn as_mut_units(&mut self) -> Option<&mut [U]> {
        match &mut self.raw {
            // SAFETY: type invariant + uniqueness checked
            Some(raw) if unsafe { raw.is_unique() } => Some(unsafe { raw.as_mut_slice() }),
            Some(_) => None,
            None => Some(&mut []),
        }
    }

    /// Gets checked mutable access to the unit at `index`, cloning the
    /// underlying buffer first if it is shared.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if `index` is out of bounds. The check
    /// happens before any clone: a failed access never mutates or detaches
    /// anything.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let mut s = CowStr::from("Hello");
    /// *s.unit_mut(3).unwrap() = b'p';
    /// *s.unit_mut(4).unwrap() = b'!';
    /// assert_eq!(s, "Help!");
    /// assert!(s.unit_mut(5).is_err());
    /// ```
    pub fn unit_mut(&mut self, index: usize) -> Result<&mut U, IndexError> {
        let len = self.len();
        if index >= len {
            return Err(IndexError { index, len });
        }
        Ok(&mut self.to_mut_units()[index])
    }

    /// Returns the position of the first occurrence of `unit` at or after
    /// `start`, or [`NPOS`](Self::NPOS) if there is none (in particular when
    /// `start >= len()`).
    ///
    /// Read-only: never clones.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::from("Hello, world!");
    /// assert_eq!(s.find_first_of(b',', 0), 5);
    /// assert_eq!(s.find_first_of(b'l', 3), 3);
    /// assert_eq!(s.find_first_of(b',', 20), CowStr::NPOS);
    /// ```
    #[must_use]
    pub fn find_first_of(&self, unit: U, start: usize) -> usize {
        let units = self.as_units();
        if start >= units.len() {
            return Self::NPOS;
        }
        units[start..]
            .iter()
            .position(|&u| u == unit)
            .map_or(Self::NPOS, |pos| start + pos)
    }

    /// Returns the position of the first occurrence of the unit sequence
    /// `needle` at or after `start`, or [`NPOS`](Self::NPOS) if there is
    /// none.
    ///
    /// An empty needle always yields `NPOS` rather than matching at `start`;
    /// this intentionally diverges from conventional substring-search
    /// semantics.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::from("the ones and the others");
    /// let first = s.find(b"the", 0);
    /// assert_eq!(first, 0);
    /// assert_eq!(s.find(b"the", first + 1), 13);
    /// assert_eq!(s.find(b"", 0), CowStr::NPOS);
    /// ```
    #[must_use]
    pub fn find(&self, needle: &[U], start: usize) -> usize {
        let Some(&first) = needle.first() else {
            return Self::NPOS;
        };
        let units = self.as_units();
        let mut candidate = start;
        loop {
            candidate = self.find_first_of(first, candidate);
            if candidate == Self::NPOS || candidate + needle.len() > units.len() {
                return Self::NPOS;
            }
            if units[candidate..candidate + needle.len()] == *needle {
                return candidate;
            }
            candidate += 1;
        }
    }

    /// Extracts the half-open range `[start, end)` as a brand-new
    /// independent `CowString` (its own buffer, no sharing with `self`).
    ///
    /// An invalid range — `end > len()` or `end <= start` — yields the
    /// empty state rather than an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let s = CowStr::from("Hello, world!");
    /// assert_eq!(s.substring(7, 12), "world");
    /// assert!(s.substring(7, 20).is_empty()); // end out of bounds
    /// assert!(s.substring(7, 7).is_empty()); // empty range
    /// ```
    #[must_use]
    pub fn substring(&self, start: usize, end: usize) -> Self {
        let units = self.as_units();
        if end > units.len() || end <= start {
            return Self::new();
        }
        Self::from_units(&units[start..end])
    }

    /// Splits the string into its maximal non-empty runs between separator
    /// units, in left-to-right order. Consumes the handle.
    ///
    /// Runs of adjacent separators, and separators at either end, produce
    /// no empty tokens. Each token is an independent `CowString`. An empty
    /// separator set yields an empty vector: "no separators given" is the
    /// caller's error, not a request to return the whole string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cowstr::CowStr;
    /// let tokens = CowStr::from("|first*second+third|apple&").tokenize(b"|*+&");
    /// assert_eq!(tokens.len(), 4);
    /// assert_eq!(tokens[0], "first");
    /// assert_eq!(tokens[3], "apple");
    ///
    /// assert!(CowStr::from("a|b").tokenize(b"").is_empty());
    /// ```
    #[must_use]
    pub fn tokenize(self, separators: &[U]) -> Vec<Self> {
        if separators.is_empty() {
            return Vec::new();
        }
        let units = self.as_units();
        let mut boundaries: Vec<usize> = units
            .iter()
            .enumerate()
            .filter(|&(_, unit)| separators.contains(unit))
            .map(|(pos, _)| pos)
            .collect();
        boundaries.push(units.len());

        let mut tokens = Vec::new();
        let mut start = 0;
        for boundary in boundaries {
            if boundary != start {
                tokens.push(self.substring(start, boundary));
            }
            start = boundary + 1;
        }
        tokens
    }
}

impl<U: Unit> Clone for CowString<U> {
    /// Shares the buffer: O(1), no copy.
    #[inline]
    fn clone(&self) -> Self {
        if let Some(raw) = self.raw {
            // SAFETY: type invariant; the new handle accounts for the incr
            unsafe { raw.incr() };
        }
        Self { raw: self.raw }
    }
}

impl<U: Unit> Drop for CowString<U> {
    #[inline]
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            // SAFETY: type invariant; our share is released exactly once
            unsafe { raw.decr() };
        }
    }
}

impl<U: Unit> Default for CowString<U> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit> Deref for CowString<U> {
    type Target = [U];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_units()
    }
}

impl<U: Unit> fmt::Display for CowString<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        U::display(self.as_units(), f)
    }
}

impl<U: Unit> fmt::Debug for CowString<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string(), f)
    }
}

impl<U: Unit> Hash for CowString<U> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_units(), state);
    }
}

/// Error returned by [`CowString::unit_mut`] for an out-of-bounds index.
///
/// # Examples
///
/// ```
/// # use cowstr::CowStr;
/// let mut s = CowStr::from("abc");
/// let err = s.unit_mut(7).unwrap_err();
/// assert_eq!(err.index(), 7);
/// assert_eq!(err.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    index: usize,
    len: usize,
}

#[allow(clippy::len_without_is_empty)]
impl IndexError {
    /// Returns the offending index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the length of the string at the time of the access.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }
}

impl error::Error for IndexError {}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} is out of bounds of a string of length {}",
            self.index, self.len
        )
    }
}
