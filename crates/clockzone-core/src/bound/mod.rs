//! Bounds of difference constraints.

mod codec;


use std::cmp::Ordering;
use std::fmt;

pub use codec::{
    add_raw, decode, encode, is_strict, negate_to_upper_bound, Raw, DBM_INF, DBM_INFINITY,
    LE_ZERO, LS_ZERO, MAX_FINITE_BOUND,
};

use crate::error::{Result, ZoneError};

/// A human-readable bound: a value in `ℤ ∪ {+∞}` with a strictness flag.
///
/// Ordering follows tightness: `<5` sorts before `≤5`, which sorts before `<6`.
///
/// # Examples
///
/// ```
/// use clockzone_core::Bound;
///
/// let tight = Bound::lt(5);
/// let loose = Bound::le(5);
/// assert!(tight < loose);
/// assert!(loose < Bound::INFINITY);
/// assert_eq!(Bound::from_raw(loose.to_raw()), loose);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound {
    value: i32,
    strict: bool,
}

impl Bound {
    /// No finite bound.
    pub const INFINITY: Bound = Bound {
        value: DBM_INFINITY,
        strict: true,
    };

    /// The trivial bound `≤ 0`.
    pub const LE_ZERO: Bound = Bound {
        value: 0,
        strict: false,
    };

    /// Creates a bound without range checks.
    #[inline]
    pub const fn new(value: i32, strict: bool) -> Self {
        if value >= DBM_INFINITY {
            return Bound::INFINITY;
        }
        Bound { value, strict }
    }

    /// Creates a bound, rejecting finite values too large to add safely.
    pub fn checked(value: i32, strict: bool) -> Result<Self> {
        if value.unsigned_abs() > MAX_FINITE_BOUND.unsigned_abs() {
            return Err(ZoneError::BoundOutOfRange(value));
        }
        Ok(Bound { value, strict })
    }

    /// Non-strict bound `≤ value`.
    #[inline]
    pub const fn le(value: i32) -> Self {
        Bound::new(value, false)
    }

    /// Strict bound `< value`.
    #[inline]
    pub const fn lt(value: i32) -> Self {
        Bound::new(value, true)
    }

    /// Unpacks a raw bound.
    #[inline]
    pub const fn from_raw(raw: Raw) -> Self {
        if raw == DBM_INF {
            return Bound::INFINITY;
        }
        Bound {
            value: decode(raw),
            strict: is_strict(raw),
        }
    }

    /// Packs this bound.
    #[inline]
    pub const fn to_raw(&self) -> Raw {
        encode(self.value, self.strict)
    }

    /// Returns the bound value (`DBM_INFINITY` when infinite).
    #[inline]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Returns true for `<`.
    #[inline]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    #[inline]
    pub const fn is_infinite(&self) -> bool {
        self.value >= DBM_INFINITY
    }
}

impl Default for Bound {
    fn default() -> Self {
        Bound::LE_ZERO
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bound {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_raw().cmp(&other.to_raw())
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bound({})", self)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            return write!(f, "<∞");
        }
        let op = if self.strict { "<" } else { "≤" };
        write!(f, "{}{}", op, self.value)
    }
}
