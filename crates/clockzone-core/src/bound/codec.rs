//! Raw bound encoding.
//!
//! A raw bound packs `(value, strictness)` into one `i32`: the value is
//! shifted left by one and the low bit is set for `<=` and cleared for `<`.
//! This makes raw values directly comparable (a smaller raw is a tighter
//! bound) and lets two bounds be summed without unpacking. The encoding is
//! bit-compatible with the classic UPPAAL DBM library.

/// Packed `(value, strictness)` bound.
pub type Raw = i32;

/// Value-level infinity, i.e. `decode(DBM_INF)`.
pub const DBM_INFINITY: i32 = i32::MAX >> 1;

/// Raw sentinel for "no finite bound" (`< ∞`).
pub const DBM_INF: Raw = DBM_INFINITY << 1;

/// Raw encoding of `<= 0`, the trivial bound.
pub const LE_ZERO: Raw = 1;

/// Raw encoding of `< 0`.
pub const LS_ZERO: Raw = 0;

/// Largest finite raw bound, `<= DBM_INFINITY - 1`.
const MAX_FINITE_RAW: Raw = DBM_INF - 1;

/// Largest finite bound value accepted by checked constructors.
///
/// Sums of up to three bounds in this range stay clear of the sentinel.
pub const MAX_FINITE_BOUND: i32 = DBM_INFINITY >> 2;

/// Encodes a bound value and strictness flag.
///
/// `DBM_INFINITY` (or anything above it) maps to the sentinel regardless
/// of strictness.
///
/// # Examples
///
/// ```
/// use clockzone_core::{encode, DBM_INF, DBM_INFINITY, LE_ZERO};
///
/// assert_eq!(encode(0, false), LE_ZERO);
/// assert_eq!(encode(5, true), 10);
/// assert_eq!(encode(5, false), 11);
/// assert_eq!(encode(DBM_INFINITY, false), DBM_INF);
/// ```
#[inline]
pub const fn encode(value: i32, strict: bool) -> Raw {
    if value >= DBM_INFINITY {
        return DBM_INF;
    }
    (value << 1) | (!strict as i32)
}

/// Decodes the bound value of a raw bound, dropping strictness.
#[inline]
pub const fn decode(raw: Raw) -> i32 {
    raw >> 1
}

/// Returns true if the raw bound is strict (`<`).
#[inline]
pub const fn is_strict(raw: Raw) -> bool {
    raw & 1 == 0
}

/// Adds two raw bounds.
///
/// The sum is strict if either operand is strict. The sentinel absorbs any
/// operand. Finite sums that would reach the sentinel range are a logic
/// defect: they trip a debug assertion and saturate to the largest finite
/// raw bound in release builds, never to the sentinel.
///
/// # Examples
///
/// ```
/// use clockzone_core::{add_raw, encode, DBM_INF};
///
/// assert_eq!(add_raw(encode(2, false), encode(3, false)), encode(5, false));
/// assert_eq!(add_raw(encode(2, true), encode(3, false)), encode(5, true));
/// assert_eq!(add_raw(DBM_INF, encode(-7, false)), DBM_INF);
/// ```
#[inline]
pub fn add_raw(a: Raw, b: Raw) -> Raw {
    if a == DBM_INF || b == DBM_INF {
        return DBM_INF;
    }
    let sum = i64::from(a) + i64::from(b) - i64::from((a | b) & 1);
    debug_assert!(
        sum > -i64::from(DBM_INF) && sum < i64::from(DBM_INF),
        "raw addition {} + {} left the finite range",
        a,
        b
    );
    saturate_finite(sum)
}

// Clamps a wide raw sum into the finite range on both sides.
pub(crate) fn saturate_finite(sum: i64) -> Raw {
    sum.clamp(-i64::from(MAX_FINITE_RAW), i64::from(MAX_FINITE_RAW)) as Raw
}

/// Turns the raw encoding of a lower bound (`0 - x <= -v`) into the raw
/// encoding of the matching upper bound (`x - 0 <= v`), keeping strictness.
#[inline]
pub const fn negate_to_upper_bound(raw: Raw) -> Raw {
    -raw + (raw & 1) * 2
}
