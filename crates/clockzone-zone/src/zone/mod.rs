//! The clock zone type and its primitive-backed operations.
//!
//! Operations that refine the zone in place take `&mut self` and return
//! `&mut Self` so they chain. Constructions that produce a conceptually
//! different zone (absolute zones, timelines) borrow `self` and return a new
//! owned [`Zone`].

mod dump;
mod sync;
mod translate;

#[cfg(test)]
mod tests;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use clockzone_core::{decode, negate_to_upper_bound, Bound, Raw, Result, ZoneError};
use clockzone_dbm::{ClosureDbm, DbmLib};
use tracing::trace;

pub use dump::DumpOptions;

/// A convex set of clock valuations stored as a canonical DBM.
///
/// `size` is the number of clocks plus one: index `0` is the reference
/// clock and indices `1..size` are the automaton's clocks in declaration
/// order. Entry `(i, j)` bounds `clock_i - clock_j`, so `(i, 0)` is the
/// upper bound of clock `i` and `(0, i)` is its negated lower bound.
///
/// Each zone owns its matrix; cloning deep-copies it. The primitive backend
/// `L` is a type parameter so the zone code depends only on [`DbmLib`].
///
/// # Examples
///
/// ```
/// use clockzone_zone::Zone;
///
/// let mut zone: Zone = Zone::new(3, true);
/// assert!(zone.can_delay_indefinitely());
///
/// zone.constrain_bound(1, 0, 5, false);
/// assert!(!zone.can_delay_indefinitely());
/// assert_eq!(zone.upper_bound(1).value(), 5);
/// ```
pub struct Zone<L: DbmLib = ClosureDbm> {
    dbm: Vec<Raw>,
    size: usize,
    _lib: PhantomData<fn() -> L>,
}

impl<L: DbmLib> Zone<L> {
    /// Creates the initial zone: every clock equal to zero, optionally
    /// followed by a delay.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize, delay: bool) -> Self {
        assert!(size > 0, "a zone needs at least the reference clock");
        let mut dbm = vec![0; size * size];
        L::zero(&mut dbm, size);
        let mut zone = Self::from_parts(dbm, size);
        if delay {
            zone.delay();
        }
        zone
    }

    /// Creates the unconstrained zone: clocks are non-negative, nothing else.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn unconstrained(size: usize) -> Self {
        assert!(size > 0, "a zone needs at least the reference clock");
        let mut dbm = vec![0; size * size];
        L::init(&mut dbm, size);
        Self::from_parts(dbm, size)
    }

    /// Wraps an existing raw matrix without re-closing it.
    ///
    /// The dimension is the square root of the buffer length.
    pub fn from_raw(dbm: Vec<Raw>) -> Result<Self> {
        let len = dbm.len();
        let size = (len as f64).sqrt() as usize;
        if len == 0 || size * size != len {
            return Err(ZoneError::NotSquare(len));
        }
        Ok(Self::from_parts(dbm, size))
    }

    pub(crate) fn from_parts(dbm: Vec<Raw>, size: usize) -> Self {
        debug_assert_eq!(dbm.len(), size * size);
        Self {
            dbm,
            size,
            _lib: PhantomData,
        }
    }

    /// Returns the matrix dimension (clocks + 1).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of real clocks.
    #[inline]
    pub fn clock_count(&self) -> usize {
        self.size - 1
    }

    /// Returns the raw matrix in row-major order.
    #[inline]
    pub fn raw(&self) -> &[Raw] {
        &self.dbm
    }

    pub fn into_raw(self) -> Vec<Raw> {
        self.dbm
    }

    /// Returns the raw entry at a flat row-major position.
    #[inline]
    pub fn element_at(&self, index: usize) -> Raw {
        self.dbm[index]
    }

    /// Returns the raw entry `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Raw {
        self.dbm[i * self.size + j]
    }

    /// Returns a decoded copy of the matrix; strictness is dropped.
    pub fn zone_values(&self) -> Vec<i32> {
        self.dbm.iter().map(|&raw| decode(raw)).collect()
    }

    /// Returns the lower bound of clock `index` as a human bound.
    pub fn lower_bound(&self, index: usize) -> Bound {
        Bound::from_raw(negate_to_upper_bound(self.get(0, index)))
    }

    /// Returns the upper bound of clock `index` as a human bound.
    pub fn upper_bound(&self, index: usize) -> Bound {
        Bound::from_raw(self.get(index, 0))
    }

    /// Resets this zone to the unconstrained zone.
    pub fn init(&mut self) -> &mut Self {
        L::init(&mut self.dbm, self.size);
        self
    }

    /// Tightens `(i, j)` to `clock_i - clock_j ≤/< bound` and re-closes.
    ///
    /// A bound no tighter than the current entry leaves the zone unchanged.
    /// The zone may become empty; check [`is_valid`](Self::is_valid).
    pub fn constrain_bound(&mut self, i: usize, j: usize, bound: i32, strict: bool) -> &mut Self {
        if !L::constrain_bound(&mut self.dbm, self.size, i, j, bound, strict) {
            trace!(event = "zone_emptied", size = self.size, i, j, bound, strict);
        }
        self
    }

    /// Tightens `(i, j)` to an already-encoded raw bound.
    pub fn constrain_raw(&mut self, i: usize, j: usize, raw: Raw) -> &mut Self {
        if !L::constrain_raw(&mut self.dbm, self.size, i, j, raw) {
            trace!(event = "zone_emptied", size = self.size, i, j, raw);
        }
        self
    }

    /// Lets an unbounded amount of time elapse.
    pub fn delay(&mut self) -> &mut Self {
        L::up(&mut self.dbm, self.size);
        self
    }

    /// Removes the lower bound of clock `index`.
    pub fn free_down(&mut self, index: usize) -> &mut Self {
        L::free_down(&mut self.dbm, self.size, index);
        self
    }

    /// Resets clock `index` to exactly `value`.
    pub fn update_value(&mut self, index: usize, value: i32) -> &mut Self {
        L::update_value(&mut self.dbm, self.size, index, value);
        self
    }

    /// Applies maximal-bounds extrapolation with the same constant for
    /// every clock.
    ///
    /// Over-approximates the zone; only use it where precision may be
    /// traded for termination.
    pub fn extrapolate_max_bounds(&mut self, constant: i32) -> &mut Self {
        let mut max_bounds = vec![0; self.size];
        if constant != 0 {
            max_bounds[1..].fill(constant);
        }
        trace!(event = "extrapolate", size = self.size, constant);
        L::extrapolate_max_bounds(&mut self.dbm, self.size, &max_bounds);
        self
    }

    /// Extrapolates only when a constant is configured.
    pub fn extrapolate_with(&mut self, constant: Option<i32>) -> &mut Self {
        match constant {
            Some(constant) => self.extrapolate_max_bounds(constant),
            None => self,
        }
    }

    /// Returns true if the zone contains at least one valuation.
    pub fn is_valid(&self) -> bool {
        L::is_valid(&self.dbm, self.size)
    }

    /// Returns true if this zone is included in `other`.
    ///
    /// # Errors
    /// Returns [`ZoneError::DimensionMismatch`] if the sizes differ.
    pub fn is_subset(&self, other: &Zone<L>) -> Result<bool> {
        self.check_same_size(other.size)?;
        Ok(L::is_subset_eq(&self.dbm, &other.dbm, self.size))
    }

    /// Returns true if this zone and `other` share a valuation.
    ///
    /// # Errors
    /// Returns [`ZoneError::DimensionMismatch`] if the sizes differ.
    pub fn intersects(&self, other: &Zone<L>) -> Result<bool> {
        self.check_same_size(other.size)?;
        Ok(L::have_intersection(&self.dbm, &other.dbm, self.size))
    }

    /// Sanity check: true if any clock-to-clock entry is non-positive.
    pub fn contains_negatives(&self) -> bool {
        (1..self.size).any(|i| (1..self.size).any(|j| i != j && self.get(i, j) <= 0))
    }

    pub(crate) fn check_same_size(&self, found: usize) -> Result<()> {
        if self.size != found {
            return Err(ZoneError::DimensionMismatch {
                expected: self.size,
                found,
            });
        }
        Ok(())
    }
}

impl<L: DbmLib> Clone for Zone<L> {
    fn clone(&self) -> Self {
        Self::from_parts(self.dbm.clone(), self.size)
    }
}

impl<L: DbmLib> PartialEq for Zone<L> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.dbm == other.dbm
    }
}

impl<L: DbmLib> Eq for Zone<L> {}

impl<L: DbmLib> Hash for Zone<L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.dbm.hash(state);
    }
}

impl<L: DbmLib> fmt::Debug for Zone<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zone")
            .field("size", &self.size)
            .field("dbm", &self.dbm)
            .finish()
    }
}

impl<L: DbmLib> fmt::Display for Zone<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (k, raw) in self.dbm.iter().enumerate() {
            if k > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", raw)?;
        }
        f.write_str("]")
    }
}
