//! Difference bound matrix primitives.
//!
//! The zone engine never touches matrix algebra directly: it goes through
//! [`DbmLib`], a set of stateless functions over a flat, row-major buffer of
//! raw bounds of length `dim * dim`. Entry `(i, j)` lives at `i * dim + j`
//! and bounds `clock_i - clock_j`. Index `0` is the reference clock.
//!
//! Every mutating primitive leaves the buffer in canonical (shortest-path
//! closed) form, or marks it empty. [`ClosureDbm`] is the in-process
//! implementation; any other backend only has to satisfy the same contract.

mod closure;


pub use closure::ClosureDbm;

use clockzone_core::{encode, Raw};

/// Closure-preserving primitives over a raw-bound buffer.
///
/// Implementations are stateless: all functions are associated and may be
/// called concurrently on distinct buffers.
pub trait DbmLib {
    /// Sets every entry to `<= 0`: all clocks equal to zero.
    fn zero(dbm: &mut [Raw], dim: usize);

    /// Resets to the unconstrained zone: clocks are non-negative, nothing else.
    fn init(dbm: &mut [Raw], dim: usize);

    /// Recomputes the canonical form. Returns false and marks the buffer
    /// empty if the constraints are inconsistent.
    fn close(dbm: &mut [Raw], dim: usize) -> bool;

    /// Returns true if the buffer denotes a non-empty zone.
    fn is_valid(dbm: &[Raw], dim: usize) -> bool;

    /// Lets time elapse: removes every upper bound `(i, 0)`.
    fn up(dbm: &mut [Raw], dim: usize);

    /// Removes the lower bound of clock `k`, leaving `k >= 0`.
    fn free_down(dbm: &mut [Raw], dim: usize, k: usize);

    /// Resets clock `k` to exactly `value`.
    fn update_value(dbm: &mut [Raw], dim: usize, k: usize, value: i32);

    /// Tightens `(i, j)` to `raw` if that is tighter and re-closes.
    ///
    /// Returns false if the zone became (or already was) empty.
    fn constrain_raw(dbm: &mut [Raw], dim: usize, i: usize, j: usize, raw: Raw) -> bool;

    /// Tightens `(i, j)` to the bound `(value, strict)`.
    fn constrain_bound(
        dbm: &mut [Raw],
        dim: usize,
        i: usize,
        j: usize,
        value: i32,
        strict: bool,
    ) -> bool {
        Self::constrain_raw(dbm, dim, i, j, encode(value, strict))
    }

    /// Classic maximal-bounds extrapolation. `max[0]` must be `0`.
    fn extrapolate_max_bounds(dbm: &mut [Raw], dim: usize, max: &[i32]);

    /// Returns true if zone `a` is included in zone `b`.
    fn is_subset_eq(a: &[Raw], b: &[Raw], dim: usize) -> bool;

    /// Returns true if zones `a` and `b` share at least one valuation.
    fn have_intersection(a: &[Raw], b: &[Raw], dim: usize) -> bool;
}
