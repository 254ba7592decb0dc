//! In-process shortest-path closure backend.
//!
//! Follows Bengtsson and Yi, "Timed Automata: Semantics, Algorithms and
//! Tools": full Floyd-Warshall closure where a whole-matrix change happens,
//! and the quadratic incremental closure after tightening a single entry.

use clockzone_core::{add_raw, encode, Raw, DBM_INF, LE_ZERO};
use tracing::trace;

use crate::DbmLib;

/// Marker stored at `(0, 0)` of an empty zone.
const EMPTY_MARK: Raw = -1;

/// Pure-Rust implementation of [`DbmLib`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosureDbm;

impl ClosureDbm {
    fn mark_empty(dbm: &mut [Raw]) {
        dbm[0] = EMPTY_MARK;
    }

    // Propagates a freshly tightened (i, j) through every other entry.
    // Requires the rest of the matrix to be closed.
    fn close_ij(dbm: &mut [Raw], dim: usize, i: usize, j: usize) {
        let bij = dbm[i * dim + j];

        for k in 0..dim {
            let bki = dbm[k * dim + i];
            if bki == DBM_INF {
                continue;
            }
            let bkij = add_raw(bki, bij);
            for l in 0..dim {
                let bjl = dbm[j * dim + l];
                if bjl == DBM_INF {
                    continue;
                }
                let candidate = add_raw(bkij, bjl);
                let kl = k * dim + l;
                if candidate < dbm[kl] {
                    dbm[kl] = candidate;
                }
            }
        }
    }

    /// Returns true if no entry can be tightened through another clock.
    pub fn is_closed(dbm: &[Raw], dim: usize) -> bool {
        for k in 0..dim {
            for i in 0..dim {
                let bik = dbm[i * dim + k];
                if bik == DBM_INF {
                    continue;
                }
                for j in 0..dim {
                    if add_raw(bik, dbm[k * dim + j]) < dbm[i * dim + j] {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl DbmLib for ClosureDbm {
    fn zero(dbm: &mut [Raw], dim: usize) {
        debug_assert_eq!(dbm.len(), dim * dim);
        dbm.fill(LE_ZERO);
    }

    fn init(dbm: &mut [Raw], dim: usize) {
        debug_assert_eq!(dbm.len(), dim * dim);
        dbm.fill(DBM_INF);
        dbm[..dim].fill(LE_ZERO);
        for i in 0..dim {
            dbm[i * dim + i] = LE_ZERO;
        }
    }

    fn close(dbm: &mut [Raw], dim: usize) -> bool {
        for k in 0..dim {
            for i in 0..dim {
                let bik = dbm[i * dim + k];
                if bik == DBM_INF {
                    continue;
                }
                for j in 0..dim {
                    let bkj = dbm[k * dim + j];
                    if bkj == DBM_INF {
                        continue;
                    }
                    let candidate = add_raw(bik, bkj);
                    let ij = i * dim + j;
                    if candidate < dbm[ij] {
                        dbm[ij] = candidate;
                    }
                }
                if dbm[i * dim + i] < LE_ZERO {
                    trace!(
                        event = "negative_cycle",
                        dim,
                        clock = i,
                        "negative cycle during closure"
                    );
                    Self::mark_empty(dbm);
                    return false;
                }
            }
        }
        true
    }

    fn is_valid(dbm: &[Raw], dim: usize) -> bool {
        if dim == 0 || dbm.len() != dim * dim {
            return false;
        }
        for i in 0..dim {
            if dbm[i * dim + i] != LE_ZERO {
                return false;
            }
            if dbm[i] > LE_ZERO {
                return false;
            }
            for j in (i + 1)..dim {
                if add_raw(dbm[i * dim + j], dbm[j * dim + i]) < LE_ZERO {
                    return false;
                }
            }
        }
        true
    }

    fn up(dbm: &mut [Raw], dim: usize) {
        for i in 1..dim {
            dbm[i * dim] = DBM_INF;
        }
    }

    fn free_down(dbm: &mut [Raw], dim: usize, k: usize) {
        debug_assert!(k > 0 && k < dim, "clock index {} out of range", k);
        for i in 0..dim {
            if i != k {
                dbm[i * dim + k] = dbm[i * dim];
            }
        }
    }

    fn update_value(dbm: &mut [Raw], dim: usize, k: usize, value: i32) {
        debug_assert!(k > 0 && k < dim, "clock index {} out of range", k);
        let pos = encode(value, false);
        let neg = encode(-value, false);
        for i in 0..dim {
            if i != k {
                dbm[k * dim + i] = add_raw(pos, dbm[i]);
                dbm[i * dim + k] = add_raw(dbm[i * dim], neg);
            }
        }
        dbm[k * dim + k] = LE_ZERO;
    }

    fn constrain_raw(dbm: &mut [Raw], dim: usize, i: usize, j: usize, raw: Raw) -> bool {
        debug_assert!(i < dim && j < dim && i != j);
        if dbm[0] != LE_ZERO {
            return false;
        }
        let ij = i * dim + j;
        if raw >= dbm[ij] {
            return true;
        }
        if add_raw(raw, dbm[j * dim + i]) < LE_ZERO {
            trace!(event = "zone_emptied", dim, i, j, raw, "constraint empties zone");
            Self::mark_empty(dbm);
            return false;
        }
        dbm[ij] = raw;
        Self::close_ij(dbm, dim, i, j);
        true
    }

    fn extrapolate_max_bounds(dbm: &mut [Raw], dim: usize, max: &[i32]) {
        debug_assert_eq!(max.len(), dim);
        let mut changed = false;

        for i in 0..dim {
            let upper = encode(max[i], false);
            for j in 0..dim {
                let ij = i * dim + j;
                if i == j || dbm[ij] == DBM_INF {
                    continue;
                }
                let lower = encode(-max[j], true);
                if dbm[ij] > upper {
                    dbm[ij] = DBM_INF;
                    changed = true;
                } else if dbm[ij] < lower {
                    dbm[ij] = lower;
                    changed = true;
                }
            }
        }

        if changed {
            Self::close(dbm, dim);
        }
    }

    fn is_subset_eq(a: &[Raw], b: &[Raw], dim: usize) -> bool {
        debug_assert!(a.len() == dim * dim && b.len() == dim * dim);
        a.iter().zip(b).all(|(x, y)| x <= y)
    }

    fn have_intersection(a: &[Raw], b: &[Raw], dim: usize) -> bool {
        debug_assert!(a.len() == dim * dim && b.len() == dim * dim);
        if !Self::is_valid(a, dim) || !Self::is_valid(b, dim) {
            return false;
        }
        let mut both: Vec<Raw> = a.iter().zip(b).map(|(x, y)| *x.min(y)).collect();
        Self::close(&mut both, dim)
    }
}
