//! Delay classification and timeline synchronization between zones.

use clockzone_core::{add_raw, Raw, Result, ZoneError, DBM_INF, LE_ZERO};
use clockzone_dbm::DbmLib;
use tracing::debug;

use super::Zone;

impl<L: DbmLib> Zone<L> {
    /// Returns the narrowest raw width (upper plus negated lower bound)
    /// over all clocks, i.e. how long the zone can uniformly delay.
    ///
    /// A zone without clocks, or where every clock is unbounded above,
    /// yields the sentinel.
    pub fn max_raw_delay(&self) -> Raw {
        (1..self.size)
            .map(|i| add_raw(self.get(i, 0), self.get(0, i)))
            .fold(DBM_INF, Raw::min)
    }

    /// Returns true if no clock has a finite upper bound.
    pub fn can_delay_indefinitely(&self) -> bool {
        (1..self.size).all(|i| self.get(i, 0) >= DBM_INF)
    }

    /// Returns true if every clock is pinned to a single instant.
    pub fn is_urgent(&self) -> bool {
        (1..self.size).all(|i| add_raw(self.get(0, i), self.get(i, 0)) == LE_ZERO)
    }

    /// Returns the tightest raw lower-bound entry `(0, i)`, starting from the
    /// trivial bound.
    pub fn raw_row_max(&self) -> Raw {
        (1..self.size).map(|i| self.get(0, i)).fold(LE_ZERO, Raw::min)
    }

    /// Returns the tightest raw upper-bound entry `(i, 0)`, starting from the
    /// sentinel.
    pub fn raw_column_min(&self) -> Raw {
        (1..self.size).map(|i| self.get(i, 0)).fold(DBM_INF, Raw::min)
    }

    /// Returns true if the clock intervals of two absolute zones overlap.
    ///
    /// Only the aggregate lower and upper bounds are compared, so this is a
    /// cheap pre-check rather than an exact intersection test.
    pub fn absolute_zones_intersect(&self, other: &Zone<L>) -> bool {
        let (row_max, column_min) = (self.raw_row_max(), self.raw_column_min());
        let (other_row_max, other_column_min) = (other.raw_row_max(), other.raw_column_min());

        add_raw(row_max, other_column_min) > 0 && add_raw(other_row_max, column_min) > 0
    }

    /// Computes the relative-time interval between arriving in this zone and
    /// `guard_zone` becoming enabled.
    ///
    /// The result is a 2×2 zone `[≤0, start, end, ≤0]`. The start is clamped
    /// to at most `≤ 0`: a timeline never starts strictly after the arrival.
    /// Returns `Ok(None)` when some clock's combined upper bound falls below
    /// the trivial bound, meaning the two zones never coexist.
    ///
    /// # Errors
    /// Returns [`ZoneError::DimensionMismatch`] if the sizes differ.
    pub fn create_timeline(&self, guard_zone: &Zone<L>) -> Result<Option<Zone<L>>> {
        self.check_same_size(guard_zone.size)?;
        let mut start = LE_ZERO;
        let mut end = DBM_INF;

        for i in 1..self.size {
            let lower = add_raw(self.get(i, 0), guard_zone.get(0, i)).min(LE_ZERO);
            let upper = add_raw(self.get(0, i), guard_zone.get(i, 0));

            if upper < LE_ZERO {
                debug!(
                    event = "timeline_empty",
                    clock = i,
                    upper,
                    "arrival and guard zones never meet"
                );
                return Ok(None);
            }

            start = start.min(lower);
            end = end.min(upper);
        }

        Ok(Some(Zone::from_parts(vec![LE_ZERO, start, end, LE_ZERO], 2)))
    }

    /// Re-expresses this zone's lower bounds as `previous`'s lower bounds
    /// shifted by `raw_row_max`, tightening only entries that differ.
    ///
    /// # Errors
    /// Returns [`ZoneError::DimensionMismatch`] if the sizes differ.
    pub fn update_lower_bounds(
        &mut self,
        previous: &Zone<L>,
        raw_row_max: Raw,
    ) -> Result<&mut Self> {
        self.check_same_size(previous.size)?;
        for i in 1..self.size {
            let target = add_raw(previous.get(0, i), raw_row_max);
            if self.get(0, i) != target {
                self.constrain_raw(0, i, target);
            }
        }
        Ok(self)
    }

    /// Shifts every clock by the earliest offset of `timeline`, folding it
    /// into both the upper and the lower bound.
    ///
    /// # Errors
    /// Returns [`ZoneError::DimensionMismatch`] unless `timeline` is 2×2.
    pub fn update_arrival_zone(&mut self, timeline: &Zone<L>) -> Result<&mut Self> {
        if timeline.size != 2 {
            return Err(ZoneError::DimensionMismatch {
                expected: 2,
                found: timeline.size,
            });
        }
        let offset = timeline.get(0, 1);
        for i in 1..self.size {
            let shifted = add_raw(self.get(0, i), offset);
            self.constrain_raw(i, 0, shifted).constrain_raw(0, i, shifted);
        }
        Ok(self)
    }
}
