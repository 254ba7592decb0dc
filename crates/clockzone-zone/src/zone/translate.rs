//! Guard ⇄ zone translation.

use clockzone_core::{
    add_raw, decode, encode, is_strict, negate_to_upper_bound, Clock, Guard, GuardKind, Raw,
    Result, Update, ZoneError, DBM_INF, LE_ZERO, LS_ZERO,
};
use clockzone_dbm::DbmLib;
use tracing::debug;

use super::Zone;

impl<L: DbmLib> Zone<L> {
    /// Applies one guard to the clock at matrix index `index`.
    ///
    /// `clock >= v` bounds `(0, index)`, `clock <= v` bounds `(index, 0)` and
    /// `clock == v` bounds both.
    pub fn build_constraints_for_guard(&mut self, guard: &Guard, index: usize) -> &mut Self {
        let strict = guard.is_strict();
        let value = guard.bound();

        match guard.kind() {
            GuardKind::Equal => self
                .constrain_bound(0, index, -value, strict)
                .constrain_bound(index, 0, value, strict),
            GuardKind::Lower => self.constrain_bound(0, index, -value, strict),
            GuardKind::Upper => self.constrain_bound(index, 0, value, strict),
        }
    }

    /// Normalizes `guards` and applies each to the clock it references.
    ///
    /// # Errors
    /// Fails if `clocks` does not match the zone or a guard names a clock
    /// outside it. The zone is untouched in that case.
    pub fn constrain_guards(&mut self, guards: &[Guard], clocks: &[Clock]) -> Result<&mut Self> {
        self.check_clock_count(clocks)?;
        let resolved = Guard::normalize(guards)
            .into_iter()
            .map(|guard| Ok((clock_index(clocks, guard.clock())?, guard)))
            .collect::<Result<Vec<_>>>()?;

        for (index, guard) in &resolved {
            self.build_constraints_for_guard(guard, *index);
        }
        Ok(self)
    }

    /// Reads the zone back as guards, in increasing clock order.
    ///
    /// A clock yields a lower-bound guard when its lower bound is not the
    /// trivial `>= 0`, and an upper-bound guard when its upper bound is finite.
    ///
    /// # Errors
    /// Returns [`ZoneError::ClockCountMismatch`] if `clocks` does not name
    /// exactly the zone's clocks.
    pub fn build_guards_from_zone(&self, clocks: &[Clock]) -> Result<Vec<Guard>> {
        self.check_clock_count(clocks)?;
        let mut guards = Vec::new();

        for (offset, clock) in clocks.iter().enumerate() {
            let index = offset + 1;

            let lower = self.get(0, index);
            if lower != LE_ZERO {
                guards.push(Guard::lower(clock.clone(), -decode(lower), is_strict(lower)));
            }

            let upper = self.get(index, 0);
            if upper != DBM_INF {
                guards.push(Guard::upper(clock.clone(), decode(upper), is_strict(upper)));
            }
        }

        Ok(guards)
    }

    /// Builds the zone in which `guards` hold once this (delayed) zone is
    /// re-expressed relative to its own lower bounds.
    ///
    /// Clocks with a non-trivial lower bound are freed before their first
    /// guard, and guard bounds are offset by that lower bound. Upper bounds
    /// never grow past what this zone already allowed. Clocks without any
    /// guard are freed and keep their width. The receiver is not modified.
    ///
    /// # Errors
    /// Fails if `clocks` does not match the zone or a guard names a clock
    /// outside it.
    pub fn absolute_zone(&self, guards: &[Guard], clocks: &[Clock]) -> Result<Zone<L>> {
        self.check_clock_count(clocks)?;
        let mut result = self.clone();
        let mut unvisited = vec![true; self.size];

        for guard in guards {
            let index = clock_index(clocks, guard.clock())?;
            let first_visit = std::mem::replace(&mut unvisited[index], false);
            let clock_upper = self.get(index, 0);
            let clock_lower = self.get(0, index);

            if first_visit && clock_lower != LE_ZERO {
                result.free_down(index);
            }

            match guard.upper_bound() {
                None => {
                    let sum = add_raw(guard.raw(), clock_lower);
                    let new_lower = if sum < LS_ZERO { LE_ZERO } else { sum };
                    result.constrain_bound(0, index, -decode(new_lower), is_strict(new_lower));

                    if first_visit && clock_upper != DBM_INF {
                        result.constrain_raw(index, 0, add_raw(clock_upper, clock_lower));
                    }
                }
                Some(upper) => {
                    let constraint = encode(upper, guard.is_strict());
                    let new_upper = if constraint > clock_upper && clock_upper != DBM_INF {
                        add_raw(clock_upper, clock_lower)
                    } else {
                        add_raw(constraint, clock_lower)
                    };
                    result.constrain_raw(index, 0, new_upper);
                }
            }
        }

        for index in (1..self.size).filter(|&index| unvisited[index]) {
            let clock_upper = self.get(index, 0);
            let clock_lower = self.get(0, index);
            if clock_lower == LE_ZERO {
                continue;
            }
            result.free_down(index);
            if clock_upper != DBM_INF {
                result.constrain_raw(index, 0, add_raw(clock_upper, clock_lower));
            }
        }

        debug!(
            event = "absolute_zone",
            size = self.size,
            guards = guards.len(),
            valid = result.is_valid(),
            "built absolute zone"
        );
        Ok(result)
    }

    /// Raw upper bound matching the raw lower bound `raw`.
    #[inline]
    pub fn lower_bound_to_upper_bound(raw: Raw) -> Raw {
        negate_to_upper_bound(raw)
    }

    /// Applies transition resets in order.
    ///
    /// # Errors
    /// Fails if `clocks` does not match the zone or an update names a clock
    /// outside it. The zone is untouched in that case.
    pub fn apply_updates(&mut self, updates: &[Update], clocks: &[Clock]) -> Result<&mut Self> {
        self.check_clock_count(clocks)?;
        let resolved = updates
            .iter()
            .map(|update| Ok((clock_index(clocks, update.clock())?, update.value())))
            .collect::<Result<Vec<_>>>()?;

        for (index, value) in resolved {
            self.update_value(index, value);
        }
        Ok(self)
    }

    fn check_clock_count(&self, clocks: &[Clock]) -> Result<()> {
        if clocks.len() != self.clock_count() {
            return Err(ZoneError::ClockCountMismatch {
                expected: self.clock_count(),
                found: clocks.len(),
            });
        }
        Ok(())
    }
}

// Matrix index of `clock`: its position in the clock list, shifted past the
// reference clock.
fn clock_index(clocks: &[Clock], clock: &Clock) -> Result<usize> {
    clocks
        .iter()
        .position(|c| c == clock)
        .map(|pos| pos + 1)
        .ok_or_else(|| ZoneError::UnknownClock(clock.name().to_string()))
}
