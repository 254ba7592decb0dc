use std::fmt;

use super::Clock;
use crate::bound::{encode, Raw};

/// Direction of a single-clock guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardKind {
    /// `clock > v` or `clock >= v`
    Lower,
    /// `clock < v` or `clock <= v`
    Upper,
    /// `clock == v`
    Equal,
}

/// A single clock constraint `clock ⋈ value`.
///
/// # Examples
///
/// ```
/// use clockzone_core::{Clock, Guard};
///
/// let x = Clock::new("x", 0);
/// let g = Guard::new(x.clone(), 2, true, false);
/// assert_eq!(g.lower_bound(), 2);
/// assert_eq!(g.upper_bound(), None);
/// assert_eq!(g.to_string(), "x>=2");
///
/// let eq = Guard::equal(x, 4);
/// assert_eq!(eq.lower_bound(), 4);
/// assert_eq!(eq.upper_bound(), Some(4));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guard {
    clock: Clock,
    kind: GuardKind,
    bound: i32,
    strict: bool,
}

impl Guard {
    /// Creates a guard the way the automaton parser reports one.
    pub fn new(clock: Clock, bound: i32, is_greater_or_equal: bool, is_strict: bool) -> Self {
        let kind = if is_greater_or_equal {
            GuardKind::Lower
        } else {
            GuardKind::Upper
        };
        Self {
            clock,
            kind,
            bound,
            strict: is_strict,
        }
    }

    /// `clock > value` (strict) or `clock >= value`.
    pub fn lower(clock: Clock, value: i32, strict: bool) -> Self {
        Self::new(clock, value, true, strict)
    }

    /// `clock < value` (strict) or `clock <= value`.
    pub fn upper(clock: Clock, value: i32, strict: bool) -> Self {
        Self::new(clock, value, false, strict)
    }

    /// `clock == value`.
    pub fn equal(clock: Clock, value: i32) -> Self {
        Self {
            clock,
            kind: GuardKind::Equal,
            bound: value,
            strict: false,
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn kind(&self) -> GuardKind {
        self.kind
    }

    pub fn bound(&self) -> i32 {
        self.bound
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_equality(&self) -> bool {
        self.kind == GuardKind::Equal
    }

    /// Lowest value the clock may take; `0` for pure upper-bound guards.
    pub fn lower_bound(&self) -> i32 {
        match self.kind {
            GuardKind::Lower | GuardKind::Equal => self.bound,
            GuardKind::Upper => 0,
        }
    }

    /// Highest value the clock may take; `None` for pure lower-bound guards.
    pub fn upper_bound(&self) -> Option<i32> {
        match self.kind {
            GuardKind::Upper | GuardKind::Equal => Some(self.bound),
            GuardKind::Lower => None,
        }
    }

    /// Raw encoding of the guard constant with the guard's strictness.
    ///
    /// Note that this packs the positive constant; it is not the matrix
    /// entry for a lower-bound guard.
    pub fn raw(&self) -> Raw {
        encode(self.bound, self.strict)
    }

    /// Normalizes a guard list to at most one lower and one upper guard per
    /// clock, keeping the tightest of each.
    ///
    /// Equality guards expand into a non-strict lower and upper guard.
    /// Clocks keep the order of their first appearance, lower before upper.
    pub fn normalize(guards: &[Guard]) -> Vec<Guard> {
        let mut slots: Vec<(Clock, Option<Guard>, Option<Guard>)> = Vec::new();

        for guard in guards {
            let pos = match slots.iter().position(|(c, _, _)| c == &guard.clock) {
                Some(pos) => pos,
                None => {
                    slots.push((guard.clock.clone(), None, None));
                    slots.len() - 1
                }
            };
            let slot = &mut slots[pos];

            if guard.kind != GuardKind::Upper {
                let lower = Guard::lower(guard.clock.clone(), guard.bound, guard.strict);
                if slot.1.as_ref().map_or(true, |cur| lower.tighter_lower(cur)) {
                    slot.1 = Some(lower);
                }
            }
            if guard.kind != GuardKind::Lower {
                let upper = Guard::upper(guard.clock.clone(), guard.bound, guard.strict);
                if slot.2.as_ref().map_or(true, |cur| upper.tighter_upper(cur)) {
                    slot.2 = Some(upper);
                }
            }
        }

        slots
            .into_iter()
            .flat_map(|(_, lower, upper)| lower.into_iter().chain(upper))
            .collect()
    }

    // Lower bounds grow tighter upwards: x > 3 beats x >= 3 beats x >= 2.
    fn tighter_lower(&self, other: &Guard) -> bool {
        (self.bound, self.strict) > (other.bound, other.strict)
    }

    fn tighter_upper(&self, other: &Guard) -> bool {
        self.raw() < other.raw()
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match (self.kind, self.strict) {
            (GuardKind::Equal, _) => "==",
            (GuardKind::Lower, true) => ">",
            (GuardKind::Lower, false) => ">=",
            (GuardKind::Upper, true) => "<",
            (GuardKind::Upper, false) => "<=",
        };
        write!(f, "{}{}{}", self.clock, op, self.bound)
    }
}
