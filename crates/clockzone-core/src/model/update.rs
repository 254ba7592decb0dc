use std::fmt;

use super::Clock;

/// A clock reset `clock = value` performed by a transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Update {
    clock: Clock,
    value: i32,
}

impl Update {
    pub fn new(clock: Clock, value: i32) -> Self {
        Self { clock, value }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.clock, self.value)
    }
}
