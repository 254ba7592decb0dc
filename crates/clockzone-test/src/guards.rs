//! Guard shorthands named after the comparison they build.

use clockzone_core::{Clock, Guard};

/// `clock >= value`
pub fn ge(clock: &Clock, value: i32) -> Guard {
    Guard::lower(clock.clone(), value, false)
}

/// `clock > value`
pub fn gt(clock: &Clock, value: i32) -> Guard {
    Guard::lower(clock.clone(), value, true)
}

/// `clock <= value`
pub fn le(clock: &Clock, value: i32) -> Guard {
    Guard::upper(clock.clone(), value, false)
}

/// `clock < value`
pub fn lt(clock: &Clock, value: i32) -> Guard {
    Guard::upper(clock.clone(), value, true)
}

/// `clock == value`
pub fn eq(clock: &Clock, value: i32) -> Guard {
    Guard::equal(clock.clone(), value)
}
