//! Clock set fixtures.

use clockzone_core::Clock;

/// Clocks of a single automaton, indexed in the given order.
pub fn clocks(names: &[&str]) -> Vec<Clock> {
    scoped_clocks(0, names)
}

/// Clocks owned by the automaton `scope`.
///
/// Same-named clocks from different scopes compare unequal.
pub fn scoped_clocks(scope: u32, names: &[&str]) -> Vec<Clock> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Clock::scoped(scope, *name, index))
        .collect()
}
