//! Model records handed to the zone engine by the automaton layer.
//!
//! Clocks are referenced by identity, never by name: two automata may both
//! declare `x`, and those clocks stay distinct.

mod clock;
mod guard;
mod update;


pub use clock::Clock;
pub use guard::{Guard, GuardKind};
pub use update::Update;
