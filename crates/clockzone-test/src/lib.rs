//! Shared test fixtures for ClockZone crates.
//!
//! This crate provides clock sets, guard shorthands and raw matrices.
//! It does NOT depend on `clockzone-zone` so the zone crate can use it as a
//! dev-dependency without pulling in a second copy of itself.
//!
//! - [`clocks`](mod@clocks) - Clock sets for one or more automata
//! - [`guards`](mod@guards) - One-line guard constructors
//! - [`matrix`](mod@matrix) - Raw DBM buffers built from per-clock bounds
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! clockzone-test = { workspace = true }
//! ```
//!
//! ```
//! use clockzone_test::{clocks, ge, lt};
//!
//! let cs = clocks(&["x", "y"]);
//! let guards = vec![ge(&cs[0], 2), lt(&cs[0], 5)];
//! assert_eq!(guards[0].to_string(), "x>=2");
//! ```

pub mod clocks;
pub mod guards;
pub mod matrix;

pub use clocks::{clocks, scoped_clocks};
pub use guards::{eq, ge, gt, le, lt};
pub use matrix::RawMatrix;
