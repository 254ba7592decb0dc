//! clockzone - Clock Zones in Rust
//!
//! Difference-bound-matrix zones for timed-automata analysis: guard
//! translation, absolute zones and timeline synchronization on top of a
//! closure-maintaining matrix backend.
//!
//! # Example
//!
//! ```rust
//! use clockzone::prelude::*;
//!
//! let x = Clock::new("x", 0);
//! let clocks = vec![x.clone()];
//!
//! let start: Zone = Zone::new(2, true);
//! let enabled = start
//!     .absolute_zone(&[Guard::lower(x, 2, false)], &clocks)
//!     .unwrap();
//!
//! assert_eq!(enabled.lower_bound(1), Bound::le(2));
//! assert!(enabled.upper_bound(1).is_infinite());
//! ```

// Bound codec
pub use clockzone_core::{
    add_raw, decode, encode, is_strict, negate_to_upper_bound, Bound, Raw, DBM_INF, DBM_INFINITY,
    LE_ZERO, LS_ZERO, MAX_FINITE_BOUND,
};

// Model records
pub use clockzone_core::{Clock, Guard, GuardKind, Update};

// Errors
pub use clockzone_core::{Result, ZoneError};

// Matrix backends
pub use clockzone_dbm::{ClosureDbm, DbmLib};

// Zones
pub use clockzone_zone::{DumpOptions, Zone};

// Configuration
pub use clockzone_config::{ConfigError, DumpConfig, ExtrapolationConfig, ZoneConfig};

/// Colored `tracing` output.
#[cfg(feature = "console")]
pub use clockzone_console as console;

pub mod prelude {
    pub use super::{Bound, Clock, Guard, GuardKind, Raw, Update};
    pub use super::{ClosureDbm, DbmLib, DumpOptions, Zone, ZoneError};
    pub use super::{ZoneConfig, DBM_INF, LE_ZERO};
}
