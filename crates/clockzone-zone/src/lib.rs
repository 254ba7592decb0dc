//! ClockZone Zone - Clock zones over canonical difference bound matrices
//!
//! - [`Zone`]: one canonical DBM with mutation and query operations
//! - Guard ⇄ zone translation and absolute-zone construction
//! - Timeline and lower-bound synchronization between zones
//! - A diagnostic text dump ([`DumpOptions`])
//!
//! # Example
//!
//! ```
//! use clockzone_core::{Clock, Guard};
//! use clockzone_zone::Zone;
//!
//! let clocks = vec![Clock::new("x", 0)];
//! let start: Zone = Zone::new(2, true);
//!
//! let enabled = start
//!     .absolute_zone(&[Guard::lower(clocks[0].clone(), 2, false)], &clocks)
//!     .unwrap();
//! assert_eq!(enabled.lower_bound(1).value(), 2);
//! assert!(enabled.upper_bound(1).is_infinite());
//! ```

mod zone;

pub use clockzone_dbm::{ClosureDbm, DbmLib};
pub use zone::{DumpOptions, Zone};
