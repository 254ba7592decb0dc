//! ClockZone Core - Bound encoding and model records for zone arithmetic
//!
//! This crate provides the fundamental building blocks shared by every
//! layer of the engine:
//! - The raw bound codec used inside difference bound matrices
//! - Human-readable [`Bound`] values
//! - Model records produced by the automaton parser ([`Clock`], [`Guard`], [`Update`])
//! - The [`ZoneError`] type

pub mod bound;
pub mod error;
pub mod model;

pub use bound::{
    add_raw, decode, encode, is_strict, negate_to_upper_bound, Bound, Raw, DBM_INF,
    DBM_INFINITY, LE_ZERO, LS_ZERO, MAX_FINITE_BOUND,
};
pub use error::{Result, ZoneError};
pub use model::{Clock, Guard, GuardKind, Update};
