//! Native numeric, tape, and date types.
//!
//! This module provides:
//! - `real`: the AD scalar [`Real`] backed by num-dual's `Dual64`
//! - `tape`: the AD recording context [`Tape`]
//! - `time`: the calendar [`Date`] wrapper
//! - `error`: structured error types for dates and tapes
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod error;
pub mod real;
pub mod tape;
pub mod time;

pub use error::{DateError, TapeError};
pub use real::{Real, TapeSlot};
pub use tape::{Tape, TapeId};
pub use time::Date;
