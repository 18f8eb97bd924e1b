//! # risks_core: Native Value Types for the Host Boundary
//!
//! ## Foundation Layer Role
//!
//! risks_core is the bottom layer of the workspace. It defines the native
//! values that the boundary adapter (`adapter_host`) marshals to and from a
//! host scripting runtime:
//! - AD scalar with tangent and tape linkage (`types::real`)
//! - AD recording context (`types::tape`)
//! - Calendar date (`types::time`)
//! - Error types: `DateError`, `TapeError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependency on other workspace crates:
//! - num-dual: forward-mode dual numbers backing [`Real`]
//! - num-traits: `Zero`/`One` for generic numeric code
//! - chrono: date arithmetic
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use risks_core::types::{Date, Real, Tape};
//!
//! let mut tape = Tape::new();
//! let mut spot = Real::new(100.0);
//! tape.register_input(&mut spot).unwrap();
//! assert!(spot.is_registered());
//!
//! let fixing = Date::from_ymd(2024, 6, 15).unwrap();
//! assert_eq!(fixing.to_string(), "2024-06-15");
//! ```

#![warn(missing_docs)]

pub mod types;

pub use types::{Date, DateError, Real, Tape, TapeError, TapeId, TapeSlot};
