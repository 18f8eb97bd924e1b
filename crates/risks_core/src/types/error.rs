//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction and parsing
//! - `TapeError`: Errors from tape activation and input registration

use thiserror::Error;

use super::tape::TapeId;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `InvalidSerial`: Serial number outside the representable range
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use risks_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Serial number cannot be mapped to a calendar date.
    #[error("Invalid date serial number: {0}")]
    InvalidSerial(i64),

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Tape lifecycle errors.
///
/// # Examples
/// ```
/// use risks_core::types::{Tape, TapeError};
///
/// let err = TapeError::AlreadyActive { active: Tape::new().id() };
/// assert!(format!("{}", err).contains("already active"));
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapeError {
    /// Another tape is active on the current thread.
    #[error("A tape is already active on this thread (tape {active})")]
    AlreadyActive {
        /// Identifier of the tape currently active
        active: TapeId,
    },

    /// Every input slot index on the tape is taken.
    #[error("Tape {tape} has no free input slot")]
    InputLimit {
        /// Identifier of the full tape
        tape: TapeId,
    },
}
