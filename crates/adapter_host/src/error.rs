//! Error types for the boundary adapter.
//!
//! This module provides:
//! - `BridgeError`: every failure a conversion or container operation can raise
//! - `HostException`: the host-visible exception a `BridgeError` maps to
//!
//! Errors are raised at the point of failure and propagate unmodified to the
//! host. Nothing is retried.

use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

use crate::host::HostObject;

/// Result type used throughout the adapter.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Boundary adapter errors.
///
/// # Examples
/// ```
/// use adapter_host::error::BridgeError;
///
/// let err = BridgeError::Length { shape: "pair of Real", expected: 2, found: 1 };
/// assert_eq!(
///     format!("{}", err),
///     "Length error: pair of Real requires 2 elements, got 1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Host object's type does not match the expected native type.
    #[error("Cast error: expected {expected}, got {found}")]
    Cast {
        /// Expected native shape or type
        expected: &'static str,
        /// Host type name that was found
        found: String,
    },

    /// Fixed-arity container has the wrong element count.
    #[error("Length error: {shape} requires {expected} elements, got {found}")]
    Length {
        /// Shape being converted
        shape: &'static str,
        /// Required element count
        expected: usize,
        /// Actual element count
        found: usize,
    },

    /// Host runtime could not allocate a result object.
    #[error("Allocation error: {0}")]
    Allocation(String),

    /// Element access or removal on an empty container.
    #[error("{class}.{operation}() called on an empty container")]
    EmptyContainer {
        /// Container class name
        class: String,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Index outside the container bounds.
    #[error("Index {index} out of range for container of length {len}")]
    Index {
        /// Requested index (before normalisation)
        index: i64,
        /// Container length
        len: usize,
    },

    /// Negative repeat count.
    #[error("Invalid repeat count {0}: must be non-negative")]
    InvalidCount(i64),

    /// Opaque conversion requested before the class was registered.
    #[error("Unregistered type: {0} has not been registered with the host module")]
    UnregisteredType(String),

    /// A class or function with this name is already defined on the module.
    #[error("'{0}' is already defined on the host module")]
    DuplicateClass(String),

    /// Method is not defined on the class.
    #[error("'{class}' object has no attribute '{method}'")]
    UnknownMethod {
        /// Container class name
        class: String,
        /// Requested method name
        method: String,
    },

    /// Function is not defined on the module.
    #[error("module has no attribute '{0}'")]
    UnknownFunction(String),

    /// No registered overload accepts the argument types.
    #[error("{class}.{method}(): incompatible function arguments ({args})")]
    NoMatchingOverload {
        /// Class or module name
        class: String,
        /// Method or function name
        method: String,
        /// Host type names of the arguments
        args: String,
    },

    /// Invalid bridge configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BridgeError {
    /// Cast error for `found`, which should have been `expected`.
    pub fn cast(expected: &'static str, found: &HostObject) -> Self {
        BridgeError::Cast {
            expected,
            found: found.type_name().to_string(),
        }
    }

    /// Overload failure for `class.method(args...)`.
    pub fn no_overload(class: &str, method: &str, args: &[HostObject]) -> Self {
        let args = args
            .iter()
            .map(HostObject::type_name)
            .collect::<Vec<_>>()
            .join(", ");
        BridgeError::NoMatchingOverload {
            class: class.to_string(),
            method: method.to_string(),
            args,
        }
    }

    /// Returns the host exception class this error maps to.
    pub fn exception_kind(&self) -> ExceptionKind {
        match self {
            BridgeError::Cast { .. }
            | BridgeError::NoMatchingOverload { .. }
            | BridgeError::UnregisteredType(_) => ExceptionKind::TypeError,
            BridgeError::Length { .. }
            | BridgeError::InvalidCount(_)
            | BridgeError::DuplicateClass(_)
            | BridgeError::Config(_) => ExceptionKind::ValueError,
            BridgeError::Allocation(_) => ExceptionKind::MemoryError,
            BridgeError::EmptyContainer { .. } | BridgeError::Index { .. } => {
                ExceptionKind::IndexError
            }
            BridgeError::UnknownMethod { .. } | BridgeError::UnknownFunction(_) => {
                ExceptionKind::AttributeError
            }
        }
    }
}

impl From<TryReserveError> for BridgeError {
    fn from(err: TryReserveError) -> Self {
        BridgeError::Allocation(err.to_string())
    }
}

/// Host exception classes raised by the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// Wrong argument or object type
    TypeError,
    /// Right type, wrong value (length, count)
    ValueError,
    /// Allocation failure
    MemoryError,
    /// Bounds violation
    IndexError,
    /// Missing method or function
    AttributeError,
}

impl ExceptionKind {
    /// Host-visible exception class name.
    pub fn name(self) -> &'static str {
        match self {
            ExceptionKind::TypeError => "TypeError",
            ExceptionKind::ValueError => "ValueError",
            ExceptionKind::MemoryError => "MemoryError",
            ExceptionKind::IndexError => "IndexError",
            ExceptionKind::AttributeError => "AttributeError",
        }
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exception raised in the host when a boundary call fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct HostException {
    /// Exception class
    pub kind: ExceptionKind,
    /// Message carried by the exception
    pub message: String,
}

impl From<BridgeError> for HostException {
    fn from(err: BridgeError) -> Self {
        HostException {
            kind: err.exception_kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_error_names_host_type() {
        let err = BridgeError::cast("Real", &HostObject::Str("x".to_string()));
        assert_eq!(err.to_string(), "Cast error: expected Real, got str");
        assert_eq!(err.exception_kind(), ExceptionKind::TypeError);
    }

    #[test]
    fn test_no_overload_lists_argument_types() {
        let err = BridgeError::no_overload(
            "DoubleVector",
            "append",
            &[HostObject::Str("a".to_string()), HostObject::None],
        );
        assert!(err.to_string().contains("(str, NoneType)"));
    }

    #[test]
    fn test_exception_mapping() {
        let cases = [
            (
                BridgeError::Length {
                    shape: "pair of Real",
                    expected: 2,
                    found: 3,
                },
                ExceptionKind::ValueError,
            ),
            (
                BridgeError::Allocation("capacity overflow".to_string()),
                ExceptionKind::MemoryError,
            ),
            (
                BridgeError::EmptyContainer {
                    class: "DoubleVector".to_string(),
                    operation: "front",
                },
                ExceptionKind::IndexError,
            ),
            (
                BridgeError::UnknownFunction("missing".to_string()),
                ExceptionKind::AttributeError,
            ),
            (
                BridgeError::UnregisteredType("DoubleVector".to_string()),
                ExceptionKind::TypeError,
            ),
        ];
        for (err, kind) in cases {
            let exc = HostException::from(err.clone());
            assert_eq!(exc.kind, kind);
            assert_eq!(exc.message, err.to_string());
        }
    }

    #[test]
    fn test_allocation_from_try_reserve() {
        let mut v: Vec<u64> = Vec::new();
        let err = BridgeError::from(v.try_reserve_exact(usize::MAX).unwrap_err());
        assert!(matches!(err, BridgeError::Allocation(_)));
    }

    #[test]
    fn test_host_exception_display() {
        let exc = HostException::from(BridgeError::InvalidCount(-2));
        assert_eq!(
            exc.to_string(),
            "ValueError: Invalid repeat count -2: must be non-negative"
        );
    }
}
