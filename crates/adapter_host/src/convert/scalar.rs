//! AD scalar conversion.
//!
//! A host float or integer converts by value into a fresh [`Real`] with a
//! zero tangent and no tape slot. A `Real` proxy converts by copy, keeping
//! its tangent and tape slot.

use risks_core::types::Real;

use crate::error::{BridgeError, BridgeResult};
use crate::host::HostObject;

/// Returns `true` if `object` converts to a [`Real`]: a float literal, an
/// integer literal (including bool) or a `Real` proxy.
pub fn check(object: &HostObject) -> bool {
    matches!(
        object,
        HostObject::Float(_) | HostObject::Int(_) | HostObject::Bool(_) | HostObject::Real(_)
    )
}

/// Returns `true` only for a `Real` proxy.
pub fn is_native(object: &HostObject) -> bool {
    matches!(object, HostObject::Real(_))
}

/// Converts a host object into a [`Real`].
///
/// # Errors
///
/// `BridgeError::Cast` if `object` is neither numeric nor a `Real` proxy.
pub fn to_native(object: &HostObject) -> BridgeResult<Real> {
    match object {
        HostObject::Float(x) => Ok(Real::new(*x)),
        HostObject::Int(n) => Ok(Real::from(*n)),
        HostObject::Bool(b) => Ok(Real::from(i64::from(*b))),
        HostObject::Real(r) => Ok(*r),
        other => Err(BridgeError::cast("Real", other)),
    }
}

/// Wraps a copy of `value`, AD metadata included, in a new host proxy.
#[inline]
pub fn to_foreign(value: Real) -> HostObject {
    HostObject::Real(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use risks_core::types::Tape;

    #[test]
    fn test_check_accepts_numeric_sources() {
        assert!(check(&HostObject::Float(1.5)));
        assert!(check(&HostObject::Int(3)));
        assert!(check(&HostObject::Bool(true)));
        assert!(check(&HostObject::Real(Real::new(1.0))));
        assert!(!check(&HostObject::Str("1.0".to_string())));
        assert!(!check(&HostObject::None));
        assert!(!check(&HostObject::list([1.0])));
    }

    #[test]
    fn test_is_native_is_strict() {
        assert!(is_native(&HostObject::Real(Real::new(1.0))));
        assert!(!is_native(&HostObject::Float(1.0)));
        assert!(!is_native(&HostObject::Int(1)));
    }

    #[test]
    fn test_to_native_by_value() {
        assert_relative_eq!(to_native(&HostObject::Float(2.5)).unwrap().value(), 2.5);
        assert_eq!(to_native(&HostObject::Int(-7)).unwrap().value(), -7.0);
        assert_eq!(to_native(&HostObject::Bool(true)).unwrap().value(), 1.0);
        assert_eq!(to_native(&HostObject::Float(2.5)).unwrap().derivative(), 0.0);
    }

    #[test]
    fn test_to_native_large_integer_is_exact() {
        let n = 1_i64 << 53;
        assert_eq!(to_native(&HostObject::Int(n)).unwrap().value(), n as f64);
    }

    #[test]
    fn test_native_round_trip_keeps_ad_linkage() {
        let mut tape = Tape::new();
        let mut x = Real::with_derivative(3.0, 1.0);
        tape.register_input(&mut x).unwrap();

        let back = to_native(&to_foreign(x)).unwrap();
        assert_eq!(back.value(), 3.0);
        assert_eq!(back.derivative(), 1.0);
        assert_eq!(back.slot(), x.slot());
    }

    #[test]
    fn test_to_native_rejects_other_types() {
        let err = to_native(&HostObject::Str("x".to_string())).unwrap_err();
        assert_eq!(
            err,
            BridgeError::Cast {
                expected: "Real",
                found: "str".to_string()
            }
        );
    }
}
