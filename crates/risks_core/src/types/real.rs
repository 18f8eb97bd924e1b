//! AD scalar with derivative and tape linkage.
//!
//! [`Real`] couples a forward-mode dual number (num-dual's `Dual64`) with an
//! optional [`TapeSlot`] that records which tape registered the value as an
//! input. Copying a `Real` copies all three parts, so a value passed through
//! the host boundary keeps its AD linkage.
//!
//! ## Usage
//!
//! ```rust
//! use risks_core::types::Real;
//!
//! // Seed the tangent of x with 1.0 to track d/dx
//! let x = Real::with_derivative(3.0, 1.0);
//! let y = Real::new(5.0);
//!
//! let z = x * y + x;
//! assert_eq!(z.value(), 18.0);
//! assert_eq!(z.derivative(), 6.0);
//! ```

use num_dual::Dual64;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::tape::TapeId;

/// Position of a registered input on a tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TapeSlot {
    /// Tape that registered the input
    pub tape: TapeId,
    /// Input index on that tape
    pub index: u32,
}

/// AD scalar: primal value, tangent, and optional tape slot.
///
/// Equality and ordering compare primal values only, matching how the
/// numerical library compares its active reals.
#[derive(Clone, Copy, Debug)]
pub struct Real {
    dual: Dual64,
    slot: Option<TapeSlot>,
}

impl Real {
    /// Creates a passive value with zero tangent.
    #[inline]
    pub fn new(value: f64) -> Self {
        Self::with_derivative(value, 0.0)
    }

    /// Creates a value with the given tangent.
    #[inline]
    pub fn with_derivative(value: f64, derivative: f64) -> Self {
        Self {
            dual: Dual64::new(value, derivative),
            slot: None,
        }
    }

    /// Returns the primal value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.dual.re
    }

    /// Returns the tangent.
    #[inline]
    pub fn derivative(&self) -> f64 {
        self.dual.eps
    }

    /// Sets the tangent.
    #[inline]
    pub fn set_derivative(&mut self, derivative: f64) {
        self.dual.eps = derivative;
    }

    /// Returns the underlying dual number.
    #[inline]
    pub fn dual(&self) -> Dual64 {
        self.dual
    }

    /// Returns the tape slot, if this value was registered as an input.
    #[inline]
    pub fn slot(&self) -> Option<TapeSlot> {
        self.slot
    }

    /// Returns `true` if this value is registered on a tape.
    #[inline]
    pub fn is_registered(&self) -> bool {
        self.slot.is_some()
    }

    pub(crate) fn set_slot(&mut self, slot: TapeSlot) {
        self.slot = Some(slot);
    }
}

impl Default for Real {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i64> for Real {
    fn from(value: i64) -> Self {
        Self::new(value as f64)
    }
}

impl From<i32> for Real {
    fn from(value: i32) -> Self {
        Self::new(f64::from(value))
    }
}

impl From<Dual64> for Real {
    fn from(dual: Dual64) -> Self {
        Self { dual, slot: None }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl PartialEq<f64> for Real {
    fn eq(&self, other: &f64) -> bool {
        self.value() == *other
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value().partial_cmp(&other.value())
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident) => {
        impl $trait for Real {
            type Output = Real;

            #[inline]
            fn $method(self, rhs: Real) -> Real {
                Real::from(self.dual.$method(rhs.dual))
            }
        }

        impl $trait<f64> for Real {
            type Output = Real;

            #[inline]
            fn $method(self, rhs: f64) -> Real {
                Real::from(self.dual.$method(Dual64::from(rhs)))
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);
impl_binary_op!(Div, div);

impl Neg for Real {
    type Output = Real;

    #[inline]
    fn neg(self) -> Real {
        Real::from(-self.dual)
    }
}

impl Zero for Real {
    fn zero() -> Self {
        Real::new(0.0)
    }

    fn is_zero(&self) -> bool {
        self.value() == 0.0
    }
}

impl One for Real {
    fn one() -> Self {
        Real::new(1.0)
    }
}
