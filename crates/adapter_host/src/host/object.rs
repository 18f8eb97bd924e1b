//! Host runtime object model.
//!
//! [`HostObject`] is the tagged representation of every value that crosses
//! the boundary. Shape detection inspects only these tags (and, for
//! containers, lengths and sampled element tags).

use risks_core::types::{Date, Real, Tape};

use super::opaque::OpaqueObject;
use super::shared::Shared;
use crate::error::BridgeResult;

/// A value owned by the host runtime.
///
/// List and tuple literals have value semantics: cloning them copies the
/// elements. Opaque containers and tapes are reference-counted: cloning
/// them aliases the native storage.
#[derive(Clone, Debug)]
pub enum HostObject {
    /// The host null value
    None,
    /// Boolean literal (a subtype of the integer literal)
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating-point literal
    Float(f64),
    /// String literal
    Str(String),
    /// Mutable list literal
    List(Vec<HostObject>),
    /// Immutable tuple literal
    Tuple(Vec<HostObject>),
    /// AD scalar proxy
    Real(Real),
    /// Calendar date proxy
    Date(Date),
    /// AD tape proxy
    Tape(Shared<Tape>),
    /// Registered opaque container instance
    Opaque(OpaqueObject),
}

impl HostObject {
    /// Builds a list literal.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<HostObject>,
    {
        HostObject::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a tuple literal.
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<HostObject>,
    {
        HostObject::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Host-visible type name, as used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            HostObject::None => "NoneType",
            HostObject::Bool(_) => "bool",
            HostObject::Int(_) => "int",
            HostObject::Float(_) => "float",
            HostObject::Str(_) => "str",
            HostObject::List(_) => "list",
            HostObject::Tuple(_) => "tuple",
            HostObject::Real(_) => "Real",
            HostObject::Date(_) => "Date",
            HostObject::Tape(_) => "Tape",
            HostObject::Opaque(o) => o.class(),
        }
    }

    /// Returns `true` for integer literals, including booleans.
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, HostObject::Int(_) | HostObject::Bool(_))
    }

    /// Returns the elements of a list or tuple literal.
    pub fn as_sequence(&self) -> Option<&[HostObject]> {
        match self {
            HostObject::List(items) | HostObject::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the opaque container, if this is one.
    pub fn as_opaque(&self) -> Option<&OpaqueObject> {
        match self {
            HostObject::Opaque(o) => Some(o),
            _ => None,
        }
    }

    /// Returns `true` if both objects are the same host object: the same
    /// opaque storage or the same tape. Literals are never identical.
    pub fn is(&self, other: &HostObject) -> bool {
        match (self, other) {
            (HostObject::Opaque(a), HostObject::Opaque(b)) => a.is_same(b),
            (HostObject::Tape(a), HostObject::Tape(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Collects converted elements into freshly allocated host storage.
///
/// The storage is reserved up front with a fallible reservation, so a host
/// that cannot provide it yields `BridgeError::Allocation`.
pub(crate) fn try_collect<I>(len: usize, items: I) -> BridgeResult<Vec<HostObject>>
where
    I: IntoIterator<Item = BridgeResult<HostObject>>,
{
    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    for item in items {
        out.push(item?);
    }
    Ok(out)
}

impl PartialEq for HostObject {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostObject::None, HostObject::None) => true,
            (HostObject::Bool(a), HostObject::Bool(b)) => a == b,
            (HostObject::Int(a), HostObject::Int(b)) => a == b,
            (HostObject::Float(a), HostObject::Float(b)) => a == b,
            (HostObject::Str(a), HostObject::Str(b)) => a == b,
            (HostObject::List(a), HostObject::List(b)) => a == b,
            (HostObject::Tuple(a), HostObject::Tuple(b)) => a == b,
            (HostObject::Real(a), HostObject::Real(b)) => a == b,
            (HostObject::Date(a), HostObject::Date(b)) => a == b,
            _ => self.is(other),
        }
    }
}

impl From<f64> for HostObject {
    fn from(value: f64) -> Self {
        HostObject::Float(value)
    }
}

impl From<i64> for HostObject {
    fn from(value: i64) -> Self {
        HostObject::Int(value)
    }
}

impl From<i32> for HostObject {
    fn from(value: i32) -> Self {
        HostObject::Int(i64::from(value))
    }
}

impl From<bool> for HostObject {
    fn from(value: bool) -> Self {
        HostObject::Bool(value)
    }
}

impl From<&str> for HostObject {
    fn from(value: &str) -> Self {
        HostObject::Str(value.to_string())
    }
}

impl From<Real> for HostObject {
    fn from(value: Real) -> Self {
        HostObject::Real(value)
    }
}

impl From<Date> for HostObject {
    fn from(value: Date) -> Self {
        HostObject::Date(value)
    }
}

impl From<Shared<Tape>> for HostObject {
    fn from(value: Shared<Tape>) -> Self {
        HostObject::Tape(value)
    }
}

impl From<OpaqueObject> for HostObject {
    fn from(value: OpaqueObject) -> Self {
        HostObject::Opaque(value)
    }
}
