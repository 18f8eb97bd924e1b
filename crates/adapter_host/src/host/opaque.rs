//! Opaque container instances.
//!
//! An opaque container is a native collection exposed to the host as a
//! first-class mutable object. Host code manipulates it through the methods
//! registered on its class, acting directly on the native storage.

use std::fmt;
use std::rc::Rc;

use risks_core::types::Real;

use super::shared::Shared;

/// Native storage kinds that can be registered as opaque classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerKind {
    /// `Vec<Real>`
    RealVector,
    /// `Vec<Vec<Real>>`
    RealVectorVector,
    /// `Vec<(Real, Real)>`
    RealPairVector,
}

impl ContainerKind {
    /// All container kinds, in registration order.
    pub const ALL: [ContainerKind; 3] = [
        ContainerKind::RealVector,
        ContainerKind::RealVectorVector,
        ContainerKind::RealPairVector,
    ];

    /// Class name used when no override is configured.
    pub fn default_class_name(self) -> &'static str {
        match self {
            ContainerKind::RealVector => "DoubleVector",
            ContainerKind::RealVectorVector => "DoubleVectorVector",
            ContainerKind::RealPairVector => "DoublePairVector",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_class_name())
    }
}

/// Handle to an opaque container: its class name plus shared storage.
#[derive(Debug)]
pub struct Opaque<T> {
    class: Rc<str>,
    storage: Shared<T>,
}

impl<T> Opaque<T> {
    pub(crate) fn new(class: Rc<str>, value: T) -> Self {
        Self {
            class,
            storage: Shared::new(value),
        }
    }

    /// Returns the registered class name.
    #[inline]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the backing storage. The returned handle aliases it.
    #[inline]
    pub fn storage(&self) -> &Shared<T> {
        &self.storage
    }
}

impl<T> Clone for Opaque<T> {
    fn clone(&self) -> Self {
        Self {
            class: Rc::clone(&self.class),
            storage: self.storage.clone(),
        }
    }
}

/// A registered container instance held by the host.
#[derive(Clone, Debug)]
pub enum OpaqueObject {
    /// Sequence of Real
    RealVector(Opaque<Vec<Real>>),
    /// Sequence of sequences of Real
    RealVectorVector(Opaque<Vec<Vec<Real>>>),
    /// Sequence of Real pairs
    RealPairVector(Opaque<Vec<(Real, Real)>>),
}

impl OpaqueObject {
    /// Returns the container kind.
    pub fn kind(&self) -> ContainerKind {
        match self {
            OpaqueObject::RealVector(_) => ContainerKind::RealVector,
            OpaqueObject::RealVectorVector(_) => ContainerKind::RealVectorVector,
            OpaqueObject::RealPairVector(_) => ContainerKind::RealPairVector,
        }
    }

    /// Returns the registered class name.
    pub fn class(&self) -> &str {
        match self {
            OpaqueObject::RealVector(o) => o.class(),
            OpaqueObject::RealVectorVector(o) => o.class(),
            OpaqueObject::RealPairVector(o) => o.class(),
        }
    }

    /// Returns the number of elements in the backing storage.
    pub fn len(&self) -> usize {
        match self {
            OpaqueObject::RealVector(o) => o.storage().borrow().len(),
            OpaqueObject::RealVectorVector(o) => o.storage().borrow().len(),
            OpaqueObject::RealPairVector(o) => o.storage().borrow().len(),
        }
    }

    /// Returns `true` if the backing storage holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both objects share backing storage.
    pub fn is_same(&self, other: &OpaqueObject) -> bool {
        match (self, other) {
            (OpaqueObject::RealVector(a), OpaqueObject::RealVector(b)) => {
                a.storage().ptr_eq(b.storage())
            }
            (OpaqueObject::RealVectorVector(a), OpaqueObject::RealVectorVector(b)) => {
                a.storage().ptr_eq(b.storage())
            }
            (OpaqueObject::RealPairVector(a), OpaqueObject::RealPairVector(b)) => {
                a.storage().ptr_eq(b.storage())
            }
            _ => false,
        }
    }

    /// Returns the typed handle if this object stores `T`.
    pub fn downcast<T: OpaqueStorage>(&self) -> Option<&Opaque<T>> {
        T::unwrap(self)
    }
}

/// Native storage types that back an opaque class.
pub trait OpaqueStorage: Sized {
    /// Container kind of this storage.
    const KIND: ContainerKind;

    /// Wraps a typed handle into an [`OpaqueObject`].
    fn wrap(opaque: Opaque<Self>) -> OpaqueObject;

    /// Extracts the typed handle, if `object` stores `Self`.
    fn unwrap(object: &OpaqueObject) -> Option<&Opaque<Self>>;
}

impl OpaqueStorage for Vec<Real> {
    const KIND: ContainerKind = ContainerKind::RealVector;

    fn wrap(opaque: Opaque<Self>) -> OpaqueObject {
        OpaqueObject::RealVector(opaque)
    }

    fn unwrap(object: &OpaqueObject) -> Option<&Opaque<Self>> {
        match object {
            OpaqueObject::RealVector(o) => Some(o),
            _ => None,
        }
    }
}

impl OpaqueStorage for Vec<Vec<Real>> {
    const KIND: ContainerKind = ContainerKind::RealVectorVector;

    fn wrap(opaque: Opaque<Self>) -> OpaqueObject {
        OpaqueObject::RealVectorVector(opaque)
    }

    fn unwrap(object: &OpaqueObject) -> Option<&Opaque<Self>> {
        match object {
            OpaqueObject::RealVectorVector(o) => Some(o),
            _ => None,
        }
    }
}

impl OpaqueStorage for Vec<(Real, Real)> {
    const KIND: ContainerKind = ContainerKind::RealPairVector;

    fn wrap(opaque: Opaque<Self>) -> OpaqueObject {
        OpaqueObject::RealPairVector(opaque)
    }

    fn unwrap(object: &OpaqueObject) -> Option<&Opaque<Self>> {
        match object {
            OpaqueObject::RealPairVector(o) => Some(o),
            _ => None,
        }
    }
}
