//! Host runtime model.
//!
//! This module provides:
//! - [`HostObject`]: tagged values crossing the boundary
//! - [`Shared`]: reference-counted storage behind mutable host objects
//! - [`OpaqueObject`]: registered container instances
//! - [`HostModule`]: the module registry augmented by the registrar

mod module;
mod object;
mod opaque;
mod shared;

pub use module::{ClassBinding, ConstructorFn, FunctionFn, HostModule, MethodFn};
pub use object::HostObject;
pub use opaque::{ContainerKind, Opaque, OpaqueObject, OpaqueStorage};
pub use shared::Shared;

pub(crate) use object::try_collect;
