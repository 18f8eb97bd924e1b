//! Sequence of Real.
//!
//! Accepted host representations: list and tuple literals of numeric
//! elements, and instances of the registered `DoubleVector` class.

use risks_core::types::Real;

use super::{collect_native, list_items, sampled, scalar, sequence_items, tuple_items};
use crate::config::ElementSampling;
use crate::error::{BridgeError, BridgeResult};
use crate::host::{try_collect, HostModule, HostObject, OpaqueObject, Shared};

const SHAPE: &str = "sequence of Real";

/// Shape predicate with first-element sampling.
pub fn check(object: &HostObject) -> bool {
    check_with(object, ElementSampling::First)
}

/// Shape predicate. Opaque instances and empty literals always pass.
pub fn check_with(object: &HostObject, sampling: ElementSampling) -> bool {
    match object {
        HostObject::Opaque(OpaqueObject::RealVector(_)) => true,
        HostObject::List(items) | HostObject::Tuple(items) => {
            sampled(items, sampling).iter().all(scalar::check)
        }
        _ => false,
    }
}

/// Converts a list literal.
pub fn from_list(object: &HostObject) -> BridgeResult<Vec<Real>> {
    convert_items(list_items(object, "list")?)
}

/// Converts a tuple literal.
pub fn from_tuple(object: &HostObject) -> BridgeResult<Vec<Real>> {
    convert_items(tuple_items(object, "tuple")?)
}

/// Converts any accepted representation. Opaque instances are copied.
pub fn from_host(object: &HostObject) -> BridgeResult<Vec<Real>> {
    match object {
        HostObject::Opaque(OpaqueObject::RealVector(v)) => Ok(v.storage().snapshot()),
        other => convert_items(sequence_items(other, SHAPE)?),
    }
}

fn convert_items(items: &[HostObject]) -> BridgeResult<Vec<Real>> {
    tracing::trace!(shape = SHAPE, len = items.len(), "converting to native");
    collect_native(items, scalar::to_native)
}

/// Copies `values` into a new list literal of `Real` proxies.
pub fn to_list(values: &[Real]) -> BridgeResult<HostObject> {
    tracing::trace!(shape = SHAPE, len = values.len(), "converting to list");
    let items = try_collect(values.len(), values.iter().map(|&x| Ok(scalar::to_foreign(x))))?;
    Ok(HostObject::List(items))
}

/// Copies `values` into a new tuple literal of `Real` proxies.
pub fn to_tuple(values: &[Real]) -> BridgeResult<HostObject> {
    tracing::trace!(shape = SHAPE, len = values.len(), "converting to tuple");
    let items = try_collect(values.len(), values.iter().map(|&x| Ok(scalar::to_foreign(x))))?;
    Ok(HostObject::Tuple(items))
}

/// Borrows the storage behind a `DoubleVector` instance without copying.
///
/// Mutations through the returned handle are visible through every other
/// handle to the same instance.
///
/// # Errors
///
/// `BridgeError::Cast` if `object` is not a `DoubleVector` instance.
pub fn shared_ref(object: &HostObject) -> BridgeResult<&Shared<Vec<Real>>> {
    match object {
        HostObject::Opaque(OpaqueObject::RealVector(v)) => Ok(v.storage()),
        other => Err(BridgeError::cast("DoubleVector", other)),
    }
}

/// Moves `values` into a new `DoubleVector` instance on `module`.
///
/// # Errors
///
/// `BridgeError::UnregisteredType` if the module has not been augmented.
pub fn to_opaque(module: &HostModule, values: Vec<Real>) -> BridgeResult<HostObject> {
    module.instantiate(values)
}
