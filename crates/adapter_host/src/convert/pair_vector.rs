//! Sequence of Real pairs.
//!
//! Accepted host representations: list and tuple literals whose elements
//! are two-element list or tuple literals of numeric values, and instances
//! of the registered `DoublePairVector` class.

use super::{collect_native, list_items, pair, sampled, sequence_items, tuple_items, RealPair};
use crate::config::ElementSampling;
use crate::error::{BridgeError, BridgeResult};
use crate::host::{try_collect, HostModule, HostObject, OpaqueObject, Shared};

const SHAPE: &str = "sequence of Real pairs";

/// Shape predicate with first-element sampling.
pub fn check(object: &HostObject) -> bool {
    check_with(object, ElementSampling::First)
}

/// Shape predicate. Opaque instances and empty literals always pass.
pub fn check_with(object: &HostObject, sampling: ElementSampling) -> bool {
    match object {
        HostObject::Opaque(OpaqueObject::RealPairVector(_)) => true,
        HostObject::List(items) | HostObject::Tuple(items) => {
            sampled(items, sampling).iter().all(pair::check)
        }
        _ => false,
    }
}

/// Converts a list literal of pairs.
pub fn from_list(object: &HostObject) -> BridgeResult<Vec<RealPair>> {
    convert_items(list_items(object, "list")?)
}

/// Converts a tuple literal of pairs.
pub fn from_tuple(object: &HostObject) -> BridgeResult<Vec<RealPair>> {
    convert_items(tuple_items(object, "tuple")?)
}

/// Converts any accepted representation. Opaque instances are copied.
pub fn from_host(object: &HostObject) -> BridgeResult<Vec<RealPair>> {
    match object {
        HostObject::Opaque(OpaqueObject::RealPairVector(v)) => Ok(v.storage().snapshot()),
        other => convert_items(sequence_items(other, SHAPE)?),
    }
}

fn convert_items(items: &[HostObject]) -> BridgeResult<Vec<RealPair>> {
    tracing::trace!(shape = SHAPE, len = items.len(), "converting to native");
    collect_native(items, pair::from_host)
}

/// New list literal of two-element tuples.
pub fn to_list(pairs: &[RealPair]) -> BridgeResult<HostObject> {
    tracing::trace!(shape = SHAPE, len = pairs.len(), "converting to list");
    try_collect(pairs.len(), pairs.iter().map(pair::to_tuple)).map(HostObject::List)
}

/// New tuple literal of two-element tuples.
pub fn to_tuple(pairs: &[RealPair]) -> BridgeResult<HostObject> {
    tracing::trace!(shape = SHAPE, len = pairs.len(), "converting to tuple");
    try_collect(pairs.len(), pairs.iter().map(pair::to_tuple)).map(HostObject::Tuple)
}

/// Borrows the storage behind a `DoublePairVector` instance without copying.
pub fn shared_ref(object: &HostObject) -> BridgeResult<&Shared<Vec<RealPair>>> {
    match object {
        HostObject::Opaque(OpaqueObject::RealPairVector(v)) => Ok(v.storage()),
        other => Err(BridgeError::cast("DoublePairVector", other)),
    }
}

/// Moves `pairs` into a new `DoublePairVector` instance on `module`.
pub fn to_opaque(module: &HostModule, pairs: Vec<RealPair>) -> BridgeResult<HostObject> {
    module.instantiate(pairs)
}
