//! Pair of Real sequences.
//!
//! Accepted host representations: two-element list or tuple literals whose
//! elements are sequences of Real. There is no opaque class for this shape.

use super::{fixed, list_items, sequence_items, tuple_items, vector, RealVectorPair};
use crate::config::ElementSampling;
use crate::error::BridgeResult;
use crate::host::HostObject;

const SHAPE: &str = "pair of Real sequences";

/// Shape predicate with first-element sampling of each sequence.
pub fn check(object: &HostObject) -> bool {
    check_with(object, ElementSampling::First)
}

/// Shape predicate.
pub fn check_with(object: &HostObject, sampling: ElementSampling) -> bool {
    object.as_sequence().is_some_and(|items| {
        items.len() == 2 && items.iter().all(|v| vector::check_with(v, sampling))
    })
}

/// Converts a two-element list literal.
pub fn from_list(object: &HostObject) -> BridgeResult<RealVectorPair> {
    convert_items(list_items(object, "list")?)
}

/// Converts a two-element tuple literal.
pub fn from_tuple(object: &HostObject) -> BridgeResult<RealVectorPair> {
    convert_items(tuple_items(object, "tuple")?)
}

/// Converts a two-element list or tuple literal.
pub fn from_host(object: &HostObject) -> BridgeResult<RealVectorPair> {
    convert_items(sequence_items(object, SHAPE)?)
}

fn convert_items(items: &[HostObject]) -> BridgeResult<RealVectorPair> {
    let [first, second] = fixed::<2>(items, SHAPE)?;
    tracing::trace!(shape = SHAPE, "converting to native");
    Ok((vector::from_host(first)?, vector::from_host(second)?))
}

/// New tuple literal holding two tuple literals.
pub fn to_tuple((first, second): &RealVectorPair) -> BridgeResult<HostObject> {
    Ok(HostObject::Tuple(vec![
        vector::to_tuple(first)?,
        vector::to_tuple(second)?,
    ]))
}

/// New list literal holding two list literals.
pub fn to_list((first, second): &RealVectorPair) -> BridgeResult<HostObject> {
    Ok(HostObject::List(vec![
        vector::to_list(first)?,
        vector::to_list(second)?,
    ]))
}
