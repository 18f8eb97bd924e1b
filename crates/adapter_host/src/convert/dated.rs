//! Date/Real pairs and sequences of them.
//!
//! Dates cross the boundary by identity: the converted date is the exact
//! calendar day the host proxy holds.

use risks_core::types::Date;

use super::{
    collect_native, fixed, list_items, sampled, scalar, sequence_items, tuple_items, DatedReal,
};
use crate::config::ElementSampling;
use crate::error::{BridgeError, BridgeResult};
use crate::host::{try_collect, HostObject};

const PAIR_SHAPE: &str = "pair of Date and Real";
const VECTOR_SHAPE: &str = "sequence of Date and Real pairs";

/// Returns `true` for a two-element list or tuple holding a `Date` proxy
/// followed by a numeric value.
pub fn check_pair(object: &HostObject) -> bool {
    object.as_sequence().is_some_and(|items| {
        items.len() == 2 && matches!(items[0], HostObject::Date(_)) && scalar::check(&items[1])
    })
}

/// Converts a `(Date, Real)` tuple literal.
pub fn pair_from_tuple(object: &HostObject) -> BridgeResult<DatedReal> {
    convert_pair(tuple_items(object, "tuple")?)
}

/// Converts a `[Date, Real]` list literal.
pub fn pair_from_list(object: &HostObject) -> BridgeResult<DatedReal> {
    convert_pair(list_items(object, "list")?)
}

/// Converts a two-element list or tuple literal.
pub fn pair_from_host(object: &HostObject) -> BridgeResult<DatedReal> {
    convert_pair(sequence_items(object, PAIR_SHAPE)?)
}

fn convert_pair(items: &[HostObject]) -> BridgeResult<DatedReal> {
    let [date, value] = fixed::<2>(items, PAIR_SHAPE)?;
    Ok((date_to_native(date)?, scalar::to_native(value)?))
}

fn date_to_native(object: &HostObject) -> BridgeResult<Date> {
    match object {
        HostObject::Date(d) => Ok(*d),
        other => Err(BridgeError::cast("Date", other)),
    }
}

/// New `(Date, Real)` tuple literal.
pub fn pair_to_tuple(&(date, value): &DatedReal) -> HostObject {
    HostObject::Tuple(vec![HostObject::Date(date), scalar::to_foreign(value)])
}

/// Sequence predicate with first-element sampling.
pub fn check_vector(object: &HostObject) -> bool {
    check_vector_with(object, ElementSampling::First)
}

/// Sequence predicate. Empty literals always pass.
pub fn check_vector_with(object: &HostObject, sampling: ElementSampling) -> bool {
    object
        .as_sequence()
        .is_some_and(|items| sampled(items, sampling).iter().all(check_pair))
}

/// Converts a list literal of pairs.
pub fn vector_from_list(object: &HostObject) -> BridgeResult<Vec<DatedReal>> {
    convert_vector(list_items(object, "list")?)
}

/// Converts a tuple literal of pairs.
pub fn vector_from_tuple(object: &HostObject) -> BridgeResult<Vec<DatedReal>> {
    convert_vector(tuple_items(object, "tuple")?)
}

/// Converts a list or tuple literal of pairs.
pub fn vector_from_host(object: &HostObject) -> BridgeResult<Vec<DatedReal>> {
    convert_vector(sequence_items(object, VECTOR_SHAPE)?)
}

fn convert_vector(items: &[HostObject]) -> BridgeResult<Vec<DatedReal>> {
    tracing::trace!(shape = VECTOR_SHAPE, len = items.len(), "converting to native");
    collect_native(items, pair_from_host)
}

/// New list literal of `(Date, Real)` tuples.
pub fn vector_to_list(pairs: &[DatedReal]) -> BridgeResult<HostObject> {
    try_collect(pairs.len(), pairs.iter().map(|p| Ok(pair_to_tuple(p)))).map(HostObject::List)
}

/// New tuple literal of `(Date, Real)` tuples.
pub fn vector_to_tuple(pairs: &[DatedReal]) -> BridgeResult<HostObject> {
    try_collect(pairs.len(), pairs.iter().map(|p| Ok(pair_to_tuple(p)))).map(HostObject::Tuple)
}
