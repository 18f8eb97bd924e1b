//! Shape converters.
//!
//! One module per container shape. Each co-locates the shape predicate
//! (`check`, `check_with`) with the converters it guards:
//!
//! - `from_list` / `from_tuple`: literal of the named kind to native (copy)
//! - `from_host`: any accepted representation to native (copy); this is the
//!   converter the predicate is paired with
//! - `to_list` / `to_tuple`: native to a fresh host literal (copy)
//! - `shared_ref` / `to_opaque`: borrow-style access to, and creation of,
//!   registered opaque containers (no copy on access)
//!
//! Container predicates sample elements according to [`ElementSampling`]:
//! `check` uses the first-element fast path, so a container whose later
//! elements are incompatible passes `check` and fails in `from_host`.

pub mod dated;
pub mod mesher;
pub mod pair;
pub mod pair_vector;
pub mod scalar;
pub mod vector;
pub mod vector_pair;
pub mod vector_vector;

use risks_core::types::{Date, Real};

use crate::config::ElementSampling;
use crate::error::{BridgeError, BridgeResult};
use crate::host::HostObject;

/// Pair of Real, order-significant.
pub type RealPair = (Real, Real);

/// Pair of Real sequences, order-significant.
pub type RealVectorPair = (Vec<Real>, Vec<Real>);

/// A date associated with a Real.
pub type DatedReal = (Date, Real);

/// Elements of a list literal, or a cast error naming `expected`.
pub(crate) fn list_items<'a>(
    object: &'a HostObject,
    expected: &'static str,
) -> BridgeResult<&'a [HostObject]> {
    match object {
        HostObject::List(items) => Ok(items),
        other => Err(BridgeError::cast(expected, other)),
    }
}

/// Elements of a tuple literal, or a cast error naming `expected`.
pub(crate) fn tuple_items<'a>(
    object: &'a HostObject,
    expected: &'static str,
) -> BridgeResult<&'a [HostObject]> {
    match object {
        HostObject::Tuple(items) => Ok(items),
        other => Err(BridgeError::cast(expected, other)),
    }
}

/// Elements of a list or tuple literal, or a cast error naming `expected`.
pub(crate) fn sequence_items<'a>(
    object: &'a HostObject,
    expected: &'static str,
) -> BridgeResult<&'a [HostObject]> {
    object
        .as_sequence()
        .ok_or_else(|| BridgeError::cast(expected, object))
}

/// The elements a predicate inspects under `sampling`.
pub(crate) fn sampled(items: &[HostObject], sampling: ElementSampling) -> &[HostObject] {
    match sampling {
        ElementSampling::First => &items[..items.len().min(1)],
        ElementSampling::All => items,
    }
}

/// Views `items` as a fixed-arity group, or a length error.
pub(crate) fn fixed<'a, const N: usize>(
    items: &'a [HostObject],
    shape: &'static str,
) -> BridgeResult<&'a [HostObject; N]> {
    <&[HostObject; N]>::try_from(items).map_err(|_| BridgeError::Length {
        shape,
        expected: N,
        found: items.len(),
    })
}

/// Converts each element with `convert` into freshly reserved native storage.
pub(crate) fn collect_native<T, F>(items: &[HostObject], convert: F) -> BridgeResult<Vec<T>>
where
    F: FnMut(&HostObject) -> BridgeResult<T>,
{
    let mut out = Vec::new();
    out.try_reserve_exact(items.len())?;
    for item in items.iter().map(convert) {
        out.push(item?);
    }
    Ok(out)
}
