//! Mesher point lists.
//!
//! A mesher point is a `(center, density, required)` triple describing a
//! concentration point of a one-dimensional grid. Collections of points are
//! accepted only as list literals of 3-tuples; there is no opaque class.

use risks_core::types::Real;

use super::{collect_native, fixed, list_items, scalar, tuple_items};
use crate::config::ElementSampling;
use crate::error::{BridgeError, BridgeResult};
use crate::host::{try_collect, HostObject};

const SHAPE: &str = "mesher point";

/// Concentration point of a one-dimensional mesher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MesherPoint {
    /// Location the grid concentrates around
    pub center: Real,
    /// Concentration density
    pub density: Real,
    /// Whether `center` must be a grid node
    pub required: bool,
}

impl MesherPoint {
    /// Creates a mesher point.
    pub fn new(center: impl Into<Real>, density: impl Into<Real>, required: bool) -> Self {
        Self {
            center: center.into(),
            density: density.into(),
            required,
        }
    }
}

fn is_point(object: &HostObject) -> bool {
    match object {
        HostObject::Tuple(items) => {
            items.len() == 3
                && scalar::check(&items[0])
                && scalar::check(&items[1])
                && matches!(items[2], HostObject::Bool(_))
        }
        _ => false,
    }
}

/// Shape predicate. Only list literals pass; an empty list always passes.
///
/// Every point is inspected, so a passing list always converts.
pub fn check(object: &HostObject) -> bool {
    match object {
        HostObject::List(items) => items.iter().all(is_point),
        _ => false,
    }
}

/// Same as [`check`]; points are always inspected in full.
pub fn check_with(object: &HostObject, _sampling: ElementSampling) -> bool {
    check(object)
}

/// Converts a `(Real, Real, bool)` tuple literal.
///
/// # Errors
///
/// - `BridgeError::Cast` if `object` is not a tuple, a coordinate is not
///   numeric, or the flag is not a bool
/// - `BridgeError::Length` if the tuple does not hold exactly three elements
pub fn point_from_tuple(object: &HostObject) -> BridgeResult<MesherPoint> {
    let [center, density, required] = fixed::<3>(tuple_items(object, "tuple")?, SHAPE)?;
    let required = match required {
        HostObject::Bool(b) => *b,
        other => return Err(BridgeError::cast("bool", other)),
    };
    Ok(MesherPoint {
        center: scalar::to_native(center)?,
        density: scalar::to_native(density)?,
        required,
    })
}

/// New `(Real, Real, bool)` tuple literal.
pub fn point_to_tuple(point: &MesherPoint) -> HostObject {
    HostObject::Tuple(vec![
        scalar::to_foreign(point.center),
        scalar::to_foreign(point.density),
        HostObject::Bool(point.required),
    ])
}

/// Converts a list literal of 3-tuples.
pub fn from_list(object: &HostObject) -> BridgeResult<Vec<MesherPoint>> {
    let items = list_items(object, "list")?;
    tracing::trace!(shape = SHAPE, len = items.len(), "converting to native");
    collect_native(items, point_from_tuple)
}

/// Same as [`from_list`]; lists are the only accepted representation.
pub fn from_host(object: &HostObject) -> BridgeResult<Vec<MesherPoint>> {
    from_list(object)
}

/// New list literal of 3-tuples.
pub fn to_list(points: &[MesherPoint]) -> BridgeResult<HostObject> {
    try_collect(points.len(), points.iter().map(|p| Ok(point_to_tuple(p)))).map(HostObject::List)
}
