//! Sequence of sequences of Real.
//!
//! Accepted host representations: list and tuple literals whose rows are
//! sequences of Real (list, tuple, or `DoubleVector` instance), and
//! instances of the registered `DoubleVectorVector` class.

use risks_core::types::Real;

use super::{collect_native, list_items, sequence_items, tuple_items, vector};
use crate::config::ElementSampling;
use crate::error::{BridgeError, BridgeResult};
use crate::host::{try_collect, HostModule, HostObject, OpaqueObject, Shared};

const SHAPE: &str = "sequence of sequences of Real";

/// Shape predicate with first-element sampling inside each row.
pub fn check(object: &HostObject) -> bool {
    check_with(object, ElementSampling::First)
}

/// Shape predicate. Every row must be a sequence of Real; `sampling`
/// applies to the elements within each row.
pub fn check_with(object: &HostObject, sampling: ElementSampling) -> bool {
    match object {
        HostObject::Opaque(OpaqueObject::RealVectorVector(_)) => true,
        HostObject::List(rows) | HostObject::Tuple(rows) => {
            rows.iter().all(|row| vector::check_with(row, sampling))
        }
        _ => false,
    }
}

/// Converts a list literal of rows.
pub fn from_list(object: &HostObject) -> BridgeResult<Vec<Vec<Real>>> {
    convert_rows(list_items(object, "list")?)
}

/// Converts a tuple literal of rows.
pub fn from_tuple(object: &HostObject) -> BridgeResult<Vec<Vec<Real>>> {
    convert_rows(tuple_items(object, "tuple")?)
}

/// Converts any accepted representation. Opaque instances are copied.
pub fn from_host(object: &HostObject) -> BridgeResult<Vec<Vec<Real>>> {
    match object {
        HostObject::Opaque(OpaqueObject::RealVectorVector(v)) => Ok(v.storage().snapshot()),
        other => convert_rows(sequence_items(other, SHAPE)?),
    }
}

fn convert_rows(rows: &[HostObject]) -> BridgeResult<Vec<Vec<Real>>> {
    tracing::trace!(shape = SHAPE, len = rows.len(), "converting to native");
    collect_native(rows, vector::from_host)
}

/// New list literal of list literals.
pub fn to_list(rows: &[Vec<Real>]) -> BridgeResult<HostObject> {
    tracing::trace!(shape = SHAPE, len = rows.len(), "converting to list");
    try_collect(rows.len(), rows.iter().map(|row| vector::to_list(row))).map(HostObject::List)
}

/// New tuple literal of tuple literals.
pub fn to_tuple(rows: &[Vec<Real>]) -> BridgeResult<HostObject> {
    tracing::trace!(shape = SHAPE, len = rows.len(), "converting to tuple");
    try_collect(rows.len(), rows.iter().map(|row| vector::to_tuple(row))).map(HostObject::Tuple)
}

/// Borrows the storage behind a `DoubleVectorVector` instance without copying.
pub fn shared_ref(object: &HostObject) -> BridgeResult<&Shared<Vec<Vec<Real>>>> {
    match object {
        HostObject::Opaque(OpaqueObject::RealVectorVector(v)) => Ok(v.storage()),
        other => Err(BridgeError::cast("DoubleVectorVector", other)),
    }
}

/// Moves `rows` into a new `DoubleVectorVector` instance on `module`.
pub fn to_opaque(module: &HostModule, rows: Vec<Vec<Real>>) -> BridgeResult<HostObject> {
    module.instantiate(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> HostObject {
        HostObject::List(vec![
            HostObject::list([1.0, 2.0]),
            HostObject::tuple([3_i64]),
            HostObject::list(Vec::<f64>::new()),
        ])
    }

    #[test]
    fn test_check_mixed_row_literals() {
        assert!(check(&grid()));
        assert!(check_with(&grid(), ElementSampling::All));
        assert!(check(&HostObject::tuple(Vec::<f64>::new())));
        assert!(!check(&HostObject::list([1.0])));
    }

    #[test]
    fn test_check_inspects_every_row() {
        let scalar_row = HostObject::List(vec![HostObject::list([1.0]), HostObject::Float(2.0)]);
        assert!(!check(&scalar_row));
        assert_eq!(
            from_list(&scalar_row).unwrap_err(),
            BridgeError::Cast {
                expected: "sequence of Real",
                found: "float".to_string()
            }
        );

        let text_row = HostObject::List(vec![HostObject::list([1.0]), HostObject::from("x")]);
        assert!(!check(&text_row));
        assert!(matches!(from_list(&text_row), Err(BridgeError::Cast { .. })));
    }

    #[test]
    fn test_elements_within_rows_are_sampled() {
        let bad_element = HostObject::List(vec![
            HostObject::list([1.0]),
            HostObject::List(vec![HostObject::Float(2.0), HostObject::from("x")]),
        ]);
        assert!(check(&bad_element));
        assert!(!check_with(&bad_element, ElementSampling::All));
        assert!(from_list(&bad_element).is_err());
    }

    #[test]
    fn test_from_list_keeps_row_order_and_lengths() {
        let rows = from_list(&grid()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![Real::new(1.0), Real::new(2.0)]);
        assert_eq!(rows[1], vec![Real::new(3.0)]);
        assert!(rows[2].is_empty());
    }

    #[test]
    fn test_to_tuple_nests_tuples() {
        let rows = vec![vec![Real::new(1.0)], vec![]];
        let out = to_tuple(&rows).unwrap();
        let outer = out.as_sequence().unwrap();
        assert!(matches!(outer[0], HostObject::Tuple(_)));
        assert_eq!(from_tuple(&out).unwrap(), rows);
        assert_eq!(from_list(&to_list(&rows).unwrap()).unwrap(), rows);
    }
}
