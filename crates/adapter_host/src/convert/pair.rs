//! Pair of Real.

use super::{fixed, list_items, scalar, sequence_items, tuple_items, RealPair};
use crate::error::BridgeResult;
use crate::host::{try_collect, HostObject};

const SHAPE: &str = "pair of Real";

/// Returns `true` for a two-element list or tuple of numeric elements.
pub fn check(object: &HostObject) -> bool {
    object
        .as_sequence()
        .is_some_and(|items| items.len() == 2 && items.iter().all(scalar::check))
}

/// Converts a two-element list literal.
///
/// # Errors
///
/// - `BridgeError::Cast` if `object` is not a list or an element is not numeric
/// - `BridgeError::Length` if the list does not hold exactly two elements
pub fn from_list(object: &HostObject) -> BridgeResult<RealPair> {
    convert_items(list_items(object, "list")?)
}

/// Converts a two-element tuple literal.
pub fn from_tuple(object: &HostObject) -> BridgeResult<RealPair> {
    convert_items(tuple_items(object, "tuple")?)
}

/// Converts a two-element list or tuple literal.
pub fn from_host(object: &HostObject) -> BridgeResult<RealPair> {
    convert_items(sequence_items(object, SHAPE)?)
}

fn convert_items(items: &[HostObject]) -> BridgeResult<RealPair> {
    let [first, second] = fixed::<2>(items, SHAPE)?;
    Ok((scalar::to_native(first)?, scalar::to_native(second)?))
}

/// New two-element tuple literal of `Real` proxies.
pub fn to_tuple(pair: &RealPair) -> BridgeResult<HostObject> {
    to_items(pair).map(HostObject::Tuple)
}

/// New two-element list literal of `Real` proxies.
pub fn to_list(pair: &RealPair) -> BridgeResult<HostObject> {
    to_items(pair).map(HostObject::List)
}

fn to_items(&(first, second): &RealPair) -> BridgeResult<Vec<HostObject>> {
    try_collect(
        2,
        [first, second].into_iter().map(|x| Ok(scalar::to_foreign(x))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use risks_core::types::Real;

    #[test]
    fn test_check() {
        assert!(check(&HostObject::tuple([1.0, 2.0])));
        assert!(check(&HostObject::list([1_i64, 2])));
        assert!(!check(&HostObject::tuple([1.0])));
        assert!(!check(&HostObject::tuple([1.0, 2.0, 3.0])));
        assert!(!check(&HostObject::Tuple(vec![
            HostObject::Float(1.0),
            HostObject::from("x")
        ])));
        assert!(!check(&HostObject::Float(1.0)));
    }

    #[test]
    fn test_from_list_wrong_length() {
        let err = from_list(&HostObject::list([1.0])).unwrap_err();
        assert_eq!(
            err,
            BridgeError::Length {
                shape: "pair of Real",
                expected: 2,
                found: 1
            }
        );
        assert!(matches!(
            from_tuple(&HostObject::tuple([1.0, 2.0, 3.0])),
            Err(BridgeError::Length { found: 3, .. })
        ));
    }

    #[test]
    fn test_order_is_significant() {
        let pair = from_tuple(&HostObject::tuple([2.0, 1.0])).unwrap();
        assert_eq!(pair, (Real::new(2.0), Real::new(1.0)));
        let back = to_tuple(&pair).unwrap();
        assert_eq!(
            back,
            HostObject::Tuple(vec![
                HostObject::Real(Real::new(2.0)),
                HostObject::Real(Real::new(1.0))
            ])
        );
    }

    #[test]
    fn test_from_host_accepts_both_literals() {
        assert!(from_host(&HostObject::list([1.0, 2.0])).is_ok());
        assert!(from_host(&HostObject::tuple([1.0, 2.0])).is_ok());
        assert!(matches!(
            from_host(&HostObject::Int(1)),
            Err(BridgeError::Cast { .. })
        ));
    }
}
