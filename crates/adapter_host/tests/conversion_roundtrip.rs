//! Property tests for literal conversions.
//!
//! Scalars survive a native/host/native trip numerically unchanged, and
//! sequence conversions preserve length and order exactly.

use adapter_host::convert::{pair_vector, scalar, vector, vector_vector};
use adapter_host::host::HostObject;
use approx::assert_relative_eq;
use proptest::prelude::*;
use risks_core::types::Real;

/// Host scalar sources: float literal, integer literal or Real proxy.
fn host_scalar_strategy() -> impl Strategy<Value = HostObject> {
    prop_oneof![
        prop::num::f64::NORMAL.prop_map(HostObject::Float),
        (-(1_i64 << 53)..(1_i64 << 53)).prop_map(HostObject::Int),
        (prop::num::f64::NORMAL, -10.0..10.0_f64)
            .prop_map(|(v, d)| HostObject::Real(Real::with_derivative(v, d))),
    ]
}

fn host_list_strategy(max_len: usize) -> impl Strategy<Value = HostObject> {
    prop::collection::vec(host_scalar_strategy(), 0..max_len).prop_map(HostObject::List)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_scalar_round_trip(obj in host_scalar_strategy()) {
        let native = scalar::to_native(&obj).unwrap();
        let again = scalar::to_native(&scalar::to_foreign(native)).unwrap();
        prop_assert_eq!(again.value(), native.value());
        prop_assert_eq!(again.derivative(), native.derivative());
    }

    #[test]
    fn test_vector_list_round_trip(obj in host_list_strategy(64)) {
        let native = vector::from_list(&obj).unwrap();
        let back = vector::from_list(&vector::to_list(&native).unwrap()).unwrap();
        prop_assert_eq!(back.len(), obj.as_sequence().unwrap().len());
        for (a, b) in native.iter().zip(&back) {
            prop_assert_eq!(a.value(), b.value());
        }
    }

    #[test]
    fn test_vector_tuple_round_trip(values in prop::collection::vec(prop::num::f64::NORMAL, 0..64)) {
        let native: Vec<Real> = values.iter().copied().map(Real::new).collect();
        let back = vector::from_tuple(&vector::to_tuple(&native).unwrap()).unwrap();
        prop_assert_eq!(back, native);
    }

    #[test]
    fn test_vector_vector_round_trip(
        rows in prop::collection::vec(prop::collection::vec(-1e6..1e6_f64, 0..8), 0..8)
    ) {
        let obj = HostObject::List(rows.iter().map(|r| HostObject::list(r.clone())).collect());
        let native = vector_vector::from_list(&obj).unwrap();
        let back = vector_vector::from_tuple(&vector_vector::to_tuple(&native).unwrap()).unwrap();
        prop_assert_eq!(back.len(), rows.len());
        for (row, expected) in back.iter().zip(&rows) {
            let values: Vec<f64> = row.iter().map(Real::value).collect();
            prop_assert_eq!(&values, expected);
        }
    }

    #[test]
    fn test_pair_vector_round_trip(pairs in prop::collection::vec((-1e6..1e6_f64, -1e6..1e6_f64), 0..32)) {
        let obj = HostObject::List(pairs.iter().map(|&(a, b)| HostObject::tuple([a, b])).collect());
        let native = pair_vector::from_list(&obj).unwrap();
        let back = pair_vector::from_list(&pair_vector::to_list(&native).unwrap()).unwrap();
        prop_assert_eq!(back.len(), pairs.len());
        for ((a, b), &(x, y)) in back.iter().zip(&pairs) {
            prop_assert_eq!(a.value(), x);
            prop_assert_eq!(b.value(), y);
        }
    }
}

#[test]
fn test_integer_converts_by_value() {
    let x = scalar::to_native(&HostObject::Int(42)).unwrap();
    assert_relative_eq!(x.value(), 42.0);
    assert_relative_eq!(x.derivative(), 0.0);
}

#[test]
fn test_literal_conversion_does_not_alias() {
    let source = HostObject::list([1.0, 2.0]);
    let mut native = vector::from_list(&source).unwrap();
    native[0] = Real::new(99.0);
    assert_eq!(source, HostObject::list([1.0, 2.0]));

    let out = vector::to_list(&native).unwrap();
    native.push(Real::new(3.0));
    assert_eq!(out.as_sequence().unwrap().len(), 2);
}
