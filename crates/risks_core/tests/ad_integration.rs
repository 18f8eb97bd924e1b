//! Integration tests for Real, Tape and Date working together.

use approx::assert_relative_eq;
use proptest::prelude::*;
use risks_core::types::{Date, Real, Tape};

/// Test forward-mode derivative of a small expression.
#[test]
fn test_tangent_through_expression() {
    // f(x) = x * x + 3x, f'(x) = 2x + 3
    let x = Real::with_derivative(2.0, 1.0);
    let f = x * x + x * 3.0;
    assert_relative_eq!(f.value(), 10.0, epsilon = 1e-12);
    assert_relative_eq!(f.derivative(), 7.0, epsilon = 1e-12);
}

/// Test that registration slots are tape-specific and ordered.
#[test]
fn test_register_inputs_assigns_consecutive_slots() {
    let mut tape = Tape::new();
    let mut inputs = vec![Real::new(1.0), Real::new(2.0), Real::new(3.0)];
    tape.register_inputs(inputs.iter_mut()).unwrap();

    assert_eq!(tape.num_inputs(), 3);
    for (i, x) in inputs.iter().enumerate() {
        let slot = x.slot().unwrap();
        assert_eq!(slot.tape, tape.id());
        assert_eq!(slot.index as usize, i);
    }

    let other = Tape::new();
    assert_ne!(other.id(), tape.id());
}

/// Test that only one tape is active per thread.
#[test]
fn test_single_active_tape() {
    let first = Tape::new();
    let second = Tape::new();
    first.activate().unwrap();
    assert!(second.activate().is_err());
    first.deactivate();
    second.activate().unwrap();
    assert!(second.is_active());
    drop(second);
    assert_eq!(Tape::active_id(), None);
}

/// Test serial numbers around the spreadsheet epoch.
#[test]
fn test_date_serial_numbers() {
    let epoch = Date::from_serial_number(0).unwrap();
    assert_eq!(epoch, Date::from_ymd(1899, 12, 30).unwrap());
    let d = Date::from_ymd(2023, 3, 15).unwrap();
    assert_eq!(d.serial_number(), 45000);
    assert_eq!(Date::from_serial_number(d.serial_number()).unwrap(), d);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_product_rule(a in -1e3..1e3_f64, b in -1e3..1e3_f64) {
        let x = Real::with_derivative(a, 1.0);
        let y = Real::new(b);
        let p = x * y;
        prop_assert!((p.derivative() - b).abs() < 1e-9);
    }

    #[test]
    fn test_integer_conversion_exact(n in -(1_i64 << 53)..(1_i64 << 53)) {
        prop_assert_eq!(Real::from(n).value(), n as f64);
    }

    #[test]
    fn test_date_serial_round_trip(serial in 0_i64..100_000) {
        let d = Date::from_serial_number(serial).unwrap();
        prop_assert_eq!(d.serial_number(), serial);
    }
}
