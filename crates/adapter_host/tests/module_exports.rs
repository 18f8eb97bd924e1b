//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths
//! and that module augmentation exposes the expected host surface.

use adapter_host::host::{ContainerKind, HostModule, HostObject};
use adapter_host::registrar::{self, MESHER_POINT_FUNCTION, PAIR_VECTOR_FUNCTION};

/// Test that converter modules are accessible via absolute path.
#[test]
fn test_convert_module_exports() {
    use adapter_host::convert::dated;
    use adapter_host::convert::mesher::{self, MesherPoint};
    use adapter_host::convert::{pair, pair_vector, scalar, vector, vector_pair, vector_vector};
    use adapter_host::convert::{DatedReal, RealPair, RealVectorPair};

    let empty = HostObject::list(Vec::<f64>::new());
    assert!(scalar::check(&HostObject::Float(1.0)));
    assert!(vector::check(&empty));
    assert!(vector_vector::check(&empty));
    assert!(pair_vector::check(&empty));
    assert!(mesher::check(&empty));
    assert!(dated::check_vector(&empty));
    assert!(!pair::check(&empty));
    assert!(!vector_pair::check(&empty));

    let _: Option<RealPair> = None;
    let _: Option<RealVectorPair> = None;
    let _: Option<DatedReal> = None;
    let _ = MesherPoint::new(1.0, 0.1, true);
}

/// Test that crate-root re-exports resolve.
#[test]
fn test_root_reexports() {
    use adapter_host::{
        BridgeConfig, BridgeError, ElementSampling, ExceptionKind, FromHost, HostException,
        NativeValue, Shape, ToHost,
    };
    use risks_core::types::Real;

    let config = BridgeConfig::default();
    assert_eq!(config.sampling, ElementSampling::First);

    let exc = HostException::from(BridgeError::InvalidCount(-1));
    assert_eq!(exc.kind, ExceptionKind::ValueError);

    let x = <Real as FromHost>::from_host(&HostObject::Int(2)).unwrap();
    assert_eq!(x.to_host().unwrap(), HostObject::Real(Real::new(2.0)));
    assert_eq!(NativeValue::Scalar(x).shape(), Shape::Scalar);
}

/// Test that augmentation attaches every class with its methods.
#[test]
fn test_augmented_module_surface() {
    let mut module = HostModule::new("QuantLib_Risks");
    assert!(!module.is_augmented());
    registrar::init(&mut module).unwrap();

    for kind in ContainerKind::ALL {
        let class = module.class_for(kind).unwrap();
        assert_eq!(class.name(), kind.default_class_name());
        for method in [
            "empty",
            "size",
            "append",
            "push_back",
            "pop_back",
            "front",
            "back",
            "assign",
            "__len__",
            "__getitem__",
            "__setitem__",
            "clear",
            "extend",
            "insert",
            "pop",
        ] {
            assert!(
                module.has_method(class.name(), method),
                "{} lacks {}",
                class.name(),
                method
            );
        }
    }
    assert!(module.has_function(MESHER_POINT_FUNCTION));
    assert!(module.has_function(PAIR_VECTOR_FUNCTION));
}

/// Test that opaque conversions require augmentation.
#[test]
fn test_opaque_conversion_before_registration() {
    use adapter_host::convert::vector;
    use adapter_host::error::{BridgeError, ExceptionKind};
    use risks_core::types::Real;

    let module = HostModule::new("bare");
    let err = vector::to_opaque(&module, vec![Real::new(1.0)]).unwrap_err();
    assert_eq!(err, BridgeError::UnregisteredType("DoubleVector".to_string()));
    assert_eq!(err.exception_kind(), ExceptionKind::TypeError);
}

/// Test that tape access is reachable and does not touch the lifecycle.
#[test]
fn test_tape_exports() {
    use adapter_host::host::Shared;
    use adapter_host::tape::{is_tape, tape_ref};
    use risks_core::types::Tape;

    let proxy = HostObject::Tape(Shared::new(Tape::new()));
    assert!(is_tape(&proxy));
    let tape = tape_ref(&proxy).unwrap();
    assert!(!tape.borrow().is_active());
    assert_eq!(Tape::active_id(), None);
}
