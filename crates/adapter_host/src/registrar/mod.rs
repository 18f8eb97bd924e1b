//! Module augmentation.
//!
//! [`register`] attaches the opaque container classes and the helper
//! functions to a host module. It must run before host code creates or
//! receives an opaque container, and running it again on the same module
//! is a logged no-op.
//!
//! # Examples
//!
//! ```rust
//! use adapter_host::host::{HostModule, HostObject};
//! use adapter_host::registrar;
//!
//! let mut module = HostModule::new("QuantLib_Risks");
//! assert!(registrar::init(&mut module).unwrap());
//! assert!(!registrar::init(&mut module).unwrap());
//!
//! let v = module.construct("DoubleVector", &[]).unwrap();
//! module.invoke(&v, "append", &[HostObject::Float(1.5)]).unwrap();
//! assert_eq!(module.invoke(&v, "size", &[]).unwrap(), HostObject::Int(1));
//! ```

mod container;

use risks_core::types::Real;

use crate::config::BridgeConfig;
use crate::convert::mesher::{self, MesherPoint};
use crate::convert::{scalar, vector, RealPair};
use crate::error::{BridgeError, BridgeResult};
use crate::host::{ContainerKind, HostModule, HostObject};

/// Helper building a `(Real, Real, bool)` mesher point tuple.
pub const MESHER_POINT_FUNCTION: &str = "Concentrating1dMesherPoint";

/// Helper building a `([Real...], [Real...])` pair of lists.
pub const PAIR_VECTOR_FUNCTION: &str = "PairDoubleVector";

/// Augments `module` with the opaque container classes named in `config`
/// and sets its element sampling to `config.sampling`.
///
/// Returns `Ok(true)` when the module was augmented and `Ok(false)` when it
/// had already been augmented. Name collisions are detected before anything
/// is attached, so a failed registration leaves the module unchanged.
///
/// # Errors
///
/// - `BridgeError::Config` if `config` does not validate
/// - `BridgeError::DuplicateClass` if a class or helper name is already taken
pub fn register(module: &mut HostModule, config: &BridgeConfig) -> BridgeResult<bool> {
    if module.is_augmented() {
        tracing::warn!(module = module.name(), "module already augmented, skipping");
        return Ok(false);
    }
    config.validate()?;

    for kind in ContainerKind::ALL {
        let name = config.class_name(kind);
        if module.has_class(name) || module.has_function(name) || module.is_registered(kind) {
            return Err(BridgeError::DuplicateClass(name.to_string()));
        }
    }
    for name in [MESHER_POINT_FUNCTION, PAIR_VECTOR_FUNCTION] {
        if module.has_class(name) || module.has_function(name) {
            return Err(BridgeError::DuplicateClass(name.to_string()));
        }
    }

    module.add_class(container::binding::<Real>(
        config.class_name(ContainerKind::RealVector),
    ))?;
    module.add_class(container::binding::<Vec<Real>>(
        config.class_name(ContainerKind::RealVectorVector),
    ))?;
    module.add_class(container::binding::<RealPair>(
        config.class_name(ContainerKind::RealPairVector),
    ))?;
    module.add_function(MESHER_POINT_FUNCTION, mesher_point);
    module.add_function(PAIR_VECTOR_FUNCTION, pair_double_vector);
    module.set_sampling(config.sampling);
    module.mark_augmented();

    tracing::info!(
        module = module.name(),
        sampling = ?config.sampling,
        vector = %config.vector_class,
        vector_vector = %config.vector_vector_class,
        pair_vector = %config.pair_vector_class,
        "augmented host module"
    );
    Ok(true)
}

/// Augments `module` with the default class names.
pub fn init(module: &mut HostModule) -> BridgeResult<bool> {
    register(module, &BridgeConfig::default())
}

fn mesher_point(module: &HostModule, args: &[HostObject]) -> BridgeResult<HostObject> {
    let [center, density, required] = <&[HostObject; 3]>::try_from(args)
        .map_err(|_| BridgeError::no_overload(module.name(), MESHER_POINT_FUNCTION, args))?;
    let required = match required {
        HostObject::Bool(b) => *b,
        HostObject::Int(n) => *n != 0,
        other => return Err(BridgeError::cast("bool", other)),
    };
    let point = MesherPoint {
        center: scalar::to_native(center)?,
        density: scalar::to_native(density)?,
        required,
    };
    Ok(mesher::point_to_tuple(&point))
}

fn pair_double_vector(module: &HostModule, args: &[HostObject]) -> BridgeResult<HostObject> {
    let (xs, ys) = match args {
        [] => (Vec::new(), Vec::new()),
        [xs] => (vector::from_host(xs)?, Vec::new()),
        [xs, ys] => (vector::from_host(xs)?, vector::from_host(ys)?),
        _ => {
            return Err(BridgeError::no_overload(
                module.name(),
                PAIR_VECTOR_FUNCTION,
                args,
            ))
        }
    };
    Ok(HostObject::Tuple(vec![
        vector::to_list(&xs)?,
        vector::to_list(&ys)?,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ElementSampling;
    use crate::shape::Shape;

    #[test]
    fn test_register_is_idempotent() {
        let mut module = HostModule::new("m");
        assert!(init(&mut module).unwrap());
        assert!(module.is_augmented());
        assert!(!init(&mut module).unwrap());
        for kind in ContainerKind::ALL {
            assert!(module.is_registered(kind));
        }
    }

    #[test]
    fn test_register_with_custom_names() {
        let config = BridgeConfig::builder()
            .vector_class("RealVector")
            .build()
            .unwrap();
        let mut module = HostModule::new("m");
        register(&mut module, &config).unwrap();
        let v = module.construct("RealVector", &[]).unwrap();
        assert_eq!(v.type_name(), "RealVector");
        assert!(module.class("DoubleVector").is_none());
    }

    #[test]
    fn test_register_applies_configured_sampling() {
        let mixed = HostObject::List(vec![HostObject::Float(1.0), HostObject::from("x")]);

        let mut fast = HostModule::new("fast");
        init(&mut fast).unwrap();
        assert!(fast.check(Shape::Vector, &mixed));

        let config = BridgeConfig::from_toml_str("sampling = \"all\"").unwrap();
        let mut exact = HostModule::new("exact");
        register(&mut exact, &config).unwrap();
        assert_eq!(exact.sampling(), ElementSampling::All);
        assert!(!exact.check(Shape::Vector, &mixed));
        assert!(vector::from_host(&mixed).is_err());
    }

    #[test]
    fn test_collision_leaves_module_unchanged() {
        let mut module = HostModule::new("m");
        module.add_function("DoublePairVector", pair_double_vector);
        let err = init(&mut module).unwrap_err();
        assert_eq!(err, BridgeError::DuplicateClass("DoublePairVector".to_string()));
        assert!(!module.is_augmented());
        assert!(!module.is_registered(ContainerKind::RealVector));
    }

    #[test]
    fn test_mesher_point_helper() {
        let mut module = HostModule::new("m");
        init(&mut module).unwrap();
        let point = module
            .call(
                MESHER_POINT_FUNCTION,
                &[HostObject::Float(1.0), HostObject::Int(2), HostObject::Bool(true)],
            )
            .unwrap();
        assert_eq!(
            mesher::from_list(&HostObject::List(vec![point])).unwrap(),
            vec![MesherPoint::new(1.0, 2.0, true)]
        );
        assert!(module.call(MESHER_POINT_FUNCTION, &[HostObject::Float(1.0)]).is_err());
    }

    #[test]
    fn test_pair_vector_helper_defaults() {
        let mut module = HostModule::new("m");
        init(&mut module).unwrap();
        let empty = module.call(PAIR_VECTOR_FUNCTION, &[]).unwrap();
        assert_eq!(
            empty,
            HostObject::Tuple(vec![HostObject::List(vec![]), HostObject::List(vec![])])
        );
        let filled = module
            .call(
                PAIR_VECTOR_FUNCTION,
                &[HostObject::list([1.0, 2.0]), HostObject::tuple([3_i64])],
            )
            .unwrap();
        let halves = filled.as_sequence().unwrap();
        assert_eq!(vector::from_list(&halves[0]).unwrap().len(), 2);
        assert_eq!(vector::from_list(&halves[1]).unwrap(), vec![Real::new(3.0)]);
    }
}
