//! # adapter_host: Boundary Adapter for AD Scalars and Containers
//!
//! ## Adapter Layer Role
//!
//! adapter_host sits between a host scripting runtime and the native types of
//! `risks_core`. For every supported shape it provides:
//! - a side-effect-free predicate telling whether a host object converts
//! - owning converters between host literals and native values (copy)
//! - borrow-style access to registered opaque containers (no copy)
//!
//! ## Modules
//!
//! - [`host`]: host object model and module registry
//! - [`convert`]: one predicate/converter module per shape
//! - [`shape`]: closed [`Shape`] dispatch, [`FromHost`]/[`ToHost`]
//! - [`registrar`]: module augmentation with the opaque container classes
//! - [`tape`]: tape proxy detection and access
//! - [`config`]: [`BridgeConfig`]
//! - [`error`]: [`BridgeError`], [`HostException`]
//!
//! ## Single-threaded
//!
//! Opaque containers share unsynchronised storage (`Rc<RefCell<_>>`), so
//! none of the types here are `Send`. The host serialises calls into this
//! layer.
//!
//! ## Usage Examples
//!
//! ```rust
//! use adapter_host::convert::vector;
//! use adapter_host::host::{HostModule, HostObject};
//! use adapter_host::registrar;
//!
//! let mut module = HostModule::new("QuantLib_Risks");
//! registrar::init(&mut module).unwrap();
//!
//! // Literal conversion copies.
//! let xs = vector::from_list(&HostObject::list([1.0, 2.0, 3.0])).unwrap();
//! assert_eq!(xs.len(), 3);
//!
//! // Opaque containers alias.
//! let v = vector::to_opaque(&module, xs).unwrap();
//! let alias = v.clone();
//! module.invoke(&alias, "append", &[HostObject::Int(4)]).unwrap();
//! assert_eq!(vector::shared_ref(&v).unwrap().borrow().len(), 4);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod convert;
pub mod error;
pub mod host;
pub mod registrar;
pub mod shape;
pub mod tape;

pub use config::{BridgeConfig, ElementSampling};
pub use error::{BridgeError, BridgeResult, ExceptionKind, HostException};
pub use host::{HostModule, HostObject};
pub use shape::{FromHost, NativeValue, Shape, ToHost};
