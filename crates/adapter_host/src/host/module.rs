//! Host module registry.
//!
//! A [`HostModule`] is the target of module augmentation: it holds the
//! opaque classes and helper functions the registrar attaches, and performs
//! method dispatch for opaque container instances.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::object::HostObject;
use super::opaque::{ContainerKind, Opaque, OpaqueObject, OpaqueStorage};
use crate::config::ElementSampling;
use crate::error::{BridgeError, BridgeResult};
use crate::shape::Shape;

/// Bound method: receives the module, the instance, and positional arguments.
pub type MethodFn = fn(&HostModule, &OpaqueObject, &[HostObject]) -> BridgeResult<HostObject>;

/// Class constructor: receives the module and positional arguments.
pub type ConstructorFn = fn(&HostModule, &[HostObject]) -> BridgeResult<HostObject>;

/// Module-level function.
pub type FunctionFn = fn(&HostModule, &[HostObject]) -> BridgeResult<HostObject>;

/// An opaque class exposed on a module.
#[derive(Clone, Debug)]
pub struct ClassBinding {
    name: Rc<str>,
    kind: ContainerKind,
    constructor: ConstructorFn,
    methods: BTreeMap<&'static str, MethodFn>,
}

impl ClassBinding {
    /// Creates a class with a constructor and no methods.
    pub fn new(name: &str, kind: ContainerKind, constructor: ConstructorFn) -> Self {
        Self {
            name: Rc::from(name),
            kind,
            constructor,
            methods: BTreeMap::new(),
        }
    }

    /// Defines a method. A later definition with the same name replaces the earlier one.
    pub fn def(mut self, name: &'static str, method: MethodFn) -> Self {
        self.methods.insert(name, method);
        self
    }

    /// Class name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Container kind backing the class.
    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Looks up a method.
    pub fn method(&self, name: &str) -> Option<MethodFn> {
        self.methods.get(name).copied()
    }

    /// Defined method names, sorted.
    pub fn method_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }
}

/// A host module: classes, functions, the augmentation flag, and the
/// element sampling its shape predicates use.
#[derive(Debug)]
pub struct HostModule {
    name: String,
    classes: BTreeMap<String, ClassBinding>,
    by_kind: HashMap<ContainerKind, String>,
    functions: BTreeMap<&'static str, FunctionFn>,
    augmented: bool,
    sampling: ElementSampling,
}

impl HostModule {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: BTreeMap::new(),
            by_kind: HashMap::new(),
            functions: BTreeMap::new(),
            augmented: false,
            sampling: ElementSampling::default(),
        }
    }

    /// Module name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` once the registrar has augmented this module.
    #[inline]
    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    pub(crate) fn mark_augmented(&mut self) {
        self.augmented = true;
    }

    /// Element sampling used by [`HostModule::check`].
    #[inline]
    pub fn sampling(&self) -> ElementSampling {
        self.sampling
    }

    pub(crate) fn set_sampling(&mut self, sampling: ElementSampling) {
        self.sampling = sampling;
    }

    /// Shape predicate using this module's element sampling.
    pub fn check(&self, shape: Shape, object: &HostObject) -> bool {
        shape.check_with(object, self.sampling)
    }

    /// Shapes whose predicate accepts `object` under this module's sampling.
    pub fn matching<'a>(&self, object: &'a HostObject) -> impl Iterator<Item = Shape> + 'a {
        Shape::matching(object, self.sampling)
    }

    /// Returns `true` if a class name is taken.
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Adds a class.
    ///
    /// # Errors
    ///
    /// `BridgeError::DuplicateClass` if the name is taken or the kind is
    /// already bound to another class.
    pub fn add_class(&mut self, class: ClassBinding) -> BridgeResult<()> {
        if self.has_class(class.name()) || self.by_kind.contains_key(&class.kind) {
            return Err(BridgeError::DuplicateClass(class.name().to_string()));
        }
        self.by_kind.insert(class.kind, class.name().to_string());
        self.classes.insert(class.name().to_string(), class);
        Ok(())
    }

    /// Adds a module-level function, replacing any previous definition.
    pub fn add_function(&mut self, name: &'static str, function: FunctionFn) {
        self.functions.insert(name, function);
    }

    /// Looks up a class by name.
    pub fn class(&self, name: &str) -> Option<&ClassBinding> {
        self.classes.get(name)
    }

    /// Looks up the class bound to a container kind.
    pub fn class_for(&self, kind: ContainerKind) -> Option<&ClassBinding> {
        self.by_kind.get(&kind).and_then(|name| self.classes.get(name))
    }

    /// Name of the class bound to `kind`.
    ///
    /// # Errors
    ///
    /// `BridgeError::UnregisteredType` if no class is bound to `kind`.
    pub fn class_name(&self, kind: ContainerKind) -> BridgeResult<&str> {
        self.by_kind
            .get(&kind)
            .map(String::as_str)
            .ok_or_else(|| BridgeError::UnregisteredType(kind.to_string()))
    }

    /// Returns `true` if a class is bound to `kind`.
    pub fn is_registered(&self, kind: ContainerKind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    /// Returns `true` if `class` defines `method`.
    pub fn has_method(&self, class: &str, method: &str) -> bool {
        self.class(class)
            .is_some_and(|binding| binding.method(method).is_some())
    }

    /// Returns `true` if the module defines `function`.
    pub fn has_function(&self, function: &str) -> bool {
        self.functions.contains_key(function)
    }

    /// Moves `value` into a new instance of the class bound to its kind.
    ///
    /// # Errors
    ///
    /// `BridgeError::UnregisteredType` if no class is bound to the kind.
    pub fn instantiate<T: OpaqueStorage>(&self, value: T) -> BridgeResult<HostObject> {
        let class = self
            .class_for(T::KIND)
            .ok_or_else(|| BridgeError::UnregisteredType(T::KIND.to_string()))?;
        tracing::debug!(class = class.name(), "creating opaque instance");
        Ok(HostObject::Opaque(T::wrap(Opaque::new(
            Rc::clone(&class.name),
            value,
        ))))
    }

    /// Calls the constructor of `class`.
    pub fn construct(&self, class: &str, args: &[HostObject]) -> BridgeResult<HostObject> {
        let binding = self
            .class(class)
            .ok_or_else(|| BridgeError::UnregisteredType(class.to_string()))?;
        (binding.constructor)(self, args)
    }

    /// Calls `method` on an opaque instance.
    ///
    /// # Errors
    ///
    /// - `BridgeError::Cast` if `object` is not an opaque instance
    /// - `BridgeError::UnregisteredType` if its class is not on this module
    /// - `BridgeError::UnknownMethod` if the class does not define `method`
    /// - any error raised by the method itself
    pub fn invoke(
        &self,
        object: &HostObject,
        method: &str,
        args: &[HostObject],
    ) -> BridgeResult<HostObject> {
        let instance = object
            .as_opaque()
            .ok_or_else(|| BridgeError::cast("opaque container", object))?;
        let binding = self
            .class(instance.class())
            .ok_or_else(|| BridgeError::UnregisteredType(instance.class().to_string()))?;
        let f = binding
            .method(method)
            .ok_or_else(|| BridgeError::UnknownMethod {
                class: binding.name().to_string(),
                method: method.to_string(),
            })?;
        tracing::debug!(class = binding.name(), method, nargs = args.len(), "invoking method");
        f(self, instance, args)
    }

    /// Calls a module-level function.
    pub fn call(&self, function: &str, args: &[HostObject]) -> BridgeResult<HostObject> {
        let f = self
            .functions
            .get(function)
            .ok_or_else(|| BridgeError::UnknownFunction(function.to_string()))?;
        tracing::debug!(module = %self.name, function, nargs = args.len(), "calling function");
        f(self, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risks_core::types::Real;

    fn empty_vector(module: &HostModule, _args: &[HostObject]) -> BridgeResult<HostObject> {
        module.instantiate(Vec::<Real>::new())
    }

    fn size(_module: &HostModule, object: &OpaqueObject, _args: &[HostObject]) -> BridgeResult<HostObject> {
        Ok(HostObject::Int(object.len() as i64))
    }

    fn module_with_vector() -> HostModule {
        let mut module = HostModule::new("test");
        module
            .add_class(
                ClassBinding::new("DoubleVector", ContainerKind::RealVector, empty_vector)
                    .def("size", size),
            )
            .unwrap();
        module
    }

    #[test]
    fn test_instantiate_requires_registration() {
        let module = HostModule::new("bare");
        let err = module.instantiate(vec![Real::new(1.0)]).unwrap_err();
        assert_eq!(err, BridgeError::UnregisteredType("DoubleVector".to_string()));
    }

    #[test]
    fn test_construct_and_invoke() {
        let module = module_with_vector();
        let obj = module.construct("DoubleVector", &[]).unwrap();
        assert_eq!(obj.type_name(), "DoubleVector");
        assert_eq!(module.invoke(&obj, "size", &[]).unwrap(), HostObject::Int(0));
    }

    #[test]
    fn test_invoke_unknown_method() {
        let module = module_with_vector();
        let obj = module.construct("DoubleVector", &[]).unwrap();
        let err = module.invoke(&obj, "sort", &[]).unwrap_err();
        assert_eq!(
            err,
            BridgeError::UnknownMethod {
                class: "DoubleVector".to_string(),
                method: "sort".to_string()
            }
        );
    }

    #[test]
    fn test_invoke_on_literal_is_cast_error() {
        let module = module_with_vector();
        let err = module.invoke(&HostObject::list([1.0]), "size", &[]).unwrap_err();
        assert!(matches!(err, BridgeError::Cast { .. }));
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut module = module_with_vector();
        let err = module
            .add_class(ClassBinding::new(
                "DoubleVector",
                ContainerKind::RealPairVector,
                empty_vector,
            ))
            .unwrap_err();
        assert_eq!(err, BridgeError::DuplicateClass("DoubleVector".to_string()));

        let err = module
            .add_class(ClassBinding::new("Other", ContainerKind::RealVector, empty_vector))
            .unwrap_err();
        assert_eq!(err, BridgeError::DuplicateClass("Other".to_string()));
    }

    #[test]
    fn test_class_name_by_kind() {
        let module = module_with_vector();
        assert_eq!(module.class_name(ContainerKind::RealVector).unwrap(), "DoubleVector");
        assert!(matches!(
            module.class_name(ContainerKind::RealPairVector),
            Err(BridgeError::UnregisteredType(_))
        ));
        assert!(module.has_method("DoubleVector", "size"));
        assert!(!module.has_method("DoubleVector", "append"));
    }

    #[test]
    fn test_check_uses_module_sampling() {
        let mixed = HostObject::List(vec![HostObject::Float(1.0), HostObject::from("x")]);
        let mut module = HostModule::new("m");
        assert_eq!(module.sampling(), ElementSampling::First);
        assert!(module.check(Shape::Vector, &mixed));

        module.set_sampling(ElementSampling::All);
        assert!(!module.check(Shape::Vector, &mixed));
        assert_eq!(module.matching(&mixed).count(), 0);
    }

    #[test]
    fn test_unknown_function() {
        let module = HostModule::new("m");
        assert_eq!(
            module.call("missing", &[]).unwrap_err(),
            BridgeError::UnknownFunction("missing".to_string())
        );
    }
}
