//! Methods shared by the opaque container classes.
//!
//! Every method acts directly on the instance's shared storage. Arguments
//! are converted to native values before the storage is borrowed, so an
//! instance can be passed to its own methods (`v.extend(v)`).

use risks_core::types::Real;

use crate::convert::{collect_native, pair, scalar, vector, RealPair};
use crate::error::{BridgeError, BridgeResult};
use crate::host::{ClassBinding, ContainerKind, HostModule, HostObject, OpaqueObject, Shared};

/// Element type of an opaque container class.
pub(crate) trait ContainerElement: Clone + Sized + 'static {
    /// Container kind whose storage is `Vec<Self>`.
    const KIND: ContainerKind;

    /// Converts a method argument into an element.
    fn accept(value: &HostObject) -> BridgeResult<Self>;

    /// Converts an element returned by `front`, `back`, indexing or `pop`.
    fn to_host(&self, module: &HostModule) -> BridgeResult<HostObject>;

    /// Typed storage of `object`, if it holds `Vec<Self>`.
    fn storage(object: &OpaqueObject) -> Option<&Shared<Vec<Self>>>;

    /// Moves `items` into a new instance.
    fn instantiate(module: &HostModule, items: Vec<Self>) -> BridgeResult<HostObject>;
}

impl ContainerElement for Real {
    const KIND: ContainerKind = ContainerKind::RealVector;

    fn accept(value: &HostObject) -> BridgeResult<Self> {
        scalar::to_native(value)
    }

    fn to_host(&self, _module: &HostModule) -> BridgeResult<HostObject> {
        Ok(scalar::to_foreign(*self))
    }

    fn storage(object: &OpaqueObject) -> Option<&Shared<Vec<Self>>> {
        object.downcast::<Vec<Real>>().map(|o| o.storage())
    }

    fn instantiate(module: &HostModule, items: Vec<Self>) -> BridgeResult<HostObject> {
        module.instantiate(items)
    }
}

// Rows are accepted as literals or `DoubleVector` instances and handed
// back as new `DoubleVector` instances holding a copy.
impl ContainerElement for Vec<Real> {
    const KIND: ContainerKind = ContainerKind::RealVectorVector;

    fn accept(value: &HostObject) -> BridgeResult<Self> {
        vector::from_host(value)
    }

    fn to_host(&self, module: &HostModule) -> BridgeResult<HostObject> {
        vector::to_opaque(module, self.clone())
    }

    fn storage(object: &OpaqueObject) -> Option<&Shared<Vec<Self>>> {
        object.downcast::<Vec<Vec<Real>>>().map(|o| o.storage())
    }

    fn instantiate(module: &HostModule, items: Vec<Self>) -> BridgeResult<HostObject> {
        module.instantiate(items)
    }
}

impl ContainerElement for RealPair {
    const KIND: ContainerKind = ContainerKind::RealPairVector;

    fn accept(value: &HostObject) -> BridgeResult<Self> {
        pair::from_host(value)
    }

    fn to_host(&self, _module: &HostModule) -> BridgeResult<HostObject> {
        pair::to_tuple(self)
    }

    fn storage(object: &OpaqueObject) -> Option<&Shared<Vec<Self>>> {
        object.downcast::<Vec<RealPair>>().map(|o| o.storage())
    }

    fn instantiate(module: &HostModule, items: Vec<Self>) -> BridgeResult<HostObject> {
        module.instantiate(items)
    }
}

/// Class binding for the container of `T`, named `name`.
pub(crate) fn binding<T: ContainerElement>(name: &str) -> ClassBinding {
    ClassBinding::new(name, T::KIND, construct::<T>)
        .def("empty", empty::<T>)
        .def("size", size::<T>)
        .def("__len__", size::<T>)
        .def("append", append::<T>)
        .def("push_back", push_back::<T>)
        .def("pop_back", pop_back::<T>)
        .def("front", front::<T>)
        .def("back", back::<T>)
        .def("assign", assign::<T>)
        .def("__getitem__", get_item::<T>)
        .def("__setitem__", set_item::<T>)
        .def("clear", clear::<T>)
        .def("extend", extend::<T>)
        .def("insert", insert::<T>)
        .def("pop", pop::<T>)
}

fn storage<T: ContainerElement>(object: &OpaqueObject) -> BridgeResult<&Shared<Vec<T>>> {
    T::storage(object).ok_or_else(|| BridgeError::Cast {
        expected: T::KIND.default_class_name(),
        found: object.class().to_string(),
    })
}

fn arguments<'a, const N: usize>(
    object: &OpaqueObject,
    method: &str,
    args: &'a [HostObject],
) -> BridgeResult<&'a [HostObject; N]> {
    <&[HostObject; N]>::try_from(args)
        .map_err(|_| BridgeError::no_overload(object.class(), method, args))
}

fn int_argument(
    object: &OpaqueObject,
    method: &str,
    args: &[HostObject],
    value: &HostObject,
) -> BridgeResult<i64> {
    match value {
        HostObject::Int(n) => Ok(*n),
        HostObject::Bool(b) => Ok(i64::from(*b)),
        _ => Err(BridgeError::no_overload(object.class(), method, args)),
    }
}

/// Resolves a possibly negative index into `0..len` (`0..=len` when
/// `allow_end` is set).
fn resolve_index(index: i64, len: usize, allow_end: bool) -> BridgeResult<usize> {
    let out_of_range = || BridgeError::Index { index, len };
    let signed_len = i64::try_from(len).map_err(|_| out_of_range())?;
    let resolved = if index < 0 { index + signed_len } else { index };
    let limit = if allow_end { signed_len } else { signed_len - 1 };
    if resolved < 0 || resolved > limit {
        return Err(out_of_range());
    }
    usize::try_from(resolved).map_err(|_| out_of_range())
}

fn empty_error(object: &OpaqueObject, operation: &'static str) -> BridgeError {
    BridgeError::EmptyContainer {
        class: object.class().to_string(),
        operation,
    }
}

/// Elements of a list, tuple or same-kind instance, copied.
fn elements_from<T: ContainerElement>(
    class: &str,
    method: &str,
    source: &HostObject,
) -> BridgeResult<Vec<T>> {
    let mismatch = || BridgeError::no_overload(class, method, std::slice::from_ref(source));
    match source {
        HostObject::Opaque(other) => T::storage(other).map(Shared::snapshot).ok_or_else(mismatch),
        HostObject::List(items) | HostObject::Tuple(items) => collect_native(items, T::accept),
        _ => Err(mismatch()),
    }
}

fn construct<T: ContainerElement>(
    module: &HostModule,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    let class = module.class_name(T::KIND)?;
    let items = match args {
        [] => Vec::new(),
        [source] => elements_from::<T>(class, "__init__", source)?,
        _ => return Err(BridgeError::no_overload(class, "__init__", args)),
    };
    T::instantiate(module, items)
}

fn empty<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    arguments::<0>(object, "empty", args)?;
    Ok(HostObject::Bool(storage::<T>(object)?.borrow().is_empty()))
}

fn size<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    arguments::<0>(object, "size", args)?;
    let len = storage::<T>(object)?.borrow().len();
    Ok(HostObject::Int(len as i64))
}

fn push<T: ContainerElement>(
    object: &OpaqueObject,
    method: &str,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    let [value] = arguments::<1>(object, method, args)?;
    let value = T::accept(value)?;
    let storage = storage::<T>(object)?;
    let mut items = storage.borrow_mut();
    items.try_reserve(1)?;
    items.push(value);
    Ok(HostObject::None)
}

fn append<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    push::<T>(object, "append", args)
}

fn push_back<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    push::<T>(object, "push_back", args)
}

fn pop_back<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    arguments::<0>(object, "pop_back", args)?;
    storage::<T>(object)?
        .borrow_mut()
        .pop()
        .map(|_| HostObject::None)
        .ok_or_else(|| empty_error(object, "pop_back"))
}

fn front<T: ContainerElement>(
    module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    arguments::<0>(object, "front", args)?;
    let item = storage::<T>(object)?.borrow().first().cloned();
    item.ok_or_else(|| empty_error(object, "front"))?.to_host(module)
}

fn back<T: ContainerElement>(
    module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    arguments::<0>(object, "back", args)?;
    let item = storage::<T>(object)?.borrow().last().cloned();
    item.ok_or_else(|| empty_error(object, "back"))?.to_host(module)
}

fn assign<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    let [count, value] = arguments::<2>(object, "assign", args)?;
    let count = int_argument(object, "assign", args, count)?;
    let count = usize::try_from(count).map_err(|_| BridgeError::InvalidCount(count))?;
    let value = T::accept(value)?;

    let mut items = Vec::new();
    items.try_reserve_exact(count)?;
    items.resize(count, value);
    *storage::<T>(object)?.borrow_mut() = items;
    Ok(HostObject::None)
}

fn get_item<T: ContainerElement>(
    module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    let [index] = arguments::<1>(object, "__getitem__", args)?;
    let index = int_argument(object, "__getitem__", args, index)?;
    let items = storage::<T>(object)?.borrow();
    let item = items[resolve_index(index, items.len(), false)?].clone();
    drop(items);
    item.to_host(module)
}

fn set_item<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    let [index, value] = arguments::<2>(object, "__setitem__", args)?;
    let index = int_argument(object, "__setitem__", args, index)?;
    let value = T::accept(value)?;
    let mut items = storage::<T>(object)?.borrow_mut();
    let i = resolve_index(index, items.len(), false)?;
    items[i] = value;
    Ok(HostObject::None)
}

fn clear<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    arguments::<0>(object, "clear", args)?;
    storage::<T>(object)?.borrow_mut().clear();
    Ok(HostObject::None)
}

fn extend<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    let [source] = arguments::<1>(object, "extend", args)?;
    let extra = elements_from::<T>(object.class(), "extend", source)?;
    let mut items = storage::<T>(object)?.borrow_mut();
    items.try_reserve(extra.len())?;
    items.extend(extra);
    Ok(HostObject::None)
}

fn insert<T: ContainerElement>(
    _module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    let [index, value] = arguments::<2>(object, "insert", args)?;
    let index = int_argument(object, "insert", args, index)?;
    let value = T::accept(value)?;
    let mut items = storage::<T>(object)?.borrow_mut();
    let i = resolve_index(index, items.len(), true)?;
    items.try_reserve(1)?;
    items.insert(i, value);
    Ok(HostObject::None)
}

fn pop<T: ContainerElement>(
    module: &HostModule,
    object: &OpaqueObject,
    args: &[HostObject],
) -> BridgeResult<HostObject> {
    let removed = match args {
        [] => storage::<T>(object)?
            .borrow_mut()
            .pop()
            .ok_or_else(|| empty_error(object, "pop"))?,
        [index] => {
            let index = int_argument(object, "pop", args, index)?;
            let mut items = storage::<T>(object)?.borrow_mut();
            let i = resolve_index(index, items.len(), false)?;
            items.remove(i)
        }
        _ => return Err(BridgeError::no_overload(object.class(), "pop", args)),
    };
    removed.to_host(module)
}
