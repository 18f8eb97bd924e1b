//! Shape dispatch.
//!
//! [`Shape`] is the closed set of structural categories the adapter
//! converts. Each variant routes to the predicate and converter pair of its
//! module in [`crate::convert`], so adding a shape means adding a variant
//! and the compiler points at every dispatch site.
//!
//! # Examples
//!
//! ```rust
//! use adapter_host::host::HostObject;
//! use adapter_host::shape::{NativeValue, Shape};
//! use adapter_host::config::ElementSampling;
//!
//! let obj = HostObject::tuple([1.0, 2.0]);
//! assert!(Shape::Pair.check(&obj));
//!
//! let shapes: Vec<Shape> = Shape::matching(&obj, ElementSampling::First).collect();
//! assert_eq!(shapes, vec![Shape::Vector, Shape::Pair]);
//!
//! let value = Shape::Pair.convert(&obj).unwrap();
//! assert_eq!(value.shape(), Shape::Pair);
//! ```

use std::fmt;

use risks_core::types::Real;

use crate::config::ElementSampling;
use crate::convert::mesher::MesherPoint;
use crate::convert::{
    dated, mesher, pair, pair_vector, scalar, vector, vector_pair, vector_vector, DatedReal,
    RealPair, RealVectorPair,
};
use crate::error::BridgeResult;
use crate::host::HostObject;

/// Structural category of a convertible value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// AD scalar
    Scalar,
    /// Sequence of Real
    Vector,
    /// Sequence of sequences of Real
    VectorVector,
    /// Pair of Real
    Pair,
    /// Sequence of Real pairs
    PairVector,
    /// Pair of Real sequences
    VectorPair,
    /// List of mesher points
    MesherPoints,
    /// Date and Real pair
    DatedPair,
    /// Sequence of Date and Real pairs
    DatedVector,
}

impl Shape {
    /// All shapes, in dispatch order.
    pub const ALL: [Shape; 9] = [
        Shape::Scalar,
        Shape::Vector,
        Shape::VectorVector,
        Shape::Pair,
        Shape::PairVector,
        Shape::VectorPair,
        Shape::MesherPoints,
        Shape::DatedPair,
        Shape::DatedVector,
    ];

    /// Human-readable shape name.
    pub fn name(self) -> &'static str {
        match self {
            Shape::Scalar => "Real",
            Shape::Vector => "sequence of Real",
            Shape::VectorVector => "sequence of sequences of Real",
            Shape::Pair => "pair of Real",
            Shape::PairVector => "sequence of Real pairs",
            Shape::VectorPair => "pair of Real sequences",
            Shape::MesherPoints => "list of mesher points",
            Shape::DatedPair => "pair of Date and Real",
            Shape::DatedVector => "sequence of Date and Real pairs",
        }
    }

    /// Shape predicate with first-element sampling.
    pub fn check(self, object: &HostObject) -> bool {
        self.check_with(object, ElementSampling::First)
    }

    /// Shape predicate. Fixed-arity shapes ignore `sampling`.
    pub fn check_with(self, object: &HostObject, sampling: ElementSampling) -> bool {
        match self {
            Shape::Scalar => scalar::check(object),
            Shape::Vector => vector::check_with(object, sampling),
            Shape::VectorVector => vector_vector::check_with(object, sampling),
            Shape::Pair => pair::check(object),
            Shape::PairVector => pair_vector::check_with(object, sampling),
            Shape::VectorPair => vector_pair::check_with(object, sampling),
            Shape::MesherPoints => mesher::check_with(object, sampling),
            Shape::DatedPair => dated::check_pair(object),
            Shape::DatedVector => dated::check_vector_with(object, sampling),
        }
    }

    /// Converts `object` with the converter paired with this shape's predicate.
    pub fn convert(self, object: &HostObject) -> BridgeResult<NativeValue> {
        Ok(match self {
            Shape::Scalar => NativeValue::Scalar(scalar::to_native(object)?),
            Shape::Vector => NativeValue::Vector(vector::from_host(object)?),
            Shape::VectorVector => NativeValue::VectorVector(vector_vector::from_host(object)?),
            Shape::Pair => NativeValue::Pair(pair::from_host(object)?),
            Shape::PairVector => NativeValue::PairVector(pair_vector::from_host(object)?),
            Shape::VectorPair => NativeValue::VectorPair(vector_pair::from_host(object)?),
            Shape::MesherPoints => NativeValue::MesherPoints(mesher::from_host(object)?),
            Shape::DatedPair => NativeValue::DatedPair(dated::pair_from_host(object)?),
            Shape::DatedVector => NativeValue::DatedVector(dated::vector_from_host(object)?),
        })
    }

    /// Shapes whose predicate accepts `object`, in dispatch order.
    ///
    /// A literal can match several shapes: `(1.0, 2.0)` is both a sequence
    /// and a pair of Real.
    pub fn matching(
        object: &HostObject,
        sampling: ElementSampling,
    ) -> impl Iterator<Item = Shape> + '_ {
        Shape::ALL
            .into_iter()
            .filter(move |shape| shape.check_with(object, sampling))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted native value, tagged with its shape.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeValue {
    /// AD scalar
    Scalar(Real),
    /// Sequence of Real
    Vector(Vec<Real>),
    /// Sequence of sequences of Real
    VectorVector(Vec<Vec<Real>>),
    /// Pair of Real
    Pair(RealPair),
    /// Sequence of Real pairs
    PairVector(Vec<RealPair>),
    /// Pair of Real sequences
    VectorPair(RealVectorPair),
    /// List of mesher points
    MesherPoints(Vec<MesherPoint>),
    /// Date and Real pair
    DatedPair(DatedReal),
    /// Sequence of Date and Real pairs
    DatedVector(Vec<DatedReal>),
}

impl NativeValue {
    /// Shape of this value.
    pub fn shape(&self) -> Shape {
        match self {
            NativeValue::Scalar(_) => Shape::Scalar,
            NativeValue::Vector(_) => Shape::Vector,
            NativeValue::VectorVector(_) => Shape::VectorVector,
            NativeValue::Pair(_) => Shape::Pair,
            NativeValue::PairVector(_) => Shape::PairVector,
            NativeValue::VectorPair(_) => Shape::VectorPair,
            NativeValue::MesherPoints(_) => Shape::MesherPoints,
            NativeValue::DatedPair(_) => Shape::DatedPair,
            NativeValue::DatedVector(_) => Shape::DatedVector,
        }
    }

    /// Converts back to a fresh host value: sequences become lists, pairs
    /// and points become tuples.
    pub fn to_host(&self) -> BridgeResult<HostObject> {
        match self {
            NativeValue::Scalar(x) => x.to_host(),
            NativeValue::Vector(v) => v.to_host(),
            NativeValue::VectorVector(v) => v.to_host(),
            NativeValue::Pair(p) => p.to_host(),
            NativeValue::PairVector(v) => v.to_host(),
            NativeValue::VectorPair(p) => p.to_host(),
            NativeValue::MesherPoints(v) => v.to_host(),
            NativeValue::DatedPair(p) => p.to_host(),
            NativeValue::DatedVector(v) => v.to_host(),
        }
    }
}

/// Native types that can be read from a host object.
pub trait FromHost: Sized {
    /// Shape accepted by [`FromHost::from_host`].
    const SHAPE: Shape;

    /// Converts `object`, copying its contents.
    fn from_host(object: &HostObject) -> BridgeResult<Self>;
}

/// Native types that can be written to a fresh host object.
pub trait ToHost {
    /// Converts `self` into a new host value.
    fn to_host(&self) -> BridgeResult<HostObject>;
}

macro_rules! impl_host_conversion {
    ($ty:ty, $shape:expr, $from:path, $to:expr) => {
        impl FromHost for $ty {
            const SHAPE: Shape = $shape;

            fn from_host(object: &HostObject) -> BridgeResult<Self> {
                $from(object)
            }
        }

        impl ToHost for $ty {
            fn to_host(&self) -> BridgeResult<HostObject> {
                $to(self)
            }
        }
    };
}

impl_host_conversion!(Real, Shape::Scalar, scalar::to_native, |x: &Real| Ok(
    scalar::to_foreign(*x)
));
impl_host_conversion!(Vec<Real>, Shape::Vector, vector::from_host, |v: &Vec<Real>| {
    vector::to_list(v)
});
impl_host_conversion!(
    Vec<Vec<Real>>,
    Shape::VectorVector,
    vector_vector::from_host,
    |v: &Vec<Vec<Real>>| vector_vector::to_list(v)
);
impl_host_conversion!(RealPair, Shape::Pair, pair::from_host, pair::to_tuple);
impl_host_conversion!(
    Vec<RealPair>,
    Shape::PairVector,
    pair_vector::from_host,
    |v: &Vec<RealPair>| pair_vector::to_list(v)
);
impl_host_conversion!(
    RealVectorPair,
    Shape::VectorPair,
    vector_pair::from_host,
    vector_pair::to_tuple
);
impl_host_conversion!(
    Vec<MesherPoint>,
    Shape::MesherPoints,
    mesher::from_host,
    |v: &Vec<MesherPoint>| mesher::to_list(v)
);
impl_host_conversion!(DatedReal, Shape::DatedPair, dated::pair_from_host, |p: &DatedReal| Ok(
    dated::pair_to_tuple(p)
));
impl_host_conversion!(
    Vec<DatedReal>,
    Shape::DatedVector,
    dated::vector_from_host,
    |v: &Vec<DatedReal>| dated::vector_to_list(v)
);

impl HostObject {
    /// Converts this object into a native value of type `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adapter_host::host::HostObject;
    /// use risks_core::types::Real;
    ///
    /// let xs: Vec<Real> = HostObject::list([1.0, 2.0]).extract().unwrap();
    /// assert_eq!(xs.len(), 2);
    /// ```
    pub fn extract<T: FromHost>(&self) -> BridgeResult<T> {
        T::from_host(self)
    }
}
