// ============================================================================
// Registry
// Compile-time registration of numeric types and built specializations
// ============================================================================

//! Registration macros and the default registration set.
//!
//! Types are written the way users type them on the command line:
//!
//! ```
//! use fluid_dispatch::{catalogue, numeric_type};
//!
//! type Quantity = numeric_type!(FIXED(32, 16));
//! assert_eq!(<Quantity as fluid_dispatch::numeric::Real>::type_name(), "FIXED(32,16)");
//!
//! let catalogue = catalogue![FLOAT, DOUBLE, FIXED(32, 16)];
//! assert_eq!(catalogue.index_of("FIXED(32,16)"), Some(2));
//! ```
//!
//! Registering a width the storage layer does not provide (e.g.
//! `FIXED(24, 8)`) fails to compile.

use crate::domain::{Catalogue, TypeDescriptor};
use crate::engine::{DispatchResult, Specialization, SpecializationTable};
use crate::interfaces::Simulation;
use crate::numeric::Real;

/// Maps a catalogue spelling to its Rust type.
#[macro_export]
macro_rules! numeric_type {
    (FLOAT) => { f32 };
    (DOUBLE) => { f64 };
    (FIXED($n:literal, $k:literal)) => { $crate::numeric::Fixed<$n, $k> };
    (FAST_FIXED($n:literal, $k:literal)) => { $crate::numeric::FastFixed<$n, $k> };
    ($t:ty) => { $t };
}

/// Builds a [`Catalogue`](crate::domain::Catalogue) from type spellings, in
/// registration order.
#[macro_export]
macro_rules! catalogue {
    ($($kw:ident $(($n:literal, $k:literal))?),* $(,)?) => {
        $crate::domain::Catalogue::new([
            $( $crate::registry::descriptor_of::<$crate::numeric_type!($kw $(($n, $k))?)>() ),*
        ])
    };
}

/// Lists the (quantity, velocity, velocity-flow) triples to build.
///
/// Expands to a `Vec<Specialization<S>>`; `S` is inferred from use.
///
/// ```
/// use fluid_dispatch::engine::{FieldProbe, Specialization};
/// use fluid_dispatch::specializations;
///
/// let built: Vec<Specialization<FieldProbe>> = specializations![
///     (FIXED(32, 16), FLOAT, DOUBLE),
///     (DOUBLE, DOUBLE, DOUBLE),
/// ];
/// assert_eq!(built.len(), 2);
/// ```
#[macro_export]
macro_rules! specializations {
    (@one $p:ident $(($pn:literal, $pk:literal))?,
          $v:ident $(($vn:literal, $vk:literal))?,
          $f:ident $(($wn:literal, $wk:literal))?) => {
        $crate::engine::Specialization::of::<
            $crate::numeric_type!($p $(($pn, $pk))?),
            $crate::numeric_type!($v $(($vn, $vk))?),
            $crate::numeric_type!($f $(($wn, $wk))?),
        >()
    };
    ($( ( $($kw:ident $(($n:literal, $k:literal))?),+ ) ),* $(,)?) => {
        ::std::vec![ $( $crate::specializations!(@one $($kw $(($n, $k))?),+) ),* ]
    };
}

/// Builds every triple over the given types (`types.len()^3` entries).
///
/// Opt-in only: compile time and binary size grow with the cube.
///
/// ```
/// use fluid_dispatch::engine::{FieldProbe, Specialization};
/// use fluid_dispatch::numeric::Fixed;
/// use fluid_dispatch::specialization_cube;
///
/// let built: Vec<Specialization<FieldProbe>> = specialization_cube![f32, f64, Fixed<32, 16>];
/// assert_eq!(built.len(), 27);
/// ```
#[macro_export]
macro_rules! specialization_cube {
    (@f $out:ident; $p:ty; $v:ty; [$($f:ty),+]) => {
        $( $out.push($crate::engine::Specialization::of::<$p, $v, $f>()); )+
    };
    (@v $out:ident; $all:tt; $p:ty; [$($v:ty),+]) => {
        $( $crate::specialization_cube!(@f $out; $p; $v; $all); )+
    };
    (@p $out:ident; $all:tt; $($p:ty),+) => {
        $( $crate::specialization_cube!(@v $out; $all; $p; $all); )+
    };
    ($($t:ty),+ $(,)?) => {{
        let mut entries = ::std::vec::Vec::new();
        $crate::specialization_cube!(@p entries; [$($t),+]; $($t),+);
        entries
    }};
}

/// Descriptor of a registered Rust type.
#[inline]
pub const fn descriptor_of<T: Real>() -> TypeDescriptor {
    T::DESCRIPTOR
}

// ============================================================================
// Default Registration Set
// ============================================================================

/// Types the `fluid` binary knows by name.
pub fn default_catalogue() -> Catalogue {
    catalogue![
        FLOAT,
        DOUBLE,
        FIXED(32, 16),
        FIXED(64, 32),
        FAST_FIXED(32, 16),
        FAST_FIXED(64, 32),
    ]
}

/// Combinations the `fluid` binary is built with.
///
/// Uniform triples for every registered type plus a few mixed ones. Every
/// other combination of registered names is reported as unbuilt.
pub fn default_specializations<S: Simulation>() -> Vec<Specialization<S>> {
    specializations![
        (FLOAT, FLOAT, FLOAT),
        (DOUBLE, DOUBLE, DOUBLE),
        (FIXED(32, 16), FIXED(32, 16), FIXED(32, 16)),
        (FIXED(64, 32), FIXED(64, 32), FIXED(64, 32)),
        (FAST_FIXED(32, 16), FAST_FIXED(32, 16), FAST_FIXED(32, 16)),
        (FAST_FIXED(64, 32), FAST_FIXED(64, 32), FAST_FIXED(64, 32)),
        (FIXED(32, 16), FLOAT, DOUBLE),
        (FIXED(32, 16), FIXED(32, 16), DOUBLE),
        (FIXED(64, 32), DOUBLE, DOUBLE),
        (FLOAT, DOUBLE, DOUBLE),
        (DOUBLE, FIXED(32, 16), FIXED(32, 16)),
        (FAST_FIXED(32, 16), FAST_FIXED(64, 32), FAST_FIXED(64, 32)),
    ]
}

/// The default allow-list keyed against `catalogue`.
///
/// # Errors
/// `UnknownTypeName` if `catalogue` lacks a type the defaults use.
pub fn default_table<S: Simulation>(catalogue: &Catalogue) -> DispatchResult<SpecializationTable<S>> {
    SpecializationTable::new(catalogue, default_specializations())
}
