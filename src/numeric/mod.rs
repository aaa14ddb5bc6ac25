// ============================================================================
// Numeric Module
// Numeric representations a simulation kernel can be instantiated with
// ============================================================================
//
// This module provides:
// - FixedPoint<N, K, S>: binary fixed-point with compile-time width, precision
//   and storage strategy (aliases Fixed<N, K> and FastFixed<N, K>)
// - Real: the numeric contract shared by f32, f64 and every FixedPoint
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - Exact-width and fastest-width storage produce identical raw values
// - Checked arithmetic returns Result; operators wrap into the N-bit range
// - Unsupported widths are rejected at compile time

mod errors;
mod fixed_point;
mod real;
mod storage;

pub use errors::{NumericError, NumericResult};
pub use fixed_point::{FastFixed, Fixed, FixedPoint};
pub use real::Real;
pub use storage::{Exact, Fast, RawInt, Storage, StorageKind, StorageStrategy, SUPPORTED_WIDTHS};
