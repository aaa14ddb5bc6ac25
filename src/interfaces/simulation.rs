// ============================================================================
// Simulation Interface
// Contract for the generic kernel the dispatcher instantiates
// ============================================================================

use crate::domain::Field;
use crate::numeric::Real;

/// A simulation kernel written once, generic over three numeric types.
///
/// The dispatcher never interprets `Output`; it forwards whatever the
/// specialization returns. Kernels that can fail should use a `Result`
/// output.
///
/// # Type Parameters of `run`
/// - `P`: particle quantity type
/// - `V`: velocity type
/// - `VF`: velocity flow type
pub trait Simulation {
    /// Result of one run
    type Output;

    /// Run the kernel over the initial field.
    fn run<P: Real, V: Real, VF: Real>(&self, field: &Field) -> Self::Output;
}

impl<S: Simulation + ?Sized> Simulation for &S {
    type Output = S::Output;

    fn run<P: Real, V: Real, VF: Real>(&self, field: &Field) -> Self::Output {
        (**self).run::<P, V, VF>(field)
    }
}
