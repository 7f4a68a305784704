//! A trait for types that can be used as an objective function. See [`ObjectiveFunction`] for full
//! documentation.

use nalgebra::SVector;

/// A function of `N` real variables to be minimized.
///
/// Implemented automatically for closures and functions with the signature
/// `FnMut(&SVector<f64, N>) -> f64`. Custom types can implement it to store parameters or state:
///
/// ```
/// use downhill_simplex::{ObjectiveFunction, SVector};
///
/// struct Shifted {
///     offset: f64,
/// }
///
/// impl ObjectiveFunction<2> for Shifted {
///     fn evaluate(&mut self, x: &SVector<f64, 2>) -> f64 {
///         (x[0] - self.offset).powi(2) + (x[1] - self.offset).powi(2)
///     }
/// }
/// ```
///
/// The function is evaluated many times per iteration and should be deterministic. Returning `NAN`
/// or an infinite value terminates the algorithm (see
/// [`TerminationReason::InvalidFunctionValue`][crate::TerminationReason::InvalidFunctionValue]).
pub trait ObjectiveFunction<const N: usize> {
    fn evaluate(&mut self, x: &SVector<f64, N>) -> f64;
}

impl<F, const N: usize> ObjectiveFunction<N> for F
where
    F: FnMut(&SVector<f64, N>) -> f64,
{
    fn evaluate(&mut self, x: &SVector<f64, N>) -> f64 {
        (self)(x)
    }
}
