//! Convenience functions for easier use of the library, and the reference objective functions.

use nalgebra::SVector;

use crate::options::InvalidInputError;
use crate::{NelderMeadOptions, ObjectiveFunction, OptimizationResult};

/// The initial simplex of the reference problem: `(0, 0)`, `(2, 0)` and `(0, 2)`.
pub const REFERENCE_INITIAL_POINTS: [[f64; 2]; 3] = [[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]];

/// Minimizes the value of `f` starting from the simplex formed by `initial_points` and returns
/// the result once the algorithm converges or `max_iterations` is reached.
///
/// Equivalent to using [`NelderMeadOptions`][crate::NelderMeadOptions] with the given limits.
/// [`NelderMeadOptions`][crate::NelderMeadOptions] should be used instead if further
/// configuration is desired.
///
/// # Examples
///
/// ```
/// use downhill_simplex::functions::{self, REFERENCE_INITIAL_POINTS};
/// use downhill_simplex::TerminationReason;
///
/// let result = functions::fmin(
///     functions::rosenbrock::<2>,
///     REFERENCE_INITIAL_POINTS,
///     1000,
///     1e-8,
/// )
/// .unwrap();
///
/// assert_eq!(result.reason, TerminationReason::Converged);
/// ```
pub fn fmin<const N: usize, F, I, P>(
    f: F,
    initial_points: I,
    max_iterations: usize,
    tolerance: f64,
) -> Result<OptimizationResult<N>, InvalidInputError>
where
    F: ObjectiveFunction<N>,
    I: IntoIterator<Item = P>,
    P: AsRef<[f64]>,
{
    Ok(NelderMeadOptions::new(initial_points)
        .max_iterations(max_iterations)
        .tolerance(tolerance)
        .build(f)?
        .run())
}

/// The `N`-dimensional Rosenbrock function, with its minimum of `0` at `(1, ..., 1)`. For `N = 2`
/// it is `100 * (x1 - x0^2)^2 + (1 - x0)^2`.
pub fn rosenbrock<const N: usize>(x: &SVector<f64, N>) -> f64 {
    (0..N.saturating_sub(1))
        .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2))
        .sum()
}

/// The sum of squares of the coordinates, with its minimum of `0` at the origin.
pub fn sphere<const N: usize>(x: &SVector<f64, N>) -> f64 {
    x.norm_squared()
}
