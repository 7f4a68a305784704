//! A plain-text summary of a finished run. See [`Report`] for the format.

use std::fmt;

use crate::utils::format_scientific;
use crate::{OptimizationResult, TerminationReason};

/// Formats an [`OptimizationResult`] as a plain-text report:
///
/// ```text
/// Minimum reached.
/// p0 F(1.000017, 1.000041) = 4.898155e-09
/// p1 F(1.000108, 1.000217) = 1.194000e-08
/// p2 F(0.999957, 0.999913) = 1.870241e-09
/// Standard deviation: 5.196704e-09
/// Iterations taken: 58
/// ```
///
/// The first line is `Max iterations (<max>) reached.` instead if the run was stopped by the
/// iteration limit.
///
/// # Examples
///
/// ```
/// use downhill_simplex::functions::{self, REFERENCE_INITIAL_POINTS};
/// use downhill_simplex::report::Report;
///
/// let result =
///     functions::fmin(functions::rosenbrock::<2>, REFERENCE_INITIAL_POINTS, 1000, 1e-8).unwrap();
///
/// println!("{}", Report::new(&result));
/// ```
pub struct Report<'a, const N: usize> {
    result: &'a OptimizationResult<N>,
}

impl<'a, const N: usize> Report<'a, N> {
    /// Creates a report for `result`.
    pub fn new(result: &'a OptimizationResult<N>) -> Self {
        Self { result }
    }
}

impl<'a, const N: usize> fmt::Display for Report<'a, N> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.result.reason {
            TerminationReason::Converged => writeln!(fmt, "Minimum reached.")?,
            TerminationReason::MaxIterationsReached => {
                writeln!(fmt, "Max iterations ({}) reached.", self.result.max_iterations)?
            }
            TerminationReason::InvalidFunctionValue => {
                writeln!(fmt, "Invalid function value encountered.")?
            }
        }

        let simplex = &self.result.simplex;
        for (i, (point, value)) in simplex.points().iter().zip(simplex.values()).enumerate() {
            let coordinates = point
                .iter()
                .map(|x| format!("{:.6}", x))
                .collect::<Vec<_>>()
                .join(", ");

            writeln!(
                fmt,
                "p{} F({}) = {}",
                i,
                coordinates,
                format_scientific(*value)
            )?;
        }

        if let Some(standard_deviation) = self.result.standard_deviation {
            writeln!(
                fmt,
                "Standard deviation: {}",
                format_scientific(standard_deviation)
            )?;
        }

        write!(fmt, "Iterations taken: {}", self.result.iterations)
    }
}
