//! Algorithm termination handling. See [`TerminationReason`] for full documentation.

use std::fmt::{self, Debug};

/// Represents a reason for the algorithm terminating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The standard deviation of the function values around the value at the centroid fell below
    /// the tolerance.
    Converged,
    /// The maximum number of iterations has been reached without converging.
    MaxIterationsReached,
    /// The objective function has returned an invalid value (`NAN` or infinite).
    InvalidFunctionValue,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        Debug::fmt(self, fmt)
    }
}

/// Returns the convergence statistic of the simplex: the root of the sum of squared deviations of
/// `values` from `centroid_value`, each scaled by `1 / dim`.
///
/// Note that the deviations are taken from the value at the centroid rather than from the mean
/// value, and that the scaling uses the dimension rather than the number of points.
pub(crate) fn standard_deviation(values: &[f64], centroid_value: f64, dim: usize) -> f64 {
    let scale = 1.0 / dim as f64;

    values
        .iter()
        .map(|value| (value - centroid_value).powi(2) * scale)
        .sum::<f64>()
        .sqrt()
}

/// Checks the termination criteria after an iteration. `completed_iterations` is the number of
/// iterations completed before the one just performed.
pub(crate) fn check_termination_criteria(
    completed_iterations: usize,
    max_iterations: usize,
    tolerance: f64,
    standard_deviation: f64,
) -> Option<TerminationReason> {
    if standard_deviation < tolerance {
        Some(TerminationReason::Converged)
    } else if completed_iterations >= max_iterations {
        Some(TerminationReason::MaxIterationsReached)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_standard_deviation() {
        assert_eq!(0.0, standard_deviation(&[2.0, 2.0, 2.0], 2.0, 2));
        // sqrt((1 + 1 + 4) / 2)
        assert_approx_eq!(3f64.sqrt(), standard_deviation(&[1.0, 3.0, 4.0], 2.0, 2));
        // Deviations are measured from the centroid value, not the mean
        assert_approx_eq!(
            (3.0 * 25.0 / 2f64).sqrt(),
            standard_deviation(&[5.0, 5.0, 5.0], 0.0, 2)
        );
        // sqrt(4 * 1 / 3)
        assert_approx_eq!(
            (4.0 / 3f64).sqrt(),
            standard_deviation(&[1.0, -1.0, 1.0, -1.0], 0.0, 3)
        );
    }

    #[test]
    fn test_check_termination_criteria_converged() {
        assert_eq!(
            Some(TerminationReason::Converged),
            check_termination_criteria(0, 1000, 1e-8, 1e-9),
        );
        // Convergence takes priority over the iteration limit
        assert_eq!(
            Some(TerminationReason::Converged),
            check_termination_criteria(1000, 1000, 1e-8, 1e-9),
        );
    }

    #[test]
    fn test_check_termination_criteria_max_iterations() {
        assert_eq!(
            Some(TerminationReason::MaxIterationsReached),
            check_termination_criteria(1000, 1000, 1e-8, 1.0),
        );
        assert_eq!(
            Some(TerminationReason::MaxIterationsReached),
            check_termination_criteria(0, 0, 1e-8, 1.0),
        );
    }

    #[test]
    fn test_check_termination_criteria_none() {
        assert_eq!(None, check_termination_criteria(999, 1000, 1e-8, 1.0));
        // The tolerance is a strict bound
        assert_eq!(None, check_termination_criteria(0, 1000, 1e-8, 1e-8));
        assert_eq!(None, check_termination_criteria(0, 1000, 0.0, 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!("Converged", TerminationReason::Converged.to_string());
        assert_eq!(
            "MaxIterationsReached",
            TerminationReason::MaxIterationsReached.to_string()
        );
    }
}
