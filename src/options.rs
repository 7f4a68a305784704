//! Initialization of a [`NelderMead`] optimizer. See [`NelderMeadOptions`] for full documentation.

use std::error::Error;
use std::fmt;

#[cfg(feature = "plotters")]
use crate::PlotOptions;
use crate::{NelderMead, ObjectiveFunction};

/// The default value for [`NelderMeadOptions::max_iterations`].
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// The default value for [`NelderMeadOptions::tolerance`].
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// A builder for [`NelderMead`]. Used to set the initial simplex and adjust the termination
/// criteria to each particular problem.
///
/// # Examples
///
/// ```
/// use downhill_simplex::{NelderMeadOptions, SVector};
///
/// let sphere = |x: &SVector<f64, 2>| x.norm_squared();
/// let mut nelder_mead = NelderMeadOptions::<2>::new([[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]])
///     .max_iterations(500)
///     .tolerance(1e-10)
///     .build(sphere)
///     .unwrap();
///
/// let result = nelder_mead.run();
/// ```
#[derive(Clone, Debug)]
pub struct NelderMeadOptions<const N: usize> {
    /// The `N + 1` points of the initial simplex, each with `N` coordinates.
    pub initial_points: Vec<Vec<f64>>,
    /// The number of iterations after which to stop if the algorithm has not converged. One more
    /// iteration than this can be performed in total. Default value is `1000`.
    pub max_iterations: usize,
    /// The algorithm has converged once the standard deviation of the function values falls below
    /// this value. Default value is `1e-8`.
    pub tolerance: f64,
    /// The number of iterations to wait in between each automatic
    /// [`NelderMead::print_info`][crate::NelderMead::print_info] call. Printing is disabled if
    /// `None`. Default value is `None`.
    pub print_gap_iterations: Option<usize>,
    /// If `Some`, a data plot will be recorded (see [`Plot`][crate::plotting::Plot]). Default
    /// value is `None`.
    #[cfg(feature = "plotters")]
    pub plot_options: Option<PlotOptions>,
}

impl<const N: usize> NelderMeadOptions<N> {
    /// Creates a new `NelderMeadOptions` with the initial simplex and default values for everything
    /// else. Set individual options using the provided methods.
    pub fn new<I, P>(initial_points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[f64]>,
    {
        Self {
            initial_points: initial_points
                .into_iter()
                .map(|point| point.as_ref().to_vec())
                .collect(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            print_gap_iterations: None,
            #[cfg(feature = "plotters")]
            plot_options: None,
        }
    }

    /// Changes the maximum number of iterations from the default value.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Changes the convergence tolerance from the default value (must be finite and not negative).
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enables printing of the algorithm's progress every `min_gap_iterations` iterations (the
    /// first few iterations are always printed).
    pub fn enable_printing(mut self, min_gap_iterations: usize) -> Self {
        self.print_gap_iterations = Some(min_gap_iterations);
        self
    }

    /// Enables recording of a data plot for various state variables of the algorithm. See
    /// [`Plot`][crate::plotting::Plot] for how to save it to a file.
    #[cfg(feature = "plotters")]
    pub fn enable_plot(mut self, plot_options: PlotOptions) -> Self {
        self.plot_options = Some(plot_options);
        self
    }

    /// Attempts to build the [`NelderMead`] using the chosen options, evaluating the objective
    /// function at each initial point.
    pub fn build<'a, F: ObjectiveFunction<N> + 'a>(
        self,
        objective_function: F,
    ) -> Result<NelderMead<'a, N>, InvalidInputError> {
        NelderMead::new(Box::new(objective_function), self)
    }
}

/// Represents invalid input to the Nelder-Mead algorithm.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidInputError {
    /// The number of dimensions is zero.
    ZeroDimensions,
    /// The number of initial points is not one more than the number of dimensions.
    PointCount { expected: usize, found: usize },
    /// An initial point does not have one coordinate per dimension.
    PointDimension {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// The tolerance is negative or non-finite.
    Tolerance,
    /// The objective function returned an invalid value (`NAN` or infinite) at an initial point.
    InvalidFunctionValue { index: usize },
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InvalidInputError::ZeroDimensions => {
                write!(fmt, "number of dimensions must be nonzero")
            }
            InvalidInputError::PointCount { expected, found } => write!(
                fmt,
                "expected {} initial points, found {}",
                expected, found
            ),
            InvalidInputError::PointDimension {
                index,
                expected,
                found,
            } => write!(
                fmt,
                "initial point {} has {} coordinates, expected {}",
                index, found, expected
            ),
            InvalidInputError::Tolerance => {
                write!(fmt, "tolerance must be finite and not negative")
            }
            InvalidInputError::InvalidFunctionValue { index } => write!(
                fmt,
                "objective function returned an invalid value at initial point {}",
                index
            ),
        }
    }
}

impl Error for InvalidInputError {}

#[cfg(test)]
mod tests {
    use nalgebra::SVector;

    use super::*;

    fn dummy_function(_: &SVector<f64, 2>) -> f64 {
        0.0
    }

    #[test]
    fn test_defaults() {
        let options =
            NelderMeadOptions::<2>::new(vec![vec![0.0, 0.0], vec![2.0, 0.0], vec![0.0, 2.0]]);

        assert_eq!(1000, options.max_iterations);
        assert_eq!(1e-8, options.tolerance);
        assert_eq!(None, options.print_gap_iterations);
        assert_eq!(3, options.initial_points.len());
        assert_eq!(vec![2.0, 0.0], options.initial_points[1]);
    }

    #[test]
    fn test_build() {
        let points = [[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]];

        assert!(NelderMeadOptions::<2>::new(points).build(dummy_function).is_ok());
        assert!(NelderMeadOptions::<2>::new(points)
            .tolerance(0.0)
            .max_iterations(0)
            .build(dummy_function)
            .is_ok());
        assert_eq!(
            InvalidInputError::Tolerance,
            NelderMeadOptions::<2>::new(points)
                .tolerance(-1.0)
                .build(dummy_function)
                .err()
                .unwrap(),
        );
        assert_eq!(
            InvalidInputError::Tolerance,
            NelderMeadOptions::<2>::new(points)
                .tolerance(f64::NAN)
                .build(dummy_function)
                .err()
                .unwrap(),
        );
        assert_eq!(
            InvalidInputError::PointCount {
                expected: 3,
                found: 2
            },
            NelderMeadOptions::<2>::new(&points[..2])
                .build(dummy_function)
                .err()
                .unwrap(),
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            "expected 3 initial points, found 2",
            InvalidInputError::PointCount {
                expected: 3,
                found: 2
            }
            .to_string(),
        );
        assert_eq!(
            "initial point 1 has 3 coordinates, expected 2",
            InvalidInputError::PointDimension {
                index: 1,
                expected: 2,
                found: 3
            }
            .to_string(),
        );
    }
}
