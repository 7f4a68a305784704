//! An implementation of the Nelder-Mead downhill simplex method. It is used to minimize the value
//! of an objective function of `N` real variables without using derivatives, by repeatedly
//! reflecting, expanding, contracting or shrinking a simplex of `N + 1` trial points.
//!
//! # Quick Start
//!
//! To optimize a function, create and build a [`NelderMeadOptions`] from the initial simplex and
//! call [`NelderMead::run`]. The termination criteria can be adjusted using
//! [`NelderMeadOptions`]. See [`Plot`][plotting::Plot] for generation of data plots.
//!
//! ```
//! use downhill_simplex::{NelderMeadOptions, SVector, TerminationReason};
//!
//! let rosenbrock =
//!     |x: &SVector<f64, 2>| 100.0 * (x[1] - x[0].powi(2)).powi(2) + (1.0 - x[0]).powi(2);
//!
//! let mut nelder_mead = NelderMeadOptions::new([[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]])
//!     .max_iterations(1000)
//!     .tolerance(1e-8)
//!     .build(rosenbrock)
//!     .unwrap();
//!
//! let result = nelder_mead.run();
//!
//! assert_eq!(result.reason, TerminationReason::Converged);
//! assert!((result.overall_best.point[0] - 1.0).abs() < 1e-3);
//! ```
//!
//! The [`objective_function`] module provides a trait that allows for custom objective function
//! types that store state and parameters, and the [`NelderMead::next`] method provides finer
//! control over iteration if needed. The [`functions`] module contains [`functions::fmin`] for
//! running the whole algorithm in a single call, and the [`report`] module formats a finished run
//! as a plain-text summary.

// lib.rs contains the top-level `NelderMead` type that drives the algorithm and interface as well
// as the user-facing result types.
//
// Configuration is handled in the `options` module.
//
// Iteration happens in `NelderMead::next`, but the simplex transformations themselves are in the
// `simplex` module.
//
// Termination criteria are handled in the `termination` module.

mod evaluation;
pub mod functions;
mod history;
pub mod objective_function;
pub mod options;
#[cfg(feature = "plotters")]
pub mod plotting;
pub mod report;
pub mod simplex;
pub mod termination;
mod utils;

pub use nalgebra::SVector;

pub use crate::objective_function::ObjectiveFunction;
pub use crate::options::{InvalidInputError, NelderMeadOptions};
#[cfg(feature = "plotters")]
pub use crate::plotting::PlotOptions;
pub use crate::simplex::{Simplex, Transformation};
pub use crate::termination::TerminationReason;

use crate::evaluation::Evaluator;
use crate::history::History;
#[cfg(feature = "plotters")]
use crate::plotting::Plot;
use crate::simplex::Step;

/// A point with its corresponding objective function value.
#[derive(Clone, Debug)]
pub struct Individual<const N: usize> {
    pub point: SVector<f64, N>,
    pub value: f64,
}

impl<const N: usize> Individual<N> {
    pub(crate) fn new(point: SVector<f64, N>, value: f64) -> Self {
        Self { point, value }
    }
}

/// Data returned when the algorithm terminates.
///
/// Contains the:
///
/// - Final simplex with the objective function value at each point
/// - Best point of the final simplex
/// - Best point of any iteration
/// - Number of iterations taken, including the one in which the algorithm terminated
/// - Iteration limit the run was configured with
/// - Number of objective function evaluations
/// - Final value of the convergence statistic (`None` if the algorithm terminated before it could
///   be computed)
/// - Reason for termination
#[derive(Clone, Debug)]
pub struct OptimizationResult<const N: usize> {
    pub simplex: Simplex<N>,
    pub current_best: Individual<N>,
    pub overall_best: Individual<N>,
    pub iterations: usize,
    pub max_iterations: usize,
    pub function_evals: usize,
    pub standard_deviation: Option<f64>,
    pub reason: TerminationReason,
}

/// A type that handles algorithm iteration and printing/plotting of results. Use
/// [`NelderMeadOptions`] to create a `NelderMead`.
///
/// # Lifetimes
///
/// The objective function may be non-`'static` (i.e., it borrows something), so there is a lifetime
/// parameter. If this functionality is not needed and the `NelderMead` type must be specified
/// somewhere, the lifetime can simply be set to `'static`:
///
/// ```
/// # use downhill_simplex::NelderMead;
/// struct Container(NelderMead<'static, 2>);
/// ```
///
/// In the case of a closure that references variables from its scope, the `move` keyword can be
/// used to force a static lifetime:
///
/// ```
/// # use downhill_simplex::{NelderMeadOptions, NelderMead, SVector};
/// # struct Container(NelderMead<'static, 2>);
/// let mut calls = 0;
/// let function = move |x: &SVector<f64, 2>| {
///     calls += 1;
///     x.norm_squared()
/// };
/// let nelder_mead = NelderMeadOptions::new([[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]])
///     .build(function)
///     .unwrap();
/// let container = Container(nelder_mead);
/// ```
pub struct NelderMead<'a, const N: usize> {
    /// Objective function wrapper that counts evaluations
    evaluator: Evaluator<'a, N>,
    simplex: Simplex<N>,
    history: History<N>,
    /// Number of iterations performed so far
    iteration: usize,
    max_iterations: usize,
    tolerance: f64,
    /// What the latest iteration did to the simplex
    last_step: Option<Step<N>>,
    /// Data plot if enabled
    #[cfg(feature = "plotters")]
    plot: Option<Plot>,
    /// The minimum number of iterations to wait for in between each automatic
    /// [`NelderMead::print_info`] call
    print_gap_iterations: Option<usize>,
    /// The last iteration at which [`NelderMead::print_info`] was called
    last_print_iteration: usize,
}

impl<'a, const N: usize> NelderMead<'a, N> {
    /// Initializes a `NelderMead` from a set of [`NelderMeadOptions`], evaluating the objective
    /// function at each initial point. [`NelderMeadOptions::build`] should generally be used
    /// instead.
    pub fn new(
        objective_function: Box<dyn ObjectiveFunction<N> + 'a>,
        options: NelderMeadOptions<N>,
    ) -> Result<Self, InvalidInputError> {
        if !options.tolerance.is_finite() || options.tolerance < 0.0 {
            return Err(InvalidInputError::Tolerance);
        }

        let mut evaluator = Evaluator::new(objective_function);
        let simplex = Simplex::new(&options.initial_points, &mut evaluator)?;

        let mut history = History::new();
        history.update(&simplex);

        let mut nelder_mead = Self {
            evaluator,
            simplex,
            history,
            iteration: 0,
            max_iterations: options.max_iterations,
            tolerance: options.tolerance,
            last_step: None,
            #[cfg(feature = "plotters")]
            plot: options.plot_options.map(|o| Plot::new(N, o)),
            print_gap_iterations: options.print_gap_iterations,
            last_print_iteration: 0,
        };

        // Plot initial state
        #[cfg(feature = "plotters")]
        nelder_mead.add_plot_point();

        // Print initial info
        if nelder_mead.print_gap_iterations.is_some() {
            nelder_mead.print_initial_info();
        }

        Ok(nelder_mead)
    }

    /// Iterates the algorithm until termination. [`next`][Self::next] can be called manually if
    /// more control over termination is needed (plotting/printing the final state must be done
    /// manually as well in this case).
    pub fn run(&mut self) -> OptimizationResult<N> {
        let result = loop {
            if let Some(data) = self.next() {
                break data;
            }
        };

        // Plot/print the final state
        #[cfg(feature = "plotters")]
        self.add_plot_point();

        if self.print_gap_iterations.is_some() {
            self.print_final_info(result.reason);
        }

        result
    }

    /// Performs a single iteration: moves the worst point of the simplex or shrinks it, then
    /// checks the termination criteria. Returns `Some` if a termination condition has been reached
    /// and the algorithm should be stopped. [`run`][Self::run] is generally easier to use, but
    /// iteration can be performed manually if finer control is needed (plotting/printing the final
    /// state must be done manually as well in this case).
    ///
    /// Calling `next` again after termination performs further iterations.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn next(&mut self) -> Option<OptimizationResult<N>> {
        let completed_iterations = self.iteration;
        self.iteration += 1;

        let step = match self.simplex.step(&mut self.evaluator) {
            Ok(step) => step,
            Err(_) => return Some(self.get_result(TerminationReason::InvalidFunctionValue)),
        };

        // The convergence statistic is measured against the value at the centroid used for the
        // transformation, not the centroid of the new simplex
        let centroid_value = match self.evaluator.evaluate(&step.centroid) {
            Ok(value) => value,
            Err(_) => return Some(self.get_result(TerminationReason::InvalidFunctionValue)),
        };
        let standard_deviation =
            termination::standard_deviation(self.simplex.values(), centroid_value, N);

        self.last_step = Some(step);
        self.history.set_standard_deviation(standard_deviation);
        self.history.update(&self.simplex);

        // Plot latest state
        #[cfg(feature = "plotters")]
        self.add_plot_point_if_due();

        // Print latest state
        if let Some(gap_iterations) = self.print_gap_iterations {
            // The first few iterations are always printed, then print_gap_iterations is respected
            if self.iteration >= self.last_print_iteration + gap_iterations {
                self.print_info();
                self.last_print_iteration = self.iteration;
            } else if self.iteration < 4 {
                self.print_info();
            }
        }

        termination::check_termination_criteria(
            completed_iterations,
            self.max_iterations,
            self.tolerance,
            standard_deviation,
        )
        .map(|reason| self.get_result(reason))
    }

    /// Consumes `self` and returns the objective function.
    pub fn into_objective_function(self) -> Box<dyn ObjectiveFunction<N> + 'a> {
        self.evaluator.into_objective_function()
    }

    /// Returns the number of iterations that have been performed.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Returns the number of times the objective function has been evaluated.
    pub fn function_evals(&self) -> usize {
        self.evaluator.function_evals()
    }

    /// Returns the current simplex.
    pub fn simplex(&self) -> &Simplex<N> {
        &self.simplex
    }

    /// Returns the transformation applied to the simplex by the latest iteration, or `None` if no
    /// iteration has completed.
    pub fn last_transformation(&self) -> Option<Transformation> {
        self.last_step.as_ref().map(|step| step.transformation)
    }

    /// Returns the value of the convergence statistic computed by the latest iteration, or `None`
    /// if no iteration has completed.
    pub fn standard_deviation(&self) -> Option<f64> {
        self.history.standard_deviation()
    }

    /// Returns the best point of the current simplex and its function value.
    pub fn current_best_individual(&self) -> Option<&Individual<N>> {
        self.history.current_best_individual()
    }

    /// Returns the best point of any iteration and its function value.
    pub fn overall_best_individual(&self) -> Option<&Individual<N>> {
        self.history.overall_best_individual()
    }

    /// Returns a reference to the data plot if enabled.
    #[cfg(feature = "plotters")]
    pub fn get_plot(&self) -> Option<&Plot> {
        self.plot.as_ref()
    }

    /// Returns a mutable reference to the data plot if enabled.
    #[cfg(feature = "plotters")]
    pub fn get_mut_plot(&mut self) -> Option<&mut Plot> {
        self.plot.as_mut()
    }

    /// Returns an `OptimizationResult` with the current simplex and the given reason.
    fn get_result(&self, reason: TerminationReason) -> OptimizationResult<N> {
        let current_best = self
            .history
            .current_best_individual()
            .cloned()
            .unwrap_or_else(|| self.simplex.best());
        let overall_best = self
            .history
            .overall_best_individual()
            .cloned()
            .unwrap_or_else(|| current_best.clone());

        OptimizationResult {
            simplex: self.simplex.clone(),
            current_best,
            overall_best,
            iterations: self.iteration,
            max_iterations: self.max_iterations,
            function_evals: self.evaluator.function_evals(),
            standard_deviation: self.history.standard_deviation(),
            reason,
        }
    }

    /// Adds a data point to the data plot if enabled and not already called this iteration. Can be
    /// called manually after termination to plot the final state if [`run`][Self::run] isn't used.
    #[cfg(feature = "plotters")]
    pub fn add_plot_point(&mut self) {
        if let Some(ref mut plot) = self.plot {
            plot.add_data_point(self.iteration, &self.simplex, &self.history);
        }
    }

    #[cfg(feature = "plotters")]
    fn add_plot_point_if_due(&mut self) {
        let due = match self.plot {
            Some(ref plot) => self.iteration >= plot.get_next_data_point_iteration(),
            None => false,
        };

        if due {
            self.add_plot_point();
        }
    }

    /// Prints the dimension and termination criteria of the algorithm as well as the headers for
    /// the columns printed by [`print_info`][Self::print_info].
    ///
    /// This function is called automatically if [`NelderMeadOptions::enable_printing`] is set.
    pub fn print_initial_info(&self) {
        println!(
            "Nelder-Mead with dimension={}, max_iterations={}, tolerance={}",
            N,
            self.max_iterations,
            utils::format_scientific(self.tolerance),
        );

        let title_string = format!(
            "{:^7} | {:^7} | {:^19} | {:^13} | {:^13} | {:^15}",
            "Iter #", "f evals", "Best function value", "Std. Dev.", "Simplex Size", "Step",
        );

        println!("{}", title_string);
        println!("{}", "-".repeat(title_string.chars().count()));
    }

    /// Prints various state variables of the algorithm. The variables that are printed are the:
    ///
    /// - Iterations performed
    /// - Function evaluations made
    /// - Best function value of the current simplex
    /// - Convergence statistic of the latest iteration
    /// - Size of the simplex (largest distance from the best point)
    /// - Transformation applied by the latest iteration, with the point that was moved (or the
    ///   point the simplex was shrunk toward)
    ///
    /// This function is called automatically if [`NelderMeadOptions::enable_printing`] is set.
    pub fn print_info(&self) {
        let iterations = format!("{:7}", self.iteration);
        let evals = format!("{:7}", self.evaluator.function_evals());
        let best_function_value = self
            .current_best_individual()
            .map(|x| utils::format_num(x.value, 19))
            .unwrap_or(format!("{:19}", ""));
        let standard_deviation = self
            .history
            .standard_deviation()
            .map(|x| utils::format_num(x, 14))
            .unwrap_or(format!("{:14}", ""));
        let size = utils::format_num(self.simplex.size(), 14);
        let step = match self.last_step {
            Some(ref step) => {
                let index = match step.transformation {
                    Transformation::Shrink => step.lowest,
                    _ => step.highest,
                };
                format!("{:?}(p{})", step.transformation, index)
            }
            None => String::new(),
        };

        // The preceding space for values that can't have a negative sign is removed (an extra
        // digit takes its place)
        println!(
            "{} | {} | {} |{} |{} | {}",
            iterations, evals, best_function_value, standard_deviation, size, step
        );
    }

    /// Calls [`print_info`][Self::print_info] if not already called automatically this iteration
    /// and prints the results. The values that are printed are the:
    ///
    /// - Termination reason
    /// - Best function value of the current simplex
    /// - Best function value of any iteration
    /// - Best point of any iteration
    ///
    /// This function is called automatically if [`NelderMeadOptions::enable_printing`] is set. Must
    /// be called manually after termination to print the final state if [`run`][`Self::run`] isn't
    /// used.
    pub fn print_final_info(&self, termination_reason: TerminationReason) {
        if self.iteration != self.last_print_iteration {
            self.print_info();
        }

        println!("Terminated with reason `{}`", termination_reason);

        let current_best = self.current_best_individual();
        let overall_best = self.overall_best_individual();

        if let (Some(current), Some(overall)) = (current_best, overall_best) {
            println!(
                "Current best function value: {}",
                utils::format_scientific(current.value)
            );
            println!(
                "Overall best function value: {}",
                utils::format_scientific(overall.value)
            );
            println!("Overall best point: {}", overall.point.transpose());
        }
    }
}
