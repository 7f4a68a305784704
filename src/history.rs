//! Tracking of the best points and recent function value statistics.

use statrs::statistics::{Data, Median};

use crate::simplex::Simplex;
use crate::Individual;

/// A type that tracks the current and overall best points, the median function value of the
/// simplex, and the latest value of the convergence statistic.
pub struct History<const N: usize> {
    /// The best point of the current simplex
    current_best_individual: Option<Individual<N>>,
    /// The best point of any iteration
    overall_best_individual: Option<Individual<N>>,
    /// The median function value of the current simplex
    current_median_function_value: Option<f64>,
    /// The standard deviation computed by the latest termination check
    standard_deviation: Option<f64>,
}

impl<const N: usize> History<N> {
    pub fn new() -> Self {
        Self {
            current_best_individual: None,
            overall_best_individual: None,
            current_median_function_value: None,
            standard_deviation: None,
        }
    }

    /// Always `Some` if `Self::update` has been called at least once
    pub fn current_best_individual(&self) -> Option<&Individual<N>> {
        self.current_best_individual.as_ref()
    }

    /// Always `Some` if `Self::update` has been called at least once
    pub fn overall_best_individual(&self) -> Option<&Individual<N>> {
        self.overall_best_individual.as_ref()
    }

    /// Always `Some` if `Self::update` has been called at least once
    pub fn current_median_function_value(&self) -> Option<f64> {
        self.current_median_function_value
    }

    /// `None` until the first termination check
    pub fn standard_deviation(&self) -> Option<f64> {
        self.standard_deviation
    }

    /// Updates the best points and the median value from the simplex.
    pub fn update(&mut self, simplex: &Simplex<N>) {
        let current_best = simplex.best();

        self.current_best_individual = Some(current_best.clone());

        match &mut self.overall_best_individual {
            Some(ref mut overall) => {
                if current_best.value < overall.value {
                    *overall = current_best;
                }
            }
            None => self.overall_best_individual = Some(current_best),
        }

        self.current_median_function_value = Some(Data::new(simplex.values().to_vec()).median());
    }

    /// Records the standard deviation computed by a termination check.
    pub fn set_standard_deviation(&mut self, standard_deviation: f64) {
        self.standard_deviation = Some(standard_deviation);
    }
}
