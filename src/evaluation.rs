//! Evaluation of points with the objective function

use nalgebra::SVector;

use crate::ObjectiveFunction;

/// Evaluates points with the objective function and keeps count of the evaluations
pub struct Evaluator<'a, const N: usize> {
    /// The objective function to minimize
    objective_function: Box<dyn ObjectiveFunction<N> + 'a>,
    /// The number of times the objective function has been evaluated
    function_evals: usize,
}

impl<'a, const N: usize> Evaluator<'a, N> {
    pub fn new(objective_function: Box<dyn ObjectiveFunction<N> + 'a>) -> Self {
        Self {
            objective_function,
            function_evals: 0,
        }
    }

    /// Returns the objective function value at `point`
    ///
    /// Returns `Err` if the objective function returned `NAN` or an infinite value
    pub fn evaluate(&mut self, point: &SVector<f64, N>) -> Result<f64, InvalidFunctionValueError> {
        let value = self.objective_function.evaluate(point);
        self.function_evals += 1;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(InvalidFunctionValueError)
        }
    }

    pub fn function_evals(&self) -> usize {
        self.function_evals
    }

    /// Consumes `self` and returns the objective function
    pub fn into_objective_function(self) -> Box<dyn ObjectiveFunction<N> + 'a> {
        self.objective_function
    }
}

/// The objective function returned an invalid value
#[derive(Clone, Debug)]
pub struct InvalidFunctionValueError;
