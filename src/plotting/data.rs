//! Handling of adding and storing data points for the plot

use crate::history::History;
use crate::simplex::Simplex;
use crate::utils::apply_offset;

/// Data points for the plot.
#[derive(Clone, Debug)]
pub struct PlotData {
    /// Iterations at which other data points were recorded
    iterations: Vec<usize>,
    best_function_value: Vec<f64>,
    median_function_value: Vec<f64>,
    worst_function_value: Vec<f64>,
    standard_deviation: Vec<f64>,
    simplex_size: Vec<f64>,
    // Each element of the following contains the histories of an individual dimension
    best_point_dimensions: Vec<Vec<f64>>,
    centroid_dimensions: Vec<Vec<f64>>,
}

impl PlotData {
    /// Creates an empty `PlotData`
    pub fn new(dimensions: usize) -> Self {
        Self {
            iterations: Vec::new(),
            best_function_value: Vec::new(),
            median_function_value: Vec::new(),
            worst_function_value: Vec::new(),
            standard_deviation: Vec::new(),
            simplex_size: Vec::new(),
            best_point_dimensions: (0..dimensions).map(|_| Vec::new()).collect(),
            centroid_dimensions: (0..dimensions).map(|_| Vec::new()).collect(),
        }
    }

    /// Returns the number of data points currently being stored
    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    /// Returns the number of data points for which space has been allocated
    pub fn capacity(&self) -> usize {
        self.iterations.capacity()
    }

    /// Returns whether there are no data points in the plot
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iterations(&self) -> &[usize] {
        &self.iterations
    }

    pub fn best_function_value(&self) -> &[f64] {
        &self.best_function_value
    }

    pub fn median_function_value(&self) -> &[f64] {
        &self.median_function_value
    }

    pub fn worst_function_value(&self) -> &[f64] {
        &self.worst_function_value
    }

    pub fn standard_deviation(&self) -> &[f64] {
        &self.standard_deviation
    }

    pub fn simplex_size(&self) -> &[f64] {
        &self.simplex_size
    }

    pub fn best_point_dimensions(&self) -> &[Vec<f64>] {
        &self.best_point_dimensions
    }

    pub fn centroid_dimensions(&self) -> &[Vec<f64>] {
        &self.centroid_dimensions
    }

    /// Adds a data point to the plot from the current simplex
    pub fn add_data_point<const N: usize>(
        &mut self,
        iteration: usize,
        simplex: &Simplex<N>,
        history: &History<N>,
    ) {
        let best = simplex.best();
        let worst = simplex.worst();

        let median_function_value = history
            .current_median_function_value()
            .unwrap_or(f64::NAN);

        // Before the first iteration there is no standard deviation yet, so use NAN and filter it
        // later
        let standard_deviation = history.standard_deviation().unwrap_or(f64::NAN);

        self.iterations.push(iteration);
        self.best_function_value.push(apply_offset(best.value));
        self.median_function_value
            .push(apply_offset(median_function_value));
        self.worst_function_value.push(apply_offset(worst.value));
        self.standard_deviation
            .push(apply_offset(standard_deviation));
        self.simplex_size.push(apply_offset(simplex.size()));

        for (i, x) in best.point.iter().enumerate() {
            self.best_point_dimensions[i].push(*x);
        }

        let centroid = simplex.centroid(simplex.highest_index());
        for (i, x) in centroid.iter().enumerate() {
            self.centroid_dimensions[i].push(*x);
        }
    }

    /// Clears the plot except for the most recent data point in each history (note that the
    /// memory is not actually freed; it is only cleared for reuse).
    pub fn clear(&mut self) {
        fn clear<T>(data: &mut Vec<T>) {
            let len = data.len();
            if len > 0 {
                data.swap(0, len - 1);
                data.truncate(1);
            }
        }

        clear(&mut self.iterations);
        clear(&mut self.best_function_value);
        clear(&mut self.median_function_value);
        clear(&mut self.worst_function_value);
        clear(&mut self.standard_deviation);
        clear(&mut self.simplex_size);

        for x in &mut self.best_point_dimensions {
            clear(x);
        }

        for x in &mut self.centroid_dimensions {
            clear(x);
        }
    }
}
