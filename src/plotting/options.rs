//! Configuration of data plot generation

/// Configuration of the data plot.
#[derive(Clone, Debug)]
pub struct PlotOptions {
    /// Minimum iterations between each data point. Can be used to adjust the granularity of the
    /// recorded data points, with `0` recording a data point every iteration.
    pub min_gap_iterations: usize,
    /// Whether to use scientific notation for non-log scale axis labels.
    pub scientific_notation: bool,
}

impl PlotOptions {
    /// Creates a new `PlotOptions` with the provided values.
    pub fn new(min_gap_iterations: usize, scientific_notation: bool) -> Self {
        Self {
            min_gap_iterations,
            scientific_notation,
        }
    }
}
