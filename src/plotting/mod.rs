//! Types for plotting support. See [`Plot`] for usage and what is plotted.

mod data;
mod draw;
mod options;

pub use options::PlotOptions;

use plotters::coord;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::prelude::{BitMapBackend, DrawingBackend};
use plotters::style::colors;

use std::error::Error;
use std::fmt;
use std::fs::DirBuilder;
use std::io;
use std::path::Path;

use crate::history::History;
use crate::simplex::Simplex;
use data::PlotData;

/// The drawing backend to use for rendering the plot.
pub type Backend<'a> = BitMapBackend<'a>;
/// The error type returned by drawing functions.
pub type DrawingError<'a> = DrawingAreaErrorKind<<Backend<'a> as DrawingBackend>::ErrorType>;

/// The height of plot images in pixels.
pub const PLOT_HEIGHT: u32 = 1200;
/// The width of plot images in pixels.
pub const PLOT_WIDTH: u32 = 1200;

/// Data plot for a run. Can be obtained by calling
/// [`NelderMead::get_plot`][crate::NelderMead::get_plot] or
/// [`NelderMead::get_mut_plot`][crate::NelderMead::get_mut_plot] and should be saved with
/// [`save_to_file`][`Self::save_to_file`]. Configuration is done using [`PlotOptions`]. To enable
/// the plot, use [`NelderMeadOptions::enable_plot`][crate::NelderMeadOptions::enable_plot].
///
/// Plots for each recorded iteration the:
/// - Absolute best, median and worst objective function values, and the standard deviation used
///   for the convergence check
/// - Coordinates of the best point
/// - Size of the simplex (largest distance from the best point)
/// - Coordinates of the centroid of all points except the worst
///
/// # Examples
///
/// ```no_run
/// use downhill_simplex::{NelderMeadOptions, PlotOptions, SVector};
///
/// let sphere = |x: &SVector<f64, 3>| x.norm_squared();
/// let initial_points = [
///     [3.0, 1.0, 2.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, 0.0, 1.0],
/// ];
/// let mut state = NelderMeadOptions::new(initial_points)
///     .enable_plot(PlotOptions::new(0, false))
///     .build(sphere)
///     .unwrap();
///
/// let result = state.run();
///
/// state.get_plot().unwrap().save_to_file("plot.png", true).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Plot {
    data: PlotData,
    options: PlotOptions,
    /// The iteration at which the last data point was recorded
    /// Is None if no data points have been recorded yet
    last_data_point_iteration: Option<usize>,
}

impl Plot {
    /// Initializes an empty `Plot` with the provided options.
    pub(crate) fn new(dimensions: usize, options: PlotOptions) -> Self {
        Self {
            data: PlotData::new(dimensions),
            options,
            last_data_point_iteration: None,
        }
    }

    /// Returns the next iteration at which a data point should be recorded.
    pub(crate) fn get_next_data_point_iteration(&self) -> usize {
        match self.last_data_point_iteration {
            Some(iteration) => iteration + self.options.min_gap_iterations + 1,
            None => 0,
        }
    }

    /// Adds a data point to the plot from the current simplex if one hasn't already been added
    /// for this iteration.
    pub(crate) fn add_data_point<const N: usize>(
        &mut self,
        iteration: usize,
        simplex: &Simplex<N>,
        history: &History<N>,
    ) {
        if self.last_data_point_iteration != Some(iteration) {
            self.data.add_data_point(iteration, simplex, history);
            self.last_data_point_iteration = Some(iteration);
        }
    }

    /// Saves the data plot to a bitmap image file. Recursively creates the necessary directories if
    /// `create_dirs` is `true`.
    pub fn save_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        create_dirs: bool,
    ) -> Result<(), PlotError> {
        let path = path.as_ref();
        if create_dirs {
            if let Some(parent) = path.parent() {
                DirBuilder::new().recursive(true).create(parent)?;
            }
        }

        let plot = self.build_plot(&path)?;
        plot.present().map_err(Into::into)
    }

    /// Builds the data plot and returns it (does not save to a file)
    fn build_plot<'a, P: AsRef<Path> + 'a>(
        &self,
        path: &'a P,
    ) -> Result<DrawingArea<Backend<'a>, coord::Shift>, DrawingError> {
        let root_area = Backend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();

        root_area.fill(&colors::WHITE)?;

        let areas = root_area.split_evenly((2, 2));

        draw::draw_function_values(&self.data, &areas[0])?;
        draw::draw_coordinates(
            self.data.best_point_dimensions(),
            &self.data,
            &self.options,
            "Best Point",
            &areas[1],
        )?;
        draw::draw_simplex_size(&self.data, &areas[2])?;
        draw::draw_coordinates(
            self.data.centroid_dimensions(),
            &self.data,
            &self.options,
            "Centroid",
            &areas[3],
        )?;

        Ok(root_area)
    }

    /// Returns the number of data points currently stored in the plot.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of data points for which space has been allocated.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns whether there are no data points in the plot.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clears the plot data except for the most recent data point for each variable. Can be called
    /// after using [`save_to_file`][`Plot::save_to_file`] (or not) to avoid endlessly growing
    /// allocations (note that the memory is not actually freed; it is simply cleared for reuse).
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// An error produced while creating or saving a plot.
#[derive(Debug)]
pub enum PlotError<'a> {
    DrawingError(DrawingError<'a>),
    IoError(io::Error),
}

impl<'a> fmt::Display for PlotError<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PlotError::DrawingError(ref e) => write!(fmt, "DrawingError({})", e),
            PlotError::IoError(ref e) => write!(fmt, "IoError({})", e),
        }
    }
}

impl<'a> Error for PlotError<'a> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            PlotError::DrawingError(ref e) => Some(e),
            PlotError::IoError(ref e) => Some(e),
        }
    }
}

impl<'a> From<DrawingError<'a>> for PlotError<'a> {
    fn from(error: DrawingError<'a>) -> Self {
        PlotError::DrawingError(error)
    }
}

impl<'a> From<io::Error> for PlotError<'a> {
    fn from(error: io::Error) -> Self {
        PlotError::IoError(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{rosenbrock, REFERENCE_INITIAL_POINTS};
    use crate::NelderMeadOptions;

    fn get_plot_path(name: &str) -> String {
        format!("{}/test_output/{}.png", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[test]
    fn test_plot_not_enabled() {
        let state = NelderMeadOptions::new(REFERENCE_INITIAL_POINTS)
            .build(rosenbrock::<2>)
            .unwrap();

        assert!(state.get_plot().is_none());
    }

    #[test]
    fn test_plot_empty() {
        let state = NelderMeadOptions::new(REFERENCE_INITIAL_POINTS)
            .enable_plot(PlotOptions::new(0, false))
            .build(rosenbrock::<2>)
            .unwrap();
        let plot = state.get_plot().unwrap();
        assert!(plot
            .save_to_file(get_plot_path("test_plot_empty"), true)
            .is_ok())
    }

    #[test]
    fn test_plot() {
        let mut state = NelderMeadOptions::new(REFERENCE_INITIAL_POINTS)
            .enable_plot(PlotOptions::new(0, true))
            .build(rosenbrock::<2>)
            .unwrap();

        let result = state.run();

        let plot = state.get_plot().unwrap();
        // One data point before the first iteration and one after each iteration
        assert_eq!(result.iterations + 1, plot.len());
        assert!(plot.save_to_file(get_plot_path("test_plot"), true).is_ok());
    }

    #[test]
    fn test_plot_gap() {
        let mut state = NelderMeadOptions::new(REFERENCE_INITIAL_POINTS)
            .enable_plot(PlotOptions::new(4, false))
            .build(rosenbrock::<2>)
            .unwrap();

        for _ in 0..10 {
            let _ = state.next();
        }

        // Iterations 0, 5 and 10
        assert_eq!(3, state.get_plot().unwrap().len());
    }

    #[test]
    fn test_redundant_plot() {
        let mut state = NelderMeadOptions::new(REFERENCE_INITIAL_POINTS)
            .enable_plot(PlotOptions::new(0, false))
            .build(rosenbrock::<2>)
            .unwrap();

        for _ in 0..10 {
            state.add_plot_point();
        }

        // Redundant add_plot_point calls are ignored
        assert_eq!(state.get_plot().unwrap().len(), 1);
    }

    #[test]
    fn test_plot_clear() {
        let mut state = NelderMeadOptions::new(REFERENCE_INITIAL_POINTS)
            .enable_plot(PlotOptions::new(0, false))
            .build(rosenbrock::<2>)
            .unwrap();

        // Fresh plots contain one element
        assert_eq!(state.get_plot().unwrap().len(), 1);
        assert_eq!(state.get_plot().unwrap().capacity(), 4);

        // Clear a fresh plot
        state.get_mut_plot().unwrap().clear();

        // Clearing leaves one element behind
        assert_eq!(state.get_plot().unwrap().len(), 1);
        assert_eq!(state.get_plot().unwrap().capacity(), 4);

        for _ in 0..10 {
            let _ = state.next();
        }

        assert_eq!(state.get_plot().unwrap().len(), 11);
        assert_eq!(state.get_plot().unwrap().capacity(), 16);

        // Clear a plot after adding some data
        state.get_mut_plot().unwrap().clear();

        assert_eq!(state.get_plot().unwrap().len(), 1);
        assert_eq!(state.get_plot().unwrap().capacity(), 16);

        let plot = state.get_plot().unwrap();
        assert!(plot
            .save_to_file(get_plot_path("test_plot_clear"), true)
            .is_ok());
    }
}
