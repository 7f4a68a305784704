//! Drawing of the recorded data points to the plot

use plotters::chart::{ChartBuilder, ChartContext, SeriesAnno, SeriesLabelPosition};
use plotters::coord;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::combinators::{IntoLogRange, LogCoord};
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::coord::types::RangedCoordusize;
use plotters::drawing::DrawingArea;
use plotters::element::{Cross, PathElement};
use plotters::series::LineSeries;
use plotters::style::{colors, Color, Palette, Palette99};

use std::ops::Range;

use super::data::PlotData;
use super::options::PlotOptions;
use super::{Backend, DrawingError};
use crate::utils::partial_cmp;

/// The font to use for text in the plot
const FONT: &str = "sans-serif";
/// The maximum number of elements to allow in a legend before removing it
const MAX_LEGEND_VALUES: usize = 18;

/// Parameters for a y-axis
struct YAxis<Y> {
    /// The range of the y values to be drawn
    range: Y,
    /// The preferred number of axis labels to use (may not be used exactly)
    num_labels: usize,
    kind: YAxisKind,
}

impl<Y> YAxis<Y> {
    fn new(range: Y, num_labels: usize, kind: YAxisKind) -> Self {
        Self {
            range,
            num_labels,
            kind,
        }
    }
}

/// Represents which kind of scale and labels to use for the y-axis
enum YAxisKind {
    Log,
    Linear {
        /// Whether to use scientific notation for the linear axis labels
        scientific_notation: bool,
    },
}

/// Draws the function values of the simplex and the standard deviation used as the convergence
/// criterion (abs(best), abs(median), abs(worst), std dev)
pub fn draw_function_values<'a>(
    data: &PlotData,
    area: &DrawingArea<Backend<'a>, coord::Shift>,
) -> Result<(), DrawingError<'a>> {
    let abs_best_value = data.best_function_value().iter().map(|y| y.abs());
    let abs_median_value = data.median_function_value().iter().map(|y| y.abs());
    let abs_worst_value = data.worst_function_value().iter().map(|y| y.abs());

    // (index, value) of the overall best function value
    let overall_best = abs_best_value
        .clone()
        .enumerate()
        .min_by(|(_, a), (_, b)| partial_cmp(*a, *b));

    // Filter out dummy values added before the first iteration
    let all_y_values = abs_best_value
        .clone()
        .chain(abs_median_value.clone())
        .chain(abs_worst_value.clone())
        .chain(data.standard_deviation().iter().cloned())
        .filter(|y| !y.is_nan());
    let y_axis = get_log_y_axis(all_y_values);

    let draw = |context: &mut ChartContext<_, _>| {
        let iterations = data.iterations().iter().cloned();

        let points_abs_best_value = get_points(iterations.clone(), abs_best_value);
        add_to_legend(
            context.draw_series(LineSeries::new(points_abs_best_value, &colors::BLUE))?,
            "abs(best)",
            colors::BLUE,
        );

        let points_abs_median_value = get_points(iterations.clone(), abs_median_value);
        add_to_legend(
            context.draw_series(LineSeries::new(points_abs_median_value, &colors::MAGENTA))?,
            "abs(median)",
            colors::MAGENTA,
        );

        let points_abs_worst_value = get_points(iterations.clone(), abs_worst_value);
        add_to_legend(
            context.draw_series(LineSeries::new(points_abs_worst_value, &colors::CYAN))?,
            "abs(worst)",
            colors::CYAN,
        );

        let points_standard_deviation = get_points(
            iterations.clone(),
            data.standard_deviation().iter().cloned(),
        );
        add_to_legend(
            context.draw_series(LineSeries::new(points_standard_deviation, &colors::GREEN))?,
            "Std. Dev.",
            colors::GREEN,
        );

        // Marker for overall best function value
        if let Some((best_index, best_value)) = overall_best {
            let marker = (data.iterations()[best_index], best_value);
            context
                .plotting_area()
                .draw(&Cross::new(marker, 10, colors::RED))?;
        }

        Ok(())
    };

    DrawingAreaSetup {
        area,
        iterations_history: data.iterations(),
        caption: "abs(best), abs(median), abs(worst), Std. Dev.",
        legend_position: Some(SeriesLabelPosition::LowerLeft),
        y_axis,
        draw,
    }
    .configure_area()
}

/// Draws the coordinates of a point recorded at each data point (e.g. the best point or the
/// centroid)
pub fn draw_coordinates<'a>(
    dimensions: &[Vec<f64>],
    data: &PlotData,
    options: &PlotOptions,
    caption: &'static str,
    area: &DrawingArea<Backend<'a>, coord::Shift>,
) -> Result<(), DrawingError<'a>> {
    let all_y_values = dimensions.iter().flat_map(|d| d.iter().cloned());
    let y_axis = get_linear_y_axis(all_y_values, options.scientific_notation);

    let draw = |context: &mut ChartContext<_, _>| {
        for (i, x) in dimensions.iter().enumerate() {
            let points = get_points(data.iterations().iter().cloned(), x.iter().cloned());
            let color = Palette99::pick(i);
            add_to_legend(
                context.draw_series(LineSeries::new(points, &color))?,
                &format!("x[{}]", i),
                color,
            );
        }

        Ok(())
    };

    // Don't draw legend if it would be too big
    let legend_position = if dimensions.len() > MAX_LEGEND_VALUES {
        None
    } else {
        Some(SeriesLabelPosition::LowerRight)
    };

    DrawingAreaSetup {
        area,
        iterations_history: data.iterations(),
        caption,
        legend_position,
        y_axis,
        draw,
    }
    .configure_area()
}

/// Draws the size of the simplex (largest distance from the best point) to the drawing area
pub fn draw_simplex_size<'a>(
    data: &PlotData,
    area: &DrawingArea<Backend<'a>, coord::Shift>,
) -> Result<(), DrawingError<'a>> {
    let y_axis = get_log_y_axis(data.simplex_size().iter().cloned());

    let draw = |context: &mut ChartContext<_, _>| {
        let points = get_points(
            data.iterations().iter().cloned(),
            data.simplex_size().iter().cloned(),
        );
        context.draw_series(LineSeries::new(points, &colors::BLACK))?;

        Ok(())
    };

    DrawingAreaSetup {
        area,
        iterations_history: data.iterations(),
        caption: "Simplex Size",
        legend_position: None,
        y_axis,
        draw,
    }
    .configure_area()
}

/// Stores parameters for configuring a drawing area
struct DrawingAreaSetup<'a, 'b, Y, F> {
    area: &'a DrawingArea<Backend<'b>, coord::Shift>,
    iterations_history: &'a [usize],
    caption: &'static str,
    // Disabled if `None`
    legend_position: Option<SeriesLabelPosition>,
    y_axis: YAxis<Y>,
    // Called on the `ChartContext` after setup
    // Should be used to draw elements onto the drawing area
    draw: F,
}

impl<'a, 'b, Y, F> DrawingAreaSetup<'a, 'b, Y, F>
where
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: ValueFormatter<f64>,
    F: FnOnce(
        &mut ChartContext<'a, Backend<'b>, Cartesian2d<RangedCoordusize, Y::CoordDescType>>,
    ) -> Result<(), DrawingError<'b>>,
{
    /// Creates a `ChartContext` with a common style, configures it according to the stored options,
    /// and calls `draw` to draw to it
    fn configure_area(self) -> Result<(), DrawingError<'b>> {
        let x_start = self.iterations_history.first().cloned().unwrap_or(0);
        let x_end = self.iterations_history.last().cloned().unwrap_or(0);
        // Keep the range non-empty when only one data point has been recorded
        let x_range = x_start..((x_end as f64 * 1.05) as usize).max(x_start + 1);

        let y_label_formatter = |v: &f64| match self.y_axis.kind {
            YAxisKind::Log => format!("1e{}", v.log10().round()),
            YAxisKind::Linear {
                scientific_notation: true,
            } => format!("{:e}", v),
            YAxisKind::Linear {
                scientific_notation: false,
            } => format!("{}", v),
        };

        let mut context = ChartBuilder::on(self.area)
            .margin(30)
            .x_label_area_size(50)
            .y_label_area_size(40)
            .caption(self.caption, (FONT, 28))
            .build_cartesian_2d(x_range, self.y_axis.range)?;

        context
            .configure_mesh()
            // Hide the fine mesh lines
            .light_line_style(&colors::WHITE)
            .x_labels(8)
            .x_label_formatter(&|v: &usize| format!("{}", v))
            .x_label_style((FONT, 22))
            .x_desc("Iterations")
            .y_labels(self.y_axis.num_labels)
            .y_label_formatter(&y_label_formatter)
            .y_label_style((FONT, 22))
            .axis_desc_style((FONT, 22))
            .draw()?;

        (self.draw)(&mut context)?;

        if let Some(position) = self.legend_position {
            context
                .configure_series_labels()
                .label_font((FONT, 20))
                .border_style(&colors::BLACK)
                .position(position)
                .draw()?;
        }

        Ok(())
    }
}

/// Adds the series to the legend with the provided label and color
fn add_to_legend<C: Color + 'static>(annotation: &mut SeriesAnno<Backend>, label: &str, color: C) {
    annotation
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
}

/// Returns an iterator of (x, y) points with NAN y points filtered out
fn get_points<'a, X, Y>(x: X, y: Y) -> impl Iterator<Item = (usize, f64)> + 'a
where
    X: IntoIterator<Item = usize> + 'a,
    Y: IntoIterator<Item = f64> + 'a,
{
    x.into_iter().zip(y).filter(|&(_, y)| !y.is_nan())
}

/// Returns a log axis encompassing all values in the iterator. The range has a small margin added
/// to either end.
fn get_log_y_axis<I: Iterator<Item = f64> + Clone>(iter: I) -> YAxis<LogCoord<f64>> {
    // Margin to be added to the top and bottom of the range
    let margin = 0.4;
    let log_min = iter
        .clone()
        .min_by(|a, b| partial_cmp(*a, *b))
        .unwrap_or(1.0)
        .log10()
        - margin;
    let log_max = iter
        .max_by(|a, b| partial_cmp(*a, *b))
        .unwrap_or(1.0)
        .log10()
        + margin;

    let num_labels = ((log_max - log_min).round() as usize).min(26);
    let y_range: LogCoord<f64> = (10f64.powf(log_min)..10f64.powf(log_max))
        .log_scale()
        .into();

    YAxis::new(y_range, num_labels, YAxisKind::Log)
}

/// Returns a linear axis encompassing all values in the iterator. The range has a small margin
/// added to either end.
fn get_linear_y_axis<I: Iterator<Item = f64> + Clone>(
    iter: I,
    scientific_notation: bool,
) -> YAxis<Range<f64>> {
    let mut min = iter
        .clone()
        .min_by(|a, b| partial_cmp(*a, *b))
        .unwrap_or(0.0);
    let mut max = iter.max_by(|a, b| partial_cmp(*a, *b)).unwrap_or(0.0);
    let mut margin = (max - min) * 0.15;

    if margin == 0.0 {
        if max == 0.0 {
            margin = 0.15;
        } else {
            margin = max.abs() * 0.15;
        }
    }

    min -= margin;
    max += margin;

    YAxis::new(
        min..max,
        26,
        YAxisKind::Linear {
            scientific_notation,
        },
    )
}
