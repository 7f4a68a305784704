//! An example of using `downhill_simplex` to minimize various simple functions, with printing and
//! plotting enabled.

#![allow(dead_code)]

use downhill_simplex::{NelderMeadOptions, PlotOptions, SVector};

use std::f64::consts::PI;

const DIM: usize = 4;

fn main() {
    let function = rosenbrock;

    // The initial simplex is the point (0.1, ..., 0.1) and one step of 0.5 along each axis
    let start = vec![0.1; DIM];
    let initial_points = std::iter::once(start.clone()).chain((0..DIM).map(|i| {
        let mut point = start.clone();
        point[i] += 0.5;
        point
    }));

    let mut nelder_mead = NelderMeadOptions::<DIM>::new(initial_points)
        .max_iterations(20000)
        .tolerance(1e-10)
        // Enable recording the plot and printing info
        .enable_plot(PlotOptions::new(0, false))
        .enable_printing(200)
        .build(function)
        .unwrap();

    // Find a solution
    let solution = nelder_mead.run();

    println!(
        "Solution individual has value {:e} and point {}",
        solution.overall_best.value,
        solution.overall_best.point.transpose(),
    );

    // Save the plot
    let plot = nelder_mead.get_plot().unwrap();
    plot.save_to_file(
        format!("{}/test_output/plot.png", env!("CARGO_MANIFEST_DIR")),
        true,
    )
    .unwrap();
}

// N-dimensional sphere function
fn sphere(x: &SVector<f64, DIM>) -> f64 {
    x.iter().map(|xi| xi.powi(2)).sum::<f64>()
}

// N-dimensional ellipsoid function
fn ellipsoid(x: &SVector<f64, DIM>) -> f64 {
    (0..DIM)
        .map(|i| 1e6f64.powf(i as f64 / DIM as f64) * x[i].powi(2))
        .sum::<f64>()
}

// N-dimensional Rosenbrock function
fn rosenbrock(x: &SVector<f64, DIM>) -> f64 {
    (0..DIM - 1)
        .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2))
        .sum::<f64>()
}

// N-dimensional Rastrigin function (the simplex usually ends in a local minimum)
fn rastrigin(x: &SVector<f64, DIM>) -> f64 {
    10.0 * DIM as f64
        + x.iter()
            .map(|xi| xi.powi(2) - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

// N-dimensional absolute value sum, which is not differentiable at the minimum
fn abs_sum(x: &SVector<f64, DIM>) -> f64 {
    x.iter().map(|xi| xi.abs()).sum::<f64>()
}
