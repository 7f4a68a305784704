//! An example of using the Nelder-Mead method to minimize the Rosenbrock function from the
//! simplex (0, 0), (2, 0), (0, 2).

use downhill_simplex::report::Report;
use downhill_simplex::{NelderMeadOptions, SVector};

fn rosenbrock(x: &SVector<f64, 2>) -> f64 {
    100.0 * (x[1] - x[0].powi(2)).powi(2) + (1.0 - x[0]).powi(2)
}

fn main() {
    let mut nelder_mead = NelderMeadOptions::new([[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]])
        .max_iterations(1000)
        .tolerance(1e-8)
        .build(rosenbrock)
        .unwrap();

    // Find a solution
    let result = nelder_mead.run();

    println!("{}", Report::new(&result));
}
