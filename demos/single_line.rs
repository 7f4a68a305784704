//! An example of using the single-line function interface of `downhill_simplex`.

use downhill_simplex::functions::{self, REFERENCE_INITIAL_POINTS};

fn main() {
    let solution = functions::fmin(functions::rosenbrock::<2>, REFERENCE_INITIAL_POINTS, 1000, 1e-8);

    println!("{:?}", solution.map(|s| s.overall_best));
}
