//! An example of using `downhill_simplex` with a custom objective function type.

use downhill_simplex::{NelderMeadOptions, ObjectiveFunction, SVector};

// Custom objective function types can be used to store parameters and state
struct Rosenbrock {
    a: f64,
    b: f64,
    calls: usize,
}

impl Rosenbrock {
    fn new(a: f64, b: f64) -> Self {
        Self { a, b, calls: 0 }
    }
}

impl ObjectiveFunction<2> for Rosenbrock {
    fn evaluate(&mut self, x: &SVector<f64, 2>) -> f64 {
        // Track the number of times the function was called
        self.calls += 1;
        (self.a - x[0]).powi(2) + self.b * (x[1] - x[0].powi(2)).powi(2)
    }
}

// `ObjectiveFunction` must be implemented for references separately
impl<'a> ObjectiveFunction<2> for &'a mut Rosenbrock {
    fn evaluate(&mut self, x: &SVector<f64, 2>) -> f64 {
        ObjectiveFunction::evaluate(*self, x)
    }
}

fn main() {
    // Initialize the objective function, with its minimum at (5, 25)
    let mut function = Rosenbrock::new(5.0, 30.0);

    // A scope must be used to prevent overlapping borrows
    {
        let mut nelder_mead = NelderMeadOptions::<2>::new([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]])
            .enable_printing(50)
            // Use a mutable reference to the function so its state can be retrieved easily later
            .build(&mut function)
            .unwrap();

        // Find a solution
        let solution = nelder_mead.run();

        println!(
            "Solution individual has value {:e} and point {}",
            solution.overall_best.value,
            solution.overall_best.point.transpose(),
        );
    }

    // Retrieve the state stored in the objective function
    println!("Objective function was called {} times", function.calls);
}
