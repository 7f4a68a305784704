//! The simplex of trial points and the Nelder-Mead update of it.

use nalgebra::SVector;

use crate::evaluation::{Evaluator, InvalidFunctionValueError};
use crate::options::InvalidInputError;
use crate::Individual;

/// The transformation applied to the simplex in an iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transformation {
    /// The worst point was replaced by its reflection through the centroid.
    Reflection,
    /// The worst point was replaced by a point twice as far from the centroid as its reflection.
    Expansion,
    /// The worst point was replaced by the midpoint between it and the centroid.
    Contraction,
    /// Every point except the best was moved halfway toward the best point.
    Shrink,
}

/// Quantities computed at the start of an iteration, before the simplex was changed
#[derive(Clone, Debug)]
pub(crate) struct Step<const N: usize> {
    /// Index of the point with the highest value
    pub highest: usize,
    /// Index of the point with the lowest value
    pub lowest: usize,
    /// Mean of all points except the highest
    pub centroid: SVector<f64, N>,
    pub transformation: Transformation,
}

/// `N + 1` points in `N`-dimensional space along with their objective function values.
///
/// `values()[i]` is always the objective function value at `points()[i]`. Every change to the
/// points is committed together with a re-evaluation of all of them.
#[derive(Clone, Debug)]
pub struct Simplex<const N: usize> {
    points: Vec<SVector<f64, N>>,
    values: Vec<f64>,
}

impl<const N: usize> Simplex<N> {
    /// Creates a simplex from the initial points and evaluates the objective function at each of
    /// them.
    ///
    /// Returns `Err` if there aren't exactly `N + 1` points, if any point doesn't have `N`
    /// coordinates, or if the objective function returns an invalid value at any point.
    pub(crate) fn new(
        initial_points: &[Vec<f64>],
        evaluator: &mut Evaluator<N>,
    ) -> Result<Self, InvalidInputError> {
        if N == 0 {
            return Err(InvalidInputError::ZeroDimensions);
        }

        if initial_points.len() != N + 1 {
            return Err(InvalidInputError::PointCount {
                expected: N + 1,
                found: initial_points.len(),
            });
        }

        if let Some((index, point)) = initial_points
            .iter()
            .enumerate()
            .find(|(_, point)| point.len() != N)
        {
            return Err(InvalidInputError::PointDimension {
                index,
                expected: N,
                found: point.len(),
            });
        }

        let points = initial_points
            .iter()
            .map(|point| SVector::from_column_slice(point))
            .collect::<Vec<_>>();

        let values = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                evaluator
                    .evaluate(point)
                    .map_err(|_| InvalidInputError::InvalidFunctionValue { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { points, values })
    }

    /// Returns the points of the simplex.
    pub fn points(&self) -> &[SVector<f64, N>] {
        &self.points
    }

    /// Returns the objective function values at each point.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the point at `index` with its objective function value.
    pub fn individual(&self, index: usize) -> Individual<N> {
        Individual::new(self.points[index], self.values[index])
    }

    /// Returns the index of the point with the highest value. Ties go to the lowest index.
    pub fn highest_index(&self) -> usize {
        let mut highest = 0;
        for (i, value) in self.values.iter().enumerate() {
            if *value > self.values[highest] {
                highest = i;
            }
        }
        highest
    }

    /// Returns the index of the point with the lowest value. Ties go to the lowest index.
    pub fn lowest_index(&self) -> usize {
        let mut lowest = 0;
        for (i, value) in self.values.iter().enumerate() {
            if *value < self.values[lowest] {
                lowest = i;
            }
        }
        lowest
    }

    /// Returns the point with the lowest value.
    pub fn best(&self) -> Individual<N> {
        self.individual(self.lowest_index())
    }

    /// Returns the point with the highest value.
    pub fn worst(&self) -> Individual<N> {
        self.individual(self.highest_index())
    }

    /// Returns the mean of all points except the one at `excluded`.
    pub fn centroid(&self, excluded: usize) -> SVector<f64, N> {
        let sum = self
            .points
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != excluded)
            .fold(SVector::zeros(), |sum, (_, point)| sum + point);

        sum / N as f64
    }

    /// Returns the largest distance from the best point to any other point.
    pub fn size(&self) -> f64 {
        let best = &self.points[self.lowest_index()];

        self.points
            .iter()
            .map(|point| (point - best).norm())
            .fold(0.0, f64::max)
    }

    /// Performs one iteration of the algorithm, moving the highest point or shrinking the simplex
    /// toward the lowest point.
    ///
    /// Returns `Err` if the objective function returned an invalid value. Each replacement or
    /// shrink is applied together with its values, so the simplex stays consistent in that case.
    pub(crate) fn step(
        &mut self,
        evaluator: &mut Evaluator<N>,
    ) -> Result<Step<N>, InvalidFunctionValueError> {
        let highest = self.highest_index();
        let lowest = self.lowest_index();
        let centroid = self.centroid(highest);

        let reflected = reflect(&self.points[highest], &centroid);
        let reflected_value = evaluator.evaluate(&reflected)?;

        let transformation = if reflected_value < self.values[lowest] {
            // The reflection is the new best point, so try going further in the same direction
            let expanded = expand(&reflected, &centroid);
            let expanded_value = evaluator.evaluate(&expanded)?;

            if expanded_value < self.values[lowest] {
                self.replace(highest, expanded, evaluator)?;
                Transformation::Expansion
            } else {
                self.replace(highest, reflected, evaluator)?;
                Transformation::Reflection
            }
        } else if self.is_worse_than_others(reflected_value, highest) {
            // Keep the reflection if it at least improves on the highest point
            if reflected_value <= self.values[highest] {
                self.replace(highest, reflected, evaluator)?;
            }

            let contracted = contract(&self.points[highest], &centroid);
            let contracted_value = evaluator.evaluate(&contracted)?;

            if contracted_value > self.values[highest] {
                self.shrink(lowest, evaluator)?;
                Transformation::Shrink
            } else {
                self.replace(highest, contracted, evaluator)?;
                Transformation::Contraction
            }
        } else {
            self.replace(highest, reflected, evaluator)?;
            Transformation::Reflection
        };

        Ok(Step {
            highest,
            lowest,
            centroid,
            transformation,
        })
    }

    /// Returns whether `value` is greater than the values of all points except the one at
    /// `highest`.
    fn is_worse_than_others(&self, value: f64, highest: usize) -> bool {
        self.values
            .iter()
            .enumerate()
            .all(|(i, other)| i == highest || value > *other)
    }

    /// Replaces the point at `index` and re-evaluates the simplex.
    fn replace(
        &mut self,
        index: usize,
        point: SVector<f64, N>,
        evaluator: &mut Evaluator<N>,
    ) -> Result<(), InvalidFunctionValueError> {
        let mut points = self.points.clone();
        points[index] = point;

        self.commit(points, evaluator)
    }

    /// Moves every point except the one at `lowest` halfway toward it and re-evaluates the
    /// simplex.
    fn shrink(
        &mut self,
        lowest: usize,
        evaluator: &mut Evaluator<N>,
    ) -> Result<(), InvalidFunctionValueError> {
        let target = self.points[lowest];
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                if i == lowest {
                    *point
                } else {
                    (point + target) * 0.5
                }
            })
            .collect();

        self.commit(points, evaluator)
    }

    /// Evaluates the objective function at every point of `points` and makes them the new
    /// simplex. The simplex is left unchanged if any value is invalid.
    fn commit(
        &mut self,
        points: Vec<SVector<f64, N>>,
        evaluator: &mut Evaluator<N>,
    ) -> Result<(), InvalidFunctionValueError> {
        let values = points
            .iter()
            .map(|point| evaluator.evaluate(point))
            .collect::<Result<Vec<_>, _>>()?;

        self.points = points;
        self.values = values;

        Ok(())
    }
}

/// Reflects `point` through `centroid`.
pub(crate) fn reflect<const N: usize>(
    point: &SVector<f64, N>,
    centroid: &SVector<f64, N>,
) -> SVector<f64, N> {
    centroid * 2.0 - point
}

/// Extends a reflected point away from `centroid` by the same distance again.
pub(crate) fn expand<const N: usize>(
    reflected: &SVector<f64, N>,
    centroid: &SVector<f64, N>,
) -> SVector<f64, N> {
    reflected * 2.0 - centroid
}

/// Returns the midpoint between `point` and `centroid`.
pub(crate) fn contract<const N: usize>(
    point: &SVector<f64, N>,
    centroid: &SVector<f64, N>,
) -> SVector<f64, N> {
    (point + centroid) * 0.5
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha12Rng;

    use super::*;

    fn get_simplex<const N: usize>(
        points: &[[f64; N]],
        evaluator: &mut Evaluator<N>,
    ) -> Simplex<N> {
        let points = points.iter().map(|p| p.to_vec()).collect::<Vec<_>>();
        Simplex::new(&points, evaluator).unwrap()
    }

    fn sphere_evaluator<const N: usize>() -> Evaluator<'static, N> {
        Evaluator::new(Box::new(|x: &SVector<f64, N>| x.norm_squared()))
    }

    fn rosenbrock(x: &SVector<f64, 2>) -> f64 {
        100.0 * (x[1] - x[0].powi(2)).powi(2) + (1.0 - x[0]).powi(2)
    }

    #[test]
    fn test_new() {
        let mut evaluator = Evaluator::new(Box::new(rosenbrock));
        let simplex = get_simplex(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]], &mut evaluator);

        assert_eq!(&[1.0, 1601.0, 401.0], simplex.values());
        assert_eq!(SVector::from([2.0, 0.0]), simplex.points()[1]);
        assert_eq!(3, evaluator.function_evals());
    }

    #[test]
    fn test_new_invalid() {
        let mut evaluator = sphere_evaluator::<2>();

        assert!(matches!(
            Simplex::new(&[vec![0.0, 0.0], vec![1.0, 0.0]], &mut evaluator),
            Err(InvalidInputError::PointCount {
                expected: 3,
                found: 2
            }),
        ));
        assert!(matches!(
            Simplex::new(&vec![vec![0.0, 0.0]; 4], &mut evaluator),
            Err(InvalidInputError::PointCount {
                expected: 3,
                found: 4
            }),
        ));
        assert!(matches!(
            Simplex::new(
                &[vec![0.0, 0.0], vec![1.0], vec![0.0, 1.0, 2.0]],
                &mut evaluator
            ),
            Err(InvalidInputError::PointDimension {
                index: 1,
                expected: 2,
                found: 1
            }),
        ));
        assert!(matches!(
            Simplex::<0>::new(&[vec![]], &mut sphere_evaluator()),
            Err(InvalidInputError::ZeroDimensions),
        ));

        let mut evaluator_nan = Evaluator::new(Box::new(|x: &SVector<f64, 2>| {
            if x[0] > 0.5 {
                f64::NAN
            } else {
                0.0
            }
        }));
        assert!(matches!(
            Simplex::new(
                &[vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]],
                &mut evaluator_nan
            ),
            Err(InvalidInputError::InvalidFunctionValue { index: 1 }),
        ));
    }

    #[test]
    fn test_extreme_indices() {
        let mut evaluator = Evaluator::new(Box::new(|x: &SVector<f64, 2>| x[0]));

        let simplex = get_simplex(&[[1.0, 0.0], [3.0, 0.0], [3.0, 5.0]], &mut evaluator);
        assert_eq!(1, simplex.highest_index());
        assert_eq!(0, simplex.lowest_index());

        let simplex = get_simplex(&[[2.0, 0.0], [1.0, 0.0], [1.0, 5.0]], &mut evaluator);
        assert_eq!(0, simplex.highest_index());
        assert_eq!(1, simplex.lowest_index());

        let simplex = get_simplex(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]], &mut evaluator);
        assert_eq!(0, simplex.highest_index());
        assert_eq!(0, simplex.lowest_index());
        assert_eq!(simplex.best().point, SVector::from([1.0, 0.0]));
        assert_eq!(simplex.worst().point, SVector::from([1.0, 0.0]));
    }

    #[test]
    fn test_centroid() {
        let mut evaluator = sphere_evaluator();
        let simplex = get_simplex(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]], &mut evaluator);

        assert_eq!(SVector::from([0.0, 1.0]), simplex.centroid(1));
        assert_eq!(SVector::from([1.0, 1.0]), simplex.centroid(0));

        let mut evaluator = sphere_evaluator();
        let simplex = get_simplex(
            &[
                [3.0, 0.0, 0.0],
                [0.0, 3.0, 0.0],
                [0.0, 0.0, 3.0],
                [3.0, 3.0, 3.0],
            ],
            &mut evaluator,
        );
        assert_eq!(SVector::from([1.0, 1.0, 1.0]), simplex.centroid(3));
    }

    #[test]
    fn test_size() {
        let mut evaluator = sphere_evaluator();
        let simplex = get_simplex(&[[0.0, 0.0], [3.0, 4.0], [0.0, 2.0]], &mut evaluator);

        assert_eq!(5.0, simplex.size());
    }

    #[test]
    fn test_transformations() {
        let point = SVector::from([1.0, 2.0]);
        let centroid = SVector::from([0.0, 1.0]);

        let reflected = reflect(&point, &centroid);
        assert_eq!(SVector::from([-1.0, 0.0]), reflected);
        assert_eq!(SVector::from([-2.0, -1.0]), expand(&reflected, &centroid));
        assert_eq!(SVector::from([0.5, 1.5]), contract(&point, &centroid));
    }

    #[test]
    fn test_step_contraction() {
        // First iteration of the reference problem: the reflection only improves on the highest
        // point, so it is kept and then contracted
        let mut evaluator = Evaluator::new(Box::new(rosenbrock));
        let mut simplex = get_simplex(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]], &mut evaluator);

        let step = simplex.step(&mut evaluator).unwrap();

        assert_eq!(1, step.highest);
        assert_eq!(0, step.lowest);
        assert_eq!(SVector::from([0.0, 1.0]), step.centroid);
        assert_eq!(Transformation::Contraction, step.transformation);
        assert_eq!(SVector::from([-1.0, 1.5]), simplex.points()[1]);
        assert_eq!(&[1.0, 29.0, 401.0], simplex.values());
    }

    #[test]
    fn test_step_expansion() {
        let mut evaluator = sphere_evaluator();
        let mut simplex = get_simplex(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]], &mut evaluator);

        let step = simplex.step(&mut evaluator).unwrap();

        assert_eq!(2, step.highest);
        assert_eq!(Transformation::Expansion, step.transformation);
        assert_eq!(SVector::from([-0.5, -0.5]), simplex.points()[2]);
        assert_eq!(&[1.0, 1.0, 0.5], simplex.values());
    }

    #[test]
    fn test_step_reflection() {
        let mut evaluator = Evaluator::new(Box::new(|x: &SVector<f64, 2>| x[0] + x[1]));
        let mut simplex = get_simplex(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], &mut evaluator);

        let step = simplex.step(&mut evaluator).unwrap();

        // Ties for the highest point go to the lowest index
        assert_eq!(1, step.highest);
        assert_eq!(Transformation::Reflection, step.transformation);
        assert_eq!(SVector::from([-1.0, 1.0]), simplex.points()[1]);
        assert_eq!(&[0.0, 0.0, 1.0], simplex.values());
    }

    #[test]
    fn test_step_shrink() {
        // Both the reflection and the contraction are worse than every point
        let mut evaluator = Evaluator::new(Box::new(|x: &SVector<f64, 2>| {
            if *x == SVector::from([1.0, -1.0]) {
                10.0
            } else if *x == SVector::from([0.25, 0.5]) {
                5.0
            } else {
                x[0] + 2.0 * x[1]
            }
        }));
        let mut simplex = get_simplex(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], &mut evaluator);

        let step = simplex.step(&mut evaluator).unwrap();

        assert_eq!(Transformation::Shrink, step.transformation);
        assert_eq!(
            &[
                SVector::from([0.0, 0.0]),
                SVector::from([0.5, 0.0]),
                SVector::from([0.0, 0.5])
            ],
            simplex.points(),
        );
        assert_eq!(&[0.0, 0.5, 1.0], simplex.values());
    }

    #[test]
    fn test_shrink() {
        let mut evaluator = sphere_evaluator();
        let mut simplex = get_simplex(&[[4.0, 0.0], [2.0, 2.0], [0.0, 4.0]], &mut evaluator);

        simplex.shrink(1, &mut evaluator).unwrap();

        assert_eq!(
            &[
                SVector::from([3.0, 1.0]),
                SVector::from([2.0, 2.0]),
                SVector::from([1.0, 3.0])
            ],
            simplex.points(),
        );
        assert_eq!(&[10.0, 8.0, 10.0], simplex.values());
    }

    #[test]
    fn test_step_invalid_value() {
        let mut evaluator = Evaluator::new(Box::new(|x: &SVector<f64, 2>| {
            if x[0] < 0.0 {
                f64::NAN
            } else {
                x.norm_squared()
            }
        }));
        let mut simplex = get_simplex(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]], &mut evaluator);

        assert!(simplex.step(&mut evaluator).is_err());
    }

    #[test]
    fn test_step_invalid_value_keeps_simplex() {
        // The reflection (-2, 2) is kept and the simplex re-evaluated, which fails at its first
        // point
        let mut calls = 0;
        let mut evaluator = Evaluator::new(Box::new(move |x: &SVector<f64, 2>| {
            calls += 1;
            if calls == 5 {
                f64::NAN
            } else {
                rosenbrock(x)
            }
        }));
        let mut simplex = get_simplex(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]], &mut evaluator);

        assert!(simplex.step(&mut evaluator).is_err());
        assert_eq!(5, evaluator.function_evals());
        assert_eq!(
            &[
                SVector::from([0.0, 0.0]),
                SVector::from([2.0, 0.0]),
                SVector::from([0.0, 2.0])
            ],
            simplex.points(),
        );
        assert_eq!(&[1.0, 1601.0, 401.0], simplex.values());

        // Iterating again continues from the unchanged simplex
        let step = simplex.step(&mut evaluator).unwrap();
        assert_eq!(Transformation::Contraction, step.transformation);
        for (point, value) in simplex.points().iter().zip(simplex.values()) {
            assert_eq!(rosenbrock(point), *value);
        }
    }

    #[test]
    fn test_shrink_invalid_value() {
        let mut evaluator = Evaluator::new(Box::new(|x: &SVector<f64, 2>| {
            if *x == SVector::from([1.0, 3.0]) {
                f64::INFINITY
            } else {
                x.norm_squared()
            }
        }));
        let mut simplex = get_simplex(&[[4.0, 0.0], [2.0, 2.0], [0.0, 4.0]], &mut evaluator);

        assert!(simplex.shrink(1, &mut evaluator).is_err());
        assert_eq!(SVector::from([4.0, 0.0]), simplex.points()[0]);
        assert_eq!(SVector::from([0.0, 4.0]), simplex.points()[2]);
        assert_eq!(&[16.0, 8.0, 16.0], simplex.values());
    }

    #[test]
    fn test_step_invariants() {
        // Random simplices on a shifted, scaled sphere
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let objective = |x: &SVector<f64, 3>| {
            (x[0] - 1.0).powi(2) + 10.0 * (x[1] + 2.0).powi(2) + 0.1 * x[2].powi(2)
        };

        for _ in 0..20 {
            let points = (0..4)
                .map(|_| (0..3).map(|_| rng.gen_range(-5.0..5.0)).collect::<Vec<f64>>())
                .collect::<Vec<_>>();
            let mut evaluator = Evaluator::new(Box::new(objective));
            let mut simplex = Simplex::new(&points, &mut evaluator).unwrap();

            for _ in 0..50 {
                let highest = simplex.highest_index();
                let lowest = simplex.lowest_index();
                for value in simplex.values() {
                    assert!(simplex.values()[highest] >= *value);
                    assert!(simplex.values()[lowest] <= *value);
                }

                let expected_centroid = simplex
                    .points()
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != highest)
                    .map(|(_, p)| p / 3.0)
                    .sum::<SVector<f64, 3>>();

                let step = simplex.step(&mut evaluator).unwrap();

                for i in 0..3 {
                    assert_approx_eq!(expected_centroid[i], step.centroid[i]);
                }
                for (point, value) in simplex.points().iter().zip(simplex.values()) {
                    assert_eq!(objective(point), *value);
                }
            }
        }
    }
}
