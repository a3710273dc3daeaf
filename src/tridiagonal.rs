#[cfg(test)]
use nalgebra::DMatrix;
use nalgebra::DVector;

use crate::error::{Error, Result};

/// Tridiagonal linear system `A m = rhs` with
/// - `lower[i]` = `A[i][i-1]` (`lower[0]` is unused),
/// - `diagonal[i]` = `A[i][i]`,
/// - `upper[i]` = `A[i][i+1]` (last entry is unused).
pub struct TridiagonalSystem {
    lower: DVector<f64>,
    diagonal: DVector<f64>,
    upper: DVector<f64>,
    rhs: DVector<f64>,
}

impl TridiagonalSystem {
    pub fn zeros(size: usize) -> Self {
        TridiagonalSystem {
            lower: DVector::zeros(size),
            diagonal: DVector::zeros(size),
            upper: DVector::zeros(size),
            rhs: DVector::zeros(size),
        }
    }

    pub fn size(&self) -> usize {
        self.diagonal.len()
    }

    pub fn set_row(&mut self, row: usize, lower: f64, diagonal: f64, upper: f64, rhs: f64) {
        self.lower[row] = lower;
        self.diagonal[row] = diagonal;
        self.upper[row] = upper;
        self.rhs[row] = rhs;
    }

    /// Thomas algorithm. Stable for the diagonally dominant systems produced by
    /// spline construction.
    pub fn solve(&self) -> Result<DVector<f64>> {
        let size = self.size();
        let mut upper_prime = DVector::<f64>::zeros(size);
        let mut rhs_prime = DVector::<f64>::zeros(size);

        for i in 0..size {
            let pivot = if i == 0 {
                self.diagonal[0]
            } else {
                self.diagonal[i] - self.lower[i] * upper_prime[i - 1]
            };
            if !pivot.is_finite() {
                return Err(Error::DegenerateInput(format!(
                    "pivot at row {} is not finite, knot spacing exceeds the f64 range",
                    i
                )));
            }
            if pivot == 0.0 {
                return Err(Error::DegenerateInput(format!("singular tridiagonal system at row {}", i)));
            }

            upper_prime[i] = self.upper[i] / pivot;
            rhs_prime[i] = if i == 0 {
                self.rhs[0] / pivot
            } else {
                (self.rhs[i] - self.lower[i] * rhs_prime[i - 1]) / pivot
            };
        }

        let mut solution = rhs_prime;
        for i in (0..size.saturating_sub(1)).rev() {
            let next = solution[i + 1];
            solution[i] -= upper_prime[i] * next;
        }
        Ok(solution)
    }

    /// Dense form of the system matrix.
    #[cfg(test)]
    pub fn to_dense(&self) -> DMatrix<f64> {
        let size = self.size();
        DMatrix::from_fn(size, size, |r, c| {
            if r == c {
                self.diagonal[r]
            } else if c + 1 == r {
                self.lower[r]
            } else if r + 1 == c {
                self.upper[r]
            } else {
                0.0
            }
        })
    }

    #[cfg(test)]
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn single_equation() {
        let mut system = TridiagonalSystem::zeros(1);
        system.set_row(0, 0.0, 4.0, 0.0, 2.0);

        let solution = system.solve().unwrap();
        assert_eq!(1, solution.len());
        assert_approx_eq!(solution[0], 0.5, 1e-12);
    }

    #[test]
    fn empty_system() {
        let system = TridiagonalSystem::zeros(0);
        assert_eq!(0, system.solve().unwrap().len());
    }

    #[test]
    fn agrees_with_dense_lu() {
        let mut rng = StdRng::seed_from_u64(7);

        for size in [2, 3, 8, 25] {
            let mut system = TridiagonalSystem::zeros(size);
            for row in 0..size {
                let lower = if row == 0 { 0.0 } else { rng.gen_range(0.1..1.0) };
                let upper = if row == size - 1 { 0.0 } else { rng.gen_range(0.1..1.0) };
                let diagonal = 2.0 * (lower + upper) + rng.gen_range(0.0..1.0);
                system.set_row(row, lower, diagonal, upper, rng.gen_range(-5.0..5.0));
            }

            let thomas = system.solve().unwrap();
            let dense = system.to_dense().lu().solve(system.rhs()).unwrap();

            for i in 0..size {
                assert_approx_eq!(thomas[i], dense[i], 1e-10);
            }
        }
    }

    #[test]
    fn zero_pivot_is_an_error() {
        let mut system = TridiagonalSystem::zeros(2);
        system.set_row(0, 0.0, 0.0, 1.0, 1.0);
        system.set_row(1, 1.0, 1.0, 0.0, 1.0);

        assert!(matches!(system.solve(), Err(Error::DegenerateInput(message)) if message.contains("singular")));
    }

    #[test]
    fn overflowing_pivot_is_not_singular() {
        let mut system = TridiagonalSystem::zeros(2);
        system.set_row(0, 0.0, f64::INFINITY, 1.0, 1.0);
        system.set_row(1, 1.0, 4.0, 0.0, 1.0);

        match system.solve() {
            Err(Error::DegenerateInput(message)) => {
                assert!(message.contains("not finite"));
                assert!(!message.contains("singular"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
