use std::path::Path;

use crate::{
    error::{Error, Result},
    knot::Knot,
    polynomial::Polynomial,
    table::SampleTable,
    tridiagonal::TridiagonalSystem,
};

/// Relative tolerance used to detect uniform knot spacing.
const UNIFORM_SPACING_TOLERANCE: f64 = 1e-9;

/// Natural cubic spline through a table of samples.
///
/// Between knots `x_i` and `x_{i+1}` the spline is the cubic
/// `y = a + b t + c t^2 + d t^3` with `t = x - x_i`. Value, first and second
/// derivatives are continuous at interior knots, and the second derivative is zero
/// at both ends of the table.
///
/// Outside `[min_x, max_x]` the spline is extended with the cubic of the
/// nearest boundary segment ([Spline::extrapolate], [Spline::derivative],
/// [Spline::integrate]). [Spline::interpolate] refuses such queries instead.
#[derive(Debug, Clone)]
pub struct Spline {
    knots: Vec<Knot>,
    polynomials: Vec<Polynomial>,
    min_x: f64,
    max_x: f64,
    is_knot_spacing_uniform: bool,
}

impl Spline {
    /// Builds the spline from `table`. Rows are sorted by `x` first, so the table
    /// does not need to be ordered.
    /// # Errors
    /// [Error::DegenerateInput] when the table has fewer than 2 rows, two rows share
    /// the same `x`, or a value is not finite.
    pub fn new(table: SampleTable) -> Result<Self> {

        if table.len() < 2 {
            return Err(Error::DegenerateInput(format!(
                "spline must have at least 2 knots, got {}",
                table.len()
            )));
        }

        let number_of_intervals = table.len() - 1;
        let mut spline = Spline {
            knots: table.into_knots(),
            polynomials: Vec::with_capacity(number_of_intervals),
            min_x: 0.0,
            max_x: 0.0,
            is_knot_spacing_uniform: false,
        };

        spline.sort_knots();
        spline.check_knots_values()?;
        spline.check_knots_spacing()?;
        spline.calculate_polynomials()?;
        Ok(spline)
    }

    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self> {
        Self::new(SampleTable::from_columns(xs, ys)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(SampleTable::load(path)?)
    }

    /// Value at `x` inside the spline domain.
    /// # Errors
    /// [Error::OutOfRange] when `x` lies outside `[min_x, max_x]`.
    pub fn interpolate(&self, x: f64) -> Result<f64> {
        if self.is_in_range(x) {
            Ok(self.extrapolate(x))
        } else {
            Err(self.out_of_range(x))
        }
    }

    /// Values at every point of `x_vector`, all of which must lie inside the domain.
    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        match x_vector.iter().find(|x| !self.is_in_range(**x)) {
            Some(x) => Err(self.out_of_range(*x)),
            None => Ok(self.batch_extrapolate(x_vector)),
        }
    }

    /// Value at any real `x`. Outside the domain the boundary segment's cubic is
    /// extended.
    pub fn extrapolate(&self, x: f64) -> f64 {
        let index = self.find_interval_index(x);
        self.evaluate_in_interval(index, x)
    }

    pub fn batch_extrapolate(&self, x_vector: &[f64]) -> Vec<f64> {
        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.find_interval_index_with_hint(index, *x);
            results.push(self.evaluate_in_interval(index, *x));
        }
        results
    }

    /// Derivative of given `order` at any real `x`, using the same extension as
    /// [Spline::extrapolate] outside the domain. Order 0 is the value itself and
    /// every order above 3 is zero.
    pub fn derivative(&self, x: f64, order: usize) -> f64 {
        if order == 0 {
            return self.extrapolate(x);
        }
        let index = self.find_interval_index(x);
        self.polynomials[index].derivative(x - self.knots[index].get_x(), order)
    }

    /// Definite integral over `[a, b]`. Swapping the bounds flips the sign.
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        if a > b {
            return -self.integrate(b, a);
        }

        let first = self.find_interval_index(a);
        let last = self.find_interval_index(b);
        let local = |index: usize, x: f64| x - self.knots[index].get_x();

        if first == last {
            let polynomial = &self.polynomials[first];
            return polynomial.integral(local(first, b)) - polynomial.integral(local(first, a));
        }

        let mut result = self.polynomials[first].integral(local(first, self.knots[first + 1].get_x()))
            - self.polynomials[first].integral(local(first, a));
        for index in first + 1..last {
            result += self.polynomials[index].integral(local(index, self.knots[index + 1].get_x()));
        }
        result + self.polynomials[last].integral(local(last, b))
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// `(min_x, max_x)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    /// Per-interval coefficients `[a, b, c, d]` in the interval's local coordinate.
    pub fn coefficients(&self) -> Vec<&[f64]> {
        self.polynomials.iter().map(|p| p.coefficients()).collect()
    }

    pub fn is_knot_spacing_uniform(&self) -> bool {
        self.is_knot_spacing_uniform
    }

    fn sort_knots(&mut self) {
        self.knots.sort();
        self.min_x = self.knots[0].get_x();
        self.max_x = self.knots[self.knots.len() - 1].get_x();
    }

    fn check_knots_values(&self) -> Result<()> {
        match self.knots.iter().find(|k| !k.get_x().is_finite() || !k.get_y().is_finite()) {
            Some(k) => Err(Error::DegenerateInput(format!(
                "knot ({}, {}) is not finite",
                k.get_x(),
                k.get_y()
            ))),
            None => Ok(()),
        }
    }

    fn check_knots_spacing(&mut self) -> Result<()> {

        let x_spacing_vec: Vec<f64> = self.knot_spacing();

        if let Some(i) = x_spacing_vec.iter().position(|spacing| *spacing <= 0.0) {
            return Err(Error::DegenerateInput(format!(
                "knots {} and {} have equal x values ({})",
                i,
                i + 1,
                self.knots[i].get_x()
            )));
        }

        let tolerance = UNIFORM_SPACING_TOLERANCE * x_spacing_vec[0];
        self.is_knot_spacing_uniform = x_spacing_vec
            .iter()
            .all(|spacing| (spacing - x_spacing_vec[0]).abs() <= tolerance);

        Ok(())
    }

    fn knot_spacing(&self) -> Vec<f64> {
        self.knots
            .windows(2)
            .map(|w| w[1].get_x() - w[0].get_x())
            .collect()
    }

    /// Solves for the second derivatives (moments) at interior knots, with zero
    /// moments at both ends, then converts each interval to a cubic polynomial.
    fn calculate_polynomials(&mut self) -> Result<()> {
        let number_of_knots = self.knots.len();
        let spacing = self.knot_spacing();
        let slopes: Vec<f64> = self
            .knots
            .windows(2)
            .zip(&spacing)
            .map(|(w, h)| (w[1].get_y() - w[0].get_y()) / h)
            .collect();

        let mut moments = vec![0.0; number_of_knots];
        let number_of_unknowns = number_of_knots - 2;

        if number_of_unknowns > 0 {
            let mut system = TridiagonalSystem::zeros(number_of_unknowns);
            for row in 0..number_of_unknowns {
                let i = row + 1;
                let lower = if row == 0 { 0.0 } else { spacing[i - 1] };
                let upper = if row == number_of_unknowns - 1 { 0.0 } else { spacing[i] };
                system.set_row(
                    row,
                    lower,
                    2.0 * (spacing[i - 1] + spacing[i]),
                    upper,
                    6.0 * (slopes[i] - slopes[i - 1]),
                );
            }

            let solution = system.solve()?;
            for row in 0..number_of_unknowns {
                moments[row + 1] = solution[row];
            }
        }

        for i in 0..number_of_knots - 1 {
            let h = spacing[i];
            let coefficients = vec![
                self.knots[i].get_y(),
                slopes[i] - h * (2.0 * moments[i] + moments[i + 1]) / 6.0,
                moments[i] / 2.0,
                (moments[i + 1] - moments[i]) / (6.0 * h),
            ];
            if let Some(c) = coefficients.iter().find(|c| !c.is_finite()) {
                return Err(Error::DegenerateInput(format!(
                    "interval {} (spacing {:e}) gives non-finite coefficient {}",
                    i, h, c
                )));
            }
            self.polynomials.push(Polynomial::new(coefficients));
        }
        Ok(())
    }

    fn evaluate_in_interval(&self, index: usize, x: f64) -> f64 {
        // the last knot is not the origin of any interval
        if x == self.max_x {
            return self.knots[self.knots.len() - 1].get_y();
        }
        self.polynomials[index].evaluate(x - self.knots[index].get_x())
    }

    fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    fn out_of_range(&self, x: f64) -> Error {
        Error::OutOfRange { x, min: self.min_x, max: self.max_x }
    }

    /// Index of the interval whose polynomial describes `x`: `i` with
    /// `x_i <= x < x_{i+1}`, the first interval left of the domain and the last
    /// interval from `max_x` on.
    fn find_interval_index(&self, x: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_interval_index_uniform(x)
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_bisect(&self, x: f64) -> usize {
        let size = self.knots.len();
        let mut min = 0;
        let mut max = size - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.knots[mid].get_x() {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_interval_index_uniform(&self, x: f64) -> usize {
        let last_interval = self.knots.len() - 2;
        let relative_x = (x - self.min_x) / (self.max_x - self.min_x) * (last_interval + 1) as f64;

        // rounding can put a query sitting on a knot one interval off
        let mut index = if relative_x > 0.0 {
            (relative_x.floor() as usize).min(last_interval)
        } else {
            0
        };
        while index > 0 && x < self.knots[index].get_x() {
            index -= 1;
        }
        while index < last_interval && x >= self.knots[index + 1].get_x() {
            index += 1;
        }
        index
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {

        if !self.is_in_interval(index_hint, x) {

            if index_hint + 1 < self.polynomials.len() && self.is_in_interval(index_hint + 1, x) {
                return index_hint + 1;
            } else {
                return self.find_interval_index(x);
            }
        }
        index_hint
    }

    fn is_in_interval(&self, interval_index: usize, x: f64) -> bool {
        let last_interval = self.polynomials.len() - 1;
        (interval_index == 0 || self.knots[interval_index].get_x() <= x)
            && (interval_index == last_interval || x < self.knots[interval_index + 1].get_x())
    }
}
