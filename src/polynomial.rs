/// Polynomial in power basis: `c[0] + c[1] t + c[2] t^2 + ...`.
///
/// Spline segments store their polynomial in the local coordinate `t = x - x_i`
/// of the segment's left knot.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    /// Value of the derivative of given `order` at `t`.
    pub fn derivative(&self, t: f64, order: usize) -> f64 {
        let mut result = 0.0;
        for (power, c) in self.coefficients.iter().enumerate().skip(order).rev() {
            result = result * t + c * falling_factorial(power, order);
        }
        result
    }

    /// Integral of the polynomial over `[0, t]`.
    pub fn integral(&self, t: f64) -> f64 {
        let mut result = 0.0;
        for (power, c) in self.coefficients.iter().enumerate().rev() {
            result = result * t + c / (power + 1) as f64;
        }
        result * t
    }
}

/// `n (n - 1) ... (n - k + 1)`, the factor picked up by `t^n` after `k` derivatives.
fn falling_factorial(n: usize, k: usize) -> f64 {
    let mut multiplier = 1.0;
    let mut coeff = n as f64;
    for _ in 0..k {
        multiplier *= coeff;
        coeff -= 1.0;
    }
    multiplier
}
