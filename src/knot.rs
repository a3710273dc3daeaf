/// Knot is a single tabulated sample through which the spline passes.
/// - `x` - independent variable (e.g. internuclear distance),
/// - `y` - tabulated value at `x` (e.g. potential energy).
///
/// Knots are ordered and compared by `x` only, so sorting a set of knots sorts it
/// along the independent variable.
#[derive(Debug, Clone, Copy)]
pub struct Knot {
    x: f64,
    y: f64,
}

impl Knot {
    /// # Example
    /// ```
    /// use potential_spline::Knot;
    ///
    /// let knot = Knot::new(1.0, -2.5);
    /// assert_eq!(knot.get_x(), 1.0);
    /// assert_eq!(knot.get_y(), -2.5);
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Knot { x, y }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }
}

impl From<(f64, f64)> for Knot {
    fn from((x, y): (f64, f64)) -> Self {
        Knot { x, y }
    }
}

impl Ord for Knot {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x.total_cmp(&other.x)
    }
}

impl PartialOrd for Knot {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Equality is by `x` alone so it agrees with `Ord`; two samples at the same `x`
// are the same knot.
impl PartialEq for Knot {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
    }
}

impl Eq for Knot { }
