/// Snapping tolerance used while cleaning input rings: 2^-43.
pub const EPSILON_P: f64 = 1.0 / 8_796_093_022_208.0;

/// Knobs shared by the geometry store and the decomposer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecompConfig {
    /// Two coordinates closer than this are treated as equal when cleaning
    /// rings (duplicates and collinear runs).
    pub epsilon: f64,
    /// Upper bound on trapezoid visits per run. `None` derives the bound
    /// from the size of the trapezoidation (`8 * trapezoids + 8`).
    pub max_steps: Option<usize>,
}

impl Default for DecompConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON_P,
            max_steps: None,
        }
    }
}

impl DecompConfig {
    #[inline]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[inline]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    #[inline]
    pub fn step_limit(&self, nb_trapezoids: usize) -> usize {
        self.max_steps.unwrap_or(8 * nb_trapezoids + 8)
    }
}
