use ndarray::prelude::*;

/// Relative perturbation used to build the default simplex.
pub const NONZERO_DELTA: f64 = 0.05;

/// Absolute perturbation added so that zero components still get a nonzero step.
pub const ZERO_DELTA: f64 = 0.00025;

/// Counts the calls made to a cost function.
pub struct WrappedFunction<F: FnMut(ArrayView1<f64>) -> f64> {
    pub num: usize,
    pub func: F,
}

impl<F: FnMut(ArrayView1<f64>) -> f64> WrappedFunction<F> {
    pub fn new(func: F) -> Self {
        WrappedFunction { num: 0, func }
    }

    pub fn call(&mut self, arg: ArrayView1<f64>) -> f64 {
        self.num += 1;
        (self.func)(arg)
    }
}

/// Per-dimension step sizes for a simplex built around `x0`:
/// `0.05 * |x0[j]| + 0.00025`.
pub fn default_step_sizes(x0: ArrayView1<f64>) -> Array1<f64> {
    x0.mapv(|xi| NONZERO_DELTA * xi.abs() + ZERO_DELTA)
}
