//! This module provides the base framework for the minimizers in this crate, such as the
//! base trait and return type.
use ndarray::prelude::*;

/// Minimizer states at the end of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The best cost dropped below the requested tolerance.
    Converged,
    /// The iteration cap was hit first. The solution holds the best point seen so far.
    MaxIterationsReached,
}

/// A minimization result, storing the best point found and some details of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// The parameter values with the smallest cost found.
    pub variables: Array1<f64>,
    /// The function value at `variables`.
    pub cost: f64,
    /// The number of completed iterations.
    pub iterations: usize,
    /// The number of function evaluations performed.
    pub evaluations: usize,
    /// Why the minimizer stopped.
    pub status: Status,
}

impl Solution {
    /// Returns `true` if the run stopped because the tolerance was met.
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}

/// A general minimizer trait.
pub trait Minimizer {
    /// Minimizes the given function returned scalar value by exploring the parameter space,
    /// starting from `args`.
    fn minimize<F>(&self, func: F, args: ArrayView1<f64>) -> Solution
    where
        F: FnMut(ArrayView1<f64>) -> f64;
}
