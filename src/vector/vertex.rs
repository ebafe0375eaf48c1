use std::cmp::Ordering;

use ndarray::prelude::*;

/// One candidate point of a simplex together with its cached cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// The variable assignment.
    pub coords: Array1<f64>,
    /// The cost function value at `coords`. Stale after a shrink until re-evaluated.
    pub cost: f64,
}

impl Vertex {
    /// A vertex whose cost has not been evaluated yet.
    pub fn new(coords: Array1<f64>) -> Self {
        Vertex {
            coords,
            cost: f64::NAN,
        }
    }

    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Orders vertices by cost, with a NaN cost after every number whatever its sign.
    pub fn cmp_cost(&self, other: &Vertex) -> Ordering {
        self.cost
            .is_nan()
            .cmp(&other.cost.is_nan())
            .then_with(|| self.cost.total_cmp(&other.cost))
    }
}
