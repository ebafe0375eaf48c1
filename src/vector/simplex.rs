//! The simplex is the population Nelder-Mead works on: `n + 1` vertices in
//! `n` dimensions, kept sorted by cost so that vertex `0` is the best and
//! vertex `n` the worst.

use std::cmp::Ordering;

use ndarray::prelude::*;
use ndarray::Zip;

use super::vertex::Vertex;
use crate::error::{Error, Result};
use crate::utils::default_step_sizes;

#[derive(Debug, Clone, PartialEq)]
pub struct Simplex {
    vertices: Vec<Vertex>,
}

impl Simplex {
    /// Builds a simplex around `initial`. Vertex `0` is `initial` itself and
    /// vertex `i` is `initial` with component `i - 1` increased by `steps[i - 1]`.
    ///
    /// A zero step collapses the simplex along that dimension. This is not detected.
    pub fn new(initial: ArrayView1<f64>, steps: ArrayView1<f64>) -> Result<Self> {
        if initial.len() != steps.len() {
            return Err(Error::DimensionMismatch {
                expected: initial.len(),
                got: steps.len(),
            });
        }
        Ok(Self::perturbed(initial, steps))
    }

    /// Builds a simplex around `initial` using [`default_step_sizes`].
    pub fn around(initial: ArrayView1<f64>) -> Self {
        let steps = default_step_sizes(initial);
        Self::perturbed(initial, steps.view())
    }

    fn perturbed(initial: ArrayView1<f64>, steps: ArrayView1<f64>) -> Self {
        let mut vertices = Vec::with_capacity(initial.len() + 1);
        vertices.push(Vertex::new(initial.to_owned()));
        for (k, &step) in steps.iter().enumerate() {
            let mut coords = initial.to_owned();
            coords[k] += step;
            vertices.push(Vertex::new(coords));
        }
        Simplex { vertices }
    }

    /// Uses the rows of `init_simplex` as vertices. The search only ever explores
    /// the affine space spanned by these rows, which can be used to restrict it
    /// to a subspace.
    pub fn from_array(init_simplex: ArrayView2<f64>) -> Result<Self> {
        let (rows, cols) = init_simplex.dim();
        if rows != cols + 1 {
            return Err(Error::MalformedSimplex {
                vertices: rows,
                dimensions: cols,
            });
        }
        let vertices = init_simplex
            .outer_iter()
            .map(|row| Vertex::new(row.to_owned()))
            .collect();
        Ok(Simplex { vertices })
    }

    /// Number of dimensions `n` of the search space.
    pub fn dim(&self) -> usize {
        self.vertices.len() - 1
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn best(&self) -> &Vertex {
        &self.vertices[0]
    }

    /// The vertex just before the worst one. For a one-dimensional simplex this is the best.
    pub fn second_worst(&self) -> &Vertex {
        &self.vertices[self.dim().saturating_sub(1)]
    }

    pub fn worst(&self) -> &Vertex {
        &self.vertices[self.dim()]
    }

    /// Evaluates `func` at every vertex and sorts the simplex.
    pub fn evaluate<F>(&mut self, mut func: F)
    where
        F: FnMut(ArrayView1<f64>) -> f64,
    {
        for vertex in self.vertices.iter_mut() {
            vertex.cost = func(vertex.coords.view());
        }
        self.sort();
    }

    /// Stable sort ascending by cost. Vertices with equal cost keep their relative order
    /// and NaN costs go last.
    pub fn sort(&mut self) {
        self.vertices.sort_by(Vertex::cmp_cost);
    }

    pub fn is_sorted(&self) -> bool {
        self.vertices
            .windows(2)
            .all(|w| w[0].cmp_cost(&w[1]) != Ordering::Greater)
    }

    /// Calculate the centroid of all points but the worst one.
    /// Assumes that the simplex is ordered.
    pub fn centroid(&self) -> Array1<f64> {
        let mut centroid = Array1::zeros(self.dim());
        self.centroid_into(&mut centroid);
        centroid
    }

    /// Same as [`centroid`](Self::centroid), writing into a buffer of length `n`.
    pub fn centroid_into(&self, out: &mut Array1<f64>) {
        let n = self.dim();
        out.fill(0.0);
        if n == 0 {
            return;
        }
        for vertex in &self.vertices[..n] {
            *out += &vertex.coords;
        }
        *out /= n as f64;
    }

    /// `(1 + lambda) * centroid - lambda * worst`.
    ///
    /// Reflection, expansion and both contractions are this point with a different `lambda`.
    pub fn reflect(&self, centroid: &Array1<f64>, lambda: f64) -> Array1<f64> {
        let mut out = Array1::zeros(self.dim());
        self.reflect_into(centroid, lambda, &mut out);
        out
    }

    pub fn reflect_into(&self, centroid: &Array1<f64>, lambda: f64, out: &mut Array1<f64>) {
        Zip::from(out)
            .and(centroid)
            .and(&self.worst().coords)
            .for_each(|o, &c, &w| *o = (1.0 + lambda) * c - lambda * w);
    }

    /// Shrink all points towards the best point: `best + sigma * (vertex - best)`.
    /// The costs of the moved vertices are stale afterwards.
    pub fn shrink(&mut self, sigma: f64) {
        let (head, tail) = self.vertices.split_at_mut(1);
        let best = &head[0].coords;
        for vertex in tail {
            Zip::from(&mut vertex.coords)
                .and(best)
                .for_each(|x, &b| *x = b + sigma * (*x - b));
        }
    }

    /// Puts `coords` in place of the worst vertex and restores the ordering with a single
    /// insertion pass. This is O(n) since only one vertex moved.
    ///
    /// The buffers are swapped, so `coords` holds the previous worst coordinates afterwards.
    pub fn replace_worst(&mut self, coords: &mut Array1<f64>, cost: f64) {
        let mut i = self.dim();
        debug_assert_eq!(coords.len(), self.vertices[i].dim());
        std::mem::swap(&mut self.vertices[i].coords, coords);
        self.vertices[i].cost = cost;
        while i > 0 && self.vertices[i].cmp_cost(&self.vertices[i - 1]) == Ordering::Less {
            self.vertices.swap(i, i - 1);
            i -= 1;
        }
    }
}
