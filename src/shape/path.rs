use float_cmp::approx_eq;
use ndarray::prelude::*;

use crate::error::{Error, Result};

/// A freehand stroke: the drawn points in order, one `[x, y]` row per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Array2<f64>,
}

impl Path {
    /// Wraps an `N x 2` array of points.
    pub fn new(points: Array2<f64>) -> Result<Self> {
        if points.ncols() != 2 {
            return Err(Error::DimensionMismatch {
                expected: 2,
                got: points.ncols(),
            });
        }
        Ok(Path { points })
    }

    pub fn from_points(points: &[[f64; 2]]) -> Self {
        Path {
            points: Array2::from_shape_fn((points.len(), 2), |(i, j)| points[i][j]),
        }
    }

    pub fn points(&self) -> ArrayView2<f64> {
        self.points.view()
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<[f64; 2]> {
        self.point(0)
    }

    pub fn last(&self) -> Option<[f64; 2]> {
        self.len().checked_sub(1).and_then(|i| self.point(i))
    }

    fn point(&self, i: usize) -> Option<[f64; 2]> {
        if i < self.len() {
            Some([self.points[[i, 0]], self.points[[i, 1]]])
        } else {
            None
        }
    }

    /// Total length of the polyline through the points.
    pub fn length(&self) -> f64 {
        self.points
            .outer_iter()
            .zip(self.points.outer_iter().skip(1))
            .map(|(a, b)| (b[0] - a[0]).hypot(b[1] - a[1]))
            .sum()
    }

    /// Mean of the points, `[0, 0]` for an empty path.
    pub fn centroid(&self) -> [f64; 2] {
        match self.points.mean_axis(Axis(0)) {
            Some(mean) => [mean[0], mean[1]],
            None => [0.0, 0.0],
        }
    }

    /// Checks that the path has at least `needed` points and a nonzero length.
    pub(crate) fn require(&self, needed: usize) -> Result<f64> {
        if self.len() < needed {
            return Err(Error::PathTooShort {
                needed,
                got: self.len(),
            });
        }
        let length = self.length();
        if approx_eq!(f64, length, 0.0, ulps = 2) {
            return Err(Error::DegeneratePath);
        }
        Ok(length)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn rejects_wrong_width() {
        let err = Path::new(Array2::zeros((4, 3))).unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { expected: 2, got: 3 });
    }

    #[test]
    fn length_and_centroid() {
        let path = Path::from_points(&[[0.0, 0.0], [3.0, 4.0], [3.0, 0.0]]);
        assert_eq!(path.len(), 3);
        assert!(approx_eq!(f64, path.length(), 9.0, ulps = 2));
        assert_eq!(path.centroid(), [2.0, 4.0 / 3.0]);
        assert_eq!(path.first(), Some([0.0, 0.0]));
        assert_eq!(path.last(), Some([3.0, 0.0]));
    }

    #[test]
    fn empty_path() {
        let path = Path::from_points(&[]);
        assert!(path.is_empty());
        assert_eq!(path.last(), None);
        assert_eq!(path.centroid(), [0.0, 0.0]);
        assert_eq!(path.require(2), Err(Error::PathTooShort { needed: 2, got: 0 }));
    }

    #[test]
    fn degenerate_path() {
        let path = Path::from_points(&[[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(path.require(2), Err(Error::DegeneratePath));
    }
}
