//! Fitting geometric primitives to freehand strokes.
//!
//! Each primitive is described by a flat parameter vector so that it can be
//! tuned by [`NelderMead`](crate::vector::NelderMead). The cost of a set of
//! parameters is the mean squared distance of the stroke points to the
//! primitive's outline. [`Recognizer`] fits every primitive and keeps the best
//! one that passes its acceptance checks.

mod fit;
mod path;
mod recognize;

pub use self::fit::{fit, fit_circle, fit_line, fit_rectangle, Fit};
pub use self::path::Path;
pub use self::recognize::{Recognizer, RecognizerBuilder, RecognizerBuilderError};

use std::f64::consts::PI;
use std::fmt;

use ndarray::prelude::*;

/// The primitives a stroke can be recognized as, simplest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Circle,
    Rectangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Line, ShapeKind::Circle, ShapeKind::Rectangle];

    /// Length of the parameter vector describing this kind of shape.
    pub fn parameters(self) -> usize {
        match self {
            ShapeKind::Line => 4,
            ShapeKind::Circle => 3,
            ShapeKind::Rectangle => 5,
        }
    }

    /// Minimum number of stroke points needed to fit this kind of shape.
    pub fn min_points(self) -> usize {
        match self {
            ShapeKind::Line => 2,
            ShapeKind::Circle => 3,
            ShapeKind::Rectangle => 4,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
        };
        f.pad(name)
    }
}

/// A fitted primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Segment from `start` to `end`.
    Line { start: [f64; 2], end: [f64; 2] },
    Circle { center: [f64; 2], radius: f64 },
    /// Rectangle rotated counterclockwise by `angle` radians around its center.
    Rectangle {
        center: [f64; 2],
        half_extents: [f64; 2],
        angle: f64,
    },
}

impl Shape {
    /// Reads a shape from its parameter vector:
    /// `[x0, y0, x1, y1]` for a line, `[cx, cy, r]` for a circle and
    /// `[cx, cy, half_width, half_height, angle]` for a rectangle.
    /// Radius and half extents are taken by absolute value.
    ///
    /// Panics if `params` is shorter than [`ShapeKind::parameters`].
    pub fn from_params(kind: ShapeKind, params: ArrayView1<f64>) -> Self {
        debug_assert!(params.len() >= kind.parameters());
        match kind {
            ShapeKind::Line => Shape::Line {
                start: [params[0], params[1]],
                end: [params[2], params[3]],
            },
            ShapeKind::Circle => Shape::Circle {
                center: [params[0], params[1]],
                radius: params[2].abs(),
            },
            ShapeKind::Rectangle => Shape::Rectangle {
                center: [params[0], params[1]],
                half_extents: [params[2].abs(), params[3].abs()],
                angle: params[4],
            },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
        }
    }

    /// Unsigned distance from `point` to the outline of the shape.
    pub fn distance(&self, point: [f64; 2]) -> f64 {
        match *self {
            Shape::Line { start, end } => {
                let pa = [point[0] - start[0], point[1] - start[1]];
                let ba = [end[0] - start[0], end[1] - start[1]];
                let len2 = ba[0] * ba[0] + ba[1] * ba[1];
                let h = if len2 > 0.0 {
                    ((pa[0] * ba[0] + pa[1] * ba[1]) / len2).max(0.0).min(1.0)
                } else {
                    0.0
                };
                (pa[0] - ba[0] * h).hypot(pa[1] - ba[1] * h)
            }
            Shape::Circle { center, radius } => {
                ((point[0] - center[0]).hypot(point[1] - center[1]) - radius).abs()
            }
            Shape::Rectangle {
                center,
                half_extents,
                angle,
            } => {
                // rotate into the rectangle frame
                let (sin, cos) = angle.sin_cos();
                let dx = point[0] - center[0];
                let dy = point[1] - center[1];
                let local = [cos * dx + sin * dy, -sin * dx + cos * dy];

                let q = [
                    local[0].abs() - half_extents[0],
                    local[1].abs() - half_extents[1],
                ];
                let outside = q[0].max(0.0).hypot(q[1].max(0.0));
                let inside = q[0].max(q[1]).min(0.0);
                (outside + inside).abs()
            }
        }
    }

    /// Length of the outline.
    pub fn perimeter(&self) -> f64 {
        match *self {
            Shape::Line { start, end } => (end[0] - start[0]).hypot(end[1] - start[1]),
            Shape::Circle { radius, .. } => 2.0 * PI * radius,
            Shape::Rectangle { half_extents, .. } => 4.0 * (half_extents[0] + half_extents[1]),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use float_cmp::approx_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn line_distance() {
        let line = Shape::Line {
            start: [0.0, 0.0],
            end: [4.0, 0.0],
        };
        assert!(approx_eq!(f64, line.distance([2.0, 3.0]), 3.0, ulps = 2));
        assert!(approx_eq!(f64, line.distance([7.0, 4.0]), 5.0, ulps = 2));
        assert!(approx_eq!(f64, line.distance([-3.0, 0.0]), 3.0, ulps = 2));
        assert!(approx_eq!(f64, line.perimeter(), 4.0, ulps = 2));
    }

    #[test]
    fn point_line_distance() {
        let line = Shape::Line {
            start: [1.0, 1.0],
            end: [1.0, 1.0],
        };
        assert!(approx_eq!(f64, line.distance([4.0, 5.0]), 5.0, ulps = 2));
    }

    #[test]
    fn circle_distance() {
        let circle = Shape::from_params(ShapeKind::Circle, arr1(&[1.0, 1.0, -2.0]).view());
        assert_eq!(circle.kind(), ShapeKind::Circle);
        assert!(approx_eq!(f64, circle.distance([1.0, 1.0]), 2.0, ulps = 2));
        assert!(approx_eq!(f64, circle.distance([1.0, 5.0]), 2.0, ulps = 2));
        assert!(approx_eq!(f64, circle.perimeter(), 4.0 * PI, ulps = 2));
    }

    #[test]
    fn rectangle_distance() {
        let rect = Shape::from_params(ShapeKind::Rectangle, arr1(&[0.0, 0.0, 2.0, 1.0, 0.0]).view());
        // inside, nearest edge is the top
        assert!(approx_eq!(f64, rect.distance([0.0, 0.5]), 0.5, ulps = 2));
        // on the boundary
        assert!(approx_eq!(f64, rect.distance([2.0, 0.3]), 0.0, epsilon = 1e-12));
        // outside, past a corner
        assert!(approx_eq!(f64, rect.distance([5.0, 5.0]), 5.0, ulps = 2));
        assert!(approx_eq!(f64, rect.perimeter(), 12.0, ulps = 2));
    }

    #[test]
    fn rotated_rectangle_distance() {
        let rect = Shape::Rectangle {
            center: [1.0, 1.0],
            half_extents: [2.0, 1.0],
            angle: FRAC_PI_2,
        };
        // the long side now runs along y
        assert!(approx_eq!(f64, rect.distance([1.0, 3.0]), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, rect.distance([2.0, 1.0]), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, rect.distance([4.0, 1.0]), 2.0, epsilon = 1e-12));
    }

    #[test]
    #[should_panic]
    fn short_parameter_vector() {
        Shape::from_params(ShapeKind::Rectangle, arr1(&[0.0, 0.0, 1.0]).view());
    }

    #[test]
    fn kinds() {
        assert_eq!(ShapeKind::Rectangle.parameters(), 5);
        assert_eq!(ShapeKind::Circle.min_points(), 3);
        assert_eq!(ShapeKind::Line.to_string(), "line");
    }
}
