use std::f64::consts::FRAC_PI_2;

use ndarray::prelude::*;

use super::{Path, Shape, ShapeKind};
use crate::error::{Error, Result};
use crate::minimizer::Solution;
use crate::vector::NelderMead;

/// Number of orientations tried when guessing the angle of a rectangle.
const ORIENTATIONS: usize = 16;

/// A primitive fitted to a path, with the numbers needed to judge it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    pub shape: Shape,
    /// The optimizer run that produced `shape`.
    pub solution: Solution,
    /// Root mean squared distance of the path points to the outline, divided by the path length.
    pub relative_error: f64,
    /// `|perimeter - path length| / path length`.
    pub perimeter_mismatch: f64,
}

impl Fit {
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}

/// Fits a primitive of the given kind to `path`.
pub fn fit(kind: ShapeKind, path: &Path, optimizer: &NelderMead) -> Result<Fit> {
    let length = path.require(kind.min_points())?;
    let points = path.points();

    let solution = match kind {
        ShapeKind::Line => {
            let (first, last) = match (path.first(), path.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => {
                    return Err(Error::PathTooShort {
                        needed: kind.min_points(),
                        got: path.len(),
                    })
                }
            };
            let x0 = arr1(&[first[0], first[1], last[0], last[1]]);
            // the endpoint terms keep the segment from sliding along the stroke
            let anchor = |p: ArrayView1<f64>| {
                let ds = (p[0] - first[0]).powi(2) + (p[1] - first[1]).powi(2);
                let de = (p[2] - last[0]).powi(2) + (p[3] - last[1]).powi(2);
                (ds + de) / points.nrows() as f64
            };
            optimizer.minimize(
                |p: ArrayView1<f64>| {
                    mean_squared_distance(&Shape::from_params(kind, p), points) + anchor(p)
                },
                x0.view(),
            )
        }
        ShapeKind::Circle => optimizer.minimize(
            |p: ArrayView1<f64>| mean_squared_distance(&Shape::from_params(kind, p), points),
            circle_guess(path).view(),
        ),
        ShapeKind::Rectangle => optimizer.minimize(
            |p: ArrayView1<f64>| mean_squared_distance(&Shape::from_params(kind, p), points),
            rectangle_guess(path).view(),
        ),
    };

    let shape = Shape::from_params(kind, solution.variables.view());
    let relative_error = mean_squared_distance(&shape, points).sqrt() / length;
    let perimeter_mismatch = (shape.perimeter() - length).abs() / length;

    Ok(Fit {
        shape,
        solution,
        relative_error,
        perimeter_mismatch,
    })
}

pub fn fit_line(path: &Path, optimizer: &NelderMead) -> Result<Fit> {
    fit(ShapeKind::Line, path, optimizer)
}

pub fn fit_circle(path: &Path, optimizer: &NelderMead) -> Result<Fit> {
    fit(ShapeKind::Circle, path, optimizer)
}

pub fn fit_rectangle(path: &Path, optimizer: &NelderMead) -> Result<Fit> {
    fit(ShapeKind::Rectangle, path, optimizer)
}

fn mean_squared_distance(shape: &Shape, points: ArrayView2<f64>) -> f64 {
    let total: f64 = points
        .outer_iter()
        .map(|p| shape.distance([p[0], p[1]]).powi(2))
        .sum();
    total / points.nrows() as f64
}

/// Centroid and mean distance to it.
fn circle_guess(path: &Path) -> Array1<f64> {
    let [cx, cy] = path.centroid();
    let radius = path
        .points()
        .outer_iter()
        .map(|p| (p[0] - cx).hypot(p[1] - cy))
        .sum::<f64>()
        / path.len() as f64;
    arr1(&[cx, cy, radius])
}

/// The smallest-area bounding box over a fixed set of orientations.
fn rectangle_guess(path: &Path) -> Array1<f64> {
    let [cx, cy] = path.centroid();
    let points = path.points();

    let mut best: Option<(f64, Array1<f64>)> = None;
    for k in 0..ORIENTATIONS {
        let angle = FRAC_PI_2 * k as f64 / ORIENTATIONS as f64;
        let (sin, cos) = angle.sin_cos();

        let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points.outer_iter() {
            let (dx, dy) = (p[0] - cx, p[1] - cy);
            let u = cos * dx + sin * dy;
            let v = -sin * dx + cos * dy;
            u_min = u_min.min(u);
            u_max = u_max.max(u);
            v_min = v_min.min(v);
            v_max = v_max.max(v);
        }

        let area = (u_max - u_min) * (v_max - v_min);
        if best.as_ref().map_or(true, |(best_area, _)| area < *best_area) {
            // box center back in world coordinates
            let (u, v) = ((u_min + u_max) / 2.0, (v_min + v_max) / 2.0);
            let params = arr1(&[
                cx + cos * u - sin * v,
                cy + sin * u + cos * v,
                (u_max - u_min) / 2.0,
                (v_max - v_min) / 2.0,
                angle,
            ]);
            best = Some((area, params));
        }
    }

    match best {
        Some((_, params)) => params,
        None => arr1(&[cx, cy, 0.0, 0.0, 0.0]),
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use float_cmp::approx_eq;
    use std::f64::consts::PI;

    fn circle_path(center: [f64; 2], radius: f64, count: usize) -> Path {
        let points: Vec<[f64; 2]> = (0..=count)
            .map(|i| {
                let t = 2.0 * PI * i as f64 / count as f64;
                [center[0] + radius * t.cos(), center[1] + radius * t.sin()]
            })
            .collect();
        Path::from_points(&points)
    }

    fn wobble(path: &Path, amplitude: f64) -> Path {
        let mut points = path.points().to_owned();
        for (i, mut p) in points.outer_iter_mut().enumerate() {
            p[0] += amplitude * (i as f64 * 12.9898).sin();
            p[1] += amplitude * (i as f64 * 78.233).sin();
        }
        Path::new(points).unwrap()
    }

    #[test]
    fn line_through_straight_stroke() {
        let points: Vec<[f64; 2]> = (0..=20).map(|i| [i as f64 * 5.0, 10.0 + i as f64 * 2.5]).collect();
        let path = wobble(&Path::from_points(&points), 0.3);
        let fit = fit_line(&path, &NelderMead::default()).unwrap();

        assert_eq!(fit.kind(), ShapeKind::Line);
        assert!(fit.relative_error < 0.01);
        assert!(fit.perimeter_mismatch < 0.05);
        if let Shape::Line { start, end } = fit.shape {
            assert!((start[0] - 0.0).abs() < 1.0 && (start[1] - 10.0).abs() < 1.0);
            assert!((end[0] - 100.0).abs() < 1.0 && (end[1] - 60.0).abs() < 1.0);
        }
    }

    #[test]
    fn circle_from_noisy_stroke() {
        let path = wobble(&circle_path([20.0, -5.0], 40.0, 64), 0.5);
        let fit = fit_circle(&path, &NelderMead::default()).unwrap();

        match fit.shape {
            Shape::Circle { center, radius } => {
                assert!((center[0] - 20.0).abs() < 1.0);
                assert!((center[1] + 5.0).abs() < 1.0);
                assert!((radius - 40.0).abs() < 1.0);
            }
            other => panic!("expected a circle, got {:?}", other),
        }
        assert!(fit.perimeter_mismatch < 0.05);
    }

    #[test]
    fn circle_guess_on_exact_circle() {
        let guess = circle_guess(&circle_path([1.0, 2.0], 3.0, 32));
        assert!(approx_eq!(f64, guess[2], 3.0, epsilon = 0.2));
    }

    #[test]
    fn rectangle_from_outline() {
        let corners = [[0.0, 0.0], [100.0, 0.0], [100.0, 60.0], [0.0, 60.0], [0.0, 0.0]];
        let mut points = Vec::new();
        for pair in corners.windows(2) {
            for k in 0..10 {
                let t = k as f64 / 10.0;
                points.push([
                    pair[0][0] + t * (pair[1][0] - pair[0][0]),
                    pair[0][1] + t * (pair[1][1] - pair[0][1]),
                ]);
            }
        }
        points.push([0.0, 0.0]);
        let path = Path::from_points(&points);

        let guess = rectangle_guess(&path);
        assert!(approx_eq!(f64, guess[0], 50.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, guess[1], 30.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, guess[2], 50.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, guess[3], 30.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, guess[4], 0.0, ulps = 1));

        let fit = fit_rectangle(&path, &NelderMead::default()).unwrap();
        assert!(fit.relative_error < 1e-3);
        assert!(fit.perimeter_mismatch < 1e-3);
    }

    #[test]
    fn too_few_points() {
        let path = Path::from_points(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]);
        assert!(fit_line(&path, &NelderMead::default()).is_ok());
        assert!(fit_circle(&path, &NelderMead::default()).is_ok());
        assert_eq!(
            fit_rectangle(&path, &NelderMead::default()).unwrap_err(),
            Error::PathTooShort { needed: 4, got: 3 }
        );
    }
}
