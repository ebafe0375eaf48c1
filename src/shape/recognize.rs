use derive_builder::Builder;
use log::{debug, trace};

use super::fit::{fit, Fit};
use super::{Path, ShapeKind};
use crate::error::Result;
use crate::vector::NelderMead;

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
/// Picks the primitive that best matches a freehand stroke.
///
/// A fitted primitive is only accepted when its outline stays close to the
/// stroke and its perimeter roughly matches the drawn length. The second check
/// rejects, for example, a circle fitted to an arc: the arc lies on the circle
/// but covers only part of it.
pub struct Recognizer {
    /// Largest accepted RMS distance to the outline, as a fraction of the path length.
    #[builder(default = "0.05")]
    pub tolerance: f64,

    /// Largest accepted relative difference between perimeter and path length.
    #[builder(default = "0.15")]
    pub perimeter_tolerance: f64,

    /// The minimizer used for every fit.
    #[builder(default = "Recognizer::default_optimizer()")]
    pub optimizer: NelderMead,
}

impl RecognizerBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(tolerance) = self.tolerance {
            if !(tolerance >= 0.0) {
                return Err(format!("tolerance must be non-negative, got {}", tolerance));
            }
        }
        if let Some(tolerance) = self.perimeter_tolerance {
            if !(tolerance >= 0.0) {
                return Err(format!(
                    "perimeter tolerance must be non-negative, got {}",
                    tolerance
                ));
            }
        }
        Ok(())
    }
}

impl Default for Recognizer {
    fn default() -> Self {
        Recognizer {
            tolerance: 0.05,
            perimeter_tolerance: 0.15,
            optimizer: Recognizer::default_optimizer(),
        }
    }
}

impl Recognizer {
    /// Fit residuals never reach zero on a hand-drawn stroke, so the search
    /// mostly runs to its iteration cap.
    pub fn default_optimizer() -> NelderMead {
        NelderMead {
            max_iterations: 5_000,
            tolerance: 1e-9,
            ..NelderMead::default()
        }
    }

    /// Fits every kind of primitive the path has enough points for, simplest first.
    pub fn candidates(&self, path: &Path) -> Result<Vec<Fit>> {
        path.require(ShapeKind::Line.min_points())?;
        ShapeKind::ALL
            .iter()
            .filter(|kind| path.len() >= kind.min_points())
            .map(|&kind| fit(kind, path, &self.optimizer))
            .collect()
    }

    pub fn accepts(&self, fit: &Fit) -> bool {
        fit.relative_error <= self.tolerance && fit.perimeter_mismatch <= self.perimeter_tolerance
    }

    /// The accepted candidate with the smallest relative error, if any.
    /// On a tie the simpler primitive wins.
    pub fn recognize(&self, path: &Path) -> Result<Option<Fit>> {
        let mut accepted = Vec::new();
        for fit in self.candidates(path)? {
            if self.accepts(&fit) {
                accepted.push(fit);
            } else {
                debug!(
                    "rejected {}: relative error {:.4}, perimeter mismatch {:.4}",
                    fit.kind(),
                    fit.relative_error,
                    fit.perimeter_mismatch
                );
            }
        }

        let best = accepted.into_iter().min_by(|a, b| {
            a.relative_error
                .partial_cmp(&b.relative_error)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if let Some(fit) = &best {
            trace!("recognized {} with relative error {}", fit.kind(), fit.relative_error);
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::error::Error;
    use crate::shape::Shape;
    use std::f64::consts::PI;

    fn arc(radius: f64, sweep: f64, count: usize) -> Path {
        let points: Vec<[f64; 2]> = (0..=count)
            .map(|i| {
                let t = sweep * i as f64 / count as f64;
                [radius * t.cos(), radius * t.sin()]
            })
            .collect();
        Path::from_points(&points)
    }

    #[test]
    fn defaults() {
        let built = RecognizerBuilder::default().build().unwrap();
        assert_eq!(built, Recognizer::default());
        assert_eq!(built.optimizer.max_iterations, 5_000);
    }

    #[test]
    fn rejects_negative_tolerance() {
        assert!(RecognizerBuilder::default().tolerance(-0.1).build().is_err());
        assert!(RecognizerBuilder::default()
            .perimeter_tolerance(f64::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn recognizes_a_line() {
        let points: Vec<[f64; 2]> = (0..=30).map(|i| [i as f64 * 3.0, -(i as f64)]).collect();
        let path = Path::from_points(&points);
        let fit = Recognizer::default().recognize(&path).unwrap().unwrap();
        assert_eq!(fit.kind(), ShapeKind::Line);
    }

    #[test]
    fn recognizes_a_circle() {
        let fit = Recognizer::default()
            .recognize(&arc(50.0, 2.0 * PI, 64))
            .unwrap()
            .unwrap();
        assert_eq!(fit.kind(), ShapeKind::Circle);
        if let Shape::Circle { radius, .. } = fit.shape {
            assert!((radius - 50.0).abs() < 0.5);
        }
    }

    #[test]
    fn recognizes_a_rectangle() {
        let corners = [[10.0, 10.0], [90.0, 10.0], [90.0, 50.0], [10.0, 50.0], [10.0, 10.0]];
        let mut points = Vec::new();
        for pair in corners.windows(2) {
            for k in 0..8 {
                let t = k as f64 / 8.0;
                points.push([
                    pair[0][0] + t * (pair[1][0] - pair[0][0]),
                    pair[0][1] + t * (pair[1][1] - pair[0][1]),
                ]);
            }
        }
        points.push([10.0, 10.0]);

        let fit = Recognizer::default()
            .recognize(&Path::from_points(&points))
            .unwrap()
            .unwrap();
        assert_eq!(fit.kind(), ShapeKind::Rectangle);
    }

    #[test]
    fn arc_is_not_a_circle() {
        let recognizer = Recognizer::default();
        let path = arc(50.0, PI, 32);

        let candidates = recognizer.candidates(&path).unwrap();
        assert_eq!(candidates.len(), 3);
        let circle = &candidates[1];
        assert_eq!(circle.kind(), ShapeKind::Circle);
        // the points sit on the circle, but only half of it was drawn
        assert!(circle.relative_error < 0.01);
        assert!(circle.perimeter_mismatch > 0.15);
        assert!(!recognizer.accepts(circle));

        assert_eq!(recognizer.recognize(&path).unwrap(), None);
    }

    #[test]
    fn short_paths() {
        let recognizer = Recognizer::default();
        let single = Path::from_points(&[[1.0, 1.0]]);
        assert_eq!(
            recognizer.recognize(&single).unwrap_err(),
            Error::PathTooShort { needed: 2, got: 1 }
        );

        let two = Path::from_points(&[[0.0, 0.0], [4.0, 0.0]]);
        let candidates = recognizer.candidates(&two).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind(), ShapeKind::Line);

        let dot = Path::from_points(&[[2.0, 2.0], [2.0, 2.0]]);
        assert_eq!(recognizer.recognize(&dot).unwrap_err(), Error::DegeneratePath);
    }
}
