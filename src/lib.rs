//! Derivative-free minimization with the Nelder-Mead simplex method, and
//! fitting of lines, circles and rectangles to freehand strokes on top of it.
//!
//! The minimizer only needs a cost function `FnMut(ArrayView1<f64>) -> f64`
//! and a starting point. It never fails: a search that runs out of iterations
//! returns the best point found, and the caller judges it by its cost.
//!
//! ```
//! use simplex_fit::shape::{Path, Recognizer, ShapeKind};
//!
//! let points: Vec<[f64; 2]> = (0..=20).map(|i| [i as f64, 2.0 * i as f64]).collect();
//! let fit = Recognizer::default()
//!     .recognize(&Path::from_points(&points))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(fit.kind(), ShapeKind::Line);
//! ```

pub mod error;
pub mod minimizer;
pub mod shape;
pub mod utils;
pub mod vector;

pub use crate::error::{Error, Result};
pub use crate::minimizer::{Minimizer, Solution, Status};
