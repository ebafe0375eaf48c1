//! This implementation of Nelder-Mead follows the textbook decision tree of
//! reflection, expansion, outside and inside contraction, and shrinkage.
//! The `adaptive` option switches to the dimension-dependent coefficients of
//!
//! Gao, F and Han, L. Implementing the Nelder-Mead simplex algorithm with
//! adaptive parameters. 2012. Computational Optimization and Applications.
//! 51:1, pp 259--277
//!
//! # Use case
//!
//! The Nelder-Mead algorithm does not require a gradient or a hessian.
//! As a tradeoff it typically requires a lot of function evaluations to
//! find a minimum. Further, there are few theoretical results on the
//! convergence of Nelder-Mead iterations.
//!
//! The search stops once the best cost drops below `tolerance`, so it is
//! suited to cost functions whose minimum is known to be near zero, such as
//! residuals of a fit. Otherwise it runs until `max_iterations`.
//!
//! # Examples
//!
//! ```
//! # use ndarray::prelude::*;
//! # use simplex_fit::vector::NelderMeadBuilder;
//!
//! let function = |x: ArrayView1<f64>| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2);
//! let minimizer = NelderMeadBuilder::default()
//!     .tolerance(1e-8)
//!     .build()
//!     .unwrap();
//! let args = Array::from_vec(vec![0.0, 0.0]);
//! let res = minimizer.minimize(function, args.view());
//! assert!(res.converged());
//! assert!((res.variables[0] - 3.0).abs() < 1e-3);
//! ```

use derive_builder::Builder;
use log::debug;
use ndarray::prelude::*;

use super::observe::{Event, LogObserver, Observer, Operation};
use super::simplex::Simplex;
use crate::error::Result;
use crate::minimizer::{Minimizer, Solution, Status};
use crate::utils::WrappedFunction;

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
/// A minimizer for a scalar function of one or more variables using the Nelder-Mead algorithm.
pub struct NelderMead {
    /// The maximum number of iterations. Checked before each iteration, so the
    /// reported iteration count never exceeds it.
    #[builder(default = "10_000")]
    pub max_iterations: usize,

    /// The search stops as soon as the best cost is below this value.
    #[builder(default = "1e-3")]
    pub tolerance: f64,

    /// Reflection coefficient.
    #[builder(default = "1.0")]
    pub rho: f64,

    /// Expansion coefficient.
    #[builder(default = "2.0")]
    pub chi: f64,

    /// Contraction coefficient.
    #[builder(default = "0.5")]
    pub gamma: f64,

    /// Shrinkage coefficient.
    #[builder(default = "0.5")]
    pub sigma: f64,

    /// Adapt algorithm parameters to dimensionality of the problem, ignoring `rho`, `chi`,
    /// `gamma` and `sigma`. Useful for high-dimensional minimization.
    #[builder(default = "false")]
    pub adaptive: bool,

    /// Log every iteration at `debug` level. Does not change the result.
    /// Only read by the entry points that pick their own observer, not by
    /// [`minimize_observed`](NelderMead::minimize_observed).
    #[builder(default = "false")]
    pub debug: bool,
}

impl NelderMeadBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(rho) = self.rho {
            if !(rho > 0.0) {
                return Err(format!("reflection coefficient must be positive, got {}", rho));
            }
        }
        if let Some(chi) = self.chi {
            if !(chi > 1.0) {
                return Err(format!("expansion coefficient must exceed 1, got {}", chi));
            }
        }
        if let Some(gamma) = self.gamma {
            if !(gamma > 0.0 && gamma < 1.0) {
                return Err(format!("contraction coefficient must be in (0, 1), got {}", gamma));
            }
        }
        if let Some(sigma) = self.sigma {
            if !(sigma > 0.0 && sigma < 1.0) {
                return Err(format!("shrink coefficient must be in (0, 1), got {}", sigma));
            }
        }
        if let Some(tolerance) = self.tolerance {
            if tolerance.is_nan() {
                return Err("tolerance must not be NaN".to_string());
            }
        }
        Ok(())
    }
}

impl Default for NelderMead {
    fn default() -> Self {
        NelderMead {
            max_iterations: 10_000,
            tolerance: 1e-3,
            rho: 1.0,
            chi: 2.0,
            gamma: 0.5,
            sigma: 0.5,
            adaptive: false,
            debug: false,
        }
    }
}

impl NelderMead {
    /// Search for the value minimizing `func` given an initial guess
    /// in the form of a point. The initial simplex uses the step sizes of
    /// [`default_step_sizes`](crate::utils::default_step_sizes).
    pub fn minimize<F>(&self, func: F, x0: ArrayView1<f64>) -> Solution
    where
        F: FnMut(ArrayView1<f64>) -> f64,
    {
        self.minimize_simplex(func, Simplex::around(x0))
    }

    /// Like [`minimize`](Self::minimize), with explicit per-dimension step sizes.
    pub fn minimize_with_steps<F>(
        &self,
        func: F,
        x0: ArrayView1<f64>,
        steps: ArrayView1<f64>,
    ) -> Result<Solution>
    where
        F: FnMut(ArrayView1<f64>) -> f64,
    {
        let simplex = Simplex::new(x0, steps)?;
        Ok(self.minimize_simplex(func, simplex))
    }

    /// Search for the value minimizing `func` starting from an unevaluated simplex.
    pub fn minimize_simplex<F>(&self, func: F, simplex: Simplex) -> Solution
    where
        F: FnMut(ArrayView1<f64>) -> f64,
    {
        if self.debug {
            self.minimize_observed(func, simplex, LogObserver)
        } else {
            self.minimize_observed(func, simplex, ())
        }
    }

    /// The main loop. `observer` sees an [`Event`] after every iteration.
    /// The `debug` flag is ignored here; pass a [`LogObserver`] for the same trace.
    pub fn minimize_observed<F, Obs>(&self, func: F, mut simplex: Simplex, mut observer: Obs) -> Solution
    where
        F: FnMut(ArrayView1<f64>) -> f64,
        Obs: for<'a> Observer<Event<'a>>,
    {
        let mut func = WrappedFunction::new(func);
        let n = simplex.dim();
        let (rho, chi, gamma, sigma) = self.coefficients(n);

        simplex.evaluate(|x| func.call(x));

        let mut centroid = simplex.centroid();
        let mut reflected = Array1::zeros(n);
        let mut trial = Array1::zeros(n);
        let mut iterations = 0;

        while !self.finished(&simplex, iterations) {
            simplex.reflect_into(&centroid, rho, &mut reflected);
            let f_reflected = func.call(reflected.view());

            let operation = if f_reflected < simplex.best().cost {
                // try expanding beyond the reflected point
                simplex.reflect_into(&centroid, rho * chi, &mut trial);
                let f_expanded = func.call(trial.view());
                if f_expanded < f_reflected {
                    simplex.replace_worst(&mut trial, f_expanded);
                    Operation::Expand
                } else {
                    simplex.replace_worst(&mut reflected, f_reflected);
                    Operation::Reflect
                }
            } else if f_reflected < simplex.second_worst().cost {
                simplex.replace_worst(&mut reflected, f_reflected);
                Operation::Reflect
            } else if f_reflected < simplex.worst().cost {
                simplex.reflect_into(&centroid, rho * gamma, &mut trial);
                let f_contracted = func.call(trial.view());
                if f_contracted <= f_reflected {
                    simplex.replace_worst(&mut trial, f_contracted);
                    Operation::ContractOutside
                } else {
                    Operation::Shrink
                }
            } else {
                simplex.reflect_into(&centroid, -gamma, &mut trial);
                let f_contracted = func.call(trial.view());
                if f_contracted < simplex.worst().cost {
                    simplex.replace_worst(&mut trial, f_contracted);
                    Operation::ContractInside
                } else {
                    Operation::Shrink
                }
            };

            if operation == Operation::Shrink {
                simplex.shrink(sigma);
                simplex.evaluate(|x| func.call(x));
            }
            simplex.centroid_into(&mut centroid);
            iterations += 1;

            observer.observe(&Event {
                iteration: iterations,
                operation,
                best_cost: simplex.best().cost,
                simplex: &simplex,
            });
        }

        let best = simplex.best();
        let status = if best.cost < self.tolerance {
            Status::Converged
        } else {
            Status::MaxIterationsReached
        };
        debug!(
            "nelder-mead stopped after {} iterations and {} evaluations: {:?}, cost {}",
            iterations, func.num, status, best.cost
        );
        Solution {
            variables: best.coords.clone(),
            cost: best.cost,
            iterations,
            evaluations: func.num,
            status,
        }
    }

    /// Resolves the coefficients `(rho, chi, gamma, sigma)` for an `n`-dimensional problem.
    #[inline]
    fn coefficients(&self, n: usize) -> (f64, f64, f64, f64) {
        if self.adaptive {
            // sigma would be 0 in one dimension
            let dim = n.max(2) as f64;
            (1.0, 1.0 + 2.0 / dim, 0.75 - 1.0 / (2.0 * dim), 1.0 - 1.0 / dim)
        } else {
            (self.rho, self.chi, self.gamma, self.sigma)
        }
    }

    #[inline]
    fn finished(&self, simplex: &Simplex, iterations: usize) -> bool {
        simplex.dim() == 0
            || iterations >= self.max_iterations
            || simplex.best().cost < self.tolerance
    }
}

impl Minimizer for NelderMead {
    fn minimize<F>(&self, func: F, args: ArrayView1<f64>) -> Solution
    where
        F: FnMut(ArrayView1<f64>) -> f64,
    {
        NelderMead::minimize(self, func, args)
    }
}
