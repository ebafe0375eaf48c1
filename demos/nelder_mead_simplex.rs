extern crate ndarray;
extern crate simplex_fit;

use ndarray::prelude::*;
use simplex_fit::vector::{Event, NelderMeadBuilder, Simplex};

fn main() {
    let nm = NelderMeadBuilder::default()
        .tolerance(1e-9)
        .max_iterations(5000usize)
        .build()
        .unwrap();
    let n = 5;
    let f = |x: ArrayView1<f64>| (&x - 0.5).mapv(|xi| xi * xi).sum();

    // Here we choose the origin and the unit vectors as initial vertices.
    let mut x: Array2<f64> = Array2::zeros((n + 1, n));
    x.slice_mut(s![1.., ..]).assign(&Array::eye(n));
    let simplex = Simplex::from_array(x.view()).unwrap();

    let res = nm.minimize_observed(f, simplex, |event: &Event<'_>| {
        if event.iteration % 50 == 0 {
            println!("{:>5} {:<16} {:e}", event.iteration, event.operation, event.best_cost);
        }
    });

    println!("{:?}", res.status);
    println!("{}", res.variables);
}
