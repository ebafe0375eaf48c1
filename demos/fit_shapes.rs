extern crate simplex_fit;

use std::f64::consts::PI;

use simplex_fit::shape::{Path, Recognizer};

fn stroke<F: Fn(f64) -> [f64; 2]>(count: usize, f: F) -> Path {
    let points: Vec<[f64; 2]> = (0..=count)
        .map(|i| {
            let t = i as f64 / count as f64;
            let [x, y] = f(t);
            // a shaky hand
            [x + 0.8 * (i as f64 * 12.9898).sin(), y + 0.8 * (i as f64 * 78.233).sin()]
        })
        .collect();
    Path::from_points(&points)
}

fn main() {
    let recognizer = Recognizer::default();
    let strokes = vec![
        ("diagonal", stroke(40, |t| [10.0 + 120.0 * t, 20.0 + 70.0 * t])),
        ("loop", stroke(64, |t| {
            let a = 2.0 * PI * t;
            [60.0 + 45.0 * a.cos(), 60.0 + 45.0 * a.sin()]
        })),
        ("arc", stroke(32, |t| {
            let a = PI * t;
            [60.0 + 45.0 * a.cos(), 60.0 + 45.0 * a.sin()]
        })),
        ("box", stroke(80, |t| {
            let s = 4.0 * t;
            match s as usize {
                0 => [100.0 * s, 0.0],
                1 => [100.0, 50.0 * (s - 1.0)],
                2 => [100.0 - 100.0 * (s - 2.0), 50.0],
                _ => [0.0, 50.0 - 50.0 * (s - 3.0).min(1.0)],
            }
        })),
    ];

    for (name, path) in &strokes {
        match recognizer.recognize(path) {
            Ok(Some(fit)) => println!(
                "{:<9} -> {:?} (relative error {:.4}, {} iterations)",
                name, fit.shape, fit.relative_error, fit.solution.iterations
            ),
            Ok(None) => println!("{:<9} -> no shape", name),
            Err(e) => println!("{:<9} -> {}", name, e),
        }
    }
}
