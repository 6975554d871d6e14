//! Downhill simplex method

use super::{max_abs, Evaluator, Limits};
use crate::{ConvergenceStatus, Method, OptimizeResult};

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Relative perturbation of non-zero start coordinates
const NONZERO_DELTA: f64 = 0.05;
/// Absolute perturbation of zero start coordinates
const ZERO_DELTA: f64 = 0.000_25;

pub(crate) fn run(eval: &mut Evaluator<'_>, x0: Vec<f64>, limits: &Limits) -> OptimizeResult {
    let n = x0.len();

    let mut simplex = Vec::with_capacity(n + 1);
    simplex.push(x0.clone());
    for k in 0..n {
        let mut vertex = x0.clone();
        vertex[k] = if vertex[k] != 0.0 {
            (1.0 + NONZERO_DELTA) * vertex[k]
        } else {
            ZERO_DELTA
        };
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| eval.eval(v)).collect();
    sort_simplex(&mut simplex, &mut values);

    let mut nit = 0;
    let status = loop {
        let x_spread = max_abs(
            simplex[1..]
                .iter()
                .flat_map(|v| v.iter().zip(&simplex[0]).map(|(a, b)| a - b)),
        );
        let f_spread = max_abs(values[1..].iter().map(|f| f - values[0]));
        if x_spread <= limits.xtol && f_spread <= limits.ftol {
            break ConvergenceStatus::Converged;
        }
        if nit >= limits.max_iter {
            break ConvergenceStatus::MaxIterations;
        }
        if eval.nfev >= limits.max_fev {
            break ConvergenceStatus::MaxEvaluations;
        }

        let centroid: Vec<f64> = (0..n)
            .map(|j| simplex[..n].iter().map(|v| v[j]).sum::<f64>() / n as f64)
            .collect();
        let worst = simplex[n].clone();
        // centroid + t * (centroid - worst)
        let toward = |t: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&worst)
                .map(|(c, w)| c + t * (c - w))
                .collect()
        };

        let reflected = toward(REFLECT);
        let f_reflected = eval.eval(&reflected);
        let mut shrink = false;

        if f_reflected < values[0] {
            let expanded = toward(REFLECT * EXPAND);
            let f_expanded = eval.eval(&expanded);
            if f_expanded < f_reflected {
                simplex[n] = expanded;
                values[n] = f_expanded;
            } else {
                simplex[n] = reflected;
                values[n] = f_reflected;
            }
        } else if f_reflected < values[n - 1] {
            simplex[n] = reflected;
            values[n] = f_reflected;
        } else if f_reflected < values[n] {
            let outside = toward(CONTRACT * REFLECT);
            let f_outside = eval.eval(&outside);
            if f_outside <= f_reflected {
                simplex[n] = outside;
                values[n] = f_outside;
            } else {
                shrink = true;
            }
        } else {
            let inside = toward(-CONTRACT);
            let f_inside = eval.eval(&inside);
            if f_inside < values[n] {
                simplex[n] = inside;
                values[n] = f_inside;
            } else {
                shrink = true;
            }
        }

        if shrink {
            let best = simplex[0].clone();
            for j in 1..=n {
                simplex[j] = best
                    .iter()
                    .zip(&simplex[j])
                    .map(|(b, v)| b + SHRINK * (v - b))
                    .collect();
                values[j] = eval.eval(&simplex[j]);
            }
        }

        sort_simplex(&mut simplex, &mut values);
        nit += 1;
    };

    let fun = values[0];
    let x = simplex.swap_remove(0);
    OptimizeResult::new(Method::NelderMead, x, fun, nit, eval.nfev, status)
}

/// Order vertices from best to worst
fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}
