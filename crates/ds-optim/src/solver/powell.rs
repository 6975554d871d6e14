//! Powell's conjugate direction method

use super::line_search::{bracket, brent};
use super::{max_abs, step_along, Evaluator, Limits};
use crate::{ConvergenceStatus, Method, OptimizeResult};

const TINY: f64 = 1e-25;

pub(crate) fn run(eval: &mut Evaluator<'_>, x0: Vec<f64>, limits: &Limits) -> OptimizeResult {
    let n = x0.len();
    let mut x = x0;
    let mut fx = eval.eval(&x);
    let mut directions: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();
    let mut nit = 0;

    let status = loop {
        let x_start = x.clone();
        let f_start = fx;
        let mut biggest_drop = 0.0;
        let mut biggest_index = 0;

        for (i, direction) in directions.iter().enumerate() {
            let before = fx;
            (x, fx) = line_minimize(eval, &x, fx, direction, limits.xtol);
            if before - fx > biggest_drop {
                biggest_drop = before - fx;
                biggest_index = i;
            }
        }
        nit += 1;

        if 2.0 * (f_start - fx) <= limits.ftol * (f_start.abs() + fx.abs()) + TINY {
            break ConvergenceStatus::Converged;
        }
        if eval.nfev >= limits.max_fev {
            break ConvergenceStatus::MaxEvaluations;
        }
        if nit >= limits.max_iter {
            break ConvergenceStatus::MaxIterations;
        }

        let shift: Vec<f64> = x.iter().zip(&x_start).map(|(a, b)| a - b).collect();
        if max_abs(shift.iter().copied()) == 0.0 {
            continue;
        }
        let f_extrapolated = eval.eval(&step_along(&x, &shift, 1.0));
        if f_extrapolated < f_start {
            let t = 2.0 * (f_start - 2.0 * fx + f_extrapolated) * (f_start - fx - biggest_drop).powi(2)
                - biggest_drop * (f_start - f_extrapolated).powi(2);
            if t < 0.0 {
                (x, fx) = line_minimize(eval, &x, fx, &shift, limits.xtol);
                // the net shift replaces the direction of largest decrease
                directions.swap(biggest_index, n - 1);
                directions[n - 1] = shift;
            }
        }
    };

    OptimizeResult::new(Method::Powell, x, fx, nit, eval.nfev, status)
}

/// Minimize along `direction` from `x`, never returning a worse point
fn line_minimize(eval: &mut Evaluator<'_>, x: &[f64], fx: f64, direction: &[f64], tol: f64) -> (Vec<f64>, f64) {
    let mut along = |alpha: f64| eval.eval(&step_along(x, direction, alpha));
    let br = bracket(&mut along, 0.0, fx, 1.0);
    let (alpha, f_min) = brent(&mut along, br, tol);
    if f_min < fx {
        (step_along(x, direction, alpha), f_min)
    } else {
        (x.to_vec(), fx)
    }
}
