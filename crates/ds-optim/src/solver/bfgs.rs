//! Quasi-Newton minimization with the BFGS inverse Hessian update
//!
//! The gradient is estimated by central differences, so each iteration costs
//! `2n` evaluations for the gradient plus those of the line search.

use super::line_search::backtrack;
use super::{dot, max_abs, step_along, Evaluator, Limits};
use crate::{ConvergenceStatus, Method, OptimizeResult};

pub(crate) fn run(eval: &mut Evaluator<'_>, x0: Vec<f64>, limits: &Limits) -> OptimizeResult {
    let n = x0.len();
    let mut x = x0;
    let mut fx = eval.eval(&x);
    let mut grad = gradient(eval, &x);
    let mut inverse_hessian = identity(n);
    let mut nit = 0;

    let status = loop {
        if max_abs(grad.iter().copied()) <= limits.gtol {
            break ConvergenceStatus::Converged;
        }
        if nit >= limits.max_iter {
            break ConvergenceStatus::MaxIterations;
        }
        if eval.nfev >= limits.max_fev {
            break ConvergenceStatus::MaxEvaluations;
        }

        let mut direction: Vec<f64> = mat_vec(&inverse_hessian, &grad).into_iter().map(|v| -v).collect();
        let mut slope = dot(&grad, &direction);
        if !(slope < 0.0) {
            // the approximation lost positive definiteness; restart from steepest descent
            inverse_hessian = identity(n);
            direction = grad.iter().map(|g| -g).collect();
            slope = dot(&grad, &direction);
        }

        let accepted = {
            let mut along = |alpha: f64| eval.eval(&step_along(&x, &direction, alpha));
            backtrack(&mut along, fx, slope)
        };
        let Some((alpha, f_next)) = accepted else {
            break ConvergenceStatus::Stalled;
        };

        let x_next = step_along(&x, &direction, alpha);
        let grad_next = gradient(eval, &x_next);
        let s: Vec<f64> = direction.iter().map(|d| alpha * d).collect();
        let y: Vec<f64> = grad_next.iter().zip(&grad).map(|(a, b)| a - b).collect();
        let sy = dot(&s, &y);

        if sy > 1e-12 {
            if nit == 0 {
                // scale the initial guess to the observed curvature
                inverse_hessian = scaled_identity(n, sy / dot(&y, &y));
            }
            update_inverse_hessian(&mut inverse_hessian, &s, &y, sy);
        }

        x = x_next;
        fx = f_next;
        grad = grad_next;
        nit += 1;
    };

    OptimizeResult::new(Method::Bfgs, x, fx, nit, eval.nfev, status)
}

/// Central-difference gradient
fn gradient(eval: &mut Evaluator<'_>, x: &[f64]) -> Vec<f64> {
    let base_step = f64::EPSILON.cbrt();
    let mut probe = x.to_vec();
    (0..x.len())
        .map(|i| {
            let h = base_step * x[i].abs().max(1.0);
            probe[i] = x[i] + h;
            let forward = eval.eval(&probe);
            probe[i] = x[i] - h;
            let backward = eval.eval(&probe);
            probe[i] = x[i];
            (forward - backward) / (2.0 * h)
        })
        .collect()
}

fn identity(n: usize) -> Vec<Vec<f64>> {
    scaled_identity(n, 1.0)
}

fn scaled_identity(n: usize, scale: f64) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { scale } else { 0.0 }).collect())
        .collect()
}

fn mat_vec(m: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    m.iter().map(|row| dot(row, v)).collect()
}

/// `H ← H - ρ(Hy sᵀ + s yᵀH) + (ρ² yᵀHy + ρ) s sᵀ` with `ρ = 1 / sᵀy`
fn update_inverse_hessian(h: &mut [Vec<f64>], s: &[f64], y: &[f64], sy: f64) {
    let rho = 1.0 / sy;
    let hy = mat_vec(h, y);
    let yhy = dot(y, &hy);
    let ss_scale = rho * rho * yhy + rho;
    for (i, row) in h.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell += ss_scale * s[i] * s[j] - rho * (hy[i] * s[j] + s[i] * hy[j]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_satisfies_secant_condition() {
        let mut h = identity(2);
        let s = [1.0, 0.5];
        let y = [2.0, 3.0];
        update_inverse_hessian(&mut h, &s, &y, dot(&s, &y));
        let hy = mat_vec(&h, &y);
        assert!((hy[0] - s[0]).abs() < 1e-12);
        assert!((hy[1] - s[1]).abs() < 1e-12);
    }
}
