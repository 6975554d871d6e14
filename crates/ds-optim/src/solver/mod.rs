//! The optimizer behind [`crate::minimize`]
//!
//! Every method works on a flat `&[f64]` point and counts objective
//! evaluations. A NaN objective value is treated as `+∞` so the methods
//! move away from it.

mod bfgs;
mod line_search;
mod nelder_mead;
mod powell;

use crate::{Method, MinimizeOptions, OptimError, OptimizeResult};

/// Minimize `objective` starting from `x0`.
///
/// The method comes from `options.method`, defaulting to [`Method::Bfgs`].
pub fn minimize<F>(objective: F, x0: &[f64], options: &MinimizeOptions) -> Result<OptimizeResult, OptimError>
where
    F: Fn(&[f64]) -> f64,
{
    if x0.is_empty() {
        return Err(OptimError::EmptyStart);
    }
    if x0.iter().any(|v| !v.is_finite()) {
        return Err(OptimError::NonFiniteStart(x0.to_vec()));
    }
    options.validate()?;

    let method = options.method.unwrap_or_default();
    let limits = Limits::new(method, x0.len(), options);
    tracing::debug!(%method, dims = x0.len(), ?limits, "starting minimization");

    let mut eval = Evaluator::new(&objective);
    let result = match method {
        Method::Powell => powell::run(&mut eval, x0.to_vec(), &limits),
        Method::NelderMead => nelder_mead::run(&mut eval, x0.to_vec(), &limits),
        Method::Bfgs => bfgs::run(&mut eval, x0.to_vec(), &limits),
    };

    tracing::info!(
        %method,
        success = result.success,
        fun = result.fun,
        nit = result.nit,
        nfev = result.nfev,
        "minimization finished"
    );
    Ok(result)
}

/// Resolved stopping criteria
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub max_iter: usize,
    pub max_fev: usize,
    pub xtol: f64,
    pub ftol: f64,
    pub gtol: f64,
}

impl Limits {
    fn new(method: Method, n: usize, options: &MinimizeOptions) -> Self {
        Self {
            max_iter: options.max_iter.unwrap_or_else(|| method.default_max_iter(n)),
            max_fev: options.max_fev.unwrap_or_else(|| method.default_max_fev(n)),
            xtol: options.xtol(),
            ftol: options.ftol(),
            gtol: options.gtol(),
        }
    }
}

/// Objective wrapper that counts calls
pub(crate) struct Evaluator<'a> {
    objective: &'a dyn Fn(&[f64]) -> f64,
    pub nfev: usize,
}

impl<'a> Evaluator<'a> {
    fn new(objective: &'a dyn Fn(&[f64]) -> f64) -> Self {
        Self { objective, nfev: 0 }
    }

    pub fn eval(&mut self, x: &[f64]) -> f64 {
        self.nfev += 1;
        let value = (self.objective)(x);
        if value.is_nan() {
            f64::INFINITY
        } else {
            value
        }
    }
}

/// `x + alpha * d`
pub(crate) fn step_along(x: &[f64], d: &[f64], alpha: f64) -> Vec<f64> {
    x.iter().zip(d).map(|(xi, di)| xi + alpha * di).collect()
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn max_abs(v: impl IntoIterator<Item = f64>) -> f64 {
    v.into_iter().fold(0.0, |m, x| m.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvergenceStatus;

    fn rosenbrock(x: &[f64]) -> f64 {
        (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
    }

    fn assert_near(actual: &[f64], expected: &[f64], tol: f64) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < tol, "{actual:?} is not within {tol} of {expected:?}");
        }
    }

    #[test]
    fn test_every_method_solves_a_quadratic() {
        let bowl = |x: &[f64]| (x[0] - 1.0).powi(2) + 2.0 * (x[1] + 0.5).powi(2) + 0.5 * (x[0] - x[1]).powi(2);
        // minimum of the bowl solves the normal equations
        let expected = [4.0 / 7.0, -2.0 / 7.0];
        for method in [Method::Powell, Method::NelderMead, Method::Bfgs] {
            let options = MinimizeOptions::default().with_method(method);
            let result = minimize(bowl, &[3.0, 3.0], &options).unwrap();
            assert_eq!(result.status, ConvergenceStatus::Converged, "{method}");
            assert_eq!(result.method, method);
            assert_near(&result.x, &expected, 1e-3);
        }
    }

    #[test]
    fn test_rosenbrock_nelder_mead() {
        let options = MinimizeOptions::default().with_method(Method::NelderMead);
        let result = minimize(rosenbrock, &[-1.2, 1.0], &options).unwrap();
        assert!(result.success);
        assert_near(&result.x, &[1.0, 1.0], 1e-3);
        assert!(result.fun < 1e-6);
    }

    #[test]
    fn test_rosenbrock_bfgs() {
        let result = minimize(rosenbrock, &[-1.2, 1.0], &MinimizeOptions::default()).unwrap();
        assert_eq!(result.method, Method::Bfgs);
        assert!(result.success, "{result}");
        assert_near(&result.x, &[1.0, 1.0], 1e-3);
    }

    #[test]
    fn test_iteration_cap_is_reported() {
        let options = MinimizeOptions::default().with_method(Method::NelderMead).with_max_iter(3);
        let result = minimize(rosenbrock, &[-1.2, 1.0], &options).unwrap();
        assert_eq!(result.status, ConvergenceStatus::MaxIterations);
        assert!(!result.success);
        assert_eq!(result.nit, 3);
    }

    #[test]
    fn test_counts_evaluations() {
        let calls = std::cell::Cell::new(0);
        let counted = |x: &[f64]| {
            calls.set(calls.get() + 1);
            x[0] * x[0]
        };
        let result = minimize(counted, &[2.0], &MinimizeOptions::default()).unwrap();
        assert_eq!(result.nfev, calls.get());
    }

    #[test]
    fn test_rejects_bad_start() {
        let f = |x: &[f64]| x[0];
        let options = MinimizeOptions::default();
        assert_eq!(minimize(f, &[], &options), Err(OptimError::EmptyStart));
        assert!(matches!(
            minimize(f, &[f64::NAN], &options),
            Err(OptimError::NonFiniteStart(_))
        ));
    }
}
