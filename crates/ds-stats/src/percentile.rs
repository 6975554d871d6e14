//! Nearest-rank percentile estimation

use std::cmp::Ordering;

use crate::StatsError;

/// Returns the `p`th percentile of `arr`: the smallest value that is at least
/// as great as `p`% of the values.
///
/// Uses the nearest-rank convention with a ceiling, so for `[1, 3, 5, 9]`
/// `p = 75` selects `5` while `p = 75.1` already selects `9`. `p = 0` is the
/// minimum. The input is not modified.
///
/// ```
/// use ds_stats::percentile;
///
/// assert_eq!(percentile(74.9, &[1, 3, 5, 9]).unwrap(), 5);
/// assert_eq!(percentile(75.0, &[1, 3, 5, 9]).unwrap(), 5);
/// assert_eq!(percentile(75.1, &[1, 3, 5, 9]).unwrap(), 9);
/// ```
pub fn percentile<T>(p: f64, arr: &[T]) -> Result<T, StatsError>
where
    T: Copy + PartialOrd,
{
    if p == 0.0 {
        return minimum(arr);
    }
    check_percent(p)?;
    if arr.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let rank = ((p / 100.0) * arr.len() as f64).ceil() as usize;

    let mut sorted = arr.to_vec();
    sorted.sort_by(compare);

    // rank is in 1..=len for any accepted p; max(1) covers subnormal p
    let index = rank.max(1).min(sorted.len()) - 1;
    tracing::trace!(p, rank, len = sorted.len(), "selected percentile rank");
    Ok(sorted[index])
}

/// Computes `percentile(x, arr)` for every `x` in `ps`, preserving order.
pub fn percentiles<T>(ps: &[f64], arr: &[T]) -> Result<Vec<T>, StatsError>
where
    T: Copy + PartialOrd,
{
    ps.iter().map(|&p| percentile(p, arr)).collect()
}

/// A percentile estimator bound to a fixed `p`.
///
/// Each estimator is independent; applying it to an array gives the same
/// result as calling [`percentile`] directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentile {
    p: f64,
}

impl Percentile {
    /// Create an estimator for the `p`th percentile
    pub fn new(p: f64) -> Result<Self, StatsError> {
        if p != 0.0 {
            check_percent(p)?;
        }
        Ok(Self { p })
    }

    /// The bound percent
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Estimate the bound percentile of `arr`
    pub fn of<T>(&self, arr: &[T]) -> Result<T, StatsError>
    where
        T: Copy + PartialOrd,
    {
        percentile(self.p, arr)
    }
}

/// An estimator bound to several percents at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    ps: Vec<f64>,
}

impl Percentiles {
    pub fn new(ps: impl Into<Vec<f64>>) -> Result<Self, StatsError> {
        let ps = ps.into();
        for &p in &ps {
            Percentile::new(p)?;
        }
        Ok(Self { ps })
    }

    pub fn ps(&self) -> &[f64] {
        &self.ps
    }

    pub fn of<T>(&self, arr: &[T]) -> Result<Vec<T>, StatsError>
    where
        T: Copy + PartialOrd,
    {
        percentiles(&self.ps, arr)
    }
}

fn check_percent(p: f64) -> Result<(), StatsError> {
    // NaN fails both comparisons
    if p > 0.0 && p <= 100.0 {
        Ok(())
    } else {
        Err(StatsError::NotAPercent(p))
    }
}

fn minimum<T>(arr: &[T]) -> Result<T, StatsError>
where
    T: Copy + PartialOrd,
{
    arr.iter()
        .copied()
        .min_by(compare)
        .ok_or(StatsError::EmptyInput)
}

/// Total order over `PartialOrd` values: values that do not compare equal to
/// themselves (NaN) sort after every other value.
fn compare<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    match a.partial_cmp(b) {
        Some(ordering) => ordering,
        None => unordered(a).cmp(&unordered(b)),
    }
}

fn unordered<T: PartialOrd>(x: &T) -> bool {
    x.partial_cmp(x).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARR: [i64; 4] = [1, 3, 5, 9];

    #[test]
    fn test_ceiling_rank() {
        assert_eq!(percentile(74.9, &ARR).unwrap(), 5);
        assert_eq!(percentile(75.0, &ARR).unwrap(), 5);
        assert_eq!(percentile(75.1, &ARR).unwrap(), 9);
        assert_eq!(percentile(25.0, &ARR).unwrap(), 1);
        assert_eq!(percentile(50.0, &ARR).unwrap(), 3);
    }

    #[test]
    fn test_extremes() {
        let values = [4.5, -2.0, 10.25, 3.0, 0.5];
        assert_eq!(percentile(0.0, &values).unwrap(), -2.0);
        assert_eq!(percentile(100.0, &values).unwrap(), 10.25);
        assert_eq!(percentile(1e-9, &values).unwrap(), -2.0);
    }

    #[test]
    fn test_unsorted_input_is_not_mutated() {
        let values = vec![9, 1, 5, 3];
        assert_eq!(percentile(75.0, &values).unwrap(), 5);
        assert_eq!(values, vec![9, 1, 5, 3]);
    }

    #[test]
    fn test_rejects_non_percent() {
        for p in [-1.0, 150.0, 100.5, -0.001, f64::NAN] {
            let err = percentile(p, &ARR).unwrap_err();
            assert!(matches!(err, StatsError::NotAPercent(_)));
            assert!(err.to_string().starts_with("Percentile requires a percent"));
        }
    }

    #[test]
    fn test_empty_input() {
        let empty: [f64; 0] = [];
        assert_eq!(percentile(50.0, &empty), Err(StatsError::EmptyInput));
        assert_eq!(percentile(0.0, &empty), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_nan_values_sort_last() {
        let values: Vec<f64> = (0..40)
            .map(|i| if i % 3 == 0 { f64::NAN } else { i as f64 })
            .collect();
        // 26 numbers precede the 14 NaNs; rank 20 is the 20th number
        assert_eq!(percentile(50.0, &values).unwrap(), 29.0);
        assert_eq!(percentile(0.0, &values).unwrap(), 1.0);
        assert!(percentile(100.0, &values).unwrap().is_nan());

        let long: Vec<f64> = (0..1000)
            .map(|i| if i % 7 == 0 { f64::NAN } else { (i % 13) as f64 })
            .collect();
        assert!(percentile(10.0, &long).is_ok());
    }

    #[test]
    fn test_vector_of_percents() {
        let result = percentiles(&[25.0, 75.1], &ARR).unwrap();
        assert_eq!(result, vec![1, 9]);
        assert_eq!(
            result,
            vec![percentile(25.0, &ARR).unwrap(), percentile(75.1, &ARR).unwrap()]
        );
        assert!(percentiles(&[50.0, 101.0], &ARR).is_err());
    }

    #[test]
    fn test_bound_estimator_matches_direct_call() {
        let p75 = Percentile::new(75.0).unwrap();
        assert_eq!(p75.p(), 75.0);
        assert_eq!(p75.of(&ARR).unwrap(), percentile(75.0, &ARR).unwrap());

        let other = [2.0, 8.0, 4.0];
        assert_eq!(p75.of(&other).unwrap(), percentile(75.0, &other).unwrap());

        assert!(Percentile::new(0.0).is_ok());
        assert!(Percentile::new(-5.0).is_err());
    }

    #[test]
    fn test_bound_vector_estimator() {
        let quartiles = Percentiles::new(vec![25.0, 50.0, 75.0]).unwrap();
        assert_eq!(quartiles.of(&ARR).unwrap(), vec![1, 3, 5]);
        assert!(Percentiles::new(vec![10.0, 200.0]).is_err());
    }
}
