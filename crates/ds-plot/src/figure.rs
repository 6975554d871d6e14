//! Backend-independent description of a plot

use crate::config::Rgb;

/// A line drawn through sampled points
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub width: u32,
}

/// Which part of the distribution a filled region stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Between the lower and upper bound
    Interval,
    /// From the window's left edge up to the lower bound
    LeftTail,
}

/// Area under a curve filled down to zero over `[from, to]`
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRegion {
    pub kind: RegionKind,
    pub from: f64,
    pub to: f64,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
}

/// Everything a canvas needs to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub curves: Vec<Curve>,
    pub regions: Vec<FilledRegion>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    pub title_font_size: u32,
}

impl Figure {
    pub fn region(&self, kind: RegionKind) -> Option<&FilledRegion> {
        self.regions.iter().find(|r| r.kind == kind)
    }
}

/// Upper bound on the samples taken over one span
pub(crate) const MAX_SAMPLES: usize = 100_000;

/// `step`, widened so `[start, end]` takes at most [`MAX_SAMPLES`] samples
fn bounded_step(start: f64, end: f64, step: f64) -> f64 {
    step.max((end - start) / MAX_SAMPLES as f64)
}

/// Samples `[start, end)` every `step`, like `numpy.arange`. Very long spans
/// are sampled more coarsely.
pub(crate) fn arange(start: f64, end: f64, step: f64) -> Vec<f64> {
    let step = bounded_step(start, end, step);
    let count = ((end - start) / step).ceil().min(MAX_SAMPLES as f64);
    if !(count > 0.0) {
        return Vec::new();
    }
    (0..count as usize).map(|i| start + i as f64 * step).collect()
}

/// Samples `[start, end]` every `step`, always ending exactly at `end`
pub(crate) fn sample_closed(start: f64, end: f64, step: f64) -> Vec<f64> {
    let step = bounded_step(start, end, step);
    let mut xs = arange(start, end, step);
    // drop a sample that would land within rounding noise of `end`
    if xs.last().is_some_and(|&x| end - x < step * 1e-9) {
        xs.pop();
    }
    xs.push(end);
    xs
}
