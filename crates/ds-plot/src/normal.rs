//! Normal density curve with shaded cumulative areas

use statrs::distribution::{Continuous, Normal};

use crate::canvas::Canvas;
use crate::config::PlotConfig;
use crate::figure::{arange, sample_closed, Curve, Figure, FilledRegion, RegionKind};
use crate::PlotError;

/// A normal distribution plot with optional shading bounds.
///
/// With one bound the area between it and the window edge is shaded. With
/// both, the area between them is shaded and the tail left of `lbound` gets
/// a second, distinct fill.
#[derive(Debug, Clone)]
pub struct NormalCurve {
    mean: f64,
    sd: f64,
    lbound: Option<f64>,
    rbound: Option<f64>,
    config: PlotConfig,
    dist: Normal,
}

impl NormalCurve {
    pub fn new(mean: f64, sd: f64) -> Result<Self, PlotError> {
        let dist = Normal::new(mean, sd).map_err(|e| PlotError::Distribution(e.to_string()))?;
        Ok(Self {
            mean,
            sd,
            lbound: None,
            rbound: None,
            config: PlotConfig::default(),
            dist,
        })
    }

    pub fn lbound(mut self, lbound: f64) -> Self {
        self.lbound = Some(lbound);
        self
    }

    pub fn rbound(mut self, rbound: f64) -> Self {
        self.rbound = Some(rbound);
        self
    }

    pub fn bounds(mut self, lbound: Option<f64>, rbound: Option<f64>) -> Self {
        self.lbound = lbound;
        self.rbound = rbound;
        self
    }

    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Lay out the curve, shaded regions, axes and title
    pub fn figure(&self) -> Result<Figure, PlotError> {
        let config = &self.config;
        config.validate()?;
        for bound in self.lbound.iter().chain(self.rbound.iter()) {
            if !bound.is_finite() {
                return Err(PlotError::InvalidBound(*bound));
            }
        }

        let shade = self.lbound.is_some() || self.rbound.is_some();
        let shade_left = self.lbound.is_some() && self.rbound.is_some();

        let half_width = config.extent_sd * self.sd;
        let left_edge = self.mean - half_width;
        let right_edge = self.mean + half_width;

        let lo = self.lbound.unwrap_or(left_edge);
        let hi = self.rbound.unwrap_or(right_edge);
        if lo > hi {
            return Err(PlotError::EmptyInterval { lbound: lo, rbound: hi });
        }

        let curve = Curve {
            points: self.density(arange(left_edge, right_edge, config.step)),
            color: config.curve_color,
            width: config.curve_width,
        };

        let mut regions = Vec::new();
        if shade {
            regions.push(FilledRegion {
                kind: RegionKind::Interval,
                from: lo,
                to: hi,
                points: self.density(sample_closed(lo, hi, config.step)),
                color: config.region_color,
            });
        }
        if shade_left {
            let from = left_edge.min(lo);
            regions.push(FilledRegion {
                kind: RegionKind::LeftTail,
                from,
                to: lo,
                points: self.density(sample_closed(from, lo, config.step)),
                color: config.left_region_color,
            });
        }

        let x_range = regions
            .iter()
            .fold((left_edge, right_edge), |(a, b), r| (a.min(r.from), b.max(r.to)));
        // the peak density sits at the mean
        let y_max = self.dist.pdf(self.mean) * config.headroom;

        let llabel = self.lbound.map_or_else(|| "-∞".to_string(), |b| b.to_string());
        let rlabel = self.rbound.map_or_else(|| "∞".to_string(), |b| b.to_string());

        tracing::debug!(shade, shade_left, regions = regions.len(), "laid out normal curve");

        Ok(Figure {
            curves: vec![curve],
            regions,
            x_range,
            y_range: (0.0, y_max),
            x_label: "z".to_string(),
            y_label: "φ(z)".to_string(),
            title: format!(
                "Normal Curve ~ (μ = {}, σ = {}) {} < z < {}",
                self.mean, self.sd, llabel, rlabel
            ),
            title_font_size: config.title_font_size,
        })
    }

    /// Lay out the figure and draw it on `canvas`
    pub fn plot<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<Figure, PlotError> {
        let figure = self.figure()?;
        canvas.draw(&figure)?;
        Ok(figure)
    }

    fn density(&self, xs: Vec<f64>) -> Vec<(f64, f64)> {
        xs.into_iter().map(|x| (x, self.dist.pdf(x))).collect()
    }
}

/// Plots a normal curve with the area under it shaded between `lbound` and
/// `rbound`.
///
/// An unset bound extends to the edge of the plotting window, which is
/// labelled as infinity. Returns the figure that was drawn.
pub fn plot_normal_cdf<C: Canvas + ?Sized>(
    canvas: &mut C,
    rbound: Option<f64>,
    lbound: Option<f64>,
    mean: f64,
    sd: f64,
) -> Result<Figure, PlotError> {
    NormalCurve::new(mean, sd)?.bounds(lbound, rbound).plot(canvas)
}

/// Former name of [`plot_normal_cdf`].
#[deprecated(since = "0.1.0", note = "renamed to `plot_normal_cdf`")]
pub fn plot_cdf_area<C: Canvas + ?Sized>(
    canvas: &mut C,
    rbound: Option<f64>,
    lbound: Option<f64>,
    mean: f64,
    sd: f64,
) -> Result<Figure, PlotError> {
    plot_normal_cdf(canvas, rbound, lbound, mean, sd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCanvas {
        drawn: Vec<Figure>,
    }

    impl Canvas for RecordingCanvas {
        fn draw(&mut self, figure: &Figure) -> Result<(), PlotError> {
            self.drawn.push(figure.clone());
            Ok(())
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_bounds_draws_curve_only() {
        let figure = NormalCurve::new(0.0, 1.0).unwrap().figure().unwrap();
        assert!(figure.regions.is_empty());
        assert_eq!(figure.curves.len(), 1);
        assert!(figure.title.ends_with("-∞ < z < ∞"));
    }

    #[test]
    fn test_window_and_sampling() {
        let figure = NormalCurve::new(10.0, 2.0).unwrap().figure().unwrap();
        let points = &figure.curves[0].points;
        assert!(approx(points[0].0, 3.0));
        assert!(points.last().unwrap().0 < 17.0);
        assert!(approx(points[1].0 - points[0].0, 0.1));
        assert_eq!(figure.x_range, (3.0, 17.0));
    }

    #[test]
    fn test_right_bound_only_shades_left_of_it() {
        let figure = NormalCurve::new(0.0, 1.0).unwrap().rbound(1.5).figure().unwrap();
        assert_eq!(figure.regions.len(), 1);
        let region = &figure.regions[0];
        assert_eq!(region.kind, RegionKind::Interval);
        assert!(approx(region.from, -3.5));
        assert_eq!(region.to, 1.5);
        assert_eq!(region.points.last().unwrap().0, 1.5);
        assert!(figure.title.ends_with("-∞ < z < 1.5"));
    }

    #[test]
    fn test_left_bound_only_shades_to_right_edge() {
        let figure = NormalCurve::new(0.0, 1.0).unwrap().lbound(-1.0).figure().unwrap();
        assert_eq!(figure.regions.len(), 1);
        assert_eq!(figure.regions[0].from, -1.0);
        assert!(approx(figure.regions[0].to, 3.5));
        assert!(figure.title.ends_with("-1 < z < ∞"));
    }

    #[test]
    fn test_both_bounds_give_two_adjacent_regions() {
        let figure = NormalCurve::new(0.0, 1.0)
            .unwrap()
            .lbound(-1.0)
            .rbound(1.0)
            .figure()
            .unwrap();
        assert_eq!(figure.regions.len(), 2);

        let interval = figure.region(RegionKind::Interval).unwrap();
        let tail = figure.region(RegionKind::LeftTail).unwrap();
        assert_ne!(interval.color, tail.color);
        assert_eq!((interval.from, interval.to), (-1.0, 1.0));
        assert!(approx(tail.from, -3.5));
        assert_eq!(tail.to, interval.from);
        assert!(tail.points.iter().all(|&(x, _)| x <= -1.0));
        assert!(interval.points.iter().all(|&(x, _)| x >= -1.0));
    }

    #[test]
    fn test_y_range_has_headroom_over_peak() {
        let figure = NormalCurve::new(3.0, 2.0).unwrap().figure().unwrap();
        let peak = 1.0 / (2.0 * (2.0 * std::f64::consts::PI).sqrt());
        assert_eq!(figure.y_range.0, 0.0);
        assert!(approx(figure.y_range.1, peak * 1.25));
        assert!(figure.title.starts_with("Normal Curve ~ (μ = 3, σ = 2)"));
    }

    #[test]
    fn test_distant_bound_keeps_sample_count_bounded() {
        let figure = NormalCurve::new(0.0, 1.0).unwrap().lbound(-1e12).figure().unwrap();
        let region = figure.region(RegionKind::Interval).unwrap();
        assert!(region.points.len() <= crate::figure::MAX_SAMPLES + 1);
        assert_eq!(region.points[0].0, -1e12);
        assert_eq!(figure.x_range.0, -1e12);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(NormalCurve::new(0.0, 0.0), Err(PlotError::Distribution(_))));
        assert!(matches!(NormalCurve::new(0.0, -1.0), Err(PlotError::Distribution(_))));

        let inverted = NormalCurve::new(0.0, 1.0).unwrap().lbound(1.0).rbound(-1.0);
        assert!(matches!(inverted.figure(), Err(PlotError::EmptyInterval { .. })));

        let infinite = NormalCurve::new(0.0, 1.0).unwrap().rbound(f64::INFINITY);
        assert!(matches!(infinite.figure(), Err(PlotError::InvalidBound(_))));
    }

    #[test]
    fn test_plot_normal_cdf_draws_on_canvas() {
        let mut canvas = RecordingCanvas::default();
        let figure = plot_normal_cdf(&mut canvas, Some(1.0), Some(-1.0), 0.0, 1.0).unwrap();
        assert_eq!(canvas.drawn.len(), 1);
        assert_eq!(canvas.drawn[0], figure);
        assert_eq!(figure.regions.len(), 2);
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_alias_forwards() {
        let mut canvas = RecordingCanvas::default();
        let old = plot_cdf_area(&mut canvas, Some(0.5), None, 0.0, 1.0).unwrap();
        let new = plot_normal_cdf(&mut canvas, Some(0.5), None, 0.0, 1.0).unwrap();
        assert_eq!(old, new);
        assert_eq!(canvas.drawn.len(), 2);
    }
}
