//! SVG rendering through plotters

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use super::Canvas;
use crate::config::{PlotConfig, Rgb};
use crate::figure::Figure;
use crate::PlotError;

/// Renders figures to an in-memory SVG document
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    svg: String,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            svg: String::new(),
        }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// The most recently rendered document; empty before the first draw
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn into_svg(self) -> String {
        self.svg
    }
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self::from_config(&PlotConfig::default())
    }
}

impl Canvas for SvgCanvas {
    fn draw(&mut self, figure: &Figure) -> Result<(), PlotError> {
        self.svg = render_svg(figure, (self.width, self.height))?;
        Ok(())
    }
}

/// Renders figures to an SVG file, overwriting it on every draw
#[derive(Debug, Clone)]
pub struct SvgFileCanvas {
    path: PathBuf,
    inner: SvgCanvas,
}

impl SvgFileCanvas {
    pub fn new(path: impl Into<PathBuf>, config: &PlotConfig) -> Self {
        Self {
            path: path.into(),
            inner: SvgCanvas::from_config(config),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Canvas for SvgFileCanvas {
    fn draw(&mut self, figure: &Figure) -> Result<(), PlotError> {
        self.inner.draw(figure)?;
        std::fs::write(&self.path, self.inner.svg())?;
        tracing::info!("Saved plot to: {:?}", self.path);
        Ok(())
    }
}

fn render_svg(figure: &Figure, size: (u32, u32)) -> Result<String, PlotError> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let (x_min, x_max) = figure.x_range;
        let (y_min, y_max) = figure.y_range;
        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, ("sans-serif", f64::from(figure.title_font_size)))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(render_error)?;

        for region in &figure.regions {
            chart
                .draw_series(AreaSeries::new(
                    region.points.iter().copied(),
                    0.0,
                    color(region.color).filled(),
                ))
                .map_err(render_error)?;
        }

        for curve in &figure.curves {
            chart
                .draw_series(LineSeries::new(
                    curve.points.iter().copied(),
                    color(curve.color).stroke_width(curve.width),
                ))
                .map_err(render_error)?;
        }

        root.present().map_err(render_error)?;
    }
    Ok(buffer)
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn render_error(error: impl std::fmt::Display) -> PlotError {
    PlotError::Render(error.to_string())
}
