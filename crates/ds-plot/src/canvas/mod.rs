//! Drawing surfaces for figures

mod svg;

pub use svg::{SvgCanvas, SvgFileCanvas};

use crate::figure::Figure;
use crate::PlotError;

/// A surface that figures are drawn on.
///
/// Drawing again replaces the previous figure.
pub trait Canvas {
    fn draw(&mut self, figure: &Figure) -> Result<(), PlotError>;
}
