//! Toolkit-wide settings loaded from JSON

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ds_data::CsvOptions;
use ds_optim::{Minimize, MinimizeOptions};
use ds_plot::{PlotConfig, SvgCanvas};

use crate::Result;

/// Settings for every component; missing sections take their defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub plot: PlotConfig,
    pub minimize: MinimizeOptions,
    pub csv: CsvOptions,
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.plot.validate()?;
        settings.minimize.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Self::from_json_str(&fs::read_to_string(path)?)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// A canvas sized by the plot settings
    pub fn canvas(&self) -> SvgCanvas {
        SvgCanvas::from_config(&self.plot)
    }

    /// A minimizer carrying the minimize settings
    pub fn minimizer<'a>(&self) -> Minimize<'a> {
        Minimize::new().options(self.minimize.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_optim::Method;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(Settings::from_json_str("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::from_json_str(
            r#"{"plot": {"width": 400}, "minimize": {"method": "Nelder-Mead"}, "csv": {"delimiter": 59}}"#,
        )
        .unwrap();
        assert_eq!(settings.plot.width, 400);
        assert_eq!(settings.plot.height, PlotConfig::default().height);
        assert_eq!(settings.minimize.method, Some(Method::NelderMead));
        assert_eq!(settings.csv.delimiter, b';');
        assert!(settings.csv.has_header);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(matches!(Settings::from_json_str("not json"), Err(crate::Error::Settings(_))));
        assert!(matches!(
            Settings::from_json_str(r#"{"minimize": {"xtol": -1.0}}"#),
            Err(crate::Error::Optim(_))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{"plot": {"step": 0.0}}"#),
            Err(crate::Error::Plot(_))
        ));
    }
}
