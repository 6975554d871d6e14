//! Null cell detection for text input

use serde::{Deserialize, Serialize};

/// Which raw cells are read as missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Cell contents treated as null
    pub patterns: Vec<String>,

    /// Trim surrounding whitespace before matching
    pub trim_whitespace: bool,

    /// Match patterns case sensitively
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: ["", "NA", "N/A", "NaN", "null", "None"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// No cell is null except the empty string
    pub fn empty_only() -> Self {
        Self {
            patterns: vec![String::new()],
            ..Self::default()
        }
    }

    /// Add a pattern, keeping the list free of duplicates
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
        self
    }

    pub fn is_null(&self, cell: &str) -> bool {
        let cell = if self.trim_whitespace { cell.trim() } else { cell };
        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                cell == pattern
            } else {
                cell.eq_ignore_ascii_case(pattern)
            }
        })
    }
}
