use serde::{Deserialize, Serialize};

use super::shape::BarShape;
use crate::errors::{BarError, Result};

/// Smallest width that leaves room for the brackets and two content columns
pub const MIN_WIDTH: usize = 4;

/// Configuration shared by every bar variant.
///
/// Symbols are kept as strings so that configuration loaded from a file
/// is checked the same way as configuration built in code;
/// [`validate`](BarConfig::validate) rejects anything that is not exactly
/// one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Total width in characters, brackets included
    pub width: usize,
    /// Symbol for completed progress
    pub fill: String,
    /// Symbol for remaining progress
    pub background: String,
    /// Whether value bars overlay their value as a label
    pub show_value: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 10,
            fill: "|".to_string(),
            background: " ".to_string(),
            show_value: false,
        }
    }
}

impl BarConfig {
    /// Create a new bar config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total width of the bar
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the fill and background symbols
    pub fn chars(mut self, fill: impl Into<String>, background: impl Into<String>) -> Self {
        self.fill = fill.into();
        self.background = background.into();
        self
    }

    /// Set whether to overlay the value label
    pub fn show_value(mut self, show: bool) -> Self {
        self.show_value = show;
        self
    }

    /// Check the configuration and produce the fixed shape a bar draws with
    pub fn validate(&self) -> Result<BarShape> {
        if self.width < MIN_WIDTH {
            return Err(BarError::InvalidWidth {
                width: self.width,
                min: MIN_WIDTH,
            });
        }
        let fill = single_char("fill", &self.fill)?;
        let background = single_char("background", &self.background)?;
        Ok(BarShape::new(self.width, fill, background))
    }
}

fn single_char(name: &'static str, symbol: &str) -> Result<char> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(BarError::InvalidSymbol {
            name,
            symbol: symbol.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_config_defaults() {
        let config = BarConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.fill, "|");
        assert_eq!(config.background, " ");
        assert!(!config.show_value);
    }

    #[test]
    fn test_bar_config_builder() {
        let config = BarConfig::new().width(30).chars("#", ".").show_value(true);

        assert_eq!(config.width, 30);
        assert_eq!(config.fill, "#");
        assert_eq!(config.background, ".");
        assert!(config.show_value);

        let shape = config.validate().unwrap();
        assert_eq!(shape.width(), 30);
        assert_eq!(shape.content_width(), 28);
    }

    #[test]
    fn test_width_below_minimum() {
        let err = BarConfig::new().width(3).validate().unwrap_err();
        assert!(matches!(err, BarError::InvalidWidth { width: 3, min: 4 }));
        assert!(BarConfig::new().width(4).validate().is_ok());
    }

    #[test]
    fn test_symbols_must_be_single_characters() {
        let err = BarConfig::new().chars("==", " ").validate().unwrap_err();
        assert!(matches!(err, BarError::InvalidSymbol { name: "fill", .. }));

        let err = BarConfig::new().chars("=", "").validate().unwrap_err();
        assert!(matches!(err, BarError::InvalidSymbol { name: "background", .. }));

        // Multi-byte but single characters are fine
        assert!(BarConfig::new().chars("█", "░").validate().is_ok());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: BarConfig = serde_json::from_str(r##"{"width": 25, "fill": "#"}"##).unwrap();
        assert_eq!(config.width, 25);
        assert_eq!(config.fill, "#");
        assert_eq!(config.background, " ");
        assert!(!config.show_value);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = BarConfig::new().width(12).chars("=", "-").show_value(true);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BarConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
