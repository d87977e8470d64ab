use super::config::BarConfig;
use super::shape::BarShape;
use crate::errors::{BarError, Result};

/// A bar that shows `value` out of a maximum, optionally labelled `value/max`.
#[derive(Debug, Clone)]
pub struct ValueBar {
    shape: BarShape,
    max: f64,
    show_value: bool,
}

impl ValueBar {
    pub fn new(max: f64, config: &BarConfig) -> Result<Self> {
        let shape = config.validate()?;
        check_max(max)?;
        Ok(Self {
            shape,
            max,
            show_value: config.show_value,
        })
    }

    pub fn shape(&self) -> &BarShape {
        &self.shape
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn show_value(&self) -> bool {
        self.show_value
    }

    /// Change the maximum. Nothing changes if `max` is rejected.
    pub fn set_max(&mut self, max: f64) -> Result<()> {
        check_max(max)?;
        self.max = max;
        Ok(())
    }

    /// Fail unless `0 <= value <= max`
    pub fn check(&self, value: f64) -> Result<()> {
        if value.is_finite() && (0.0..=self.max).contains(&value) {
            Ok(())
        } else {
            Err(BarError::ValueOutOfRange {
                value,
                max: self.max,
            })
        }
    }

    /// Number of filled columns for `value`, rounded down
    pub fn fill_len(&self, value: f64) -> usize {
        let content_width = self.shape.content_width();
        let filled = (value * content_width as f64 / self.max).floor() as usize;
        filled.min(content_width)
    }

    /// `value/max` as whole numbers when both are whole, else with two decimals
    pub fn label(&self, value: f64) -> String {
        if value.fract() == 0.0 && self.max.fract() == 0.0 {
            // + 0.0 turns -0.0 into 0.0
            format!("{:.0}/{:.0}", value + 0.0, self.max)
        } else {
            format!("{value:.2}/{:.2}", self.max)
        }
    }

    pub fn text_for(&self, value: f64) -> Result<String> {
        self.check(value)?;
        let label = self.label(value);
        let fits = self.shape.content_width() > label.chars().count() * 2;
        let label = (self.show_value && fits).then_some(label.as_str());
        Ok(self.shape.render(self.fill_len(value), label))
    }
}

fn check_max(max: f64) -> Result<()> {
    if max.is_finite() && max > 0.0 {
        Ok(())
    } else {
        Err(BarError::InvalidMaximum(max))
    }
}
