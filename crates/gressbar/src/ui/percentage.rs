use super::config::BarConfig;
use super::shape::BarShape;
use super::value::ValueBar;
use crate::errors::Result;

/// Labels are only drawn when the content is wider than this
const LABEL_MIN_CONTENT: usize = 20;

/// A value bar with its maximum fixed at 100 and a `NN%` label.
///
/// Fill and range checks are delegated to an inner [`ValueBar`].
#[derive(Debug, Clone)]
pub struct PercentageBar {
    ratio: ValueBar,
}

impl PercentageBar {
    pub fn new(config: &BarConfig) -> Result<Self> {
        Ok(Self {
            ratio: ValueBar::new(100.0, config)?,
        })
    }

    pub fn shape(&self) -> &BarShape {
        self.ratio.shape()
    }

    pub fn check(&self, value: f64) -> Result<()> {
        self.ratio.check(value)
    }

    pub fn fill_len(&self, value: f64) -> usize {
        self.ratio.fill_len(value)
    }

    /// Whole percentage, truncated, with a `%` suffix
    pub fn label(&self, value: f64) -> String {
        format!("{}%", value as u64)
    }

    pub fn text_for(&self, value: f64) -> Result<String> {
        self.check(value)?;
        let label = self.label(value);
        let show = self.ratio.show_value() && self.shape().content_width() > LABEL_MIN_CONTENT;
        let label = show.then_some(label.as_str());
        Ok(self.shape().render(self.fill_len(value), label))
    }
}
