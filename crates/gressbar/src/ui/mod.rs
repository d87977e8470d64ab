//! Bar formatters.
//!
//! Every bar renders to a bracketed string of exactly its width. The
//! formatters hold no output state; drawing happens in
//! [`ActiveBar`](crate::ActiveBar).

mod config;
mod indeterminate;
mod multi;
mod percentage;
mod shape;
mod value;

use std::io::{self, Write};

pub use config::{BarConfig, MIN_WIDTH};
pub use indeterminate::IndeterminateBar;
pub use multi::MultiBar;
pub use percentage::PercentageBar;
pub use shape::BarShape;
pub use value::ValueBar;

pub(crate) use shape::frame;

use crate::errors::{BarError, Result};

/// Anything that renders to a fixed number of columns
pub trait FixedWidth {
    fn width(&self) -> usize;
}

impl FixedWidth for IndeterminateBar {
    fn width(&self) -> usize {
        self.shape().width()
    }
}

impl FixedWidth for ValueBar {
    fn width(&self) -> usize {
        self.shape().width()
    }
}

impl FixedWidth for PercentageBar {
    fn width(&self) -> usize {
        self.shape().width()
    }
}

/// One bar of any single-line variant.
///
/// Indeterminate bars ignore the value they are given; the others require one.
#[derive(Debug, Clone)]
pub enum Bar {
    Indeterminate(IndeterminateBar),
    Value(ValueBar),
    Percentage(PercentageBar),
}

impl Bar {
    pub fn shape(&self) -> &BarShape {
        match self {
            Bar::Indeterminate(bar) => bar.shape(),
            Bar::Value(bar) => bar.shape(),
            Bar::Percentage(bar) => bar.shape(),
        }
    }

    /// Fail if `value` would be rejected by [`text_for`](Bar::text_for)
    pub fn check(&self, value: Option<f64>) -> Result<()> {
        match (self, value) {
            (Bar::Indeterminate(_), _) => Ok(()),
            (_, None) => Err(BarError::MissingValue),
            (Bar::Value(bar), Some(value)) => bar.check(value),
            (Bar::Percentage(bar), Some(value)) => bar.check(value),
        }
    }

    /// Text for `value` without changing any state.
    ///
    /// Indeterminate bars give their initial block, as
    /// [`IndeterminateBar::text_for`] does.
    pub fn text_for(&self, value: Option<f64>) -> Result<String> {
        match self {
            Bar::Indeterminate(bar) => Ok(bar.text_for()),
            Bar::Value(bar) => bar.text_for(value.ok_or(BarError::MissingValue)?),
            Bar::Percentage(bar) => bar.text_for(value.ok_or(BarError::MissingValue)?),
        }
    }

    /// Text for the next update; indeterminate bars advance one step
    pub fn next_text(&mut self, value: Option<f64>) -> Result<String> {
        match self {
            Bar::Indeterminate(bar) => Ok(bar.next_text()),
            other => other.text_for(value),
        }
    }

    /// Erase a bar that was printed by hand rather than started
    pub fn clear_text<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        self.shape().clear_text(sink)
    }
}

impl FixedWidth for Bar {
    fn width(&self) -> usize {
        self.shape().width()
    }
}

impl From<IndeterminateBar> for Bar {
    fn from(bar: IndeterminateBar) -> Self {
        Bar::Indeterminate(bar)
    }
}

impl From<ValueBar> for Bar {
    fn from(bar: ValueBar) -> Self {
        Bar::Value(bar)
    }
}

impl From<PercentageBar> for Bar {
    fn from(bar: PercentageBar) -> Self {
        Bar::Percentage(bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_requires_value() {
        let bar: Bar = ValueBar::new(5.0, &BarConfig::default()).unwrap().into();
        assert!(matches!(bar.text_for(None), Err(BarError::MissingValue)));
        assert!(matches!(bar.check(None), Err(BarError::MissingValue)));
        assert_eq!(bar.text_for(Some(5.0)).unwrap(), "[||||||||]");
    }

    #[test]
    fn test_indeterminate_ignores_value() {
        let mut bar: Bar = IndeterminateBar::new(&BarConfig::default()).unwrap().into();
        assert!(bar.check(Some(-3.0)).is_ok());
        assert_eq!(bar.next_text(Some(7.0)).unwrap(), "[||||    ]");
        assert_eq!(bar.next_text(None).unwrap(), "[ ||||   ]");
        assert_eq!(bar.text_for(None).unwrap(), "[||||    ]");
    }

    #[test]
    fn test_clear_text_uses_width() {
        let bar: Bar = PercentageBar::new(&BarConfig::new().width(6)).unwrap().into();
        let mut sink = Vec::new();
        bar.clear_text(&mut sink).unwrap();
        assert_eq!(sink.len(), 18);
        assert_eq!(bar.width(), 6);
    }
}
