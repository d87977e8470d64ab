//! Single-line progress bars that redraw in place.
//!
//! A bar owns one line of terminal output and rewrites it with backspace
//! rewinds on every update. Text printed through the bar's
//! [`LinePrinter`] is placed above it, and the bar is redrawn right after.
//!
//! ```rust,ignore
//! use gressbar::{BarConfig, PercentageBar, Start};
//!
//! let config = BarConfig::new().width(50).show_value(true);
//! let mut bar = PercentageBar::new(&config)?.start()?;
//! for part in 0..=100 {
//!     bar.update(part as f64)?;
//! }
//! bar.stop()?;
//! ```
//!
//! Only one bar can be on screen at a time; starting a second one fails
//! with [`BarError::AlreadyActive`].
#![deny(unused_imports)]

mod active;
mod background;
mod errors;
pub mod io;
mod lock;
pub mod test_utils;
mod text;
pub mod ui;

pub use active::{ActiveBar, Start};
pub use background::{BackgroundBar, BACKGROUND_TICK};
pub use errors::{BarError, Result};
pub use lock::{ActivityLock, ActivityToken};
pub use text::{DynamicText, LinePrinter};
pub use ui::{
    Bar, BarConfig, BarShape, FixedWidth, IndeterminateBar, MultiBar, PercentageBar, ValueBar,
    MIN_WIDTH,
};
