use std::io;
use thiserror::Error;

/// Errors that can occur when building, starting or updating a bar
#[derive(Error, Debug)]
pub enum BarError {
    /// Bar width is below the minimum that leaves room for brackets and content
    #[error("Invalid bar width: {width} (minimum: {min})")]
    InvalidWidth {
        /// The width that was provided
        width: usize,
        /// The minimum accepted width
        min: usize,
    },

    /// A fill or background symbol that is not exactly one character
    #[error("Invalid {name} symbol {symbol:?}: expected exactly one character")]
    InvalidSymbol {
        /// Which symbol was rejected ("fill" or "background")
        name: &'static str,
        /// The rejected symbol
        symbol: String,
    },

    /// A value outside `0..=max`, or not a finite number
    #[error("Value {value} is out of range (expected 0..={max})")]
    ValueOutOfRange { value: f64, max: f64 },

    /// A maximum that is not a finite positive number
    #[error("Invalid maximum value: {0}")]
    InvalidMaximum(f64),

    /// A value-carrying bar was updated without a value
    #[error("This bar requires a value")]
    MissingValue,

    /// A composite bar was given the wrong number of values
    #[error("Expected {expected} values, got {got}")]
    ValueCountMismatch { expected: usize, got: usize },

    /// Another bar already holds the activity lock
    #[error("Cannot display multiple simultaneous progress bars")]
    AlreadyActive,

    /// Tried to remove a child from a composite bar with no children
    #[error("Composite bar has no children to remove")]
    EmptyComposite,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BarError>;
