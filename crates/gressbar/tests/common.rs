// Common test utilities for the integration tests
#![allow(dead_code)]

use vt100::Parser;

pub use gressbar::test_utils::{init_test_logging, SharedBuffer};

/// A vt100 screen fed with everything a bar wrote.
///
/// Line feeds are turned into CR LF the way a tty does, so printed lines
/// start at column 0.
pub struct Screen {
    parser: Parser,
    cols: u16,
}

impl Screen {
    pub fn new(cols: u16) -> Self {
        Self {
            parser: Parser::new(24, cols, 0),
            cols,
        }
    }

    pub fn of(buffer: &SharedBuffer) -> Self {
        let mut screen = Self::new(120);
        screen.feed(&buffer.bytes());
        screen
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        let mut translated = Vec::with_capacity(bytes.len());
        for &b in bytes {
            if b == b'\n' {
                translated.push(b'\r');
            }
            translated.push(b);
        }
        self.parser.process(&translated);
    }

    /// Non-empty rows with trailing blanks removed
    pub fn rows(&self) -> Vec<String> {
        let mut rows: Vec<String> = self
            .parser
            .screen()
            .rows(0, self.cols)
            .map(|row| row.trim_end().to_string())
            .collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        rows
    }

    pub fn row(&self, index: usize) -> String {
        self.rows().get(index).cloned().unwrap_or_default()
    }

    /// (row, column) of the cursor
    pub fn cursor(&self) -> (u16, u16) {
        self.parser.screen().cursor_position()
    }
}
