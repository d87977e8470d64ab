use super::config::BarConfig;
use super::frame;
use super::shape::BarShape;
use crate::errors::Result;

/// A bar with no notion of completion: a block of fill symbols that moves
/// one column to the right on every update, wrapping at the right bracket.
#[derive(Debug, Clone)]
pub struct IndeterminateBar {
    shape: BarShape,
    bar_count: usize,
    /// `None` until the first update draws the initial block
    phase: Option<usize>,
}

impl IndeterminateBar {
    pub fn new(config: &BarConfig) -> Result<Self> {
        let shape = config.validate()?;
        let content_width = shape.content_width();
        let bar_count = if content_width < 10 {
            (content_width / 2).max(1)
        } else {
            (content_width / 4).max(4)
        };
        Ok(Self {
            shape,
            bar_count,
            phase: None,
        })
    }

    pub fn shape(&self) -> &BarShape {
        &self.shape
    }

    /// Length of the moving block
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Offset of the block from the left bracket, if it was drawn yet
    pub fn phase(&self) -> Option<usize> {
        self.phase
    }

    /// The initial, left-aligned block
    pub fn text_for(&self) -> String {
        self.text_at(0)
    }

    /// The block shifted `phase` columns to the right, wrapping around
    pub fn text_at(&self, phase: usize) -> String {
        let width = self.shape.content_width();
        let mut content = vec![self.shape.background(); width];
        for offset in 0..self.bar_count {
            content[(phase + offset) % width] = self.shape.fill();
        }
        frame(&content)
    }

    /// Move the block one column right and return the new text.
    ///
    /// The first call returns the initial block without moving it.
    pub fn next_text(&mut self) -> String {
        let phase = match self.phase {
            None => 0,
            Some(phase) => (phase + 1) % self.shape.content_width(),
        };
        self.phase = Some(phase);
        self.text_at(phase)
    }
}
