use super::{Bar, FixedWidth};
use crate::errors::{BarError, Result};

/// Several bars joined side by side with a single space between them.
///
/// Children keep their own width and symbols. They are never drawn on
/// their own; the composite produces one string for a shared line.
#[derive(Debug, Clone, Default)]
pub struct MultiBar {
    children: Vec<Bar>,
}

impl MultiBar {
    pub fn new(children: Vec<Bar>) -> Self {
        Self { children }
    }

    /// Append a child at the right end
    pub fn add(&mut self, bar: impl Into<Bar>) -> &mut Self {
        self.children.push(bar.into());
        self
    }

    pub fn children(&self) -> &[Bar] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn remove_all(&mut self) -> Vec<Bar> {
        std::mem::take(&mut self.children)
    }

    pub fn remove_first(&mut self) -> Result<Bar> {
        self.check_not_empty()?;
        Ok(self.children.remove(0))
    }

    pub fn remove_last(&mut self) -> Result<Bar> {
        self.children.pop().ok_or(BarError::EmptyComposite)
    }

    pub(crate) fn check_not_empty(&self) -> Result<()> {
        if self.children.is_empty() {
            return Err(BarError::EmptyComposite);
        }
        Ok(())
    }

    /// Fail unless there is exactly one acceptable value per child
    pub fn check(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.children.len() {
            return Err(BarError::ValueCountMismatch {
                expected: self.children.len(),
                got: values.len(),
            });
        }
        self.children
            .iter()
            .zip(values)
            .try_for_each(|(child, value)| child.check(Some(*value)))
    }

    pub fn text_for(&self, values: &[f64]) -> Result<String> {
        self.check(values)?;
        let texts = self
            .children
            .iter()
            .zip(values)
            .map(|(child, value)| child.text_for(Some(*value)))
            .collect::<Result<Vec<_>>>()?;
        Ok(texts.join(" "))
    }

    /// Text for the next update. Indeterminate children advance only when
    /// every value is accepted.
    pub fn next_text(&mut self, values: &[f64]) -> Result<String> {
        self.check(values)?;
        let texts = self
            .children
            .iter_mut()
            .zip(values)
            .map(|(child, value)| child.next_text(Some(*value)))
            .collect::<Result<Vec<_>>>()?;
        Ok(texts.join(" "))
    }
}

impl FixedWidth for MultiBar {
    fn width(&self) -> usize {
        let bars: usize = self.children.iter().map(FixedWidth::width).sum();
        bars + self.children.len().saturating_sub(1)
    }
}

impl From<Vec<Bar>> for MultiBar {
    fn from(children: Vec<Bar>) -> Self {
        Self::new(children)
    }
}
