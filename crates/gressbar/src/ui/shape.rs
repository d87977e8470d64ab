use std::io::{self, Write};

/// The validated, fixed geometry of a bar: width and symbols.
///
/// Produced by [`BarConfig::validate`](super::BarConfig::validate); a shape
/// always has `width >= 4` and single-character symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarShape {
    width: usize,
    fill: char,
    background: char,
}

impl BarShape {
    pub(crate) fn new(width: usize, fill: char, background: char) -> Self {
        Self {
            width,
            fill,
            background,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Columns between the brackets
    pub fn content_width(&self) -> usize {
        self.width - 2
    }

    pub fn fill(&self) -> char {
        self.fill
    }

    pub fn background(&self) -> char {
        self.background
    }

    /// `filled` fill symbols followed by background up to the content width
    pub fn content(&self, filled: usize) -> Vec<char> {
        let filled = filled.min(self.content_width());
        let mut content = vec![self.fill; filled];
        content.resize(self.content_width(), self.background);
        content
    }

    /// Bracketed bar with `filled` columns and an optional centred label
    pub fn render(&self, filled: usize, label: Option<&str>) -> String {
        let mut content = self.content(filled);
        if let Some(label) = label {
            overlay_label(&mut content, label);
        }
        frame(&content)
    }

    /// Erase `width` columns left of the cursor and return to where they began.
    ///
    /// For bars drawn by hand with plain prints rather than started.
    pub fn clear_text<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        let rewind = "\u{8}".repeat(self.width);
        write!(sink, "{rewind}{}{rewind}", " ".repeat(self.width))?;
        sink.flush()
    }
}

pub(crate) fn frame(content: &[char]) -> String {
    let mut text = String::with_capacity(content.len() + 2);
    text.push('[');
    text.extend(content);
    text.push(']');
    text
}

/// Overwrite the middle of `content` with `label`.
///
/// The label starts at `len / 2 - label_len / 2` and replaces whatever
/// symbols were there; the fill boundary is not redrawn around it.
pub(crate) fn overlay_label(content: &mut [char], label: &str) {
    let label: Vec<char> = label.chars().collect();
    let start = (content.len() / 2).saturating_sub(label.len() / 2);
    for (slot, c) in content.iter_mut().skip(start).zip(label) {
        *slot = c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let shape = BarShape::new(10, '#', '.');
        assert_eq!(shape.render(0, None), "[........]");
        assert_eq!(shape.render(3, None), "[###.....]");
        assert_eq!(shape.render(8, None), "[########]");
        assert_eq!(shape.render(50, None), "[########]");
    }

    #[test]
    fn test_label_overwrites_across_fill_boundary() {
        let shape = BarShape::new(12, '=', ' ');
        // content width 10, label 4 chars -> columns 3..7
        assert_eq!(shape.render(5, Some("5/10")), "[===5/10   ]");
        assert_eq!(shape.render(0, Some("0/10")), "[   0/10   ]");
    }

    #[test]
    fn test_overlay_label_position() {
        for (width, label) in [(10, "ab"), (11, "abc"), (21, "42%"), (8, "1")] {
            let mut content = vec!['.'; width];
            overlay_label(&mut content, label);
            let start = width / 2 - label.len() / 2;
            let placed: String = content[start..start + label.len()].iter().collect();
            assert_eq!(placed, label);
        }
    }

    #[test]
    fn test_clear_text_sequence() {
        let shape = BarShape::new(4, '|', ' ');
        let mut sink = Vec::new();
        shape.clear_text(&mut sink).unwrap();
        assert_eq!(sink, b"\x08\x08\x08\x08    \x08\x08\x08\x08");
    }
}
