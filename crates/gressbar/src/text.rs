use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

use crate::io::{Interceptor, OutputHooks};

const REWIND: char = '\u{8}';

/// The text currently on screen and whether it is drawn.
///
/// Kept apart from the interceptor so it can serve as the interceptor's
/// hooks while the interceptor is borrowed.
#[derive(Debug, Clone, Default)]
struct LineState {
    text: String,
    drawn: bool,
}

impl LineState {
    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn jump_start(&self, raw: &mut dyn Write) -> io::Result<()> {
        let rewind: String = std::iter::repeat(REWIND).take(self.len()).collect();
        raw.write_all(rewind.as_bytes())
    }

    fn clear(&mut self, raw: &mut dyn Write) -> io::Result<()> {
        if self.drawn {
            self.jump_start(raw)?;
        }
        raw.write_all(" ".repeat(self.len()).as_bytes())?;
        self.jump_start(raw)?;
        raw.flush()?;
        self.drawn = false;
        Ok(())
    }

    fn update(&mut self, raw: &mut dyn Write, text: Option<&str>) -> io::Result<()> {
        if self.drawn {
            self.jump_start(raw)?;
        }
        if let Some(text) = text {
            self.text.clear();
            self.text.push_str(text);
        }
        raw.write_all(self.text.as_bytes())?;
        raw.flush()?;
        self.drawn = true;
        Ok(())
    }
}

impl OutputHooks for LineState {
    fn before_write(&mut self, raw: &mut dyn Write) -> io::Result<()> {
        self.clear(raw)
    }

    fn after_write(&mut self, raw: &mut dyn Write) -> io::Result<()> {
        self.drawn = false;
        self.update(raw, None)
    }
}

/// A single line of terminal output that can be erased and redrawn in place.
///
/// Redraws rewind the cursor with one backspace per displayed character and
/// overwrite the old text. Foreign output sent through
/// [`print`](DynamicText::print) hides the line first and redraws it right
/// after, so the foreign text always lands before the line.
pub struct DynamicText<W: Write> {
    state: LineState,
    out: Interceptor<W>,
}

impl<W: Write> DynamicText<W> {
    pub fn new(sink: W) -> Self {
        Self::with_text(sink, "")
    }

    pub fn with_text(sink: W, text: &str) -> Self {
        Self {
            state: LineState {
                text: text.to_string(),
                drawn: false,
            },
            out: Interceptor::new(sink),
        }
    }

    /// The text held by the line, drawn or not
    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn is_drawn(&self) -> bool {
        self.state.drawn
    }

    /// Move the cursor back to the start of the line
    pub fn jump_start(&mut self, flush: bool) -> io::Result<()> {
        self.state.jump_start(self.out.get_mut())?;
        if flush {
            self.out.flush()?;
        }
        Ok(())
    }

    /// Redraw the line, replacing its text first when `text` is given
    pub fn update(&mut self, text: Option<&str>) -> io::Result<()> {
        self.state.update(self.out.get_mut(), text)
    }

    /// Blank the line and leave the cursor at its start.
    ///
    /// Safe to call when nothing was ever drawn.
    pub fn clear(&mut self) -> io::Result<()> {
        self.state.clear(self.out.get_mut())
    }

    /// Blank the line and drop its text, so foreign output does not bring
    /// it back before the next update
    pub fn reset(&mut self) -> io::Result<()> {
        self.state.clear(self.out.get_mut())?;
        self.state.text.clear();
        Ok(())
    }

    /// Write foreign output, hiding the line before and redrawing it after
    pub fn print(&mut self, buf: &[u8]) -> io::Result<()> {
        self.out.write_with(&mut self.state, buf)
    }

    /// Flush the sink without touching the line
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Release the sink. Later prints pass straight through.
    pub fn stop(&mut self) -> io::Result<()> {
        self.out.stop()
    }

    pub fn is_stopped(&self) -> bool {
        self.out.is_stopped()
    }

    pub fn get_ref(&self) -> &W {
        self.out.get_ref()
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner()
    }
}

impl<W: Write + Debug> Debug for DynamicText<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicText")
            .field("text", &self.state.text)
            .field("drawn", &self.state.drawn)
            .field("out", &self.out)
            .finish()
    }
}

/// A line shared between the caller and a background updater
pub(crate) type SharedLine<W> = Arc<Mutex<DynamicText<W>>>;

/// A cloneable writer that prints above an active line.
///
/// Everything written through it is placed before the bar, which is
/// redrawn right after each write. The printer also works as a
/// `tracing_subscriber` writer so log lines do not break the bar:
///
/// ```rust,ignore
/// let bar = IndeterminateBar::new(&BarConfig::default())?.start()?;
/// tracing_subscriber::fmt().with_writer(bar.printer()).init();
/// ```
///
/// Once the bar stops, writes go straight to the sink.
pub struct LinePrinter<W: Write> {
    line: SharedLine<W>,
}

impl<W: Write> LinePrinter<W> {
    pub(crate) fn new(line: SharedLine<W>) -> Self {
        Self { line }
    }
}

impl<W: Write> Clone for LinePrinter<W> {
    fn clone(&self) -> Self {
        Self {
            line: Arc::clone(&self.line),
        }
    }
}

impl<W: Write> Write for LinePrinter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.line.lock().print(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.line.lock().flush()
    }
}

impl<'a, W: Write + 'static> MakeWriter<'a> for LinePrinter<W> {
    type Writer = LinePrinter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl<W: Write> Debug for LinePrinter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinePrinter").finish_non_exhaustive()
    }
}
