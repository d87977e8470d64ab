use std::fmt::Debug;
use std::io::{self, Write};

/// Callbacks run around every foreign write that passes through an [`Interceptor`].
///
/// Both hooks receive the raw sink so they can draw without re-entering
/// the interceptor.
pub trait OutputHooks {
    /// Called before the foreign bytes reach the sink
    fn before_write(&mut self, raw: &mut dyn Write) -> io::Result<()>;

    /// Called after the foreign bytes reached the sink
    fn after_write(&mut self, raw: &mut dyn Write) -> io::Result<()>;
}

/// Hooks that do nothing, for plain pass-through writes
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl OutputHooks for NoHooks {
    fn before_write(&mut self, _raw: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn after_write(&mut self, _raw: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

/// Wraps an output sink so that foreign writes can be surrounded by hooks.
///
/// The interceptor is the only writer to its sink while it is active:
/// - [`write_with`](Interceptor::write_with) runs the hooks around the bytes
/// - [`put`](Interceptor::put) writes raw, bypassing the hooks
/// - the [`Write`] impl forwards everything else untouched
///
/// [`stop`](Interceptor::stop) flushes and releases the sink. It only does
/// work the first time it is called.
pub struct Interceptor<W: Write> {
    sink: W,
    stopped: bool,
}

impl<W: Write> Interceptor<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            stopped: false,
        }
    }

    /// Write foreign bytes, running `hooks` before and after.
    ///
    /// Once stopped, the bytes go straight to the sink.
    pub fn write_with<H: OutputHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        buf: &[u8],
    ) -> io::Result<()> {
        if self.stopped {
            return self.sink.write_all(buf);
        }
        hooks.before_write(&mut self.sink)?;
        self.sink.write_all(buf)?;
        hooks.after_write(&mut self.sink)
    }

    /// Write text without running any hooks
    pub fn put(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_all(text.as_bytes())
    }

    /// Flush and release the sink
    pub fn stop(&mut self) -> io::Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;
        self.sink.flush()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Stop the interceptor and hand back the wrapped sink
    pub fn into_inner(mut self) -> io::Result<W> {
        self.stop()?;
        Ok(self.sink)
    }
}

impl<W: Write> Write for Interceptor<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl<W: Write + Debug> Debug for Interceptor<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptor")
            .field("sink", &self.sink)
            .field("stopped", &self.stopped)
            .finish()
    }
}
