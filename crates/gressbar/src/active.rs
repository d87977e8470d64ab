use std::fmt::Debug;
use std::io::{self, Stdout, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::errors::Result;
use crate::lock::{ActivityLock, ActivityToken};
use crate::text::{DynamicText, LinePrinter, SharedLine};
use crate::ui::{Bar, FixedWidth, IndeterminateBar, MultiBar, PercentageBar, ValueBar};

/// The line and activity token owned by a displayed bar.
///
/// Finishing clears the line, releases the sink and drops the token, in
/// that order. It happens once: on [`finish`](Session::finish) or on drop.
pub(crate) struct Session<W: Write + Send + 'static> {
    line: SharedLine<W>,
    token: Option<ActivityToken>,
}

impl<W: Write + Send + 'static> Session<W> {
    /// Take the lock, then draw the (empty) line.
    ///
    /// Nothing is written if the lock is already held.
    pub(crate) fn open(sink: W, lock: &ActivityLock) -> Result<Self> {
        let token = lock.try_acquire()?;
        let mut line = DynamicText::new(sink);
        line.update(None)?;
        Ok(Self {
            line: Arc::new(Mutex::new(line)),
            token: Some(token),
        })
    }

    pub(crate) fn line(&self) -> &SharedLine<W> {
        &self.line
    }

    pub(crate) fn redraw(&self, text: &str) -> Result<()> {
        self.line.lock().update(Some(text))?;
        trace!(text, "redrew line");
        Ok(())
    }

    pub(crate) fn clear(&self) -> Result<()> {
        self.line.lock().clear()?;
        Ok(())
    }

    /// Clear and forget the text, for when the bar's layout changes
    pub(crate) fn reset(&self) -> Result<()> {
        self.line.lock().reset()?;
        Ok(())
    }

    pub(crate) fn finish(&mut self) -> Result<()> {
        let Some(token) = self.token.take() else {
            return Ok(());
        };
        let result = {
            let mut line = self.line.lock();
            line.clear().and_then(|_| line.stop())
        };
        drop(token);
        debug!("bar stopped");
        result.map_err(Into::into)
    }
}

impl<W: Write + Send + 'static> Drop for Session<W> {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

/// A bar that is on screen.
///
/// Created by the [`Start`] methods. While it exists it holds the activity
/// lock, so no other bar can start. Stopping, or dropping it (also during a
/// panic), clears the line and releases the lock exactly once.
pub struct ActiveBar<B, W: Write + Send + 'static = Stdout> {
    bar: B,
    session: Session<W>,
}

impl<B, W: Write + Send + 'static> ActiveBar<B, W> {
    pub(crate) fn activate(bar: B, sink: W, lock: &ActivityLock) -> Result<Self> {
        let session = Session::open(sink, lock)?;
        debug!("bar started");
        Ok(Self { bar, session })
    }

    pub fn bar(&self) -> &B {
        &self.bar
    }

    /// A writer whose output lands above the bar
    pub fn printer(&self) -> LinePrinter<W> {
        LinePrinter::new(Arc::clone(self.session.line()))
    }

    /// The text currently held by the line
    pub fn text(&self) -> String {
        self.session.line().lock().text().to_string()
    }

    /// Blank the line without stopping; the next update draws again
    pub fn clear_text(&mut self) -> Result<()> {
        self.session.clear()
    }

    /// Clear the line and release the lock
    pub fn stop(mut self) -> Result<()> {
        self.session.finish()
    }

    /// Stop and hand back the formatter, e.g. to start it again later
    pub fn into_bar(mut self) -> Result<B> {
        self.session.finish()?;
        Ok(self.bar)
    }
}

impl<B: Debug, W: Write + Send + 'static> Debug for ActiveBar<B, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveBar")
            .field("bar", &self.bar)
            .field("text", &self.text())
            .finish()
    }
}

impl<W: Write + Send + 'static> ActiveBar<IndeterminateBar, W> {
    /// Move the block one column and redraw
    pub fn update(&mut self) -> Result<()> {
        let text = self.bar.next_text();
        self.session.redraw(&text)
    }
}

impl<W: Write + Send + 'static> ActiveBar<ValueBar, W> {
    pub fn update(&mut self, value: f64) -> Result<()> {
        let text = self.bar.text_for(value)?;
        self.session.redraw(&text)
    }

    /// Change the maximum and redraw; neither changes if either input is rejected
    pub fn update_with_max(&mut self, value: f64, max: f64) -> Result<()> {
        let mut next = self.bar.clone();
        next.set_max(max)?;
        let text = next.text_for(value)?;
        self.bar = next;
        self.session.redraw(&text)
    }
}

impl<W: Write + Send + 'static> ActiveBar<PercentageBar, W> {
    pub fn update(&mut self, value: f64) -> Result<()> {
        let text = self.bar.text_for(value)?;
        self.session.redraw(&text)
    }
}

impl<W: Write + Send + 'static> ActiveBar<Bar, W> {
    pub fn update(&mut self, value: Option<f64>) -> Result<()> {
        let text = self.bar.next_text(value)?;
        self.session.redraw(&text)
    }
}

impl<W: Write + Send + 'static> ActiveBar<MultiBar, W> {
    /// Redraw with one value per child, in order
    pub fn update(&mut self, values: &[f64]) -> Result<()> {
        let text = self.bar.next_text(values)?;
        self.session.redraw(&text)
    }

    /// Append a child; it shows up on the next update
    pub fn add(&mut self, bar: impl Into<Bar>) -> &mut Self {
        self.bar.add(bar);
        debug!(children = self.bar.len(), "added composite child");
        self
    }

    pub fn remove_all(&mut self) -> Result<Vec<Bar>> {
        self.session.reset()?;
        let removed = self.bar.remove_all();
        debug!(removed = removed.len(), "removed all composite children");
        Ok(removed)
    }

    pub fn remove_first(&mut self) -> Result<Bar> {
        self.bar.check_not_empty()?;
        self.session.reset()?;
        let removed = self.bar.remove_first()?;
        debug!(children = self.bar.len(), "removed first composite child");
        Ok(removed)
    }

    pub fn remove_last(&mut self) -> Result<Bar> {
        self.bar.check_not_empty()?;
        self.session.reset()?;
        let removed = self.bar.remove_last()?;
        debug!(children = self.bar.len(), "removed last composite child");
        Ok(removed)
    }
}

/// Starting any bar formatter on a sink.
///
/// Implemented for every [`FixedWidth`] formatter. All methods fail with
/// [`BarError::AlreadyActive`](crate::BarError::AlreadyActive) before
/// writing anything if the lock is held.
pub trait Start: FixedWidth + Sized {
    /// Start on standard output under the process-wide lock
    fn start(self) -> Result<ActiveBar<Self, Stdout>> {
        self.start_on(io::stdout())
    }

    /// Start on `sink` under the process-wide lock
    fn start_on<W: Write + Send + 'static>(self, sink: W) -> Result<ActiveBar<Self, W>> {
        self.start_with_lock(sink, &ActivityLock::global())
    }

    /// Start on `sink` under `lock`
    fn start_with_lock<W: Write + Send + 'static>(
        self,
        sink: W,
        lock: &ActivityLock,
    ) -> Result<ActiveBar<Self, W>> {
        ActiveBar::activate(self, sink, lock)
    }

    /// Run `f` with the bar on standard output, stopping it afterwards
    fn scoped<R>(self, f: impl FnOnce(&mut ActiveBar<Self, Stdout>) -> Result<R>) -> Result<R> {
        self.scoped_with_lock(io::stdout(), &ActivityLock::global(), f)
    }

    /// Run `f` with the bar on `sink` under `lock`, stopping it afterwards.
    ///
    /// The bar is stopped whether or not `f` succeeds; an error from `f`
    /// takes precedence over one from stopping.
    fn scoped_with_lock<W: Write + Send + 'static, R>(
        self,
        sink: W,
        lock: &ActivityLock,
        f: impl FnOnce(&mut ActiveBar<Self, W>) -> Result<R>,
    ) -> Result<R> {
        let mut active = self.start_with_lock(sink, lock)?;
        let result = f(&mut active);
        let stopped = active.stop();
        let value = result?;
        stopped?;
        Ok(value)
    }
}

impl<B: FixedWidth> Start for B {}
