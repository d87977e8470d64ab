use std::fmt::Debug;
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::active::Session;
use crate::errors::Result;
use crate::lock::ActivityLock;
use crate::text::LinePrinter;
use crate::ui::IndeterminateBar;

/// Delay between two animation steps of a background bar
pub const BACKGROUND_TICK: Duration = Duration::from_millis(100);

/// An indeterminate bar animated by its own thread.
///
/// The thread advances the bar once per [`BACKGROUND_TICK`] while the
/// caller keeps working. Output written through
/// [`printer`](BackgroundBar::printer) is placed above the bar; the line is
/// behind a mutex, so prints and animation steps never interleave.
///
/// Stopping (or dropping) clears the running flag and joins the thread
/// before the line is cleared, so nothing is drawn after the stop.
///
/// ```rust,ignore
/// let bar = IndeterminateBar::new(&BarConfig::default())?.background()?;
/// for lang in ["Python", "Rust"] {
///     writeln!(bar.printer(), "* {lang} [OK]")?;
/// }
/// bar.stop()?;
/// ```
pub struct BackgroundBar<W: Write + Send + 'static = Stdout> {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<IndeterminateBar>>,
    session: Session<W>,
}

impl<W: Write + Send + 'static> BackgroundBar<W> {
    pub(crate) fn spawn(mut bar: IndeterminateBar, sink: W, lock: &ActivityLock) -> Result<Self> {
        let session = Session::open(sink, lock)?;
        let running = Arc::new(AtomicBool::new(true));

        let line = Arc::clone(session.line());
        let flag = Arc::clone(&running);
        let handle = thread::Builder::new()
            .name("gressbar-background".to_string())
            .spawn(move || {
                debug!("background updater started");
                while flag.load(Ordering::Acquire) {
                    let text = bar.next_text();
                    let drawn = line.lock().update(Some(&text));
                    if let Err(e) = drawn {
                        warn!("background bar failed to draw: {}", e);
                    }
                    thread::sleep(BACKGROUND_TICK);
                }
                debug!("background updater stopped");
                bar
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
            session,
        })
    }

    /// A writer whose output lands above the bar
    pub fn printer(&self) -> LinePrinter<W> {
        LinePrinter::new(Arc::clone(self.session.line()))
    }

    /// The text currently held by the line
    pub fn text(&self) -> String {
        self.session.line().lock().text().to_string()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the animation, clear the line and release the lock.
    ///
    /// Returns the bar with its rotation phase as of the last step.
    pub fn stop(mut self) -> Result<Option<IndeterminateBar>> {
        let bar = self.join();
        self.session.finish()?;
        Ok(bar)
    }

    fn join(&mut self) -> Option<IndeterminateBar> {
        self.running.store(false, Ordering::Release);
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(bar) => Some(bar),
            Err(_) => {
                warn!("background updater panicked");
                None
            }
        }
    }
}

impl<W: Write + Send + 'static> Debug for BackgroundBar<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundBar")
            .field("running", &self.is_running())
            .field("text", &self.text())
            .finish()
    }
}

impl<W: Write + Send + 'static> Drop for BackgroundBar<W> {
    fn drop(&mut self) {
        self.join();
    }
}

impl IndeterminateBar {
    /// Animate on standard output under the process-wide lock
    pub fn background(self) -> Result<BackgroundBar<Stdout>> {
        self.background_on(io::stdout())
    }

    /// Animate on `sink` under the process-wide lock
    pub fn background_on<W: Write + Send + 'static>(self, sink: W) -> Result<BackgroundBar<W>> {
        self.background_with_lock(sink, &ActivityLock::global())
    }

    /// Animate on `sink` under `lock`
    pub fn background_with_lock<W: Write + Send + 'static>(
        self,
        sink: W,
        lock: &ActivityLock,
    ) -> Result<BackgroundBar<W>> {
        BackgroundBar::spawn(self, sink, lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BarError;
    use crate::test_utils::SharedBuffer;
    use crate::ui::BarConfig;

    fn bar() -> IndeterminateBar {
        IndeterminateBar::new(&BarConfig::default()).unwrap()
    }

    #[test]
    fn test_background_animates_and_stops() {
        let lock = ActivityLock::new();
        let buffer = SharedBuffer::new();
        let background = bar().background_with_lock(buffer.clone(), &lock).unwrap();
        assert!(lock.is_active());

        thread::sleep(BACKGROUND_TICK * 3);
        let stopped = background.stop().unwrap().unwrap();
        assert!(stopped.phase().unwrap() >= 1);
        assert!(!lock.is_active());

        let output = buffer.contents();
        assert!(output.starts_with("[||||    ]"));
        assert!(output.contains("[ ||||   ]"));

        // Nothing is drawn after the stop
        thread::sleep(BACKGROUND_TICK * 2);
        assert_eq!(buffer.contents(), output);
        assert!(output.ends_with(&format!("{}{}", " ".repeat(10), "\u{8}".repeat(10))));
    }

    #[test]
    fn test_background_holds_lock() {
        let lock = ActivityLock::new();
        let _background = bar().background_with_lock(SharedBuffer::new(), &lock).unwrap();
        let err = bar().background_with_lock(SharedBuffer::new(), &lock).unwrap_err();
        assert!(matches!(err, BarError::AlreadyActive));
    }

    #[test]
    fn test_drop_joins_thread() {
        let lock = ActivityLock::new();
        let buffer = SharedBuffer::new();
        {
            let _background = bar().background_with_lock(buffer.clone(), &lock).unwrap();
            thread::sleep(BACKGROUND_TICK);
        }
        assert!(!lock.is_active());
        let output = buffer.contents();
        thread::sleep(BACKGROUND_TICK * 2);
        assert_eq!(buffer.contents(), output);
    }
}
