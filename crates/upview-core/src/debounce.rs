//! Single-slot debounce timer.
//!
//! Scheduling a task replaces whatever was scheduled before: the previous
//! timer is cancelled if it has not fired yet. Once a timer fires, its task
//! runs to completion even if something new is scheduled afterwards.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Quiet period used for the search field
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Handle to the timer currently waiting, if any.
struct Pending {
    /// Dropping this cancels the timer.
    _cancel: oneshot::Sender<()>,
    fired: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Debounce primitive with a single active timer.
///
/// Must be used from within a Tokio runtime.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use upview_core::Debouncer;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut debouncer = Debouncer::new(Duration::from_millis(500));
/// debouncer.schedule(async { println!("first") });
/// debouncer.schedule(async { println!("only this one runs") });
/// # }
/// ```
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once `delay` has elapsed without another call to
    /// `schedule` or `cancel`.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let fired = Arc::new(AtomicBool::new(false));
        let delay = self.delay;

        let handle = tokio::spawn({
            let fired = Arc::clone(&fired);
            async move {
                tokio::select! {
                    _ = sleep(delay) => {}
                    _ = cancel_rx => return,
                }
                fired.store(true, Ordering::SeqCst);
                task.await;
            }
        });

        // Replacing the slot drops the old sender, which cancels its timer.
        self.pending = Some(Pending {
            _cancel: cancel_tx,
            fired,
            handle,
        });
    }

    /// Cancel the waiting timer. Returns `true` if one was waiting.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.pending = None;
        was_pending
    }

    /// Whether a timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.fired.load(Ordering::SeqCst) && !p.handle.is_finished())
    }
}
