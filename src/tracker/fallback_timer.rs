use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Fires once if no sample was accepted for this long while tracking.
pub const FALLBACK_INTERVAL: Duration = Duration::from_millis(15_000);
/// Fires once after tracking starts if the realtime channel stays silent.
pub const GRACE_INTERVAL: Duration = Duration::from_millis(2_000);

/// A single-shot, restartable timer.
///
/// Each armed fire gets a generation number. The callback receives it and the owner confirms it with
/// [`FallbackTimer::accept`] before acting, so a fire whose sleep elapsed right before it was cancelled
/// or replaced is never acted upon.
#[derive(Debug, Default)]
pub struct FallbackTimer {
    generation: u64,
    pending: Option<PendingFire>,
}

#[derive(Debug)]
struct PendingFire {
    generation: u64,
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl FallbackTimer {
    pub fn new() -> Self {
        FallbackTimer::default()
    }

    /// Cancels any pending fire and schedules `on_fire` to run `after` from now.
    pub fn restart<F, Fut>(&mut self, after: Duration, on_fire: F) -> u64
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        let deadline = Instant::now() + after;
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            on_fire(generation).await;
        });

        self.pending = Some(PendingFire {
            generation,
            deadline,
            handle,
        });
        generation
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }

    /// Consumes the pending fire if `generation` is the one currently armed.
    pub fn accept(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}

impl Drop for FallbackTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
