use crate::domain::{Snapshot, TrackingStatus};
use tokio::sync::watch;
use tracing::trace;

/// Hands snapshots and status changes to the presentation layer. Publishing never waits for the subscriber;
/// a subscriber that lags only sees the latest value.
#[derive(Debug)]
pub struct Notifier {
    snapshot_tx: watch::Sender<Option<Snapshot>>,
    status_tx: watch::Sender<TrackingStatus>,
}

#[derive(Debug)]
pub struct Subscription {
    pub snapshots: watch::Receiver<Option<Snapshot>>,
    pub statuses: watch::Receiver<TrackingStatus>,
}

impl Notifier {
    pub fn new() -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        let (status_tx, _) = watch::channel(TrackingStatus::Idle);

        Notifier { snapshot_tx, status_tx }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            snapshots: self.snapshot_tx.subscribe(),
            statuses: self.status_tx.subscribe(),
        }
    }

    pub fn publish(&self, snapshot: Snapshot) {
        trace!(?snapshot, "Publishing snapshot");
        self.snapshot_tx.send_replace(Some(snapshot));
    }

    pub fn report(&self, status: TrackingStatus) {
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        });
    }
}
