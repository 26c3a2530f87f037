use crate::domain::{BearerToken, LocationSample, RealtimeConnection, Route, TrackingStatus};
use crate::tracker::fallback_timer::FallbackTimer;
use tokio::task::JoinHandle;

/// State of one tracking run, from `start` until `stop`.
#[derive(Debug)]
pub struct TrackingSession {
    pub epoch: u64,
    pub order_hash: String,
    pub auth_token: BearerToken,
    pub location: Option<LocationSample>,
    pub route: Option<Route>,
    pub status: TrackingStatus,
    pub timer: FallbackTimer,
    pub connection: Option<Box<dyn RealtimeConnection>>,
    pub connect: Option<JoinHandle<()>>,
    pub poll: Option<JoinHandle<()>>,
    pub route_fetch: Option<JoinHandle<()>>,
    pub forwarder: Option<JoinHandle<()>>,
}

impl TrackingSession {
    pub fn new(epoch: u64, order_hash: String, auth_token: BearerToken) -> Self {
        TrackingSession {
            epoch,
            order_hash,
            auth_token,
            location: None,
            route: None,
            status: TrackingStatus::Idle,
            timer: FallbackTimer::new(),
            connection: None,
            connect: None,
            poll: None,
            route_fetch: None,
            forwarder: None,
        }
    }

    /// Cancels the fallback timer, aborts all in-flight work and closes the realtime connection.
    pub fn release(&mut self) {
        self.timer.cancel();
        let handles = [self.connect.take(), self.poll.take(), self.route_fetch.take(), self.forwarder.take()];
        for handle in handles.into_iter().flatten() {
            handle.abort();
        }
        if let Some(connection) = self.connection.take() {
            connection.disconnect();
        }
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.release();
    }
}
