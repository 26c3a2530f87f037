use crate::domain::{
    BearerToken, ChannelError, ChannelMessage, LocationPoller, LocationSample, RealtimeChannel, RealtimeConnection, Route, RouteUnavailable,
    Snapshot, TrackingStatus,
};
use crate::normalizer::normalize;
use crate::tracker::event::TrackingEvent;
use crate::tracker::fallback_timer::{FALLBACK_INTERVAL, FallbackTimer, GRACE_INTERVAL};
use crate::tracker::notifier::Notifier;
use crate::tracker::route_refresher::RouteRefresher;
use crate::tracker::session::TrackingSession;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, error, info, instrument, trace, warn};

/// Name of the realtime event carrying rider positions.
pub const RIDER_LOCATION_EVENT: &str = "riderLocation";

const CHANNEL_BUFFER_SIZE: usize = 16;

/// Reconciles realtime and polled rider positions into a single best-known location.
///
/// The tracker is driven by one event queue, see [`Tracker::run`]. Connecting, timers, polls and route fetches
/// run as spawned tasks that report back through that queue, so every handler runs to completion before the next
/// and none of them waits on the network.
#[derive(Debug)]
pub struct Tracker {
    tx: Sender<TrackingEvent>,
    channel: Arc<dyn RealtimeChannel>,
    poller: Arc<dyn LocationPoller>,
    refresher: RouteRefresher,
    notifier: Notifier,
    auth_token: Option<BearerToken>,
    session: Option<TrackingSession>,
    epoch: u64,
}

#[derive(Clone, Copy, Debug)]
enum Source {
    Realtime,
    Poll,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Realtime => write!(f, "realtime"),
            Source::Poll => write!(f, "poll"),
        }
    }
}

impl Tracker {
    pub fn new(
        tx: Sender<TrackingEvent>,
        channel: Arc<dyn RealtimeChannel>,
        poller: Arc<dyn LocationPoller>,
        refresher: RouteRefresher,
        notifier: Notifier,
        auth_token: Option<BearerToken>,
    ) -> Self {
        Tracker {
            tx,
            channel,
            poller,
            refresher,
            notifier,
            auth_token,
            session: None,
            epoch: 0,
        }
    }

    #[instrument(skip_all)]
    pub async fn run(mut self, mut rx: Receiver<TrackingEvent>) {
        while let Some(event) = rx.recv().await {
            if matches!(event, TrackingEvent::Shutdown) {
                self.stop();
                break;
            }
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: TrackingEvent) {
        match event {
            TrackingEvent::Start { order_hash } => {
                if let Err(e) = self.start(order_hash) {
                    error!("❌ Unable to start tracking: {}", e);
                }
            }
            TrackingEvent::Shutdown => self.stop(),
            TrackingEvent::Connected { epoch, result } if self.is_current(epoch) => self.on_connected(result),
            TrackingEvent::Connected { result: Ok(connection), .. } => {
                debug!("Closing a realtime connection opened for a stopped tracking session");
                connection.disconnect();
            }
            TrackingEvent::Channel { epoch, message } if self.is_current(epoch) => match message {
                ChannelMessage::Event(raw) => self.on_realtime_message(raw),
                ChannelMessage::Failed(e) => self.on_channel_error(e),
            },
            TrackingEvent::TimerFired { epoch, generation } if self.is_current(epoch) => self.on_timer_fired(generation),
            TrackingEvent::PollCompleted { epoch, result } if self.is_current(epoch) => match result {
                Ok(raw) => self.on_poll_result(raw),
                Err(e) => warn!("⚠️ Unable to fetch the last known location: {}", e),
            },
            TrackingEvent::RouteRefreshed { epoch, sample, result } if self.is_current(epoch) => self.on_route_refreshed(sample, result),
            event => trace!(?event, "Ignoring event of a stopped tracking session"),
        }
    }

    /// Starts tracking `order_hash`: arms the grace timer and opens the realtime channel in the background.
    ///
    /// The channel reports back with [`TrackingEvent::Connected`]. A failed connection is reported to the
    /// presentation layer but keeps the session, so the grace timer still polls.
    #[instrument(skip(self))]
    pub fn start(&mut self, order_hash: String) -> Result<(), TrackingError> {
        if self.session.is_some() {
            return Err(TrackingError::AlreadyTracking);
        }

        let Some(auth_token) = self.auth_token.clone() else {
            let e = TrackingError::AuthRequired;
            self.notifier.report(TrackingStatus::Failed(e.to_string()));
            return Err(e);
        };

        info!("🛵 Starting to track rider...");
        self.epoch += 1;
        let epoch = self.epoch;
        let mut session = TrackingSession::new(epoch, order_hash, auth_token);
        arm(&mut session.timer, GRACE_INTERVAL, self.tx.clone(), epoch);

        let (channel_tx, mut channel_rx) = mpsc::channel::<ChannelMessage>(CHANNEL_BUFFER_SIZE);
        let tx = self.tx.clone();
        session.forwarder = Some(tokio::spawn(async move {
            while let Some(message) = channel_rx.recv().await {
                if tx.send(TrackingEvent::Channel { epoch, message }).await.is_err() {
                    break;
                }
            }
        }));

        let channel = self.channel.clone();
        let tx = self.tx.clone();
        let room = session.order_hash.clone();
        let auth_token = session.auth_token.clone();
        session.connect = Some(tokio::spawn(async move {
            let result = channel.open(&auth_token, &room, RIDER_LOCATION_EVENT, channel_tx).await;
            if let Err(SendError(TrackingEvent::Connected { result: Ok(connection), .. })) =
                tx.send(TrackingEvent::Connected { epoch, result }).await
            {
                connection.disconnect();
            }
        }));

        self.session = Some(session);
        self.report(TrackingStatus::Connecting);
        Ok(())
    }

    /// Stops tracking. Nothing is published for the stopped session after this returns.
    pub fn stop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        info!(order_hash = session.order_hash, "🛑 Stopping tracking...");
        session.release();
        self.notifier.report(TrackingStatus::Idle);
        info!(order_hash = session.order_hash, "🛑 Stopping tracking... OK");
    }

    pub fn on_realtime_message(&mut self, raw: Value) {
        self.accept(raw, Source::Realtime);
    }

    pub fn on_poll_result(&mut self, raw: Value) {
        self.accept(raw, Source::Poll);
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.session.as_ref().is_some_and(|session| session.epoch == epoch)
    }

    fn on_connected(&mut self, result: Result<Box<dyn RealtimeConnection>, ChannelError>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.connect = None;

        match result {
            Ok(connection) => {
                session.connection = Some(connection);
                info!(room = session.order_hash, "🛵 Starting to track rider... OK");
                if session.location.is_none() {
                    self.report(TrackingStatus::AwaitingFirstSample);
                }
            }
            Err(e) => {
                error!("❌ Realtime channel connection failed: {}", e);
                self.report(TrackingStatus::Failed(format!("Connection error: {}", e)));
            }
        }
    }

    fn accept(&mut self, raw: Value, source: Source) {
        let sample = match normalize(&raw) {
            Ok(sample) => sample,
            Err(e) => {
                warn!(%source, payload = %raw, "⚠️ Discarding invalid location: {}", e);
                return;
            }
        };

        let Some(session) = self.session.as_mut() else {
            debug!(%source, "Not tracking, discarding location {}", sample.position());
            return;
        };

        if session.location.as_ref().is_some_and(|current| sample.is_older_than(current)) {
            debug!(%source, timestamp = sample.timestamp, "Discarding location older than the current one");
            return;
        }

        info!(%source, timestamp = sample.timestamp, "📍 Rider location {}", sample.position());
        session.location = Some(sample.clone());
        arm(&mut session.timer, FALLBACK_INTERVAL, self.tx.clone(), session.epoch);
        self.notifier.publish(Snapshot::new(&sample, session.route.as_ref()));

        let refresher = self.refresher.clone();
        let tx = self.tx.clone();
        let epoch = session.epoch;
        let route_fetch = tokio::spawn(async move {
            let result = refresher.refresh(&sample).await;
            let _ = tx.send(TrackingEvent::RouteRefreshed { epoch, sample, result }).await;
        });
        if let Some(previous) = session.route_fetch.replace(route_fetch) {
            previous.abort();
        }

        self.report(TrackingStatus::Tracking);
    }

    fn on_timer_fired(&mut self, generation: u64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if !session.timer.accept(generation) {
            trace!(generation, "Ignoring a superseded fallback timer");
            return;
        }

        info!("⏳ No location update received in time, polling the last known location...");
        let poller = self.poller.clone();
        let tx = self.tx.clone();
        let epoch = session.epoch;
        let order_hash = session.order_hash.clone();
        let auth_token = session.auth_token.clone();
        let poll = tokio::spawn(async move {
            let result = poller.last_known_location(&order_hash, &auth_token).await;
            let _ = tx.send(TrackingEvent::PollCompleted { epoch, result }).await;
        });
        if let Some(previous) = session.poll.replace(poll) {
            previous.abort();
        }
    }

    fn on_route_refreshed(&mut self, sample: LocationSample, result: Result<Route, RouteUnavailable>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match result {
            Ok(route) if session.location.as_ref() == Some(&sample) => {
                info!(
                    distance_km = route.info.distance_km,
                    duration_minutes = route.info.duration_minutes,
                    "🗺️ Route to destination updated"
                );
                session.route = Some(route);
                self.notifier.publish(Snapshot::new(&sample, session.route.as_ref()));
            }
            Ok(_) => debug!("Discarding route computed for a superseded location"),
            Err(e) => warn!("⚠️ Unable to refresh the route, keeping the previous estimate: {}", e),
        }
    }

    fn on_channel_error(&mut self, e: ChannelError) {
        error!("❌ Realtime channel failed: {}", e);
        self.report(TrackingStatus::Failed(format!("Connection error: {}", e)));
    }

    /// A failure stays visible until tracking stops.
    fn report(&mut self, status: TrackingStatus) {
        if let Some(session) = self.session.as_mut() {
            if session.status.is_failed() && !status.is_failed() {
                return;
            }
            session.status = status.clone();
        }
        self.notifier.report(status);
    }
}

/// Inspection of the tracker's state for tests.
#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackerState {
    Idle,
    AwaitingFirstSample,
    Tracking,
}

#[cfg(test)]
impl Tracker {
    pub fn state(&self) -> TrackerState {
        match &self.session {
            None => TrackerState::Idle,
            Some(session) if session.location.is_none() => TrackerState::AwaitingFirstSample,
            Some(_) => TrackerState::Tracking,
        }
    }

    pub fn location(&self) -> Option<&LocationSample> {
        self.session.as_ref().and_then(|session| session.location.as_ref())
    }

    pub fn route_info(&self) -> crate::domain::RouteInfo {
        self.session
            .as_ref()
            .and_then(|session| session.route.as_ref())
            .map(|route| route.info)
            .unwrap_or_default()
    }

    pub fn fallback_deadline(&self) -> Option<tokio::time::Instant> {
        self.session.as_ref().and_then(|session| session.timer.deadline())
    }
}

fn arm(timer: &mut FallbackTimer, after: Duration, tx: Sender<TrackingEvent>, epoch: u64) {
    timer.restart(after, move |generation| async move {
        let _ = tx.send(TrackingEvent::TimerFired { epoch, generation }).await;
    });
    trace!(deadline = ?timer.deadline(), "Fallback timer armed");
}

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("authentication required, please login first")]
    AuthRequired,
    #[error("already tracking")]
    AlreadyTracking,
}
