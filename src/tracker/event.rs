use crate::domain::{ChannelError, ChannelMessage, LocationSample, PollError, RealtimeConnection, Route, RouteUnavailable};
use serde_json::Value;

/// Everything the tracker reacts to. Events produced by spawned work carry the epoch of the session that
/// spawned them, so late arrivals from a stopped session are ignored.
#[derive(Debug)]
pub enum TrackingEvent {
    Start { order_hash: String },
    Shutdown,
    Connected { epoch: u64, result: Result<Box<dyn RealtimeConnection>, ChannelError> },
    Channel { epoch: u64, message: ChannelMessage },
    TimerFired { epoch: u64, generation: u64 },
    PollCompleted { epoch: u64, result: Result<Value, PollError> },
    RouteRefreshed { epoch: u64, sample: LocationSample, result: Result<Route, RouteUnavailable> },
}
