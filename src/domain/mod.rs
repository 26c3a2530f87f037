mod bearer_token;
mod directions_provider;
mod geo_location;
mod location_poller;
mod location_sample;
mod realtime_channel;
mod route;
mod snapshot;
mod tracking_status;

pub use bearer_token::BearerToken;
pub use directions_provider::{DirectionsProvider, DirectionsRoute, RouteUnavailable};
pub use geo_location::GeoLocation;
pub use location_poller::{LocationPoller, PollError};
pub use location_sample::LocationSample;
pub use realtime_channel::{ChannelError, ChannelMessage, RealtimeChannel, RealtimeConnection};
pub use route::{Route, RouteInfo};
pub use snapshot::Snapshot;
pub use tracking_status::TrackingStatus;
