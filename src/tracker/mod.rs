mod event;
mod fallback_timer;
mod notifier;
mod reconciler;
mod route_refresher;
mod session;

pub use event::TrackingEvent;
pub use notifier::{Notifier, Subscription};
pub use reconciler::Tracker;
pub use route_refresher::RouteRefresher;
