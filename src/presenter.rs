use crate::domain::TrackingStatus;
use crate::tracker::Subscription;
use tracing::{error, info, instrument};

/// Renders what the tracker publishes: rider position, route estimate and tracking status.
#[instrument(skip_all)]
pub async fn present(mut subscription: Subscription) {
    loop {
        tokio::select! {
            changed = subscription.snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(snapshot) = subscription.snapshots.borrow_and_update().as_ref() {
                    info!(
                        latitude = snapshot.latitude,
                        longitude = snapshot.longitude,
                        route_points = snapshot.route_geometry.len(),
                        "🛵 Rider at {}",
                        snapshot
                    );
                }
            }
            changed = subscription.statuses.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = subscription.statuses.borrow_and_update().clone();
                match status {
                    TrackingStatus::Failed(message) => error!("❌ {}", message),
                    status => info!("ℹ️ Tracking status: {}", status),
                }
            }
        }
    }
}
