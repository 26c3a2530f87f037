use crate::app_config::AppConfig;
use crate::http::{MapboxDirections, RiderLocationClient};
use crate::presenter::present;
use crate::realtime::SocketIoChannel;
use crate::tracker::{Notifier, RouteRefresher, Tracker, TrackingEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::{signal, task};
use tracing::info;

mod app_config;
mod domain;
mod extensions;
mod geo_location_deserializer;
mod http;
mod normalizer;
mod presenter;
mod realtime;
mod tracker;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let client = http::new_client(&config)?;
    let session = http::login(&client, &config).await?;
    info!("✅  Welcome, {}", session.user.display_name());

    let notifier = Notifier::new();
    let subscription = notifier.subscribe();
    task::spawn(async move {
        present(subscription).await;
    });
    info!("✅  Initialized presenter");

    let timeout = config.http().request_timeout();
    let channel = SocketIoChannel::new(config.realtime().url());
    let poller = RiderLocationClient::new(client.clone(), config.api().url(), timeout);
    let directions = MapboxDirections::new(client.clone(), config.directions(), timeout);
    let refresher = RouteRefresher::new(Arc::new(directions), config.tracking().destination());

    let (tx, rx) = mpsc::channel::<TrackingEvent>(config.tracking().event_buffer_size());
    let tracker = Tracker::new(tx.clone(), Arc::new(channel), Arc::new(poller), refresher, notifier, Some(session.token));
    let tracker_handle = task::spawn(tracker.run(rx));
    info!("✅  Initialized tracker");

    tx.send(TrackingEvent::Start {
        order_hash: config.tracking().order_hash().to_string(),
    })
    .await?;
    info!("🔥 {} is up and running, tracking {}", env!("CARGO_PKG_NAME"), config.tracking().order_hash());

    signal::ctrl_c().await?;
    info!("🛑 Shutting down...");
    tx.send(TrackingEvent::Shutdown).await?;
    tracker_handle.await?;
    info!("🛑 Shutting down... OK");

    Ok(())
}
