mod auth;
mod client;
mod directions;
mod rider_location;

pub use auth::login;
pub use client::new_client;
pub use directions::MapboxDirections;
pub use rider_location::RiderLocationClient;
