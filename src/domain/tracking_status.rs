use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TrackingStatus {
    #[default]
    Idle,
    Connecting,
    AwaitingFirstSample,
    Tracking,
    Failed(String),
}

impl TrackingStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, TrackingStatus::Failed(_))
    }
}

impl Display for TrackingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingStatus::Idle => write!(f, "idle"),
            TrackingStatus::Connecting => write!(f, "connecting"),
            TrackingStatus::AwaitingFirstSample => write!(f, "waiting for rider location updates"),
            TrackingStatus::Tracking => write!(f, "tracking"),
            TrackingStatus::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}
