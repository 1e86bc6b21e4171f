//! External Services
//!
//! This module contains services that interact with the backend:
//! - api: one task per capture/upload/stop/download request
//! - poller: periodic prediction queries while streaming
//! - feed: the long-lived video feed reader

pub mod api;
pub mod feed;
pub mod poller;

// Re-export commonly used types for convenience
pub use api::{spawn_api_service, ApiRequest};
pub use feed::FeedStream;
pub use poller::{PredictionPoller, POLL_INTERVAL};
