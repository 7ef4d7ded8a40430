pub mod api;
pub mod config;
pub mod digest;
pub mod error;
pub mod feeds;
pub mod social;

use std::sync::Arc;
use config::Config;
use social::SocialSource;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub social: Arc<dyn SocialSource>,
}
