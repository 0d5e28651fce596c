//! Application state shared across routes

use std::sync::Arc;

use tracing::info;

use crate::app::registry::BotRegistry;
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub bots: Arc<BotRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        // One bot instance per configured name
        let bots = Arc::new(BotRegistry::new());
        for name in &config.bot_names {
            bots.insert(config.bot_config(name));
            info!(bot = %name, "Registered bot");
        }

        Self { config, bots }
    }
}
