//! Registry of hosted bot instances

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::bot::{Bot, BotConfig};

/// Shared handle to one bot; the mutex serializes lifecycle calls for that bot
pub type BotHandle = Arc<Mutex<Bot>>;

/// Bots keyed by name
pub struct BotRegistry {
    bots: DashMap<String, BotHandle>,
}

impl BotRegistry {
    pub fn new() -> Self {
        Self {
            bots: DashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<BotHandle> {
        self.bots.get(name).map(|b| b.value().clone())
    }

    /// Register a bot, replacing any previous instance with the same name
    pub fn insert(&self, config: BotConfig) -> BotHandle {
        let name = config.name.clone();
        let handle = Arc::new(Mutex::new(Bot::new(config)));
        self.bots.insert(name, handle.clone());
        handle
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// Names of all hosted bots, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bots.iter().map(|b| b.key().clone()).collect();
        names.sort();
        names
    }
}

impl Default for BotRegistry {
    fn default() -> Self {
        Self::new()
    }
}
