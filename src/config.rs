use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 1000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    // Empty means same origin as the page
    pub base_url: String,
    // Pause between the human move landing and the opponent move being requested
    pub opponent_delay_ms: u64,
}

impl ClientConfig {
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: String::new(),
            opponent_delay_ms: DEFAULT_OPPONENT_DELAY_MS,
        }
    }
}
