//! Ledger configuration.

use std::time::Duration;

/// Default challenge validity window in seconds.
pub const DEFAULT_VALIDITY_WINDOW_SECS: u64 = 300;

/// Default protocol tag appended to every challenge.
pub const DEFAULT_PROTOCOL_TAG: &str = "starRegistry";

/// Configuration for the Ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// How long a challenge stays valid after issue.
    ///
    /// A submission is admitted only while `now - issued_at` is strictly
    /// less than this window.
    pub validity_window: Duration,
    /// Tag placed in the third field of every challenge message.
    pub protocol_tag: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            validity_window: Duration::from_secs(DEFAULT_VALIDITY_WINDOW_SECS),
            protocol_tag: DEFAULT_PROTOCOL_TAG.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `STARCHAIN_VALIDITY_WINDOW_SECS` (default: 300)
    /// - `STARCHAIN_PROTOCOL_TAG` (default: `starRegistry`)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            validity_window: std::env::var("STARCHAIN_VALIDITY_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.validity_window),
            protocol_tag: std::env::var("STARCHAIN_PROTOCOL_TAG")
                .ok()
                .filter(|tag| !tag.is_empty() && !tag.contains(crate::CHALLENGE_DELIMITER))
                .unwrap_or(defaults.protocol_tag),
        }
    }

    pub fn with_validity_window(mut self, window: Duration) -> Self {
        self.validity_window = window;
        self
    }

    pub fn with_protocol_tag(mut self, tag: impl Into<String>) -> Self {
        self.protocol_tag = tag.into();
        self
    }

    /// The validity window in whole seconds.
    pub fn window_secs(&self) -> u64 {
        self.validity_window.as_secs()
    }
}
