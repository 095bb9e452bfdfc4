//! Star: the application payload of the registry.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Application data a caller can submit on behalf of an owner.
///
/// The ledger checks a payload before admitting it. The default accepts
/// anything serializable.
pub trait Payload: Serialize {
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

impl Payload for serde_json::Value {}

/// Longest story a star may carry, in bytes.
pub const MAX_STORY_BYTES: usize = 500;

/// A registered star: celestial coordinates plus a free-form story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Declination, e.g. `68° 52' 56.9`.
    pub dec: String,

    /// Right ascension, e.g. `16h 29m 1.0s`.
    pub ra: String,

    pub story: String,

    /// Magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag: Option<String>,

    /// Constellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cen: Option<String>,
}

impl Star {
    pub fn new(dec: impl Into<String>, ra: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            dec: dec.into(),
            ra: ra.into(),
            story: story.into(),
            mag: None,
            cen: None,
        }
    }

    pub fn with_magnitude(mut self, mag: impl Into<String>) -> Self {
        self.mag = Some(mag.into());
        self
    }

    pub fn with_constellation(mut self, cen: impl Into<String>) -> Self {
        self.cen = Some(cen.into());
        self
    }

    /// Check that coordinates are present and the story fits.
    pub fn validate(&self) -> Result<()> {
        if self.dec.trim().is_empty() {
            return Err(CoreError::InvalidStar("declination is empty".into()));
        }
        if self.ra.trim().is_empty() {
            return Err(CoreError::InvalidStar("right ascension is empty".into()));
        }
        if self.story.len() > MAX_STORY_BYTES {
            return Err(CoreError::InvalidStar(format!(
                "story is {} bytes, limit is {}",
                self.story.len(),
                MAX_STORY_BYTES
            )));
        }
        Ok(())
    }
}

impl Payload for Star {
    fn check(&self) -> Result<()> {
        self.validate()
    }
}
