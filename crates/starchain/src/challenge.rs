//! Ownership challenges.
//!
//! A challenge is the string `address:issued_at:tag`. The ledger keeps no
//! record of the challenges it issued; the timestamp inside the message is
//! the only freshness control, and the signature binds it to the address.

use starchain_core::Address;

use crate::error::DenialReason;

/// Separator between challenge fields.
pub const CHALLENGE_DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub address: Address,
    /// Unix seconds at issue.
    pub issued_at: i64,
    pub tag: String,
}

impl Challenge {
    pub fn issue(address: &Address, issued_at: i64, tag: &str) -> Self {
        Self {
            address: address.clone(),
            issued_at,
            tag: tag.to_string(),
        }
    }

    /// Render the message the caller must sign.
    pub fn to_message(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            self.address,
            self.issued_at,
            self.tag,
            d = CHALLENGE_DELIMITER
        )
    }

    /// Parse a challenge message.
    ///
    /// The message must have exactly three fields and the second must be an
    /// integer timestamp.
    pub fn parse(message: &str) -> Result<Self, DenialReason> {
        let fields: Vec<&str> = message.split(CHALLENGE_DELIMITER).collect();
        let [address, issued_at, tag] = fields.as_slice() else {
            return Err(DenialReason::MalformedChallenge(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        };

        let issued_at = issued_at.parse::<i64>().map_err(|_| {
            DenialReason::MalformedChallenge(format!("timestamp {:?} is not an integer", issued_at))
        })?;

        Ok(Self {
            address: Address::from(*address),
            issued_at,
            tag: tag.to_string(),
        })
    }

    /// Seconds between issue and `now`. Negative when issued in the future.
    pub fn elapsed(&self, now: i64) -> i64 {
        now.saturating_sub(self.issued_at)
    }

    /// Check the time window: `0 <= now - issued_at < window_secs`.
    pub fn check_fresh(&self, now: i64, window_secs: u64) -> Result<(), DenialReason> {
        let elapsed = self.elapsed(now);
        if elapsed < 0 {
            return Err(DenialReason::ChallengeFromFuture {
                issued_at: self.issued_at,
            });
        }
        if elapsed as u64 >= window_secs {
            return Err(DenialReason::ChallengeExpired {
                elapsed,
                window: window_secs,
            });
        }
        Ok(())
    }

    pub fn is_fresh(&self, now: i64, window_secs: u64) -> bool {
        self.check_fresh(now, window_secs).is_ok()
    }
}
