//! End-of-ride lock report parsing (command `L1`).
//!
//! When a rider closes the shackle at the end of a trip, the lock reports
//! who rode, when the ride started, and how long it lasted. The server
//! must acknowledge this report, or the lock will keep retransmitting it
//! and the ride can be billed twice.
//!
//! # Message Format
//!
//! ```text
//! *CMDR,OM,<IMEI>,<TIMESTAMP>,L1,<USER_ID>,<UNLOCKED_AT>,<RIDING_TIME>#
//! ```
//!
//! Where:
//! - `USER_ID`: rider identifier, echoed from the unlock command
//! - `UNLOCKED_AT`: ride start as a Unix timestamp
//! - `RIDING_TIME`: ride duration as reported by the firmware
//!
//! All three fields are billing-relevant and pass through the server into
//! backend records, so they are kept as [`RawToken`]s: the bytes that
//! arrived are the bytes that get stored, zero-padding and all.
//!
//! # Examples
//!
//! ```
//! use lockwire_protocol::commands::lock::LockEvent;
//!
//! let fields = ["1", "1497689816", "20"];
//! let event = LockEvent::parse(&fields).unwrap();
//! assert_eq!(event.user_id().as_str(), "1");
//! assert_eq!(event.unlocked_at().as_str(), "1497689816");
//! assert_eq!(event.riding_time().as_str(), "20");
//! ```

use crate::field::RawToken;
use lockwire_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of data fields in a lock report
const MIN_FIELDS: usize = 3;

/// End-of-ride report sent when the shackle closes.
///
/// # Fields
///
/// - `user_id`: rider identifier from the unlock command
/// - `unlocked_at`: ride start time, Unix seconds
/// - `riding_time`: ride duration
///
/// The fields stay opaque. Firmware builds disagree on details like
/// zero-padding and units, and the backend matches these values
/// byte-for-byte against what it issued at unlock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    user_id: RawToken,
    unlocked_at: RawToken,
    riding_time: RawToken,
}

impl LockEvent {
    /// Create a new lock event from its parts.
    #[must_use]
    pub fn new(user_id: RawToken, unlocked_at: RawToken, riding_time: RawToken) -> Self {
        Self {
            user_id,
            unlocked_at,
            riding_time,
        }
    }

    /// Parse a lock event from command data fields.
    ///
    /// Fields beyond the third are ignored.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Fewer than 3 fields are provided
    /// - Any field contains reserved or non-ASCII bytes
    pub fn parse(fields: &[&str]) -> Result<Self> {
        if fields.len() < MIN_FIELDS {
            return Err(Error::MalformedFrame {
                message: format!(
                    "lock report requires {MIN_FIELDS} fields, got {}",
                    fields.len()
                ),
            });
        }

        Ok(Self {
            user_id: RawToken::new(fields[0].to_string())?,
            unlocked_at: RawToken::new(fields[1].to_string())?,
            riding_time: RawToken::new(fields[2].to_string())?,
        })
    }

    /// Get the rider identifier.
    #[must_use]
    pub fn user_id(&self) -> &RawToken {
        &self.user_id
    }

    /// Get the ride start time token.
    #[must_use]
    pub fn unlocked_at(&self) -> &RawToken {
        &self.unlocked_at
    }

    /// Get the ride duration token.
    #[must_use]
    pub fn riding_time(&self) -> &RawToken {
        &self.riding_time
    }
}
