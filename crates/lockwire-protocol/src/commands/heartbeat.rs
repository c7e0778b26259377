//! Heartbeat parsing (command `H0`).
//!
//! Locks send heartbeats on a timer (typically every few minutes) so the
//! server knows they are alive, whether they are locked, and how healthy
//! battery and signal are.
//!
//! # Message Format
//!
//! ```text
//! *CMDR,OM,<IMEI>,<TIMESTAMP>,H0,<LOCKED>,<VOLTAGE>,<GSM_SIGNAL>#
//! ```
//!
//! Where:
//! - `LOCKED`: `1` if the shackle is closed, `0` if open
//! - `VOLTAGE`: battery voltage in centivolts (`400` = 4.00 V)
//! - `GSM_SIGNAL`: modem signal strength in CSQ units (0-31, 99 = unknown)
//!
//! # Examples
//!
//! ```
//! use lockwire_protocol::commands::heartbeat::Heartbeat;
//!
//! let fields = ["1", "400", "24"];
//! let heartbeat = Heartbeat::parse(&fields).unwrap();
//! assert!(heartbeat.is_locked());
//! assert_eq!(heartbeat.voltage().centivolts(), 400);
//! assert_eq!(heartbeat.gsm_signal(), 24);
//! ```

use lockwire_core::{BatteryVoltage, Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of data fields in a heartbeat
const MIN_FIELDS: usize = 3;

/// Periodic keep-alive report from a lock.
///
/// # Fields
///
/// - `locked`: whether the shackle is currently closed
/// - `voltage`: battery voltage
/// - `gsm_signal`: modem signal strength in CSQ units
///
/// # Examples
///
/// ```
/// use lockwire_protocol::commands::heartbeat::Heartbeat;
///
/// let heartbeat = Heartbeat::parse(&["0", "385", "17"]).unwrap();
/// assert!(!heartbeat.is_locked());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {
    locked: bool,
    voltage: BatteryVoltage,
    gsm_signal: u8,
}

impl Heartbeat {
    /// Create a new heartbeat.
    #[must_use]
    pub fn new(locked: bool, voltage: BatteryVoltage, gsm_signal: u8) -> Self {
        Self {
            locked,
            voltage,
            gsm_signal,
        }
    }

    /// Parse a heartbeat from command data fields.
    ///
    /// Fields beyond the third are ignored.
    ///
    /// # Expected Format
    ///
    /// Fields must be in this order:
    /// 1. Lock state (`1` closed, `0` open, nothing else accepted)
    /// 2. Battery voltage in centivolts
    /// 3. GSM signal in CSQ units
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Fewer than 3 fields are provided
    /// - The lock state is anything but `1` or `0`
    /// - The voltage or signal field is not a plain decimal number
    pub fn parse(fields: &[&str]) -> Result<Self> {
        if fields.len() < MIN_FIELDS {
            return Err(Error::MalformedFrame {
                message: format!(
                    "heartbeat requires {MIN_FIELDS} fields, got {}",
                    fields.len()
                ),
            });
        }

        let locked = match fields[0] {
            "1" => true,
            "0" => false,
            other => {
                return Err(Error::MalformedFrame {
                    message: format!("lock state {other:?} is not \"0\" or \"1\""),
                });
            }
        };

        let voltage = BatteryVoltage::parse(fields[1])?;

        let gsm_signal = fields[2].parse::<u8>().map_err(|_| Error::MalformedFrame {
            message: format!("GSM signal {:?} is not a valid count", fields[2]),
        })?;

        Ok(Self {
            locked,
            voltage,
            gsm_signal,
        })
    }

    /// Returns `true` if the shackle is closed.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Get the battery voltage.
    #[must_use]
    pub fn voltage(&self) -> BatteryVoltage {
        self.voltage
    }

    /// Get the GSM signal strength in CSQ units.
    #[must_use]
    pub fn gsm_signal(&self) -> u8 {
        self.gsm_signal
    }
}
