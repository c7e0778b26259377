//! Sign-in report parsing (command `Q0`).
//!
//! A lock sends a sign-in report when it boots and registers with the
//! server. It is the first frame on a fresh connection and usually arrives
//! with the all-zeros timestamp placeholder, since the modem has not yet
//! acquired network time.
//!
//! # Message Format
//!
//! ```text
//! *CMDR,OM,<IMEI>,000000000000,Q0,<VOLTAGE>#
//! ```
//!
//! Where:
//! - `VOLTAGE`: battery voltage in centivolts (`410` = 4.10 V)
//!
//! # Examples
//!
//! ```
//! use lockwire_protocol::commands::signin::SignInReport;
//!
//! let fields = ["410"];
//! let report = SignInReport::parse(&fields).unwrap();
//! assert_eq!(report.voltage().centivolts(), 410);
//! assert!((report.voltage().volts() - 4.10).abs() < 1e-9);
//! ```

use lockwire_core::{BatteryVoltage, Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of data fields in a sign-in report
const MIN_FIELDS: usize = 1;

/// Sign-in registration sent by a lock at boot.
///
/// Carries the battery voltage so fleet software can flag units that
/// rebooted on a depleted cell.
///
/// # Examples
///
/// ```
/// use lockwire_protocol::commands::signin::SignInReport;
///
/// let report = SignInReport::parse(&["400"]).unwrap();
/// assert_eq!(report.voltage().centivolts(), 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInReport {
    voltage: BatteryVoltage,
}

impl SignInReport {
    /// Create a new sign-in report.
    #[must_use]
    pub fn new(voltage: BatteryVoltage) -> Self {
        Self { voltage }
    }

    /// Parse a sign-in report from command data fields.
    ///
    /// Fields beyond the first are ignored; newer firmware appends
    /// extras that older servers are expected to skip.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Fewer than 1 field is provided
    /// - The voltage field is not a plain decimal centivolt count
    pub fn parse(fields: &[&str]) -> Result<Self> {
        if fields.len() < MIN_FIELDS {
            return Err(Error::MalformedFrame {
                message: format!(
                    "sign-in report requires {MIN_FIELDS} field, got {}",
                    fields.len()
                ),
            });
        }

        let voltage = BatteryVoltage::parse(fields[0])?;

        Ok(Self { voltage })
    }

    /// Get the battery voltage.
    #[must_use]
    pub fn voltage(&self) -> BatteryVoltage {
        self.voltage
    }
}
