//! Core domain types for the OM tracker protocol.
//!
//! This module provides type-safe wrappers for the values that appear in
//! every frame envelope: the device code, the IMEI, the report timestamp,
//! and the battery voltage carried by sign-in and heartbeat reports.
//!
//! All types validate at construction time, so a value that exists is a
//! value that can be put on the wire.

use crate::constants::{
    CENTIVOLTS_PER_VOLT, FIELD_DELIMITER, FRAME_MARKER, FRAME_TERMINATOR, MAX_FIELD_LENGTH,
    MAX_TIMESTAMP_YEAR, MIN_TIMESTAMP_YEAR, TIMESTAMP_LENGTH, TIMESTAMP_PLACEHOLDER,
};
use crate::error::{Error, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device code identifying the tracker family.
///
/// Every frame carries a short vendor code in its second field; OM-family
/// locks report `OM`. The code is treated as opaque text, but it must be
/// ASCII free of the frame markers and the field delimiter, since it is
/// echoed verbatim into downlink frames.
///
/// # Example
/// ```
/// use lockwire_core::types::DeviceCode;
///
/// let code = DeviceCode::new("OM".to_string()).unwrap();
/// assert_eq!(code.as_str(), "OM");
///
/// // Marker bytes would corrupt the frame and are rejected
/// assert!(DeviceCode::new("O#M".to_string()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceCode(String);

impl DeviceCode {
    /// Create a new device code with validation.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the code is empty, longer than
    /// [`MAX_FIELD_LENGTH`], not ASCII, or contains `*`, `#`, or `,`.
    pub fn new(value: String) -> Result<Self> {
        validate_envelope_text(&value, "device code")?;
        Ok(DeviceCode(value))
    }

    /// Get the device code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the device code into an owned `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for DeviceCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for DeviceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DeviceCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Device IMEI as reported in the frame envelope.
///
/// Production units report standard 15-digit IMEIs, but the length is not
/// enforced: bench units and SIM-swapped locks have been seen reporting
/// shorter identifiers. Content is restricted to ASCII digits.
///
/// # Example
/// ```
/// use lockwire_core::types::Imei;
///
/// let imei = Imei::new("863725031194523".to_string()).unwrap();
/// assert_eq!(imei.as_str(), "863725031194523");
///
/// assert!(Imei::new("8637-250".to_string()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Imei(String);

impl Imei {
    /// Create a new IMEI with validation.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the value is empty, longer than
    /// [`MAX_FIELD_LENGTH`], or contains anything but ASCII digits.
    pub fn new(value: String) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::MalformedFrame {
                message: "IMEI is empty".to_string(),
            });
        }
        if value.len() > MAX_FIELD_LENGTH {
            return Err(Error::MalformedFrame {
                message: format!("IMEI exceeds {MAX_FIELD_LENGTH} bytes"),
            });
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedFrame {
                message: format!("IMEI contains non-digit characters: {value:?}"),
            });
        }
        Ok(Imei(value))
    }

    /// Get the IMEI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the IMEI into an owned `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Imei {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Imei {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Frame timestamp in the tracker's `YYMMDDHHMMSS` wire form.
///
/// Two-digit years map into the 2000-2099 window, so the wrapped datetime
/// is guaranteed to format back to exactly twelve digits. Locks without
/// network time send the all-zeros placeholder instead of a timestamp;
/// [`TrackerTimestamp::parse_wire`] decodes that as `None` rather than
/// treating it as a date.
///
/// # Example
/// ```
/// use lockwire_core::types::TrackerTimestamp;
///
/// let ts = TrackerTimestamp::parse_wire("161201150000").unwrap().unwrap();
/// assert_eq!(ts.format_wire(), "161201150000");
///
/// // The placeholder decodes to None, not an error
/// assert!(TrackerTimestamp::parse_wire("000000000000").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackerTimestamp(NaiveDateTime);

impl TrackerTimestamp {
    /// Wrap a datetime, validating that it fits the wire format.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the year falls outside the
    /// 2000-2099 window representable by a two-digit year.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use lockwire_core::types::TrackerTimestamp;
    ///
    /// let dt = NaiveDate::from_ymd_opt(2016, 12, 1)
    ///     .unwrap()
    ///     .and_hms_opt(15, 0, 0)
    ///     .unwrap();
    /// let ts = TrackerTimestamp::new(dt).unwrap();
    /// assert_eq!(ts.format_wire(), "161201150000");
    /// ```
    pub fn new(value: NaiveDateTime) -> Result<Self> {
        let year = value.year();
        if !(MIN_TIMESTAMP_YEAR..=MAX_TIMESTAMP_YEAR).contains(&year) {
            return Err(Error::MalformedFrame {
                message: format!(
                    "year {year} is outside the {MIN_TIMESTAMP_YEAR}-{MAX_TIMESTAMP_YEAR} wire range"
                ),
            });
        }
        Ok(TrackerTimestamp(value))
    }

    /// Capture the current server time.
    ///
    /// Responses are stamped with local time, matching the device clock
    /// which is set from the GSM network.
    #[must_use]
    pub fn now() -> Self {
        TrackerTimestamp(Local::now().naive_local())
    }

    /// Parse a timestamp token from a frame envelope.
    ///
    /// Returns `Ok(None)` for the all-zeros placeholder sent by locks that
    /// have not acquired network time.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the token is not exactly twelve
    /// ASCII digits or does not name a real calendar datetime.
    pub fn parse_wire(token: &str) -> Result<Option<Self>> {
        if token == TIMESTAMP_PLACEHOLDER {
            return Ok(None);
        }
        if token.len() != TIMESTAMP_LENGTH {
            return Err(Error::MalformedFrame {
                message: format!(
                    "timestamp {token:?} is {} bytes, expected {TIMESTAMP_LENGTH}",
                    token.len()
                ),
            });
        }
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedFrame {
                message: format!("timestamp {token:?} contains non-digit characters"),
            });
        }

        let bytes = token.as_bytes();
        let pair = |i: usize| u32::from(bytes[i] - b'0') * 10 + u32::from(bytes[i + 1] - b'0');

        let year = MIN_TIMESTAMP_YEAR + pair(0) as i32;
        let datetime = NaiveDate::from_ymd_opt(year, pair(2), pair(4))
            .and_then(|date| date.and_hms_opt(pair(6), pair(8), pair(10)))
            .ok_or_else(|| Error::MalformedFrame {
                message: format!("timestamp {token:?} is not a valid calendar datetime"),
            })?;
        Ok(Some(TrackerTimestamp(datetime)))
    }

    /// Format the timestamp as the twelve-digit wire token.
    ///
    /// Infallible: the constructor guarantees the year fits two digits.
    #[must_use]
    pub fn format_wire(&self) -> String {
        format!(
            "{:02}{:02}{:02}{:02}{:02}{:02}",
            self.0.year() - MIN_TIMESTAMP_YEAR,
            self.0.month(),
            self.0.day(),
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }

    /// Get the wrapped datetime.
    #[must_use]
    pub fn inner(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for TrackerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_wire())
    }
}

/// Battery voltage as reported by the lock.
///
/// The wire carries an integer count of centivolts: the token `410` means
/// 4.10 V. Storing the raw count keeps the type `Eq` and round-trip exact;
/// [`BatteryVoltage::volts`] converts for display and telemetry.
///
/// # Example
/// ```
/// use lockwire_core::types::BatteryVoltage;
///
/// let voltage = BatteryVoltage::parse("410").unwrap();
/// assert_eq!(voltage.centivolts(), 410);
/// assert!((voltage.volts() - 4.10).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BatteryVoltage(u16);

impl BatteryVoltage {
    /// Wrap a raw centivolt count.
    #[must_use]
    pub fn from_centivolts(centivolts: u16) -> Self {
        BatteryVoltage(centivolts)
    }

    /// Parse a voltage token from a frame.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the token is empty, contains
    /// non-digit characters, or overflows the centivolt counter.
    pub fn parse(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::MalformedFrame {
                message: "voltage field is empty".to_string(),
            });
        }
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedFrame {
                message: format!("voltage {token:?} contains non-digit characters"),
            });
        }
        let centivolts = token.parse::<u16>().map_err(|_| Error::MalformedFrame {
            message: format!("voltage {token:?} is out of range"),
        })?;
        Ok(BatteryVoltage(centivolts))
    }

    /// Get the raw centivolt count.
    #[inline]
    #[must_use]
    pub fn centivolts(&self) -> u16 {
        self.0
    }

    /// Get the voltage in volts.
    #[inline]
    #[must_use]
    pub fn volts(&self) -> f64 {
        f64::from(self.0) / f64::from(CENTIVOLTS_PER_VOLT)
    }
}

impl FromStr for BatteryVoltage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BatteryVoltage {
    /// Display the voltage in its wire form (centivolts, no padding).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a free-text envelope field against the wire grammar.
///
/// Shared by the envelope text types: content must be non-empty ASCII
/// and must not contain the frame markers or the field delimiter.
fn validate_envelope_text(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::MalformedFrame {
            message: format!("{what} is empty"),
        });
    }
    if value.len() > MAX_FIELD_LENGTH {
        return Err(Error::MalformedFrame {
            message: format!("{what} exceeds {MAX_FIELD_LENGTH} bytes"),
        });
    }
    if !value.is_ascii() {
        return Err(Error::MalformedFrame {
            message: format!("{what} contains non-ASCII bytes"),
        });
    }
    for byte in value.bytes() {
        if byte == FRAME_MARKER || byte == FRAME_TERMINATOR || byte == FIELD_DELIMITER as u8 {
            return Err(Error::MalformedFrame {
                message: format!("{what} contains reserved marker {:?}", char::from(byte)),
            });
        }
    }
    Ok(())
}
