//! GNSS position report parsing (command `D0`).
//!
//! Position reports relay the lock's GNSS receiver output in an
//! RMC-flavored field layout. The receiver keeps reporting while it has
//! no satellite fix; those frames carry a `V` (void) status flag and
//! mostly empty fields.
//!
//! # Message Format
//!
//! ```text
//! *CMDR,OM,<IMEI>,<TS>,D0,<RSV>,<TIME>,<STATUS>,<LAT>,<NS>,<LON>,<EW>,<SPEED>,<HEADING>,<DATE>,<MAG>,<MAGDIR>,<MODE>#
//! ```
//!
//! Thirteen data fields, in order:
//!
//! | # | Field | Notes |
//! |---|-------|-------|
//! | 0 | reserved | always `0` in observed traffic, not interpreted |
//! | 1 | time | UTC `hhmmss.ss`, kept raw |
//! | 2 | status | `A` = active fix, `V` = void |
//! | 3 | latitude | `ddmm.mmmmm`, kept raw |
//! | 4 | N/S | hemisphere letter |
//! | 5 | longitude | `dddmm.mmmmm`, kept raw |
//! | 6 | E/W | hemisphere letter |
//! | 7 | ground rate | speed over ground, kept raw |
//! | 8 | heading | course over ground, kept raw |
//! | 9 | date | UTC `ddmmyy`, kept raw |
//! | 10 | magnetic degrees | magnetic variation, kept raw |
//! | 11 | magnetic direction | variation direction letter, kept raw |
//! | 12 | mode | `A` = automatic, anything else degraded |
//!
//! Coordinate strings stay raw: converting `4824.07609` to a float and
//! back loses the trailing zeros some backends key on. Callers that want
//! decimal degrees convert at the edge.
//!
//! # Void fixes
//!
//! When the status flag is `V`, the navigation fields are forced to their
//! empty values without reading their tokens. Receivers in tunnels and
//! racks emit stale or half-written data in those slots; only the status
//! flag says whether the rest can be trusted. Time and date are kept even
//! without a fix, since the receiver tracks them from its RTC.
//!
//! # Examples
//!
//! ```
//! use lockwire_protocol::commands::position::{FixStatus, PositionReport};
//!
//! let fields = [
//!     "0", "205719.00", "A", "4824.07609", "N", "00959.40370", "E",
//!     "05", "2.02", "200121", "494.6", "M", "A",
//! ];
//! let report = PositionReport::parse(&fields).unwrap();
//! assert_eq!(report.status(), FixStatus::Active);
//! assert_eq!(report.latitude().unwrap().as_str(), "4824.07609");
//! ```

use crate::field::RawToken;
use lockwire_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of data fields in a position report
const MIN_FIELDS: usize = 13;

/// GNSS fix status flag.
///
/// # Examples
///
/// ```
/// use lockwire_protocol::commands::position::FixStatus;
///
/// assert_eq!(FixStatus::from_wire("A").unwrap(), FixStatus::Active);
/// assert_eq!(FixStatus::from_wire("V").unwrap(), FixStatus::Invalid);
/// assert!(FixStatus::from_wire("X").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixStatus {
    /// The receiver has a satellite fix; navigation fields are live.
    Active, // A
    /// No fix; navigation fields carry stale or empty data.
    Invalid, // V
}

impl FixStatus {
    /// Parse the status flag from its wire token.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` for anything but `A` or `V`.
    /// Matching is case-sensitive.
    pub fn from_wire(token: &str) -> Result<Self> {
        match token {
            "A" => Ok(FixStatus::Active),
            "V" => Ok(FixStatus::Invalid),
            _ => Err(Error::MalformedFrame {
                message: format!("fix status {token:?} is not \"A\" or \"V\""),
            }),
        }
    }

    /// Returns `true` if the receiver had a satellite fix.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, FixStatus::Active)
    }
}

impl fmt::Display for FixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FixStatus::Active => "active",
            FixStatus::Invalid => "invalid",
        };
        write!(f, "{name}")
    }
}

/// Latitude hemisphere letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatitudeHemisphere {
    North, // N
    South, // S
    /// No fix; the hemisphere slot carried nothing usable.
    Invalid,
}

impl LatitudeHemisphere {
    /// Parse the hemisphere from its wire token.
    ///
    /// Only called for active fixes; void fixes force [`Self::Invalid`]
    /// without reading the token.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` for anything but `N` or `S`.
    pub fn from_wire(token: &str) -> Result<Self> {
        match token {
            "N" => Ok(LatitudeHemisphere::North),
            "S" => Ok(LatitudeHemisphere::South),
            _ => Err(Error::MalformedFrame {
                message: format!("latitude hemisphere {token:?} is not \"N\" or \"S\""),
            }),
        }
    }
}

impl fmt::Display for LatitudeHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LatitudeHemisphere::North => "north",
            LatitudeHemisphere::South => "south",
            LatitudeHemisphere::Invalid => "invalid",
        };
        write!(f, "{name}")
    }
}

/// Longitude hemisphere letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongitudeHemisphere {
    East, // E
    West, // W
    /// No fix; the hemisphere slot carried nothing usable.
    Invalid,
}

impl LongitudeHemisphere {
    /// Parse the hemisphere from its wire token.
    ///
    /// Only called for active fixes; void fixes force [`Self::Invalid`]
    /// without reading the token.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` for anything but `E` or `W`.
    pub fn from_wire(token: &str) -> Result<Self> {
        match token {
            "E" => Ok(LongitudeHemisphere::East),
            "W" => Ok(LongitudeHemisphere::West),
            _ => Err(Error::MalformedFrame {
                message: format!("longitude hemisphere {token:?} is not \"E\" or \"W\""),
            }),
        }
    }
}

impl fmt::Display for LongitudeHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LongitudeHemisphere::East => "east",
            LongitudeHemisphere::West => "west",
            LongitudeHemisphere::Invalid => "invalid",
        };
        write!(f, "{name}")
    }
}

/// Positioning mode indicator.
///
/// GNSS chipsets disagree on the letters they emit for degraded modes
/// (`D`, `E`, `N`, and others have been observed), so anything that is
/// not the automatic marker falls back to [`Self::Invalid`] instead of
/// failing the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionMode {
    /// Autonomous GNSS fix (`A`).
    Automatic,
    /// Degraded, estimated, or absent mode indicator.
    Invalid,
}

impl PositionMode {
    /// Decode the mode from its wire token. Never fails.
    #[must_use]
    pub fn from_wire(token: &str) -> Self {
        match token {
            "A" => PositionMode::Automatic,
            _ => PositionMode::Invalid,
        }
    }

    /// Returns `true` for an autonomous fix.
    #[inline]
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        matches!(self, PositionMode::Automatic)
    }
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PositionMode::Automatic => "automatic",
            PositionMode::Invalid => "invalid",
        };
        write!(f, "{name}")
    }
}

/// GNSS position report from a lock.
///
/// Navigation fields are optional because void fixes leave them empty.
/// Time and date are always present; the receiver keeps wall-clock time
/// even when it cannot see satellites.
///
/// # Examples
///
/// ```
/// use lockwire_protocol::commands::position::PositionReport;
///
/// let fields = [
///     "0", "140516.00", "V", "", "", "", "", "", "", "180121", "", "", "N",
/// ];
/// let report = PositionReport::parse(&fields).unwrap();
/// assert!(!report.has_fix());
/// assert!(report.latitude().is_none());
/// assert_eq!(report.date().as_str(), "180121");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReport {
    time: RawToken,
    status: FixStatus,
    latitude: Option<RawToken>,
    latitude_hemisphere: LatitudeHemisphere,
    longitude: Option<RawToken>,
    longitude_hemisphere: LongitudeHemisphere,
    ground_rate: Option<RawToken>,
    heading: Option<RawToken>,
    date: RawToken,
    magnetic_degrees: Option<RawToken>,
    magnetic_direction: Option<RawToken>,
    mode: PositionMode,
}

impl PositionReport {
    /// Parse a position report from command data fields.
    ///
    /// Fields beyond the thirteenth are ignored. For void fixes the
    /// navigation slots are not read at all; whatever the receiver left
    /// in them cannot fail the frame or leak into the report.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Fewer than 13 fields are provided
    /// - The status flag is not `A` or `V`
    /// - The fix is active and a hemisphere letter is wrong
    /// - A kept field contains reserved or non-ASCII bytes
    pub fn parse(fields: &[&str]) -> Result<Self> {
        if fields.len() < MIN_FIELDS {
            return Err(Error::MalformedFrame {
                message: format!(
                    "position report requires {MIN_FIELDS} fields, got {}",
                    fields.len()
                ),
            });
        }

        // fields[0] is the reserved lead slot, not interpreted
        let time = RawToken::new(fields[1].to_string())?;
        let status = FixStatus::from_wire(fields[2])?;
        let date = RawToken::new(fields[9].to_string())?;

        if !status.is_active() {
            return Ok(Self {
                time,
                status,
                latitude: None,
                latitude_hemisphere: LatitudeHemisphere::Invalid,
                longitude: None,
                longitude_hemisphere: LongitudeHemisphere::Invalid,
                ground_rate: None,
                heading: None,
                date,
                magnetic_degrees: None,
                magnetic_direction: None,
                mode: PositionMode::Invalid,
            });
        }

        Ok(Self {
            time,
            status,
            latitude: optional_token(fields[3])?,
            latitude_hemisphere: LatitudeHemisphere::from_wire(fields[4])?,
            longitude: optional_token(fields[5])?,
            longitude_hemisphere: LongitudeHemisphere::from_wire(fields[6])?,
            ground_rate: optional_token(fields[7])?,
            heading: optional_token(fields[8])?,
            date,
            magnetic_degrees: optional_token(fields[10])?,
            magnetic_direction: optional_token(fields[11])?,
            mode: PositionMode::from_wire(fields[12]),
        })
    }

    /// Get the UTC time-of-day token.
    #[must_use]
    pub fn time(&self) -> &RawToken {
        &self.time
    }

    /// Get the fix status.
    #[must_use]
    pub fn status(&self) -> FixStatus {
        self.status
    }

    /// Get the raw latitude string, if the fix carried one.
    #[must_use]
    pub fn latitude(&self) -> Option<&RawToken> {
        self.latitude.as_ref()
    }

    /// Get the latitude hemisphere.
    #[must_use]
    pub fn latitude_hemisphere(&self) -> LatitudeHemisphere {
        self.latitude_hemisphere
    }

    /// Get the raw longitude string, if the fix carried one.
    #[must_use]
    pub fn longitude(&self) -> Option<&RawToken> {
        self.longitude.as_ref()
    }

    /// Get the longitude hemisphere.
    #[must_use]
    pub fn longitude_hemisphere(&self) -> LongitudeHemisphere {
        self.longitude_hemisphere
    }

    /// Get the speed-over-ground token, if present.
    #[must_use]
    pub fn ground_rate(&self) -> Option<&RawToken> {
        self.ground_rate.as_ref()
    }

    /// Get the course-over-ground token, if present.
    #[must_use]
    pub fn heading(&self) -> Option<&RawToken> {
        self.heading.as_ref()
    }

    /// Get the UTC date token.
    #[must_use]
    pub fn date(&self) -> &RawToken {
        &self.date
    }

    /// Get the magnetic variation token, if present.
    #[must_use]
    pub fn magnetic_degrees(&self) -> Option<&RawToken> {
        self.magnetic_degrees.as_ref()
    }

    /// Get the magnetic variation direction token, if present.
    #[must_use]
    pub fn magnetic_direction(&self) -> Option<&RawToken> {
        self.magnetic_direction.as_ref()
    }

    /// Get the positioning mode.
    #[must_use]
    pub fn mode(&self) -> PositionMode {
        self.mode
    }

    /// Returns `true` if the receiver had a satellite fix.
    #[inline]
    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.status.is_active()
    }
}

/// Decode an optional navigation field: empty token means absent.
fn optional_token(field: &str) -> Result<Option<RawToken>> {
    if field.is_empty() {
        Ok(None)
    } else {
        RawToken::new(field.to_string()).map(Some)
    }
}
