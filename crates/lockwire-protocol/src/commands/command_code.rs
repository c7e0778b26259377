//! Command code definitions for the OM tracker protocol.
//!
//! This module defines the command codes used by OM lock trackers. Each
//! uplink frame names exactly one command, written as a family letter
//! followed by a decimal variant digit.
//!
//! # Protocol Format
//!
//! Command codes appear in the fifth envelope field, after the timestamp:
//!
//! ```text
//! *CMDR,OM,863725031194523,000000000000,Q0,410#
//!                                       ^^
//!                                       Command code position
//! ```
//!
//! # Command Families
//!
//! | Letter | Family | Sent when |
//! |--------|--------|-----------|
//! | `Q` | Sign-in | Lock boots and registers with the server |
//! | `H` | Heartbeat | Periodic keep-alive with lock state |
//! | `L` | Lock | User ends a ride by closing the lock |
//! | `U` | Update | Lock reports firmware/configuration info |
//! | `D` | Position | GNSS position report |
//!
//! The variant digit distinguishes revisions within a family. Production
//! OM firmware sends `Q0`, `H0`, `L1`, `U0`, and `D0`.
//!
//! # Usage Examples
//!
//! ## Parsing Command Codes
//!
//! ```
//! use lockwire_protocol::CommandCode;
//!
//! let cmd = CommandCode::parse("Q0").unwrap();
//! assert_eq!(cmd, CommandCode::SIGN_IN);
//! assert_eq!(cmd.as_wire(), "Q0");
//! ```
//!
//! ## Round-trip Conversion
//!
//! ```
//! use lockwire_protocol::CommandCode;
//!
//! let original = CommandCode::LOCK;
//! let wire_format = original.as_wire();
//! let parsed = CommandCode::parse(&wire_format).unwrap();
//!
//! assert_eq!(parsed, original);
//! assert_eq!(wire_format, "L1");
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use lockwire_protocol::CommandCode;
//!
//! // Unknown family letters return errors
//! let result = CommandCode::parse("X0");
//! assert!(result.is_err());
//! ```

use lockwire_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Command families in the OM tracker protocol.
///
/// The family letter is the first character of every command code and
/// selects how the command data fields are decoded.
///
/// # Examples
///
/// ```
/// use lockwire_protocol::CommandFamily;
///
/// let family = CommandFamily::from_letter('H').unwrap();
/// assert_eq!(family, CommandFamily::Heartbeat);
/// assert_eq!(family.letter(), 'H');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandFamily {
    SignIn,    // Q
    Heartbeat, // H
    Lock,      // L
    Update,    // U
    Position,  // D
}

impl CommandFamily {
    /// Parse a family from its wire letter.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` for letters outside the known set.
    /// Matching is case-sensitive; firmware always sends upper case.
    pub fn from_letter(letter: char) -> Result<Self> {
        match letter {
            'Q' => Ok(CommandFamily::SignIn),
            'H' => Ok(CommandFamily::Heartbeat),
            'L' => Ok(CommandFamily::Lock),
            'U' => Ok(CommandFamily::Update),
            'D' => Ok(CommandFamily::Position),
            _ => Err(Error::MalformedFrame {
                message: format!("unknown command family {letter:?}"),
            }),
        }
    }

    /// Get the wire letter for this family.
    #[inline]
    #[must_use]
    pub fn letter(&self) -> char {
        match self {
            CommandFamily::SignIn => 'Q',
            CommandFamily::Heartbeat => 'H',
            CommandFamily::Lock => 'L',
            CommandFamily::Update => 'U',
            CommandFamily::Position => 'D',
        }
    }

    /// Returns `true` if this family carries periodic telemetry.
    ///
    /// Telemetry reports arrive on a timer without user involvement:
    /// heartbeats and position reports.
    ///
    /// # Example
    /// ```
    /// use lockwire_protocol::CommandFamily;
    ///
    /// assert!(CommandFamily::Heartbeat.is_telemetry());
    /// assert!(CommandFamily::Position.is_telemetry());
    /// assert!(!CommandFamily::Lock.is_telemetry());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_telemetry(&self) -> bool {
        matches!(self, Self::Heartbeat | Self::Position)
    }

    /// Returns `true` if this family announces lock lifecycle state.
    ///
    /// Lifecycle reports are sent around boot: the sign-in registration
    /// and the firmware/configuration update notice.
    #[inline]
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::SignIn | Self::Update)
    }

    /// Returns `true` if this family reports a ride event.
    ///
    /// Ride events are user-triggered; currently only the end-of-ride
    /// lock report.
    #[inline]
    #[must_use]
    pub fn is_ride_event(&self) -> bool {
        matches!(self, Self::Lock)
    }
}

impl fmt::Display for CommandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A complete command code: family letter plus variant digit.
///
/// The variant distinguishes revisions within a family; dispatch happens
/// on the `(family, variant)` pair. Variants are canonical decimal with no
/// leading zeros, so every accepted code formats back to the exact bytes
/// it was parsed from.
///
/// # Examples
///
/// ```
/// use lockwire_protocol::{CommandCode, CommandFamily};
///
/// let cmd = CommandCode::parse("L1").unwrap();
/// assert_eq!(cmd.family(), CommandFamily::Lock);
/// assert_eq!(cmd.variant(), 1);
/// assert_eq!(cmd, CommandCode::LOCK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandCode {
    family: CommandFamily,
    variant: u8,
}

impl CommandCode {
    /// Sign-in registration as sent by production firmware (`Q0`).
    pub const SIGN_IN: Self = CommandCode {
        family: CommandFamily::SignIn,
        variant: 0,
    };

    /// Periodic heartbeat (`H0`).
    pub const HEARTBEAT: Self = CommandCode {
        family: CommandFamily::Heartbeat,
        variant: 0,
    };

    /// End-of-ride lock report (`L1`).
    pub const LOCK: Self = CommandCode {
        family: CommandFamily::Lock,
        variant: 1,
    };

    /// Firmware/configuration update notice (`U0`).
    pub const UPDATE: Self = CommandCode {
        family: CommandFamily::Update,
        variant: 0,
    };

    /// GNSS position report (`D0`).
    pub const POSITION: Self = CommandCode {
        family: CommandFamily::Position,
        variant: 0,
    };

    /// Build a command code from its parts.
    #[must_use]
    pub fn new(family: CommandFamily, variant: u8) -> Self {
        CommandCode { family, variant }
    }

    /// Parse a command code token from a frame envelope.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the token is empty, names an
    /// unknown family letter, or the variant is not canonical decimal
    /// (at least one digit, no leading zeros, fits in `u8`).
    pub fn parse(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(|| Error::MalformedFrame {
            message: "command code is empty".to_string(),
        })?;
        let family = CommandFamily::from_letter(letter)?;

        let digits = chars.as_str();
        if digits.is_empty() {
            return Err(Error::MalformedFrame {
                message: format!("command code {s:?} is missing its variant digit"),
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedFrame {
                message: format!("command code {s:?} has a non-numeric variant"),
            });
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(Error::MalformedFrame {
                message: format!("command code {s:?} has a zero-padded variant"),
            });
        }
        let variant = digits.parse::<u8>().map_err(|_| Error::MalformedFrame {
            message: format!("command code {s:?} has an out-of-range variant"),
        })?;

        Ok(CommandCode { family, variant })
    }

    /// Get the command family.
    #[inline]
    #[must_use]
    pub fn family(&self) -> CommandFamily {
        self.family
    }

    /// Get the variant digit.
    #[inline]
    #[must_use]
    pub fn variant(&self) -> u8 {
        self.variant
    }

    /// Format the command code for the wire.
    ///
    /// # Example
    /// ```
    /// use lockwire_protocol::CommandCode;
    ///
    /// assert_eq!(CommandCode::HEARTBEAT.as_wire(), "H0");
    /// ```
    #[must_use]
    pub fn as_wire(&self) -> String {
        format!("{}{}", self.family.letter(), self.variant)
    }

    /// Returns the length of the wire form in bytes.
    ///
    /// This is useful for capacity calculations when encoding frames.
    ///
    /// Note: `is_empty()` is not provided because command codes always
    /// carry at least a letter and one digit.
    ///
    /// # Example
    /// ```
    /// use lockwire_protocol::CommandCode;
    ///
    /// assert_eq!(CommandCode::LOCK.len(), 2); // "L1"
    /// ```
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        let digits = if self.variant >= 100 {
            3
        } else if self.variant >= 10 {
            2
        } else {
            1
        };
        1 + digits
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family.letter(), self.variant)
    }
}
