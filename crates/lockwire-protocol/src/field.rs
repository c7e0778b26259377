use crate::commands::CommandCode;
use lockwire_core::constants::{FIELD_DELIMITER, FRAME_MARKER, FRAME_TERMINATOR, MAX_FIELD_LENGTH};
use lockwire_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for an opaque protocol field.
///
/// Several command fields are carried without interpretation: ride user
/// identifiers, GNSS coordinate strings, firmware version tokens. Those
/// bytes belong to the lock's firmware and backend, and reformatting them
/// (stripping zeros, normalizing decimals) has broken deployments before.
/// `RawToken` preserves them exactly while still guaranteeing they cannot
/// corrupt a frame.
///
/// # Protocol Safety
///
/// The OM protocol reserves three bytes that terminate or split fields:
///
/// - `,` - Field delimiter
/// - `*` - Frame start marker
/// - `#` - Frame end marker
///
/// A token containing any of them would change the shape of the frame it
/// is written into. `RawToken` rejects them at construction, along with
/// non-ASCII bytes, which never occur in OM traffic. Empty tokens are
/// valid; no-fix position reports rely on them.
///
/// # Example
/// ```
/// use lockwire_protocol::RawToken;
///
/// // Tokens keep their bytes exactly, zero-padding included
/// let token = RawToken::new("00959.40370".to_string()).unwrap();
/// assert_eq!(token.as_str(), "00959.40370");
///
/// // Reserved bytes are rejected
/// assert!(RawToken::new("bad,token".to_string()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawToken(String);

impl RawToken {
    /// Create a new raw token with validation.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the value contains a reserved
    /// byte (`,`, `*`, `#`), contains non-ASCII bytes, or exceeds
    /// [`MAX_FIELD_LENGTH`].
    ///
    /// # Example
    /// ```
    /// use lockwire_protocol::RawToken;
    ///
    /// let token = RawToken::new("1497689816".to_string()).unwrap();
    /// assert_eq!(token.as_str(), "1497689816");
    /// ```
    pub fn new(value: String) -> Result<Self> {
        if value.len() > MAX_FIELD_LENGTH {
            return Err(Error::MalformedFrame {
                message: format!(
                    "field exceeds maximum length {MAX_FIELD_LENGTH} (got {} bytes)",
                    value.len()
                ),
            });
        }
        if !value.is_ascii() {
            return Err(Error::MalformedFrame {
                message: format!("field contains non-ASCII bytes: {value:?}"),
            });
        }
        for byte in value.bytes() {
            if byte == FRAME_MARKER || byte == FRAME_TERMINATOR || byte == FIELD_DELIMITER as u8 {
                return Err(Error::MalformedFrame {
                    message: format!(
                        "field contains reserved protocol byte {:?}: {value:?}",
                        char::from(byte)
                    ),
                });
            }
        }
        Ok(RawToken(value))
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the token into an owned `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if the token carries no bytes.
    ///
    /// Empty tokens are legal on the wire; no-fix position reports send
    /// runs of them.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for RawToken {
    type Err = Error;

    /// Parse a string slice into a `RawToken` with validation.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the value contains reserved or
    /// non-ASCII bytes.
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.to_string())
    }
}

impl TryFrom<&str> for RawToken {
    type Error = Error;

    /// Try to create a `RawToken` from a string slice with validation.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the value contains reserved or
    /// non-ASCII bytes.
    ///
    /// # Example
    /// ```
    /// use lockwire_protocol::RawToken;
    /// use std::convert::TryFrom;
    ///
    /// let token = RawToken::try_from("4824.07609").unwrap();
    /// assert_eq!(token.as_str(), "4824.07609");
    ///
    /// let invalid = RawToken::try_from("48,24");
    /// assert!(invalid.is_err());
    /// ```
    fn try_from(s: &str) -> Result<Self> {
        Self::new(s.to_string())
    }
}

impl From<CommandCode> for RawToken {
    /// A command code's wire form is a family letter plus decimal digits,
    /// none of which are reserved bytes, so no validation is needed.
    ///
    /// # Example
    /// ```
    /// use lockwire_protocol::{CommandCode, RawToken};
    ///
    /// let token = RawToken::from(CommandCode::LOCK);
    /// assert_eq!(token.as_str(), "L1");
    /// ```
    fn from(command: CommandCode) -> Self {
        RawToken(command.as_wire())
    }
}

impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RawToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
