//! Core constants for the OM tracker protocol implementation.
//!
//! This module defines all protocol-level constants used throughout the
//! Lockwire codec. These constants ensure consistent protocol compliance
//! and provide centralized configuration for protocol behavior.
//!
//! # Protocol Structure
//!
//! OM lock trackers exchange ASCII frames over plain TCP. An uplink frame
//! (device to server) looks like:
//!
//! ```text
//! *CMDR,OM,863725031194523,000000000000,Q0,410#
//! ^    ^                                      ^
//! |    |                                      end marker
//! |    comma-separated fields
//! start marker
//! ```
//!
//! Where:
//! - `*` - Start marker (0x2A)
//! - `CMDR` - Uplink protocol identifier
//! - `OM` - Device code (vendor family)
//! - `863725031194523` - Device IMEI
//! - `000000000000` - Timestamp, or the all-zeros placeholder
//! - `Q0` - Command code (family letter plus variant digit)
//! - `410` - Command data fields (count varies per command)
//! - `#` - End marker (0x23)
//!
//! A downlink frame (server to device) carries the same envelope with the
//! `CMDS` identifier and is preceded by a two-byte `0xFF 0xFF` preamble that
//! wakes the lock's modem.
//!
//! # Marker Semantics
//!
//! | Marker | Name | Purpose |
//! |--------|------|---------|
//! | `*` | FRAME_MARKER | Opens every frame |
//! | `#` | FRAME_TERMINATOR | Closes every frame |
//! | `,` | FIELD_DELIMITER | Separates fields |
//! | `0xFF 0xFF` | RESPONSE_PREAMBLE | Modem wake-up, downlink only |
//!
//! # Usage
//!
//! Constants are organized by category for easy discovery:
//!
//! ```
//! use lockwire_core::constants::*;
//!
//! // Protocol identification
//! assert_eq!(PROTOCOL_ID_UPLINK, "CMDR");
//!
//! // Timestamp validation
//! fn is_placeholder(token: &str) -> bool {
//!     token == TIMESTAMP_PLACEHOLDER
//! }
//! assert!(is_placeholder("000000000000"));
//! ```
//!
//! # Protocol Compliance
//!
//! These constants are derived from the wire traffic of Omni OM-family
//! shared-mobility lock trackers. Modifying these values may break
//! compatibility with deployed hardware.

// ============================================================================
// Frame Markers
// ============================================================================

/// Start marker opening every protocol frame.
///
/// ASCII asterisk (0x2A). The stream layer discards any bytes received
/// before this marker when hunting for the next frame.
///
/// # Protocol Position
///
/// ```text
/// *CMDR,OM,...#
/// ^
/// Start marker
/// ```
pub const FRAME_MARKER: u8 = b'*';

/// End marker closing every protocol frame.
///
/// ASCII number sign (0x23). The byte cannot occur inside a well-formed
/// frame body, so the stream layer treats the first occurrence as the end
/// of the current frame.
///
/// # Protocol Position
///
/// ```text
/// *CMDR,OM,...#
///             ^
///             End marker
/// ```
pub const FRAME_TERMINATOR: u8 = b'#';

/// Modem wake-up preamble for downlink frames.
///
/// Two `0xFF` bytes sent ahead of every server-to-device frame. The lock's
/// GSM modem may be dozing between reports; the preamble gives it time to
/// wake before the frame proper arrives. Uplink frames never carry it.
///
/// # Examples
///
/// ```
/// use lockwire_core::constants::RESPONSE_PREAMBLE;
///
/// let wire = b"\xff\xff*CMDS,OM,863725031194523,161201150000,Re,L1#";
/// assert_eq!(&wire[..2], &RESPONSE_PREAMBLE);
/// ```
pub const RESPONSE_PREAMBLE: [u8; 2] = [0xFF, 0xFF];

/// Frame overhead in bytes.
///
/// Total bytes used for frame markers ([`FRAME_MARKER`] + [`FRAME_TERMINATOR`]).
/// This is used when calculating maximum payload capacity.
///
/// # Examples
///
/// ```
/// use lockwire_core::constants::FRAME_OVERHEAD;
///
/// const MAX_FRAME_SIZE: usize = 1024;
/// const MAX_BODY_SIZE: usize = MAX_FRAME_SIZE - FRAME_OVERHEAD;
/// ```
pub const FRAME_OVERHEAD: usize = 2;

// ============================================================================
// Protocol Identification
// ============================================================================

/// Uplink protocol identifier.
///
/// This constant appears in every device-to-server frame immediately after
/// the start marker. Frames carrying any other identifier in that slot are
/// rejected as malformed.
///
/// # Protocol Position
///
/// ```text
/// *CMDR,OM,863725031194523,...
///  ^^^^
///  Protocol identifier
/// ```
///
/// # Examples
///
/// ```
/// use lockwire_core::constants::PROTOCOL_ID_UPLINK;
///
/// let body = "CMDR,OM,863725031194523,000000000000,Q0,410";
/// assert!(body.starts_with(PROTOCOL_ID_UPLINK));
/// ```
pub const PROTOCOL_ID_UPLINK: &str = "CMDR";

/// Downlink protocol identifier.
///
/// The server-to-device counterpart of [`PROTOCOL_ID_UPLINK`]. Every frame
/// built for transmission to a lock carries this identifier.
///
/// # Protocol Position
///
/// ```text
/// \xFF\xFF*CMDS,OM,863725031194523,...
///          ^^^^
///          Protocol identifier
/// ```
pub const PROTOCOL_ID_DOWNLINK: &str = "CMDS";

/// Protocol identifier field length.
///
/// Both [`PROTOCOL_ID_UPLINK`] and [`PROTOCOL_ID_DOWNLINK`] are exactly
/// 4 characters.
pub const PROTOCOL_ID_LENGTH: usize = 4; // "CMDR" / "CMDS"

/// Command slot content for downlink acknowledgements.
///
/// Downlink frames do not issue their own command letters; the command slot
/// always carries this reply keyword, and the field after it echoes the
/// command code being acknowledged.
///
/// # Protocol Position
///
/// ```text
/// \xFF\xFF*CMDS,OM,863725031194523,161201150000,Re,L1#
///                                               ^^
///                                               Reply keyword
/// ```
pub const RESPONSE_COMMAND: &str = "Re";

// ============================================================================
// Message Structure Components
// ============================================================================

/// Field separator in protocol frames.
///
/// Separates the fields of a frame body. Empty fields (consecutive `,,`)
/// have semantic meaning and must be preserved.
///
/// # Examples
///
/// ```
/// use lockwire_core::constants::FIELD_DELIMITER;
///
/// // Normal fields
/// let body = "CMDR,OM,863725031194523";
/// let fields: Vec<&str> = body.split(FIELD_DELIMITER).collect();
/// assert_eq!(fields, vec!["CMDR", "OM", "863725031194523"]);
///
/// // Empty field (valid in the protocol, common in no-fix position reports)
/// let sparse = "140516.00,V,,";
/// let fields: Vec<&str> = sparse.split(FIELD_DELIMITER).collect();
/// assert_eq!(fields, vec!["140516.00", "V", "", ""]);
/// ```
pub const FIELD_DELIMITER: char = ',';

/// Number of envelope fields preceding command data.
///
/// Every uplink frame body starts with exactly 5 fields: protocol
/// identifier, device code, IMEI, timestamp, and command code. Command data
/// fields, when present, follow these.
pub const ENVELOPE_FIELD_COUNT: usize = 5;

/// Timestamp field length in protocol frames.
///
/// Timestamps are always exactly 12 digits in `YYMMDDHHMMSS` form.
/// Two-digit years are interpreted in the 2000-2099 window.
///
/// # Examples
///
/// ```
/// use lockwire_core::constants::TIMESTAMP_LENGTH;
///
/// assert_eq!("161201150000".len(), TIMESTAMP_LENGTH);
/// ```
pub const TIMESTAMP_LENGTH: usize = 12;

/// Placeholder for an unset timestamp.
///
/// Locks that have not yet acquired network time fill the timestamp slot
/// with twelve zeros. The placeholder is not a valid calendar date and is
/// decoded as "no timestamp" rather than rejected.
///
/// # Examples
///
/// ```
/// use lockwire_core::constants::{TIMESTAMP_LENGTH, TIMESTAMP_PLACEHOLDER};
///
/// assert_eq!(TIMESTAMP_PLACEHOLDER.len(), TIMESTAMP_LENGTH);
/// assert!(TIMESTAMP_PLACEHOLDER.chars().all(|c| c == '0'));
/// ```
pub const TIMESTAMP_PLACEHOLDER: &str = "000000000000";

/// Nominal IMEI field length in characters.
///
/// Production OM trackers report standard 15-digit IMEIs. The field is not
/// length-enforced on decode, since test benches and SIM-swapped units have
/// been observed reporting shorter identifiers.
///
/// # Value: 15 characters
pub const IMEI_LENGTH: usize = 15;

// ============================================================================
// Protocol Field Limits
// ============================================================================

/// Maximum length for any single protocol field (bytes).
///
/// This limit provides DoS protection by preventing unbounded memory
/// allocation while accommodating the longest legitimate fields seen in
/// OM tracker traffic.
///
/// # Value: 256 bytes
///
/// # Note
///
/// This is an implementation-specific limit, not a protocol limit. Real
/// tracker fields rarely exceed 20 bytes; 256 leaves a wide margin for
/// firmware-version strings and future command data.
///
/// # Examples
///
/// ```
/// use lockwire_core::constants::MAX_FIELD_LENGTH;
///
/// fn field_fits(field: &str) -> bool {
///     field.len() <= MAX_FIELD_LENGTH
/// }
/// assert!(field_fits("863725031194523"));
/// ```
pub const MAX_FIELD_LENGTH: usize = 256;

// ============================================================================
// Device Measurements
// ============================================================================

/// Scale factor for battery voltage fields.
///
/// Battery voltage travels as an integer count of centivolts: the token
/// `410` means 4.10 V. Dividing by this constant recovers volts.
///
/// # Examples
///
/// ```
/// use lockwire_core::constants::CENTIVOLTS_PER_VOLT;
///
/// let raw: u16 = 410;
/// let volts = f64::from(raw) / f64::from(CENTIVOLTS_PER_VOLT);
/// assert!((volts - 4.10).abs() < 1e-9);
/// ```
pub const CENTIVOLTS_PER_VOLT: u16 = 100;

// ============================================================================
// Timestamp Range
// ============================================================================

/// Minimum year representable in a protocol timestamp.
///
/// Two-digit years map into the 2000-2099 window, so `00` is year 2000.
///
/// # Value: 2000
pub const MIN_TIMESTAMP_YEAR: i32 = 2000;

/// Maximum year representable in a protocol timestamp.
///
/// With two-digit years, `99` is the last representable year. Timestamps
/// outside the window cannot be formatted for the wire and are rejected at
/// construction.
///
/// # Value: 2099
pub const MAX_TIMESTAMP_YEAR: i32 = 2099;
