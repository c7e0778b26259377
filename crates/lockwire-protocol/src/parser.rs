//! Uplink frame parsing.
//!
//! [`PacketParser`] turns one complete wire frame into a [`Packet`]. It
//! owns the envelope grammar shared by every command; the per-command
//! payload decoders live in [`commands`](crate::commands).

use crate::commands::{
    CommandCode, CommandFamily, Heartbeat, LockEvent, PositionReport, SignInReport, UpdateReport,
};
use crate::packet::{CommandData, Packet};
use lockwire_core::constants::{
    ENVELOPE_FIELD_COUNT, FIELD_DELIMITER, FRAME_MARKER, FRAME_TERMINATOR, MAX_FIELD_LENGTH,
    PROTOCOL_ID_UPLINK,
};
use lockwire_core::{DeviceCode, Error, Imei, Result, TrackerTimestamp};

/// Parser for uplink frames.
pub struct PacketParser;

impl PacketParser {
    /// Parse a complete frame into a [`Packet`].
    ///
    /// # Format
    /// ```text
    /// *CMDR,<device code>,<IMEI>,<timestamp>,<command>[,<data fields>]#
    /// ```
    ///
    /// Leading and trailing whitespace is tolerated, so frames read
    /// straight off a line-oriented transport parse without cleanup.
    /// Empty data fields are preserved: a position report with a void fix
    /// sends its navigation slots empty, and the decoder needs to see
    /// them to count fields correctly.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the framing markers are
    /// missing, the envelope is incomplete or invalid, any field exceeds
    /// the length limit, the command is not one this crate decodes, or
    /// the payload fails its command-specific validation.
    ///
    /// # Example
    /// ```
    /// use lockwire_protocol::parser::PacketParser;
    ///
    /// let packet =
    ///     PacketParser::parse("*CMDR,OM,863725031194523,000000000000,H0,1,400,20#").unwrap();
    /// assert_eq!(packet.device_code.as_str(), "OM");
    /// assert!(packet.timestamp.is_none());
    /// ```
    pub fn parse(input: &str) -> Result<Packet> {
        let input = input.trim();
        let body = Self::strip_markers(input)?;
        let tokens: Vec<&str> = body.split(FIELD_DELIMITER).collect();

        for (index, token) in tokens.iter().enumerate() {
            if token.len() > MAX_FIELD_LENGTH {
                return Err(Error::MalformedFrame {
                    message: format!(
                        "field {index} is {} bytes, maximum is {MAX_FIELD_LENGTH}",
                        token.len()
                    ),
                });
            }
        }

        if tokens.len() < ENVELOPE_FIELD_COUNT {
            return Err(Error::MalformedFrame {
                message: format!(
                    "envelope has {} fields, at least {ENVELOPE_FIELD_COUNT} required",
                    tokens.len()
                ),
            });
        }

        Self::validate_protocol_id(tokens[0])?;
        let device_code = DeviceCode::new(tokens[1].to_string())?;
        let imei = Imei::new(tokens[2].to_string())?;
        let timestamp = TrackerTimestamp::parse_wire(tokens[3])?;
        let command = CommandCode::parse(tokens[4])?;
        let data = Self::parse_payload(command, &tokens[ENVELOPE_FIELD_COUNT..])?;

        Ok(Packet::new(device_code, imei, timestamp, data))
    }

    /// Validate the framing markers and return the text between them.
    fn strip_markers(input: &str) -> Result<&str> {
        if input.is_empty() {
            return Err(Error::MalformedFrame {
                message: "frame is empty".to_string(),
            });
        }
        if !input.is_ascii() {
            return Err(Error::MalformedFrame {
                message: "frame contains non-ASCII bytes".to_string(),
            });
        }

        let bytes = input.as_bytes();
        if bytes[0] != FRAME_MARKER {
            return Err(Error::MalformedFrame {
                message: format!("frame does not start with {:?}", FRAME_MARKER as char),
            });
        }
        if bytes.len() < 2 || bytes[bytes.len() - 1] != FRAME_TERMINATOR {
            return Err(Error::MalformedFrame {
                message: format!("frame does not end with {:?}", FRAME_TERMINATOR as char),
            });
        }

        Ok(&input[1..input.len() - 1])
    }

    fn validate_protocol_id(token: &str) -> Result<()> {
        if token != PROTOCOL_ID_UPLINK {
            return Err(Error::MalformedFrame {
                message: format!("protocol id {token:?} is not {PROTOCOL_ID_UPLINK:?}"),
            });
        }
        Ok(())
    }

    /// Dispatch the data fields to the decoder for this command.
    ///
    /// The command letter is validated by [`CommandCode::parse`]; this
    /// match decides which (family, variant) pairs have a decoder at all.
    fn parse_payload(command: CommandCode, fields: &[&str]) -> Result<CommandData> {
        match (command.family(), command.variant()) {
            (CommandFamily::SignIn, 0) => Ok(CommandData::SignIn(SignInReport::parse(fields)?)),
            (CommandFamily::Heartbeat, 0) => Ok(CommandData::Heartbeat(Heartbeat::parse(fields)?)),
            (CommandFamily::Lock, 1) => Ok(CommandData::Lock(LockEvent::parse(fields)?)),
            (CommandFamily::Update, 0) => Ok(CommandData::Update(UpdateReport::parse(fields)?)),
            (CommandFamily::Position, 0) => {
                Ok(CommandData::Position(PositionReport::parse(fields)?))
            }
            _ => Err(Error::MalformedFrame {
                message: format!("unsupported command {command}"),
            }),
        }
    }
}
