//! Decoded uplink packets.
//!
//! A [`Packet`] is one complete report from a lock: the envelope fields
//! that identify the device plus the decoded command payload. Packets are
//! produced by [`PacketParser`](crate::parser::PacketParser) and answered
//! with [`ResponseBuilder`](crate::builder::ResponseBuilder).

use crate::commands::{
    CommandCode, CommandFamily, Heartbeat, LockEvent, PositionReport, SignInReport, UpdateReport,
};
use lockwire_core::{DeviceCode, Imei, TrackerTimestamp};
use serde::{Deserialize, Serialize};

/// Decoded command payload, one variant per supported uplink command.
///
/// The variant fixes the command code: a payload only ever decodes from
/// its own code, so [`CommandData::code`] is exact rather than advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandData {
    /// `Q0` power-on sign-in.
    SignIn(SignInReport),
    /// `H0` periodic heartbeat.
    Heartbeat(Heartbeat),
    /// `L1` lock event closing a ride.
    Lock(LockEvent),
    /// `U0` firmware update progress report.
    Update(UpdateReport),
    /// `D0` GPS position report.
    Position(PositionReport),
}

impl CommandData {
    /// Command code this payload decodes from.
    #[must_use]
    pub fn code(&self) -> CommandCode {
        match self {
            CommandData::SignIn(_) => CommandCode::SIGN_IN,
            CommandData::Heartbeat(_) => CommandCode::HEARTBEAT,
            CommandData::Lock(_) => CommandCode::LOCK,
            CommandData::Update(_) => CommandCode::UPDATE,
            CommandData::Position(_) => CommandCode::POSITION,
        }
    }

    /// Command family this payload belongs to.
    #[must_use]
    pub fn family(&self) -> CommandFamily {
        self.code().family()
    }
}

/// A decoded uplink packet.
///
/// Wire form: `*CMDR,<device code>,<IMEI>,<timestamp>,<command>,<data>#`.
/// Every part has already been validated, so a `Packet` can always be
/// acknowledged without further checks.
///
/// # Example
/// ```
/// use lockwire_protocol::parser::PacketParser;
///
/// let packet = PacketParser::parse("*CMDR,OM,863725031194523,161201150000,H0,1,400,20#").unwrap();
/// assert_eq!(packet.imei.as_str(), "863725031194523");
/// assert_eq!(packet.command().to_string(), "H0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Device code from the envelope, `OM` for this lock family.
    pub device_code: DeviceCode,
    /// 15-digit IMEI of the reporting lock.
    pub imei: Imei,
    /// Report time, or `None` when the lock sent the all-zeros placeholder.
    pub timestamp: Option<TrackerTimestamp>,
    /// Decoded command payload.
    pub data: CommandData,
}

impl Packet {
    /// Create a packet from already-validated parts.
    #[must_use]
    pub fn new(
        device_code: DeviceCode,
        imei: Imei,
        timestamp: Option<TrackerTimestamp>,
        data: CommandData,
    ) -> Self {
        Packet {
            device_code,
            imei,
            timestamp,
            data,
        }
    }

    /// Command code of the payload, as it must be echoed in the
    /// acknowledgement.
    #[must_use]
    pub fn command(&self) -> CommandCode {
        self.data.code()
    }

    /// Returns `true` if the lock had network time when it reported.
    #[must_use]
    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}
