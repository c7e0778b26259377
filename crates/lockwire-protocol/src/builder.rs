//! Response construction.
//!
//! Every uplink packet is answered with a fixed-shape downlink frame:
//!
//! ```text
//! \xFF\xFF*CMDS,<device code>,<IMEI>,<timestamp>,Re,<data>#
//! ```
//!
//! [`Response`] is the typed form of that frame and [`ResponseBuilder`]
//! assembles one, usually straight from the packet being acknowledged.
//! The data slot is a single wire-ready token the builder emits verbatim;
//! for acknowledgements it is the echoed command code.

use crate::commands::CommandCode;
use crate::field::RawToken;
use crate::frame::Frame;
use crate::packet::Packet;
use bytes::Bytes;
use lockwire_core::{DeviceCode, Error, Imei, Result, TrackerTimestamp};
use serde::{Deserialize, Serialize};

/// Downlink frame sent back to a lock.
///
/// The device code and IMEI are echoed from the packet being answered;
/// the timestamp is the server's own clock, which the lock uses to
/// correct its RTC. The data token is opaque at this layer: the builder
/// writes it into the frame exactly as given, and choosing a payload the
/// firmware understands is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Device code echoed from the uplink envelope.
    pub device_code: DeviceCode,
    /// IMEI of the lock being addressed.
    pub imei: Imei,
    /// Server time stamped into the response.
    pub timestamp: TrackerTimestamp,
    /// Payload token emitted verbatim after the `Re` tag. For an
    /// acknowledgement this is the echoed command code.
    pub data: RawToken,
}

impl Response {
    /// Create a response from already-validated parts.
    #[must_use]
    pub fn new(
        device_code: DeviceCode,
        imei: Imei,
        timestamp: TrackerTimestamp,
        data: RawToken,
    ) -> Self {
        Response {
            device_code,
            imei,
            timestamp,
            data,
        }
    }

    /// Encode the response as wire bytes, preamble included.
    ///
    /// Encoding never fails: every part of a `Response` is validated at
    /// construction.
    ///
    /// # Example
    /// ```
    /// use lockwire_core::{DeviceCode, Imei, TrackerTimestamp};
    /// use lockwire_protocol::{CommandCode, Response};
    ///
    /// let response = Response::new(
    ///     DeviceCode::new("OM".to_string()).unwrap(),
    ///     Imei::new("863725031194523".to_string()).unwrap(),
    ///     TrackerTimestamp::parse_wire("161201150000").unwrap().unwrap(),
    ///     CommandCode::SIGN_IN.into(),
    /// );
    ///
    /// let bytes = response.encode();
    /// assert_eq!(&bytes[..], b"\xFF\xFF*CMDS,OM,863725031194523,161201150000,Re,Q0#");
    /// ```
    #[must_use]
    pub fn encode(&self) -> Bytes {
        Frame::from(self).into_bytes()
    }
}

/// Builder for responses with a fluent API.
///
/// # Example
/// ```
/// use lockwire_protocol::{PacketParser, ResponseBuilder};
///
/// let packet = PacketParser::parse("*CMDR,OM,863725031194523,000000000000,H0,1,400,20#").unwrap();
/// let response = ResponseBuilder::reply_to(&packet)
///     .with_current_timestamp()
///     .build()
///     .unwrap();
///
/// assert_eq!(response.data.as_str(), "H0");
/// ```
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    device_code: Option<DeviceCode>,
    imei: Option<Imei>,
    timestamp: Option<TrackerTimestamp>,
    data: Option<RawToken>,
}

impl ResponseBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        ResponseBuilder::default()
    }

    /// Create a builder pre-filled from the packet being acknowledged.
    ///
    /// Copies the device code and IMEI, and seeds the data slot with the
    /// echoed command code. The timestamp is left unset: responses carry
    /// server time, not the time the lock reported.
    #[must_use]
    pub fn reply_to(packet: &Packet) -> Self {
        ResponseBuilder {
            device_code: Some(packet.device_code.clone()),
            imei: Some(packet.imei.clone()),
            timestamp: None,
            data: Some(packet.command().into()),
        }
    }

    /// Set the device code.
    #[must_use]
    pub fn device_code(mut self, device_code: DeviceCode) -> Self {
        self.device_code = Some(device_code);
        self
    }

    /// Set the IMEI.
    #[must_use]
    pub fn imei(mut self, imei: Imei) -> Self {
        self.imei = Some(imei);
        self
    }

    /// Set the response timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: TrackerTimestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the timestamp to the current server time.
    #[must_use]
    pub fn with_current_timestamp(self) -> Self {
        self.timestamp(TrackerTimestamp::now())
    }

    /// Set the data token, emitted into the frame exactly as given.
    #[must_use]
    pub fn data(mut self, data: RawToken) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the data token to a command code's wire form.
    ///
    /// Convenience for the acknowledgement case, where the data slot
    /// echoes the command being answered.
    #[must_use]
    pub fn command(self, command: CommandCode) -> Self {
        self.data(command.into())
    }

    /// Build the response.
    ///
    /// # Errors
    /// Returns `Error::InvalidDescriptor` if any part is missing.
    pub fn build(self) -> Result<Response> {
        let device_code = self.device_code.ok_or_else(|| missing("device code"))?;
        let imei = self.imei.ok_or_else(|| missing("IMEI"))?;
        let timestamp = self.timestamp.ok_or_else(|| missing("timestamp"))?;
        let data = self.data.ok_or_else(|| missing("response data"))?;

        Ok(Response::new(device_code, imei, timestamp, data))
    }

    /// Build and convert to a [`Frame`] for wire transmission.
    ///
    /// # Errors
    /// Returns `Error::InvalidDescriptor` if any part is missing.
    pub fn build_frame(self) -> Result<Frame> {
        Ok(Frame::from(self.build()?))
    }

    /// Build and encode straight to wire bytes.
    ///
    /// # Errors
    /// Returns `Error::InvalidDescriptor` if any part is missing.
    pub fn build_bytes(self) -> Result<Bytes> {
        Ok(self.build()?.encode())
    }
}

fn missing(what: &str) -> Error {
    Error::InvalidDescriptor {
        message: format!("{what} is required"),
    }
}
