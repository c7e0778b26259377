//! Wire frame representation.
//!
//! A [`Frame`] holds the exact bytes of one protocol frame: the text
//! from the start marker through the terminator, optionally prefixed by
//! the two-byte preamble that servers put in front of responses. Frames
//! sit between the byte-stream layer and the typed layer: the stream
//! parser and codec produce and consume frames, while conversions to
//! [`Packet`] and from [`Response`] interpret them.

use crate::builder::Response;
use crate::packet::Packet;
use crate::parser::PacketParser;
use bytes::{BufMut, Bytes, BytesMut};
use lockwire_core::constants::{
    FIELD_DELIMITER, FRAME_MARKER, FRAME_TERMINATOR, PROTOCOL_ID_DOWNLINK, RESPONSE_COMMAND,
    RESPONSE_PREAMBLE,
};
use lockwire_core::{Error, Result};
use std::fmt;

/// A raw wire frame.
///
/// The payload is stored uninterpreted; [`Packet::try_from`] is where
/// validation happens. The preamble flag records whether the stored
/// bytes carry the response preamble, so a frame can be moved between
/// the uplink form and the downlink form without re-parsing.
///
/// # Example
/// ```
/// use lockwire_protocol::{Frame, Packet};
///
/// let frame = Frame::from_string("*CMDR,OM,863725031194523,000000000000,Q0,410#");
/// let packet = Packet::try_from(&frame).unwrap();
/// assert_eq!(packet.command().to_string(), "Q0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Bytes,
    size: usize,
    has_preamble: bool,
}

impl Frame {
    /// Create a frame from raw bytes.
    ///
    /// `has_preamble` records whether `data` starts with the response
    /// preamble. The bytes are not validated here.
    #[must_use]
    pub fn new(data: Bytes, has_preamble: bool) -> Self {
        let size = data.len();
        Frame {
            data,
            size,
            has_preamble,
        }
    }

    /// Create a frame by copying a byte slice.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], has_preamble: bool) -> Self {
        Frame::new(Bytes::copy_from_slice(bytes), has_preamble)
    }

    /// Create a frame from marker-delimited text, without a preamble.
    #[must_use]
    pub fn from_string(text: &str) -> Self {
        Frame::new(Bytes::copy_from_slice(text.as_bytes()), false)
    }

    /// Total size of the stored bytes, preamble included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the stored bytes start with the response preamble.
    #[must_use]
    pub fn has_preamble(&self) -> bool {
        self.has_preamble
    }

    /// The stored bytes exactly as they go on the wire.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame, returning the wire bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Return a frame with the response preamble prepended.
    ///
    /// No-op if the preamble is already present.
    ///
    /// # Example
    /// ```
    /// use lockwire_protocol::Frame;
    ///
    /// let frame = Frame::from_string("*CMDS,OM,863725031194523,161201150000,Re,Q0#");
    /// let framed = frame.with_preamble();
    /// assert!(framed.has_preamble());
    /// assert_eq!(&framed.as_bytes()[..2], &[0xFF, 0xFF]);
    /// ```
    #[must_use]
    pub fn with_preamble(self) -> Self {
        if self.has_preamble {
            return self;
        }
        let mut data = BytesMut::with_capacity(RESPONSE_PREAMBLE.len() + self.data.len());
        data.put_slice(&RESPONSE_PREAMBLE);
        data.put_slice(&self.data);
        Frame::new(data.freeze(), true)
    }

    /// Return a frame with the response preamble removed.
    ///
    /// No-op if there is no preamble.
    #[must_use]
    pub fn without_preamble(self) -> Self {
        if !self.has_preamble {
            return self;
        }
        let data = self.data.slice(RESPONSE_PREAMBLE.len().min(self.data.len())..);
        Frame::new(data, false)
    }

    /// The marker-delimited frame bytes, preamble excluded.
    fn core_bytes(&self) -> &[u8] {
        if self.has_preamble && self.data.len() >= RESPONSE_PREAMBLE.len() {
            &self.data[RESPONSE_PREAMBLE.len()..]
        } else {
            &self.data
        }
    }

    /// The marker-delimited frame text, preamble excluded.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` if the stored bytes are not valid
    /// text. The protocol is ASCII, so a frame captured off a healthy
    /// link always converts.
    pub fn core_text(&self) -> Result<&str> {
        std::str::from_utf8(self.core_bytes()).map_err(|_| Error::MalformedFrame {
            message: "frame payload is not valid text".to_string(),
        })
    }
}

/// Render a response as its wire frame, preamble included.
impl From<&Response> for Frame {
    fn from(response: &Response) -> Self {
        let device_code = response.device_code.as_str();
        let imei = response.imei.as_str();
        let timestamp = response.timestamp.format_wire();
        let payload = response.data.as_str();

        let core_size = 1
            + PROTOCOL_ID_DOWNLINK.len()
            + 1
            + device_code.len()
            + 1
            + imei.len()
            + 1
            + timestamp.len()
            + 1
            + RESPONSE_COMMAND.len()
            + 1
            + payload.len()
            + 1;

        let mut data = BytesMut::with_capacity(RESPONSE_PREAMBLE.len() + core_size);
        data.put_slice(&RESPONSE_PREAMBLE);
        data.put_u8(FRAME_MARKER);
        data.put_slice(PROTOCOL_ID_DOWNLINK.as_bytes());
        for part in [
            device_code,
            imei,
            timestamp.as_str(),
            RESPONSE_COMMAND,
            payload,
        ] {
            data.put_u8(FIELD_DELIMITER as u8);
            data.put_slice(part.as_bytes());
        }
        data.put_u8(FRAME_TERMINATOR);

        Frame::new(data.freeze(), true)
    }
}

impl From<Response> for Frame {
    fn from(response: Response) -> Self {
        Frame::from(&response)
    }
}

/// Parse the frame payload into a typed packet.
impl TryFrom<&Frame> for Packet {
    type Error = Error;

    fn try_from(frame: &Frame) -> Result<Packet> {
        PacketParser::parse(frame.core_text()?)
    }
}

impl TryFrom<Frame> for Packet {
    type Error = Error;

    fn try_from(frame: Frame) -> Result<Packet> {
        Packet::try_from(&frame)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.core_text() {
            Ok(text) => write!(
                f,
                "Frame[size={}, preamble={}, content={:?}]",
                self.size, self.has_preamble, text
            ),
            Err(_) => {
                let hex: String = self
                    .core_bytes()
                    .iter()
                    .map(|byte| format!("{byte:02x}"))
                    .collect();
                write!(
                    f,
                    "Frame[size={}, preamble={}, hex={}]",
                    self.size, self.has_preamble, hex
                )
            }
        }
    }
}
