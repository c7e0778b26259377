//! Tokio codec for tracker connections.
//!
//! [`OmniCodec`] integrates the protocol with Tokio's `Framed` streams.
//! The two directions are asymmetric, which the codec reflects directly:
//!
//! - [`Decoder`] yields [`Packet`]s parsed from the device's `CMDR`
//!   frames
//! - [`Encoder<Response>`] writes `CMDS` acknowledgements, preamble
//!   included
//!
//! Buffering and frame extraction are delegated to [`StreamParser`], so
//! the codec stays a thin trait adapter.
//!
//! # Usage
//!
//! ```rust,no_run
//! use futures::{SinkExt, StreamExt};
//! use lockwire_protocol::{OmniCodec, ResponseBuilder};
//! use tokio::net::TcpListener;
//! use tokio_util::codec::Framed;
//!
//! # async fn example() -> lockwire_core::Result<()> {
//! let listener = TcpListener::bind("0.0.0.0:9679").await?;
//! let (socket, _peer) = listener.accept().await?;
//! let mut framed = Framed::new(socket, OmniCodec::new());
//!
//! while let Some(packet) = framed.next().await {
//!     let packet = packet?;
//!     let response = ResponseBuilder::reply_to(&packet)
//!         .with_current_timestamp()
//!         .build()?;
//!     framed.send(response).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Size limits
//!
//! [`StreamParser`] already bounds its internal buffers; on top of that
//! the codec rejects any extracted or encoded frame larger than its
//! configured limit with `Error::FrameTooLarge`, so a hostile peer
//! cannot push oversized frames through a `Framed` pipeline.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::{Frame, Packet, Response, StreamParser};
use lockwire_core::{Error, Result};

/// Default maximum frame size in bytes.
///
/// Far above any legitimate frame, which tops out at a few hundred
/// bytes for a position report.
const DEFAULT_MAX_FRAME_SIZE: usize = 64 * 1024;

/// Tokio codec for the tracker wire protocol.
///
/// # Example
///
/// ```rust,no_run
/// use futures::StreamExt;
/// use lockwire_protocol::OmniCodec;
/// use tokio::net::TcpStream;
/// use tokio_util::codec::Framed;
///
/// # async fn example() -> lockwire_core::Result<()> {
/// let stream = TcpStream::connect("127.0.0.1:9679").await?;
/// let mut framed = Framed::new(stream, OmniCodec::new());
///
/// while let Some(result) = framed.next().await {
///     match result {
///         Ok(packet) => println!("{:?}", packet.command()),
///         Err(e) => eprintln!("protocol error: {e}"),
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OmniCodec {
    /// Stream parser handling buffering and frame extraction.
    parser: StreamParser,

    /// Maximum accepted frame size in bytes, both directions.
    max_frame_size: usize,
}

impl OmniCodec {
    /// Create a codec with the default frame size limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: StreamParser::new(),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    /// Create a codec with a custom frame size limit.
    ///
    /// # Example
    ///
    /// ```
    /// use lockwire_protocol::OmniCodec;
    ///
    /// let codec = OmniCodec::with_max_frame_size(512);
    /// assert_eq!(codec.max_frame_size(), 512);
    /// ```
    #[must_use]
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self {
            parser: StreamParser::new(),
            max_frame_size,
        }
    }

    /// The configured frame size limit.
    #[must_use]
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }
}

impl Default for OmniCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for OmniCodec {
    type Item = Packet;
    type Error = Error;

    /// Decode one uplink packet from the byte stream.
    ///
    /// Feeds buffered bytes to the internal [`StreamParser`] and parses
    /// the next complete frame, if any.
    ///
    /// # Errors
    /// Returns `Error::FrameTooLarge` when a frame exceeds the size
    /// limit, or `Error::MalformedFrame` when a frame fails envelope or
    /// payload validation. The connection remains usable afterwards;
    /// later frames decode normally.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if !src.is_empty() {
            // The parser copies into its own buffer, so the source can
            // be released back to the transport immediately.
            self.parser.feed(src);
            src.clear();
        }

        match self.parser.next_frame() {
            Some(frame) => {
                if frame.size() > self.max_frame_size {
                    return Err(Error::FrameTooLarge {
                        size: frame.size(),
                        max_size: self.max_frame_size,
                    });
                }

                Ok(Some(Packet::try_from(frame)?))
            }
            None => Ok(None),
        }
    }
}

impl Encoder<Response> for OmniCodec {
    type Error = Error;

    /// Encode an acknowledgement to the byte stream.
    ///
    /// The response is rendered as a complete wire frame with the
    /// two-byte preamble in front.
    ///
    /// # Errors
    /// Returns `Error::FrameTooLarge` if the rendered frame exceeds the
    /// size limit.
    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<()> {
        let frame = Frame::from(item);

        if frame.size() > self.max_frame_size {
            return Err(Error::FrameTooLarge {
                size: frame.size(),
                max_size: self.max_frame_size,
            });
        }

        dst.extend_from_slice(frame.as_bytes());
        Ok(())
    }
}
