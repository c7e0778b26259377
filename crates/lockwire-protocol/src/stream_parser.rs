//! Stream parser for tracker connections.
//!
//! TCP delivers bytes, not frames: a single read can carry half a frame,
//! several frames, or modem noise between frames. [`StreamParser`]
//! accumulates bytes and extracts complete frames with a two-state
//! machine keyed on the start marker and terminator.
//!
//! # Protocol Framing
//!
//! Every frame is ASCII text delimited by two marker bytes:
//!
//! ```text
//! *CMDR,OM,863725031194523,000000000000,Q0,410#
//! ^                                           ^
//! start marker                                terminator
//! ```
//!
//! # Usage
//!
//! ```
//! use lockwire_protocol::StreamParser;
//!
//! let mut parser = StreamParser::new();
//!
//! // Feed partial data as it arrives from the socket
//! parser.feed(b"*CMDR,OM,8637250311");
//! parser.feed(b"94523,000000000000,Q0,410#");
//!
//! let frame = parser.next_frame().unwrap();
//! assert_eq!(
//!     frame.core_text().unwrap(),
//!     "*CMDR,OM,863725031194523,000000000000,Q0,410#"
//! );
//! ```

use bytes::{BufMut, BytesMut};
use std::collections::VecDeque;

use crate::frame::Frame;
use lockwire_core::constants::{FRAME_MARKER, FRAME_OVERHEAD, FRAME_TERMINATOR};

/// Maximum bytes held across the raw buffer and the frame body being
/// assembled.
///
/// A legal frame is a few hundred bytes at most, so anything approaching
/// this bound is a protocol violation or a hostile peer. When the bound
/// is crossed the parser resets and resynchronizes on the next start
/// marker.
const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Initial buffer capacity for incoming TCP data.
const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;

/// Initial capacity for frame body assembly.
///
/// Position reports are the largest routine frame and fit comfortably.
const INITIAL_BODY_CAPACITY: usize = 256;

/// Initial capacity of the completed-frame queue.
///
/// Locks flush several queued reports after a connectivity gap, so a
/// single read often carries a small burst of frames.
const INITIAL_FRAME_QUEUE_CAPACITY: usize = 4;

/// State machine states for frame extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Scanning for the start marker.
    ///
    /// Bytes seen in this state are not part of any frame. Modem banner
    /// lines, stray CRLF between frames and the response preamble all
    /// fall through here and are discarded.
    WaitingStart,

    /// Accumulating body bytes until the terminator.
    ///
    /// A start marker seen in this state is kept as body data rather
    /// than restarting the frame; the typed parser rejects it later if
    /// the frame really was truncated.
    ReadingBody,
}

/// Stateful frame extractor for a tracker TCP connection.
///
/// Feeding bytes never fails. Garbage between frames is discarded,
/// non-ASCII frames are dropped, and an unterminated frame that exceeds
/// the size bound silently resets the parser. Complete frames queue up
/// and are taken with [`next_frame`](StreamParser::next_frame) or
/// [`drain_frames`](StreamParser::drain_frames).
///
/// State transitions:
/// - `WaitingStart` to `ReadingBody` on the start marker
/// - `ReadingBody` to `WaitingStart` on the terminator, queueing a frame
/// - `ReadingBody` to `WaitingStart` when the size bound is exceeded
///
/// # Example
///
/// ```
/// use lockwire_protocol::StreamParser;
///
/// let mut parser = StreamParser::new();
///
/// parser.feed(b"*CMDR,OM,863725031194523,");
/// assert!(parser.next_frame().is_none());
///
/// parser.feed(b"161201150000,U0#");
/// assert_eq!(parser.frames_available(), 1);
/// ```
#[derive(Debug)]
pub struct StreamParser {
    /// Buffer for bytes not yet walked by the state machine.
    buffer: BytesMut,

    /// Current state machine state.
    state: ParserState,

    /// Body of the frame currently being assembled, markers excluded.
    body: Vec<u8>,

    /// Completed frames ready for extraction.
    frames: VecDeque<Frame>,
}

impl StreamParser {
    /// Create a new stream parser.
    ///
    /// Buffers are preallocated for the typical connection: one read of
    /// TCP data, one frame body and a small burst of queued frames.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            state: ParserState::WaitingStart,
            body: Vec::with_capacity(INITIAL_BODY_CAPACITY),
            frames: VecDeque::with_capacity(INITIAL_FRAME_QUEUE_CAPACITY),
        }
    }

    /// Feed bytes from the socket into the parser.
    ///
    /// Appends to the internal buffer and extracts as many complete
    /// frames as the data allows. A single call can queue several
    /// frames when a lock flushes its backlog.
    ///
    /// # Example
    ///
    /// ```
    /// use lockwire_protocol::StreamParser;
    ///
    /// let mut parser = StreamParser::new();
    /// parser.feed(b"*CMDR,OM,863725031194523,000000000000,Q0,410#");
    /// assert!(parser.next_frame().is_some());
    /// ```
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);

        while self.try_extract_frame() {
            // Keep extracting while complete frames remain
        }
    }

    /// Take the next complete frame, if one is queued.
    pub fn next_frame(&mut self) -> Option<Frame> {
        self.frames.pop_front()
    }

    /// Current state of the parser state machine.
    ///
    /// # Example
    ///
    /// ```
    /// use lockwire_protocol::{ParserState, StreamParser};
    ///
    /// let parser = StreamParser::new();
    /// assert_eq!(parser.state(), ParserState::WaitingStart);
    /// ```
    #[must_use]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Number of complete frames waiting to be taken.
    #[must_use]
    pub fn frames_available(&self) -> usize {
        self.frames.len()
    }

    /// Discard all buffered data and reset the state machine.
    ///
    /// Used for error recovery when a connection is being torn down or
    /// resynchronized.
    ///
    /// # Example
    ///
    /// ```
    /// use lockwire_protocol::{ParserState, StreamParser};
    ///
    /// let mut parser = StreamParser::new();
    /// parser.feed(b"*CMDR,OM,8637");
    /// parser.clear();
    ///
    /// assert_eq!(parser.state(), ParserState::WaitingStart);
    /// assert_eq!(parser.frames_available(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.body.clear();
        self.frames.clear();
        self.state = ParserState::WaitingStart;
    }

    /// Iterator draining all currently queued frames.
    ///
    /// Yields until the queue is empty. It does not consume more buffer
    /// data; call [`feed`](StreamParser::feed) first.
    ///
    /// # Example
    ///
    /// ```
    /// use lockwire_protocol::StreamParser;
    ///
    /// let mut parser = StreamParser::new();
    /// parser.feed(b"*CMDR,OM,863725031194523,161201150000,U0#");
    /// parser.feed(b"*CMDR,OM,863725031194523,000000000000,Q0,410#");
    ///
    /// let frames: Vec<_> = parser.drain_frames().collect();
    /// assert_eq!(frames.len(), 2);
    /// ```
    pub fn drain_frames(&mut self) -> DrainFrames<'_> {
        DrainFrames { parser: self }
    }

    /// Run the state machine over the buffer, extracting at most one
    /// frame.
    ///
    /// Returns `true` if a terminator was consumed, meaning another pass
    /// may find more data to process.
    fn try_extract_frame(&mut self) -> bool {
        // The bound covers both the unprocessed buffer and the body
        // being assembled, so an endless unterminated frame cannot grow
        // memory. Frames larger than the bound are lost.
        if self.body.len() + self.buffer.len() > MAX_BUFFER_SIZE {
            self.clear();
            return false;
        }

        loop {
            match self.state {
                ParserState::WaitingStart => {
                    if !self.handle_waiting_start() {
                        return false;
                    }
                }
                ParserState::ReadingBody => {
                    return self.handle_reading_body();
                }
            }
        }
    }

    /// Scan for the start marker, discarding everything before it.
    ///
    /// Returns `true` if the marker was found and the state advanced.
    fn handle_waiting_start(&mut self) -> bool {
        if let Some(marker_pos) = self.buffer.iter().position(|&b| b == FRAME_MARKER) {
            // Garbage before the marker is dropped, the marker itself
            // is consumed; it is re-added when the frame is assembled.
            let _ = self.buffer.split_to(marker_pos + 1);
            self.state = ParserState::ReadingBody;
            self.body.clear();
            true
        } else {
            self.buffer.clear();
            false
        }
    }

    /// Accumulate body bytes and emit a frame when the terminator shows
    /// up.
    ///
    /// Returns `true` if a frame boundary was consumed.
    fn handle_reading_body(&mut self) -> bool {
        if let Some(term_pos) = self.buffer.iter().position(|&b| b == FRAME_TERMINATOR) {
            let body_bytes = self.buffer.split_to(term_pos);
            self.body.extend_from_slice(&body_bytes);
            let _ = self.buffer.split_to(1);

            if self.body.is_ascii() {
                self.enqueue_frame_from_body();
            }
            // Non-ASCII frames are corrupt and dropped without a trace;
            // the connection stays usable for the next frame.

            self.state = ParserState::WaitingStart;
            self.body.clear();
            true
        } else {
            self.body.extend_from_slice(&self.buffer);
            self.buffer.clear();
            false
        }
    }

    /// Reassemble the markers around the accumulated body and queue the
    /// frame.
    fn enqueue_frame_from_body(&mut self) {
        let mut data = BytesMut::with_capacity(self.body.len() + FRAME_OVERHEAD);
        data.put_u8(FRAME_MARKER);
        data.put_slice(&self.body);
        data.put_u8(FRAME_TERMINATOR);
        self.frames.push_back(Frame::new(data.freeze(), false));
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator created by [`StreamParser::drain_frames`].
pub struct DrainFrames<'a> {
    parser: &'a mut StreamParser,
}

impl Iterator for DrainFrames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_frame()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.parser.frames_available();
        (len, Some(len))
    }
}

impl ExactSizeIterator for DrainFrames<'_> {
    fn len(&self) -> usize {
        self.parser.frames_available()
    }
}
