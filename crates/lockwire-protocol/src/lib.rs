pub mod builder;
pub mod codec;
pub mod commands;
pub mod field;
pub mod frame;
pub mod packet;
pub mod parser;
pub mod stream_parser;

pub use builder::{Response, ResponseBuilder};
pub use codec::OmniCodec;
pub use commands::{CommandCode, CommandFamily};
pub use field::RawToken;
pub use frame::Frame;
pub use packet::{CommandData, Packet};
pub use parser::PacketParser;
pub use stream_parser::{DrainFrames, ParserState, StreamParser};
