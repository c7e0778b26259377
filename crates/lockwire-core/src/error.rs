use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Decode errors
    #[error("Malformed frame: {message}")]
    MalformedFrame { message: String },

    #[error("Frame too large: {size} bytes exceeds maximum of {max_size}")]
    FrameTooLarge { size: usize, max_size: usize },

    // Encode errors
    #[error("Invalid response descriptor: {message}")]
    InvalidDescriptor { message: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
