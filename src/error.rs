use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container header or padding byte is malformed.
    #[error("Malformed container: {0}")]
    Decode(String),

    /// Bits remain after the last symbol that do not lead to a leaf.
    #[error("Corrupt bitstream: {trailing_bits} trailing bit(s) do not form a code")]
    CorruptBitstream { trailing_bits: usize },

    #[error("Text encoding error: {0}")]
    TextEncoding(String),

    /// The encoder met a symbol absent from its own code table.
    #[error("No code for symbol {0:?}")]
    MissingCode(char),
}

impl CodecError {
    pub(crate) fn decode<S: Into<String>>(message: S) -> Self {
        CodecError::Decode(message.into())
    }
}

impl From<std::string::FromUtf8Error> for CodecError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        CodecError::TextEncoding(e.to_string())
    }
}
