use std::io;

use thiserror::Error;

/// Broad category of a [`CipherError`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a bad key, parameter or numeric token.
    InvalidArgument,
    /// Ciphertext or an encrypted file failed validation while decoding.
    CorruptData,
    /// Reading or writing a file failed.
    Io,
}

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("corrupt data: {0}")]
    CorruptData(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl CipherError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CipherError::InvalidArgument(msg.into())
    }

    pub fn corrupt_data(msg: impl Into<String>) -> Self {
        CipherError::CorruptData(msg.into())
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        CipherError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CipherError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CipherError::CorruptData(_) => ErrorKind::CorruptData,
            CipherError::Io { .. } => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, CipherError>;
