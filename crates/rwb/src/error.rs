use std::io;
use thiserror::Error;

/// Errors returned by [`ResponseBuffer`](crate::ResponseBuffer).
///
/// The buffer has one failure of its own, [`BufferError::Closed`]. Anything the
/// underlying sink reports is carried through untouched in [`BufferError::Sink`].
#[derive(Debug, Error)]
pub enum BufferError<E> {
    #[error("buffer closed")]
    Closed,

    #[error(transparent)]
    Sink(E),
}

impl<E> BufferError<E> {
    /// Whether the buffer refused because it was already committed.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns the sink error, if this is one.
    pub fn into_sink_error(self) -> Option<E> {
        match self {
            Self::Closed => None,
            Self::Sink(e) => Some(e),
        }
    }
}

/// Errors returned by [`Http1Sink`](crate::sink::Http1Sink).
#[derive(Error, Debug)]
pub enum SendError {
    #[error("response already sent")]
    AlreadySent,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    /// Wraps anything convertible into an [`io::Error`].
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
