//! The response buffer.
//!
//! [`ResponseBuffer`] stands in front of a [`ResponseSink`] and catches everything
//! meant for it: header changes land in a private copy of the sink's header set,
//! the body is cached, the status is remembered. Nothing reaches the sink until
//! [`ResponseBuffer::commit`], which publishes the staged response in one go and
//! closes the buffer for good. Dropping the buffer without committing leaves the
//! sink exactly as it was.
//!
//! The body cache holds one payload. Each [`write`](ResponseBuffer::write)
//! replaces the previous one, so a handler can overwrite a speculative body.
//!
//! # Partial commits
//!
//! Commit applies headers and status before it writes the body. If the body write
//! fails those changes are already on the sink. What happens to them is chosen
//! with [`Rollback`]:
//!
//! - [`Rollback::None`] (default) leaves them applied
//! - [`Rollback::Headers`] restores the sink's header set to its pre-commit state
//!
//! The status can't be taken back through [`ResponseSink`], so it stays applied
//! either way. In both cases the buffer remains open and commit may be retried.

use crate::error::BufferError;
use crate::merge::merge_headers;
use crate::sink::ResponseSink;
use crate::utils::ensure;
use bytes::BytesMut;
use http::{HeaderMap, StatusCode};
use tracing::{debug, error, trace, warn};

/// What commit does to already-applied changes when the sink rejects the body.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Rollback {
    /// Keep headers and status on the sink.
    #[default]
    None,
    /// Put the sink's header set back the way it was before the commit.
    Headers,
}

#[derive(Debug, Default, Clone)]
pub struct ResponseBufferBuilder {
    rollback: Rollback,
    body_capacity: usize,
}

impl ResponseBufferBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// How commit treats the sink when the body write fails. Defaults to [`Rollback::None`].
    pub fn rollback(mut self, rollback: Rollback) -> Self {
        self.rollback = rollback;
        self
    }

    /// Initial capacity of the body cache.
    pub fn body_capacity(mut self, capacity: usize) -> Self {
        self.body_capacity = capacity;
        self
    }

    pub fn build<S: ResponseSink>(self, sink: S) -> ResponseBuffer<S> {
        let headers = sink.headers().clone();
        trace!(headers = headers.len(), rollback = ?self.rollback, "create response buffer");
        ResponseBuffer {
            sink,
            headers,
            body: BytesMut::with_capacity(self.body_capacity),
            status: None,
            rollback: self.rollback,
            closed: false,
        }
    }
}

/// Stages a response and writes it to the wrapped sink once, on commit.
///
/// The buffer is a [`ResponseSink`] itself, so it can be passed anywhere a sink is
/// expected, including to another buffer.
#[derive(Debug)]
pub struct ResponseBuffer<S> {
    sink: S,
    headers: HeaderMap,
    body: BytesMut,
    status: Option<StatusCode>,
    rollback: Rollback,
    closed: bool,
}

impl ResponseBuffer<()> {
    pub fn builder() -> ResponseBufferBuilder {
        ResponseBufferBuilder::new()
    }
}

impl<S: ResponseSink> ResponseBuffer<S> {
    /// Wraps `sink`, taking a copy of its current header set.
    ///
    /// Later changes to the sink's headers are invisible to the buffer and the
    /// other way round, until commit.
    pub fn new(sink: S) -> Self {
        ResponseBufferBuilder::new().build(sink)
    }

    /// The staged header set.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The staged header set, for adding, replacing or removing entries.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The cached body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replaces the cached body with `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Closed`] once the buffer has been committed.
    pub fn write(&mut self, payload: &[u8]) -> Result<usize, BufferError<S::Error>> {
        ensure!(!self.closed, BufferError::Closed);
        self.body.clear();
        self.body.extend_from_slice(payload);
        Ok(payload.len())
    }

    /// Remembers `status` for commit. Ignored once the buffer is closed.
    pub fn set_status(&mut self, status: StatusCode) {
        if self.closed {
            warn!(%status, "response buffer closed, status ignored");
            return;
        }
        self.status = Some(status);
    }

    /// Publishes the staged response to the sink and closes the buffer.
    ///
    /// Headers are merged into the sink's header set (see
    /// [`merge_headers`](crate::merge::merge_headers)), the status is applied if
    /// one was set, and the cached body, possibly empty, is written in a single
    /// call. Returns what the sink reports as written.
    ///
    /// # Errors
    ///
    /// - [`BufferError::Closed`] if already committed, nothing is touched
    /// - [`BufferError::Sink`] if the sink fails the body write. The buffer stays
    ///   open; see [`Rollback`] for what remains applied to the sink.
    pub fn commit(&mut self) -> Result<usize, BufferError<S::Error>> {
        ensure!(!self.closed, BufferError::Closed);

        let snapshot = match self.rollback {
            Rollback::Headers => Some(self.sink.headers().clone()),
            Rollback::None => None,
        };

        let stats = merge_headers(self.sink.headers_mut(), &self.headers);

        if let Some(status) = self.status {
            self.sink.set_status(status);
        }

        match self.sink.write_body(&self.body) {
            Ok(written) => {
                self.closed = true;
                debug!(
                    status = ?self.status,
                    body_size = written,
                    removed_keys = stats.removed_keys,
                    appended_values = stats.appended_values,
                    "response buffer committed"
                );
                Ok(written)
            }
            Err(e) => {
                error!(cause = %e, rollback = ?self.rollback, "sink failed to write body");
                if let Some(snapshot) = snapshot {
                    *self.sink.headers_mut() = snapshot;
                }
                Err(BufferError::Sink(e))
            }
        }
    }

    #[inline]
    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// The wrapped sink, mutable.
    ///
    /// Changes made here before commit take part in the header merge like any
    /// other pre-existing sink state.
    #[inline]
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Gives the sink back, discarding whatever was staged if not yet committed.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: ResponseSink> ResponseSink for ResponseBuffer<S> {
    type Error = BufferError<S::Error>;

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        ResponseBuffer::set_status(self, status);
    }

    fn write_body(&mut self, payload: &[u8]) -> Result<usize, Self::Error> {
        self.write(payload)
    }
}
