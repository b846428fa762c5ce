use crate::sink::ResponseSink;
use bytes::{Bytes, BytesMut};
use http::{HeaderMap, Response, StatusCode};
use std::convert::Infallible;
use tracing::warn;

/// A [`ResponseSink`] that keeps what it receives in memory.
///
/// The first status set wins, later ones are dropped. Writing a body without a
/// status implies `200 OK`. Body writes accumulate, and are counted so a caller can
/// tell how many times the sink was written to.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    headers: HeaderMap,
    status: Option<StatusCode>,
    body: BytesMut,
    write_count: usize,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers(headers: HeaderMap) -> Self {
        Self { headers, ..Self::default() }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Number of `write_body` calls received so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Builds the recorded response. A missing status becomes `200 OK`.
    pub fn into_response(self) -> Response<Bytes> {
        let mut response = Response::new(self.body.freeze());
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for ResponseRecorder {
    type Error = Infallible;

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        match self.status {
            Some(current) => warn!(%current, ignored = %status, "status already set"),
            None => self.status = Some(status),
        }
    }

    fn write_body(&mut self, payload: &[u8]) -> Result<usize, Self::Error> {
        self.status.get_or_insert(StatusCode::OK);
        self.body.extend_from_slice(payload);
        self.write_count += 1;
        Ok(payload.len())
    }
}
