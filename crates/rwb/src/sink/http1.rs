//! HTTP/1.1 serializing sink
//!
//! [`Http1Sink`] turns status, headers and a single body payload into HTTP/1.1
//! response bytes on any [`Write`]. The head goes out together with the first body
//! write, with `content-length` set from the payload size. After that the response
//! is sealed.

use crate::error::SendError;
use crate::sink::ResponseSink;
use bytes::{BufMut, BytesMut};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use std::io::Write;
use tracing::{trace, warn};

/// Initial buffer size allocated for head serialization
const INIT_HEAD_SIZE: usize = 4 * 1024;

#[derive(Debug)]
pub struct Http1Sink<W> {
    writer: W,
    headers: HeaderMap,
    status: StatusCode,
    sent: bool,
}

impl<W: Write> Http1Sink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, headers: HeaderMap::new(), status: StatusCode::OK, sent: false }
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    fn encode_head(&mut self, body_len: usize, dst: &mut BytesMut) {
        dst.reserve(INIT_HEAD_SIZE + body_len);

        dst.put_slice(b"HTTP/1.1 ");
        dst.put_slice(self.status.as_str().as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(self.status.canonical_reason().unwrap_or("").as_bytes());
        dst.put_slice(b"\r\n");

        // the payload size is the only truth about the body length
        self.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body_len));

        for (header_name, header_value) in &self.headers {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
    }
}

impl<W: Write> ResponseSink for Http1Sink<W> {
    type Error = SendError;

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        if self.sent {
            warn!(%status, "response already sent, status ignored");
            return;
        }
        self.status = status;
    }

    fn write_body(&mut self, payload: &[u8]) -> Result<usize, Self::Error> {
        if self.sent {
            return Err(SendError::AlreadySent);
        }

        let mut buf = BytesMut::new();
        self.encode_head(payload.len(), &mut buf);
        buf.put_slice(payload);

        // once bytes may have reached the peer there is no second attempt
        self.sent = true;
        self.writer.write_all(&buf).map_err(SendError::io)?;
        self.writer.flush().map_err(SendError::io)?;

        trace!(status = %self.status, body_size = payload.len(), "response sent");
        Ok(payload.len())
    }
}
