//! The capability set a response destination has to offer.
//!
//! A [`ResponseSink`] is whatever finally delivers status, headers and body bytes
//! to a peer. [`ResponseBuffer`](crate::ResponseBuffer) wraps one and implements
//! the same trait, so request handling code can be handed either without knowing
//! which it got.
//!
//! Two sinks ship with the crate:
//!
//! - [`ResponseRecorder`]: keeps everything in memory, mostly for tests
//! - [`Http1Sink`]: serializes an HTTP/1.1 response into any [`std::io::Write`]

use http::{HeaderMap, StatusCode};

mod http1;
mod recorder;

pub use http1::Http1Sink;
pub use recorder::ResponseRecorder;

/// A destination for one HTTP response.
///
/// Header names are [`http::HeaderName`], which are case-insensitive. Values are
/// opaque and a name may carry several of them.
pub trait ResponseSink {
    type Error: std::error::Error + 'static;

    /// The live header set.
    fn headers(&self) -> &HeaderMap;

    /// The live header set, mutable. Changes are visible to later reads.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sets the response status. How repeated calls are treated is up to the sink.
    fn set_status(&mut self, status: StatusCode);

    /// Writes body bytes, returning how many were accepted.
    ///
    /// # Errors
    ///
    /// Returns the sink's own error when the bytes can't be delivered.
    fn write_body(&mut self, payload: &[u8]) -> Result<usize, Self::Error>;
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    type Error = S::Error;

    #[inline]
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    #[inline]
    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    #[inline]
    fn set_status(&mut self, status: StatusCode) {
        (**self).set_status(status);
    }

    #[inline]
    fn write_body(&mut self, payload: &[u8]) -> Result<usize, Self::Error> {
        (**self).write_body(payload)
    }
}

impl<S: ResponseSink + ?Sized> ResponseSink for Box<S> {
    type Error = S::Error;

    #[inline]
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    #[inline]
    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    #[inline]
    fn set_status(&mut self, status: StatusCode) {
        (**self).set_status(status);
    }

    #[inline]
    fn write_body(&mut self, payload: &[u8]) -> Result<usize, Self::Error> {
        (**self).write_body(payload)
    }
}
