//! A response writer buffer for intercepting HTTP responses
//!
//! This crate lets request handling code assemble a response, headers, status and
//! body, without any of it reaching the real response destination. The assembled
//! response is published later in a single commit step, which gives middleware the
//! chance to inspect, rewrite or veto it before the client sees anything.
//!
//! # Features
//!
//! - Decorator over any [`ResponseSink`], usable wherever a sink is expected
//! - Staged header set, copied from the sink at construction
//! - Minimal-diff header merge on commit
//! - Single-payload body cache with last-write-wins semantics
//! - One-shot commit, the buffer is closed afterwards
//! - Optional header rollback when the sink fails the body write
//!
//! # Example
//!
//! ```
//! use http::{HeaderValue, StatusCode, header};
//! use micro_rwb::sink::{ResponseRecorder, ResponseSink};
//! use micro_rwb::ResponseBuffer;
//!
//! let mut recorder = ResponseRecorder::new();
//! recorder.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
//!
//! let mut buffer = ResponseBuffer::new(&mut recorder);
//! buffer.headers_mut().insert("potato", HeaderValue::from_static("russet"));
//! buffer.write(br#"{"draft":true}"#).unwrap();
//!
//! // a middleware changes its mind about the body
//! if buffer.body().windows(5).any(|w| w == b"draft") {
//!     buffer.set_status(StatusCode::ACCEPTED);
//!     buffer.write(br#"{"queued":true}"#).unwrap();
//! }
//!
//! // the sink has not seen anything yet
//! assert!(!buffer.get_ref().headers().contains_key("potato"));
//!
//! buffer.commit().unwrap();
//! assert!(buffer.commit().unwrap_err().is_closed());
//!
//! assert_eq!(recorder.headers()["potato"], "russet");
//! assert_eq!(recorder.status(), Some(StatusCode::ACCEPTED));
//! assert_eq!(recorder.body(), br#"{"queued":true}"#);
//! ```
//!
//! # Architecture
//!
//! - [`sink`]: the [`ResponseSink`] trait and two implementations
//! - [`merge`]: the header reconciliation used by commit
//! - [`ResponseBuffer`]: the buffer and its builder
//!
//! # Error Handling
//!
//! - [`BufferError`]: returned by the buffer, either `Closed` or the sink's own error
//! - [`SendError`]: returned by [`sink::Http1Sink`]
//!
//! # Limitations
//!
//! - One buffer per response, not meant to be shared between threads
//! - The body is a single payload, not a stream
//! - Header values are opaque, nothing is parsed

mod buffer;
mod error;
mod utils;

pub mod merge;
pub mod sink;

pub use buffer::ResponseBuffer;
pub use buffer::ResponseBufferBuilder;
pub use buffer::Rollback;
pub use error::BufferError;
pub use error::SendError;
pub use sink::ResponseSink;
