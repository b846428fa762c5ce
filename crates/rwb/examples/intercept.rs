//! Serves every connection through a response buffer, and lets a tiny middleware
//! veto responses that leak a secret.
//!
//! Try `curl -i http://127.0.0.1:9001/` and `curl -i http://127.0.0.1:9001/secret`.

use http::{HeaderValue, StatusCode, header};
use micro_rwb::sink::Http1Sink;
use micro_rwb::{ResponseBuffer, ResponseSink, Rollback};
use std::io::{BufRead, BufReader};
use std::net::{TcpListener, TcpStream};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(port = 9001, "start listening");
    let listener = match TcpListener::bind("127.0.0.1:9001") {
        Ok(listener) => listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        if let Err(e) = serve(stream) {
            error!(cause = %e, "failed to send response");
        }
    }
}

fn serve(stream: TcpStream) -> Result<(), Box<dyn std::error::Error>> {
    let path = read_path(&stream)?;
    info!(%path, "request");

    let mut sink = Http1Sink::new(stream);
    sink.headers_mut().insert(header::SERVER, HeaderValue::from_static("micro-rwb"));

    let mut buffer = ResponseBuffer::builder().rollback(Rollback::Headers).build(&mut sink);
    handle(&path, &mut buffer);
    veto_secrets(&mut buffer);

    buffer.commit()?;
    Ok(())
}

/// Request handling code only knows it was given a sink.
fn handle<S: ResponseSink>(path: &str, sink: &mut S) {
    sink.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    let body = if path == "/secret" { "the password is hunter2\n" } else { "hello world\n" };
    if let Err(e) = sink.write_body(body.as_bytes()) {
        error!(cause = %e, "failed to write body");
    }
}

fn veto_secrets<S: ResponseSink>(buffer: &mut ResponseBuffer<S>) {
    if buffer.body().windows(8).any(|w| w == b"password") {
        warn!("response vetoed");
        buffer.headers_mut().insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        buffer.set_status(StatusCode::FORBIDDEN);
        if let Err(e) = buffer.write(b"forbidden\n") {
            error!(cause = %e, "failed to replace body");
        }
    }
}

fn read_path(stream: &TcpStream) -> std::io::Result<String> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // drain the remaining head, the body is ignored
    let mut line = String::new();
    while reader.read_line(&mut line)? > 2 {
        line.clear();
    }

    Ok(request_line.split_whitespace().nth(1).unwrap_or("/").to_string())
}
