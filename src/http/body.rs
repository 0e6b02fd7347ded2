//! Response body module
//!
//! All responses share one boxed body type so small status bodies and
//! streamed file bodies can travel through the same handler signature.
//! Files are streamed chunk by chunk rather than buffered, so serving a
//! large asset never requires holding it fully in memory.

use futures::Stream;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio::io::{AsyncRead, ReadBuf};

/// Unified response body type
pub type ResponseBody = BoxBody<Bytes, std::io::Error>;

/// Read chunk size for streamed file bodies
const CHUNK_SIZE: usize = 16 * 1024;

/// Build an empty body (HEAD responses, builder fallbacks)
pub fn empty() -> ResponseBody {
    Full::new(Bytes::new()).map_err(io_never).boxed()
}

/// Build a fully buffered body from in-memory bytes
pub fn full<T: Into<Bytes>>(data: T) -> ResponseBody {
    Full::new(data.into()).map_err(io_never).boxed()
}

/// Build a streaming body over an open file
pub fn file_stream(file: File) -> ResponseBody {
    StreamBody::new(FileStream { file }).boxed()
}

// Full's error type is Infallible; this converts it to the stream error type.
fn io_never(never: std::convert::Infallible) -> std::io::Error {
    match never {}
}

/// Frame stream over an open file, driven by the connection as the peer
/// consumes the response.
struct FileStream {
    file: File,
}

impl Stream for FileStream {
    type Item = Result<Frame<Bytes>, std::io::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut buf = ReadBuf::new(&mut chunk);

        match Pin::new(&mut this.file).poll_read(cx, &mut buf) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(e)) => Poll::Ready(Some(Err(e))),
            Poll::Ready(Ok(())) => {
                let filled = buf.filled();
                if filled.is_empty() {
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Ok(Frame::data(Bytes::copy_from_slice(filled)))))
                }
            }
        }
    }
}
