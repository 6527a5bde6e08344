//! Line-at-a-time access to a bulk request body.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::errors::ReadError;

/// Reads newline-delimited lines from an async body.
///
/// A trailing `\r` is stripped from every line, a final line without a
/// terminating newline is still delivered, and empty lines are delivered as
/// empty slices. Each line is handed out exactly once.
pub struct LineReader<R> {
    inner: R,
    max_line_bytes: usize,
    buf: Vec<u8>,
    lines_read: usize,
}

impl<R> LineReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner,
            max_line_bytes,
            buf: Vec::new(),
            lines_read: 0,
        }
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Returns the next line, or `None` once the body is exhausted.
    pub async fn next_line(&mut self) -> Result<Option<&[u8]>, ReadError> {
        self.buf.clear();

        // Room for the longest accepted line plus "\r\n".
        let limit = (self.max_line_bytes as u64).saturating_add(2);
        let read = (&mut self.inner)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .await?;

        if read == 0 {
            return Ok(None);
        }

        if self.buf.ends_with(b"\n") {
            self.buf.pop();
        }
        if self.buf.ends_with(b"\r") {
            self.buf.pop();
        }

        if self.buf.len() > self.max_line_bytes {
            return Err(ReadError::LineTooLong {
                limit: self.max_line_bytes,
            });
        }

        self.lines_read += 1;
        Ok(Some(&self.buf))
    }
}
