//! Line-oriented terminal I/O.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use crate::domains::catalog::Confirm;

/// Reader/writer pair the console talks through.
pub struct Terminal<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Write text as-is and flush.
    pub async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }

    /// Write one line.
    pub async fn line(&mut self, text: &str) -> std::io::Result<()> {
        self.write(text).await?;
        self.write("\n").await
    }

    /// Show `prompt` and read one line, without its line ending.
    ///
    /// Returns `None` once input is exhausted.
    pub async fn prompt(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.write(prompt).await?;
        let mut buf = String::new();
        if self.reader.read_line(&mut buf).await? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[async_trait]
impl<R, W> Confirm for Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Only `y` or `yes` (any case) confirms; anything else, EOF included,
    /// declines.
    async fn confirm(&mut self, message: &str) -> bool {
        match self.prompt(&format!("{} [y/N] ", message)).await {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}
