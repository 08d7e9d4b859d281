//! JSON lines writer for Singer messages

use super::message::SingerMessage;
use crate::error::Result;
use std::io::Write;

/// Writes one JSON message per line
#[derive(Debug)]
pub struct MessageWriter<W: Write> {
    out: W,
    records_written: usize,
}

impl<W: Write> MessageWriter<W> {
    /// Wrap an output sink
    pub fn new(out: W) -> Self {
        Self {
            out,
            records_written: 0,
        }
    }

    /// Write a message. `STATE` messages are flushed immediately.
    pub fn write(&mut self, message: &SingerMessage) -> Result<()> {
        serde_json::to_writer(&mut self.out, message)?;
        self.out.write_all(b"\n")?;

        match message {
            SingerMessage::Record { .. } => self.records_written += 1,
            SingerMessage::State { .. } => self.out.flush()?,
            SingerMessage::Schema { .. } => {}
        }
        Ok(())
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Number of `RECORD` messages written
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Unwrap the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
