//! Deduplicating address output.
//!
//! [`AddressSink`] writes each address at most once, one per line, in the
//! order addresses are first recorded. Every line is flushed as soon as it
//! is written so an aborted run leaves a valid, partial file behind.
//! Closing consumes the sink; no write is possible afterwards.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use alloy::primitives::Address;

/// Line-oriented address writer that skips addresses already written.
#[derive(Debug)]
pub struct AddressSink<W: Write> {
    out: W,
    seen: HashSet<Address>,
}

impl AddressSink<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> io::Result<Self> {
        File::create(path).map(|file| Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> AddressSink<W> {
    /// Wrap an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            seen: HashSet::new(),
        }
    }

    /// Write `address` unless it was already written.
    ///
    /// Returns `true` if a line was emitted.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails. The address is not
    /// marked as seen in that case.
    pub fn record(&mut self, address: Address) -> io::Result<bool> {
        if self.seen.contains(&address) {
            return Ok(false);
        }
        self.write_line(address)?;
        self.seen.insert(address);
        Ok(true)
    }

    /// Append `address` and a `\n` terminator as one chunk, then flush.
    /// Addresses are written in EIP-55 checksummed form.
    fn write_line(&mut self, address: Address) -> io::Result<()> {
        let line = format!("{address}\n");
        self.out.write_all(line.as_bytes())?;
        self.out.flush()
    }

    /// Flush and release the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn close(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
