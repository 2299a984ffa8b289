//! Memory reference traces.
//!
//! A trace is plain text with one reference per line:
//!
//! ```text
//! # address  access
//! 0041f7a0   R
//! 13f5e2c0   W
//! ```
//!
//! The address is hexadecimal (an optional `0x` prefix is accepted) and is
//! mapped to its page with [`PageId::from_address`]. The access is `R` or
//! `W`, in either case. Blank lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::common::{Error, PageId, Result};
use crate::mmu::Access;

/// One page reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    pub page: PageId,
    pub access: Access,
}

impl TraceEntry {
    pub fn read(page: impl Into<PageId>) -> Self {
        Self {
            page: page.into(),
            access: Access::Read,
        }
    }

    pub fn write(page: impl Into<PageId>) -> Self {
        Self {
            page: page.into(),
            access: Access::Write,
        }
    }
}

/// Streams [`TraceEntry`] values out of any buffered reader.
///
/// Yields an error for the first malformed line; the caller decides
/// whether to stop.
pub struct TraceReader<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                // read_line has already consumed the offending line.
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.line_no += 1;
                    return Some(Err(Error::TraceParse {
                        line: self.line_no,
                        reason: "line is not valid UTF-8".to_string(),
                    }));
                }
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;

            match parse_line(self.line_no, &self.buf) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parse a whole trace held in memory.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEntry>> {
    TraceReader::new(text.as_bytes()).collect()
}

/// Read and parse a trace file.
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceEntry>> {
    TraceReader::open(path)?.collect()
}

/// `Ok(None)` for lines that carry no reference.
fn parse_line(line_no: usize, line: &str) -> Result<Option<TraceEntry>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let err = |reason: String| Error::TraceParse {
        line: line_no,
        reason,
    };

    let mut fields = line.split_whitespace();
    let (address, access) = match (fields.next(), fields.next(), fields.next()) {
        (Some(address), Some(access), None) => (address, access),
        (Some(_), None, _) => return Err(err("missing access type".to_string())),
        _ => return Err(err(format!("expected '<address> <R|W>', got '{}'", line))),
    };

    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err(format!("bad address '{}': expected hex digits", address)));
    }
    let address = u64::from_str_radix(digits, 16)
        .map_err(|e| err(format!("bad address '{}': {}", address, e)))?;

    let access = match access {
        "R" | "r" => Access::Read,
        "W" | "w" => Access::Write,
        other => return Err(err(format!("bad access type '{}'", other))),
    };

    Ok(Some(TraceEntry {
        page: PageId::from_address(address),
        access,
    }))
}
