//! Line-numbered listing reader

use std::io::BufRead;

use crate::error::{BoxduError, Result};

use super::preamble::{self, PREAMBLE_LINES};

/// Reads a listing line by line, validating the banner first.
///
/// Entry lines that are not UTF-8 are decoded lossily; file names on the
/// server are raw bytes and one odd name must not stop the listing.
pub struct ListingReader<R> {
    inner: R,
    raw: Vec<u8>,
    line: String,
    line_no: usize,
    lossy: bool,
    lossy_lines: usize,
}

impl<R: BufRead> ListingReader<R> {
    /// Wrap `inner` and consume the banner.
    ///
    /// Fails before anything else is read if the banner does not match.
    pub fn open(inner: R) -> Result<Self> {
        let mut reader = Self {
            inner,
            raw: Vec::new(),
            line: String::new(),
            line_no: 0,
            lossy: false,
            lossy_lines: 0,
        };
        reader.read_preamble()?;
        Ok(reader)
    }

    fn read_preamble(&mut self) -> Result<()> {
        for index in 0..PREAMBLE_LINES {
            if !self.fill_line()? {
                return Err(BoxduError::TruncatedPreamble {
                    line: self.line_no + 1,
                });
            }
            let checked = if self.lossy {
                Err(preamble::description(index))
            } else {
                preamble::check_line(index, &self.line)
            };
            if let Err(expected) = checked {
                return Err(BoxduError::Preamble {
                    line: self.line_no,
                    expected,
                    found: self.line.clone(),
                });
            }
        }
        Ok(())
    }

    /// Read the next line into the buffer, without its terminator.
    fn fill_line(&mut self) -> Result<bool> {
        self.raw.clear();
        self.line.clear();
        if self.inner.read_until(b'\n', &mut self.raw)? == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        let mut end = self.raw.len();
        while end > 0 && matches!(self.raw[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        let bytes = &self.raw[..end];
        match std::str::from_utf8(bytes) {
            Ok(text) => {
                self.lossy = false;
                self.line.push_str(text);
            }
            Err(_) => {
                self.lossy = true;
                self.lossy_lines += 1;
                self.line.push_str(&String::from_utf8_lossy(bytes));
            }
        }
        Ok(true)
    }

    /// Next line after the banner along with its 1-based line number.
    pub fn next_line(&mut self) -> Result<Option<(usize, &str)>> {
        if !self.fill_line()? {
            return Ok(None);
        }
        if self.lossy {
            tracing::warn!(
                "line {}: not valid UTF-8, undecodable bytes replaced: {:?}",
                self.line_no,
                self.line
            );
        }
        Ok(Some((self.line_no, self.line.as_str())))
    }

    /// Number of lines consumed so far, banner included.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Number of lines after the banner that had to be decoded lossily.
    pub fn lossy_lines(&self) -> usize {
        self.lossy_lines
    }
}
