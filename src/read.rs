use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};

/// Text codec applied to each line as it is read.
///
/// No detection is performed — the configured codec is applied as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Encoding {
    /// Strict UTF-8. A line containing invalid bytes fails with a
    /// [`Read`](crate::Error::Read) error carrying an `InvalidData` source.
    #[default]
    Utf8,
    /// UTF-8 with invalid sequences replaced by U+FFFD.
    Utf8Lossy,
}

/// Buffered, terminator-preserving line reader over an open file.
///
/// Yields each line exactly once, in file order, with its original `\n` or
/// `\r\n` terminator intact (the final line may have none). Single-pass:
/// iteration ends permanently at end-of-file or at the first failed read.
pub(crate) struct LineReader {
    reader: BufReader<File>,
    encoding: Encoding,
    next_line: u64,
    done: bool,
}

impl LineReader {
    pub(crate) fn new(file: File, capacity: Option<usize>, encoding: Encoding) -> Self {
        let reader = match capacity {
            Some(capacity) => BufReader::with_capacity(capacity, file),
            None => BufReader::new(file),
        };
        LineReader {
            reader,
            encoding,
            next_line: 1,
            done: false,
        }
    }

    /// 1-based number of the line the next call to `next` will produce.
    pub(crate) fn next_line_number(&self) -> u64 {
        self.next_line
    }
}

impl Iterator for LineReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut raw = Vec::new();
        match self.reader.read_until(b'\n', &mut raw) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                let line = self.next_line;
                self.next_line += 1;
                match decode(raw, self.encoding) {
                    Ok(text) => Some(Ok(text)),
                    Err(source) => {
                        self.done = true;
                        Some(Err(Error::Read { line, source }))
                    }
                }
            }
            Err(source) => {
                self.done = true;
                Some(Err(Error::Read {
                    line: self.next_line,
                    source,
                }))
            }
        }
    }
}

fn decode(raw: Vec<u8>, encoding: Encoding) -> io::Result<String> {
    match encoding {
        Encoding::Utf8 => {
            String::from_utf8(raw).map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
        }
        Encoding::Utf8Lossy => Ok(String::from_utf8_lossy(&raw).into_owned()),
    }
}
