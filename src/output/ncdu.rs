//! ncdu export format writer
//!
//! The document is `[1,0,<metadata>,<root>]` where a directory is an array
//! whose first element is `{"name":...}` followed by its children, and a
//! file is `{"name":...,"dsize":<bytes>}`.

use std::io::{self, Write};
use std::vec;

use serde::Serialize;

use crate::string_utils::push_escaped;
use crate::tree::{Forest, Node, ROOT_NAME};

pub const PROGNAME: &str = "boxdu";
pub const PROGVER: &str = "0.1";

/// Major and minor version of the export format.
const FORMAT_VERSION: (u32, u32) = (1, 0);

const DEFAULT_FLUSH_THRESHOLD: usize = 64 * 1024;

#[derive(Serialize)]
struct Metadata {
    progname: &'static str,
    progver: &'static str,
}

/// Counts of what was written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub directories: usize,
    pub files: usize,
    pub bytes_written: usize,
}

/// A directory whose children are still being written.
///
/// The directory's children are detached from the forest when its frame is
/// pushed; the iterator owns them and is the cursor into what is left. A
/// frame stays on the stack while a child subtree is written above it, so
/// the parent never has to be pushed again, and it is popped (closing the
/// array) once the iterator runs dry.
struct Frame {
    children: vec::IntoIter<(String, Node)>,
}

/// Writes a [`Forest`] as an ncdu export, buffering output and flushing it
/// to the destination in chunks.
pub struct NcduWriter<W: Write> {
    out: W,
    buf: String,
    flush_threshold: usize,
    need_comma: bool,
    summary: WriteSummary,
}

impl<W: Write> NcduWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: String::new(),
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            need_comma: false,
            summary: WriteSummary::default(),
        }
    }

    /// Flush to the destination whenever this many bytes are buffered.
    pub fn with_flush_threshold(mut self, bytes: usize) -> Self {
        self.flush_threshold = bytes.max(1);
        self
    }

    /// Write the whole document, consuming the forest.
    ///
    /// Directories are emptied as they are written, so nothing of the forest
    /// survives. Keep a separate copy of the listing to write it twice.
    pub fn write_forest(mut self, mut forest: Forest) -> io::Result<WriteSummary> {
        let metadata = serde_json::to_string(&Metadata {
            progname: PROGNAME,
            progver: PROGVER,
        })
        .map_err(io::Error::other)?;
        self.buf.push('[');
        self.buf
            .push_str(&format!("{},{},", FORMAT_VERSION.0, FORMAT_VERSION.1));
        self.buf.push_str(&metadata);
        self.need_comma = true;

        let root = forest.root();
        self.open_dir(ROOT_NAME);
        let mut stack = vec![Frame {
            children: forest.take_children(root).into_iter(),
        }];

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            match frame.children.next() {
                None => {
                    stack.pop();
                    self.close_dir();
                }
                Some((name, Node::Leaf(bytes))) => self.file(&name, bytes),
                Some((name, Node::Dir(id))) => {
                    self.open_dir(&name);
                    stack.push(Frame {
                        children: forest.take_children(id).into_iter(),
                    });
                }
            }
            if self.buf.len() >= self.flush_threshold {
                self.flush_buf()?;
            }
        }

        self.buf.push(']');
        self.flush_buf()?;
        self.out.flush()?;
        tracing::debug!(
            "wrote {} directories, {} files, {} bytes",
            self.summary.directories,
            self.summary.files,
            self.summary.bytes_written
        );
        Ok(self.summary)
    }

    fn separator(&mut self) {
        if self.need_comma {
            self.buf.push(',');
        }
        self.need_comma = true;
    }

    fn open_dir(&mut self, name: &str) {
        self.separator();
        self.buf.push_str("[{\"name\":\"");
        push_escaped(&mut self.buf, name);
        self.buf.push_str("\"}");
        self.summary.directories += 1;
    }

    fn close_dir(&mut self) {
        self.buf.push(']');
        self.need_comma = true;
    }

    fn file(&mut self, name: &str, bytes: u64) {
        self.separator();
        self.buf.push_str("{\"name\":\"");
        push_escaped(&mut self.buf, name);
        self.buf.push_str("\",\"dsize\":");
        self.buf.push_str(&bytes.to_string());
        self.buf.push('}');
        self.summary.files += 1;
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(self.buf.as_bytes())?;
        self.summary.bytes_written += self.buf.len();
        self.buf.clear();
        Ok(())
    }
}

/// Write `forest` to `out` with default buffering.
pub fn write_ncdu<W: Write>(out: W, forest: Forest) -> io::Result<WriteSummary> {
    NcduWriter::new(out).write_forest(forest)
}
