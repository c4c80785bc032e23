mod annotator;
mod color;
mod format;
mod pipe;
mod pipeline;
mod scan;

pub use annotator::{annotate, print_annotated, READ_CHUNK};
pub use color::{colorize, hashed_color, hash_str};
pub use format::{base_name, render, Prefix, PrefixSet, RenderPrefix};
pub use pipe::{pipe, AnnotatedPipe, PIPE_BUFFER};
pub use pipeline::{BoxedReader, BoxedWriter, DrainReport, Pipeline};
pub use scan::{split_line, split_line_from, Split};

use std::fmt;

/// Which parent stream a pipeline instance writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamTag {
    Stdout,
    Stderr,
    Stdin,
    Unknown,
}

impl StreamTag {
    /// Letter substituted for `%>`.
    pub fn letter(self) -> char {
        match self {
            StreamTag::Stdout => 'O',
            StreamTag::Stderr => 'E',
            StreamTag::Stdin => 'I',
            StreamTag::Unknown => '?',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StreamTag::Stdout => "stdout",
            StreamTag::Stderr => "stderr",
            StreamTag::Stdin => "stdin",
            StreamTag::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StreamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
