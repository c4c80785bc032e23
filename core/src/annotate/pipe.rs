use tokio::io::{AsyncWrite, DuplexStream};
use tokio::task::JoinHandle;

use super::annotator::annotate;
use super::format::RenderPrefix;
use super::StreamTag;
use crate::error::PipelineError;

/// In-memory buffer between a producer and its annotator. A producer that
/// gets this far ahead blocks until the annotator catches up.
pub const PIPE_BUFFER: usize = 64 * 1024;

/// Write end of a pipe whose read end is being annotated on its own task.
///
/// Dropping (or shutting down) `writer` ends the stream; await `task` to
/// learn how many lines were written.
pub struct AnnotatedPipe {
    pub writer: DuplexStream,
    pub task: JoinHandle<Result<u64, PipelineError>>,
}

/// Starts an annotator for `stream` writing into `sink` and hands back the
/// write end straight away, before any bytes have been produced.
pub fn pipe<W, P>(sink: W, stream: StreamTag, prefix: P) -> AnnotatedPipe
where
    W: AsyncWrite + Unpin + Send + 'static,
    P: RenderPrefix + Send + Sync + 'static,
{
    let (writer, mut reader) = tokio::io::duplex(PIPE_BUFFER);
    let mut sink = sink;
    let task = tokio::spawn(async move { annotate(&mut reader, &mut sink, stream, &prefix).await });
    AnnotatedPipe { writer, task }
}
