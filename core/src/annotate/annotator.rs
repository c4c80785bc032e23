use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::format::RenderPrefix;
use super::scan::{split_line_from, Split};
use super::StreamTag;
use crate::error::PipelineError;

pub const READ_CHUNK: usize = 16 * 1024;

/// Reads `source` to the end and writes every line to `sink` as
/// `prefix + line + "\n"`, one write and flush per line.
///
/// Returns the number of lines written. The prefix is rendered afresh for
/// each line.
pub async fn annotate<R, W, P>(
    source: &mut R,
    sink: &mut W,
    stream: StreamTag,
    prefix: &P,
) -> Result<u64, PipelineError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
    P: RenderPrefix + ?Sized,
{
    let mut chunk = vec![0u8; READ_CHUNK];
    let mut pending: Vec<u8> = Vec::with_capacity(READ_CHUNK);
    let mut at_eof = false;
    let mut lines = 0u64;

    // bytes of the unconsumed tail already searched without finding a terminator
    let mut scanned = 0;

    loop {
        let mut start = 0;
        loop {
            match split_line_from(&pending[start..], scanned, at_eof) {
                Split::Line { advance, line } => {
                    let out = join_line(&prefix.render(stream), line);
                    start += advance;
                    scanned = 0;
                    write_line(sink, &out, stream).await?;
                    lines += 1;
                }
                Split::NeedMore => {
                    // back up one byte so a trailing `\r` is looked at again
                    scanned = (pending.len() - start).saturating_sub(1);
                    break;
                }
                Split::End => {
                    tracing::debug!(%stream, lines, "annotator reached end of stream");
                    return Ok(lines);
                }
            }
        }
        pending.drain(..start);

        let n = source
            .read(&mut chunk)
            .await
            .map_err(|e| PipelineError::Scan { stream, source: e })?;
        if n == 0 {
            at_eof = true;
        } else {
            pending.extend_from_slice(&chunk[..n]);
        }
    }
}

/// Writes a single annotated line that did not come from a stream, such as
/// the echoed command line or a separator.
pub async fn print_annotated<W, P>(
    sink: &mut W,
    stream: StreamTag,
    prefix: &P,
    text: &str,
) -> Result<(), PipelineError>
where
    W: AsyncWrite + Unpin + ?Sized,
    P: RenderPrefix + ?Sized,
{
    let out = join_line(&prefix.render(stream), text.as_bytes());
    write_line(sink, &out, stream).await
}

fn join_line(prefix: &str, line: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + line.len() + 1);
    out.extend_from_slice(prefix.as_bytes());
    out.extend_from_slice(line);
    out.push(b'\n');
    out
}

async fn write_line<W>(sink: &mut W, out: &[u8], stream: StreamTag) -> Result<(), PipelineError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    sink.write_all(out)
        .await
        .map_err(|e| PipelineError::Write { stream, source: e })?;
    sink.flush()
        .await
        .map_err(|e| PipelineError::Write { stream, source: e })
}
