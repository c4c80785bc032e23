use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinHandle;

use super::annotator::annotate;
use super::format::{Prefix, PrefixSet};
use super::StreamTag;
use crate::error::PipelineError;

pub type BoxedReader = Box<dyn AsyncRead + Unpin + Send>;
pub type BoxedWriter = Box<dyn AsyncWrite + Unpin + Send>;

type AnnotatorTask = JoinHandle<Result<u64, PipelineError>>;

/// Lines written per stream by a finished [`Pipeline`]. `None` means the
/// stream was not annotated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub stdout: Option<u64>,
    pub stderr: Option<u64>,
}

/// Annotators running over a child's stdout and stderr.
pub struct Pipeline {
    stdout: Option<AnnotatorTask>,
    stderr: Option<AnnotatorTask>,
}

impl Pipeline {
    /// Starts one annotator task per present handle. Each writes into the
    /// matching sink with the matching prefix from `prefixes`.
    pub fn attach(
        stdout: Option<BoxedReader>,
        stderr: Option<BoxedReader>,
        stdout_sink: BoxedWriter,
        stderr_sink: BoxedWriter,
        prefixes: PrefixSet,
    ) -> Self {
        let PrefixSet {
            stdout: out_prefix,
            stderr: err_prefix,
        } = prefixes;
        Self {
            stdout: stdout
                .map(|rd| spawn_annotator(rd, stdout_sink, StreamTag::Stdout, out_prefix)),
            stderr: stderr
                .map(|rd| spawn_annotator(rd, stderr_sink, StreamTag::Stderr, err_prefix)),
        }
    }

    /// Waits until every annotator has seen end of stream.
    ///
    /// Call once the child has exited; its descriptors closing is what ends
    /// the streams. Both tasks are always awaited, and the first failure
    /// (stdout before stderr) is returned.
    pub async fn drain(self) -> Result<DrainReport, PipelineError> {
        let (out, err) = tokio::join!(
            join_annotator(self.stdout, StreamTag::Stdout),
            join_annotator(self.stderr, StreamTag::Stderr)
        );

        match (out, err) {
            (Ok(stdout), Ok(stderr)) => {
                tracing::debug!(?stdout, ?stderr, "pipeline drained");
                Ok(DrainReport { stdout, stderr })
            }
            (Err(e), other) => {
                if let Err(second) = other {
                    tracing::warn!(error = %second, "second annotator also failed");
                }
                Err(e)
            }
            (Ok(_), Err(e)) => Err(e),
        }
    }
}

fn spawn_annotator(
    mut source: BoxedReader,
    mut sink: BoxedWriter,
    stream: StreamTag,
    prefix: Prefix,
) -> AnnotatorTask {
    tokio::spawn(async move {
        let res = annotate(&mut source, &mut sink, stream, &prefix).await;
        if let Err(e) = &res {
            tracing::debug!(%stream, error = %e, "annotator stopped");
        }
        res
    })
}

async fn join_annotator(
    task: Option<AnnotatorTask>,
    stream: StreamTag,
) -> Result<Option<u64>, PipelineError> {
    let Some(task) = task else {
        return Ok(None);
    };
    match task.await {
        Ok(res) => res.map(Some),
        Err(e) => Err(PipelineError::Join {
            stream,
            message: e.to_string(),
        }),
    }
}
