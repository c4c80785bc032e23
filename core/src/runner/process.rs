use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};

use super::traits::CommandSession;
use super::types::{AnnotatedStreams, ChildExit};
use crate::annotate::BoxedReader;
use crate::error::RunnerError;

/// A child started with [`spawn_command`].
pub struct ProcessSession {
    child: Child,
}

/// Starts `argv` with stdin and environment inherited. Streams selected in
/// `streams` are piped for annotation; the rest go straight to the parent's
/// descriptors.
pub fn spawn_command(
    argv: &[String],
    streams: AnnotatedStreams,
) -> Result<ProcessSession, RunnerError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| RunnerError::Config("no command given".into()))?;

    let piped = |annotated: bool| {
        if annotated {
            Stdio::piped()
        } else {
            Stdio::inherit()
        }
    };

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(piped(streams.stdout))
        .stderr(piped(streams.stderr))
        .spawn()
        .map_err(|e| RunnerError::Spawn {
            program: program.clone(),
            source: e,
        })?;

    tracing::debug!(
        program = %program,
        pid = ?child.id(),
        stdout = streams.stdout,
        stderr = streams.stderr,
        "spawned child"
    );
    Ok(ProcessSession { child })
}

#[async_trait]
impl CommandSession for ProcessSession {
    fn stdout(&mut self) -> Option<BoxedReader> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as BoxedReader)
    }

    fn stderr(&mut self) -> Option<BoxedReader> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as BoxedReader)
    }

    async fn wait(&mut self) -> std::io::Result<ChildExit> {
        let status = self.child.wait().await?;
        Ok(ChildExit::from(status))
    }
}
