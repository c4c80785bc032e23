use async_trait::async_trait;

use super::types::ChildExit;
use crate::annotate::{BoxedReader, BoxedWriter};

/// A started child whose output handles can be taken once.
#[async_trait]
pub trait CommandSession: Send {
    fn stdout(&mut self) -> Option<BoxedReader>;
    fn stderr(&mut self) -> Option<BoxedReader>;
    async fn wait(&mut self) -> std::io::Result<ChildExit>;
}

/// Where annotated output is written. Each call opens a new handle onto the
/// same destination.
pub trait OutputSinks: Send + Sync {
    fn stdout(&self) -> BoxedWriter;
    fn stderr(&self) -> BoxedWriter;
}

/// The parent process's own stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentSinks;

impl OutputSinks for ParentSinks {
    fn stdout(&self) -> BoxedWriter {
        Box::new(tokio::io::stdout())
    }

    fn stderr(&self) -> BoxedWriter {
        Box::new(tokio::io::stderr())
    }
}
