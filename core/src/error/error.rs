use thiserror::Error;

use crate::annotate::StreamTag;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Runner(#[from] RunnerError),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one annotation loop. Never retried: a broken pipe here means
/// output is being dropped.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("reading {stream}: {source}")]
    Scan {
        stream: StreamTag,
        source: std::io::Error,
    },
    #[error("writing annotated {stream}: {source}")]
    Write {
        stream: StreamTag,
        source: std::io::Error,
    },
    #[error("annotator for {stream} did not finish: {message}")]
    Join { stream: StreamTag, message: String },
}

impl PipelineError {
    pub fn stream(&self) -> StreamTag {
        match self {
            Self::Scan { stream, .. } | Self::Write { stream, .. } | Self::Join { stream, .. } => {
                *stream
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("{0}")]
    Config(String),
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("waiting for child: {0}")]
    Wait(std::io::Error),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
