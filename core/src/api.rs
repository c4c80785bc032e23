//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `annotate_core::api` instead of reaching into internal modules.

pub use crate::annotate::{
    annotate, base_name, hashed_color, pipe, render, split_line, AnnotatedPipe, BoxedReader,
    BoxedWriter, DrainReport, Pipeline, Prefix, PrefixSet, RenderPrefix, Split, StreamTag,
};
pub use crate::config::{load_default, AppConfig, ColorMode, LoggingConfig, TtyState};
pub use crate::error::{CliError, PipelineError, RunnerError};
pub use crate::runner::{
    annotate_stdin, run_command, run_session, spawn_command, ChildExit, CommandSession,
    OutputSinks, ParentSinks, RunConfig,
};
