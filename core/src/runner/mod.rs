mod process;
mod run;
mod traits;
pub mod types;

pub use process::{spawn_command, ProcessSession};
pub use run::{annotate_stdin, run_command, run_session, PIPE_NAME, SEPARATOR_WIDTH};
pub use traits::{CommandSession, OutputSinks, ParentSinks};
pub use types::{AnnotatedStreams, ChildExit, RunConfig};
