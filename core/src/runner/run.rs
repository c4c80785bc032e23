use tokio::io::AsyncRead;

use super::process::spawn_command;
use super::traits::{CommandSession, OutputSinks};
use super::types::{ChildExit, RunConfig};
use crate::annotate::{annotate, print_annotated, Pipeline, Prefix, PrefixSet, StreamTag};
use crate::config::TtyState;
use crate::error::RunnerError;

/// Display name used when annotating piped input.
pub const PIPE_NAME: &str = ">";

pub const SEPARATOR_WIDTH: usize = 80;

/// Runs `cfg.argv`, annotating its output into `sinks`, and returns how the
/// child exited. Returns only after all annotated output has been written.
pub async fn run_command(
    cfg: &RunConfig,
    tty: TtyState,
    sinks: &dyn OutputSinks,
) -> Result<ChildExit, RunnerError> {
    cfg.validate_command()?;

    let prefixes = PrefixSet::new(&cfg.prefix, cfg.display_name(), cfg.color, tty);

    if cfg.print_args {
        let line = cfg.argv.join(" ");
        print_annotated(&mut sinks.stdout(), StreamTag::Stdout, &prefixes.stdout, &line).await?;
    }
    print_separator(cfg, sinks, &prefixes.stdout).await?;

    let session = spawn_command(&cfg.argv, cfg.streams())?;
    let exit = run_session(session, cfg, prefixes.clone(), sinks).await?;

    print_separator(cfg, sinks, &prefixes.stdout).await?;
    Ok(exit)
}

/// Attaches annotators to an already started child, waits for it to exit,
/// then waits for both annotators to drain.
pub async fn run_session<S>(
    mut session: S,
    cfg: &RunConfig,
    prefixes: PrefixSet,
    sinks: &dyn OutputSinks,
) -> Result<ChildExit, RunnerError>
where
    S: CommandSession,
{
    let streams = cfg.streams();
    let stdout = streams.stdout.then(|| session.stdout()).flatten();
    let stderr = streams.stderr.then(|| session.stderr()).flatten();

    let pipeline = Pipeline::attach(stdout, stderr, sinks.stdout(), sinks.stderr(), prefixes);

    let exit = match session.wait().await {
        Ok(exit) => exit,
        Err(e) => {
            // keep whatever the annotators still hold before giving up
            if let Err(drain_err) = pipeline.drain().await {
                tracing::warn!(error = %drain_err, "annotator failed after wait error");
            }
            return Err(RunnerError::Wait(e));
        }
    };
    tracing::debug!(%exit, "child finished, draining annotators");

    let report = pipeline.drain().await?;
    tracing::debug!(
        stdout_lines = ?report.stdout,
        stderr_lines = ?report.stderr,
        "annotation finished"
    );
    Ok(exit)
}

/// Annotates `input` (normally the parent's stdin) onto the stdout sink under
/// the name [`PIPE_NAME`]. Returns the number of lines written.
pub async fn annotate_stdin<R>(
    input: &mut R,
    cfg: &RunConfig,
    tty: TtyState,
    sinks: &dyn OutputSinks,
) -> Result<u64, RunnerError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    cfg.validate()?;
    let name = cfg.name.as_deref().unwrap_or(PIPE_NAME);
    let prefixes = PrefixSet::new(&cfg.prefix, name, cfg.color, tty);

    print_separator(cfg, sinks, &prefixes.stdout).await?;
    let lines = annotate(
        input,
        &mut sinks.stdout(),
        StreamTag::Stdout,
        &prefixes.stdout,
    )
    .await?;
    print_separator(cfg, sinks, &prefixes.stdout).await?;

    Ok(lines)
}

async fn print_separator(
    cfg: &RunConfig,
    sinks: &dyn OutputSinks,
    prefix: &Prefix,
) -> Result<(), RunnerError> {
    if let Some(sep) = cfg.separator.as_deref() {
        let line = sep.repeat(SEPARATOR_WIDTH);
        print_annotated(&mut sinks.stdout(), StreamTag::Stdout, prefix, &line).await?;
    }
    Ok(())
}
