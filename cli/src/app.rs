//! Merges config and flags into a run, then dispatches between command mode,
//! pipe mode and help.
use annotate_core::api as core_api;
use clap::CommandFactory;

use crate::commands::cli::Args;

/// Flags win over the config file and environment.
pub fn build_run_config(args: &Args, cfg: &core_api::AppConfig) -> core_api::RunConfig {
    core_api::RunConfig {
        prefix: args.prefix.clone().unwrap_or_else(|| cfg.prefix.clone()),
        only_stdout: args.only_stdout,
        only_stderr: args.only_stderr,
        color: args.color.map(Into::into).unwrap_or(cfg.color),
        name: args.name.clone(),
        argv: args.command.clone(),
        print_args: args.print_args,
        separator: args.print_separator.clone(),
    }
}

pub fn detect_tty() -> core_api::TtyState {
    core_api::TtyState {
        stdout: atty::is(atty::Stream::Stdout),
        stderr: atty::is(atty::Stream::Stderr),
    }
}

/// Exit code for a failure of annotate itself, as opposed to the child's own
/// exit status.
pub fn exit_code_for_error(e: &core_api::CliError) -> i32 {
    // 2: bad configuration or conflicting flags
    // 74: annotation pipe or child wait failed (EX_IOERR)
    // 126: command found but could not be started
    // 127: command not found
    match e {
        core_api::CliError::Config(_) => 2,
        core_api::CliError::Runner(re) => match re {
            core_api::RunnerError::Config(_) => 2,
            core_api::RunnerError::Spawn { source, .. } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    127
                } else {
                    126
                }
            }
            core_api::RunnerError::Wait(_) => 74,
            core_api::RunnerError::Pipeline(_) => 74,
        },
        core_api::CliError::Io(_) => 74,
    }
}

#[tracing::instrument(name = "cli.run_app", skip(args, cfg))]
pub async fn run_app(args: Args, cfg: &core_api::AppConfig) -> Result<i32, core_api::CliError> {
    let run_cfg = build_run_config(&args, cfg);
    run_cfg.validate()?;

    let tty = detect_tty();

    if !run_cfg.argv.is_empty() {
        let exit = core_api::run_command(&run_cfg, tty, &core_api::ParentSinks).await?;
        if exit.is_abnormal() {
            tracing::debug!(%exit, "child did not exit normally");
            eprintln!("annotate: error: {}: {}", run_cfg.display_name(), exit);
        }
        return Ok(exit.exit_code());
    }

    if !atty::is(atty::Stream::Stdin) {
        let mut stdin = tokio::io::stdin();
        let lines =
            core_api::annotate_stdin(&mut stdin, &run_cfg, tty, &core_api::ParentSinks).await?;
        tracing::debug!(lines, "annotated piped input");
        return Ok(0);
    }

    Args::command().print_help()?;
    Ok(0)
}
