use std::fmt;
use std::process::ExitStatus;

use crate::config::{ColorMode, DEFAULT_PREFIX};
use crate::error::RunnerError;

/// Everything needed to run and annotate one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub prefix: String,
    pub only_stdout: bool,
    pub only_stderr: bool,
    pub color: ColorMode,
    /// Display name; defaults to `argv[0]`.
    pub name: Option<String>,
    pub argv: Vec<String>,
    /// Echo the command line, annotated, before its output.
    pub print_args: bool,
    /// Repeated to build a separator line printed before and after output.
    pub separator: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            only_stdout: false,
            only_stderr: false,
            color: ColorMode::Auto,
            name: None,
            argv: Vec::new(),
            print_args: false,
            separator: None,
        }
    }
}

impl RunConfig {
    /// Rejects conflicting options. Runs before any I/O.
    pub fn validate(&self) -> Result<(), RunnerError> {
        if self.only_stdout && self.only_stderr {
            return Err(RunnerError::Config(
                "conflicting flags: -o|--stdout and -e|--stderr".into(),
            ));
        }
        Ok(())
    }

    /// Like [`RunConfig::validate`], and also requires a command.
    pub fn validate_command(&self) -> Result<(), RunnerError> {
        self.validate()?;
        if self.argv.is_empty() {
            return Err(RunnerError::Config("no command given".into()));
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.argv.first().map(String::as_str))
            .unwrap_or_default()
    }

    pub fn streams(&self) -> AnnotatedStreams {
        AnnotatedStreams {
            stdout: !self.only_stderr,
            stderr: !self.only_stdout,
        }
    }
}

/// Which of the child's streams go through an annotator. The others are
/// inherited untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedStreams {
    pub stdout: bool,
    pub stderr: bool,
}

/// How the child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    Code(i32),
    /// Killed by this signal (Unix only).
    Signal(i32),
    /// No exit code and no signal.
    Unknown,
}

impl ChildExit {
    /// Exit code for this program: the child's own code, `128 + signal`
    /// after a signal, otherwise 1.
    pub fn exit_code(self) -> i32 {
        match self {
            ChildExit::Code(code) => code,
            ChildExit::Signal(sig) => 128 + sig,
            ChildExit::Unknown => 1,
        }
    }

    /// True when the child ended without an exit code of its own.
    pub fn is_abnormal(self) -> bool {
        !matches!(self, ChildExit::Code(_))
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ChildExit::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return ChildExit::Signal(sig);
            }
        }
        ChildExit::Unknown
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildExit::Code(code) => write!(f, "exited with status {code}"),
            ChildExit::Signal(sig) => write!(f, "terminated by signal {sig}"),
            ChildExit::Unknown => f.write_str("terminated abnormally"),
        }
    }
}
