use annotate_core::api::ColorMode;
use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(c: ColorArg) -> Self {
        match c {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

/// Annotate a command's standard output and standard error.
///
/// With no COMMAND and stdin not a terminal, annotates stdin instead.
#[derive(Parser, Debug)]
#[command(name = "annotate", version, disable_version_flag = true)]
pub struct Args {
    /// Prefix template. Escapes: %0 name, %> stream (O/E), %F %T %Y %m %d
    /// %H %M %S %N %s date and time, %% literal percent.
    #[arg(short = 'p', long)]
    pub prefix: Option<String>,

    /// Only annotate standard output
    #[arg(short = 'o', long = "stdout", conflicts_with = "only_stderr")]
    pub only_stdout: bool,

    /// Only annotate standard error
    #[arg(short = 'e', long = "stderr")]
    pub only_stderr: bool,

    /// Colorize the prefix. A bare -c forces color on.
    #[arg(
        short = 'c',
        long,
        value_enum,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "always"
    )]
    pub color: Option<ColorArg>,

    /// Name substituted for %0 (default: the command)
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Print the command with its arguments before its output
    #[arg(short = 'a', long)]
    pub print_args: bool,

    /// Print a separator line before and after the output
    #[arg(
        short = 's',
        long,
        value_name = "SEP",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "="
    )]
    pub print_separator: Option<String>,

    /// Print the version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Command to run, followed by its arguments
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}
