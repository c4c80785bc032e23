use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

use super::color::{colorize, hashed_color};
use super::StreamTag;
use crate::config::{ColorMode, TtyState};

/// Supplies the prefix for the next line of a stream.
///
/// Called once per line so that time-based escapes stay current.
pub trait RenderPrefix {
    fn render(&self, stream: StreamTag) -> String;
}

impl<F> RenderPrefix for F
where
    F: Fn(StreamTag) -> String,
{
    fn render(&self, stream: StreamTag) -> String {
        self(stream)
    }
}

/// A prefix template bound to a display name, rendered against local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    template: String,
    name: String,
}

impl Prefix {
    pub fn new(template: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            name: name.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl RenderPrefix for Prefix {
    fn render(&self, stream: StreamTag) -> String {
        render(&self.template, &Local::now(), stream, &self.name)
    }
}

/// The stdout and stderr prefixes for one command, colored per [`ColorMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSet {
    pub stdout: Prefix,
    pub stderr: Prefix,
}

impl PrefixSet {
    pub fn new(template: &str, name: &str, color: ColorMode, tty: TtyState) -> Self {
        let c = hashed_color(name);
        let for_stream = |stream: StreamTag, is_tty: bool| {
            if color.enabled(is_tty) {
                Prefix::new(colorize(template, c, stream), name)
            } else {
                Prefix::new(template, name)
            }
        };
        Self {
            stdout: for_stream(StreamTag::Stdout, tty.stdout),
            stderr: for_stream(StreamTag::Stderr, tty.stderr),
        }
    }
}

/// Last path component of `path`, following the usual basename rules:
/// trailing slashes are ignored, `""` gives `"."` and `"/"` gives `"/"`.
pub fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

/// Expands `template` for one line.
///
/// `%` starts an escape and the next character picks the substitution.
/// Unknown escapes are kept as written and a trailing `%` is emitted as is.
///
/// `%N` is always nine digits (`000000042`), so `%S.%N` reads as a decimal
/// fraction. Earlier releases printed it unpadded (`42`).
pub fn render<Tz: TimeZone>(
    template: &str,
    now: &DateTime<Tz>,
    stream: StreamTag,
    name: &str,
) -> String {
    let mut out = String::with_capacity(template.len() + name.len());
    let mut escaped = false;

    for c in template.chars() {
        if !escaped {
            if c == '%' {
                escaped = true;
            } else {
                out.push(c);
            }
            continue;
        }
        escaped = false;

        match c {
            '0' => out.push_str(base_name(name)),
            '>' => out.push(stream.letter()),
            'd' => out.push_str(&format!("{:02}", now.day())),
            'm' => out.push_str(&format!("{:02}", now.month())),
            'Y' => out.push_str(&format!("{:04}", now.year())),
            'F' => out.push_str(&format!(
                "{:04}-{:02}-{:02}",
                now.year(),
                now.month(),
                now.day()
            )),
            'H' => out.push_str(&format!("{:02}", now.hour())),
            'M' => out.push_str(&format!("{:02}", now.minute())),
            'S' => out.push_str(&format!("{:02}", now.second())),
            'T' => out.push_str(&format!(
                "{:02}:{:02}:{:02}",
                now.hour(),
                now.minute(),
                now.second()
            )),
            // leap seconds report nanoseconds past 1e9
            'N' => out.push_str(&format!("{:09}", now.nanosecond() % 1_000_000_000)),
            's' => out.push_str(&now.timestamp().to_string()),
            '%' => out.push('%'),
            other => {
                out.push('%');
                out.push(other);
            }
        }
    }

    if escaped {
        out.push('%');
    }

    out
}
