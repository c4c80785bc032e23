use super::StreamTag;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a of `s`.
pub fn hash_str(s: &str) -> u32 {
    s.bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ u32::from(b)).wrapping_mul(FNV_PRIME))
}

/// Maps a name to an ANSI color in `1..=6` (red, green, yellow, blue,
/// magenta, cyan). The same name gets the same color on every run.
pub fn hashed_color(name: &str) -> u8 {
    (hash_str(name) % 6 + 1) as u8
}

/// Wraps a prefix template in the color escape for `stream`: stderr is bold,
/// everything else uses the plain foreground color.
pub fn colorize(template: &str, color: u8, stream: StreamTag) -> String {
    match stream {
        StreamTag::Stderr => format!("\x1b[3{color};1m{template}\x1b[0m"),
        _ => format!("\x1b[3{color}m{template}\x1b[0m"),
    }
}
