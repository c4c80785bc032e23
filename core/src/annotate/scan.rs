/// Outcome of looking for one line at the front of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split<'a> {
    /// A line was found; `advance` bytes (line plus terminator) are consumed.
    Line { advance: usize, line: &'a [u8] },
    /// No terminator yet and more input may still arrive.
    NeedMore,
    /// Buffer is empty and the source is exhausted.
    End,
}

/// Finds the first line in `data`, stripped of its end-of-line marker.
///
/// The marker is `\r\n`, a `\n`, or a `\r` not followed by `\n`
/// (`\r[^\n]|\r?\n`). A `\r` that ends the buffer is only treated as a lone
/// carriage return once `at_eof` is set, so a `\r\n` split across two reads
/// still counts as a single terminator. At end of input the remaining bytes
/// are returned as a final line even without a terminator.
pub fn split_line(data: &[u8], at_eof: bool) -> Split<'_> {
    split_line_from(data, 0, at_eof)
}

/// [`split_line`] for a buffer whose first `from` bytes are already known to
/// hold no terminator. The search for `\r`/`\n` starts at `from`.
pub fn split_line_from(data: &[u8], from: usize, at_eof: bool) -> Split<'_> {
    if at_eof && data.is_empty() {
        return Split::End;
    }

    let from = from.min(data.len());
    let found = data[from..]
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .map(|p| p + from);

    match found {
        Some(pos) if data[pos] == b'\n' => Split::Line {
            advance: pos + 1,
            line: &data[..pos],
        },
        Some(pos) => match data.get(pos + 1) {
            Some(b'\n') => Split::Line {
                advance: pos + 2,
                line: &data[..pos],
            },
            None if !at_eof => Split::NeedMore,
            _ => Split::Line {
                advance: pos + 1,
                line: &data[..pos],
            },
        },
        None if at_eof => Split::Line {
            advance: data.len(),
            line: data,
        },
        None => Split::NeedMore,
    }
}
