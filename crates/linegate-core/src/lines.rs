/// Number of text lines in `text`, counting a trailing unterminated line.
///
/// Empty input has zero lines. Otherwise every `\n` ends one line, and
/// any bytes after the last `\n` form one more.
pub fn line_count(text: &str) -> usize {
    line_count_bytes(text.as_bytes())
}

/// Byte-level variant of [`line_count`], used for on-disk content that may
/// not be valid UTF-8.
pub fn line_count_bytes(bytes: &[u8]) -> usize {
    if bytes.is_empty() {
        return 0;
    }
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
    if bytes.ends_with(b"\n") {
        newlines
    } else {
        newlines + 1
    }
}
