//! Content line folding (RFC 5545 section 3.1).

/// Maximum length of a physical line in octets, excluding the CRLF.
pub const MAX_LINE_OCTETS: usize = 75;

/// Fold a content line.
///
/// The first physical line carries up to 75 octets. Each continuation line
/// starts with a single space followed by up to 74 octets of the original
/// line. Breaks fall on UTF-8 character boundaries, so a segment holding a
/// multi-byte character may end early. The returned string has no trailing
/// CRLF.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut current_len = 0;
    let mut limit = MAX_LINE_OCTETS;

    for c in line.chars() {
        let char_len = c.len_utf8();

        if current_len + char_len > limit {
            result.push_str("\r\n ");
            current_len = 0;
            limit = MAX_LINE_OCTETS - 1;
        }

        result.push(c);
        current_len += char_len;
    }

    result
}

/// Undo folding: drop every line break that is followed by a space or tab.
pub fn unfold(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find('\n') {
        let (line, tail) = rest.split_at(pos);
        let after = &tail[1..];

        if after.starts_with(' ') || after.starts_with('\t') {
            result.push_str(line.strip_suffix('\r').unwrap_or(line));
            rest = &after[1..];
        } else {
            result.push_str(line);
            result.push('\n');
            rest = after;
        }
    }

    result.push_str(rest);
    result
}
