//! TEXT value escaping (RFC 5545 section 3.3.11).

/// Escape a TEXT value for embedding in a content line.
///
/// Backslashes are escaped first so the backslashes inserted for `;`, `,`
/// and newlines are not doubled. A CRLF pair or a lone CR is a line break
/// and becomes a single `\n`, so no raw CR reaches the content line.
pub fn escape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + value.len() / 8);
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            _ => result.push(c),
        }
    }

    result
}

/// Reverse of [`escape_text`]. Unknown escapes keep their backslash.
pub fn unescape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.peek() {
            Some('\\') => result.push('\\'),
            Some(';') => result.push(';'),
            Some(',') => result.push(','),
            Some('n') | Some('N') => result.push('\n'),
            _ => {
                result.push(c);
                continue;
            }
        }
        chars.next();
    }

    result
}
