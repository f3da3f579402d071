//! HTML-to-plain-text extraction.
//!
//! Small pure utility for the HTML-bearing API fields (facts, conclusion,
//! biography): drops tags, decodes the handful of entities the API emits,
//! and returns the concatenated text. Not a general HTML parser.

/// Strip markup from `html` and return the text content.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(i) = rest.find(['<', '&']) {
        out.push_str(&rest[..i]);
        let delim = rest.as_bytes()[i];
        rest = &rest[i + 1..];
        if delim == b'<' {
            match rest.find('>') {
                Some(end) => rest = &rest[end + 1..],
                // Unterminated tag: the remainder is markup, drop it.
                None => return out,
            }
        } else {
            match rest.find(';') {
                Some(end) if end <= 8 && rest[..end].bytes().all(entity_byte) => {
                    match decode_entity(&rest[..end]) {
                        Some(c) => out.push(c),
                        None => {
                            out.push('&');
                            out.push_str(&rest[..end]);
                            out.push(';');
                        }
                    }
                    rest = &rest[end + 1..];
                }
                _ => out.push('&'),
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'#'
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" | "#160" => Some(' '),
        _ => None,
    }
}
