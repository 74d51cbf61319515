//! Text escaping (RFC 5545 §3.3.11) and line folding (§3.1).

/// Longest physical line, in octets, excluding the CRLF.
pub const MAX_LINE_OCTETS: usize = 75;

const LINE_BREAK: &str = "\r\n";

/// Escape free text for a TEXT property value.
///
/// Backslashes go first so the escapes added by later steps stay intact.
/// CRLF and bare CR count as line breaks, so no raw CR reaches a content line.
pub fn escape_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Fold a content line so no physical line exceeds 75 octets.
///
/// The first segment holds up to 75 octets; each continuation is a single
/// space followed by up to 74 octets. Segments never split a UTF-8 sequence,
/// so a segment may come up short when a multi-byte character straddles the
/// limit.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / (MAX_LINE_OCTETS - 1) * 3);
    let mut rest = line;
    let mut budget = MAX_LINE_OCTETS;

    while !rest.is_empty() {
        let end = split_point(rest, budget);
        let (segment, tail) = rest.split_at(end);

        if budget < MAX_LINE_OCTETS {
            folded.push_str(LINE_BREAK);
            folded.push(' ');
        }
        folded.push_str(segment);

        rest = tail;
        budget = MAX_LINE_OCTETS - 1;
    }

    folded
}

/// Largest char boundary in `s` at or below `budget` octets, and never zero
/// for a non-empty `s`.
fn split_point(s: &str, budget: usize) -> usize {
    if s.len() <= budget {
        return s.len();
    }

    let mut end = budget;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    if end == 0 {
        // Budget smaller than the first character; emit it whole.
        s.chars().next().map_or(s.len(), char::len_utf8)
    } else {
        end
    }
}
