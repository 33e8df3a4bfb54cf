//! Punctuation-driven splitting of English prose

/// Closing quotation marks that stay attached to a sentence terminator
pub const CLOSING_QUOTES: [char; 4] = ['"', '\'', '\u{201D}', '\u{2019}'];

const EM_DASH: char = '\u{2014}';

/// Split English text into clauses.
///
/// Cuts after `. ? !` followed by a space (or by a closing quote that is
/// itself followed by whitespace or the end), after `, ; :` followed by a
/// space, after an em-dash, and at every newline. Punctuation stays on the
/// clause it ends; the separating space or newline is dropped.
pub fn split_english_clauses(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(text.len(), |&(offset, _)| offset);
    let char_at = |i: usize| chars.get(i).map(|&(_, ch)| ch);

    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (offset, ch) = chars[i];
        let next = char_at(i + 1);

        // (clause end, resume position) as char indices
        let cut = match ch {
            '\n' => {
                push_trimmed(&mut segments, &text[start..offset]);
                start = byte_at(i + 1);
                i += 1;
                continue;
            }
            '.' | '?' | '!' => match next {
                Some(quote) if CLOSING_QUOTES.contains(&quote) => match char_at(i + 2) {
                    Some(after) if after.is_whitespace() => Some((i + 2, i + 3)),
                    // Quote at the very end: the remainder is flushed below.
                    _ => {
                        i += 2;
                        continue;
                    }
                },
                Some(' ') => Some((i + 1, i + 2)),
                _ => None,
            },
            ',' | ';' | ':' if next == Some(' ') => Some((i + 1, i + 2)),
            EM_DASH if next == Some(' ') => Some((i + 1, i + 2)),
            EM_DASH => Some((i + 1, i + 1)),
            _ => None,
        };

        match cut {
            Some((clause_end, resume)) => {
                push_trimmed(&mut segments, &text[start..byte_at(clause_end)]);
                start = byte_at(resume);
                i = resume;
            }
            None => i += 1,
        }
    }

    push_trimmed(&mut segments, &text[start..]);
    segments
}

fn push_trimmed(segments: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        segments.push(segment.to_string());
    }
}
