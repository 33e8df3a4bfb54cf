//! Cantillation-driven splitting of pointed Hebrew

/// Etnahta, zaqef qatan and zaqef gadol
pub const SEGMENT_MARKS: [char; 3] = ['\u{0591}', '\u{0594}', '\u{0595}'];

/// Hyphen-like joiner between words
pub const MAQAF: char = '\u{05BE}';

/// Split a verse at the major disjunctive accents.
///
/// A mark ends its segment at the next plain space after it, so the word
/// carrying the mark stays whole. Maqaf is read as a space before scanning.
/// Segments are trimmed and empty ones dropped.
pub fn split_hebrew_by_cantillation(text: &str) -> Vec<String> {
    let text = text.replace(MAQAF, " ");
    let mut segments = Vec::new();
    let mut segment_start = 0;
    let mut search_from = 0;

    while let Some(found) = text[search_from..].find(SEGMENT_MARKS) {
        let mark_at = search_from + found;
        let mark_end = mark_at + text[mark_at..].chars().next().map_or(0, char::len_utf8);

        let Some(space) = text[mark_end..].find(' ') else {
            break;
        };
        let cut = mark_end + space;
        push_trimmed(&mut segments, &text[segment_start..cut]);
        segment_start = cut + 1;
        search_from = segment_start;
    }

    push_trimmed(&mut segments, &text[segment_start..]);
    segments
}

fn push_trimmed(segments: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        segments.push(segment.to_string());
    }
}

fn is_nikud(ch: char) -> bool {
    matches!(
        ch,
        '\u{0591}'..='\u{05AF}'
            | '\u{05B0}'..='\u{05BD}'
            | '\u{05BF}'
            | '\u{05C1}'..='\u{05C2}'
            | '\u{05C4}'..='\u{05C5}'
            | '\u{05C7}'
    )
}

/// Strip vowel points and cantillation, keeping maqaf, paseq and sof pasuq
pub fn remove_nikud(text: &str) -> String {
    text.chars().filter(|&ch| !is_nikud(ch)).collect()
}

/// Split at cantillation first, then remove pointing from each segment
pub fn process_hebrew_verse(text: &str) -> Vec<String> {
    split_hebrew_by_cantillation(text)
        .iter()
        .map(|segment| remove_nikud(segment))
        .filter(|segment| !segment.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_at_etnahta() {
        let verse = "בראשית ברא אלהים\u{0591} את השמים ואת הארץ";
        assert_eq!(
            split_hebrew_by_cantillation(verse),
            vec!["בראשית ברא אלהים\u{0591}", "את השמים ואת הארץ"]
        );
    }

    #[test]
    fn test_mark_inside_word_extends_to_next_space() {
        let verse = "ויא\u{0594}מר אלהים יהי אור";
        assert_eq!(
            split_hebrew_by_cantillation(verse),
            vec!["ויא\u{0594}מר", "אלהים יהי אור"]
        );
    }

    #[test]
    fn test_all_three_marks_cut() {
        let verse = "א\u{0591} ב\u{0594} ג\u{0595} ד";
        assert_eq!(
            split_hebrew_by_cantillation(verse),
            vec!["א\u{0591}", "ב\u{0594}", "ג\u{0595}", "ד"]
        );
    }

    #[test]
    fn test_other_accents_do_not_cut() {
        // Tipcha and munach
        let verse = "בראשית\u{0596} ברא\u{05A3} אלהים";
        assert_eq!(split_hebrew_by_cantillation(verse), vec![verse]);
    }

    #[test]
    fn test_maqaf_becomes_word_boundary() {
        let verse = "על\u{0594}\u{05BE}פני המים";
        assert_eq!(
            split_hebrew_by_cantillation(verse),
            vec!["על\u{0594}", "פני המים"]
        );
    }

    #[test]
    fn test_mark_in_last_word_keeps_one_segment() {
        let verse = "  ויהי אור\u{0591}  ";
        assert_eq!(split_hebrew_by_cantillation(verse), vec!["ויהי אור\u{0591}"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_hebrew_by_cantillation("").is_empty());
        assert!(split_hebrew_by_cantillation("   ").is_empty());
    }

    #[test]
    fn test_remove_nikud_keeps_letters_and_sof_pasuq() {
        let pointed = "בְּרֵאשִׁ\u{0596}ית בָּרָ\u{05A3}א\u{05C3}";
        assert_eq!(remove_nikud(pointed), "בראשית ברא\u{05C3}");
        assert_eq!(remove_nikud("כל\u{05BE}הארץ"), "כל\u{05BE}הארץ");
    }

    #[test]
    fn test_process_splits_before_removing_marks() {
        let verse = "בָּרָא אֱלֹהִ\u{0591}ים אֵת הָאָרֶץ";
        assert_eq!(process_hebrew_verse(verse), vec!["ברא אלהים", "את הארץ"]);
    }
}
