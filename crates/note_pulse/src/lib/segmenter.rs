/// Character budget per segment. A character count stands in for the
/// downstream model's token limit; the two are deliberately conflated and
/// the approximation may over- or under-shoot real token usage.
pub const DEFAULT_CHAR_BUDGET: usize = 3000;

/// Splits a transcript into segments bounded by `char_budget`, breaking
/// only at literal `". "` sentence boundaries.
///
/// A segment is closed as soon as appending the next sentence (plus the
/// `". "` join it restores) would reach the budget. Segments are trimmed of
/// surrounding whitespace and returned in transcript order; joining them
/// back with `". "` reproduces the trimmed transcript. A single sentence
/// longer than the budget is still emitted as its own segment.
pub fn split_transcript(text: &str, char_budget: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for sentence in text.split(". ") {
        if !current.is_empty() && current.len() + sentence.len() + 2 >= char_budget {
            segments.push(current.trim().to_string());
            current = String::new();
        }
        if !current.is_empty() {
            current.push_str(". ");
        }
        current.push_str(sentence);
    }

    if !current.is_empty() {
        segments.push(current.trim().to_string());
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_transcript_is_a_single_segment() {
        let text = "This is one sentence. This is another";
        assert!(text.len() < 50);

        let segments = split_transcript(text, DEFAULT_CHAR_BUDGET);
        assert_eq!(segments, vec![text.to_string()]);
    }

    #[test]
    fn segments_rejoin_to_the_original_text() {
        let text = "Aaa bbb. Ccc ddd. Eee fff. Ggg hhh";
        let segments = split_transcript(text, 12);

        assert!(segments.len() > 1);
        assert_eq!(segments.join(". "), text);
    }

    #[test]
    fn segments_stay_under_budget_unless_unsplittable() {
        let text = "word. ".repeat(200);
        let budget = 40;

        for segment in split_transcript(text.trim(), budget) {
            assert!(segment.len() < budget || !segment.contains(". "));
        }
    }

    #[test]
    fn oversized_sentence_is_emitted_whole() {
        let text = "a sentence much longer than the tiny budget with no boundary";
        let segments = split_transcript(text, 10);
        assert_eq!(segments, vec![text.to_string()]);
    }

    #[test]
    fn empty_transcript_yields_no_segments() {
        assert!(split_transcript("", DEFAULT_CHAR_BUDGET).is_empty());
    }

    #[test]
    fn boundary_is_closed_before_reaching_budget() {
        // "one two" (7) + ". " (2) + "three" (5) = 14 >= 14, so the second
        // sentence starts a new segment.
        let segments = split_transcript("one two. three", 14);
        assert_eq!(segments, vec!["one two".to_string(), "three".to_string()]);
    }
}
