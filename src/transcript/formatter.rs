use crate::extractors::CaptionSegment;

/// Flatten caption segments into plain text.
///
/// Whitespace runs inside a segment collapse to one space, blank segments
/// are dropped and the rest are joined with single spaces. Timing is discarded.
pub fn format(segments: &[CaptionSegment]) -> String {
    let mut text = String::new();

    for segment in segments {
        for word in segment.text.split_whitespace() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(word);
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(texts: &[&str]) -> Vec<CaptionSegment> {
        texts.iter().map(|t| CaptionSegment::untimed(*t)).collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(format(&[]), "");
    }

    #[test]
    fn test_collapses_and_joins() {
        assert_eq!(format(&segments(&["Hello  world", "foo"])), "Hello world foo");
    }

    #[test]
    fn test_trims_boundaries() {
        assert_eq!(
            format(&segments(&["  [Music]\n", "\tline one\nline two  "])),
            "[Music] line one line two"
        );
    }

    #[test]
    fn test_blank_segments_do_not_double_spaces() {
        assert_eq!(format(&segments(&["Guten", "\n", "   ", "Tag"])), "Guten Tag");
        assert_eq!(format(&segments(&["\n"])), "");
    }
}
