//! Greedy line breaking on character counts.
//!
//! No font metrics are used: the width budget is converted to a character
//! budget with a fixed average glyph advance.

use std::ops::Range;

use crate::model::InlineSpan;

/// Average glyph advance as a fraction of the font size.
pub const AVERAGE_GLYPH_WIDTH: f32 = 0.52;

/// Number of characters that fit in `usable_width` at `font_size`.
///
/// Never less than one, so wrapping always makes progress.
pub fn max_chars(usable_width: f32, font_size: f32) -> usize {
    let advance = font_size * AVERAGE_GLYPH_WIDTH;
    if advance <= 0.0 || usable_width <= 0.0 {
        return 1;
    }
    ((usable_width / advance).floor() as usize).max(1)
}

/// Compute line ranges (in char indices) for `chars`.
///
/// Breaks at the last space at or before the budget and drops that space;
/// with no usable space the line is cut at the budget.
fn break_ranges(chars: &[char], max_chars: usize) -> Vec<Range<usize>> {
    let max = max_chars.max(1);
    let mut lines = Vec::new();
    let mut start = 0;

    while chars.len() - start > max {
        let budget_end = start + max;
        let soft = (start + 1..=budget_end).rev().find(|&i| chars[i] == ' ');
        match soft {
            Some(space) => {
                lines.push(start..space);
                start = space + 1;
            }
            None => {
                lines.push(start..budget_end);
                start = budget_end;
            }
        }
    }
    lines.push(start..chars.len());

    lines
}

/// Wrap text to at most `max_chars` characters per line.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    break_ranges(&chars, max_chars)
        .into_iter()
        .map(|range| chars[range].iter().collect())
        .collect()
}

/// Wrap a span sequence, splitting spans that cross line boundaries.
///
/// Each inner vector is one physical line; split pieces keep the style of
/// the span they came from.
pub fn wrap_rich(spans: &[InlineSpan], max_chars: usize) -> Vec<Vec<InlineSpan>> {
    let chars: Vec<char> = spans.iter().flat_map(|s| s.text.chars()).collect();

    let mut bounds = Vec::with_capacity(spans.len());
    let mut offset = 0;
    for span in spans {
        let len = span.char_len();
        bounds.push(offset..offset + len);
        offset += len;
    }

    break_ranges(&chars, max_chars)
        .into_iter()
        .map(|line| {
            spans
                .iter()
                .zip(&bounds)
                .filter_map(|(span, bound)| {
                    let start = line.start.max(bound.start);
                    let end = line.end.min(bound.end);
                    if start >= end {
                        return None;
                    }
                    Some(InlineSpan::new(span.style, chars[start..end].iter().collect::<String>()))
                })
                .collect()
        })
        .collect()
}

/// Wrap text behind a hanging prefix.
///
/// The first line starts with `prefix`; continuation lines start with
/// blanks of the same width. The budget is reduced by the prefix width.
pub fn wrap_with_prefix(text: &str, prefix: &str, max_chars: usize) -> Vec<String> {
    let prefix_len = prefix.chars().count();
    let budget = max_chars.saturating_sub(prefix_len).max(1);
    let indent = " ".repeat(prefix_len);

    wrap(text, budget)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{}{}", prefix, line)
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpanStyle;

    #[test]
    fn test_max_chars() {
        // 475 / (11 * 0.52) = 83.04
        assert_eq!(max_chars(475.0, 11.0), 83);
        // 475 / (28 * 0.52) = 32.6
        assert_eq!(max_chars(475.0, 28.0), 32);
        assert_eq!(max_chars(10.0, 500.0), 1);
        assert_eq!(max_chars(475.0, 0.0), 1);
    }

    #[test]
    fn test_wrap_soft_breaks() {
        let lines = wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_space_at_budget() {
        // The space right at the budget is a valid break point
        assert_eq!(wrap("abcde fgh", 5), vec!["abcde", "fgh"]);
    }

    #[test]
    fn test_wrap_hard_break() {
        let lines = wrap("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_wrap_short_and_empty() {
        assert_eq!(wrap("short", 80), vec!["short"]);
        assert_eq!(wrap("", 80), vec![""]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        let lines = wrap("ééééé ééééé", 5);
        assert_eq!(lines, vec!["ééééé", "ééééé"]);
    }

    #[test]
    fn test_wrap_properties() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
                    sed do eiusmodtemporincididuntutlabore et dolore magna aliqua.";
        for max in [1usize, 3, 7, 12, 20, 33] {
            let lines = wrap(text, max);
            let words_fit = text.split(' ').all(|w| w.chars().count() <= max);
            for line in &lines {
                if words_fit {
                    assert!(line.chars().count() <= max, "{:?} > {}", line, max);
                }
                assert!(line.chars().count() <= max);
            }
            // Rejoin: soft breaks consumed one space, hard breaks nothing
            let mut rebuilt = String::new();
            for line in &lines {
                if !rebuilt.is_empty() && text[rebuilt.len()..].starts_with(' ') {
                    rebuilt.push(' ');
                }
                rebuilt.push_str(line);
            }
            assert_eq!(rebuilt, text);
        }
    }

    #[test]
    fn test_wrap_rich_splits_spans() {
        let spans = vec![
            InlineSpan::plain("Some "),
            InlineSpan::bold("very bold"),
            InlineSpan::plain(" text."),
        ];
        let lines = wrap_rich(&spans, 9);
        assert_eq!(
            lines,
            vec![
                vec![InlineSpan::plain("Some "), InlineSpan::bold("very")],
                vec![InlineSpan::bold("bold")],
                vec![InlineSpan::plain("text.")],
            ]
        );

        let lines = wrap_rich(&spans, 12);
        assert_eq!(
            lines,
            vec![
                vec![InlineSpan::plain("Some "), InlineSpan::bold("very")],
                vec![InlineSpan::bold("bold"), InlineSpan::plain(" text.")],
            ]
        );
    }

    #[test]
    fn test_wrap_rich_single_line_keeps_spans() {
        let spans = vec![
            InlineSpan::plain("Some "),
            InlineSpan::bold("bold"),
            InlineSpan::plain(" text."),
        ];
        let lines = wrap_rich(&spans, 83);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], spans);
    }

    #[test]
    fn test_wrap_rich_hard_break_inside_span() {
        let spans = vec![InlineSpan::italic("abcdefgh")];
        let lines = wrap_rich(&spans, 3);
        let texts: Vec<_> = lines.iter().map(|l| l[0].text.clone()).collect();
        assert_eq!(texts, vec!["abc", "def", "gh"]);
        assert!(lines.iter().all(|l| l[0].style == SpanStyle::Italic));
    }

    #[test]
    fn test_wrap_with_prefix() {
        let lines = wrap_with_prefix("one two three four", "  - ", 12);
        assert_eq!(lines, vec!["  - one two", "    three", "    four"]);

        let lines = wrap_with_prefix("alpha beta", "  12. ", 12);
        assert_eq!(lines, vec!["  12. alpha", "      beta"]);
    }
}
