//! Text measurement and wrapping for the resume layout.
//!
//! The layout runs before any font is loaded, so widths are estimated from an
//! average glyph advance per em rather than from real glyph metrics. The
//! estimates lean wide so that a wrapped line never overruns the content box
//! once the real font is substituted.

/// Average advance of a regular sans-serif glyph, in ems.
const REGULAR_ADVANCE_EM: f32 = 0.52;

/// Average advance of a bold sans-serif glyph, in ems.
const BOLD_ADVANCE_EM: f32 = 0.58;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// Estimated rendered width of `text` in CSS pixels.
pub fn width_of_text(text: &str, font_size: f32, weight: Weight) -> f32 {
    let advance = match weight {
        Weight::Regular => REGULAR_ADVANCE_EM,
        Weight::Bold => BOLD_ADVANCE_EM,
    };
    text.chars().count() as f32 * font_size * advance
}

/// The maximum number of characters that fit in `width` pixels.
pub fn max_chars_per_line(width: f32, font_size: f32, weight: Weight) -> usize {
    let single = width_of_text("M", font_size, weight);
    ((width / single).floor() as usize).max(1)
}

/// Greedy word wrap of a single paragraph. Words longer than a whole line are
/// split across lines.
pub fn wrap(text: &str, width: f32, font_size: f32, weight: Weight) -> Vec<String> {
    let capacity = max_chars_per_line(width, font_size, weight);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // hard-split anything that can never fit on a line by itself
        while word.len() > capacity {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(capacity);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > capacity {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_text_is_wider() {
        let regular = width_of_text("Resume", 12.0, Weight::Regular);
        let bold = width_of_text("Resume", 12.0, Weight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // 10 chars per line at this size
        let width = width_of_text("MMMMMMMMMM", 10.0, Weight::Regular) + 0.1;
        let lines = wrap("the quick brown fox jumps", width, 10.0, Weight::Regular);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn splits_words_longer_than_a_line() {
        let width = width_of_text("MMMM", 10.0, Weight::Regular) + 0.1;
        let lines = wrap("ab abcdefghij", width, 10.0, Weight::Regular);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn blank_paragraphs_produce_no_lines() {
        assert!(wrap("   \t ", 200.0, 11.0, Weight::Regular).is_empty());
    }
}
