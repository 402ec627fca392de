//! Line splitting for fragment extraction.

use serde::{Deserialize, Serialize};

/// A non-blank line together with its position in the original text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the original document.
    pub number: usize,
    /// Line content with any trailing `\r` removed.
    pub text: String,
}

/// Split text on `\n`, drop blank lines, and remember where each kept line
/// came from.
///
/// Windows line endings are handled by trimming a trailing `\r`. Lines made
/// only of whitespace are skipped, but numbering still counts them so that
/// reported positions match what an editor shows.
///
/// ```rust
/// use canonical::split_lines;
///
/// let lines = split_lines("a\r\n\n  \nb");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1].number, 4);
/// assert_eq!(lines[1].text, "b");
/// ```
pub fn split_lines(text: &str) -> Vec<SourceLine> {
    text.split('\n')
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() {
                None
            } else {
                Some(SourceLine {
                    number: idx + 1,
                    text: line.to_string(),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_indentation() {
        let lines = split_lines("fn a() {\n    body();\n}");
        assert_eq!(lines[1].text, "    body();");
    }

    #[test]
    fn numbering_skips_blank_lines() {
        let lines = split_lines("\n\nfirst\n\n\nsecond\n");
        let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![3, 6]);
    }

    #[test]
    fn strips_only_trailing_carriage_return() {
        let lines = split_lines("a\r\nb\rc");
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[1].text, "b\rc");
    }
}
