//! Trivial-line filters.
//!
//! A filter decides which lines are too uninteresting to take part in a
//! fragment window. Dropped lines do not break a window: the lines on either
//! side become adjacent, while reported line numbers still point into the
//! original text.

use ingest::Language;

/// Decides whether a line is skipped before windows are formed.
pub trait LineFilter: Send + Sync {
    fn is_trivial(&self, line: &str, language: &Language) -> bool;
}

/// Drops blank and whitespace-only lines. The default filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLineFilter;

impl LineFilter for BlankLineFilter {
    fn is_trivial(&self, line: &str, _language: &Language) -> bool {
        line.trim().is_empty()
    }
}

/// Drops blank lines and lines made only of brackets and separators, such
/// as a lone `}` or `});`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationLineFilter;

impl LineFilter for PunctuationLineFilter {
    fn is_trivial(&self, line: &str, _language: &Language) -> bool {
        line.chars()
            .all(|c| c.is_whitespace() || matches!(c, '{' | '}' | '(' | ')' | '[' | ']' | ';' | ','))
    }
}

impl<F> LineFilter for F
where
    F: Fn(&str, &Language) -> bool + Send + Sync,
{
    fn is_trivial(&self, line: &str, language: &Language) -> bool {
        self(line, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filter_only_drops_whitespace() {
        let lang = Language::new("C#");
        assert!(BlankLineFilter.is_trivial(" \t", &lang));
        assert!(!BlankLineFilter.is_trivial("}", &lang));
    }

    #[test]
    fn punctuation_filter_drops_lone_braces() {
        let lang = Language::new("C#");
        assert!(PunctuationLineFilter.is_trivial("    });", &lang));
        assert!(PunctuationLineFilter.is_trivial("", &lang));
        assert!(!PunctuationLineFilter.is_trivial("} else {", &lang));
    }

    #[test]
    fn closures_are_filters() {
        let only_python_comments =
            |line: &str, lang: &Language| lang.as_str() == "Python" && line.trim_start().starts_with('#');
        assert!(only_python_comments.is_trivial("  # note", &Language::new("Python")));
        assert!(!only_python_comments.is_trivial("  # note", &Language::new("C#")));
    }
}
