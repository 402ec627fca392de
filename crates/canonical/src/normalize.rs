//! Character-level normalizers.
//!
//! Both helpers lowercase with Rust's locale-free Unicode mapping, so a
//! single uppercase character may expand to several lowercase ones (for
//! example `İ`). Only alphanumeric output characters are kept.

/// Collapse text to a dense, lowercased alphanumeric stream.
///
/// Whitespace, punctuation and symbols are discarded entirely, which makes
/// anything built on top insensitive to formatting changes.
///
/// ```rust
/// use canonical::alphanumeric_stream;
///
/// assert_eq!(alphanumeric_stream("Foo(bar, 42);"), "foobar42");
/// ```
pub fn alphanumeric_stream(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if !ch.is_alphanumeric() {
            continue;
        }
        for lower in ch.to_lowercase() {
            if lower.is_alphanumeric() {
                out.push(lower);
            }
        }
    }
    out
}

/// Normalize text for character shingling.
///
/// Letters and digits are lowercased and kept, every run of whitespace
/// becomes a single space, and everything else is dropped. Leading and
/// trailing whitespace is removed.
///
/// ```rust
/// use canonical::shingle_text;
///
/// assert_eq!(shingle_text("  The  quick,\n\tbrown FOX! "), "the quick brown fox");
/// ```
pub fn shingle_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = true;
        } else if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in ch.to_lowercase() {
                if lower.is_alphanumeric() {
                    out.push(lower);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphanumeric_stream_drops_punctuation_and_whitespace() {
        assert_eq!(
            alphanumeric_stream("int x = a + b;\n  return x;"),
            "intxabreturnx"
        );
    }

    #[test]
    fn alphanumeric_stream_keeps_unicode_letters() {
        assert_eq!(alphanumeric_stream("Ça va, Ünïcode 7"), "çavaünïcode7");
    }

    #[test]
    fn alphanumeric_stream_of_symbols_is_empty() {
        assert!(alphanumeric_stream("{}();,.-+*/ \n\t").is_empty());
    }

    #[test]
    fn shingle_text_collapses_whitespace_runs() {
        assert_eq!(shingle_text("a \n\n\t b"), "a b");
    }

    #[test]
    fn shingle_text_drops_punctuation_without_inserting_space() {
        // Punctuation is removed, not replaced by a separator.
        assert_eq!(shingle_text("foo.bar(baz)"), "foobarbaz");
    }

    #[test]
    fn shingle_text_trims_edges() {
        assert_eq!(shingle_text("   hello   "), "hello");
        assert_eq!(shingle_text(" ;; hello"), "hello");
    }

    #[test]
    fn shingle_text_whitespace_only_is_empty() {
        assert!(shingle_text(" \n\t ").is_empty());
    }
}
