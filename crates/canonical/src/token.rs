/// Characters that separate SimHash tokens.
///
/// Whitespace plus the punctuation that commonly glues identifiers together
/// in source code. Anything not listed here stays inside a token.
pub const SIMHASH_DELIMITERS: &[char] = &[
    '\r', '\n', '\t', ' ', '.', ',', ';', '(', ')', '{', '}', '[', ']', '"', '\'', ':', '!', '?',
    '<', '>', '/', '\\', '+', '-', '*', '=',
];

/// Split case-folded text on [`SIMHASH_DELIMITERS`], dropping empty pieces.
///
/// Token order follows the input. Duplicates are kept because SimHash
/// weights a token by how often it occurs.
///
/// ```rust
/// use canonical::simhash_tokens;
///
/// assert_eq!(simhash_tokens("Foo.bar(x, x)"), vec!["foo", "bar", "x", "x"]);
/// ```
pub fn simhash_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(SIMHASH_DELIMITERS)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
