//! Query tokenization for the relevance ranker.

/// Extract search terms from a raw user question.
///
/// Lowercases the input, replaces every character outside `[a-z0-9 \t:]`
/// with a space, splits on whitespace runs, and drops tokens shorter than
/// three characters. Colons survive so verse references like `3:16` stay
/// intact.
///
/// # Examples
///
/// ```
/// use berea_api::domain::chat::tokenize;
///
/// let terms = tokenize("What is John 3:16 about?");
/// assert_eq!(terms, vec!["what", "john", "3:16", "about"]);
/// ```
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || c == ':' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.len() >= 3)
        .map(str::to_string)
        .collect()
}
