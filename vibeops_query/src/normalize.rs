//! Cosmetic prompt normalization.
//!
//! Only affects the search term shown in the synthetic query. Matching always
//! uses the full prompt.

/// Strip the longest leading filler phrase and trailing punctuation.
///
/// Returns the trimmed prompt unchanged when nothing would be left.
#[must_use]
pub fn display_term<'a>(prompt: &'a str, fillers: &[String]) -> &'a str {
    let trimmed = prompt.trim();

    let stripped = fillers
        .iter()
        .filter(|filler| !filler.is_empty())
        .filter_map(|filler| {
            let head = trimmed.get(..filler.len())?;
            head.eq_ignore_ascii_case(filler)
                .then_some((filler.len(), &trimmed[filler.len()..]))
        })
        .max_by_key(|(len, _)| *len)
        .map_or(trimmed, |(_, rest)| rest);

    let term = stripped.trim().trim_end_matches(['?', '.', '!']).trim_end();

    if term.is_empty() { trimmed } else { term }
}
