//! Small validation and string-matching helpers shared by the lint rules.

/// Longest query the fuzzy matcher will look at. Anything longer is cut
/// before the distance table is built.
const FUZZY_QUERY_LIMIT: usize = 256;

/// Whether a manifest field value is a usable template-relative path.
///
/// The value must be non-empty after trimming, must not be absolute, and must
/// not climb out of the template directory through any `..` component.
pub fn is_valid_relative_path(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.starts_with('/') || trimmed.starts_with("../") {
        return false;
    }
    if trimmed.contains("/../") || trimmed.ends_with("/..") {
        return false;
    }
    trimmed != ".."
}

/// Whether a string is a valid variable/constant/macro identifier: a leading
/// ASCII letter or underscore followed by letters, digits, or underscores.
pub fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Up to `limit` candidates nearest to `query`, best first.
///
/// Distance is plain Levenshtein; candidates further than half the query
/// length (minimum 2 edits) are dropped, which keeps "fooo" → "foo" style
/// suggestions while filtering unrelated names. An empty candidate set
/// returns immediately without any distance work.
pub fn fuzzy_nearest<'a>(candidates: &[&'a str], query: &str, limit: usize) -> Vec<&'a str> {
    if candidates.is_empty() || limit == 0 {
        return Vec::new();
    }
    let query = truncate_chars(query, FUZZY_QUERY_LIMIT);
    let max_distance = (query.chars().count() / 2).max(2);

    let mut scored: Vec<(usize, &'a str)> = candidates
        .iter()
        .filter_map(|candidate| {
            let distance = levenshtein(candidate, query);
            (distance <= max_distance).then_some((distance, *candidate))
        })
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, c)| c).collect()
}

fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (prev[j + 1] + 1)
                .min(current[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_relative_paths() {
        assert!(is_valid_relative_path("dir/file.json"));
        assert!(is_valid_relative_path("file.json"));
        assert!(is_valid_relative_path("  spaced.json  "));
    }

    #[test]
    fn rejects_escaping_and_absolute_paths() {
        assert!(!is_valid_relative_path("/abs"));
        assert!(!is_valid_relative_path("../up"));
        assert!(!is_valid_relative_path("a/../b"));
        assert!(!is_valid_relative_path("a/.."));
        assert!(!is_valid_relative_path(".."));
        assert!(!is_valid_relative_path(""));
        assert!(!is_valid_relative_path("   "));
    }

    #[test]
    fn identifier_grammar() {
        assert!(is_valid_identifier("foo"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("a1_b2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier("has space"));
        assert!(!is_valid_identifier("dash-ed"));
    }

    #[test]
    fn levenshtein_distances() {
        assert_eq!(levenshtein("company", "company"), 0);
        assert_eq!(levenshtein("company", "compny"), 1);
        assert_eq!(levenshtein("company", "compani"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn nearest_candidate_first() {
        let candidates = ["foo", "bar", "food"];
        assert_eq!(fuzzy_nearest(&candidates, "fooo", 1), vec!["foo"]);
        assert_eq!(fuzzy_nearest(&candidates, "fooo", 2), vec!["foo", "food"]);
    }

    #[test]
    fn unrelated_candidates_are_filtered() {
        let candidates = ["dashboardTitle", "datasetName"];
        assert!(fuzzy_nearest(&candidates, "x", 3).is_empty());
    }

    #[test]
    fn empty_candidates_short_circuit() {
        assert!(fuzzy_nearest(&[], "anything", 5).is_empty());
    }

    #[test]
    fn pathological_query_is_truncated() {
        let long = "x".repeat(100_000);
        let candidates = ["short"];
        // Must return (empty) without excessive work rather than hanging.
        assert!(fuzzy_nearest(&candidates, &long, 1).is_empty());
    }
}
