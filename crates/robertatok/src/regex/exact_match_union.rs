//! Exact Match Union Patterns

/// Create a union pattern of exact matches.
///
/// Longer alternatives are listed first, so that a token which is a
/// prefix of another never shadows it.
///
/// ## Arguments
/// * `alts` - A slice of string-like alternatives to union.
///
/// ## Returns
/// A new regex source string containing the union pattern.
pub fn exact_match_union_regex_pattern<S: AsRef<str>>(alts: &[S]) -> String {
    let mut alts: Vec<&str> = alts.iter().map(|s| s.as_ref()).collect();
    alts.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    alts.dedup();

    let parts = alts.into_iter().map(::regex::escape).collect::<Vec<_>>();
    format!("({})", parts.join("|"))
}
