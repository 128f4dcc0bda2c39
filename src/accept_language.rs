//! `Accept-Language` header parsing.
//!
//! Turns `fr-CH, fr;q=0.9, en;q=0.8, *;q=0.5` into the ordered tag list
//! `["fr-CH", "fr", "en", "*"]`. Only the tags are kept; weights are used
//! for ordering and then discarded.

/// Parses an `Accept-Language` header value into language tags, most
/// preferred first.
///
/// - Entries are ordered by `q` weight, descending. Entries with the same
///   weight keep their header order.
/// - Entries with `q=0` are kept and sort last; every listed tag is a
///   candidate.
/// - A missing or malformed weight counts as `1`.
/// - Empty entries are skipped.
///
/// ```
/// use splash_router::accept_language;
///
/// let tags = accept_language::parse("fr;q=0.9,en;q=0.5");
/// assert_eq!(tags, vec!["fr", "en"]);
/// ```
pub fn parse(header: &str) -> Vec<String> {
    let mut weighted: Vec<(f32, &str)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let weight = parts.find_map(quality).unwrap_or(1.0);
            Some((weight, tag))
        })
        .collect();

    // sort_by is stable, so equal weights keep header order
    weighted.sort_by(|a, b| b.0.total_cmp(&a.0));
    weighted.into_iter().map(|(_, tag)| tag.to_string()).collect()
}

/// Extracts the weight from a `q=<value>` parameter.
fn quality(param: &str) -> Option<f32> {
    let (key, value) = param.split_once('=')?;
    if !key.trim().eq_ignore_ascii_case("q") {
        return None;
    }
    match value.trim().parse::<f32>() {
        Ok(q) if q.is_finite() => Some(q.clamp(0.0, 1.0)),
        _ => Some(1.0),
    }
}
