use std::collections::BTreeSet;

/// Expands the `p` query selector into zero-based part indices.
///
/// The selector is 1-based on the wire. Supported forms are a single number
/// (`3`) and an inclusive range (`2-4`) whose missing or unparsable
/// boundaries default to the first and last part. Reversed ranges are
/// swapped, anything outside the video is dropped silently, and a selector
/// on a single-part video is ignored outright. There is no error case: the
/// worst input yields an empty set.
pub fn expand_parts(selector: Option<&str>, total_parts: usize) -> BTreeSet<usize> {
    if total_parts <= 1 {
        return BTreeSet::from([0]);
    }

    let Some(selector) = selector else {
        return (0..total_parts).collect();
    };

    if let Some((start, end)) = selector.split_once('-') {
        let start = start.trim().parse::<i64>().unwrap_or(1);
        let end = end.trim().parse::<i64>().unwrap_or(total_parts as i64);
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        // Clamp before iterating so a huge or negative boundary cannot
        // produce an absurd range; everything clamped away would have been
        // filtered out anyway.
        let start = start.max(1);
        let end = end.min(total_parts as i64);
        (start..=end).map(|part| (part - 1) as usize).collect()
    } else {
        selector
            .trim()
            .parse::<i64>()
            .ok()
            .map(|part| part - 1)
            .filter(|&part| part >= 0 && part < total_parts as i64)
            .map(|part| part as usize)
            .into_iter()
            .collect()
    }
}
