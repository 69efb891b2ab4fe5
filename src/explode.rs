use memchr::memchr_iter;

/// Splits a comma-separated cell into trimmed, non-empty names.
pub fn explode(field: Option<&str>) -> impl Iterator<Item = &str> {
    field
        .into_iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn is_blank(field: Option<&str>) -> bool {
    field.is_none_or(|s| s.trim().is_empty())
}

/// Raw list length: commas + 1 on the untrimmed cell, 0 when blank.
/// Empty elements and duplicates still count.
pub fn listed_count(field: Option<&str>) -> usize {
    match field {
        Some(s) if !s.trim().is_empty() => memchr_iter(b',', s.as_bytes()).count() + 1,
        _ => 0,
    }
}
