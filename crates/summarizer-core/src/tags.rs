//! Tag normalization and merging.

/// Normalize a model-produced tag: lowercase, keep only letters and
/// whitespace, collapse whitespace runs, trim. May return an empty string.
pub fn normalize_tag(raw: &str) -> String {
    let kept: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a list of tags, dropping empties and duplicates while keeping
/// first-occurrence order.
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in raw {
        let tag = normalize_tag(tag.as_ref());
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Append `additions` to `tags`, skipping ones already present. Returns the
/// tags that were actually appended, in order.
pub fn merge_tags(tags: &mut Vec<String>, additions: &[String]) -> Vec<String> {
    let mut added = Vec::new();
    for tag in additions {
        if !tags.contains(tag) {
            tags.push(tag.clone());
            added.push(tag.clone());
        }
    }
    added
}
