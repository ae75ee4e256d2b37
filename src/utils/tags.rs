//! Tags are persisted as one comma-joined text column. A tag containing a
//! comma would not survive the round trip, so every entry point splits on
//! commas (form input) or rejects them (JSON API) before reaching storage.

pub const TAG_DELIMITER: char = ',';

pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

/// Inverse of [`join_tags`]. An empty column yields no tags.
pub fn split_tags(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(TAG_DELIMITER).map(str::to_string).collect()
}

/// Free-text form input: comma separated, trimmed, blanks dropped, order kept.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    input
        .split(TAG_DELIMITER)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn find_unstorable_tag(tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(String::as_str)
        .find(|tag| tag.contains(TAG_DELIMITER))
}
