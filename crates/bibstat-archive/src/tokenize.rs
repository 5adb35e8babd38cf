//! Splitting of `;`-delimited multi-value fields

/// Separator between values in the Name and Keywords columns.
pub const DELIMITER: char = ';';

/// Placeholder some exports write for an absent value.
pub const ABSENT: &str = "nan";

/// Every trimmed segment of `raw`, empty ones included.
///
/// An empty field yields a single empty segment. Joining the segments with
/// [`DELIMITER`] reproduces `raw` up to whitespace around the values.
pub fn split_field(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(DELIMITER).map(str::trim)
}

/// Whether a segment carries no value.
pub fn is_absent(token: &str) -> bool {
    token.is_empty() || token == ABSENT
}

/// Value tokens of `raw` in field order.
///
/// Drops empty and [`ABSENT`] segments, and repeats of a token already seen
/// in the same field.
pub fn tokens(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in split_field(raw) {
        if is_absent(token) || out.iter().any(|t| t == token) {
            continue;
        }
        out.push(token.to_string());
    }
    out
}
