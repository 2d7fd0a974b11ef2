/// Turns a free-text header or column name into a column id.
///
/// Lowercases, trims, and collapses every internal whitespace run into a
/// single underscore: `"  Phone   Number "` becomes `"phone_number"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
