/// Derive a URL-safe slug from an episode title.
///
/// ASCII alphanumerics are kept and lowercased; every other run of
/// characters becomes a single `-`. No leading or trailing separator.
/// The same title always yields the same slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
