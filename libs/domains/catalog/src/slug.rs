/// URL-safe form of `source`: lowercased, with every character outside
/// `[a-z0-9]` replaced by `-`.
///
/// ```
/// assert_eq!(domain_catalog::slug::slugify("Sea View Villas!"), "sea-view-villas-");
/// ```
pub fn slugify(source: &str) -> String {
    source
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
