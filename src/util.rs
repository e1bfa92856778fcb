//! Shared utility functions.

/// Maximum number of description characters used for a project directory name.
const SLUG_SOURCE_CHARS: usize = 30;

/// Directory name used when a description has no usable characters.
const FALLBACK_SLUG: &str = "website";

/// Derive a project directory name from a free-text description.
///
/// Takes the first 30 characters, replaces anything that isn't alphanumeric
/// with `_`, trims `_` from both ends and lower-cases the result.
/// "A bakery in Paris!" -> "a_bakery_in_paris"
/// "Portfolio" -> "portfolio"
pub fn project_slug(description: &str) -> String {
    let slug: String = description
        .chars()
        .take(SLUG_SOURCE_CHARS)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let slug = slug.trim_matches('_').to_lowercase();

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Mask a secret for display, keeping only its first 8 characters.
/// "sk-proj-abcdef123" -> "sk-proj-..."
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(8).collect();
    format!("{prefix}...")
}
