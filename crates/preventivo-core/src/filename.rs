//! Download file names.

const MAX_LEN: usize = 120;
const FALLBACK: &str = "preventivo";

/// Make a string safe for a `Content-Disposition` filename.
///
/// Line breaks are dropped, every character outside `[A-Za-z0-9._-]` becomes
/// `_`, and the result is capped at 120 characters. Applying it twice yields
/// the same string.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_LEN)
        .collect();

    if cleaned.is_empty() {
        FALLBACK.to_string()
    } else {
        cleaned
    }
}

/// Base name (without extension) of the PDF generated for `domain_key`.
pub fn quote_filename(domain_key: &str) -> String {
    sanitize_filename(&format!("preventivo_{domain_key}"))
}
