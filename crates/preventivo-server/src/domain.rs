/// Used when neither the request nor the configuration names a domain.
pub const FALLBACK_DOMAIN: &str = "casawa";

/// Query keys that are never taken as a bare domain key.
const RESERVED_KEYS: &[&str] = &["domain", "textDomain", "download", "favicon.ico"];

/// Pick the domain key for a request.
///
/// Order: body `domain`, query `domain`, query `textDomain`, the first
/// non-reserved query key (so `/?casawa` works), the configured default, then
/// [`FALLBACK_DOMAIN`]. Blank candidates are skipped at every step.
pub fn select_domain(
    body_domain: Option<&str>,
    query: &[(String, String)],
    default: Option<&str>,
) -> String {
    let non_blank = |s: &&str| !s.trim().is_empty();
    let param = |key: &str| {
        query
            .iter()
            .find(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.as_str())
    };

    body_domain
        .filter(non_blank)
        .or_else(|| param("domain"))
        .or_else(|| param("textDomain"))
        .or_else(|| {
            query
                .iter()
                .map(|(k, _)| k.as_str())
                .find(|k| !k.trim().is_empty() && !RESERVED_KEYS.contains(k))
        })
        .or_else(|| default.filter(non_blank))
        .unwrap_or(FALLBACK_DOMAIN)
        .trim()
        .to_string()
}
