/// Location used when a request carries no location code.
pub const DEFAULT_LOCATION: &str = "fr-75101";

const COUNTRY_PREFIX: &str = "fr-";

/// Canonical form of a local administrative unit code.
///
/// Trims and lowercases the input; a bare five-digit INSEE code becomes
/// `fr-xxxxx`; anything else passes through unchanged so unknown codes can
/// still fall through to the fallback dataset. Empty input maps to
/// [`DEFAULT_LOCATION`]. The function is idempotent.
pub fn normalize_location(code: &str) -> String {
    let code = code.trim().to_lowercase();
    if code.is_empty() {
        return DEFAULT_LOCATION.to_string();
    }
    if code.starts_with(COUNTRY_PREFIX) {
        return code;
    }
    if code.len() == 5 && code.chars().all(|c| c.is_ascii_digit()) {
        return format!("{COUNTRY_PREFIX}{code}");
    }
    code
}
