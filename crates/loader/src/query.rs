// ABOUTME: Query-string parsing helpers for request URLs.
// ABOUTME: Extracts key/value pairs from full URLs or bare query strings.

use std::collections::HashMap;

use url::Url;

/// Parses the query parameters of a full URL or a bare query string.
///
/// Percent-encoding and `+` are decoded; a key without a value maps to the
/// empty string; duplicate keys keep the last value.
pub fn query_params(input: &str) -> HashMap<String, String> {
    let query = match Url::parse(input) {
        Ok(parsed) => parsed.query().unwrap_or("").to_string(),
        Err(_) => input.trim_start_matches('?').to_string(),
    };
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
