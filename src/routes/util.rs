//! URL/form parsing for command bodies sent by the page.

/// Parse a URL-encoded form body into key-value pairs.
/// Handles `key=value&key2=value2` (as produced by `URLSearchParams`).
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let val = parts.next().unwrap_or("");
            (percent_decode(key), percent_decode(val))
        })
        .collect()
}

/// Percent-decode a URL-encoded value. Decoding is done on bytes, so
/// multi-byte UTF-8 sequences (`%C3%A9`) come back as the original text.
pub fn percent_decode(input: &str) -> String {
    let mut bytes = Vec::with_capacity(input.len());
    let mut iter = input.bytes();
    while let Some(b) = iter.next() {
        match b {
            b'%' => {
                let hi = iter.next();
                let lo = iter.next();
                match (hi, lo) {
                    (Some(hi), Some(lo)) => match (hex_value(hi), hex_value(lo)) {
                        (Some(h), Some(l)) => bytes.push((h << 4) | l),
                        _ => bytes.extend_from_slice(&[b'%', hi, lo]),
                    },
                    (Some(hi), None) => bytes.extend_from_slice(&[b'%', hi]),
                    _ => bytes.push(b'%'),
                }
            }
            b'+' => bytes.push(b' '),
            _ => bytes.push(b),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// Helper to get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_body_works() {
        let pairs = parse_form_body("title=A&date=2025-01-01&description=B");
        assert_eq!(pairs.len(), 3);
        assert_eq!(get_param(&pairs, "title"), Some("A"));
        assert_eq!(get_param(&pairs, "date"), Some("2025-01-01"));
    }

    #[test]
    fn parse_form_body_empty() {
        assert!(parse_form_body("").is_empty());
    }

    #[test]
    fn key_without_value_is_empty() {
        let pairs = parse_form_body("partner1=&partner2");
        assert_eq!(get_param(&pairs, "partner1"), Some(""));
        assert_eq!(get_param(&pairs, "partner2"), Some(""));
    }

    #[test]
    fn percent_decode_plus_as_space() {
        assert_eq!(percent_decode("hello+world"), "hello world");
    }

    #[test]
    fn percent_decode_hex() {
        assert_eq!(percent_decode("http%3A%2F%2Fx%2Fy.png"), "http://x/y.png");
    }

    #[test]
    fn percent_decode_utf8() {
        assert_eq!(percent_decode("Zo%C3%AB"), "Zoë");
    }

    #[test]
    fn percent_decode_keeps_malformed_escapes() {
        assert_eq!(percent_decode("100%zz"), "100%zz");
        assert_eq!(percent_decode("50%"), "50%");
    }

    #[test]
    fn parse_query_strips_prefix() {
        let pairs = parse_query("?id=3");
        assert_eq!(get_param(&pairs, "id"), Some("3"));
    }
}
