use std::collections::HashMap;

/// Parse an `application/x-www-form-urlencoded` body.
///
/// `+` decodes to a space. Repeated keys keep the last value.
pub fn parse_form(body: &[u8]) -> HashMap<String, String> {
    let raw = String::from_utf8_lossy(body);
    let mut params = HashMap::new();

    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.find('=') {
            Some(eq_idx) => (&pair[..eq_idx], &pair[eq_idx + 1..]),
            None => (pair, ""),
        };
        params.insert(decode_component(key), decode_component(value));
    }

    params
}

pub fn decode_component(encoded: &str) -> String {
    let spaced = encoded.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced.clone(),
    }
}

/// Get a string field, empty when absent.
pub fn get_string(params: &HashMap<String, String>, key: &str) -> String {
    params.get(key).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plus_and_percent_escapes() {
        let params = parse_form(b"content=Hello+world%21&name=Al%C3%A9x");
        assert_eq!(get_string(&params, "content"), "Hello world!");
        assert_eq!(get_string(&params, "name"), "Aléx");
    }

    #[test]
    fn literal_plus_survives_when_encoded() {
        let params = parse_form(b"content=1%2B1");
        assert_eq!(get_string(&params, "content"), "1+1");
    }

    #[test]
    fn flags_and_missing_fields() {
        let params = parse_form(b"confirm&&name=");
        assert_eq!(params.get("confirm"), Some(&String::new()));
        assert_eq!(get_string(&params, "name"), "");
        assert_eq!(get_string(&params, "content"), "");
    }
}
