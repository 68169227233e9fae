/// Decodes a location hash (`"#02"`, `"02"`, `"#%30%32"`) into its raw token.
///
/// Returns `None` when the fragment is empty or not valid percent-encoded UTF-8.
pub fn parse_fragment(hash: &str) -> Option<String> {
    let trimmed = hash.strip_prefix('#').unwrap_or(hash);
    if trimmed.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(trimmed).ok()?;
    if decoded.is_empty() {
        return None;
    }
    Some(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_leading_hash() {
        assert_eq!(parse_fragment("#02"), Some("02".to_string()));
        assert_eq!(parse_fragment("03"), Some("03".to_string()));
    }

    #[test]
    fn empty_fragment_is_none() {
        assert_eq!(parse_fragment(""), None);
        assert_eq!(parse_fragment("#"), None);
    }

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(parse_fragment("#%30%31"), Some("01".to_string()));
    }

    #[test]
    fn malformed_escape_is_none() {
        assert_eq!(parse_fragment("#%FF%FE"), None);
    }
}
