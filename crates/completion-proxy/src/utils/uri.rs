/// Removes every trailing slash from a URL.
///
/// # Examples
/// ```
/// use completion_proxy::utils::uri::ensure_no_trailing_slash;
/// assert_eq!(ensure_no_trailing_slash("https://api.openai.com/v1/"), "https://api.openai.com/v1");
///
/// // Works with owned String too
/// let url = String::from("https://api.openai.com/v1//");
/// assert_eq!(ensure_no_trailing_slash(url), "https://api.openai.com/v1");
/// ```
pub fn ensure_no_trailing_slash<S>(url: S) -> String
where
    S: Into<String>,
{
    let url = url.into();
    if url.ends_with('/') {
        url.trim_end_matches('/').to_string()
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_no_trailing_slash() {
        let test_cases = vec![
            ("http://example.com/", "http://example.com"),
            ("http://example.com", "http://example.com"),
            ("http://example.com//", "http://example.com"),
            ("http://localhost:8080/v1/", "http://localhost:8080/v1"),
        ];

        for (input, expected) in test_cases {
            assert_eq!(ensure_no_trailing_slash(input), expected);
            assert_eq!(ensure_no_trailing_slash(input.to_string()), expected);
        }
    }

    #[test]
    fn test_no_allocation_when_unchanged() {
        let input = String::from("http://example.com");
        let ptr = input.as_ptr();
        let result = ensure_no_trailing_slash(input);

        assert_eq!(result.as_ptr(), ptr);
    }
}
