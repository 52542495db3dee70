use url::Url;

use crate::errors::ShortenerError;

/// Accepts only absolute `http`/`https` URLs with a host.
pub fn validate_destination(raw: &str) -> Result<Url, ShortenerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ShortenerError::InvalidDestination(
            "URL cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| ShortenerError::InvalidDestination(format!("{trimmed}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ShortenerError::InvalidDestination(format!(
                "unsupported scheme {other}:, only http:// and https:// are allowed"
            )));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(ShortenerError::InvalidDestination(format!(
            "{trimmed}: missing host"
        )));
    }

    Ok(url)
}

/// ASCII-safe form of a stored destination for the `Location` header.
pub fn redirect_location(destination: &str) -> String {
    Url::parse(destination.trim())
        .map(String::from)
        .unwrap_or_else(|_| destination.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_destination("http://example.com").is_ok());
        assert!(validate_destination("https://example.com/path?query=1").is_ok());
        assert!(validate_destination("http://localhost:8080").is_ok());
        assert!(validate_destination("HTTPS://EXAMPLE.COM").is_ok());
    }

    #[test]
    fn test_relative_and_garbage_rejected() {
        for raw in ["not-a-url", "example.com", "/relative/path", "http//missing"] {
            assert!(
                matches!(
                    validate_destination(raw),
                    Err(ShortenerError::InvalidDestination(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_other_schemes_rejected() {
        for raw in [
            "ftp://example.com",
            "javascript:alert(1)",
            "mailto:test@example.com",
            "file:///etc/passwd",
        ] {
            assert!(
                matches!(
                    validate_destination(raw),
                    Err(ShortenerError::InvalidDestination(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_url() {
        assert!(validate_destination("").is_err());
        assert!(validate_destination("   ").is_err());
    }

    #[test]
    fn test_redirect_location_is_ascii() {
        assert_eq!(
            redirect_location("https://example.com/caf\u{e9}"),
            "https://example.com/caf%C3%A9"
        );
        assert_eq!(redirect_location("https://example.com"), "https://example.com/");
    }
}
