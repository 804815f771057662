//! URL normalization for user input.

use anyhow::{bail, Context, Result};

/// Longest URL accepted from the command line.
const MAX_URL_LENGTH: usize = 2048;

/// Normalizes a user-supplied URL.
///
/// Adds an `https://` prefix when no scheme is given, then checks that the
/// result parses and uses `http` or `https`.
///
/// # Errors
///
/// Fails for empty or overlong input, unparsable URLs and other schemes.
pub fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        bail!("URL must not be empty");
    }
    if url.len() > MAX_URL_LENGTH {
        bail!(
            "URL exceeds maximum length ({} > {MAX_URL_LENGTH})",
            url.len()
        );
    }

    let normalized = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if let Some((scheme, _)) = url.split_once("://") {
        bail!("Unsupported scheme '{scheme}': only http and https are supported");
    } else {
        format!("https://{url}")
    };

    let parsed =
        url::Url::parse(&normalized).with_context(|| format!("Invalid URL: {url}"))?;
    if parsed.host_str().is_none() {
        bail!("Invalid URL: {url} has no host");
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::normalize_url;

    #[test]
    fn test_normalize_url_adds_https() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
    }

    #[test]
    fn test_normalize_url_preserves_scheme() {
        assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com");
        assert_eq!(normalize_url("https://example.com").unwrap(), "https://example.com");
    }

    #[test]
    fn test_normalize_url_trims_input() {
        assert_eq!(normalize_url("  example.com \n").unwrap(), "https://example.com");
    }

    #[test]
    fn test_normalize_url_with_path_and_port() {
        assert_eq!(
            normalize_url("example.com:8080/path?query=value").unwrap(),
            "https://example.com:8080/path?query=value"
        );
    }

    #[test]
    fn test_normalize_url_ipv6() {
        assert_eq!(normalize_url("[2001:db8::1]").unwrap(), "https://[2001:db8::1]");
        assert_eq!(
            normalize_url("http://[2001:db8::1]:8080").unwrap(),
            "http://[2001:db8::1]:8080"
        );
    }

    #[test]
    fn test_normalize_url_rejects_other_schemes() {
        let err = normalize_url("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_normalize_url_rejects_invalid_input() {
        assert!(normalize_url("").is_err());
        assert!(normalize_url("not a valid url!!!").is_err());
        assert!(normalize_url(&"a".repeat(3000)).is_err());
    }
}
