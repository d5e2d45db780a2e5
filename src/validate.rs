use lazy_static::lazy_static;
use regex::Regex;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Syntactic URL check: scheme, authority, no whitespace. Reachability is the
/// caller's problem.
pub(crate) fn is_valid_url(url: &str) -> bool {
    lazy_static! {
        static ref URL_RE: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s]+$").unwrap();
    }
    URL_RE.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_emails() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("demo-1700000000@headshot.studio"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
    }

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(is_valid_url("https://x/1.jpg"));
        assert!(is_valid_url("http://example.com/photo.png?size=large"));
        assert!(is_valid_url("https://cdn.example.com/a/b/c.webp"));
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("example.com/no-scheme"));
        assert!(!is_valid_url("https://has spaces.com"));
        assert!(!is_valid_url("://missing-scheme"));
    }
}
