//! Reading the `Cookie` request header and rendering `Set-Cookie` values.

use std::time::Duration;

/// `Expires` value used for cookies that should outlive any visitor.
pub const PERMANENT_EXPIRES: &str = "Fri, 31 Dec 9999 23:59:59 GMT";

/// Splits a `Cookie` header into `(name, value)` pairs.
///
/// Malformed pairs (no `=`, empty name) are skipped. Surrounding double
/// quotes around a value are removed.
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// When a written cookie expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieExpiry {
    /// Never, for all practical purposes.
    Permanent,
    MaxAge(Duration),
}

impl From<Option<Duration>> for CookieExpiry {
    fn from(lifetime: Option<Duration>) -> Self {
        lifetime.map_or(CookieExpiry::Permanent, CookieExpiry::MaxAge)
    }
}

/// A cookie to send back with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub expiry: CookieExpiry,
}

impl SetCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, expiry: CookieExpiry) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expiry,
        }
    }

    /// Renders the value of a `Set-Cookie` header.
    ///
    /// ```
    /// use splash_router::{CookieExpiry, SetCookie};
    ///
    /// let cookie = SetCookie::new("website#lang", "fr", CookieExpiry::Permanent);
    /// assert_eq!(
    ///     cookie.to_header_value(),
    ///     "website#lang=fr; Path=/; Expires=Fri, 31 Dec 9999 23:59:59 GMT"
    /// );
    /// ```
    pub fn to_header_value(&self) -> String {
        match self.expiry {
            CookieExpiry::Permanent => format!(
                "{}={}; Path=/; Expires={PERMANENT_EXPIRES}",
                self.name, self.value
            ),
            CookieExpiry::MaxAge(age) => format!(
                "{}={}; Path=/; Max-Age={}",
                self.name,
                self.value,
                age.as_secs()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cookie_pairs() {
        let cookies = parse_cookie_header("website#lang=fr; session=abc; flag=\"quoted\"");
        assert_eq!(
            cookies,
            vec![
                ("website#lang".to_string(), "fr".to_string()),
                ("session".to_string(), "abc".to_string()),
                ("flag".to_string(), "quoted".to_string()),
            ]
        );
    }

    #[test]
    fn skips_malformed_pairs() {
        let cookies = parse_cookie_header("novalue; =orphan; ok=1;");
        assert_eq!(cookies, vec![("ok".to_string(), "1".to_string())]);
    }

    #[test]
    fn keeps_empty_values() {
        let cookies = parse_cookie_header("website#lang=");
        assert_eq!(cookies, vec![("website#lang".to_string(), String::new())]);
    }

    #[test]
    fn renders_max_age() {
        let cookie = SetCookie::new("web#lang", "de", Some(Duration::from_secs(3600)).into());
        assert_eq!(cookie.to_header_value(), "web#lang=de; Path=/; Max-Age=3600");
    }

    #[test]
    fn missing_lifetime_is_permanent() {
        assert_eq!(CookieExpiry::from(None), CookieExpiry::Permanent);
    }
}
