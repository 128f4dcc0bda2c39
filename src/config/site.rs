use {
    crate::{Error, Language, Result},
    serde::Deserialize,
};

/// Name of the cookie, per site, that records the visitor's language.
pub const LANGUAGE_COOKIE_NAME: &str = "lang";

/// A site served by the host: which hosts it answers for and where its
/// content tree starts.
///
/// ```toml
/// [[sites]]
/// name = "website"
/// host_name = "www.example.com, example.com"
/// start_path = "/sitecore/content/home"
/// language = "en"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Unique site name. Also prefixes the site's cookie keys.
    pub name: String,

    /// Comma-separated host names. `*` (or an empty value) matches every
    /// host and `*.example.com` matches any subdomain of `example.com`.
    #[serde(default)]
    pub host_name: String,

    /// Content path of the site's home item.
    pub start_path: String,

    /// Default content language of the site.
    #[serde(default)]
    pub language: Option<Language>,
}

impl SiteConfig {
    pub fn new(name: impl Into<String>, start_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host_name: String::new(),
            start_path: start_path.into(),
            language: None,
        }
    }

    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = host_name.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<Language>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Cookie key scoped to this site, e.g. `website#lang`.
    pub fn cookie_key(&self, name: &str) -> String {
        format!("{}#{}", self.name, name)
    }

    /// Cookie key under which the visitor's language choice is stored.
    pub fn language_cookie_key(&self) -> String {
        self.cookie_key(LANGUAGE_COOKIE_NAME)
    }

    /// Whether this site answers for `host`. Any `:port` suffix is ignored.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host
            .rsplit_once(':')
            .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
            .map_or(host, |(name, _)| name);

        if self.host_name.trim().is_empty() {
            return true;
        }

        self.host_name
            .split(',')
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .any(|pattern| {
                if pattern == "*" {
                    true
                } else if let Some(suffix) = pattern.strip_prefix("*.") {
                    let suffix = format!(".{}", suffix.to_ascii_lowercase());
                    host.to_ascii_lowercase().ends_with(&suffix)
                } else {
                    pattern.eq_ignore_ascii_case(host)
                }
            })
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("site name must not be empty"));
        }
        if !self.name.bytes().all(is_cookie_token_byte) {
            return Err(Error::config(format!(
                "site name '{}' cannot be used as a cookie key prefix",
                self.name
            )));
        }
        if !self.start_path.starts_with('/') {
            return Err(Error::config(format!(
                "start_path of site '{}' must be an absolute content path, got '{}'",
                self.name, self.start_path
            )));
        }
        Ok(())
    }
}

/// RFC 6265 cookie-name token characters.
fn is_cookie_token_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_keys_are_site_scoped() {
        let site = SiteConfig::new("website", "/sitecore/content/home");
        assert_eq!(site.language_cookie_key(), "website#lang");
        assert_eq!(site.cookie_key("sc_device"), "website#sc_device");
    }

    #[test]
    fn host_matching() {
        let any = SiteConfig::new("any", "/home");
        assert!(any.matches_host("whatever.test"));

        let site = SiteConfig::new("web", "/home").with_host_name("www.example.com, example.com");
        assert!(site.matches_host("example.com"));
        assert!(site.matches_host("WWW.EXAMPLE.COM:8080"));
        assert!(!site.matches_host("shop.example.com"));

        let wildcard = SiteConfig::new("web", "/home").with_host_name("*.example.com");
        assert!(wildcard.matches_host("shop.example.com"));
        assert!(!wildcard.matches_host("example.com"));
    }

    #[test]
    fn validation() {
        assert!(SiteConfig::new("website", "/home").validate().is_ok());
        assert!(SiteConfig::new("", "/home").validate().is_err());
        assert!(SiteConfig::new("my site", "/home").validate().is_err());
        assert!(SiteConfig::new("website", "home").validate().is_err());
    }
}
