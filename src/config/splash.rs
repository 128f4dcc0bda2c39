use {
    crate::{ItemRef, Result},
    serde::Deserialize,
    std::time::Duration,
};

/// Tunables of the splash router.
///
/// # Examples
///
/// ```toml
/// [splash]
/// splash_item_id = "{{ SPLASH_ITEM_ID }}"   # GUID or content path
/// set_lang_from_browser_preferences = true
/// always_show_for_base_url = false
/// set_culture = true
/// cookie_lifetime = "365d"                  # omit for a permanent cookie
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SplashConfig {
    /// Negotiate the content language from the `Accept-Language` header on
    /// first visits. Default: false
    #[serde(default)]
    pub set_lang_from_browser_preferences: bool,

    /// Show the splash item on every request for the bare site URL, even to
    /// visitors who already chose a language. Default: false
    #[serde(default)]
    pub always_show_for_base_url: bool,

    /// Apply the negotiated language as the response culture. Default: false
    #[serde(default)]
    pub set_culture: bool,

    /// Identifier (or content path) of the splash item.
    /// An empty or unresolvable value disables the splash page.
    #[serde(default)]
    pub splash_item_id: String,

    /// Lifetime of the language cookie. `None` writes a cookie that never
    /// expires in practice.
    #[serde(default, with = "humantime_serde")]
    pub cookie_lifetime: Option<Duration>,
}

impl SplashConfig {
    /// Parses `splash_item_id`. Returns `None` when the value is empty or
    /// malformed, which simply turns the splash page off.
    pub fn splash_item(&self) -> Option<ItemRef> {
        if self.splash_item_id.trim().is_empty() {
            return None;
        }
        match self.splash_item_id.parse() {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(
                    splash_item_id = %self.splash_item_id,
                    error = %err,
                    "Ignoring unparseable splash item id, splash page disabled"
                );
                None
            }
        }
    }

    pub fn with_splash_item_id(mut self, id: impl Into<String>) -> Self {
        self.splash_item_id = id.into();
        self
    }

    pub fn with_lang_from_browser_preferences(mut self, enable: bool) -> Self {
        self.set_lang_from_browser_preferences = enable;
        self
    }

    pub fn with_always_show_for_base_url(mut self, enable: bool) -> Self {
        self.always_show_for_base_url = enable;
        self
    }

    pub fn with_culture(mut self, enable: bool) -> Self {
        self.set_culture = enable;
        self
    }

    pub fn with_cookie_lifetime(mut self, lifetime: Duration) -> Self {
        self.cookie_lifetime = Some(lifetime);
        self
    }

    /// Nothing here can make a request fail, so validation is lenient:
    /// a bad splash item only logs a warning.
    pub fn validate(&self) -> Result<()> {
        let _ = self.splash_item();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_everything() {
        let cfg = SplashConfig::default();
        assert!(!cfg.set_lang_from_browser_preferences);
        assert!(!cfg.always_show_for_base_url);
        assert!(!cfg.set_culture);
        assert!(cfg.splash_item().is_none());
        assert!(cfg.cookie_lifetime.is_none());
    }

    #[test]
    fn parses_from_toml() {
        let cfg: SplashConfig = toml::from_str(
            r#"
            splash_item_id = "/sitecore/content/splash"
            set_lang_from_browser_preferences = true
            set_culture = true
            cookie_lifetime = "30days"
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.splash_item(),
            Some(ItemRef::Path("/sitecore/content/splash".into()))
        );
        assert!(cfg.set_lang_from_browser_preferences);
        assert!(cfg.set_culture);
        assert_eq!(cfg.cookie_lifetime, Some(Duration::from_secs(30 * 86400)));
    }

    #[test]
    fn malformed_splash_item_disables_feature() {
        let cfg = SplashConfig::default().with_splash_item_id("not a guid");
        assert!(cfg.splash_item().is_none());
        assert!(cfg.validate().is_ok());
    }
}
