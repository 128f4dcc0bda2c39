//!
//! Configuration structures and utilities for wiring up the splash router.
//!
//! A configuration can be created in many ways:
//! - From an environment-specific TOML file via `Config::from_rust_env` or `Config::from_toml_file`
//! - From a TOML string via `Config::from_toml`
//! - Constructed programmatically via the builder methods on `Config`
//!
//! In both TOML-based methods, environment variables can be referenced in the TOML
//! using the {{ VAR_NAME }} syntax, and they will be substituted with the corresponding
//! environment variable value. This keeps deployment-specific values such as the
//! splash item identifier out of the checked-in TOML files.
//!
//! Configuration is split into logical sections, each represented by their own struct:
//!
//! - `SplashConfig` for the splash page and language negotiation switches
//! - `SiteConfig` for each site (host names, start path, cookie keys)
//! - `LoggingConfig` for logging and tracing settings
//!
mod logging;
mod site;
mod splash;

pub use logging::*;
pub use site::*;
pub use splash::*;

use {
    crate::{Error, Result, utils::replace_handlebars_with_env},
    serde::Deserialize,
    std::{collections::HashSet, env, fs, str::FromStr, time::Duration},
};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub splash: SplashConfig,
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    ///
    /// Loads the configuration from a file based on the RUST_ENV environment variable.
    ///
    pub fn from_rust_env() -> Result<Config> {
        Self::from_toml_file(env::var("RUST_ENV")?)
    }

    ///
    /// Given an environment name, loads the corresponding configuration file,
    /// substitutes any environment variables, and returns a Config struct.
    /// The configuration file is expected to be located at "config/{env}.toml"
    /// where {env} is the provided environment name (e.g., "dev", "prod").
    ///
    pub fn from_toml_file(env: impl AsRef<str>) -> Result<Config> {
        let path = format!("config/{}.toml", env.as_ref());
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    ///
    /// Parses a configuration string in TOML format into a Config struct.
    ///
    pub fn from_toml(toml_str: &str) -> Result<Config> {
        toml_str.parse()
    }

    ///
    /// Loads the configuration for RUST_ENV, falling back to the built-in
    /// defaults when the variable is unset or the file cannot be read.
    ///
    pub fn from_env_or_default() -> Config {
        match Self::from_rust_env() {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(error = %err, "No environment configuration, using defaults");
                Config::default()
            }
        }
    }

    /// Adds a site to the configuration.
    pub fn with_site(mut self, site: SiteConfig) -> Self {
        self.sites.push(site);
        self
    }

    /// Replaces the splash section.
    pub fn with_splash_config(mut self, splash: SplashConfig) -> Self {
        self.splash = splash;
        self
    }

    /// Sets the splash item identifier or content path.
    pub fn with_splash_item_id(mut self, id: impl Into<String>) -> Self {
        self.splash.splash_item_id = id.into();
        self
    }

    /// Enables or disables language negotiation from `Accept-Language`.
    pub fn with_lang_from_browser_preferences(mut self, enable: bool) -> Self {
        self.splash.set_lang_from_browser_preferences = enable;
        self
    }

    /// Enables or disables the splash page for every visit to the base URL.
    pub fn with_always_show_for_base_url(mut self, enable: bool) -> Self {
        self.splash.always_show_for_base_url = enable;
        self
    }

    /// Enables or disables applying the negotiated culture to the response.
    pub fn with_culture(mut self, enable: bool) -> Self {
        self.splash.set_culture = enable;
        self
    }

    /// Sets the lifetime of the language cookie.
    pub fn with_cookie_lifetime(mut self, lifetime: Duration) -> Self {
        self.splash.cookie_lifetime = Some(lifetime);
        self
    }

    /// Sets the log format of the LoggingConfig.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.logging.format = format;
        self
    }

    /// Returns the first site answering for `host`.
    pub fn site_for_host(&self, host: &str) -> Option<&SiteConfig> {
        self.sites.iter().find(|site| site.matches_host(host))
    }

    /// Ensures that the configuration is valid.
    /// Every section validates itself; site names must also be unique since
    /// they scope the language cookie.
    pub fn validate(&self) -> Result<()> {
        self.splash.validate()?;

        let mut names = HashSet::new();
        for site in &self.sites {
            site.validate()?;
            if !names.insert(site.name.to_ascii_lowercase()) {
                return Err(Error::config(format!("duplicate site name '{}'", site.name)));
            }
        }
        Ok(())
    }

    /// Installs the global tracing subscriber: the `[logging]` format with an
    /// `EnvFilter` read from `RUST_LOG`.
    ///
    /// Call it once at startup; later calls leave the first subscriber in place.
    pub fn setup_tracing(&self) {
        use tracing_subscriber::{EnvFilter, Layer, Registry, prelude::*};

        let fmt = tracing_subscriber::fmt::layer();
        let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match self.logging.format {
            LogFormat::Json => fmt.json().boxed(),
            LogFormat::Default => fmt.boxed(),
            LogFormat::Compact => fmt.compact().boxed(),
            LogFormat::Pretty => fmt.pretty().boxed(),
        };
        let _ = tracing_subscriber::registry()
            .with(fmt_layer)
            .with(EnvFilter::from_default_env())
            .try_init();
    }
}

///
/// Parses a configuration string with references to environment variables
/// into a Config struct by substituting the environment variables and then
/// parsing the resulting TOML.
///
impl FromStr for Config {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let config_file = replace_handlebars_with_env(s);
        let config = toml::from_str::<Config>(&config_file)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, ItemRef};

    const FULL_CONFIG: &str = r#"
[splash]
splash_item_id = "{110D559F-DEA5-42EA-9C1C-8A5DF7E70EF9}"
set_lang_from_browser_preferences = true
always_show_for_base_url = true
set_culture = true

[[sites]]
name = "website"
host_name = "www.example.com"
start_path = "/sitecore/content/home"
language = "en"

[[sites]]
name = "fallback"
host_name = "*"
start_path = "/sitecore/content/fallback"

[logging]
format = "json"
"#;

    #[test]
    fn test_parse_full_config() {
        let config: Config = FULL_CONFIG.parse().unwrap();
        assert!(config.validate().is_ok());
        assert!(config.splash.set_lang_from_browser_preferences);
        assert!(config.splash.always_show_for_base_url);
        assert!(config.splash.set_culture);
        assert!(matches!(config.splash.splash_item(), Some(ItemRef::Id(_))));
        assert_eq!(config.sites.len(), 2);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert!(config.sites.is_empty());
        assert!(config.splash.splash_item().is_none());
        assert_eq!(config.logging.format, LogFormat::Default);
    }

    #[test]
    fn test_site_for_host_prefers_first_match() {
        let config: Config = FULL_CONFIG.parse().unwrap();
        assert_eq!(config.site_for_host("www.example.com").unwrap().name, "website");
        assert_eq!(config.site_for_host("other.test").unwrap().name, "fallback");
    }

    #[test]
    fn test_duplicate_site_names_rejected() {
        let config = Config::default()
            .with_site(SiteConfig::new("web", "/home"))
            .with_site(SiteConfig::new("WEB", "/other"));
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = "[splash\nbroken".parse::<Config>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_env_substitution_in_config() {
        unsafe {
            env::set_var("SPLASH_CFG_TEST_ITEM", "/sitecore/content/splash");
        }
        let config: Config = r#"
[splash]
splash_item_id = "{{ SPLASH_CFG_TEST_ITEM }}"
"#
        .parse()
        .unwrap();
        assert_eq!(
            config.splash.splash_item(),
            Some(ItemRef::Path("/sitecore/content/splash".into()))
        );
        unsafe {
            env::remove_var("SPLASH_CFG_TEST_ITEM");
        }
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = Config::from_toml_file("definitely-not-an-env").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::default()
            .with_splash_item_id("/sitecore/content/splash")
            .with_lang_from_browser_preferences(true)
            .with_always_show_for_base_url(true)
            .with_culture(true)
            .with_cookie_lifetime(Duration::from_secs(60))
            .with_log_format(LogFormat::Compact);
        assert!(config.splash.set_lang_from_browser_preferences);
        assert!(config.splash.always_show_for_base_url);
        assert!(config.splash.set_culture);
        assert_eq!(config.splash.cookie_lifetime, Some(Duration::from_secs(60)));
        assert_eq!(config.logging.format, LogFormat::Compact);
    }
}
