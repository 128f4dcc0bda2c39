use serde::Deserialize;

/// The `[logging]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Output format of the tracing subscriber installed by
    /// [`Config::setup_tracing`](crate::Config::setup_tracing).
    #[serde(default)]
    pub format: LogFormat,
}

/// Log line format: `json`, `default` (full human-readable), `compact` or `pretty`.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Default,
    Compact,
    Pretty,
}
