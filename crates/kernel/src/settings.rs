use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV: &str = "develop";
const ENV_VAR_NAME: &str = "ENVIRONMENT";
const CONFIG_DIR_ENV: &str = "GATEWAY_CONFIG_DIR";
const ENV_PREFIX: &str = "GATEWAY";

/// Flat variables understood for compatibility with existing deployments.
const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
const HTTP_PORT_ENV: &str = "HTTP_PORT";
const BOOK_SERVICE_HOST_ENV: &str = "BOOK_SERVICE_HOST";
const BOOK_SERVICE_PORT_ENV: &str = "BOOK_SERVICE_PORT";

/// Deployment environment the gateway is running in.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Develop,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Develop => "develop",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "develop" => Ok(Environment::Develop),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected develop/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub book_service: BookServiceSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, config files, and process variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(&config_dir, std::env::vars().collect())
    }

    /// Load configuration from `config_dir` and an explicit variable set.
    ///
    /// Precedence, lowest first: `base.toml`, `{environment}.toml`,
    /// `GATEWAY_*` variables, then the flat legacy variables.
    pub fn load_from(config_dir: &Path, vars: config::Map<String, String>) -> anyhow::Result<Self> {
        let environment: Environment = vars
            .get(ENV_VAR_NAME)
            .map(String::as_str)
            .unwrap_or(DEFAULT_ENV)
            .parse()?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment.as_str()));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            .set_override_option("telemetry.log_level", vars.get(LOG_LEVEL_ENV).cloned())?
            .set_override_option("book_service.host", vars.get(BOOK_SERVICE_HOST_ENV).cloned())?
            .set_override_option(
                "server.port",
                vars.get(HTTP_PORT_ENV)
                    .map(|raw| parse_port(HTTP_PORT_ENV, raw))
                    .transpose()?,
            )?
            .set_override_option(
                "book_service.port",
                vars.get(BOOK_SERVICE_PORT_ENV)
                    .map(|raw| parse_port(BOOK_SERVICE_PORT_ENV, raw))
                    .transpose()?,
            )?;

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = environment;
        settings.validate()?;

        Ok(settings)
    }

    /// The upstream deadline has to fire first so a slow call still ends in
    /// an error envelope rather than the server's bare timeout response.
    fn validate(&self) -> anyhow::Result<()> {
        if self.server.request_timeout_ms <= self.book_service.call_timeout_ms {
            return Err(anyhow!(
                "server.request_timeout_ms ({}) must be greater than book_service.call_timeout_ms ({})",
                self.server.request_timeout_ms,
                self.book_service.call_timeout_ms
            ));
        }
        Ok(())
    }
}

/// Accepts `7777` as well as the listen-address forms `:7777` and `host:7777`.
fn parse_port(name: &str, raw: &str) -> anyhow::Result<i64> {
    let digits = raw.rsplit(':').next().unwrap_or(raw).trim();
    let port: u16 = digits
        .parse()
        .with_context(|| format!("invalid port in {}: '{}'", name, raw))?;
    Ok(i64::from(port))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        7777
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Location and call limits of the upstream Book gRPC service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookServiceSettings {
    #[serde(default = "BookServiceSettings::default_host")]
    pub host: String,
    #[serde(default = "BookServiceSettings::default_port")]
    pub port: u16,
    #[serde(default = "BookServiceSettings::default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "BookServiceSettings::default_call_timeout_ms")]
    pub call_timeout_ms: u64,
}

impl BookServiceSettings {
    fn default_host() -> String {
        "localhost".to_string()
    }

    fn default_port() -> u16 {
        6060
    }

    fn default_connect_timeout_ms() -> u64 {
        5000
    }

    fn default_call_timeout_ms() -> u64 {
        10000
    }

    /// `http://host:port`, the form tonic endpoints expect.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

impl Default for BookServiceSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            connect_timeout_ms: Self::default_connect_timeout_ms(),
            call_timeout_ms: Self::default_call_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetrySettings {
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "debug".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn missing_dir() -> PathBuf {
        PathBuf::from("/nonexistent/book-gateway/config")
    }

    #[test]
    fn default_environment_is_develop() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Develop);
    }

    #[test]
    fn default_book_service_is_localhost_6060() {
        let settings = Settings::default();
        assert_eq!(settings.book_service.endpoint(), "http://localhost:6060");
    }

    #[test]
    fn load_without_sources_uses_defaults() {
        let settings = Settings::load_from(&missing_dir(), vars(&[])).unwrap();
        assert_eq!(settings.environment, Environment::Develop);
        assert_eq!(settings.server.port, 7777);
        assert_eq!(settings.telemetry.log_level, "debug");
        assert_eq!(settings.book_service.port, 6060);
    }

    #[test]
    fn legacy_variables_override_defaults() {
        let settings = Settings::load_from(
            &missing_dir(),
            vars(&[
                ("ENVIRONMENT", "staging"),
                ("LOG_LEVEL", "warn"),
                ("HTTP_PORT", ":8088"),
                ("BOOK_SERVICE_HOST", "books.internal"),
                ("BOOK_SERVICE_PORT", "7070"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.telemetry.log_level, "warn");
        assert_eq!(settings.server.port, 8088);
        assert_eq!(settings.book_service.endpoint(), "http://books.internal:7070");
    }

    #[test]
    fn prefixed_variables_reach_nested_keys() {
        let settings = Settings::load_from(
            &missing_dir(),
            vars(&[("GATEWAY_BOOK_SERVICE__CALL_TIMEOUT_MS", "250")]),
        )
        .unwrap();
        assert_eq!(settings.book_service.call_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn config_files_are_layered_by_environment() {
        let dir = std::env::temp_dir().join(format!("book-gateway-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("base.toml"), "[server]\nport = 9000\nhost = \"127.0.0.1\"\n").unwrap();
        std::fs::write(dir.join("production.toml"), "[server]\nport = 9443\n").unwrap();

        let settings =
            Settings::load_from(&dir, vars(&[("ENVIRONMENT", "production")])).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 9443);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let err = Settings::load_from(&missing_dir(), vars(&[("ENVIRONMENT", "qa")])).unwrap_err();
        assert!(err.to_string().contains("unsupported environment 'qa'"));
    }

    #[test]
    fn request_timeout_must_exceed_call_timeout() {
        let err = Settings::load_from(
            &missing_dir(),
            vars(&[
                ("GATEWAY_SERVER__REQUEST_TIMEOUT_MS", "5000"),
                ("GATEWAY_BOOK_SERVICE__CALL_TIMEOUT_MS", "5000"),
            ]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("request_timeout_ms (5000)"));

        let settings = Settings::load_from(
            &missing_dir(),
            vars(&[("GATEWAY_SERVER__REQUEST_TIMEOUT_MS", "12000")]),
        )
        .unwrap();
        assert_eq!(settings.server.request_timeout_ms, 12000);
    }

    #[test]
    fn malformed_port_is_rejected() {
        let err =
            Settings::load_from(&missing_dir(), vars(&[("HTTP_PORT", "seven")])).unwrap_err();
        assert!(err.to_string().contains("HTTP_PORT"));
    }
}
