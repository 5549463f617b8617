//! Configuration loading and resolution.
//!
//! Every setting comes from a CLI flag or its environment variable; nothing is
//! read from files.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::apps::AppKind;
use crate::tools::RegistryError;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid widget URL {url:?}: {reason}")]
    InvalidWidgetUrl { url: String, reason: String },

    #[error("invalid listen host {0:?}")]
    InvalidHost(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "widget-apps",
    about = "MCP server hosting the example chat widgets",
    version
)]
pub struct Cli {
    /// Example app to serve.
    #[arg(long, env = "WIDGET_APP", value_enum, default_value = "greeting")]
    pub app: AppKind,

    /// Interface to bind.
    #[arg(long, env = "MCP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Canonical URL of the deployed widget (defaults to the local dev server).
    #[arg(long, env = "WIDGET_URL")]
    pub widget_url: Option<String>,

    /// Serve widget HTML from this directory instead of fetching the widget URL.
    #[arg(long, env = "WIDGET_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Seconds a fetched widget stays fresh (0 disables caching).
    #[arg(long, env = "WIDGET_CACHE_TTL_SECS", default_value_t = 300)]
    pub widget_cache_ttl_secs: u64,

    /// Timeout for fetching widget HTML, in milliseconds.
    #[arg(long, env = "WIDGET_FETCH_TIMEOUT_MS", default_value_t = 10_000)]
    pub fetch_timeout_ms: u64,

    /// Timeout for a single tool invocation, in milliseconds.
    #[arg(long, env = "TOOL_TIMEOUT_MS", default_value_t = 15_000)]
    pub tool_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub app: AppKind,
    pub host: String,
    pub port: u16,
    pub widget_url: Option<String>,
    pub assets_dir: Option<PathBuf>,
    pub widget_cache_ttl: Duration,
    pub fetch_timeout: Duration,
    pub tool_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app: AppKind::Greeting,
            host: "0.0.0.0".to_string(),
            port: 8000,
            widget_url: None,
            assets_dir: None,
            widget_cache_ttl: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(10),
            tool_timeout: Duration::from_secs(15),
        }
    }
}

impl From<&Cli> for ServerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            app: cli.app,
            host: cli.host.clone(),
            port: cli.port,
            widget_url: cli.widget_url.clone().filter(|u| !u.trim().is_empty()),
            assets_dir: cli.assets_dir.clone(),
            widget_cache_ttl: Duration::from_secs(cli.widget_cache_ttl_secs),
            fetch_timeout: Duration::from_millis(cli.fetch_timeout_ms),
            tool_timeout: Duration::from_millis(cli.tool_timeout_ms),
        }
    }
}

impl ServerConfig {
    pub fn for_app(app: AppKind) -> Self {
        Self {
            app,
            ..Self::default()
        }
    }

    /// The configured widget URL, or the app's development default.
    pub fn widget_url(&self) -> String {
        self.widget_url
            .clone()
            .unwrap_or_else(|| self.app.default_widget_url())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Checks everything that can be checked before binding.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.widget_url();
        Url::parse(&url).map_err(|e| ConfigError::InvalidWidgetUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        self.socket_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_defaults_match_server_defaults() {
        // Every declared default is passed as a flag, so environment
        // variables cannot override it.
        let command = Cli::command();
        let mut argv = vec!["widget-apps".to_string()];
        for arg in command.get_arguments() {
            if matches!(arg.get_id().as_str(), "help" | "version") {
                continue;
            }
            let (Some(long), Some(default)) = (arg.get_long(), arg.get_default_values().first())
            else {
                continue;
            };
            argv.push(format!("--{long}"));
            argv.push(default.to_string_lossy().into_owned());
        }

        let cli = Cli::try_parse_from(argv).unwrap();
        let config = ServerConfig::from(&cli);
        let defaults = ServerConfig::default();
        assert_eq!(config.app, defaults.app);
        assert_eq!(config.host, defaults.host);
        assert_eq!(config.port, defaults.port);
        assert_eq!(config.widget_cache_ttl, defaults.widget_cache_ttl);
        assert_eq!(config.fetch_timeout, defaults.fetch_timeout);
        assert_eq!(config.tool_timeout, defaults.tool_timeout);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn optional_settings_have_no_cli_default() {
        let command = Cli::command();
        for id in ["widget_url", "assets_dir"] {
            let arg = command
                .get_arguments()
                .find(|a| a.get_id().as_str() == id)
                .unwrap();
            assert!(arg.get_default_values().is_empty(), "{id}");
        }
        let defaults = ServerConfig::default();
        assert!(defaults.widget_url.is_none());
        assert!(defaults.assets_dir.is_none());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "widget-apps",
            "--app",
            "places",
            "--port",
            "9100",
            "--widget-url",
            "https://cdn.example/places/",
            "--widget-cache-ttl-secs",
            "0",
        ])
        .unwrap();
        let config = ServerConfig::from(&cli);
        assert_eq!(config.app, AppKind::Places);
        assert_eq!(config.port, 9100);
        assert_eq!(config.widget_url(), "https://cdn.example/places/");
        assert!(config.widget_cache_ttl.is_zero());
    }

    #[test]
    fn widget_url_falls_back_to_app_default() {
        let config = ServerConfig::for_app(AppKind::Image);
        assert_eq!(config.widget_url(), "http://localhost:4444/image.html");
    }

    #[test]
    fn validation_rejects_bad_values() {
        let config = ServerConfig {
            widget_url: Some("not a url".into()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWidgetUrl { .. })
        ));

        let config = ServerConfig {
            host: "example.com".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHost(_))));

        assert!(ServerConfig::default().validate().is_ok());
    }
}
