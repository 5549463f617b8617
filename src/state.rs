//! Application State
//!
//! Everything a request needs, built once at startup and shared read-only
//! between handlers.

use std::sync::Arc;

use tracing::info;

use crate::apps::AppKind;
use crate::config::{ConfigError, ServerConfig};
use crate::mcp::models::ServerInfo;
use crate::mcp::Dispatcher;
use crate::widget::{WidgetCatalog, WidgetFetcher, WidgetResource, WidgetSource};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub app: AppKind,
    /// Canonical widget URL, also the tools' output template.
    pub widget_url: String,
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Wires the dispatcher for the configured app.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let profile = config.app.profile();
        let widget_url = config.widget_url();

        let mut widget = WidgetResource::remote(widget_url.clone(), profile.widget_name)
            .with_description(profile.widget_description);
        if let Some(dir) = &config.assets_dir {
            info!("Using assets directory: {}", dir.display());
            widget = widget.with_source(WidgetSource::Local {
                dir: dir.clone(),
                file: profile.widget_file.to_string(),
            });
        }

        let fetcher = WidgetFetcher::new(config.fetch_timeout, config.widget_cache_ttl)?;
        let registry = config.app.registry(&widget_url)?;

        let dispatcher = Dispatcher::new(
            ServerInfo {
                name: profile.server_name.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            Arc::new(registry),
            Arc::new(WidgetCatalog::new(vec![widget], fetcher)),
            config.tool_timeout,
        );

        Ok(Self {
            app: config.app,
            widget_url,
            dispatcher,
        })
    }

    pub fn server_info(&self) -> &ServerInfo {
        self.dispatcher.server_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_state_for_every_app() {
        for app in AppKind::all() {
            let state = AppState::from_config(&ServerConfig::for_app(app)).unwrap();
            assert_eq!(state.server_info().name, app.profile().server_name);
            assert_eq!(state.widget_url, app.default_widget_url());
            assert_eq!(state.dispatcher.widgets().resources().len(), 1);
        }
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = ServerConfig {
            widget_url: Some("::::".into()),
            ..ServerConfig::default()
        };
        assert!(AppState::from_config(&config).is_err());
    }
}
