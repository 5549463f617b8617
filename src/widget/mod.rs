//! Widget resources
//!
//! A widget is the HTML document the host embeds to render a tool's
//! structured output. This module holds:
//! - Resource models (`WidgetResource`, `WidgetSource`)
//! - The fetcher (remote HTTP or local assets, with a time-bounded cache)
//! - The catalog that resolves `resources/read` URIs

pub mod catalog;
pub mod fetcher;

use std::path::PathBuf;

use serde::Serialize;

use crate::mcp::models::WIDGET_MIME_TYPE;

pub use catalog::WidgetCatalog;
pub use fetcher::WidgetFetcher;

/// Where a widget's HTML is loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetSource {
    /// Deployed widget fetched over HTTP.
    Remote(String),
    /// Built widget on disk: directory plus primary file name.
    Local { dir: PathBuf, file: String },
}

impl WidgetSource {
    pub fn cache_key(&self) -> String {
        match self {
            WidgetSource::Remote(url) => url.clone(),
            WidgetSource::Local { dir, file } => dir.join(file).display().to_string(),
        }
    }
}

/// A widget document advertised through `resources/list`.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetResource {
    /// Canonical URI; doubles as the tools' output template.
    pub uri: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "mimeType")]
    pub mime_type: String,

    #[serde(skip)]
    pub source: WidgetSource,
}

impl WidgetResource {
    /// Widget served from its own URI.
    pub fn remote(uri: impl Into<String>, name: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            source: WidgetSource::Remote(uri.clone()),
            uri,
            name: name.into(),
            description: None,
            mime_type: WIDGET_MIME_TYPE.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_source(mut self, source: WidgetSource) -> Self {
        self.source = source;
        self
    }
}

#[derive(thiserror::Error, Debug)]
pub enum WidgetError {
    #[error("failed to fetch widget from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("widget host {url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read widget file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no widget HTML found in {0}")]
    Missing(PathBuf),
}
