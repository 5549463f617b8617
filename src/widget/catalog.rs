//! Widget catalog: the resources an app advertises and how to read them.

use super::{WidgetError, WidgetFetcher, WidgetResource};
use crate::mcp::uri::same_resource;

pub struct WidgetCatalog {
    resources: Vec<WidgetResource>,
    fetcher: WidgetFetcher,
}

impl WidgetCatalog {
    pub fn new(resources: Vec<WidgetResource>, fetcher: WidgetFetcher) -> Self {
        Self { resources, fetcher }
    }

    pub fn resources(&self) -> &[WidgetResource] {
        &self.resources
    }

    /// Resolves a requested URI against the known widgets, ignoring query
    /// strings and a trailing slash.
    pub fn find(&self, uri: &str) -> Option<&WidgetResource> {
        self.resources.iter().find(|r| same_resource(uri, &r.uri))
    }

    /// Loads the HTML for a catalog entry.
    pub async fn read(&self, resource: &WidgetResource) -> Result<String, WidgetError> {
        self.fetcher.load(&resource.source).await
    }
}
