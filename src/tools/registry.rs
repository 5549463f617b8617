//! Tool registration and dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::mcp::models::ToolDescriptor;

use super::{ToolHandler, ToolResult};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("tool `{0}` registered twice")]
    Duplicate(String),
}

struct Entry {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Name → handler table. Populated once through [`ToolRegistryBuilder`] and
/// read-only afterwards.
pub struct ToolRegistry {
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
    descriptors: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.by_name.get(name).map(|&i| &self.entries[i].descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs the named tool, or returns `None` if it is not registered.
    pub async fn invoke(&self, name: &str, args: Value) -> Option<ToolResult> {
        let handler = self.by_name.get(name).map(|&i| self.entries[i].handler.clone())?;
        Some(handler.call(args).await)
    }
}

#[derive(Default)]
pub struct ToolRegistryBuilder {
    entries: Vec<Entry>,
    default_meta: Option<Value>,
}

impl ToolRegistryBuilder {
    /// Vendor metadata stamped on every descriptor that does not carry its own.
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.default_meta = Some(meta);
        self
    }

    pub fn register(mut self, handler: impl ToolHandler + 'static) -> Self {
        let handler: Arc<dyn ToolHandler> = Arc::new(handler);
        self.entries.push(Entry {
            descriptor: handler.descriptor(),
            handler,
        });
        self
    }

    pub fn build(self) -> Result<ToolRegistry, RegistryError> {
        let mut by_name = HashMap::with_capacity(self.entries.len());
        let mut entries = self.entries;

        for (index, entry) in entries.iter_mut().enumerate() {
            if by_name.insert(entry.descriptor.name.clone(), index).is_some() {
                return Err(RegistryError::Duplicate(entry.descriptor.name.clone()));
            }
            if entry.descriptor.meta.is_none() {
                entry.descriptor.meta = self.default_meta.clone();
            }
        }

        let descriptors = entries.iter().map(|e| e.descriptor.clone()).collect();
        Ok(ToolRegistry {
            entries,
            by_name,
            descriptors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolError, ToolOutput};
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo(&'static str);

    #[async_trait]
    impl ToolHandler for Echo {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor {
                name: self.0.to_string(),
                title: None,
                description: "Echoes its arguments".into(),
                input_schema: json!({ "type": "object" }),
                annotations: None,
                meta: None,
            }
        }

        async fn call(&self, args: Value) -> ToolResult {
            if args.get("fail").is_some() {
                return Err(ToolError::rejected("asked to fail"));
            }
            Ok(ToolOutput::new("echoed", args))
        }
    }

    #[tokio::test]
    async fn invokes_registered_tools_in_order() {
        let registry = ToolRegistry::builder()
            .register(Echo("a"))
            .register(Echo("b"))
            .build()
            .unwrap();

        let names: Vec<_> = registry.list().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(registry.len(), 2);

        let out = registry.invoke("b", json!({ "x": 1 })).await.unwrap().unwrap();
        assert_eq!(out.structured, json!({ "x": 1 }));

        assert!(registry.invoke("missing", json!({})).await.is_none());
    }

    #[tokio::test]
    async fn rejections_pass_through() {
        let registry = ToolRegistry::builder().register(Echo("a")).build().unwrap();
        let result = registry.invoke("a", json!({ "fail": true })).await.unwrap();
        assert_eq!(result.unwrap_err(), ToolError::rejected("asked to fail"));
    }

    #[test]
    fn duplicate_names_are_refused() {
        let err = ToolRegistry::builder()
            .register(Echo("a"))
            .register(Echo("a"))
            .build()
            .err()
            .unwrap();
        assert_eq!(err, RegistryError::Duplicate("a".into()));
    }

    #[test]
    fn default_meta_is_stamped() {
        let registry = ToolRegistry::builder()
            .with_meta(json!({ "openai/outputTemplate": "https://w.example/" }))
            .register(Echo("a"))
            .build()
            .unwrap();
        assert_eq!(
            registry.get("a").unwrap().meta.as_ref().unwrap()["openai/outputTemplate"],
            "https://w.example/"
        );
    }
}
