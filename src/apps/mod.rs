//! Example app catalog
//!
//! Every example is the same server with different configuration: an
//! identity, one widget, and the tools that render into it.

use serde_json::Value;

use crate::mcp::helpers::widget_meta;
use crate::tools::{
    email, greeting, image, linkedin, places, testimonials, RegistryError, ToolRegistry,
};

/// Which example app the server hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AppKind {
    Greeting,
    Email,
    Places,
    Linkedin,
    Image,
    Testimonials,
}

/// Static description of an example app.
#[derive(Debug, Clone, PartialEq)]
pub struct AppProfile {
    pub server_name: &'static str,
    pub widget_name: &'static str,
    pub widget_description: &'static str,
    /// File name of the built widget inside an assets directory.
    pub widget_file: &'static str,
    pub invoking: &'static str,
    pub invoked: &'static str,
}

/// Where `pnpm build && pnpm serve` puts widget assets during development.
const DEV_ASSETS_ORIGIN: &str = "http://localhost:4444";

impl AppKind {
    pub fn all() -> [AppKind; 6] {
        [
            AppKind::Greeting,
            AppKind::Email,
            AppKind::Places,
            AppKind::Linkedin,
            AppKind::Image,
            AppKind::Testimonials,
        ]
    }

    pub fn profile(self) -> AppProfile {
        match self {
            AppKind::Greeting => AppProfile {
                server_name: "greeting-widget",
                widget_name: "Greeting card",
                widget_description: "Renders a personalised greeting card.",
                widget_file: "greeting.html",
                invoking: "Writing a greeting",
                invoked: "Greeting ready",
            },
            AppKind::Email => AppProfile {
                server_name: "email-composer",
                widget_name: "Email composer",
                widget_description: "Shows mailbox listings and editable email drafts.",
                widget_file: "email.html",
                invoking: "Opening the mailbox",
                invoked: "Mailbox ready",
            },
            AppKind::Places => AppProfile {
                server_name: "places-map",
                widget_name: "Places map",
                widget_description: "Pins places in Playa del Carmen on an interactive map.",
                widget_file: "places.html",
                invoking: "Searching places",
                invoked: "Places found",
            },
            AppKind::Linkedin => AppProfile {
                server_name: "linkedin-composer",
                widget_name: "LinkedIn post composer",
                widget_description: "Previews and edits LinkedIn post drafts.",
                widget_file: "linkedin.html",
                invoking: "Drafting your post",
                invoked: "Draft ready",
            },
            AppKind::Image => AppProfile {
                server_name: "image-generator",
                widget_name: "Image generator",
                widget_description: "Displays generated images.",
                widget_file: "image.html",
                invoking: "Generating image",
                invoked: "Image ready",
            },
            AppKind::Testimonials => AppProfile {
                server_name: "testimonials-carousel",
                widget_name: "Testimonials carousel",
                widget_description: "Cycles through customer testimonials.",
                widget_file: "testimonials.html",
                invoking: "Collecting testimonials",
                invoked: "Testimonials ready",
            },
        }
    }

    /// Widget URL used when none is configured.
    pub fn default_widget_url(self) -> String {
        format!("{DEV_ASSETS_ORIGIN}/{}", self.profile().widget_file)
    }

    /// Builds the app's tool registry with widget metadata pointing at
    /// `widget_url`.
    pub fn registry(self, widget_url: &str) -> Result<ToolRegistry, RegistryError> {
        let profile = self.profile();
        let builder = ToolRegistry::builder().with_meta(self.meta(widget_url, &profile));

        let builder = match self {
            AppKind::Greeting => builder.register(greeting::GreetingTool),
            AppKind::Email => builder
                .register(email::ComposeEmailTool)
                .register(email::ListEmailsTool),
            AppKind::Places => builder.register(places::FindPlacesTool),
            AppKind::Linkedin => builder
                .register(linkedin::ComposePostTool)
                .register(linkedin::PublishPostTool),
            AppKind::Image => builder.register(image::GenerateImageTool),
            AppKind::Testimonials => builder.register(testimonials::TestimonialsTool),
        };
        builder.build()
    }

    fn meta(self, widget_url: &str, profile: &AppProfile) -> Value {
        widget_meta(widget_url, profile.invoking, profile.invoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_app_builds_a_non_empty_registry() {
        for kind in AppKind::all() {
            let url = kind.default_widget_url();
            let registry = kind.registry(&url).unwrap();
            assert!(!registry.is_empty(), "{kind:?}");
            for descriptor in registry.list() {
                assert_eq!(
                    descriptor.meta.as_ref().unwrap()["openai/outputTemplate"],
                    url.as_str()
                );
                assert_eq!(descriptor.input_schema["type"], "object");
            }
        }
    }

    #[test]
    fn default_widget_urls_are_distinct() {
        let mut urls: Vec<_> = AppKind::all()
            .iter()
            .map(|k| k.default_widget_url())
            .collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), AppKind::all().len());
        assert_eq!(
            AppKind::Places.default_widget_url(),
            "http://localhost:4444/places.html"
        );
    }
}
