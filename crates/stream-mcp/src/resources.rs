//! MCP resource handlers.
//!
//! Serves fixed text documents under fixed URIs.

use std::collections::HashMap;

use serde::Serialize;

use stream_mcp_core::ResourceSettings;

const WRAPSHIP_DOCUMENT: &str = include_str!("../resources/wrapship.md");

/// A fixed text document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticResource {
    /// URI the document is served under
    pub uri: String,
    /// Resource name shown in listings
    pub name: String,
    /// Mime type of the payload
    pub mime_type: &'static str,
    /// Document body
    #[serde(skip)]
    pub text: &'static str,
}

/// Registry of static resources, keyed by URI.
pub struct ResourceRegistry {
    resources: HashMap<String, StaticResource>,
}

impl ResourceRegistry {
    /// Creates a registry from the configured resource settings.
    pub fn new(settings: &ResourceSettings) -> Self {
        let document = StaticResource {
            uri: settings.uri.clone(),
            name: settings.name.clone(),
            mime_type: "text/plain",
            text: WRAPSHIP_DOCUMENT,
        };

        let mut resources = HashMap::new();
        resources.insert(document.uri.clone(), document);

        Self { resources }
    }

    /// Looks up a resource by URI.
    pub fn get(&self, uri: &str) -> Option<&StaticResource> {
        self.resources.get(uri)
    }

    /// All resources, sorted by URI.
    pub fn list(&self) -> Vec<&StaticResource> {
        let mut resources: Vec<_> = self.resources.values().collect();
        resources.sort_by(|a, b| a.uri.cmp(&b.uri));
        resources
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new(&ResourceSettings::default())
    }
}
