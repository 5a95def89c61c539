//! MCP prompt templates.
//!
//! The registry is built once when the server starts and never changes
//! afterwards; lookups are by prompt name.

use std::collections::HashMap;

use rmcp::model::{JsonObject, PromptMessage, PromptMessageRole};
use serde::Serialize;

use stream_mcp_core::{Error, Result};

/// Renders the messages of a prompt from its arguments.
pub type PromptRenderer = fn(&JsonObject) -> Result<Vec<PromptMessage>>;

/// Argument accepted by a prompt template.
#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    /// Argument name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Whether the argument must be supplied
    pub required: bool,
}

/// A named prompt template.
#[derive(Clone, Serialize)]
pub struct PromptDefinition {
    /// Prompt name
    pub name: &'static str,
    /// Prompt description
    pub description: &'static str,
    /// Accepted arguments
    pub arguments: Vec<PromptArgument>,
    #[serde(skip)]
    render: PromptRenderer,
}

impl std::fmt::Debug for PromptDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

impl PromptDefinition {
    /// Render this prompt with the given arguments.
    pub fn render(&self, arguments: &JsonObject) -> Result<Vec<PromptMessage>> {
        (self.render)(arguments)
    }
}

/// Registry of prompt templates.
pub struct PromptRegistry {
    prompts: HashMap<&'static str, PromptDefinition>,
}

impl PromptRegistry {
    /// Creates a registry holding every built-in prompt.
    pub fn new() -> Self {
        let prompts = [greeting_template()]
            .into_iter()
            .map(|prompt| (prompt.name, prompt))
            .collect();

        Self { prompts }
    }

    /// Gets a prompt definition by name.
    pub fn get(&self, name: &str) -> Option<&PromptDefinition> {
        self.prompts.get(name)
    }

    /// All prompt definitions, sorted by name.
    pub fn list(&self) -> Vec<&PromptDefinition> {
        let mut prompts: Vec<_> = self.prompts.values().collect();
        prompts.sort_by_key(|p| p.name);
        prompts
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn greeting_template() -> PromptDefinition {
    PromptDefinition {
        name: "greeting-template",
        description: "A simple greeting prompt template",
        arguments: vec![PromptArgument {
            name: "name",
            description: "Name to include in greeting",
            required: true,
        }],
        render: render_greeting,
    }
}

fn render_greeting(arguments: &JsonObject) -> Result<Vec<PromptMessage>> {
    let name = required_str(arguments, "name")?;
    Ok(vec![PromptMessage::new_text(
        PromptMessageRole::User,
        format!("Please greet {name} in a friendly manner."),
    )])
}

fn required_str<'a>(arguments: &'a JsonObject, key: &str) -> Result<&'a str> {
    match arguments.get(key) {
        Some(value) => value
            .as_str()
            .ok_or_else(|| Error::InvalidInput(format!("argument '{key}' must be a string"))),
        None => Err(Error::InvalidInput(format!(
            "missing required argument '{key}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::PromptMessageContent;
    use serde_json::json;

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn message_text(message: &PromptMessage) -> &str {
        match &message.content {
            PromptMessageContent::Text { text } => text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_has_greeting() {
        let registry = PromptRegistry::new();
        let prompt = registry.get("greeting-template").unwrap();
        assert_eq!(prompt.description, "A simple greeting prompt template");
        assert_eq!(prompt.arguments.len(), 1);
        assert!(prompt.arguments[0].required);
        assert!(registry.get("farewell-template").is_none());
    }

    #[test]
    fn test_render_greeting() {
        let registry = PromptRegistry::new();
        let messages = registry
            .get("greeting-template")
            .unwrap()
            .render(&args(json!({"name": "Ada"})))
            .unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, PromptMessageRole::User);
        assert_eq!(
            message_text(&messages[0]),
            "Please greet Ada in a friendly manner."
        );
    }

    #[test]
    fn test_render_greeting_missing_name() {
        let result = render_greeting(&JsonObject::new());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_render_greeting_non_string_name() {
        let result = render_greeting(&args(json!({"name": 42})));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_definition_serializes_without_renderer() {
        let registry = PromptRegistry::new();
        let value = serde_json::to_value(registry.get("greeting-template").unwrap()).unwrap();
        assert_eq!(value["name"], "greeting-template");
        assert_eq!(value["arguments"][0]["name"], "name");
        assert_eq!(value["arguments"][0]["required"], true);
        assert!(value.get("render").is_none());
    }
}
