//! Handlebars template engine integration.

use handlebars::Handlebars;
use serde_json::Value;

use crate::Result;

/// Template engine trait for rendering email bodies.
pub trait TemplateEngine: Send + Sync {
    /// Compile `source` and render it with `context`.
    fn render(&self, source: &str, context: &Value) -> Result<String>;
}

/// Handlebars-based template engine for emails.
///
/// Templates use mustache-style `{{name}}` placeholders; values are
/// HTML-escaped unless written with triple braces.
pub struct HandlebarsEngine {
    handlebars: Handlebars<'static>,
}

impl HandlebarsEngine {
    /// Create a new Handlebars engine.
    pub fn new() -> Self {
        Self {
            handlebars: Handlebars::new(),
        }
    }

    /// Fail on placeholders that are missing from the context.
    pub fn strict(mut self) -> Self {
        self.handlebars.set_strict_mode(true);
        self
    }

    /// Register a partial template.
    pub fn register_partial(mut self, name: &str, content: &str) -> Result<Self> {
        self.handlebars.register_partial(name, content)?;
        Ok(self)
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn render(&self, source: &str, context: &Value) -> Result<String> {
        Ok(self.handlebars.render_template(source, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MailError;
    use serde_json::json;

    #[test]
    fn test_handlebars_render() {
        let engine = HandlebarsEngine::new();
        let html = engine
            .render("<h1>Hello, {{name}}!</h1>", &json!({"name": "World"}))
            .unwrap();

        assert_eq!(html, "<h1>Hello, World!</h1>");
    }

    #[test]
    fn test_missing_value_renders_empty() {
        let engine = HandlebarsEngine::new();
        let html = engine.render("<p>{{missing}}</p>", &json!({})).unwrap();
        assert_eq!(html, "<p></p>");
    }

    #[test]
    fn test_strict_mode_rejects_missing_value() {
        let engine = HandlebarsEngine::new().strict();
        let result = engine.render("<p>{{missing}}</p>", &json!({}));
        assert!(matches!(result, Err(MailError::Template(_))));
    }

    #[test]
    fn test_syntax_error() {
        let engine = HandlebarsEngine::new();
        let result = engine.render("<p>{{#if name}}unclosed</p>", &json!({}));
        assert!(matches!(result, Err(MailError::Template(_))));
    }

    #[test]
    fn test_partials() {
        let engine = HandlebarsEngine::new()
            .register_partial("footer", "<small>{{company}}</small>")
            .unwrap();
        let html = engine
            .render("<p>Hi</p>{{> footer}}", &json!({"company": "Acme"}))
            .unwrap();

        assert_eq!(html, "<p>Hi</p><small>Acme</small>");
    }
}
