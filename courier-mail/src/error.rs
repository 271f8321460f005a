//! Mail error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::Provider;

/// Result type for mail operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Broad class of a [`MailError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised while building a [`TransportFactory`](crate::TransportFactory).
    Configuration,
    /// Raised by a builder setter or by `body()` before the pipeline starts.
    Validation,
    /// Raised while rendering, inlining or dispatching a message.
    Pipeline,
}

/// Mail errors.
#[derive(Debug, Error)]
pub enum MailError {
    /// No configuration was supplied.
    #[error("Configuration required")]
    ConfigRequired,

    /// The selected provider is missing credentials.
    #[error("access_key and secret_key required for {provider}")]
    MissingCredentials {
        /// Provider that was selected.
        provider: Provider,
    },

    /// The configured service name matches no supported provider.
    #[error("{0} not supported")]
    UnsupportedProvider(String),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required field.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid email address.
    #[error("{0} is an invalid address")]
    InvalidAddress(String),

    /// The builder already started its pipeline.
    #[error("Message already dispatched")]
    AlreadyTriggered,

    /// A template or stylesheet could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Resource {
        /// Locator that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Template error.
    #[error("Template error: {0}")]
    Template(String),

    /// Style inlining error.
    #[error("Inline error: {0}")]
    Inline(String),

    /// Provider API error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The pipeline could not be spawned or did not finish.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl MailError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigRequired
            | Self::MissingCredentials { .. }
            | Self::UnsupportedProvider(_)
            | Self::Config(_) => ErrorKind::Configuration,
            Self::MissingField(_) | Self::InvalidAddress(_) | Self::AlreadyTriggered => {
                ErrorKind::Validation
            }
            Self::Resource { .. }
            | Self::Template(_)
            | Self::Inline(_)
            | Self::Provider(_)
            | Self::Runtime(_) => ErrorKind::Pipeline,
        }
    }

    /// Check if a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Resource { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

impl From<handlebars::RenderError> for MailError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for MailError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<css_inline::InlineError> for MailError {
    fn from(err: css_inline::InlineError) -> Self {
        Self::Inline(err.to_string())
    }
}

impl From<serde_json::Error> for MailError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::de::Error> for MailError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(MailError::ConfigRequired.kind(), ErrorKind::Configuration);
        assert_eq!(
            MailError::UnsupportedProvider("Postal".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(MailError::MissingField("to").kind(), ErrorKind::Validation);
        assert_eq!(MailError::AlreadyTriggered.kind(), ErrorKind::Validation);
        assert_eq!(MailError::Provider("boom".into()).kind(), ErrorKind::Pipeline);
    }

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = MailError::MissingCredentials {
            provider: Provider::AmazonSes,
        };
        assert_eq!(err.to_string(), "access_key and secret_key required for AmazonSES");

        let err = MailError::UnsupportedProvider("Postal".into());
        assert_eq!(err.to_string(), "Postal not supported");

        let err = MailError::InvalidAddress("sjkaliski".into());
        assert_eq!(err.to_string(), "sjkaliski is an invalid address");
    }

    #[test]
    fn test_not_found_detection() {
        let err = MailError::Resource {
            path: PathBuf::from("missing.hbs"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_not_found());
        assert!(!MailError::Template("bad".into()).is_not_found());
    }
}
