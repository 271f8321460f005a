// Courier - provider-agnostic transactional email for Rust
//
// Compose a message with a fluent builder, render it from a template, inline
// its stylesheet and hand it to the configured provider without blocking.

// Re-export the mail pipeline
pub use courier_mail::*;

// Logging setup
pub use courier_log as log;

// Re-exported for implementing custom transports
pub use async_trait::async_trait;
pub use serde_json;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Dispatch, MailError, MessageBuilder, MessageId, Provider, ProviderConfig, Result,
        SendRequest, Transport, TransportFactory, async_trait,
    };
    pub use serde_json::json;
}
