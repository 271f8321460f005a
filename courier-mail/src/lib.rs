//! # Courier Mail
//!
//! Compose transactional email from templates and send it through a
//! pluggable provider transport.
//!
//! ## Features
//!
//! - **Fluent drafts**: `to`, `from`, `subject`, `cc`, `bcc` validated as you go
//! - **Templates**: Handlebars rendering with a JSON context
//! - **CSS inlining**: stylesheet rules rewritten into `style` attributes
//! - **Providers**: AWS SES, selected once from configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier_mail::{ProviderConfig, TransportFactory};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::new("AmazonSES").credentials("AKIA...", "secret");
//!     let factory = TransportFactory::new(Some(config))?;
//!
//!     let message_id = factory
//!         .issue_draft()
//!         .to("recipient@example.com")?
//!         .from("sender@example.com")?
//!         .subject("Welcome!")?
//!         .body(
//!             "templates/welcome.hbs",
//!             Some("templates/email.css".into()),
//!             json!({"name": "Ada"}),
//!         )?
//!         .await?;
//!
//!     println!("sent {message_id}");
//!     Ok(())
//! }
//! ```

mod address;
mod builder;
mod config;
mod error;
mod factory;
mod inline;
mod pipeline;
mod resource;
mod ses;
mod template;
mod transport;

pub use address::{Address, IntoAddresses, MAX_ADDRESS_LEN, MIN_ADDRESS_LEN, is_valid};
pub use builder::{CHARSET, Draft, MessageBuilder};
pub use config::{ENV_PREFIX, FileFormat, Provider, ProviderConfig};
pub use error::{ErrorKind, MailError, Result};
pub use factory::TransportFactory;
pub use inline::{CssInliner, StyleInliner};
pub use pipeline::{Dispatch, ErrorHandler};
pub use resource::{FsReader, ResourceReader};
pub use ses::{DEFAULT_REGION, SesConfig, SesTransport};
pub use template::{HandlebarsEngine, TemplateEngine};
pub use transport::{Body, Content, Destination, Message, MessageId, SendRequest, Transport};

/// Prelude for common imports.
///
/// ```
/// use courier_mail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::address::{Address, IntoAddresses};
    pub use crate::builder::{Draft, MessageBuilder};
    pub use crate::config::{Provider, ProviderConfig};
    pub use crate::error::{MailError, Result};
    pub use crate::factory::TransportFactory;
    pub use crate::pipeline::Dispatch;
    pub use crate::transport::{MessageId, SendRequest, Transport};
}
