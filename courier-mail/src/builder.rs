//! Message drafts and the fluent builder.

use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use crate::address::parse_all;
use crate::pipeline::{ErrorHandler, Pipeline};
use crate::{Address, Dispatch, IntoAddresses, MailError, Result, TransportFactory};

/// Charset used for subject and body.
pub const CHARSET: &str = "utf-8";

/// Per-message state accumulated by a [`MessageBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// To recipients.
    pub to: Vec<Address>,
    /// Sender address.
    pub from: Option<Address>,
    /// Subject line.
    pub subject: Option<String>,
    /// CC recipients.
    pub cc: Vec<Address>,
    /// BCC recipients.
    pub bcc: Vec<Address>,
    /// Charset for subject and body.
    pub charset: &'static str,
    /// Template locator.
    pub template: Option<PathBuf>,
    /// Stylesheet locator.
    pub styles: Option<PathBuf>,
    /// Values available to the template.
    pub context: Value,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            to: Vec::new(),
            from: None,
            subject: None,
            cc: Vec::new(),
            bcc: Vec::new(),
            charset: CHARSET,
            template: None,
            styles: None,
            context: Value::Object(Default::default()),
        }
    }
}

impl Draft {
    /// Check that everything needed to send is present.
    pub fn validate(&self) -> Result<()> {
        if self.to.is_empty() {
            return Err(MailError::MissingField("to"));
        }
        if self.from.is_none() {
            return Err(MailError::MissingField("from"));
        }
        if self.subject.is_none() {
            return Err(MailError::MissingField("subject"));
        }
        Ok(())
    }
}

/// Fluent message builder, issued by [`TransportFactory::issue_draft`].
///
/// ```rust,ignore
/// let id = factory
///     .issue_draft()
///     .to("a@example.com")?
///     .from("b@example.com")?
///     .subject("Hi")?
///     .body("templates/welcome.hbs", None, json!({"name": "X"}))?
///     .await?;
/// ```
pub struct MessageBuilder {
    delegate: TransportFactory,
    draft: Draft,
    on_error: Option<ErrorHandler>,
    triggered: bool,
}

impl MessageBuilder {
    pub(crate) fn new(delegate: TransportFactory) -> Self {
        Self {
            delegate,
            draft: Draft::default(),
            on_error: None,
            triggered: false,
        }
    }

    /// The draft built so far.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    #[cfg(test)]
    pub(crate) fn delegate(&self) -> &TransportFactory {
        &self.delegate
    }

    /// Whether `body()` already started the pipeline.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Set the recipients, replacing any previous ones.
    pub fn to(&mut self, addresses: impl IntoAddresses) -> Result<&mut Self> {
        self.ensure_draft()?;
        let raw = addresses.into_addresses();
        if raw.is_empty() {
            return Err(MailError::MissingField("to"));
        }
        self.draft.to = parse_all(raw)?;
        Ok(self)
    }

    /// Set the sender.
    pub fn from(&mut self, address: impl AsRef<str>) -> Result<&mut Self> {
        self.ensure_draft()?;
        let address = address.as_ref();
        if address.trim().is_empty() {
            return Err(MailError::MissingField("from"));
        }
        self.draft.from = Some(Address::parse(address)?);
        Ok(self)
    }

    /// Set the subject line.
    pub fn subject(&mut self, subject: impl Into<String>) -> Result<&mut Self> {
        self.ensure_draft()?;
        let subject = subject.into();
        if subject.is_empty() {
            return Err(MailError::MissingField("subject"));
        }
        self.draft.subject = Some(subject);
        Ok(self)
    }

    /// Set the CC recipients. Empty input clears them.
    pub fn cc(&mut self, addresses: impl IntoAddresses) -> Result<&mut Self> {
        self.ensure_draft()?;
        self.draft.cc = parse_all(addresses.into_addresses())?;
        Ok(self)
    }

    /// Set the BCC recipients. Empty input clears them.
    pub fn bcc(&mut self, addresses: impl IntoAddresses) -> Result<&mut Self> {
        self.ensure_draft()?;
        self.draft.bcc = parse_all(addresses.into_addresses())?;
        Ok(self)
    }

    /// Set the handler called once if the pipeline fails.
    pub fn on_error<F>(&mut self, handler: F) -> Result<&mut Self>
    where
        F: Fn(&MailError) + Send + Sync + 'static,
    {
        self.ensure_draft()?;
        self.on_error = Some(Arc::new(handler));
        Ok(self)
    }

    /// Set the template, optional stylesheet and context, then start the
    /// render, inline and send pipeline.
    ///
    /// A `None` or `null` context renders against an empty object.
    pub fn body(
        &mut self,
        template: impl Into<PathBuf>,
        styles: Option<PathBuf>,
        context: impl Into<Option<Value>>,
    ) -> Result<Dispatch> {
        self.ensure_draft()?;
        self.draft.validate()?;
        let runtime =
            Handle::try_current().map_err(|e| MailError::Runtime(e.to_string()))?;

        self.draft.template = Some(template.into());
        self.draft.styles = styles;
        self.draft.context = match context.into() {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(value) => value,
        };

        debug!(
            to = ?self.draft.to,
            template = ?self.draft.template,
            styles = ?self.draft.styles,
            "Starting email pipeline"
        );

        let pipeline = Pipeline {
            draft: std::mem::take(&mut self.draft),
            delegate: self.delegate.clone(),
            on_error: self.on_error.take(),
        };
        self.triggered = true;

        Ok(pipeline.spawn_on(&runtime))
    }

    fn ensure_draft(&self) -> Result<()> {
        if self.triggered {
            Err(MailError::AlreadyTriggered)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for MessageBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBuilder")
            .field("provider", &self.delegate.provider())
            .field("draft", &self.draft)
            .field("triggered", &self.triggered)
            .finish()
    }
}
