//! Email transport trait and the provider request shape.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Draft, MailError, Result};

/// Email transport trait.
///
/// One handle is shared by every builder a factory issues, so
/// implementations must tolerate concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request, returning the provider's message id.
    async fn send(&self, request: &SendRequest) -> Result<MessageId>;

    /// Check if the transport is healthy.
    async fn is_healthy(&self) -> bool {
        true
    }
}

/// Provider-assigned message id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Wrap a provider id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully composed message, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendRequest {
    /// Sender address.
    pub source: String,
    /// Recipients.
    pub destination: Destination,
    /// Subject and body.
    pub message: Message,
}

/// Recipient lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    /// To recipients.
    #[serde(rename = "ToAddresses")]
    pub to: Vec<String>,
    /// CC recipients.
    #[serde(rename = "CcAddresses")]
    pub cc: Vec<String>,
    /// BCC recipients.
    #[serde(rename = "BccAddresses")]
    pub bcc: Vec<String>,
}

/// Message subject and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    /// Subject line.
    pub subject: Content,
    /// Message body.
    pub body: Body,
}

/// Message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    /// HTML part.
    pub html: Content,
}

/// Text with its charset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    /// The text.
    pub data: String,
    /// Charset of `data`.
    pub charset: String,
}

impl Content {
    fn new(data: impl Into<String>, charset: &str) -> Self {
        Self {
            data: data.into(),
            charset: charset.to_string(),
        }
    }
}

impl SendRequest {
    /// Assemble a request from a draft and its final HTML body.
    pub(crate) fn compose(draft: Draft, html: String) -> Result<Self> {
        let source = draft.from.ok_or(MailError::MissingField("from"))?;
        let subject = draft.subject.ok_or(MailError::MissingField("subject"))?;

        Ok(Self {
            source: source.into(),
            destination: Destination {
                to: draft.to.into_iter().map(String::from).collect(),
                cc: draft.cc.into_iter().map(String::from).collect(),
                bcc: draft.bcc.into_iter().map(String::from).collect(),
            },
            message: Message {
                subject: Content::new(subject, draft.charset),
                body: Body {
                    html: Content::new(html, draft.charset),
                },
            },
        })
    }
}
