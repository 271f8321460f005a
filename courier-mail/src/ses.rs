//! AWS SES email provider integration.

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    types::{Body, Content, Destination, EmailContent, Message},
};
use std::fmt;
use tracing::{debug, error};

use crate::{MailError, MessageId, Result, SendRequest, Transport};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS SES configuration.
#[derive(Clone)]
pub struct SesConfig {
    /// AWS access key id.
    pub access_key: String,
    /// AWS secret access key.
    pub secret_key: String,
    /// AWS region.
    pub region: String,
}

impl SesConfig {
    /// Create a new SES configuration.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: DEFAULT_REGION.to_string(),
        }
    }

    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

impl fmt::Debug for SesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SesConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

/// AWS SES transport.
pub struct SesTransport {
    client: Client,
}

impl SesTransport {
    /// Create a new SES transport with static credentials.
    pub fn new(config: SesConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key,
            config.secret_key,
            None,
            None,
            "courier",
        );

        let ses_config = aws_sdk_sesv2::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            .build();

        Self {
            client: Client::from_conf(ses_config),
        }
    }
}

fn content(data: &str, charset: &str) -> Result<Content> {
    Content::builder()
        .data(data)
        .charset(charset)
        .build()
        .map_err(|e| MailError::Provider(e.to_string()))
}

#[async_trait]
impl Transport for SesTransport {
    async fn send(&self, request: &SendRequest) -> Result<MessageId> {
        debug!(
            to = ?request.destination.to,
            subject = %request.message.subject.data,
            "Sending email via AWS SES"
        );

        let destination = Destination::builder()
            .set_to_addresses(Some(request.destination.to.clone()))
            .set_cc_addresses(Some(request.destination.cc.clone()))
            .set_bcc_addresses(Some(request.destination.bcc.clone()))
            .build();

        let subject = &request.message.subject;
        let html = &request.message.body.html;

        let message = Message::builder()
            .subject(content(&subject.data, &subject.charset)?)
            .body(Body::builder().html(content(&html.data, &html.charset)?).build())
            .build();

        let response = self
            .client
            .send_email()
            .from_email_address(&request.source)
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "AWS SES send failed");
                MailError::Provider(e.to_string())
            })?;

        let message_id = response
            .message_id()
            .map(MessageId::new)
            .ok_or_else(|| MailError::Provider("SES returned no message id".to_string()))?;

        debug!(message_id = %message_id, "Email sent successfully via AWS SES");
        Ok(message_id)
    }

    async fn is_healthy(&self) -> bool {
        self.client.get_account().send().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_region() {
        let config = SesConfig::new("AKIA", "secret");
        assert_eq!(config.region, DEFAULT_REGION);

        let config = config.region("eu-west-1");
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = SesConfig::new("AKIA", "very-secret");
        assert!(!format!("{:?}", config).contains("very-secret"));
    }

    #[test]
    fn test_content_builder() {
        let built = content("Hi", "utf-8").unwrap();
        assert_eq!(built.data(), "Hi");
        assert_eq!(built.charset(), Some("utf-8"));
    }

    #[tokio::test]
    async fn test_transport_builds_without_network() {
        let transport = SesTransport::new(SesConfig::new("AKIA", "secret").region("eu-west-1"));
        assert_eq!(
            transport.client.config().region().map(|r| r.as_ref()),
            Some("eu-west-1")
        );
    }
}
