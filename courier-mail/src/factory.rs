//! Transport selection and message issuing.

use std::sync::Arc;
use tracing::info;

use crate::{
    CssInliner, FsReader, HandlebarsEngine, MailError, MessageBuilder, Provider, ProviderConfig,
    ResourceReader, Result, SesConfig, SesTransport, StyleInliner, TemplateEngine, Transport,
};

/// Owns one validated transport handle and issues message builders bound
/// to it.
///
/// Cloning is cheap; clones share the same transport handle.
#[derive(Clone)]
pub struct TransportFactory {
    provider: Provider,
    transport: Arc<dyn Transport>,
    reader: Arc<dyn ResourceReader>,
    engine: Arc<dyn TemplateEngine>,
    inliner: Arc<dyn StyleInliner>,
}

impl TransportFactory {
    /// Validate `config` and build the transport for its provider.
    ///
    /// Fails without building anything if the configuration is absent,
    /// names an unsupported provider, or lacks that provider's credentials.
    pub fn new(config: Option<ProviderConfig>) -> Result<Self> {
        let config = config.ok_or(MailError::ConfigRequired)?;
        let provider = config.provider()?;
        let transport = connect(provider, &config)?;

        info!(provider = %provider, "Email transport ready");
        Ok(Self::from_parts(provider, transport))
    }

    /// Use an already constructed transport for `provider`.
    pub fn with_transport(provider: Provider, transport: impl Transport + 'static) -> Self {
        Self::from_parts(provider, Arc::new(transport))
    }

    fn from_parts(provider: Provider, transport: Arc<dyn Transport>) -> Self {
        Self {
            provider,
            transport,
            reader: Arc::new(FsReader),
            engine: Arc::new(HandlebarsEngine::new()),
            inliner: Arc::new(CssInliner),
        }
    }

    /// Replace the resource reader.
    pub fn with_reader(mut self, reader: impl ResourceReader + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    /// Replace the template engine.
    pub fn with_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Replace the style inliner.
    pub fn with_inliner(mut self, inliner: impl StyleInliner + 'static) -> Self {
        self.inliner = Arc::new(inliner);
        self
    }

    /// Start a new message.
    pub fn issue_draft(&self) -> MessageBuilder {
        MessageBuilder::new(self.clone())
    }

    /// The selected provider.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Check if the transport is healthy.
    pub async fn is_healthy(&self) -> bool {
        self.transport.is_healthy().await
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub(crate) fn reader(&self) -> &dyn ResourceReader {
        self.reader.as_ref()
    }

    pub(crate) fn engine(&self) -> &dyn TemplateEngine {
        self.engine.as_ref()
    }

    pub(crate) fn inliner(&self) -> &dyn StyleInliner {
        self.inliner.as_ref()
    }
}

impl std::fmt::Debug for TransportFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportFactory")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// Build the transport for `provider` from `config`.
fn connect(provider: Provider, config: &ProviderConfig) -> Result<Arc<dyn Transport>> {
    match provider {
        Provider::AmazonSes => {
            let (Some(access_key), Some(secret_key)) = (config.access_key(), config.secret_key())
            else {
                return Err(MailError::MissingCredentials { provider });
            };

            let mut ses = SesConfig::new(access_key, secret_key);
            if let Some(region) = config.region_name() {
                ses = ses.region(region);
            }
            Ok(Arc::new(SesTransport::new(ses)))
        }
    }
}
