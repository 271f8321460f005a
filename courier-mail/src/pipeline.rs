//! The render, inline and dispatch pipeline.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::{Draft, MailError, MessageId, Result, SendRequest, TransportFactory};

/// Caller-supplied handler for a failed pipeline.
pub type ErrorHandler = Arc<dyn Fn(&MailError) + Send + Sync>;

/// A triggered message.
///
/// Owns its draft outright; nothing outside the pipeline can observe or
/// change it once `body()` has been called.
pub(crate) struct Pipeline {
    pub(crate) draft: Draft,
    pub(crate) delegate: TransportFactory,
    pub(crate) on_error: Option<ErrorHandler>,
}

impl Pipeline {
    /// Spawn the pipeline on `runtime`.
    pub(crate) fn spawn_on(self, runtime: &Handle) -> Dispatch {
        Dispatch {
            handle: runtime.spawn(self.run()),
        }
    }

    async fn run(self) -> Result<MessageId> {
        let Pipeline {
            draft,
            delegate,
            on_error,
        } = self;

        match deliver(draft, &delegate).await {
            Ok(message_id) => Ok(message_id),
            Err(err) => {
                error!(error = %err, provider = %delegate.provider(), "Email pipeline failed");
                if let Some(handler) = on_error {
                    handler(&err);
                }
                Err(err)
            }
        }
    }
}

async fn deliver(draft: Draft, delegate: &TransportFactory) -> Result<MessageId> {
    let html = compose(&draft, delegate).await?;
    let request = SendRequest::compose(draft, html)?;

    debug!(provider = %delegate.provider(), "Dispatching email");
    let message_id = delegate.transport().send(&request).await?;

    info!(
        message_id = %message_id,
        to = ?request.destination.to,
        "Email sent"
    );
    Ok(message_id)
}

/// Render the template and, when a stylesheet is set, inline it.
async fn compose(draft: &Draft, delegate: &TransportFactory) -> Result<String> {
    let template = draft
        .template
        .as_deref()
        .ok_or(MailError::MissingField("template"))?;

    debug!(template = %template.display(), "Rendering email template");
    let source = delegate.reader().read(template).await?;
    let html = delegate.engine().render(&source, &draft.context)?;

    let Some(styles) = draft.styles.as_deref() else {
        return Ok(html);
    };

    debug!(styles = %styles.display(), "Inlining email styles");
    let css = delegate.reader().read(styles).await?;
    delegate.inliner().inline(&html, &css)
}

/// Handle to a spawned pipeline.
///
/// Resolves to the provider message id. Dropping the handle does not stop
/// the pipeline; it always runs to completion.
#[derive(Debug)]
pub struct Dispatch {
    handle: JoinHandle<Result<MessageId>>,
}

impl Dispatch {
    /// Whether the pipeline has settled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Dispatch {
    type Output = Result<MessageId>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(e) => Err(MailError::Runtime(e.to_string())),
        })
    }
}
