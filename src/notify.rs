//! Best-effort notification to the chatbot service after a catalog write.
//!
//! Uses `ureq` for a synchronous POST with a timeout. Callers log failures
//! and move on; nothing is retried or queued.

use std::sync::Arc;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ServerConfig;

/// Errors from delivering a catalog-change notification.
#[derive(Debug, Error, Diagnostic)]
pub enum NotifyError {
    #[error("notification endpoint {url} answered HTTP {status}")]
    #[diagnostic(
        code(bookstore::notify::status),
        help("The chatbot service rejected the notification. Check its logs.")
    )]
    Status { url: String, status: u16 },

    #[error("notification to {url} failed: {message}")]
    #[diagnostic(
        code(bookstore::notify::transport),
        help(
            "The chatbot service could not be reached. Check that it is running \
             and that `notify_url` is correct, or set `notify_enabled = false`."
        )
    )]
    Transport { url: String, message: String },
}

/// Receives a signal whenever a book has been written to the catalog.
pub trait Notifier: Send + Sync {
    fn notify_book_saved(&self, id: &str) -> Result<(), NotifyError>;
}

/// Notifier that does nothing, for when the chatbot integration is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify_book_saved(&self, _id: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// POSTs `{"event":"book_saved","id":...}` to a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    url: String,
    agent: ureq::Agent,
}

impl HttpNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            url: url.into(),
            agent,
        }
    }
}

impl Notifier for HttpNotifier {
    fn notify_book_saved(&self, id: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({ "event": "book_saved", "id": id });
        match self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_json(body)
        {
            Ok(response) => {
                tracing::debug!(url = %self.url, status = response.status(), "chatbot notified");
                Ok(())
            }
            Err(ureq::Error::Status(status, _)) => Err(NotifyError::Status {
                url: self.url.clone(),
                status,
            }),
            Err(ureq::Error::Transport(transport)) => Err(NotifyError::Transport {
                url: self.url.clone(),
                message: transport.to_string(),
            }),
        }
    }
}

/// The notifier described by `config`: HTTP when enabled, otherwise a no-op.
pub fn notifier_from_config(config: &ServerConfig) -> Arc<dyn Notifier> {
    if config.notify_enabled {
        Arc::new(HttpNotifier::new(&config.notify_url, config.notify_timeout()))
    } else {
        Arc::new(NoopNotifier)
    }
}

/// Deliver a notification, logging instead of returning any failure.
pub fn notify_best_effort(notifier: &dyn Notifier, id: &str) {
    if let Err(e) = notifier.notify_book_saved(id) {
        tracing::warn!(error = %e, id = %id, "chatbot notification failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_always_succeeds() {
        assert!(NoopNotifier.notify_book_saved("b1").is_ok());
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on loopback is closed on test machines.
        let notifier = HttpNotifier::new("http://127.0.0.1:9/reload", Duration::from_secs(2));
        let err = notifier.notify_book_saved("b1").unwrap_err();
        assert!(matches!(err, NotifyError::Transport { .. }));
    }

    #[test]
    fn config_selects_notifier() {
        let mut config = ServerConfig {
            notify_url: "http://127.0.0.1:9/reload".into(),
            notify_timeout_secs: 2,
            ..ServerConfig::default()
        };
        assert!(notifier_from_config(&config).notify_book_saved("b1").is_err());

        config.notify_enabled = false;
        assert!(notifier_from_config(&config).notify_book_saved("b1").is_ok());
    }

    #[test]
    fn best_effort_swallows_failures() {
        let notifier = HttpNotifier::new("http://127.0.0.1:9/reload", Duration::from_secs(2));
        notify_best_effort(&notifier, "b1");
    }
}
