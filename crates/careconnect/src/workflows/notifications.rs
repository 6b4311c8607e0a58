//! Admin notifications shared by inquiry intake and the recommendation flow.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::NotificationConfig;

/// One labelled line of a notification body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationField {
    pub label: String,
    pub value: String,
}

/// Transport independent notification content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub template: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub fields: Vec<NotificationField>,
}

impl Notification {
    pub fn new(template: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subject: subject.into(),
            reply_to: None,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(NotificationField {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn reply_to(mut self, address: Option<String>) -> Self {
        self.reply_to = address;
        self
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }

    pub fn render_text(&self) -> String {
        let mut body = format!("{}\n", self.subject);
        for field in &self.fields {
            body.push_str(&format!("{}: {}\n", field.label, field.value));
        }
        body
    }
}

/// Addressed notification handed to a publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub from: String,
    pub to: Vec<String>,
    pub notification: Notification,
}

/// Outbound delivery hook (e-mail, chat, log).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, envelope: &Envelope) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("no admin recipients are configured")]
    NoRecipients,
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Addresses notifications to the configured admins before publishing them.
pub struct NotificationDispatcher<P> {
    config: NotificationConfig,
    publisher: Arc<P>,
}

impl<P> NotificationDispatcher<P>
where
    P: NotificationPublisher + 'static,
{
    pub fn new(config: NotificationConfig, publisher: Arc<P>) -> Self {
        Self { config, publisher }
    }

    pub fn has_recipients(&self) -> bool {
        !self.config.admin_recipients.is_empty()
    }

    pub fn dispatch(&self, notification: Notification) -> Result<Envelope, NotificationError> {
        if !self.has_recipients() {
            return Err(NotificationError::NoRecipients);
        }

        let envelope = Envelope {
            from: self.config.sender.clone(),
            to: self.config.admin_recipients.clone(),
            notification,
        };
        self.publisher.publish(&envelope)?;
        Ok(envelope)
    }
}

/// Publisher that writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationPublisher;

impl NotificationPublisher for LogNotificationPublisher {
    fn publish(&self, envelope: &Envelope) -> Result<(), NotificationError> {
        info!(
            template = %envelope.notification.template,
            from = %envelope.from,
            recipients = envelope.to.len(),
            subject = %envelope.notification.subject,
            body = %envelope.notification.render_text(),
            "admin notification dispatched"
        );
        Ok(())
    }
}

/// Keeps every published envelope in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotificationPublisher {
    envelopes: Arc<Mutex<Vec<Envelope>>>,
}

impl MemoryNotificationPublisher {
    pub fn envelopes(&self) -> Vec<Envelope> {
        self.envelopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationPublisher for MemoryNotificationPublisher {
    fn publish(&self, envelope: &Envelope) -> Result<(), NotificationError> {
        let mut envelopes = self.envelopes.lock().map_err(|_| {
            NotificationError::Transport("in-memory outbox poisoned".to_string())
        })?;
        envelopes.push(envelope.clone());
        Ok(())
    }
}
