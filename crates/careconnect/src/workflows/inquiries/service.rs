use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{InquirySubmission, InquiryValidationError};
use crate::workflows::notifications::{
    NotificationDispatcher, NotificationError, NotificationPublisher,
};

/// Validates public contact forms and forwards them to the admin inbox.
pub struct InquiryService<P> {
    notifications: Arc<NotificationDispatcher<P>>,
}

impl<P> InquiryService<P>
where
    P: NotificationPublisher + 'static,
{
    pub fn new(notifications: Arc<NotificationDispatcher<P>>) -> Self {
        Self { notifications }
    }

    /// Returns the receipt message for the submitter.
    pub fn submit(&self, submission: &InquirySubmission) -> Result<String, InquiryError> {
        submission.validate()?;

        let envelope = self
            .notifications
            .dispatch(submission.to_notification())
            .map_err(|err| {
                warn!(kind = submission.kind(), error = %err, "inquiry notification failed");
                err
            })?;

        info!(
            kind = submission.kind(),
            recipients = envelope.to.len(),
            "inquiry forwarded to admins"
        );
        Ok(submission.receipt().to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error(transparent)]
    Invalid(#[from] InquiryValidationError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotificationConfig;
    use crate::workflows::inquiries::domain::GeneralInquiry;
    use crate::workflows::notifications::MemoryNotificationPublisher;

    fn service(
        recipients: &[&str],
    ) -> (
        InquiryService<MemoryNotificationPublisher>,
        Arc<MemoryNotificationPublisher>,
    ) {
        let publisher = Arc::new(MemoryNotificationPublisher::default());
        let config = NotificationConfig {
            admin_recipients: recipients.iter().map(|value| value.to_string()).collect(),
            sender: "desk@careconnect.example".to_string(),
        };
        let dispatcher = Arc::new(NotificationDispatcher::new(config, publisher.clone()));
        (InquiryService::new(dispatcher), publisher)
    }

    fn general(name: &str) -> InquirySubmission {
        InquirySubmission::General(GeneralInquiry {
            name: name.to_string(),
            phone: "010-5555-6666".to_string(),
            email: Some("family@example.com".to_string()),
            message: None,
        })
    }

    #[test]
    fn submit_publishes_and_returns_receipt() {
        let (service, publisher) = service(&["ops@careconnect.example"]);

        let receipt = service.submit(&general("Hyejin Oh")).expect("submitted");

        assert!(receipt.contains("received"));
        let envelopes = publisher.envelopes();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].from, "desk@careconnect.example");
        assert_eq!(
            envelopes[0].notification.reply_to.as_deref(),
            Some("family@example.com")
        );
    }

    #[test]
    fn invalid_submission_never_reaches_publisher() {
        let (service, publisher) = service(&["ops@careconnect.example"]);

        let error = service.submit(&general("  ")).expect_err("name missing");

        assert!(matches!(
            error,
            InquiryError::Invalid(InquiryValidationError::MissingField("name"))
        ));
        assert!(publisher.envelopes().is_empty());
    }

    #[test]
    fn missing_recipients_is_reported() {
        let (service, _) = service(&[]);

        let error = service.submit(&general("Hyejin Oh")).expect_err("no recipients");

        assert!(matches!(
            error,
            InquiryError::Notification(NotificationError::NoRecipients)
        ));
    }
}
