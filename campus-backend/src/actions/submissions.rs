use super::{validated, Actions};
use crate::error::ActionError;
use crate::mail::templates;
use crate::models::{ContactInput, ContactSubmission, EnrollmentInput, EnrollmentInquiry};

impl Actions {
    /// Store a contact form message and notify the office. Succeeds only if
    /// both the write and the email do; a stored row is kept either way.
    pub async fn submit_contact(&self, input: ContactInput) -> Result<ContactSubmission, ActionError> {
        let input = validated(input)?;
        let submission = self.db.insert_contact_submission(&input)?;
        log::info!("[CONTACT] Stored submission {}", submission.id);

        let message = templates::contact_notification(&submission, &self.notify_to);
        if let Err(e) = self.mailer.send(message).await {
            log::error!("[CONTACT] Notification for {} failed: {}", submission.id, e);
            return Err(e);
        }
        Ok(submission)
    }

    pub async fn submit_enrollment(
        &self,
        input: EnrollmentInput,
    ) -> Result<EnrollmentInquiry, ActionError> {
        let input = validated(input.normalized())?;
        let inquiry = self.db.insert_enrollment_inquiry(&input)?;
        log::info!("[ENROLLMENT] Stored inquiry {} for '{}'", inquiry.id, inquiry.program);

        let message = templates::enrollment_notification(&inquiry, &self.notify_to);
        if let Err(e) = self.mailer.send(message).await {
            log::error!("[ENROLLMENT] Notification for {} failed: {}", inquiry.id, e);
            return Err(e);
        }
        Ok(inquiry)
    }

    pub fn list_contact_submissions(&self) -> Result<Vec<ContactSubmission>, ActionError> {
        self.db.list_contact_submissions()
    }

    pub fn list_enrollment_inquiries(&self) -> Result<Vec<EnrollmentInquiry>, ActionError> {
        self.db.list_enrollment_inquiries()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{harness, harness_with};
    use crate::error::ActionError;
    use crate::mail::test_support::FakeMailer;
    use crate::models::{ContactInput, EnrollmentInput};
    use crate::storage::test_support::RecordingStore;

    fn contact() -> ContactInput {
        ContactInput {
            name: "Sam Rivera".to_string(),
            email: "sam@example.com".to_string(),
            subject: "Campus tour".to_string(),
            message: "Can I visit next Friday?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_contact_sends_notification() {
        let h = harness();
        let stored = h.actions.submit_contact(contact()).await.unwrap();
        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["office@college.edu"]);
        assert_eq!(sent[0].reply_to.as_deref(), Some("sam@example.com"));
        assert_eq!(h.actions.list_contact_submissions().unwrap()[0].id, stored.id);
    }

    #[tokio::test]
    async fn test_email_failure_fails_submission_with_api_message() {
        let h = harness_with(
            RecordingStore::new(false),
            FakeMailer::failing("The from address is not verified"),
        );
        let err = h.actions.submit_contact(contact()).await.unwrap_err();
        assert!(matches!(err, ActionError::Mail(_)));
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "The from address is not verified");
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_db_or_mailer() {
        let h = harness();
        let mut input = contact();
        input.email = "not-an-email".to_string();
        assert!(h.actions.submit_contact(input).await.unwrap_err().is_validation());
        assert!(h.mailer.sent().is_empty());
        assert!(h.actions.list_contact_submissions().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enrollment_blank_optionals_are_dropped() {
        let h = harness();
        let inquiry = h
            .actions
            .submit_enrollment(EnrollmentInput {
                name: "Ari".to_string(),
                email: "ari@example.com".to_string(),
                phone: Some("  ".to_string()),
                program: "Nursing".to_string(),
                message: Some(String::new()),
            })
            .await
            .unwrap();
        assert_eq!(inquiry.phone, None);
        assert_eq!(inquiry.message, None);
        assert!(h.mailer.sent()[0].subject.contains("Nursing"));
    }
}
