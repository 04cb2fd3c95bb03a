//! # Moderator Notification
//!
//! Every queued submission produces a [`Notice`] pointing a moderator at
//! its review page. Delivery is behind the [`Notifier`] trait; the shipped
//! [`LogNotifier`] writes the notice to the tracing subscriber.

use crate::error::NotifyError;
use crate::pending::PendingEntry;

/// A message to moderators about a new submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub subject: String,
    pub body: String,
    pub review_link: String,
}

impl Notice {
    /// Notice for a freshly queued entry. `review_base` is the public base
    /// URL of the service, without a trailing slash.
    pub fn for_submission(entry: &PendingEntry, review_base: &str) -> Self {
        let review_link = format!(
            "{}/pending/{}/{}",
            review_base.trim_end_matches('/'),
            entry.kind,
            entry.id
        );
        let subject = format!(
            "Suggested {} : {}",
            entry.kind,
            entry.record_id().unwrap_or_default()
        );

        let mut lines = Vec::new();
        if let Some(email) = &entry.submitter.email {
            lines.push(format!("Submitted by: {email}"));
        }
        if let Some(reason) = &entry.submitter.reason {
            lines.push(format!("Reason given: {reason}"));
        }
        lines.push(format!("Review the details and take action: {review_link}"));

        Self {
            subject,
            body: lines.join("\n"),
            review_link,
        }
    }
}

/// Delivers notices to moderators.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError>;
}

/// Writes notices to the log instead of sending mail.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    recipient: Option<String>,
}

impl LogNotifier {
    pub fn new(recipient: Option<String>) -> Self {
        Self { recipient }
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        tracing::info!(
            recipient = self.recipient.as_deref().unwrap_or("<unset>"),
            subject = %notice.subject,
            link = %notice.review_link,
            "moderation notice"
        );
        tracing::debug!(body = %notice.body, "moderation notice body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::EntityKind;
    use crate::pending::Submitter;
    use bbc_core::{Record, RecordValue};

    fn entry(submitter: Submitter) -> PendingEntry {
        let mut record = Record::new();
        record.insert("name", RecordValue::text("Fake App!"));
        record.insert("id", RecordValue::text("fake-app"));
        PendingEntry::new(EntityKind::App, record, submitter)
    }

    #[test]
    fn subject_names_kind_and_identifier() {
        let notice = Notice::for_submission(&entry(Submitter::default()), "https://api.example.org/");
        assert_eq!(notice.subject, "Suggested apps : fake-app");
        assert!(notice.review_link.starts_with("https://api.example.org/pending/apps/"));
        assert!(notice.body.ends_with(&notice.review_link));
    }

    #[test]
    fn body_includes_submitter_details_when_given() {
        let notice = Notice::for_submission(
            &entry(Submitter {
                email: Some("example@example.com".into()),
                reason: Some("I work for the company".into()),
            }),
            "http://localhost:5000",
        );
        let lines: Vec<_> = notice.body.lines().collect();
        assert_eq!(lines[0], "Submitted by: example@example.com");
        assert_eq!(lines[1], "Reason given: I work for the company");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn log_notifier_never_fails() {
        let notice = Notice::for_submission(&entry(Submitter::default()), "");
        assert!(LogNotifier::new(None).notify(&notice).is_ok());
    }
}
