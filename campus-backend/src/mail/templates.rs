//! Notification emails for public form submissions.

use super::EmailMessage;
use crate::models::{AlumniUpdate, ContactSubmission, EnrollmentInquiry};

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render label/value rows plus a free-text block, all escaped.
fn render(heading: &str, rows: &[(&str, &str)], body: Option<&str>) -> String {
    let mut html = format!("<h2>{}</h2>\n<table>\n", escape_html(heading));
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
            escape_html(label),
            escape_html(value)
        ));
    }
    html.push_str("</table>\n");
    if let Some(body) = body {
        html.push_str(&format!(
            "<p style=\"white-space: pre-wrap\">{}</p>\n",
            escape_html(body)
        ));
    }
    html
}

pub fn contact_notification(submission: &ContactSubmission, notify_to: &str) -> EmailMessage {
    EmailMessage {
        to: vec![notify_to.to_string()],
        subject: format!("New contact form message: {}", submission.subject),
        html: render(
            "New contact form submission",
            &[
                ("Name", submission.name.as_str()),
                ("Email", submission.email.as_str()),
                ("Subject", submission.subject.as_str()),
                ("Received", submission.created_at.as_str()),
            ],
            Some(submission.message.as_str()),
        ),
        reply_to: Some(submission.email.clone()),
    }
}

pub fn enrollment_notification(inquiry: &EnrollmentInquiry, notify_to: &str) -> EmailMessage {
    EmailMessage {
        to: vec![notify_to.to_string()],
        subject: format!("New enrollment inquiry: {}", inquiry.program),
        html: render(
            "New enrollment inquiry",
            &[
                ("Name", inquiry.name.as_str()),
                ("Email", inquiry.email.as_str()),
                ("Phone", inquiry.phone.as_deref().unwrap_or("-")),
                ("Program", inquiry.program.as_str()),
                ("Received", inquiry.created_at.as_str()),
            ],
            inquiry.message.as_deref(),
        ),
        reply_to: Some(inquiry.email.clone()),
    }
}

pub fn alumni_update_notification(update: &AlumniUpdate, notify_to: &str) -> EmailMessage {
    let year = update.graduation_year.to_string();
    EmailMessage {
        to: vec![notify_to.to_string()],
        subject: format!("Alumni update from {} (class of {})", update.name, year),
        html: render(
            "New alumni update",
            &[
                ("Name", update.name.as_str()),
                ("Email", update.email.as_str()),
                ("Class of", year.as_str()),
                ("Received", update.created_at.as_str()),
            ],
            Some(update.message.as_str()),
        ),
        reply_to: Some(update.email.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_is_escaped() {
        let submission = ContactSubmission {
            id: "1".into(),
            name: "<script>alert(1)</script>".into(),
            email: "a@b.edu".into(),
            subject: "Hi & bye".into(),
            message: "\"quoted\"".into(),
            created_at: "2025-01-01T00:00:00+00:00".into(),
        };
        let msg = contact_notification(&submission, "office@college.edu");
        assert!(!msg.html.contains("<script>"));
        assert!(msg.html.contains("&lt;script&gt;"));
        assert!(msg.html.contains("Hi &amp; bye"));
        assert!(msg.html.contains("&quot;quoted&quot;"));
        assert_eq!(msg.reply_to.as_deref(), Some("a@b.edu"));
        assert_eq!(msg.to, vec!["office@college.edu"]);
    }
}
