// ✉️ Contact Form - business services enquiry
// Validates required fields and records the submission locally. Nothing is
// sent anywhere.

use crate::errors::{HubError, Result};
use crate::notify::Notification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    /// Service of interest (free text / service id)
    pub service: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Required fields that are still blank, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.message.trim().is_empty() {
            missing.push("message");
        }
        missing
    }

    /// Validate and submit. On success the form is cleared; on failure it is
    /// left untouched so the user can correct it.
    pub fn submit(&mut self) -> Result<(ContactSubmission, Notification)> {
        if let Some(field) = self.missing_fields().first() {
            tracing::warn!(field = *field, "contact form incomplete");
            return Err(HubError::validation(field, "is required"));
        }

        let form = std::mem::take(self);
        let submission = ContactSubmission {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: non_blank(form.phone),
            company: non_blank(form.company),
            service: non_blank(form.service),
            message: form.message.trim().to_string(),
        };

        tracing::info!(id = %submission.id, "contact enquiry received");

        let notification = Notification::info(
            "Message Sent Successfully!",
            "We'll contact you within 2 hours during business hours",
        )
        .with_duration(5);

        Ok((submission, notification))
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
