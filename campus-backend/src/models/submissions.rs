use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact form entry (`contact_submissions` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactInput {
    #[validate(length(min = 2, max = 120, message = "must be between 2 and 120 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 2, max = 200, message = "must be between 2 and 200 characters"))]
    pub subject: String,
    #[validate(length(min = 10, max = 5000, message = "must be between 10 and 5000 characters"))]
    pub message: String,
}

/// Admissions enquiry (`enrollment_inquiries` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentInquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub program: String,
    pub message: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnrollmentInput {
    #[validate(length(min = 2, max = 120, message = "must be between 2 and 120 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 7, max = 30, message = "must be between 7 and 30 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 150, message = "must be between 1 and 150 characters"))]
    pub program: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub message: Option<String>,
}

impl EnrollmentInput {
    pub fn normalized(mut self) -> Self {
        self.phone = super::blank_to_none(self.phone);
        self.message = super::blank_to_none(self.message);
        self
    }
}
