use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_date, validate_media_ref};

/// An open position on the careers page, shown in `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub image_url: Option<String>,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingInput {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(custom = "validate_date")]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(custom = "validate_media_ref")]
    pub image_url: Option<String>,
}

impl JobPostingInput {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.image_url = super::blank_to_none(self.image_url);
        self
    }
}
