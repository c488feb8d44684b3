use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_media_ref;

/// A featured alumni story (`alumni_stories` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniStory {
    pub id: String,
    pub name: String,
    pub graduation_year: i32,
    pub headline: String,
    pub story: String,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlumniStoryInput {
    #[validate(length(min = 1, max = 120, message = "must be between 1 and 120 characters"))]
    pub name: String,
    #[validate(range(min = 1900, max = 2100, message = "must be a four-digit year"))]
    pub graduation_year: i32,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub headline: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub story: String,
    #[serde(default)]
    #[validate(custom = "validate_media_ref")]
    pub image_url: Option<String>,
}

impl AlumniStoryInput {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.image_url = super::blank_to_none(self.image_url);
        self
    }
}

/// A "share your news" submission from a graduate (`alumni_updates` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniUpdate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub graduation_year: i32,
    pub message: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlumniUpdateInput {
    #[validate(length(min = 1, max = 120, message = "must be between 1 and 120 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(range(min = 1900, max = 2100, message = "must be a four-digit year"))]
    pub graduation_year: i32,
    #[validate(length(min = 10, max = 5000, message = "must be between 10 and 5000 characters"))]
    pub message: String,
}
