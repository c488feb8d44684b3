use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{derive_slug, fallback_slug, validate_media_ref, SLUG_RE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FacultyMember {
    #[validate(length(min = 1, max = 120, message = "must be between 1 and 120 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 120, message = "must be at most 120 characters"))]
    pub title: String,
}

/// A school / program page (`academics` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicProgram {
    pub id: String,
    pub school_name: String,
    pub slug: String,
    pub description: String,
    pub mission: String,
    pub courses: Vec<String>,
    pub faculty: Vec<FacultyMember>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcademicProgramInput {
    #[validate(length(min = 1, max = 150, message = "must be between 1 and 150 characters"))]
    pub school_name: String,
    #[serde(default)]
    #[validate(regex(path = "SLUG_RE", message = "must be lowercase words separated by hyphens"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    #[validate]
    pub faculty: Vec<FacultyMember>,
    #[serde(default)]
    #[validate(custom = "validate_media_ref")]
    pub image_url: Option<String>,
}

impl AcademicProgramInput {
    pub fn normalized(mut self) -> Self {
        self.school_name = self.school_name.trim().to_string();
        self.slug = super::blank_to_none(self.slug).or_else(|| derive_slug(&self.school_name));
        self.image_url = super::blank_to_none(self.image_url);
        self.courses = self
            .courses
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }

    /// Slug to store; see `NewsInput::slug_or`.
    pub fn slug_or(&self, current: Option<&str>) -> String {
        self.slug
            .clone()
            .or_else(|| derive_slug(&self.school_name))
            .or_else(|| current.map(str::to_string))
            .unwrap_or_else(|| fallback_slug("program"))
    }
}
