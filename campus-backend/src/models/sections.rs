use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use validator::Validate;

use super::validate_media_ref;

/// Which ordered list under `siteContent/` a section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SectionKind {
    /// Channel tiles on the homepage.
    HomepageChannels,
    StudentLife,
}

impl SectionKind {
    /// Public route whose rendering depends on this list.
    pub fn page_path(&self) -> &'static str {
        match self {
            SectionKind::HomepageChannels => "/",
            SectionKind::StudentLife => "/student-life",
        }
    }
}

/// HomepageChannelItem / StudentLifeSection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSection {
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SiteSectionInput {
    #[validate(length(min = 1, max = 150, message = "must be between 1 and 150 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(custom = "validate_media_ref")]
    pub image_url: Option<String>,
}

impl SiteSectionInput {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.image_url = super::blank_to_none(self.image_url);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_section_kind_round_trips_through_path_segment() {
        assert_eq!(SectionKind::from_str("student_life").unwrap(), SectionKind::StudentLife);
        assert_eq!(SectionKind::HomepageChannels.to_string(), "homepage_channels");
        assert!(SectionKind::from_str("alumni").is_err());
    }
}
