use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{derive_slug, fallback_slug, validate_date, validate_media_ref, SLUG_RE};

/// A news article (`news` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub date: String,
    pub category: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Admin form payload for creating or editing an article.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewsInput {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    /// Derived from the title when omitted.
    #[serde(default)]
    #[validate(regex(path = "SLUG_RE", message = "must be lowercase words separated by hyphens"))]
    pub slug: Option<String>,
    #[validate(custom = "validate_date")]
    pub date: String,
    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub category: String,
    #[validate(length(min = 1, max = 500, message = "must be between 1 and 500 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[serde(default)]
    #[validate(custom = "validate_media_ref")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl NewsInput {
    /// Trim form noise and fill in the slug.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.category = self.category.trim().to_string();
        self.slug = super::blank_to_none(self.slug).or_else(|| derive_slug(&self.title));
        self.image_url = super::blank_to_none(self.image_url);
        self
    }

    /// Slug to store. When the title yields none, an edit keeps `current` and
    /// a new article gets a generated one.
    pub fn slug_or(&self, current: Option<&str>) -> String {
        self.slug
            .clone()
            .or_else(|| derive_slug(&self.title))
            .or_else(|| current.map(str::to_string))
            .unwrap_or_else(|| fallback_slug("news"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewsInput {
        NewsInput {
            title: "  Open House Weekend ".into(),
            slug: Some("".into()),
            date: "2025-04-12".into(),
            category: "Events".into(),
            description: "Tour the campus".into(),
            content: "Join us".into(),
            image_url: Some(" ".into()),
            is_featured: false,
        }
    }

    #[test]
    fn test_normalized_derives_slug_and_drops_blank_image() {
        let n = input().normalized();
        assert_eq!(n.title, "Open House Weekend");
        assert_eq!(n.slug.as_deref(), Some("open-house-weekend"));
        assert_eq!(n.image_url, None);
        assert!(n.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_slug_and_date() {
        let mut n = input().normalized();
        n.slug = Some("Not A Slug".into());
        n.date = "12/04/2025".into();
        let errs = n.validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("slug"));
        assert!(fields.contains_key("date"));
    }

    #[test]
    fn test_non_latin_title_passes_validation() {
        let mut n = input();
        n.title = "日本語ニュース".into();
        let n = n.normalized();
        assert_eq!(n.slug, None);
        assert!(n.validate().is_ok());
        assert!(n.slug_or(None).starts_with("news-"));
        assert_eq!(n.slug_or(Some("open-day")), "open-day");
    }

    #[test]
    fn test_deserializes_camel_case_form() {
        let n: NewsInput = serde_json::from_value(serde_json::json!({
            "title": "T",
            "date": "2025-01-01",
            "category": "C",
            "description": "D",
            "content": "X",
            "imageUrl": "/media/news-images/a.png",
            "isFeatured": true
        }))
        .unwrap();
        assert!(n.is_featured);
        assert_eq!(n.image_url.as_deref(), Some("/media/news-images/a.png"));
    }
}
