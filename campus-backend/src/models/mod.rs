//! Content records and the validated inputs that create them.

mod academics;
mod alumni;
mod careers;
mod news;
mod sections;
mod session;
mod submissions;

pub use academics::{AcademicProgram, AcademicProgramInput, FacultyMember};
pub use alumni::{AlumniStory, AlumniStoryInput, AlumniUpdate, AlumniUpdateInput};
pub use careers::{JobPosting, JobPostingInput};
pub use news::{NewsInput, NewsItem};
pub use sections::{SectionKind, SiteSection, SiteSectionInput};
pub use session::Session;
pub use submissions::{ContactInput, ContactSubmission, EnrollmentInput, EnrollmentInquiry};

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

pub(crate) static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Lowercase, ASCII-only, hyphen-separated form of a title.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// `slugify`, or `None` when the title has no ASCII letters or digits.
pub(crate) fn derive_slug(title: &str) -> Option<String> {
    let slug = slugify(title);
    if slug.is_empty() { None } else { Some(slug) }
}

/// Random slug for titles that [`derive_slug`] cannot handle (`news-3f9c2a1b`).
pub(crate) fn fallback_slug(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &id[..8])
}

/// `YYYY-MM-DD`
pub(crate) fn validate_date(value: &str) -> Result<(), ValidationError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("date");
            err.message = Some("must be a date in YYYY-MM-DD format".into());
            err
        })
}

/// Stored media is referenced either by absolute URL or site-relative path.
pub(crate) fn validate_media_ref(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") || value.starts_with('/') {
        Ok(())
    } else {
        let mut err = ValidationError::new("media_ref");
        err.message = Some("must be an absolute URL or a path starting with '/'".into());
        Err(err)
    }
}

/// Empty strings from HTML forms mean "no value".
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
