use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::Actions;
use crate::error::ActionError;

/// Keys under `siteContent/` (`homepage`, `admissions`, `scholarships`, ...).
static SITE_CONTENT_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_-]{1,64}$").expect("valid key regex"));

fn check_key(key: &str) -> Result<(), ActionError> {
    if SITE_CONTENT_KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(ActionError::Validation(format!("Invalid content key: {}", key)))
    }
}

/// Page that renders a content document. `homepage` is the site root.
pub fn content_page_path(key: &str) -> String {
    match key {
        "homepage" => "/".to_string(),
        other => format!("/{}", other.replace('_', "-")),
    }
}

impl Actions {
    pub fn get_site_content(&self, key: &str) -> Result<Value, ActionError> {
        check_key(key)?;
        self.db
            .get_site_content(key)?
            .ok_or_else(|| ActionError::NotFound(format!("Content '{}'", key)))
    }

    /// Replace the whole document under `key`. Only JSON objects are stored.
    pub async fn put_site_content(&self, key: &str, document: Value) -> Result<Value, ActionError> {
        check_key(key)?;
        if !document.is_object() {
            return Err(ActionError::Validation(
                "Content must be a JSON object".to_string(),
            ));
        }
        self.db.put_site_content(key, &document)?;
        log::info!("[CONTENT] Saved siteContent/{}", key);
        self.revalidate(["/".to_string(), content_page_path(key)]);
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::harness;
    use super::content_page_path;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_then_get() {
        let h = harness();
        let doc = json!({ "hero": { "title": "Apply now" }, "deadlines": ["Mar 1"] });
        h.actions.put_site_content("admissions", doc.clone()).await.unwrap();
        assert_eq!(h.actions.get_site_content("admissions").unwrap(), doc);
    }

    #[tokio::test]
    async fn test_rejects_bad_keys_and_non_objects() {
        let h = harness();
        assert!(h.actions.put_site_content("../etc", json!({})).await.unwrap_err().is_validation());
        assert!(h.actions.put_site_content("homepage", json!([1, 2])).await.unwrap_err().is_validation());
        assert_eq!(
            h.actions.get_site_content("scholarships").unwrap_err().to_string(),
            "Content 'scholarships' not found"
        );
    }

    #[test]
    fn test_page_path() {
        assert_eq!(content_page_path("homepage"), "/");
        assert_eq!(content_page_path("student_life"), "/student-life");
        assert_eq!(content_page_path("admissions"), "/admissions");
    }
}
