use super::{validated, Actions};
use crate::error::ActionError;
use crate::models::{NewsInput, NewsItem};

fn news_paths(slug: &str) -> [String; 3] {
    ["/".to_string(), "/news".to_string(), format!("/news/{}", slug)]
}

impl Actions {
    pub async fn create_news(&self, input: NewsInput) -> Result<NewsItem, ActionError> {
        let input = validated(input.normalized())?;
        let item = self.db.insert_news(&input)?;
        log::info!("[NEWS] Created '{}' (featured: {})", item.slug, item.is_featured);
        self.revalidate(news_paths(&item.slug));
        Ok(item)
    }

    pub async fn update_news(&self, id: &str, input: NewsInput) -> Result<NewsItem, ActionError> {
        let input = validated(input.normalized())?;
        let replaced = self
            .db
            .update_news(id, &input)?
            .ok_or_else(|| ActionError::NotFound("Article".to_string()))?;

        self.cleanup_replaced_image(
            replaced.before.image_url.as_deref(),
            replaced.after.image_url.as_deref(),
        )
        .await;

        let mut paths = news_paths(&replaced.after.slug).to_vec();
        if replaced.before.slug != replaced.after.slug {
            paths.push(format!("/news/{}", replaced.before.slug));
        }
        self.revalidate(paths);
        log::info!("[NEWS] Updated '{}'", replaced.after.slug);
        Ok(replaced.after)
    }

    /// Remove the article, then its image. An image that cannot be deleted is
    /// left behind and does not fail the action.
    pub async fn delete_news(&self, id: &str) -> Result<NewsItem, ActionError> {
        let removed = self
            .db
            .delete_news(id)?
            .ok_or_else(|| ActionError::NotFound("Article".to_string()))?;
        self.cleanup_replaced_image(removed.image_url.as_deref(), None).await;
        self.revalidate(news_paths(&removed.slug));
        log::info!("[NEWS] Deleted '{}'", removed.slug);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{harness, harness_with};
    use crate::mail::test_support::FakeMailer;
    use crate::models::NewsInput;
    use crate::storage::test_support::RecordingStore;
    use serde_json::json;

    fn article(title: &str, featured: bool) -> NewsInput {
        NewsInput {
            title: title.to_string(),
            slug: None,
            date: "2025-03-10".to_string(),
            category: "Campus".to_string(),
            description: "Summary".to_string(),
            content: "Full text".to_string(),
            image_url: Some(format!("/media/news-images/{}.png", title.to_lowercase())),
            is_featured: featured,
        }
    }

    #[tokio::test]
    async fn test_featuring_an_article_unfeatures_the_previous_one() {
        let h = harness();
        let first = h.actions.create_news(article("First", true)).await.unwrap();
        let second = h.actions.create_news(article("Second", true)).await.unwrap();

        assert_eq!(h.actions.db.count_featured_news().unwrap(), 1);
        let featured = h.actions.db.get_featured_news().unwrap().unwrap();
        assert_eq!(featured.id, second.id);

        // Re-featuring the first via update flips it back.
        h.actions.update_news(&first.id, article("First", true)).await.unwrap();
        assert_eq!(h.actions.db.count_featured_news().unwrap(), 1);
        assert_eq!(h.actions.db.get_featured_news().unwrap().unwrap().id, first.id);
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_image_delete_fails() {
        let h = harness_with(RecordingStore::new(true), FakeMailer::ok());
        let item = h.actions.create_news(article("Gala", false)).await.unwrap();

        let removed = h.actions.delete_news(&item.id).await.unwrap();
        assert_eq!(removed.id, item.id);
        assert!(h.actions.db.get_news(&item.id).unwrap().is_none());
        assert_eq!(h.store.deleted(), vec!["news-images/gala.png".to_string()]);
    }

    #[tokio::test]
    async fn test_update_removes_replaced_image_only() {
        let h = harness();
        let item = h.actions.create_news(article("Fair", false)).await.unwrap();

        // Same image: nothing deleted.
        h.actions.update_news(&item.id, article("Fair", false)).await.unwrap();
        assert!(h.store.deleted().is_empty());

        let mut edit = article("Fair", false);
        edit.image_url = Some("/media/news-images/fair-v2.png".to_string());
        h.actions.update_news(&item.id, edit).await.unwrap();
        assert_eq!(h.store.deleted(), vec!["news-images/fair.png".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_input_is_a_validation_error_and_writes_nothing() {
        let h = harness();
        let mut bad = article("Bad", false);
        bad.date = "yesterday".to_string();
        let err = h.actions.create_news(bad).await.unwrap_err();
        assert!(err.is_validation());
        assert!(h.actions.db.list_news(None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_revalidate_cached_pages() {
        let h = harness();
        h.actions.cache.insert("/news", json!([]));
        h.actions.cache.insert("/news/old-title", json!({}));
        h.actions.cache.insert("/careers", json!([]));

        let item = h.actions.create_news(article("Old Title", false)).await.unwrap();
        assert!(h.actions.cache.get("/news").is_none());

        h.actions.cache.insert("/news/old-title", json!({}));
        h.actions.update_news(&item.id, article("New Title", false)).await.unwrap();
        assert!(h.actions.cache.get("/news/old-title").is_none());
        assert!(h.actions.cache.get("/careers").is_some());
    }

    #[tokio::test]
    async fn test_missing_article_is_not_found() {
        let h = harness();
        let err = h.actions.delete_news("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Article not found");
    }
}
