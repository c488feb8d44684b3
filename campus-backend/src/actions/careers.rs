use super::{validated, Actions};
use crate::error::ActionError;
use crate::models::{JobPosting, JobPostingInput};

const CAREERS_PATH: &str = "/careers";

impl Actions {
    pub async fn create_career(&self, input: JobPostingInput) -> Result<JobPosting, ActionError> {
        let input = validated(input.normalized())?;
        let posting = self.db.insert_career(&input)?;
        log::info!("[CAREERS] Created '{}' at position {}", posting.title, posting.order);
        self.revalidate([CAREERS_PATH]);
        Ok(posting)
    }

    pub async fn update_career(
        &self,
        id: &str,
        input: JobPostingInput,
    ) -> Result<JobPosting, ActionError> {
        let input = validated(input.normalized())?;
        let replaced = self
            .db
            .update_career(id, &input)?
            .ok_or_else(|| ActionError::NotFound("Job posting".to_string()))?;
        self.cleanup_replaced_image(
            replaced.before.image_url.as_deref(),
            replaced.after.image_url.as_deref(),
        )
        .await;
        self.revalidate([CAREERS_PATH]);
        Ok(replaced.after)
    }

    pub async fn delete_career(&self, id: &str) -> Result<JobPosting, ActionError> {
        let removed = self
            .db
            .delete_career(id)?
            .ok_or_else(|| ActionError::NotFound("Job posting".to_string()))?;
        self.cleanup_replaced_image(removed.image_url.as_deref(), None).await;
        self.revalidate([CAREERS_PATH]);
        log::info!("[CAREERS] Deleted '{}'", removed.title);
        Ok(removed)
    }

    /// Persist a drag-and-drop result: `ids[i]` gets order `i`, in one batch.
    pub async fn reorder_careers(&self, ids: Vec<String>) -> Result<Vec<JobPosting>, ActionError> {
        if ids.is_empty() {
            return Err(ActionError::Validation("No postings to reorder".to_string()));
        }
        self.db.reorder_careers(&ids)?;
        log::info!("[CAREERS] Reordered {} posting(s)", ids.len());
        self.revalidate([CAREERS_PATH]);
        self.db.list_careers()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::harness;
    use crate::models::JobPostingInput;

    fn posting(title: &str) -> JobPostingInput {
        JobPostingInput {
            title: title.to_string(),
            date: "2025-01-15".to_string(),
            description: "Join us".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_reorder_assigns_positions_zero_to_n_minus_one() {
        let h = harness();
        let mut ids = Vec::new();
        for title in ["Registrar", "Librarian", "Coach", "Chef"] {
            ids.push(h.actions.create_career(posting(title)).await.unwrap().id);
        }
        ids.reverse();

        let listed = h.actions.reorder_careers(ids.clone()).await.unwrap();
        let got: Vec<_> = listed.iter().map(|p| (p.id.clone(), p.order)).collect();
        let want: Vec<_> = ids.iter().cloned().zip(0..).collect();
        assert_eq!(got, want);
        assert_eq!(listed[0].title, "Chef");
    }

    #[tokio::test]
    async fn test_reorder_with_unknown_id_fails_whole_batch() {
        let h = harness();
        let a = h.actions.create_career(posting("A")).await.unwrap();
        let b = h.actions.create_career(posting("B")).await.unwrap();

        let err = h
            .actions
            .reorder_careers(vec![b.id.clone(), "missing".to_string()])
            .await
            .unwrap_err();
        assert!(!err.is_validation());

        let orders: Vec<_> = h.actions.db.list_careers().unwrap().into_iter().map(|p| (p.id, p.order)).collect();
        assert_eq!(orders, vec![(a.id, 0), (b.id, 1)]);
    }

    #[tokio::test]
    async fn test_empty_reorder_is_rejected() {
        let h = harness();
        assert!(h.actions.reorder_careers(Vec::new()).await.unwrap_err().is_validation());
    }
}
