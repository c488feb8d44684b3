use super::{validated, Actions};
use crate::error::ActionError;
use crate::models::{SectionKind, SiteSection, SiteSectionInput};

impl Actions {
    pub async fn create_section(
        &self,
        kind: SectionKind,
        input: SiteSectionInput,
    ) -> Result<SiteSection, ActionError> {
        let input = validated(input.normalized())?;
        let section = self.db.insert_section(kind, &input)?;
        log::info!("[SECTIONS] Added '{}' to {}", section.title, kind);
        self.revalidate([kind.page_path()]);
        Ok(section)
    }

    pub async fn update_section(
        &self,
        kind: SectionKind,
        id: &str,
        input: SiteSectionInput,
    ) -> Result<SiteSection, ActionError> {
        let input = validated(input.normalized())?;
        let replaced = self
            .db
            .update_section(kind, id, &input)?
            .ok_or_else(|| ActionError::NotFound("Section".to_string()))?;
        self.cleanup_replaced_image(
            replaced.before.image_url.as_deref(),
            replaced.after.image_url.as_deref(),
        )
        .await;
        self.revalidate([kind.page_path()]);
        Ok(replaced.after)
    }

    pub async fn delete_section(&self, kind: SectionKind, id: &str) -> Result<SiteSection, ActionError> {
        let removed = self
            .db
            .delete_section(kind, id)?
            .ok_or_else(|| ActionError::NotFound("Section".to_string()))?;
        self.cleanup_replaced_image(removed.image_url.as_deref(), None).await;
        self.revalidate([kind.page_path()]);
        log::info!("[SECTIONS] Removed '{}' from {}", removed.title, kind);
        Ok(removed)
    }

    pub async fn reorder_sections(
        &self,
        kind: SectionKind,
        ids: Vec<String>,
    ) -> Result<Vec<SiteSection>, ActionError> {
        if ids.is_empty() {
            return Err(ActionError::Validation("No sections to reorder".to_string()));
        }
        self.db.reorder_sections(kind, &ids)?;
        log::info!("[SECTIONS] Reordered {} {} item(s)", ids.len(), kind);
        self.revalidate([kind.page_path()]);
        self.db.list_sections(kind)
    }
}
