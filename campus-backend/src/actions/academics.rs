use super::{validated, Actions};
use crate::error::ActionError;
use crate::models::{AcademicProgram, AcademicProgramInput};

impl Actions {
    pub async fn create_academic_program(
        &self,
        input: AcademicProgramInput,
    ) -> Result<AcademicProgram, ActionError> {
        let input = validated(input.normalized())?;
        let program = self.db.insert_academic_program(&input)?;
        log::info!("[ACADEMICS] Created '{}'", program.slug);
        self.revalidate(["/academics".to_string(), format!("/academics/{}", program.slug)]);
        Ok(program)
    }

    pub async fn update_academic_program(
        &self,
        id: &str,
        input: AcademicProgramInput,
    ) -> Result<AcademicProgram, ActionError> {
        let input = validated(input.normalized())?;
        let replaced = self
            .db
            .update_academic_program(id, &input)?
            .ok_or_else(|| ActionError::NotFound("Program".to_string()))?;

        self.cleanup_replaced_image(
            replaced.before.image_url.as_deref(),
            replaced.after.image_url.as_deref(),
        )
        .await;
        self.revalidate([
            "/academics".to_string(),
            format!("/academics/{}", replaced.before.slug),
            format!("/academics/{}", replaced.after.slug),
        ]);
        Ok(replaced.after)
    }

    pub async fn delete_academic_program(&self, id: &str) -> Result<AcademicProgram, ActionError> {
        let removed = self
            .db
            .delete_academic_program(id)?
            .ok_or_else(|| ActionError::NotFound("Program".to_string()))?;
        self.cleanup_replaced_image(removed.image_url.as_deref(), None).await;
        self.revalidate(["/academics".to_string(), format!("/academics/{}", removed.slug)]);
        log::info!("[ACADEMICS] Deleted '{}'", removed.slug);
        Ok(removed)
    }
}
