use super::{validated, Actions};
use crate::error::ActionError;
use crate::mail::templates;
use crate::models::{AlumniStory, AlumniStoryInput, AlumniUpdate, AlumniUpdateInput};

const ALUMNI_PATH: &str = "/alumni";

impl Actions {
    pub async fn create_alumni_story(&self, input: AlumniStoryInput) -> Result<AlumniStory, ActionError> {
        let input = validated(input.normalized())?;
        let story = self.db.insert_alumni_story(&input)?;
        log::info!("[ALUMNI] Published story for {}", story.name);
        self.revalidate([ALUMNI_PATH]);
        Ok(story)
    }

    pub async fn update_alumni_story(
        &self,
        id: &str,
        input: AlumniStoryInput,
    ) -> Result<AlumniStory, ActionError> {
        let input = validated(input.normalized())?;
        let replaced = self
            .db
            .update_alumni_story(id, &input)?
            .ok_or_else(|| ActionError::NotFound("Story".to_string()))?;
        self.cleanup_replaced_image(
            replaced.before.image_url.as_deref(),
            replaced.after.image_url.as_deref(),
        )
        .await;
        self.revalidate([ALUMNI_PATH]);
        Ok(replaced.after)
    }

    pub async fn delete_alumni_story(&self, id: &str) -> Result<AlumniStory, ActionError> {
        let removed = self
            .db
            .delete_alumni_story(id)?
            .ok_or_else(|| ActionError::NotFound("Story".to_string()))?;
        self.cleanup_replaced_image(removed.image_url.as_deref(), None).await;
        self.revalidate([ALUMNI_PATH]);
        Ok(removed)
    }

    /// A graduate's "share your news" form: stored, then forwarded to the
    /// alumni office. Both must succeed.
    pub async fn submit_alumni_update(&self, input: AlumniUpdateInput) -> Result<AlumniUpdate, ActionError> {
        let input = validated(input)?;
        let update = self.db.insert_alumni_update(&input)?;
        let message = templates::alumni_update_notification(&update, &self.notify_to);
        if let Err(e) = self.mailer.send(message).await {
            log::error!("[ALUMNI] Notification for update {} failed: {}", update.id, e);
            return Err(e);
        }
        Ok(update)
    }
}
