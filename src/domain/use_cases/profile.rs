use std::sync::Arc;

use uuid::Uuid;

use crate::{
    entities::{
        feedback::{FeedbackFormDescriptor, FeedbackSummary},
        person::{Person, PersonAccount, ProfileUpdate, ProfileUpdateForm, SkillSnapshot},
        portfolio::{PhotoResponse, PortfolioContext, ProfileContext},
        user::PublicUser,
    },
    errors::AppError,
    repositories::{feedback::FeedbackRepository, person::PersonRepository, talent::TalentRepository},
    storage::media::MediaStorage,
    use_cases::extractors::CurrentUser,
    utils::{markdown::safe_markdown_to_html, social_link::social_link_path},
};

/// Portfolio page and the owner's profile editor.
pub struct ProfileHandler<P, T, F>
where
    P: PersonRepository + ?Sized,
    T: TalentRepository + ?Sized,
    F: FeedbackRepository + ?Sized,
{
    pub person_repo: Arc<P>,
    pub talent_repo: Arc<T>,
    pub feedback_repo: Arc<F>,
    pub media: MediaStorage,
    pub media_url: String,
}

impl<P, T, F> ProfileHandler<P, T, F>
where
    P: PersonRepository + ?Sized,
    T: TalentRepository + ?Sized,
    F: FeedbackRepository + ?Sized,
{
    pub fn new(
        person_repo: Arc<P>,
        talent_repo: Arc<T>,
        feedback_repo: Arc<F>,
        media: MediaStorage,
        media_url: impl Into<String>,
    ) -> Self {
        ProfileHandler {
            person_repo,
            talent_repo,
            feedback_repo,
            media,
            media_url: media_url.into(),
        }
    }

    /// Builds the public portfolio of `username` as seen by `viewer`
    pub async fn portfolio(&self, viewer: &CurrentUser, username: &str) -> Result<PortfolioContext, AppError> {
        let account = self
            .person_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No talent named {username}")))?;
        let person_id = account.person.id;

        let status = self.person_repo.get_status(&person_id).await?;
        let snapshot = self.talent_repo.get_person_skill(&person_id).await?;
        let bounty_claims = self.person_repo.list_completed_bounty_claims(&person_id).await?;
        let product_roles = self.person_repo.list_product_roles(&person_id).await?;
        let received_feedbacks = self.feedback_repo.list_received(&person_id).await?;
        let can_leave_feedback = self.can_leave_feedback(viewer, &account).await?;

        let (skills, expertise) = snapshot
            .map(|ps| (ps.skill, ps.expertise))
            .unwrap_or_default();
        let feedback_summary = FeedbackSummary::from_feedbacks(&received_feedbacks);

        let PersonAccount { person, username, email } = account;
        Ok(PortfolioContext {
            user: PublicUser {
                id: person.user_id,
                username: username.clone(),
                email,
            },
            photo_url: person.photo_url(&self.media_url),
            person_linkedin_link: social_link_path(&person.linkedin_link),
            person_twitter_link: social_link_path(&person.twitter_link),
            overview_html: safe_markdown_to_html(&person.overview),
            person,
            status,
            skills,
            expertise,
            form: FeedbackFormDescriptor::for_recipient(&username),
            bounty_claims,
            received_feedbacks,
            feedback_summary,
            product_roles,
            can_leave_feedback,
        })
    }

    /// A viewer may rate a person once, never themselves, and only with a
    /// person profile of their own.
    async fn can_leave_feedback(&self, viewer: &CurrentUser, owner: &PersonAccount) -> Result<bool, AppError> {
        if viewer.user_id == owner.person.user_id {
            return Ok(false);
        }
        let Some(viewer_account) = self.person_repo.find_by_user_id(&viewer.user_id).await? else {
            return Ok(false);
        };

        let already_left = self
            .feedback_repo
            .has_left_feedback(&viewer_account.person.id, &owner.person.id)
            .await?;
        Ok(!already_left)
    }

    pub async fn profile(&self, caller: &CurrentUser, user_id: &Uuid) -> Result<ProfileContext, AppError> {
        let person = self.owned_person(caller, user_id).await?;
        let snapshot = self.talent_repo.get_person_skill(&person.id).await?;
        let (skills, expertise) = snapshot
            .map(|ps| (ps.skill, ps.expertise))
            .unwrap_or_default();

        Ok(ProfileContext {
            pk: person.id,
            photo_url: person.photo_url(&self.media_url),
            requires_upload: person.requires_upload(),
            person,
            skills,
            expertise,
        })
    }

    /// Saves the profile fields and replaces the skill snapshot with the
    /// selected skills and expertise resolved by id.
    pub async fn update_profile(
        &self,
        caller: &CurrentUser,
        user_id: &Uuid,
        form: ProfileUpdateForm,
    ) -> Result<Person, AppError> {
        let person = self.owned_person(caller, user_id).await?;
        let update = ProfileUpdate::try_from(form)?;

        let snapshot = SkillSnapshot {
            skill: self.talent_repo.skill_refs_by_ids(&update.selected_skill_ids).await?,
            expertise: self
                .talent_repo
                .expertise_refs_by_ids(&update.selected_expertise_ids)
                .await?,
        };

        let saved = self.person_repo.save_profile(&person.id, &update, &snapshot).await?;
        tracing::info!(
            "Profile of {} updated with {} skills and {} expertise",
            caller.username,
            snapshot.skill.len(),
            snapshot.expertise.len()
        );
        Ok(saved)
    }

    pub async fn upload_photo(
        &self,
        caller: &CurrentUser,
        user_id: &Uuid,
        bytes: &[u8],
    ) -> Result<PhotoResponse, AppError> {
        let person = self.owned_person(caller, user_id).await?;
        let stored = self.media.save_avatar(bytes).await?;

        let updated = match self.person_repo.set_photo(&person.id, Some(stored.clone())).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard(&stored).await;
                return Err(e);
            }
        };

        if let Some(previous) = person.photo.as_deref() {
            self.discard(previous).await;
        }

        Ok(PhotoResponse {
            photo_url: updated.photo_url(&self.media_url),
        })
    }

    pub async fn remove_photo(&self, caller: &CurrentUser, user_id: &Uuid) -> Result<PhotoResponse, AppError> {
        let person = self.owned_person(caller, user_id).await?;
        let updated = self.person_repo.set_photo(&person.id, None).await?;

        if let Some(previous) = person.photo.as_deref() {
            self.discard(previous).await;
        }

        Ok(PhotoResponse {
            photo_url: updated.photo_url(&self.media_url),
        })
    }

    async fn owned_person(&self, caller: &CurrentUser, user_id: &Uuid) -> Result<Person, AppError> {
        if caller.user_id != *user_id {
            tracing::warn!("{} tried to access the profile of {}", caller.username, user_id);
            return Err(AppError::ForbiddenAccess);
        }

        self.person_repo
            .find_by_user_id(user_id)
            .await?
            .map(|account| account.person)
            .ok_or_else(|| AppError::NotFound(format!("No profile for user {user_id}")))
    }

    async fn discard(&self, relative: &str) {
        if let Err(e) = self.media.delete(relative).await {
            tracing::warn!("Failed to delete media file {}: {}", relative, e);
        }
    }
}
