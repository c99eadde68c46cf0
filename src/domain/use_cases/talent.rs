use std::sync::Arc;

use crate::{
    entities::skill::{ExpertiseListResponse, Skill, SkillExpertisePair},
    errors::AppError,
    repositories::talent::TalentRepository,
    use_cases::extractors::CurrentUser,
    utils::id_list::parse_id_list,
};

/// Read-only skill and expertise lookups backing the profile editor widgets.
pub struct TalentHandler<R>
where
    R: TalentRepository + ?Sized,
{
    pub talent_repo: Arc<R>,
}

impl<R> TalentHandler<R>
where
    R: TalentRepository + ?Sized,
{
    pub fn new(talent_repo: Arc<R>) -> Self {
        TalentHandler { talent_repo }
    }

    pub async fn get_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.talent_repo.list_active_skills().await
    }

    /// Skill ids of the caller's saved snapshot, in snapshot order
    pub async fn get_current_skills(&self, caller: &CurrentUser) -> Result<Vec<i64>, AppError> {
        let person_skill = self.talent_repo.get_person_skill_for_user(&caller.user_id).await?;
        Ok(person_skill.map(|ps| ps.skill_ids()).unwrap_or_default())
    }

    pub async fn get_expertise(&self, selected_skills: Option<&str>) -> Result<ExpertiseListResponse, AppError> {
        let skill_ids = parse_id_list(selected_skills)
            .map_err(|msg| AppError::field("selected_skills", msg))?;

        let expertise = self.talent_repo.list_expertise_by_skill_ids(&skill_ids).await?;
        Ok(ExpertiseListResponse::from(expertise))
    }

    pub async fn get_current_expertise(&self, caller: &CurrentUser) -> Result<ExpertiseListResponse, AppError> {
        let Some(person_skill) = self.talent_repo.get_person_skill_for_user(&caller.user_id).await? else {
            return Ok(ExpertiseListResponse::default());
        };

        let expertise = self
            .talent_repo
            .list_expertise_by_ids(&person_skill.expertise_ids())
            .await?;
        Ok(ExpertiseListResponse::from(expertise))
    }

    pub async fn list_skill_and_expertise(
        &self,
        skills: Option<&str>,
        expertise: Option<&str>,
    ) -> Result<Vec<SkillExpertisePair>, AppError> {
        let skill_ids = parse_id_list(skills).map_err(|msg| AppError::field("skills", msg))?;
        let expertise_ids = parse_id_list(expertise).map_err(|msg| AppError::field("expertise", msg))?;

        self.talent_repo
            .list_skill_and_expertise(&skill_ids, &expertise_ids)
            .await
    }
}
