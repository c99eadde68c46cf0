use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        person::{PersonSkill, PersonSkillRow},
        skill::{Expertise, Skill, SkillExpertisePair, SkillRef},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxTalentRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TalentRepository: Send + Sync {
    /// Active skills, highest display boost first
    async fn list_active_skills(&self) -> Result<Vec<Skill>, AppError>;

    /// Expertise belonging to any of the given skills, by id
    async fn list_expertise_by_skill_ids(&self, skill_ids: &[i64]) -> Result<Vec<Expertise>, AppError>;

    async fn list_expertise_by_ids(&self, expertise_ids: &[i64]) -> Result<Vec<Expertise>, AppError>;

    /// `{skill, expertise}` names for expertise in `expertise_ids` whose skill is in `skill_ids`
    async fn list_skill_and_expertise(
        &self,
        skill_ids: &[i64],
        expertise_ids: &[i64],
    ) -> Result<Vec<SkillExpertisePair>, AppError>;

    async fn skill_refs_by_ids(&self, skill_ids: &[i64]) -> Result<Vec<SkillRef>, AppError>;

    async fn expertise_refs_by_ids(&self, expertise_ids: &[i64]) -> Result<Vec<SkillRef>, AppError>;

    async fn get_person_skill(&self, person_id: &Uuid) -> Result<Option<PersonSkill>, AppError>;

    /// Snapshot of the person owned by the given account
    async fn get_person_skill_for_user(&self, user_id: &Uuid) -> Result<Option<PersonSkill>, AppError>;
}

impl SqlxTalentRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxTalentRepo { pool }
    }
}

#[async_trait]
impl TalentRepository for SqlxTalentRepo {
    async fn list_active_skills(&self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, parent_id, name, active, selectable, display_boost_factor
            FROM skills
            WHERE active = TRUE
            ORDER BY display_boost_factor DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn list_expertise_by_skill_ids(&self, skill_ids: &[i64]) -> Result<Vec<Expertise>, AppError> {
        if skill_ids.is_empty() {
            return Ok(Vec::new());
        }

        let expertise = sqlx::query_as::<_, Expertise>(
            r#"
            SELECT id, skill_id, parent_id, name, selectable, fa_icon
            FROM expertise
            WHERE skill_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(skill_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(expertise)
    }

    async fn list_expertise_by_ids(&self, expertise_ids: &[i64]) -> Result<Vec<Expertise>, AppError> {
        if expertise_ids.is_empty() {
            return Ok(Vec::new());
        }

        let expertise = sqlx::query_as::<_, Expertise>(
            r#"
            SELECT id, skill_id, parent_id, name, selectable, fa_icon
            FROM expertise
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(expertise_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(expertise)
    }

    async fn list_skill_and_expertise(
        &self,
        skill_ids: &[i64],
        expertise_ids: &[i64],
    ) -> Result<Vec<SkillExpertisePair>, AppError> {
        if skill_ids.is_empty() || expertise_ids.is_empty() {
            return Ok(Vec::new());
        }

        let pairs = sqlx::query_as::<_, SkillExpertisePair>(
            r#"
            SELECT s.name AS skill, e.name AS expertise
            FROM expertise e
            JOIN skills s ON s.id = e.skill_id
            WHERE e.id = ANY($1) AND e.skill_id = ANY($2)
            ORDER BY e.id
            "#,
        )
        .bind(expertise_ids)
        .bind(skill_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(pairs)
    }

    async fn skill_refs_by_ids(&self, skill_ids: &[i64]) -> Result<Vec<SkillRef>, AppError> {
        if skill_ids.is_empty() {
            return Ok(Vec::new());
        }

        let refs = sqlx::query_as::<_, SkillRef>(
            "SELECT id, name FROM skills WHERE id = ANY($1) ORDER BY id",
        )
        .bind(skill_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(refs)
    }

    async fn expertise_refs_by_ids(&self, expertise_ids: &[i64]) -> Result<Vec<SkillRef>, AppError> {
        if expertise_ids.is_empty() {
            return Ok(Vec::new());
        }

        let refs = sqlx::query_as::<_, SkillRef>(
            "SELECT id, name FROM expertise WHERE id = ANY($1) ORDER BY id",
        )
        .bind(expertise_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(refs)
    }

    async fn get_person_skill(&self, person_id: &Uuid) -> Result<Option<PersonSkill>, AppError> {
        let row = sqlx::query_as::<_, PersonSkillRow>(
            "SELECT id, person_id, skill, expertise FROM person_skills WHERE person_id = $1",
        )
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PersonSkill::from))
    }

    async fn get_person_skill_for_user(&self, user_id: &Uuid) -> Result<Option<PersonSkill>, AppError> {
        let row = sqlx::query_as::<_, PersonSkillRow>(
            r#"
            SELECT ps.id, ps.person_id, ps.skill, ps.expertise
            FROM person_skills ps
            JOIN persons p ON p.id = ps.person_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PersonSkill::from))
    }
}
