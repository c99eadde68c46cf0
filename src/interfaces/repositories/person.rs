use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::{
        bounty::{BountyClaim, ClaimKind},
        person::{Person, PersonAccount, ProfileUpdate, SkillSnapshot, Status},
        product::ProductRoleView,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxPersonRepo,
};

const PERSON_ACCOUNT_SELECT: &str = r#"
    SELECT p.*, u.username, u.email
    FROM persons p
    JOIN users u ON u.id = p.user_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<PersonAccount>, AppError>;

    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<PersonAccount>, AppError>;

    async fn get_status(&self, person_id: &Uuid) -> Result<Option<Status>, AppError>;

    /// Writes the profile fields and replaces the skill snapshot atomically
    async fn save_profile(
        &self,
        person_id: &Uuid,
        update: &ProfileUpdate,
        snapshot: &SkillSnapshot,
    ) -> Result<Person, AppError>;

    async fn set_photo(&self, person_id: &Uuid, photo: Option<String>) -> Result<Person, AppError>;

    async fn list_completed_bounty_claims(&self, person_id: &Uuid) -> Result<Vec<BountyClaim>, AppError>;

    async fn list_product_roles(&self, person_id: &Uuid) -> Result<Vec<ProductRoleView>, AppError>;
}

impl SqlxPersonRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxPersonRepo { pool }
    }
}

#[async_trait]
impl PersonRepository for SqlxPersonRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<PersonAccount>, AppError> {
        let query = format!("{PERSON_ACCOUNT_SELECT} WHERE u.username = $1");
        let account = sqlx::query_as::<_, PersonAccount>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<PersonAccount>, AppError> {
        let query = format!("{PERSON_ACCOUNT_SELECT} WHERE p.user_id = $1");
        let account = sqlx::query_as::<_, PersonAccount>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn get_status(&self, person_id: &Uuid) -> Result<Option<Status>, AppError> {
        let status = sqlx::query_as::<_, Status>(
            "SELECT id, person_id, name, points FROM statuses WHERE person_id = $1",
        )
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }

    async fn save_profile(
        &self,
        person_id: &Uuid,
        update: &ProfileUpdate,
        snapshot: &SkillSnapshot,
    ) -> Result<Person, AppError> {
        let mut tx = self.pool.begin().await?;

        let person = sqlx::query_as::<_, Person>(
            r#"
            UPDATE persons
            SET full_name = $2,
                preferred_name = $3,
                current_position = $4,
                headline = $5,
                overview = $6,
                location = $7,
                github_link = $8,
                twitter_link = $9,
                linkedin_link = $10,
                website_link = $11,
                send_me_bounties = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(person_id)
        .bind(&update.full_name)
        .bind(&update.preferred_name)
        .bind(&update.current_position)
        .bind(&update.headline)
        .bind(&update.overview)
        .bind(&update.location)
        .bind(&update.github_link)
        .bind(&update.twitter_link)
        .bind(&update.linkedin_link)
        .bind(&update.website_link)
        .bind(update.send_me_bounties)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO person_skills (id, person_id, skill, expertise)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (person_id)
            DO UPDATE SET skill = EXCLUDED.skill, expertise = EXCLUDED.expertise
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(person_id)
        .bind(Json(&snapshot.skill))
        .bind(Json(&snapshot.expertise))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(person)
    }

    async fn set_photo(&self, person_id: &Uuid, photo: Option<String>) -> Result<Person, AppError> {
        let person = sqlx::query_as::<_, Person>(
            "UPDATE persons SET photo = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(person_id)
        .bind(photo)
        .fetch_one(&self.pool)
        .await?;

        Ok(person)
    }

    async fn list_completed_bounty_claims(&self, person_id: &Uuid) -> Result<Vec<BountyClaim>, AppError> {
        let claims = sqlx::query_as::<_, BountyClaim>(
            r#"
            SELECT id, person_id, bounty_title, kind, created_at
            FROM bounty_claims
            WHERE person_id = $1 AND kind = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(person_id)
        .bind(ClaimKind::Done)
        .fetch_all(&self.pool)
        .await?;

        Ok(claims)
    }

    async fn list_product_roles(&self, person_id: &Uuid) -> Result<Vec<ProductRoleView>, AppError> {
        let roles = sqlx::query_as::<_, ProductRoleView>(
            r#"
            SELECT pr.id AS product_id, pr.name AS product_name, pr.slug AS product_slug, pp.role
            FROM product_persons pp
            JOIN products pr ON pr.id = pp.product_id
            WHERE pp.person_id = $1
            ORDER BY pr.name
            "#,
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }
}
