use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::feedback::{FeedbackInsert, ReceivedFeedback},
    errors::AppError,
    repositories::sqlx_repo::SqlxFeedbackRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create_feedback(&self, feedback: &FeedbackInsert) -> Result<Uuid, AppError>;

    /// Feedback received by a person, newest first
    async fn list_received(&self, recipient_id: &Uuid) -> Result<Vec<ReceivedFeedback>, AppError>;

    async fn has_left_feedback(&self, provider_id: &Uuid, recipient_id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxFeedbackRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxFeedbackRepo { pool }
    }
}

#[async_trait]
impl FeedbackRepository for SqlxFeedbackRepo {
    async fn create_feedback(&self, feedback: &FeedbackInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO feedbacks (id, recipient_id, provider_id, message, stars)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(feedback.recipient_id)
        .bind(feedback.provider_id)
        .bind(&feedback.message)
        .bind(feedback.stars)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_received(&self, recipient_id: &Uuid) -> Result<Vec<ReceivedFeedback>, AppError> {
        let feedbacks = sqlx::query_as::<_, ReceivedFeedback>(
            r#"
            SELECT f.id,
                   u.username AS provider_username,
                   p.full_name AS provider_name,
                   f.message,
                   f.stars,
                   f.created_at
            FROM feedbacks f
            JOIN persons p ON p.id = f.provider_id
            JOIN users u ON u.id = p.user_id
            WHERE f.recipient_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(feedbacks)
    }

    async fn has_left_feedback(&self, provider_id: &Uuid, recipient_id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM feedbacks WHERE provider_id = $1 AND recipient_id = $2)",
        )
        .bind(provider_id)
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
