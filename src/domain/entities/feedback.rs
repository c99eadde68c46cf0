use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{entities::user::USERNAME_REGEX, errors::AppError};

const MAX_MESSAGE_LENGTH: u64 = 2000;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackInsert {
    pub recipient_id: Uuid,
    pub provider_id: Uuid,
    pub message: String,
    pub stars: i16,
}

/// Feedback as listed on the recipient's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReceivedFeedback {
    pub id: Uuid,
    pub provider_username: String,
    pub provider_name: String,
    pub message: String,
    pub stars: i16,
    pub created_at: DateTime<Utc>,
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub stars: Option<String>,

    #[serde(default, rename = "feedback-recipient-username")]
    pub recipient_username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewFeedback {
    #[validate(length(min = 1, max = MAX_MESSAGE_LENGTH, message = "Message must be 1-2000 characters"))]
    pub message: String,

    #[validate(range(min = 1, max = 5, message = "Stars must be between 1 and 5"))]
    pub stars: i16,

    #[validate(
        length(min = 1, max = 150, message = "Recipient is required"),
        regex(path = *USERNAME_REGEX, message = "Invalid recipient username")
    )]
    pub recipient_username: String,
}

impl TryFrom<FeedbackForm> for NewFeedback {
    type Error = AppError;

    fn try_from(form: FeedbackForm) -> Result<Self, Self::Error> {
        let message = form
            .message
            .map(|m| m.trim().to_string())
            .ok_or_else(|| AppError::field("message", "This field is required"))?;

        let stars = form
            .stars
            .ok_or_else(|| AppError::field("stars", "This field is required"))?
            .trim()
            .parse::<i16>()
            .map_err(|_| AppError::field("stars", "Stars must be a whole number"))?;

        let recipient_username = form
            .recipient_username
            .map(|u| u.trim().to_string())
            .ok_or_else(|| AppError::field("feedback-recipient-username", "This field is required"))?;

        let feedback = NewFeedback {
            message,
            stars,
            recipient_username,
        };
        feedback.validate()?;

        Ok(feedback)
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarBucket {
    pub stars: i16,
    pub count: usize,
    pub percentage: u32,
}

/// Aggregate over the feedback a person received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub count: usize,
    pub average_stars: f64,
    pub stars_distribution: Vec<StarBucket>,
}

impl FeedbackSummary {
    pub fn from_feedbacks(feedbacks: &[ReceivedFeedback]) -> Self {
        let count = feedbacks.len();
        let total: i64 = feedbacks.iter().map(|f| i64::from(f.stars)).sum();

        let average_stars = if count == 0 {
            0.0
        } else {
            ((total as f64 / count as f64) * 10.0).round() / 10.0
        };

        let stars_distribution = (1..=5)
            .rev()
            .map(|stars| {
                let bucket = feedbacks.iter().filter(|f| f.stars == stars).count();
                let percentage = if count == 0 {
                    0
                } else {
                    ((bucket as f64 * 100.0) / count as f64).round() as u32
                };
                StarBucket {
                    stars,
                    count: bucket,
                    percentage,
                }
            })
            .collect();

        FeedbackSummary {
            count,
            average_stars,
            stars_distribution,
        }
    }
}

/// Describes the feedback form embedded in a portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackFormDescriptor {
    pub action: String,
    pub method: String,
    pub fields: Vec<String>,
    pub recipient_username: String,
}

impl FeedbackFormDescriptor {
    pub fn for_recipient(recipient_username: &str) -> Self {
        FeedbackFormDescriptor {
            action: "/talent/submit-feedback".to_string(),
            method: "POST".to_string(),
            fields: vec![
                "message".to_string(),
                "stars".to_string(),
                "feedback-recipient-username".to_string(),
            ],
            recipient_username: recipient_username.to_string(),
        }
    }
}
