use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a claim on a bounty, stored as SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum ClaimKind {
    Done = 0,
    Active = 1,
    Failed = 2,
    InReview = 3,
    Requested = 4,
    Rejected = 5,
}

impl ClaimKind {
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for ClaimKind {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ClaimKind::Done),
            1 => Ok(ClaimKind::Active),
            2 => Ok(ClaimKind::Failed),
            3 => Ok(ClaimKind::InReview),
            4 => Ok(ClaimKind::Requested),
            5 => Ok(ClaimKind::Rejected),
            other => Err(format!("Unknown bounty claim kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BountyClaim {
    pub id: Uuid,
    pub person_id: Uuid,
    pub bounty_title: String,
    pub kind: ClaimKind,
    pub created_at: DateTime<Utc>,
}
