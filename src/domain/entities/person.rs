use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::DEFAULT_PHOTO_URL,
    entities::skill::SkillRef,
    errors::AppError,
    utils::id_list::parse_id_list,
};

const MAX_NAME_LENGTH: u64 = 256;
const MAX_LOCATION_LENGTH: u64 = 128;
const MAX_LINK_LENGTH: u64 = 200;
const MAX_OVERVIEW_LENGTH: u64 = 10_000;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub preferred_name: String,
    pub current_position: String,
    pub headline: String,
    pub overview: String,
    pub location: String,
    pub github_link: String,
    pub twitter_link: String,
    pub linkedin_link: String,
    pub website_link: String,
    pub photo: Option<String>,
    pub send_me_bounties: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Public URL of the avatar, falling back to the placeholder image.
    pub fn photo_url(&self, media_url: &str) -> String {
        match self.photo.as_deref().map(str::trim) {
            Some(photo) if !photo.is_empty() => {
                format!("{}{}", media_url, photo.trim_start_matches('/'))
            }
            _ => DEFAULT_PHOTO_URL.to_string(),
        }
    }

    pub fn requires_upload(&self) -> bool {
        self.photo.as_deref().map_or(true, |p| p.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Status {
    pub id: Uuid,
    pub person_id: Uuid,
    pub name: String,
    pub points: i32,
}

#[derive(Debug, sqlx::FromRow)]
pub struct PersonSkillRow {
    pub id: Uuid,
    pub person_id: Uuid,
    pub skill: Json<Vec<SkillRef>>,
    pub expertise: Json<Vec<SkillRef>>,
}

/// Skills and expertise a person selected, copied at the time the profile
/// was saved. Later edits of the reference data do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSkill {
    pub id: Uuid,
    pub person_id: Uuid,
    pub skill: Vec<SkillRef>,
    pub expertise: Vec<SkillRef>,
}

impl PersonSkill {
    pub fn skill_ids(&self) -> Vec<i64> {
        self.skill.iter().map(|s| s.id).collect()
    }

    pub fn expertise_ids(&self) -> Vec<i64> {
        self.expertise.iter().map(|e| e.id).collect()
    }
}

impl From<PersonSkillRow> for PersonSkill {
    fn from(row: PersonSkillRow) -> Self {
        PersonSkill {
            id: row.id,
            person_id: row.person_id,
            skill: row.skill.0,
            expertise: row.expertise.0,
        }
    }
}

/// A person together with the account it belongs to.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PersonAccount {
    #[sqlx(flatten)]
    pub person: Person,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillSnapshot {
    pub skill: Vec<SkillRef>,
    pub expertise: Vec<SkillRef>,
}

// ───── Input & Validation ───────────────────────────────────────────

/// Raw profile form as posted by the edit page. Every field is optional so
/// that a partial form still reaches validation instead of failing in the
/// extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateForm {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub current_position: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub twitter_link: Option<String>,
    #[serde(default)]
    pub linkedin_link: Option<String>,
    #[serde(default)]
    pub website_link: Option<String>,
    #[serde(default)]
    pub send_me_bounties: Option<String>,
    #[serde(default)]
    pub selected_skill_ids: Option<String>,
    #[serde(default)]
    pub selected_expertise_ids: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Full name is required (max 256 characters)"))]
    pub full_name: String,

    #[validate(length(max = MAX_NAME_LENGTH, message = "Preferred name is too long"))]
    pub preferred_name: String,

    #[validate(length(max = MAX_NAME_LENGTH, message = "Current position is too long"))]
    pub current_position: String,

    #[validate(length(max = MAX_NAME_LENGTH, message = "Headline is too long"))]
    pub headline: String,

    #[validate(length(max = MAX_OVERVIEW_LENGTH, message = "Overview is too long"))]
    pub overview: String,

    #[validate(length(max = MAX_LOCATION_LENGTH, message = "Location is too long"))]
    pub location: String,

    #[validate(length(max = MAX_LINK_LENGTH, message = "Link is too long"))]
    pub github_link: String,

    #[validate(length(max = MAX_LINK_LENGTH, message = "Link is too long"))]
    pub twitter_link: String,

    #[validate(length(max = MAX_LINK_LENGTH, message = "Link is too long"))]
    pub linkedin_link: String,

    #[validate(length(max = MAX_LINK_LENGTH, message = "Link is too long"))]
    pub website_link: String,

    pub send_me_bounties: bool,
    pub selected_skill_ids: Vec<i64>,
    pub selected_expertise_ids: Vec<i64>,
}

impl TryFrom<ProfileUpdateForm> for ProfileUpdate {
    type Error = AppError;

    fn try_from(form: ProfileUpdateForm) -> Result<Self, Self::Error> {
        let selected_skill_ids = parse_id_list(form.selected_skill_ids.as_deref())
            .map_err(|msg| AppError::field("selected_skill_ids", msg))?;
        let selected_expertise_ids = parse_id_list(form.selected_expertise_ids.as_deref())
            .map_err(|msg| AppError::field("selected_expertise_ids", msg))?;

        let update = ProfileUpdate {
            full_name: trimmed(form.full_name),
            preferred_name: trimmed(form.preferred_name),
            current_position: trimmed(form.current_position),
            headline: trimmed(form.headline),
            overview: form.overview.unwrap_or_default(),
            location: trimmed(form.location),
            github_link: trimmed(form.github_link),
            twitter_link: trimmed(form.twitter_link),
            linkedin_link: trimmed(form.linkedin_link),
            website_link: trimmed(form.website_link),
            send_me_bounties: is_checked(form.send_me_bounties.as_deref()),
            selected_skill_ids,
            selected_expertise_ids,
        };
        update.validate()?;

        Ok(update)
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// HTML checkbox semantics: absent means unchecked.
fn is_checked(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1" | "yes")
    })
}
