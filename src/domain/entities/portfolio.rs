use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    bounty::BountyClaim,
    feedback::{FeedbackFormDescriptor, FeedbackSummary, ReceivedFeedback},
    person::{Person, Status},
    product::ProductRoleView,
    skill::SkillRef,
    user::PublicUser,
};

/// Render context of the public portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioContext {
    pub user: PublicUser,
    pub photo_url: String,
    pub person: Person,
    pub person_linkedin_link: String,
    pub person_twitter_link: String,
    pub overview_html: String,
    pub status: Option<Status>,
    pub skills: Vec<SkillRef>,
    pub expertise: Vec<SkillRef>,
    pub form: FeedbackFormDescriptor,
    pub bounty_claims: Vec<BountyClaim>,
    pub received_feedbacks: Vec<ReceivedFeedback>,
    pub feedback_summary: FeedbackSummary,
    pub product_roles: Vec<ProductRoleView>,
    pub can_leave_feedback: bool,
}

/// Render context of the profile edit page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileContext {
    pub person: Person,
    pub pk: Uuid,
    pub photo_url: String,
    pub requires_upload: bool,
    pub skills: Vec<SkillRef>,
    pub expertise: Vec<SkillRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub photo_url: String,
}

/// Multipart body of the avatar upload.
#[derive(MultipartForm)]
pub struct PhotoUpload {
    #[multipart(limit = "5MB")]
    pub photo: TempFile,
}
