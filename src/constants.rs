use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Avatar shown for persons that never uploaded a photo.
pub const DEFAULT_PHOTO_URL: &str = "/media/avatars/profile-empty.png";

/// Cookie carrying the session token issued at sign-in.
pub const SESSION_COOKIE: &str = "access_token";

pub const SIGN_IN_PATH: &str = "/sign-in";

/// Plain-text body answered for every rejected feedback submission.
pub const FEEDBACK_FAILURE_BODY: &str = "Something went wrong";
