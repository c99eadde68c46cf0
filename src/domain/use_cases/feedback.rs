use std::sync::Arc;

use crate::{
    entities::feedback::{FeedbackForm, FeedbackInsert, NewFeedback},
    errors::AppError,
    repositories::{feedback::FeedbackRepository, person::PersonRepository},
    use_cases::extractors::CurrentUser,
};

/// Result of a feedback submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Created { recipient_username: String },
    SignInRequired,
    Rejected(String),
}

pub struct FeedbackHandler<F, P>
where
    F: FeedbackRepository + ?Sized,
    P: PersonRepository + ?Sized,
{
    pub feedback_repo: Arc<F>,
    pub person_repo: Arc<P>,
}

impl<F, P> FeedbackHandler<F, P>
where
    F: FeedbackRepository + ?Sized,
    P: PersonRepository + ?Sized,
{
    pub fn new(feedback_repo: Arc<F>, person_repo: Arc<P>) -> Self {
        FeedbackHandler {
            feedback_repo,
            person_repo,
        }
    }

    /// Validates the form first, so an anonymous caller is only sent to
    /// sign in for a submission that would otherwise be accepted.
    pub async fn submit_feedback(&self, caller: Option<&CurrentUser>, form: FeedbackForm) -> FeedbackOutcome {
        let feedback = match NewFeedback::try_from(form) {
            Ok(feedback) => feedback,
            Err(e) => return self.reject(e.to_string()),
        };

        let Some(caller) = caller else {
            return FeedbackOutcome::SignInRequired;
        };

        match self.store(caller, feedback).await {
            Ok(outcome) => outcome,
            Err(e) => self.reject(e.to_string()),
        }
    }

    async fn store(&self, caller: &CurrentUser, feedback: NewFeedback) -> Result<FeedbackOutcome, AppError> {
        let Some(provider) = self.person_repo.find_by_user_id(&caller.user_id).await? else {
            return Ok(self.reject(format!("{} has no person profile", caller.username)));
        };

        let Some(recipient) = self.person_repo.find_by_username(&feedback.recipient_username).await? else {
            return Ok(self.reject(format!("unknown recipient {}", feedback.recipient_username)));
        };

        if provider.person.id == recipient.person.id {
            return Ok(self.reject(format!("{} tried to rate themselves", caller.username)));
        }

        if self
            .feedback_repo
            .has_left_feedback(&provider.person.id, &recipient.person.id)
            .await?
        {
            return Ok(self.reject(format!(
                "{} already left feedback for {}",
                caller.username, recipient.username
            )));
        }

        let insert = FeedbackInsert {
            recipient_id: recipient.person.id,
            provider_id: provider.person.id,
            message: feedback.message,
            stars: feedback.stars,
        };
        let id = self.feedback_repo.create_feedback(&insert).await?;

        tracing::info!(
            "Feedback {} from {} to {} stored",
            id,
            caller.username,
            recipient.username
        );
        Ok(FeedbackOutcome::Created {
            recipient_username: recipient.username,
        })
    }

    fn reject(&self, reason: String) -> FeedbackOutcome {
        tracing::warn!("Feedback rejected: {}", reason);
        FeedbackOutcome::Rejected(reason)
    }
}
