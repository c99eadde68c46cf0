use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use talent_backend::{
    entities::{
        bounty::{BountyClaim, ClaimKind},
        feedback::{FeedbackInsert, ReceivedFeedback},
        person::{Person, PersonAccount, PersonSkill, ProfileUpdate, SkillSnapshot, Status},
        product::{ProductRole, ProductRoleView},
        skill::{Expertise, Skill, SkillExpertisePair, SkillRef},
        user::User,
    },
    errors::AppError,
    repositories::{
        feedback::FeedbackRepository, person::PersonRepository, talent::TalentRepository,
        user::UserRepository,
    },
};

#[derive(Clone)]
pub struct Feedback {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub provider_id: Uuid,
    pub message: String,
    pub stars: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ProductPerson {
    pub id: Uuid,
    pub person_id: Uuid,
    pub product_id: Uuid,
    pub role: ProductRole,
}

#[derive(Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub persons: Vec<Person>,
    pub statuses: Vec<Status>,
    pub skills: Vec<Skill>,
    pub expertise: Vec<Expertise>,
    pub person_skills: Vec<PersonSkill>,
    pub feedbacks: Vec<Feedback>,
    pub bounty_claims: Vec<BountyClaim>,
    pub products: Vec<Product>,
    pub product_persons: Vec<ProductPerson>,
}

/// In-memory stand-in for the Postgres repositories, shared by every
/// repository trait the app needs.
#[derive(Default)]
pub struct MemoryStore {
    pub tables: Mutex<Tables>,
}

impl MemoryStore {
    fn account_for(tables: &Tables, person: &Person) -> Option<PersonAccount> {
        tables
            .users
            .iter()
            .find(|u| u.id == person.user_id)
            .map(|user| PersonAccount {
                person: person.clone(),
                username: user.username.clone(),
                email: user.email.clone(),
            })
    }

    pub fn person_skill_of(&self, person_id: &Uuid) -> Option<PersonSkill> {
        self.tables
            .lock()
            .person_skills
            .iter()
            .find(|ps| ps.person_id == *person_id)
            .cloned()
    }

    pub fn person(&self, person_id: &Uuid) -> Option<Person> {
        self.tables
            .lock()
            .persons
            .iter()
            .find(|p| p.id == *person_id)
            .cloned()
    }

    pub fn feedback_count(&self) -> usize {
        self.tables.lock().feedbacks.len()
    }
}

fn refs_by_ids<'a>(items: impl Iterator<Item = (i64, &'a str)>, ids: &[i64]) -> Vec<SkillRef> {
    let mut refs: Vec<SkillRef> = items
        .filter(|(id, _)| ids.contains(id))
        .map(|(id, name)| SkillRef { id, name: name.to_string() })
        .collect();
    refs.sort_by_key(|r| r.id);
    refs
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.lock().users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl TalentRepository for MemoryStore {
    async fn list_active_skills(&self) -> Result<Vec<Skill>, AppError> {
        let mut skills: Vec<Skill> = self
            .tables
            .lock()
            .skills
            .iter()
            .filter(|s| s.active)
            .cloned()
            .collect();
        skills.sort_by(|a, b| {
            b.display_boost_factor
                .cmp(&a.display_boost_factor)
                .then(a.id.cmp(&b.id))
        });
        Ok(skills)
    }

    async fn list_expertise_by_skill_ids(&self, skill_ids: &[i64]) -> Result<Vec<Expertise>, AppError> {
        let mut expertise: Vec<Expertise> = self
            .tables
            .lock()
            .expertise
            .iter()
            .filter(|e| skill_ids.contains(&e.skill_id))
            .cloned()
            .collect();
        expertise.sort_by_key(|e| e.id);
        Ok(expertise)
    }

    async fn list_expertise_by_ids(&self, expertise_ids: &[i64]) -> Result<Vec<Expertise>, AppError> {
        let mut expertise: Vec<Expertise> = self
            .tables
            .lock()
            .expertise
            .iter()
            .filter(|e| expertise_ids.contains(&e.id))
            .cloned()
            .collect();
        expertise.sort_by_key(|e| e.id);
        Ok(expertise)
    }

    async fn list_skill_and_expertise(
        &self,
        skill_ids: &[i64],
        expertise_ids: &[i64],
    ) -> Result<Vec<SkillExpertisePair>, AppError> {
        let tables = self.tables.lock();
        let mut matching: Vec<&Expertise> = tables
            .expertise
            .iter()
            .filter(|e| expertise_ids.contains(&e.id) && skill_ids.contains(&e.skill_id))
            .collect();
        matching.sort_by_key(|e| e.id);

        Ok(matching
            .into_iter()
            .filter_map(|e| {
                tables
                    .skills
                    .iter()
                    .find(|s| s.id == e.skill_id)
                    .map(|s| SkillExpertisePair {
                        skill: s.name.clone(),
                        expertise: e.name.clone(),
                    })
            })
            .collect())
    }

    async fn skill_refs_by_ids(&self, skill_ids: &[i64]) -> Result<Vec<SkillRef>, AppError> {
        let tables = self.tables.lock();
        Ok(refs_by_ids(
            tables.skills.iter().map(|s| (s.id, s.name.as_str())),
            skill_ids,
        ))
    }

    async fn expertise_refs_by_ids(&self, expertise_ids: &[i64]) -> Result<Vec<SkillRef>, AppError> {
        let tables = self.tables.lock();
        Ok(refs_by_ids(
            tables.expertise.iter().map(|e| (e.id, e.name.as_str())),
            expertise_ids,
        ))
    }

    async fn get_person_skill(&self, person_id: &Uuid) -> Result<Option<PersonSkill>, AppError> {
        Ok(self.person_skill_of(person_id))
    }

    async fn get_person_skill_for_user(&self, user_id: &Uuid) -> Result<Option<PersonSkill>, AppError> {
        let tables = self.tables.lock();
        let Some(person) = tables.persons.iter().find(|p| p.user_id == *user_id) else {
            return Ok(None);
        };
        Ok(tables
            .person_skills
            .iter()
            .find(|ps| ps.person_id == person.id)
            .cloned())
    }
}

#[async_trait]
impl PersonRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<PersonAccount>, AppError> {
        let tables = self.tables.lock();
        let Some(user) = tables.users.iter().find(|u| u.username == username) else {
            return Ok(None);
        };
        Ok(tables
            .persons
            .iter()
            .find(|p| p.user_id == user.id)
            .and_then(|p| Self::account_for(&tables, p)))
    }

    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<PersonAccount>, AppError> {
        let tables = self.tables.lock();
        Ok(tables
            .persons
            .iter()
            .find(|p| p.user_id == *user_id)
            .and_then(|p| Self::account_for(&tables, p)))
    }

    async fn get_status(&self, person_id: &Uuid) -> Result<Option<Status>, AppError> {
        Ok(self
            .tables
            .lock()
            .statuses
            .iter()
            .find(|s| s.person_id == *person_id)
            .cloned())
    }

    async fn save_profile(
        &self,
        person_id: &Uuid,
        update: &ProfileUpdate,
        snapshot: &SkillSnapshot,
    ) -> Result<Person, AppError> {
        let mut tables = self.tables.lock();
        let person = tables
            .persons
            .iter_mut()
            .find(|p| p.id == *person_id)
            .ok_or_else(|| AppError::NotFound("Record not found".into()))?;

        person.full_name = update.full_name.clone();
        person.preferred_name = update.preferred_name.clone();
        person.current_position = update.current_position.clone();
        person.headline = update.headline.clone();
        person.overview = update.overview.clone();
        person.location = update.location.clone();
        person.github_link = update.github_link.clone();
        person.twitter_link = update.twitter_link.clone();
        person.linkedin_link = update.linkedin_link.clone();
        person.website_link = update.website_link.clone();
        person.send_me_bounties = update.send_me_bounties;
        person.updated_at = Utc::now();
        let saved = person.clone();

        match tables.person_skills.iter_mut().find(|ps| ps.person_id == *person_id) {
            Some(existing) => {
                existing.skill = snapshot.skill.clone();
                existing.expertise = snapshot.expertise.clone();
            }
            None => tables.person_skills.push(PersonSkill {
                id: Uuid::new_v4(),
                person_id: *person_id,
                skill: snapshot.skill.clone(),
                expertise: snapshot.expertise.clone(),
            }),
        }

        Ok(saved)
    }

    async fn set_photo(&self, person_id: &Uuid, photo: Option<String>) -> Result<Person, AppError> {
        let mut tables = self.tables.lock();
        let person = tables
            .persons
            .iter_mut()
            .find(|p| p.id == *person_id)
            .ok_or_else(|| AppError::NotFound("Record not found".into()))?;
        person.photo = photo;
        person.updated_at = Utc::now();
        Ok(person.clone())
    }

    async fn list_completed_bounty_claims(&self, person_id: &Uuid) -> Result<Vec<BountyClaim>, AppError> {
        let mut claims: Vec<BountyClaim> = self
            .tables
            .lock()
            .bounty_claims
            .iter()
            .filter(|c| c.person_id == *person_id && c.kind == ClaimKind::Done)
            .cloned()
            .collect();
        claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(claims)
    }

    async fn list_product_roles(&self, person_id: &Uuid) -> Result<Vec<ProductRoleView>, AppError> {
        let tables = self.tables.lock();
        let mut roles: Vec<ProductRoleView> = tables
            .product_persons
            .iter()
            .filter(|pp| pp.person_id == *person_id)
            .filter_map(|pp| {
                tables
                    .products
                    .iter()
                    .find(|p| p.id == pp.product_id)
                    .map(|p| ProductRoleView {
                        product_id: p.id,
                        product_name: p.name.clone(),
                        product_slug: p.slug.clone(),
                        role: pp.role,
                    })
            })
            .collect();
        roles.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(roles)
    }
}

#[async_trait]
impl FeedbackRepository for MemoryStore {
    async fn create_feedback(&self, feedback: &FeedbackInsert) -> Result<Uuid, AppError> {
        let mut tables = self.tables.lock();
        let duplicate = tables
            .feedbacks
            .iter()
            .any(|f| f.provider_id == feedback.provider_id && f.recipient_id == feedback.recipient_id);
        if duplicate || !(1..=5).contains(&feedback.stars) || feedback.recipient_id == feedback.provider_id {
            return Err(AppError::Conflict("Database conflict occurred".into()));
        }

        let id = Uuid::new_v4();
        tables.feedbacks.push(Feedback {
            id,
            recipient_id: feedback.recipient_id,
            provider_id: feedback.provider_id,
            message: feedback.message.clone(),
            stars: feedback.stars,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_received(&self, recipient_id: &Uuid) -> Result<Vec<ReceivedFeedback>, AppError> {
        let tables = self.tables.lock();
        let mut received: Vec<ReceivedFeedback> = tables
            .feedbacks
            .iter()
            .filter(|f| f.recipient_id == *recipient_id)
            .filter_map(|f| {
                let provider = tables.persons.iter().find(|p| p.id == f.provider_id)?;
                let account = Self::account_for(&tables, provider)?;
                Some(ReceivedFeedback {
                    id: f.id,
                    provider_username: account.username,
                    provider_name: provider.full_name.clone(),
                    message: f.message.clone(),
                    stars: f.stars,
                    created_at: f.created_at,
                })
            })
            .collect();
        received.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(received)
    }

    async fn has_left_feedback(&self, provider_id: &Uuid, recipient_id: &Uuid) -> Result<bool, AppError> {
        Ok(self
            .tables
            .lock()
            .feedbacks
            .iter()
            .any(|f| f.provider_id == *provider_id && f.recipient_id == *recipient_id))
    }
}
