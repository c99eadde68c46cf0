use chrono::{Duration, Utc};
use uuid::Uuid;

use talent_backend::{
    auth::password::hash_password,
    entities::{
        bounty::{BountyClaim, ClaimKind},
        person::{Person, PersonSkill, Status},
        product::ProductRole,
        skill::{Expertise, Skill, SkillRef},
        user::User,
    },
};

use super::memory_store::{Feedback, MemoryStore, Product, ProductPerson};

pub const DEFAULT_PASSWORD: &str = "CorrectHorse1!";

/// A seeded account with its person profile and a signed access token.
#[derive(Clone)]
pub struct TestPerson {
    pub user: User,
    pub person: Person,
    pub token: String,
}

impl TestPerson {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn user(store: &MemoryStore, username: &str) -> User {
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(DEFAULT_PASSWORD).expect("hash test password"),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    store.tables.lock().users.push(user.clone());
    user
}

pub fn person(store: &MemoryStore, user: &User) -> Person {
    let now = Utc::now();
    let person = Person {
        id: Uuid::new_v4(),
        user_id: user.id,
        full_name: format!("{} Tester", user.username),
        preferred_name: user.username.clone(),
        current_position: "Engineer".into(),
        headline: "Builds things".into(),
        overview: "I like **Rust**.".into(),
        location: "Lagos".into(),
        github_link: format!("https://github.com/{}", user.username),
        twitter_link: format!("https://twitter.com/{}/", user.username),
        linkedin_link: format!("www.linkedin.com/in/{}", user.username),
        website_link: String::new(),
        photo: None,
        send_me_bounties: false,
        created_at: now,
        updated_at: now,
    };
    store.tables.lock().persons.push(person.clone());
    person
}

pub fn skill(store: &MemoryStore, name: &str, active: bool, display_boost_factor: i32) -> Skill {
    let mut tables = store.tables.lock();
    let skill = Skill {
        id: tables.skills.len() as i64 + 1,
        parent_id: None,
        name: name.to_string(),
        active,
        selectable: true,
        display_boost_factor,
    };
    tables.skills.push(skill.clone());
    skill
}

pub fn expertise(store: &MemoryStore, skill: &Skill, name: &str) -> Expertise {
    let mut tables = store.tables.lock();
    let expertise = Expertise {
        id: tables.expertise.len() as i64 + 1,
        skill_id: skill.id,
        parent_id: None,
        name: name.to_string(),
        selectable: true,
        fa_icon: String::new(),
    };
    tables.expertise.push(expertise.clone());
    expertise
}

pub fn status(store: &MemoryStore, person: &Person) -> Status {
    let status = Status {
        id: Uuid::new_v4(),
        person_id: person.id,
        name: "Drone".into(),
        points: 0,
    };
    store.tables.lock().statuses.push(status.clone());
    status
}

pub fn person_skill(store: &MemoryStore, person: &Person, skills: &[&Skill], expertise: &[&Expertise]) -> PersonSkill {
    let person_skill = PersonSkill {
        id: Uuid::new_v4(),
        person_id: person.id,
        skill: skills.iter().map(|s| SkillRef::from(*s)).collect(),
        expertise: expertise.iter().map(|e| SkillRef::from(*e)).collect(),
    };
    store.tables.lock().person_skills.push(person_skill.clone());
    person_skill
}

pub fn feedback(store: &MemoryStore, provider: &Person, recipient: &Person, stars: i16, age_minutes: i64) {
    store.tables.lock().feedbacks.push(Feedback {
        id: Uuid::new_v4(),
        recipient_id: recipient.id,
        provider_id: provider.id,
        message: format!("{stars} stars"),
        stars,
        created_at: Utc::now() - Duration::minutes(age_minutes),
    });
}

pub fn bounty_claim(store: &MemoryStore, person: &Person, title: &str, kind: ClaimKind) {
    store.tables.lock().bounty_claims.push(BountyClaim {
        id: Uuid::new_v4(),
        person_id: person.id,
        bounty_title: title.to_string(),
        kind,
        created_at: Utc::now(),
    });
}

pub fn product_role(store: &MemoryStore, person: &Person, name: &str, role: ProductRole) {
    let product = Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
    };
    let mut tables = store.tables.lock();
    tables.product_persons.push(ProductPerson {
        id: Uuid::new_v4(),
        person_id: person.id,
        product_id: product.id,
        role,
    });
    tables.products.push(product);
}
