use serde::{Deserialize, Serialize};

/// A named competency tag shared by every person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub active: bool,
    pub selectable: bool,
    pub display_boost_factor: i32,
}

/// A sub-category of a [`Skill`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Expertise {
    pub id: i64,
    pub skill_id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub selectable: bool,
    pub fa_icon: String,
}

/// `{id, name}` pair kept in a person's skill snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SkillRef {
    pub id: i64,
    pub name: String,
}

impl From<&Skill> for SkillRef {
    fn from(skill: &Skill) -> Self {
        SkillRef {
            id: skill.id,
            name: skill.name.clone(),
        }
    }
}

impl From<&Expertise> for SkillRef {
    fn from(expertise: &Expertise) -> Self {
        SkillRef {
            id: expertise.id,
            name: expertise.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SkillExpertisePair {
    pub skill: String,
    pub expertise: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpertiseListResponse {
    #[serde(rename = "expertiseList")]
    pub expertise_list: Vec<Expertise>,

    #[serde(rename = "expertiseIDList")]
    pub expertise_id_list: Vec<i64>,
}

impl From<Vec<Expertise>> for ExpertiseListResponse {
    fn from(expertise_list: Vec<Expertise>) -> Self {
        let expertise_id_list = expertise_list.iter().map(|e| e.id).collect();
        ExpertiseListResponse {
            expertise_list,
            expertise_id_list,
        }
    }
}

/// Query string of `get_expertise`.
#[derive(Debug, Default, Deserialize)]
pub struct SelectedSkillsQuery {
    #[serde(default)]
    pub selected_skills: Option<String>,
}

/// Query string of `list-skill-and-expertise`.
#[derive(Debug, Default, Deserialize)]
pub struct SkillAndExpertiseQuery {
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
}
