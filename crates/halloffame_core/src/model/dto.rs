//! Request and summary shapes exchanged with transport callers.
//!
//! Field names follow the external JSON schema (`name`, `displayName`,
//! `skills`, `level`). Conversions to and from the domain model are written
//! out field by field.

use crate::model::person::{NewPerson, NewSkill, Person, Skill};
use serde::{Deserialize, Serialize};

/// Incoming person payload shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    pub name: String,
    pub display_name: String,
    /// `None` when the client omitted the list or sent `null`.
    #[serde(default)]
    pub skills: Option<Vec<SkillRequest>>,
}

/// Create payload.
pub type CreateRequest = PersonRequest;
/// Update payload. Same shape as create; full-replacement semantics.
pub type UpdateRequest = PersonRequest;

/// Incoming skill entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequest {
    pub name: String,
    pub level: i64,
}

/// Read-only person projection. Carries no identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub name: String,
    pub display_name: String,
    pub skills: Option<Vec<SkillSummary>>,
}

/// Read-only skill projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub name: String,
    pub level: i64,
}

impl PersonRequest {
    /// Builds the pre-persistence aggregate, skills mapped 1:1.
    pub fn to_new_person(&self) -> NewPerson {
        NewPerson {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            skills: self.desired_skills().unwrap_or_default(),
        }
    }

    /// Desired skill set for reconciliation; `None` when the list is absent.
    pub fn desired_skills(&self) -> Option<Vec<NewSkill>> {
        self.skills
            .as_ref()
            .map(|skills| skills.iter().map(SkillRequest::to_new_skill).collect())
    }
}

impl SkillRequest {
    pub fn to_new_skill(&self) -> NewSkill {
        NewSkill::new(self.name.clone(), self.level)
    }
}

impl From<&Person> for PersonSummary {
    fn from(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            display_name: person.display_name.clone(),
            skills: Some(person.skills.iter().map(SkillSummary::from).collect()),
        }
    }
}

impl From<&Skill> for SkillSummary {
    fn from(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            level: skill.level,
        }
    }
}
