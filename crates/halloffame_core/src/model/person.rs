//! Person aggregate model.
//!
//! # Responsibility
//! - Define the canonical `Person` record and its owned `Skill` collection.
//! - Provide pre-persistence shapes (`NewPerson`, `NewSkill`).
//!
//! # Invariants
//! - `id` values are assigned by storage and never change afterwards.
//! - `Skill::person_id` always equals the owning `Person::id`.

/// Storage-assigned identifier of a person.
pub type PersonId = i64;

/// Storage-assigned identifier of a skill row.
pub type SkillId = i64;

/// Inclusive lower bound for a skill level.
pub const SKILL_LEVEL_MIN: i64 = 1;
/// Inclusive upper bound for a skill level.
pub const SKILL_LEVEL_MAX: i64 = 10;

/// Person aggregate: the person together with every skill it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub display_name: String,
    /// Unordered from the domain's point of view; storage returns rows by id.
    pub skills: Vec<Skill>,
}

impl Person {
    /// Looks up an owned skill by exact name.
    pub fn skill_named(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.name == name)
    }
}

/// One named skill rating owned by a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: SkillId,
    /// Owning person. Resolved through the aggregate, not a live reference.
    pub person_id: PersonId,
    /// Reconciliation key.
    pub name: String,
    pub level: i64,
}

/// Person that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub display_name: String,
    pub skills: Vec<NewSkill>,
}

/// Skill that has not been persisted yet; storage scopes it to an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSkill {
    pub name: String,
    pub level: i64,
}

impl NewSkill {
    pub fn new(name: impl Into<String>, level: i64) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}
