//! Declarative validation for person create/update payloads.
//!
//! # Responsibility
//! - Evaluate every field rule and collect all violations in one pass.
//! - Produce field-scoped messages keyed by stable field paths.
//!
//! # Invariants
//! - Evaluation never short-circuits; every rule runs on every input.
//! - Report order is deterministic: person fields in declaration order, then
//!   per-skill errors in list order.
//! - Evaluation has no side effects.

use crate::model::dto::{PersonRequest, SkillRequest};
use crate::model::person::{SKILL_LEVEL_MAX, SKILL_LEVEL_MIN};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Maximum length, in characters, of every name-like field.
pub const MAX_NAME_CHARS: usize = 50;

/// Rule family that produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    MaxLength,
    Range,
    Uniqueness,
}

/// One rule violation attached to a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// e.g. `Name`, `Skills[2].Level`, `Skills[1]`.
    pub field: String,
    pub rule: RuleKind,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, rule: RuleKind, message: &str) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.to_string(),
        }
    }
}

/// Field path to message mapping carried by a validation failure.
///
/// One message per path: a later violation for the same path replaces the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        let mut map = BTreeMap::new();
        for error in errors {
            map.insert(error.field, error.message);
        }
        Self(map)
    }
}

struct TextRule {
    field: &'static str,
    required_message: &'static str,
    max_length_message: &'static str,
}

const NAME_RULE: TextRule = TextRule {
    field: "Name",
    required_message: "Name must not be empty",
    max_length_message: "Name must not exceed 50 characters",
};

const DISPLAY_NAME_RULE: TextRule = TextRule {
    field: "DisplayName",
    required_message: "Display name must not be empty",
    max_length_message: "Display name must not exceed 50 characters",
};

const SKILL_NAME_RULE: TextRule = TextRule {
    field: "Name",
    required_message: "Skill name must not be empty",
    max_length_message: "Skill name must not exceed 50 characters",
};

const SKILL_LEVEL_MESSAGE: &str = "Skill level must be between 1 and 10";
const SKILL_UNIQUE_MESSAGE: &str = "Skill names must be unique within the list";

/// Validates a create or update payload.
///
/// Returns every violation found; an empty vector means the payload is valid.
pub fn validate_person_request(request: &PersonRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_text(&mut errors, NAME_RULE.field, &request.name, &NAME_RULE);
    check_text(
        &mut errors,
        DISPLAY_NAME_RULE.field,
        &request.display_name,
        &DISPLAY_NAME_RULE,
    );

    if let Some(skills) = request.skills.as_deref() {
        let name_counts = count_names(skills);
        for (index, skill) in skills.iter().enumerate() {
            let item_path = format!("Skills[{index}]");
            check_text(
                &mut errors,
                &format!("{item_path}.{}", SKILL_NAME_RULE.field),
                &skill.name,
                &SKILL_NAME_RULE,
            );
            if !(SKILL_LEVEL_MIN..=SKILL_LEVEL_MAX).contains(&skill.level) {
                errors.push(FieldError::new(
                    format!("{item_path}.Level"),
                    RuleKind::Range,
                    SKILL_LEVEL_MESSAGE,
                ));
            }
            if name_counts.get(skill.name.as_str()).copied().unwrap_or(0) > 1 {
                errors.push(FieldError::new(
                    item_path,
                    RuleKind::Uniqueness,
                    SKILL_UNIQUE_MESSAGE,
                ));
            }
        }
    }

    errors
}

fn check_text(errors: &mut Vec<FieldError>, path: &str, value: &str, rule: &TextRule) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(
            path,
            RuleKind::Required,
            rule.required_message,
        ));
    }
    if value.chars().count() > MAX_NAME_CHARS {
        errors.push(FieldError::new(
            path,
            RuleKind::MaxLength,
            rule.max_length_message,
        ));
    }
}

fn count_names(skills: &[SkillRequest]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for skill in skills {
        *counts.entry(skill.name.as_str()).or_insert(0) += 1;
    }
    counts
}
