//! Skill set reconciliation.
//!
//! # Responsibility
//! - Compute the delete/update/insert plan that converges a person's stored
//!   skills onto a desired skill set, keyed by skill name.
//!
//! # Invariants
//! - Inputs are never mutated; the result is a plan for the caller to apply.
//! - Name matching is exact and case-sensitive.
//! - Every matched skill is updated, even when its level is unchanged.
//! - Runs in O(|current| + |desired|).

use crate::model::person::{NewSkill, Skill};
use std::collections::{HashMap, HashSet};

/// Level overwrite for one existing skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillUpdate {
    /// The stored skill as loaded, before the overwrite.
    pub skill: Skill,
    pub level: i64,
}

/// Changes needed to turn the current skill set into the desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillPlan {
    pub to_delete: Vec<Skill>,
    pub to_update: Vec<SkillUpdate>,
    pub to_insert: Vec<NewSkill>,
}

impl SkillPlan {
    pub fn is_empty(&self) -> bool {
        self.operation_count() == 0
    }

    pub fn operation_count(&self) -> usize {
        self.to_delete.len() + self.to_update.len() + self.to_insert.len()
    }
}

/// Plans the skill changes for a full-replacement update.
///
/// `desired = None` (list omitted) behaves like an empty list: every current
/// skill is deleted. When `desired` repeats a name, the first entry supplies
/// the update level and each unmatched entry is planned as its own insert;
/// callers are expected to have rejected duplicates beforehand.
pub fn reconcile(current: &[Skill], desired: Option<&[NewSkill]>) -> SkillPlan {
    let desired = desired.unwrap_or(&[]);

    let mut desired_levels: HashMap<&str, i64> = HashMap::with_capacity(desired.len());
    for entry in desired {
        desired_levels.entry(entry.name.as_str()).or_insert(entry.level);
    }

    let mut plan = SkillPlan::default();
    for skill in current {
        match desired_levels.get(skill.name.as_str()) {
            Some(&level) => plan.to_update.push(SkillUpdate {
                skill: skill.clone(),
                level,
            }),
            None => plan.to_delete.push(skill.clone()),
        }
    }

    let current_names: HashSet<&str> = current.iter().map(|skill| skill.name.as_str()).collect();
    plan.to_insert = desired
        .iter()
        .filter(|entry| !current_names.contains(entry.name.as_str()))
        .cloned()
        .collect();

    plan
}

#[cfg(test)]
mod tests {
    use super::{reconcile, SkillUpdate};
    use crate::model::person::{NewSkill, Skill};

    fn stored(id: i64, name: &str, level: i64) -> Skill {
        Skill {
            id,
            person_id: 1,
            name: name.to_string(),
            level,
        }
    }

    #[test]
    fn updates_matches_and_inserts_new_names() {
        let current = vec![stored(1, "Go", 5)];
        let desired = vec![NewSkill::new("Go", 7), NewSkill::new("Rust", 3)];

        let plan = reconcile(&current, Some(desired.as_slice()));

        assert!(plan.to_delete.is_empty());
        assert_eq!(
            plan.to_update,
            vec![SkillUpdate {
                skill: stored(1, "Go", 5),
                level: 7,
            }]
        );
        assert_eq!(plan.to_insert, vec![NewSkill::new("Rust", 3)]);
    }

    #[test]
    fn absent_or_empty_desired_deletes_everything() {
        let current = vec![stored(1, "Go", 5), stored(2, "Rust", 3)];

        for desired in [None, Some(&[][..])] {
            let plan = reconcile(&current, desired);
            assert_eq!(plan.to_delete, current);
            assert!(plan.to_update.is_empty());
            assert!(plan.to_insert.is_empty());
        }
    }

    #[test]
    fn empty_on_both_sides_is_a_no_op() {
        assert!(reconcile(&[], None).is_empty());
        assert!(reconcile(&[], Some(&[][..])).is_empty());
    }

    #[test]
    fn empty_current_inserts_everything() {
        let desired = vec![NewSkill::new("Go", 1), NewSkill::new("Rust", 10)];
        let plan = reconcile(&[], Some(desired.as_slice()));
        assert!(plan.to_delete.is_empty());
        assert!(plan.to_update.is_empty());
        assert_eq!(plan.to_insert, desired);
    }

    #[test]
    fn unchanged_levels_are_still_updated() {
        let current = vec![stored(1, "Go", 5)];
        let plan = reconcile(&current, Some(&[NewSkill::new("Go", 5)][..]));
        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].level, 5);
    }

    #[test]
    fn names_match_case_sensitively() {
        let current = vec![stored(1, "rust", 5)];
        let plan = reconcile(&current, Some(&[NewSkill::new("Rust", 5)][..]));
        assert_eq!(plan.to_delete.len(), 1);
        assert_eq!(plan.to_insert.len(), 1);
        assert!(plan.to_update.is_empty());
    }

    #[test]
    fn duplicate_desired_names_follow_first_match() {
        let current = vec![stored(1, "Go", 5)];
        let desired = vec![
            NewSkill::new("Go", 2),
            NewSkill::new("Go", 9),
            NewSkill::new("Zig", 4),
            NewSkill::new("Zig", 6),
        ];

        let plan = reconcile(&current, Some(desired.as_slice()));

        assert_eq!(plan.to_update[0].level, 2);
        assert_eq!(
            plan.to_insert,
            vec![NewSkill::new("Zig", 4), NewSkill::new("Zig", 6)]
        );
    }

    #[test]
    fn inputs_are_left_untouched() {
        let current = vec![stored(1, "Go", 5), stored(2, "C", 2)];
        let desired = vec![NewSkill::new("Go", 8)];
        let before = (current.clone(), desired.clone());

        let _ = reconcile(&current, Some(desired.as_slice()));

        assert_eq!((current, desired), before);
    }
}
