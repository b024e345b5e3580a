//! Skill availability evaluation.
//!
//! Decides whether a character may unlock a skill and explains why not. The
//! checks run in a fixed order and accumulate reasons independently; only the
//! "already unlocked" check short-circuits:
//!
//! 1. already unlocked
//! 2. required level
//! 3. required classes (any of, matched against the class lineage)
//! 4. required quests (all of)
//! 5. prerequisite links (required group: all; optional group: at least one)
//! 6. declarative attribute rules
//!
//! Evaluation is read-only. Applying an unlock is the caller's job.

use std::collections::BTreeSet;

use lorekeeper_types::availability::Availability;
use lorekeeper_types::character::PlayerCharacter;
use lorekeeper_types::skill::{Skill, SkillId};

use super::catalog::SkillCatalog;
use super::rules::check_attribute_rules;

/// Evaluate `skill` for `character`.
///
/// `catalog` supplies the class hierarchy, quest names, and the skill's
/// incoming links. The skill itself does not need to be registered in it.
pub fn evaluate(skill: &Skill, character: &PlayerCharacter, catalog: &SkillCatalog) -> Availability {
    if character.has_unlocked(skill.id) {
        return Availability::already_unlocked();
    }

    let mut reasons = Vec::new();
    check_level(skill, character, &mut reasons);
    check_classes(skill, character, catalog, &mut reasons);
    check_quests(skill, character, catalog, &mut reasons);
    check_prerequisites(skill, character, catalog, &mut reasons);
    check_rules(skill, character, &mut reasons);

    tracing::debug!(
        skill = %skill.id,
        character = %character.id,
        blocked_by = reasons.len(),
        "evaluated skill availability"
    );

    Availability::from_reasons(reasons)
}

/// Whether the character can unlock the skill right now.
pub fn can_unlock(skill: &Skill, character: &PlayerCharacter, catalog: &SkillCatalog) -> bool {
    evaluate(skill, character, catalog).can_unlock
}

fn check_level(skill: &Skill, character: &PlayerCharacter, reasons: &mut Vec<String>) {
    if let Some(required) = skill.required_level {
        if character.level < required {
            reasons.push(format!("requires character level {required}"));
        }
    }
}

fn check_classes(
    skill: &Skill,
    character: &PlayerCharacter,
    catalog: &SkillCatalog,
    reasons: &mut Vec<String>,
) {
    if skill.required_classes.is_empty() {
        return;
    }

    let classes = catalog.classes();
    let lineage = classes.lineage(character.class_id);
    let matched = skill
        .required_classes
        .iter()
        .any(|required| lineage.contains(required));

    if !matched {
        let names: Vec<String> = skill
            .required_classes
            .iter()
            .map(|id| classes.name_of(*id))
            .collect();
        reasons.push(format!("requires one of classes: {}", names.join(", ")));
    }
}

fn check_quests(
    skill: &Skill,
    character: &PlayerCharacter,
    catalog: &SkillCatalog,
    reasons: &mut Vec<String>,
) {
    let missing: Vec<String> = skill
        .required_quests
        .iter()
        .filter(|quest| !character.completed_quests.contains(*quest))
        .map(|quest| catalog.quest_name(*quest))
        .collect();

    if !missing.is_empty() {
        reasons.push(format!("requires completed quests: {}", missing.join(", ")));
    }
}

fn check_prerequisites(
    skill: &Skill,
    character: &PlayerCharacter,
    catalog: &SkillCatalog,
    reasons: &mut Vec<String>,
) {
    let unlocked: BTreeSet<SkillId> = character.unlocked_skill_ids();
    let (required, optional): (Vec<_>, Vec<_>) = catalog
        .incoming_links(skill.id)
        .partition(|link| link.requires_all_parents);

    let missing: Vec<String> = required
        .iter()
        .filter(|link| !unlocked.contains(&link.parent_id))
        .map(|link| catalog.skill_name(link.parent_id))
        .collect();
    if !missing.is_empty() {
        reasons.push(format!("requires all parent skills: {}", missing.join(", ")));
    }

    if optional.is_empty() {
        return;
    }
    let any_unlocked = optional.iter().any(|link| unlocked.contains(&link.parent_id));
    if !any_unlocked {
        let names: Vec<String> = optional
            .iter()
            .map(|link| catalog.skill_name(link.parent_id))
            .collect();
        reasons.push(format!("requires at least one of: {}", names.join(", ")));
    }
}

fn check_rules(skill: &Skill, character: &PlayerCharacter, reasons: &mut Vec<String>) {
    if let Some(rules) = &skill.availability_rules {
        reasons.extend(check_attribute_rules(rules, &character.attributes));
    }
}
