//! CLI skill progression subcommands.
//!
//! `check` explains whether a character may unlock a skill, `unlock` applies
//! it, and `list` shows every skill in the tree for a character.

use anyhow::{Result, bail};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use lorekeeper_types::availability::{Availability, SkillAvailability};
use lorekeeper_types::character::CharacterId;
use lorekeeper_types::error::ProgressionError;
use lorekeeper_types::skill::SkillId;

use crate::state::AppState;

/// Skill progression subcommands.
#[derive(Subcommand)]
pub enum SkillCommand {
    /// Explain whether a character can unlock a skill.
    Check {
        /// Character id.
        character: i64,
        /// Skill id.
        skill: i64,
    },

    /// Unlock a skill for a character if every requirement is met.
    Unlock {
        /// Character id.
        character: i64,
        /// Skill id.
        skill: i64,
    },

    /// List every skill with its availability for a character.
    #[command(alias = "ls")]
    List {
        /// Character id.
        character: i64,
    },
}

pub async fn run(state: &AppState, action: SkillCommand, json: bool) -> Result<()> {
    match action {
        SkillCommand::Check { character, skill } => check_skill(state, character, skill, json).await,
        SkillCommand::Unlock { character, skill } => unlock_skill(state, character, skill, json).await,
        SkillCommand::List { character } => list_skills(state, character, json).await,
    }
}

fn print_reasons(reasons: &[String]) {
    for reason in reasons {
        println!("    {} {}", style("•").red(), reason);
    }
}

/// Evaluate a single skill without changing the character.
pub async fn check_skill(state: &AppState, character: i64, skill: i64, json: bool) -> Result<()> {
    let availability = state
        .progression
        .check(CharacterId(character), SkillId(skill))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&availability)?);
        return Ok(());
    }

    println!();
    match availability {
        Availability {
            already_unlocked: true,
            ..
        } => {
            println!("  {} Skill {} is already unlocked", style("●").green(), style(skill).cyan());
        }
        Availability {
            can_unlock: true, ..
        } => {
            println!("  {} Skill {} can be unlocked", style("✓").green().bold(), style(skill).cyan());
        }
        Availability { reasons, .. } => {
            println!("  {} Skill {} is locked:", style("✗").red().bold(), style(skill).cyan());
            print_reasons(&reasons);
        }
    }
    println!();
    Ok(())
}

/// Unlock a skill and persist the character.
pub async fn unlock_skill(state: &AppState, character: i64, skill: i64, json: bool) -> Result<()> {
    match state
        .progression
        .unlock(CharacterId(character), SkillId(skill))
        .await
    {
        Ok(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!();
                println!(
                    "  {} Unlocked skill {} for character {}",
                    style("✓").green().bold(),
                    style(skill).cyan(),
                    style(character).cyan()
                );
                println!();
            }
            Ok(())
        }
        Err(ProgressionError::Locked { skill, reasons }) => {
            if json {
                let body = serde_json::json!({ "unlocked": false, "skill": skill, "reasons": reasons });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!();
                println!("  {} Skill {} cannot be unlocked:", style("✗").red().bold(), style(skill).cyan());
                print_reasons(&reasons);
                println!();
            }
            bail!("skill {skill} is locked")
        }
        Err(other) => Err(other.into()),
    }
}

fn status_cell(availability: &Availability) -> Cell {
    if availability.already_unlocked {
        Cell::new("● unlocked").fg(Color::Green)
    } else if availability.can_unlock {
        Cell::new("○ available").fg(Color::Cyan)
    } else {
        Cell::new("✗ locked").fg(Color::Red)
    }
}

fn build_table(skills: &[SkillAvailability]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Skill").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Blocked By").fg(Color::White),
    ]);

    for entry in skills {
        let blocked_by = if entry.availability.can_unlock || entry.availability.already_unlocked {
            String::new()
        } else {
            entry.availability.reasons.join("\n")
        };
        table.add_row(vec![
            Cell::new(entry.skill_id),
            Cell::new(&entry.name),
            status_cell(&entry.availability),
            Cell::new(blocked_by),
        ]);
    }

    table
}

/// Show every skill's availability for a character.
pub async fn list_skills(state: &AppState, character: i64, json: bool) -> Result<()> {
    let skills = state.progression.list(CharacterId(character)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
        return Ok(());
    }

    if skills.is_empty() {
        println!();
        println!(
            "  {} No skills authored yet. Add them to {}",
            style("i").blue().bold(),
            style(state.store.skills_path().display()).yellow()
        );
        println!();
        return Ok(());
    }

    let available = skills
        .iter()
        .filter(|s| s.availability.can_unlock)
        .count();

    println!();
    println!("{}", build_table(&skills));
    println!(
        "  {} skills, {} available now",
        style(skills.len()).bold(),
        style(available).green().bold()
    );
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_reasons_only_for_locked_skills() {
        let skills = vec![
            SkillAvailability {
                skill_id: SkillId(1),
                name: "Arcane Pulse".to_string(),
                availability: Availability::already_unlocked(),
            },
            SkillAvailability {
                skill_id: SkillId(2),
                name: "Fireball".to_string(),
                availability: Availability::from_reasons(vec!["requires character level 5".to_string()]),
            },
        ];
        let mut table = build_table(&skills);
        table.set_content_arrangement(ContentArrangement::Disabled);
        let rendered = table.to_string();
        assert!(rendered.contains("Fireball"));
        assert!(rendered.contains("requires character level 5"));
        assert!(!rendered.contains("skill already unlocked"));
    }
}
