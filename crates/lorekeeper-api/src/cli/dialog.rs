//! CLI dialog subcommands.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Subcommand;
use console::style;

use lorekeeper_core::dialog::validate_choice;
use lorekeeper_core::repository::character::CharacterRepository;
use lorekeeper_infra::documents::load_dialog_graph;
use lorekeeper_types::character::CharacterId;

use crate::state::AppState;

/// Dialog subcommands.
#[derive(Subcommand)]
pub enum DialogCommand {
    /// Validate a player's choice at a dialog node and show where it leads.
    Choose {
        /// Dialog graph document (`{nodes, connections}`).
        file: PathBuf,

        /// Current dialog node id.
        #[arg(long)]
        node: i64,

        /// Connection id the player picked.
        #[arg(long)]
        choice: i64,

        /// Character making the choice.
        #[arg(long)]
        character: i64,
    },
}

pub async fn run(state: &AppState, action: DialogCommand, json: bool) -> Result<()> {
    match action {
        DialogCommand::Choose {
            file,
            node,
            choice,
            character,
        } => choose(state, file, node, choice, character, json).await,
    }
}

pub async fn choose(
    state: &AppState,
    file: PathBuf,
    node: i64,
    choice: i64,
    character: i64,
    json: bool,
) -> Result<()> {
    let graph = load_dialog_graph(&file).await?;
    let player = state
        .store
        .get(CharacterId(character))
        .await?
        .ok_or_else(|| anyhow!("character {character} not found"))?;

    let outcome = validate_choice(&graph, node, choice, &player);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!();
    match outcome.next_node_id {
        Some(next) if outcome.valid => {
            let text = graph
                .nodes
                .iter()
                .find(|n| n.id == next)
                .and_then(|n| n.text.as_deref())
                .unwrap_or("");
            println!("  {} Choice {} leads to node {}", style("→").green().bold(), choice, style(next).cyan());
            if !text.is_empty() {
                println!("    {}", style(text).italic());
            }
        }
        _ => {
            let message = outcome.message.as_deref().unwrap_or("choice rejected");
            println!("  {} {}", style("✗").red().bold(), message);
            for reason in &outcome.unmet {
                println!("    {} {}", style("•").red(), reason);
            }
        }
    }
    println!();
    Ok(())
}
