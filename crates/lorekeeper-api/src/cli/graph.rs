//! CLI editor graph subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;

use lorekeeper_core::graph::layout;
use lorekeeper_core::repository::skill_graph::SkillGraphRepository;
use lorekeeper_core::skill::catalog::SkillCatalog;
use lorekeeper_infra::documents::{load_layout_request, write_json};
use lorekeeper_types::graph::LayoutRequest;

use crate::state::AppState;

/// Editor graph subcommands.
#[derive(Subcommand)]
pub enum GraphCommand {
    /// Auto-arrange an exported editor graph (`{nodes, edges, config?}`).
    Layout {
        /// Graph document to read.
        file: PathBuf,

        /// Write the arranged graph here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the stored skill graph for dangling links, link cycles, and
    /// class inheritance problems.
    Validate,
}

pub async fn run(state: &AppState, action: GraphCommand, json: bool) -> Result<()> {
    match action {
        GraphCommand::Layout { file, output } => layout_graph(state, file, output, json).await,
        GraphCommand::Validate => validate_graph(state, json).await,
    }
}

/// Lay out a graph file. A `config` in the document overrides `[layout]`.
pub async fn layout_graph(
    state: &AppState,
    file: PathBuf,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let request = load_layout_request(&file).await?;
    let config = request.config.unwrap_or(state.config.layout);

    let nodes = layout(&request.nodes, &request.edges, &config);
    let arranged = LayoutRequest {
        nodes,
        edges: request.edges,
        config: request.config,
    };

    match output {
        Some(path) => {
            write_json(&path, &arranged).await?;
            if json {
                let body = serde_json::json!({ "output": path, "nodes": arranged.nodes.len() });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!();
                println!(
                    "  {} Arranged {} nodes into {}",
                    style("✓").green().bold(),
                    style(arranged.nodes.len()).bold(),
                    style(path.display()).cyan()
                );
                println!();
            }
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&arranged)?);
        }
    }

    Ok(())
}

/// Validate the skill graph stored in the data directory.
pub async fn validate_graph(state: &AppState, json: bool) -> Result<()> {
    let graph = state
        .store
        .load()
        .await
        .with_context(|| format!("failed to load {}", state.store.skills_path().display()))?;
    let (skills, links, classes) = (graph.skills.len(), graph.links.len(), graph.classes.len());

    let catalog = SkillCatalog::new(graph).with_max_lineage_depth(state.config.evaluator.max_lineage_depth);
    let result = catalog.validate();

    if json {
        let body = serde_json::json!({
            "valid": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
            "skills": skills,
            "links": links,
            "classes": classes,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!();
        match &result {
            Ok(()) => println!(
                "  {} Skill graph is valid ({} skills, {} links, {} classes)",
                style("✓").green().bold(),
                skills,
                links,
                classes
            ),
            Err(e) => println!("  {} {}", style("✗").red().bold(), e),
        }
        println!();
    }

    result.context("skill graph failed validation")
}
