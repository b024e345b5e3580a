//! CLI command definitions and dispatch for the `lore` binary.
//!
//! Uses clap derive macros for argument parsing. Commands are grouped by
//! noun (e.g., `lore skill check`, `lore graph layout`).

pub mod dialog;
pub mod graph;
pub mod skill;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Skill progression and editor tooling for RPG worlds.
#[derive(Parser)]
#[command(name = "lore", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit log lines on stderr as JSON.
    #[arg(long, global = true, env = "LOREKEEPER_LOG_JSON")]
    pub log_json: bool,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true, env = "LOREKEEPER_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check, unlock, and list skills for a character.
    Skill {
        #[command(subcommand)]
        action: skill::SkillCommand,
    },

    /// Editor graph tooling (auto-layout, skill graph validation).
    Graph {
        #[command(subcommand)]
        action: graph::GraphCommand,
    },

    /// Walk NPC dialog graphs.
    Dialog {
        #[command(subcommand)]
        action: dialog::DialogCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_skill_check_with_globals() {
        let cli = Cli::try_parse_from(["lore", "skill", "check", "3", "12", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Skill {
                action: skill::SkillCommand::Check { character, skill },
            } => {
                assert_eq!(character, 3);
                assert_eq!(skill, 12);
            }
            _ => panic!("expected skill check"),
        }
    }

    #[test]
    fn test_parse_logging_flags() {
        let cli = Cli::try_parse_from(["lore", "graph", "validate", "--log-json", "--otel"]).unwrap();
        assert!(cli.log_json);
        assert!(cli.otel);
        assert!(!cli.json);

        let cli = Cli::try_parse_from(["lore", "graph", "validate"]).unwrap();
        assert!(!cli.log_json);
    }

    #[test]
    fn test_parse_dialog_choose() {
        let cli = Cli::try_parse_from([
            "lore", "dialog", "choose", "npc.json", "--node", "2", "--choice", "11", "--character", "1",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Dialog {
                action: dialog::DialogCommand::Choose { node: 2, choice: 11, character: 1, .. }
            }
        ));
    }
}
