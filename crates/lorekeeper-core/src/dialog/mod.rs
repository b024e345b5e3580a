//! NPC dialog traversal.
//!
//! Validates a player's choice at a dialog node and resolves the node the
//! conversation moves to.

pub mod conditions;

use lorekeeper_types::character::PlayerCharacter;
use lorekeeper_types::dialog::{ChoiceOutcome, DialogGraph};

pub use conditions::evaluate_conditions;

pub const NODE_NOT_FOUND: &str = "dialog node not found";
pub const INVALID_CHOICE: &str = "invalid choice for this dialog node";
pub const CONDITIONS_NOT_MET: &str = "conditions not met for this choice";

/// Check that `choice_id` is a connection leaving `node_id` whose conditions
/// the character meets.
pub fn validate_choice(
    graph: &DialogGraph,
    node_id: i64,
    choice_id: i64,
    character: &PlayerCharacter,
) -> ChoiceOutcome {
    if !graph.nodes.iter().any(|n| n.id == node_id) {
        return ChoiceOutcome::rejected(NODE_NOT_FOUND);
    }

    let Some(connection) = graph
        .connections
        .iter()
        .find(|c| c.id == choice_id && c.source == node_id)
    else {
        return ChoiceOutcome::rejected(INVALID_CHOICE);
    };

    if let Some(conditions) = &connection.conditions {
        let unmet = evaluate_conditions(conditions, character);
        if !unmet.is_empty() {
            tracing::debug!(node = node_id, choice = choice_id, unmet = unmet.len(), "dialog choice gated");
            return ChoiceOutcome {
                unmet,
                ..ChoiceOutcome::rejected(CONDITIONS_NOT_MET)
            };
        }
    }

    ChoiceOutcome::accepted(connection.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeeper_types::class::ClassId;
    use lorekeeper_types::dialog::{DialogConnection, DialogNode};
    use serde_json::json;

    fn node(id: i64, node_type: &str) -> DialogNode {
        DialogNode {
            id,
            node_type: node_type.to_string(),
            text: None,
            conditions: None,
        }
    }

    fn connection(id: i64, source: i64, target: i64) -> DialogConnection {
        DialogConnection {
            id,
            source,
            target,
            choice_text: None,
            conditions: None,
        }
    }

    fn blacksmith() -> DialogGraph {
        let mut gated = connection(12, 2, 4);
        gated.conditions = Some(json!({"level": {"min": 5}}));
        DialogGraph {
            nodes: vec![node(1, "start"), node(2, "choice"), node(3, "end"), node(4, "end")],
            connections: vec![connection(10, 1, 2), connection(11, 2, 3), gated],
        }
    }

    fn apprentice() -> PlayerCharacter {
        PlayerCharacter::new(1, "Apprentice", ClassId(1)).with_level(2)
    }

    #[test]
    fn test_valid_choice_returns_target() {
        let outcome = validate_choice(&blacksmith(), 2, 11, &apprentice());
        assert_eq!(outcome, ChoiceOutcome::accepted(3));
    }

    #[test]
    fn test_unknown_node() {
        let outcome = validate_choice(&blacksmith(), 99, 11, &apprentice());
        assert!(!outcome.valid);
        assert_eq!(outcome.message.as_deref(), Some("dialog node not found"));
        assert_eq!(outcome.next_node_id, None);
    }

    #[test]
    fn test_choice_from_another_node() {
        let outcome = validate_choice(&blacksmith(), 1, 11, &apprentice());
        assert_eq!(outcome.message.as_deref(), Some("invalid choice for this dialog node"));

        let outcome = validate_choice(&blacksmith(), 2, 404, &apprentice());
        assert_eq!(outcome.message.as_deref(), Some("invalid choice for this dialog node"));
    }

    #[test]
    fn test_gated_choice() {
        let outcome = validate_choice(&blacksmith(), 2, 12, &apprentice());
        assert!(!outcome.valid);
        assert_eq!(outcome.message.as_deref(), Some("conditions not met for this choice"));
        assert_eq!(outcome.unmet, vec!["level must be at least 5 (has 2)"]);

        let veteran = apprentice().with_level(5);
        assert_eq!(validate_choice(&blacksmith(), 2, 12, &veteran), ChoiceOutcome::accepted(4));
    }
}
