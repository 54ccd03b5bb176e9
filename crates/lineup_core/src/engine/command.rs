//! Typed commands the interaction adapters send to the engine.

use crate::models::{Anchor, Formation, LineupState, PlayerId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineupCommand {
    /// Reset to an empty lineup of the named formation.
    InitializeEmpty { formation: String },
    Assign { slot: usize, player: PlayerId },
    Remove { slot: usize },
    Swap { a: usize, b: usize },
    Reposition { slot: usize, anchor: Anchor },
    ChangeFormation { formation: String },
    /// Rebuild slots from the current formation's template, keeping assignments by index.
    ResetPositions,
    Clear,
    AutoFill,
}

impl LineupCommand {
    /// Commands gated behind a yes/no confirmation against the current lineup.
    ///
    /// Formation changes only ask when the slot count changes.
    pub fn requires_confirmation(&self, lineup: &LineupState) -> bool {
        match self {
            LineupCommand::Clear | LineupCommand::AutoFill => true,
            LineupCommand::ChangeFormation { formation } => {
                Formation::resolve(formation).slots().len() != lineup.len()
            }
            _ => false,
        }
    }

    /// Whether the validator must run after this command.
    pub fn revalidates(&self) -> bool {
        !matches!(self, LineupCommand::Reposition { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            LineupCommand::InitializeEmpty { .. } => "initialize_empty",
            LineupCommand::Assign { .. } => "assign",
            LineupCommand::Remove { .. } => "remove",
            LineupCommand::Swap { .. } => "swap",
            LineupCommand::Reposition { .. } => "reposition",
            LineupCommand::ChangeFormation { .. } => "change_formation",
            LineupCommand::ResetPositions => "reset_positions",
            LineupCommand::Clear => "clear",
            LineupCommand::AutoFill => "auto_fill",
        }
    }
}
