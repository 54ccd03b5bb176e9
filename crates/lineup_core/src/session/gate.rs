use crate::engine::LineupCommand;
use crate::models::{Formation, LineupState};
use serde::Serialize;

/// Yes/no prompt shown before a gated command is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub command: LineupCommand,
}

impl ConfirmRequest {
    pub(crate) fn for_command(command: LineupCommand, lineup: &LineupState) -> Self {
        let (title, message) = match &command {
            LineupCommand::Clear => (
                "Clear lineup".to_string(),
                "Remove every player from the field?".to_string(),
            ),
            LineupCommand::AutoFill => (
                "Auto-fill lineup".to_string(),
                "Fill the empty positions with the best available players?".to_string(),
            ),
            LineupCommand::ChangeFormation { formation } => {
                let target = Formation::resolve(formation);
                let new_len = target.slots().len();
                let mut message = format!(
                    "Formation {} has {} positions (currently {}).",
                    target.code(),
                    new_len,
                    lineup.len()
                );
                if new_len < lineup.len() {
                    message.push_str(&format!(" Players beyond position {} will be removed.", new_len));
                }
                ("Change formation".to_string(), message)
            }
            other => (other.name().to_string(), "Apply this change?".to_string()),
        };
        Self { title, message, command }
    }
}

/// Synchronous confirmation primitive.
pub trait ConfirmationGate {
    fn confirm(&mut self, request: &ConfirmRequest) -> bool;
}

impl<F> ConfirmationGate for F
where
    F: FnMut(&ConfirmRequest) -> bool,
{
    fn confirm(&mut self, request: &ConfirmRequest) -> bool {
        self(request)
    }
}

/// Gate with a fixed answer (scripts and tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmationGate for FixedAnswer {
    fn confirm(&mut self, _request: &ConfirmRequest) -> bool {
        self.0
    }
}
