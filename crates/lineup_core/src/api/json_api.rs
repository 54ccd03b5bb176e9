use crate::config::EditorConfig;
use crate::data::default_roster;
use crate::engine::{LineupCommand, LineupReport, Notice};
use crate::error::LineupError;
use crate::interaction::candidate_list;
use crate::models::{Formation, LineupSnapshot, LineupState, RosterData, RosterIndex};
use crate::session::{ConfirmRequest, LineupSession, Submission};
use serde::{Deserialize, Serialize};

pub mod error_codes {
    pub const PARSE: &str = "E_PARSE";
    pub const COMMAND: &str = "E_COMMAND";
    pub const SLOT: &str = "E_SLOT";
    pub const CONFIG: &str = "E_CONFIG";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

/// A command script run against a fresh session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScriptRequest {
    /// Roster payload; the embedded squad when absent.
    pub roster: Option<RosterData>,
    pub config: Option<EditorConfig>,
    /// Starting lineup; otherwise the roster's saved field or an empty formation.
    pub snapshot: Option<LineupSnapshot>,
    /// Raw commands, decoded one by one so errors can name the offending entry.
    pub commands: Vec<serde_json::Value>,
    /// Accept every confirmation gate. Gated commands are declined otherwise.
    pub auto_confirm: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptStep {
    pub command: LineupCommand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<ConfirmRequest>,
    pub confirmed: bool,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptResponse {
    pub steps: Vec<ScriptStep>,
    pub snapshot: LineupSnapshot,
    pub report: LineupReport,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidatesRequest {
    pub roster: Option<RosterData>,
    pub snapshot: Option<LineupSnapshot>,
    pub formation: Option<String>,
    pub slot: usize,
}

fn roster_from(data: Option<RosterData>) -> RosterIndex {
    match data {
        Some(data) => RosterIndex::from_data(data),
        None => default_roster(),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| err_code(error_codes::PARSE, e))
}

/// Run a command script and return every step plus the final lineup and report.
pub fn run_script_json(request_json: &str) -> Result<String, String> {
    let request: ScriptRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::PARSE, format!("invalid script request: {e}")))?;

    let commands = request
        .commands
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            serde_json::from_value::<LineupCommand>(raw)
                .map_err(|e| err_code(error_codes::COMMAND, format!("command #{i}: {e}")))
        })
        .collect::<Result<Vec<_>, String>>()?;

    let config = request.config.unwrap_or_default();
    config.validate().map_err(|e| err_code(error_codes::CONFIG, e))?;

    let mut session = LineupSession::new(roster_from(request.roster), config);
    if let Some(snapshot) = request.snapshot {
        session.restore(snapshot);
    }

    let mut steps = Vec::with_capacity(commands.len());
    for command in commands {
        let step = match session.submit(command.clone()) {
            Submission::Applied(result) => ScriptStep {
                command,
                confirmation: None,
                confirmed: false,
                changed: result.changed,
                notice: result.notice,
            },
            Submission::NeedsConfirmation(request_prompt) => {
                let resolved = if request.auto_confirm { session.confirm() } else { session.decline() };
                let (changed, notice) =
                    resolved.map(|r| (r.changed, r.notice)).unwrap_or((false, None));
                ScriptStep {
                    command,
                    confirmation: Some(request_prompt),
                    confirmed: request.auto_confirm,
                    changed,
                    notice,
                }
            }
        };
        steps.push(step);
    }

    to_json(&ScriptResponse { steps, snapshot: session.snapshot(), report: session.report().clone() })
}

/// Candidate picker contents for one slot.
pub fn candidates_json(request_json: &str) -> Result<String, String> {
    let request: CandidatesRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::PARSE, format!("invalid candidates request: {e}")))?;
    let roster = roster_from(request.roster);
    let lineup = match request.snapshot {
        Some(snapshot) => LineupState::from_snapshot(snapshot, &roster),
        None => LineupState::from_formation(Formation::resolve(
            request.formation.as_deref().unwrap_or(Formation::default().code()),
        )),
    };
    let list = candidate_list(&lineup, &roster, request.slot).map_err(|e| match e {
        LineupError::SlotOutOfRange { .. } => err_code(error_codes::SLOT, e),
        other => err_code(error_codes::COMMAND, other),
    })?;
    to_json(&list)
}

/// Validator report for a snapshot.
pub fn validate_json(request_json: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct ValidateRequest {
        #[serde(default)]
        roster: Option<RosterData>,
        #[serde(default)]
        config: Option<EditorConfig>,
        snapshot: LineupSnapshot,
    }

    let request: ValidateRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::PARSE, format!("invalid validate request: {e}")))?;
    let config = request.config.unwrap_or_default();
    config.validate().map_err(|e| err_code(error_codes::CONFIG, e))?;
    let mut session = LineupSession::new(roster_from(request.roster), config);
    let result = session.restore(request.snapshot);
    to_json(&result.report)
}

#[derive(Serialize)]
struct FormationEntry {
    code: &'static str,
    label: &'static str,
    slots: Vec<crate::models::FormationSlot>,
}

/// The formation catalog with slot templates.
pub fn formations_json() -> Result<String, String> {
    let catalog: Vec<FormationEntry> = Formation::ALL
        .iter()
        .map(|f| FormationEntry { code: f.code(), label: f.label(), slots: f.slots().to_vec() })
        .collect();
    to_json(&catalog)
}

/// JSON schema of `LineupCommand`, pretty-printed.
pub fn command_schema_json() -> Result<String, String> {
    let schema = schemars::schema_for!(LineupCommand);
    serde_json::to_string_pretty(&schema).map_err(|e| err_code(error_codes::PARSE, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_script_against_embedded_roster() {
        let out = run_script_json(
            r#"{
                "commands": [
                    { "type": "assign", "slot": 0, "player": "7" },
                    { "type": "assign", "slot": 1, "player": "7" },
                    { "type": "clear" }
                ]
            }"#,
        )
        .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        let steps = v["steps"].as_array().unwrap();
        assert_eq!(steps[0]["changed"], true);
        assert_eq!(steps[1]["notice"]["level"], "warning");
        // Not auto-confirmed: the clear is declined and the lineup keeps player 7.
        assert_eq!(steps[2]["confirmed"], false);
        assert_eq!(steps[2]["changed"], false);
        assert_eq!(v["snapshot"]["slots"][0]["playerId"], "7");
        assert_eq!(v["snapshot"]["formation"], "1-2-2-1");
    }

    #[test]
    fn test_script_auto_confirm() {
        let out = run_script_json(r#"{ "auto_confirm": true, "commands": [{ "type": "auto_fill" }] }"#).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["steps"][0]["confirmed"], true);
        assert_eq!(v["steps"][0]["changed"], true);
        assert!(v["steps"][0]["confirmation"]["title"].is_string());
    }

    #[test]
    fn test_error_codes() {
        let err = run_script_json("not json").unwrap_err();
        assert!(err.starts_with("E_PARSE:"));

        let err = run_script_json(r#"{ "commands": [{ "type": "clear" }, { "type": "teleport" }] }"#).unwrap_err();
        assert!(err.starts_with("E_COMMAND: command #1"));

        let err = candidates_json(r#"{ "slot": 6 }"#).unwrap_err();
        assert!(err.starts_with("E_SLOT:"));

        let err = run_script_json(r#"{ "config": { "field": { "width": 0 } }, "commands": [] }"#).unwrap_err();
        assert!(err.starts_with("E_CONFIG:"));
        let err = run_script_json(r#"{ "config": { "field": { "width": "wide" } }, "commands": [] }"#).unwrap_err();
        assert!(err.starts_with("E_PARSE:"));
    }

    #[test]
    fn test_candidates_json() {
        let out = candidates_json(r#"{ "slot": 0, "formation": "1-4-1" }"#).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["suggested_role"], "goalkeeper");
        assert_eq!(v["candidates"].as_array().unwrap().len(), 13);
        assert_eq!(v["candidates"][0]["compatible"], true);
    }

    #[test]
    fn test_validate_json() {
        let snapshot = serde_json::to_string(&LineupState::from_formation(Formation::F123).snapshot()).unwrap();
        let out = validate_json(&format!(r#"{{ "snapshot": {} }}"#, snapshot)).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["complete"], false);
        assert_eq!(v["issues"][0]["severity"], "info");
    }

    #[test]
    fn test_catalog_and_schema() {
        let v: Value = serde_json::from_str(&formations_json().unwrap()).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 7);
        assert_eq!(v[0]["code"], "1-2-2-1");
        assert_eq!(v[0]["slots"][0]["role"], "goalkeeper");

        let schema = command_schema_json().unwrap();
        assert!(schema.contains("change_formation"));
        assert!(schema.contains("auto_fill"));
    }
}
