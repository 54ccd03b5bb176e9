//! Validator
//!
//! Pure derivation of the warnings panel from a lineup and the roster.

use crate::models::{LineupState, RosterIndex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self { severity, message: message.into() }
    }
}

/// How many veterans must be on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VeteranPolicy {
    /// Every veteran in the roster must play.
    #[default]
    AllVeterans,
    /// At least one veteran must play, if the roster has any.
    AtLeastOne,
    Disabled,
}

/// Validator output for one render pass.
///
/// A complete report carries no issues; the success line replaces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LineupReport {
    pub complete: bool,
    pub issues: Vec<ValidationIssue>,
}

pub const COMPLETE_MESSAGE: &str = "Lineup complete";

impl LineupReport {
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Display lines in panel order.
    pub fn lines(&self) -> Vec<String> {
        if self.complete {
            return vec![COMPLETE_MESSAGE.to_string()];
        }
        self.issues
            .iter()
            .map(|i| format!("[{}] {}", severity_tag(i.severity), i.message))
            .collect()
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: VeteranPolicy,
}

impl Validator {
    pub fn new(policy: VeteranPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> VeteranPolicy {
        self.policy
    }

    pub fn validate(&self, lineup: &LineupState, roster: &RosterIndex) -> LineupReport {
        let mut issues = Vec::new();
        let filled = lineup.filled_count();
        let empty = lineup.empty_count();

        if filled == 0 {
            issues.push(ValidationIssue::new(
                Severity::Info,
                "Lineup empty. Drag players or use auto-fill",
            ));
        } else if empty > 0 {
            issues.push(ValidationIssue::new(
                Severity::Warning,
                format!("{} position(s) unassigned", empty),
            ));
        }

        let missing = self.veteran_shortfall(lineup, roster);
        if missing > 0 && filled > 0 {
            issues.push(ValidationIssue::new(
                Severity::Error,
                format!("{} veteran(s) missing", missing),
            ));
        }

        let complete = issues.is_empty() && lineup.is_complete();
        LineupReport { complete, issues }
    }

    /// Number of veterans still required under the active policy.
    pub fn veteran_shortfall(&self, lineup: &LineupState, roster: &RosterIndex) -> usize {
        let veterans = roster.veteran_set();
        let on_field = lineup.assigned_ids().into_iter().filter(|id| veterans.contains(id)).count();
        match self.policy {
            VeteranPolicy::AllVeterans => veterans.len().saturating_sub(on_field),
            VeteranPolicy::AtLeastOne => usize::from(!veterans.is_empty() && on_field == 0),
            VeteranPolicy::Disabled => 0,
        }
    }
}

/// Validate with the default policy.
pub fn validate(lineup: &LineupState, roster: &RosterIndex) -> LineupReport {
    Validator::default().validate(lineup, roster)
}
