//! Lineup session controller
//!
//! Owns the roster, the live lineup and the pending confirmation. Every
//! gesture goes through `submit`; gated commands wait for `confirm` or
//! `decline`. Nothing reaching the caller is fatal: engine errors become
//! error notices with no mutation.

mod gate;
mod store;

pub use gate::{ConfirmRequest, ConfirmationGate, FixedAnswer};
pub use store::{JsonFileStore, LineupStore, MemoryStore};

use crate::config::EditorConfig;
use crate::engine::{AssignmentEngine, LineupCommand, LineupReport, Notice, Outcome, Validator};
use crate::error::Result;
use crate::interaction::{candidate_list, CandidateList};
use crate::models::{LineupSnapshot, LineupState, RosterIndex};
use serde::Serialize;

/// Rendering-layer hooks. All default to no-ops.
pub trait LineupObserver {
    fn lineup_changed(&mut self, _snapshot: &LineupSnapshot) {}
    fn report_changed(&mut self, _report: &LineupReport) {}
    fn notice(&mut self, _notice: &Notice) {}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResult {
    pub notice: Option<Notice>,
    pub changed: bool,
    pub report: LineupReport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Applied(DispatchResult),
    NeedsConfirmation(ConfirmRequest),
}

pub struct LineupSession {
    roster: RosterIndex,
    lineup: LineupState,
    config: EditorConfig,
    validator: Validator,
    pending: Option<ConfirmRequest>,
    report: LineupReport,
    observers: Vec<Box<dyn LineupObserver>>,
}

impl LineupSession {
    /// Start from the roster's saved field if it has one, else an empty default formation.
    pub fn new(roster: RosterIndex, config: EditorConfig) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Session started with invalid config: {}", e);
        }
        let formation = config.formation();
        let lineup = match roster.initial_field() {
            Some(field) if !field.is_empty() => {
                log::info!("Starting from saved field ({} slots)", field.len());
                LineupState::from_field(field, &roster, formation)
            }
            _ => LineupState::from_formation(formation),
        };
        let validator = Validator::new(config.veteran_policy);
        let report = validator.validate(&lineup, &roster);
        Self { roster, lineup, config, validator, pending: None, report, observers: Vec::new() }
    }

    pub fn with_defaults(roster: RosterIndex) -> Self {
        Self::new(roster, EditorConfig::default())
    }

    pub fn add_observer(&mut self, observer: Box<dyn LineupObserver>) {
        self.observers.push(observer);
    }

    pub fn roster(&self) -> &RosterIndex {
        &self.roster
    }

    pub fn lineup(&self) -> &LineupState {
        &self.lineup
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn report(&self) -> &LineupReport {
        &self.report
    }

    pub fn pending(&self) -> Option<&ConfirmRequest> {
        self.pending.as_ref()
    }

    pub fn snapshot(&self) -> LineupSnapshot {
        self.lineup.snapshot()
    }

    pub fn candidates(&self, slot: usize) -> Result<CandidateList> {
        candidate_list(&self.lineup, &self.roster, slot)
    }

    /// Apply a command, or park it behind a confirmation request.
    ///
    /// Any request already pending is dropped.
    pub fn submit(&mut self, command: LineupCommand) -> Submission {
        if let Some(previous) = self.pending.take() {
            log::debug!("Pending {} superseded by {}", previous.command.name(), command.name());
        }
        if command.requires_confirmation(&self.lineup) {
            let request = ConfirmRequest::for_command(command, &self.lineup);
            log::debug!("Confirmation requested for {}", request.command.name());
            self.pending = Some(request.clone());
            return Submission::NeedsConfirmation(request);
        }
        Submission::Applied(self.apply(command))
    }

    /// Apply the pending command. `None` when nothing is pending.
    pub fn confirm(&mut self) -> Option<DispatchResult> {
        let request = self.pending.take()?;
        Some(self.apply(request.command))
    }

    /// Drop the pending command without touching the lineup.
    pub fn decline(&mut self) -> Option<DispatchResult> {
        let request = self.pending.take()?;
        log::info!("Declined {}", request.command.name());
        let notice = Notice::info("Action cancelled");
        self.notify_notice(&notice);
        Some(DispatchResult { notice: Some(notice), changed: false, report: self.report.clone() })
    }

    /// Submit and resolve any confirmation synchronously through `gate`.
    pub fn dispatch(&mut self, command: LineupCommand, gate: &mut dyn ConfirmationGate) -> DispatchResult {
        match self.submit(command) {
            Submission::Applied(result) => result,
            Submission::NeedsConfirmation(request) => {
                let resolved = if gate.confirm(&request) { self.confirm() } else { self.decline() };
                resolved.unwrap_or_else(|| self.idle())
            }
        }
    }

    /// Replace the lineup from a snapshot. Unknown or repeated ids are dropped.
    pub fn restore(&mut self, snapshot: LineupSnapshot) -> DispatchResult {
        self.pending = None;
        self.lineup = LineupState::from_snapshot(snapshot, &self.roster);
        self.refresh_report();
        self.notify_lineup();
        DispatchResult { notice: None, changed: true, report: self.report.clone() }
    }

    pub fn save_to(&self, store: &mut dyn LineupStore) -> Result<()> {
        store.save(&self.lineup.snapshot())
    }

    /// Restore from a store. Returns false when the store is empty.
    pub fn load_from(&mut self, store: &dyn LineupStore) -> Result<bool> {
        match store.load()? {
            Some(snapshot) => {
                self.restore(snapshot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn apply(&mut self, command: LineupCommand) -> DispatchResult {
        let engine = AssignmentEngine::new(&self.roster).with_tie_break(self.config.tie_break);
        let outcome = match engine.apply(&mut self.lineup, &command) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("{} failed: {}", command.name(), e);
                Outcome::rejected(Notice::error(e.to_string()))
            }
        };
        log::debug!("{} applied (changed: {})", command.name(), outcome.changed);

        if outcome.changed {
            self.notify_lineup();
        }
        if command.revalidates() {
            self.refresh_report();
        }
        if let Some(notice) = &outcome.notice {
            self.notify_notice(notice);
        }

        DispatchResult { notice: outcome.notice, changed: outcome.changed, report: self.report.clone() }
    }

    fn idle(&self) -> DispatchResult {
        DispatchResult { notice: None, changed: false, report: self.report.clone() }
    }

    fn refresh_report(&mut self) {
        self.report = self.validator.validate(&self.lineup, &self.roster);
        for observer in &mut self.observers {
            observer.report_changed(&self.report);
        }
    }

    fn notify_lineup(&mut self) {
        let snapshot = self.lineup.snapshot();
        for observer in &mut self.observers {
            observer.lineup_changed(&snapshot);
        }
    }

    fn notify_notice(&mut self, notice: &Notice) {
        for observer in &mut self.observers {
            observer.notice(notice);
        }
    }
}
