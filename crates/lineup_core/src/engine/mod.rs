//! Lineup engine: typed commands, state transitions, auto-fill and validation.

pub mod assignment;
pub mod autofill;
pub mod command;
pub mod notice;
pub mod validator;

pub use assignment::AssignmentEngine;
pub use autofill::{plan_auto_fill, TieBreak};
pub use command::LineupCommand;
pub use notice::{Notice, NoticeLevel, Outcome};
pub use validator::{
    validate, LineupReport, Severity, ValidationIssue, Validator, VeteranPolicy, COMPLETE_MESSAGE,
};
