//! Embedded club data
//!
//! `include_str!` compiles the squad and the results book into the binary so
//! the editor stays usable when the external sources cannot be read.

use crate::models::{ResultsBook, RosterData, RosterIndex};
use once_cell::sync::Lazy;

/// Club squad JSON (13 players, role lists, captains, DT)
pub const ROSTER_JSON: &str = include_str!("../../data/roster.json");

/// Results book JSON (seed match)
pub const RESULTS_JSON: &str = include_str!("../../data/results.json");

static ROSTER: Lazy<RosterData> =
    Lazy::new(|| RosterData::from_json(ROSTER_JSON).expect("Embedded roster JSON is corrupted"));

static RESULTS: Lazy<ResultsBook> =
    Lazy::new(|| ResultsBook::from_json(RESULTS_JSON).expect("Embedded results JSON is corrupted"));

/// Embedded roster in wire shape. Parsed on first use.
pub fn default_roster_data() -> &'static RosterData {
    &ROSTER
}

/// Fresh index over the embedded roster.
pub fn default_roster() -> RosterIndex {
    RosterIndex::from_data(ROSTER.clone())
}

pub fn default_results() -> &'static ResultsBook {
    &RESULTS
}
