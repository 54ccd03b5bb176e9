//! Roster and results sources with embedded fallback.

pub mod embedded;

pub use embedded::{default_results, default_roster, default_roster_data, RESULTS_JSON, ROSTER_JSON};

use crate::error::{LineupError, Result};
use crate::models::{ResultsBook, RosterIndex};
use std::fs;
use std::path::Path;

/// A loaded value plus the error that forced the embedded fallback, if any.
///
/// Hosts show `fallback` as a visible error state while the editor keeps working.
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub fallback: Option<LineupError>,
}

impl<T> Loaded<T> {
    fn fresh(value: T) -> Self {
        Self { value, fallback: None }
    }

    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

pub fn load_roster(path: &Path) -> Result<RosterIndex> {
    let json = fs::read_to_string(path)?;
    RosterIndex::from_json(&json)
}

pub fn load_results(path: &Path) -> Result<ResultsBook> {
    let json = fs::read_to_string(path)?;
    ResultsBook::from_json(&json)
}

/// Read the roster from `path`, or the embedded squad when there is no path or it fails.
pub fn load_roster_or_default(path: Option<&Path>) -> Loaded<RosterIndex> {
    let Some(path) = path else {
        return Loaded::fresh(default_roster());
    };
    match load_roster(path) {
        Ok(roster) => Loaded::fresh(roster),
        Err(e) => {
            log::warn!("Roster load from {} failed ({}), using embedded roster", path.display(), e);
            Loaded { value: default_roster(), fallback: Some(e) }
        }
    }
}

pub fn load_results_or_default(path: Option<&Path>) -> Loaded<ResultsBook> {
    let Some(path) = path else {
        return Loaded::fresh(default_results().clone());
    };
    match load_results(path) {
        Ok(book) => Loaded::fresh(book),
        Err(e) => {
            log::warn!("Results load from {} failed ({}), using embedded results", path.display(), e);
            Loaded { value: default_results().clone(), fallback: Some(e) }
        }
    }
}
