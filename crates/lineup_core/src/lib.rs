//! # lineup_core - 6-a-side Lineup Editor Core
//!
//! State machine behind the club's drag-and-drop formation editor: a static
//! formation catalog, a read-only roster index, the live lineup with its
//! no-duplicate invariant, an assignment engine, and a validator that derives
//! the warnings panel.
//!
//! ## Features
//! - Typed commands (`Assign`, `Swap`, `ChangeFormation`, ...) applied atomically
//! - Confirmation gate for clear, auto-fill and size-changing formation changes
//! - Priority-ranked auto-fill that never duplicates a player
//! - Drag-and-drop and modal selection adapters producing the same commands
//! - JSON API and embedded club data for hosts

pub mod api;
pub mod chat;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod models;
pub mod session;

// Re-export JSON API
pub use api::{
    candidates_json, command_schema_json, formations_json, run_script_json, validate_json,
};
pub use error::{LineupError, Result};

// Re-export core types
pub use config::{load_config_from_env, EditorConfig, FieldBounds};
pub use engine::{
    AssignmentEngine, LineupCommand, LineupReport, Notice, NoticeLevel, Outcome, Severity,
    TieBreak, ValidationIssue, Validator, VeteranPolicy,
};
pub use models::{
    get_formation_config, Anchor, Formation, FormationSlot, LineupSlot, LineupSnapshot,
    LineupState, Player, PlayerId, Priority, Role, RosterData, RosterIndex,
};
pub use session::{
    ConfirmRequest, ConfirmationGate, DispatchResult, LineupObserver, LineupSession, Submission,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
