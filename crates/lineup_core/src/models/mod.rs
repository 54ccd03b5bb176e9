pub mod formation;
pub mod lineup;
pub mod player;
pub mod results;
pub mod role;
pub mod roster;

pub use formation::{get_formation_config, Anchor, Formation, FormationSlot, DEFAULT_FORMATION};
pub use lineup::{LineupSlot, LineupSnapshot, LineupState};
pub use player::{Player, PlayerId};
pub use results::{MatchOutcome, MatchRecord, ResultsBook, TeamRecord};
pub use role::{Priority, Role};
pub use roster::{CaptainEntry, FieldSlotData, PositionEntry, RosterData, RosterIndex, StaffRef};
