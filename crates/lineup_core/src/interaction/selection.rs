//! Click/tap selection adapter
//!
//! Clicking a slot body opens the candidate picker, for empty and occupied
//! slots alike. Only the slot's remove control removes a player.

use crate::engine::LineupCommand;
use crate::error::Result;
use crate::models::{LineupState, PlayerId, Role, RosterIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: PlayerId,
    pub name: String,
    /// Name with the veteran star.
    pub display_name: String,
    pub number: Option<String>,
    pub veteran: bool,
    /// Short labels of every role the player is listed under (POR, DEF, ...).
    pub roles: Vec<&'static str>,
    /// Listed under the slot's role.
    pub compatible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateList {
    pub slot: usize,
    pub suggested_role: Option<Role>,
    pub candidates: Vec<Candidate>,
}

impl CandidateList {
    pub fn title(&self) -> String {
        match self.suggested_role {
            Some(role) => format!("Select {}", role.full_name()),
            None => "Select player".to_string(),
        }
    }
}

/// Players not yet on the field, role-compatible first, then by jersey number.
///
/// Unnumbered players sort as number 99; remaining ties keep roster id order.
pub fn candidate_list(lineup: &LineupState, roster: &RosterIndex, slot: usize) -> Result<CandidateList> {
    lineup.check_index(slot)?;
    let suggested_role = lineup.slot(slot).and_then(|s| s.role);

    let mut candidates: Vec<(u32, Candidate)> = roster
        .ordered_ids()
        .iter()
        .filter(|id| !lineup.contains(id))
        .filter_map(|id| {
            let player = roster.player(id)?;
            let listed = roster.roles_for(id);
            let compatible = suggested_role.is_some_and(|role| listed.iter().any(|(r, _)| *r == role));
            let candidate = Candidate {
                id: id.clone(),
                name: player.name.clone(),
                display_name: player.display_name(),
                number: player.number.clone(),
                veteran: player.veteran,
                roles: listed.iter().map(|(r, _)| r.label()).collect(),
                compatible,
            };
            Some((player.number_sort_key(), candidate))
        })
        .collect();

    candidates.sort_by_key(|(number, c)| (!c.compatible, *number));

    Ok(CandidateList {
        slot,
        suggested_role,
        candidates: candidates.into_iter().map(|(_, c)| c).collect(),
    })
}

/// Modal picker state. At most one slot is open at a time.
#[derive(Debug, Clone, Default)]
pub struct SelectionModal {
    open_slot: Option<usize>,
}

impl SelectionModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_slot(&self) -> Option<usize> {
        self.open_slot
    }

    pub fn is_open(&self) -> bool {
        self.open_slot.is_some()
    }

    /// Open the picker for a slot, replacing any slot already open.
    pub fn open(&mut self, lineup: &LineupState, roster: &RosterIndex, slot: usize) -> Result<CandidateList> {
        let list = candidate_list(lineup, roster, slot)?;
        self.open_slot = Some(slot);
        Ok(list)
    }

    /// Pick a candidate: yields the assign command and closes the picker.
    pub fn choose(&mut self, player: PlayerId) -> Option<LineupCommand> {
        let slot = self.open_slot.take()?;
        Some(LineupCommand::Assign { slot, player })
    }

    pub fn close(&mut self) {
        self.open_slot = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotClickTarget {
    Body,
    RemoveControl,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotClickAction {
    OpenSelector(usize),
    Issue(LineupCommand),
    Nothing,
}

pub fn resolve_slot_click(lineup: &LineupState, slot: usize, target: SlotClickTarget) -> SlotClickAction {
    let Some(current) = lineup.slot(slot) else {
        return SlotClickAction::Nothing;
    };
    match target {
        SlotClickTarget::Body => SlotClickAction::OpenSelector(slot),
        SlotClickTarget::RemoveControl if current.is_empty() => SlotClickAction::Nothing,
        SlotClickTarget::RemoveControl => SlotClickAction::Issue(LineupCommand::Remove { slot }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AssignmentEngine;
    use crate::models::{Formation, Player, Priority, RosterData};

    fn roster() -> RosterIndex {
        RosterIndex::from_data(
            RosterData::default()
                .with_player("1", Player::new("Fernando Almeida", Some("99"), false))
                .with_player("2", Player::new("Gregorio", Some("17"), true))
                .with_player("3", Player::new("Alex", None, false))
                .with_player("4", Player::new("Mateo", Some("2"), false))
                .with_player("7", Player::new("Harold", Some("9"), false))
                .with_position(Role::Goalkeeper, "1", Priority::High)
                .with_position(Role::Goalkeeper, "3", Priority::Low)
                .with_position(Role::Defender, "4", Priority::High)
                .with_position(Role::Forward, "7", Priority::High),
        )
    }

    fn ids(list: &CandidateList) -> Vec<&str> {
        list.candidates.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_compatible_first_then_number() {
        let roster = roster();
        let lineup = LineupState::from_formation(Formation::F1221);
        let list = candidate_list(&lineup, &roster, 0).unwrap();
        assert_eq!(list.suggested_role, Some(Role::Goalkeeper));
        // Goalkeepers: 3 (unnumbered, sorts as 99) ties with 1 (#99) and keeps id order.
        assert_eq!(ids(&list), vec!["1", "3", "4", "7", "2"]);
        assert!(list.candidates[0].compatible);
        assert!(!list.candidates[2].compatible);
        assert_eq!(list.title(), "Select Portero");
    }

    #[test]
    fn test_excludes_players_on_field() {
        let roster = roster();
        let engine = AssignmentEngine::new(&roster);
        let mut lineup = LineupState::from_formation(Formation::F1221);
        engine.assign(&mut lineup, 5, &PlayerId::from("7")).unwrap();
        let list = candidate_list(&lineup, &roster, 1).unwrap();
        assert_eq!(ids(&list), vec!["4", "2", "1", "3"]);
        assert!(candidate_list(&lineup, &roster, 6).is_err());
    }

    #[test]
    fn test_candidate_details() {
        let roster = roster();
        let lineup = LineupState::from_formation(Formation::F1221);
        let list = candidate_list(&lineup, &roster, 5).unwrap();
        let gregorio = list.candidates.iter().find(|c| c.id.as_str() == "2").unwrap();
        assert_eq!(gregorio.display_name, "Gregorio ★");
        assert!(gregorio.roles.is_empty());
        let harold = &list.candidates[0];
        assert_eq!(harold.roles, vec!["DEL"]);
    }

    #[test]
    fn test_modal_flow() {
        let roster = roster();
        let lineup = LineupState::from_formation(Formation::F1221);
        let mut modal = SelectionModal::new();
        assert_eq!(modal.choose(PlayerId::from("1")), None);

        modal.open(&lineup, &roster, 0).unwrap();
        assert_eq!(modal.open_slot(), Some(0));
        assert_eq!(
            modal.choose(PlayerId::from("1")),
            Some(LineupCommand::Assign { slot: 0, player: PlayerId::from("1") })
        );
        assert!(!modal.is_open());

        modal.open(&lineup, &roster, 3).unwrap();
        modal.close();
        assert_eq!(modal.choose(PlayerId::from("1")), None);
    }

    #[test]
    fn test_slot_click_rule() {
        let roster = roster();
        let engine = AssignmentEngine::new(&roster);
        let mut lineup = LineupState::from_formation(Formation::F1221);
        engine.assign(&mut lineup, 2, &PlayerId::from("4")).unwrap();

        assert_eq!(resolve_slot_click(&lineup, 2, SlotClickTarget::Body), SlotClickAction::OpenSelector(2));
        assert_eq!(resolve_slot_click(&lineup, 0, SlotClickTarget::Body), SlotClickAction::OpenSelector(0));
        assert_eq!(
            resolve_slot_click(&lineup, 2, SlotClickTarget::RemoveControl),
            SlotClickAction::Issue(LineupCommand::Remove { slot: 2 })
        );
        assert_eq!(resolve_slot_click(&lineup, 0, SlotClickTarget::RemoveControl), SlotClickAction::Nothing);
        assert_eq!(resolve_slot_click(&lineup, 9, SlotClickTarget::Body), SlotClickAction::Nothing);
    }
}
