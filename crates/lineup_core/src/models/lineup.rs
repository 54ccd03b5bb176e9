//! Lineup State
//!
//! Ordered slot -> player assignments for the active formation.
//! Invariant: a player id occupies at most one slot.

use super::formation::{Anchor, Formation, FormationSlot};
use super::player::PlayerId;
use super::roster::{FieldSlotData, RosterIndex};
use super::role::Role;
use crate::error::{LineupError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineupSlot {
    /// Class tag from the formation template.
    pub class: String,
    /// `None` only for slots loaded from a saved layout with an unrecognised tag.
    pub role: Option<Role>,
    pub anchor: Anchor,
    pub player_id: Option<PlayerId>,
}

impl LineupSlot {
    pub fn from_template(template: &FormationSlot) -> Self {
        Self {
            class: template.class.to_string(),
            role: Some(template.role),
            anchor: template.anchor,
            player_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.player_id.is_none()
    }
}

/// Read-only copy of the lineup handed to the rendering layer and stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineupSnapshot {
    pub formation: Formation,
    pub slots: Vec<LineupSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineupState {
    formation: Formation,
    slots: Vec<LineupSlot>,
}

impl LineupState {
    /// Every slot of the formation, all empty.
    pub fn from_formation(formation: Formation) -> Self {
        Self { formation, slots: formation.slots().iter().map(LineupSlot::from_template).collect() }
    }

    /// Rebuild a lineup from a saved field layout.
    ///
    /// Roles are inferred from the class tags here and nowhere else. Unknown or
    /// repeated player ids are dropped so the uniqueness invariant holds.
    pub fn from_field(field: &[FieldSlotData], roster: &RosterIndex, formation: Formation) -> Self {
        let mut seen: HashSet<PlayerId> = HashSet::new();
        let slots = field
            .iter()
            .map(|saved| {
                let role = Role::infer_from_class(&saved.class);
                if role.is_none() {
                    log::debug!("Saved slot '{}' has no recognisable role", saved.class);
                }
                let player_id = saved
                    .id
                    .clone()
                    .filter(|id| accept_saved_id(id, roster, &mut seen));
                LineupSlot {
                    class: saved.class.clone(),
                    role,
                    anchor: saved.resolved_anchor(),
                    player_id,
                }
            })
            .collect();
        Self { formation, slots }
    }

    /// Rebuild from a snapshot with the same id checks as `from_field`.
    pub fn from_snapshot(snapshot: LineupSnapshot, roster: &RosterIndex) -> Self {
        let mut seen: HashSet<PlayerId> = HashSet::new();
        let slots = snapshot
            .slots
            .into_iter()
            .map(|mut slot| {
                slot.player_id = slot.player_id.filter(|id| accept_saved_id(id, roster, &mut seen));
                slot
            })
            .collect();
        Self { formation: snapshot.formation, slots }
    }

    pub fn formation(&self) -> Formation {
        self.formation
    }

    pub fn slots(&self) -> &[LineupSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&LineupSlot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(LineupError::SlotOutOfRange { index, len: self.slots.len() })
        }
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.player_id.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.slots.len() - self.filled_count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.player_id.is_some())
    }

    pub fn position_of(&self, id: &PlayerId) -> Option<usize> {
        self.slots.iter().position(|s| s.player_id.as_ref() == Some(id))
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn assigned_ids(&self) -> Vec<&PlayerId> {
        self.slots.iter().filter_map(|s| s.player_id.as_ref()).collect()
    }

    /// True if some player occupies more than one slot. Never true after an engine call.
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::new();
        self.assigned_ids().into_iter().any(|id| !seen.insert(id))
    }

    pub fn snapshot(&self) -> LineupSnapshot {
        LineupSnapshot { formation: self.formation, slots: self.slots.clone() }
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Result<&mut LineupSlot> {
        let len = self.slots.len();
        self.slots.get_mut(index).ok_or(LineupError::SlotOutOfRange { index, len })
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [LineupSlot] {
        &mut self.slots
    }

    pub(crate) fn replace(&mut self, formation: Formation, slots: Vec<LineupSlot>) {
        self.formation = formation;
        self.slots = slots;
    }
}

fn accept_saved_id(id: &PlayerId, roster: &RosterIndex, seen: &mut HashSet<PlayerId>) -> bool {
    if !roster.contains(id) {
        log::warn!("Saved lineup references unknown player {}", id);
        return false;
    }
    if !seen.insert(id.clone()) {
        log::warn!("Saved lineup repeats player {}, keeping the first slot", id);
        return false;
    }
    true
}
