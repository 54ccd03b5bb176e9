//! Assignment Engine
//!
//! Pure state transitions over `LineupState`. Every operation either applies
//! fully or leaves the lineup untouched. Slot indices outside the lineup are
//! errors; invariant violations are rejected outcomes with a warning notice.

use super::autofill::{plan_auto_fill, TieBreak};
use super::command::LineupCommand;
use super::notice::{Notice, Outcome};
use crate::error::{LineupError, Result};
use crate::models::{Anchor, Formation, LineupSlot, LineupState, PlayerId, RosterIndex};

pub struct AssignmentEngine<'a> {
    roster: &'a RosterIndex,
    tie_break: TieBreak,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(roster: &'a RosterIndex) -> Self {
        Self { roster, tie_break: TieBreak::default() }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Route a command to its operation. Confirmation is the caller's concern.
    pub fn apply(&self, lineup: &mut LineupState, command: &LineupCommand) -> Result<Outcome> {
        match command {
            LineupCommand::InitializeEmpty { formation } => {
                Ok(self.initialize_empty(lineup, formation))
            }
            LineupCommand::Assign { slot, player } => self.assign(lineup, *slot, player),
            LineupCommand::Remove { slot } => self.remove(lineup, *slot),
            LineupCommand::Swap { a, b } => self.swap(lineup, *a, *b),
            LineupCommand::Reposition { slot, anchor } => self.reposition(lineup, *slot, *anchor),
            LineupCommand::ChangeFormation { formation } => {
                Ok(self.change_formation(lineup, formation))
            }
            LineupCommand::ResetPositions => Ok(self.reset_positions(lineup)),
            LineupCommand::Clear => Ok(self.clear(lineup)),
            LineupCommand::AutoFill => Ok(self.auto_fill(lineup)),
        }
    }

    pub fn initialize_empty(&self, lineup: &mut LineupState, formation: &str) -> Outcome {
        *lineup = LineupState::from_formation(Formation::resolve(formation));
        Outcome::applied_silently()
    }

    pub fn assign(&self, lineup: &mut LineupState, slot: usize, player: &PlayerId) -> Result<Outcome> {
        lineup.check_index(slot)?;
        let name = self
            .roster
            .player(player)
            .map(|p| p.name.clone())
            .ok_or_else(|| LineupError::UnknownPlayer(player.to_string()))?;

        match lineup.position_of(player) {
            Some(existing) if existing == slot => return Ok(Outcome::unchanged()),
            Some(existing) => {
                log::debug!("Rejecting assign of {} to slot {}: already in slot {}", player, slot, existing);
                return Ok(Outcome::rejected(Notice::warning(format!(
                    "{} is already assigned to another position",
                    name
                ))));
            }
            None => {}
        }

        lineup.slot_mut(slot)?.player_id = Some(player.clone());
        Ok(Outcome::applied(Notice::success(format!("{} added", name))))
    }

    pub fn remove(&self, lineup: &mut LineupState, slot: usize) -> Result<Outcome> {
        let target = lineup.slot_mut(slot)?;
        let Some(previous) = target.player_id.take() else {
            return Ok(Outcome::unchanged());
        };
        let name = self.display_name(&previous);
        Ok(Outcome::applied(Notice::info(format!("{} removed", name))))
    }

    pub fn swap(&self, lineup: &mut LineupState, a: usize, b: usize) -> Result<Outcome> {
        lineup.check_index(a)?;
        lineup.check_index(b)?;
        if a == b {
            return Ok(Outcome::unchanged());
        }
        let slots = lineup.slots_mut();
        if slots[a].player_id.is_none() && slots[b].player_id.is_none() {
            return Ok(Outcome::unchanged());
        }
        let moved = slots[a].player_id.take();
        slots[a].player_id = slots[b].player_id.take();
        slots[b].player_id = moved;
        Ok(Outcome::applied(Notice::success("Positions swapped")))
    }

    /// Move a slot's token. Assignments are never touched.
    pub fn reposition(&self, lineup: &mut LineupState, slot: usize, anchor: Anchor) -> Result<Outcome> {
        let target = lineup.slot_mut(slot)?;
        target.anchor = Anchor {
            top: anchor.top.clamp(0.0, 100.0),
            left: anchor.left.clamp(0.0, 100.0),
            centered: anchor.centered,
        };
        Ok(Outcome::applied_silently())
    }

    /// Switch templates, carrying players over by slot index.
    ///
    /// Slots past the new length are dropped; extra new slots start empty.
    pub fn change_formation(&self, lineup: &mut LineupState, formation: &str) -> Outcome {
        let target = Formation::resolve(formation);
        rebuild_from_template(lineup, target);
        Outcome::applied(Notice::success(format!("Formation changed to {}", target.code())))
    }

    /// Rebuild every slot from the current formation's template, keeping
    /// assignments by index. Undoes free-form drags and any saved-field layout.
    pub fn reset_positions(&self, lineup: &mut LineupState) -> Outcome {
        let formation = lineup.formation();
        rebuild_from_template(lineup, formation);
        Outcome::applied(Notice::info("Positions reset"))
    }

    pub fn clear(&self, lineup: &mut LineupState) -> Outcome {
        if lineup.filled_count() == 0 {
            return Outcome::unchanged();
        }
        for slot in lineup.slots_mut() {
            slot.player_id = None;
        }
        Outcome::applied(Notice::info("Lineup cleared"))
    }

    /// Fill empty slots with the best unassigned candidates for their role.
    pub fn auto_fill(&self, lineup: &mut LineupState) -> Outcome {
        let plan = plan_auto_fill(lineup, self.roster, self.tie_break);
        if plan.is_empty() {
            return Outcome::rejected(Notice::info("No available candidates for the empty positions"));
        }
        let filled = plan.len();
        for (index, player) in plan {
            lineup.slots_mut()[index].player_id = Some(player);
        }
        Outcome::applied(Notice::success(format!("Lineup completed ({} filled)", filled)))
    }

    fn display_name(&self, id: &PlayerId) -> String {
        self.roster.player(id).map(|p| p.name.clone()).unwrap_or_else(|| id.to_string())
    }
}

fn rebuild_from_template(lineup: &mut LineupState, target: Formation) {
    let previous = lineup.slots();
    let slots: Vec<LineupSlot> = target
        .slots()
        .iter()
        .enumerate()
        .map(|(i, template)| {
            let mut slot = LineupSlot::from_template(template);
            slot.player_id = previous.get(i).and_then(|p| p.player_id.clone());
            slot
        })
        .collect();

    let dropped = previous.iter().skip(slots.len()).filter(|s| s.player_id.is_some()).count();
    if dropped > 0 {
        log::info!("Rebuilding to {} dropped {} assignment(s)", target.code(), dropped);
    }

    lineup.replace(target, slots);
}
