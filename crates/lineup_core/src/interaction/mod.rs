//! Adapters from user gestures to engine commands.
//!
//! Both modalities produce the same `LineupCommand`s, so a drop and a modal
//! pick for the same slot and player have the same effect.

pub mod drag;
pub mod selection;

pub use drag::{clamp_to_field, resolve_drop, DragPayload, DropTarget};
pub use selection::{
    candidate_list, resolve_slot_click, Candidate, CandidateList, SelectionModal, SlotClickAction,
    SlotClickTarget,
};
