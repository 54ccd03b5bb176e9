//! Drag-and-drop adapter
//!
//! Translates a finished drag gesture into at most one engine command.

use crate::config::FieldBounds;
use crate::engine::LineupCommand;
use crate::models::{Anchor, PlayerId};
use serde::{Deserialize, Serialize};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragPayload {
    /// A card from the roster list.
    RosterPlayer { player: PlayerId },
    /// A token already on the field. `grab_offset` is the pointer position
    /// inside the token in pixels, when the host reports it.
    FieldSlot {
        index: usize,
        #[serde(default)]
        grab_offset: Option<(f32, f32)>,
    },
}

/// Where it was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropTarget {
    Slot { index: usize },
    /// Empty field area; pointer in pixels relative to the field box origin.
    FreeCanvas { x: f32, y: f32 },
}

/// Command for a drop, or `None` when the gesture does nothing.
///
/// Roster cards dropped on a slot assign (replacing any occupant). Field
/// tokens dropped on another slot swap; on free canvas they reposition,
/// clamped so the token stays inside the field.
pub fn resolve_drop(payload: &DragPayload, target: DropTarget, bounds: &FieldBounds) -> Option<LineupCommand> {
    match (payload, target) {
        (DragPayload::RosterPlayer { player }, DropTarget::Slot { index }) => {
            Some(LineupCommand::Assign { slot: index, player: player.clone() })
        }
        (DragPayload::RosterPlayer { .. }, DropTarget::FreeCanvas { .. }) => None,
        (DragPayload::FieldSlot { index, .. }, DropTarget::Slot { index: target }) => {
            if *index == target {
                None
            } else {
                Some(LineupCommand::Swap { a: *index, b: target })
            }
        }
        (DragPayload::FieldSlot { index, grab_offset }, DropTarget::FreeCanvas { x, y }) => {
            let offset = grab_offset.unwrap_or((bounds.grab_offset, bounds.grab_offset));
            Some(LineupCommand::Reposition {
                slot: *index,
                anchor: clamp_to_field(x - offset.0, y - offset.1, bounds),
            })
        }
    }
}

/// Clamp a token's top-left pixel corner into the field and convert to percentages.
///
/// A field without positive size pins every token to the origin.
pub fn clamp_to_field(x: f32, y: f32, bounds: &FieldBounds) -> Anchor {
    if !(bounds.width > 0.0 && bounds.height > 0.0) {
        return Anchor::new(0.0, 0.0);
    }
    let max_x = (bounds.width - bounds.token_size).max(0.0);
    let max_y = (bounds.height - bounds.token_size).max(0.0);
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, max_x) };
    let y = if y.is_nan() { 0.0 } else { y.clamp(0.0, max_y) };
    Anchor::new(y * 100.0 / bounds.height, x * 100.0 / bounds.width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> FieldBounds {
        FieldBounds { width: 400.0, height: 600.0, token_size: 64.0, grab_offset: 32.0 }
    }

    #[test]
    fn test_roster_card_assigns() {
        let payload = DragPayload::RosterPlayer { player: PlayerId::from("7") };
        assert_eq!(
            resolve_drop(&payload, DropTarget::Slot { index: 2 }, &bounds()),
            Some(LineupCommand::Assign { slot: 2, player: PlayerId::from("7") })
        );
        assert_eq!(resolve_drop(&payload, DropTarget::FreeCanvas { x: 10.0, y: 10.0 }, &bounds()), None);
    }

    #[test]
    fn test_field_token_swaps() {
        let payload = DragPayload::FieldSlot { index: 1, grab_offset: None };
        assert_eq!(
            resolve_drop(&payload, DropTarget::Slot { index: 4 }, &bounds()),
            Some(LineupCommand::Swap { a: 1, b: 4 })
        );
        assert_eq!(resolve_drop(&payload, DropTarget::Slot { index: 1 }, &bounds()), None);
    }

    #[test]
    fn test_free_drop_uses_default_grab_offset() {
        let payload = DragPayload::FieldSlot { index: 0, grab_offset: None };
        let cmd = resolve_drop(&payload, DropTarget::FreeCanvas { x: 232.0, y: 92.0 }, &bounds());
        assert_eq!(cmd, Some(LineupCommand::Reposition { slot: 0, anchor: Anchor::new(10.0, 50.0) }));
    }

    #[test]
    fn test_free_drop_is_clamped_not_rejected() {
        let payload = DragPayload::FieldSlot { index: 3, grab_offset: Some((0.0, 0.0)) };
        let cmd = resolve_drop(&payload, DropTarget::FreeCanvas { x: 9000.0, y: -50.0 }, &bounds());
        assert_eq!(cmd, Some(LineupCommand::Reposition { slot: 3, anchor: Anchor::new(0.0, 84.0) }));
    }

    #[test]
    fn test_degenerate_field_gives_finite_anchor() {
        let payload = DragPayload::FieldSlot { index: 2, grab_offset: None };
        for bounds in [
            FieldBounds { width: 0.0, ..bounds() },
            FieldBounds { height: 0.0, ..bounds() },
            FieldBounds { width: -10.0, height: f32::NAN, ..bounds() },
        ] {
            let cmd = resolve_drop(&payload, DropTarget::FreeCanvas { x: 120.0, y: 80.0 }, &bounds);
            let Some(LineupCommand::Reposition { anchor, .. }) = cmd else {
                panic!("free drop must reposition");
            };
            assert!(anchor.top.is_finite() && anchor.left.is_finite());
            assert_eq!(anchor, Anchor::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_payload_wire_format() {
        let payload: DragPayload =
            serde_json::from_str(r#"{ "type": "field_slot", "index": 2 }"#).unwrap();
        assert_eq!(payload, DragPayload::FieldSlot { index: 2, grab_offset: None });
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a clamped token never leaves the field box
            #[test]
            fn prop_clamped_token_stays_inside(
                x in -2000.0f32..2000.0f32,
                y in -2000.0f32..2000.0f32,
                width in 64.0f32..1200.0f32,
                height in 64.0f32..1200.0f32
            ) {
                let bounds = FieldBounds { width, height, token_size: 64.0, grab_offset: 32.0 };
                let anchor = clamp_to_field(x, y, &bounds);
                prop_assert!(anchor.left >= 0.0 && anchor.top >= 0.0);
                let right_px = anchor.left / 100.0 * width + 64.0;
                let bottom_px = anchor.top / 100.0 * height + 64.0;
                prop_assert!(right_px <= width + 0.01);
                prop_assert!(bottom_px <= height + 0.01);
            }
        }
    }
}
