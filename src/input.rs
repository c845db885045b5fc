//! Keyboard mapping
//!
//! Input handlers never touch game state directly: they translate a key edge
//! into a `KeyAction`, and the caller turns that into intent for the next step.

use crate::sim::Direction;

/// What a key edge asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Set the player's horizontal intent
    Move(Direction),
    /// Toggle idle/demo mode
    ToggleAutopilot,
    /// Toggle pause
    TogglePause,
}

/// Map a `KeyboardEvent.key` value and its edge to an action.
///
/// Releasing any movement key stops the player, even if the other movement
/// key is still held.
pub fn map_key(key: &str, pressed: bool) -> Option<KeyAction> {
    match (key, pressed) {
        ("ArrowLeft" | "a" | "A", true) => Some(KeyAction::Move(Direction::Left)),
        ("ArrowRight" | "d" | "D", true) => Some(KeyAction::Move(Direction::Right)),
        ("ArrowLeft" | "a" | "A" | "ArrowRight" | "d" | "D", false) => {
            Some(KeyAction::Move(Direction::Stop))
        }
        ("i" | "I", true) => Some(KeyAction::ToggleAutopilot),
        ("p" | "P" | "Escape", true) => Some(KeyAction::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_letter_keys_move() {
        assert_eq!(
            map_key("ArrowLeft", true),
            Some(KeyAction::Move(Direction::Left))
        );
        assert_eq!(map_key("a", true), Some(KeyAction::Move(Direction::Left)));
        assert_eq!(
            map_key("ArrowRight", true),
            Some(KeyAction::Move(Direction::Right))
        );
        assert_eq!(map_key("d", true), Some(KeyAction::Move(Direction::Right)));
    }

    #[test]
    fn test_release_stops() {
        for key in ["ArrowLeft", "a", "ArrowRight", "d"] {
            assert_eq!(map_key(key, false), Some(KeyAction::Move(Direction::Stop)));
        }
    }

    #[test]
    fn test_toggles_fire_on_press_only() {
        assert_eq!(map_key("i", true), Some(KeyAction::ToggleAutopilot));
        assert_eq!(map_key("i", false), None);
        assert_eq!(map_key("p", true), Some(KeyAction::TogglePause));
        assert_eq!(map_key("Escape", false), None);
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        assert_eq!(map_key("ArrowUp", true), None);
        assert_eq!(map_key(" ", true), None);
        assert_eq!(map_key("x", false), None);
    }
}
