//! Abstract input actions
//!
//! The core knows nothing about keyboards or touch zones, only these four
//! logical actions with pressed/released edges. The host's device layer
//! maps real inputs onto them and feeds edges into the simulation.

/// A logical control the player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    LeftFlipper,
    RightFlipper,
    Plunger,
    Start,
}

/// Tracks which actions are held, filtering repeat edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    left_flipper: bool,
    right_flipper: bool,
    plunger: bool,
    start: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edge. Returns `false` when the action was already in the
    /// requested state (key auto-repeat), so callers can skip re-dispatch.
    pub fn set(&mut self, action: InputAction, pressed: bool) -> bool {
        let slot = match action {
            InputAction::LeftFlipper => &mut self.left_flipper,
            InputAction::RightFlipper => &mut self.right_flipper,
            InputAction::Plunger => &mut self.plunger,
            InputAction::Start => &mut self.start,
        };
        if *slot == pressed {
            return false;
        }
        *slot = pressed;
        true
    }

    pub fn is_pressed(&self, action: InputAction) -> bool {
        match action {
            InputAction::LeftFlipper => self.left_flipper,
            InputAction::RightFlipper => self.right_flipper,
            InputAction::Plunger => self.plunger,
            InputAction::Start => self.start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_edges_are_filtered() {
        let mut input = InputState::new();
        assert!(input.set(InputAction::Plunger, true));
        assert!(!input.set(InputAction::Plunger, true));
        assert!(input.is_pressed(InputAction::Plunger));

        assert!(input.set(InputAction::Plunger, false));
        assert!(!input.set(InputAction::Plunger, false));
        assert!(!input.is_pressed(InputAction::Plunger));
    }

    #[test]
    fn test_actions_are_independent() {
        let mut input = InputState::new();
        input.set(InputAction::LeftFlipper, true);
        assert!(input.is_pressed(InputAction::LeftFlipper));
        assert!(!input.is_pressed(InputAction::RightFlipper));
    }
}
