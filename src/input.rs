//! Logical input actions and the per-frame snapshot the core reads.

use crate::compute::rising_edge;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Quit,
}

impl Action {
    pub const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

/// Which actions are held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: [bool; Action::COUNT],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with exactly the given actions held.
    pub fn with(actions: &[Action]) -> Self {
        let mut snapshot = Self::default();
        for &action in actions {
            snapshot.set(action, true);
        }
        snapshot
    }

    pub fn set(&mut self, action: Action, held: bool) {
        self.held[action.index()] = held;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// True when `action` went from released in `previous` to held in `self`.
    pub fn pressed_since(&self, previous: &InputSnapshot, action: Action) -> bool {
        rising_edge(previous.is_held(action), self.is_held(action))
    }
}
