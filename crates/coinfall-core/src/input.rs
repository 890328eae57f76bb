/// Logical actions the simulation consumes. Pause is not an action: the
/// game controller exposes an explicit `toggle_pause` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
    Attack,
}

/// Pressed/released snapshot of the mapped keys. An external input
/// collector refreshes it between frames; the engine only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
    jump: bool,
    attack: bool,
}

impl InputState {
    pub fn pressed(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
            Action::Attack => self.attack,
        }
    }

    pub fn set(&mut self, action: Action, down: bool) {
        match action {
            Action::Left => self.left = down,
            Action::Right => self.right = down,
            Action::Jump => self.jump = down,
            Action::Attack => self.attack = down,
        }
    }

    /// Maps a DOM-style key code onto an action. Unmapped codes are ignored.
    pub fn set_key(&mut self, code: &str, down: bool) {
        match code {
            "ArrowLeft" | "KeyA" => self.left = down,
            "ArrowRight" | "KeyD" => self.right = down,
            "Space" | "ArrowUp" | "KeyW" => self.jump = down,
            "KeyF" | "KeyE" => self.attack = down,
            _ => {},
        }
    }

    /// Releases every key. Collectors call this when the window loses focus
    /// so a held key cannot stick across a refocus.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
