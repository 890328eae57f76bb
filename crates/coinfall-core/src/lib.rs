//! Shared primitives for the Coinfall simulation: axis-aligned geometry
//! and collision resolution, the logical input snapshot, and the fixed
//! 60 Hz timestep driver. Everything here is renderer-agnostic.

pub mod geom;
pub mod input;
pub mod step;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::geom::Aabb;
    use crate::input::{Action, InputState};

    /// Shorthand Aabb constructor for tests.
    pub fn aabb(x: f32, y: f32, width: f32, height: f32) -> Aabb {
        Aabb {
            x,
            y,
            width,
            height,
        }
    }

    /// Build an input snapshot with the given actions held down.
    pub fn held(actions: &[Action]) -> InputState {
        let mut input = InputState::default();
        for &action in actions {
            input.set(action, true);
        }
        input
    }
}
