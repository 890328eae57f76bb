use serde::{Deserialize, Serialize};

use coinfall_core::geom::{Aabb, Bounds, PlatformHit, platform_hit_side};

/// How far a deadly platform's spikes extend above its drawn body; the
/// reported hit box is inflated upward by the same amount.
pub const SPIKE_PAD: f32 = 10.0;
/// Horizontal oscillation speed of moving platforms.
pub const MOVE_SPEED: f32 = 1.5;
/// Oscillation amplitude of moving platforms.
pub const MOVE_DISTANCE: f32 = 100.0;
/// Upward impulse a bouncy platform grants on a top-side landing.
pub const BOUNCE_FORCE: f32 = -18.0;
/// Frames the spring stays visually compressed after a bounce.
const BOUNCE_TIMER_FRAMES: u32 = 15;
/// Velocity retention on ice versus any other surface.
const ICE_FRICTION: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    Moving,
    Deadly,
    Bouncy,
    Ice,
    Finish,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    origin_x: f32,
    move_direction: f32,
    pub bounce_timer: u32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
            origin_x: x,
            move_direction: 1.0,
            bounce_timer: 0,
        }
    }

    /// Advance one frame: moving platforms oscillate around their origin,
    /// reversing at each bound; the spring timer runs down.
    pub fn step(&mut self) {
        if self.kind == PlatformKind::Moving {
            self.x += MOVE_SPEED * self.move_direction;
            if self.x > self.origin_x + MOVE_DISTANCE || self.x < self.origin_x - MOVE_DISTANCE {
                self.move_direction = -self.move_direction;
            }
        }
        if self.bounce_timer > 0 {
            self.bounce_timer -= 1;
        }
    }

    /// Consume the spring: start the compression timer and return the
    /// upward impulse. Non-bouncy platforms return 0.
    pub fn bounce(&mut self) -> f32 {
        if self.kind == PlatformKind::Bouncy {
            self.bounce_timer = BOUNCE_TIMER_FRAMES;
            BOUNCE_FORCE
        } else {
            0.0
        }
    }

    /// Fraction of horizontal velocity a grounded player keeps per frame
    /// while standing here.
    pub fn surface_friction(&self, default_friction: f32) -> f32 {
        if self.kind == PlatformKind::Ice {
            ICE_FRICTION
        } else {
            default_friction
        }
    }

    /// Collision test decorated with this platform's surface traits.
    pub fn hit_from(&self, probe: &Aabb) -> Option<PlatformHit> {
        platform_hit_side(
            probe,
            &self.bounds(),
            self.kind == PlatformKind::Deadly,
            self.kind == PlatformKind::Bouncy,
        )
    }
}

impl Bounds for Platform {
    fn bounds(&self) -> Aabb {
        // Spikes stick out above a deadly platform's drawn body.
        if self.kind == PlatformKind::Deadly {
            Aabb::new(self.x, self.y - SPIKE_PAD, self.width, self.height + SPIKE_PAD)
        } else {
            Aabb::new(self.x, self.y, self.width, self.height)
        }
    }
}
