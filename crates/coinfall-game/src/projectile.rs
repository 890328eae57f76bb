use serde::{Deserialize, Serialize};

use coinfall_core::geom::{Aabb, Bounds};

/// Side length of the square hit box, centered on the position.
pub const PROJECTILE_SIZE: f32 = 8.0;
/// Frames a projectile lives before expiring (3 s at 60 fps).
pub const PROJECTILE_LIFETIME: u32 = 180;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub damage: i32,
    /// Ownership decides which side this shot can hurt.
    pub from_player: bool,
    pub lifetime: u32,
    pub active: bool,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, damage: i32, from_player: bool) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            damage,
            from_player,
            lifetime: PROJECTILE_LIFETIME,
            active: true,
        }
    }

    pub fn step(&mut self) {
        if !self.active {
            return;
        }
        self.x += self.vx;
        self.y += self.vy;
        self.lifetime -= 1;
        if self.lifetime == 0 {
            self.active = false;
        }
    }
}

impl Bounds for Projectile {
    fn bounds(&self) -> Aabb {
        Aabb::new(
            self.x - PROJECTILE_SIZE / 2.0,
            self.y - PROJECTILE_SIZE / 2.0,
            PROJECTILE_SIZE,
            PROJECTILE_SIZE,
        )
    }
}
