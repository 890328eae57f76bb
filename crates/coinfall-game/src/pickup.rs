use serde::{Deserialize, Serialize};

use coinfall_core::geom::{Aabb, Bounds};

pub const COIN_SIZE: f32 = 20.0;
pub const POWERUP_SIZE: f32 = 25.0;

/// A collectible coin. Collection is temporary: a respawn countdown brings
/// the coin back (possibly relocated by the controller). The countdown is a
/// plain frame counter so a level reset cancels it implicitly; a stale
/// timer can never resurrect a coin on the wrong level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    pub collected: bool,
    pub respawn_in: Option<u32>,
    frame: u32,
    bob: f32,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            collected: false,
            respawn_in: None,
            frame: 0,
            bob: 0.0,
        }
    }

    /// Advance one frame. Returns true when the respawn countdown elapsed
    /// this frame: the coin is available again and the caller may relocate
    /// it before the next collision pass.
    pub fn step(&mut self) -> bool {
        if self.collected {
            if let Some(frames) = self.respawn_in.as_mut() {
                *frames -= 1;
                if *frames == 0 {
                    self.collected = false;
                    self.respawn_in = None;
                    self.frame = 0;
                    self.bob = 0.0;
                    return true;
                }
            }
            false
        } else {
            self.frame += 1;
            self.bob = (self.frame as f32 * 0.1).sin() * 3.0;
            false
        }
    }

    /// Mark collected and arm the respawn countdown. A no-op if already
    /// collected.
    pub fn collect(&mut self, respawn_frames: u32) {
        if !self.collected {
            self.collected = true;
            self.respawn_in = Some(respawn_frames.max(1));
        }
    }

    /// Immediately bring the coin back at a new spot, cancelling any
    /// pending countdown.
    pub fn respawn_at(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.collected = false;
        self.respawn_in = None;
        self.frame = 0;
        self.bob = 0.0;
    }
}

impl Bounds for Coin {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y + self.bob, COIN_SIZE, COIN_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Speed,
    Jump,
    Damage,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Health,
        PowerUpKind::Speed,
        PowerUpKind::Jump,
        PowerUpKind::Damage,
        PowerUpKind::Shield,
    ];
}

/// A one-shot pickup. Unlike coins, collection is terminal: the controller
/// drops collected power-ups from its collection permanently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
    pub collected: bool,
    frame: u32,
    float_offset: f32,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            x,
            y,
            kind,
            collected: false,
            frame: 0,
            float_offset: 0.0,
        }
    }

    pub fn step(&mut self) {
        if self.collected {
            return;
        }
        self.frame += 1;
        self.float_offset = (self.frame as f32 * 0.05).sin() * 5.0;
    }

    pub fn collect(&mut self) -> PowerUpKind {
        self.collected = true;
        self.kind
    }
}

impl Bounds for PowerUp {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y + self.float_offset, POWERUP_SIZE, POWERUP_SIZE)
    }
}
