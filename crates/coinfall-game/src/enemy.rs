use serde::{Deserialize, Serialize};

use coinfall_core::geom::{Aabb, Bounds};

/// Pursuit radius for chasers.
const CHASE_RADIUS: f32 = 300.0;
/// Firing range for shooters.
const SHOOT_RANGE: f32 = 400.0;
/// Shooter shot speed after normalization.
const SHOT_SPEED: f32 = 5.0;
/// Frames between shooter volleys (1 s at 60 fps).
const SHOOT_COOLDOWN: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Patrol,
    Chaser,
    Shooter,
    Boss,
}

/// A shot the controller should materialize as an enemy projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub damage: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: EnemyKind,
    pub health: i32,
    pub speed: f32,
    pub direction: f32,
    pub patrol_distance: f32,
    start_x: f32,
    /// Destroyed enemies stay in the collection with `alive = false`; the
    /// slot is never compacted so late queries keep stable indices.
    pub alive: bool,
    pub attack_cooldown: u32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind) -> Self {
        let (width, height, health, speed, patrol_distance) = match kind {
            EnemyKind::Patrol => (30.0, 30.0, 2, 1.5, 150.0),
            EnemyKind::Chaser => (30.0, 30.0, 1, 2.0, 150.0),
            EnemyKind::Shooter => (30.0, 30.0, 1, 2.0, 150.0),
            EnemyKind::Boss => (80.0, 80.0, 15, 1.5, 200.0),
        };
        Self {
            x,
            y,
            width,
            height,
            kind,
            health,
            speed,
            direction: 1.0,
            patrol_distance,
            start_x: x,
            alive: true,
            attack_cooldown: 0,
        }
    }

    /// Advance one frame toward/around the player's position (top-left
    /// corner, matching this enemy's own coordinates). Shooters may return
    /// a shot request for the controller to spawn.
    pub fn step(&mut self, player_pos: (f32, f32)) -> Option<ShotRequest> {
        if !self.alive {
            return None;
        }

        let shot = match self.kind {
            EnemyKind::Patrol | EnemyKind::Boss => {
                self.patrol();
                None
            },
            EnemyKind::Chaser => {
                self.chase(player_pos);
                None
            },
            EnemyKind::Shooter => self.shoot(player_pos),
        };

        if self.attack_cooldown > 0 {
            self.attack_cooldown -= 1;
        }
        shot
    }

    fn patrol(&mut self) {
        self.x += self.speed * self.direction;
        if self.x > self.start_x + self.patrol_distance || self.x < self.start_x - self.patrol_distance
        {
            self.direction = -self.direction;
        }
    }

    /// Flight-like pursuit: full speed horizontally, half vertically, no
    /// gravity. Idle outside the chase radius.
    fn chase(&mut self, (px, py): (f32, f32)) {
        let dx = px - self.x;
        let dy = py - self.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > 0.0 && distance < CHASE_RADIUS {
            self.x += dx / distance * self.speed;
            self.y += dy / distance * self.speed * 0.5;
        }
    }

    fn shoot(&mut self, (px, py): (f32, f32)) -> Option<ShotRequest> {
        if self.attack_cooldown != 0 {
            return None;
        }
        let dx = px - self.x;
        let dy = py - self.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= 0.0 || distance >= SHOOT_RANGE {
            return None;
        }
        self.attack_cooldown = SHOOT_COOLDOWN;
        Some(ShotRequest {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
            vx: dx / distance * SHOT_SPEED,
            vy: dy / distance * SHOT_SPEED,
            damage: 1,
        })
    }

    /// Subtract health; returns true when this call destroyed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}
