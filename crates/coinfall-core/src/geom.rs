use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in playfield units. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict AABB overlap: shared edges do not count as touching.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Point containment, inclusive on all four edges.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Capability implemented by every simulated entity the collision code
/// touches. Bounds may be offset by animation state (coin bob, power-up
/// float) or inflated (spikes), so callers must not assume they match the
/// entity's stored position exactly.
pub trait Bounds {
    fn bounds(&self) -> Aabb;
}

/// Which face of `b` the probe box `a` struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// A resolved collision: the struck side and the penetration depth along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub side: Side,
    pub overlap: f32,
}

/// Side-of-impact via minimum penetration. Returns `None` iff the boxes do
/// not overlap. Exact ties resolve top, then bottom, then left, then right,
/// so a corner landing counts as standing rather than a side push.
pub fn hit_side(a: &Aabb, b: &Aabb) -> Option<Hit> {
    if !a.intersects(b) {
        return None;
    }

    let overlap_left = a.right() - b.x;
    let overlap_right = b.right() - a.x;
    let overlap_top = a.bottom() - b.y;
    let overlap_bottom = b.bottom() - a.y;

    let min_overlap = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    let hit = if min_overlap == overlap_top {
        Hit {
            side: Side::Top,
            overlap: overlap_top,
        }
    } else if min_overlap == overlap_bottom {
        Hit {
            side: Side::Bottom,
            overlap: overlap_bottom,
        }
    } else if min_overlap == overlap_left {
        Hit {
            side: Side::Left,
            overlap: overlap_left,
        }
    } else {
        Hit {
            side: Side::Right,
            overlap: overlap_right,
        }
    };
    Some(hit)
}

/// A platform collision decorated with surface traits. Spikes hurt from
/// every direction, so `deadly` carries through on any side; the spring
/// only fires under the feet, so `bouncy` is top-side only. Informational
/// for the caller; the underlying `Hit` contract is unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformHit {
    pub hit: Hit,
    pub deadly: bool,
    pub bouncy: bool,
}

pub fn platform_hit_side(a: &Aabb, platform: &Aabb, deadly: bool, bouncy: bool) -> Option<PlatformHit> {
    let hit = hit_side(a, platform)?;
    Some(PlatformHit {
        hit,
        deadly,
        bouncy: bouncy && hit.side == Side::Top,
    })
}

/// Circle with a center point, for proximity tests on projectile-style
/// actors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt() < a.radius + b.radius
}
