use serde::{Deserialize, Serialize};

use coinfall_core::geom::{Aabb, Bounds, Side};
use coinfall_core::input::{Action, InputState};

use crate::config::SimConfig;
use crate::platform::Platform;
use crate::projectile::Projectile;

pub const PLAYER_WIDTH: f32 = 30.0;
pub const PLAYER_HEIGHT: f32 = 50.0;

/// Below this the horizontal velocity snaps to exactly zero instead of
/// decaying forever.
const STOP_THRESHOLD: f32 = 0.5;
/// Feet band above/below a platform top accepted by the proximity pass.
const SNAP_ABOVE: f32 = 5.0;
const SNAP_BELOW: f32 = 10.0;
/// Horizontal kick applied opposite the shot direction.
const ATTACK_RECOIL: f32 = 2.0;
/// Muzzle offset from the body center toward the facing direction.
const MUZZLE_OFFSET: f32 = 15.0;
/// Vertical muzzle lift from the body center.
const MUZZLE_LIFT: f32 = 5.0;
/// A held jump key only re-fires the boosted double jump while the ascent
/// has already slowed past this.
const DOUBLE_JUMP_WINDOW: f32 = -5.0;

/// The player-controlled avatar. Health lives on the game controller; the
/// player only tracks its own gating state (shield, invulnerability).
/// One instance persists for the whole session; `reset` reinitializes it
/// per level so buffs and cooldowns cannot leak level-to-level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
    pub facing_right: bool,
    /// Buff frame counters, decremented to 0.
    pub speed_boost: u32,
    pub jump_boost: u32,
    pub damage_boost: u32,
    pub has_shield: bool,
    pub invulnerable: u32,
    pub attack_cooldown: u32,
    /// Friction of the surface currently stood on, adopted on landing.
    surface_friction: f32,
}

/// Everything a player frame can ask the controller to do.
#[derive(Debug, Clone, Default)]
pub struct StepEvents {
    /// Number of deadly-platform contacts this frame. Each is routed
    /// through the damage gate, so duplicates collapse into one hit.
    pub hazard_hits: u32,
    pub projectile: Option<Projectile>,
}

/// Outcome of a damage attempt after gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Swallowed by an active invulnerability window.
    Ignored,
    /// The shield absorbed the hit and is now gone.
    ShieldSpent,
    /// Health should drop by this much.
    Hurt(i32),
}

impl Player {
    pub fn new(cfg: &SimConfig) -> Self {
        let mut player = Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
            facing_right: true,
            speed_boost: 0,
            jump_boost: 0,
            damage_boost: 0,
            has_shield: false,
            invulnerable: 0,
            attack_cooldown: 0,
            surface_friction: cfg.physics.default_friction,
        };
        player.reset(cfg);
        player
    }

    /// Reinitialize for a fresh level. The instance itself persists, so
    /// session-scoped state (score, health) stays on the controller.
    pub fn reset(&mut self, cfg: &SimConfig) {
        self.x = 50.0;
        self.y = 100.0;
        self.vx = 0.0;
        self.vy = 1.0;
        self.on_ground = false;
        self.facing_right = true;
        self.speed_boost = 0;
        self.jump_boost = 0;
        self.damage_boost = 0;
        self.has_shield = false;
        self.invulnerable = 0;
        self.attack_cooldown = 0;
        self.surface_friction = cfg.physics.default_friction;
    }

    /// Advance one fixed tick: timers, gravity, steering, attack, position
    /// integration, then collision resolution against every platform.
    pub fn step(
        &mut self,
        input: &InputState,
        platforms: &mut [Platform],
        cfg: &SimConfig,
    ) -> StepEvents {
        self.speed_boost = self.speed_boost.saturating_sub(1);
        self.jump_boost = self.jump_boost.saturating_sub(1);
        self.damage_boost = self.damage_boost.saturating_sub(1);
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.invulnerable = self.invulnerable.saturating_sub(1);

        self.vy = (self.vy + cfg.physics.gravity).min(cfg.physics.terminal_velocity);

        self.steer(input, cfg);

        let mut events = StepEvents::default();
        if input.pressed(Action::Attack) && self.attack_cooldown == 0 {
            events.projectile = Some(self.attack(cfg));
        }

        self.x += self.vx;
        self.y += self.vy;

        events.hazard_hits = self.resolve_collisions(platforms, cfg);

        // Facing tracks the latest nonzero horizontal motion, recoil
        // included.
        if self.vx > 0.0 {
            self.facing_right = true;
        } else if self.vx < 0.0 {
            self.facing_right = false;
        }
        events
    }

    fn steer(&mut self, input: &InputState, cfg: &SimConfig) {
        let phys = &cfg.physics;
        let boost = if self.speed_boost > 0 {
            phys.speed_boost_mult
        } else {
            1.0
        };
        let max_speed = phys.move_speed * boost;
        let acceleration = phys.acceleration * boost;

        if input.pressed(Action::Left) {
            self.vx = (self.vx - acceleration).max(-max_speed);
        } else if input.pressed(Action::Right) {
            self.vx = (self.vx + acceleration).min(max_speed);
        } else {
            self.vx *= self.surface_friction;
            if self.vx.abs() < STOP_THRESHOLD {
                self.vx = 0.0;
            }
        }

        let jump_impulse = phys.jump_impulse
            * if self.jump_boost > 0 {
                phys.jump_boost_mult
            } else {
                1.0
            };
        if input.pressed(Action::Jump) && self.on_ground {
            self.vy = jump_impulse;
            self.on_ground = false;
        } else if input.pressed(Action::Jump)
            && !self.on_ground
            && self.jump_boost > 0
            && self.vy > DOUBLE_JUMP_WINDOW
        {
            // Boosted mid-air jump, weaker than the grounded one.
            self.vy = jump_impulse * phys.double_jump_mult;
        }
    }

    fn attack(&mut self, cfg: &SimConfig) -> Projectile {
        self.attack_cooldown = cfg.rules.attack_cooldown;
        let damage = if self.damage_boost > 0 { 2 } else { 1 };
        let direction = if self.facing_right { 1.0 } else { -1.0 };
        let projectile = Projectile::new(
            self.x + PLAYER_WIDTH / 2.0 + direction * MUZZLE_OFFSET,
            self.y + PLAYER_HEIGHT / 2.0 - MUZZLE_LIFT,
            direction * cfg.rules.projectile_speed,
            0.0,
            damage,
            true,
        );
        self.vx -= direction * ATTACK_RECOIL;
        projectile
    }

    /// Apply every platform contact in list order. Deadly platforms report
    /// a hazard hit and keep scanning; bouncy tops consume the spring; all
    /// other contacts snap flush against the struck edge.
    fn resolve_collisions(&mut self, platforms: &mut [Platform], cfg: &SimConfig) -> u32 {
        self.on_ground = false;
        self.surface_friction = cfg.physics.default_friction;
        let mut hazard_hits = 0;
        let mut any_contact = false;

        for platform in platforms.iter_mut() {
            let Some(contact) = platform.hit_from(&self.bounds()) else {
                continue;
            };
            any_contact = true;

            if contact.deadly {
                hazard_hits += 1;
                continue;
            }
            if contact.bouncy {
                let force = platform.bounce();
                if force != 0.0 {
                    self.vy = force;
                    self.on_ground = false;
                    continue;
                }
            }

            match contact.hit.side {
                Side::Top => {
                    self.y = platform.y - PLAYER_HEIGHT;
                    self.vy = 0.0;
                    self.on_ground = true;
                    self.surface_friction = platform.surface_friction(cfg.physics.default_friction);
                },
                Side::Bottom => {
                    self.y = platform.y + platform.height;
                    self.vy = 0.0;
                },
                Side::Left => {
                    self.x = platform.x - PLAYER_WIDTH;
                    self.vx = 0.0;
                },
                Side::Right => {
                    self.x = platform.x + platform.width;
                    self.vx = 0.0;
                },
            }
        }

        // Discrete steps can carry the feet just past a top edge without
        // overlapping; snap to standing when hovering within the band.
        if !any_contact {
            self.ground_proximity_snap(platforms, cfg);
        }
        hazard_hits
    }

    fn ground_proximity_snap(&mut self, platforms: &[Platform], cfg: &SimConfig) {
        if self.vy < 0.0 {
            return;
        }
        let feet = self.y + PLAYER_HEIGHT;
        for platform in platforms {
            if feet >= platform.y - SNAP_ABOVE
                && feet <= platform.y + SNAP_BELOW
                && self.x + PLAYER_WIDTH > platform.x
                && self.x < platform.x + platform.width
            {
                self.y = platform.y - PLAYER_HEIGHT;
                self.vy = 0.0;
                self.on_ground = true;
                self.surface_friction = platform.surface_friction(cfg.physics.default_friction);
                break;
            }
        }
    }

    /// Gate an incoming hit. Invulnerability swallows it entirely; a shield
    /// is spent for a short invulnerability window instead of health loss;
    /// otherwise the hit lands and a longer window opens.
    pub fn absorb_damage(&mut self, amount: i32, cfg: &SimConfig) -> DamageOutcome {
        if self.invulnerable > 0 {
            return DamageOutcome::Ignored;
        }
        if self.has_shield {
            self.has_shield = false;
            self.invulnerable = cfg.rules.shield_invuln_frames;
            return DamageOutcome::ShieldSpent;
        }
        self.invulnerable = cfg.rules.invuln_frames;
        DamageOutcome::Hurt(amount)
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformKind;
    use coinfall_core::test_helpers::held;

    fn cfg() -> SimConfig {
        SimConfig::default()
    }

    /// A wide floor with its top at y=500.
    fn floor() -> Vec<Platform> {
        vec![Platform::new(0.0, 500.0, 800.0, 40.0, PlatformKind::Normal)]
    }

    /// Park the player standing on the given platform top.
    fn stand_on(player: &mut Player, top: f32) {
        player.y = top - PLAYER_HEIGHT;
        player.vy = 0.0;
        player.on_ground = true;
    }

    #[test]
    fn gravity_accelerates_to_terminal_velocity() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms: Vec<Platform> = Vec::new();
        let input = InputState::default();
        for _ in 0..100 {
            player.step(&input, &mut platforms, &cfg);
        }
        assert_eq!(player.vy, cfg.physics.terminal_velocity);
    }

    #[test]
    fn landing_sets_grounded_and_zeroes_vy() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        player.x = 100.0;
        player.y = 400.0;
        let input = InputState::default();
        for _ in 0..120 {
            player.step(&input, &mut platforms, &cfg);
        }
        assert!(player.on_ground);
        assert_eq!(player.vy, 0.0);
        assert_eq!(player.y, 500.0 - PLAYER_HEIGHT);
    }

    #[test]
    fn horizontal_speed_is_capped() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        player.x = 100.0;
        stand_on(&mut player, 500.0);
        let input = held(&[Action::Right]);
        for _ in 0..60 {
            player.step(&input, &mut platforms, &cfg);
        }
        assert_eq!(player.vx, cfg.physics.move_speed);
        assert!(player.facing_right);
    }

    #[test]
    fn speed_boost_raises_the_cap() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        player.x = 100.0;
        stand_on(&mut player, 500.0);
        player.speed_boost = 300;
        let input = held(&[Action::Right]);
        for _ in 0..60 {
            player.step(&input, &mut platforms, &cfg);
        }
        assert_eq!(player.vx, cfg.physics.move_speed * cfg.physics.speed_boost_mult);
    }

    #[test]
    fn friction_decays_and_snaps_to_zero() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        player.x = 300.0;
        stand_on(&mut player, 500.0);
        player.vx = 8.0;
        let input = InputState::default();
        for _ in 0..30 {
            player.step(&input, &mut platforms, &cfg);
        }
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn ice_keeps_the_player_sliding_longer() {
        let cfg = cfg();
        let mut on_ice = Player::new(&cfg);
        let mut ice = vec![Platform::new(0.0, 500.0, 800.0, 40.0, PlatformKind::Ice)];
        on_ice.x = 300.0;
        stand_on(&mut on_ice, 500.0);
        on_ice.vx = 8.0;

        let mut on_rock = Player::new(&cfg);
        let mut rock = floor();
        on_rock.x = 300.0;
        stand_on(&mut on_rock, 500.0);
        on_rock.vx = 8.0;

        let input = InputState::default();
        // One step to adopt the surface friction, then coast.
        for _ in 0..6 {
            on_ice.step(&input, &mut ice, &cfg);
            on_rock.step(&input, &mut rock, &cfg);
        }
        assert!(
            on_ice.vx > on_rock.vx,
            "ice retains more speed: {} vs {}",
            on_ice.vx,
            on_rock.vx
        );
    }

    #[test]
    fn jump_requires_ground() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        player.x = 100.0;
        stand_on(&mut player, 500.0);
        let input = held(&[Action::Jump]);
        player.step(&input, &mut platforms, &cfg);
        assert!(player.vy < 0.0, "grounded jump launches upward");
        assert!(!player.on_ground);

        // Airborne without a boost: the held key does nothing more.
        let vy = player.vy;
        player.step(&input, &mut platforms, &cfg);
        assert!(player.vy > vy, "only gravity acts while airborne");
    }

    #[test]
    fn jump_boost_enables_midair_jump_late_in_ascent() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        player.x = 100.0;
        stand_on(&mut player, 500.0);
        player.jump_boost = 300;

        let input = held(&[Action::Jump]);
        player.step(&input, &mut platforms, &cfg);
        let boosted = cfg.physics.jump_impulse * cfg.physics.jump_boost_mult;
        assert_eq!(player.vy, boosted);

        // Early in the ascent (vy well below -5) the double jump is locked.
        assert!(player.vy <= DOUBLE_JUMP_WINDOW);
        let vy = player.vy;
        player.step(&input, &mut platforms, &cfg);
        assert!(player.vy > vy, "no re-fire while rising fast");

        // Let the ascent slow past the window, then the held key re-fires.
        while player.vy <= DOUBLE_JUMP_WINDOW {
            player.step(&InputState::default(), &mut platforms, &cfg);
        }
        player.step(&input, &mut platforms, &cfg);
        assert_eq!(player.vy, boosted * cfg.physics.double_jump_mult);
    }

    #[test]
    fn attack_spawns_projectile_with_cooldown_and_recoil() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        player.x = 100.0;
        stand_on(&mut player, 500.0);

        let input = held(&[Action::Attack]);
        let events = player.step(&input, &mut platforms, &cfg);
        let shot = events.projectile.expect("cooldown was clear");
        assert!(shot.from_player);
        assert_eq!(shot.damage, 1);
        assert_eq!(shot.vx, cfg.rules.projectile_speed);
        assert_eq!(player.attack_cooldown, cfg.rules.attack_cooldown);

        // Held key does not fire again until the cooldown lapses.
        let events = player.step(&input, &mut platforms, &cfg);
        assert!(events.projectile.is_none());
    }

    #[test]
    fn damage_boost_doubles_projectile_damage() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        player.x = 100.0;
        stand_on(&mut player, 500.0);
        player.damage_boost = 300;
        player.facing_right = false;

        let events = player.step(&held(&[Action::Attack]), &mut platforms, &cfg);
        let shot = events.projectile.unwrap();
        assert_eq!(shot.damage, 2);
        assert_eq!(shot.vx, -cfg.rules.projectile_speed, "fires toward the facing");
    }

    #[test]
    fn deadly_platform_reports_hazard_without_moving_player() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = vec![Platform::new(0.0, 500.0, 800.0, 40.0, PlatformKind::Deadly)];
        player.x = 100.0;
        player.y = 460.0; // feet inside the spike band after one step
        player.vy = 0.0;

        let events = player.step(&InputState::default(), &mut platforms, &cfg);
        assert!(events.hazard_hits > 0);
        assert!(!player.on_ground, "spikes never count as standing");
    }

    #[test]
    fn spikes_hurt_from_below_without_snapping() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = vec![Platform::new(0.0, 200.0, 800.0, 20.0, PlatformKind::Deadly)];
        // Head just under the platform body.
        player.x = 100.0;
        player.y = 216.0;
        player.vy = 0.0;

        let events = player.step(&InputState::default(), &mut platforms, &cfg);
        assert!(events.hazard_hits > 0, "underside spike contact must hurt");
        // The hit is not resolved as a solid ceiling.
        assert_eq!(player.y, 216.5);
        assert_eq!(player.vy, 0.5);
        assert!(!player.on_ground);
    }

    #[test]
    fn bouncy_top_launch_overrides_standing() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = vec![Platform::new(0.0, 500.0, 800.0, 20.0, PlatformKind::Bouncy)];
        player.x = 100.0;
        player.y = 449.0;
        player.vy = 2.0;

        player.step(&InputState::default(), &mut platforms, &cfg);
        assert_eq!(player.vy, crate::platform::BOUNCE_FORCE);
        assert!(!player.on_ground);
        assert_eq!(platforms[0].bounce_timer, 15);
    }

    #[test]
    fn wall_contact_zeroes_horizontal_velocity() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = vec![
            Platform::new(0.0, 500.0, 800.0, 40.0, PlatformKind::Normal),
            // A tall wall just right of the player.
            Platform::new(200.0, 300.0, 40.0, 200.0, PlatformKind::Normal),
        ];
        player.x = 150.0;
        stand_on(&mut player, 500.0);

        let input = held(&[Action::Right]);
        for _ in 0..30 {
            player.step(&input, &mut platforms, &cfg);
        }
        assert_eq!(player.x, 200.0 - PLAYER_WIDTH, "flush against the wall");
    }

    #[test]
    fn proximity_pass_snaps_hovering_feet() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        let mut platforms = floor();
        // Feet 3 units above the floor top, drifting down: no AABB overlap,
        // but within the snap band.
        player.x = 100.0;
        player.y = 500.0 - PLAYER_HEIGHT - 3.0;
        player.vy = 0.0;

        // One step adds gravity (0.5) and moves 0.5 down: feet at 497.5+...
        player.step(&InputState::default(), &mut platforms, &cfg);
        assert!(player.on_ground);
        assert_eq!(player.y, 500.0 - PLAYER_HEIGHT);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn invulnerability_swallows_repeat_damage() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        assert_eq!(player.absorb_damage(1, &cfg), DamageOutcome::Hurt(1));
        assert_eq!(player.invulnerable, cfg.rules.invuln_frames);
        assert_eq!(player.absorb_damage(1, &cfg), DamageOutcome::Ignored);
        assert_eq!(player.absorb_damage(3, &cfg), DamageOutcome::Ignored);
    }

    #[test]
    fn shield_absorbs_one_hit_then_normal_damage_resumes() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        player.has_shield = true;
        assert_eq!(player.absorb_damage(1, &cfg), DamageOutcome::ShieldSpent);
        assert!(!player.has_shield);
        assert_eq!(player.invulnerable, cfg.rules.shield_invuln_frames);

        player.invulnerable = 0;
        assert_eq!(player.absorb_damage(1, &cfg), DamageOutcome::Hurt(1));
    }

    #[test]
    fn reset_clears_buffs_but_not_identity() {
        let cfg = cfg();
        let mut player = Player::new(&cfg);
        player.speed_boost = 100;
        player.jump_boost = 100;
        player.damage_boost = 100;
        player.has_shield = true;
        player.invulnerable = 50;
        player.attack_cooldown = 10;
        player.reset(&cfg);
        assert_eq!(player.speed_boost, 0);
        assert_eq!(player.jump_boost, 0);
        assert_eq!(player.damage_boost, 0);
        assert!(!player.has_shield);
        assert_eq!(player.invulnerable, 0);
        assert_eq!(player.attack_cooldown, 0);
        assert_eq!((player.x, player.y), (50.0, 100.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn position_and_velocity_stay_finite(
                moves in proptest::collection::vec(0u8..4, 20..120)
            ) {
                let cfg = cfg();
                let mut player = Player::new(&cfg);
                let mut platforms = floor();
                player.x = 400.0;
                player.y = 300.0;

                for m in moves {
                    let input = match m {
                        0 => held(&[Action::Left]),
                        1 => held(&[Action::Right]),
                        2 => held(&[Action::Jump]),
                        _ => held(&[Action::Attack]),
                    };
                    player.step(&input, &mut platforms, &cfg);
                    prop_assert!(player.x.is_finite() && player.y.is_finite());
                    prop_assert!(player.vx.is_finite() && player.vy.is_finite());
                    prop_assert!(player.vy <= cfg.physics.terminal_velocity);
                }
            }

            #[test]
            fn horizontal_speed_stays_bounded(
                moves in proptest::collection::vec(0u8..3, 20..120)
            ) {
                let cfg = cfg();
                let mut player = Player::new(&cfg);
                let mut platforms = floor();
                player.x = 400.0;
                stand_on(&mut player, 500.0);

                // Max boosted speed plus one attack recoil.
                let bound = cfg.physics.move_speed * cfg.physics.speed_boost_mult + 2.0;
                for m in moves {
                    let input = match m {
                        0 => held(&[Action::Left]),
                        1 => held(&[Action::Right]),
                        _ => held(&[Action::Attack]),
                    };
                    player.step(&input, &mut platforms, &cfg);
                    prop_assert!(player.vx.abs() <= bound, "vx = {}", player.vx);
                }
            }
        }
    }
}
