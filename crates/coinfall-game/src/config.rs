use serde::{Deserialize, Serialize};

/// Tunable integration parameters. Units are playfield pixels per frame at
/// the fixed 60 Hz tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub move_speed: f32,
    pub acceleration: f32,
    /// Fraction of horizontal velocity retained per frame when no key is
    /// held and the surface underfoot has no friction of its own.
    pub default_friction: f32,
    /// Negative: y grows downward.
    pub jump_impulse: f32,
    pub speed_boost_mult: f32,
    pub jump_boost_mult: f32,
    pub double_jump_mult: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            terminal_velocity: 20.0,
            move_speed: 8.0,
            acceleration: 0.5,
            default_friction: 0.8,
            jump_impulse: -15.0,
            speed_boost_mult: 1.5,
            jump_boost_mult: 1.3,
            double_jump_mult: 0.8,
        }
    }
}

/// Session rules: playfield extent, timers, and the scoring table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Falling this far plus the fall margin below the top edge ends the
    /// run. Horizontal extent is fixed by the level tables.
    pub playfield_height: f32,
    pub max_health: i32,
    /// Duration of the speed/jump/damage buffs, in frames.
    pub buff_frames: u32,
    pub invuln_frames: u32,
    pub shield_invuln_frames: u32,
    pub attack_cooldown: u32,
    pub projectile_speed: f32,
    pub coin_respawn_frames: u32,
    pub coin_score: i32,
    pub coin_streak_bonus: i32,
    pub coin_streak_len: u32,
    pub powerup_score: i32,
    pub kill_score: i32,
    pub boss_kill_score: i32,
    pub level_clear_score: i32,
    pub health_bonus: i32,
    /// Points per second left on the clock when a level is cleared.
    pub time_bonus_rate: i32,
    pub final_level_bonus: i32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            playfield_height: 600.0,
            max_health: 3,
            buff_frames: 300,
            invuln_frames: 60,
            shield_invuln_frames: 30,
            attack_cooldown: 20,
            projectile_speed: 12.0,
            coin_respawn_frames: 600,
            coin_score: 10,
            coin_streak_bonus: 50,
            coin_streak_len: 5,
            powerup_score: 25,
            kill_score: 100,
            boss_kill_score: 500,
            level_clear_score: 100,
            health_bonus: 50,
            time_bonus_rate: 2,
            final_level_bonus: 1000,
        }
    }
}

/// Top-level simulation configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub rules: RuleConfig,
}

impl SimConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("COINFALL_CONFIG")
            .unwrap_or_else(|_| "config/coinfall.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<SimConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    SimConfig::default()
                },
            },
            Err(_) => SimConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_standard_tuning() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.physics.gravity, 0.5);
        assert_eq!(cfg.physics.jump_impulse, -15.0);
        assert_eq!(cfg.rules.playfield_height, 600.0);
        assert_eq!(cfg.rules.max_health, 3);
        assert_eq!(cfg.rules.buff_frames, 300);
        assert_eq!(cfg.rules.coin_respawn_frames, 600);
    }

    #[test]
    fn partial_toml_overrides_merge_with_defaults() {
        let cfg: SimConfig = toml::from_str(
            r#"
            [physics]
            gravity = 0.7

            [rules]
            max_health = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.physics.gravity, 0.7);
        assert_eq!(cfg.rules.max_health, 5);
        // Untouched fields keep their defaults.
        assert_eq!(cfg.physics.move_speed, 8.0);
        assert_eq!(cfg.rules.coin_score, 10);
    }

    #[test]
    fn garbage_toml_fails_to_parse() {
        assert!(toml::from_str::<SimConfig>("physics = 3").is_err());
    }
}
