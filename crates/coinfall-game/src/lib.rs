//! Deterministic side-scrolling platformer simulation.
//!
//! [`Game`] owns the whole session: the player, the current level's
//! platforms, enemies, pickups, and in-flight projectiles, plus the score
//! and the session state machine. One [`Game::step`] call advances exactly
//! one 60 Hz frame from an [`InputState`]; the same seed and input
//! sequence always produce the same session, which is what the test suite
//! leans on.

pub mod config;
pub mod enemy;
pub mod level;
pub mod pickup;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod scoring;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use coinfall_core::geom::Bounds;
use coinfall_core::input::InputState;

use crate::config::SimConfig;
use crate::enemy::Enemy;
use crate::level::{LEVEL_COUNT, LevelParams, build_level, spawn_point};
use crate::pickup::{COIN_SIZE, Coin, PowerUp, PowerUpKind};
use crate::platform::{Platform, PlatformKind};
use crate::player::{DamageOutcome, Player};
use crate::projectile::Projectile;

pub const DEFAULT_SEED: u64 = 42;

/// How far below the playfield the player may fall before the run ends.
const FALL_MARGIN: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    Playing,
    Paused,
    LevelComplete,
    GameOver,
}

/// Read-only per-frame summary for a display layer.
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub state: GameState,
    pub level: u32,
    pub score: i32,
    pub health: i32,
    pub max_health: i32,
    pub coins: u32,
    pub coins_to_win: u32,
    pub time_left: u32,
    pub enemies_defeated: usize,
    pub enemies_total: usize,
    pub shield: bool,
    pub speed_boost: u32,
    pub jump_boost: u32,
    pub damage_boost: u32,
    /// Present only while a living boss is on the field.
    pub boss_health: Option<i32>,
}

pub struct Game {
    cfg: SimConfig,
    seed: u64,
    rng: StdRng,

    pub state: GameState,
    pub current_level: u32,
    pub score: i32,
    pub player_health: i32,
    pub coins_collected: u32,
    pub coins_to_win: u32,
    /// Whole seconds elapsed in the current level.
    pub level_time: u32,
    pub level_time_limit: u32,
    /// Frames elapsed in the current level.
    pub game_time: u64,
    pub is_boss_level: bool,
    /// Distinguishes clearing every level from dying on one.
    pub victory: bool,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
}

impl Game {
    pub fn new(cfg: SimConfig) -> Self {
        Self::with_seed(cfg, DEFAULT_SEED)
    }

    pub fn with_seed(cfg: SimConfig, seed: u64) -> Self {
        let player = Player::new(&cfg);
        let player_health = cfg.rules.max_health;
        let mut game = Self {
            cfg,
            seed,
            rng: StdRng::seed_from_u64(seed),
            state: GameState::Playing,
            current_level: 1,
            score: 0,
            player_health,
            coins_collected: 0,
            coins_to_win: 0,
            level_time: 0,
            level_time_limit: 0,
            game_time: 0,
            is_boss_level: false,
            victory: false,
            player,
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
        };
        game.setup_level();
        game
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// Rebuild the current level from scratch. The level RNG is reseeded
    /// from the session seed and the level number, so the layout is a pure
    /// function of `(seed, level)` no matter how the player got here.
    fn setup_level(&mut self) {
        let params = LevelParams::for_level(self.current_level);
        self.coins_to_win = params.coins_to_win;
        self.level_time_limit = params.time_limit;
        self.is_boss_level = params.is_boss_level;
        self.coins_collected = 0;
        self.game_time = 0;
        self.level_time = 0;

        self.rng = StdRng::seed_from_u64(self.seed ^ u64::from(self.current_level));
        let layout = build_level(self.current_level, params, &mut self.rng);
        self.platforms = layout.platforms;
        self.enemies = layout.enemies;
        self.coins = layout.coins;
        self.power_ups = layout.power_ups;
        self.projectiles.clear();

        self.player.reset(&self.cfg);
        let (x, y) = spawn_point(&self.platforms);
        self.player.x = x;
        self.player.y = y;

        tracing::info!(
            level = self.current_level,
            coins_to_win = self.coins_to_win,
            time_limit = self.level_time_limit,
            "level ready"
        );
    }

    /// Advance one frame. A no-op in every state but `Playing`.
    pub fn step(&mut self, input: &InputState) {
        if self.state != GameState::Playing {
            return;
        }

        self.game_time += 1;
        self.level_time = (self.game_time / 60) as u32;

        let events = self.player.step(input, &mut self.platforms, &self.cfg);
        if events.hazard_hits > 0 {
            self.damage_player(1);
        }
        if let Some(shot) = events.projectile {
            self.projectiles.push(shot);
        }

        for platform in &mut self.platforms {
            platform.step();
        }

        self.step_enemies();
        self.step_projectiles();
        self.step_coins();
        self.step_power_ups();

        self.check_conditions();

        if self.state == GameState::Playing && self.level_time >= self.level_time_limit {
            tracing::info!(score = self.score, "time expired");
            self.state = GameState::GameOver;
        }
    }

    /// Move every enemy, materialize shooter volleys, apply contact damage,
    /// and let player shots land.
    fn step_enemies(&mut self) {
        let player_pos = (self.player.x, self.player.y);
        let player_box = self.player.bounds();
        let mut touched_player = false;

        for enemy in self.enemies.iter_mut() {
            if let Some(shot) = enemy.step(player_pos) {
                self.projectiles
                    .push(Projectile::new(shot.x, shot.y, shot.vx, shot.vy, shot.damage, false));
            }
            if enemy.alive && player_box.intersects(&enemy.bounds()) {
                touched_player = true;
            }
        }
        if touched_player {
            self.damage_player(1);
        }

        for enemy in self.enemies.iter_mut() {
            let enemy_box = enemy.bounds();
            for shot in self.projectiles.iter_mut() {
                if !enemy.alive {
                    break;
                }
                if shot.active && shot.from_player && enemy_box.intersects(&shot.bounds()) {
                    shot.active = false;
                    if enemy.take_damage(shot.damage) {
                        self.score += scoring::kill_score(&self.cfg.rules, enemy.kind);
                        tracing::debug!(kind = ?enemy.kind, "enemy destroyed");
                    }
                }
            }
        }
    }

    /// Integrate projectiles and drop the spent ones: expired, absorbed by
    /// the player, or stopped by a platform.
    fn step_projectiles(&mut self) {
        let player_box = self.player.bounds();
        let platforms = &self.platforms;
        let mut landed: Vec<i32> = Vec::new();

        self.projectiles.retain_mut(|shot| {
            shot.step();
            if !shot.active {
                return false;
            }
            let shot_box = shot.bounds();
            if !shot.from_player && player_box.intersects(&shot_box) {
                landed.push(shot.damage);
                return false;
            }
            !platforms.iter().any(|p| shot_box.intersects(&p.bounds()))
        });

        for damage in landed {
            self.damage_player(damage);
        }
    }

    fn step_coins(&mut self) {
        for i in 0..self.coins.len() {
            if self.coins[i].step() {
                self.relocate_coin(i);
            }
        }
        let player_box = self.player.bounds();
        for i in 0..self.coins.len() {
            if !self.coins[i].collected && player_box.intersects(&self.coins[i].bounds()) {
                self.collect_coin(i);
            }
        }
    }

    fn step_power_ups(&mut self) {
        let player_box = self.player.bounds();
        let mut picked: Vec<PowerUpKind> = Vec::new();
        for power_up in self.power_ups.iter_mut() {
            power_up.step();
            if !power_up.collected && player_box.intersects(&power_up.bounds()) {
                picked.push(power_up.collect());
            }
        }
        self.power_ups.retain(|p| !p.collected);
        for kind in picked {
            self.apply_power_up(kind);
        }
    }

    fn collect_coin(&mut self, index: usize) {
        self.coins[index].collect(self.cfg.rules.coin_respawn_frames);
        self.coins_collected += 1;
        self.score += scoring::coin_score(&self.cfg.rules, self.coins_collected);
        if self.coins_collected >= self.coins_to_win {
            self.complete_level();
        }
    }

    /// A respawning coin comes back on a random standable platform rather
    /// than its old spot.
    fn relocate_coin(&mut self, index: usize) {
        let spots: Vec<(f32, f32, f32)> = self
            .platforms
            .iter()
            .filter(|p| matches!(p.kind, PlatformKind::Normal | PlatformKind::Moving))
            .map(|p| (p.x, p.y, p.width))
            .collect();
        if spots.is_empty() {
            return;
        }
        let (px, py, pw) = spots[self.rng.random_range(0..spots.len())];
        let x = px + self.rng.random_range(0.0..pw - COIN_SIZE);
        self.coins[index].respawn_at(x, py - COIN_SIZE - 5.0);
    }

    fn apply_power_up(&mut self, kind: PowerUpKind) {
        let rules = &self.cfg.rules;
        match kind {
            PowerUpKind::Health => {
                self.player_health = (self.player_health + 1).min(rules.max_health);
            },
            PowerUpKind::Speed => self.player.speed_boost = rules.buff_frames,
            PowerUpKind::Jump => self.player.jump_boost = rules.buff_frames,
            PowerUpKind::Damage => self.player.damage_boost = rules.buff_frames,
            PowerUpKind::Shield => self.player.has_shield = true,
        }
        self.score += rules.powerup_score;
    }

    /// Route a hit through the player's damage gate and settle the health
    /// consequences here. Safe to call any number of times per frame.
    fn damage_player(&mut self, amount: i32) {
        match self.player.absorb_damage(amount, &self.cfg) {
            DamageOutcome::Ignored | DamageOutcome::ShieldSpent => {},
            DamageOutcome::Hurt(dealt) => {
                self.player_health -= dealt;
                if self.player_health <= 0 {
                    tracing::info!(score = self.score, "player defeated");
                    self.state = GameState::GameOver;
                }
            },
        }
    }

    fn check_conditions(&mut self) {
        if self.player.y > self.cfg.rules.playfield_height + FALL_MARGIN {
            tracing::info!(score = self.score, "fell out of the field");
            self.state = GameState::GameOver;
            return;
        }
        if self.is_boss_level && self.enemies.iter().all(|e| !e.alive) {
            self.complete_level();
        }
    }

    fn complete_level(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let time_left = self.level_time_limit.saturating_sub(self.level_time);
        self.score += scoring::completion_bonus(
            &self.cfg.rules,
            self.current_level == LEVEL_COUNT,
            time_left,
            self.player_health,
        );
        self.state = GameState::LevelComplete;
        tracing::info!(level = self.current_level, score = self.score, "level complete");
    }

    /// Move from `LevelComplete` to the next level, or to the victory
    /// screen after the last one. Ignored in any other state.
    pub fn advance_level(&mut self) {
        if self.state != GameState::LevelComplete {
            return;
        }
        self.current_level += 1;
        if self.current_level > LEVEL_COUNT {
            self.victory = true;
            self.state = GameState::GameOver;
            tracing::info!(score = self.score, "all levels cleared");
        } else {
            self.setup_level();
            self.state = GameState::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            other => other,
        };
    }

    /// Start the session over from level 1 with a fresh score.
    pub fn restart(&mut self) {
        self.current_level = 1;
        self.score = 0;
        self.player_health = self.cfg.rules.max_health;
        self.victory = false;
        self.setup_level();
        self.state = GameState::Playing;
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            state: self.state,
            level: self.current_level,
            score: self.score,
            health: self.player_health,
            max_health: self.cfg.rules.max_health,
            coins: self.coins_collected,
            coins_to_win: self.coins_to_win,
            time_left: self.level_time_limit.saturating_sub(self.level_time),
            enemies_defeated: self.enemies.iter().filter(|e| !e.alive).count(),
            enemies_total: self.enemies.len(),
            shield: self.player.has_shield,
            speed_boost: self.player.speed_boost,
            jump_boost: self.player.jump_boost,
            damage_boost: self.player.damage_boost,
            boss_health: self
                .enemies
                .iter()
                .find(|e| e.kind == enemy::EnemyKind::Boss && e.alive)
                .map(|e| e.health),
        }
    }
}
