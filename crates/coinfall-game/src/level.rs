use rand::Rng;

use crate::enemy::{Enemy, EnemyKind};
use crate::pickup::{Coin, PowerUp, PowerUpKind};
use crate::platform::{Platform, PlatformKind};
use crate::player::PLAYER_HEIGHT;

pub const LEVEL_COUNT: u32 = 5;

/// Playfield dimensions; all layout tables assume this canvas.
pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;

/// Per-level win conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelParams {
    pub coins_to_win: u32,
    /// Seconds before the level times out.
    pub time_limit: u32,
    pub is_boss_level: bool,
}

impl LevelParams {
    pub fn for_level(level: u32) -> Self {
        let (coins_to_win, time_limit) = match level {
            1 => (5, 180),
            2 => (8, 150),
            3 => (12, 120),
            4 => (15, 90),
            _ => (20, 300),
        };
        Self {
            coins_to_win,
            time_limit,
            is_boss_level: level >= LEVEL_COUNT,
        }
    }
}

/// Everything `build_level` produces for one level.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
}

/// Build the full layout for a level. Platform and enemy tables are fixed;
/// coin and power-up positions draw from `rng`, so two callers with equally
/// seeded generators get byte-identical layouts.
pub fn build_level<R: Rng>(level: u32, params: LevelParams, rng: &mut R) -> LevelLayout {
    let mut platforms = Vec::new();
    let mut enemies = Vec::new();

    // The boss arena supplies its own floor.
    if level != 5 {
        platforms.push(Platform::new(
            0.0,
            FIELD_HEIGHT - 40.0,
            FIELD_WIDTH,
            40.0,
            PlatformKind::Normal,
        ));
    }

    match level {
        1 => level_1(&mut platforms, &mut enemies),
        2 => level_2(&mut platforms, &mut enemies),
        3 => level_3(&mut platforms, &mut enemies),
        4 => level_4(&mut platforms, &mut enemies),
        _ => level_5(&mut platforms, &mut enemies),
    }

    let power_ups = scatter_power_ups(&platforms, level, rng);
    let coins = scatter_coins(&platforms, params.coins_to_win + 5, rng);

    LevelLayout {
        platforms,
        enemies,
        coins,
        power_ups,
    }
}

/// Where the player starts: standing slightly above the first platform that
/// spans x = 100, or the default drop-in spot when none does.
pub fn spawn_point(platforms: &[Platform]) -> (f32, f32) {
    platforms
        .iter()
        .find(|p| p.x <= 100.0 && p.x + p.width >= 100.0)
        .map(|p| (p.x + 20.0, p.y - PLAYER_HEIGHT - 10.0))
        .unwrap_or((50.0, 100.0))
}

fn push_platforms(platforms: &mut Vec<Platform>, table: &[(f32, f32, f32, f32, PlatformKind)]) {
    for &(x, y, width, height, kind) in table {
        platforms.push(Platform::new(x, y, width, height, kind));
    }
}

fn level_1(platforms: &mut Vec<Platform>, enemies: &mut Vec<Enemy>) {
    use PlatformKind::{Moving, Normal};
    push_platforms(platforms, &[
        (100.0, 450.0, 120.0, 20.0, Normal),
        (300.0, 400.0, 100.0, 20.0, Normal),
        (500.0, 350.0, 100.0, 20.0, Moving),
        (200.0, 300.0, 90.0, 20.0, Normal),
        (400.0, 250.0, 100.0, 20.0, Normal),
        (600.0, 200.0, 80.0, 20.0, Normal),
        (300.0, 150.0, 100.0, 20.0, Normal),
        (100.0, 200.0, 80.0, 20.0, Moving),
    ]);
    enemies.push(Enemy::new(200.0, 430.0, EnemyKind::Patrol));
    enemies.push(Enemy::new(450.0, 330.0, EnemyKind::Patrol));
    enemies.push(Enemy::new(150.0, 180.0, EnemyKind::Patrol));
}

fn level_2(platforms: &mut Vec<Platform>, enemies: &mut Vec<Enemy>) {
    use PlatformKind::{Deadly, Moving, Normal};
    // Two extra ground strips on top of the base ground.
    push_platforms(platforms, &[
        (0.0, 560.0, 320.0, 40.0, Normal),
        (480.0, 560.0, 320.0, 40.0, Normal),
        (100.0, 450.0, 100.0, 20.0, Normal),
        (250.0, 380.0, 90.0, 20.0, Normal),
        (150.0, 300.0, 80.0, 20.0, Moving),
        (350.0, 320.0, 100.0, 20.0, Normal),
        (500.0, 280.0, 90.0, 20.0, Normal),
        (650.0, 350.0, 100.0, 20.0, Normal),
        (550.0, 250.0, 80.0, 20.0, Moving),
        (700.0, 200.0, 70.0, 20.0, Normal),
        (400.0, 180.0, 100.0, 20.0, Normal),
        (200.0, 220.0, 80.0, 20.0, Deadly),
    ]);
    enemies.push(Enemy::new(300.0, 430.0, EnemyKind::Chaser));
    enemies.push(Enemy::new(500.0, 260.0, EnemyKind::Chaser));
    enemies.push(Enemy::new(650.0, 330.0, EnemyKind::Patrol));
}

fn level_3(platforms: &mut Vec<Platform>, enemies: &mut Vec<Enemy>) {
    use PlatformKind::{Bouncy, Deadly, Moving, Normal};
    push_platforms(platforms, &[
        (0.0, 550.0, 200.0, 20.0, Normal),
        (300.0, 550.0, 200.0, 20.0, Normal),
        (600.0, 550.0, 200.0, 20.0, Normal),
        (100.0, 450.0, 150.0, 20.0, Normal),
        (350.0, 450.0, 150.0, 20.0, Moving),
        (600.0, 450.0, 150.0, 20.0, Normal),
        (200.0, 350.0, 120.0, 20.0, Normal),
        (450.0, 350.0, 120.0, 20.0, Deadly),
        (700.0, 350.0, 100.0, 20.0, Normal),
        (100.0, 250.0, 80.0, 20.0, Normal),
        (350.0, 250.0, 80.0, 20.0, Bouncy),
        (600.0, 250.0, 80.0, 20.0, Normal),
        (300.0, 150.0, 200.0, 20.0, Normal),
    ]);
    enemies.push(Enemy::new(400.0, 530.0, EnemyKind::Shooter));
    enemies.push(Enemy::new(150.0, 430.0, EnemyKind::Patrol));
    enemies.push(Enemy::new(650.0, 430.0, EnemyKind::Chaser));
    enemies.push(Enemy::new(320.0, 330.0, EnemyKind::Shooter));
}

fn level_4(platforms: &mut Vec<Platform>, enemies: &mut Vec<Enemy>) {
    use PlatformKind::{Bouncy, Deadly, Moving, Normal};
    push_platforms(platforms, &[
        (0.0, 580.0, 800.0, 20.0, Normal),
        (50.0, 500.0, 100.0, 20.0, Normal),
        (200.0, 450.0, 100.0, 20.0, Moving),
        (350.0, 500.0, 100.0, 20.0, Normal),
        (500.0, 450.0, 100.0, 20.0, Deadly),
        (650.0, 500.0, 100.0, 20.0, Normal),
        (100.0, 350.0, 120.0, 20.0, Normal),
        (300.0, 300.0, 100.0, 20.0, Bouncy),
        (500.0, 350.0, 120.0, 20.0, Normal),
        (200.0, 200.0, 80.0, 20.0, Moving),
        (400.0, 150.0, 150.0, 20.0, Normal),
        (600.0, 200.0, 80.0, 20.0, Deadly),
        (50.0, 100.0, 100.0, 20.0, Normal),
        (650.0, 100.0, 100.0, 20.0, Normal),
    ]);
    enemies.push(Enemy::new(100.0, 480.0, EnemyKind::Patrol));
    enemies.push(Enemy::new(400.0, 480.0, EnemyKind::Chaser));
    enemies.push(Enemy::new(700.0, 480.0, EnemyKind::Patrol));
    enemies.push(Enemy::new(250.0, 330.0, EnemyKind::Shooter));
    enemies.push(Enemy::new(550.0, 330.0, EnemyKind::Shooter));
    enemies.push(Enemy::new(450.0, 130.0, EnemyKind::Chaser));
}

fn level_5(platforms: &mut Vec<Platform>, enemies: &mut Vec<Enemy>) {
    use PlatformKind::Normal;
    push_platforms(platforms, &[
        (0.0, 580.0, 800.0, 20.0, Normal),
        (100.0, 450.0, 200.0, 20.0, Normal),
        (500.0, 450.0, 200.0, 20.0, Normal),
        (300.0, 300.0, 200.0, 20.0, Normal),
        (50.0, 200.0, 100.0, 20.0, Normal),
        (650.0, 200.0, 100.0, 20.0, Normal),
        (200.0, 100.0, 80.0, 20.0, Normal),
        (520.0, 100.0, 80.0, 20.0, Normal),
    ]);
    enemies.push(Enemy::new(350.0, 80.0, EnemyKind::Boss));
    enemies.push(Enemy::new(200.0, 150.0, EnemyKind::Shooter));
    enemies.push(Enemy::new(600.0, 150.0, EnemyKind::Shooter));
    enemies.push(Enemy::new(100.0, 430.0, EnemyKind::Chaser));
    enemies.push(Enemy::new(700.0, 430.0, EnemyKind::Chaser));
}

/// Drop coins round-robin over the standable platforms, jittering each one
/// within its platform's width.
fn scatter_coins<R: Rng>(platforms: &[Platform], count: u32, rng: &mut R) -> Vec<Coin> {
    let standable: Vec<&Platform> = platforms
        .iter()
        .filter(|p| matches!(p.kind, PlatformKind::Normal | PlatformKind::Moving))
        .collect();
    let mut coins = Vec::new();
    if standable.is_empty() {
        return coins;
    }
    for i in 0..count as usize {
        let platform = standable[i % standable.len()];
        let x = platform.x + 10.0 + rng.random_range(0.0..platform.width - 30.0);
        coins.push(Coin::new(x, platform.y - 25.0));
    }
    coins
}

fn scatter_power_ups<R: Rng>(platforms: &[Platform], level: u32, rng: &mut R) -> Vec<PowerUp> {
    let normal: Vec<&Platform> = platforms
        .iter()
        .filter(|p| p.kind == PlatformKind::Normal)
        .collect();
    // The boss arena gets one fewer.
    let count = if level == 5 { 2 } else { 3 };
    let mut power_ups = Vec::new();
    if normal.is_empty() {
        return power_ups;
    }
    for _ in 0..count {
        let platform = normal[rng.random_range(0..normal.len())];
        let x = platform.x + 10.0 + rng.random_range(0.0..platform.width - 40.0);
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        power_ups.push(PowerUp::new(x, platform.y - 40.0, kind));
    }
    power_ups
}
