//! Pure score arithmetic. Kept free of game state so the award rules can be
//! tested exhaustively without running a simulation.

use crate::config::RuleConfig;
use crate::enemy::EnemyKind;

/// Points for picking up the `nth` coin of the level (1-based). Every
/// `coin_streak_len`-th coin lands a streak bonus on top of the base value.
pub fn coin_score(rules: &RuleConfig, nth: u32) -> i32 {
    let mut score = rules.coin_score;
    if rules.coin_streak_len > 0 && nth.is_multiple_of(rules.coin_streak_len) {
        score += rules.coin_streak_bonus;
    }
    score
}

pub fn kill_score(rules: &RuleConfig, kind: EnemyKind) -> i32 {
    if kind == EnemyKind::Boss {
        rules.boss_kill_score
    } else {
        rules.kill_score
    }
}

/// Bonus awarded when a level is cleared: flat clear value, time left at
/// `time_bonus_rate` points per second, a health bonus per remaining heart,
/// and the grand prize on the final level.
pub fn completion_bonus(rules: &RuleConfig, is_final: bool, time_left: u32, health: i32) -> i32 {
    let mut bonus = rules.level_clear_score;
    bonus += rules.time_bonus_rate * time_left as i32;
    bonus += rules.health_bonus * health.max(0);
    if is_final {
        bonus += rules.final_level_bonus;
    }
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleConfig {
        RuleConfig::default()
    }

    #[test]
    fn plain_coins_score_the_base_value() {
        let rules = rules();
        assert_eq!(coin_score(&rules, 1), 10);
        assert_eq!(coin_score(&rules, 4), 10);
        assert_eq!(coin_score(&rules, 6), 10);
    }

    #[test]
    fn every_fifth_coin_adds_the_streak_bonus() {
        let rules = rules();
        assert_eq!(coin_score(&rules, 5), 60);
        assert_eq!(coin_score(&rules, 10), 60);
        assert_eq!(coin_score(&rules, 15), 60);
    }

    #[test]
    fn boss_kills_outscore_regular_kills() {
        let rules = rules();
        assert_eq!(kill_score(&rules, EnemyKind::Patrol), 100);
        assert_eq!(kill_score(&rules, EnemyKind::Chaser), 100);
        assert_eq!(kill_score(&rules, EnemyKind::Shooter), 100);
        assert_eq!(kill_score(&rules, EnemyKind::Boss), 500);
    }

    #[test]
    fn completion_bonus_sums_its_parts() {
        let rules = rules();
        // 100 clear + 2 * 30 s + 50 * 3 hearts.
        assert_eq!(completion_bonus(&rules, false, 30, 3), 310);
        // Same with the final level prize.
        assert_eq!(completion_bonus(&rules, true, 30, 3), 1310);
    }

    #[test]
    fn completion_bonus_floors_at_zero_extras() {
        let rules = rules();
        assert_eq!(completion_bonus(&rules, false, 0, 0), 100);
        // Negative health never subtracts.
        assert_eq!(completion_bonus(&rules, false, 0, -2), 100);
    }
}
