//! Game resources (singleton state).

use bevy::prelude::*;
use std::time::Duration;

use super::{
    ALIEN_BASE_STEP, ALIEN_COLS, ALIEN_MIN_BASE_STEP, ALIEN_ROWS, PLAYER_LIVES, WAVE_STEP_RAMP,
};

/// Game phase enum to track which state the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Main game state resource.
#[derive(Resource)]
pub struct GameState {
    pub score: u32,
    pub lives: u32,
    pub wave: u32,
    pub phase: GamePhase,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            score: 0,
            lives: PLAYER_LIVES,
            wave: 1,
            phase: GamePhase::Menu,
        }
    }
}

impl GameState {
    /// Reset score, lives, and wave for a fresh game and enter play.
    pub fn reset_for_new_game(&mut self) {
        self.score = 0;
        self.lives = PLAYER_LIVES;
        self.wave = 1;
        self.phase = GamePhase::Playing;
    }
}

/// Horizontal sweep direction of the alien formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Left,
    Right,
}

impl SweepDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SweepDirection::Left => SweepDirection::Right,
            SweepDirection::Right => SweepDirection::Left,
        }
    }
}

/// Formation bookkeeping: sweep direction, live count, and the cadence timer.
/// The timer's duration shrinks as the formation thins.
#[derive(Resource)]
pub struct AlienFormation {
    pub direction: SweepDirection,
    pub alive: usize,
    pub base_step: Duration,
    pub timer: Timer,
    pub anim_frame: usize,
}

impl AlienFormation {
    pub const TOTAL: usize = ALIEN_ROWS * ALIEN_COLS;

    /// Restore a full formation for the given wave number (1-based).
    pub fn reset_for_wave(&mut self, wave: u32) {
        self.direction = SweepDirection::Right;
        self.alive = Self::TOTAL;
        self.base_step = base_step_for_wave(wave);
        self.timer = Timer::new(self.base_step, TimerMode::Repeating);
        self.anim_frame = 0;
    }

    /// Re-derive the cadence from the current live count.
    pub fn rescale_cadence(&mut self) {
        let duration = scaled_step_duration(self.alive, Self::TOTAL, self.base_step);
        self.timer.set_duration(duration);
    }
}

impl Default for AlienFormation {
    fn default() -> Self {
        AlienFormation {
            direction: SweepDirection::Right,
            alive: Self::TOTAL,
            base_step: ALIEN_BASE_STEP,
            timer: Timer::new(ALIEN_BASE_STEP, TimerMode::Repeating),
            anim_frame: 0,
        }
    }
}

/// Cadence for a given live count:
/// `base * (0.50 + alive / total * 0.50)`, so a thinned-out formation steps
/// up to twice as often as a full one.
pub fn scaled_step_duration(alive: usize, total: usize, base: Duration) -> Duration {
    let fraction = 0.50 + alive as f32 / total as f32 * 0.50;
    base.mul_f32(fraction)
}

/// Base cadence for a wave (1-based): each wave starts 100 ms faster than the
/// last, floored at `ALIEN_MIN_BASE_STEP`.
pub fn base_step_for_wave(wave: u32) -> Duration {
    let ramp = WAVE_STEP_RAMP.saturating_mul(wave.saturating_sub(1));
    ALIEN_BASE_STEP.saturating_sub(ramp).max(ALIEN_MIN_BASE_STEP)
}

/// Pause menu selection state.
#[derive(Resource, Default)]
pub struct PauseMenu {
    pub selected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn full_formation_steps_at_base_cadence() {
        let base = Duration::from_millis(1000);
        assert_eq!(scaled_step_duration(50, 50, base), base);
    }

    #[test]
    fn cadence_halves_as_formation_empties() {
        let base = Duration::from_millis(1000);
        assert_eq!(scaled_step_duration(0, 50, base), Duration::from_millis(500));
        // One alien left: just above the floor
        let nearly_empty = scaled_step_duration(1, 50, base);
        assert!(nearly_empty > Duration::from_millis(500));
        assert!(nearly_empty < Duration::from_millis(520));
    }

    #[test]
    fn wave_base_step_ramps_down_to_the_floor() {
        assert_eq!(base_step_for_wave(1), Duration::from_millis(1000));
        assert_eq!(base_step_for_wave(2), Duration::from_millis(900));
        assert_eq!(base_step_for_wave(7), Duration::from_millis(400));
        assert_eq!(base_step_for_wave(20), Duration::from_millis(400));
    }

    #[test]
    fn kill_rescales_the_cadence_timer() {
        let mut formation = AlienFormation::default();
        formation.alive -= 25;
        formation.rescale_cadence();
        assert_eq!(formation.timer.duration(), Duration::from_millis(750));
    }

    #[test]
    fn wave_reset_restores_a_full_formation() {
        let mut formation = AlienFormation::default();
        formation.alive = 3;
        formation.direction = SweepDirection::Left;
        formation.anim_frame = 1;
        formation.reset_for_wave(3);
        assert_eq!(formation.alive, AlienFormation::TOTAL);
        assert_eq!(formation.direction, SweepDirection::Right);
        assert_eq!(formation.anim_frame, 0);
        assert_eq!(formation.timer.duration(), Duration::from_millis(800));
    }

    proptest! {
        #[test]
        fn cadence_stays_within_half_to_full_base(alive in 0usize..=50, base_ms in 100u64..5000) {
            let base = Duration::from_millis(base_ms);
            let scaled = scaled_step_duration(alive, 50, base);
            prop_assert!(scaled <= base);
            prop_assert!(scaled >= base.mul_f32(0.5));
        }
    }
}
