//! ECS components shared across the game's plugins.

use bevy::prelude::*;

use super::{ALIEN_A_COLOR, ALIEN_B_COLOR, ALIEN_C_COLOR};

/// Axis-aligned hitbox, stored as half-extents in world pixels.
#[derive(Component, Clone, Copy, Debug)]
pub struct Hitbox {
    pub half: Vec2,
}

impl Hitbox {
    pub fn new(size: Vec2) -> Self {
        Self { half: size / 2.0 }
    }

    /// AABB overlap test between this hitbox at `pos` and `other` at `other_pos`.
    pub fn overlaps(&self, pos: Vec2, other: &Hitbox, other_pos: Vec2) -> bool {
        (pos.x - other_pos.x).abs() <= self.half.x + other.half.x
            && (pos.y - other_pos.y).abs() <= self.half.y + other.half.y
    }
}

/// Component to mark the player ship.
#[derive(Component)]
pub struct Player;

/// Alien variants by formation row: one row of As on top, then two rows each
/// of Bs and Cs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AlienKind {
    A,
    B,
    C,
}

impl AlienKind {
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienKind::A,
            1 | 2 => AlienKind::B,
            _ => AlienKind::C,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            AlienKind::A => 30,
            AlienKind::B => 20,
            AlienKind::C => 10,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AlienKind::A => ALIEN_A_COLOR,
            AlienKind::B => ALIEN_B_COLOR,
            AlienKind::C => ALIEN_C_COLOR,
        }
    }

    /// Visual width relative to `ALIEN_SIZE.x`; higher-value aliens are thinner.
    pub fn width_factor(&self) -> f32 {
        match self {
            AlienKind::A => 0.7,
            AlienKind::B => 0.85,
            AlienKind::C => 1.0,
        }
    }
}

/// Component for a live alien. The column index is kept so per-column fire
/// selection doesn't have to reconstruct it from coordinates.
#[derive(Component)]
pub struct Alien {
    pub kind: AlienKind,
    pub col: usize,
}

/// Who fired a bullet; determines direction of travel and the concurrency cap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BulletKind {
    Player,
    Enemy,
}

/// Component for a live bullet.
#[derive(Component)]
pub struct Bullet {
    pub kind: BulletKind,
}

/// Component to mark one destructible barrier cell.
#[derive(Component)]
pub struct BarrierBlock;

/// Component to mark the score display UI element.
#[derive(Component)]
pub struct ScoreText;

/// Component to mark the high score display UI element.
#[derive(Component)]
pub struct HighScoreText;

/// Component to mark the lives/wave display UI element.
#[derive(Component)]
pub struct StatusText;

/// Component to mark the game over overlay UI.
#[derive(Component)]
pub struct GameOverUI;

/// Component to mark the start menu UI.
#[derive(Component)]
pub struct MenuUI;

/// Component to mark the pause menu overlay UI.
#[derive(Component)]
pub struct PauseMenuUI;

/// Component for one selectable row in the pause menu.
#[derive(Component)]
pub struct PauseMenuItem {
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hitbox(w: f32, h: f32) -> Hitbox {
        Hitbox::new(Vec2::new(w, h))
    }

    #[test]
    fn overlap_detected_when_boxes_intersect() {
        let a = hitbox(10.0, 10.0);
        let b = hitbox(10.0, 10.0);
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(9.0, 0.0)));
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(0.0, -9.0)));
    }

    #[test]
    fn no_overlap_when_separated_on_either_axis() {
        let a = hitbox(10.0, 10.0);
        let b = hitbox(10.0, 10.0);
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(11.0, 0.0)));
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(0.0, 20.0)));
        // Touching edges count as a hit
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn row_kinds_follow_formation_layout() {
        assert_eq!(AlienKind::for_row(0), AlienKind::A);
        assert_eq!(AlienKind::for_row(1), AlienKind::B);
        assert_eq!(AlienKind::for_row(2), AlienKind::B);
        assert_eq!(AlienKind::for_row(3), AlienKind::C);
        assert_eq!(AlienKind::for_row(4), AlienKind::C);
    }

    #[test]
    fn points_decrease_down_the_formation() {
        assert_eq!(AlienKind::A.points(), 30);
        assert_eq!(AlienKind::B.points(), 20);
        assert_eq!(AlienKind::C.points(), 10);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = hitbox(aw, ah);
            let b = hitbox(bw, bh);
            let a_pos = Vec2::new(ax, ay);
            let b_pos = Vec2::new(bx, by);
            prop_assert_eq!(a.overlaps(a_pos, &b, b_pos), b.overlaps(b_pos, &a, a_pos));
        }
    }
}
