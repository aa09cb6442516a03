//! Bullet plugin - handles bullet movement, despawning, and fire caps.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    BULLET_SIZE, BULLET_SPEED, Bullet, BulletKind, ENEMY_BULLET_COLOR, GamePhase, GameState,
    Hitbox, MAX_ENEMY_BULLETS, MAX_PLAYER_BULLETS, PLAYER_BULLET_COLOR, WINDOW_HEIGHT, Z_BULLET,
};

/// Plugin for bullet-related systems.
pub struct BulletPlugin;

impl Plugin for BulletPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (bullet_movement, despawn_out_of_bounds).chain());
    }
}

/// Spawns a bullet at the given position. Callers are responsible for the
/// fire cap check (`can_fire`).
pub fn spawn_bullet(commands: &mut Commands, pos: Vec2, kind: BulletKind) {
    let color = match kind {
        BulletKind::Player => PLAYER_BULLET_COLOR,
        BulletKind::Enemy => ENEMY_BULLET_COLOR,
    };

    commands.spawn((
        ShapeBundle::rect(
            &ShapeConfig {
                color,
                corner_radii: Vec4::splat(1.0),
                transform: Transform::from_xyz(pos.x, pos.y, Z_BULLET),
                ..ShapeConfig::default_2d()
            },
            BULLET_SIZE,
        ),
        Bullet { kind },
        Hitbox::new(BULLET_SIZE),
    ));
}

/// Concurrent-bullet cap per kind: the player gets one shot on screen at a
/// time, the formation up to ten.
pub fn fire_cap(kind: BulletKind) -> usize {
    match kind {
        BulletKind::Player => MAX_PLAYER_BULLETS,
        BulletKind::Enemy => MAX_ENEMY_BULLETS,
    }
}

/// Whether a shot of `kind` may be fired given the bullets currently live.
/// Requests over the cap are silently dropped.
pub fn can_fire(kind: BulletKind, live: impl IntoIterator<Item = BulletKind>) -> bool {
    live.into_iter().filter(|k| *k == kind).count() < fire_cap(kind)
}

/// Bullets past the vertical extent of the window are done.
pub(crate) fn out_of_bounds(y: f32) -> bool {
    y.abs() > WINDOW_HEIGHT / 2.0 + BULLET_SIZE.y
}

/// System to move bullets: player shots travel up, alien shots down.
fn bullet_movement(
    time: Res<Time>,
    game_state: Res<GameState>,
    mut bullets: Query<(&Bullet, &mut Transform)>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    for (bullet, mut transform) in bullets.iter_mut() {
        let dir = match bullet.kind {
            BulletKind::Player => 1.0,
            BulletKind::Enemy => -1.0,
        };
        transform.translation.y += dir * BULLET_SPEED * time.delta_secs();
    }
}

/// System to despawn bullets that left the screen.
fn despawn_out_of_bounds(
    mut commands: Commands,
    bullets: Query<(Entity, &Transform), With<Bullet>>,
) {
    for (entity, transform) in bullets.iter() {
        if out_of_bounds(transform.translation.y) {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_is_limited_to_one_live_bullet() {
        assert!(can_fire(BulletKind::Player, []));
        assert!(!can_fire(BulletKind::Player, [BulletKind::Player]));
        // Enemy bullets don't count against the player cap
        assert!(can_fire(
            BulletKind::Player,
            [BulletKind::Enemy, BulletKind::Enemy]
        ));
    }

    #[test]
    fn enemy_cap_allows_ten_concurrent_bullets() {
        let nine = vec![BulletKind::Enemy; 9];
        assert!(can_fire(BulletKind::Enemy, nine));
        let ten = vec![BulletKind::Enemy; 10];
        assert!(!can_fire(BulletKind::Enemy, ten));
    }

    #[test]
    fn bullets_despawn_past_either_edge() {
        assert!(!out_of_bounds(0.0));
        assert!(!out_of_bounds(WINDOW_HEIGHT / 2.0));
        assert!(out_of_bounds(WINDOW_HEIGHT / 2.0 + BULLET_SIZE.y + 1.0));
        assert!(out_of_bounds(-(WINDOW_HEIGHT / 2.0 + BULLET_SIZE.y + 1.0)));
    }
}
