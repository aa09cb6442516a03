//! Player plugin - ship movement, firing, and getting hit.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::bullet::{can_fire, spawn_bullet};
use crate::game::{
    BULLET_SIZE, Bullet, BulletKind, CORNER_RADIUS, GamePhase, GameState, Hitbox, PLAYER_COLOR,
    PLAYER_SIZE, PLAYER_SPEED, PLAYER_Y, Player, WINDOW_WIDTH, Z_PLAYER,
};

/// Plugin for player-related systems.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (player_movement, player_fire, player_hit).chain());
    }
}

/// Spawns the player ship at the bottom center of the screen.
pub fn spawn_player(commands: &mut Commands) -> Entity {
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (PLAYER_SIZE.y / 2.0);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: PLAYER_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_xyz(0.0, PLAYER_Y, Z_PLAYER),
                    ..ShapeConfig::default_2d()
                },
                PLAYER_SIZE,
            ),
            Player,
            Hitbox::new(PLAYER_SIZE),
        ))
        .with_children(|parent| {
            // Cannon dome on top of the hull
            parent.spawn(ShapeBundle::circle(
                &ShapeConfig {
                    color: PLAYER_COLOR,
                    transform: Transform::from_xyz(0.0, PLAYER_SIZE.y * 0.4, 0.1),
                    ..ShapeConfig::default_2d()
                },
                PLAYER_SIZE.y * 0.35,
            ));
        })
        .id()
}

/// System to steer the ship with the arrow keys or A/D, clamped to the window.
fn player_movement(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    game_state: Res<GameState>,
    mut ships: Query<&mut Transform, With<Player>>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    let mut dx = 0.0;
    if keyboard_input.pressed(KeyCode::ArrowLeft) || keyboard_input.pressed(KeyCode::KeyA) {
        dx -= PLAYER_SPEED * time.delta_secs();
    }
    if keyboard_input.pressed(KeyCode::ArrowRight) || keyboard_input.pressed(KeyCode::KeyD) {
        dx += PLAYER_SPEED * time.delta_secs();
    }
    if dx == 0.0 {
        return;
    }

    let limit = WINDOW_WIDTH / 2.0 - PLAYER_SIZE.x / 2.0;
    for mut transform in ships.iter_mut() {
        transform.translation.x = (transform.translation.x + dx).clamp(-limit, limit);
    }
}

/// System to fire on Space. Holding the key refires as soon as the previous
/// shot resolves, since the player cap is one bullet on screen.
fn player_fire(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    game_state: Res<GameState>,
    ships: Query<&Transform, With<Player>>,
    bullets: Query<&Bullet>,
) {
    if game_state.phase != GamePhase::Playing || !keyboard_input.pressed(KeyCode::Space) {
        return;
    }

    if !can_fire(BulletKind::Player, bullets.iter().map(|b| b.kind)) {
        return;
    }

    let Ok(ship) = ships.single() else {
        return;
    };

    let muzzle = ship.translation.truncate() + Vec2::new(0.0, PLAYER_SIZE.y / 2.0 + BULLET_SIZE.y);
    spawn_bullet(&mut commands, muzzle, BulletKind::Player);
}

/// System to resolve enemy bullets hitting the ship: lose a life, clear the
/// incoming fire, and recenter. At zero lives the game is over.
fn player_hit(
    mut commands: Commands,
    mut game_state: ResMut<GameState>,
    bullets: Query<(Entity, &Bullet, &Transform, &Hitbox)>,
    mut ships: Query<(&mut Transform, &Hitbox), (With<Player>, Without<Bullet>)>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    let Ok((mut ship_transform, ship_box)) = ships.single_mut() else {
        return;
    };
    let ship_pos = ship_transform.translation.truncate();

    let hit = bullets.iter().any(|(_, bullet, transform, hitbox)| {
        bullet.kind == BulletKind::Enemy
            && hitbox.overlaps(transform.translation.truncate(), ship_box, ship_pos)
    });
    if !hit {
        return;
    }

    game_state.lives = game_state.lives.saturating_sub(1);
    info!("ship hit, {} lives left", game_state.lives);

    // Clear all enemy fire so the respawned ship isn't hit again immediately
    for (entity, bullet, _, _) in bullets.iter() {
        if bullet.kind == BulletKind::Enemy {
            commands.entity(entity).despawn();
        }
    }

    if game_state.lives == 0 {
        game_state.phase = GamePhase::GameOver;
    } else {
        ship_transform.translation.x = 0.0;
    }
}
