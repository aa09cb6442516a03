//! Alien plugin - formation spawning, the cadence-driven sweep with direction
//! reversal and step-down, per-column fire, bullet collisions, and wave
//! progression.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;

use crate::barrier::spawn_barriers;
use crate::bullet::{can_fire, spawn_bullet};
use crate::game::{
    ALIEN_COLS, ALIEN_FIRE_CHANCE, ALIEN_GAP_X, ALIEN_GAP_Y, ALIEN_ROWS, ALIEN_SIZE, ALIEN_STEP_DOWN,
    ALIEN_STEP_X, Alien, AlienFormation, AlienKind, BarrierBlock, Bullet, BulletKind, BULLET_SIZE,
    CORNER_RADIUS, FORMATION_MAX_X, FORMATION_MIN_X, FORMATION_TOP_Y, FormationStepped, GamePhase,
    GameState, Hitbox, INVASION_Y, SweepDirection, WaveCleared, Z_ALIEN,
};

/// Plugin for alien-related systems.
pub struct AlienPlugin;

impl Plugin for AlienPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                formation_step,
                alien_fire,
                alien_hit,
                invasion_check,
                next_wave,
            )
                .chain(),
        );
    }
}

/// What the formation does on a cadence tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StepPlan {
    /// Translate every alien horizontally by this delta.
    Advance(f32),
    /// Reverse direction and move every alien down; no horizontal motion.
    Descend,
}

/// Decide the next step from the edge alien in the sweep direction. Returns
/// `None` when the formation is empty.
pub(crate) fn plan_step(
    direction: SweepDirection,
    xs: impl IntoIterator<Item = f32>,
    half_width: f32,
) -> Option<StepPlan> {
    let edge = match direction {
        SweepDirection::Left => xs.into_iter().min_by(f32::total_cmp),
        SweepDirection::Right => xs.into_iter().max_by(f32::total_cmp),
    }?;

    let hit_boundary = match direction {
        SweepDirection::Left => edge - half_width <= FORMATION_MIN_X,
        SweepDirection::Right => edge + half_width >= FORMATION_MAX_X,
    };

    Some(if hit_boundary {
        StepPlan::Descend
    } else {
        StepPlan::Advance(match direction {
            SweepDirection::Left => -ALIEN_STEP_X,
            SweepDirection::Right => ALIEN_STEP_X,
        })
    })
}

/// Position of the highest live alien in a column, if any.
pub(crate) fn highest_in_column(
    col: usize,
    aliens: impl IntoIterator<Item = (usize, Vec2)>,
) -> Option<Vec2> {
    aliens
        .into_iter()
        .filter(|(c, _)| *c == col)
        .map(|(_, pos)| pos)
        .max_by(|a, b| a.y.total_cmp(&b.y))
}

/// Spawns the full 5x10 formation for a new wave.
pub fn spawn_formation(commands: &mut Commands) {
    for row in 0..ALIEN_ROWS {
        let kind = AlienKind::for_row(row);
        let y = FORMATION_TOP_Y - row as f32 * ALIEN_GAP_Y;
        for col in 0..ALIEN_COLS {
            let x = FORMATION_MIN_X + col as f32 * ALIEN_GAP_X;
            spawn_alien(commands, kind, col, Vec2::new(x, y));
        }
    }
}

fn spawn_alien(commands: &mut Commands, kind: AlienKind, col: usize, pos: Vec2) {
    let size = Vec2::new(ALIEN_SIZE.x * kind.width_factor(), ALIEN_SIZE.y);
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (size.y / 2.0);

    commands.spawn((
        ShapeBundle::rect(
            &ShapeConfig {
                color: kind.color(),
                corner_radii: Vec4::splat(corner_radius_normalized),
                transform: Transform::from_xyz(pos.x, pos.y, Z_ALIEN),
                ..ShapeConfig::default_2d()
            },
            size,
        ),
        Alien { kind, col },
        Hitbox::new(size),
    ));
}

/// System to advance the formation on its cadence timer: sweep horizontally,
/// or reverse and step down at a boundary. Also toggles the two-frame squash
/// animation.
fn formation_step(
    time: Res<Time>,
    game_state: Res<GameState>,
    mut formation: ResMut<AlienFormation>,
    mut stepped: MessageWriter<FormationStepped>,
    mut aliens: Query<&mut Transform, With<Alien>>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    formation.timer.tick(time.delta());
    if !formation.timer.just_finished() {
        return;
    }

    let plan = plan_step(
        formation.direction,
        aliens.iter().map(|t| t.translation.x),
        ALIEN_SIZE.x / 2.0,
    );
    let Some(plan) = plan else {
        warn!("formation step with no aliens alive");
        return;
    };

    match plan {
        StepPlan::Descend => {
            formation.direction = formation.direction.flipped();
            for mut transform in aliens.iter_mut() {
                transform.translation.y -= ALIEN_STEP_DOWN;
            }
        }
        StepPlan::Advance(dx) => {
            for mut transform in aliens.iter_mut() {
                transform.translation.x += dx;
            }
        }
    }

    // Two-frame animation, stand-in for the classic sprite flip
    formation.anim_frame = (formation.anim_frame + 1) % 2;
    let squash = if formation.anim_frame == 0 { 1.0 } else { 0.92 };
    for mut transform in aliens.iter_mut() {
        transform.scale.y = squash;
    }

    stepped.write(FormationStepped);
}

/// System giving each column a fire roll after a formation step. The shooter
/// is the highest live alien in the column; shots respect the enemy cap.
fn alien_fire(
    mut commands: Commands,
    mut stepped: MessageReader<FormationStepped>,
    game_state: Res<GameState>,
    aliens: Query<(&Alien, &Transform)>,
    bullets: Query<&Bullet>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }
    if stepped.read().next().is_none() {
        return;
    }

    let mut live: Vec<BulletKind> = bullets.iter().map(|b| b.kind).collect();
    let mut rng = rand::rng();

    for col in 0..ALIEN_COLS {
        if rng.random_range(1..=100) > ALIEN_FIRE_CHANCE {
            continue;
        }
        if !can_fire(BulletKind::Enemy, live.iter().copied()) {
            break;
        }
        let shooter = highest_in_column(
            col,
            aliens.iter().map(|(a, t)| (a.col, t.translation.truncate())),
        );
        if let Some(pos) = shooter {
            let muzzle = pos - Vec2::new(0.0, ALIEN_SIZE.y / 2.0 + BULLET_SIZE.y);
            spawn_bullet(&mut commands, muzzle, BulletKind::Enemy);
            live.push(BulletKind::Enemy);
        }
    }
}

/// System to resolve player bullets hitting aliens: score the kill, drop the
/// live count, and speed the cadence up as the formation thins.
fn alien_hit(
    mut commands: Commands,
    mut game_state: ResMut<GameState>,
    mut formation: ResMut<AlienFormation>,
    mut cleared: MessageWriter<WaveCleared>,
    bullets: Query<(Entity, &Bullet, &Transform, &Hitbox)>,
    aliens: Query<(Entity, &Alien, &Transform, &Hitbox)>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    for (bullet_entity, bullet, bullet_transform, bullet_box) in bullets.iter() {
        if bullet.kind != BulletKind::Player {
            continue;
        }
        let bullet_pos = bullet_transform.translation.truncate();

        for (alien_entity, alien, alien_transform, alien_box) in aliens.iter() {
            if !bullet_box.overlaps(bullet_pos, alien_box, alien_transform.translation.truncate())
            {
                continue;
            }

            commands.entity(bullet_entity).despawn();
            commands.entity(alien_entity).despawn();

            game_state.score += alien.kind.points();
            formation.alive = formation.alive.saturating_sub(1);
            formation.rescale_cadence();

            if formation.alive == 0 {
                cleared.write(WaveCleared);
            }

            // The bullet is spent; at most one alien dies per shot
            break;
        }
    }
}

/// System ending the game once any alien descends past the invasion line.
fn invasion_check(
    mut game_state: ResMut<GameState>,
    aliens: Query<(&Transform, &Hitbox), With<Alien>>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    for (transform, hitbox) in aliens.iter() {
        if transform.translation.y - hitbox.half.y <= INVASION_Y {
            info!("aliens reached the defense line");
            game_state.phase = GamePhase::GameOver;
            return;
        }
    }
}

/// System to start the next wave once the formation is wiped out: leftover
/// bullets go away, barriers are rebuilt, and a faster formation spawns.
fn next_wave(
    mut commands: Commands,
    mut cleared: MessageReader<WaveCleared>,
    mut game_state: ResMut<GameState>,
    mut formation: ResMut<AlienFormation>,
    bullets: Query<Entity, With<Bullet>>,
    blocks: Query<Entity, With<BarrierBlock>>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }
    if cleared.read().next().is_none() {
        return;
    }

    game_state.wave += 1;
    info!("wave {} incoming", game_state.wave);

    for entity in bullets.iter().chain(blocks.iter()) {
        commands.entity(entity).despawn();
    }

    formation.reset_for_wave(game_state.wave);
    spawn_formation(&mut commands);
    spawn_barriers(&mut commands);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HALF: f32 = 32.0;

    #[test]
    fn formation_advances_away_from_boundaries() {
        let xs = [-100.0, 0.0, 100.0];
        assert_eq!(
            plan_step(SweepDirection::Right, xs, HALF),
            Some(StepPlan::Advance(ALIEN_STEP_X))
        );
        assert_eq!(
            plan_step(SweepDirection::Left, xs, HALF),
            Some(StepPlan::Advance(-ALIEN_STEP_X))
        );
    }

    #[test]
    fn formation_descends_at_the_right_boundary() {
        let xs = [0.0, FORMATION_MAX_X - HALF];
        assert_eq!(plan_step(SweepDirection::Right, xs, HALF), Some(StepPlan::Descend));
        // Only the edge in the sweep direction matters
        assert_eq!(
            plan_step(SweepDirection::Left, xs, HALF),
            Some(StepPlan::Advance(-ALIEN_STEP_X))
        );
    }

    #[test]
    fn formation_descends_at_the_left_boundary() {
        let xs = [FORMATION_MIN_X + HALF, 200.0];
        assert_eq!(plan_step(SweepDirection::Left, xs, HALF), Some(StepPlan::Descend));
    }

    #[test]
    fn empty_formation_has_no_step() {
        assert_eq!(plan_step(SweepDirection::Right, [], HALF), None);
    }

    #[test]
    fn highest_live_alien_in_column_shoots() {
        let aliens = [
            (0, Vec2::new(0.0, 100.0)),
            (0, Vec2::new(0.0, 250.0)),
            (1, Vec2::new(80.0, 400.0)),
        ];
        assert_eq!(highest_in_column(0, aliens), Some(Vec2::new(0.0, 250.0)));
        assert_eq!(highest_in_column(1, aliens), Some(Vec2::new(80.0, 400.0)));
        assert_eq!(highest_in_column(2, aliens), None);
    }

    proptest! {
        #[test]
        fn advance_never_pushes_the_edge_past_a_boundary(
            xs in prop::collection::vec(FORMATION_MIN_X + HALF + 1.0..FORMATION_MAX_X - HALF - 1.0, 1..50),
        ) {
            // Any strictly-interior formation advances, and one step keeps the
            // edge alien within one step of the boundary it's sweeping toward.
            let plan = plan_step(SweepDirection::Right, xs.iter().copied(), HALF).unwrap();
            match plan {
                StepPlan::Advance(dx) => {
                    let edge = xs.iter().copied().fold(f32::MIN, f32::max);
                    prop_assert!(edge + dx + HALF < FORMATION_MAX_X + ALIEN_STEP_X);
                }
                StepPlan::Descend => prop_assert!(false, "interior formation must advance"),
            }
        }
    }
}
