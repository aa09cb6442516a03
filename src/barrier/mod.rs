//! Barrier plugin - destructible terrain built from small sprite cells that
//! absorb bullets and erode probabilistically around the impact point.

use bevy::prelude::*;
use rand::prelude::*;
use std::collections::HashSet;

use crate::game::{
    BARRIER_BLAST_RADIUS, BARRIER_CELL, BARRIER_COLOR, BARRIER_COUNT, BARRIER_ERODE_CHANCE,
    BARRIER_GRID_COLS, BARRIER_GRID_ROWS, BARRIER_Y, BarrierBlock, Bullet, GamePhase, GameState,
    Hitbox, WINDOW_WIDTH, Z_BARRIER,
};

/// Plugin for barrier-related systems.
pub struct BarrierPlugin;

impl Plugin for BarrierPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, bullet_barrier_collision);
    }
}

/// Whether a cell exists in the arch-shaped barrier mask (row 0 = top):
/// cut shoulders on the top two rows, a notch out of the bottom middle.
pub(crate) fn barrier_cell_mask(row: usize, col: usize) -> bool {
    let cols = BARRIER_GRID_COLS;
    let rows = BARRIER_GRID_ROWS;
    if row == 0 && (col < 2 || col >= cols - 2) {
        return false;
    }
    if row == 1 && (col == 0 || col == cols - 1) {
        return false;
    }
    if row >= rows - 2 && (cols / 2 - 2..cols / 2 + 2).contains(&col) {
        return false;
    }
    true
}

/// Spawns the four barriers, evenly spaced between the window edges.
pub fn spawn_barriers(commands: &mut Commands) {
    let spacing = WINDOW_WIDTH / (BARRIER_COUNT as f32 + 1.0);
    for i in 0..BARRIER_COUNT {
        let center_x = -WINDOW_WIDTH / 2.0 + (i as f32 + 1.0) * spacing;
        spawn_barrier(commands, Vec2::new(center_x, BARRIER_Y));
    }
}

fn spawn_barrier(commands: &mut Commands, center: Vec2) {
    let width = BARRIER_GRID_COLS as f32 * BARRIER_CELL;
    let height = BARRIER_GRID_ROWS as f32 * BARRIER_CELL;

    for row in 0..BARRIER_GRID_ROWS {
        for col in 0..BARRIER_GRID_COLS {
            if !barrier_cell_mask(row, col) {
                continue;
            }
            let x = center.x - width / 2.0 + (col as f32 + 0.5) * BARRIER_CELL;
            let y = center.y + height / 2.0 - (row as f32 + 0.5) * BARRIER_CELL;
            commands.spawn((
                Sprite {
                    color: BARRIER_COLOR,
                    custom_size: Some(Vec2::splat(BARRIER_CELL)),
                    ..default()
                },
                Transform::from_xyz(x, y, Z_BARRIER),
                BarrierBlock,
                Hitbox::new(Vec2::splat(BARRIER_CELL)),
            ));
        }
    }
}

/// Cells within the square blast radius of the impact are each destroyed
/// with `BARRIER_ERODE_CHANCE` probability.
pub(crate) fn erode<T: Copy, R: Rng>(rng: &mut R, impact: Vec2, cells: &[(T, Vec2)]) -> Vec<T> {
    cells
        .iter()
        .filter(|(_, pos)| {
            (pos.x - impact.x).abs() <= BARRIER_BLAST_RADIUS
                && (pos.y - impact.y).abs() <= BARRIER_BLAST_RADIUS
        })
        .filter(|_| rng.random_bool(BARRIER_ERODE_CHANCE))
        .map(|(id, _)| *id)
        .collect()
}

/// System absorbing bullets of either kind into barriers and eroding cells
/// around the impact.
fn bullet_barrier_collision(
    mut commands: Commands,
    game_state: Res<GameState>,
    bullets: Query<(Entity, &Transform, &Hitbox), With<Bullet>>,
    blocks: Query<(Entity, &Transform, &Hitbox), With<BarrierBlock>>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    let mut rng = rand::rng();
    // Track cells already removed this frame so two bullets can't despawn
    // the same entity twice
    let mut removed: HashSet<Entity> = HashSet::new();

    for (bullet_entity, bullet_transform, bullet_box) in bullets.iter() {
        let bullet_pos = bullet_transform.translation.truncate();

        let hit = blocks.iter().find(|(entity, transform, hitbox)| {
            !removed.contains(entity)
                && bullet_box.overlaps(bullet_pos, hitbox, transform.translation.truncate())
        });
        let Some((_, block_transform, _)) = hit else {
            continue;
        };

        commands.entity(bullet_entity).despawn();

        let impact = block_transform.translation.truncate();
        let cells: Vec<(Entity, Vec2)> = blocks
            .iter()
            .filter(|(entity, _, _)| !removed.contains(entity))
            .map(|(entity, transform, _)| (entity, transform.translation.truncate()))
            .collect();

        for entity in erode(&mut rng, impact, &cells) {
            removed.insert(entity);
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn mask_cuts_shoulders_and_bottom_notch() {
        // Top corners are open
        assert!(!barrier_cell_mask(0, 0));
        assert!(!barrier_cell_mask(0, BARRIER_GRID_COLS - 1));
        assert!(barrier_cell_mask(0, 2));
        // Second row only trims the outermost columns
        assert!(!barrier_cell_mask(1, 0));
        assert!(barrier_cell_mask(1, 1));
        // Bottom notch in the middle
        assert!(!barrier_cell_mask(BARRIER_GRID_ROWS - 1, BARRIER_GRID_COLS / 2));
        assert!(barrier_cell_mask(BARRIER_GRID_ROWS - 1, 0));
        // Body is solid
        assert!(barrier_cell_mask(3, 5));
    }

    #[test]
    fn mask_keeps_most_of_the_grid() {
        let kept = (0..BARRIER_GRID_ROWS)
            .flat_map(|row| (0..BARRIER_GRID_COLS).map(move |col| (row, col)))
            .filter(|&(row, col)| barrier_cell_mask(row, col))
            .count();
        let total = BARRIER_GRID_ROWS * BARRIER_GRID_COLS;
        assert!(kept > total / 2, "kept {kept} of {total}");
        assert!(kept < total);
    }

    #[test]
    fn erosion_only_touches_cells_in_the_blast_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        let cells = [
            (0usize, Vec2::ZERO),
            (1, Vec2::new(BARRIER_BLAST_RADIUS, 0.0)),
            (2, Vec2::new(BARRIER_BLAST_RADIUS + 1.0, 0.0)),
            (3, Vec2::new(0.0, -BARRIER_BLAST_RADIUS - 5.0)),
        ];
        for _ in 0..100 {
            for id in erode(&mut rng, Vec2::ZERO, &cells) {
                assert!(id < 2, "cell {id} is outside the blast radius");
            }
        }
    }

    #[test]
    fn erosion_destroys_about_half_the_cells_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let cells: Vec<(usize, Vec2)> = (0..1000).map(|i| (i, Vec2::ZERO)).collect();
        let destroyed = erode(&mut rng, Vec2::ZERO, &cells).len();
        assert!((350..=650).contains(&destroyed), "destroyed {destroyed} of 1000");
    }
}
