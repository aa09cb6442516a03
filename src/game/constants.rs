//! Game constants for window geometry, formation layout, speeds, and colors.

use bevy::prelude::*;
use std::time::Duration;

// Window dimensions
pub const WINDOW_WIDTH: f32 = 1920.0;
pub const WINDOW_HEIGHT: f32 = 1080.0;

// Formation layout. The grid anchors 10% in from the left and top edges and
// sweeps between 10% insets on both sides.
pub const ALIEN_ROWS: usize = 5;
pub const ALIEN_COLS: usize = 10;
pub const ALIEN_SIZE: Vec2 = Vec2::new(64.0, 44.0);
pub const ALIEN_GAP_X: f32 = ALIEN_SIZE.x * 1.6;
pub const ALIEN_GAP_Y: f32 = ALIEN_SIZE.y * 1.5;
pub const FORMATION_MIN_X: f32 = -0.4 * WINDOW_WIDTH;
pub const FORMATION_MAX_X: f32 = 0.4 * WINDOW_WIDTH;
pub const FORMATION_TOP_Y: f32 = 0.4 * WINDOW_HEIGHT;

// Aliens descending past this line end the game.
pub const INVASION_Y: f32 = -0.2 * WINDOW_HEIGHT;

// Formation cadence
pub const ALIEN_STEP_X: f32 = 40.0;
pub const ALIEN_STEP_DOWN: f32 = 20.0;
pub const ALIEN_BASE_STEP: Duration = Duration::from_millis(1000);
pub const ALIEN_MIN_BASE_STEP: Duration = Duration::from_millis(400);
pub const WAVE_STEP_RAMP: Duration = Duration::from_millis(100);

// Percent chance, rolled once per column per cadence tick.
pub const ALIEN_FIRE_CHANCE: u32 = 10;

// Player ship
pub const PLAYER_SIZE: Vec2 = Vec2::new(76.0, 36.0);
pub const PLAYER_Y: f32 = -0.4 * WINDOW_HEIGHT;
pub const PLAYER_SPEED: f32 = 300.0;
pub const PLAYER_LIVES: u32 = 3;

// Bullets
pub const BULLET_SIZE: Vec2 = Vec2::new(6.0, 18.0);
pub const BULLET_SPEED: f32 = 600.0;
pub const MAX_PLAYER_BULLETS: usize = 1;
pub const MAX_ENEMY_BULLETS: usize = 10;

// Barriers
pub const BARRIER_COUNT: usize = 4;
pub const BARRIER_Y: f32 = -0.3 * WINDOW_HEIGHT;
pub const BARRIER_CELL: f32 = 12.0;
pub const BARRIER_GRID_COLS: usize = 12;
pub const BARRIER_GRID_ROWS: usize = 8;
pub const BARRIER_BLAST_RADIUS: f32 = 24.0;
pub const BARRIER_ERODE_CHANCE: f64 = 0.5;

// Visual settings
pub const CORNER_RADIUS: f32 = 4.0;

// Colors
pub const BACKGROUND_COLOR: Color = Color::srgba(0.02, 0.02, 0.05, 1.0);
pub const PLAYER_COLOR: Color = Color::srgba(0.3, 1.0, 0.4, 1.0);
pub const ALIEN_A_COLOR: Color = Color::srgba(0.95, 0.35, 0.85, 1.0);
pub const ALIEN_B_COLOR: Color = Color::srgba(0.4, 0.85, 1.0, 1.0);
pub const ALIEN_C_COLOR: Color = Color::srgba(0.95, 0.9, 0.5, 1.0);
pub const PLAYER_BULLET_COLOR: Color = Color::srgba(0.9, 1.0, 0.9, 1.0);
pub const ENEMY_BULLET_COLOR: Color = Color::srgba(1.0, 0.45, 0.35, 1.0);
pub const BARRIER_COLOR: Color = Color::srgba(0.35, 0.9, 0.45, 1.0);

// Z-index constants for rendering layers
pub const Z_BARRIER: f32 = 1.0;
pub const Z_ALIEN: f32 = 2.0;
pub const Z_BULLET: f32 = 3.0;
pub const Z_PLAYER: f32 = 4.0;
