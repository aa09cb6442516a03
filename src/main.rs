use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

mod alien;
mod barrier;
mod bullet;
mod game;
mod highscore;
mod player;
mod ui;

use game::{
    AlienFormation, BACKGROUND_COLOR, FormationStepped, GameState, PauseMenu, WINDOW_HEIGHT,
    WINDOW_WIDTH, WaveCleared,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32),
                    title: "Space Invaders".to_string(),
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .init_resource::<GameState>()
        .init_resource::<AlienFormation>()
        .init_resource::<PauseMenu>()
        .add_message::<FormationStepped>()
        .add_message::<WaveCleared>()
        .add_plugins((
            highscore::HighScorePlugin,
            player::PlayerPlugin,
            alien::AlienPlugin,
            bullet::BulletPlugin,
            barrier::BarrierPlugin,
            ui::UiPlugin,
        ))
        .run();
}
