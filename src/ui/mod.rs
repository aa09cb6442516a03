//! UI plugin - HUD, start menu, pause menu, game over screen, and game flow.

use bevy::ecs::system::ParamSet;
use bevy::prelude::*;

use crate::alien::spawn_formation;
use crate::barrier::spawn_barriers;
use crate::game::{
    Alien, AlienFormation, BarrierBlock, Bullet, GameOverUI, GamePhase, GameState, HighScoreText,
    MenuUI, PauseMenu, PauseMenuItem, PauseMenuUI, Player, ScoreText, StatusText,
};
use crate::highscore::{self, HighScore};
use crate::player::spawn_player;

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system).add_systems(
            Update,
            (
                start_game_from_menu,
                toggle_pause,
                pause_menu_input,
                highlight_pause_items,
                spawn_game_over_screen_system,
                update_high_score,
                restart_from_game_over,
                update_hud,
            )
                .chain(),
        );
    }
}

// Type alias for everything that despawns on restart
type WorldEntityQuery<'w, 's> =
    Query<'w, 's, Entity, Or<(With<Player>, With<Alien>, With<Bullet>, With<BarrierBlock>)>>;

/// Pause menu entries, in display order.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PauseAction {
    Resume,
    Restart,
    ClearHighScore,
    Exit,
}

const PAUSE_ITEMS: [PauseAction; 4] = [
    PauseAction::Resume,
    PauseAction::Restart,
    PauseAction::ClearHighScore,
    PauseAction::Exit,
];

impl PauseAction {
    fn label(&self) -> &'static str {
        match self {
            PauseAction::Resume => "Resume",
            PauseAction::Restart => "Restart",
            PauseAction::ClearHighScore => "Clear High Score",
            PauseAction::Exit => "Exit",
        }
    }
}

/// Initial setup system - camera, HUD bar, start menu.
fn setup_system(mut commands: Commands, game_state: Res<GameState>) {
    commands.spawn(Camera2d);

    // HUD bar across the top: score, high score, lives/wave
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(16.0),
            right: Val::Px(16.0),
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::from("Score: 0"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ScoreText,
            ));

            parent.spawn((
                Text::from("High Score: 0"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 0.3, 1.0)),
                HighScoreText,
            ));

            parent.spawn((
                Text::from("Lives: 3   Wave: 1"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                StatusText,
            ));
        });

    if game_state.phase == GamePhase::Menu {
        spawn_start_menu(&mut commands);
    }
}

/// Spawns the start menu UI.
fn spawn_start_menu(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            MenuUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from("SPACE INVADERS"),
                TextFont {
                    font_size: 80.0,
                    ..default()
                },
                TextColor(Color::srgba(0.3, 1.0, 0.3, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from("CONTROLS"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(15.0)),
                    ..default()
                },
            ));

            for line in [
                "Arrow Keys or A/D to move",
                "Space to shoot",
                "Escape to pause",
            ] {
                parent.spawn((
                    Text::from(line),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
                    Node {
                        margin: UiRect::bottom(Val::Px(10.0)),
                        ..default()
                    },
                ));
            }

            parent.spawn((
                Text::from("Press SPACE to start"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 0.3, 1.0)),
                Node {
                    margin: UiRect::top(Val::Px(30.0)),
                    ..default()
                },
            ));
        });
}

/// Spawns the pause menu overlay.
fn spawn_pause_menu(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            PauseMenuUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from("PAUSED"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            for (index, item) in PAUSE_ITEMS.iter().enumerate() {
                parent.spawn((
                    Text::from(format!("  {}", item.label())),
                    TextFont {
                        font_size: 36.0,
                        ..default()
                    },
                    TextColor(Color::srgba(0.3, 1.0, 0.3, 1.0)),
                    Node {
                        margin: UiRect::bottom(Val::Px(12.0)),
                        ..default()
                    },
                    PauseMenuItem { index },
                ));
            }
        });
}

/// Spawns the game over screen UI.
fn spawn_game_over_screen(commands: &mut Commands, score: u32, new_record: bool) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GameOverUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from("GAME OVER"),
                TextFont {
                    font_size: 60.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 0.3, 0.3, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from(format!("Final Score: {}", score)),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            if new_record {
                parent.spawn((
                    Text::from("NEW HIGH SCORE!"),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(Color::srgba(1.0, 1.0, 0.3, 1.0)),
                    Node {
                        margin: UiRect::bottom(Val::Px(30.0)),
                        ..default()
                    },
                ));
            }

            parent.spawn((
                Text::from("Press SPACE to restart"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
            ));
        });
}

/// Spawn the ship, formation, and barriers for a fresh game.
fn spawn_world(commands: &mut Commands) {
    spawn_player(commands);
    spawn_formation(commands);
    spawn_barriers(commands);
}

/// Despawn all gameplay entities and bring the world back for wave 1.
fn restart(
    commands: &mut Commands,
    game_state: &mut GameState,
    formation: &mut AlienFormation,
    world_entities: &WorldEntityQuery<'_, '_>,
) {
    for entity in world_entities.iter() {
        commands.entity(entity).despawn();
    }
    game_state.reset_for_new_game();
    formation.reset_for_wave(1);
    spawn_world(commands);
    info!("game restarted");
}

/// System to start the game from the menu.
fn start_game_from_menu(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut formation: ResMut<AlienFormation>,
    menu_ui: Query<Entity, With<MenuUI>>,
) {
    if game_state.phase != GamePhase::Menu {
        return;
    }
    if !(keyboard_input.just_pressed(KeyCode::Space)
        || keyboard_input.just_pressed(KeyCode::Enter))
    {
        return;
    }

    for entity in menu_ui.iter() {
        commands.entity(entity).despawn_children();
        commands.entity(entity).despawn();
    }

    game_state.reset_for_new_game();
    formation.reset_for_wave(1);
    spawn_world(&mut commands);
    info!("game started");
}

/// System to open the pause menu with Escape, or close it again.
fn toggle_pause(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut pause_menu: ResMut<PauseMenu>,
    pause_ui: Query<Entity, With<PauseMenuUI>>,
) {
    if !keyboard_input.just_pressed(KeyCode::Escape) {
        return;
    }

    match game_state.phase {
        GamePhase::Playing => {
            pause_menu.selected = 0;
            game_state.phase = GamePhase::Paused;
            spawn_pause_menu(&mut commands);
        }
        GamePhase::Paused => {
            for entity in pause_ui.iter() {
                commands.entity(entity).despawn_children();
                commands.entity(entity).despawn();
            }
            game_state.phase = GamePhase::Playing;
        }
        _ => {}
    }
}

/// System to navigate the pause menu and run the selected action.
#[allow(clippy::too_many_arguments)]
fn pause_menu_input(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut formation: ResMut<AlienFormation>,
    mut pause_menu: ResMut<PauseMenu>,
    mut high: ResMut<HighScore>,
    mut exit: MessageWriter<AppExit>,
    world_entities: WorldEntityQuery,
    pause_ui: Query<Entity, With<PauseMenuUI>>,
) {
    if game_state.phase != GamePhase::Paused {
        return;
    }

    let len = PAUSE_ITEMS.len();
    if keyboard_input.just_pressed(KeyCode::ArrowDown) {
        pause_menu.selected = (pause_menu.selected + 1) % len;
    }
    if keyboard_input.just_pressed(KeyCode::ArrowUp) {
        pause_menu.selected = (pause_menu.selected + len - 1) % len;
    }

    if !(keyboard_input.just_pressed(KeyCode::Enter)
        || keyboard_input.just_pressed(KeyCode::Space))
    {
        return;
    }

    match PAUSE_ITEMS[pause_menu.selected] {
        PauseAction::Resume => {
            for entity in pause_ui.iter() {
                commands.entity(entity).despawn_children();
                commands.entity(entity).despawn();
            }
            game_state.phase = GamePhase::Playing;
        }
        PauseAction::Restart => {
            for entity in pause_ui.iter() {
                commands.entity(entity).despawn_children();
                commands.entity(entity).despawn();
            }
            restart(&mut commands, &mut game_state, &mut formation, &world_entities);
        }
        PauseAction::ClearHighScore => {
            high.value = 0;
            highscore::persist(&high);
        }
        PauseAction::Exit => {
            exit.write(AppExit::Success);
        }
    }
}

/// System to draw the selection cursor on the active pause menu row.
fn highlight_pause_items(
    pause_menu: Res<PauseMenu>,
    mut items: Query<(&PauseMenuItem, &mut Text)>,
) {
    if !pause_menu.is_changed() {
        return;
    }

    for (item, mut text) in items.iter_mut() {
        let label = PAUSE_ITEMS[item.index].label();
        *text = if item.index == pause_menu.selected {
            Text::from(format!("> {label}"))
        } else {
            Text::from(format!("  {label}"))
        };
    }
}

/// System to spawn the game over screen when a game ends.
fn spawn_game_over_screen_system(
    mut commands: Commands,
    game_state: Res<GameState>,
    high: Res<HighScore>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if game_state.is_changed()
        && game_state.phase == GamePhase::GameOver
        && game_over_ui.is_empty()
    {
        info!("game over at {} points", game_state.score);
        spawn_game_over_screen(&mut commands, game_state.score, game_state.score > high.value);
    }
}

/// System to persist a new record when a game ends.
fn update_high_score(game_state: Res<GameState>, mut high: ResMut<HighScore>) {
    if game_state.is_changed()
        && game_state.phase == GamePhase::GameOver
        && game_state.score > high.value
    {
        high.value = game_state.score;
        highscore::persist(&high);
    }
}

/// System to restart the game from the game over screen.
fn restart_from_game_over(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut formation: ResMut<AlienFormation>,
    world_entities: WorldEntityQuery,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if game_state.phase != GamePhase::GameOver || !keyboard_input.just_pressed(KeyCode::Space) {
        return;
    }

    for entity in game_over_ui.iter() {
        commands.entity(entity).despawn_children();
        commands.entity(entity).despawn();
    }

    restart(&mut commands, &mut game_state, &mut formation, &world_entities);
}

/// System to refresh the HUD texts.
fn update_hud(
    game_state: Res<GameState>,
    high: Res<HighScore>,
    mut texts: ParamSet<(
        Query<&mut Text, With<ScoreText>>,
        Query<&mut Text, With<HighScoreText>>,
        Query<&mut Text, With<StatusText>>,
    )>,
) {
    if let Ok(mut text) = texts.p0().single_mut() {
        *text = Text::from(format!("Score: {}", game_state.score));
    }
    if let Ok(mut text) = texts.p1().single_mut() {
        *text = Text::from(format!("High Score: {}", high.value));
    }
    if let Ok(mut text) = texts.p2().single_mut() {
        *text = Text::from(format!(
            "Lives: {}   Wave: {}",
            game_state.lives, game_state.wave
        ));
    }
}
