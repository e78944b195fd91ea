use bevy::prelude::*;
use bevy::window::{WindowMode, WindowResolution};
use bevy_framepace::{FramepaceSettings, Limiter};

/// Upper bound on the frame rate; the framepace limiter sleeps the loop
/// to stay under it.
pub const FRAME_RATE_CAP: f64 = 60.0;

// Creates a Bevy app with default settings shared by every puzzle game
// This prevents duplication / errors across games
pub fn new_game_app(title: &str, width: f32, height: f32) -> App {
    let mut app = App::new();

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: title.to_string(),
            present_mode: bevy::window::PresentMode::Fifo,
            resolution: WindowResolution::new(width, height),
            resizable: false,
            mode: WindowMode::Windowed,
            ..default()
        }),
        ..default()
    };

    app.add_plugins(DefaultPlugins.set(window_plugin));

    // Caps the frame rate; also preserves battery life on laptops.
    // https://github.com/aevyrie/bevy_framepace
    app.add_plugins(bevy_framepace::FramepacePlugin);
    app.insert_resource(FramepaceSettings {
        limiter: Limiter::from_framerate(FRAME_RATE_CAP),
    });

    // The surface is cleared to white before every frame
    app.insert_resource(ClearColor(Color::WHITE));

    app
}
