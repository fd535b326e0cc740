//! Third-person demo
//!
//! Runs the player character through a scripted input timeline on a small
//! test map: walk, look around, boost into a wall, then lock aim on a target.

mod settings;

use anyhow::{Context, Result};
use glam::Vec3;
use thirdperson_core::{Rotator, TimeConfig, Transform};
use thirdperson_game::{GameMode, GameWorld, InputHandler, PawnRegistry};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use settings::DemoSettings;

/// One scripted raw input
#[derive(Debug, Clone, Copy)]
enum ScriptedInput {
    Key(KeyCode, ElementState),
    Mouse(MouseButton, ElementState),
    MouseMotion(f64, f64),
}

/// Raw input to feed at the start of a frame
const SCRIPT: &[(u32, ScriptedInput)] = &[
    (10, ScriptedInput::Key(KeyCode::KeyW, ElementState::Pressed)),
    (40, ScriptedInput::MouseMotion(20.0, 0.0)),
    (41, ScriptedInput::MouseMotion(20.0, 0.0)),
    (70, ScriptedInput::Key(KeyCode::KeyW, ElementState::Released)),
    (75, ScriptedInput::Key(KeyCode::Space, ElementState::Pressed)),
    (76, ScriptedInput::Key(KeyCode::Space, ElementState::Released)),
    (120, ScriptedInput::Key(KeyCode::ShiftLeft, ElementState::Pressed)),
    (121, ScriptedInput::Key(KeyCode::ShiftLeft, ElementState::Released)),
    (170, ScriptedInput::Mouse(MouseButton::Right, ElementState::Pressed)),
    (180, ScriptedInput::MouseMotion(50.0, 10.0)),
    (220, ScriptedInput::Mouse(MouseButton::Right, ElementState::Released)),
];

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting third-person demo...");

    let settings = DemoSettings::load();

    let mut registry = PawnRegistry::with_defaults();
    if let Some(path) = &settings.character.config_path {
        let config = thirdperson_game::CharacterConfig::load(path)
            .with_context(|| format!("Failed to load character config {}", path.display()))?;
        registry.register(settings.character.pawn_class.clone(), config);
    }
    let game_mode = GameMode::with_pawn_class(&registry, &settings.character.pawn_class);

    let mut world = GameWorld::with_time_config(TimeConfig {
        time_scale: settings.simulation.time_scale,
        ..Default::default()
    });
    world.create_ground(0.0);
    // Wall across the boost path
    world.create_static_box(Vec3::new(20.0, 1000.0, 300.0), Vec3::new(900.0, 0.0, 300.0));
    let target = world.spawn_actor(
        Transform::from_location(Vec3::new(400.0, 600.0, 150.0)),
        Some(Vec3::splat(25.0)),
    );

    game_mode
        .spawn_default_pawn(&mut world, Vec3::new(0.0, 0.0, 100.0), Rotator::ZERO)
        .context("Failed to spawn player")?;
    if let Some(character) = world.character_mut() {
        character.set_target(Some(target));
    }

    let mut input = InputHandler::new();
    let mut script = SCRIPT.iter().peekable();
    let log_interval = settings.simulation.log_interval.max(1);

    for frame in 0..settings.simulation.frames {
        world.begin_frame(settings.simulation.frame_delta);

        while let Some((_, scripted)) = script.next_if(|(at, _)| *at <= frame) {
            match *scripted {
                ScriptedInput::Key(key, state) => {
                    input.handle_keyboard(PhysicalKey::Code(key), state)
                }
                ScriptedInput::Mouse(button, state) => input.handle_mouse_button(button, state),
                ScriptedInput::MouseMotion(dx, dy) => input.handle_mouse_motion((dx, dy)),
            }
        }

        for event in input.drain_frame() {
            world.handle_input(&event);
        }
        world.end_frame();

        if frame % log_interval == 0 || frame + 1 == settings.simulation.frames {
            log_frame(&world, frame);
        }
    }

    info!("Demo finished after {:.2}s of game time", world.time.elapsed_seconds());
    Ok(())
}

fn log_frame(world: &GameWorld, frame: u32) {
    let (Some(transform), Some(character)) = (world.player_transform(), world.character()) else {
        return;
    };
    let camera = world.camera_view();
    info!(
        frame,
        location = ?transform.location,
        yaw = transform.rotation.yaw,
        boosting = character.is_boosting(),
        aiming = character.is_aiming(),
        camera = ?camera.map(|view| view.location),
        "Player"
    );
}
