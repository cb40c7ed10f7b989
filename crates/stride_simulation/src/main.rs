//! Headless симуляция Stride
//!
//! Несколько персонажей бродят по плоскости под случайными (seeded) командами.
//! Конфиг: `stride_simulation [path/to/stride.toml]`

use bevy::prelude::*;
use rand::Rng;
use stride_simulation::locomotion::process_locomotion_intents;
use stride_simulation::*;

const SEED: u64 = 42;
const TICKS: usize = 1000;
const COMMAND_INTERVAL: u64 = 30;

fn main() {
    init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Failed to load config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };

    log_info(&format!("Starting Stride headless simulation (seed: {})", SEED));

    let mut app = create_headless_app(SEED);
    app.add_plugins(SimulationPlugin::new(config));
    app.add_systems(
        FixedUpdate,
        issue_random_commands.before(process_locomotion_intents),
    );

    let characters = populate_world(&mut app);
    log_info(&format!("Spawned {} characters", characters.len()));

    for tick in 0..TICKS {
        run_fixed_ticks(&mut app, 1);

        if tick % 100 == 0 {
            report(&mut app, tick);
        }
    }

    log_info("Simulation complete!");
}

fn populate_world(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    let library = shared_humanoid_library();

    {
        let mut commands = world.commands();
        spawn_viewpoint(&mut commands, Vec3::new(0.0, 10.0, 0.0));
        spawn_world_anchor(&mut commands, "WP_CAMP", Transform::from_xyz(5.0, 0.0, 5.0));
        spawn_world_anchor(
            &mut commands,
            "WP_TOWER",
            Transform::from_xyz(-20.0, 0.0, 12.0).looking_to(Vec3::X, Vec3::Y),
        );
    }

    let spawned: Vec<Entity> = (0..4)
        .map(|index| {
            let position = Vec3::new(index as f32 * 3.0, 0.0, 0.0);
            spawn_headless_character(
                &mut world.commands(),
                &format!("Wanderer_{}", index),
                position,
                Some(library.clone()),
            )
        })
        .collect();

    // Дальний персонаж: физика выключится по дистанции
    let far = spawn_headless_character(
        &mut world.commands(),
        "Sleeper",
        Vec3::new(200.0, 0.0, 0.0),
        Some(library),
    );

    world.flush();

    let mut characters = Vec::new();
    for entity in spawned.into_iter().chain(std::iter::once(far)) {
        match attach_locomotion(world, entity) {
            Ok(()) => characters.push(entity),
            Err(err) => log_error(&format!("Failed to attach locomotion: {}", err)),
        }
    }

    characters
}

/// Система: каждые COMMAND_INTERVAL тиков случайная команда каждому персонажу
fn issue_random_commands(
    characters: Query<Entity, With<CharacterLocomotion>>,
    mut rng: ResMut<DeterministicRng>,
    mut intents: EventWriter<LocomotionIntent>,
    mut tick: Local<u64>,
) {
    *tick += 1;
    if *tick % COMMAND_INTERVAL != 0 {
        return;
    }

    let mut entities: Vec<Entity> = characters.iter().collect();
    entities.sort_by_key(|entity| entity.index());

    for entity in entities {
        let command = match rng.rng.gen_range(0..10) {
            0 | 1 | 2 => LocomotionCommand::GoForward,
            3 => LocomotionCommand::StopMoving,
            4 => LocomotionCommand::TurnLeft,
            5 => LocomotionCommand::TurnRight,
            6 => LocomotionCommand::StopTurning,
            7 => LocomotionCommand::ToggleWalking,
            8 => LocomotionCommand::Jump,
            _ => LocomotionCommand::Teleport("WP_CAMP".to_string()),
        };
        intents.write(LocomotionIntent::new(entity, command));
    }
}

fn report(app: &mut App, tick: usize) {
    let world = app.world_mut();
    let mut query = world.query::<(&Name, &Transform, &CharacterLocomotion)>();

    for (name, transform, locomotion) in query.iter(world) {
        let state = locomotion.state();
        log_info(&format!(
            "Tick {}: {} at {:.2?} gait={:?} active={} airborne={}",
            tick,
            name,
            transform.translation,
            state.gait,
            state.is_physics_active,
            state.is_airborne
        ));
    }
}
