//! Stride Simulation Core
//!
//! ECS-контроллер передвижения персонажей на Bevy 0.16
//!
//! Архитектура:
//! - animation: клипы, схема имён Gothic-style, анимационная поверхность
//! - locomotion: намерения, transition gate, интеграция движения, команды
//! - physics: mover'ы (headless плоскость / Rapier kinematic controller)
//! - world: именованные точки мира (teleport)
//! - viewpoint: камера, от которой считается активация физики

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod config;
pub mod error;
pub mod locomotion;
pub mod logger;
pub mod physics;
pub mod viewpoint;
pub mod world;

// Re-export базовых типов для удобства
pub use animation::{
    humanoid_library, shared_humanoid_library, AnimationClip, AnimationLibrary, AnimationSurface,
    Gait, PostureAliasTable, VisualCharacter, WeaponPosture,
};
pub use config::{LocomotionConfig, SimulationConfig};
pub use error::{AttachError, ConfigError, ConfigResult};
pub use locomotion::{
    attach_locomotion, CharacterLocomotion, LocomotionCommand, LocomotionCommandRejected,
    LocomotionIntent, LocomotionPhase, LocomotionPlugin, MissingRapierController, TurnIntent,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use physics::{spawn_headless_character, spawn_rapier_character, CharacterMover};
pub use viewpoint::{spawn_viewpoint, ActiveViewpoint};
pub use world::{spawn_world_anchor, WaypointRegistry, WorldAnchor, WorldObjectResolver};

/// Главный plugin симуляции
///
/// Ставит fixed timestep и уровень логов из конфига, вставляет конфиг локомоции
/// и подключает LocomotionPlugin. Alias-таблицу стоек игра вставляет сама.
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        logger::set_log_level(self.config.log_level);

        app
            // Fixed timestep (по умолчанию 60Hz)
            .insert_resource(Time::<Fixed>::from_hz(self.config.fixed_hz))
            .insert_resource(self.config.locomotion);

        // Детерминистичный RNG (seed по умолчанию), если его не вставил create_headless_app
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins(LocomotionPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Прогнать `ticks` шагов FixedUpdate напрямую (без wall clock)
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Snapshot позиций/ориентаций персонажей для сравнения детерминизма
///
/// Байты f32 (не Debug-строки): сравниваем бит в бит.
pub fn locomotion_snapshot(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<(Entity, &Transform, &CharacterLocomotion)>();
    let mut characters: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    characters.sort_by_key(|(entity, _, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, transform, locomotion) in characters {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());

        let rotation = transform.rotation.to_array();
        for value in transform.translation.to_array().iter().chain(rotation.iter()) {
            snapshot.extend_from_slice(&value.to_le_bytes());
        }

        let state = locomotion.state();
        snapshot.push(state.gait as u8);
        snapshot.push(state.weapon_posture as u8);
        snapshot.extend_from_slice(&state.falling_velocity.to_le_bytes());
    }

    snapshot
}
