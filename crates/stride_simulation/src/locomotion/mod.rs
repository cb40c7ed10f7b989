//! Locomotion module — контроллер передвижения персонажа
//!
//! ECS ответственность:
//! - Намерения: походка, стойка, поворот (команды AI/игрока)
//! - Фаза локомоции + transition gate (можно ли сейчас сменить клип)
//! - Интеграция движения: root motion + гравитация → physics mover
//! - Активация физики по дистанции до камеры
//!
//! Анимационная поверхность (`VisualCharacter`) решает, какие клипы есть и как
//! они играют; mover решает, где персонаж упёрся в землю.

use bevy::prelude::*;

use crate::animation::{tick_character_visuals, PostureAliasTable};
use crate::config::LocomotionConfig;
use crate::world::{index_world_anchors, WaypointRegistry};

pub mod activation;
pub mod commands;
pub mod controller;
pub mod gate;
pub mod integrator;
pub mod state;
pub mod systems;
pub mod turning;

#[cfg(test)]
pub(crate) mod test_support;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod commands_tests;
#[cfg(test)]
mod gate_tests;

// Re-export основных типов
pub use activation::next_activation;
pub use commands::{CommandContext, LocomotionCommand};
pub use controller::{attach_locomotion, CharacterBody, CharacterLocomotion};
pub use gate::TransitionOutcome;
pub use state::{ClipIntent, LocomotionPhase, LocomotionState, PhaseTracker, TurnIntent};
pub use systems::{
    advance_locomotion, process_locomotion_intents, LocomotionCommandRejected, LocomotionIntent,
    MissingRapierController,
};
pub use turning::frame_turn;

/// Locomotion Plugin
///
/// Регистрирует системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. index_world_anchors — новые/сдвинутые waypoints
/// 2. tick_character_visuals — время клипов, follow-up клипы, root motion
/// 3. process_locomotion_intents — команды этого тика
/// 4. advance_locomotion — активация, поворот, движение
///
/// Rapier mover копит смещение в `KinematicCharacterController::translation`,
/// Rapier (PostUpdate) применяет сумму всех fixed тиков кадра. Контакт с землёй
/// приходит с прошлого шага Rapier.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        // Resources (не перетираем то, что вставил SimulationPlugin / игра)
        app.init_resource::<LocomotionConfig>()
            .init_resource::<WaypointRegistry>()
            .init_resource::<PostureAliasTable>();

        // Регистрация событий
        app.add_event::<LocomotionIntent>()
            .add_event::<LocomotionCommandRejected>();

        app.register_type::<LocomotionConfig>()
            .register_type::<crate::world::WorldAnchor>()
            .register_type::<crate::viewpoint::ActiveViewpoint>();

        app.add_systems(
            FixedUpdate,
            (
                index_world_anchors,
                tick_character_visuals,
                process_locomotion_intents,
                advance_locomotion,
            )
                .chain(),
        );
    }
}
