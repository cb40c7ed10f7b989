//! Locomotion ECS systems (FixedUpdate)
//!
//! Порядок (chain в `LocomotionPlugin`):
//! 1. process_locomotion_intents — команды этого тика
//! 2. advance_locomotion — активация, поворот, движение

use bevy::prelude::*;
use bevy_rapier3d::prelude::{KinematicCharacterController, KinematicCharacterControllerOutput};

use crate::animation::VisualCharacter;
use crate::logger::{log, log_warning};
use crate::physics::{CharacterMover, RapierMover};
use crate::viewpoint::{viewpoint_position, ActiveViewpoint};
use crate::world::WaypointRegistry;

use super::commands::{CommandContext, LocomotionCommand};
use super::controller::{CharacterBody, CharacterLocomotion};

/// Команда для конкретного персонажа (AI, игрок, скрипты)
#[derive(Event, Clone, Debug)]
pub struct LocomotionIntent {
    pub entity: Entity,
    pub command: LocomotionCommand,
}

impl LocomotionIntent {
    pub fn new(entity: Entity, command: LocomotionCommand) -> Self {
        Self { entity, command }
    }
}

/// Команда отклонена (gate закрыт, нет клипа, нет персонажа)
///
/// Отказ — штатная ситуация: AI повторит команду на следующем тике.
#[derive(Event, Clone, Debug, PartialEq)]
pub struct LocomotionCommandRejected {
    pub entity: Entity,
    pub command: LocomotionCommand,
}

/// Marker: у Rapier-персонажа нет `KinematicCharacterController` (warning уже был)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MissingRapierController;

/// Система: выполнить команды локомоции
pub fn process_locomotion_intents(
    mut intents: EventReader<LocomotionIntent>,
    mut characters: Query<
        (&mut CharacterLocomotion, &mut Transform, &mut VisualCharacter),
        Without<ActiveViewpoint>,
    >,
    registry: Res<WaypointRegistry>,
    mut rejected: EventWriter<LocomotionCommandRejected>,
) {
    for intent in intents.read() {
        let Ok((mut locomotion, mut transform, mut visual)) = characters.get_mut(intent.entity)
        else {
            log_warning(&format!(
                "[Locomotion] {:?} has no locomotion, dropping {:?}",
                intent.entity, intent.command
            ));
            rejected.write(LocomotionCommandRejected {
                entity: intent.entity,
                command: intent.command.clone(),
            });
            continue;
        };

        let mut ctx = CommandContext {
            transform: &mut transform,
            visual: &mut *visual,
            world: &*registry,
        };

        if locomotion.execute(&intent.command, &mut ctx) {
            continue;
        }

        log(&format!(
            "[Locomotion] {} rejected {:?}",
            locomotion.name(),
            intent.command
        ));
        rejected.write(LocomotionCommandRejected {
            entity: intent.entity,
            command: intent.command.clone(),
        });
    }
}

/// Система: один тик локомоции для всех персонажей
///
/// `CharacterMover::Rapier` без `KinematicCharacterController` пропускается
/// (warning один раз, помечаем `MissingRapierController`).
pub fn advance_locomotion(
    mut commands: Commands,
    mut characters: Query<
        (
            Entity,
            &mut CharacterLocomotion,
            &mut Transform,
            &mut VisualCharacter,
            &CharacterMover,
            Option<&mut KinematicCharacterController>,
            Option<&KinematicCharacterControllerOutput>,
            Has<MissingRapierController>,
        ),
        Without<ActiveViewpoint>,
    >,
    viewpoints: Query<&Transform, With<ActiveViewpoint>>,
    time: Res<Time<Fixed>>,
) {
    let frame_delta = time.timestep().as_secs_f32();
    let viewpoint = viewpoint_position(&viewpoints);

    for (entity, mut locomotion, mut transform, mut visual, mover, controller, output, warned) in
        characters.iter_mut()
    {
        match *mover {
            CharacterMover::GroundPlane(mut plane) => {
                let mut body = CharacterBody {
                    transform: &mut transform,
                    visual: &mut *visual,
                    mover: &mut plane,
                };
                locomotion.advance(&mut body, viewpoint, frame_delta);
            }
            CharacterMover::Rapier => {
                let Some(mut controller) = controller else {
                    if !warned {
                        log_warning(&format!(
                            "[Locomotion] {} uses Rapier mover without KinematicCharacterController",
                            locomotion.name()
                        ));
                        commands.entity(entity).insert(MissingRapierController);
                    }
                    continue;
                };

                if warned {
                    commands.entity(entity).remove::<MissingRapierController>();
                }

                let mut rapier = RapierMover {
                    controller: &mut controller,
                    last_output: output,
                };
                let mut body = CharacterBody {
                    transform: &mut transform,
                    visual: &mut *visual,
                    mover: &mut rapier,
                };
                locomotion.advance(&mut body, viewpoint, frame_delta);
            }
        }
    }
}
