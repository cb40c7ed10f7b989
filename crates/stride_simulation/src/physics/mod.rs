//! Physics module
//!
//! Mover'ы персонажа (headless плоскость / Rapier kinematic controller) и
//! spawn helpers для тела персонажа.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::sync::Arc;

use crate::animation::{AnimationLibrary, VisualCharacter};

pub mod mover;

// Re-export основных типов
pub use mover::{CharacterMover, CollisionFlags, GroundPlaneMover, PhysicsMover, RapierMover};

fn visual_for(library: Option<Arc<AnimationLibrary>>) -> VisualCharacter {
    match library {
        Some(library) => VisualCharacter::with_library(library),
        None => VisualCharacter::new(),
    }
}

/// Spawn тела персонажа для headless симуляции (пол на y = 0)
///
/// `library = None` — модель назначат позже (`VisualCharacter::set_visual`).
/// Локомоцию прикрепляет `attach_locomotion`.
pub fn spawn_headless_character(
    commands: &mut Commands,
    name: &str,
    position: Vec3,
    library: Option<Arc<AnimationLibrary>>,
) -> Entity {
    commands
        .spawn((
            Name::new(name.to_string()),
            Transform::from_translation(position),
            visual_for(library),
            CharacterMover::GroundPlane(GroundPlaneMover::default()),
        ))
        .id()
}

/// Spawn тела персонажа с Rapier kinematic controller
///
/// Требует RapierPhysicsPlugin в App.
pub fn spawn_rapier_character(
    commands: &mut Commands,
    name: &str,
    position: Vec3,
    library: Option<Arc<AnimationLibrary>>,
) -> Entity {
    commands
        .spawn((
            Name::new(name.to_string()),
            Transform::from_translation(position),
            visual_for(library),
            CharacterMover::Rapier,
            // Rapier physics
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.4), // Высота 1.8m (0.5 + 0.5 + 2 × 0.4), радиус 0.4m
            KinematicCharacterController::default(),
        ))
        .id()
}
