//! Physics mover — исполняет смещение персонажа и отдаёт флаги контакта
//!
//! Архитектура:
//! - Контроллер локомоции сам интегрирует скорость (root motion + гравитация)
//! - Mover только двигает тело и сообщает "упёрлись вниз" (стоим на земле)
//! - Headless: `GroundPlaneMover` (плоский пол, без Rapier)
//! - Игра: `RapierMover` поверх `KinematicCharacterController`

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Результат движения
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    /// Двигались вниз и во что-то упёрлись
    pub down: bool,
}

pub trait PhysicsMover {
    fn move_character(&mut self, transform: &mut Transform, displacement: Vec3) -> CollisionFlags;
}

/// Плоский пол на высоте `ground_height` (позиция персонажа = ступни)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GroundPlaneMover {
    pub ground_height: f32,
}

impl Default for GroundPlaneMover {
    fn default() -> Self {
        Self { ground_height: 0.0 }
    }
}

impl PhysicsMover for GroundPlaneMover {
    fn move_character(&mut self, transform: &mut Transform, displacement: Vec3) -> CollisionFlags {
        transform.translation += displacement;

        if transform.translation.y > self.ground_height {
            return CollisionFlags::default();
        }

        transform.translation.y = self.ground_height;
        CollisionFlags {
            down: displacement.y <= 0.0,
        }
    }
}

/// Адаптер к Rapier character controller
///
/// Rapier применит translation на своём шаге (PhysicsSet, по умолчанию PostUpdate),
/// поэтому флаги контакта — с предыдущего шага (лаг в один тик). Если за кадр
/// прошло несколько FixedUpdate, смещения складываются до шага Rapier.
pub struct RapierMover<'a> {
    pub controller: &'a mut KinematicCharacterController,
    pub last_output: Option<&'a KinematicCharacterControllerOutput>,
}

impl PhysicsMover for RapierMover<'_> {
    fn move_character(&mut self, _transform: &mut Transform, displacement: Vec3) -> CollisionFlags {
        let pending = self.controller.translation.unwrap_or(Vec3::ZERO);
        self.controller.translation = Some(pending + displacement);

        CollisionFlags {
            down: self.last_output.is_some_and(|output| output.grounded),
        }
    }
}

/// Какой mover двигает персонажа
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum CharacterMover {
    GroundPlane(GroundPlaneMover),
    /// Требует KinematicCharacterController на той же entity
    Rapier,
}

impl Default for CharacterMover {
    fn default() -> Self {
        Self::GroundPlane(GroundPlaneMover::default())
    }
}
