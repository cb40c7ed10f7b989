//! Active viewpoint — камера, от которой считается дистанция активации физики
//!
//! Контроллер локомоции НЕ ищет камеру сам: позицию передаём в `advance()`.

use bevy::prelude::*;

/// Marker: entity — активная точка обзора (main camera)
///
/// Если таких несколько, берётся первая (в single-player она одна).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ActiveViewpoint;

/// Позиция активной камеры (None — камеры нет)
pub fn viewpoint_position(viewpoints: &Query<&Transform, With<ActiveViewpoint>>) -> Option<Vec3> {
    viewpoints.iter().next().map(|transform| transform.translation)
}

/// Spawn камеры-viewpoint'а
pub fn spawn_viewpoint(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((Name::new("Viewpoint"), Transform::from_translation(position), ActiveViewpoint))
        .id()
}
