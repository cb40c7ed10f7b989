//! World domain — именованные точки мира (waypoints, freepoints)
//!
//! Загрузка мира живёт снаружи: она спавнит entity с `WorldAnchor` + `Name` +
//! `Transform`, а `index_world_anchors` складывает их в `WaypointRegistry`.
//! Контроллер локомоции видит только `WorldObjectResolver` (name → transform).

use bevy::prelude::*;
use std::collections::HashMap;

/// Поиск объекта мира по имени
pub trait WorldObjectResolver {
    fn find_by_name(&self, name: &str) -> Option<Transform>;
}

/// Marker: entity — именованная точка мира
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct WorldAnchor;

/// Реестр именованных точек (name → transform)
///
/// Имена в legacy контенте бывают в разном регистре — ключи храним uppercase.
#[derive(Resource, Debug, Clone, Default)]
pub struct WaypointRegistry {
    anchors: HashMap<String, Transform>,
}

impl WaypointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, transform: Transform) {
        self.anchors.insert(name.to_uppercase(), transform);
    }

    pub fn remove(&mut self, name: &str) -> Option<Transform> {
        self.anchors.remove(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl WorldObjectResolver for WaypointRegistry {
    fn find_by_name(&self, name: &str) -> Option<Transform> {
        self.anchors.get(&name.to_uppercase()).copied()
    }
}

/// Система: регистрирует новые/сдвинутые anchors
pub fn index_world_anchors(
    anchors: Query<(&Name, &Transform), (With<WorldAnchor>, Or<(Added<WorldAnchor>, Changed<Transform>)>)>,
    mut registry: ResMut<WaypointRegistry>,
) {
    for (name, transform) in anchors.iter() {
        registry.insert(name.as_str(), *transform);
    }
}

/// Spawn именованной точки мира
pub fn spawn_world_anchor(commands: &mut Commands, name: &str, transform: Transform) -> Entity {
    commands
        .spawn((Name::new(name.to_string()), transform, WorldAnchor))
        .id()
}
