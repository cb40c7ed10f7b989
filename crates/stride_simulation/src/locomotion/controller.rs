//! CharacterLocomotion — контроллер локомоции одного персонажа
//!
//! Per-tick порядок (`advance`):
//! 1. Активация физики по дистанции до камеры (неактивен → сбрасываем root motion и выходим)
//! 2. Синхронизация фазы с анимационной поверхностью
//! 3. Поворот
//! 4. Root motion + гравитация → mover → флаги земли/воздуха
//!
//! Команды (`commands.rs`) вызываются между тиками и меняют только намерения.

use bevy::prelude::*;

use crate::animation::{AnimationSurface, PostureAliasTable, VisualCharacter};
use crate::config::LocomotionConfig;
use crate::error::AttachError;
use crate::logger::log;
use crate::physics::{CharacterMover, PhysicsMover};

use super::state::{LocomotionPhase, LocomotionState, PhaseTracker};

/// Тело персонажа на время одного тика (ничем не владеем)
pub struct CharacterBody<'a> {
    pub transform: &'a mut Transform,
    pub visual: &'a mut dyn AnimationSurface,
    pub mover: &'a mut dyn PhysicsMover,
}

#[derive(Component, Debug, Clone)]
pub struct CharacterLocomotion {
    pub(crate) name: String,
    pub(crate) state: LocomotionState,
    pub(crate) tracker: PhaseTracker,
    pub(crate) config: LocomotionConfig,
    pub(crate) posture_aliases: PostureAliasTable,
}

impl CharacterLocomotion {
    pub fn new(name: impl Into<String>, config: LocomotionConfig) -> Self {
        Self {
            name: name.into(),
            state: LocomotionState::default(),
            tracker: PhaseTracker::default(),
            config,
            posture_aliases: PostureAliasTable::default(),
        }
    }

    pub fn with_posture_aliases(mut self, aliases: PostureAliasTable) -> Self {
        self.posture_aliases = aliases;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Фаза на момент последней синхронизации (None — неизвестный клип)
    pub fn phase(&self) -> Option<&LocomotionPhase> {
        self.tracker.phase()
    }

    pub fn is_physics_active(&self) -> bool {
        self.state.is_physics_active
    }

    /// Один fixed tick
    ///
    /// `viewpoint = None` — камеры нет, активация не меняется.
    pub fn advance(&mut self, body: &mut CharacterBody<'_>, viewpoint: Option<Vec3>, frame_delta: f32) {
        self.handle_physics_activation(body.transform.translation, viewpoint);

        if !self.state.is_physics_active {
            // Клипы продолжают играть, но пропущенное смещение не применяем
            body.visual.sample_root_motion();
            return;
        }

        self.reconcile_phase(&*body.visual);

        if self.is_turning_allowed() {
            self.handle_turning(body.transform);
        }

        self.integrate_movement(body, frame_delta);
    }

    pub(crate) fn reconcile_phase(&mut self, visual: &dyn AnimationSurface) {
        self.tracker.reconcile(
            visual.playing_clip_name(),
            self.state.weapon_posture,
            self.state.gait,
        );
    }
}

/// Прикрепить локомоцию к телу персонажа
///
/// Тело обязано уже иметь `VisualCharacter` и `CharacterMover` — без них
/// контроллеру нечем управлять, деградированного режима нет.
pub fn attach_locomotion(world: &mut World, entity: Entity) -> Result<(), AttachError> {
    let config = world
        .get_resource::<LocomotionConfig>()
        .copied()
        .unwrap_or_default();

    let entity_ref = world
        .get_entity(entity)
        .map_err(|_| AttachError::EntityNotFound(entity))?;

    let name = entity_ref
        .get::<Name>()
        .map(|name| name.as_str().to_string())
        .unwrap_or_else(|| format!("{:?}", entity));

    if !entity_ref.contains::<VisualCharacter>() {
        return Err(AttachError::MissingVisual { name });
    }

    if !entity_ref.contains::<CharacterMover>() {
        return Err(AttachError::MissingMover { name });
    }

    let aliases = world
        .get_resource::<PostureAliasTable>()
        .cloned()
        .unwrap_or_default();

    log(&format!("[Locomotion] Attached to {}", name));

    world
        .entity_mut(entity)
        .insert(CharacterLocomotion::new(name, config).with_posture_aliases(aliases));

    Ok(())
}
