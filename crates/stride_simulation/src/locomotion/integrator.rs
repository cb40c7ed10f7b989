//! Интеграция движения: root motion + гравитация → mover
//!
//! Скорость считает контроллер, mover только исполняет смещение и
//! сообщает контакт снизу.

use bevy::prelude::*;

use crate::animation::AnimationSurface;

use super::controller::{CharacterBody, CharacterLocomotion};
use super::state::LocomotionState;

/// Root motion за тик в мировых координатах
///
/// На idle клипе накопленное всё равно забираем, иначе оно выстрелит
/// на первом клипе движения.
pub fn world_root_motion(rotation: Quat, visual: &mut dyn AnimationSurface) -> Vec3 {
    let sampled = visual.sample_root_motion();

    if visual.is_playing_idle() {
        return Vec3::ZERO;
    }

    -(rotation * sampled)
}

/// Нужно ли вообще двигать тело в этом тике
pub fn needs_physics_update(state: &LocomotionState, root_motion: Vec3) -> bool {
    state.is_airborne || !state.is_on_solid_ground || root_motion != Vec3::ZERO
}

/// Смещение за тик: root motion + вертикаль (падение или прижим к земле)
pub fn compose_displacement(
    state: &LocomotionState,
    root_motion: Vec3,
    ground_adherence_velocity: f32,
    frame_delta: f32,
) -> Vec3 {
    let vertical = if state.is_airborne {
        state.falling_velocity
    } else {
        ground_adherence_velocity
    };

    root_motion + Vec3::Y * vertical * frame_delta
}

impl CharacterLocomotion {
    pub(crate) fn integrate_movement(&mut self, body: &mut CharacterBody<'_>, frame_delta: f32) {
        let root_motion = world_root_motion(body.transform.rotation, &mut *body.visual);

        if needs_physics_update(&self.state, root_motion) {
            let displacement = compose_displacement(
                &self.state,
                root_motion,
                self.config.ground_adherence_velocity,
                frame_delta,
            );

            let flags = body.mover.move_character(body.transform, displacement);
            self.state.is_on_solid_ground = flags.down;
            self.state.is_airborne = !flags.down;
        }

        self.update_falling(body.visual.is_playing_flying(), frame_delta);
    }

    fn update_falling(&mut self, is_flying: bool, frame_delta: f32) {
        if is_flying {
            // Вертикалью управляет анимация
            self.state.is_airborne = true;
            self.state.falling_velocity = 0.0;
        } else if !self.state.is_airborne {
            self.state.falling_velocity = 0.0;
        } else {
            self.state.falling_velocity += self.config.gravity * frame_delta;
        }
    }
}
