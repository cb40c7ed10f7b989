//! Активация физики по дистанции до камеры (гистерезис)
//!
//! Active → Inactive: дальше deactivate_range. Inactive → Active: ближе activate_range.
//! Между порогами состояние не меняется, поэтому на границе нет флапа.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::logger::log_info;

use super::controller::CharacterLocomotion;

/// Следующее состояние активации по квадрату дистанции
pub fn next_activation(is_active: bool, distance_sq: f32, config: &LocomotionConfig) -> bool {
    if is_active {
        distance_sq <= config.deactivate_range_sq()
    } else {
        distance_sq < config.activate_range_sq()
    }
}

impl CharacterLocomotion {
    pub(crate) fn handle_physics_activation(&mut self, position: Vec3, viewpoint: Option<Vec3>) {
        let Some(viewpoint) = viewpoint else {
            return;
        };

        let distance_sq = viewpoint.distance_squared(position);
        let was_active = self.state.is_physics_active;
        let is_active = next_activation(was_active, distance_sq, &self.config);

        if is_active == was_active {
            return;
        }

        self.state.is_physics_active = is_active;

        if is_active {
            log_info(&format!("[Locomotion]   Activate physics on {}", self.name));
        } else {
            log_info(&format!("[Locomotion] Deactivate physics on {}", self.name));
        }
    }
}
