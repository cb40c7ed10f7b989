//! Поворот персонажа вокруг вертикали, пока держится TurnIntent

use bevy::prelude::*;

use crate::animation::WeaponPosture;
use crate::config::LocomotionConfig;

use super::controller::CharacterLocomotion;
use super::state::TurnIntent;

/// Ниже этого угла поворот не применяем
const MIN_FRAME_TURN: f32 = 0.0001;

/// Угол поворота за тик (радианы, + = налево / против часовой сверху)
pub fn frame_turn(intent: TurnIntent, posture: WeaponPosture, config: &LocomotionConfig) -> f32 {
    let direction = match intent {
        TurnIntent::None => return 0.0,
        TurnIntent::Left => 1.0,
        TurnIntent::Right => -1.0,
    };

    let multiplier = if posture.is_weapon_drawn() {
        config.armed_turn_multiplier
    } else {
        1.0
    };

    direction * config.turn_speed * multiplier
}

impl CharacterLocomotion {
    // TODO: запрещать поворот во время атак и non-interruptible переходов
    pub fn is_turning_allowed(&self) -> bool {
        true
    }

    pub(crate) fn handle_turning(&mut self, transform: &mut Transform) {
        let angle = frame_turn(self.state.turn_intent, self.state.weapon_posture, &self.config);

        if angle.abs() > MIN_FRAME_TURN {
            transform.rotate_y(angle);
        }
    }
}
