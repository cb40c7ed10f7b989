//! Стандартный набор клипов гуманоида
//!
//! Для каждой стойки: idle/forward для всех походок, backward только у walk.
//! Переходы idle ↔ forward, смена походки (без оружия), смена стойки из run,
//! стрейфы, прыжок и отскок назад.

use bevy::prelude::*;
use std::sync::Arc;

use super::naming::{
    build_state_animation_name, strafe_animation_name, transition_animation_name, Gait,
    StrafeSide, WeaponPosture, JUMP_BACK_TRANSITION, JUMP_STATE, STAND_STATE, SUFFIX_BACKWARD,
    SUFFIX_FORWARD, SUFFIX_IDLE,
};
use super::visual::{AnimationClip, AnimationLibrary};

/// Скорость root motion по походке (м/с)
pub fn gait_speed(gait: Gait) -> f32 {
    match gait {
        Gait::Run => 4.0,
        Gait::Walk => 1.6,
        Gait::Sneak => 1.0,
    }
}

const STATE_TRANSITION_SECONDS: f32 = 0.2;
const JUMP_SECONDS: f32 = 0.6;

pub fn humanoid_library() -> AnimationLibrary {
    let mut library = AnimationLibrary::new();

    for posture in WeaponPosture::ALL {
        for gait in Gait::ALL {
            let idle = build_state_animation_name(posture, gait, SUFFIX_IDLE);
            let forward = build_state_animation_name(posture, gait, SUFFIX_FORWARD);

            library.add(AnimationClip::idle(&idle));
            library.add(AnimationClip::locomotion(
                &forward,
                Vec3::NEG_Z,
                gait_speed(gait),
            ));
            library.add(AnimationClip::transition(
                transition_animation_name(&idle, &forward),
                STATE_TRANSITION_SECONDS,
                &forward,
            ));
            library.add(AnimationClip::transition(
                transition_animation_name(&forward, &idle),
                STATE_TRANSITION_SECONDS,
                &idle,
            ));
        }

        let walk_back = build_state_animation_name(posture, Gait::Walk, SUFFIX_BACKWARD);
        library.add(AnimationClip::locomotion(
            walk_back,
            Vec3::Z,
            gait_speed(Gait::Walk),
        ));
    }

    // Смена походки без оружия (в обе стороны)
    for from in Gait::ALL {
        for to in Gait::ALL {
            if from == to {
                continue;
            }
            let from_idle = build_state_animation_name(WeaponPosture::Unarmed, from, SUFFIX_IDLE);
            let to_idle = build_state_animation_name(WeaponPosture::Unarmed, to, SUFFIX_IDLE);
            library.add(AnimationClip::transition(
                transition_animation_name(&from_idle, &to_idle),
                STATE_TRANSITION_SECONDS,
                &to_idle,
            ));
        }
    }

    // Достать/убрать оружие из run (обратные переходы — только через alias)
    let run_idle = build_state_animation_name(WeaponPosture::Unarmed, Gait::Run, SUFFIX_IDLE);
    for posture in WeaponPosture::ALL.into_iter().skip(1) {
        let armed_idle = build_state_animation_name(posture, Gait::Run, SUFFIX_IDLE);
        library.add(AnimationClip::transition(
            transition_animation_name(&run_idle, &armed_idle),
            0.5,
            &armed_idle,
        ));
    }

    // Стрейфы — зацикленные T_ клипы
    for gait in Gait::ALL {
        for side in [StrafeSide::Left, StrafeSide::Right] {
            let direction = match side {
                StrafeSide::Left => Vec3::NEG_X,
                StrafeSide::Right => Vec3::X,
            };
            library.add(
                AnimationClip::locomotion(
                    strafe_animation_name(gait, side),
                    direction,
                    gait_speed(gait) * 0.75,
                ),
            );
        }
    }

    // Прыжок: S_JUMP (полёт) → T_JUMP_2_STAND → S_RUN
    library.add(AnimationClip::flying(
        JUMP_STATE,
        JUMP_SECONDS,
        transition_animation_name(JUMP_STATE, STAND_STATE),
    ));
    library.add(
        AnimationClip::transition(
            transition_animation_name(JUMP_STATE, STAND_STATE),
            STATE_TRANSITION_SECONDS,
            &run_idle,
        ),
    );
    library.add(
        AnimationClip::transition(JUMP_BACK_TRANSITION, 0.5, &run_idle)
            .with_root_motion(Vec3::Z, 2.0),
    );

    library
}

pub fn shared_humanoid_library() -> Arc<AnimationLibrary> {
    Arc::new(humanoid_library())
}
