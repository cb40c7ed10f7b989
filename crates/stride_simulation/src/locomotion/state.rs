//! Состояние локомоции персонажа
//!
//! `LocomotionState` — намерения (походка, стойка, поворот) и физика (воздух/земля, падение).
//! `PhaseTracker` — явная фаза {Idle, Moving, Transitioning}: контроллер помнит,
//! какой клип он сам запустил и зачем, вместо разбора имени текущего клипа.

use bevy::prelude::*;

use crate::animation::naming::{
    build_state_animation_name, strafe_animation_name, Gait, StrafeSide, WeaponPosture,
    SUFFIX_BACKWARD, SUFFIX_FORWARD, SUFFIX_IDLE,
};

/// Направление поворота (держится до явной смены)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TurnIntent {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct LocomotionState {
    pub weapon_posture: WeaponPosture,
    pub gait: Gait,
    pub turn_intent: TurnIntent,
    /// Симуляция этого персонажа включена (дистанция до камеры)
    pub is_physics_active: bool,
    pub is_airborne: bool,
    pub is_on_solid_ground: bool,
    /// Вертикальная скорость в воздухе (m/s, отрицательная = вниз)
    pub falling_velocity: f32,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            weapon_posture: WeaponPosture::Unarmed,
            gait: Gait::Run,
            turn_intent: TurnIntent::None,
            is_physics_active: true,
            // Оба false: первый активный тик обязательно спросит физику
            is_airborne: false,
            is_on_solid_ground: false,
            falling_velocity: 0.0,
        }
    }
}

/// Фаза локомоции
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub enum LocomotionPhase {
    /// Стоим в idle текущей походки
    Idle,
    /// Цикл движения (вперёд, назад, стрейф)
    Moving(Gait),
    /// Играет переход; `to_clip` — куда он ведёт
    Transitioning {
        from_clip: Option<String>,
        to_clip: String,
    },
}

/// Во что должен вылиться запущенный клип
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipIntent {
    /// Запрошенное состояние (если играет именно оно, а не transition к нему)
    Settle(LocomotionPhase),
    /// Клип сам по себе переход (прыжок, отскок)
    Transient,
}

/// Фаза + клип, который контроллер считает текущим
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct PhaseTracker {
    /// None — играет клип, запущенный не нами и не узнанный
    phase: Option<LocomotionPhase>,
    clip: Option<String>,
}

impl PhaseTracker {
    pub fn phase(&self) -> Option<&LocomotionPhase> {
        self.phase.as_ref()
    }

    pub fn tracked_clip(&self) -> Option<&str> {
        self.clip.as_deref()
    }

    /// Играет ли именно тот клип, про который мы знаем
    pub fn is_tracking(&self, playing: &str) -> bool {
        self.phase.is_some() && self.clip.as_deref() == Some(playing)
    }

    /// Запомнить запуск клипа `started` по запросу `requested`
    pub fn record_started(
        &mut self,
        from_clip: Option<&str>,
        started: &str,
        requested: &str,
        intent: ClipIntent,
    ) {
        self.phase = Some(match intent {
            ClipIntent::Settle(phase) if started == requested => phase,
            _ => LocomotionPhase::Transitioning {
                from_clip: from_clip.map(str::to_string),
                to_clip: requested.to_string(),
            },
        });
        self.clip = Some(started.to_string());
    }

    /// Синхронизация с поверхностью: клип мог смениться сам (follow-up) или снаружи
    pub fn reconcile(&mut self, playing: Option<&str>, posture: WeaponPosture, gait: Gait) {
        let Some(playing) = playing else {
            self.phase = Some(LocomotionPhase::Idle);
            self.clip = None;
            return;
        };

        if self.clip.as_deref() == Some(playing) {
            return;
        }

        self.phase = match (classify_clip(playing, posture, gait), self.phase.take()) {
            (Some(phase), _) => Some(phase),
            // Цепочка переходов ещё не дошла до состояния
            (None, Some(transitioning @ LocomotionPhase::Transitioning { .. })) => {
                Some(transitioning)
            }
            (None, _) => None,
        };
        self.clip = Some(playing.to_string());
    }
}

/// Узнать клип сборкой имён текущей стойки/походки (без разбора строки)
pub fn classify_clip(name: &str, posture: WeaponPosture, gait: Gait) -> Option<LocomotionPhase> {
    if name == build_state_animation_name(posture, gait, SUFFIX_IDLE) {
        return Some(LocomotionPhase::Idle);
    }

    let moving = [
        build_state_animation_name(posture, gait, SUFFIX_FORWARD),
        build_state_animation_name(posture, gait, SUFFIX_BACKWARD),
        strafe_animation_name(gait, StrafeSide::Left),
        strafe_animation_name(gait, StrafeSide::Right),
    ];

    moving
        .iter()
        .any(|candidate| candidate == name)
        .then_some(LocomotionPhase::Moving(gait))
}
