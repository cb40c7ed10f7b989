//! Схема имён анимаций локомоции
//!
//! Состояние: `S_` + префикс оружия + походка + суффикс (`S_1HWALKL`, `S_RUN`).
//! Переход между состояниями: `T_<FROM>_2_<TO>` (`T_RUN_2_RUNL`).
//! Обратное направление: из имени клипа достаём только походку.

use bevy::prelude::*;
use serde::Deserialize;

/// Префикс state-анимаций
pub const STATE_PREFIX: &str = "S_";
/// Префикс transition-анимаций
pub const TRANSITION_PREFIX: &str = "T_";

/// Суффикс idle-состояния (стоим на месте)
pub const SUFFIX_IDLE: &str = "";
/// Суффикс движения вперёд (loop)
pub const SUFFIX_FORWARD: &str = "L";
/// Суффикс движения назад (loop, есть не у всех походок)
pub const SUFFIX_BACKWARD: &str = "BL";

/// Несуществующее состояние "стоять": некоторые переходы ссылаются на него (`T_JUMP_2_STAND`)
pub const STAND_STATE: &str = "S_STAND";
/// Прыжок вверх
pub const JUMP_STATE: &str = "S_JUMP";
/// Отскок назад (когда у походки нет `BL` состояния)
pub const JUMP_BACK_TRANSITION: &str = "T_JUMPB";

/// Стойка с оружием — определяет семейство анимаций
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Reflect)]
pub enum WeaponPosture {
    #[default]
    Unarmed,
    Fist,
    OneHanded,
    TwoHanded,
    Bow,
    Crossbow,
    Magic,
}

impl WeaponPosture {
    pub const ALL: [WeaponPosture; 7] = [
        WeaponPosture::Unarmed,
        WeaponPosture::Fist,
        WeaponPosture::OneHanded,
        WeaponPosture::TwoHanded,
        WeaponPosture::Bow,
        WeaponPosture::Crossbow,
        WeaponPosture::Magic,
    ];

    /// Префикс в имени клипа
    pub fn animation_prefix(self) -> &'static str {
        match self {
            WeaponPosture::Unarmed => "",
            WeaponPosture::Fist => "FIST",
            WeaponPosture::OneHanded => "1H",
            WeaponPosture::TwoHanded => "2H",
            WeaponPosture::Bow => "BOW",
            WeaponPosture::Crossbow => "CBOW",
            WeaponPosture::Magic => "MAG",
        }
    }

    /// Оружие в руках (кулаки не считаются)
    pub fn is_weapon_drawn(self) -> bool {
        !matches!(self, WeaponPosture::Unarmed | WeaponPosture::Fist)
    }
}

/// Походка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Reflect)]
pub enum Gait {
    #[default]
    Run,
    Walk,
    Sneak,
}

impl Gait {
    pub const ALL: [Gait; 3] = [Gait::Run, Gait::Walk, Gait::Sneak];

    pub fn token(self) -> &'static str {
        match self {
            Gait::Run => "RUN",
            Gait::Walk => "WALK",
            Gait::Sneak => "SNEAK",
        }
    }
}

/// Сторона стрейфа
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrafeSide {
    Left,
    Right,
}

/// `S_` + posture + gait + suffix
pub fn build_state_animation_name(posture: WeaponPosture, gait: Gait, suffix: &str) -> String {
    format!(
        "{}{}{}{}",
        STATE_PREFIX,
        posture.animation_prefix(),
        gait.token(),
        suffix
    )
}

/// Разбор state-имени: (стойка, походка, суффикс)
///
/// `None` — имя не по схеме (вызывающий должен считать состояние неизвестным).
pub fn parse_state_name(name: &str) -> Option<(WeaponPosture, Gait, &str)> {
    let body = name.strip_prefix(STATE_PREFIX)?;

    // Длинные префиксы первыми: пустой префикс Unarmed матчит всё
    let mut postures = WeaponPosture::ALL;
    postures.sort_by_key(|posture| std::cmp::Reverse(posture.animation_prefix().len()));

    postures.iter().find_map(|&posture| {
        let rest = body.strip_prefix(posture.animation_prefix())?;
        Gait::ALL.iter().find_map(|&gait| {
            rest.strip_prefix(gait.token())
                .map(|suffix| (posture, gait, suffix))
        })
    })
}

/// Походка из имени клипа
pub fn extract_gait_label(name: &str) -> Option<Gait> {
    parse_state_name(name).map(|(_, gait, _)| gait)
}

/// `T_RUNSTRAFEL`, `T_SNEAKSTRAFER`, ...
pub fn strafe_animation_name(gait: Gait, side: StrafeSide) -> String {
    let side = match side {
        StrafeSide::Left => "L",
        StrafeSide::Right => "R",
    };
    format!("{}{}STRAFE{}", TRANSITION_PREFIX, gait.token(), side)
}

/// `T_<FROM>_2_<TO>` из двух state-имён
pub fn transition_animation_name(from_state: &str, to_state: &str) -> String {
    let from = from_state.strip_prefix(STATE_PREFIX).unwrap_or(from_state);
    let to = to_state.strip_prefix(STATE_PREFIX).unwrap_or(to_state);
    format!("{}{}_2_{}", TRANSITION_PREFIX, from, to)
}
