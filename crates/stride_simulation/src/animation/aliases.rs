//! Таблица alias-клипов для смены стойки
//!
//! Часть переходов существует только в одну сторону (`T_RUN_2_1HRUN`), обратный
//! — тот же клип задом наперёд. Пока реверс не моделируется, недостающий переход
//! берём из таблицы по паре (from, to). Нет записи — переход невозможен.
//!
//! Таблица заполняется под конкретную модель: клип alias'а обязан заканчиваться
//! в idle целевой стойки (проверяет `change_weapon_posture`). По умолчанию пусто.

use bevy::prelude::*;
use std::collections::HashMap;

use super::naming::WeaponPosture;

/// Resource: общая таблица для новых персонажей (`attach_locomotion` копирует)
#[derive(Resource, Debug, Clone, Default)]
pub struct PostureAliasTable {
    aliases: HashMap<(WeaponPosture, WeaponPosture), String>,
}

impl PostureAliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: WeaponPosture, to: WeaponPosture, clip: impl Into<String>) {
        self.aliases.insert((from, to), clip.into());
    }

    pub fn with(mut self, from: WeaponPosture, to: WeaponPosture, clip: impl Into<String>) -> Self {
        self.insert(from, to, clip);
        self
    }

    pub fn lookup(&self, from: WeaponPosture, to: WeaponPosture) -> Option<&str> {
        self.aliases.get(&(from, to)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
