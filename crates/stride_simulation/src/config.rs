//! Конфигурация симуляции: пороги активации физики, гравитация, скорость поворота
//!
//! Загружается из TOML (все поля опциональны, отсутствующие берутся из Default).
//!
//! ```toml
//! log_level = "info"
//! fixed_hz = 60.0
//!
//! [locomotion]
//! activate_range_meters = 40.0
//! deactivate_range_meters = 45.0
//! ```

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::logger::LogLevel;

/// Параметры контроллера локомоции (копируются в каждый `CharacterLocomotion`)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Ближе этого расстояния до камеры физика включается (метры)
    pub activate_range_meters: f32,
    /// Дальше этого расстояния физика выключается (метры)
    ///
    /// Инвариант: activate < deactivate, иначе состояние флапает каждый тик.
    pub deactivate_range_meters: f32,
    /// Ускорение свободного падения по Y (m/s²)
    pub gravity: f32,
    /// Постоянная скорость вниз на земле, чтобы не отрываться на склонах (m/s)
    pub ground_adherence_velocity: f32,
    /// Поворот за один fixed tick (радианы)
    pub turn_speed: f32,
    /// Множитель скорости поворота с оружием в руках (кроме кулаков)
    pub armed_turn_multiplier: f32,
    /// Радиус "дошли до точки" (метры)
    pub arrival_tolerance: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            activate_range_meters: 40.0,
            deactivate_range_meters: 45.0,
            gravity: -9.81,
            ground_adherence_velocity: -10.0,
            turn_speed: 0.05,
            armed_turn_multiplier: 2.0,
            arrival_tolerance: 0.5,
        }
    }
}

impl LocomotionConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.activate_range_meters >= self.deactivate_range_meters {
            return Err(ConfigError::CollapsedActivationBand {
                activate: self.activate_range_meters,
                deactivate: self.deactivate_range_meters,
            });
        }

        Ok(())
    }

    pub fn activate_range_sq(&self) -> f32 {
        self.activate_range_meters * self.activate_range_meters
    }

    pub fn deactivate_range_sq(&self) -> f32 {
        self.deactivate_range_meters * self.deactivate_range_meters
    }
}

/// Корневой конфиг (файл `stride.toml`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub log_level: LogLevel,
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f64,
    pub locomotion: LocomotionConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            fixed_hz: 60.0,
            locomotion: LocomotionConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.fixed_hz > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.fixed_hz));
        }

        self.locomotion.validate()
    }
}
