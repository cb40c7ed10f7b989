//! Ошибки уровня конструирования (fatal)
//!
//! Runtime отказы (нет клипа, закрытый gate, неизвестный waypoint) — НЕ ошибки:
//! команды возвращают `bool` и пишут в лог.

use bevy::prelude::Entity;

/// Не удалось прикрепить `CharacterLocomotion` к entity
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error("Entity {0:?} does not exist")]
    EntityNotFound(Entity),

    #[error("Entity {name} does not have a VisualCharacter component")]
    MissingVisual { name: String },

    #[error("Entity {name} does not have a CharacterMover component")]
    MissingMover { name: String },
}

/// Ошибка загрузки/валидации конфигурации
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(
        "activate range ({activate} m) must be smaller than deactivate range ({deactivate} m)"
    )]
    CollapsedActivationBand { activate: f32, deactivate: f32 },

    #[error("fixed tick rate must be positive, got {0}")]
    InvalidTickRate(f64),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
