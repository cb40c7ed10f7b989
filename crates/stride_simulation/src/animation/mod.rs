//! Animation domain — клипы, схема имён, анимационная поверхность
//!
//! Содержит:
//! - naming: имена state/transition клипов (WeaponPosture, Gait)
//! - surface: trait AnimationSurface (контракт для контроллера локомоции)
//! - visual: VisualCharacter (ECS реализация поверхности) + AnimationLibrary
//! - humanoid: стандартный набор клипов
//! - aliases: alias-клипы для смены стойки (from, to)

pub mod aliases;
pub mod humanoid;
pub mod naming;
pub mod surface;
pub mod visual;

// Re-export основных типов
pub use aliases::PostureAliasTable;
pub use humanoid::{humanoid_library, shared_humanoid_library};
pub use naming::{
    build_state_animation_name, extract_gait_label, Gait, StrafeSide, WeaponPosture,
};
pub use surface::{AnimationSurface, ClipId};
pub use visual::{tick_character_visuals, AnimationClip, AnimationLibrary, ClipKind, VisualCharacter};
