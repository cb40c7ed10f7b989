//! VisualCharacter — проигрыватель клипов модели персонажа
//!
//! Архитектура:
//! - `AnimationLibrary` — набор клипов модели (shared через Arc между персонажами)
//! - `VisualCharacter` — ECS компонент: текущий клип, время, накопленный root motion
//! - `tick_character_visuals` двигает время клипов в FixedUpdate (до локомоции)
//!
//! Модель может появиться позже спавна (`set_visual`), до этого клипов нет.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use super::naming::{transition_animation_name, STATE_PREFIX};
use super::surface::{AnimationSurface, ClipId};

/// Роль клипа для контроллера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ClipKind {
    /// Стоим на месте (root motion игнорируется)
    Idle,
    /// Цикл движения (ходьба, бег, стрейф)
    Locomotion,
    /// Переход между состояниями
    Transition,
    /// Анимация сама управляет вертикалью (прыжок)
    Flying,
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub kind: ClipKind,
    pub interruptible: bool,
    pub looping: bool,
    /// Длительность (секунды)
    pub duration: f32,
    /// Что играть после окончания (только для не-loop клипов)
    pub next: Option<String>,
    /// Root motion в секунду, в конвенции сэмплера (инвертирован)
    pub root_motion: Vec3,
}

impl AnimationClip {
    pub fn idle(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClipKind::Idle,
            interruptible: true,
            looping: true,
            duration: 2.0,
            next: None,
            root_motion: Vec3::ZERO,
        }
    }

    /// Цикл движения со скоростью `speed` м/с в локальном `direction`
    pub fn locomotion(name: impl Into<String>, direction: Vec3, speed: f32) -> Self {
        Self {
            name: name.into(),
            kind: ClipKind::Locomotion,
            interruptible: true,
            looping: true,
            duration: 1.0,
            next: None,
            // Сэмплер отдаёт motion с обратным знаком
            root_motion: -direction.normalize_or_zero() * speed,
        }
    }

    pub fn transition(name: impl Into<String>, duration: f32, next: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClipKind::Transition,
            interruptible: false,
            looping: false,
            duration,
            next: Some(next.into()),
            root_motion: Vec3::ZERO,
        }
    }

    pub fn flying(name: impl Into<String>, duration: f32, next: impl Into<String>) -> Self {
        Self {
            kind: ClipKind::Flying,
            ..Self::transition(name, duration, next)
        }
    }

    pub fn with_interruptible(mut self, interruptible: bool) -> Self {
        self.interruptible = interruptible;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_root_motion(mut self, direction: Vec3, speed: f32) -> Self {
        self.root_motion = -direction.normalize_or_zero() * speed;
        self
    }
}

/// Клипы одной модели
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    clips: Vec<AnimationClip>,
    by_name: HashMap<String, ClipId>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить клип (одноимённый заменяет старый)
    pub fn add(&mut self, clip: AnimationClip) -> ClipId {
        if let Some(&id) = self.by_name.get(&clip.name) {
            self.clips[id.0] = clip;
            return id;
        }

        let id = ClipId(self.clips.len());
        self.by_name.insert(clip.name.clone(), id);
        self.clips.push(clip);
        id
    }

    pub fn with(mut self, clip: AnimationClip) -> Self {
        self.add(clip);
        self
    }

    pub fn find(&self, name: &str) -> Option<ClipId> {
        self.by_name.get(name).copied()
    }

    pub fn clip(&self, id: ClipId) -> Option<&AnimationClip> {
        self.clips.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Анимационная поверхность персонажа (ECS)
#[derive(Component, Debug)]
pub struct VisualCharacter {
    library: Option<Arc<AnimationLibrary>>,
    playing: Option<ClipId>,
    clip_time: f32,
    pending_root_motion: Vec3,
    speed_factor: f32,
}

impl Default for VisualCharacter {
    fn default() -> Self {
        Self {
            library: None,
            playing: None,
            clip_time: 0.0,
            pending_root_motion: Vec3::ZERO,
            speed_factor: 1.0,
        }
    }
}

impl VisualCharacter {
    /// Без модели (модель назначат позже через `set_visual`)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(library: Arc<AnimationLibrary>) -> Self {
        Self {
            library: Some(library),
            ..Self::default()
        }
    }

    /// Назначить модель. Сбрасывает текущий клип.
    pub fn set_visual(&mut self, library: Arc<AnimationLibrary>) {
        self.library = Some(library);
        self.playing = None;
        self.clip_time = 0.0;
        self.pending_root_motion = Vec3::ZERO;
    }

    pub fn playing_clip(&self) -> Option<&AnimationClip> {
        let library = self.library.as_ref()?;
        library.clip(self.playing?)
    }

    pub fn clip_time(&self) -> f32 {
        self.clip_time
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    /// Продвинуть время текущего клипа на `delta` секунд
    pub fn advance(&mut self, delta: f32) {
        let Some(library) = self.library.clone() else {
            return;
        };
        let Some(clip) = self.playing.and_then(|id| library.clip(id)) else {
            return;
        };

        let delta = delta * self.speed_factor;
        self.pending_root_motion += clip.root_motion * delta;
        self.clip_time += delta;

        if clip.looping {
            if clip.duration > 0.0 {
                self.clip_time %= clip.duration;
            }
            return;
        }

        if self.clip_time < clip.duration {
            return;
        }

        match clip.next.as_deref().and_then(|next| library.find(next)) {
            Some(next) => {
                self.playing = Some(next);
                self.clip_time = 0.0;
            }
            // Нет follow-up — держим последний кадр
            None => self.clip_time = clip.duration,
        }
    }
}

impl AnimationSurface for VisualCharacter {
    fn has_visual(&self) -> bool {
        self.library.is_some()
    }

    fn playing_clip_name(&self) -> Option<&str> {
        self.playing_clip().map(|clip| clip.name.as_str())
    }

    fn find_clip(&self, name: &str) -> Option<ClipId> {
        self.library.as_ref()?.find(name)
    }

    fn find_transition_target(&self, name: &str, fallback_start: Option<&str>) -> String {
        if !name.starts_with(STATE_PREFIX) {
            return name.to_string();
        }

        let Some(from) = self.playing_clip_name().or(fallback_start) else {
            return name.to_string();
        };

        let transition = transition_animation_name(from, name);
        if self.find_clip(&transition).is_some() {
            transition
        } else {
            name.to_string()
        }
    }

    fn is_playing(&self, clip: ClipId) -> bool {
        self.playing == Some(clip)
    }

    fn settled_clip_name(&self, clip: ClipId) -> Option<String> {
        let library = self.library.as_ref()?;
        let mut current = library.clip(clip)?;

        // Цепочка без циклов не длиннее библиотеки
        for _ in 0..library.len() {
            if current.looping {
                break;
            }
            let Some(next) = current
                .next
                .as_deref()
                .and_then(|next| library.find(next))
                .and_then(|id| library.clip(id))
            else {
                break;
            };
            current = next;
        }

        Some(current.name.clone())
    }

    fn is_current_interruptible(&self) -> bool {
        self.playing_clip().map_or(true, |clip| clip.interruptible)
    }

    fn is_playing_idle(&self) -> bool {
        self.playing_clip()
            .is_some_and(|clip| clip.kind == ClipKind::Idle)
    }

    fn is_playing_flying(&self) -> bool {
        self.playing_clip()
            .is_some_and(|clip| clip.kind == ClipKind::Flying)
    }

    fn play_clip(&mut self, clip: ClipId) {
        self.playing = Some(clip);
        self.clip_time = 0.0;
    }

    fn sample_root_motion(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending_root_motion)
    }

    fn set_speed_factor(&mut self, factor: f32) {
        self.speed_factor = factor.max(0.0);
    }
}

/// Система: время анимаций (FixedUpdate, до локомоции)
pub fn tick_character_visuals(mut visuals: Query<&mut VisualCharacter>, time: Res<Time<Fixed>>) {
    let delta = time.timestep().as_secs_f32();

    for mut visual in visuals.iter_mut() {
        visual.advance(delta);
    }
}
