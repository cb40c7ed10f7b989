//! Контракт анимационной поверхности персонажа
//!
//! Контроллер локомоции только спрашивает и запускает клипы; сам проигрыватель
//! (время клипа, follow-up клипы, root motion) живёт по другую сторону trait'а.

use bevy::prelude::*;

/// Индекс клипа в библиотеке модели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct ClipId(pub usize);

pub trait AnimationSurface {
    /// Модель загружена (до этого никаких клипов нет)
    fn has_visual(&self) -> bool;

    /// Имя текущего клипа, `None` — ничего не играет
    fn playing_clip_name(&self) -> Option<&str>;

    fn find_clip(&self, name: &str) -> Option<ClipId>;

    /// Во что реально переходить, чтобы попасть в `name`
    ///
    /// Если есть transition-клип из текущего состояния (или из `fallback_start`,
    /// когда ничего не играет) — его имя, иначе само `name`.
    fn find_transition_target(&self, name: &str, fallback_start: Option<&str>) -> String;

    fn is_playing(&self, clip: ClipId) -> bool;

    /// Имя клипа, на котором остановится цепочка follow-up'ов от `clip`
    fn settled_clip_name(&self, clip: ClipId) -> Option<String>;

    fn is_current_interruptible(&self) -> bool;

    fn is_playing_idle(&self) -> bool;

    /// Клип сам двигает персонажа по вертикали (прыжок, полёт)
    fn is_playing_flying(&self) -> bool;

    fn play_clip(&mut self, clip: ClipId);

    /// Root motion с прошлого запроса (забирает накопленное)
    ///
    /// Конвенция сэмплера инвертирована относительно движения в мире.
    fn sample_root_motion(&mut self) -> Vec3;

    /// Debug множитель скорости анимаций
    fn set_speed_factor(&mut self, factor: f32);
}
