//! Transition gate — можно ли сейчас начать переход и запуск клипа перехода
//!
//! Правила:
//! - Ничего не играет → можно
//! - Играет клип, который мы запустили сами → решает флаг interruptible клипа
//! - Играет чужой клип с неизвестной схемой имени → нельзя (консервативно)

use crate::animation::naming::{
    build_state_animation_name, extract_gait_label, parse_state_name, Gait, STAND_STATE,
    SUFFIX_IDLE,
};
use crate::animation::AnimationSurface;

use super::controller::CharacterLocomotion;
use super::state::{ClipIntent, LocomotionPhase};

/// Итог попытки перехода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Клип запущен
    Started,
    /// Уже играет нужный клип (не перезапускаем)
    AlreadyPlaying,
    /// Текущий клип нельзя прерывать
    GateClosed,
    /// Модель ещё не загружена
    NoVisual,
    /// Для запроса не нашлось клипа
    NoClip,
}

impl TransitionOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, TransitionOutcome::Started | TransitionOutcome::AlreadyPlaying)
    }
}

impl CharacterLocomotion {
    pub fn is_switch_allowed(&mut self, visual: &dyn AnimationSurface) -> bool {
        self.reconcile_phase(visual);

        let Some(playing) = visual.playing_clip_name() else {
            return true;
        };

        if !self.tracker.is_tracking(playing) && extract_gait_label(playing).is_none() {
            return false;
        }

        visual.is_current_interruptible()
    }

    /// Idle в run/walk без суффикса: переходы в несуществующий "STAND" означают текущий idle
    pub fn is_standing(&self, visual: &dyn AnimationSurface) -> bool {
        let standing_gait = |gait: Gait| matches!(gait, Gait::Run | Gait::Walk);

        match self.tracker.phase() {
            Some(LocomotionPhase::Idle) => standing_gait(self.state.gait),
            Some(_) => false,
            None => visual
                .playing_clip_name()
                .and_then(parse_state_name)
                .is_some_and(|(_, gait, suffix)| suffix == SUFFIX_IDLE && standing_gait(gait)),
        }
    }

    /// Запустить клип, ведущий в `anim` (без проверки gate)
    pub fn try_play_transition_animation_to(
        &mut self,
        visual: &mut dyn AnimationSurface,
        anim: &str,
        intent: ClipIntent,
    ) -> TransitionOutcome {
        if !visual.has_visual() {
            return TransitionOutcome::NoVisual;
        }

        self.reconcile_phase(&*visual);

        let playing_now = visual.playing_clip_name().map(str::to_string);
        let clip_playing_now = playing_now
            .as_deref()
            .and_then(|name| visual.find_clip(name));

        let mut anim_to_play = visual.find_transition_target(anim, None);
        let mut clip = visual.find_clip(&anim_to_play);

        if clip.is_some() && clip == clip_playing_now {
            return TransitionOutcome::AlreadyPlaying;
        }

        if clip.is_none() && self.is_standing(&*visual) {
            anim_to_play = visual.find_transition_target(STAND_STATE, Some(anim));
            clip = visual.find_clip(&anim_to_play);
        }

        let Some(clip) = clip else {
            return TransitionOutcome::NoClip;
        };

        if visual.is_playing(clip) {
            return TransitionOutcome::AlreadyPlaying;
        }

        visual.play_clip(clip);
        self.tracker
            .record_started(playing_now.as_deref(), &anim_to_play, anim, intent);

        TransitionOutcome::Started
    }

    /// Gate + запуск
    pub fn try_transition_to(
        &mut self,
        visual: &mut dyn AnimationSurface,
        anim: &str,
        intent: ClipIntent,
    ) -> TransitionOutcome {
        if !self.is_switch_allowed(&*visual) {
            return TransitionOutcome::GateClosed;
        }

        self.try_play_transition_animation_to(visual, anim, intent)
    }

    /// Переход в состояние текущей стойки/походки с суффиксом `suffix`
    pub fn try_transition_to_state(
        &mut self,
        visual: &mut dyn AnimationSurface,
        suffix: &str,
        intent: ClipIntent,
    ) -> TransitionOutcome {
        let anim =
            build_state_animation_name(self.state.weapon_posture, self.state.gait, suffix);

        self.try_transition_to(visual, &anim, intent)
    }

    pub fn does_state_exist(&self, visual: &dyn AnimationSurface, suffix: &str) -> bool {
        let anim =
            build_state_animation_name(self.state.weapon_posture, self.state.gait, suffix);

        visual.find_clip(&anim).is_some()
    }
}
