//! Tests for the transition gate and transition playback.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::animation::{AnimationClip, AnimationLibrary, AnimationSurface, VisualCharacter};
    use crate::locomotion::gate::TransitionOutcome;
    use crate::locomotion::state::{ClipIntent, LocomotionPhase};
    use crate::locomotion::test_support::{
        humanoid_visual, locomotion, visual_playing, visual_with_external_clip,
    };

    fn moving() -> ClipIntent {
        ClipIntent::Settle(LocomotionPhase::Moving(crate::animation::Gait::Run))
    }

    #[test]
    fn test_nothing_playing_is_allowed() {
        let mut controller = locomotion();
        let visual = humanoid_visual();
        assert!(controller.is_switch_allowed(&visual));
    }

    #[test]
    fn test_non_interruptible_transition_closes_gate() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_RUN");

        assert_eq!(
            controller.try_transition_to(&mut visual, "S_RUNL", moving()),
            TransitionOutcome::Started
        );
        assert_eq!(visual.playing_clip_name(), Some("T_RUN_2_RUNL"));
        assert!(!controller.is_switch_allowed(&visual));

        assert_eq!(
            controller.try_transition_to(&mut visual, "S_RUN", ClipIntent::Settle(LocomotionPhase::Idle)),
            TransitionOutcome::GateClosed
        );
    }

    #[test]
    fn test_try_transition_is_idempotent() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_RUNL");
        visual.advance(0.3);

        for _ in 0..3 {
            let outcome = controller.try_transition_to(&mut visual, "S_RUNL", moving());
            assert_eq!(outcome, TransitionOutcome::AlreadyPlaying);
            assert!(outcome.is_success());
        }

        assert_eq!(visual.playing_clip_name(), Some("S_RUNL"));
        assert!((visual.clip_time() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_external_clip_closes_gate() {
        let mut controller = locomotion();
        let visual = visual_with_external_clip("T_DIALOGGESTURE", true);

        assert!(!controller.is_switch_allowed(&visual));
        assert_eq!(controller.phase(), None);
    }

    #[test]
    fn test_external_clip_with_gait_label_uses_interruptible_flag() {
        let mut controller = locomotion();
        let visual = visual_playing("S_2HWALKL");

        assert!(controller.is_switch_allowed(&visual));
        // Стойка не совпадает → фаза неизвестна, но метка походки есть
        assert_eq!(controller.phase(), None);
    }

    #[test]
    fn test_no_visual() {
        let mut controller = locomotion();
        let mut visual = VisualCharacter::new();

        assert_eq!(
            controller.try_play_transition_animation_to(&mut visual, "S_RUN", ClipIntent::Transient),
            TransitionOutcome::NoVisual
        );
    }

    #[test]
    fn test_missing_clip() {
        let mut controller = locomotion();
        let mut visual = humanoid_visual();

        assert_eq!(
            controller.try_transition_to(&mut visual, "S_SWIM", ClipIntent::Transient),
            TransitionOutcome::NoClip
        );
        assert!(visual.playing_clip_name().is_none());
    }

    #[test]
    fn test_standing_falls_back_to_stand_transition() {
        let library = AnimationLibrary::new()
            .with(AnimationClip::idle("S_RUN"))
            .with(AnimationClip::transition("T_RUN_2_STAND", 0.3, "S_RUN"));
        let mut visual = VisualCharacter::with_library(Arc::new(library));
        let run = visual.find_clip("S_RUN").unwrap();
        visual.play_clip(run);

        let mut controller = locomotion();
        let outcome =
            controller.try_transition_to(&mut visual, "S_SIT", ClipIntent::Settle(LocomotionPhase::Idle));

        assert_eq!(outcome, TransitionOutcome::Started);
        assert_eq!(visual.playing_clip_name(), Some("T_RUN_2_STAND"));
        assert!(matches!(
            controller.phase(),
            Some(LocomotionPhase::Transitioning { to_clip, .. }) if to_clip == "S_SIT"
        ));
    }

    #[test]
    fn test_does_state_exist() {
        let mut controller = locomotion();
        let visual = humanoid_visual();

        assert!(controller.does_state_exist(&visual, "L"));
        assert!(!controller.does_state_exist(&visual, "BL"));

        controller.state.gait = crate::animation::Gait::Walk;
        assert!(controller.does_state_exist(&visual, "BL"));
        assert!(controller.is_standing(&visual_playing("S_WALK")));
    }

    #[test]
    fn test_foreign_clip_with_suffix_is_not_standing() {
        let mut controller = locomotion();

        // Клип чужой стойки: фаза неизвестна, решает разбор имени
        let moving = visual_playing("S_1HRUNL");
        controller.reconcile_phase(&moving);
        assert_eq!(controller.phase(), None);
        assert!(!controller.is_standing(&moving));

        let idle = visual_playing("S_1HRUN");
        controller.reconcile_phase(&idle);
        assert_eq!(controller.phase(), None);
        assert!(controller.is_standing(&idle));

        let sneaking = visual_playing("S_1HSNEAK");
        controller.reconcile_phase(&sneaking);
        assert!(!controller.is_standing(&sneaking));
    }
}
