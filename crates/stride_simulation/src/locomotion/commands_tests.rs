//! Tests for locomotion commands.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::sync::Arc;

    use crate::animation::{
        AnimationClip, AnimationSurface, Gait, PostureAliasTable, VisualCharacter, WeaponPosture,
    };
    use crate::locomotion::commands::{CommandContext, LocomotionCommand};
    use crate::locomotion::state::{LocomotionPhase, TurnIntent};
    use crate::locomotion::test_support::{
        humanoid_visual, library_without, locomotion, tick_on_ground, visual_playing,
    };
    use crate::world::WaypointRegistry;

    /// Дать переходу доиграть
    fn settle(visual: &mut VisualCharacter) {
        visual.advance(0.5);
    }

    #[test]
    fn test_go_forward_moves_character() {
        let mut controller = locomotion();
        let mut transform = Transform::default();
        let mut visual = visual_playing("S_RUN");

        assert!(controller.go_forward(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("T_RUN_2_RUNL"));

        for _ in 0..60 {
            tick_on_ground(&mut controller, &mut transform, &mut visual);
        }

        assert_eq!(visual.playing_clip_name(), Some("S_RUNL"));
        assert_eq!(controller.phase(), Some(&LocomotionPhase::Moving(Gait::Run)));
        // Forward = -Z, бег 4 м/с минус время перехода
        assert!(transform.translation.z < -2.5, "pos = {:?}", transform.translation);
        assert!(transform.translation.x.abs() < 1e-4);
        assert_eq!(transform.translation.y, 0.0);
    }

    #[test]
    fn test_go_backward_uses_jump_back_without_state() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_RUN");

        assert!(controller.go_backward(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("T_JUMPB"));
    }

    #[test]
    fn test_go_backward_uses_backward_state_when_present() {
        let mut controller = locomotion();
        controller.state.gait = Gait::Walk;
        let mut visual = visual_playing("S_WALK");

        assert!(controller.go_backward(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("S_WALKBL"));
        assert_eq!(controller.phase(), Some(&LocomotionPhase::Moving(Gait::Walk)));
    }

    #[test]
    fn test_strafe_uses_gait_clip() {
        let mut controller = locomotion();
        controller.state.gait = Gait::Sneak;
        let mut visual = visual_playing("S_SNEAK");

        assert!(controller.strafe_right(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("T_SNEAKSTRAFER"));

        assert!(controller.strafe_left(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("T_SNEAKSTRAFEL"));
    }

    #[test]
    fn test_turn_intent_is_sticky() {
        let mut controller = locomotion();

        assert!(controller.turn_left());
        assert_eq!(controller.state().turn_intent, TurnIntent::Left);
        assert!(controller.turn_right());
        assert_eq!(controller.state().turn_intent, TurnIntent::Right);
        assert!(controller.stop_turning());
        assert_eq!(controller.state().turn_intent, TurnIntent::None);
    }

    #[test]
    fn test_stop_moving_returns_to_idle() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_RUNL");

        assert!(controller.stop_moving(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("T_RUNL_2_RUN"));

        settle(&mut visual);
        assert_eq!(visual.playing_clip_name(), Some("S_RUN"));
        assert!(controller.is_switch_allowed(&visual));
        assert_eq!(controller.phase(), Some(&LocomotionPhase::Idle));
    }

    #[test]
    fn test_stop_moving_after_jump_goes_through_stand() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_JUMP");

        // Gate закрыт (прыжок), но "STAND" ведёт в T_JUMP_2_STAND
        assert!(controller.stop_moving(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("T_JUMP_2_STAND"));
    }

    #[test]
    fn test_jump() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_RUN");

        assert!(controller.jump(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("S_JUMP"));
        assert!(visual.is_playing_flying());

        // Прыжок нельзя прервать
        assert!(!controller.jump(&mut visual));
    }

    #[test]
    fn test_jump_refused_while_airborne() {
        let mut controller = locomotion();
        controller.state.is_airborne = true;
        let mut visual = visual_playing("S_RUN");

        assert!(!controller.jump(&mut visual));
        assert_eq!(visual.playing_clip_name(), Some("S_RUN"));
    }

    #[test]
    fn test_change_gait_commits_on_success() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_RUN");

        assert!(controller.change_gait(&mut visual, Gait::Walk));
        assert_eq!(controller.state().gait, Gait::Walk);
        assert_eq!(visual.playing_clip_name(), Some("T_RUN_2_WALK"));

        // Переход ещё играет
        assert!(!controller.change_gait(&mut visual, Gait::Sneak));
        assert_eq!(controller.state().gait, Gait::Walk);
    }

    #[test]
    fn test_change_gait_without_visual_fails() {
        let mut controller = locomotion();
        let mut visual = VisualCharacter::new();

        assert!(!controller.change_gait(&mut visual, Gait::Sneak));
        assert_eq!(controller.state().gait, Gait::Run);
    }

    #[test]
    fn test_posture_change_before_model_loads() {
        let mut controller = locomotion();
        let mut visual = VisualCharacter::new();

        assert!(controller.change_weapon_posture(&mut visual, WeaponPosture::Fist));
        assert_eq!(controller.state().weapon_posture, WeaponPosture::Fist);
    }

    #[test]
    fn test_posture_change_plays_draw_transition() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_RUN");

        assert!(controller.change_weapon_posture(&mut visual, WeaponPosture::OneHanded));
        assert_eq!(controller.state().weapon_posture, WeaponPosture::OneHanded);
        assert_eq!(visual.playing_clip_name(), Some("T_RUN_2_1HRUN"));

        settle(&mut visual);
        assert_eq!(visual.playing_clip_name(), Some("S_1HRUN"));
    }

    #[test]
    fn test_posture_change_refused_while_gate_closed() {
        let mut controller = locomotion();
        let mut visual = visual_playing("T_RUN_2_RUNL");

        assert!(!controller.change_weapon_posture(&mut visual, WeaponPosture::Bow));
        assert_eq!(controller.state().weapon_posture, WeaponPosture::Unarmed);
    }

    /// Модель без S_RUN, но с клипом "убрать 1H оружие" в walk idle
    fn visual_with_holster_clip() -> VisualCharacter {
        let mut library = (*library_without(&["S_RUN"])).clone();
        library.add(AnimationClip::transition("T_1HRUN_HOLSTER", 0.3, "S_WALK"));

        let mut visual = VisualCharacter::with_library(Arc::new(library));
        let armed = visual.find_clip("S_1HRUN").unwrap();
        visual.play_clip(armed);
        visual
    }

    #[test]
    fn test_posture_change_falls_back_to_alias() {
        let aliases = PostureAliasTable::new().with(
            WeaponPosture::OneHanded,
            WeaponPosture::Unarmed,
            "T_1HRUN_HOLSTER",
        );
        let mut controller = locomotion().with_posture_aliases(aliases);
        controller.state.weapon_posture = WeaponPosture::OneHanded;
        let mut visual = visual_with_holster_clip();

        assert!(controller.change_weapon_posture(&mut visual, WeaponPosture::Unarmed));
        assert_eq!(controller.state().weapon_posture, WeaponPosture::Unarmed);
        assert_eq!(controller.state().gait, Gait::Walk);
        assert_eq!(visual.playing_clip_name(), Some("T_1HRUN_HOLSTER"));
        assert!(matches!(
            controller.phase(),
            Some(LocomotionPhase::Transitioning { to_clip, .. }) if to_clip == "S_WALK"
        ));

        // Клип доиграл: стойка и клип совпадают, фаза сошлась в idle
        settle(&mut visual);
        assert!(controller.is_switch_allowed(&visual));
        assert_eq!(visual.playing_clip_name(), Some("S_WALK"));
        assert_eq!(controller.phase(), Some(&LocomotionPhase::Idle));
        assert!(controller.is_standing(&visual));
    }

    #[test]
    fn test_posture_alias_ending_in_other_posture_is_rejected() {
        // Клип "достать" заканчивается в S_1HRUN, а не в idle без оружия
        let aliases = PostureAliasTable::new().with(
            WeaponPosture::OneHanded,
            WeaponPosture::Unarmed,
            "T_RUN_2_1HRUN",
        );
        let mut controller = locomotion().with_posture_aliases(aliases);
        controller.state.weapon_posture = WeaponPosture::OneHanded;
        let mut visual = visual_with_holster_clip();

        assert!(!controller.change_weapon_posture(&mut visual, WeaponPosture::Unarmed));
        assert_eq!(controller.state().weapon_posture, WeaponPosture::OneHanded);
        assert_eq!(controller.state().gait, Gait::Run);
        assert_eq!(visual.playing_clip_name(), Some("S_1HRUN"));
    }

    #[test]
    fn test_posture_change_without_alias_fails() {
        let mut controller = locomotion();
        controller.state.weapon_posture = WeaponPosture::OneHanded;
        let mut visual = VisualCharacter::with_library(library_without(&["S_RUN"]));
        let armed = visual.find_clip("S_1HRUN").unwrap();
        visual.play_clip(armed);

        assert!(!controller.change_weapon_posture(&mut visual, WeaponPosture::Unarmed));
        assert_eq!(controller.state().weapon_posture, WeaponPosture::OneHanded);
        assert_eq!(visual.playing_clip_name(), Some("S_1HRUN"));
    }

    #[test]
    fn test_toggles() {
        let mut controller = locomotion();
        let mut visual = visual_playing("S_RUN");

        assert!(controller.toggle_walking(&mut visual));
        assert_eq!(controller.state().gait, Gait::Walk);
        settle(&mut visual);

        assert!(controller.toggle_sneaking(&mut visual));
        assert_eq!(controller.state().gait, Gait::Sneak);
        settle(&mut visual);

        assert!(controller.toggle_walking(&mut visual));
        assert_eq!(controller.state().gait, Gait::Run);
        settle(&mut visual);

        assert!(controller.toggle_melee_weapon(&mut visual));
        assert_eq!(controller.state().weapon_posture, WeaponPosture::Fist);
        settle(&mut visual);

        assert!(controller.toggle_melee_weapon(&mut visual));
        assert_eq!(controller.state().weapon_posture, WeaponPosture::Unarmed);
    }

    #[test]
    fn test_teleport_to_unknown_waypoint_is_noop() {
        let mut controller = locomotion();
        let registry = WaypointRegistry::new();
        let mut transform = Transform::from_xyz(1.0, 2.0, 3.0);
        let before = transform;

        assert!(!controller.teleport(&mut transform, &registry, "WP_NOWHERE"));
        assert_eq!(transform, before);
    }

    #[test]
    fn test_teleport_keeps_character_upright() {
        let mut controller = locomotion();
        let mut registry = WaypointRegistry::new();
        registry.insert(
            "WP_TOWER",
            Transform::from_xyz(5.0, 2.0, 5.0).looking_to(Vec3::new(1.0, -1.0, 0.0), Vec3::Y),
        );
        let mut transform = Transform::default();

        assert!(controller.teleport(&mut transform, &registry, "wp_tower"));
        assert_eq!(transform.translation, Vec3::new(5.0, 2.0, 5.0));

        let forward = transform.forward();
        assert!((forward.x - 1.0).abs() < 1e-4, "forward = {:?}", forward);
        assert!(forward.y.abs() < 1e-4);
    }

    #[test]
    fn test_instant_turn_ignores_height() {
        let mut controller = locomotion();
        let mut transform = Transform::from_xyz(0.0, 1.0, 0.0);

        assert!(controller.instant_turn_to(&mut transform, Vec3::new(10.0, 8.0, 0.0)));

        let forward = transform.forward();
        assert!((forward.x - 1.0).abs() < 1e-4, "forward = {:?}", forward);
        assert!((transform.up().y - 1.0).abs() < 1e-4);

        // Цель в той же точке — ориентация не меняется
        let before = transform.rotation;
        controller.instant_turn_to(&mut transform, Vec3::new(0.0, -3.0, 0.0));
        assert_eq!(transform.rotation, before);
    }

    #[test]
    fn test_goto_position_straight() {
        let mut controller = locomotion();
        let mut transform = Transform::default();
        let mut visual = visual_playing("S_RUN");

        assert!(!controller.goto_position_straight(&mut transform, &mut visual, Vec3::new(0.0, 0.0, 10.0)));
        assert_eq!(visual.playing_clip_name(), Some("T_RUN_2_RUNL"));
        assert!((transform.forward().z - 1.0).abs() < 1e-4);

        assert!(controller.is_at_position(&transform, Vec3::new(0.3, 0.0, 0.0)));
        assert!(!controller.is_at_position(&transform, Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_fast_move_sets_speed_factor() {
        let mut controller = locomotion();
        let mut visual = humanoid_visual();

        assert!(controller.fast_move(&mut visual, 3.0));
        assert_eq!(visual.speed_factor(), 3.0);
    }

    #[test]
    fn test_execute_dispatches_commands() {
        let mut controller = locomotion();
        let mut registry = WaypointRegistry::new();
        registry.insert("WP_START", Transform::from_xyz(3.0, 0.0, 4.0));
        let mut transform = Transform::default();
        let mut visual = visual_playing("S_RUN");

        let mut ctx = CommandContext {
            transform: &mut transform,
            visual: &mut visual,
            world: &registry,
        };

        assert!(controller.execute(&LocomotionCommand::Teleport("WP_START".to_string()), &mut ctx));
        assert!(controller.execute(&LocomotionCommand::TurnLeft, &mut ctx));
        assert!(controller.execute(&LocomotionCommand::GoForward, &mut ctx));
        assert!(!controller.execute(&LocomotionCommand::Jump, &mut ctx));
        assert!(!controller.execute(&LocomotionCommand::Teleport("WP_MISSING".to_string()), &mut ctx));

        assert_eq!(transform.translation, Vec3::new(3.0, 0.0, 4.0));
        assert_eq!(controller.state().turn_intent, TurnIntent::Left);
    }
}
