//! Командная поверхность локомоции (AI / игрок / скрипты)
//!
//! Все команды возвращают bool: false = отказ (gate закрыт, клипа нет, и т.п.),
//! это нормальная ситуация, а не ошибка. Команды меняют намерения и запускают
//! клипы, движение происходит в `advance()`.

use bevy::prelude::*;

use crate::animation::naming::{
    build_state_animation_name, parse_state_name, strafe_animation_name, Gait, StrafeSide,
    WeaponPosture,
    JUMP_BACK_TRANSITION, JUMP_STATE, STAND_STATE, SUFFIX_BACKWARD, SUFFIX_FORWARD, SUFFIX_IDLE,
};
use crate::animation::AnimationSurface;
use crate::logger::{log, log_warning};
use crate::world::WorldObjectResolver;

use super::controller::CharacterLocomotion;
use super::gate::TransitionOutcome;
use super::state::{ClipIntent, LocomotionPhase, TurnIntent};

/// Команда локомоции (ECS форма: `LocomotionIntent`)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum LocomotionCommand {
    GoForward,
    GoBackward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    StopTurning,
    StopMoving,
    Jump,
    ChangeGait(Gait),
    ChangeWeaponPosture(WeaponPosture),
    ToggleWalking,
    ToggleSneaking,
    ToggleMeleeWeapon,
    /// Имя waypoint/freepoint
    Teleport(String),
    InstantTurnTo(Vec3),
    GotoPositionStraight(Vec3),
    /// Debug множитель скорости анимаций
    FastMove(f32),
}

/// Всё, что нужно команде кроме самого контроллера
pub struct CommandContext<'a> {
    pub transform: &'a mut Transform,
    pub visual: &'a mut dyn AnimationSurface,
    pub world: &'a dyn WorldObjectResolver,
}

impl CharacterLocomotion {
    pub fn go_forward(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        let moving = ClipIntent::Settle(LocomotionPhase::Moving(self.state.gait));
        self.try_transition_to_state(visual, SUFFIX_FORWARD, moving)
            .is_success()
    }

    /// Назад: своё состояние BL, если есть, иначе отскок T_JUMPB
    pub fn go_backward(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        if self.does_state_exist(&*visual, SUFFIX_BACKWARD) {
            let moving = ClipIntent::Settle(LocomotionPhase::Moving(self.state.gait));
            return self
                .try_transition_to_state(visual, SUFFIX_BACKWARD, moving)
                .is_success();
        }

        if !self.is_switch_allowed(&*visual) {
            return false;
        }

        self.try_play_transition_animation_to(visual, JUMP_BACK_TRANSITION, ClipIntent::Transient)
            .is_success()
    }

    pub fn strafe_left(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        self.strafe(visual, StrafeSide::Left)
    }

    pub fn strafe_right(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        self.strafe(visual, StrafeSide::Right)
    }

    fn strafe(&mut self, visual: &mut dyn AnimationSurface, side: StrafeSide) -> bool {
        if !self.is_switch_allowed(&*visual) {
            return false;
        }

        let anim = strafe_animation_name(self.state.gait, side);
        let moving = ClipIntent::Settle(LocomotionPhase::Moving(self.state.gait));
        self.try_play_transition_animation_to(visual, &anim, moving)
            .is_success()
    }

    pub fn turn_left(&mut self) -> bool {
        self.set_turn_intent(TurnIntent::Left)
    }

    pub fn turn_right(&mut self) -> bool {
        self.set_turn_intent(TurnIntent::Right)
    }

    pub fn stop_turning(&mut self) -> bool {
        self.state.turn_intent = TurnIntent::None;
        true
    }

    fn set_turn_intent(&mut self, intent: TurnIntent) -> bool {
        if !self.is_turning_allowed() {
            return false;
        }

        self.state.turn_intent = intent;
        true
    }

    /// Idle текущей стойки/походки, иначе "STAND" (на него ссылаются T_JUMP_2_STAND и др.)
    pub fn stop_moving(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        let idle = ClipIntent::Settle(LocomotionPhase::Idle);

        if self
            .try_transition_to_state(visual, SUFFIX_IDLE, idle.clone())
            .is_success()
        {
            return true;
        }

        self.try_play_transition_animation_to(visual, STAND_STATE, idle)
            .is_success()
    }

    pub fn jump(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        if !self.is_switch_allowed(&*visual) || self.state.is_airborne {
            return false;
        }

        self.try_play_transition_animation_to(visual, JUMP_STATE, ClipIntent::Transient)
            .is_success()
    }

    /// Переход в idle целевой походки, походка меняется только при успехе
    pub fn change_gait(&mut self, visual: &mut dyn AnimationSurface, target: Gait) -> bool {
        let anim = build_state_animation_name(self.state.weapon_posture, target, SUFFIX_IDLE);

        let changed = self
            .try_transition_to(visual, &anim, ClipIntent::Settle(LocomotionPhase::Idle))
            .is_success();

        if changed {
            self.state.gait = target;
        }

        changed
    }

    /// Смена стойки оружия
    ///
    /// Без модели стойка просто принимается (скрипты ставят стойку до `set_visual`).
    /// Нет перехода при открытом gate → alias из таблицы, проигрывается принудительно.
    /// Нет подходящего alias → отказ, стойка не меняется.
    pub fn change_weapon_posture(
        &mut self,
        visual: &mut dyn AnimationSurface,
        target: WeaponPosture,
    ) -> bool {
        if !visual.has_visual() {
            self.state.weapon_posture = target;
            return true;
        }

        let anim = build_state_animation_name(target, self.state.gait, SUFFIX_IDLE);

        match self.try_transition_to(visual, &anim, ClipIntent::Settle(LocomotionPhase::Idle)) {
            TransitionOutcome::Started | TransitionOutcome::AlreadyPlaying => {
                self.state.weapon_posture = target;
                true
            }
            TransitionOutcome::NoClip => self.play_posture_alias(visual, target),
            TransitionOutcome::GateClosed | TransitionOutcome::NoVisual => false,
        }
    }

    /// Alias принимается, только если его цепочка клипов заканчивается
    /// в idle целевой стойки (походка берётся из этого idle)
    fn play_posture_alias(
        &mut self,
        visual: &mut dyn AnimationSurface,
        target: WeaponPosture,
    ) -> bool {
        let Some(alias) = self
            .posture_aliases
            .lookup(self.state.weapon_posture, target)
            .map(str::to_string)
        else {
            return false;
        };

        let Some(clip) = visual.find_clip(&alias) else {
            return false;
        };

        let Some(settled) = visual.settled_clip_name(clip) else {
            return false;
        };

        let gait = match parse_state_name(&settled) {
            Some((posture, gait, SUFFIX_IDLE)) if posture == target => gait,
            _ => {
                log(&format!(
                    "[Locomotion] {}: posture alias {} ends in {}, not in {:?} idle",
                    self.name, alias, settled, target
                ));
                return false;
            }
        };

        let playing_now = visual.playing_clip_name().map(str::to_string);
        visual.play_clip(clip);
        self.tracker.record_started(
            playing_now.as_deref(),
            &alias,
            &settled,
            ClipIntent::Transient,
        );
        self.state.weapon_posture = target;
        self.state.gait = gait;

        true
    }

    /// Run ↔ Walk, из Sneak в Run
    pub fn toggle_walking(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        let target = match self.state.gait {
            Gait::Run => Gait::Walk,
            Gait::Walk | Gait::Sneak => Gait::Run,
        };
        self.change_gait(visual, target)
    }

    /// Run/Walk → Sneak, Sneak → Run
    pub fn toggle_sneaking(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        let target = match self.state.gait {
            Gait::Run | Gait::Walk => Gait::Sneak,
            Gait::Sneak => Gait::Run,
        };
        self.change_gait(visual, target)
    }

    /// Без оружия → кулаки, с любым оружием → убрать
    pub fn toggle_melee_weapon(&mut self, visual: &mut dyn AnimationSurface) -> bool {
        let target = match self.state.weapon_posture {
            WeaponPosture::Unarmed => WeaponPosture::Fist,
            _ => WeaponPosture::Unarmed,
        };
        self.change_weapon_posture(visual, target)
    }

    /// Переставить персонажа на именованную точку мира
    ///
    /// Неизвестная точка — warning и отказ (в legacy скриптах есть битые waypoints).
    pub fn teleport(
        &mut self,
        transform: &mut Transform,
        world: &dyn WorldObjectResolver,
        waypoint: &str,
    ) -> bool {
        let Some(anchor) = world.find_by_name(waypoint) else {
            log_warning(&format!(
                "[Locomotion] Teleport failed, waypoint doesn't exist: {}",
                waypoint
            ));
            return false;
        };

        transform.translation = anchor.translation;

        // Ориентация точки, но персонаж смотрит горизонтально
        let mut forward = anchor.forward().as_vec3();
        forward.y = 0.0;
        if let Ok(direction) = Dir3::new(forward) {
            transform.look_to(direction, Vec3::Y);
        }

        true
    }

    /// Мгновенно повернуться к точке (на своей высоте, персонаж остаётся вертикальным)
    pub fn instant_turn_to(&mut self, transform: &mut Transform, position: Vec3) -> bool {
        let target = Vec3::new(position.x, transform.translation.y, position.z);

        if target.distance_squared(transform.translation) > f32::EPSILON {
            transform.look_at(target, Vec3::Y);
        }

        true
    }

    /// Повернуться к точке и идти вперёд. true — уже на месте.
    pub fn goto_position_straight(
        &mut self,
        transform: &mut Transform,
        visual: &mut dyn AnimationSurface,
        position: Vec3,
    ) -> bool {
        self.instant_turn_to(transform, position);
        self.go_forward(visual);

        self.is_at_position(transform, position)
    }

    pub fn is_at_position(&self, transform: &Transform, position: Vec3) -> bool {
        transform.translation.distance(position) < self.config.arrival_tolerance
    }

    pub fn fast_move(&mut self, visual: &mut dyn AnimationSurface, factor: f32) -> bool {
        visual.set_speed_factor(factor);
        true
    }

    /// Выполнить команду из ECS intent'а
    pub fn execute(&mut self, command: &LocomotionCommand, ctx: &mut CommandContext<'_>) -> bool {
        match command {
            LocomotionCommand::GoForward => self.go_forward(ctx.visual),
            LocomotionCommand::GoBackward => self.go_backward(ctx.visual),
            LocomotionCommand::StrafeLeft => self.strafe_left(ctx.visual),
            LocomotionCommand::StrafeRight => self.strafe_right(ctx.visual),
            LocomotionCommand::TurnLeft => self.turn_left(),
            LocomotionCommand::TurnRight => self.turn_right(),
            LocomotionCommand::StopTurning => self.stop_turning(),
            LocomotionCommand::StopMoving => self.stop_moving(ctx.visual),
            LocomotionCommand::Jump => self.jump(ctx.visual),
            LocomotionCommand::ChangeGait(gait) => self.change_gait(ctx.visual, *gait),
            LocomotionCommand::ChangeWeaponPosture(posture) => {
                self.change_weapon_posture(ctx.visual, *posture)
            }
            LocomotionCommand::ToggleWalking => self.toggle_walking(ctx.visual),
            LocomotionCommand::ToggleSneaking => self.toggle_sneaking(ctx.visual),
            LocomotionCommand::ToggleMeleeWeapon => self.toggle_melee_weapon(ctx.visual),
            LocomotionCommand::Teleport(waypoint) => {
                self.teleport(ctx.transform, ctx.world, waypoint)
            }
            LocomotionCommand::InstantTurnTo(position) => {
                self.instant_turn_to(ctx.transform, *position)
            }
            LocomotionCommand::GotoPositionStraight(position) => {
                self.goto_position_straight(ctx.transform, ctx.visual, *position)
            }
            LocomotionCommand::FastMove(factor) => self.fast_move(ctx.visual, *factor),
        }
    }
}
