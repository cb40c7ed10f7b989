//! Общие хелперы для unit-тестов локомоции

use bevy::prelude::*;
use std::sync::Arc;

use crate::animation::{
    AnimationClip, AnimationLibrary, AnimationSurface, VisualCharacter, shared_humanoid_library,
};
use crate::config::LocomotionConfig;
use crate::physics::{CollisionFlags, GroundPlaneMover, PhysicsMover};

use super::controller::{CharacterBody, CharacterLocomotion};

pub const DT: f32 = 1.0 / 60.0;

/// Mover, который запоминает смещения и отвечает заданным контактом
#[derive(Debug, Default)]
pub struct RecordingMover {
    pub submissions: Vec<Vec3>,
    pub grounded: bool,
}

impl RecordingMover {
    pub fn grounded() -> Self {
        Self {
            submissions: Vec::new(),
            grounded: true,
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }
}

impl PhysicsMover for RecordingMover {
    fn move_character(&mut self, transform: &mut Transform, displacement: Vec3) -> CollisionFlags {
        self.submissions.push(displacement);
        transform.translation += displacement;
        CollisionFlags { down: self.grounded }
    }
}

pub fn locomotion() -> CharacterLocomotion {
    CharacterLocomotion::new("Test", LocomotionConfig::default())
}

pub fn humanoid_visual() -> VisualCharacter {
    VisualCharacter::with_library(shared_humanoid_library())
}

/// Визуал с уже играющим клипом `name`
pub fn visual_playing(name: &str) -> VisualCharacter {
    let mut visual = humanoid_visual();
    if let Some(clip) = visual.find_clip(name) {
        visual.play_clip(clip);
    }
    visual
}

/// Humanoid + посторонний клип (катсцена/реакция), о котором контроллер не знает
pub fn visual_with_external_clip(name: &str, interruptible: bool) -> VisualCharacter {
    let mut library = crate::animation::humanoid_library();
    library.add(
        AnimationClip::transition(name, 1.0, "S_RUN").with_interruptible(interruptible),
    );

    let mut visual = VisualCharacter::with_library(Arc::new(library));
    if let Some(clip) = visual.find_clip(name) {
        visual.play_clip(clip);
    }
    visual
}

pub fn library_without(excluded: &[&str]) -> Arc<AnimationLibrary> {
    let source = crate::animation::humanoid_library();
    let mut library = AnimationLibrary::new();

    for index in 0..source.len() {
        if let Some(clip) = source.clip(crate::animation::ClipId(index)) {
            if !excluded.contains(&clip.name.as_str()) {
                library.add(clip.clone());
            }
        }
    }

    Arc::new(library)
}

/// Один тик: время анимации, затем контроллер (как в FixedUpdate)
pub fn tick(
    controller: &mut CharacterLocomotion,
    transform: &mut Transform,
    visual: &mut VisualCharacter,
    mover: &mut dyn PhysicsMover,
    viewpoint: Option<Vec3>,
) {
    visual.advance(DT);
    let mut body = CharacterBody {
        transform,
        visual,
        mover,
    };
    controller.advance(&mut body, viewpoint, DT);
}

pub fn tick_on_ground(
    controller: &mut CharacterLocomotion,
    transform: &mut Transform,
    visual: &mut VisualCharacter,
) {
    let mut mover = GroundPlaneMover::default();
    tick(controller, transform, visual, &mut mover, None);
}
