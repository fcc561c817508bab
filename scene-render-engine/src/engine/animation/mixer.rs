use bevy::animation::graph::{AnimationGraph, AnimationGraphHandle, AnimationNodeIndex};
use bevy::animation::{AnimationClip, AnimationPlayer};
use bevy::prelude::*;

use crate::engine::systems::frame_clock::FrameClock;

/// One looping clip bound to the mixer.
#[derive(Debug, Clone, PartialEq)]
pub struct MixerClip {
    pub node: AnimationNodeIndex,
    pub duration: f32,
}

impl MixerClip {
    /// Position inside the clip for a given mixer time; clips repeat.
    pub fn local_time(&self, mixer_time: f32) -> f32 {
        if self.duration > 0.0 {
            mixer_time.rem_euclid(self.duration)
        } else {
            0.0
        }
    }
}

/// Playback state of the loaded model's animations.
#[derive(Debug, Clone)]
pub struct MixerHandle {
    pub player: Entity,
    pub clips: Vec<MixerClip>,
    time: f32,
}

impl MixerHandle {
    pub fn new(player: Entity, clips: Vec<MixerClip>) -> Self {
        Self {
            player,
            clips,
            time: 0.0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

/// Animation mixer, explicit about whether the model has arrived yet.
///
/// Bevy's own player clock is paused on every clip; the mixer owns time and
/// seeks each clip once per tick, so playback follows the frame loop delta.
#[derive(Resource, Debug, Clone, Default)]
pub enum AnimationMixer {
    #[default]
    NotLoaded,
    Loaded(MixerHandle),
}

impl AnimationMixer {
    pub fn is_loaded(&self) -> bool {
        matches!(self, AnimationMixer::Loaded(_))
    }

    /// Advances playback; does nothing before the model load completes.
    pub fn advance(&mut self, delta: f32) -> Option<&MixerHandle> {
        match self {
            AnimationMixer::NotLoaded => None,
            AnimationMixer::Loaded(handle) => {
                handle.time += delta.max(0.0);
                Some(handle)
            }
        }
    }
}

/// Graph built from the model's clips, waiting for the scene's player entity.
#[derive(Resource, Debug, Clone)]
pub struct PendingAnimations {
    pub graph: Handle<AnimationGraph>,
    pub clips: Vec<(AnimationNodeIndex, Handle<AnimationClip>)>,
}

impl PendingAnimations {
    pub fn from_clips(
        clips: Vec<Handle<AnimationClip>>,
        graphs: &mut Assets<AnimationGraph>,
    ) -> Self {
        let (graph, nodes) = AnimationGraph::from_clips(clips.iter().cloned());
        Self {
            graph: graphs.add(graph),
            clips: nodes.into_iter().zip(clips).collect(),
        }
    }
}

/// Bind the mixer to the first animation player the model scene spawns.
pub fn bind_animation_player(
    mut commands: Commands,
    pending: Option<Res<PendingAnimations>>,
    mut players: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
    clips: Res<Assets<AnimationClip>>,
    mut mixer: ResMut<AnimationMixer>,
) {
    let Some(pending) = pending else {
        return;
    };
    if mixer.is_loaded() {
        return;
    }
    let Some((entity, mut player)) = players.iter_mut().next() else {
        return;
    };

    let mut bound = Vec::with_capacity(pending.clips.len());
    for (node, clip) in &pending.clips {
        player.play(*node).repeat().pause();
        let duration = clips.get(clip).map_or(0.0, |clip| clip.duration());
        bound.push(MixerClip {
            node: *node,
            duration,
        });
    }

    commands
        .entity(entity)
        .insert(AnimationGraphHandle(pending.graph.clone()));
    commands.remove_resource::<PendingAnimations>();

    info!("Animation mixer bound with {} clip(s)", bound.len());
    *mixer = AnimationMixer::Loaded(MixerHandle::new(entity, bound));
}

/// Frame loop step: advance the mixer by this tick's delta.
pub fn advance_mixer(
    clock: Res<FrameClock>,
    mut mixer: ResMut<AnimationMixer>,
    mut players: Query<&mut AnimationPlayer>,
) {
    let Some(handle) = mixer.advance(clock.delta()) else {
        return;
    };
    let Ok(mut player) = players.get_mut(handle.player) else {
        return;
    };

    for clip in &handle.clips {
        if let Some(active) = player.animation_mut(clip.node) {
            active.seek_to(clip.local_time(handle.time()));
        }
    }
}
