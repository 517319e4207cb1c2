//! Tween scheduler
//!
//! Owns every running tween and advances them once per frame. At most one
//! tween drives a given [`TweenTarget`]: scheduling a new one replaces the
//! old, so the most recently started transition always wins.

use crate::tween::Tween;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct TweenId;
}

/// The animated property a tween writes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// Uniform scale of the gift-box model
    ModelScale,
    /// Y rotation of the gift-box model (radians)
    ModelRotationY,
    /// Uniform scale of the scan container overlay
    ContainerScale,
}

/// A value produced by one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenUpdate {
    pub id: TweenId,
    pub target: TweenTarget,
    pub value: f32,
    /// The tween reached its end this tick and has been removed
    pub finished: bool,
}

struct ScheduledTween {
    target: TweenTarget,
    tween: Tween,
}

/// The scheduler that ticks all active tweens
#[derive(Default)]
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, ScheduledTween>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween on `target`, replacing any tween already driving it
    pub fn add(&mut self, target: TweenTarget, tween: Tween) -> TweenId {
        self.replace(target, tween).0
    }

    /// Like [`add`](Self::add), also returning the id of the tween that was
    /// driving `target` before, if any
    pub fn replace(&mut self, target: TweenTarget, tween: Tween) -> (TweenId, Option<TweenId>) {
        let replaced = self.cancel_target(target);
        if let Some(replaced) = replaced {
            tracing::trace!(?target, ?replaced, "tween replaced");
        }
        (self.tweens.insert(ScheduledTween { target, tween }), replaced)
    }

    /// Stop whatever tween drives `target`
    pub fn cancel_target(&mut self, target: TweenTarget) -> Option<TweenId> {
        let id = self.id_for(target)?;
        self.tweens.remove(id);
        Some(id)
    }

    pub fn id_for(&self, target: TweenTarget) -> Option<TweenId> {
        self.tweens
            .iter()
            .find(|(_, scheduled)| scheduled.target == target)
            .map(|(id, _)| id)
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id).map(|scheduled| &scheduled.tween)
    }

    /// Advance every tween by `dt_ms`. Finished tweens report their final
    /// value once and are dropped.
    pub fn tick(&mut self, dt_ms: f32) -> SmallVec<[TweenUpdate; 4]> {
        let mut updates: SmallVec<[TweenUpdate; 4]> = SmallVec::new();
        for (id, scheduled) in self.tweens.iter_mut() {
            let finished = scheduled.tween.tick(dt_ms);
            updates.push(TweenUpdate {
                id,
                target: scheduled.target,
                value: scheduled.tween.value(),
                finished,
            });
        }
        for update in updates.iter().filter(|u| u.finished) {
            self.tweens.remove(update.id);
        }
        updates
    }

    /// Check if any tweens are still running
    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
