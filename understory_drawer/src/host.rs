// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering-layer interface.
//!
//! A renderer implements [`DrawerHost`] and hands it to the controller at
//! construction. Every time the drawer's presentation changes, the controller
//! calls [`DrawerHost::update`] with a [`DrawerFrame`] snapshot and a
//! [`Transition`] describing how to get there. For
//! [`Transition::Animated`], the renderer reports completion back through
//! [`DrawerController::complete_animation`](crate::DrawerController::complete_animation)
//! with the same [`AnimationId`].

use core::time::Duration;

use crate::types::{TransitionPercent, TransitionState};

/// Presentation snapshot of a drawer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerFrame {
    /// Discrete state.
    pub state: TransitionState,
    /// Openness while in transition.
    pub percent: Option<TransitionPercent>,
    /// Signed panel offset.
    pub offset: f64,
    /// Scrim opacity.
    pub dim_opacity: f64,
}

/// Identifies one settle animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub(crate) u64);

impl AnimationId {
    /// Raw counter value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// How a renderer should move to a new frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Jump to the frame.
    Immediate,
    /// Follow the pointer; a renderer may apply a very short smoothing step.
    Tracking,
    /// Animate over `duration`, then report `id` as complete.
    Animated {
        /// Animation to report back.
        id: AnimationId,
        /// Requested duration.
        duration: Duration,
    },
}

/// Rendering-layer collaborator of a [`DrawerController`](crate::DrawerController).
pub trait DrawerHost {
    /// Present `frame`.
    fn update(&mut self, frame: DrawerFrame, transition: Transition);
}

/// A host that presents nothing, for controllers that are only polled.
impl DrawerHost for () {
    fn update(&mut self, _frame: DrawerFrame, _transition: Transition) {}
}

impl<H: DrawerHost + ?Sized> DrawerHost for &mut H {
    fn update(&mut self, frame: DrawerFrame, transition: Transition) {
        (**self).update(frame, transition);
    }
}
