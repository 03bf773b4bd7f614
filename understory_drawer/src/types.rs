// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types shared by the drawer controller and its host.

/// Screen edge a drawer slides in from.
///
/// The direction is fixed for the lifetime of a
/// [`DrawerController`](crate::DrawerController).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// The drawer is anchored to the left edge and opens towards `+x`.
    #[default]
    Left,
    /// The drawer is anchored to the right edge and opens towards `-x`.
    Right,
}

impl Direction {
    /// Sign of a translation that moves the panel towards its expanded position.
    #[must_use]
    pub fn opening_sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// Signed offset of a fully collapsed panel of the given extent.
    ///
    /// The panel is pushed off its own edge, so a left drawer sits at `-extent`.
    #[must_use]
    pub fn collapsed_offset(self, extent: f64) -> f64 {
        -self.opening_sign() * extent
    }
}

/// Discrete drawer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TransitionState {
    /// Fully open.
    Expanded,
    /// Fully closed.
    #[default]
    Collapsed,
    /// Being driven by a gesture, or settling after one.
    InTransition,
}

impl TransitionState {
    /// The settled state for an expanded flag.
    #[must_use]
    pub fn settled(expanded: bool) -> Self {
        if expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    /// `Some(expanded)` for settled states, `None` while in transition.
    #[must_use]
    pub fn as_expanded(self) -> Option<bool> {
        match self {
            Self::Expanded => Some(true),
            Self::Collapsed => Some(false),
            Self::InTransition => None,
        }
    }
}

/// Openness of the drawer while in transition: `0.0` is collapsed, `1.0` expanded.
///
/// A `TransitionPercent` can only be built from a finite value in `[0, 1]`.
///
/// ```
/// use understory_drawer::TransitionPercent;
///
/// assert_eq!(TransitionPercent::new(0.25).map(TransitionPercent::get), Some(0.25));
/// assert!(TransitionPercent::new(1.5).is_none());
/// assert!(TransitionPercent::new(f64::NAN).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct TransitionPercent(f64);

impl TransitionPercent {
    /// Fully collapsed.
    pub const ZERO: Self = Self(0.0);
    /// Fully expanded.
    pub const ONE: Self = Self(1.0);

    /// Returns `None` if `value` is NaN or lies outside `[0, 1]`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Self(value))
    }

    /// The raw fraction.
    #[must_use]
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// `1 - self`, which is always in range.
    #[must_use]
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }
}

/// Phase of a pan gesture sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The pointer moved while the gesture is live.
    Changed,
    /// The pointer was released.
    Ended,
}

/// Raw input from the host's pan recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Gesture phase.
    pub phase: GesturePhase,
    /// Signed translation along the drawer axis since the gesture began.
    pub translation: f64,
}

impl GestureSample {
    /// A `Changed` sample.
    #[must_use]
    pub fn changed(translation: f64) -> Self {
        Self {
            phase: GesturePhase::Changed,
            translation,
        }
    }

    /// An `Ended` sample.
    #[must_use]
    pub fn ended(translation: f64) -> Self {
        Self {
            phase: GesturePhase::Ended,
            translation,
        }
    }
}

/// Which of the drawer's two gesture affordances produced a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureSource {
    /// The external edge gesture that pulls a collapsed drawer open.
    Presenting,
    /// A swipe on the scrim or panel that pushes an expanded drawer closed.
    Background,
}

impl GestureSource {
    /// Whether progress is measured from the expanded end.
    ///
    /// A background swipe starts fully open, so its travel is subtracted from
    /// one and its release threshold is taken against `1 - percent`.
    #[must_use]
    pub fn is_inverse(self) -> bool {
        matches!(self, Self::Background)
    }

    /// Sign of the translations this source accepts for the given drawer edge.
    #[must_use]
    pub fn accepted_sign(self, direction: Direction) -> f64 {
        match self {
            Self::Presenting => direction.opening_sign(),
            Self::Background => -direction.opening_sign(),
        }
    }
}

/// Externally requested target: `Some(true)` to expand, `Some(false)` to
/// collapse, `None` for no pending request.
pub type DrawerRequest = Option<bool>;
