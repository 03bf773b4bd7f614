// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer transition state machine.
//!
//! [`DrawerController`] is the single owner of a drawer's openness. Two kinds
//! of driver feed it:
//!
//! - **Gestures**: [`on_gesture_changed`](DrawerController::on_gesture_changed)
//!   and [`on_gesture_ended`](DrawerController::on_gesture_ended), or
//!   [`handle_sample`](DrawerController::handle_sample) for whole samples.
//! - **Requests**: [`set_expanded`](DrawerController::set_expanded) and the
//!   helpers built on it.
//!
//! A live gesture always wins. Requests made while a gesture is driving the
//! percent are dropped, and the first accepted sample of a new gesture
//! cancels any settle animation still in flight.
//!
//! ## Lifecycle of a drag
//!
//! ```text
//!  Collapsed ──sample──▶ InTransition(p) ──release──▶ settle animation
//!      ▲                     │  ▲                          │
//!      │                     └──┘ sample                   │ complete_animation(id)
//!      └────────────── Collapsed / Expanded ◀──────────────┘
//! ```
//!
//! Subscribers hear about a change once, when the new state lands.

use core::time::Duration;

use crate::config::{ConfigError, DrawerConfig};
use crate::host::{AnimationId, DrawerFrame, DrawerHost, Transition};
use crate::observer::{Subscribers, SubscriptionId};
use crate::resolve::{resolve_dim_opacity, resolve_offset, snap_target};
use crate::types::{
    Direction, DrawerRequest, GesturePhase, GestureSample, GestureSource, TransitionPercent,
    TransitionState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Settle {
    id: AnimationId,
    target: bool,
}

/// Gesture- and request-driven drawer state.
///
/// See the [module docs](self) for the driver model.
///
/// ```
/// use core::time::Duration;
/// use understory_drawer::{Direction, DrawerConfig, DrawerController, GestureSource, TransitionState};
///
/// let config = DrawerConfig::new(Direction::Left).with_animation_duration(Duration::ZERO);
/// let mut drawer = DrawerController::new(config, ());
/// drawer.set_content_extent(300.0);
/// assert_eq!(drawer.resolved_offset(), -300.0);
///
/// // Drag a third of the way open and let go.
/// drawer.on_gesture_changed(100.0, 300.0, GestureSource::Presenting, true);
/// assert_eq!(drawer.state(), TransitionState::InTransition);
/// drawer.on_gesture_ended(false);
///
/// assert_eq!(drawer.is_expanded(), Some(true));
/// assert_eq!(drawer.resolved_offset(), 0.0);
/// ```
#[derive(Debug)]
pub struct DrawerController<H> {
    config: DrawerConfig,
    host: H,
    state: TransitionState,
    percent: Option<TransitionPercent>,
    /// Expanded flag of the last landed state.
    landed: bool,
    gesture: Option<GestureSource>,
    settling: Option<Settle>,
    next_animation: u64,
    extent: f64,
    subscribers: Subscribers,
}

impl<H: DrawerHost> DrawerController<H> {
    /// Creates a collapsed drawer.
    ///
    /// Out-of-range fractions in `config` are clamped; see
    /// [`DrawerConfig::sanitized`].
    pub fn new(config: DrawerConfig, host: H) -> Self {
        Self::with_valid_config(config.sanitized(), host)
    }

    /// Creates a collapsed drawer, rejecting an invalid `config`.
    pub fn try_new(config: DrawerConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config, host))
    }

    fn with_valid_config(config: DrawerConfig, host: H) -> Self {
        Self {
            config,
            host,
            state: TransitionState::Collapsed,
            percent: None,
            landed: false,
            gesture: None,
            settling: None,
            next_animation: 0,
            extent: 0.0,
            subscribers: Subscribers::new(),
        }
    }

    /// The sanitized configuration.
    #[must_use]
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Edge the drawer is anchored to.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    /// Current discrete state.
    #[must_use]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Openness while in transition, `None` otherwise.
    #[must_use]
    pub fn percent(&self) -> Option<TransitionPercent> {
        self.percent
    }

    /// `Some(expanded)` once settled, `None` while in transition.
    #[must_use]
    pub fn is_expanded(&self) -> Option<bool> {
        self.state.as_expanded()
    }

    /// Returns `true` while a gesture is driving the percent.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Returns `true` while a settle animation is outstanding.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settling.is_some()
    }

    /// Full width of the panel used for offsets.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.extent
    }

    /// Sets the panel width. Non-positive and non-finite values are ignored.
    ///
    /// While a settle animation is outstanding, the host receives the
    /// animation's target frame again under the same [`AnimationId`].
    pub fn set_content_extent(&mut self, extent: f64) {
        if !extent.is_finite() || extent <= 0.0 {
            log::debug!("drawer: ignoring content extent {extent}");
            return;
        }
        if self.extent == extent {
            return;
        }
        self.extent = extent;
        match self.settling {
            // Retarget the running animation so the host lands on the new geometry.
            Some(Settle { id, target }) => {
                let frame = self.settled_frame(target);
                let duration = self.config.animation_duration;
                self.host.update(frame, Transition::Animated { id, duration });
            }
            None => self.present(Transition::Immediate),
        }
    }

    /// The rendering host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The rendering host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the controller, returning its host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Registers a callback for landed expanded-state changes.
    pub fn subscribe(&mut self, callback: impl FnMut(bool) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Removes a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Signed panel offset for the current state.
    #[must_use]
    pub fn resolved_offset(&self) -> f64 {
        resolve_offset(self.state, self.percent, self.config.direction, self.extent)
    }

    /// Scrim opacity for the current state.
    #[must_use]
    pub fn resolved_dim_opacity(&self) -> f64 {
        resolve_dim_opacity(
            self.state,
            self.percent,
            self.config.max_dim_opacity,
            self.config.background_dimmed,
        )
    }

    /// Presentation snapshot of the current state.
    #[must_use]
    pub fn frame(&self) -> DrawerFrame {
        DrawerFrame {
            state: self.state,
            percent: self.percent,
            offset: self.resolved_offset(),
            dim_opacity: self.resolved_dim_opacity(),
        }
    }

    /// Feeds one drag sample.
    ///
    /// `delta` is the signed translation since the gesture began and
    /// `axis_length` the drawer's full extent. The sample is ignored when
    /// `axis_length` is not positive, when `delta` points against the sense
    /// `source` accepts, or when `|delta|` exceeds `axis_length`.
    ///
    /// A gesture can only start from the end its source pulls away from: a
    /// [`GestureSource::Presenting`] drag needs a drawer that is collapsed or
    /// collapsing, a [`GestureSource::Background`] swipe one that is expanded
    /// or expanding. Once live, samples from the other source are ignored.
    ///
    /// The first accepted sample starts a live gesture and cancels any settle
    /// animation. The host is updated with [`Transition::Tracking`] when
    /// `animated` is set, [`Transition::Immediate`] otherwise.
    pub fn on_gesture_changed(
        &mut self,
        delta: f64,
        axis_length: f64,
        source: GestureSource,
        animated: bool,
    ) {
        if !axis_length.is_finite() || axis_length <= 0.0 || !delta.is_finite() {
            log::trace!("drawer: dropping sample {delta} over {axis_length}");
            return;
        }
        match self.gesture {
            Some(live) if live != source => {
                log::trace!("drawer: {source:?} sample during {live:?} gesture");
                return;
            }
            None if source.is_inverse() != self.heading() => {
                log::trace!("drawer: {source:?} gesture cannot start from here");
                return;
            }
            _ => {}
        }
        if delta * source.accepted_sign(self.config.direction) < 0.0 {
            log::trace!("drawer: {source:?} sample {delta} opposes the drawer's travel");
            return;
        }
        let Some(raw) = TransitionPercent::new(delta.abs() / axis_length) else {
            log::trace!("drawer: sample {delta} overshoots extent {axis_length}");
            return;
        };
        let percent = if source.is_inverse() {
            raw.complement()
        } else {
            raw
        };

        if self.gesture.is_none() {
            if let Some(settle) = self.settling.take() {
                log::debug!("drawer: gesture takes over animation {}", settle.id.get());
            }
        }
        self.gesture = Some(source);
        self.extent = axis_length;
        self.state = TransitionState::InTransition;
        self.percent = Some(percent);
        self.present(if animated {
            Transition::Tracking
        } else {
            Transition::Immediate
        });
    }

    /// Releases the drag and settles according to the snap threshold.
    ///
    /// `inverse` selects how the threshold is read; see
    /// [`snap_target`]. Does nothing if no transition is in progress.
    pub fn on_gesture_ended(&mut self, inverse: bool) {
        let Some(percent) = self.percent else {
            return;
        };
        self.gesture = None;
        let target = snap_target(percent, inverse, self.config.snap_threshold);
        log::debug!(
            "drawer: released at {:.3} (inverse: {inverse}), settling {}",
            percent.get(),
            if target { "expanded" } else { "collapsed" }
        );
        self.set_expanded(target);
    }

    /// Dispatches a whole [`GestureSample`].
    ///
    /// `Changed` samples track live. An `Ended` sample applies its final
    /// translation and then releases with `source`'s inverse flag.
    pub fn handle_sample(&mut self, source: GestureSource, sample: GestureSample, axis_length: f64) {
        self.on_gesture_changed(sample.translation, axis_length, source, true);
        if sample.phase == GesturePhase::Ended {
            self.on_gesture_ended(source.is_inverse());
        }
    }

    /// Abandons a live gesture and settles back where it started.
    pub fn cancel_gesture(&mut self) {
        if self.gesture.take().is_some() {
            log::debug!("drawer: gesture cancelled");
            self.set_expanded(self.landed);
        }
    }

    /// Requests an animated move to the expanded or collapsed state.
    ///
    /// Ignored while a gesture is live. Requesting the state the drawer is
    /// already in, or already settling towards, does nothing.
    pub fn set_expanded(&mut self, target: bool) {
        if let Some(source) = self.gesture {
            log::debug!("drawer: request for {target} ignored during {source:?} gesture");
            return;
        }
        match self.settling {
            Some(settle) if settle.target == target => return,
            None if self.state.as_expanded() == Some(target) => return,
            _ => {}
        }

        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        self.settling = Some(Settle { id, target });

        let duration = self.config.animation_duration;
        if duration == Duration::ZERO {
            self.complete_animation(id);
            self.present(Transition::Immediate);
        } else {
            let frame = self.settled_frame(target);
            self.host.update(frame, Transition::Animated { id, duration });
        }
    }

    /// Applies an external [`DrawerRequest`]; `None` does nothing.
    pub fn apply_request(&mut self, request: DrawerRequest) {
        if let Some(target) = request {
            self.set_expanded(target);
        }
    }

    /// Flips the state the drawer is at or heading towards.
    pub fn toggle(&mut self) {
        self.set_expanded(!self.heading());
    }

    /// Handles a tap on the scrim.
    ///
    /// Returns `true` if the tap started a collapse.
    pub fn dismiss_from_background(&mut self) -> bool {
        if self.gesture.is_some() || !self.heading() {
            return false;
        }
        self.set_expanded(false);
        true
    }

    /// Completion signal for a settle animation.
    ///
    /// Lands the drawer in the animation's target state and notifies
    /// subscribers if the expanded flag changed. Returns `false` for an id
    /// that was cancelled or superseded.
    pub fn complete_animation(&mut self, id: AnimationId) -> bool {
        match self.settling {
            Some(settle) if settle.id == id => {
                self.settling = None;
                self.land(settle.target);
                true
            }
            _ => {
                log::debug!("drawer: ignoring stale completion {}", id.get());
                false
            }
        }
    }

    /// Expanded flag the drawer is settled at or settling towards.
    fn heading(&self) -> bool {
        self.settling.map_or(self.landed, |settle| settle.target)
    }

    fn land(&mut self, expanded: bool) {
        self.state = TransitionState::settled(expanded);
        self.percent = None;
        log::debug!("drawer: landed {:?}", self.state);
        if self.landed != expanded {
            self.landed = expanded;
            self.subscribers.notify(expanded);
        }
    }

    fn settled_frame(&self, expanded: bool) -> DrawerFrame {
        let state = TransitionState::settled(expanded);
        DrawerFrame {
            state,
            percent: None,
            offset: resolve_offset(state, None, self.config.direction, self.extent),
            dim_opacity: resolve_dim_opacity(
                state,
                None,
                self.config.max_dim_opacity,
                self.config.background_dimmed,
            ),
        }
    }

    fn present(&mut self, transition: Transition) {
        let frame = self.frame();
        self.host.update(frame, transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Debug, Default)]
    struct Recorder {
        updates: Vec<(DrawerFrame, Transition)>,
    }

    impl DrawerHost for Recorder {
        fn update(&mut self, frame: DrawerFrame, transition: Transition) {
            self.updates.push((frame, transition));
        }
    }

    impl Recorder {
        fn last_animation(&self) -> Option<AnimationId> {
            self.updates.iter().rev().find_map(|(_, t)| match t {
                Transition::Animated { id, .. } => Some(*id),
                _ => None,
            })
        }
    }

    fn instant(direction: Direction) -> DrawerController<Recorder> {
        let config = DrawerConfig::new(direction).with_animation_duration(Duration::ZERO);
        let mut drawer = DrawerController::new(config, Recorder::default());
        drawer.set_content_extent(200.0);
        drawer
    }

    fn animated() -> DrawerController<Recorder> {
        let mut drawer = DrawerController::new(DrawerConfig::default(), Recorder::default());
        drawer.set_content_extent(200.0);
        drawer
    }

    fn counter<H: DrawerHost>(drawer: &mut DrawerController<H>) -> Rc<RefCell<Vec<bool>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        drawer.subscribe(move |e| sink.borrow_mut().push(e));
        seen
    }

    #[test]
    fn starts_collapsed_without_percent() {
        let drawer = DrawerController::new(DrawerConfig::default(), ());
        assert_eq!(drawer.state(), TransitionState::Collapsed);
        assert_eq!(drawer.percent(), None);
        assert_eq!(drawer.is_expanded(), Some(false));
        assert!(!drawer.is_gesture_active());
    }

    #[test]
    fn accepted_sample_enters_transition() {
        let mut drawer = instant(Direction::Left);
        drawer.on_gesture_changed(50.0, 200.0, GestureSource::Presenting, true);

        assert_eq!(drawer.state(), TransitionState::InTransition);
        assert_eq!(drawer.percent().map(TransitionPercent::get), Some(0.25));
        assert!(drawer.is_gesture_active());
        assert_eq!(drawer.resolved_offset(), -150.0);
        let (frame, transition) = drawer.host().updates.last().copied().unwrap();
        assert_eq!(transition, Transition::Tracking);
        assert_eq!(frame.offset, -150.0);
    }

    #[test]
    fn non_animated_sample_presents_immediately() {
        let mut drawer = instant(Direction::Left);
        drawer.on_gesture_changed(50.0, 200.0, GestureSource::Presenting, false);
        let (_, transition) = drawer.host().updates.last().copied().unwrap();
        assert_eq!(transition, Transition::Immediate);
    }

    #[test]
    fn background_sample_measures_from_open_end() {
        let mut drawer = instant(Direction::Left);
        drawer.set_expanded(true);
        drawer.on_gesture_changed(-50.0, 200.0, GestureSource::Background, true);
        assert_eq!(drawer.percent().map(TransitionPercent::get), Some(0.75));
    }

    #[test]
    fn right_drawer_opens_with_negative_delta() {
        let mut drawer = instant(Direction::Right);
        drawer.on_gesture_changed(20.0, 200.0, GestureSource::Presenting, true);
        assert_eq!(drawer.state(), TransitionState::Collapsed);

        drawer.on_gesture_changed(-20.0, 200.0, GestureSource::Presenting, true);
        assert_eq!(drawer.percent().map(TransitionPercent::get), Some(0.1));
        assert_eq!(drawer.resolved_offset(), 180.0);
    }

    #[test]
    fn degenerate_axis_is_ignored() {
        let mut drawer = instant(Direction::Left);
        let before = drawer.host().updates.len();
        for axis in [0.0, -1.0, f64::NAN] {
            drawer.on_gesture_changed(10.0, axis, GestureSource::Presenting, true);
        }
        drawer.on_gesture_changed(f64::NAN, 200.0, GestureSource::Presenting, true);
        assert_eq!(drawer.state(), TransitionState::Collapsed);
        assert_eq!(drawer.host().updates.len(), before);
    }

    #[test]
    fn overshoot_keeps_previous_percent() {
        let mut drawer = instant(Direction::Left);
        drawer.on_gesture_changed(190.0, 200.0, GestureSource::Presenting, true);
        drawer.on_gesture_changed(260.0, 200.0, GestureSource::Presenting, true);
        assert_eq!(drawer.percent().map(TransitionPercent::get), Some(0.95));
    }

    #[test]
    fn gesture_end_without_transition_is_noop() {
        let mut drawer = instant(Direction::Left);
        let before = drawer.host().updates.len();
        drawer.on_gesture_ended(false);
        assert_eq!(drawer.state(), TransitionState::Collapsed);
        assert_eq!(drawer.host().updates.len(), before);
    }

    #[test]
    fn release_animates_then_lands_on_completion() {
        let mut drawer = animated();
        let seen = counter(&mut drawer);

        drawer.on_gesture_changed(60.0, 200.0, GestureSource::Presenting, true);
        drawer.on_gesture_ended(false);

        // Still showing the drag position until the host finishes animating.
        assert_eq!(drawer.state(), TransitionState::InTransition);
        assert!(drawer.is_settling());
        let (frame, transition) = drawer.host().updates.last().copied().unwrap();
        assert_eq!(frame.state, TransitionState::Expanded);
        assert_eq!(frame.offset, 0.0);
        let id = match transition {
            Transition::Animated { id, duration } => {
                assert_eq!(duration, crate::DEFAULT_ANIMATION_DURATION);
                id
            }
            other => panic!("expected an animated transition, got {other:?}"),
        };
        assert!(seen.borrow().is_empty());

        assert!(drawer.complete_animation(id));
        assert_eq!(drawer.state(), TransitionState::Expanded);
        assert_eq!(drawer.percent(), None);
        assert_eq!(*seen.borrow(), [true]);
        assert!(!drawer.complete_animation(id));
    }

    #[test]
    fn gesture_takes_over_in_flight_animation() {
        let mut drawer = animated();
        drawer.set_expanded(true);
        let stale = drawer.host().last_animation().unwrap();

        // The drawer is opening, so a swipe to close it may start.
        drawer.on_gesture_changed(-40.0, 200.0, GestureSource::Background, true);
        assert!(!drawer.is_settling());
        assert!(!drawer.complete_animation(stale));
        assert_eq!(drawer.state(), TransitionState::InTransition);
        assert_eq!(drawer.percent().map(TransitionPercent::get), Some(0.8));
    }

    #[test]
    fn gesture_must_start_from_its_resting_end() {
        let mut drawer = instant(Direction::Left);
        let before = drawer.host().updates.len();
        drawer.on_gesture_changed(-16.0, 200.0, GestureSource::Background, true);
        assert_eq!(drawer.state(), TransitionState::Collapsed);

        drawer.set_expanded(true);
        let before_open = drawer.host().updates.len();
        assert!(before_open > before);
        drawer.on_gesture_changed(0.0, 200.0, GestureSource::Presenting, true);
        assert_eq!(drawer.state(), TransitionState::Expanded);
        assert_eq!(drawer.host().updates.len(), before_open);
    }

    #[test]
    fn live_gesture_ignores_other_source() {
        let mut drawer = instant(Direction::Left);
        drawer.on_gesture_changed(50.0, 200.0, GestureSource::Presenting, true);
        drawer.on_gesture_changed(-10.0, 200.0, GestureSource::Background, true);
        assert_eq!(drawer.percent().map(TransitionPercent::get), Some(0.25));
    }

    #[test]
    fn extent_change_mid_settle_reissues_target_frame() {
        let mut drawer = animated();
        drawer.set_expanded(true);
        let id = drawer.host().last_animation().unwrap();

        drawer.set_content_extent(400.0);
        let (frame, transition) = drawer.host().updates.last().copied().unwrap();
        assert_eq!(frame.state, TransitionState::Expanded);
        assert_eq!(frame.offset, 0.0);
        assert!(matches!(transition, Transition::Animated { id: again, .. } if again == id));

        assert!(drawer.complete_animation(id));
        assert_eq!(drawer.frame(), frame);
    }

    #[test]
    fn retargeting_back_before_landing_does_not_notify() {
        let mut drawer = animated();
        let seen = counter(&mut drawer);

        drawer.set_expanded(true);
        let first = drawer.host().last_animation().unwrap();
        drawer.set_expanded(false);
        let second = drawer.host().last_animation().unwrap();
        assert_ne!(first, second);

        assert!(!drawer.complete_animation(first));
        assert!(drawer.complete_animation(second));
        assert_eq!(drawer.is_expanded(), Some(false));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn cancel_gesture_returns_to_origin() {
        let mut drawer = instant(Direction::Left);
        drawer.set_expanded(true);
        drawer.on_gesture_changed(-180.0, 200.0, GestureSource::Background, true);
        drawer.cancel_gesture();
        assert_eq!(drawer.is_expanded(), Some(true));
        assert!(!drawer.is_gesture_active());
    }

    #[test]
    fn toggle_and_requests() {
        let mut drawer = instant(Direction::Left);
        drawer.toggle();
        assert_eq!(drawer.is_expanded(), Some(true));
        drawer.apply_request(None);
        assert_eq!(drawer.is_expanded(), Some(true));
        drawer.apply_request(Some(false));
        assert_eq!(drawer.is_expanded(), Some(false));
    }

    #[test]
    fn background_tap_only_dismisses_open_drawer() {
        let mut drawer = instant(Direction::Left);
        assert!(!drawer.dismiss_from_background());

        drawer.set_expanded(true);
        assert!(drawer.dismiss_from_background());
        assert_eq!(drawer.is_expanded(), Some(false));
    }

    #[test]
    fn invalid_config_is_rejected_or_clamped() {
        let bad = DrawerConfig::default().with_snap_threshold(4.0);
        assert_eq!(
            DrawerController::try_new(bad, ()).err(),
            Some(ConfigError::SnapThreshold(4.0))
        );
        let drawer = DrawerController::new(bad, ());
        assert_eq!(drawer.config().snap_threshold, 1.0);
    }

    #[test]
    fn content_extent_ignores_degenerate_values() {
        let mut drawer = instant(Direction::Left);
        drawer.set_content_extent(0.0);
        drawer.set_content_extent(f64::INFINITY);
        assert_eq!(drawer.content_extent(), 200.0);
    }
}
