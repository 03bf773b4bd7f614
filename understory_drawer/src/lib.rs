// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: gesture-driven transition state for edge-anchored drawers.
//!
//! A drawer is a panel that slides in horizontally from a screen edge over a
//! dimmed, tap-catching scrim. This crate owns the interesting part of it: the
//! state machine that turns drag input and programmatic requests into a
//! well-defined sequence of (state, percent) pairs. Rendering, layout and
//! animation curves stay with the host.
//!
//! - [`types`]: [`Direction`], [`TransitionState`], [`TransitionPercent`] and gesture samples
//! - [`config`]: [`DrawerConfig`] and its defaults
//! - [`resolve`]: pure offset, scrim opacity and snap functions
//! - [`host`]: the [`DrawerHost`] trait a renderer implements
//! - [`observer`]: expanded-state subscriptions
//! - [`pan`]: [`PanTracker`](pan::PanTracker), pointer positions to gesture samples
//! - [`controller`]: [`DrawerController`], the state machine itself
//!
//! ## States
//!
//! A drawer is [`Collapsed`](TransitionState::Collapsed),
//! [`Expanded`](TransitionState::Expanded), or
//! [`InTransition`](TransitionState::InTransition). Only the last carries a
//! [`TransitionPercent`], its openness in `[0, 1]`.
//!
//! Drags move the drawer into transition; releasing compares the percent with
//! the snap threshold ([`DEFAULT_SNAP_THRESHOLD`] unless configured) and asks
//! the host to animate to the winning end. The state lands when the host
//! reports the animation complete.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_drawer::pan::PanTracker;
//! use understory_drawer::{
//!     AnimationId, Direction, DrawerConfig, DrawerController, DrawerFrame, DrawerHost,
//!     GestureSource, Transition, TransitionState,
//! };
//!
//! #[derive(Default)]
//! struct Renderer {
//!     pending: Option<AnimationId>,
//!     offset: f64,
//! }
//!
//! impl DrawerHost for Renderer {
//!     fn update(&mut self, frame: DrawerFrame, transition: Transition) {
//!         self.offset = frame.offset;
//!         if let Transition::Animated { id, .. } = transition {
//!             self.pending = Some(id);
//!         }
//!     }
//! }
//!
//! let mut drawer = DrawerController::new(DrawerConfig::new(Direction::Left), Renderer::default());
//! drawer.set_content_extent(280.0);
//!
//! // Pull the drawer open from the left edge.
//! let mut pan = PanTracker::default();
//! pan.start(Point::new(2.0, 400.0));
//! let sample = pan.update(Point::new(72.0, 410.0)).unwrap();
//! drawer.handle_sample(GestureSource::Presenting, sample, 280.0);
//! assert_eq!(drawer.state(), TransitionState::InTransition);
//! assert_eq!(drawer.host().offset, -210.0);
//!
//! // Release: 25% is past the threshold, so the host is asked to animate open.
//! let sample = pan.end(Point::new(72.0, 410.0)).unwrap();
//! drawer.handle_sample(GestureSource::Presenting, sample, 280.0);
//! assert_eq!(drawer.host().offset, 0.0);
//!
//! // The host finishes animating and the drawer lands.
//! let id = drawer.host_mut().pending.take().unwrap();
//! assert!(drawer.complete_animation(id));
//! assert_eq!(drawer.is_expanded(), Some(true));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwarded to `kurbo`.
//! - `libm`: forwarded to `kurbo` for `no_std` builds.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod host;
pub mod observer;
pub mod pan;
pub mod resolve;
pub mod types;

pub use config::{
    ConfigError, DEFAULT_ANIMATION_DURATION, DEFAULT_MAX_DIM_OPACITY, DEFAULT_SNAP_THRESHOLD,
    DrawerConfig,
};
pub use controller::DrawerController;
pub use host::{AnimationId, DrawerFrame, DrawerHost, Transition};
pub use observer::SubscriptionId;
pub use types::{
    Direction, DrawerRequest, GesturePhase, GestureSample, GestureSource, TransitionPercent,
    TransitionState,
};
