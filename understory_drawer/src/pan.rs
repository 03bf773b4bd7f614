// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan tracking: turn raw pointer positions into drawer [`GestureSample`]s.
//!
//! Hosts whose gesture recognizer already reports a translation can feed
//! [`GestureSample`]s to the controller directly. Everyone else can use
//! [`PanTracker`] to project pointer positions onto the drawer's horizontal
//! axis.
//!
//! ## Usage
//!
//! 1) Call [`PanTracker::start`] on pointer down.
//! 2) On each move, call [`PanTracker::update`] to get a `Changed` sample.
//! 3) On pointer up, call [`PanTracker::end`] to get the `Ended` sample and reset.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_drawer::pan::PanTracker;
//! use understory_drawer::{GesturePhase, GestureSample};
//!
//! let mut pan = PanTracker::default();
//! pan.start(Point::new(10.0, 20.0));
//!
//! // Vertical motion does not move a horizontal drawer.
//! let sample = pan.update(Point::new(70.0, 95.0)).unwrap();
//! assert_eq!(sample, GestureSample::changed(60.0));
//!
//! let sample = pan.end(Point::new(80.0, 95.0)).unwrap();
//! assert_eq!(sample.phase, GesturePhase::Ended);
//! assert_eq!(sample.translation, 70.0);
//! assert!(!pan.is_tracking());
//! ```

use kurbo::{Point, Vec2};

use crate::types::GestureSample;

/// Tracks one pointer pan.
#[derive(Debug, Clone, Default, Copy)]
pub struct PanTracker {
    /// Position the pan started at.
    pub start_pos: Option<Point>,
    /// Last position seen during the pan.
    pub last_pos: Option<Point>,
}

impl PanTracker {
    /// Begin tracking from `pos`, discarding any previous pan.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records `pos` and returns the translation since the start.
    pub fn update(&mut self, pos: Point) -> Option<GestureSample> {
        let total = self.total_offset(pos)?;
        self.last_pos = Some(pos);
        Some(GestureSample::changed(total.x))
    }

    /// Finishes the pan at `pos` and returns the final sample.
    pub fn end(&mut self, pos: Point) -> Option<GestureSample> {
        let total = self.total_offset(pos)?;
        self.cancel();
        Some(GestureSample::ended(total.x))
    }

    /// Drops the pan without producing a sample.
    pub fn cancel(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Horizontal translation from the start to `pos`.
    pub fn translation(&self, pos: Point) -> Option<f64> {
        self.total_offset(pos).map(|v| v.x)
    }

    /// Movement since the last recorded position.
    pub fn delta_since_last(&self, pos: Point) -> Option<Vec2> {
        self.last_pos.map(|last| pos - last)
    }

    /// Returns `true` while a pan is active.
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }

    fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| pos - start)
    }
}
