// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer configuration.
//!
//! [`DrawerConfig`] is a plain value: build it with the `with_*` methods and
//! hand it to [`DrawerController::new`](crate::DrawerController::new), which
//! sanitizes out-of-range fields, or to
//! [`DrawerController::try_new`](crate::DrawerController::try_new), which
//! rejects them.
//!
//! ```
//! use core::time::Duration;
//! use understory_drawer::{Direction, DrawerConfig};
//!
//! let config = DrawerConfig::new(Direction::Right)
//!     .with_background_dimmed(false)
//!     .with_animation_duration(Duration::ZERO)
//!     .with_snap_threshold(0.3);
//! assert!(config.validate().is_ok());
//!
//! let bad = config.with_snap_threshold(1.5);
//! assert!(bad.validate().is_err());
//! ```

use core::fmt;
use core::time::Duration;

use crate::types::Direction;

/// Fraction of the drawer's travel a released drag must cover to complete.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.225;

/// Default duration of a settle animation.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Default scrim opacity of a fully expanded drawer.
pub const DEFAULT_MAX_DIM_OPACITY: f64 = 0.4;

/// Configuration of a drawer controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerConfig {
    /// Edge the drawer slides in from.
    pub direction: Direction,
    /// Whether the scrim behind the panel is dimmed.
    pub background_dimmed: bool,
    /// Scrim opacity when fully expanded.
    pub max_dim_opacity: f64,
    /// Duration of settle animations. Zero settles synchronously.
    pub animation_duration: Duration,
    /// Release threshold; see [`snap_target`](crate::resolve::snap_target).
    pub snap_threshold: f64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            background_dimmed: true,
            max_dim_opacity: DEFAULT_MAX_DIM_OPACITY,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

impl DrawerConfig {
    /// Default configuration for a drawer on the given edge.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Sets whether the scrim is dimmed.
    #[must_use]
    pub fn with_background_dimmed(mut self, dimmed: bool) -> Self {
        self.background_dimmed = dimmed;
        self
    }

    /// Sets the fully expanded scrim opacity.
    #[must_use]
    pub fn with_max_dim_opacity(mut self, opacity: f64) -> Self {
        self.max_dim_opacity = opacity;
        self
    }

    /// Sets the settle animation duration.
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Sets the release threshold.
    #[must_use]
    pub fn with_snap_threshold(mut self, threshold: f64) -> Self {
        self.snap_threshold = threshold;
        self
    }

    /// Checks that every fraction lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.snap_threshold) {
            return Err(ConfigError::SnapThreshold(self.snap_threshold));
        }
        if !(0.0..=1.0).contains(&self.max_dim_opacity) {
            return Err(ConfigError::DimOpacity(self.max_dim_opacity));
        }
        Ok(())
    }

    /// Returns a copy with out-of-range fractions replaced.
    ///
    /// Finite values are clamped into `[0, 1]`; NaN falls back to the default.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let mut out = self;
        if let Err(err) = self.validate() {
            log::warn!("drawer config: {err}; clamping");
            out.snap_threshold = clamp_fraction(self.snap_threshold, DEFAULT_SNAP_THRESHOLD);
            out.max_dim_opacity = clamp_fraction(self.max_dim_opacity, DEFAULT_MAX_DIM_OPACITY);
        }
        out
    }
}

fn clamp_fraction(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Error returned by [`DrawerConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The snap threshold is NaN or outside `[0, 1]`.
    SnapThreshold(f64),
    /// The maximum dim opacity is NaN or outside `[0, 1]`.
    DimOpacity(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnapThreshold(v) => write!(f, "snap threshold {v} is outside [0, 1]"),
            Self::DimOpacity(v) => write!(f, "max dim opacity {v} is outside [0, 1]"),
        }
    }
}

impl core::error::Error for ConfigError {}
