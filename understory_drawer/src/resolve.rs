// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure functions from drawer state to presentation values.
//!
//! These never fail: a missing or degenerate input resolves to the collapsed
//! or zero value so a renderer can call them on every frame, even mid-jitter.

use crate::types::{Direction, TransitionPercent, TransitionState};

/// Signed horizontal offset of the panel, in the same units as `extent`.
///
/// - expanded: `0`
/// - collapsed: `-extent` for [`Direction::Left`], `+extent` for [`Direction::Right`]
/// - in transition: linear between the two, driven by `percent`
///
/// A non-positive or non-finite `extent` resolves to `0`. In transition
/// without a percent resolves to the collapsed offset.
#[must_use]
pub fn resolve_offset(
    state: TransitionState,
    percent: Option<TransitionPercent>,
    direction: Direction,
    extent: f64,
) -> f64 {
    if !extent.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    let collapsed = direction.collapsed_offset(extent);
    match state {
        TransitionState::Expanded => 0.0,
        TransitionState::Collapsed => collapsed,
        TransitionState::InTransition => {
            let open = percent.map_or(0.0, TransitionPercent::get);
            collapsed * (1.0 - open)
        }
    }
}

/// Scrim opacity.
///
/// `0` when dimming is disabled or the drawer is collapsed, `max_opacity` when
/// expanded, and `max_opacity * percent` in transition (`0` without a percent).
#[must_use]
pub fn resolve_dim_opacity(
    state: TransitionState,
    percent: Option<TransitionPercent>,
    max_opacity: f64,
    dim_enabled: bool,
) -> f64 {
    if !dim_enabled {
        return 0.0;
    }
    match state {
        TransitionState::Collapsed => 0.0,
        TransitionState::Expanded => max_opacity,
        TransitionState::InTransition => percent.map_or(0.0, |p| max_opacity * p.get()),
    }
}

/// Decides whether a released drag lands expanded.
///
/// The percent is first flipped for inverse gestures (`snap = 1 - percent`),
/// then compared against `threshold`: a forward gesture expands once
/// `snap >= threshold`; an inverse gesture stays expanded while
/// `snap < threshold`.
///
/// ```
/// use understory_drawer::TransitionPercent;
/// use understory_drawer::resolve::snap_target;
///
/// let p = |v| TransitionPercent::new(v).unwrap();
/// assert!(snap_target(p(0.30), false, 0.225));
/// assert!(!snap_target(p(0.10), false, 0.225));
/// // Closing from open: only 20% of the way closed, so it springs back open.
/// assert!(snap_target(p(0.80), true, 0.225));
/// ```
#[must_use]
pub fn snap_target(percent: TransitionPercent, inverse: bool, threshold: f64) -> bool {
    if inverse {
        percent.complement().get() < threshold
    } else {
        percent.get() >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(v: f64) -> Option<TransitionPercent> {
        TransitionPercent::new(v)
    }

    #[test]
    fn expanded_offset_is_zero_for_every_input() {
        for direction in [Direction::Left, Direction::Right] {
            for p in [None, pct(0.0), pct(0.5), pct(1.0)] {
                assert_eq!(
                    resolve_offset(TransitionState::Expanded, p, direction, 320.0),
                    0.0
                );
            }
        }
    }

    #[test]
    fn collapsed_offset_is_signed_extent() {
        assert_eq!(
            resolve_offset(TransitionState::Collapsed, None, Direction::Left, 320.0),
            -320.0
        );
        assert_eq!(
            resolve_offset(TransitionState::Collapsed, None, Direction::Right, 320.0),
            320.0
        );
    }

    #[test]
    fn transition_offset_interpolates() {
        let left = resolve_offset(TransitionState::InTransition, pct(0.25), Direction::Left, 200.0);
        assert_eq!(left, -150.0);
        let right =
            resolve_offset(TransitionState::InTransition, pct(0.75), Direction::Right, 200.0);
        assert_eq!(right, 50.0);
    }

    #[test]
    fn degenerate_extent_resolves_to_zero() {
        for extent in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                resolve_offset(TransitionState::Collapsed, None, Direction::Left, extent),
                0.0
            );
        }
    }

    #[test]
    fn missing_percent_in_transition_is_collapsed() {
        assert_eq!(
            resolve_offset(TransitionState::InTransition, None, Direction::Left, 100.0),
            -100.0
        );
        assert_eq!(
            resolve_dim_opacity(TransitionState::InTransition, None, 0.4, true),
            0.0
        );
    }

    #[test]
    fn dim_opacity_is_gated_by_flag() {
        assert_eq!(
            resolve_dim_opacity(TransitionState::Expanded, None, 0.4, false),
            0.0
        );
        assert_eq!(
            resolve_dim_opacity(TransitionState::Expanded, None, 0.4, true),
            0.4
        );
        assert_eq!(
            resolve_dim_opacity(TransitionState::Collapsed, None, 0.4, true),
            0.0
        );
        assert_eq!(
            resolve_dim_opacity(TransitionState::InTransition, pct(0.5), 0.4, true),
            0.2
        );
    }

    #[test]
    fn snap_exactly_at_threshold() {
        let at = TransitionPercent::new(0.225).unwrap();
        assert!(snap_target(at, false, 0.225));
        // 1 - 0.775 is not exactly 0.225 in floating point; use a clean pair.
        let half = TransitionPercent::new(0.5).unwrap();
        assert!(!snap_target(half, true, 0.5));
        assert!(snap_target(half, false, 0.5));
    }
}
