// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effective direction for mirrored layouts.
//!
//! Item geometry is reported in the layout's authored coordinates. When the
//! host mirrors a layout for a right-to-left rendering, a visual "left" is a
//! geometric "right", so horizontal requests must be flipped before any
//! spatial search.

use crate::types::{Direction, LayoutDirection};

/// Whether horizontal directions must be flipped for this layout.
///
/// Either of two triggers flips:
/// - the layout auto-flips and is rendered in a direction other than the one
///   it was authored for, or
/// - the layout is compositional, authored left-to-right, and rendered
///   right-to-left. This holds even when the auto-flip flag is off.
#[must_use]
pub const fn needs_horizontal_flip(
    development: LayoutDirection,
    effective: LayoutDirection,
    flips_in_opposite_layout_direction: bool,
    is_special_compositional: bool,
) -> bool {
    let differs = !matches!(
        (development, effective),
        (LayoutDirection::LeftToRight, LayoutDirection::LeftToRight)
            | (LayoutDirection::RightToLeft, LayoutDirection::RightToLeft)
    );
    let auto_flip = flips_in_opposite_layout_direction && differs;
    let compositional = is_special_compositional
        && matches!(development, LayoutDirection::LeftToRight)
        && matches!(effective, LayoutDirection::RightToLeft);
    auto_flip || compositional
}

/// Resolve the direction to search in, given the layout's mirroring state.
#[must_use]
pub const fn effective_direction(
    requested: Direction,
    development: LayoutDirection,
    effective: LayoutDirection,
    flips_in_opposite_layout_direction: bool,
    is_special_compositional: bool,
) -> Direction {
    if needs_horizontal_flip(
        development,
        effective,
        flips_in_opposite_layout_direction,
        is_special_compositional,
    ) {
        requested.mirrored()
    } else {
        requested
    }
}
