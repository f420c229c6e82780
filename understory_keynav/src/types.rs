// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation vocabulary: item keys, directions, steps, and layout descriptors.

use crate::normalize;

/// Position of an item within a sectioned container.
///
/// Ordering is lexicographic: by section, then by item. Resolvers use this
/// order as the final tie-break between candidates at equal distance, so the
/// field order of this struct is load-bearing for the derived [`Ord`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexPath {
    /// Section containing the item.
    pub section: usize,
    /// Position of the item within its section.
    pub item: usize,
}

impl IndexPath {
    /// Create an index path from a section and an item position.
    #[must_use]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// One of the two layout axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Arrow-key direction of a navigation request.
///
/// Directions are expressed in layout coordinates once normalized: `Down`
/// and `Right` move towards increasing coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards decreasing y.
    Up,
    /// Towards increasing y.
    Down,
    /// Towards decreasing x.
    Left,
    /// Towards increasing x.
    Right,
}

impl Direction {
    /// The direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Horizontal flip: swaps left and right, keeps up and down.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up | Self::Down => self,
        }
    }

    /// The axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Whether this direction moves towards increasing coordinates.
    #[must_use]
    pub const fn is_increasing(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

/// Granularity of a navigation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// The nearest eligible item in the requested direction.
    Closest,
    /// Like [`Step::Closest`] but without the eligibility filter.
    ///
    /// Used to find the destination of a keyboard reorder, which may pass
    /// over items the user cannot select.
    ClosestForMoving,
    /// The farthest eligible item in the requested direction.
    End,
}

impl Step {
    /// Whether candidates must pass the directory's eligibility check.
    #[must_use]
    pub const fn checks_eligibility(self) -> bool {
        !matches!(self, Self::ClosestForMoving)
    }
}

/// Horizontal writing direction of a layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Content starts on the left.
    #[default]
    LeftToRight,
    /// Content starts on the right.
    RightToLeft,
}

/// Family of the layout producing the item geometry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Free-form 2D layout with independent axes.
    #[default]
    Spatial,
    /// Sectioned, axis-aware layout.
    ///
    /// An empty selection only produces a start item for keys along the
    /// scroll axis. This family also flips horizontally whenever it was
    /// authored left-to-right and is rendered right-to-left, regardless of
    /// [`LayoutTraits::flips_in_opposite_layout_direction`].
    Compositional {
        /// Axis the container scrolls along.
        scroll_axis: Axis,
    },
    /// A single flowing sequence that wraps across rows or columns.
    ///
    /// Movement along the flow is resolved in enumeration order rather than
    /// by spatial search; see [`Navigator::resolve_linear`](crate::Navigator::resolve_linear).
    LinearFlow {
        /// Axis the container scrolls along.
        scroll_axis: Axis,
    },
}

impl LayoutKind {
    /// The scroll axis, for layouts that declare one.
    #[must_use]
    pub const fn scroll_axis(self) -> Option<Axis> {
        match self {
            Self::Spatial => None,
            Self::Compositional { scroll_axis } | Self::LinearFlow { scroll_axis } => {
                Some(scroll_axis)
            }
        }
    }
}

/// Properties of a layout that affect how key directions are interpreted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutTraits {
    /// Layout family.
    pub kind: LayoutKind,
    /// Direction the layout was authored for.
    pub development_direction: LayoutDirection,
    /// Direction the layout is currently rendered in.
    pub effective_direction: LayoutDirection,
    /// Whether the layout mirrors itself when rendered in the direction
    /// opposite to [`LayoutTraits::development_direction`].
    pub flips_in_opposite_layout_direction: bool,
}

impl LayoutTraits {
    /// Traits for a layout of the given kind, left-to-right, without flipping.
    #[must_use]
    pub const fn new(kind: LayoutKind) -> Self {
        Self {
            kind,
            development_direction: LayoutDirection::LeftToRight,
            effective_direction: LayoutDirection::LeftToRight,
            flips_in_opposite_layout_direction: false,
        }
    }

    /// Map a requested key direction onto layout coordinates.
    #[must_use]
    pub const fn effective(&self, requested: Direction) -> Direction {
        normalize::effective_direction(
            requested,
            self.development_direction,
            self.effective_direction,
            self.flips_in_opposite_layout_direction,
            matches!(self.kind, LayoutKind::Compositional { .. }),
        )
    }
}
