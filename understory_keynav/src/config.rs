// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation configuration.

use thiserror::Error;

/// Depths of the two-phase search window used by closest-item searches.
///
/// The first phase looks `initial_depth` units ahead of the current item.
/// If nothing qualifies, a second phase looks at the band from
/// `initial_depth` to `initial_depth + secondary_depth`. Items farther away
/// than that are not reachable by a single closest step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchTuning {
    initial_depth: f64,
    secondary_depth: f64,
}

impl SearchTuning {
    /// Depth of the first search phase.
    pub const DEFAULT_INITIAL_DEPTH: f64 = 500.0;
    /// Depth of the second search phase.
    pub const DEFAULT_SECONDARY_DEPTH: f64 = 2500.0;

    /// Validate and build a tuning.
    ///
    /// Both depths must be finite and strictly positive, and the secondary
    /// depth must exceed the initial one.
    pub fn new(initial_depth: f64, secondary_depth: f64) -> Result<Self, TuningError> {
        for depth in [initial_depth, secondary_depth] {
            if !depth.is_finite() {
                return Err(TuningError::NonFiniteDepth(depth));
            }
            if depth <= 0.0 {
                return Err(TuningError::NonPositiveDepth(depth));
            }
        }
        if secondary_depth <= initial_depth {
            return Err(TuningError::SecondaryNotDeeper {
                initial: initial_depth,
                secondary: secondary_depth,
            });
        }
        Ok(Self {
            initial_depth,
            secondary_depth,
        })
    }

    /// Depth of the first search phase.
    #[must_use]
    pub const fn initial_depth(&self) -> f64 {
        self.initial_depth
    }

    /// Depth of the second search phase.
    #[must_use]
    pub const fn secondary_depth(&self) -> f64 {
        self.secondary_depth
    }
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            initial_depth: Self::DEFAULT_INITIAL_DEPTH,
            secondary_depth: Self::DEFAULT_SECONDARY_DEPTH,
        }
    }
}

/// Rejected [`SearchTuning`] parameters.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum TuningError {
    /// A depth was NaN or infinite.
    #[error("search depth must be finite, got {0}")]
    NonFiniteDepth(f64),
    /// A depth was zero or negative.
    #[error("search depth must be strictly positive, got {0}")]
    NonPositiveDepth(f64),
    /// The second phase would not look farther than the first.
    #[error("secondary search depth {secondary} must exceed initial depth {initial}")]
    SecondaryNotDeeper {
        /// Requested first-phase depth.
        initial: f64,
        /// Requested second-phase depth.
        secondary: f64,
    },
}

/// What to do when a closest search finds nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Report no target.
    #[default]
    Never,
    /// Jump to the far end in the opposite direction.
    ///
    /// A wrap that would land on the current item reports no target.
    Wrap,
}

/// Configuration for a [`Navigator`](crate::Navigator).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NavConfig {
    /// Search window depths.
    pub tuning: SearchTuning,
    /// Wraparound behavior for spatial closest searches.
    pub wrap: WrapMode,
}
