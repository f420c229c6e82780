// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry point combining the spatial resolver, the linear overlay, and wrap policy.

use core::fmt::Debug;

use tracing::{debug, trace};

use crate::config::{NavConfig, WrapMode};
use crate::provider::{GeometryProvider, ItemDirectory, LayoutView};
use crate::resolver::SpatialResolver;
use crate::types::{Direction, LayoutKind, Step};

/// Resolves navigation requests against a [`LayoutView`].
///
/// A navigator holds configuration only. Each call reads a snapshot of the
/// layout and returns a proposed target; the host decides whether to apply it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Navigator {
    /// Search tuning and wrap policy.
    pub config: NavConfig,
}

impl Navigator {
    /// Create a navigator with the given configuration.
    #[must_use]
    pub const fn new(config: NavConfig) -> Self {
        Self { config }
    }

    /// Propose the item to move to from `current`.
    ///
    /// Linear-flow layouts go through [`Navigator::resolve_linear`]; every
    /// other layout through [`Navigator::resolve_spatial`].
    pub fn resolve<K, G, D>(
        &self,
        current: Option<K>,
        direction: Direction,
        step: Step,
        view: &LayoutView<'_, G, D>,
    ) -> Option<K>
    where
        K: Copy + Ord + Debug,
        G: GeometryProvider<K> + ?Sized,
        D: ItemDirectory<K> + ?Sized,
    {
        match view.traits.kind {
            LayoutKind::LinearFlow { scroll_axis } => self.resolve_linear(
                current,
                direction,
                step,
                scroll_axis,
                view.traits.effective_direction,
                view,
            ),
            LayoutKind::Spatial | LayoutKind::Compositional { .. } => {
                self.resolve_spatial(current, direction, step, view)
            }
        }
    }

    /// Spatial search, followed by a wraparound attempt when configured.
    ///
    /// Only [`Step::Closest`] wraps. The wrap jumps to the far end in the
    /// opposite direction; a wrap that would land on `current` is dropped so
    /// the key does not appear to do something while changing nothing.
    pub fn resolve_spatial<K, G, D>(
        &self,
        current: Option<K>,
        direction: Direction,
        step: Step,
        view: &LayoutView<'_, G, D>,
    ) -> Option<K>
    where
        K: Copy + Ord + Debug,
        G: GeometryProvider<K> + ?Sized,
        D: ItemDirectory<K> + ?Sized,
    {
        let resolver = SpatialResolver::new(self.config.tuning);
        let found = resolver.resolve(current, direction, step, view);
        if found.is_some() || step != Step::Closest || self.config.wrap == WrapMode::Never {
            return found;
        }
        let current = current?;
        trace!(?current, ?direction, "closest search failed, wrapping");
        let wrapped = resolver.resolve(Some(current), direction.opposite(), Step::End, view);
        if wrapped == Some(current) {
            debug!(?current, "wrap landed on the current item, suppressed");
            return None;
        }
        wrapped
    }
}
