// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout-agnostic spatial resolver.

use core::fmt::Debug;

use kurbo::Rect;
use tracing::trace;

use crate::config::SearchTuning;
use crate::provider::{Candidate, GeometryProvider, ItemDirectory, LayoutView};
use crate::search::{self, Best, Prefer, Score};
use crate::types::{Direction, LayoutKind, Step};

/// Finds the next item by searching the layout geometry.
///
/// The resolver is a pure function of its inputs: it keeps no state between
/// calls and never wraps around. Wrapping is layered on top by
/// [`Navigator`](crate::Navigator).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpatialResolver {
    /// Window depths for closest searches.
    pub tuning: SearchTuning,
}

impl SpatialResolver {
    /// Create a resolver with the given window depths.
    #[must_use]
    pub const fn new(tuning: SearchTuning) -> Self {
        Self { tuning }
    }

    /// Propose the item to move to from `current`.
    ///
    /// `direction` is the requested (visual) direction; it is normalized for
    /// mirrored layouts before searching. Returns `None` when no item
    /// qualifies. The result is never `current`.
    ///
    /// `current`, when present, must be a cell known to `view.geometry`.
    /// If the geometry has no rectangle for it the resolver reports no target.
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
        let Some(current) = current else {
            return start_item(direction, step, view);
        };
        let effective = view.traits.effective(direction);
        let Some(origin) = view.geometry.rect_for(current) else {
            trace!(?current, "no geometry for current item");
            return None;
        };
        match step {
            Step::End => self.search_end(current, origin, effective, view),
            Step::Closest | Step::ClosestForMoving => {
                self.search_closest(current, origin, effective, step, view)
            }
        }
    }

    fn search_closest<K, G, D>(
        &self,
        current: K,
        origin: Rect,
        direction: Direction,
        step: Step,
        view: &LayoutView<'_, G, D>,
    ) -> Option<K>
    where
        K: Copy + Ord + Debug,
        G: GeometryProvider<K> + ?Sized,
        D: ItemDirectory<K> + ?Sized,
    {
        let initial = self.tuning.initial_depth();
        let window = search::window_ahead(origin, direction, 0.0, initial);
        let found = best_in_window(
            current,
            origin,
            direction,
            step,
            window,
            Prefer::Nearest,
            view,
        );
        if found.is_some() {
            return found;
        }
        trace!(?current, ?direction, "nothing in the initial window, widening");
        let window =
            search::window_ahead(origin, direction, initial, self.tuning.secondary_depth());
        best_in_window(
            current,
            origin,
            direction,
            step,
            window,
            Prefer::Nearest,
            view,
        )
    }

    fn search_end<K, G, D>(
        &self,
        current: K,
        origin: Rect,
        direction: Direction,
        view: &LayoutView<'_, G, D>,
    ) -> Option<K>
    where
        K: Copy + Ord + Debug,
        G: GeometryProvider<K> + ?Sized,
        D: ItemDirectory<K> + ?Sized,
    {
        let window = search::window_to_extent(origin, direction, view.geometry.content_rect());
        best_in_window(
            current,
            origin,
            direction,
            Step::End,
            window,
            Prefer::Farthest,
            view,
        )
    }
}

fn best_in_window<K, G, D>(
    current: K,
    origin: Rect,
    direction: Direction,
    step: Step,
    window: Rect,
    prefer: Prefer,
    view: &LayoutView<'_, G, D>,
) -> Option<K>
where
    K: Copy + Ord + Debug,
    G: GeometryProvider<K> + ?Sized,
    D: ItemDirectory<K> + ?Sized,
{
    let mut best = Best::new(prefer);
    view.geometry.visit_intersecting(window, &mut |candidate| {
        if let Some(score) = admit(current, &origin, direction, step, candidate, view.directory) {
            best.offer(score);
        }
    });
    best.into_id()
}

fn admit<K, D>(
    current: K,
    origin: &Rect,
    direction: Direction,
    step: Step,
    candidate: &Candidate<K>,
    directory: &D,
) -> Option<Score<K>>
where
    K: Copy + Ord,
    D: ItemDirectory<K> + ?Sized,
{
    if !candidate.is_visible_cell() || candidate.id == current {
        return None;
    }
    if !search::shares_lane(origin, &candidate.rect, direction) {
        return None;
    }
    let directed = search::directed_distance(origin, &candidate.rect, direction);
    if directed.is_nan() || directed <= 0.0 {
        return None;
    }
    if step.checks_eligibility() && !directory.is_eligible(candidate.id) {
        return None;
    }
    Some(Score {
        directed,
        transverse: search::transverse_distance(origin, &candidate.rect, direction),
        id: candidate.id,
    })
}

/// Item to select when nothing is selected yet.
///
/// Compositional layouts only start for keys along their scroll axis. An
/// `End` step towards increasing coordinates starts from the last eligible
/// item; every other request starts from the first. Moving needs an item to
/// move, so it never starts.
fn start_item<K, G, D>(
    direction: Direction,
    step: Step,
    view: &LayoutView<'_, G, D>,
) -> Option<K>
where
    K: Copy + Debug,
    G: ?Sized,
    D: ItemDirectory<K> + ?Sized,
{
    if step == Step::ClosestForMoving {
        return None;
    }
    if let LayoutKind::Compositional { scroll_axis } = view.traits.kind
        && direction.axis() != scroll_axis
    {
        trace!(?direction, "cross-axis key with no selection");
        return None;
    }
    let start = if step == Step::End && view.traits.effective(direction).is_increasing() {
        view.directory.last_eligible()
    } else {
        view.directory.first_eligible()
    };
    trace!(?start, "starting from an empty selection");
    start
}
