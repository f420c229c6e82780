// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric helpers for directional search.
//!
//! A search looks through a window ahead of the current item's leading edge
//! and scores each surviving candidate by its directed distance (midpoint to
//! midpoint, along the direction), its transverse distance (midpoint to
//! midpoint, across the direction), and finally its key.

use core::cmp::Ordering;

use kurbo::Rect;

use crate::types::{Axis, Direction};

/// Which end of the directed distance range wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Prefer {
    /// Smallest positive directed distance.
    Nearest,
    /// Largest directed distance.
    Farthest,
}

/// Window starting `offset` units past the leading edge of `origin` and
/// extending `depth` units further, spanning the transverse extent of `origin`.
pub(crate) fn window_ahead(origin: Rect, direction: Direction, offset: f64, depth: f64) -> Rect {
    match direction {
        Direction::Right => {
            let start = origin.x1 + offset;
            Rect::new(start, origin.y0, start + depth, origin.y1)
        }
        Direction::Left => {
            let start = origin.x0 - offset;
            Rect::new(start - depth, origin.y0, start, origin.y1)
        }
        Direction::Down => {
            let start = origin.y1 + offset;
            Rect::new(origin.x0, start, origin.x1, start + depth)
        }
        Direction::Up => {
            let start = origin.y0 - offset;
            Rect::new(origin.x0, start - depth, origin.x1, start)
        }
    }
}

/// Window from the leading edge of `origin` to the far edge of `content`,
/// spanning the transverse extent of `origin`.
///
/// If the content does not reach past the leading edge, the window collapses
/// to the edge itself.
pub(crate) fn window_to_extent(origin: Rect, direction: Direction, content: Rect) -> Rect {
    match direction {
        Direction::Right => Rect::new(origin.x1, origin.y0, content.x1.max(origin.x1), origin.y1),
        Direction::Left => Rect::new(content.x0.min(origin.x0), origin.y0, origin.x0, origin.y1),
        Direction::Down => Rect::new(origin.x0, origin.y1, origin.x1, content.y1.max(origin.y1)),
        Direction::Up => Rect::new(origin.x0, content.y0.min(origin.y0), origin.x1, origin.y0),
    }
}

fn mid(rect: &Rect, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => 0.5 * (rect.x0 + rect.x1),
        Axis::Vertical => 0.5 * (rect.y0 + rect.y1),
    }
}

fn span(rect: &Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (rect.x0, rect.x1),
        Axis::Vertical => (rect.y0, rect.y1),
    }
}

/// Signed distance from `origin` to `candidate` along `direction`.
///
/// Positive only for candidates whose midpoint lies ahead of the origin's.
pub(crate) fn directed_distance(origin: &Rect, candidate: &Rect, direction: Direction) -> f64 {
    let axis = direction.axis();
    let delta = mid(candidate, axis) - mid(origin, axis);
    if direction.is_increasing() {
        delta
    } else {
        -delta
    }
}

/// Absolute midpoint distance across `direction`.
pub(crate) fn transverse_distance(origin: &Rect, candidate: &Rect, direction: Direction) -> f64 {
    let axis = direction.axis().cross();
    (mid(candidate, axis) - mid(origin, axis)).abs()
}

/// Whether `candidate` shares a strictly positive stretch of the origin's
/// transverse extent.
///
/// Items that merely touch the origin's side (the row above, in a grid with
/// no spacing) do not count. A degenerate origin accepts any candidate that
/// covers its line.
pub(crate) fn shares_lane(origin: &Rect, candidate: &Rect, direction: Direction) -> bool {
    let axis = direction.axis().cross();
    let (o0, o1) = span(origin, axis);
    let (c0, c1) = span(candidate, axis);
    if o1 <= o0 {
        c0 <= o0 && o0 <= c1
    } else {
        c0 < o1 && c1 > o0
    }
}

/// Ranking key of an admitted candidate.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Score<K> {
    pub(crate) directed: f64,
    pub(crate) transverse: f64,
    pub(crate) id: K,
}

impl<K: Ord> Score<K> {
    /// Total order in which the best candidate compares [`Ordering::Less`].
    pub(crate) fn rank(&self, other: &Self, prefer: Prefer) -> Ordering {
        let directed = match prefer {
            Prefer::Nearest => self.directed.total_cmp(&other.directed),
            Prefer::Farthest => other.directed.total_cmp(&self.directed),
        };
        directed
            .then_with(|| self.transverse.total_cmp(&other.transverse))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Running minimum over candidate scores.
#[derive(Debug)]
pub(crate) struct Best<K> {
    prefer: Prefer,
    best: Option<Score<K>>,
}

impl<K: Ord + Copy> Best<K> {
    pub(crate) const fn new(prefer: Prefer) -> Self {
        Self { prefer, best: None }
    }

    pub(crate) fn offer(&mut self, score: Score<K>) {
        match &self.best {
            Some(current) if current.rank(&score, self.prefer) != Ordering::Greater => {}
            _ => self.best = Some(score),
        }
    }

    pub(crate) fn into_id(self) -> Option<K> {
        self.best.map(|s| s.id)
    }
}
