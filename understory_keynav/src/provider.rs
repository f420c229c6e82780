// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits through which resolvers read a layout.
//!
//! Resolvers never own or mutate layout state. A host adapts its layout
//! engine and data source to [`GeometryProvider`] and [`ItemDirectory`],
//! bundles them in a [`LayoutView`], and asks for a proposed target.

use core::fmt;

use kurbo::Rect;

use crate::types::LayoutTraits;

/// Role of a laid-out element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A selectable item cell.
    #[default]
    Cell,
    /// A header, footer, or other supplementary view.
    Supplementary,
    /// A purely decorative view.
    Decoration,
}

/// A laid-out element returned by a range query.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<K> {
    /// Item key.
    pub id: K,
    /// Bounds in the layout's coordinate space.
    pub rect: Rect,
    /// Role of the element.
    pub kind: ElementKind,
    /// Whether the element is hidden.
    pub hidden: bool,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl<K> Candidate<K> {
    /// Whether this element is a cell the user can currently see.
    #[must_use]
    pub fn is_visible_cell(&self) -> bool {
        self.kind == ElementKind::Cell && !self.hidden && self.opacity > 0.0
    }
}

/// Source of item geometry.
///
/// All rectangles must live in one coordinate space: the layout's authored
/// (unmirrored) space.
pub trait GeometryProvider<K> {
    /// Bounds of a cell, or `None` if the layout has no such cell.
    fn rect_for(&self, item: K) -> Option<Rect>;

    /// Visit every element whose bounds intersect `rect`, edges included.
    ///
    /// The visiting order is implementation-defined; resolvers do not depend
    /// on it.
    fn visit_intersecting(&self, rect: Rect, f: &mut dyn FnMut(&Candidate<K>));

    /// Bounds of the whole content, used by [`Step::End`](crate::Step::End) searches.
    fn content_rect(&self) -> Rect;
}

/// Enumeration and eligibility of items.
///
/// Items are enumerated in key order. Methods taking an item expect a key
/// the directory knows about; passing an unknown key is a caller error and
/// implementations may answer with any value.
pub trait ItemDirectory<K> {
    /// Whether the container holds no items at all.
    fn is_empty(&self) -> bool;

    /// Whether the item may currently become the selection.
    fn is_eligible(&self, item: K) -> bool;

    /// First eligible item in enumeration order.
    fn first_eligible(&self) -> Option<K>;

    /// Last eligible item in enumeration order.
    fn last_eligible(&self) -> Option<K>;

    /// Nearest eligible item before `item`.
    fn eligible_before(&self, item: K) -> Option<K>;

    /// Nearest eligible item after `item`.
    fn eligible_after(&self, item: K) -> Option<K>;

    /// The item immediately before `item`, eligible or not.
    fn any_before(&self, item: K) -> Option<K>;

    /// The item immediately after `item`, eligible or not.
    fn any_after(&self, item: K) -> Option<K>;

    /// Whether the data source can apply keyboard-initiated moves.
    fn supports_keyboard_reordering(&self) -> bool {
        false
    }
}

/// A read-only snapshot of a layout, as seen by resolvers.
///
/// Geometry and directory are often the same object (see
/// [`LayoutSnapshot`](crate::LayoutSnapshot)), but may be separate adapters.
pub struct LayoutView<'a, G: ?Sized, D: ?Sized> {
    /// Geometry source.
    pub geometry: &'a G,
    /// Enumeration and eligibility source.
    pub directory: &'a D,
    /// Mirroring and layout family.
    pub traits: LayoutTraits,
}

impl<'a, G: ?Sized, D: ?Sized> LayoutView<'a, G, D> {
    /// Bundle collaborators and traits into a view.
    #[must_use]
    pub const fn new(geometry: &'a G, directory: &'a D, traits: LayoutTraits) -> Self {
        Self {
            geometry,
            directory,
            traits,
        }
    }
}

impl<G: ?Sized, D: ?Sized> Clone for LayoutView<'_, G, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized, D: ?Sized> Copy for LayoutView<'_, G, D> {}

impl<G: ?Sized, D: ?Sized> fmt::Debug for LayoutView<'_, G, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutView")
            .field("traits", &self.traits)
            .finish_non_exhaustive()
    }
}
