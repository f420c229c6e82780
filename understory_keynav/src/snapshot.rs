// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A frozen layout that serves as both geometry provider and item directory.
//!
//! Hosts that do not already have a spatial index can copy their layout into
//! a [`LayoutSnapshot`] after each layout pass. Range queries go through a
//! uniform bucket grid: each element is registered in every bucket its bounds
//! touch, and a query only looks at the buckets overlapping the query
//! rectangle. This suits UI layouts, where elements are roughly uniformly
//! sized and query windows are small compared to the content.
//!
//! Only cells take part in enumeration. Supplementary and decoration elements
//! are reported by range queries (so resolvers can reject them) but are never
//! eligible. A cell is eligible when it is selectable, not hidden, and not
//! fully transparent, the same visibility rule the spatial search applies.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use hashbrown::{HashMap, HashSet};
use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::provider::{Candidate, ElementKind, GeometryProvider, ItemDirectory};
use crate::types::IndexPath;

/// One laid-out element.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotItem<K> {
    /// Item key.
    pub id: K,
    /// Bounds in layout coordinates.
    pub rect: Rect,
    /// Role of the element.
    pub kind: ElementKind,
    /// Whether the element is hidden.
    pub hidden: bool,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Whether the user may select this cell.
    pub selectable: bool,
}

impl<K> SnapshotItem<K> {
    /// A visible, selectable cell.
    #[must_use]
    pub const fn cell(id: K, rect: Rect) -> Self {
        Self {
            id,
            rect,
            kind: ElementKind::Cell,
            hidden: false,
            opacity: 1.0,
            selectable: true,
        }
    }

    /// A visible header, footer, or similar supplementary element.
    #[must_use]
    pub const fn supplementary(id: K, rect: Rect) -> Self {
        Self {
            id,
            rect,
            kind: ElementKind::Supplementary,
            hidden: false,
            opacity: 1.0,
            selectable: false,
        }
    }

    /// Set whether the cell is selectable.
    #[must_use]
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set whether the element is hidden.
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the element's opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    fn candidate(&self) -> Candidate<K>
    where
        K: Copy,
    {
        Candidate {
            id: self.id,
            rect: self.rect,
            kind: self.kind,
            hidden: self.hidden,
            opacity: self.opacity,
        }
    }
}

/// Builder for a [`LayoutSnapshot`].
#[derive(Clone, Debug)]
pub struct SnapshotBuilder<K> {
    items: Vec<SnapshotItem<K>>,
    bucket_size: f64,
    content_size: Option<Size>,
    reorderable: bool,
}

impl<K: Copy + Ord> SnapshotBuilder<K> {
    /// Edge length of a query bucket, in layout units.
    pub const DEFAULT_BUCKET_SIZE: f64 = 256.0;

    /// Add an element.
    ///
    /// When two cells share a key, the one added last wins.
    #[must_use]
    pub fn item(mut self, item: SnapshotItem<K>) -> Self {
        self.items.push(item);
        self
    }

    /// Add several elements.
    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = SnapshotItem<K>>) -> Self {
        self.items.extend(items);
        self
    }

    /// Set the bucket edge length. Non-positive or non-finite values are
    /// replaced by the default.
    #[must_use]
    pub fn bucket_size(mut self, bucket_size: f64) -> Self {
        self.bucket_size = if bucket_size.is_finite() && bucket_size > 0.0 {
            bucket_size
        } else {
            Self::DEFAULT_BUCKET_SIZE
        };
        self
    }

    /// Declare the content size explicitly instead of deriving it from the
    /// union of element bounds.
    #[must_use]
    pub fn content_size(mut self, size: Size) -> Self {
        self.content_size = Some(size);
        self
    }

    /// Declare whether the data source accepts keyboard reordering.
    #[must_use]
    pub fn reorderable(mut self, reorderable: bool) -> Self {
        self.reorderable = reorderable;
        self
    }

    /// Freeze the layout.
    #[must_use]
    pub fn build(self) -> LayoutSnapshot<K> {
        let (mut cells, others): (Vec<_>, Vec<_>) = self
            .items
            .into_iter()
            .partition(|item| item.kind == ElementKind::Cell);
        // Stable sort after reversing keeps the last duplicate first, which
        // `dedup_by_key` then retains.
        cells.reverse();
        cells.sort_by(|a, b| a.id.cmp(&b.id));
        cells.dedup_by_key(|item| item.id);
        let cell_count = cells.len();
        let mut items = cells;
        items.extend(others);

        let content = match self.content_size {
            Some(size) => Rect::from_origin_size((0.0, 0.0), size),
            None => items
                .iter()
                .map(|item| item.rect)
                .reduce(|acc, rect| acc.union(rect))
                .unwrap_or(Rect::ZERO),
        };

        let mut buckets: HashMap<(i32, i32), SmallVec<[usize; 8]>> = HashMap::new();
        for (slot, item) in items.iter().enumerate() {
            let (x0, y0, x1, y1) = bucket_range(item.rect, self.bucket_size);
            for by in y0..=y1 {
                for bx in x0..=x1 {
                    buckets.entry((bx, by)).or_default().push(slot);
                }
            }
        }

        LayoutSnapshot {
            items,
            cell_count,
            buckets,
            bucket_size: self.bucket_size,
            content,
            reorderable: self.reorderable,
        }
    }
}

/// A frozen layout implementing [`GeometryProvider`] and [`ItemDirectory`].
#[derive(Clone)]
pub struct LayoutSnapshot<K> {
    // Cells sorted by key occupy `..cell_count`; other elements follow.
    items: Vec<SnapshotItem<K>>,
    cell_count: usize,
    buckets: HashMap<(i32, i32), SmallVec<[usize; 8]>>,
    bucket_size: f64,
    content: Rect,
    reorderable: bool,
}

impl<K: Debug> Debug for LayoutSnapshot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutSnapshot")
            .field("cells", &self.cell_count)
            .field("elements", &self.items.len())
            .field("buckets", &self.buckets.len())
            .field("bucket_size", &self.bucket_size)
            .field("content", &self.content)
            .field("reorderable", &self.reorderable)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Ord> LayoutSnapshot<K> {
    /// Start building a snapshot.
    #[must_use]
    pub fn builder() -> SnapshotBuilder<K> {
        SnapshotBuilder {
            items: Vec::new(),
            bucket_size: SnapshotBuilder::<K>::DEFAULT_BUCKET_SIZE,
            content_size: None,
            reorderable: true,
        }
    }

    /// Change the keyboard-reordering capability.
    #[must_use]
    pub fn with_reordering(mut self, reorderable: bool) -> Self {
        self.reorderable = reorderable;
        self
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cell_count
    }

    /// Whether the snapshot holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell_count == 0
    }

    /// Cells in enumeration order.
    pub fn cells(
        &self,
    ) -> impl DoubleEndedIterator<Item = &SnapshotItem<K>> + ExactSizeIterator + '_ {
        self.items[..self.cell_count].iter()
    }

    fn cell_slots(&self) -> &[SnapshotItem<K>] {
        &self.items[..self.cell_count]
    }

    fn position(&self, id: K) -> Result<usize, usize> {
        self.cell_slots().binary_search_by(|item| item.id.cmp(&id))
    }

    fn cell(&self, id: K) -> Option<&SnapshotItem<K>> {
        let slot = self.position(id).ok()?;
        self.cell_slots().get(slot)
    }

    /// Index of the first cell after `id` in enumeration order.
    fn after(&self, id: K) -> usize {
        match self.position(id) {
            Ok(slot) => slot + 1,
            Err(slot) => slot,
        }
    }

    /// Index one past the last cell before `id` in enumeration order.
    fn before(&self, id: K) -> usize {
        match self.position(id) {
            Ok(slot) | Err(slot) => slot,
        }
    }

    fn eligible(item: &SnapshotItem<K>) -> bool {
        item.selectable && !item.hidden && item.opacity > 0.0
    }
}

impl LayoutSnapshot<IndexPath> {
    /// A `rows × columns` grid keyed `(row, column)`.
    ///
    /// Each row is its own section.
    #[must_use]
    pub fn grid(rows: usize, columns: usize, item: Size, spacing: f64) -> Self {
        let cells = (0..rows).flat_map(|row| {
            (0..columns).map(move |column| {
                SnapshotItem::cell(
                    IndexPath::new(row, column),
                    placed(row, column, item, spacing),
                )
            })
        });
        Self::builder().items(cells).build()
    }

    /// `count` items in one section, flowing left to right in rows of
    /// `per_row`, keyed `(0, i)`.
    #[must_use]
    pub fn flow(count: usize, per_row: usize, item: Size, spacing: f64) -> Self {
        let per_row = per_row.max(1);
        let cells = (0..count).map(|i| {
            SnapshotItem::cell(
                IndexPath::new(0, i),
                placed(i / per_row, i % per_row, item, spacing),
            )
        });
        Self::builder().items(cells).build()
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Fixture grids are far smaller than 2^52 cells."
)]
fn placed(row: usize, column: usize, item: Size, spacing: f64) -> Rect {
    let x = column as f64 * (item.width + spacing);
    let y = row as f64 * (item.height + spacing);
    Rect::from_origin_size((x, y), item)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Bucket coordinates are intentionally i32; out-of-range values saturate."
)]
fn bucket_coord(value: f64, bucket_size: f64) -> i32 {
    let t = value / bucket_size;
    let coord = t as i32;

    // Round towards -∞ (the cast above has already truncated).
    if t < 0.0 && f64::from(coord) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

fn bucket_range(rect: Rect, bucket_size: f64) -> (i32, i32, i32, i32) {
    (
        bucket_coord(rect.x0, bucket_size),
        bucket_coord(rect.y0, bucket_size),
        bucket_coord(rect.x1, bucket_size),
        bucket_coord(rect.y1, bucket_size),
    )
}

fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

impl<K: Copy + Ord> GeometryProvider<K> for LayoutSnapshot<K> {
    fn rect_for(&self, item: K) -> Option<Rect> {
        self.cell(item).map(|cell| cell.rect)
    }

    fn visit_intersecting(&self, rect: Rect, f: &mut dyn FnMut(&Candidate<K>)) {
        let (x0, y0, x1, y1) = bucket_range(rect, self.bucket_size);
        let span = |lo: i32, hi: i32| {
            usize::try_from(i64::from(hi) - i64::from(lo) + 1).unwrap_or(usize::MAX)
        };
        let touched = span(x0, x1).saturating_mul(span(y0, y1));
        if touched > self.buckets.len() {
            // Scanning everything is cheaper than walking mostly empty buckets.
            for item in &self.items {
                if overlaps(&item.rect, &rect) {
                    f(&item.candidate());
                }
            }
            return;
        }
        let mut seen: HashSet<usize> = HashSet::new();
        for by in y0..=y1 {
            for bx in x0..=x1 {
                let Some(bucket) = self.buckets.get(&(bx, by)) else {
                    continue;
                };
                for &slot in bucket {
                    let item = &self.items[slot];
                    if seen.insert(slot) && overlaps(&item.rect, &rect) {
                        f(&item.candidate());
                    }
                }
            }
        }
    }

    fn content_rect(&self) -> Rect {
        self.content
    }
}

impl<K: Copy + Ord> ItemDirectory<K> for LayoutSnapshot<K> {
    fn is_empty(&self) -> bool {
        self.cell_count == 0
    }

    fn is_eligible(&self, item: K) -> bool {
        self.cell(item).is_some_and(Self::eligible)
    }

    fn first_eligible(&self) -> Option<K> {
        self.cells().find(|c| Self::eligible(c)).map(|c| c.id)
    }

    fn last_eligible(&self) -> Option<K> {
        self.cells().rev().find(|c| Self::eligible(c)).map(|c| c.id)
    }

    fn eligible_before(&self, item: K) -> Option<K> {
        let end = self.before(item);
        self.cell_slots()[..end]
            .iter()
            .rev()
            .find(|c| Self::eligible(c))
            .map(|c| c.id)
    }

    fn eligible_after(&self, item: K) -> Option<K> {
        let start = self.after(item);
        self.cell_slots()[start..]
            .iter()
            .find(|c| Self::eligible(c))
            .map(|c| c.id)
    }

    fn any_before(&self, item: K) -> Option<K> {
        let end = self.before(item);
        end.checked_sub(1).map(|slot| self.cell_slots()[slot].id)
    }

    fn any_after(&self, item: K) -> Option<K> {
        self.cell_slots().get(self.after(item)).map(|c| c.id)
    }

    fn supports_keyboard_reordering(&self) -> bool {
        self.reorderable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ip(section: usize, item: usize) -> IndexPath {
        IndexPath::new(section, item)
    }

    fn hits(snapshot: &LayoutSnapshot<IndexPath>, rect: Rect) -> Vec<IndexPath> {
        let mut out = Vec::new();
        snapshot.visit_intersecting(rect, &mut |c| out.push(c.id));
        out.sort();
        out
    }

    #[test]
    fn range_query_matches_linear_scan() {
        let grid = LayoutSnapshot::builder()
            .bucket_size(64.0)
            .items(LayoutSnapshot::grid(10, 10, Size::new(30.0, 30.0), 5.0).cells().cloned())
            .build();
        let window = Rect::new(40.0, 40.0, 100.0, 70.0);
        let expected: Vec<_> = grid
            .cells()
            .filter(|c| overlaps(&c.rect, &window))
            .map(|c| c.id)
            .collect();
        assert_eq!(hits(&grid, window), expected);
        // Two columns by two rows; the second row only touches the window edge.
        assert_eq!(hits(&grid, window).len(), 4);
        // A window covering far more buckets than exist takes the scan path.
        assert_eq!(hits(&grid, Rect::new(-1e6, -1e6, 1e6, 1e6)).len(), 100);
    }

    #[test]
    fn spanning_items_are_reported_once() {
        let snapshot = LayoutSnapshot::builder()
            .bucket_size(10.0)
            .item(SnapshotItem::cell(ip(0, 0), Rect::new(0.0, 0.0, 95.0, 95.0)))
            .build();
        assert_eq!(hits(&snapshot, Rect::new(5.0, 5.0, 50.0, 50.0)), vec![ip(0, 0)]);
    }

    #[test]
    fn duplicate_cells_keep_the_last() {
        let snapshot = LayoutSnapshot::builder()
            .item(SnapshotItem::cell(ip(0, 0), Rect::new(0.0, 0.0, 10.0, 10.0)))
            .item(SnapshotItem::cell(ip(0, 0), Rect::new(50.0, 0.0, 60.0, 10.0)))
            .build();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.rect_for(ip(0, 0)),
            Some(Rect::new(50.0, 0.0, 60.0, 10.0))
        );
    }

    #[test]
    fn directory_walks_in_key_order() {
        let snapshot = LayoutSnapshot::builder()
            .item(SnapshotItem::cell(ip(1, 0), Rect::new(0.0, 50.0, 10.0, 60.0)))
            .item(SnapshotItem::cell(ip(0, 1), Rect::new(20.0, 0.0, 30.0, 10.0)).selectable(false))
            .item(SnapshotItem::cell(ip(0, 0), Rect::new(0.0, 0.0, 10.0, 10.0)))
            .item(SnapshotItem::cell(ip(1, 1), Rect::new(20.0, 50.0, 30.0, 60.0)).hidden(true))
            .item(SnapshotItem::supplementary(ip(0, 0), Rect::new(0.0, 30.0, 30.0, 40.0)))
            .build();
        assert_eq!(snapshot.len(), 4);
        assert!(!snapshot.is_eligible(ip(0, 1)));
        assert!(!snapshot.is_eligible(ip(1, 1)));
        assert_eq!(snapshot.first_eligible(), Some(ip(0, 0)));
        assert_eq!(snapshot.last_eligible(), Some(ip(1, 0)));
        assert_eq!(snapshot.eligible_after(ip(0, 0)), Some(ip(1, 0)));
        assert_eq!(snapshot.eligible_before(ip(1, 0)), Some(ip(0, 0)));
        assert_eq!(snapshot.eligible_after(ip(1, 0)), None);
        assert_eq!(snapshot.any_after(ip(0, 0)), Some(ip(0, 1)));
        assert_eq!(snapshot.any_before(ip(0, 0)), None);
        assert_eq!(snapshot.any_after(ip(1, 1)), None);
        // The header shares a key with a cell but is not part of the directory.
        assert_eq!(snapshot.rect_for(ip(0, 0)), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn transparent_cells_are_skipped_from_either_end() {
        let snapshot = LayoutSnapshot::builder()
            .item(SnapshotItem::cell(ip(0, 0), Rect::new(0.0, 0.0, 10.0, 10.0)))
            .item(SnapshotItem::cell(ip(0, 1), Rect::new(20.0, 0.0, 30.0, 10.0)))
            .item(SnapshotItem::cell(ip(0, 2), Rect::new(40.0, 0.0, 50.0, 10.0)).opacity(0.0))
            .build();
        assert!(!snapshot.is_eligible(ip(0, 2)));
        assert_eq!(snapshot.last_eligible(), Some(ip(0, 1)));
        assert_eq!(snapshot.eligible_after(ip(0, 1)), None);
        assert_eq!(snapshot.any_after(ip(0, 1)), Some(ip(0, 2)));
        let reversed: Vec<_> = snapshot.cells().rev().map(|c| c.id).collect();
        assert_eq!(reversed, vec![ip(0, 2), ip(0, 1), ip(0, 0)]);
        assert_eq!(snapshot.cells().len(), 3);
    }

    #[test]
    fn content_rect_is_union_unless_declared() {
        let grid = LayoutSnapshot::grid(2, 3, Size::new(10.0, 10.0), 2.0);
        assert_eq!(grid.content_rect(), Rect::new(0.0, 0.0, 34.0, 22.0));
        let declared = LayoutSnapshot::builder()
            .content_size(Size::new(500.0, 300.0))
            .items(grid.cells().cloned())
            .build();
        assert_eq!(declared.content_rect(), Rect::new(0.0, 0.0, 500.0, 300.0));
        assert!(LayoutSnapshot::<IndexPath>::builder().build().is_empty());
    }
}
