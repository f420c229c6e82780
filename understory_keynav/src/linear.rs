// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuation rules for linear-flow layouts.
//!
//! In a flowing grid or list, items form a single sequence that wraps across
//! rows (or columns). Moving "left" from the first item of a row should land
//! on the last item of the previous row, which a spatial search cannot find.
//! Along the flow, movement therefore follows enumeration order; across the
//! flow it stays spatial.
//!
//! | scroll axis | up        | down     | left                  | right                 |
//! |-------------|-----------|----------|-----------------------|-----------------------|
//! | vertical    | spatial   | spatial  | back (LTR), fwd (RTL) | fwd (LTR), back (RTL) |
//! | horizontal  | backwards | forwards | spatial               | spatial               |

use core::fmt::Debug;

use tracing::trace;

use crate::navigator::Navigator;
use crate::provider::{GeometryProvider, ItemDirectory, LayoutView};
use crate::types::{Axis, Direction, LayoutDirection, Step};

/// How a key direction moves through a linear-flow layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LinearMovement {
    /// One position later in enumeration order.
    Forwards,
    /// One position earlier in enumeration order.
    Backwards,
    /// Across the flow; resolved by spatial search.
    Spatial,
}

/// Classify a key direction for a linear-flow layout.
#[must_use]
pub const fn classify(
    scroll_axis: Axis,
    direction: Direction,
    layout_direction: LayoutDirection,
) -> LinearMovement {
    let rtl = matches!(layout_direction, LayoutDirection::RightToLeft);
    match (scroll_axis, direction) {
        (Axis::Vertical, Direction::Up | Direction::Down)
        | (Axis::Horizontal, Direction::Left | Direction::Right) => LinearMovement::Spatial,
        (Axis::Horizontal, Direction::Up) => LinearMovement::Backwards,
        (Axis::Horizontal, Direction::Down) => LinearMovement::Forwards,
        (Axis::Vertical, Direction::Left) => {
            if rtl {
                LinearMovement::Forwards
            } else {
                LinearMovement::Backwards
            }
        }
        (Axis::Vertical, Direction::Right) => {
            if rtl {
                LinearMovement::Backwards
            } else {
                LinearMovement::Forwards
            }
        }
    }
}

impl Navigator {
    /// Resolve a request for a layout that flows as one sequence.
    ///
    /// Along the flow:
    /// - [`Step::Closest`] moves one eligible item in enumeration order and
    ///   falls back to the first (forwards) or last (backwards) eligible item
    ///   when there is no selection or the sequence runs out. A fallback that
    ///   lands on `current` reports no target.
    /// - [`Step::ClosestForMoving`] moves one item regardless of eligibility
    ///   and reports no target at either end.
    ///
    /// Across the flow, and for [`Step::End`], the request is resolved
    /// spatially.
    pub fn resolve_linear<K, G, D>(
        &self,
        current: Option<K>,
        direction: Direction,
        step: Step,
        scroll_axis: Axis,
        layout_direction: LayoutDirection,
        view: &LayoutView<'_, G, D>,
    ) -> Option<K>
    where
        K: Copy + Ord + Debug,
        G: GeometryProvider<K> + ?Sized,
        D: ItemDirectory<K> + ?Sized,
    {
        let movement = classify(scroll_axis, direction, layout_direction);
        trace!(?direction, ?movement, ?step, "linear classification");
        let forwards = match movement {
            LinearMovement::Spatial => {
                return self.resolve_spatial(current, direction, step, view);
            }
            LinearMovement::Forwards => true,
            LinearMovement::Backwards => false,
        };
        let directory = view.directory;
        match step {
            Step::End => self.resolve_spatial(current, direction, step, view),
            Step::ClosestForMoving => {
                let current = current?;
                if forwards {
                    directory.any_after(current)
                } else {
                    directory.any_before(current)
                }
            }
            Step::Closest => {
                let next = match (current, forwards) {
                    (Some(c), true) => directory.eligible_after(c),
                    (Some(c), false) => directory.eligible_before(c),
                    (None, _) => None,
                };
                let target = next.or_else(|| {
                    if forwards {
                        directory.first_eligible()
                    } else {
                        directory.last_eligible()
                    }
                });
                if target.is_some() && target == current {
                    trace!(?current, "sequence fallback landed on the current item");
                    return None;
                }
                target
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        use LayoutDirection::{LeftToRight as Ltr, RightToLeft as Rtl};
        use LinearMovement::{Backwards, Forwards, Spatial};

        assert_eq!(classify(Axis::Vertical, Direction::Up, Ltr), Spatial);
        assert_eq!(classify(Axis::Vertical, Direction::Down, Rtl), Spatial);
        assert_eq!(classify(Axis::Vertical, Direction::Left, Ltr), Backwards);
        assert_eq!(classify(Axis::Vertical, Direction::Left, Rtl), Forwards);
        assert_eq!(classify(Axis::Vertical, Direction::Right, Ltr), Forwards);
        assert_eq!(classify(Axis::Vertical, Direction::Right, Rtl), Backwards);
        assert_eq!(classify(Axis::Horizontal, Direction::Up, Rtl), Backwards);
        assert_eq!(classify(Axis::Horizontal, Direction::Down, Ltr), Forwards);
        assert_eq!(classify(Axis::Horizontal, Direction::Left, Ltr), Spatial);
        assert_eq!(classify(Axis::Horizontal, Direction::Right, Rtl), Spatial);
    }

    #[cfg(feature = "snapshot")]
    mod flow {
        use super::super::*;
        use crate::config::{NavConfig, WrapMode};
        use crate::snapshot::{LayoutSnapshot, SnapshotItem};
        use crate::types::{IndexPath, LayoutKind, LayoutTraits};
        use kurbo::{Rect, Size};

        fn ip(item: usize) -> IndexPath {
            IndexPath::new(0, item)
        }

        fn vertical_flow() -> LayoutTraits {
            LayoutTraits::new(LayoutKind::LinearFlow {
                scroll_axis: Axis::Vertical,
            })
        }

        #[test]
        fn right_from_row_end_continues_on_next_row() {
            // 7 items, 3 per row.
            let flow = LayoutSnapshot::flow(7, 3, Size::new(50.0, 50.0), 5.0);
            let view = LayoutView::new(&flow, &flow, vertical_flow());
            let nav = Navigator::default();
            assert_eq!(
                nav.resolve(Some(ip(2)), Direction::Right, Step::Closest, &view),
                Some(ip(3))
            );
            assert_eq!(
                nav.resolve(Some(ip(3)), Direction::Left, Step::Closest, &view),
                Some(ip(2))
            );
            // Across the flow the search stays spatial.
            assert_eq!(
                nav.resolve(Some(ip(1)), Direction::Down, Step::Closest, &view),
                Some(ip(4))
            );
            assert_eq!(
                nav.resolve(Some(ip(5)), Direction::Down, Step::Closest, &view),
                None
            );
        }

        #[test]
        fn sequence_boundaries() {
            let flow = LayoutSnapshot::flow(5, 2, Size::new(50.0, 50.0), 5.0);
            let view = LayoutView::new(&flow, &flow, vertical_flow());
            let nav = Navigator::default();
            assert_eq!(
                nav.resolve(Some(ip(4)), Direction::Right, Step::Closest, &view),
                Some(ip(0))
            );
            assert_eq!(
                nav.resolve(Some(ip(4)), Direction::Right, Step::ClosestForMoving, &view),
                None
            );
            assert_eq!(
                nav.resolve(Some(ip(0)), Direction::Left, Step::Closest, &view),
                Some(ip(4))
            );
            assert_eq!(
                nav.resolve(Some(ip(0)), Direction::Left, Step::ClosestForMoving, &view),
                None
            );
            assert_eq!(
                nav.resolve(None, Direction::Left, Step::Closest, &view),
                Some(ip(4))
            );
            assert_eq!(
                nav.resolve(None, Direction::Right, Step::ClosestForMoving, &view),
                None
            );
        }

        #[test]
        fn moving_walks_past_unselectable_items() {
            let flow = LayoutSnapshot::builder()
                .item(SnapshotItem::cell(ip(0), Rect::new(0.0, 0.0, 10.0, 10.0)))
                .item(SnapshotItem::cell(ip(1), Rect::new(20.0, 0.0, 30.0, 10.0)).selectable(false))
                .item(SnapshotItem::cell(ip(2), Rect::new(40.0, 0.0, 50.0, 10.0)))
                .build();
            let view = LayoutView::new(&flow, &flow, vertical_flow());
            let nav = Navigator::default();
            assert_eq!(
                nav.resolve(Some(ip(0)), Direction::Right, Step::Closest, &view),
                Some(ip(2))
            );
            assert_eq!(
                nav.resolve(Some(ip(0)), Direction::Right, Step::ClosestForMoving, &view),
                Some(ip(1))
            );
        }

        #[test]
        fn transparent_cells_are_skipped_like_the_spatial_search() {
            let cells = [
                SnapshotItem::cell(ip(0), Rect::new(0.0, 0.0, 10.0, 10.0)),
                SnapshotItem::cell(ip(1), Rect::new(20.0, 0.0, 30.0, 10.0)).opacity(0.0),
                SnapshotItem::cell(ip(2), Rect::new(40.0, 0.0, 50.0, 10.0)),
            ];
            let flow = LayoutSnapshot::builder().items(cells).build();
            let nav = Navigator::default();
            let linear = LayoutView::new(&flow, &flow, vertical_flow());
            let spatial = LayoutView::new(&flow, &flow, LayoutTraits::default());
            assert_eq!(
                nav.resolve(Some(ip(0)), Direction::Right, Step::Closest, &linear),
                Some(ip(2))
            );
            assert_eq!(
                nav.resolve(Some(ip(0)), Direction::Right, Step::Closest, &spatial),
                Some(ip(2))
            );
            assert_eq!(
                nav.resolve(Some(ip(2)), Direction::Left, Step::Closest, &linear),
                Some(ip(0))
            );
        }

        #[test]
        fn lone_item_does_not_wrap_onto_itself() {
            let flow = LayoutSnapshot::flow(1, 4, Size::new(50.0, 50.0), 5.0);
            let view = LayoutView::new(&flow, &flow, vertical_flow());
            assert_eq!(
                Navigator::default().resolve(Some(ip(0)), Direction::Right, Step::Closest, &view),
                None
            );
        }

        #[test]
        fn right_to_left_flow_reverses_horizontal_keys() {
            let flow = LayoutSnapshot::flow(6, 3, Size::new(50.0, 50.0), 5.0);
            let traits = LayoutTraits {
                effective_direction: LayoutDirection::RightToLeft,
                flips_in_opposite_layout_direction: true,
                ..vertical_flow()
            };
            let view = LayoutView::new(&flow, &flow, traits);
            let nav = Navigator::default();
            assert_eq!(
                nav.resolve(Some(ip(2)), Direction::Left, Step::Closest, &view),
                Some(ip(3))
            );
            // End is spatial and mirrored: visual left is geometric right.
            assert_eq!(
                nav.resolve(Some(ip(3)), Direction::Left, Step::End, &view),
                Some(ip(5))
            );
        }

        #[test]
        fn horizontal_flow_uses_vertical_keys_for_sequence() {
            let flow = LayoutSnapshot::flow(4, 2, Size::new(50.0, 50.0), 5.0);
            let traits = LayoutTraits::new(LayoutKind::LinearFlow {
                scroll_axis: Axis::Horizontal,
            });
            let view = LayoutView::new(&flow, &flow, traits);
            let nav = Navigator::new(NavConfig {
                wrap: WrapMode::Wrap,
                ..NavConfig::default()
            });
            assert_eq!(
                nav.resolve(Some(ip(1)), Direction::Down, Step::Closest, &view),
                Some(ip(2))
            );
            assert_eq!(
                nav.resolve(Some(ip(0)), Direction::Up, Step::Closest, &view),
                Some(ip(3))
            );
            // Spatial with wrap: right from the end of a row wraps to its start.
            assert_eq!(
                nav.resolve(Some(ip(1)), Direction::Right, Step::Closest, &view),
                Some(ip(0))
            );
        }
    }
}
