// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation of key presses into navigation requests and outcomes.
//!
//! | keys                     | request                                   |
//! |--------------------------|-------------------------------------------|
//! | arrow                    | that direction, [`Step::Closest`]          |
//! | ⌘ + arrow                | that direction, [`Step::End`]              |
//! | ⌥ ⌘ + arrow              | that direction, [`Step::ClosestForMoving`] |
//! | Home / End               | start / end of the scroll axis, [`Step::End`] |
//!
//! Shift and Control are left to the host (range selection, system
//! shortcuts) and are never handled here.

use core::fmt::Debug;

use bitflags::bitflags;
use tracing::debug;

use crate::navigator::Navigator;
use crate::provider::{GeometryProvider, ItemDirectory, LayoutView};
use crate::types::{Axis, Direction, LayoutDirection, LayoutTraits, Step};

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CONTROL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Command / Meta.
        const COMMAND = 1 << 3;
    }
}

/// Keys that can produce a navigation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
}

/// A direction paired with a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NavRequest {
    /// Requested (visual) direction.
    pub direction: Direction,
    /// Requested granularity.
    pub step: Step,
}

impl NavRequest {
    /// Map a key press to a request, or `None` if the combination is not a
    /// navigation shortcut.
    ///
    /// Home and End follow the layout's scroll axis (vertical when the layout
    /// declares none) and, along a horizontal axis, its rendered direction.
    #[must_use]
    pub fn from_key(key: NavKey, modifiers: Modifiers, traits: &LayoutTraits) -> Option<Self> {
        if modifiers.intersects(Modifiers::SHIFT | Modifiers::CONTROL) {
            return None;
        }
        let arrow = |direction| {
            let step = if modifiers.contains(Modifiers::COMMAND | Modifiers::ALT) {
                Step::ClosestForMoving
            } else if modifiers.contains(Modifiers::COMMAND) {
                Step::End
            } else if modifiers.is_empty() {
                Step::Closest
            } else {
                return None;
            };
            Some(Self { direction, step })
        };
        match key {
            NavKey::Up => arrow(Direction::Up),
            NavKey::Down => arrow(Direction::Down),
            NavKey::Left => arrow(Direction::Left),
            NavKey::Right => arrow(Direction::Right),
            NavKey::Home | NavKey::End => {
                if !modifiers.is_empty() {
                    return None;
                }
                let towards_end = key == NavKey::End;
                let direction = match traits.kind.scroll_axis().unwrap_or(Axis::Vertical) {
                    Axis::Vertical => {
                        if towards_end {
                            Direction::Down
                        } else {
                            Direction::Up
                        }
                    }
                    Axis::Horizontal => {
                        let rtl = traits.effective_direction == LayoutDirection::RightToLeft;
                        if towards_end != rtl {
                            Direction::Right
                        } else {
                            Direction::Left
                        }
                    }
                };
                Some(Self {
                    direction,
                    step: Step::End,
                })
            }
        }
    }
}

/// What the host should do with a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyOutcome<K> {
    /// Select (and reveal) this item.
    Select(K),
    /// Move the item at `from` to the position of `to`.
    Move {
        /// Item being moved.
        from: K,
        /// Destination position.
        to: K,
    },
    /// The key was handled but nothing changes.
    Consumed,
    /// The key was not handled; pass it to the next responder.
    Ignored,
}

impl<K> KeyOutcome<K> {
    /// Whether the host should stop propagating the key event.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl Navigator {
    /// Handle a key press for a container whose selection is `current`.
    ///
    /// A navigation key on a container with content is always handled, even
    /// when no target is found, so the key does not leak to an outer
    /// responder. An empty container lets every key through, as does a
    /// reorder shortcut when the directory does not support reordering.
    pub fn dispatch<K, G, D>(
        &self,
        current: Option<K>,
        key: NavKey,
        modifiers: Modifiers,
        view: &LayoutView<'_, G, D>,
    ) -> KeyOutcome<K>
    where
        K: Copy + Ord + Debug,
        G: GeometryProvider<K> + ?Sized,
        D: ItemDirectory<K> + ?Sized,
    {
        let Some(request) = NavRequest::from_key(key, modifiers, &view.traits) else {
            return KeyOutcome::Ignored;
        };
        if view.directory.is_empty() {
            return KeyOutcome::Ignored;
        }
        let outcome = if request.step == Step::ClosestForMoving {
            if !view.directory.supports_keyboard_reordering() {
                return KeyOutcome::Ignored;
            }
            match current {
                Some(from) => {
                    match self.resolve(Some(from), request.direction, request.step, view) {
                        Some(to) => KeyOutcome::Move { from, to },
                        None => KeyOutcome::Consumed,
                    }
                }
                None => KeyOutcome::Consumed,
            }
        } else {
            match self.resolve(current, request.direction, request.step, view) {
                Some(target) if Some(target) != current => KeyOutcome::Select(target),
                _ => KeyOutcome::Consumed,
            }
        };
        debug!(?key, ?request, ?outcome, "dispatched navigation key");
        outcome
    }
}
