// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_keynav --heading-base-level=0

//! Understory Keynav: hardware-keyboard navigation for item containers.
//!
//! This crate decides which item of a grid, list, or free-form collection a
//! key press should select next. It models navigation as:
//! - **Requests**: a [`Direction`] (arrow key) and a [`Step`] (nearest item,
//!   nearest item for a reorder, or the far end).
//! - **Collaborators** supplied by the host: a [`GeometryProvider`] answering
//!   "where is this item" and "what lies in this rectangle", and an
//!   [`ItemDirectory`] answering "what comes before/after" and "may this item
//!   be selected", bundled with [`LayoutTraits`] into a [`LayoutView`].
//! - **Resolvers** that turn a request into a proposed target:
//!   - [`SpatialResolver`]: a two-phase windowed search ahead of the current
//!     item, ranked by directed distance, then transverse distance, then key.
//!   - [`Navigator::resolve_linear`]: for layouts that flow as one sequence,
//!     movement along the flow follows enumeration order.
//!   - [`normalize`]: maps visual directions onto layout coordinates for
//!     mirrored (right-to-left) layouts.
//! - A [`Navigator`] that picks the right resolver, applies the configured
//!   [`WrapMode`], and translates key presses into [`KeyOutcome`]s.
//!
//! The crate never owns the selection. Every call reads a snapshot of the
//! layout and returns a proposal; applying it is up to the host.
//!
//! ## Minimal example
//!
//! A 3×3 grid keyed by `(row, column)`:
//!
//! ```rust
//! # #[cfg(feature = "snapshot")]
//! # {
//! use kurbo::Size;
//! use understory_keynav::{
//!     Direction, IndexPath, LayoutSnapshot, LayoutTraits, LayoutView, NavConfig, Navigator,
//!     Step, WrapMode,
//! };
//!
//! let grid = LayoutSnapshot::grid(3, 3, Size::new(100.0, 100.0), 10.0);
//! let view = LayoutView::new(&grid, &grid, LayoutTraits::default());
//!
//! let nav = Navigator::default();
//! let origin = Some(IndexPath::new(0, 0));
//! assert_eq!(
//!     nav.resolve(origin, Direction::Right, Step::Closest, &view),
//!     Some(IndexPath::new(0, 1))
//! );
//! // Nothing above the top row…
//! assert_eq!(nav.resolve(origin, Direction::Up, Step::Closest, &view), None);
//!
//! // …unless wrapping is enabled, which jumps to the bottom of the column.
//! let wrapping = Navigator::new(NavConfig {
//!     wrap: WrapMode::Wrap,
//!     ..NavConfig::default()
//! });
//! assert_eq!(
//!     wrapping.resolve(origin, Direction::Up, Step::Closest, &view),
//!     Some(IndexPath::new(2, 0))
//! );
//! # }
//! ```
//!
//! ## Key handling
//!
//! [`Navigator::dispatch`] maps a key press straight to an outcome:
//!
//! ```rust
//! # #[cfg(feature = "snapshot")]
//! # {
//! use kurbo::Size;
//! use understory_keynav::{
//!     IndexPath, KeyOutcome, LayoutSnapshot, LayoutTraits, LayoutView, Modifiers, NavKey,
//!     Navigator,
//! };
//!
//! let grid = LayoutSnapshot::grid(1, 4, Size::new(50.0, 50.0), 0.0);
//! let view = LayoutView::new(&grid, &grid, LayoutTraits::default());
//! let nav = Navigator::default();
//!
//! let origin = Some(IndexPath::new(0, 0));
//! let outcome = nav.dispatch(origin, NavKey::Right, Modifiers::COMMAND, &view);
//! assert_eq!(outcome, KeyOutcome::Select(IndexPath::new(0, 3)));
//! # }
//! ```
//!
//! The core types are generic over the item key `K`, which must be `Copy + Ord`: the
//! order is used as the final tie-break, so results are deterministic.
//! [`IndexPath`] is provided for sectioned containers.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `snapshot` (default): enables [`LayoutSnapshot`], a frozen layout implementing both
//!   collaborator traits on top of a uniform bucket grid (pulls in `hashbrown` and `smallvec`).
//!
//! ## Logging
//!
//! Decision points emit `tracing` events at `trace` and `debug` level. The
//! crate never installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dispatch;
pub mod linear;
mod navigator;
pub mod normalize;
mod provider;
mod resolver;
mod search;
#[cfg(feature = "snapshot")]
mod snapshot;
mod types;

pub use config::{NavConfig, SearchTuning, TuningError, WrapMode};
pub use dispatch::{KeyOutcome, Modifiers, NavKey, NavRequest};
pub use linear::LinearMovement;
pub use navigator::Navigator;
pub use provider::{Candidate, ElementKind, GeometryProvider, ItemDirectory, LayoutView};
pub use resolver::SpatialResolver;
#[cfg(feature = "snapshot")]
pub use snapshot::{LayoutSnapshot, SnapshotBuilder, SnapshotItem};
pub use types::{Axis, Direction, IndexPath, LayoutDirection, LayoutKind, LayoutTraits, Step};
