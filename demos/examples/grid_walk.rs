// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard walk over a sectioned photo grid.
//!
//! This example shows how a host would:
//! - copy its layout into a `LayoutSnapshot` after a layout pass,
//! - feed key presses to `Navigator::dispatch`,
//! - and apply the resulting `KeyOutcome` to a selection it owns.
//!
//! Run:
//! - `cargo run -p understory_keynav_demos --example grid_walk`
//! - `KEYNAV_LOG=trace cargo run -p understory_keynav_demos --example grid_walk`

use kurbo::{Rect, Size};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_keynav::{
    Axis, IndexPath, KeyOutcome, LayoutKind, LayoutSnapshot, LayoutTraits, LayoutView, Modifiers,
    NavConfig, NavKey, Navigator, SnapshotItem, WrapMode,
};

const COLUMNS: usize = 4;
const TILE: f64 = 120.0;
const GAP: f64 = 8.0;
const HEADER: f64 = 32.0;

fn init_logging() {
    // `KEYNAV_LOG` wins over `RUST_LOG`; an unparseable value falls through.
    let filter = std::env::var("KEYNAV_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .compact()
        .init();
}

/// Two sections of photos, each under a header. The third photo of the
/// first section is still loading and cannot be selected.
fn photo_library(section_sizes: &[usize]) -> LayoutSnapshot<IndexPath> {
    let mut builder = LayoutSnapshot::builder();
    let mut y = 0.0;
    for (section, &count) in section_sizes.iter().enumerate() {
        let width = COLUMNS as f64 * (TILE + GAP) - GAP;
        builder = builder.item(SnapshotItem::supplementary(
            IndexPath::new(section, 0),
            Rect::new(0.0, y, width, y + HEADER),
        ));
        y += HEADER + GAP;
        for item in 0..count {
            let x = (item % COLUMNS) as f64 * (TILE + GAP);
            let top = y + (item / COLUMNS) as f64 * (TILE + GAP);
            let loading = section == 0 && item == 2;
            builder = builder.item(
                SnapshotItem::cell(
                    IndexPath::new(section, item),
                    Rect::from_origin_size((x, top), Size::new(TILE, TILE)),
                )
                .selectable(!loading),
            );
        }
        y += count.div_ceil(COLUMNS) as f64 * (TILE + GAP);
    }
    builder.build()
}

fn main() {
    init_logging();

    let library = photo_library(&[6, 5]);
    let traits = LayoutTraits::new(LayoutKind::LinearFlow {
        scroll_axis: Axis::Vertical,
    });
    let view = LayoutView::new(&library, &library, traits);
    let nav = Navigator::new(NavConfig {
        wrap: WrapMode::Wrap,
        ..NavConfig::default()
    });

    let script = [
        (NavKey::Right, Modifiers::empty()),
        (NavKey::Right, Modifiers::empty()),
        (NavKey::Right, Modifiers::empty()),
        (NavKey::Down, Modifiers::empty()),
        (NavKey::Down, Modifiers::empty()),
        (NavKey::Right, Modifiers::COMMAND | Modifiers::ALT),
        (NavKey::Down, Modifiers::COMMAND),
        (NavKey::Home, Modifiers::empty()),
        (NavKey::Up, Modifiers::SHIFT),
    ];

    let mut selection: Option<IndexPath> = None;
    for (key, modifiers) in script {
        let outcome = nav.dispatch(selection, key, modifiers, &view);
        match outcome {
            KeyOutcome::Select(target) => selection = Some(target),
            KeyOutcome::Move { from, to } => {
                // A real host would reorder its data source here and keep
                // the moved item selected at its new position.
                info!(?from, ?to, "reorder requested");
                selection = Some(to);
            }
            KeyOutcome::Consumed | KeyOutcome::Ignored => {}
        }
        println!(
            "{key:?} {modifiers:?} -> {outcome:?}; selection = {selection:?} (handled: {})",
            outcome.is_handled()
        );
    }
}
