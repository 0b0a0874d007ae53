// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the tour demos.
//!
//! - [`init_logging`] installs a line-per-record stdout logger for the `log`
//!   facade, so the tour's own `debug`/`warn` output shows up next to the
//!   demo's prints.
//! - [`DemoPage`] builds a small page in a [`RefHost`]: a navigation bar, a
//!   footer, and a `#tour` container with three popups.

use kurbo::Rect;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use understory_tour_ref::{ElementId, RefHost};

#[derive(Debug)]
struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            println!("  [{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

/// Routes `log` records up to `level` to stdout.
pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Element handles of the demo page.
#[derive(Debug)]
pub struct DemoPage {
    /// The page.
    pub host: RefHost,
    /// The `#nic-kitty` navigation link.
    pub kitty_link: ElementId,
    /// The tour container.
    pub container: ElementId,
    /// The popups, in tour order.
    pub popups: Vec<ElementId>,
    /// The close button of the last popup.
    pub close_button: ElementId,
}

impl DemoPage {
    /// Builds the page.
    ///
    /// Popups: `tour-welcome` (centred), `tour-nic-kitty` (right of the
    /// navigation link, appends `#tour-finish` to it), `tour-finish` (above
    /// the footer).
    #[must_use]
    pub fn build() -> Self {
        let mut host = RefHost::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
        let nav = host.add(None, &[("id", "nav")]);
        host.set_bounds(nav, Rect::new(0.0, 0.0, 1024.0, 48.0));
        let kitty_link = host.add(Some(nav), &[("id", "nic-kitty"), ("href", "/kitty")]);
        host.set_bounds(kitty_link, Rect::new(16.0, 12.0, 96.0, 36.0));
        let footer = host.add(None, &[("id", "footer")]);
        host.set_bounds(footer, Rect::new(0.0, 1800.0, 1024.0, 1900.0));

        let container = host.add(None, &[("id", "tour")]);
        let popups = vec![
            host.add(Some(container), &[("id", "tour-welcome")]),
            host.add(
                Some(container),
                &[
                    ("id", "tour-nic-kitty"),
                    ("data-points-to", "#nic-kitty"),
                    ("data-position", "right"),
                    ("data-append-hash", "tour-finish"),
                ],
            ),
            host.add(
                Some(container),
                &[
                    ("id", "tour-finish"),
                    ("data-points-to", "#footer"),
                    ("data-position", "top"),
                    ("data-offset-y", "200"),
                ],
            ),
        ];
        for popup in &popups {
            host.set_bounds(*popup, Rect::new(0.0, 0.0, 240.0, 120.0));
        }
        let close_button = host.add(Some(popups[2]), &[("class", "tour-close")]);
        Self {
            host,
            kitty_link,
            container,
            popups,
            close_button,
        }
    }
}
