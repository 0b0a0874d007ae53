// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tour walkthrough.
//!
//! Load a tour configuration from JSON, build a small page in the reference
//! host, and step through the tour: start, advance, follow a deep link that a
//! popup appended to a navigation link, then close with the close button.
//!
//! Run:
//! - `cargo run -p understory_tour_demos --example tour_walkthrough`

use std::error::Error;

use log::LevelFilter;
use understory_tour::{Router, Tour, TourConfig, TourEvent, TourId};
use understory_tour_demos::{DemoPage, init_logging};
use understory_tour_ref::ElementId;

fn report(page: &DemoPage, router: &Router<ElementId>, id: TourId) {
    let Some(tour) = router.get(id) else {
        return;
    };
    let current = tour.current().map_or("(none)", |p| p.id());
    let fragment = page.host.current_fragment();
    let href = page.host.attr(page.kitty_link, "href").unwrap_or("");
    println!("  current: {current}, fragment: #{fragment}, kitty href: {href}");
    if let Some(popup) = tour.current() {
        let element = *popup.element();
        let origin = page.host.bounds(element).origin();
        let opacity = page.host.style(element, "opacity").unwrap_or(1.0);
        println!("  at ({}, {}), opacity {opacity}", origin.x, origin.y);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging(LevelFilter::Debug)?;

    let config: TourConfig = serde_json::from_str(include_str!("../tour.json"))?;
    let mut page = DemoPage::build();
    let mut tour = Tour::new(&mut page.host, "#tour", config)?;

    tour.on_name("tour-nic-kitty", |_| {
        println!("  handler: the kitty link now leads to the last step");
    });
    tour.on_name("tour-nic-kitty:hide", |_| {
        println!("  handler: the kitty link is back to normal");
    });
    tour.on_name("tour-finish:before", |event| {
        let id = event.popup_id().unwrap_or_default();
        println!("  handler: `{id}` is next");
    });
    tour.on(TourEvent::Closed, |event| {
        println!("  handler: `{event}`, thanks for taking the tour");
    });

    let mut router = Router::new();
    let id = router.register(&mut page.host, tour);

    println!("Start:");
    router
        .get_mut(id)
        .ok_or("tour not registered")?
        .start(&mut page.host)?;
    page.host.run_until_idle(&mut router);
    report(&page, &router, id);

    println!("Advance to `tour-nic-kitty`:");
    router
        .get_mut(id)
        .ok_or("tour not registered")?
        .show_id(&mut page.host, "tour-nic-kitty")?;
    page.host.run_until_idle(&mut router);
    report(&page, &router, id);

    println!("Follow the kitty link:");
    let href = page
        .host
        .attr(page.kitty_link, "href")
        .unwrap_or_default()
        .to_owned();
    if let Some((_, fragment)) = href.rsplit_once('#') {
        page.host.navigate(fragment);
    }
    page.host.run_until_idle(&mut router);
    report(&page, &router, id);

    println!("Click the close button:");
    let prevented = page.host.click(&mut router, page.close_button);
    println!("  default action prevented: {prevented}");
    page.host.run_until_idle(&mut router);
    report(&page, &router, id);
    let running = router.get(id).is_some_and(|t| t.is_running());
    println!(
        "  running: {running}, container visible: {}, popups visible: {}",
        page.host.is_visible(page.container),
        page.popups.iter().filter(|p| page.host.is_visible(**p)).count(),
    );

    Ok(())
}
