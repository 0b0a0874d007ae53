// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tour flows against the in-memory host.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use understory_tour::{Router, Tour, TourConfig, TourId};
use understory_tour_ref::{ElementId, Op, RefHost};

struct Page {
    host: RefHost,
    container: ElementId,
    popups: Vec<ElementId>,
    link: ElementId,
    close: ElementId,
}

/// `#tour` with popups `a`, `b`, `c`. `b` points to `#link` and appends `#x`.
fn page() -> Page {
    let mut host = RefHost::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let link = host.add(None, &[("id", "link"), ("href", "/docs?q=1#old")]);
    host.set_bounds(link, Rect::new(300.0, 200.0, 380.0, 220.0));
    let container = host.add(None, &[("id", "tour")]);
    let popups = vec![
        host.add(Some(container), &[("id", "a")]),
        host.add(
            Some(container),
            &[("id", "b"), ("points-to", "#link"), ("position", "left"), ("append-hash", "x")],
        ),
        host.add(Some(container), &[("id", "c")]),
    ];
    for popup in &popups {
        host.set_bounds(*popup, Rect::new(0.0, 0.0, 100.0, 40.0));
    }
    let close = host.add(Some(popups[1]), &[("class", "tour-close")]);
    Page {
        host,
        container,
        popups,
        link,
        close,
    }
}

fn record(tour: &mut Tour<ElementId>, names: &[&str]) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for name in names {
        let log = Rc::clone(&log);
        tour.on_name(name, move |e| log.borrow_mut().push(e.to_string()));
    }
    log
}

fn visible_popups(page: &Page) -> Vec<usize> {
    (0..page.popups.len())
        .filter(|&i| page.host.is_visible(page.popups[i]))
        .collect()
}

fn register(page: &mut Page, config: TourConfig) -> (Router<ElementId>, TourId) {
    let tour = Tour::new(&mut page.host, "#tour", config).unwrap();
    let mut router = Router::new();
    let id = router.register(&mut page.host, tour);
    (router, id)
}

#[test]
fn construction_hides_container_and_takes_popups_out_of_flow() {
    let mut page = page();
    let (router, id) = register(&mut page, TourConfig::default());

    assert!(!page.host.is_visible(page.container));
    assert!(visible_popups(&page).is_empty());
    assert!(page.popups.iter().all(|p| page.host.is_out_of_flow(*p)));
    assert_eq!(router.get(id).unwrap().popups().len(), 3);
}

#[test]
fn deep_link_at_load_shows_named_popup() {
    let mut page = page();
    page.host.navigate("#b");
    let mut tour = Tour::new(&mut page.host, "#tour", TourConfig::default()).unwrap();
    let log = record(&mut tour, &["a", "b:before", "b"]);
    let mut router = Router::new();
    let id = router.register(&mut page.host, tour);

    assert_eq!(router.get(id).unwrap().current_index(), Some(1));
    assert!(page.host.is_visible(page.container));
    assert_eq!(visible_popups(&page), [1]);
    assert_eq!(*log.borrow(), ["b:before", "b"]);
}

#[test]
fn start_without_fragment_shows_first_popup() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());
    router.get_mut(id).unwrap().start(&mut page.host).unwrap();
    assert_eq!(visible_popups(&page), [0]);
}

#[test]
fn show_leaves_exactly_one_popup_visible() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());
    for index in [2, 0, 1, 1, 2] {
        router.get_mut(id).unwrap().navigate(&mut page.host, index).unwrap();
        assert_eq!(visible_popups(&page), [index]);
    }
}

#[test]
fn stepping_fires_hide_before_shown() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());
    let tour = router.get_mut(id).unwrap();
    tour.navigate(&mut page.host, 1).unwrap();
    let log = record(tour, &["b:hide", "c:before", "c"]);

    tour.show(&mut page.host, 2).unwrap();
    assert_eq!(*log.borrow(), ["b:hide", "c:before", "c"]);
}

#[test]
fn user_fragment_edit_routes_to_popup() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());

    page.host.navigate("c");
    assert_eq!(page.host.run_until_idle(&mut router), 2);
    assert_eq!(router.get(id).unwrap().current_index(), Some(2));

    page.host.navigate("nothing-here");
    page.host.run_until_idle(&mut router);
    assert_eq!(router.get(id).unwrap().current_index(), Some(2));
}

#[test]
fn persisted_fragment_round_trips_without_reshowing() {
    let mut page = page();
    let config = TourConfig::default().with_persist_fragment(true);
    let (mut router, id) = register(&mut page, config);

    router.get_mut(id).unwrap().navigate(&mut page.host, 2).unwrap();
    assert_eq!(page.host.current_fragment(), "c");
    page.host.clear_ops();

    // The host reports the tour's own fragment write back; nothing is reshown.
    page.host.run_until_idle(&mut router);
    let tour = router.get(id).unwrap();
    assert_eq!(tour.index_from_fragment(&page.host), Some(2));
    assert!(!page.host.ops().iter().any(|op| matches!(op, Op::Show(_))));
}

#[test]
fn second_tour_owns_fragment() {
    let mut host = RefHost::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let first = host.add(None, &[("id", "first")]);
    let first_popup = host.add(Some(first), &[("id", "one")]);
    let second = host.add(None, &[("id", "second")]);
    host.add(Some(second), &[("id", "two")]);
    let second_popup = host.add(Some(second), &[("id", "three")]);

    let tour_a = Tour::new(&mut host, "#first", TourConfig::default()).unwrap();
    let tour_b = Tour::new(&mut host, "#second", TourConfig::default()).unwrap();
    let mut router = Router::new();
    let a = router.register(&mut host, tour_a);
    let b = router.register(&mut host, tour_b);

    host.navigate("three");
    host.run_until_idle(&mut router);

    assert_eq!(router.get(b).unwrap().current_index(), Some(1));
    assert!(host.is_visible(second_popup));
    assert_eq!(router.get(a).unwrap().current_index(), None);
    assert!(!host.is_visible(first));
    assert!(!host.is_visible(first_popup));
}

#[test]
fn append_hash_restores_href_byte_for_byte() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());
    let tour = router.get_mut(id).unwrap();

    tour.navigate(&mut page.host, 1).unwrap();
    assert_eq!(page.host.attr(page.link, "href"), Some("/docs?q=1#old#x"));
    tour.show(&mut page.host, 2).unwrap();
    assert_eq!(page.host.attr(page.link, "href"), Some("/docs?q=1#old"));
}

#[test]
fn popup_is_positioned_against_its_target() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());
    router.get_mut(id).unwrap().navigate(&mut page.host, 1).unwrap();

    // `left`: the popup's right edge sits on the link's left edge.
    assert_eq!(
        page.host.bounds(page.popups[1]),
        Rect::new(200.0, 190.0, 300.0, 230.0)
    );
    router.get_mut(id).unwrap().show(&mut page.host, 0).unwrap();
    assert_eq!(
        page.host.bounds(page.popups[0]),
        Rect::new(350.0, 280.0, 450.0, 320.0)
    );
}

#[test]
fn reveal_animation_runs_after_scroll_for_current_popup_only() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());
    let tour = router.get_mut(id).unwrap();
    tour.navigate(&mut page.host, 0).unwrap();
    tour.show(&mut page.host, 1).unwrap();
    page.host.clear_ops();

    page.host.run_until_idle(&mut router);

    let animated: Vec<_> = page
        .host
        .ops()
        .iter()
        .filter_map(|op| match op {
            Op::Animate { element, .. } => Some(*element),
            _ => None,
        })
        .collect();
    assert_eq!(animated, [page.popups[1]]);
    assert_eq!(page.host.style(page.popups[1], "opacity"), Some(1.0));
    assert_eq!(page.host.style(page.popups[1], "left"), Some(-20.0));
    assert_eq!(page.host.style(page.popups[0], "opacity"), Some(0.0));
}

#[test]
fn close_button_click_closes_tour() {
    let mut page = page();
    page.host.navigate("b");
    let (mut router, id) = register(&mut page, TourConfig::default());
    let log = record(router.get_mut(id).unwrap(), &["b:hide", "hide"]);
    assert_eq!(visible_popups(&page), [1]);

    assert!(page.host.click(&mut router, page.close));

    let tour = router.get(id).unwrap();
    assert!(!tour.is_running());
    assert_eq!(tour.current_index(), None);
    assert!(visible_popups(&page).is_empty());
    assert!(!page.host.is_visible(page.container));
    assert_eq!(page.host.current_fragment(), "");
    assert_eq!(page.host.attr(page.link, "href"), Some("/docs?q=1#old"));
    assert_eq!(*log.borrow(), ["b:hide", "hide"]);

    // The cleared fragment matches nothing, so the tour stays closed.
    page.host.run_until_idle(&mut router);
    assert!(!router.get(id).unwrap().is_running());
}

#[test]
fn clicks_outside_close_buttons_are_ignored() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());
    router.get_mut(id).unwrap().start(&mut page.host).unwrap();

    assert!(!page.host.click(&mut router, page.popups[0]));
    assert!(!page.host.click(&mut router, page.link));
    assert!(router.get(id).unwrap().is_running());

    router.get_mut(id).unwrap().detach(&mut page.host);
    assert!(!page.host.click(&mut router, page.close));
    assert!(router.get(id).unwrap().is_running());
}

#[test]
fn close_from_any_state_clears_everything() {
    let mut page = page();
    let (mut router, id) = register(&mut page, TourConfig::default());

    // Never started.
    router.close(&mut page.host, id, None);
    assert!(visible_popups(&page).is_empty());
    assert_eq!(page.host.current_fragment(), "");

    // Mid-tour, with the fragment pointing at a popup.
    page.host.navigate("a");
    page.host.run_until_idle(&mut router);
    router.close(&mut page.host, id, None);
    assert!(visible_popups(&page).is_empty());
    assert_eq!(page.host.current_fragment(), "");
    assert_eq!(router.get(id).unwrap().current_index(), None);
}

#[test]
fn missing_target_still_shows_popup() {
    let mut host = RefHost::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let container = host.add(None, &[("id", "tour")]);
    let popup = host.add(Some(container), &[("id", "a"), ("points-to", "#gone")]);
    let tour = Tour::new(&mut host, "#tour", TourConfig::default()).unwrap();
    let mut router = Router::new();
    let id = router.register(&mut host, tour);

    router.get_mut(id).unwrap().start(&mut host).unwrap();

    assert!(host.is_visible(popup));
    assert!(!host.ops().iter().any(|op| matches!(op, Op::Position { .. })));
}

#[test]
fn closing_one_tour_keeps_deep_linked_tour_running() {
    let mut host = RefHost::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let first = host.add(None, &[("id", "first")]);
    host.add(Some(first), &[("id", "one")]);
    let second = host.add(None, &[("id", "second")]);
    let two = host.add(Some(second), &[("id", "two")]);

    let mut tour_a = Tour::new(&mut host, "#first", TourConfig::default()).unwrap();
    let tour_b = Tour::new(&mut host, "#second", TourConfig::default()).unwrap();
    tour_a.start(&mut host).unwrap();
    let mut router = Router::new();
    let a = router.register(&mut host, tour_a);
    let b = router.register(&mut host, tour_b);
    let log = record(router.get_mut(b).unwrap(), &["two:hide", "hide"]);

    host.navigate("two");
    host.run_until_idle(&mut router);
    router.close(&mut host, a, None);
    host.run_until_idle(&mut router);

    assert!(!router.get(a).unwrap().is_running());
    assert!(router.get(b).unwrap().is_running());
    assert!(host.is_visible(two));
    assert!(log.borrow().is_empty());
}

#[test]
fn tour_started_before_registration_still_fades_in() {
    let mut page = page();
    let mut tour = Tour::new(&mut page.host, "#tour", TourConfig::default()).unwrap();
    tour.start(&mut page.host).unwrap();
    let mut router = Router::new();
    let id = router.register(&mut page.host, tour);

    page.host.run_until_idle(&mut router);

    assert_eq!(router.get(id).unwrap().current_index(), Some(0));
    assert_eq!(page.host.style(page.popups[0], "opacity"), Some(1.0));
}
