// Example: drive a two-tab view through a scroll, a tab switch and a pull-to-refresh.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use collapsible_tabs::{
    HostBody, ListHandle, PlatformFamily, RefreshError, SceneEvent, SceneProps, TabHost,
    TabRoute, TabViewOptions,
};

fn main() {
    let routes = vec![TabRoute::new("posts", "Posts"), TabRoute::new("likes", "Likes")];
    let options = TabViewOptions::default().with_platform(PlatformFamily::DirectListPull);

    let tickets = Rc::new(RefCell::new(Vec::new()));
    let mut host = TabHost::new(routes, options, |props: SceneProps<'_>| {
        format!("scene {} (focused: {})", props.route.key, props.focused)
    })
    .expect("valid routes")
    .with_header(|route| format!("header for {}", route.title))
    .with_refresh({
        let tickets = Rc::clone(&tickets);
        move |ticket| tickets.borrow_mut().push(ticket)
    })
    .with_tab_change(|index| println!("tab changed to {index}"));

    // Until the header is measured the host renders its loading view.
    println!("before layout: {:?}", host.render().body);
    host.on_header_layout(120.0);

    // Each list simulates an engine: scroll commands land in `position` and, for the active
    // list, are reported back through the shared signal.
    let positions: Vec<Rc<Cell<f32>>> = (0..2).map(|_| Rc::new(Cell::new(0.0))).collect();
    for (key, position) in ["posts", "likes"].into_iter().zip(&positions) {
        let signal = host.signal().clone();
        let position = Rc::clone(position);
        host.register_list(ListHandle::new(key, move |offset: f32, animated: bool| {
            println!("  {key}: scroll_to_offset({offset:.1}, animated: {animated})");
            position.set(offset);
            signal.report(key, offset);
        }));
    }

    // The user scrolls "posts" halfway through the header.
    for offset in [20.0, 40.0, 60.0] {
        host.synchronizer_mut().on_active_scroll_changed(offset);
    }
    host.handle_scene_event(
        SceneEvent::MomentumScrollEnd {
            key: "posts".to_owned(),
        },
        0,
    );
    println!(
        "header y={:.1} tab bar y={:.1} likes at {:.1}",
        host.synchronizer().header_translate_y(),
        host.synchronizer().tab_bar_translate_y(),
        positions[1].get()
    );

    host.on_index_change(1);
    if let HostBody::Tabs { tab_bar, .. } = host.render().body {
        for label in tab_bar.labels {
            println!("label {} opacity {}", label.title, label.opacity);
        }
    }

    // Pull the header down well past the refresh distance.
    host.synchronizer_mut().on_active_scroll_changed(0.0);
    host.on_header_touch_start();
    if host.should_claim_header_drag(30.0) {
        host.on_header_drag_start();
        for dy in [30.0, 200.0, 500.0] {
            host.on_header_drag_move(dy);
        }
        let phase = host.on_header_drag_end(0.0, 100);
        println!("released: {phase:?}");
    }

    let Some(ticket) = tickets.borrow_mut().pop() else {
        println!("no refresh started");
        return;
    };
    let result = host.finish_refresh(ticket, Err(RefreshError::new("offline")), 400);
    println!(
        "refresh result: {result:?}, still refreshing: {}",
        host.synchronizer().is_refreshing()
    );

    let mut now_ms = 400;
    while host.tick(now_ms) {
        now_ms += 16;
    }
    println!("settled: {:?}", host.synchronizer().phase());
}
