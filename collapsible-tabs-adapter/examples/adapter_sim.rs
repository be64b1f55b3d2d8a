// Example: a simulated engine behind each list kind, wired to a synchronizer.
use std::cell::RefCell;
use std::rc::Rc;

use collapsible_tabs::{
    PlatformFamily, ScrollHandle, Synchronizer, SynchronizerOptions, TabRoute,
};
use collapsible_tabs_adapter::{
    AnimatedList, BackendConfig, ItemLayout, ListBackend, ListItem, ListKind, PlainListOptions,
    PreloadError, RecyclingListOptions, ScrollableList, WindowedListOptions,
};

#[derive(Clone)]
struct EngineScroller {
    name: &'static str,
    offset: Rc<RefCell<f32>>,
}

impl ScrollHandle for EngineScroller {
    fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        println!("  [{}] scroll to {offset:.1} (animated: {animated})", self.name);
        *self.offset.borrow_mut() = offset;
    }
}

struct SimEngine {
    scroller: EngineScroller,
}

impl SimEngine {
    fn new(name: &'static str) -> Self {
        Self {
            scroller: EngineScroller {
                name,
                offset: Rc::new(RefCell::new(0.0)),
            },
        }
    }
}

impl ListBackend for SimEngine {
    type Handle = EngineScroller;

    fn configure(&mut self, config: &BackendConfig) {
        println!(
            "  [{}] configured: {:?}, throttle {}ms",
            self.scroller.name, config.kind, config.scroll_event_throttle_ms
        );
    }

    fn set_item_layouts(&mut self, layouts: Vec<Option<ItemLayout>>) {
        let known = layouts.iter().filter(|l| l.is_some()).count();
        println!(
            "  [{}] {known}/{} item layouts known",
            self.scroller.name,
            layouts.len()
        );
    }

    fn scroll_handle(&mut self) -> Option<EngineScroller> {
        Some(self.scroller.clone())
    }

    fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        self.scroller.scroll_to_offset(offset, animated);
    }
}

struct Photo {
    index: usize,
}

impl ListItem for Photo {
    fn height(&self) -> Option<f32> {
        Some(80.0)
    }

    fn offset(&self) -> Option<f32> {
        Some(self.index as f32 * 80.0)
    }

    fn preload(&mut self) -> Option<Result<(), PreloadError>> {
        if self.index % 3 == 2 {
            return Some(Err(PreloadError::new("thumbnail missing")));
        }
        Some(Ok(()))
    }
}

fn main() {
    let platform = PlatformFamily::current();
    let routes = vec![
        TabRoute::new("plain", "Plain"),
        TabRoute::new("windowed", "Windowed"),
        TabRoute::new("recycling", "Recycling"),
    ];
    let mut sync = Synchronizer::new(routes, SynchronizerOptions::new(platform))
        .expect("valid routes");
    sync.on_header_layout(100.0);

    let kinds = [
        ("plain", ListKind::Plain(PlainListOptions::new(platform, 80.0))),
        ("windowed", ListKind::Windowed(WindowedListOptions::new(platform))),
        (
            "recycling",
            ListKind::Recycling(RecyclingListOptions::new(platform, 80.0, 360.0).with_num_columns(2)),
        ),
    ];

    let mut lists: Vec<AnimatedList<SimEngine, Photo>> = Vec::new();
    for (key, kind) in kinds {
        let mut list = AnimatedList::new(key, sync.signal().clone(), SimEngine::new(key), kind)
            .expect("valid list kind");
        list.set_items((0..20).map(|index| Photo { index }).collect());
        if let Some(handle) = list.register() {
            sync.register_list(handle);
        }
        lists.push(list);
    }

    println!("scrolling the active list:");
    for offset in [10.0, 35.0, 70.0] {
        lists[0].report_offset(offset);
    }
    let loaded = lists[0].report_visible_items(&[0, 1, 2, 3]);
    println!("preloaded {loaded} items");

    let end = lists[0].on_momentum_scroll_end();
    println!("scene event: {end:?}");
    sync.on_momentum_scroll_end();
    println!("header translate y = {:.1}", sync.header_translate_y());
}
