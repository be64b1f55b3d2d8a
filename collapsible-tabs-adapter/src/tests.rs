use crate::*;

use std::cell::RefCell;
use std::rc::Rc;

use collapsible_tabs::{
    ConfigError, PlatformFamily, ScrollHandle, SceneEvent, ScrollSignal, Synchronizer,
    SynchronizerOptions, TabRoute,
};

#[derive(Debug, Default)]
struct EngineState {
    config: Option<BackendConfig>,
    layouts: Vec<Option<ItemLayout>>,
    scrolls: Vec<(f32, bool)>,
}

#[derive(Clone, Debug)]
struct EngineHandle(Rc<RefCell<EngineState>>);

impl ScrollHandle for EngineHandle {
    fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        self.0.borrow_mut().scrolls.push((offset, animated));
    }
}

#[derive(Debug, Default)]
struct FakeEngine {
    state: Rc<RefCell<EngineState>>,
    mounted: bool,
}

impl ListBackend for FakeEngine {
    type Handle = EngineHandle;

    fn configure(&mut self, config: &BackendConfig) {
        self.state.borrow_mut().config = Some(*config);
    }

    fn set_item_layouts(&mut self, layouts: Vec<Option<ItemLayout>>) {
        self.state.borrow_mut().layouts = layouts;
    }

    fn scroll_handle(&mut self) -> Option<EngineHandle> {
        self.mounted.then(|| EngineHandle(Rc::clone(&self.state)))
    }

    fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        self.state.borrow_mut().scrolls.push((offset, animated));
    }
}

#[derive(Debug, Default)]
struct Row {
    height: Option<f32>,
    offset: Option<f32>,
    preload: Option<Result<(), PreloadError>>,
    preloads: usize,
}

impl Row {
    fn sized(height: f32, offset: f32) -> Self {
        Self {
            height: Some(height),
            offset: Some(offset),
            ..Self::default()
        }
    }

    fn preloading(result: Result<(), PreloadError>) -> Self {
        Self {
            preload: Some(result),
            ..Self::default()
        }
    }
}

impl ListItem for Row {
    fn height(&self) -> Option<f32> {
        self.height
    }

    fn offset(&self) -> Option<f32> {
        self.offset
    }

    fn preload(&mut self) -> Option<Result<(), PreloadError>> {
        let result = self.preload.clone()?;
        self.preloads += 1;
        Some(result)
    }
}

fn mounted_engine() -> (FakeEngine, Rc<RefCell<EngineState>>) {
    let engine = FakeEngine {
        mounted: true,
        ..FakeEngine::default()
    };
    let state = Rc::clone(&engine.state);
    (engine, state)
}

fn owned_signal(key: &str) -> ScrollSignal {
    // A synchronizer makes its initial tab the signal owner.
    let sync = Synchronizer::new(
        vec![TabRoute::new(key, "Tab")],
        SynchronizerOptions::default(),
    )
    .unwrap();
    sync.signal().clone()
}

fn plain() -> ListKind {
    ListKind::Plain(PlainListOptions::new(PlatformFamily::DirectListPull, 60.0))
}

#[test]
fn platform_defaults_follow_the_family() {
    let direct = PlainListOptions::new(PlatformFamily::DirectListPull, 50.0);
    let aux = PlainListOptions::new(PlatformFamily::AuxiliarySignalPull, 50.0);
    assert_eq!(direct.draw_distance, 500.0);
    assert_eq!(aux.draw_distance, 1000.0);
    assert_eq!(direct.num_columns, 1);
    assert_eq!(direct.end_reached_threshold, 0.2);

    assert!(!WindowedListOptions::new(PlatformFamily::DirectListPull).remove_clipped_subviews);
    let windowed = WindowedListOptions::new(PlatformFamily::AuxiliarySignalPull);
    assert!(windowed.remove_clipped_subviews);
    assert_eq!(windowed.max_to_render_per_batch, 10);
    assert_eq!(windowed.window_size, 5);
    assert_eq!(windowed.batching_period_ms, 50);
    assert_eq!(windowed.initial_num_to_render, 10);

    let recycling = RecyclingListOptions::new(PlatformFamily::AuxiliarySignalPull, 80.0, 400.0);
    assert_eq!(recycling.render_ahead_offset, 1000.0);
    assert_eq!(recycling.end_reached_threshold, 20.0);
    assert_eq!(recycling.footer_spacer, 20.0);
}

#[test]
fn engine_is_configured_for_per_frame_reporting() {
    let (engine, state) = mounted_engine();
    let _list: AnimatedList<_, Row> =
        AnimatedList::new("a", ScrollSignal::new(), engine, plain()).unwrap();
    let config = state.borrow().config.unwrap();
    assert_eq!(config.scroll_event_throttle_ms, 16);
    assert_eq!(config.viewability.view_area_coverage_percent_threshold, 10.0);
    assert_eq!(config.viewability.minimum_view_time_ms, 100);
    assert_eq!(config.kind, plain());
}

#[test]
fn plain_layout_needs_both_height_and_offset() {
    let (engine, state) = mounted_engine();
    let mut list = AnimatedList::new("a", ScrollSignal::new(), engine, plain()).unwrap();
    list.set_items(vec![
        Row::sized(40.0, 0.0),
        Row {
            height: Some(40.0),
            ..Row::default()
        },
        Row::sized(0.0, 80.0),
    ]);
    assert_eq!(
        state.borrow().layouts,
        vec![
            Some(ItemLayout {
                size: 40.0,
                offset: 0.0
            }),
            None,
            None,
        ]
    );
}

#[test]
fn windowed_layout_defaults_unknown_values_to_zero() {
    let kind = ListKind::Windowed(WindowedListOptions::new(PlatformFamily::DirectListPull));
    let layouts = kind.item_layouts(&[
        Row::sized(30.0, 90.0),
        Row {
            offset: Some(120.0),
            ..Row::default()
        },
    ]);
    assert_eq!(
        layouts,
        vec![
            Some(ItemLayout {
                size: 30.0,
                offset: 90.0
            }),
            Some(ItemLayout {
                size: 0.0,
                offset: 120.0
            }),
        ]
    );
}

#[test]
fn recycling_layout_uses_fixed_rows_and_grid_width() {
    let options =
        RecyclingListOptions::new(PlatformFamily::DirectListPull, 100.0, 400.0).with_num_columns(3);
    assert!(options.is_grid());
    assert!((options.item_width() - (400.0 - 4.0 * GRID_GUTTER) / 3.0).abs() < 1e-4);
    assert_eq!(options.with_grid_item_width(90.0).item_width(), 90.0);

    let single = RecyclingListOptions::new(PlatformFamily::DirectListPull, 100.0, 400.0);
    assert_eq!(single.item_width(), 400.0);

    let kind = ListKind::Recycling(options);
    let rows: Vec<Row> = (0..7).map(|_| Row::default()).collect();
    let offsets: Vec<f32> = kind
        .item_layouts(&rows)
        .into_iter()
        .map(|l| l.unwrap().offset)
        .collect();
    assert_eq!(offsets, vec![0.0, 0.0, 0.0, 100.0, 100.0, 100.0, 200.0]);
}

#[test]
fn invalid_kinds_are_rejected() {
    let zero_columns = ListKind::Plain(
        PlainListOptions::new(PlatformFamily::DirectListPull, 50.0).with_num_columns(0),
    );
    assert_eq!(
        zero_columns.validate(),
        Err(ConfigError::InvalidNumber {
            name: "num_columns",
            value: 0.0
        })
    );

    let bad_height = ListKind::Recycling(RecyclingListOptions::new(
        PlatformFamily::DirectListPull,
        -1.0,
        300.0,
    ));
    let (engine, _) = mounted_engine();
    assert!(matches!(
        AnimatedList::<_, Row>::new("a", ScrollSignal::new(), engine, bad_height),
        Err(ConfigError::InvalidNumber {
            name: "item_height",
            ..
        })
    ));

    let empty_window = ListKind::Windowed(
        WindowedListOptions::new(PlatformFamily::DirectListPull).with_window_size(0),
    );
    assert!(empty_window.validate().is_err());
}

#[test]
fn scroll_offsets_reach_the_signal_only_for_the_owner() {
    let signal = owned_signal("a");
    let (engine, _) = mounted_engine();
    let mut owner: AnimatedList<_, Row> =
        AnimatedList::new("a", signal.clone(), engine, plain()).unwrap();
    let (engine, _) = mounted_engine();
    let mut other: AnimatedList<_, Row> =
        AnimatedList::new("b", signal.clone(), engine, plain()).unwrap();

    for offset in [1.0, 2.0, 3.5] {
        assert!(owner.on_scroll(offset));
    }
    assert_eq!(signal.value(), 3.5);

    assert!(!other.on_scroll(99.0));
    assert_eq!(other.last_offset(), 99.0);
    assert_eq!(signal.value(), 3.5);

    assert!(!owner.on_scroll(f32::INFINITY));
    assert_eq!(owner.last_offset(), 3.5);
}

#[test]
fn attach_hands_out_the_handle_once() {
    let mut engine = FakeEngine::default();
    let state = Rc::clone(&engine.state);
    engine.mounted = false;
    let mut list: AnimatedList<_, Row> =
        AnimatedList::new("a", ScrollSignal::new(), engine, plain()).unwrap();

    assert!(list.attach().is_none());
    assert!(!list.is_attached());

    list.backend_mut().mounted = true;
    let mut handle = list.attach().unwrap();
    assert_eq!(handle.key(), "a");
    assert!(list.attach().is_none());

    handle.scroll_to_offset(42.0, true);
    list.scroll_to_offset(7.0, false);
    assert_eq!(state.borrow().scrolls, vec![(42.0, true), (7.0, false)]);
}

#[test]
fn preload_failures_are_not_fatal() {
    let (engine, _) = mounted_engine();
    let mut list = AnimatedList::new("a", ScrollSignal::new(), engine, plain()).unwrap();
    list.set_items(vec![
        Row::preloading(Ok(())),
        Row::preloading(Err(PreloadError::new("network"))),
        Row::default(),
        Row::preloading(Ok(())),
    ]);

    assert_eq!(list.on_viewable_items_changed(&[0, 1, 2, 3, 42]), 2);
    assert_eq!(list.on_viewable_items_changed(&[1]), 0);
    let preloads: Vec<usize> = list.items().iter().map(|r| r.preloads).collect();
    assert_eq!(preloads, vec![1, 2, 0, 1]);
}

#[test]
fn scene_events_carry_the_route_key() {
    let (engine, _) = mounted_engine();
    let mut list: AnimatedList<_, Row> =
        AnimatedList::new("feed", ScrollSignal::new(), engine, plain()).unwrap();
    assert_eq!(
        list.on_momentum_scroll_begin(),
        SceneEvent::MomentumScrollBegin {
            key: "feed".to_owned()
        }
    );
    assert_eq!(list.on_momentum_scroll_end().key(), "feed");
    assert_eq!(
        list.on_scroll_end_drag(-180.0),
        SceneEvent::ScrollEndDrag {
            key: "feed".to_owned(),
            offset: -180.0
        }
    );
}

#[test]
fn every_kind_drives_the_synchronizer_the_same_way() {
    let kinds = [
        plain(),
        ListKind::Windowed(WindowedListOptions::new(PlatformFamily::DirectListPull)),
        ListKind::Recycling(RecyclingListOptions::new(
            PlatformFamily::DirectListPull,
            50.0,
            320.0,
        )),
    ];
    for kind in kinds {
        let routes = vec![TabRoute::new("a", "A"), TabRoute::new("b", "B")];
        let mut sync = Synchronizer::new(routes, SynchronizerOptions::default()).unwrap();
        sync.on_header_layout(100.0);

        let mut lists: Vec<Box<dyn ScrollableList>> = Vec::new();
        let mut states = Vec::new();
        for key in ["a", "b"] {
            let (engine, state) = mounted_engine();
            let list: AnimatedList<_, Row> =
                AnimatedList::new(key, sync.signal().clone(), engine, kind).unwrap();
            lists.push(Box::new(list));
            states.push(state);
        }
        for list in &mut lists {
            assert!(sync.register_list(list.register().unwrap()));
        }

        assert!(lists[0].report_offset(40.0));
        assert!((sync.header_translate_y() + 40.0).abs() < 1e-4);
        sync.on_momentum_scroll_end();
        assert_eq!(states[1].borrow().scrolls.last(), Some(&(40.0, false)));
    }
}
