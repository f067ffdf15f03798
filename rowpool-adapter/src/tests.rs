use crate::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::vec;
use std::vec::Vec;

use rowpool::{ListContainer, ListItem, ListOptions, Point, Rect};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Card {
    label: u32,
}

impl Card {
    fn new(label: u32) -> Self {
        Self { label }
    }
}

impl ListItem for Card {}

fn cards(n: usize) -> Vec<Card> {
    (0..n as u32).map(Card::new).collect()
}

fn controller(n: usize, options: ReorderOptions) -> ReorderController<Card> {
    let mut c = ReorderController::new(
        ListOptions::new(10).with_initial_rect(Some(Rect {
            main: 50,
            cross: 100,
        })),
        options,
    );
    c.set_items(cards(n));
    c
}

fn labels(c: &ReorderController<Card>) -> Vec<u32> {
    c.list().items().iter().map(|card| card.label).collect()
}

fn point(main: f32, cross: f32) -> Point {
    Point { main, cross }
}

/// Press holder `index` and hold until the drag picks it up.
fn pick_up(c: &mut ReorderController<Card>, index: usize, pointer: Point) -> usize {
    let id = c.list().holder_for_index(index).unwrap().id();
    c.on_pointer_down(id, pointer, 0);
    c.tick(0);
    assert!(!c.is_dragging_item());
    c.tick(500);
    assert!(c.is_dragging_item());
    id
}

#[test]
fn tap_fires_click_without_dragging() {
    let clicks = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicks);
    let mut c = controller(
        3,
        ReorderOptions::new().with_on_click(Some(move |id| sink.lock().unwrap().push(id))),
    );

    let id = c.list().holder_for_index(1).unwrap().id();
    c.on_pointer_down(id, point(15.0, 0.0), 0);
    c.tick(100);
    c.on_pointer_up(120);

    assert_eq!(*clicks.lock().unwrap(), vec![id]);
    assert!(!c.is_dragging_item());
    assert!(!c.list().is_dragging_item());
}

#[test]
fn hold_past_delay_promotes_to_drag() {
    let mut c = controller(3, ReorderOptions::new());
    let id = c.list().holder_for_index(1).unwrap().id();
    c.on_pointer_down(id, point(15.0, 0.0), 0);

    c.tick(499);
    assert!(!c.is_dragging_item());

    c.tick(500);
    assert!(c.is_dragging_item());
    let h = c.dragged_holder().unwrap();
    assert_eq!(h.id(), id);
    assert!(h.is_dragging());
}

#[test]
fn dragged_row_tracks_the_pointer() {
    let mut c = controller(5, ReorderOptions::new());
    let id = pick_up(&mut c, 1, point(15.0, 0.0));

    c.on_pointer_move(point(20.0, 0.0));
    c.tick(516);

    let h = c.list().holder(id).unwrap();
    assert_eq!(h.current(), 15); // origin 10 + pointer delta 5
    assert_eq!(h.target(), 10); // slot unchanged
}

#[test]
fn cross_axis_movement_is_ignored_without_delete() {
    let mut c = controller(5, ReorderOptions::new());
    let id = pick_up(&mut c, 1, point(15.0, 0.0));

    c.on_pointer_move(point(15.0, 90.0));
    c.tick(516);

    let h = c.list().holder(id).unwrap();
    assert_eq!(h.current(), 10);
    assert!(!h.ready_to_delete());
}

#[test]
fn dragging_past_threshold_swaps_with_next() {
    let swaps = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&swaps);
    let mut c = ReorderController::new(
        ListOptions::new(10)
            .with_initial_rect(Some(Rect {
                main: 50,
                cross: 100,
            }))
            .with_on_order_changed(Some(move |a: usize, b: usize| {
                sink.lock().unwrap().push((a, b));
            })),
        ReorderOptions::new(),
    );
    c.set_items(cards(5));
    let id = pick_up(&mut c, 1, point(15.0, 0.0));

    // center 24 crosses next row's start (20) by more than 25% of its extent
    c.on_pointer_move(point(24.0, 0.0));
    c.tick(516);

    assert_eq!(labels(&c), vec![0, 2, 1, 3, 4]);
    assert_eq!(c.list().holder(id).unwrap().index(), 2);
    assert_eq!(*swaps.lock().unwrap(), vec![(1, 2)]);

    // hysteresis: holding the same position does not swap back
    c.tick(532);
    assert_eq!(swaps.lock().unwrap().len(), 1);
}

#[test]
fn dragging_past_threshold_swaps_with_previous() {
    let mut c = controller(5, ReorderOptions::new());
    let id = pick_up(&mut c, 1, point(15.0, 0.0));

    // center 6 crosses the previous row's end (10) by more than 25%
    c.on_pointer_move(point(6.0, 0.0));
    c.tick(516);

    assert_eq!(labels(&c), vec![1, 0, 2, 3, 4]);
    assert_eq!(c.list().holder(id).unwrap().index(), 0);
}

#[test]
fn small_movement_stays_put() {
    let mut c = controller(5, ReorderOptions::new());
    pick_up(&mut c, 1, point(15.0, 0.0));

    c.on_pointer_move(point(20.0, 0.0)); // center 20, threshold edge 22.5
    c.tick(516);

    assert_eq!(labels(&c), vec![0, 1, 2, 3, 4]);
}

#[test]
fn release_always_resolves_to_idle() {
    // released while still a press candidate
    let mut c = controller(5, ReorderOptions::new());
    let id = c.list().holder_for_index(1).unwrap().id();
    c.on_pointer_down(id, point(15.0, 0.0), 0);
    c.on_pointer_up(100);
    assert!(!c.is_dragging_item());
    assert!(!c.list().is_dragging_item());

    // released right after pickup
    pick_up(&mut c, 1, point(15.0, 0.0));
    c.on_pointer_up(600);
    assert!(!c.is_dragging_item());
    assert!(c.dragged_holder().is_none());

    // released after a swap
    pick_up(&mut c, 1, point(15.0, 0.0));
    c.on_pointer_move(point(24.0, 0.0));
    c.tick(516);
    c.on_pointer_up(540);
    assert!(!c.is_dragging_item());
    assert!(c.list().holders().iter().all(|h| !h.is_dragging()));

    // cancelled while armed for deletion: never deletes
    let mut c = controller(5, ReorderOptions::new().with_delete_enabled(true));
    pick_up(&mut c, 1, point(15.0, 10.0));
    c.on_pointer_move(point(15.0, 90.0));
    c.tick(516);
    assert!(c.dragged_holder().unwrap().ready_to_delete());
    c.cancel();
    assert!(!c.is_dragging_item());
    assert!(!c.list().is_dragging_item());
    assert_eq!(c.list().len(), 5);
}

#[test]
fn drag_out_delete_removes_exactly_one_item() {
    let ready = Arc::new(Mutex::new(Vec::new()));
    let deletes = Arc::new(Mutex::new(Vec::new()));
    let ready_sink = Arc::clone(&ready);
    let delete_sink = Arc::clone(&deletes);
    let mut c = controller(
        5,
        ReorderOptions::new()
            .with_delete_enabled(true)
            .with_on_ready_to_delete(Some(move |id: usize, armed: bool| {
                ready_sink.lock().unwrap().push((id, armed));
            }))
            .with_on_delete(Some(move |id: usize, index: usize| {
                delete_sink.lock().unwrap().push((id, index));
            })),
    );
    let id = pick_up(&mut c, 1, point(15.0, 10.0));

    // viewport cross is 100; travelling past half of it arms deletion
    c.on_pointer_move(point(15.0, 70.0));
    c.tick(516);
    assert_eq!(*ready.lock().unwrap(), vec![(id, true)]);

    // arming is idempotent: no re-fire while held
    c.tick(532);
    assert_eq!(ready.lock().unwrap().len(), 1);

    c.on_pointer_up(548);
    assert_eq!(labels(&c), vec![0, 2, 3, 4]);
    assert_eq!(c.list().holders().len(), 4);
    let mut indices: Vec<usize> = c.list().active_holders().map(|h| h.index()).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(*deletes.lock().unwrap(), vec![(id, 1)]);
    assert!(c.can_undo());
    assert!(!c.is_dragging_item());
}

#[test]
fn dragging_back_disarms_deletion() {
    let ready = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&ready);
    let mut c = controller(
        5,
        ReorderOptions::new()
            .with_delete_enabled(true)
            .with_on_ready_to_delete(Some(move |id: usize, armed: bool| {
                sink.lock().unwrap().push((id, armed));
            })),
    );
    let id = pick_up(&mut c, 1, point(15.0, 10.0));

    c.on_pointer_move(point(15.0, 70.0));
    c.tick(516);
    c.on_pointer_move(point(15.0, 30.0));
    c.tick(532);
    assert_eq!(*ready.lock().unwrap(), vec![(id, true), (id, false)]);

    c.on_pointer_up(548);
    assert_eq!(c.list().len(), 5);
    assert!(!c.can_undo());
}

#[test]
fn undo_restores_the_pre_delete_state() {
    static UNDOS: AtomicUsize = AtomicUsize::new(0);
    let mut c = controller(
        5,
        ReorderOptions::new()
            .with_delete_enabled(true)
            .with_on_undo(Some(|| {
                UNDOS.fetch_add(1, Ordering::Relaxed);
            })),
    );
    let before = labels(&c);
    let holders_before = c.list().holders().len();

    pick_up(&mut c, 2, point(25.0, 10.0));
    c.on_pointer_move(point(25.0, 80.0));
    c.tick(516);
    c.on_pointer_up(532);
    assert_eq!(c.list().len(), 4);

    assert!(c.undo());
    assert_eq!(labels(&c), before);
    assert_eq!(c.list().holders().len(), holders_before);
    let mut indices: Vec<usize> = c.list().active_holders().map(|h| h.index()).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(UNDOS.load(Ordering::Relaxed), 1);

    // single level
    assert!(!c.can_undo());
    assert!(!c.undo());
}

#[test]
fn auto_scroll_engages_at_the_trailing_edge() {
    let mut c = controller(20, ReorderOptions::new());
    pick_up(&mut c, 2, point(25.0, 0.0));

    // park the row past the viewport bottom
    c.on_pointer_move(point(60.0, 0.0));
    let max = c.list().max_scroll_offset();
    let mut last = c.list().scroll_offset();
    let mut now = 500;
    for _ in 0..200 {
        now += 16;
        c.tick(now);
        let offset = c.list().scroll_offset();
        assert!(offset >= last);
        assert!(offset <= max);
        last = offset;
    }
    assert_eq!(last, max);
}

#[test]
fn auto_scroll_engages_at_the_leading_edge() {
    let mut c = controller(20, ReorderOptions::new());
    c.list_mut().set_scroll_offset(100);
    let id = pick_up(&mut c, 11, point(25.0, 0.0));

    // park the row past the viewport top
    c.on_pointer_move(point(0.0, 0.0));
    let mut now = 500;
    for _ in 0..200 {
        now += 16;
        c.tick(now);
    }
    assert!(c.list().scroll_offset() < 100);
    assert!(c.list().holder(id).is_some());
}

#[test]
fn rebinding_mid_drag_dissolves_the_gesture() {
    let mut c = controller(5, ReorderOptions::new());
    pick_up(&mut c, 1, point(15.0, 0.0));

    c.set_items(cards(3));
    c.tick(600);

    assert!(!c.is_dragging_item());
    assert!(!c.list().is_dragging_item());
    assert_eq!(c.list().len(), 3);
}

#[test]
fn second_pointer_down_is_ignored() {
    let mut c = controller(5, ReorderOptions::new());
    let first = c.list().holder_for_index(1).unwrap().id();
    let second = c.list().holder_for_index(3).unwrap().id();

    c.on_pointer_down(first, point(15.0, 0.0), 0);
    c.on_pointer_down(second, point(35.0, 0.0), 0);
    c.tick(500);

    assert_eq!(c.dragged_holder().map(|h| h.id()), Some(first));
}

#[test]
fn released_rows_settle_onto_their_slots() {
    let mut c = controller(5, ReorderOptions::new());
    pick_up(&mut c, 1, point(15.0, 0.0));
    c.on_pointer_move(point(24.0, 0.0));
    c.tick(516);
    c.on_pointer_up(532);

    let mut now = 532;
    for _ in 0..400 {
        now += 16;
        c.tick(now);
    }
    for h in c.list().active_holders() {
        assert_eq!(h.current(), h.target());
        assert!(!h.is_moving());
    }
}

#[test]
fn smoothing_alpha_is_frame_clamped() {
    let s = Smoothing::default();
    assert_eq!(s.rate_per_s, 10.0);
    assert_eq!(s.alpha(0), 0.0);
    assert!((s.alpha(16) - 0.16).abs() < 1e-6);
    assert_eq!(s.alpha(200), 1.0); // long frame clamps to a full step

    let zero = Smoothing::new(-3.0);
    assert_eq!(zero.rate_per_s, 0.0);
    assert_eq!(zero.alpha(16), 0.0);
}

#[test]
fn controller_wraps_and_unwraps_its_container() {
    let list: ListContainer<Card> = ListContainer::new(ListOptions::new(10));
    let mut c = ReorderController::from_container(list, ReorderOptions::new());
    c.set_items(cards(2));
    assert_eq!(c.list().len(), 2);

    let list = c.into_list();
    assert_eq!(list.len(), 2);
}
