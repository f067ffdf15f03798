//! Simulates a host frame loop driving a drag-to-reorder gesture.

use rowpool::{ListItem, ListOptions, Point, Rect};
use rowpool_adapter::{ReorderController, ReorderOptions};

#[derive(Clone)]
struct Song(&'static str);

impl ListItem for Song {}

fn main() {
    let mut c = ReorderController::new(
        ListOptions::new(30)
            .with_initial_rect(Some(Rect {
                main: 150,
                cross: 320,
            }))
            .with_on_order_changed(Some(|a: usize, b: usize| {
                println!("swapped rows {a} and {b}");
            })),
        ReorderOptions::new().with_delete_enabled(true),
    );
    c.set_items(vec![
        Song("intro"),
        Song("verse"),
        Song("chorus"),
        Song("bridge"),
        Song("outro"),
    ]);

    // press row 1, hold past the delay, drag it below row 2, release
    let id = c.list().holder_for_index(1).unwrap().id();
    c.on_pointer_down(id, Point { main: 45.0, cross: 0.0 }, 0);
    let mut now = 0;
    while now < 700 {
        now += 16;
        if now > 520 {
            c.on_pointer_move(Point {
                main: 45.0 + (now - 520) as f32 * 0.2,
                cross: 0.0,
            });
        }
        c.tick(now);
    }
    c.on_pointer_up(now);

    // let the rows settle
    for _ in 0..60 {
        now += 16;
        c.tick(now);
    }

    print_order(&c);
}

fn print_order(c: &ReorderController<Song>) {
    let order: Vec<&str> = c.list().items().iter().map(|s| s.0).collect();
    println!("order: {order:?}");
    for h in c.list().active_holders() {
        println!("  row {} @ {}", h.index(), h.current());
    }
}
