use rowpool::{ListItem, ListOptions, Rect, VirtualWindow};

struct Entry(u32);

impl ListItem for Entry {}

fn main() {
    let options = ListOptions::new(20).with_initial_rect(Some(Rect {
        main: 240,
        cross: 400,
    }));
    let mut window = VirtualWindow::new(options);
    window.set_items((0..10_000).map(Entry).collect());

    println!(
        "10000 items, {} pooled holders, total extent {}",
        window.window_len(),
        window.list().total_size()
    );

    for offset in [0u64, 500, 12_340, 199_760, 500, 0] {
        window.on_scroll(offset);
        let first = window.list().holders().first().unwrap();
        println!(
            "scroll {:>6}: window starts at item {:>5}, first holder shows #{:<5} @ {}",
            offset,
            window.cell_index(),
            first.index(),
            first.target()
        );
    }
}
