use rowpool::{ListContainer, ListItem, ListOptions};

struct Task {
    title: &'static str,
    extent: Option<u32>,
}

impl ListItem for Task {
    fn custom_extent(&self) -> Option<u32> {
        self.extent
    }
}

fn main() {
    let mut list = ListContainer::new(ListOptions::new(24));
    list.set_items(vec![
        Task {
            title: "water the plants",
            extent: None,
        },
        Task {
            title: "write the report",
            extent: Some(48),
        },
        Task {
            title: "ship it",
            extent: None,
        },
    ]);

    for h in list.active_holders() {
        let task = list.item(h.index()).unwrap();
        println!("row {} @ {:>3} (extent {:>2}): {}", h.index(), h.target(), h.size(), task.title);
    }
    println!("total extent: {}", list.total_size());
}
