// Example: estimated extents corrected by measurement reports.
use vlist::{Measurement, VListOptions, VirtualList};

struct Message {
    id: u64,
    body: String,
}

fn main() {
    let messages: Vec<Message> = (0..100)
        .map(|i| Message {
            id: i as u64,
            body: "x".repeat(i % 7 * 40),
        })
        .collect();
    let mut list = VirtualList::new(
        messages,
        // Rough guess: one 20px line per 80 characters, at least one line.
        VListOptions::new(|m: &Message| m.id)
            .with_measured_estimate(|m: &Message| (m.body.len() as u32 / 80 + 1) * 20)
            .with_viewport_extent(300)
            .with_buffer_count(1),
    );
    list.set_scroll_offset(200);

    println!(
        "before: total={} window={:?}",
        list.total_extent(),
        list.render_window()
    );

    // The host rendered the window and measured the real heights.
    let generation = list.generation();
    let mut reports = Vec::new();
    list.for_each_rendered(|it| {
        reports.push(Measurement {
            index: it.index,
            extent: it.extent + 7,
            generation,
        });
    });
    let delta: i64 = reports
        .into_iter()
        .map(|m| list.apply_measurement(m))
        .sum();

    println!(
        "after: delta={delta} total={} window={:?}",
        list.total_extent(),
        list.render_window()
    );
    assert!(list.check_invariants().is_ok());
}
