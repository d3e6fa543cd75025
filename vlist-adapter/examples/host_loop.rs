// Example: a host event loop driving the controller.
use vlist::VListOptions;
use vlist_adapter::{Controller, ScrollCell};

struct Entry {
    id: u32,
    text: String,
}

fn main() {
    let entries: Vec<Entry> = (0..10_000)
        .map(|id| Entry {
            id,
            text: format!("entry #{id}").repeat(id as usize % 5 + 1),
        })
        .collect();
    let mut c = Controller::new(
        entries,
        VListOptions::new(|e: &Entry| e.id)
            .with_measured_estimate(|_| 18)
            .with_viewport_extent(240)
            .with_buffer_count(2),
    );
    let mut scroll = ScrollCell::default();

    for step in 0..5 {
        // The UI toolkit reports wheel events; only the newest offset matters.
        scroll.report(step * 150);
        scroll.report(step * 150 + 40);
        c.poll_scroll(&mut scroll);

        // Render, then lay out every rendered row (one 18px line per 40 characters).
        let frame = c.frame();
        let laid_out: Vec<(u32, f32)> = frame
            .items
            .iter()
            .map(|it| (it.key, (it.item.text.len() as f32 / 40.0).ceil() * 18.0))
            .collect();
        println!(
            "step={step} window={:?} total={}",
            frame.window, frame.total_extent
        );

        let delta: i64 = laid_out
            .iter()
            .map(|(key, height)| c.on_layout(key, *height))
            .sum();
        println!("  measured {} rows, total changed by {delta}", laid_out.len());
    }
}
