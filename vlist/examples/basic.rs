// Example: uniform rows, windowing and scroll-to helper.
use vlist::{Align, VListOptions, VirtualList};

fn main() {
    let rows: Vec<u32> = (0..1_000_000).collect();
    let mut list = VirtualList::new(
        rows,
        VListOptions::new(|row: &u32| *row)
            .with_uniform_extent(20)
            .with_viewport_extent(200)
            .with_buffer_count(3),
    );
    list.set_scroll_offset(123_456);

    let rendered = list.materialize();
    println!("total_extent={}", list.total_extent());
    println!("visible_range={:?}", list.visible_range());
    println!("render_window={:?}", list.render_window());
    println!("first_rendered={:?}", rendered.first());

    let off = list.scroll_to_index(999_999, Align::End);
    println!(
        "after scroll_to_index: offset={off} range={:?}",
        list.visible_range()
    );
}
