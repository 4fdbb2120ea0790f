use crate::manifest::Segment;
use crate::virtual_file::{FileWindow, SliceOutcome, select_segments};

fn segments(count: usize) -> Vec<Segment> {
    (0..count)
        .map(|i| Segment::new(i as u32 + 1, format!("s{i}"), Some(100)))
        .collect()
}

fn window(true_size: u64, start: i64, end: i64) -> FileWindow {
    match FileWindow::full(true_size).slice(Some(start), Some(end)) {
        SliceOutcome::Window(w) => w,
        SliceOutcome::Unchanged => FileWindow::full(true_size),
    }
}

fn indices(segments: &[Segment], w: &FileWindow) -> Vec<usize> {
    select_segments(segments, 100, w)
        .into_iter()
        .map(|r| r.index)
        .collect()
}

#[test]
fn full_window_selects_every_segment() {
    let segs = segments(5);
    let selected = select_segments(&segs, 100, &FileWindow::full(437));
    let offsets: Vec<u64> = selected.iter().map(|r| r.offset).collect();
    assert_eq!(offsets, vec![0, 100, 200, 300, 400]);
}

#[test]
fn window_inside_one_segment_selects_only_it() {
    let segs = segments(10);
    assert_eq!(indices(&segs, &window(1000, 250, 260)), vec![2]);
}

#[test]
fn window_spanning_boundary_selects_both() {
    let segs = segments(10);
    assert_eq!(indices(&segs, &window(1000, 50, 150)), vec![0, 1]);
    assert_eq!(indices(&segs, &window(1000, 199, 201)), vec![1, 2]);
}

#[test]
fn segment_ending_at_window_start_is_not_selected() {
    let segs = segments(10);
    assert_eq!(indices(&segs, &window(1000, 200, 300)), vec![2]);
    assert_eq!(indices(&segs, &window(1000, 300, 301)), vec![3]);
}

#[test]
fn segment_starting_at_window_end_is_not_selected() {
    let segs = segments(10);
    assert_eq!(indices(&segs, &window(1000, 100, 200)), vec![1]);
}

#[test]
fn empty_window_selects_nothing() {
    let segs = segments(10);
    assert!(indices(&segs, &window(1000, 500, 500)).is_empty());
    assert!(select_segments(&segs, 0, &FileWindow::full(1000)).is_empty());
}

#[test]
fn window_in_short_last_segment() {
    let segs = segments(5);
    let selected = select_segments(&segs, 100, &window(437, 410, 437));
    assert_eq!(selected.len(), 1);
    assert_eq!((selected[0].index, selected[0].offset), (4, 400));
}
