//! 网格列表测试

use crate::ui::component::Component;
use crate::ui::grid_list::{GridList, GridListConfig, GridListEvent};
use crate::ui::rows::{group_rows, GridEntry};
use crate::ui::view::View;
use crate::Canvas;

#[derive(Clone)]
struct Entry {
    full: bool,
}

impl GridEntry for Entry {
    fn is_full_width(&self) -> bool {
        self.full
    }
}

fn make_list() -> GridList<Entry> {
    let config = GridListConfig {
        num_columns: 2,
        spacing: 8.0,
        item_height: Some(200.0),
        full_width_item_height: Some(260.0),
    };
    GridList::new(
        config,
        Box::new(|_entry: &Entry, _col| Box::new(View::new()) as Box<dyn Component>),
    )
    .with_frame(0.0, 0.0, 390.0, 800.0)
}

fn entries(count: usize) -> Vec<Entry> {
    (0..count).map(|i| Entry { full: i % 5 == 0 }).collect()
}

#[test]
fn test_row_offsets_are_prefix_sums() {
    let mut list = make_list();
    // [通栏] [1,2] [3,4]
    list.set_items(entries(5));

    let rows = group_rows(list.items(), 2);
    let offsets = list.row_offsets(&rows);
    assert_eq!(offsets.len(), 3);
    // 内容内边距 16，行间距 8
    assert_eq!(offsets[0], 16.0);
    assert_eq!(offsets[1], 16.0 + 260.0 + 8.0);
    assert_eq!(offsets[2], 16.0 + 260.0 + 8.0 + 200.0 + 8.0);
}

#[test]
fn test_content_height_grows_with_items() {
    let mut list = make_list();
    list.set_items(entries(5));
    let h5 = list.content_height();
    list.set_items(entries(10));
    let h10 = list.content_height();
    assert!(h10 > h5);
}

#[test]
fn test_end_reached_suppressed_while_loading() {
    let mut list = make_list();
    list.set_items(entries(40));
    list.set_loading_more(true);

    // 直接滚到底部触发触底检测
    let max = list.scroll().max_scroll();
    assert!(max > 0.0);
    list.on_event(&crate::event::Event::Scroll(crate::event::ScrollDelta {
        dy: max + 100.0,
        precise: true,
    }));

    assert!(list.drain_events().is_empty());
}

#[test]
fn test_end_reached_fires_once_until_items_change() {
    let mut list = make_list();
    list.set_items(entries(40));

    let max = list.scroll().max_scroll();
    let scroll = crate::event::Event::Scroll(crate::event::ScrollDelta {
        dy: max + 100.0,
        precise: true,
    });
    list.on_event(&scroll);
    assert_eq!(list.drain_events(), vec![GridListEvent::EndReached]);

    // 同一位置重复滚动不再触发
    list.on_event(&scroll);
    assert!(list.drain_events().is_empty());

    // 内容更新后重新武装
    list.set_items(entries(48));
    let max = list.scroll().max_scroll();
    list.on_event(&crate::event::Event::Scroll(crate::event::ScrollDelta {
        dy: max + 100.0,
        precise: true,
    }));
    assert_eq!(list.drain_events(), vec![GridListEvent::EndReached]);
}

#[test]
fn test_end_reached_suppressed_for_empty_list() {
    let mut list = make_list();
    list.on_event(&crate::event::Event::Scroll(crate::event::ScrollDelta {
        dy: 1000.0,
        precise: true,
    }));
    assert!(list.drain_events().is_empty());
}

#[test]
fn test_render_empty_list_does_not_panic() {
    let list = make_list();
    let mut canvas = Canvas::new(390, 800);
    list.render(&mut canvas);
}

#[test]
fn test_render_with_items_does_not_panic() {
    let mut list = make_list();
    list.set_items(entries(20));
    let mut canvas = Canvas::new(390, 800);
    list.render(&mut canvas);
}
