//! 组件与布局测试

use crate::ui::component::{Component, ComponentTree, Style};
use crate::ui::grid::{GridColumn, GridRow};
use crate::ui::view::View;
use crate::{Canvas, Color, Point};

#[test]
fn test_style_bounds_and_content_bounds() {
    let mut style = Style::default();
    style.x = 10.0;
    style.y = 20.0;
    style.width = 100.0;
    style.height = 50.0;
    style.padding = [5.0, 8.0, 5.0, 8.0];

    let bounds = style.bounds();
    assert_eq!(bounds.x, 10.0);
    assert_eq!(bounds.width, 100.0);

    let content = style.content_bounds();
    assert_eq!(content.x, 18.0);
    assert_eq!(content.y, 25.0);
    assert_eq!(content.width, 84.0);
    assert_eq!(content.height, 40.0);
}

#[test]
fn test_hit_test_respects_visibility() {
    let mut view = View::new().with_frame(0.0, 0.0, 100.0, 100.0);
    let inside = Point::new(50.0, 50.0);
    assert!(view.hit_test(&inside));

    view.style_mut().visible = false;
    assert!(!view.hit_test(&inside));
}

#[test]
fn test_grid_row_positions_children_left_to_right() {
    let mut row = GridRow::new(8.0).with_frame(16.0, 100.0, 358.0, 210.0);
    row.add_child(Box::new(GridColumn::new(175.0, 210.0)));
    row.add_child(Box::new(GridColumn::new(175.0, 210.0)));

    let children = row.children();
    assert_eq!(children[0].style().x, 16.0);
    assert_eq!(children[0].style().y, 100.0);
    assert_eq!(children[1].style().x, 16.0 + 175.0 + 8.0);
    assert_eq!(children[1].style().y, 100.0);
}

#[test]
fn test_grid_column_centers_child() {
    let child = View::new().with_frame(0.0, 0.0, 80.0, 100.0);
    let column = GridColumn::new(160.0, 200.0)
        .with_position(10.0, 10.0)
        .with_child(Box::new(child));

    let cs = column.children()[0].style();
    assert_eq!(cs.x, 10.0 + (160.0 - 80.0) / 2.0);
    assert_eq!(cs.y, 10.0 + (200.0 - 100.0) / 2.0);
}

#[test]
fn test_grid_column_unsized_child_fills_cell() {
    let column = GridColumn::new(160.0, 200.0).with_child(Box::new(View::new()));
    let cs = column.children()[0].style();
    assert_eq!(cs.width, 160.0);
    assert_eq!(cs.height, 200.0);
}

#[test]
fn test_row_relayout_after_reposition() {
    let mut row = GridRow::new(8.0).with_frame(0.0, 0.0, 358.0, 210.0);
    row.add_child(Box::new(GridColumn::new(175.0, 210.0)));

    // 行被移动后重排，子组件跟着走
    row.style_mut().x = 16.0;
    row.style_mut().y = 500.0;
    row.layout_children();

    let cs = row.children()[0].style();
    assert_eq!(cs.x, 16.0);
    assert_eq!(cs.y, 500.0);
}

#[test]
fn test_component_tree_renders_background() {
    let view = View::new()
        .with_frame(0.0, 0.0, 10.0, 10.0)
        .with_background(Color::rgb(0xFF, 0x00, 0x00));

    let mut tree = ComponentTree::new();
    tree.set_root(Box::new(view));

    let mut canvas = Canvas::new(10, 10);
    canvas.clear(Color::WHITE);
    tree.render(&mut canvas);

    let px = canvas.get_pixel(5, 5);
    assert_eq!((px.r, px.g, px.b), (0xFF, 0x00, 0x00));
}

#[test]
fn test_invisible_component_not_rendered() {
    let mut view = View::new()
        .with_frame(0.0, 0.0, 10.0, 10.0)
        .with_background(Color::BLACK);
    view.style_mut().visible = false;

    let mut tree = ComponentTree::new();
    tree.set_root(Box::new(view));

    let mut canvas = Canvas::new(10, 10);
    canvas.clear(Color::WHITE);
    tree.render(&mut canvas);

    let px = canvas.get_pixel(5, 5);
    assert_eq!((px.r, px.g, px.b), (0xFF, 0xFF, 0xFF));
}
