//! 行分组算法测试

use crate::ui::rows::{group_rows, GridEntry, RowGroup};

/// 测试条目：true 表示通栏
struct Entry(bool);

impl GridEntry for Entry {
    fn is_full_width(&self) -> bool {
        self.0
    }
}

fn entries(flags: &[bool]) -> Vec<Entry> {
    flags.iter().map(|&f| Entry(f)).collect()
}

/// 分组后每个条目恰好出现一次，且顺序不变
fn assert_lossless(rows: &[RowGroup], total: usize) {
    let mut covered = Vec::new();
    for row in rows {
        match row {
            RowGroup::Full(i) => covered.push(*i),
            RowGroup::Grid(range) => covered.extend(range.clone()),
        }
    }
    let expected: Vec<usize> = (0..total).collect();
    assert_eq!(covered, expected);
}

#[test]
fn test_empty_input() {
    let rows = group_rows(&entries(&[]), 2);
    assert!(rows.is_empty());
}

#[test]
fn test_all_grid_items() {
    let items = entries(&[false; 5]);
    let rows = group_rows(&items, 2);
    assert_eq!(
        rows,
        vec![
            RowGroup::Grid(0..2),
            RowGroup::Grid(2..4),
            RowGroup::Grid(4..5),
        ]
    );
    assert_lossless(&rows, 5);
}

#[test]
fn test_all_full_width_items() {
    let items = entries(&[true; 3]);
    let rows = group_rows(&items, 2);
    assert_eq!(
        rows,
        vec![RowGroup::Full(0), RowGroup::Full(1), RowGroup::Full(2)]
    );
    assert_lossless(&rows, 3);
}

#[test]
fn test_full_width_terminates_grid_run_early() {
    // 一个网格条目后紧跟通栏：网格行只有一个条目
    let items = entries(&[false, true, false, false]);
    let rows = group_rows(&items, 2);
    assert_eq!(
        rows,
        vec![
            RowGroup::Grid(0..1),
            RowGroup::Full(1),
            RowGroup::Grid(2..4),
        ]
    );
    assert_lossless(&rows, 4);
}

#[test]
fn test_row_never_exceeds_num_columns() {
    let items = entries(&[false; 10]);
    for cols in 1..=4 {
        let rows = group_rows(&items, cols);
        for row in &rows {
            assert!(row.len() <= cols, "行宽 {} 超过列数 {}", row.len(), cols);
        }
        assert_lossless(&rows, 10);
    }
}

#[test]
fn test_num_columns_zero_clamped_to_one() {
    let items = entries(&[false, false, false]);
    let rows = group_rows(&items, 0);
    assert_eq!(
        rows,
        vec![
            RowGroup::Grid(0..1),
            RowGroup::Grid(1..2),
            RowGroup::Grid(2..3),
        ]
    );
}

#[test]
fn test_three_columns_partial_last_row() {
    let items = entries(&[false, false, false, false]);
    let rows = group_rows(&items, 3);
    assert_eq!(rows, vec![RowGroup::Grid(0..3), RowGroup::Grid(3..4)]);
}

#[test]
fn test_batch_transform_layout() {
    // 一批 16 条、批内下标 0/5/10/15 为通栏，展示前 8 条、两列：
    // [通栏0] [1,2] [3,4] [通栏5] [6,7]
    let flags: Vec<bool> = (0..8).map(|i| i % 5 == 0).collect();
    let items = entries(&flags);
    let rows = group_rows(&items, 2);
    assert_eq!(
        rows,
        vec![
            RowGroup::Full(0),
            RowGroup::Grid(1..3),
            RowGroup::Grid(3..5),
            RowGroup::Full(5),
            RowGroup::Grid(6..8),
        ]
    );
    assert_lossless(&rows, 8);
}

#[test]
fn test_row_group_len() {
    assert_eq!(RowGroup::Full(3).len(), 1);
    assert_eq!(RowGroup::Grid(2..5).len(), 3);
    assert!(!RowGroup::Full(0).is_empty());
    assert!(RowGroup::Grid(4..4).is_empty());
}
