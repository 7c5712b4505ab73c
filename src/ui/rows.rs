//! 行分组算法
//!
//! 把一维的条目序列按渲染形态切成行：标记为通栏的条目独占一行，
//! 其余条目按列数打包成网格行。分组是展示序列与列数的纯函数，
//! 每次数据变化后重新计算，不做增量维护。

use std::ops::Range;

/// 可参与网格分组的条目
pub trait GridEntry {
    /// 是否以通栏（整行）形态展示
    fn is_full_width(&self) -> bool;
}

/// 一行的形态，索引指向输入序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowGroup {
    /// 通栏行，独占一个条目
    Full(usize),
    /// 网格行，连续的一段条目（长度 ≤ 列数）
    Grid(Range<usize>),
}

impl RowGroup {
    /// 该行包含的条目数
    pub fn len(&self) -> usize {
        match self {
            RowGroup::Full(_) => 1,
            RowGroup::Grid(range) => range.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 单次线性扫描分组，O(N)
///
/// 规则：
/// - 通栏条目独占一行
/// - 非通栏条目按 num_columns 个一组打包，遇到通栏条目提前截断
/// - 最后一组可以不满
/// - num_columns 最小按 1 处理
pub fn group_rows<T: GridEntry>(items: &[T], num_columns: usize) -> Vec<RowGroup> {
    let num_columns = num_columns.max(1);
    let mut rows = Vec::new();
    let mut cursor = 0;

    while cursor < items.len() {
        if items[cursor].is_full_width() {
            rows.push(RowGroup::Full(cursor));
            cursor += 1;
            continue;
        }

        // 网格行：收集连续的非通栏条目，至多 num_columns 个
        let start = cursor;
        while cursor < items.len()
            && cursor - start < num_columns
            && !items[cursor].is_full_width()
        {
            cursor += 1;
        }
        rows.push(RowGroup::Grid(start..cursor));
    }

    rows
}
