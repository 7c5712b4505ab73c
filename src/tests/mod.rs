//! 单元测试模块
//! 覆盖行分组、分页状态机、网格列表、滚动物理和布局组件

pub mod rows_tests;
pub mod store_tests;
pub mod grid_list_tests;
pub mod scroll_tests;
pub mod component_tests;
