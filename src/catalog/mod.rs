//! 商品目录领域模块

pub mod product;
pub mod source;
pub mod store;

pub use product::{transform_batch, Product, ProductsResponse, RawProduct};
pub use source::{HttpProductSource, ProductSource};
pub use store::{CatalogStore, BATCH_SIZE, DISPLAY_SIZE};
