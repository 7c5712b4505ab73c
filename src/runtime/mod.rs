//! 应用运行时

pub mod app;
pub mod cards;

pub use app::{CatalogApp, WindowConfig};
pub use cards::{FeaturedCard, ProductCard};
