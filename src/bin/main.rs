//! 商品目录无头渲染器
//!
//! 不开窗口：拉取首屏商品，模拟几轮加载更多，把最终页面渲染
//! 成 PNG。适合冒烟验证数据链路和渲染结果。

use std::sync::Arc;

use mini_catalog::catalog::HttpProductSource;
use mini_catalog::runtime::CatalogApp;

fn main() -> Result<(), String> {
    env_logger::init();
    println!("🚀 Mini Catalog Starting...");

    let source = Arc::new(HttpProductSource::new());
    let mut app = CatalogApp::new(390, 844, source);

    // 首屏刷新
    app.start();
    app.store_mut().wait_for_fetch();
    app.update(0.016);
    println!(
        "✅ 首屏就绪: 展示 {} 条 (缓存 {} 条)",
        app.store().products().len(),
        app.store().products().len() + app.store().cached_remainder()
    );

    // 模拟几轮触底加载
    for round in 1..=3 {
        app.store_mut().load_more();
        if app.store().is_fetching() {
            app.store_mut().wait_for_fetch();
        }
        app.update(0.016);
        println!(
            "📄 第 {} 轮加载更多: 展示 {} 条, 缓存余量 {} 条",
            round,
            app.store().products().len(),
            app.store().cached_remainder()
        );
    }

    let canvas = app.render();
    canvas.save_png("catalog_ui.png")?;
    println!("✅ 已输出 catalog_ui.png ({}x{})", canvas.width(), canvas.height());

    Ok(())
}
