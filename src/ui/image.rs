//! Image 组件 - 图片显示
//!
//! 网络图片通过进程级缓存加载：同一 URL 只下载一次，
//! 失败也会记入缓存避免反复请求。未加载时绘制占位符。

use crate::canvas::ImageFit;
use crate::{Canvas, Color, Paint, PaintStyle};
use super::component::{Component, ComponentId, Style};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};

/// 图片缓存数据
pub struct ImageData {
    pub data: Vec<u8>, // RGBA
    pub width: u32,
    pub height: u32,
}

/// 全局图片缓存：URL -> 解码结果（None 表示加载失败）
static IMAGE_CACHE: Lazy<Mutex<HashMap<String, Option<Arc<ImageData>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// 加载图片（支持网络 URL 和本地文件），结果进入全局缓存
pub fn load_image(src: &str) -> Option<Arc<ImageData>> {
    // 检查缓存
    {
        let cache = IMAGE_CACHE.lock().ok()?;
        if let Some(cached) = cache.get(src) {
            return cached.clone();
        }
    }

    let result = if src.starts_with("http://") || src.starts_with("https://") {
        load_image_from_url(src)
    } else {
        load_image_from_file(src)
    };

    if result.is_none() {
        log::warn!("image load failed: {}", src);
    }

    if let Ok(mut cache) = IMAGE_CACHE.lock() {
        cache.insert(src.to_string(), result.clone());
    }

    result
}

/// 从网络 URL 加载图片
fn load_image_from_url(url: &str) -> Option<Arc<ImageData>> {
    let response = ureq::get(url)
        .timeout(std::time::Duration::from_secs(10))
        .call()
        .ok()?;

    let mut bytes = Vec::new();
    response.into_reader().take(10 * 1024 * 1024).read_to_end(&mut bytes).ok()?;

    decode_image_bytes(&bytes)
}

/// 从本地文件加载图片
fn load_image_from_file(path: &str) -> Option<Arc<ImageData>> {
    let bytes = std::fs::read(path).ok()?;
    decode_image_bytes(&bytes)
}

/// 解码图片字节数据
fn decode_image_bytes(bytes: &[u8]) -> Option<Arc<ImageData>> {
    use image::GenericImageView;

    let img = image::load_from_memory(bytes).ok()?;
    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8();

    Some(Arc::new(ImageData {
        data: rgba.into_raw(),
        width,
        height,
    }))
}

/// Image - 图片组件
pub struct Image {
    id: ComponentId,
    style: Style,
    src: String,
    mode: ImageFit,
    pixels: Option<Arc<ImageData>>,
}

impl Image {
    pub fn new() -> Self {
        Self {
            id: ComponentId::new(),
            style: Style::default(),
            src: String::new(),
            mode: ImageFit::Cover,
            pixels: None,
        }
    }

    /// 通过全局缓存加载网络/本地图片
    pub fn from_src(src: &str) -> Self {
        let mut img = Self::new();
        img.src = src.to_string();
        img.pixels = load_image(src);
        img
    }

    /// 从 RGBA 数据创建
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        let mut img = Self::new();
        img.pixels = Some(Arc::new(ImageData { data, width, height }));
        img
    }

    pub fn with_frame(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.style.x = x;
        self.style.y = y;
        self.style.width = width;
        self.style.height = height;
        self
    }

    pub fn with_mode(mut self, mode: ImageFit) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_border_radius(mut self, radius: f32) -> Self {
        self.style.border_radius = radius;
        self
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn is_loaded(&self) -> bool {
        self.pixels.is_some()
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Image {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn render(&self, canvas: &mut Canvas) {
        let bounds = self.style.bounds();

        let data = match &self.pixels {
            Some(data) => data,
            None => {
                // 占位符：灰色块 + 对角线
                let paint = Paint::new()
                    .with_color(Color::from_hex(0xEEEEEE))
                    .with_style(PaintStyle::Fill);
                canvas.draw_rect(&bounds, &paint);

                let line_paint = Paint::new()
                    .with_color(Color::from_hex(0xCCCCCC))
                    .with_stroke_width(1.0);
                canvas.draw_line(bounds.x, bounds.y, bounds.right(), bounds.bottom(), &line_paint);
                canvas.draw_line(bounds.right(), bounds.y, bounds.x, bounds.bottom(), &line_paint);
                return;
            }
        };

        canvas.draw_image(
            &data.data,
            data.width,
            data.height,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            self.mode,
            self.style.border_radius,
        );
    }

    fn type_name(&self) -> &'static str {
        "Image"
    }
}
