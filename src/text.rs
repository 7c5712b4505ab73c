//! 文本渲染模块 - fontdue 光栅化 + 字形缓存

use crate::{Canvas, Color, Paint};
use fontdue::{Font, FontSettings, Metrics};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// 进程级共享渲染器，首次访问时加载系统字体
/// 加载失败时组件退回占位渲染，测试环境无需字体
static SHARED: OnceCell<Option<TextRenderer>> = OnceCell::new();

/// 获取共享文本渲染器
pub fn shared() -> Option<&'static TextRenderer> {
    SHARED
        .get_or_init(|| match TextRenderer::load_system_font() {
            Ok(r) => Some(r),
            Err(e) => {
                log::warn!("no system font available: {}", e);
                None
            }
        })
        .as_ref()
}

/// 文本渲染器
pub struct TextRenderer {
    font: Font,
    /// 字形缓存 (char, size_u32) -> (Metrics, Bitmap)
    /// 使用 Mutex 实现内部可变性，因为 draw 方法是 &self
    cache: Mutex<HashMap<(char, u32), (Metrics, Vec<u8>)>>,
}

impl TextRenderer {
    /// 从字体数据创建
    pub fn from_bytes(font_data: &[u8]) -> Result<Self, String> {
        let settings = FontSettings {
            scale: 40.0,
            ..Default::default()
        };
        let font = Font::from_bytes(font_data, settings)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            font,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// 从文件路径加载字体
    pub fn from_file(path: &str) -> Result<Self, String> {
        let font_data = std::fs::read(path)
            .map_err(|e| format!("Failed to read font file: {}", e))?;
        Self::from_bytes(&font_data)
    }

    /// 加载系统字体（macOS / Linux）
    pub fn load_system_font() -> Result<Self, String> {
        let font_paths = [
            "/System/Library/Fonts/PingFang.ttc",
            "/System/Library/Fonts/Hiragino Sans GB.ttc",
            "/Library/Fonts/Arial Unicode.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
        ];

        for path in &font_paths {
            if Path::new(path).exists() {
                if let Ok(r) = Self::from_file(path) {
                    log::info!("font loaded: {}", path);
                    return Ok(r);
                }
            }
        }

        Err("no usable system font found".to_string())
    }

    /// 渲染文本到画布，(x, y) 为基线位置
    pub fn draw_text(&self, canvas: &mut Canvas, text: &str, x: f32, y: f32, size: f32, paint: &Paint) {
        let mut cursor_x = x;
        // size 转整数 key，保留 1 位小数精度
        let size_key = (size * 10.0) as u32;

        for ch in text.chars() {
            // 快速路径：缓存命中
            let cached = {
                match self.cache.lock() {
                    Ok(cache) => cache.get(&(ch, size_key)).cloned(),
                    Err(_) => None,
                }
            };

            let (metrics, bitmap) = match cached {
                Some(data) => data,
                None => {
                    // rasterize 较耗时，放在锁外执行
                    let (metrics, bitmap) = self.font.rasterize(ch, size);
                    if let Ok(mut cache) = self.cache.lock() {
                        cache.insert((ch, size_key), (metrics, bitmap.clone()));
                    }
                    (metrics, bitmap)
                }
            };

            if metrics.width == 0 || metrics.height == 0 {
                cursor_x += metrics.advance_width;
                continue;
            }

            let glyph_x = cursor_x + metrics.xmin as f32;
            let glyph_y = y - metrics.height as f32 - metrics.ymin as f32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx] as f32 / 255.0;
                    if coverage > 0.001 {
                        let px = (glyph_x + gx as f32).round() as i32;
                        let py = (glyph_y + gy as f32).round() as i32;
                        let alpha = (paint.color.a as f32 * coverage) as u8;
                        if alpha > 0 {
                            let color = Color::new(paint.color.r, paint.color.g, paint.color.b, alpha);
                            canvas.set_pixel(px, py, color);
                        }
                    }
                }
            }

            cursor_x += metrics.advance_width;
        }
    }

    /// 测量文本宽度
    pub fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, size).advance_width)
            .sum()
    }

    /// 测量文本高度
    pub fn measure_height(&self, size: f32) -> f32 {
        self.font.metrics('M', size).height as f32
    }

    /// 自动换行绘制文本
    pub fn draw_text_wrapped(&self, canvas: &mut Canvas, text: &str, x: f32, y: f32, size: f32, max_width: f32, paint: &Paint) {
        if max_width <= 0.0 {
            self.draw_text(canvas, text, x, y, size, paint);
            return;
        }

        let line_height = size * 1.5;
        let mut current_y = y;
        let mut line_start = 0;
        let chars: Vec<char> = text.chars().collect();
        let mut current_width = 0.0;

        for (i, ch) in chars.iter().enumerate() {
            let char_width = self.font.metrics(*ch, size).advance_width;

            if current_width + char_width > max_width && i > line_start {
                let line: String = chars[line_start..i].iter().collect();
                self.draw_text(canvas, &line, x, current_y, size, paint);

                current_y += line_height;
                line_start = i;
                current_width = char_width;
            } else {
                current_width += char_width;
            }
        }

        if line_start < chars.len() {
            let line: String = chars[line_start..].iter().collect();
            self.draw_text(canvas, &line, x, current_y, size, paint);
        }
    }

    /// 计算换行后的文本高度
    pub fn measure_wrapped_height(&self, text: &str, size: f32, max_width: f32) -> f32 {
        if max_width <= 0.0 || text.is_empty() {
            return size * 1.5;
        }

        let line_height = size * 1.5;
        let mut line_count = 1;
        let mut current_width = 0.0;

        for ch in text.chars() {
            let char_width = self.font.metrics(ch, size).advance_width;
            if current_width + char_width > max_width && current_width > 0.0 {
                line_count += 1;
                current_width = char_width;
            } else {
                current_width += char_width;
            }
        }

        line_count as f32 * line_height
    }
}
