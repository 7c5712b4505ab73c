//! Canvas 画布模块 - 核心渲染接口

use crate::{Color, Paint, PaintStyle, Rect};

/// 画布状态
#[derive(Clone)]
struct CanvasState {
    clip_rect: Option<Rect>,
    translation: (f32, f32),
}

/// 画布 - 主要渲染接口
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    clip_rect: Option<Rect>,
    translation: (f32, f32),
    state_stack: Vec<CanvasState>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; (width * height) as usize],
            clip_rect: None,
            translation: (0.0, 0.0),
            state_stack: Vec::new(),
        }
    }

    /// 保存当前状态（裁剪区域和变换）
    pub fn save(&mut self) {
        self.state_stack.push(CanvasState {
            clip_rect: self.clip_rect,
            translation: self.translation,
        });
    }

    /// 恢复上一次保存的状态
    pub fn restore(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.clip_rect = state.clip_rect;
            self.translation = state.translation;
        }
    }

    /// 平移坐标系
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.translation.0 += dx;
        self.translation.1 += dy;
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    /// 获取像素数据引用
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// 清空画布
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// 设置裁剪区域（与已有裁剪区域求交）
    pub fn clip_rect(&mut self, rect: Rect) {
        // 裁剪坐标在当前变换下指定
        let rect = Rect::new(
            rect.x + self.translation.0,
            rect.y + self.translation.1,
            rect.width,
            rect.height,
        );
        if let Some(current) = self.clip_rect {
            let x = current.x.max(rect.x);
            let y = current.y.max(rect.y);
            let right = current.right().min(rect.right());
            let bottom = current.bottom().min(rect.bottom());

            if right > x && bottom > y {
                self.clip_rect = Some(Rect::new(x, y, right - x, bottom - y));
            } else {
                // 无交集，空区域
                self.clip_rect = Some(Rect::new(0.0, 0.0, 0.0, 0.0));
            }
        } else {
            self.clip_rect = Some(rect);
        }
    }

    /// 重置裁剪区域
    pub fn reset_clip(&mut self) {
        self.clip_rect = None;
    }

    /// 获取像素
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Color::TRANSPARENT
        }
    }

    /// 设置像素（带 alpha 混合）
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        // 检查裁剪区域
        if let Some(clip) = &self.clip_rect {
            if x < clip.x as i32 || x >= clip.right() as i32 ||
               y < clip.y as i32 || y >= clip.bottom() as i32 {
                return;
            }
        }

        let idx = (y as u32 * self.width + x as u32) as usize;
        if color.a == 255 {
            self.pixels[idx] = color;
        } else if color.a > 0 {
            self.pixels[idx] = color.blend(&self.pixels[idx]);
        }
    }

    /// 设置像素（带抗锯齿 coverage）
    fn set_pixel_aa(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if coverage <= 0.0 { return; }
        let a = (color.a as f32 * coverage.min(1.0)) as u8;
        self.set_pixel(x, y, Color::new(color.r, color.g, color.b, a));
    }

    /// 绘制矩形
    pub fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        match paint.style {
            PaintStyle::Fill => self.fill_rect(rect, &paint.color),
            PaintStyle::Stroke => self.stroke_rect(rect, paint),
            PaintStyle::FillAndStroke => {
                self.fill_rect(rect, &paint.color);
                self.stroke_rect(rect, paint);
            }
        }
    }

    fn fill_rect(&mut self, rect: &Rect, color: &Color) {
        let tx = self.translation.0;
        let ty = self.translation.1;

        let x0 = (rect.x + tx).max(0.0) as i32;
        let y0 = (rect.y + ty).max(0.0) as i32;
        let x1 = (rect.right() + tx).min(self.width as f32) as i32;
        let y1 = (rect.bottom() + ty).min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, *color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: &Rect, paint: &Paint) {
        let w = paint.stroke_width;
        // 上边
        self.fill_rect(&Rect::new(rect.x, rect.y, rect.width, w), &paint.color);
        // 下边
        self.fill_rect(&Rect::new(rect.x, rect.bottom() - w, rect.width, w), &paint.color);
        // 左边
        self.fill_rect(&Rect::new(rect.x, rect.y, w, rect.height), &paint.color);
        // 右边
        self.fill_rect(&Rect::new(rect.right() - w, rect.y, w, rect.height), &paint.color);
    }

    /// 绘制圆角矩形（填充）
    /// 逐像素做四角圆弧裁剪，radius 超过半边长时自动收缩
    pub fn fill_round_rect(&mut self, rect: &Rect, radius: f32, color: Color) {
        if radius <= 0.0 {
            self.fill_rect(rect, &color);
            return;
        }
        let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0);
        let w = rect.width;
        let h = rect.height;
        let tx = self.translation.0;
        let ty = self.translation.1;

        let x0 = (rect.x + tx).max(0.0) as i32;
        let y0 = (rect.y + ty).max(0.0) as i32;
        let x1 = (rect.right() + tx).min(self.width as f32) as i32;
        let y1 = (rect.bottom() + ty).min(self.height as f32) as i32;

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - (rect.x + tx);
                let dy = py as f32 + 0.5 - (rect.y + ty);

                // 距最近圆角圆心的距离，非角区域 coverage 恒为 1
                let corner: Option<(f32, f32)> = if dx < radius && dy < radius {
                    Some((radius, radius))
                } else if dx > w - radius && dy < radius {
                    Some((w - radius, radius))
                } else if dx < radius && dy > h - radius {
                    Some((radius, h - radius))
                } else if dx > w - radius && dy > h - radius {
                    Some((w - radius, h - radius))
                } else {
                    None
                };

                match corner {
                    None => self.set_pixel(px, py, color),
                    Some((cx, cy)) => {
                        let d = ((dx - cx).powi(2) + (dy - cy).powi(2)).sqrt();
                        if d <= radius + 0.5 {
                            let coverage = (radius + 0.5 - d).min(1.0);
                            self.set_pixel_aa(px, py, color, coverage);
                        }
                    }
                }
            }
        }
    }

    /// 绘制圆形（填充，抗锯齿）- 用于加载指示器
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let cx = cx + self.translation.0;
        let cy = cy + self.translation.1;

        let x0 = (cx - radius - 1.0).max(0.0) as i32;
        let y0 = (cy - radius - 1.0).max(0.0) as i32;
        let x1 = (cx + radius + 1.0).min(self.width as f32) as i32;
        let y1 = (cy + radius + 1.0).min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= radius + 0.5 {
                    let coverage = (radius + 0.5 - d).min(1.0);
                    self.set_pixel_aa(x, y, color, coverage);
                }
            }
        }
    }

    /// 绘制线段（Bresenham）
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        let mut x0 = (x0 + self.translation.0) as i32;
        let mut y0 = (y0 + self.translation.1) as i32;
        let x1 = (x1 + self.translation.0) as i32;
        let y1 = (y1 + self.translation.1) as i32;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, paint.color);
            if x0 == x1 && y0 == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// 绘制图片数据（RGBA 格式，双线性插值）
    /// img_data: RGBA 像素数据
    /// img_w, img_h: 图片原始尺寸
    /// x, y, w, h: 目标绘制区域
    /// radius: 圆角裁剪半径
    pub fn draw_image(
        &mut self,
        img_data: &[u8],
        img_w: u32,
        img_h: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        mode: ImageFit,
        radius: f32,
    ) {
        if img_w == 0 || img_h == 0 || img_data.len() < (img_w * img_h * 4) as usize {
            return;
        }

        // 计算缩放和偏移
        let (scale_x, scale_y, offset_x, offset_y) = match mode {
            ImageFit::Contain => {
                // 保持比例，完整显示，可能留白
                let scale = (w / img_w as f32).min(h / img_h as f32);
                let scaled_w = img_w as f32 * scale;
                let scaled_h = img_h as f32 * scale;
                (scale, scale, (w - scaled_w) / 2.0, (h - scaled_h) / 2.0)
            }
            ImageFit::Cover => {
                // 保持比例，填满区域，可能裁剪
                let scale = (w / img_w as f32).max(h / img_h as f32);
                let scaled_w = img_w as f32 * scale;
                let scaled_h = img_h as f32 * scale;
                (scale, scale, (w - scaled_w) / 2.0, (h - scaled_h) / 2.0)
            }
            ImageFit::Fill => {
                // 拉伸填满
                (w / img_w as f32, h / img_h as f32, 0.0, 0.0)
            }
        };

        let dest_x0 = (x + self.translation.0) as i32;
        let dest_y0 = (y + self.translation.1) as i32;
        let dest_x1 = (x + self.translation.0 + w) as i32;
        let dest_y1 = (y + self.translation.1 + h) as i32;

        let has_radius = radius > 0.0;

        for dest_y in dest_y0..dest_y1 {
            for dest_x in dest_x0..dest_x1 {
                let dx = (dest_x - dest_x0) as f32;
                let dy = (dest_y - dest_y0) as f32;

                // 圆角裁剪
                if has_radius {
                    let in_corner = |corner_x: f32, corner_y: f32| -> bool {
                        let cdx = dx - corner_x;
                        let cdy = dy - corner_y;
                        cdx * cdx + cdy * cdy > radius * radius
                    };
                    if dx < radius && dy < radius && in_corner(radius, radius) {
                        continue;
                    }
                    if dx > w - radius && dy < radius && in_corner(w - radius, radius) {
                        continue;
                    }
                    if dx < radius && dy > h - radius && in_corner(radius, h - radius) {
                        continue;
                    }
                    if dx > w - radius && dy > h - radius && in_corner(w - radius, h - radius) {
                        continue;
                    }
                }

                // 计算源图片坐标
                let local_x = (dx - offset_x) / scale_x;
                let local_y = (dy - offset_y) / scale_y;

                if local_x < 0.0 || local_y < 0.0 ||
                   local_x >= img_w as f32 || local_y >= img_h as f32 {
                    continue;
                }

                // 双线性插值采样
                let src_x = local_x.floor() as u32;
                let src_y = local_y.floor() as u32;
                let fx = local_x - src_x as f32;
                let fy = local_y - src_y as f32;

                let sample = |sx: u32, sy: u32| -> (f32, f32, f32, f32) {
                    let sx = sx.min(img_w - 1);
                    let sy = sy.min(img_h - 1);
                    let idx = ((sy * img_w + sx) * 4) as usize;
                    (
                        img_data[idx] as f32,
                        img_data[idx + 1] as f32,
                        img_data[idx + 2] as f32,
                        img_data[idx + 3] as f32,
                    )
                };

                let c00 = sample(src_x, src_y);
                let c10 = sample(src_x + 1, src_y);
                let c01 = sample(src_x, src_y + 1);
                let c11 = sample(src_x + 1, src_y + 1);

                let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
                let r = lerp(lerp(c00.0, c10.0, fx), lerp(c01.0, c11.0, fx), fy) as u8;
                let g = lerp(lerp(c00.1, c10.1, fx), lerp(c01.1, c11.1, fx), fy) as u8;
                let b = lerp(lerp(c00.2, c10.2, fx), lerp(c01.2, c11.2, fx), fy) as u8;
                let a = lerp(lerp(c00.3, c10.3, fx), lerp(c01.3, c11.3, fx), fy) as u8;

                self.set_pixel(dest_x, dest_y, Color::new(r, g, b, a));
            }
        }
    }

    /// 导出为 RGBA 字节数组
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity((self.width * self.height * 4) as usize);
        for pixel in &self.pixels {
            data.push(pixel.r);
            data.push(pixel.g);
            data.push(pixel.b);
            data.push(pixel.a);
        }
        data
    }

    /// 保存为 PNG
    pub fn save_png(&self, path: &str) -> Result<(), String> {
        use image::{ImageBuffer, Rgba};

        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(
            self.width,
            self.height,
            self.to_rgba()
        ).ok_or("Failed to create image buffer")?;

        img.save(path).map_err(|e| e.to_string())
    }
}

/// 图片填充模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFit {
    /// 保持比例填满区域，可能裁剪
    Cover,
    /// 保持比例完整显示，可能留白
    Contain,
    /// 拉伸填满
    Fill,
}
