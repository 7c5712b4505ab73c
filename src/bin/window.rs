//! 商品目录窗口运行器
//!
//! winit + softbuffer 把软件渲染的画布贴到窗口上。鼠标拖拽映射
//! 为触摸事件（驱动下拉刷新和惯性滚动），滚轮映射为精确滚动。

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use mini_catalog::catalog::HttpProductSource;
use mini_catalog::event::{Event, ScrollDelta, Touch, TouchEvent};
use mini_catalog::runtime::{CatalogApp, WindowConfig};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

struct CatalogWindow {
    window: Option<Arc<Window>>,
    surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    app: CatalogApp,
    config: WindowConfig,
    mouse_pos: (f32, f32),
    mouse_down: bool,
    scale_factor: f64,
    start: Instant,
    last_frame: Instant,
    needs_redraw: bool,
}

impl CatalogWindow {
    fn new(config: WindowConfig) -> Self {
        let source = Arc::new(HttpProductSource::new());
        let app = CatalogApp::new(config.width, config.height, source);
        let now = Instant::now();
        Self {
            window: None,
            surface: None,
            app,
            config,
            mouse_pos: (0.0, 0.0),
            mouse_down: false,
            scale_factor: 1.0,
            start: now,
            last_frame: now,
            needs_redraw: true,
        }
    }

    /// 运行时刻（毫秒），作为触摸事件时间戳
    fn timestamp(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn dispatch(&mut self, event: Event) {
        if self.app.handle_event(&event) {
            self.needs_redraw = true;
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    /// 把画布内容贴到窗口（最近邻缩放适配 DPI）
    fn present(&mut self) {
        let canvas = self.app.canvas();
        let (Some(window), Some(surface)) = (&self.window, &mut self.surface) else {
            return;
        };

        let size = window.inner_size();
        let (Some(win_width), Some(win_height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };

        if surface.resize(win_width, win_height).is_err() {
            return;
        }
        let Ok(mut buffer) = surface.buffer_mut() else {
            return;
        };

        let cw = canvas.width();
        let ch = canvas.height();
        let pixels = canvas.pixels();
        for y in 0..size.height {
            let src_y = (y * ch / size.height.max(1)).min(ch - 1);
            for x in 0..size.width {
                let src_x = (x * cw / size.width.max(1)).min(cw - 1);
                let c = pixels[(src_y * cw + src_x) as usize];
                buffer[(y * size.width + x) as usize] =
                    ((c.r as u32) << 16) | ((c.g as u32) << 8) | (c.b as u32);
            }
        }

        buffer.present().ok();
    }
}

impl ApplicationHandler for CatalogWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("创建窗口失败: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.scale_factor = window.scale_factor();

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(s) => s,
            Err(e) => {
                log::error!("创建绘制表面失败: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.surface = Some(surface);

        self.app.start();
        println!("🎮 Ready! 拖拽滚动, 下拉刷新, 滚到底部加载更多\n");

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::CursorMoved { position, .. } => {
                let x = (position.x / self.scale_factor) as f32;
                let y = (position.y / self.scale_factor) as f32;
                self.mouse_pos = (x, y);
                if self.mouse_down {
                    let touch = TouchEvent::single(Touch::new(0, x, y), self.timestamp());
                    self.dispatch(Event::TouchMove(touch));
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_pos;
                let touch = TouchEvent::single(Touch::new(0, x, y), self.timestamp());
                match state {
                    ElementState::Pressed => {
                        self.mouse_down = true;
                        self.dispatch(Event::TouchStart(touch));
                    }
                    ElementState::Released => {
                        self.mouse_down = false;
                        self.dispatch(Event::TouchEnd(touch));
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (dy, precise) = match delta {
                    MouseScrollDelta::LineDelta(_, y) => (-y * 20.0, false),
                    MouseScrollDelta::PixelDelta(pos) => {
                        (-pos.y as f32 / self.scale_factor as f32, true)
                    }
                };
                self.dispatch(Event::Scroll(ScrollDelta { dy, precise }));
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32().min(0.1);
                self.last_frame = now;

                if self.app.update(dt) {
                    self.needs_redraw = true;
                }

                if self.needs_redraw {
                    self.app.render();
                    self.needs_redraw = false;
                }
                self.present();

                // 有在途请求、动画或拖拽时保持帧循环
                let keep_running = self.app.store().is_fetching()
                    || self.app.list().scroll().is_animating()
                    || self.app.list().scroll().is_dragging
                    || self.app.list().is_loading()
                    || self.app.list().is_loading_more();
                if keep_running {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("🚀 Mini Catalog - 商品目录\n");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut window = CatalogWindow::new(WindowConfig::default());
    event_loop.run_app(&mut window)?;
    Ok(())
}
