//! 滚动控制器 - 拖拽/惯性/回弹物理，以及触底、下拉刷新边缘事件

/// 滚动事件类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// 滚动到底部（每次接近只触发一次，内容变化后重新武装）
    ReachBottom,
    /// 下拉超过刷新阈值并回弹结束
    ReachTop,
}

/// 滚动控制器
pub struct ScrollController {
    position: f32,
    velocity: f32,
    min_scroll: f32,
    max_scroll: f32,
    viewport_height: f32,
    last_content_height: f32,

    pub is_dragging: bool,
    drag_start_pos: f32,
    drag_start_scroll: f32,
    // (position, timestamp_ms)
    velocity_samples: Vec<(f32, u64)>,

    is_decelerating: bool,
    is_bouncing: bool,
    bounce_timer: f32,
    bounce_start_pos: f32,
    bounce_target_pos: f32,

    /// 是否曾经超出底部边界（用于检测触底）
    was_over_bottom: bool,
    /// 本次拖拽中最大下拉距离（用于检测下拉刷新）
    max_pull_distance: f32,
    /// 触底阈值（距离底部多少像素时触发）
    reach_bottom_distance: f32,
    /// 下拉刷新阈值
    refresh_distance: f32,
    /// 是否已经触发过触底事件（防止重复触发）
    reach_bottom_triggered: bool,
}

impl ScrollController {
    pub fn new(content_height: f32, viewport_height: f32) -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            min_scroll: 0.0,
            max_scroll: (content_height - viewport_height).max(0.0),
            viewport_height,
            last_content_height: content_height,
            is_dragging: false,
            drag_start_pos: 0.0,
            drag_start_scroll: 0.0,
            velocity_samples: Vec::with_capacity(10),
            is_decelerating: false,
            is_bouncing: false,
            bounce_timer: 0.0,
            bounce_start_pos: 0.0,
            bounce_target_pos: 0.0,
            was_over_bottom: false,
            max_pull_distance: 0.0,
            reach_bottom_distance: 50.0,
            refresh_distance: 60.0,
            reach_bottom_triggered: false,
        }
    }

    /// 更新内容高度（内容变化时调用），同时重新武装触底事件
    pub fn update_content_height(&mut self, content_height: f32, viewport_height: f32) {
        self.viewport_height = viewport_height;
        let new_max = (content_height - viewport_height).max(0.0).floor();
        if (content_height - self.last_content_height).abs() > 1.0
            || (self.max_scroll - new_max).abs() > 1.0
        {
            self.last_content_height = content_height;
            self.max_scroll = new_max;
            if self.position > self.max_scroll {
                self.position = self.max_scroll;
            }
            self.reach_bottom_triggered = false;
        }
    }

    pub fn begin_drag(&mut self, y: f32, timestamp: u64) {
        self.is_dragging = true;
        self.is_decelerating = false;
        self.is_bouncing = false;
        self.drag_start_pos = y;
        self.drag_start_scroll = self.position;
        self.velocity = 0.0;
        self.velocity_samples.clear();
        self.velocity_samples.push((y, timestamp));
        self.was_over_bottom = false;
        self.max_pull_distance = 0.0;
    }

    pub fn update_drag(&mut self, y: f32, timestamp: u64) {
        if !self.is_dragging { return; }
        let delta = self.drag_start_pos - y;
        let mut new_pos = self.drag_start_scroll + delta;
        if new_pos < self.min_scroll {
            let overshoot = self.min_scroll - new_pos;
            new_pos = self.min_scroll - Self::rubber_band(overshoot, self.viewport_height);
            self.max_pull_distance = self.max_pull_distance.max(self.min_scroll - new_pos);
        } else if new_pos > self.max_scroll {
            let overshoot = new_pos - self.max_scroll;
            new_pos = self.max_scroll + Self::rubber_band(overshoot, self.viewport_height);
            self.was_over_bottom = true;
        }
        self.position = new_pos;
        self.velocity_samples.push((y, timestamp));
        // 只保留最近 100ms 的采样
        self.velocity_samples.retain(|(_, t)| timestamp >= *t && timestamp - *t < 100);
    }

    /// 结束拖拽，返回是否进入动画
    pub fn end_drag(&mut self) -> bool {
        if !self.is_dragging { return false; }
        self.is_dragging = false;
        self.velocity = self.calculate_release_velocity();
        if self.position < self.min_scroll || self.position > self.max_scroll {
            self.start_bounce();
        } else if self.velocity.abs() > 50.0 {
            self.is_decelerating = true;
        }
        self.is_decelerating || self.is_bouncing
    }

    fn calculate_release_velocity(&self) -> f32 {
        let (first, last) = match (self.velocity_samples.first(), self.velocity_samples.last()) {
            (Some(f), Some(l)) if self.velocity_samples.len() >= 2 => (f, l),
            _ => return 0.0,
        };
        // 时间戳为毫秒，换算成秒
        let dt = (last.1.saturating_sub(first.1)) as f32 / 1000.0;
        if dt < 0.001 { return 0.0; }
        (first.0 - last.0) / dt * 0.8
    }

    fn rubber_band(offset: f32, dimension: f32) -> f32 {
        let c = 0.55;
        let x = offset.abs() / dimension.max(1.0);
        let result = (1.0 - (1.0 / (x * c + 1.0))) * dimension;
        if offset < 0.0 { -result } else { result }
    }

    fn start_bounce(&mut self) {
        self.is_bouncing = true;
        self.is_decelerating = false;
        self.bounce_timer = 0.0;
        self.bounce_start_pos = self.position;
        self.bounce_target_pos = self.position.clamp(self.min_scroll, self.max_scroll);
        self.velocity = 0.0;
    }

    /// 推进滚动动画，返回 (是否仍在动画中, 可能触发的边缘事件)
    pub fn update(&mut self, dt: f32) -> (bool, Option<ScrollEvent>) {
        if self.is_dragging { return (false, None); }

        if self.is_bouncing {
            self.bounce_timer += dt;
            let duration = 0.3;
            if self.bounce_timer >= duration {
                self.position = self.bounce_target_pos;
                self.is_bouncing = false;
                return (false, self.check_bounce_end_event());
            }
            let t = self.bounce_timer / duration;
            let ease = 1.0 - (1.0 - t).powi(3);
            self.position = self.bounce_start_pos + (self.bounce_target_pos - self.bounce_start_pos) * ease;
            return (true, None);
        }

        if self.is_decelerating {
            // 惯性减速
            let deceleration = 0.92_f32.powf(dt * 60.0);
            self.velocity *= deceleration;
            self.position += self.velocity * dt;

            if self.position >= self.max_scroll {
                self.position = self.max_scroll;
                self.velocity = 0.0;
                self.is_decelerating = false;

                if !self.reach_bottom_triggered {
                    self.reach_bottom_triggered = true;
                    return (false, Some(ScrollEvent::ReachBottom));
                }
                return (false, None);
            }

            if self.position <= self.min_scroll {
                self.position = self.min_scroll;
                self.velocity = 0.0;
                self.is_decelerating = false;
                return (false, None);
            }

            if self.velocity.abs() < 3.0 {
                self.velocity = 0.0;
                self.is_decelerating = false;

                // 停在接近底部的位置也算触底
                if self.position >= self.max_scroll - self.reach_bottom_distance
                    && !self.reach_bottom_triggered
                {
                    self.reach_bottom_triggered = true;
                    return (false, Some(ScrollEvent::ReachBottom));
                }
                return (false, None);
            }
            return (true, None);
        }
        (false, None)
    }

    /// 回弹结束时检查是否触发事件
    fn check_bounce_end_event(&mut self) -> Option<ScrollEvent> {
        // 下拉超过阈值并回弹到顶部：触发刷新
        if self.max_pull_distance >= self.refresh_distance
            && self.bounce_target_pos <= self.min_scroll
        {
            self.max_pull_distance = 0.0;
            return Some(ScrollEvent::ReachTop);
        }

        // 拖拽超出底部并回弹到底部：触发触底
        if self.was_over_bottom && self.bounce_target_pos >= self.max_scroll {
            self.was_over_bottom = false;
            if !self.reach_bottom_triggered {
                self.reach_bottom_triggered = true;
                return Some(ScrollEvent::ReachBottom);
            }
        }

        None
    }

    /// 滚轮/触控板滚动
    pub fn handle_scroll(&mut self, delta: f32, is_precise: bool) {
        if delta.abs() < 0.1 {
            return;
        }
        if self.max_scroll <= 0.0 {
            return;
        }

        let factor = if is_precise { 1.0 } else { 2.0 };
        self.position = (self.position + delta * factor).clamp(self.min_scroll, self.max_scroll);
        // 触控板自带惯性，这里不再叠加动画
        self.velocity = 0.0;
        self.is_decelerating = false;
        self.is_bouncing = false;
    }

    /// 检查是否应该触发触底事件（滚轮路径在每次滚动后调用）
    pub fn check_reach_bottom(&mut self) -> bool {
        if self.max_scroll <= 0.0 {
            return false;
        }
        if self.position >= self.max_scroll - self.reach_bottom_distance
            && !self.reach_bottom_triggered
        {
            self.reach_bottom_triggered = true;
            return true;
        }
        false
    }

    /// 重新武装触底事件（内容更新后调用）
    pub fn reset_reach_bottom(&mut self) {
        self.reach_bottom_triggered = false;
    }

    pub fn position(&self) -> f32 { self.position }
    pub fn max_scroll(&self) -> f32 { self.max_scroll }
    pub fn is_animating(&self) -> bool { self.is_decelerating || self.is_bouncing }

    /// 当前下拉距离（超出顶部的位移，用于刷新指示器）
    pub fn pull_distance(&self) -> f32 {
        (self.min_scroll - self.position).max(0.0)
    }

    /// 是否在顶部
    pub fn is_at_top(&self) -> bool {
        self.position <= self.min_scroll + 1.0
    }

    /// 是否在底部
    pub fn is_at_bottom(&self) -> bool {
        self.position >= self.max_scroll - 1.0
    }
}
