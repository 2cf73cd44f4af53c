//! 轮播控制器

use super::autoplay::{AutoAdvance, AutoTick};
use super::config::CarouselConfig;
use super::state::{CarouselState, GesturePhase};
use super::surface::{CarouselSurface, Transition};
use super::swipe::{decide_swipe, SwipeDecision};
use crate::event::Key;
use crate::timer::{TimerId, TimerQueue};

#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    state: CarouselState,
    auto: Option<AutoAdvance>,
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Self {
        let state = CarouselState::new(config.total_slides);
        let auto = config.auto_advance.map(AutoAdvance::new);
        Self { config, state, auto }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn current(&self) -> usize {
        self.state.current()
    }

    pub fn total(&self) -> usize {
        self.state.total()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn auto_advance(&self) -> Option<&AutoAdvance> {
        self.auto.as_ref()
    }

    /// 第 `index` 页对应的轨道位移（百分比）
    pub fn base_offset(&self, index: usize) -> f32 {
        -(index as f32 * self.config.step_percent())
    }

    /// 首次渲染并启动自动播放
    pub fn start(&mut self, now: u64, surface: &mut dyn CarouselSurface, timers: &mut TimerQueue) {
        surface.set_transition(Transition::Smooth);
        self.render(surface);
        if let Some(auto) = &mut self.auto {
            auto.start(now, timers);
        }
        tracing::info!(
            "{} carousel initialized with {} slides{}",
            self.config.name,
            self.total(),
            match &self.auto {
                Some(auto) => format!(" and {}ms auto-advance", auto.config().interval_ms),
                None => String::new(),
            }
        );
    }

    /// 把当前页写到输出面，重复调用结果相同
    pub fn render(&self, surface: &mut dyn CarouselSurface) {
        let index = self.state.current();
        surface.set_track_offset(self.base_offset(index));
        surface.set_active_dot(index);
    }

    /// 跳转到指定页，越界时夹取
    pub fn go_to(&mut self, index: i64, surface: &mut dyn CarouselSurface) {
        self.state.set_clamped(index);
        self.render(surface);
    }

    pub fn next(&mut self, surface: &mut dyn CarouselSurface) {
        self.go_to(self.state.current() as i64 + 1, surface);
    }

    pub fn previous(&mut self, surface: &mut dyn CarouselSurface) {
        self.go_to(self.state.current() as i64 - 1, surface);
    }

    /// 自动播放路径：最后一页之后回到第一页
    pub fn advance_wrapping(&mut self, surface: &mut dyn CarouselSurface) {
        if self.state.current() == self.state.last() {
            self.go_to(0, surface);
        } else {
            self.next(surface);
        }
    }

    fn pause_auto_advance(&mut self, now: u64, timers: &mut TimerQueue) {
        if let Some(auto) = &mut self.auto {
            auto.pause(now, timers);
        }
    }

    /// 指针按下 / 触摸开始
    pub fn begin_drag(&mut self, x: f32, now: u64, surface: &mut dyn CarouselSurface, timers: &mut TimerQueue) {
        self.state.phase = GesturePhase::Dragging {
            start_x: x,
            current_x: x,
            started_at: now,
        };
        surface.set_transition(Transition::None);
        self.pause_auto_advance(now, timers);
    }

    /// 拖动中：位移实时跟手，不改变当前页
    pub fn drag_to(&mut self, x: f32, surface: &mut dyn CarouselSurface) {
        let GesturePhase::Dragging { start_x, current_x, .. } = &mut self.state.phase else {
            return;
        };
        *current_x = x;
        let delta_x = x - *start_x;

        let width = surface.container_width();
        let live = if width > 0.0 {
            delta_x / width * self.config.step_percent()
        } else {
            0.0
        };
        surface.set_track_offset(self.base_offset(self.state.current()) + live);
    }

    /// 指针抬起 / 触摸结束：提交或回弹。未在拖动时返回 None。
    pub fn end_drag(&mut self, now: u64, surface: &mut dyn CarouselSurface) -> Option<SwipeDecision> {
        let GesturePhase::Dragging { start_x, current_x, started_at } = self.state.phase else {
            return None;
        };
        self.state.phase = GesturePhase::Idle;
        surface.set_transition(Transition::Smooth);

        let delta_x = current_x - start_x;
        let decision = decide_swipe(
            delta_x,
            now.saturating_sub(started_at),
            self.state.current(),
            self.state.total(),
            &self.config.thresholds,
        );
        match decision {
            SwipeDecision::Previous => self.previous(surface),
            SwipeDecision::Next => self.next(surface),
            SwipeDecision::SnapBack => self.render(surface),
        }
        tracing::debug!("{} swipe dx={:.1} -> {:?} (slide {})", self.config.name, delta_x, decision, self.current());
        Some(decision)
    }

    /// 点击指示点
    pub fn click_dot(&mut self, index: usize, now: u64, surface: &mut dyn CarouselSurface, timers: &mut TimerQueue) {
        self.go_to(index as i64, surface);
        self.pause_auto_advance(now, timers);
    }

    /// 方向键，返回是否已处理
    pub fn handle_key(&mut self, key: &Key, surface: &mut dyn CarouselSurface) -> bool {
        if !self.config.keyboard {
            return false;
        }
        match key {
            Key::ArrowLeft => self.previous(surface),
            Key::ArrowRight => self.next(surface),
            Key::Other(_) => return false,
        }
        true
    }

    /// 定时器分发，返回是否属于本实例
    pub fn on_timer(&mut self, id: TimerId, now: u64, surface: &mut dyn CarouselSurface, timers: &mut TimerQueue) -> bool {
        let Some(auto) = &mut self.auto else {
            return false;
        };
        match auto.on_timer(id, now, timers) {
            AutoTick::Advance => {
                self.advance_wrapping(surface);
                true
            }
            AutoTick::Resumed => true,
            AutoTick::Ignored => false,
        }
    }

    /// 停止自动播放（页面卸载）
    pub fn shutdown(&mut self, timers: &mut TimerQueue) {
        if let Some(auto) = &mut self.auto {
            auto.stop(timers);
        }
    }
}
