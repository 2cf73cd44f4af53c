//! 移动端适配：设备识别、双击缩放抑制、横竖屏切换

use crate::dom::{Document, ElementId};
use crate::timer::{TimerId, TimerQueue};
use crate::Point;

/// 移动端 UA 关键字（不区分大小写）
const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// 视口宽度不超过该值视为移动端
pub const MOBILE_MAX_WIDTH: f32 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn detect(user_agent: &str, viewport_width: f32) -> Self {
        let agent = user_agent.to_lowercase();
        if MOBILE_AGENTS.iter().any(|needle| agent.contains(needle)) || viewport_width <= MOBILE_MAX_WIDTH {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn body_class(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile-device",
            DeviceClass::Desktop => "desktop-device",
        }
    }

    /// 给 body 设置设备类名（替换旧的）
    pub fn apply(&self, doc: &mut Document) {
        let body = doc.body();
        doc.remove_class(body, "mobile-device");
        doc.remove_class(body, "desktop-device");
        doc.add_class(body, self.body_class());
    }
}

/// 双击缩放抑制：短时间内同一位置的第二次抬起应阻止默认行为
#[derive(Debug, Clone, Default)]
pub struct DoubleTapGuard {
    last: Option<(u64, Point)>,
}

impl DoubleTapGuard {
    pub const WINDOW_MS: u64 = 300;
    pub const SLOP_PX: f32 = 30.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次触摸抬起，返回是否应抑制默认行为
    pub fn on_touch_end(&mut self, at: Point, now: u64) -> bool {
        let suppress = match self.last {
            Some((t, p)) => now.saturating_sub(t) <= Self::WINDOW_MS && p.distance(&at) <= Self::SLOP_PX,
            None => false,
        };
        // 被抑制的第二击不再参与下一次判断
        self.last = if suppress { None } else { Some((now, at)) };
        suppress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResetStep {
    /// 等待关闭过渡
    Disable(TimerId),
    /// 等待恢复过渡
    Restore(TimerId),
}

/// 横竖屏切换后重置轨道过渡：100ms 后关闭，再 100ms 后恢复
#[derive(Debug)]
pub struct OrientationReset {
    track: ElementId,
    transition: String,
    step: Option<ResetStep>,
}

impl OrientationReset {
    pub const DELAY_MS: u64 = 100;

    pub fn new(track: ElementId, transition: &str) -> Self {
        Self {
            track,
            transition: transition.to_string(),
            step: None,
        }
    }

    pub fn on_orientation_change(&mut self, now: u64, timers: &mut TimerQueue) {
        if let Some(ResetStep::Disable(id) | ResetStep::Restore(id)) = self.step.take() {
            timers.clear(id);
        }
        self.step = Some(ResetStep::Disable(timers.set_timeout(now, Self::DELAY_MS)));
    }

    pub fn on_timer(&mut self, id: TimerId, now: u64, doc: &mut Document, timers: &mut TimerQueue) -> bool {
        match self.step {
            Some(ResetStep::Disable(pending)) if pending == id => {
                if let Some(style) = doc.style_mut(self.track) {
                    style.transition = None;
                }
                self.step = Some(ResetStep::Restore(timers.set_timeout(now, Self::DELAY_MS)));
                true
            }
            Some(ResetStep::Restore(pending)) if pending == id => {
                if let Some(style) = doc.style_mut(self.track) {
                    style.transition = Some(self.transition.clone());
                }
                self.step = None;
                true
            }
            _ => false,
        }
    }
}
