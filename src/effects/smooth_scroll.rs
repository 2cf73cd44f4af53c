//! 平滑滚动

/// 三次缓入缓出
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    from: f32,
    to: f32,
    started_at: u64,
    duration_ms: u64,
}

impl SmoothScroll {
    pub const DEFAULT_DURATION_MS: u64 = 800;

    pub fn new(from: f32, to: f32, started_at: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            started_at,
            duration_ms: duration_ms.max(1),
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// 给定帧时间的滚动位置，以及动画是否已结束
    pub fn sample(&self, now: u64) -> (f32, bool) {
        let elapsed = now.saturating_sub(self.started_at);
        let t = (elapsed as f32 / self.duration_ms as f32).min(1.0);
        let y = self.from + (self.to - self.from) * ease_in_out_cubic(t);
        (y, elapsed >= self.duration_ms)
    }
}
