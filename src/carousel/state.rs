//! 轮播状态

/// 手势阶段
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// 拖动中：起点、最近一次位置、起始时间（ms）
    Dragging {
        start_x: f32,
        current_x: f32,
        started_at: u64,
    },
}

/// 轮播状态，`current` 恒在 `[0, total)` 内
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    current: usize,
    total: usize,
    pub phase: GesturePhase,
}

impl CarouselState {
    /// `total` 至少为 1
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total: total.max(1),
            phase: GesturePhase::Idle,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn last(&self) -> usize {
        self.total - 1
    }

    /// 夹取到合法范围后设置，返回实际索引
    pub fn set_clamped(&mut self, index: i64) -> usize {
        self.current = index.clamp(0, self.last() as i64) as usize;
        self.current
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }
}
