//! 轮播配置

/// 轨道布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackLayout {
    /// 轨道宽度为 N 个容器宽，每页占 100/N %
    Fractional,
    /// 轨道与容器等宽，幻灯片横向溢出，每页占 100%
    FullWidth,
}

/// 提交阈值：距离或速度任一超过即提交
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    /// 像素
    pub distance_px: f32,
    /// 像素/毫秒
    pub velocity_px_per_ms: f32,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            distance_px: 50.0,
            velocity_px_per_ms: 0.3,
        }
    }
}

/// 自动播放配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvanceConfig {
    pub interval_ms: u64,
    /// 用户交互后暂停多久再恢复
    pub resume_after_ms: u64,
}

impl Default for AutoAdvanceConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            resume_after_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub name: String,
    pub total_slides: usize,
    pub layout: TrackLayout,
    pub thresholds: SwipeThresholds,
    pub auto_advance: Option<AutoAdvanceConfig>,
    /// 是否响应全局左右方向键
    pub keyboard: bool,
}

impl CarouselConfig {
    /// 主图集：自动播放 + 键盘导航
    pub fn main_gallery(total_slides: usize) -> Self {
        Self {
            name: "gallery".to_string(),
            total_slides,
            layout: TrackLayout::Fractional,
            thresholds: SwipeThresholds::default(),
            auto_advance: Some(AutoAdvanceConfig::default()),
            keyboard: true,
        }
    }

    /// 成员幻灯片：无自动播放、无键盘
    pub fn member_slideshow(total_slides: usize) -> Self {
        Self {
            name: "members".to_string(),
            total_slides,
            layout: TrackLayout::FullWidth,
            thresholds: SwipeThresholds::default(),
            auto_advance: None,
            keyboard: false,
        }
    }

    pub fn with_auto_advance(mut self, auto_advance: Option<AutoAdvanceConfig>) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    /// 每页对应的轨道位移百分比
    pub fn step_percent(&self) -> f32 {
        match self.layout {
            TrackLayout::Fractional => 100.0 / self.total_slides.max(1) as f32,
            TrackLayout::FullWidth => 100.0,
        }
    }
}
