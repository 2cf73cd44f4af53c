//! 轮播输出面
//!
//! 控制器只通过这个 trait 写出视觉状态：轨道位移、过渡开关、激活的指示点。

/// 轨道过渡动画
pub const TRACK_TRANSITION: &str = "transform 0.5s cubic-bezier(0.25, 0.46, 0.45, 0.94)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// 拖动中跟手，无动画
    None,
    #[default]
    Smooth,
}

pub trait CarouselSurface {
    /// 容器宽度（像素），用于把拖动位移换算成百分比
    fn container_width(&self) -> f32;
    /// 轨道水平位移（百分比）
    fn set_track_offset(&mut self, percent: f32);
    fn set_transition(&mut self, transition: Transition);
    /// 激活第 `index` 个指示点，其余全部取消
    fn set_active_dot(&mut self, index: usize);
}

/// 只记录最近一次输出的表面（C 接口和测试使用）
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFrame {
    pub container_width: f32,
    pub offset_percent: f32,
    pub transition: Transition,
    pub dots: Vec<bool>,
}

impl TrackFrame {
    pub fn new(dot_count: usize, container_width: f32) -> Self {
        Self {
            container_width,
            offset_percent: 0.0,
            transition: Transition::Smooth,
            dots: vec![false; dot_count],
        }
    }

    pub fn active_dot(&self) -> Option<usize> {
        self.dots.iter().position(|active| *active)
    }

    pub fn active_dot_count(&self) -> usize {
        self.dots.iter().filter(|active| **active).count()
    }
}

impl CarouselSurface for TrackFrame {
    fn container_width(&self) -> f32 {
        self.container_width
    }

    fn set_track_offset(&mut self, percent: f32) {
        self.offset_percent = percent;
    }

    fn set_transition(&mut self, transition: Transition) {
        self.transition = transition;
    }

    fn set_active_dot(&mut self, index: usize) {
        for (i, dot) in self.dots.iter_mut().enumerate() {
            *dot = i == index;
        }
    }
}
