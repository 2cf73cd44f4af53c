//! 滚动驱动的页面效果
//!
//! 每个效果在页面构建时绑定自己需要的元素，找不到元素时不创建，
//! 之后只在滚动、尺寸变化或自己的定时器到期时写文档。

mod overlay;
mod progress;
mod reveal;
mod smooth_scroll;
mod sticky_header;
mod title_fit;

pub use overlay::TextOverlay;
pub use progress::ProgressBar;
pub use reveal::{RevealRule, ScrollReveal};
pub use smooth_scroll::{ease_in_out_cubic, SmoothScroll};
pub use sticky_header::StickyHeader;
pub use title_fit::{fit_font_size, TitleAutosizer, TITLE_MAX_SIZE, TITLE_MIN_SIZE};

/// 视口（文档坐标）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.height
    }
}
