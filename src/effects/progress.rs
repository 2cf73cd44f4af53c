//! 阅读进度条

use super::Viewport;
use crate::dom::{Document, ElementId};

#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    bar: ElementId,
}

impl ProgressBar {
    pub fn new(doc: &Document, selector: &str) -> Option<Self> {
        doc.query_selector(selector).map(|bar| Self { bar })
    }

    /// 滚动比例 [0, 1]；页面不可滚动时为 0
    pub fn fraction(content_height: f32, viewport: &Viewport) -> f32 {
        let scrollable = content_height - viewport.height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (viewport.scroll_y / scrollable).clamp(0.0, 1.0)
    }

    /// 写入宽度百分比并返回
    pub fn update(&self, doc: &mut Document, viewport: &Viewport) -> f32 {
        let percent = Self::fraction(doc.content_height(), viewport) * 100.0;
        if let Some(style) = doc.style_mut(self.bar) {
            style.width_percent = Some(percent);
        }
        percent
    }
}
