//! 标题单行自适应：从 3rem 开始逐像素缩小直到放得下

use crate::dom::{Document, ElementId};
use crate::text::TextMeasure;

/// 3rem
pub const TITLE_MAX_SIZE: f32 = 48.0;
pub const TITLE_MIN_SIZE: f32 = 10.0;

/// 从 `max` 开始每次减 1px，直到单行宽度不超过 `available` 或到达 `min`
pub fn fit_font_size(measure: &dyn TextMeasure, text: &str, available: f32, max: f32, min: f32) -> f32 {
    let mut size = max;
    while measure.measure(text, size) > available && size > min {
        size -= 1.0;
    }
    size.max(min)
}

#[derive(Debug, Clone, Copy)]
pub struct TitleAutosizer {
    title: ElementId,
}

impl TitleAutosizer {
    pub fn new(doc: &Document, selector: &str) -> Option<Self> {
        doc.query_selector(selector).map(|title| Self { title })
    }

    pub fn element(&self) -> ElementId {
        self.title
    }

    /// 按父元素内容宽度重新计算字号
    pub fn apply(&self, doc: &mut Document, measure: &dyn TextMeasure) -> f32 {
        let Some(title) = doc.get(self.title) else {
            return TITLE_MAX_SIZE;
        };
        let available = match title.parent.and_then(|p| doc.get(p)) {
            Some(parent) => parent.rect.width - parent.hint.padding * 2.0,
            None => title.rect.width,
        };
        let size = fit_font_size(measure, &title.text, available, TITLE_MAX_SIZE, TITLE_MIN_SIZE);
        if let Some(style) = doc.style_mut(self.title) {
            style.font_size = Some(size);
        }
        size
    }
}
