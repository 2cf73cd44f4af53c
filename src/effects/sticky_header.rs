//! 吸顶导航：首屏滚出后显示

use crate::dom::{Document, ElementId};

#[derive(Debug, Clone, Copy)]
pub struct StickyHeader {
    header: ElementId,
    hero: ElementId,
}

impl StickyHeader {
    pub fn new(doc: &Document, header_selector: &str, hero_selector: &str) -> Option<Self> {
        let header = doc.query_selector(header_selector)?;
        let hero = doc.query_selector(hero_selector)?;
        Some(Self { header, hero })
    }

    /// 阈值 = 首屏高度 - 导航高度，每次读取最新布局
    pub fn threshold(&self, doc: &Document) -> f32 {
        (doc.rect(self.hero).height - doc.rect(self.header).height).max(0.0)
    }

    /// 返回导航是否可见
    pub fn update(&self, doc: &mut Document, scroll_y: f32) -> bool {
        let visible = scroll_y > self.threshold(doc);
        doc.toggle_class(self.header, "visible", visible);
        visible
    }
}
