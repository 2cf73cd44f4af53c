//! 正文覆盖图集的滚动效果和图集视差

use crate::dom::{Document, ElementId};

#[derive(Debug, Clone, Copy)]
pub struct TextOverlay {
    gallery: ElementId,
    essay: ElementId,
}

impl TextOverlay {
    pub fn new(doc: &Document, gallery_selector: &str, essay_selector: &str) -> Option<Self> {
        let gallery = doc.query_selector(gallery_selector)?;
        let essay = doc.query_selector(essay_selector)?;
        Some(Self { gallery, essay })
    }

    /// 覆盖进度：滚过图集高度的 80% 时到 1
    pub fn progress(scroll_y: f32, gallery_height: f32) -> f32 {
        let span = gallery_height * 0.8;
        if span <= 0.0 {
            return 1.0;
        }
        (scroll_y / span).clamp(0.0, 1.0)
    }

    pub fn update(&self, doc: &mut Document, scroll_y: f32) -> f32 {
        let progress = Self::progress(scroll_y, doc.rect(self.gallery).height);
        if let Some(style) = doc.style_mut(self.essay) {
            style.translate_y_px = -progress * 30.0;
            style.background_alpha = Some(0.95 + progress * 0.05);
        }
        if let Some(style) = doc.style_mut(self.gallery) {
            style.translate_y_px = scroll_y * 0.3;
        }
        progress
    }
}
