//! 把轮播绑定到文档元素

use super::{Document, ElementId};
use crate::carousel::{CarouselSurface, Transition, TRACK_TRANSITION};

/// 轮播各角色的选择器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselRoles {
    pub container: &'static str,
    pub track: &'static str,
    pub slides: &'static str,
    pub dots: &'static str,
}

impl CarouselRoles {
    pub const MAIN_GALLERY: CarouselRoles = CarouselRoles {
        container: ".gallery-container",
        track: ".gallery-track",
        slides: ".gallery-image",
        dots: ".dot",
    };

    pub const MEMBER_SLIDESHOW: CarouselRoles = CarouselRoles {
        container: ".member-photos",
        track: ".member-photos-track",
        slides: ".member-photo",
        dots: ".member-dot",
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselBinding {
    pub container: ElementId,
    pub track: ElementId,
    pub slides: Vec<ElementId>,
    pub dots: Vec<ElementId>,
}

impl CarouselBinding {
    /// 查找所需结构；缺少任一元素或数量不符时返回 None
    pub fn resolve(doc: &Document, roles: &CarouselRoles, total_slides: usize) -> Option<Self> {
        let container = doc.query_selector(roles.container);
        let track = doc.query_selector(roles.track);
        let slides = doc.query_selector_all(roles.slides);
        let dots = doc.query_selector_all(roles.dots);

        tracing::debug!(
            "carousel elements for {}: container={} track={} slides={} dots={}",
            roles.track,
            container.is_some(),
            track.is_some(),
            slides.len(),
            dots.len()
        );

        let (Some(container), Some(track)) = (container, track) else {
            tracing::warn!("{}: container or track missing, carousel not initialized", roles.track);
            return None;
        };
        if total_slides == 0 || dots.len() != total_slides || slides.len() != total_slides {
            tracing::warn!(
                "{}: expected {} slides and dots, found {} slides and {} dots; carousel not initialized",
                roles.track,
                total_slides,
                slides.len(),
                dots.len()
            );
            return None;
        }

        Some(Self {
            container,
            track,
            slides,
            dots,
        })
    }

    /// 指示点命中测试（文档坐标）
    pub fn dot_at(&self, doc: &Document, x: f32, y: f32) -> Option<usize> {
        let point = crate::Point::new(x, y);
        self.dots.iter().position(|dot| doc.rect(*dot).contains(&point))
    }

    pub fn container_contains(&self, doc: &Document, x: f32, y: f32) -> bool {
        doc.rect(self.container).contains(&crate::Point::new(x, y))
    }
}

/// 以文档元素为输出面
pub struct DomCarouselSurface<'a> {
    doc: &'a mut Document,
    binding: &'a CarouselBinding,
}

impl<'a> DomCarouselSurface<'a> {
    pub fn new(doc: &'a mut Document, binding: &'a CarouselBinding) -> Self {
        Self { doc, binding }
    }
}

impl CarouselSurface for DomCarouselSurface<'_> {
    fn container_width(&self) -> f32 {
        self.doc.rect(self.binding.container).width
    }

    fn set_track_offset(&mut self, percent: f32) {
        if let Some(style) = self.doc.style_mut(self.binding.track) {
            style.translate_x_percent = percent;
        }
    }

    fn set_transition(&mut self, transition: Transition) {
        if let Some(style) = self.doc.style_mut(self.binding.track) {
            style.transition = match transition {
                Transition::None => None,
                Transition::Smooth => Some(TRACK_TRANSITION.to_string()),
            };
        }
    }

    fn set_active_dot(&mut self, index: usize) {
        for (i, dot) in self.binding.dots.iter().enumerate() {
            self.doc.toggle_class(*dot, "active", i == index);
        }
    }
}
