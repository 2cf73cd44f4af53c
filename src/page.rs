//! 页面运行时
//!
//! 由配置构建文档，完成布局，绑定两个轮播和所有滚动效果，
//! 然后按投递顺序把输入事件和到期定时器分发给它们。

use crate::carousel::{AutoAdvanceConfig, Carousel, CarouselConfig, TRACK_TRANSITION};
use crate::config::{EssayBlock, PageConfig};
use crate::device::{DeviceClass, DoubleTapGuard, OrientationReset};
use crate::dom::{BoxHint, CarouselBinding, CarouselRoles, Document, DomCarouselSurface, ElementId};
use crate::effects::{
    ProgressBar, RevealRule, ScrollReveal, SmoothScroll, StickyHeader, TextOverlay, TitleAutosizer, Viewport,
};
use crate::error::Result;
use crate::event::{Key, PageEvent, TouchEvent};
use crate::layout::layout_document;
use crate::media::{load_eager, ImageStore, LazyImages};
use crate::text::{FixedAdvance, TextMeasure, TextRenderer};
use crate::timer::{TimerId, TimerQueue};
use crate::Point;

pub const HEADER_HEIGHT: f32 = 56.0;
pub const PROGRESS_HEIGHT: f32 = 4.0;
pub const DOT_SIZE: f32 = 10.0;
const DOTS_ROW_HEIGHT: f32 = 32.0;
const SECTION_PADDING: f32 = 24.0;

/// 事件处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// 文档有变化，需要重绘
    pub redraw: bool,
    /// 宿主应阻止默认行为（双击缩放）
    pub prevent_default: bool,
}

impl EventOutcome {
    fn redraw() -> Self {
        Self {
            redraw: true,
            prevent_default: false,
        }
    }
}

/// 轮播实例及其文档绑定
#[derive(Debug)]
pub struct BoundCarousel {
    pub carousel: Carousel,
    pub binding: CarouselBinding,
}

impl BoundCarousel {
    fn bind(doc: &mut Document, roles: &CarouselRoles, config: CarouselConfig, now: u64, timers: &mut TimerQueue) -> Option<Self> {
        let binding = CarouselBinding::resolve(doc, roles, config.total_slides)?;
        let mut carousel = Carousel::new(config);
        carousel.start(now, &mut DomCarouselSurface::new(doc, &binding), timers);
        Some(Self { carousel, binding })
    }
}

fn node(doc: &mut Document, parent: ElementId, tag: &str, classes: &[&str], hint: BoxHint) -> ElementId {
    let id = doc.create_element(parent, tag, classes);
    doc.set_hint(id, hint);
    id
}

fn text_node(doc: &mut Document, parent: ElementId, tag: &str, classes: &[&str], text: &str) -> ElementId {
    let id = node(doc, parent, tag, classes, BoxHint::default());
    doc.set_text(id, text);
    id
}

fn dots_row(doc: &mut Document, parent: ElementId, class: &str, dot_class: &str, count: usize) {
    let row = node(
        doc,
        parent,
        "div",
        &[class],
        BoxHint {
            row: true,
            centered: true,
            height: Some(DOTS_ROW_HEIGHT),
            gap: 8.0,
            ..Default::default()
        },
    );
    for _ in 0..count {
        node(
            doc,
            row,
            "span",
            &[dot_class],
            BoxHint {
                width: Some(DOT_SIZE),
                height: Some(DOT_SIZE),
                ..Default::default()
            },
        );
    }
}

/// 由配置生成页面结构
pub fn build_document(config: &PageConfig) -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    let header = node(
        &mut doc,
        body,
        "header",
        &["site-header"],
        BoxHint {
            height: Some(HEADER_HEIGHT),
            out_of_flow: true,
            ..Default::default()
        },
    );
    doc.set_text(header, &config.title);
    node(
        &mut doc,
        body,
        "div",
        &["progress-bar"],
        BoxHint {
            height: Some(PROGRESS_HEIGHT),
            out_of_flow: true,
            ..Default::default()
        },
    );

    // 主图集
    let images = &config.gallery.images;
    let gallery = node(&mut doc, body, "section", &["image-gallery"], BoxHint::default());
    let container = node(
        &mut doc,
        gallery,
        "div",
        &["gallery-container"],
        BoxHint {
            height: Some(config.gallery.height),
            ..Default::default()
        },
    );
    let track = node(
        &mut doc,
        container,
        "div",
        &["gallery-track"],
        BoxHint {
            row: true,
            height: Some(config.gallery.height),
            width_percent: Some(images.len().max(1) as f32 * 100.0),
            ..Default::default()
        },
    );
    for src in images {
        let img = node(
            &mut doc,
            track,
            "img",
            &["gallery-image"],
            BoxHint {
                width_percent: Some(100.0 / images.len() as f32),
                ..Default::default()
            },
        );
        doc.set_attr(img, "src", src);
    }
    dots_row(&mut doc, gallery, "gallery-dots", "dot", images.len());

    // 正文
    let essay = node(
        &mut doc,
        body,
        "article",
        &["essay"],
        BoxHint {
            padding: SECTION_PADDING,
            gap: 16.0,
            ..Default::default()
        },
    );
    text_node(&mut doc, essay, "h1", &["essay-title"], &config.title);
    if !config.subtitle.is_empty() {
        text_node(&mut doc, essay, "p", &["essay-subtitle"], &config.subtitle);
    }
    for block in &config.essay.blocks {
        match block {
            EssayBlock::Paragraph { text } => {
                text_node(&mut doc, essay, "p", &["reveal"], text);
            }
            EssayBlock::Highlight { text, delay } => {
                let id = text_node(&mut doc, essay, "p", &["highlight-text"], text);
                doc.set_attr(id, "data-delay", &delay.to_string());
            }
            EssayBlock::Image { src, height } => {
                let id = node(
                    &mut doc,
                    essay,
                    "img",
                    &["reveal"],
                    BoxHint {
                        height: Some(*height),
                        ..Default::default()
                    },
                );
                doc.set_attr(id, "data-src", src);
            }
        }
    }

    // 成员幻灯片
    let photos = &config.members.photos;
    if !photos.is_empty() {
        let members = node(
            &mut doc,
            body,
            "section",
            &["members"],
            BoxHint {
                padding: SECTION_PADDING,
                gap: 12.0,
                ..Default::default()
            },
        );
        text_node(&mut doc, members, "h2", &["members-title"], &config.members.title);
        let container = node(
            &mut doc,
            members,
            "div",
            &["member-photos"],
            BoxHint {
                height: Some(config.members.height),
                ..Default::default()
            },
        );
        let track = node(
            &mut doc,
            container,
            "div",
            &["member-photos-track"],
            BoxHint {
                row: true,
                height: Some(config.members.height),
                width_percent: Some(100.0),
                ..Default::default()
            },
        );
        for photo in photos {
            let img = node(
                &mut doc,
                track,
                "img",
                &["member-photo"],
                BoxHint {
                    width_percent: Some(100.0),
                    ..Default::default()
                },
            );
            doc.set_attr(img, "src", &photo.photo);
            doc.set_attr(img, "alt", &photo.name);
        }
        dots_row(&mut doc, members, "member-dots", "member-dot", photos.len());
    }

    doc
}

pub struct EssayPage {
    config: PageConfig,
    doc: Document,
    timers: TimerQueue,
    viewport: Viewport,
    device: DeviceClass,
    text: Option<TextRenderer>,
    fallback_measure: FixedAdvance,
    carousels: Vec<BoundCarousel>,
    /// 正在拖动的轮播（`carousels` 下标）
    dragging: Option<usize>,
    reveals: Vec<ScrollReveal>,
    sticky: Option<StickyHeader>,
    progress: Option<ProgressBar>,
    title: Option<TitleAutosizer>,
    overlay: Option<TextOverlay>,
    orientation: Option<OrientationReset>,
    double_tap: DoubleTapGuard,
    images: ImageStore,
    lazy: LazyImages,
    smooth: Option<SmoothScroll>,
}

impl EssayPage {
    /// 构建页面；`text` 为 None 时用等宽近似测量文本
    pub fn new(config: PageConfig, text: Option<TextRenderer>, now: u64) -> Result<Self> {
        let viewport = Viewport::new(config.window.width, config.window.height);
        let mut doc = build_document(&config);
        let mut timers = TimerQueue::new();

        let device = DeviceClass::detect(&config.window.user_agent, viewport.width);
        device.apply(&mut doc);

        let mut images = ImageStore::new(config.base_dir.clone());
        load_eager(&mut doc, ".gallery-image", &mut images);
        load_eager(&mut doc, ".member-photo", &mut images);
        let lazy = LazyImages::new(&doc);

        let title = TitleAutosizer::new(&doc, ".essay-title");
        let sticky = StickyHeader::new(&doc, ".site-header", ".image-gallery");
        let progress = ProgressBar::new(&doc, ".progress-bar");
        let overlay = TextOverlay::new(&doc, ".image-gallery", ".essay");

        let auto = AutoAdvanceConfig {
            interval_ms: config.gallery.auto_advance_ms,
            resume_after_ms: config.gallery.resume_after_ms,
        };
        let gallery_config = CarouselConfig::main_gallery(config.gallery.images.len())
            .with_auto_advance((auto.interval_ms > 0).then_some(auto));
        let mut carousels = Vec::new();
        if let Some(bound) = BoundCarousel::bind(&mut doc, &CarouselRoles::MAIN_GALLERY, gallery_config, now, &mut timers) {
            carousels.push(bound);
        }
        let member_config = CarouselConfig::member_slideshow(config.members.photos.len());
        if let Some(bound) = BoundCarousel::bind(&mut doc, &CarouselRoles::MEMBER_SLIDESHOW, member_config, now, &mut timers) {
            carousels.push(bound);
        }

        let orientation = carousels
            .first()
            .filter(|bound| bound.carousel.config().keyboard)
            .map(|bound| OrientationReset::new(bound.binding.track, TRACK_TRANSITION));

        let fallback = (config.reveal.fallback_ms > 0).then_some(config.reveal.fallback_ms);
        let reveals = [RevealRule::CONTENT.with_fallback(fallback), RevealRule::HIGHLIGHT]
            .into_iter()
            .filter_map(|rule| ScrollReveal::new(&doc, rule, now, &mut timers))
            .collect();

        let mut page = Self {
            config,
            doc,
            timers,
            viewport,
            device,
            text,
            fallback_measure: FixedAdvance::default(),
            carousels,
            dragging: None,
            reveals,
            sticky,
            progress,
            title,
            overlay,
            orientation,
            double_tap: DoubleTapGuard::new(),
            images,
            lazy,
            smooth: None,
        };
        page.relayout()?;
        page.on_scroll(now);

        tracing::info!(
            "essay page ready: {} carousels, {} elements, {:?}",
            page.carousels.len(),
            page.doc.len(),
            page.device
        );
        Ok(page)
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn text(&self) -> Option<&TextRenderer> {
        self.text.as_ref()
    }

    pub fn lazy_pending(&self) -> usize {
        self.lazy.pending_count()
    }

    fn find_carousel(&self, name: &str) -> Option<&Carousel> {
        self.carousels.iter().map(|b| &b.carousel).find(|c| c.name() == name)
    }

    /// 主图集
    pub fn gallery(&self) -> Option<&Carousel> {
        self.find_carousel("gallery")
    }

    /// 成员幻灯片
    pub fn members(&self) -> Option<&Carousel> {
        self.find_carousel("members")
    }

    pub fn content_height(&self) -> f32 {
        self.doc.content_height()
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport.height).max(0.0)
    }

    /// 宿主下一次需要调用 `frame` 的时间
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn is_animating(&self) -> bool {
        self.smooth.is_some()
    }

    /// 布局 → 标题自适应 → 再布局（标题高度随字号变化）
    fn relayout(&mut self) -> Result<()> {
        let measure: &dyn TextMeasure = match &self.text {
            Some(renderer) => renderer,
            None => &self.fallback_measure,
        };
        layout_document(&mut self.doc, self.viewport.width, measure)?;
        if let Some(title) = &self.title {
            let size = title.apply(&mut self.doc, measure);
            tracing::debug!("essay title sized to {}px", size);
            layout_document(&mut self.doc, self.viewport.width, measure)?;
        }
        self.viewport.scroll_y = self.viewport.scroll_y.min(self.max_scroll());
        Ok(())
    }

    /// 滚动后更新所有滚动驱动的效果
    fn on_scroll(&mut self, now: u64) {
        let scroll_y = self.viewport.scroll_y;
        if let Some(sticky) = &self.sticky {
            sticky.update(&mut self.doc, scroll_y);
        }
        if let Some(progress) = &self.progress {
            progress.update(&mut self.doc, &self.viewport);
        }
        if let Some(overlay) = &self.overlay {
            overlay.update(&mut self.doc, scroll_y);
        }
        for reveal in &mut self.reveals {
            reveal.observe(&mut self.doc, &self.viewport, now, &mut self.timers);
        }
        self.lazy.update(&mut self.doc, &self.viewport, &mut self.images);
    }

    fn scroll_to(&mut self, y: f32, now: u64) {
        self.viewport.scroll_y = y.clamp(0.0, self.max_scroll());
        self.on_scroll(now);
    }

    /// 平滑滚动到指定位置，由 `frame` 推进
    pub fn smooth_scroll_to(&mut self, target: f32, now: u64) {
        let target = target.clamp(0.0, self.max_scroll());
        self.smooth = Some(SmoothScroll::new(
            self.viewport.scroll_y,
            target,
            now,
            SmoothScroll::DEFAULT_DURATION_MS,
        ));
    }

    /// 视口坐标 → 文档坐标
    fn to_document(&self, x: f32, y: f32) -> Point {
        Point::new(x, y + self.viewport.scroll_y)
    }

    fn pointer_down(&mut self, x: f32, y: f32, now: u64) -> bool {
        // 上一次拖动丢了抬起事件，先按最后位置结束它
        let ended = self.pointer_up(now);
        let at = self.to_document(x, y);
        for (index, bound) in self.carousels.iter_mut().enumerate() {
            let BoundCarousel { carousel, binding } = bound;
            if let Some(dot) = binding.dot_at(&self.doc, at.x, at.y) {
                let mut surface = DomCarouselSurface::new(&mut self.doc, binding);
                carousel.click_dot(dot, now, &mut surface, &mut self.timers);
                return true;
            }
            if binding.container_contains(&self.doc, at.x, at.y) {
                let mut surface = DomCarouselSurface::new(&mut self.doc, binding);
                carousel.begin_drag(at.x, now, &mut surface, &mut self.timers);
                self.dragging = Some(index);
                return true;
            }
        }
        ended
    }

    fn pointer_move(&mut self, x: f32) -> bool {
        let Some(bound) = self.dragging.and_then(|i| self.carousels.get_mut(i)) else {
            return false;
        };
        let BoundCarousel { carousel, binding } = bound;
        carousel.drag_to(x, &mut DomCarouselSurface::new(&mut self.doc, binding));
        true
    }

    fn pointer_up(&mut self, now: u64) -> bool {
        let Some(bound) = self.dragging.take().and_then(|i| self.carousels.get_mut(i)) else {
            return false;
        };
        let BoundCarousel { carousel, binding } = bound;
        carousel
            .end_drag(now, &mut DomCarouselSurface::new(&mut self.doc, binding))
            .is_some()
    }

    fn key_down(&mut self, key: &Key) -> bool {
        let mut handled = false;
        for BoundCarousel { carousel, binding } in &mut self.carousels {
            handled |= carousel.handle_key(key, &mut DomCarouselSurface::new(&mut self.doc, binding));
        }
        handled
    }

    fn touch_end(&mut self, touch: &TouchEvent, now: u64) -> EventOutcome {
        let redraw = self.pointer_up(now);
        let prevent_default = match touch.primary() {
            Some(t) => self.double_tap.on_touch_end(t.position(), now),
            None => false,
        };
        EventOutcome {
            redraw,
            prevent_default,
        }
    }

    /// 分发一个输入事件
    pub fn dispatch(&mut self, event: &PageEvent, now: u64) -> Result<EventOutcome> {
        let outcome = match event {
            PageEvent::PointerDown { x, y } => EventOutcome {
                redraw: self.pointer_down(*x, *y, now),
                prevent_default: false,
            },
            PageEvent::PointerMove { x, .. } => EventOutcome {
                redraw: self.pointer_move(*x),
                prevent_default: false,
            },
            PageEvent::PointerUp { .. } => EventOutcome {
                redraw: self.pointer_up(now),
                prevent_default: false,
            },
            PageEvent::TouchStart(touch) => match touch.primary() {
                Some(t) => EventOutcome {
                    redraw: self.pointer_down(t.x, t.y, now),
                    prevent_default: false,
                },
                None => EventOutcome::default(),
            },
            PageEvent::TouchMove(touch) => match touch.primary() {
                Some(t) => EventOutcome {
                    redraw: self.pointer_move(t.x),
                    prevent_default: false,
                },
                None => EventOutcome::default(),
            },
            PageEvent::TouchEnd(touch) => self.touch_end(touch, now),
            PageEvent::KeyDown(key) => EventOutcome {
                redraw: self.key_down(key),
                prevent_default: false,
            },
            PageEvent::Scroll { y } => {
                self.smooth = None;
                self.scroll_to(*y, now);
                EventOutcome::redraw()
            }
            PageEvent::Resize { width, height } => {
                self.viewport.width = *width;
                self.viewport.height = *height;
                self.device = DeviceClass::detect(&self.config.window.user_agent, *width);
                self.device.apply(&mut self.doc);
                self.relayout()?;
                self.on_scroll(now);
                EventOutcome::redraw()
            }
            PageEvent::OrientationChange => {
                if let Some(reset) = &mut self.orientation {
                    reset.on_orientation_change(now, &mut self.timers);
                }
                EventOutcome::default()
            }
        };
        Ok(outcome)
    }

    fn route_timer(&mut self, id: TimerId, now: u64) -> bool {
        for BoundCarousel { carousel, binding } in &mut self.carousels {
            let mut surface = DomCarouselSurface::new(&mut self.doc, binding);
            if carousel.on_timer(id, now, &mut surface, &mut self.timers) {
                return true;
            }
        }
        for reveal in &mut self.reveals {
            if reveal.on_timer(id, &mut self.doc, &mut self.timers) {
                return true;
            }
        }
        if let Some(reset) = &mut self.orientation {
            if reset.on_timer(id, now, &mut self.doc, &mut self.timers) {
                return true;
            }
        }
        tracing::debug!("timer {} fired with no owner", id.raw());
        false
    }

    /// 逐个触发到期定时器，返回是否需要重绘
    pub fn tick(&mut self, now: u64) -> bool {
        let mut redraw = false;
        while let Some(id) = self.timers.pop_due(now) {
            redraw |= self.route_timer(id, now);
        }
        redraw
    }

    /// 推进一帧：平滑滚动 + 定时器
    pub fn frame(&mut self, now: u64) -> bool {
        let mut redraw = false;
        if let Some(smooth) = self.smooth {
            let (y, done) = smooth.sample(now);
            self.scroll_to(y, now);
            if done {
                self.smooth = None;
            }
            redraw = true;
        }
        self.tick(now) || redraw
    }

    /// 页面卸载：停止自动播放
    pub fn shutdown(&mut self) {
        for bound in &mut self.carousels {
            bound.carousel.shutdown(&mut self.timers);
        }
    }
}
