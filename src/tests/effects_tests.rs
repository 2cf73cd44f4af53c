//! 滚动效果单元测试
//! 测试滚动显现、吸顶导航、进度条、标题自适应、覆盖视差和平滑滚动

use crate::dom::{BoxHint, Document, ElementId};
use crate::effects::{
    ease_in_out_cubic, fit_font_size, ProgressBar, RevealRule, ScrollReveal, SmoothScroll, StickyHeader,
    TextOverlay, TitleAutosizer, Viewport, TITLE_MAX_SIZE, TITLE_MIN_SIZE,
};
use crate::text::FixedAdvance;
use crate::timer::TimerQueue;
use crate::Rect;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

fn placed(doc: &mut Document, classes: &[&str], rect: Rect) -> ElementId {
    let body = doc.body();
    let id = doc.create_element(body, "div", classes);
    if let Some(e) = doc.get_mut(id) {
        e.rect = rect;
    }
    id
}

fn viewport(scroll_y: f32) -> Viewport {
    Viewport {
        scroll_y,
        width: 375.0,
        height: 600.0,
    }
}

fn fire_due(reveal: &mut ScrollReveal, doc: &mut Document, timers: &mut TimerQueue, now: u64) {
    while let Some(id) = timers.pop_due(now) {
        reveal.on_timer(id, doc, timers);
    }
}

/// 测试进入视口后显现，且滚回去不撤销
#[test]
fn test_reveal_is_irreversible() {
    let mut doc = Document::new();
    let el = placed(&mut doc, &["reveal"], Rect::new(0.0, 1000.0, 375.0, 100.0));
    let mut timers = TimerQueue::new();
    let mut reveal = ScrollReveal::new(&doc, RevealRule::CONTENT.with_fallback(None), 0, &mut timers).expect("reveal");

    reveal.observe(&mut doc, &viewport(0.0), 0, &mut timers);
    assert!(!doc.has_class(el, "revealed"));

    // 可见 20%，超过 10% 阈值
    reveal.observe(&mut doc, &viewport(420.0), 10, &mut timers);
    assert!(doc.has_class(el, "revealed"));
    assert_eq!(reveal.observed_count(), 0);

    reveal.observe(&mut doc, &viewport(0.0), 20, &mut timers);
    assert!(doc.has_class(el, "revealed"));
}

/// 测试兜底定时器强制显现剩余元素
#[test]
fn test_reveal_fallback() {
    let mut doc = Document::new();
    let far = placed(&mut doc, &["reveal"], Rect::new(0.0, 5000.0, 375.0, 100.0));
    let mut timers = TimerQueue::new();
    let mut reveal = ScrollReveal::new(&doc, RevealRule::CONTENT, 0, &mut timers).expect("reveal");

    fire_due(&mut reveal, &mut doc, &mut timers, 2999);
    assert!(!doc.has_class(far, "revealed"));
    fire_due(&mut reveal, &mut doc, &mut timers, 3000);
    assert!(doc.has_class(far, "revealed"));
    assert!(timers.is_empty());
}

/// 测试高亮文字按 data-delay 延迟点亮
#[test]
fn test_highlight_delay() {
    let mut doc = Document::new();
    let now_el = placed(&mut doc, &["highlight-text"], Rect::new(0.0, 100.0, 375.0, 40.0));
    let later = placed(&mut doc, &["highlight-text"], Rect::new(0.0, 200.0, 375.0, 40.0));
    doc.set_attr(later, "data-delay", "2");
    let mut timers = TimerQueue::new();
    let mut reveal = ScrollReveal::new(&doc, RevealRule::HIGHLIGHT, 0, &mut timers).expect("reveal");
    assert_eq!(reveal.rule().class, "active");
    assert_eq!(reveal.rule().fallback_ms, None);
    assert!(timers.is_empty());

    reveal.observe(&mut doc, &viewport(0.0), 100, &mut timers);
    assert!(doc.has_class(now_el, "active"));
    assert!(!doc.has_class(later, "active"));

    fire_due(&mut reveal, &mut doc, &mut timers, 499);
    assert!(!doc.has_class(later, "active"));
    fire_due(&mut reveal, &mut doc, &mut timers, 500);
    assert!(doc.has_class(later, "active"));
}

/// 测试高亮的底部收缩：刚露出底边 50px 内的元素不点亮
#[test]
fn test_highlight_bottom_margin() {
    let mut doc = Document::new();
    let el = placed(&mut doc, &["highlight-text"], Rect::new(0.0, 560.0, 375.0, 40.0));
    let mut timers = TimerQueue::new();
    let mut reveal = ScrollReveal::new(&doc, RevealRule::HIGHLIGHT, 0, &mut timers).expect("reveal");

    reveal.observe(&mut doc, &viewport(0.0), 0, &mut timers);
    assert!(!doc.has_class(el, "active"));
    reveal.observe(&mut doc, &viewport(60.0), 0, &mut timers);
    assert!(doc.has_class(el, "active"));
}

/// 测试没有匹配元素时不创建
#[test]
fn test_reveal_without_elements() {
    let doc = Document::new();
    let mut timers = TimerQueue::new();
    assert!(ScrollReveal::new(&doc, RevealRule::CONTENT, 0, &mut timers).is_none());
    assert!(timers.is_empty());
}

/// 测试吸顶导航阈值 = 首屏高度 - 导航高度
#[test]
fn test_sticky_header_threshold() {
    let mut doc = Document::new();
    let header = placed(&mut doc, &["site-header"], Rect::new(0.0, 0.0, 375.0, 56.0));
    placed(&mut doc, &["image-gallery"], Rect::new(0.0, 0.0, 375.0, 400.0));
    let sticky = StickyHeader::new(&doc, ".site-header", ".image-gallery").expect("sticky");

    assert!(approx(sticky.threshold(&doc), 344.0));
    assert!(!sticky.update(&mut doc, 344.0));
    assert!(sticky.update(&mut doc, 345.0));
    assert!(doc.has_class(header, "visible"));
    assert!(!sticky.update(&mut doc, 10.0));
    assert!(!doc.has_class(header, "visible"));
}

/// 测试进度条比例
#[test]
fn test_progress_fraction() {
    let vp = Viewport {
        scroll_y: 750.0,
        width: 375.0,
        height: 500.0,
    };
    assert!(approx(ProgressBar::fraction(2000.0, &vp), 0.5));
    assert!(approx(ProgressBar::fraction(1000.0, &vp), 1.0));
    // 页面不可滚动
    assert!(approx(ProgressBar::fraction(400.0, &vp), 0.0));
    assert!(approx(ProgressBar::fraction(500.0, &vp), 0.0));
}

/// 测试进度条写入宽度
#[test]
fn test_progress_update() {
    let mut doc = Document::new();
    let body = doc.body();
    if let Some(e) = doc.get_mut(body) {
        e.rect = Rect::new(0.0, 0.0, 375.0, 1100.0);
    }
    let bar = placed(&mut doc, &["progress-bar"], Rect::new(0.0, 0.0, 375.0, 4.0));
    let progress = ProgressBar::new(&doc, ".progress-bar").expect("bar");

    let percent = progress.update(&mut doc, &viewport(125.0));
    assert!(approx(percent, 25.0));
    assert_eq!(doc.get(bar).and_then(|e| e.style.width_percent), Some(percent));
}

/// 测试标题字号逐像素缩小
#[test]
fn test_fit_font_size() {
    let measure = FixedAdvance::default();
    // 17 字符 * 0.55 = 9.35px / 字号
    assert_eq!(fit_font_size(&measure, "Hello World Title", 300.0, TITLE_MAX_SIZE, TITLE_MIN_SIZE), 32.0);
    assert_eq!(fit_font_size(&measure, "Hi", 300.0, TITLE_MAX_SIZE, TITLE_MIN_SIZE), TITLE_MAX_SIZE);
}

/// 测试标题字号下限
#[test]
fn test_fit_font_size_floor() {
    let measure = FixedAdvance::default();
    let long = "An extraordinarily long essay title that will never fit";
    assert_eq!(fit_font_size(&measure, long, 40.0, TITLE_MAX_SIZE, TITLE_MIN_SIZE), TITLE_MIN_SIZE);
}

/// 测试按父元素内容宽度设置字号
#[test]
fn test_title_autosizer_uses_parent_width() {
    let mut doc = Document::new();
    let body = doc.body();
    let essay = doc.create_element(body, "article", &["essay"]);
    doc.set_hint(essay, BoxHint { padding: 25.0, ..Default::default() });
    if let Some(e) = doc.get_mut(essay) {
        e.rect = Rect::new(0.0, 0.0, 350.0, 500.0);
    }
    let title = doc.create_element(essay, "h1", &["essay-title"]);
    doc.set_text(title, "Hello World Title");

    let sizer = TitleAutosizer::new(&doc, ".essay-title").expect("title");
    let size = sizer.apply(&mut doc, &FixedAdvance::default());
    assert_eq!(size, 32.0);
    assert_eq!(doc.get(title).and_then(|e| e.style.font_size), Some(32.0));
}

/// 测试覆盖进度和视差
#[test]
fn test_text_overlay() {
    assert!(approx(TextOverlay::progress(0.0, 500.0), 0.0));
    assert!(approx(TextOverlay::progress(200.0, 500.0), 0.5));
    assert!(approx(TextOverlay::progress(1000.0, 500.0), 1.0));
    assert!(approx(TextOverlay::progress(10.0, 0.0), 1.0));

    let mut doc = Document::new();
    let gallery = placed(&mut doc, &["image-gallery"], Rect::new(0.0, 0.0, 375.0, 500.0));
    let essay = placed(&mut doc, &["essay"], Rect::new(0.0, 500.0, 375.0, 1000.0));
    let overlay = TextOverlay::new(&doc, ".image-gallery", ".essay").expect("overlay");
    overlay.update(&mut doc, 200.0);

    let essay_style = &doc.get(essay).expect("essay").style;
    assert!(approx(essay_style.translate_y_px, -15.0));
    assert!(approx(essay_style.background_alpha.unwrap_or(0.0), 0.975));
    assert!(approx(doc.get(gallery).expect("gallery").style.translate_y_px, 60.0));
}

/// 测试缓动曲线
#[test]
fn test_ease_in_out_cubic() {
    assert!(approx(ease_in_out_cubic(0.0), 0.0));
    assert!(approx(ease_in_out_cubic(0.25), 0.0625));
    assert!(approx(ease_in_out_cubic(0.5), 0.5));
    assert!(approx(ease_in_out_cubic(0.75), 0.9375));
    assert!(approx(ease_in_out_cubic(1.0), 1.0));
    assert!(approx(ease_in_out_cubic(2.0), 1.0));
}

/// 测试平滑滚动采样
#[test]
fn test_smooth_scroll_sample() {
    let scroll = SmoothScroll::new(0.0, 800.0, 100, SmoothScroll::DEFAULT_DURATION_MS);
    assert_eq!(scroll.sample(100), (0.0, false));
    let (mid, done) = scroll.sample(500);
    assert!(approx(mid, 400.0));
    assert!(!done);
    let (end, done) = scroll.sample(900);
    assert!(approx(end, 800.0));
    assert!(done);
    assert_eq!(scroll.target(), 800.0);
}
