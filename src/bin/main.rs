//! 无窗口渲染：加载页面，回放一段交互，导出 PNG 快照
//!
//! 用法：essay-render [config.json] [out.png]

use photo_essay::config::PageConfig;
use photo_essay::event::{Key, PageEvent};
use photo_essay::logging::init_logging;
use photo_essay::page::EssayPage;
use photo_essay::painter::paint_page;
use photo_essay::{Canvas, TextRenderer};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("demos/essay.json"));
    let out = args.next().unwrap_or_else(|| "essay.png".to_string());

    let config = PageConfig::from_file(&config_path)?;
    let text = TextRenderer::load_system_font()
        .map_err(|e| tracing::warn!("{}; text will not be drawn", e))
        .ok();
    let mut page = EssayPage::new(config, text, 0)?;

    // 第一次自动播放 → 键盘前进 → 滚到正文
    let mut now = 0;
    for _ in 0..4 {
        now += 1000;
        page.frame(now);
    }
    page.dispatch(&PageEvent::KeyDown(Key::ArrowRight), now)?;
    page.smooth_scroll_to(page.viewport().height * 0.6, now);
    while page.is_animating() {
        now += 16;
        page.frame(now);
    }
    now += 1000;
    page.frame(now);

    if let Some(gallery) = page.gallery() {
        tracing::info!("gallery on slide {} of {}", gallery.current() + 1, gallery.total());
    }

    let viewport = *page.viewport();
    let mut canvas = Canvas::new(viewport.width as u32, viewport.height as u32);
    paint_page(&page, &mut canvas);
    canvas.save_png(&out)?;
    tracing::info!("snapshot written to {} at t={}ms", out, now);

    page.shutdown();
    Ok(())
}
