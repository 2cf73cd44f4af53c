//! 画布和页面绘制单元测试

use crate::canvas::ImageFit;
use crate::config::PageConfig;
use crate::page::EssayPage;
use crate::painter::{paint_page, Palette};
use crate::{Canvas, Color, Paint, Rect};
use std::path::PathBuf;

/// 测试矩形填充和平移
#[test]
fn test_draw_rect_with_translation() {
    let mut canvas = Canvas::new(40, 40);
    canvas.clear(Color::WHITE);
    canvas.save();
    canvas.translate(10.0, 10.0);
    canvas.draw_rect(&Rect::new(0.0, 0.0, 5.0, 5.0), &Paint::new().with_color(Color::BLACK));
    canvas.restore();

    assert_eq!(canvas.get_pixel(12, 12), Color::BLACK);
    assert_eq!(canvas.get_pixel(2, 2), Color::WHITE);
    assert_eq!(canvas.translation(), (0.0, 0.0));
}

/// 测试裁剪区域
#[test]
fn test_clip_rect() {
    let mut canvas = Canvas::new(40, 40);
    canvas.clear(Color::WHITE);
    canvas.save();
    canvas.clip_rect(Rect::new(0.0, 0.0, 20.0, 40.0));
    canvas.draw_rect(&Rect::new(0.0, 0.0, 40.0, 40.0), &Paint::new().with_color(Color::BLACK));
    canvas.restore();

    assert_eq!(canvas.get_pixel(10, 10), Color::BLACK);
    assert_eq!(canvas.get_pixel(30, 10), Color::WHITE);
}

/// 测试图片按 cover 填满目标区域
#[test]
fn test_draw_image_cover() {
    let red = [255u8, 0, 0, 255];
    let rgba: Vec<u8> = red.iter().copied().cycle().take(4 * 4 * 2).collect();
    let mut canvas = Canvas::new(20, 20);
    canvas.clear(Color::WHITE);
    canvas.draw_image(&rgba, 4, 2, &Rect::new(0.0, 0.0, 10.0, 10.0), ImageFit::Cover, 1.0);

    assert_eq!(canvas.get_pixel(0, 0), Color::rgb(255, 0, 0));
    assert_eq!(canvas.get_pixel(9, 9), Color::rgb(255, 0, 0));
    assert_eq!(canvas.get_pixel(15, 15), Color::WHITE);
}

/// 测试颜色解析
#[test]
fn test_palette_parse() {
    let palette = Palette::from_config("#FAF8F5", "#E4572E");
    assert_eq!(palette.background, Color::rgb(0xFA, 0xF8, 0xF5));
    assert_eq!(palette.accent, Color::rgb(0xE4, 0x57, 0x2E));

    let fallback = Palette::from_config("nope", "");
    assert_eq!(fallback.background, Color::WHITE);
}

/// 测试整页绘制：激活的指示点用强调色，进度条按比例绘制
#[test]
fn test_paint_page() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/essay.json");
    let config = PageConfig::from_file(&path).expect("config");
    let accent = Color::parse(&config.window.accent_color).expect("accent");
    let mut page = EssayPage::new(config, None, 0).expect("page");

    let viewport = *page.viewport();
    let mut canvas = Canvas::new(viewport.width as u32, viewport.height as u32);
    paint_page(&page, &mut canvas);

    let doc = page.document();
    let dot = doc.rect(doc.query_selector_all(".dot")[0]);
    let (cx, cy) = (dot.x + dot.width / 2.0, dot.y + dot.height / 2.0);
    assert_eq!(canvas.get_pixel(cx as u32, cy as u32), accent);

    // 滚到一半：进度条左端为强调色，右端不是
    let half = (page.content_height() - viewport.height) / 2.0;
    page.dispatch(&crate::event::PageEvent::Scroll { y: half }, 100).expect("scroll");
    paint_page(&page, &mut canvas);
    assert_eq!(canvas.get_pixel(2, 1), accent);
    assert_ne!(canvas.get_pixel(viewport.width as u32 - 2, 1), accent);
}
