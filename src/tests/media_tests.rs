//! 图片加载单元测试

use crate::dom::Document;
use crate::effects::Viewport;
use crate::media::{load_eager, DecodedImage, ImageStore, LazyImages};
use crate::Rect;
use std::path::PathBuf;

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

/// 测试解码 PNG
#[test]
fn test_decode_png() {
    let img = DecodedImage::open(&demos_dir().join("images/gallery-1.png")).expect("decode");
    assert_eq!((img.width, img.height), (320, 200));
    assert_eq!(img.rgba.len(), 320 * 200 * 4);
}

/// 测试加载失败只尝试一次
#[test]
fn test_failed_image_never_retried() {
    let mut store = ImageStore::new(demos_dir());
    assert!(store.load("images/missing.jpg").is_none());
    assert!(store.has_failed("images/missing.jpg"));
    assert_eq!(store.attempted(), 1);

    assert!(store.load("images/missing.jpg").is_none());
    assert_eq!(store.attempted(), 1);
}

/// 测试同一 src 只解码一次
#[test]
fn test_store_caches() {
    let mut store = ImageStore::new(demos_dir());
    assert!(store.load("images/member-1.png").is_some());
    assert!(store.load("images/member-1.png").is_some());
    assert_eq!(store.attempted(), 1);
    assert!(store.get("images/member-1.png").is_some());
    assert!(!store.has_failed("images/member-1.png"));
}

/// 测试懒加载只处理接近视口的图片
#[test]
fn test_lazy_images_near_viewport() {
    let mut doc = Document::new();
    let body = doc.body();
    let near = doc.create_element(body, "img", &["reveal"]);
    doc.set_attr(near, "data-src", "images/harbor.png");
    let far = doc.create_element(body, "img", &["reveal"]);
    doc.set_attr(far, "data-src", "images/gallery-2.png");
    let eager = doc.create_element(body, "img", &["gallery-image"]);
    doc.set_attr(eager, "src", "images/gallery-3.png");
    if let Some(e) = doc.get_mut(near) {
        e.rect = Rect::new(0.0, 750.0, 300.0, 100.0);
    }
    if let Some(e) = doc.get_mut(far) {
        e.rect = Rect::new(0.0, 2000.0, 300.0, 100.0);
    }

    let mut store = ImageStore::new(demos_dir());
    let mut lazy = LazyImages::new(&doc);
    assert_eq!(lazy.pending_count(), 2);

    // 视口底边 600 + 预加载 200 = 800
    lazy.update(&mut doc, &Viewport::new(375.0, 600.0), &mut store);
    assert_eq!(lazy.pending_count(), 1);
    assert!(doc.has_class(near, "loaded"));
    assert_eq!(doc.get(near).and_then(|e| e.attr("src")), Some("images/harbor.png"));
    assert!(!doc.has_class(far, "loaded"));

    load_eager(&mut doc, ".gallery-image", &mut store);
    assert!(doc.has_class(eager, "loaded"));
    assert_eq!(store.attempted(), 2);
}

/// 测试懒加载失败不重试、不加 loaded
#[test]
fn test_lazy_failure() {
    let mut doc = Document::new();
    let body = doc.body();
    let img = doc.create_element(body, "img", &[]);
    doc.set_attr(img, "data-src", "images/nope.png");

    let mut store = ImageStore::new(demos_dir());
    let mut lazy = LazyImages::new(&doc);
    let vp = Viewport::new(375.0, 600.0);
    lazy.update(&mut doc, &vp, &mut store);
    lazy.update(&mut doc, &vp, &mut store);

    assert!(!doc.has_class(img, "loaded"));
    assert!(store.has_failed("images/nope.png"));
    assert_eq!(store.attempted(), 1);
    assert_eq!(lazy.pending_count(), 0);
}
