//! 页面配置单元测试

use crate::config::{EssayBlock, PageConfig};
use crate::error::EssayError;
use std::path::{Path, PathBuf};

/// 测试空配置全部取默认值
#[test]
fn test_defaults() {
    let config = PageConfig::from_json("{}").expect("config");
    assert_eq!(config.title, "Photo Essay");
    assert_eq!(config.gallery.images.len(), 3);
    assert_eq!(config.gallery.auto_advance_ms, 3000);
    assert_eq!(config.gallery.resume_after_ms, 5000);
    assert_eq!(config.reveal.fallback_ms, 3000);
    assert_eq!(config.window.width, 375.0);
    assert_eq!(config.window.accent_color, "#E4572E");
    assert!(config.essay.blocks.is_empty());
    assert!(config.members.photos.is_empty());
    assert_eq!(config.members.title, "The Team");
}

/// 测试正文块和驼峰字段
#[test]
fn test_blocks_and_camel_case() {
    let json = r##"{
        "gallery": { "images": ["a.jpg"], "autoAdvanceMs": 4000 },
        "essay": { "blocks": [
            { "kind": "paragraph", "text": "One" },
            { "kind": "highlight", "text": "Two", "delay": 3 },
            { "kind": "image", "src": "b.jpg" }
        ]},
        "window": { "userAgent": "iPhone", "backgroundColor": "#000" },
        "somethingElse": true
    }"##;
    let config = PageConfig::from_json(json).expect("config");
    assert_eq!(config.gallery.images, vec!["a.jpg".to_string()]);
    assert_eq!(config.gallery.auto_advance_ms, 4000);
    assert_eq!(config.gallery.resume_after_ms, 5000);
    assert_eq!(config.window.user_agent, "iPhone");
    assert_eq!(config.window.background_color, "#000");
    assert_eq!(
        config.essay.blocks,
        vec![
            EssayBlock::Paragraph { text: "One".to_string() },
            EssayBlock::Highlight { text: "Two".to_string(), delay: 3 },
            EssayBlock::Image { src: "b.jpg".to_string(), height: 220.0 },
        ]
    );
}

/// 测试非法 JSON
#[test]
fn test_invalid_json() {
    assert!(matches!(PageConfig::from_json("{ nope"), Err(EssayError::Config(_))));
    assert!(matches!(
        PageConfig::from_json(r#"{ "essay": { "blocks": [{ "kind": "video" }] } }"#),
        Err(EssayError::Config(_))
    ));
}

/// 测试文件不存在
#[test]
fn test_missing_file() {
    let err = PageConfig::from_file(Path::new("/definitely/not/here.json")).expect_err("missing");
    assert!(matches!(err, EssayError::Io { .. }));
    assert!(err.to_string().contains("here.json"));
}

/// 测试示例配置，图片相对配置文件目录解析
#[test]
fn test_demo_config() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/essay.json");
    let config = PageConfig::from_file(&path).expect("demo config");
    assert_eq!(config.members.photos.len(), 5);
    assert_eq!(config.gallery.images.len(), 3);
    assert!(config.base_dir.ends_with("demos"));
}
