//! 页面配置（essay.json）

use crate::error::{EssayError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub essay: EssayConfig,
    #[serde(default)]
    pub members: MembersConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub window: WindowConfig,
    /// 配置文件所在目录，图片路径相对于它解析
    #[serde(skip)]
    pub base_dir: PathBuf,
}

fn default_title() -> String { "Photo Essay".to_string() }

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: String::new(),
            gallery: GalleryConfig::default(),
            essay: EssayConfig::default(),
            members: MembersConfig::default(),
            reveal: RevealConfig::default(),
            window: WindowConfig::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: PageConfig = serde_json::from_str(json)?;
        config.base_dir = PathBuf::from(".");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| EssayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&json)?;
        if let Some(dir) = path.parent() {
            config.base_dir = dir.to_path_buf();
        }
        tracing::info!(
            "page config loaded: {} ({} gallery images, {} essay blocks, {} members)",
            path.display(),
            config.gallery.images.len(),
            config.essay.blocks.len(),
            config.members.photos.len()
        );
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryConfig {
    #[serde(default = "default_gallery_images")]
    pub images: Vec<String>,
    #[serde(default = "default_gallery_height")]
    pub height: f32,
    #[serde(default = "default_auto_advance_ms")]
    pub auto_advance_ms: u64,
    #[serde(default = "default_resume_after_ms")]
    pub resume_after_ms: u64,
}

fn default_gallery_images() -> Vec<String> {
    (1..=3).map(|i| format!("images/gallery-{}.jpg", i)).collect()
}
fn default_gallery_height() -> f32 { 420.0 }
fn default_auto_advance_ms() -> u64 { 3000 }
fn default_resume_after_ms() -> u64 { 5000 }

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            images: default_gallery_images(),
            height: default_gallery_height(),
            auto_advance_ms: default_auto_advance_ms(),
            resume_after_ms: default_resume_after_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EssayConfig {
    #[serde(default)]
    pub blocks: Vec<EssayBlock>,
}

/// 正文块
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EssayBlock {
    Paragraph {
        text: String,
    },
    Highlight {
        text: String,
        #[serde(default)]
        delay: u32,
    },
    Image {
        src: String,
        #[serde(default = "default_block_image_height")]
        height: f32,
    },
}

fn default_block_image_height() -> f32 { 220.0 }

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersConfig {
    #[serde(default = "default_members_title")]
    pub title: String,
    #[serde(default)]
    pub photos: Vec<MemberPhoto>,
    #[serde(default = "default_members_height")]
    pub height: f32,
}

fn default_members_title() -> String { "The Team".to_string() }
fn default_members_height() -> f32 { 300.0 }

impl Default for MembersConfig {
    fn default() -> Self {
        Self {
            title: default_members_title(),
            photos: Vec::new(),
            height: default_members_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPhoto {
    pub name: String,
    pub photo: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealConfig {
    /// 兜底显现延迟，0 表示关闭
    #[serde(default = "default_fallback_ms")]
    pub fallback_ms: u64,
}

fn default_fallback_ms() -> u64 { 3000 }

impl Default for RevealConfig {
    fn default() -> Self {
        Self { fallback_ms: default_fallback_ms() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_bg")]
    pub background_color: String,
    #[serde(default = "default_accent")]
    pub accent_color: String,
    #[serde(default)]
    pub user_agent: String,
}

fn default_width() -> f32 { 375.0 }
fn default_height() -> f32 { 667.0 }
fn default_bg() -> String { "#FFFFFF".to_string() }
fn default_accent() -> String { "#E4572E".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background_color: default_bg(),
            accent_color: default_accent(),
            user_agent: String::new(),
        }
    }
}
