//! 图片加载
//!
//! 解码失败只记录错误日志并标记为失败，不重试、不替换占位图。

use crate::dom::{Document, ElementId};
use crate::effects::Viewport;
use crate::error::{EssayError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 解码后的 RGBA 图片
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|source| EssayError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}

#[derive(Debug)]
enum Slot {
    Loaded(DecodedImage),
    Failed,
}

/// 按 src 缓存的图片仓库
#[derive(Debug)]
pub struct ImageStore {
    base_dir: PathBuf,
    slots: HashMap<String, Slot>,
}

impl ImageStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            slots: HashMap::new(),
        }
    }

    fn resolve(&self, src: &str) -> PathBuf {
        let path = Path::new(src);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// 加载图片；同一 src 只尝试一次
    pub fn load(&mut self, src: &str) -> Option<&DecodedImage> {
        if !self.slots.contains_key(src) {
            let path = self.resolve(src);
            let slot = match DecodedImage::open(&path) {
                Ok(img) => {
                    tracing::debug!("image loaded: {} ({}x{})", src, img.width, img.height);
                    Slot::Loaded(img)
                }
                Err(e) => {
                    tracing::error!("image failed to load: {}", e);
                    Slot::Failed
                }
            };
            self.slots.insert(src.to_string(), slot);
        }
        self.get(src)
    }

    pub fn get(&self, src: &str) -> Option<&DecodedImage> {
        match self.slots.get(src) {
            Some(Slot::Loaded(img)) => Some(img),
            _ => None,
        }
    }

    pub fn has_failed(&self, src: &str) -> bool {
        matches!(self.slots.get(src), Some(Slot::Failed))
    }

    pub fn attempted(&self) -> usize {
        self.slots.len()
    }
}

/// 懒加载：带 `data-src` 的图片接近视口时才加载
#[derive(Debug)]
pub struct LazyImages {
    pending: Vec<ElementId>,
}

impl LazyImages {
    /// 视口下方的预加载距离
    pub const PRELOAD_MARGIN: f32 = 200.0;

    pub fn new(doc: &Document) -> Self {
        let pending = doc
            .query_selector_all("img")
            .into_iter()
            .filter(|id| doc.get(*id).and_then(|e| e.attr("data-src")).is_some())
            .collect();
        Self { pending }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// 加载进入预加载范围的图片
    pub fn update(&mut self, doc: &mut Document, viewport: &Viewport, store: &mut ImageStore) {
        let limit = viewport.bottom() + Self::PRELOAD_MARGIN;
        let mut due = Vec::new();
        self.pending.retain(|id| {
            if doc.rect(*id).top() <= limit {
                due.push(*id);
                false
            } else {
                true
            }
        });

        for id in due {
            let Some(src) = doc.get(id).and_then(|e| e.attr("data-src")).map(str::to_string) else {
                continue;
            };
            doc.set_attr(id, "src", &src);
            if store.load(&src).is_some() {
                doc.add_class(id, "loaded");
            }
        }
    }
}

/// 立即加载选择器匹配的图片（图集、成员照片）
pub fn load_eager(doc: &mut Document, selector: &str, store: &mut ImageStore) {
    for (index, id) in doc.query_selector_all(selector).into_iter().enumerate() {
        let Some(src) = doc.get(id).and_then(|e| e.attr("src")).map(str::to_string) else {
            continue;
        };
        if store.load(&src).is_some() {
            doc.add_class(id, "loaded");
            tracing::debug!("{} image {} loaded successfully: {}", selector, index + 1, src);
        }
    }
}
