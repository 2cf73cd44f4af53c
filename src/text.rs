//! 文本模块 - 字体加载、测量和绘制

use crate::error::{EssayError, Result};
use crate::{Canvas, Color, Paint};
use fontdue::{Font, FontSettings, Metrics};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// 文本宽度测量
///
/// 标题自适应和布局只需要单行宽度，不关心字形本身。
pub trait TextMeasure {
    fn measure(&self, text: &str, size: f32) -> f32;
}

/// 等宽近似测量：每个字符宽 `size * advance`，没有可用字体时使用
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    pub advance: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { advance: 0.55 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance
    }
}

/// 按单词折行
pub fn wrap_lines(measure: &dyn TextMeasure, text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if !current.is_empty() && measure.measure(&candidate, size) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// 文本渲染器
pub struct TextRenderer {
    font: Font,
    /// 字形缓存 (char, size*10) -> (Metrics, Bitmap)
    cache: Mutex<HashMap<(char, u32), (Metrics, Vec<u8>)>>,
}

impl TextRenderer {
    pub fn from_bytes(font_data: &[u8]) -> Result<Self> {
        let settings = FontSettings {
            scale: 40.0,
            ..Default::default()
        };
        let font = Font::from_bytes(font_data, settings).map_err(|e| EssayError::Font(e.to_string()))?;
        Ok(Self {
            font,
            cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| EssayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// 加载系统字体（Linux / macOS 常见路径）
    pub fn load_system_font() -> Result<Self> {
        let candidates = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/Library/Fonts/Arial Unicode.ttf",
        ];

        for path in candidates.iter().map(Path::new) {
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(renderer) => {
                    tracing::info!("font loaded: {}", path.display());
                    return Ok(renderer);
                }
                Err(e) => tracing::debug!("font {} rejected: {}", path.display(), e),
            }
        }
        Err(EssayError::Font("no system font found".to_string()))
    }

    fn glyph(&self, ch: char, size: f32) -> (Metrics, Vec<u8>) {
        let key = (ch, (size * 10.0) as u32);
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return hit.clone();
            }
        }
        // 光栅化放在锁外
        let glyph = self.font.rasterize(ch, size);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, glyph.clone());
        }
        glyph
    }

    /// 绘制单行文本，`baseline` 为基线 y
    pub fn draw_text(&self, canvas: &mut Canvas, text: &str, x: f32, baseline: f32, size: f32, paint: &Paint) {
        let (tx, ty) = canvas.translation();
        let mut cursor_x = x + tx;
        let baseline = baseline + ty;
        for ch in text.chars() {
            let (metrics, bitmap) = self.glyph(ch, size);
            let glyph_x = cursor_x + metrics.xmin as f32;
            let glyph_y = baseline - metrics.height as f32 - metrics.ymin as f32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx] as f32 / 255.0;
                    if coverage <= 0.001 {
                        continue;
                    }
                    let alpha = (paint.color.a as f32 * coverage) as u8;
                    if alpha > 0 {
                        let px = (glyph_x + gx as f32).round() as i32;
                        let py = (glyph_y + gy as f32).round() as i32;
                        canvas.set_pixel(px, py, Color::new(paint.color.r, paint.color.g, paint.color.b, alpha));
                    }
                }
            }
            cursor_x += metrics.advance_width;
        }
    }

    pub fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.font.metrics(ch, size).advance_width).sum()
    }
}

impl TextMeasure for TextRenderer {
    fn measure(&self, text: &str, size: f32) -> f32 {
        self.measure_text(text, size)
    }
}
