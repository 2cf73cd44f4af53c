//! Canvas 画布模块 - 软件光栅化的绘制目标

use crate::error::{EssayError, Result};
use crate::{Color, Paint, PaintStyle, Rect};

/// 画布状态
#[derive(Clone)]
struct CanvasState {
    clip_rect: Option<Rect>,
    translation: (f32, f32),
}

/// 图片缩放模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFit {
    /// 保持比例填满，可能裁剪
    #[default]
    Cover,
    /// 保持比例完整显示，可能留白
    Contain,
    /// 拉伸填满
    Fill,
}

/// 画布
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    clip_rect: Option<Rect>,
    translation: (f32, f32),
    state_stack: Vec<CanvasState>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; (width * height) as usize],
            clip_rect: None,
            translation: (0.0, 0.0),
            state_stack: Vec::new(),
        }
    }

    /// 保存当前状态（裁剪区域和变换）
    pub fn save(&mut self) {
        self.state_stack.push(CanvasState {
            clip_rect: self.clip_rect,
            translation: self.translation,
        });
    }

    /// 恢复上一次保存的状态
    pub fn restore(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.clip_rect = state.clip_rect;
            self.translation = state.translation;
        }
    }

    /// 平移坐标系
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.translation.0 += dx;
        self.translation.1 += dy;
    }

    /// 当前平移量
    pub fn translation(&self) -> (f32, f32) {
        self.translation
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// 设置裁剪区域（与当前裁剪区域求交，坐标受平移影响）
    pub fn clip_rect(&mut self, rect: Rect) {
        let rect = rect.offset(self.translation.0, self.translation.1);
        self.clip_rect = Some(match self.clip_rect {
            Some(current) => {
                let x = current.x.max(rect.x);
                let y = current.y.max(rect.y);
                let right = current.right().min(rect.right());
                let bottom = current.bottom().min(rect.bottom());
                if right > x && bottom > y {
                    Rect::new(x, y, right - x, bottom - y)
                } else {
                    Rect::new(0.0, 0.0, 0.0, 0.0)
                }
            }
            None => rect,
        });
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Color::TRANSPARENT
        }
    }

    /// 设置像素（设备坐标，带 alpha 混合和裁剪）
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        if let Some(clip) = &self.clip_rect {
            if (x as f32) < clip.x || (x as f32) >= clip.right() ||
               (y as f32) < clip.y || (y as f32) >= clip.bottom() {
                return;
            }
        }

        let idx = (y as u32 * self.width + x as u32) as usize;
        if color.a == 255 {
            self.pixels[idx] = color;
        } else if color.a > 0 {
            self.pixels[idx] = color.blend(&self.pixels[idx]);
        }
    }

    fn set_pixel_aa(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if coverage <= 0.0 { return; }
        let a = (color.a as f32 * coverage.min(1.0)) as u8;
        self.set_pixel(x, y, Color::new(color.r, color.g, color.b, a));
    }

    pub fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        match paint.style {
            PaintStyle::Fill => self.fill_rect(rect, paint.color),
            PaintStyle::Stroke => {
                let w = paint.stroke_width;
                self.fill_rect(&Rect::new(rect.x, rect.y, rect.width, w), paint.color);
                self.fill_rect(&Rect::new(rect.x, rect.bottom() - w, rect.width, w), paint.color);
                self.fill_rect(&Rect::new(rect.x, rect.y, w, rect.height), paint.color);
                self.fill_rect(&Rect::new(rect.right() - w, rect.y, w, rect.height), paint.color);
            }
        }
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let (tx, ty) = self.translation;
        let x0 = (rect.x + tx).max(0.0) as i32;
        let y0 = (rect.y + ty).max(0.0) as i32;
        let x1 = (rect.right() + tx).min(self.width as f32) as i32;
        let y1 = (rect.bottom() + ty).min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// 绘制圆形（指示点）
    pub fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        let cx = cx + self.translation.0;
        let cy = cy + self.translation.1;
        let half_stroke = paint.stroke_width / 2.0;
        let outer = match paint.style {
            PaintStyle::Fill => radius,
            PaintStyle::Stroke => radius + half_stroke,
        };

        let x0 = (cx - outer - 1.0).max(0.0) as i32;
        let y0 = (cy - outer - 1.0).max(0.0) as i32;
        let x1 = (cx + outer + 1.0).min(self.width as f32) as i32;
        let y1 = (cy + outer + 1.0).min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();

                let coverage = match paint.style {
                    PaintStyle::Fill => radius + 0.5 - d,
                    PaintStyle::Stroke => {
                        let inner = radius - half_stroke;
                        (d - inner + 0.5).min(outer - d + 0.5)
                    }
                };
                if paint.anti_alias {
                    self.set_pixel_aa(x, y, paint.color, coverage.min(1.0));
                } else if coverage >= 0.5 {
                    self.set_pixel(x, y, paint.color);
                }
            }
        }
    }

    /// 绘制 RGBA 图片到目标区域
    pub fn draw_image(&mut self, rgba: &[u8], img_w: u32, img_h: u32, dest: &Rect, fit: ImageFit, opacity: f32) {
        if img_w == 0 || img_h == 0 || rgba.len() < (img_w * img_h * 4) as usize {
            return;
        }

        let x = dest.x + self.translation.0;
        let y = dest.y + self.translation.1;
        let (w, h) = (dest.width, dest.height);

        let (scale_x, scale_y) = match fit {
            ImageFit::Cover => {
                let s = (w / img_w as f32).max(h / img_h as f32);
                (s, s)
            }
            ImageFit::Contain => {
                let s = (w / img_w as f32).min(h / img_h as f32);
                (s, s)
            }
            ImageFit::Fill => (w / img_w as f32, h / img_h as f32),
        };
        let offset_x = (w - img_w as f32 * scale_x) / 2.0;
        let offset_y = (h - img_h as f32 * scale_y) / 2.0;

        let dest_x0 = x.max(0.0) as i32;
        let dest_y0 = y.max(0.0) as i32;
        let dest_x1 = (x + w).min(self.width as f32) as i32;
        let dest_y1 = (y + h).min(self.height as f32) as i32;

        for dest_y in dest_y0..dest_y1 {
            let local_y = (dest_y as f32 - y - offset_y) / scale_y;
            if local_y < 0.0 || local_y >= img_h as f32 { continue; }
            for dest_x in dest_x0..dest_x1 {
                let local_x = (dest_x as f32 - x - offset_x) / scale_x;
                if local_x < 0.0 || local_x >= img_w as f32 { continue; }

                // 最近邻采样
                let idx = ((local_y as u32 * img_w + local_x as u32) * 4) as usize;
                let color = Color::new(rgba[idx], rgba[idx + 1], rgba[idx + 2], rgba[idx + 3]);
                self.set_pixel(dest_x, dest_y, color.with_opacity(opacity));
            }
        }
    }

    /// 导出为 RGBA 字节数组
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity((self.width * self.height * 4) as usize);
        for pixel in &self.pixels {
            data.extend_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
        }
        data
    }

    /// 保存为 PNG
    pub fn save_png(&self, path: &str) -> Result<()> {
        use image::{ImageBuffer, Rgba};

        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(self.width, self.height, self.to_rgba())
            .ok_or_else(|| EssayError::Snapshot("pixel buffer size mismatch".to_string()))?;
        img.save(path).map_err(|e| EssayError::Snapshot(e.to_string()))
    }
}
