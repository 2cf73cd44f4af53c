//! 把页面文档绘制到画布

use crate::canvas::ImageFit;
use crate::dom::{Document, ElementId};
use crate::layout::{BODY_FONT_SIZE, LINE_HEIGHT};
use crate::media::ImageStore;
use crate::page::{EssayPage, DOT_SIZE};
use crate::text::{wrap_lines, TextRenderer};
use crate::{Canvas, Color, Paint, PaintStyle, Rect};

const TEXT_COLOR: Color = Color::rgb(34, 34, 34);
const MUTED_COLOR: Color = Color::rgb(190, 190, 190);
const PLACEHOLDER_COLOR: Color = Color::rgb(225, 225, 225);

/// 页面调色
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub accent: Color,
}

impl Palette {
    pub fn from_config(background: &str, accent: &str) -> Self {
        Self {
            background: Color::parse(background).unwrap_or(Color::WHITE),
            accent: Color::parse(accent).unwrap_or(Color::rgb(228, 87, 46)),
        }
    }
}

struct Painter<'a> {
    doc: &'a Document,
    images: &'a ImageStore,
    text: Option<&'a TextRenderer>,
    palette: Palette,
}

impl Painter<'_> {
    fn paint_element(&self, canvas: &mut Canvas, id: ElementId) {
        let Some(element) = self.doc.get(id) else { return };
        if element.hint.out_of_flow {
            return;
        }
        // 未显现的 .reveal 元素透明度为 0
        if element.has_class("reveal") && !element.has_class("revealed") {
            return;
        }

        let rect = element.rect;
        let clips = element.has_class("gallery-container") || element.has_class("member-photos");

        canvas.save();
        canvas.translate(
            element.style.translate_x_percent / 100.0 * rect.width,
            element.style.translate_y_px,
        );
        if clips {
            canvas.clip_rect(rect);
        }

        if let Some(alpha) = element.style.background_alpha {
            canvas.draw_rect(&rect, &Paint::new().with_color(Color::WHITE.with_opacity(alpha)));
        }
        if element.has_class("highlight-text") && element.has_class("active") {
            canvas.draw_rect(&rect, &Paint::new().with_color(self.palette.accent.with_opacity(0.18)));
        }

        match element.tag.as_str() {
            "img" => self.paint_image(canvas, element.attr("src"), &rect),
            "span" if element.has_class("dot") || element.has_class("member-dot") => {
                // 未激活的点只描边
                let paint = if element.has_class("active") {
                    Paint::new().with_color(self.palette.accent)
                } else {
                    Paint::new()
                        .with_color(MUTED_COLOR)
                        .with_style(PaintStyle::Stroke)
                        .with_stroke_width(1.5)
                };
                canvas.draw_circle(
                    rect.x + rect.width / 2.0,
                    rect.y + rect.height / 2.0,
                    DOT_SIZE / 2.0,
                    &paint,
                );
            }
            _ => {}
        }

        if !element.text.is_empty() {
            let size = element.style.font_size.unwrap_or(BODY_FONT_SIZE);
            self.paint_text(canvas, &element.text, &rect, size);
        }

        for child in &element.children {
            self.paint_element(canvas, *child);
        }
        canvas.restore();
    }

    fn paint_image(&self, canvas: &mut Canvas, src: Option<&str>, rect: &Rect) {
        match src.and_then(|s| self.images.get(s)) {
            Some(img) => canvas.draw_image(&img.rgba, img.width, img.height, rect, ImageFit::Cover, 1.0),
            None => canvas.draw_rect(rect, &Paint::new().with_color(PLACEHOLDER_COLOR)),
        }
    }

    fn paint_text(&self, canvas: &mut Canvas, text: &str, rect: &Rect, size: f32) {
        let Some(renderer) = self.text else { return };
        let paint = Paint::new().with_color(TEXT_COLOR);
        let line_height = size * LINE_HEIGHT;
        for (i, line) in wrap_lines(renderer, text, size, rect.width).iter().enumerate() {
            let baseline = rect.y + line_height * i as f32 + (line_height + size * 0.7) / 2.0;
            renderer.draw_text(canvas, line, rect.x, baseline, size, &paint);
        }
    }

    /// 吸顶导航和进度条，固定在视口上
    fn paint_fixed(&self, canvas: &mut Canvas, viewport_width: f32) {
        if let Some(header) = self.doc.query_selector(".site-header").and_then(|id| self.doc.get(id)) {
            if header.has_class("visible") {
                canvas.draw_rect(&header.rect, &Paint::new().with_color(self.palette.background.with_opacity(0.95)));
                canvas.draw_rect(
                    &Rect::new(0.0, header.rect.bottom() - 1.0, viewport_width, 1.0),
                    &Paint::new().with_color(MUTED_COLOR),
                );
                let inner = Rect::new(16.0, header.rect.y, viewport_width - 32.0, header.rect.height);
                self.paint_text(canvas, &header.text, &inner, BODY_FONT_SIZE);
            }
        }
        if let Some(bar) = self.doc.query_selector(".progress-bar").and_then(|id| self.doc.get(id)) {
            let percent = bar.style.width_percent.unwrap_or(0.0);
            let rect = Rect::new(0.0, 0.0, viewport_width * percent / 100.0, bar.rect.height);
            canvas.draw_rect(&rect, &Paint::new().with_color(self.palette.accent));
        }
    }
}

/// 绘制页面当前视口
pub fn paint_page(page: &EssayPage, canvas: &mut Canvas) {
    let window = &page.config().window;
    let palette = Palette::from_config(&window.background_color, &window.accent_color);
    let painter = Painter {
        doc: page.document(),
        images: page.images(),
        text: page.text(),
        palette,
    };
    let viewport = page.viewport();

    canvas.clear(palette.background);
    canvas.save();
    canvas.translate(0.0, -viewport.scroll_y);
    painter.paint_element(canvas, page.document().body());
    canvas.restore();
    painter.paint_fixed(canvas, viewport.width);
}
